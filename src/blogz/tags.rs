//! # Tag Index
//!
//! Derived from the post collection on demand; nothing here is stored.
//! Counting walks posts in collection order and counts every occurrence,
//! so a tag repeated on a single post counts each time it appears.

use crate::model::Post;

/// How many entries the popular list shows.
pub const POPULAR_TAG_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

/// Every tag with its occurrence count, most used first. Ties keep the
/// order in which the tags first appear in the collection.
pub fn tag_counts(posts: &[Post]) -> Vec<TagCount> {
    let mut counts: Vec<TagCount> = Vec::new();
    for post in posts {
        for tag in &post.tags {
            match counts.iter_mut().find(|c| &c.tag == tag) {
                Some(entry) => entry.count += 1,
                None => counts.push(TagCount {
                    tag: tag.clone(),
                    count: 1,
                }),
            }
        }
    }
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// The [`POPULAR_TAG_LIMIT`] most used tags.
pub fn popular(posts: &[Post]) -> Vec<TagCount> {
    let mut counts = tag_counts(posts);
    counts.truncate(POPULAR_TAG_LIMIT);
    counts
}

/// Every distinct tag, in first-appearance order.
pub fn distinct(posts: &[Post]) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for post in posts {
        for tag in &post.tags {
            if !tags.contains(tag) {
                tags.push(tag.clone());
            }
        }
    }
    tags
}
