//! # Query Engine and View Models
//!
//! Pure functions from the stored collection to what gets rendered.
//! Nothing in here mutates or persists; [`crate::blog::Blog`] owns the
//! data, the CLI owns the terminal, and this module owns the mapping
//! between them.
//!
//! Filtering is conjunctive: when both a tag and a query are active, a
//! post must satisfy both. Sorting is stable, so posts with equal keys
//! keep their collection order, and an unrecognized sort name leaves the
//! order entirely alone rather than guessing.

use crate::model::{LikedSet, Post};
use chrono::NaiveDate;

/// Preview length in characters, before the ellipsis.
pub const PREVIEW_LEN: usize = 150;

/// Which slice of the collection is visible, and in what order.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    /// Exact tag to filter on; `None` or the reserved name `all` keeps
    /// every post.
    pub tag: Option<String>,
    /// Case-insensitive substring query; empty keeps every post.
    pub query: String,
    /// Sort mode name: `newest`, `oldest`, or `likes`.
    pub sort: String,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            tag: None,
            query: String::new(),
            sort: "newest".to_string(),
        }
    }
}

/// The posts that `state` selects, in display order. Filters first, then
/// sorts the surviving posts.
pub fn visible(posts: &[Post], state: &ViewState) -> Vec<Post> {
    let mut out: Vec<Post> = posts
        .iter()
        .filter(|p| match &state.tag {
            Some(tag) if tag != "all" => p.tags.iter().any(|t| t == tag),
            _ => true,
        })
        .filter(|p| state.query.is_empty() || matches_query(p, &state.query))
        .cloned()
        .collect();
    sort_posts(&mut out, &state.sort);
    out
}

fn matches_query(post: &Post, query: &str) -> bool {
    let q = query.to_lowercase();
    post.title.to_lowercase().contains(&q)
        || post.content.to_lowercase().contains(&q)
        || post.author.to_lowercase().contains(&q)
        || post.tags.iter().any(|t| t.to_lowercase().contains(&q))
}

/// Reorders `posts` in place. The sort is stable and unknown mode names
/// are a no-op, so callers can pass the mode string straight through.
pub fn sort_posts(posts: &mut [Post], mode: &str) {
    match mode {
        "newest" => posts.sort_by(|a, b| b.date.cmp(&a.date)),
        "oldest" => posts.sort_by(|a, b| a.date.cmp(&b.date)),
        "likes" => posts.sort_by(|a, b| b.likes.cmp(&a.likes)),
        _ => {}
    }
}

/// A post prepared for display: date spelled out, markdown punctuation
/// stripped from the preview, liked state resolved against the device's
/// liked set. Renderers consume this without touching [`Post`] itself.
#[derive(Debug, Clone, PartialEq)]
pub struct PostCard {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub date: String,
    pub tags: Vec<String>,
    pub preview: String,
    pub likes: u32,
    pub comment_count: usize,
    pub is_liked: bool,
    pub image: Option<String>,
}

impl PostCard {
    pub fn project(post: &Post, liked: &LikedSet) -> Self {
        Self {
            id: post.id,
            title: post.title.clone(),
            author: post.author.clone(),
            date: format_display_date(post.date),
            tags: post.tags.clone(),
            preview: truncate_text(&strip_markdown(&post.content), PREVIEW_LEN),
            likes: post.likes,
            comment_count: post.comments.len(),
            is_liked: liked.contains(post.id),
            image: post.image.clone(),
        }
    }
}

/// Drops the markdown punctuation (`#`, `*`, backticks, link brackets)
/// that would clutter a preview. Cosmetic cleanup only; the stored
/// content is untouched and other characters pass through as-is.
pub fn strip_markdown(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, '#' | '*' | '`' | '[' | ']'))
        .collect()
}

fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_len).collect();
    format!("{}...", cut)
}

/// Dates render in long form, `January 2, 2024`.
pub fn format_display_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}
