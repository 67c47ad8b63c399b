//! # Domain Model: Posts, Comments, and the Liked Set
//!
//! The JSON shape of [`Post`] is the interchange format: it is what the
//! `posts` blob holds on disk and what `export`/`import` read and write.
//! Collections exported by older builds (or assembled by hand) are expected
//! to load cleanly, so deserialization is deliberately tolerant:
//!
//! - `tags`, `likes`, `comments`, and `image` may be missing entirely.
//! - `date` may be missing or unparsable; it falls back to 1970-01-01
//!   instead of rejecting the record. Import validation never looks at
//!   dates, only at id/title/author/content.
//!
//! Ids are the creation time in Unix milliseconds. They are plain `i64`s
//! rather than UUIDs so that hand-edited collections stay readable and
//! sortable in a text editor.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single blog post. Owned by [`crate::blog::Blog`]; everything else works
/// on borrowed snapshots.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub image: Option<String>,
    pub date: NaiveDate,
    pub tags: Vec<String>,
    pub content: String,
    pub likes: u32,
    pub comments: Vec<Comment>,
}

// Custom deserializer so partial or legacy records load with defaults
// instead of failing the whole collection. A record that is missing a
// required field deserializes to an empty value and is then rejected by
// `has_required_fields`, mirroring where validation happens on import.
impl<'de> Deserialize<'de> for Post {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let helper = PostHelper::deserialize(deserializer)?;

        Ok(Post {
            id: helper.id,
            title: helper.title,
            author: helper.author,
            image: helper.image,
            date: parse_date_lenient(helper.date.as_deref()),
            tags: helper.tags,
            content: helper.content,
            likes: helper.likes,
            comments: helper.comments,
        })
    }
}

#[derive(Deserialize)]
struct PostHelper {
    #[serde(default)]
    id: i64,
    #[serde(default)]
    title: String,
    #[serde(default)]
    author: String,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    content: String,
    #[serde(default)]
    likes: u32,
    #[serde(default)]
    comments: Vec<Comment>,
}

impl Post {
    /// The minimal shape check applied to imported records: a nonzero id
    /// and non-empty title, author, and content. Deliberately does not
    /// trim; a whitespace-only title passes, exactly like a hand-rolled
    /// truthiness check would accept it.
    pub fn has_required_fields(&self) -> bool {
        self.id != 0
            && !self.title.is_empty()
            && !self.author.is_empty()
            && !self.content.is_empty()
    }
}

/// A comment on a post. Append-only; comments are never edited or removed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comment {
    pub id: i64,
    pub author: String,
    pub content: String,
    pub date: NaiveDate,
}

impl<'de> Deserialize<'de> for Comment {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let helper = CommentHelper::deserialize(deserializer)?;

        Ok(Comment {
            id: helper.id,
            author: helper.author,
            content: helper.content,
            date: parse_date_lenient(helper.date.as_deref()),
        })
    }
}

#[derive(Deserialize)]
struct CommentHelper {
    #[serde(default)]
    id: i64,
    #[serde(default)]
    author: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    date: Option<String>,
}

fn parse_date_lenient(raw: Option<&str>) -> NaiveDate {
    raw.and_then(|s| s.parse::<NaiveDate>().ok())
        .unwrap_or_default()
}

/// The ids of posts liked on this device, in the order they were liked.
///
/// This is a per-device memory of toggle direction. The `likes` counter on
/// each post is the displayed count; the two move in lockstep when
/// [`crate::blog::Blog::toggle_like`] runs, but importing a collection does
/// not reconcile them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LikedSet(Vec<i64>);

impl LikedSet {
    pub fn contains(&self, id: i64) -> bool {
        self.0.contains(&id)
    }

    /// Flips membership for `id` and returns the new state
    /// (`true` = now liked).
    pub fn toggle(&mut self, id: i64) -> bool {
        if let Some(pos) = self.0.iter().position(|&x| x == id) {
            self.0.remove(pos);
            false
        } else {
            self.0.push(id);
            true
        }
    }

    pub fn ids(&self) -> &[i64] {
        &self.0
    }
}

/// User input for creating or fully replacing a post's editable fields.
/// Tags arrive as the raw comma-separated string the user typed.
#[derive(Debug, Clone, Default)]
pub struct PostDraft {
    pub title: String,
    pub author: String,
    pub image: Option<String>,
    pub tags: String,
    pub content: String,
}

/// Splits a comma-separated tag string, trimming each entry and dropping
/// empties, so `"rust, cli,,  "` becomes `["rust", "cli"]`.
pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}
