//! # Post Repository
//!
//! [`Blog`] owns the post collection and the liked set, and is the only
//! code that mutates them. Every mutation writes straight through to the
//! store; there is no batching and no dirty tracking, so the blobs on disk
//! always match memory after a successful call.
//!
//! ## Failure policy
//!
//! Reads fail soft: a missing `posts` blob seeds the starter collection, a
//! corrupt one yields an empty collection, and neither is an error to the
//! caller. Writes fail loud: mutators apply the change in memory first and
//! return the store error, so a failed write leaves memory ahead of disk
//! until the next successful mutation rewrites the whole blob.
//!
//! ## Absent ids
//!
//! Operations on an id that is not in the collection are no-ops, reported
//! through the return value (`Ok(false)` / `Ok(None)`) rather than an
//! error. Stale ids are routine here: a list rendered before an import can
//! legitimately point at posts that no longer exist.

use crate::error::{BlogError, Result};
use crate::model::{split_tags, Comment, LikedSet, Post, PostDraft};
use crate::store::{keys, StateStore};
use chrono::Utc;

pub struct Blog<S: StateStore> {
    store: S,
    posts: Vec<Post>,
    liked: LikedSet,
}

impl<S: StateStore> Blog<S> {
    /// Loads the collection from `store`, seeding it with `seed` on first
    /// run. Never fails; see the module docs for the read policy.
    pub fn load(store: S, seed: &[Post]) -> Self {
        let mut first_run = false;
        let posts = match store.read(keys::POSTS) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_default(),
            Ok(None) => {
                first_run = true;
                seed.to_vec()
            }
            Err(_) => Vec::new(),
        };
        let liked = match store.read(keys::LIKED) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_default(),
            _ => LikedSet::default(),
        };

        let mut blog = Self {
            store,
            posts,
            liked,
        };
        if first_run && !blog.posts.is_empty() {
            // Best effort; an empty seed stays unwritten so a later run
            // can seed again.
            let _ = blog.save_posts();
        }
        blog
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn liked(&self) -> &LikedSet {
        &self.liked
    }

    pub fn get(&self, id: i64) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Access to the underlying store for the preference blobs that live
    /// beside the collection (`dark_mode`, `config`).
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Validates `draft` and prepends the new post to the collection.
    /// New posts sit at the front regardless of date; date sorting is a
    /// view concern.
    pub fn create(&mut self, draft: PostDraft) -> Result<&Post> {
        let fields = editable_fields(&draft)?;
        let post = Post {
            id: self.next_post_id(),
            title: fields.title,
            author: fields.author,
            image: fields.image,
            date: Utc::now().date_naive(),
            tags: fields.tags,
            content: fields.content,
            likes: 0,
            comments: Vec::new(),
        };
        self.posts.insert(0, post);
        self.save_posts()?;
        Ok(&self.posts[0])
    }

    /// Replaces the editable fields of the post with `id`. Id, date, like
    /// count, and comments are untouched. Returns `Ok(false)` when no such
    /// post exists.
    pub fn update(&mut self, id: i64, draft: PostDraft) -> Result<bool> {
        let fields = editable_fields(&draft)?;
        let Some(post) = self.posts.iter_mut().find(|p| p.id == id) else {
            return Ok(false);
        };
        post.title = fields.title;
        post.author = fields.author;
        post.image = fields.image;
        post.tags = fields.tags;
        post.content = fields.content;
        self.save_posts()?;
        Ok(true)
    }

    /// Removes the post with `id`. The liked set keeps its entry if one
    /// exists; see [`toggle_like`](Self::toggle_like) for why that is
    /// harmless.
    pub fn delete(&mut self, id: i64) -> Result<bool> {
        let before = self.posts.len();
        self.posts.retain(|p| p.id != id);
        if self.posts.len() == before {
            return Ok(false);
        }
        self.save_posts()?;
        Ok(true)
    }

    /// Flips the liked state of the post with `id` and moves its like
    /// counter in the same direction. Returns the new state, or `None` for
    /// an unknown id.
    ///
    /// The liked set decides toggle direction on this device; the counter
    /// is what gets displayed. Imported collections bring their own
    /// counters, so the two can disagree; the counter never drops below
    /// zero even when the set is stale.
    pub fn toggle_like(&mut self, id: i64) -> Result<Option<bool>> {
        let Some(post) = self.posts.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        let now_liked = self.liked.toggle(id);
        if now_liked {
            post.likes += 1;
        } else {
            post.likes = post.likes.saturating_sub(1);
        }
        self.save_posts()?;
        self.save_liked()?;
        Ok(Some(now_liked))
    }

    /// Appends a comment to the post with `id`, stamped with today's date.
    /// Returns `Ok(false)` when no such post exists.
    pub fn add_comment(&mut self, id: i64, author: &str, text: &str) -> Result<bool> {
        let author = author.trim();
        let text = text.trim();
        if author.is_empty() {
            return Err(BlogError::Validation(
                "Comment author cannot be empty".to_string(),
            ));
        }
        if text.is_empty() {
            return Err(BlogError::Validation(
                "Comment text cannot be empty".to_string(),
            ));
        }

        let stamp = Utc::now().timestamp_millis();
        let today = Utc::now().date_naive();
        let Some(post) = self.posts.iter_mut().find(|p| p.id == id) else {
            return Ok(false);
        };
        let mut comment_id = stamp;
        while post.comments.iter().any(|c| c.id == comment_id) {
            comment_id += 1;
        }
        post.comments.push(Comment {
            id: comment_id,
            author: author.to_string(),
            content: text.to_string(),
            date: today,
        });
        self.save_posts()?;
        Ok(true)
    }

    /// Replaces the whole collection with the valid records in `raw`, a
    /// JSON array of posts. Records failing the shape check are dropped
    /// silently; the accepted count is returned. If nothing passes, the
    /// import fails and the current collection is untouched.
    pub fn import_json(&mut self, raw: &str) -> Result<usize> {
        let value: serde_json::Value = serde_json::from_str(raw)
            .map_err(|e| BlogError::Import(format!("Not valid JSON: {}", e)))?;
        let Some(items) = value.as_array() else {
            return Err(BlogError::Import(
                "Expected a JSON array of posts".to_string(),
            ));
        };

        let valid: Vec<Post> = items
            .iter()
            .filter_map(|item| serde_json::from_value::<Post>(item.clone()).ok())
            .filter(Post::has_required_fields)
            .collect();

        if valid.is_empty() {
            return Err(BlogError::Import(
                "No valid posts found in the file".to_string(),
            ));
        }

        self.posts = valid;
        self.save_posts()?;
        Ok(self.posts.len())
    }

    /// The full collection as indented JSON, in collection order. Output
    /// feeds back into [`import_json`](Self::import_json) unchanged.
    pub fn export_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.posts)?)
    }

    fn next_post_id(&self) -> i64 {
        let mut id = Utc::now().timestamp_millis();
        while self.posts.iter().any(|p| p.id == id) {
            id += 1;
        }
        id
    }

    fn save_posts(&mut self) -> Result<()> {
        let raw = serde_json::to_string_pretty(&self.posts)?;
        self.store.write(keys::POSTS, &raw)
    }

    fn save_liked(&mut self) -> Result<()> {
        let raw = serde_json::to_string(&self.liked)?;
        self.store.write(keys::LIKED, &raw)
    }
}

struct EditableFields {
    title: String,
    author: String,
    image: Option<String>,
    tags: Vec<String>,
    content: String,
}

fn editable_fields(draft: &PostDraft) -> Result<EditableFields> {
    let title = draft.title.trim();
    if title.is_empty() {
        return Err(BlogError::Validation("Title cannot be empty".to_string()));
    }
    let author = draft.author.trim();
    if author.is_empty() {
        return Err(BlogError::Validation("Author cannot be empty".to_string()));
    }
    let content = draft.content.trim();
    if content.is_empty() {
        return Err(BlogError::Validation(
            "Content cannot be empty".to_string(),
        ));
    }
    let image = draft
        .image
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from);

    Ok(EditableFields {
        title: title.to_string(),
        author: author.to_string(),
        image,
        tags: split_tags(&draft.tags),
        content: content.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fs::FileStore;
    use crate::store::memory::InMemoryStore;
    use chrono::NaiveDate;

    fn draft(title: &str, author: &str, content: &str) -> PostDraft {
        PostDraft {
            title: title.to_string(),
            author: author.to_string(),
            image: None,
            tags: String::new(),
            content: content.to_string(),
        }
    }

    fn sample_seed() -> Vec<Post> {
        vec![Post {
            id: 100,
            title: "Seeded".into(),
            author: "Seeder".into(),
            image: None,
            date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            tags: vec!["seed".into()],
            content: "Starter content".into(),
            likes: 0,
            comments: vec![],
        }]
    }

    #[test]
    fn test_first_load_seeds_and_persists() {
        let mut store = InMemoryStore::new();
        {
            let blog = Blog::load(&mut store, &sample_seed());
            assert_eq!(blog.len(), 1);
            assert_eq!(blog.posts()[0].title, "Seeded");
        }
        // Second load with no seed still sees the seeded collection
        let blog = Blog::load(&mut store, &[]);
        assert_eq!(blog.len(), 1);
    }

    #[test]
    fn test_empty_seed_leaves_store_unwritten() {
        let mut store = InMemoryStore::new();
        {
            let blog = Blog::load(&mut store, &[]);
            assert!(blog.is_empty());
        }
        assert_eq!(store.read(keys::POSTS).unwrap(), None);
    }

    #[test]
    fn test_corrupt_posts_blob_loads_empty() {
        let mut store = InMemoryStore::new();
        store.write(keys::POSTS, "{ definitely not json").unwrap();

        let blog = Blog::load(&mut store, &sample_seed());
        assert!(blog.is_empty(), "corrupt data must not resurrect the seed");
    }

    #[test]
    fn test_corrupt_liked_blob_loads_empty_set() {
        let mut store = InMemoryStore::new();
        store.write(keys::LIKED, "oops").unwrap();

        let blog = Blog::load(&mut store, &[]);
        assert!(blog.liked().ids().is_empty());
    }

    #[test]
    fn test_create_prepends_and_persists() {
        let mut store = InMemoryStore::new();
        {
            let mut blog = Blog::load(&mut store, &sample_seed());
            blog.create(draft("Newest", "Ada", "Body")).unwrap();
            assert_eq!(blog.posts()[0].title, "Newest");
            assert_eq!(blog.posts()[1].title, "Seeded");
        }
        let blog = Blog::load(&mut store, &[]);
        assert_eq!(blog.len(), 2);
        assert_eq!(blog.posts()[0].title, "Newest");
    }

    #[test]
    fn test_create_trims_and_splits_tags() {
        let mut store = InMemoryStore::new();
        let mut blog = Blog::load(&mut store, &[]);
        let post = blog
            .create(PostDraft {
                title: "  Spaced  ".into(),
                author: " Ada ".into(),
                image: Some("   ".into()),
                tags: "rust, cli, ".into(),
                content: " body ".into(),
            })
            .unwrap();
        assert_eq!(post.title, "Spaced");
        assert_eq!(post.author, "Ada");
        assert_eq!(post.image, None, "blank image collapses to none");
        assert_eq!(post.tags, vec!["rust", "cli"]);
        assert_eq!(post.content, "body");
        assert_eq!(post.likes, 0);
        assert_eq!(post.date, Utc::now().date_naive());
    }

    #[test]
    fn test_create_rejects_blank_required_fields() {
        let mut store = InMemoryStore::new();
        let mut blog = Blog::load(&mut store, &[]);

        let err = blog.create(draft("   ", "Ada", "Body")).unwrap_err();
        assert!(matches!(err, BlogError::Validation(_)));
        let err = blog.create(draft("T", "", "Body")).unwrap_err();
        assert!(matches!(err, BlogError::Validation(_)));
        let err = blog.create(draft("T", "Ada", " ")).unwrap_err();
        assert!(matches!(err, BlogError::Validation(_)));

        assert!(blog.is_empty(), "failed validation must not insert");
    }

    #[test]
    fn test_created_ids_are_distinct() {
        let mut store = InMemoryStore::new();
        let mut blog = Blog::load(&mut store, &[]);
        // Several creates land within the same millisecond; ids must bump
        let mut ids = Vec::new();
        for i in 0..5 {
            let post = blog.create(draft(&format!("P{}", i), "A", "C")).unwrap();
            ids.push(post.id);
        }
        let mut deduped = ids.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), ids.len());
    }

    #[test]
    fn test_update_replaces_fields_keeps_the_rest() {
        let mut store = InMemoryStore::new();
        let mut blog = Blog::load(&mut store, &sample_seed());
        blog.toggle_like(100).unwrap();
        blog.add_comment(100, "Bob", "Nice").unwrap();

        let changed = blog
            .update(
                100,
                PostDraft {
                    title: "Retitled".into(),
                    author: "Editor".into(),
                    image: Some("https://example.com/x.png".into()),
                    tags: "updated".into(),
                    content: "New body".into(),
                },
            )
            .unwrap();
        assert!(changed);

        let post = blog.get(100).unwrap();
        assert_eq!(post.title, "Retitled");
        assert_eq!(post.tags, vec!["updated"]);
        assert_eq!(post.image.as_deref(), Some("https://example.com/x.png"));
        // Untouched by update:
        assert_eq!(post.likes, 1);
        assert_eq!(post.comments.len(), 1);
        assert_eq!(post.date, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
    }

    #[test]
    fn test_update_missing_id_is_noop() {
        let mut store = InMemoryStore::new();
        let mut blog = Blog::load(&mut store, &sample_seed());
        let before = blog.posts().to_vec();

        let changed = blog.update(999, draft("T", "A", "C")).unwrap();
        assert!(!changed);
        assert_eq!(blog.posts(), before.as_slice());
    }

    #[test]
    fn test_delete_removes_and_reports() {
        let mut store = InMemoryStore::new();
        let mut blog = Blog::load(&mut store, &sample_seed());

        assert!(blog.delete(100).unwrap());
        assert!(blog.is_empty());
        assert!(!blog.delete(100).unwrap(), "second delete is a no-op");
    }

    #[test]
    fn test_toggle_like_moves_counter_and_set_together() {
        let mut store = InMemoryStore::new();
        let mut blog = Blog::load(&mut store, &sample_seed());

        assert_eq!(blog.toggle_like(100).unwrap(), Some(true));
        assert_eq!(blog.get(100).unwrap().likes, 1);
        assert!(blog.liked().contains(100));

        assert_eq!(blog.toggle_like(100).unwrap(), Some(false));
        assert_eq!(blog.get(100).unwrap().likes, 0);
        assert!(!blog.liked().contains(100));
    }

    #[test]
    fn test_toggle_like_unknown_id() {
        let mut store = InMemoryStore::new();
        let mut blog = Blog::load(&mut store, &[]);
        assert_eq!(blog.toggle_like(42).unwrap(), None);
    }

    #[test]
    fn test_toggle_like_persists_both_blobs() {
        let mut store = InMemoryStore::new();
        {
            let mut blog = Blog::load(&mut store, &sample_seed());
            blog.toggle_like(100).unwrap();
        }
        let blog = Blog::load(&mut store, &[]);
        assert_eq!(blog.get(100).unwrap().likes, 1);
        assert!(blog.liked().contains(100));
    }

    #[test]
    fn test_stale_liked_entry_saturates_at_zero() {
        let mut store = InMemoryStore::new();
        let mut blog = Blog::load(&mut store, &sample_seed());
        blog.toggle_like(100).unwrap();

        // An import brings fresh counters but the liked set is untouched,
        // so the next toggle un-likes a post whose counter is already 0.
        let raw = r#"[{"id": 100, "title": "Seeded", "author": "Seeder", "content": "x", "likes": 0}]"#;
        blog.import_json(raw).unwrap();
        assert!(blog.liked().contains(100));

        assert_eq!(blog.toggle_like(100).unwrap(), Some(false));
        assert_eq!(blog.get(100).unwrap().likes, 0, "counter must not wrap");
    }

    #[test]
    fn test_add_comment_appends_in_order() {
        let mut store = InMemoryStore::new();
        let mut blog = Blog::load(&mut store, &sample_seed());

        assert!(blog.add_comment(100, "Bob", "First!").unwrap());
        assert!(blog.add_comment(100, "Eve", "Second").unwrap());

        let post = blog.get(100).unwrap();
        assert_eq!(post.comments.len(), 2);
        assert_eq!(post.comments[0].author, "Bob");
        assert_eq!(post.comments[1].author, "Eve");
        assert_ne!(post.comments[0].id, post.comments[1].id);
        assert_eq!(post.comments[0].date, Utc::now().date_naive());
    }

    #[test]
    fn test_add_comment_validates_before_lookup() {
        let mut store = InMemoryStore::new();
        let mut blog = Blog::load(&mut store, &sample_seed());

        let err = blog.add_comment(100, "  ", "text").unwrap_err();
        assert!(matches!(err, BlogError::Validation(_)));
        let err = blog.add_comment(999, "Bob", "").unwrap_err();
        assert!(
            matches!(err, BlogError::Validation(_)),
            "blank text fails validation even for unknown ids"
        );

        assert!(!blog.add_comment(999, "Bob", "text").unwrap());
    }

    #[test]
    fn test_import_keeps_only_wellformed_records() {
        let mut store = InMemoryStore::new();
        let mut blog = Blog::load(&mut store, &sample_seed());

        let raw = r#"[
            {"id": 1, "title": "A", "author": "X", "content": "one"},
            {"id": 2, "title": "B", "author": "Y", "content": "two"},
            {"id": 3, "title": "C", "author": "Z", "content": "three"},
            {"id": 4, "title": "", "author": "Y", "content": "blank title"},
            {"title": "No id", "author": "Y", "content": "missing id"}
        ]"#;
        let count = blog.import_json(raw).unwrap();
        assert_eq!(count, 3);
        assert_eq!(blog.len(), 3);
        assert!(blog.get(100).is_none(), "import replaces the collection");
    }

    #[test]
    fn test_import_with_no_valid_records_fails_untouched() {
        let mut store = InMemoryStore::new();
        {
            let mut blog = Blog::load(&mut store, &sample_seed());
            let raw = r#"[{"title": "no id"}, 42, "nope"]"#;
            let err = blog.import_json(raw).unwrap_err();
            assert!(matches!(err, BlogError::Import(_)));
            assert_eq!(blog.len(), 1);
            assert_eq!(blog.posts()[0].title, "Seeded");
        }
        // The persisted blob is untouched too
        let blog = Blog::load(&mut store, &[]);
        assert_eq!(blog.posts()[0].title, "Seeded");
    }

    #[test]
    fn test_import_rejects_non_array() {
        let mut store = InMemoryStore::new();
        let mut blog = Blog::load(&mut store, &[]);

        let err = blog.import_json(r#"{"id": 1}"#).unwrap_err();
        assert!(matches!(err, BlogError::Import(_)));
        let err = blog.import_json("certainly not json").unwrap_err();
        assert!(matches!(err, BlogError::Import(_)));
    }

    #[test]
    fn test_export_feeds_back_into_import() {
        let mut store = InMemoryStore::new();
        let mut blog = Blog::load(&mut store, &sample_seed());
        blog.create(draft("Second", "Ada", "More")).unwrap();
        blog.toggle_like(100).unwrap();
        let exported = blog.export_json().unwrap();

        let mut other_store = InMemoryStore::new();
        let mut other = Blog::load(&mut other_store, &[]);
        let count = other.import_json(&exported).unwrap();
        assert_eq!(count, 2);
        assert_eq!(other.posts(), blog.posts());
    }

    #[test]
    fn test_write_failure_surfaces_after_memory_change() {
        let mut store = InMemoryStore::new();
        let mut blog = Blog::load(&mut store, &[]);
        blog.store_mut().set_simulate_write_error(true);

        let err = blog.create(draft("T", "A", "C")).unwrap_err();
        assert!(matches!(err, BlogError::Store(_)));
        // Memory is ahead of the store until the next successful write
        assert_eq!(blog.len(), 1);

        blog.store_mut().set_simulate_write_error(false);
        blog.create(draft("U", "A", "C")).unwrap();
        assert_eq!(blog.len(), 2);
    }

    #[test]
    fn test_file_store_roundtrip() {
        let temp = tempfile::TempDir::new().unwrap();
        {
            let store = FileStore::new(temp.path().to_path_buf());
            let mut blog = Blog::load(store, &[]);
            blog.create(draft("On disk", "Ada", "Persisted body"))
                .unwrap();
        }
        let store = FileStore::new(temp.path().to_path_buf());
        let blog = Blog::load(store, &[]);
        assert_eq!(blog.len(), 1);
        assert_eq!(blog.posts()[0].title, "On disk");
    }
}
