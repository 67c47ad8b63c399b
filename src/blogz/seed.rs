//! Starter posts for first runs.
//!
//! When no `posts` blob exists yet, the repository is seeded so a fresh
//! install has something to show. The seed comes from `seed_posts.json` in
//! the data directory when the user has put one there, otherwise from the
//! copy bundled into the binary. A seed that cannot be read or parsed
//! yields an empty collection; seeding is never an error.

use crate::model::Post;
use once_cell::sync::Lazy;
use std::fs;
use std::path::Path;

const BUNDLED_SEED: &str = include_str!("seed_posts.json");

const SEED_FILENAME: &str = "seed_posts.json";

static BUNDLED_POSTS: Lazy<Vec<Post>> =
    Lazy::new(|| serde_json::from_str(BUNDLED_SEED).unwrap_or_default());

/// The collection a fresh install starts with.
pub fn starter_posts(data_dir: &Path) -> Vec<Post> {
    let override_path = data_dir.join(SEED_FILENAME);
    if override_path.is_file() {
        if let Ok(raw) = fs::read_to_string(&override_path) {
            if let Ok(posts) = serde_json::from_str::<Vec<Post>>(&raw) {
                return posts;
            }
        }
        // Unreadable override falls through to the bundled seed
    }
    BUNDLED_POSTS.clone()
}
