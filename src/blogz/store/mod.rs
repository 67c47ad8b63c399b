//! # Storage Layer
//!
//! Persistence is a handful of named JSON blobs behind the [`StateStore`]
//! trait. The repository and preferences code never touch the filesystem
//! directly; they read and write whole blobs and leave the "where" to the
//! backend.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: production storage, one `<key>.json` file per blob
//!   under the data directory.
//! - [`memory::InMemoryStore`]: test storage with a write-failure switch.
//!
//! ## Blobs
//!
//! | Key           | Contents                                   |
//! |---------------|--------------------------------------------|
//! | `posts`       | the full post collection (JSON array)      |
//! | `liked_posts` | liked post ids, in like order (JSON array) |
//! | `dark_mode`   | theme preference (JSON bool)               |
//! | `config`      | user settings such as the default author   |
//!
//! Whole-blob writes keep the format trivially inspectable: `cat
//! posts.json` shows exactly what the tool sees. Collections are small
//! (hundreds of posts, not millions), so rewriting the array on every
//! mutation is fine.

use crate::error::Result;

pub mod fs;
pub mod memory;

/// Blob names shared by all backends.
pub mod keys {
    pub const POSTS: &str = "posts";
    pub const LIKED: &str = "liked_posts";
    pub const DARK_MODE: &str = "dark_mode";
    pub const CONFIG: &str = "config";
}

/// Abstract interface for named-blob storage.
///
/// `read` distinguishes "blob absent" (`Ok(None)`) from a failed read
/// (`Err`); callers decide which of those are recoverable.
pub trait StateStore {
    /// Read a blob, or `None` if it has never been written.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Write a blob, creating it if needed.
    fn write(&mut self, key: &str, value: &str) -> Result<()>;
}

// Lets callers hand out `&mut store` where an owned store is not wanted,
// e.g. reloading a repository from the same test store.
impl<S: StateStore + ?Sized> StateStore for &mut S {
    fn read(&self, key: &str) -> Result<Option<String>> {
        (**self).read(key)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).write(key, value)
    }
}
