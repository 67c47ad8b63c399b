//! # Blogz Architecture
//!
//! Blogz is a **renderer-agnostic blogging library** with a CLI client on
//! top. The library owns the posts, the queries, and the persistence; the
//! binary owns the terminal.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │  CLI layer (main.rs + args.rs, binary only)                │
//! │  - Parses arguments, styles output, prompts, exit codes    │
//! │  - The only place that knows about stdout/stderr           │
//! └────────────────────────────────────────────────────────────┘
//!                             │
//!                             ▼
//! ┌────────────────────────────────────────────────────────────┐
//! │  Domain layer (blog, view, tags, export)                   │
//! │  - The post collection and every operation on it           │
//! │  - Pure views: filtering, sorting, and projection to       │
//! │    display models never mutate anything                    │
//! └────────────────────────────────────────────────────────────┘
//!                             │
//!                             ▼
//! ┌────────────────────────────────────────────────────────────┐
//! │  Storage layer (store/)                                    │
//! │  - StateStore trait over named JSON blobs                  │
//! │  - FileStore (production), InMemoryStore (testing)         │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From [`blog::Blog`] inward, code takes Rust arguments, returns Rust
//! types, and never touches stdout, stderr, or `std::process::exit`. The
//! same core could back a web frontend unchanged; only the store trait
//! would need another implementation.
//!
//! ## Testing Strategy
//!
//! The lion's share of tests are unit tests on the domain modules,
//! running against [`store::memory::InMemoryStore`]. The binary gets
//! end-to-end coverage in `tests/`, pointed at a temp dir through
//! `BLOGZ_HOME`.
//!
//! ## Module Overview
//!
//! - [`blog`]: The post repository, entry point for all mutations
//! - [`view`]: Filtering, sorting, and display projection
//! - [`tags`]: Tag counts derived from the collection
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Core data types (`Post`, `Comment`, `LikedSet`)
//! - [`seed`]: The starter collection for first runs
//! - [`config`]: Preference blobs (`config`, `dark_mode`)
//! - [`export`]: JSON, merged markdown, and tar.gz output
//! - [`markdown`]: Terminal rendering and heading bumps
//! - [`editor`]: External editor integration
//! - [`messages`]: Structured command output
//! - [`error`]: Error types

pub mod blog;
pub mod config;
pub mod editor;
pub mod error;
pub mod export;
pub mod markdown;
pub mod messages;
pub mod model;
pub mod seed;
pub mod store;
pub mod tags;
pub mod view;
