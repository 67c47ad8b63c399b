use clap::{Parser, Subcommand};

/// Returns the version string, including git hash and commit date for
/// non-release builds.
/// Format: "0.3.2" for releases, "0.3.2@abc1234 2024-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "blogz", bin_name = "blogz", version = get_version())]
#[command(about = "File-backed blog post manager for the command line", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new post
    #[command(alias = "n", display_order = 1)]
    Create {
        /// Title of the post (optional, opens the editor if not provided)
        title: Option<String>,

        /// Author name (falls back to the configured default)
        #[arg(short, long)]
        author: Option<String>,

        /// Comma-separated tags
        #[arg(short, long)]
        tags: Option<String>,

        /// Header image URL
        #[arg(long)]
        image: Option<String>,

        /// Post body (skips the editor when given with a title)
        #[arg(short, long)]
        content: Option<String>,

        /// Skip opening the editor
        #[arg(long)]
        no_editor: bool,
    },

    /// List posts
    #[command(alias = "ls", display_order = 2)]
    List {
        /// Show only posts carrying this tag
        #[arg(short, long)]
        tag: Option<String>,

        /// Case-insensitive search over titles, bodies, authors, and tags
        #[arg(short, long)]
        query: Option<String>,

        /// Sort order: newest, oldest, or likes
        #[arg(short, long, default_value = "newest")]
        sort: String,
    },

    /// Show a post in full, comments included
    #[command(alias = "v", display_order = 3)]
    Show {
        /// Post number as shown by list
        index: usize,
    },

    /// Edit a post in the editor
    #[command(alias = "e", display_order = 4)]
    Edit {
        /// Post number as shown by list
        index: usize,

        /// Replace the author
        #[arg(short, long)]
        author: Option<String>,

        /// Replace the comma-separated tags
        #[arg(short, long)]
        tags: Option<String>,

        /// Replace the header image URL (empty string clears it)
        #[arg(long)]
        image: Option<String>,

        /// Only apply the flags, skip the editor
        #[arg(long)]
        no_editor: bool,
    },

    /// Delete a post
    #[command(alias = "rm", display_order = 5)]
    Delete {
        /// Post number as shown by list
        index: usize,

        /// Skip confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Like a post, or take a like back
    #[command(display_order = 6)]
    Like {
        /// Post number as shown by list
        index: usize,
    },

    /// Comment on a post
    #[command(display_order = 7)]
    Comment {
        /// Post number as shown by list
        index: usize,

        /// The comment text
        text: String,

        /// Comment author (falls back to the configured default)
        #[arg(short, long)]
        author: Option<String>,
    },

    /// Show the most used tags
    #[command(display_order = 8)]
    Tags {
        /// List every tag, not just the most used
        #[arg(long)]
        all: bool,
    },

    /// Import posts from a JSON file, replacing the collection
    #[command(display_order = 20)]
    Import {
        /// Path to a JSON array of posts
        file: String,
    },

    /// Export posts to a file
    #[command(display_order = 21)]
    Export {
        /// Target file: .json for data, .md for one merged document
        /// (default blog_posts.json)
        file: Option<String>,

        /// Write a tar.gz archive with one markdown file per post instead
        #[arg(long)]
        archive: bool,
    },

    /// Get or set configuration
    #[command(display_order = 30)]
    Config {
        /// Configuration key (author, dark-mode)
        key: Option<String>,

        /// Value to set (if omitted, prints the current value)
        value: Option<String>,
    },
}
