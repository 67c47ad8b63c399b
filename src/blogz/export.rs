//! # Export
//!
//! Three output shapes, picked by the target name:
//!
//! - no target: the whole collection as `blog_posts.json`, the same JSON
//!   that `import` accepts back.
//! - a `.md` target: one merged document, post titles as H2 and body
//!   headings bumped down so they nest.
//! - `--archive`: a timestamped tar.gz with one markdown file per post.

use crate::blog::Blog;
use crate::error::{BlogError, Result};
use crate::markdown::bump_headings;
use crate::messages::{CmdMessage, CmdResult};
use crate::model::Post;
use crate::store::StateStore;
use crate::view::format_display_date;
use chrono::Utc;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::io::Write;
use std::path::Path;

pub const DEFAULT_EXPORT_FILE: &str = "blog_posts.json";

/// Format for single-file export, determined by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Markdown,
}

impl ExportFormat {
    pub fn from_filename(filename: &str) -> Self {
        let lower = filename.to_lowercase();
        if lower.ends_with(".md") || lower.ends_with(".markdown") {
            ExportFormat::Markdown
        } else {
            ExportFormat::Json
        }
    }
}

pub fn run<S: StateStore>(
    blog: &Blog<S>,
    target: Option<&str>,
    archive: bool,
) -> Result<CmdResult> {
    if blog.is_empty() {
        let mut res = CmdResult::default();
        res.add_message(CmdMessage::info("No posts to export."));
        return Ok(res);
    }

    let filename = if archive {
        let filename = format!("blogz-{}.tar.gz", Utc::now().format("%Y-%m-%d_%H:%M:%S"));
        let file = File::create(&filename).map_err(BlogError::Io)?;
        write_archive(file, blog.posts())?;
        filename
    } else {
        let filename = target.unwrap_or(DEFAULT_EXPORT_FILE).to_string();
        let content = match ExportFormat::from_filename(&filename) {
            ExportFormat::Json => blog.export_json()?,
            ExportFormat::Markdown => merge_as_markdown(blog.posts(), &document_title(&filename)),
        };
        std::fs::write(&filename, content).map_err(BlogError::Io)?;
        filename
    };

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Exported {} posts to {}",
        blog.len(),
        filename
    )));
    Ok(result)
}

/// Merge posts into one markdown document: the document title as H1, each
/// post title as H2 with its body headings bumped underneath.
fn merge_as_markdown(posts: &[Post], title: &str) -> String {
    let mut output = String::new();
    output.push_str("# ");
    output.push_str(title);
    output.push_str("\n\n");

    for (i, post) in posts.iter().enumerate() {
        if i > 0 {
            output.push_str("\n\n---\n\n");
        }

        output.push_str("## ");
        output.push_str(&post.title);
        output.push_str("\n\n");
        output.push_str(&format!(
            "*By {} on {}*\n\n",
            post.author,
            format_display_date(post.date)
        ));

        let body = post.content.trim();
        if !body.is_empty() {
            output.push_str(&bump_headings(body));
        }
    }

    output
}

/// One post as a standalone markdown file, used for archive entries.
fn post_markdown(post: &Post) -> String {
    let mut out = format!(
        "# {}\n\nBy {} on {}\n",
        post.title,
        post.author,
        format_display_date(post.date)
    );
    if !post.tags.is_empty() {
        out.push_str(&format!("Tags: {}\n", post.tags.join(", ")));
    }
    out.push('\n');
    out.push_str(&post.content);
    out.push('\n');
    out
}

fn write_archive<W: Write>(writer: W, posts: &[Post]) -> Result<()> {
    let enc = GzEncoder::new(writer, Compression::default());
    let mut tar = tar::Builder::new(enc);

    for post in posts {
        let entry_name = format!("blogz/{}-{}.md", sanitize_filename(&post.title), post.id);
        let content = post_markdown(post);

        let mut header = tar::Header::new_gnu();
        header.set_size(content.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();

        tar.append_data(&mut header, entry_name, content.as_bytes())
            .map_err(BlogError::Io)?;
    }

    tar.finish().map_err(BlogError::Io)?;
    Ok(())
}

fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == ' ' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect::<String>()
        .trim()
        .to_string()
}

fn document_title(filename: &str) -> String {
    Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Blog posts")
        .to_string()
}
