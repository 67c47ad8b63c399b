use blogz::blog::Blog;
use blogz::config::{self, BlogConfig};
use blogz::editor::{edit_draft, DraftBuffer};
use blogz::error::{BlogError, Result};
use blogz::export;
use blogz::markdown::render_terminal;
use blogz::messages::{CmdMessage, MessageLevel};
use blogz::model::{Post, PostDraft};
use blogz::seed::starter_posts;
use blogz::store::fs::FileStore;
use blogz::tags;
use blogz::view::{self, format_display_date, PostCard, ViewState};
use chrono::Utc;
use clap::Parser;
use colored::*;
use console::{Style, Term};
use directories::ProjectDirs;
use std::io::{self, Write};
use std::path::PathBuf;
use unicode_width::UnicodeWidthStr;

mod args;
use args::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct AppContext {
    blog: Blog<FileStore>,
    config: BlogConfig,
    dark: bool,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut ctx = init_context()?;

    match cli.command {
        Some(Commands::Create {
            title,
            author,
            tags,
            image,
            content,
            no_editor,
        }) => handle_create(&mut ctx, title, author, tags, image, content, no_editor),
        Some(Commands::List { tag, query, sort }) => handle_list(&ctx, tag, query, sort),
        Some(Commands::Show { index }) => handle_show(&ctx, index),
        Some(Commands::Edit {
            index,
            author,
            tags,
            image,
            no_editor,
        }) => handle_edit(&mut ctx, index, author, tags, image, no_editor),
        Some(Commands::Delete { index, yes }) => handle_delete(&mut ctx, index, yes),
        Some(Commands::Like { index }) => handle_like(&mut ctx, index),
        Some(Commands::Comment {
            index,
            text,
            author,
        }) => handle_comment(&mut ctx, index, text, author),
        Some(Commands::Tags { all }) => handle_tags(&ctx, all),
        Some(Commands::Import { file }) => handle_import(&mut ctx, file),
        Some(Commands::Export { file, archive }) => handle_export(&ctx, file, archive),
        Some(Commands::Config { key, value }) => handle_config(&mut ctx, key, value),
        None => handle_list(&ctx, None, None, "newest".to_string()),
    }
}

/// Data lives in `$BLOGZ_HOME` when set, otherwise in the platform's
/// data directory.
fn data_dir() -> Result<PathBuf> {
    if let Ok(home) = std::env::var("BLOGZ_HOME") {
        if !home.is_empty() {
            return Ok(PathBuf::from(home));
        }
    }
    let proj_dirs = ProjectDirs::from("com", "blogz", "blogz")
        .ok_or_else(|| BlogError::Store("Could not determine a data directory".to_string()))?;
    Ok(proj_dirs.data_dir().to_path_buf())
}

fn init_context() -> Result<AppContext> {
    let dir = data_dir()?;
    let store = FileStore::new(dir.clone());

    // Preferences load before the store moves into the blog
    let config = BlogConfig::load(&store).unwrap_or_default();
    let dark = config::dark_mode(&store);

    let seed = starter_posts(&dir);
    let blog = Blog::load(store, &seed);

    Ok(AppContext { blog, config, dark })
}

/// Resolves a 1-based post number to the post it names. Numbers follow
/// collection order, so they stay put under filtered or re-sorted lists.
fn post_at(ctx: &AppContext, index: usize) -> Result<&Post> {
    index
        .checked_sub(1)
        .and_then(|i| ctx.blog.posts().get(i))
        .ok_or_else(|| BlogError::Validation(format!("No post number {}", index)))
}

fn accent_style(dark: bool) -> Style {
    if dark {
        Style::new().cyan().bold()
    } else {
        Style::new().blue().bold()
    }
}

fn handle_create(
    ctx: &mut AppContext,
    title: Option<String>,
    author: Option<String>,
    tags: Option<String>,
    image: Option<String>,
    content: Option<String>,
    no_editor: bool,
) -> Result<()> {
    let (final_title, final_content) = if no_editor {
        (title.unwrap_or_default(), content.unwrap_or_default())
    } else {
        let initial = DraftBuffer::new(title.unwrap_or_default(), content.unwrap_or_default());
        let edited = edit_draft(&initial)?;
        (edited.title, edited.content)
    };

    let author = author
        .or_else(|| ctx.config.default_author.clone())
        .unwrap_or_default();

    let draft = PostDraft {
        title: final_title,
        author,
        image,
        tags: tags.unwrap_or_default(),
        content: final_content,
    };
    let post = ctx.blog.create(draft)?;
    print_messages(&[CmdMessage::success(format!("Created \"{}\"", post.title))]);
    Ok(())
}

fn handle_list(
    ctx: &AppContext,
    tag: Option<String>,
    query: Option<String>,
    sort: String,
) -> Result<()> {
    let state = ViewState {
        tag,
        query: query.unwrap_or_default(),
        sort,
    };
    let shown = view::visible(ctx.blog.posts(), &state);
    print_post_list(ctx, &shown);
    Ok(())
}

fn handle_show(ctx: &AppContext, index: usize) -> Result<()> {
    let post = post_at(ctx, index)?;
    let card = PostCard::project(post, ctx.blog.liked());
    let accent = accent_style(ctx.dark);

    println!("{}", accent.apply_to(&card.title));
    println!("{}", format!("By {} on {}", card.author, card.date).dimmed());
    if !card.tags.is_empty() {
        println!("{}", format!("Tags: {}", card.tags.join(", ")).dimmed());
    }
    if let Some(image) = &card.image {
        println!("{}", format!("Image: {}", image).dimmed());
    }
    println!("--------------------------------");
    println!("{}", render_terminal(&post.content));
    println!();

    let liked_marker = if card.is_liked {
        "♥ liked by you · ".red().to_string()
    } else {
        String::new()
    };
    println!(
        "{}{}",
        liked_marker,
        format!("{} likes · {} comments", card.likes, card.comment_count).dimmed()
    );

    if !post.comments.is_empty() {
        println!();
        println!("{}", "Comments".bold());
        for comment in &post.comments {
            println!(
                "  {} {}",
                comment.author.bold(),
                format_display_date(comment.date).dimmed()
            );
            for line in comment.content.lines() {
                println!("    {}", line);
            }
        }
    }
    Ok(())
}

fn handle_edit(
    ctx: &mut AppContext,
    index: usize,
    author: Option<String>,
    tags: Option<String>,
    image: Option<String>,
    no_editor: bool,
) -> Result<()> {
    let post = post_at(ctx, index)?.clone();

    let (title, content) = if no_editor {
        (post.title.clone(), post.content.clone())
    } else {
        let initial = DraftBuffer::new(post.title.clone(), post.content.clone());
        let edited = edit_draft(&initial)?;
        (edited.title, edited.content)
    };

    let draft = PostDraft {
        title,
        author: author.unwrap_or_else(|| post.author.clone()),
        image: image.or_else(|| post.image.clone()),
        tags: tags.unwrap_or_else(|| post.tags.join(", ")),
        content,
    };
    ctx.blog.update(post.id, draft)?;
    print_messages(&[CmdMessage::success(format!("Updated \"{}\"", post.title))]);
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, index: usize, yes: bool) -> Result<()> {
    let post = post_at(ctx, index)?.clone();

    if !yes {
        println!("About to delete \"{}\".", post.title);
        print!("[Y] to confirm: ");
        io::stdout().flush().map_err(BlogError::Io)?;

        let mut input = String::new();
        io::stdin().read_line(&mut input).map_err(BlogError::Io)?;
        if input.trim() != "Y" {
            println!("Operation cancelled.");
            return Ok(());
        }
    }

    ctx.blog.delete(post.id)?;
    print_messages(&[CmdMessage::success(format!("Deleted \"{}\"", post.title))]);
    Ok(())
}

fn handle_like(ctx: &mut AppContext, index: usize) -> Result<()> {
    let post = post_at(ctx, index)?;
    let (id, title) = (post.id, post.title.clone());

    match ctx.blog.toggle_like(id)? {
        Some(true) => print_messages(&[CmdMessage::success(format!("Liked \"{}\"", title))]),
        Some(false) => print_messages(&[CmdMessage::info(format!("Unliked \"{}\"", title))]),
        None => print_messages(&[CmdMessage::warning("Post not found.")]),
    }
    Ok(())
}

fn handle_comment(
    ctx: &mut AppContext,
    index: usize,
    text: String,
    author: Option<String>,
) -> Result<()> {
    let (id, title) = {
        let post = post_at(ctx, index)?;
        (post.id, post.title.clone())
    };
    let author = author
        .or_else(|| ctx.config.default_author.clone())
        .unwrap_or_default();

    ctx.blog.add_comment(id, &author, &text)?;
    print_messages(&[CmdMessage::success(format!(
        "Comment added to \"{}\"",
        title
    ))]);
    Ok(())
}

fn handle_tags(ctx: &AppContext, all: bool) -> Result<()> {
    if all {
        let names = tags::distinct(ctx.blog.posts());
        if names.is_empty() {
            println!("No tags yet.");
            return Ok(());
        }
        for name in names {
            println!("{}", name);
        }
        return Ok(());
    }

    let popular = tags::popular(ctx.blog.posts());
    if popular.is_empty() {
        println!("No tags yet.");
        return Ok(());
    }
    let accent = accent_style(ctx.dark);
    for entry in popular {
        println!("{} ({})", accent.apply_to(&entry.tag), entry.count);
    }
    Ok(())
}

fn handle_import(ctx: &mut AppContext, file: String) -> Result<()> {
    let raw = std::fs::read_to_string(&file).map_err(BlogError::Io)?;
    let count = ctx.blog.import_json(&raw)?;
    print_messages(&[CmdMessage::success(format!(
        "Imported {} posts from {}",
        count, file
    ))]);
    Ok(())
}

fn handle_export(ctx: &AppContext, file: Option<String>, archive: bool) -> Result<()> {
    let result = export::run(&ctx.blog, file.as_deref(), archive)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    match (key.as_deref(), value) {
        (None, _) => {
            println!(
                "author = {}",
                ctx.config.default_author.as_deref().unwrap_or("")
            );
            println!("dark-mode = {}", ctx.dark);
        }
        (Some("author"), None) => {
            println!(
                "author = {}",
                ctx.config.default_author.as_deref().unwrap_or("")
            );
        }
        (Some("author"), Some(v)) => {
            let trimmed = v.trim();
            ctx.config.default_author = if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            };
            ctx.config.save(ctx.blog.store_mut())?;
            println!(
                "author = {}",
                ctx.config.default_author.as_deref().unwrap_or("")
            );
        }
        (Some("dark-mode"), None) => {
            println!("dark-mode = {}", ctx.dark);
        }
        (Some("dark-mode"), Some(v)) => {
            let on = matches!(v.as_str(), "true" | "on" | "1");
            config::set_dark_mode(ctx.blog.store_mut(), on)?;
            println!("dark-mode = {}", on);
        }
        (Some(other), _) => {
            println!("Unknown config key: {}", other);
        }
    }
    Ok(())
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 14;
const LIKE_MARKER: &str = "♥";

fn line_width() -> usize {
    let (_, cols) = Term::stdout().size();
    (cols as usize).clamp(60, LINE_WIDTH)
}

fn print_post_list(ctx: &AppContext, shown: &[Post]) {
    if ctx.blog.is_empty() {
        println!("No posts yet. `blogz create` writes the first one.");
        return;
    }
    if shown.is_empty() {
        println!("No posts found.");
        return;
    }

    let width = line_width();
    for post in shown {
        let card = PostCard::project(post, ctx.blog.liked());
        let number = ctx
            .blog
            .posts()
            .iter()
            .position(|p| p.id == post.id)
            .map(|i| i + 1)
            .unwrap_or(0);

        let idx_str = format!("{}. ", number);
        let left_prefix = if card.is_liked {
            format!("  {} ", LIKE_MARKER)
        } else {
            "    ".to_string()
        };
        let likes_col = format!("{:>4} ", format!("{}{}", card.likes, LIKE_MARKER));

        let preview: String = card
            .preview
            .chars()
            .map(|c| if c == '\n' { ' ' } else { c })
            .collect();
        let title_content = if preview.is_empty() {
            card.title.clone()
        } else {
            format!("{} {}", card.title, preview)
        };

        let fixed_width = left_prefix.width() + idx_str.width() + likes_col.width() + TIME_WIDTH;
        let available = width.saturating_sub(fixed_width);
        let title_display = truncate_to_width(&title_content, available);
        let padding = available.saturating_sub(title_display.width());

        let marker_colored = if card.is_liked {
            left_prefix.red().to_string()
        } else {
            left_prefix.clone()
        };

        println!(
            "{}{}{}{}{}{}",
            marker_colored,
            idx_str,
            title_display,
            " ".repeat(padding),
            likes_col.dimmed(),
            format_age(post.date).dimmed()
        );
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_age(date: chrono::NaiveDate) -> String {
    let today = Utc::now().date_naive();
    let days = (today - date).num_days().max(0);
    let duration = std::time::Duration::from_secs(days as u64 * 86_400);

    let time_str = timeago::Formatter::new().convert(duration);

    // Pad singular units so the column lines up with plural ones
    let time_str = time_str
        .replace("day ago", "day  ago")
        .replace("week ago", "week  ago")
        .replace("month ago", "month  ago")
        .replace("year ago", "year  ago");

    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
