//! # Markdown Rendering
//!
//! Post content is markdown. Two consumers need it transformed: `show`
//! wants styled terminal text, and the merged-file export wants heading
//! levels pushed down so post bodies nest under their titles. Both walk
//! pulldown-cmark events; the stored content is never modified.

use colored::Colorize;
use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use pulldown_cmark_to_cmark::cmark;

/// Renders markdown as styled terminal text: headings stand out, inline
/// and block code are picked out, lists get bullets, links show their
/// target. Constructs without a terminal treatment fall back to their
/// plain text.
pub fn render_terminal(content: &str) -> String {
    let parser = Parser::new_ext(content, Options::all());

    let mut out = String::new();
    let mut in_heading = false;
    let mut in_code_block = false;
    let mut strong = false;
    let mut emphasis = false;
    let mut link_target: Option<String> = None;

    for event in parser {
        match event {
            Event::Start(Tag::Heading { .. }) => {
                if !out.is_empty() {
                    out.push('\n');
                }
                in_heading = true;
            }
            Event::End(TagEnd::Heading(_)) => {
                in_heading = false;
                out.push_str("\n\n");
            }
            Event::End(TagEnd::Paragraph) => out.push_str("\n\n"),
            Event::Start(Tag::Item) => out.push_str("  • "),
            Event::End(TagEnd::Item) => out.push('\n'),
            Event::End(TagEnd::List(_)) => out.push('\n'),
            Event::Start(Tag::CodeBlock(_)) => {
                in_code_block = true;
            }
            Event::End(TagEnd::CodeBlock) => {
                in_code_block = false;
                out.push('\n');
            }
            Event::Start(Tag::Strong) => strong = true,
            Event::End(TagEnd::Strong) => strong = false,
            Event::Start(Tag::Emphasis) => emphasis = true,
            Event::End(TagEnd::Emphasis) => emphasis = false,
            Event::Start(Tag::Link { dest_url, .. }) => {
                link_target = Some(dest_url.to_string());
            }
            Event::End(TagEnd::Link) => {
                if let Some(url) = link_target.take() {
                    out.push_str(&format!(" ({})", url).dimmed().to_string());
                }
            }
            Event::Text(text) => {
                if in_code_block {
                    for line in text.lines() {
                        out.push_str("    ");
                        out.push_str(&line.yellow().to_string());
                        out.push('\n');
                    }
                } else if in_heading {
                    out.push_str(&text.bold().cyan().to_string());
                } else if strong {
                    out.push_str(&text.bold().to_string());
                } else if emphasis {
                    out.push_str(&text.italic().to_string());
                } else {
                    out.push_str(&text);
                }
            }
            Event::Code(code) => {
                out.push_str(&code.yellow().to_string());
            }
            Event::SoftBreak => out.push(' '),
            Event::HardBreak => out.push('\n'),
            Event::Rule => out.push_str("────────\n\n"),
            _ => {}
        }
    }

    out.trim_end().to_string()
}

/// Pushes every heading in `content` down two levels (H1 becomes H3 and
/// so on, capped at H6), so a post body can sit under an H2 title in a
/// merged document without fighting it.
pub fn bump_headings(content: &str) -> String {
    let parser = Parser::new_ext(content, Options::all());

    let events: Vec<Event> = parser
        .map(|event| match event {
            Event::Start(Tag::Heading {
                level,
                id,
                classes,
                attrs,
            }) => Event::Start(Tag::Heading {
                level: bumped_level(level),
                id,
                classes,
                attrs,
            }),
            Event::End(TagEnd::Heading(level)) => Event::End(TagEnd::Heading(bumped_level(level))),
            other => other,
        })
        .collect();

    let mut output = String::new();
    // cmark can only fail through fmt::Write, and String's impl never does
    cmark(events.iter(), &mut output).expect("writing markdown to a String");
    output
}

fn bumped_level(level: HeadingLevel) -> HeadingLevel {
    match level {
        HeadingLevel::H1 => HeadingLevel::H3,
        HeadingLevel::H2 => HeadingLevel::H4,
        HeadingLevel::H3 => HeadingLevel::H5,
        HeadingLevel::H4 | HeadingLevel::H5 | HeadingLevel::H6 => HeadingLevel::H6,
    }
}
