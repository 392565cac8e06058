//! Markdown body rendering with pulldown-cmark.

use pulldown_cmark::{CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd, html};

/// Rendered document body.
#[derive(Debug)]
pub struct RenderedBody {
    pub html: String,
    /// Plain text of the first level-1 heading.
    pub heading: Option<String>,
}

/// Render Markdown to an HTML fragment.
///
/// Relative links to `.md` / `.markdown` files are rewritten to `.html` so
/// they resolve against the rendered tree.
pub fn render_body(markdown: &str, options: Options) -> RenderedBody {
    let mut heading: Option<String> = None;
    let mut in_h1 = false;
    let mut h1_text = String::new();

    let events = Parser::new_ext(markdown, options).map(|event| {
        match &event {
            Event::Start(Tag::Heading {
                level: HeadingLevel::H1,
                ..
            }) if heading.is_none() => in_h1 = true,
            Event::End(TagEnd::Heading(HeadingLevel::H1)) if in_h1 => {
                in_h1 = false;
                heading = Some(h1_text.trim().to_string());
            }
            Event::Text(text) | Event::Code(text) if in_h1 => h1_text.push_str(text),
            _ => {}
        }

        match event {
            Event::Start(Tag::Link {
                link_type,
                dest_url,
                title,
                id,
            }) => Event::Start(Tag::Link {
                link_type,
                dest_url: rewrite_link(dest_url),
                title,
                id,
            }),
            other => other,
        }
    });

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, events);

    RenderedBody {
        html: out,
        heading: heading.filter(|h| !h.is_empty()),
    }
}

fn rewrite_link(dest: CowStr<'_>) -> CowStr<'_> {
    match markdown_link_to_html(&dest) {
        Some(url) => url.into(),
        None => dest,
    }
}

/// `guide/intro.md#usage` -> `guide/intro.html#usage`.
///
/// Returns `None` for external, absolute, and fragment-only links, and for
/// anything that does not point at a Markdown file.
fn markdown_link_to_html(dest: &str) -> Option<String> {
    if dest.is_empty()
        || dest.contains("://")
        || dest.starts_with(['/', '#'])
        || dest.starts_with("mailto:")
    {
        return None;
    }

    let split = dest.find(['#', '?']).unwrap_or(dest.len());
    let (path, suffix) = dest.split_at(split);
    let stem = path
        .strip_suffix(".md")
        .or_else(|| path.strip_suffix(".markdown"))?;
    if stem.is_empty() || stem.ends_with('/') {
        return None;
    }

    Some(format!("{stem}.html{suffix}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::section::build::MarkdownConfig;

    fn render(md: &str) -> RenderedBody {
        render_body(md, MarkdownConfig::default().to_pulldown_options())
    }

    #[test]
    fn test_render_basic() {
        let body = render("# Naming\n\nUse `snake_case`.");
        assert!(body.html.contains("<h1>Naming</h1>"));
        assert!(body.html.contains("<code>snake_case</code>"));
        assert_eq!(body.heading.as_deref(), Some("Naming"));
    }

    #[test]
    fn test_first_h1_only() {
        let body = render("## Sub\n\n# First `code`\n\n# Second");
        assert_eq!(body.heading.as_deref(), Some("First code"));
    }

    #[test]
    fn test_no_heading() {
        assert!(render("plain paragraph").heading.is_none());
    }

    #[test]
    fn test_links_rewritten() {
        let body = render("[a](naming.md) [b](../guide/intro.md#usage) [c](x.markdown?v=1)");
        assert!(body.html.contains(r#"href="naming.html""#));
        assert!(body.html.contains(r#"href="../guide/intro.html#usage""#));
        assert!(body.html.contains(r#"href="x.html?v=1""#));
    }

    #[test]
    fn test_links_untouched() {
        for dest in [
            "https://example.com/readme.md",
            "/abs/page.md",
            "#section",
            "mailto:a@b.c",
            "image.png",
            "folder/",
        ] {
            assert_eq!(markdown_link_to_html(dest), None, "{dest}");
        }
    }

    #[test]
    fn test_tables_enabled() {
        let body = render("| a | b |\n|---|---|\n| 1 | 2 |");
        assert!(body.html.contains("<table>"));
    }
}
