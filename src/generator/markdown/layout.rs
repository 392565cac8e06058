//! Fixed HTML shell wrapped around every rendered page.

use crate::config::section::SiteSectionConfig;
use crate::utils::html::escape;
use std::fmt::Write;

/// Per-page values interpolated into the shell.
pub struct PageContext<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub body: &'a str,
    /// Directory depth of the page below the output root, for relative nav links.
    pub depth: usize,
}

/// Wrap a rendered body into a complete HTML document.
pub fn render_page(site: &SiteSectionConfig, page: &PageContext<'_>) -> String {
    let mut html = String::with_capacity(page.body.len() + 1024);

    let title = if site.title.is_empty() || site.title == page.title {
        escape(page.title).into_owned()
    } else {
        format!("{} | {}", escape(page.title), escape(&site.title))
    };
    let description = page
        .description
        .or_else(|| (!site.description.is_empty()).then_some(site.description.as_str()));

    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"{}\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n",
        escape(&site.language),
    );
    if let Some(description) = description {
        let _ = writeln!(
            html,
            "<meta name=\"description\" content=\"{}\">",
            escape(description)
        );
    }
    html.push_str("</head>\n<body>\n<header>\n");

    let home = relative_prefix(page.depth);
    let _ = writeln!(
        html,
        "<a class=\"site-title\" href=\"{}index.html\">{}</a>",
        home,
        escape(&site.title)
    );

    if !site.nav.is_empty() {
        html.push_str("<nav>\n<ul>\n");
        for item in &site.nav {
            let href = if item.is_external() {
                item.path.clone()
            } else {
                format!("{home}{}", item.path.trim_start_matches('/'))
            };
            let _ = writeln!(
                html,
                "<li><a href=\"{}\">{}</a></li>",
                escape(&href),
                escape(&item.label)
            );
        }
        html.push_str("</ul>\n</nav>\n");
    }

    html.push_str("</header>\n<main>\n");
    html.push_str(page.body);
    html.push_str("</main>\n</body>\n</html>\n");
    html
}

fn relative_prefix(depth: usize) -> String {
    "../".repeat(depth)
}
