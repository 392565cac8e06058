//! `[site]` section configuration.
//!
//! Site metadata rendered into every page, plus the navigation list.
//!
//! # Example
//!
//! ```toml
//! [site]
//! title = "Schema Style Guide"
//! description = "Conventions for designing schemas"
//! url = "https://example.github.io/style-guide"
//! language = "en"
//!
//! [[site.nav]]
//! label = "Introduction"
//! path = "index.html"
//!
//! [[site.nav]]
//! label = "Naming"
//! path = "naming.html"
//! ```

mod nav;

pub use nav::NavItem;

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};

/// Site metadata and navigation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSectionConfig {
    /// Site title, used in `<title>` and the page header.
    pub title: String,

    /// Site description, emitted as `<meta name="description">`.
    pub description: String,

    /// Public URL of the published site.
    pub url: Option<String>,

    /// Language code for `<html lang>`.
    pub language: String,

    /// Navigation entries, rendered in order.
    pub nav: Vec<NavItem>,
}

impl Default for SiteSectionConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            url: None,
            language: "en".into(),
            nav: Vec::new(),
        }
    }
}

impl SiteSectionConfig {
    pub const TITLE: FieldPath = FieldPath::new("site.title");
    pub const URL: FieldPath = FieldPath::new("site.url");

    /// Validate site configuration.
    ///
    /// # Checks
    /// - `title` should be set (warning only)
    /// - `url` must be a valid http(s) URL with a host
    /// - every nav entry has a label and a path
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.title.trim().is_empty() {
            diag.warn(Self::TITLE, "site title is empty");
        }

        if let Some(url_str) = &self.url {
            match url::Url::parse(url_str) {
                Ok(parsed) => {
                    if !matches!(parsed.scheme(), "http" | "https") {
                        diag.error_with_hint(
                            Self::URL,
                            format!(
                                "scheme '{}' not supported, must be http or https",
                                parsed.scheme()
                            ),
                            "use format like https://example.com",
                        );
                    }
                    if parsed.host_str().is_none() {
                        diag.error_with_hint(
                            Self::URL,
                            "URL must have a valid host",
                            "use format like https://example.com",
                        );
                    }
                }
                Err(e) => {
                    diag.error_with_hint(
                        Self::URL,
                        format!("invalid URL: {e}"),
                        "use format like https://example.com",
                    );
                }
            }
        }

        for item in &self.nav {
            item.validate(diag);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{ConfigDiagnostics, test_parse_config};

    #[test]
    fn test_site_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.site.language, "en");
        assert!(config.site.url.is_none());
        assert!(config.site.nav.is_empty());
    }

    #[test]
    fn test_site_nav_order_preserved() {
        let config = test_parse_config(
            r#"
[[site.nav]]
label = "Intro"
path = "index.html"

[[site.nav]]
label = "Naming"
path = "naming.html"
"#,
        );
        let labels: Vec<_> = config.site.nav.iter().map(|n| n.label.as_str()).collect();
        assert_eq!(labels, ["Intro", "Naming"]);
    }

    #[test]
    fn test_site_url_validation() {
        let mut config = test_parse_config("");
        config.site.url = Some("ftp://example.com".into());
        let mut diag = ConfigDiagnostics::new();
        config.site.validate(&mut diag);
        assert!(diag.has_errors());

        config.site.url = Some("https://example.github.io/guide".into());
        let mut diag = ConfigDiagnostics::new();
        config.site.validate(&mut diag);
        assert!(!diag.has_errors());
    }

    #[test]
    fn test_site_empty_title_warns() {
        let mut config = test_parse_config("");
        config.site.title.clear();
        let mut diag = ConfigDiagnostics::new();
        config.site.validate(&mut diag);
        assert!(!diag.has_errors());
        assert_eq!(diag.warnings().len(), 1);
    }
}
