//! Front matter extraction.
//!
//! Two forms are accepted, and only at the very start of a file:
//!
//! ```text
//! ---                          +++
//! title: Getting started       title = "Getting started"
//! sidebar_position: 2          weight = 2
//! draft: false                 draft = false
//! ---                          +++
//! ```
//!
//! Unknown keys are kept in [`FrontMatter::extra`] and otherwise ignored.

use std::collections::BTreeMap;
use thiserror::Error;

/// Recognised front matter fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub description: Option<String>,
    pub draft: bool,
    /// `sidebar_position` or `weight`.
    pub weight: Option<i64>,
    pub extra: BTreeMap<String, String>,
}

#[derive(Debug, Error)]
pub enum FrontMatterError {
    #[error("front matter opened with `{0}` is never closed")]
    Unterminated(&'static str),

    #[error("line {line}: expected `key: value`, found `{text}`")]
    MissingSeparator { line: usize, text: String },

    #[error("line {line}: empty key")]
    EmptyKey { line: usize },

    #[error("`{key}` expects {expected}, found `{value}`")]
    InvalidValue {
        key: String,
        expected: &'static str,
        value: String,
    },

    #[error("invalid TOML front matter: {0}")]
    Toml(#[from] toml::de::Error),
}

const FENCES: [(&str, bool); 2] = [("---", false), ("+++", true)];

/// Split a document into its front matter and Markdown body.
///
/// A document without front matter yields `FrontMatter::default()` and the
/// whole source as body.
pub fn extract(source: &str) -> Result<(FrontMatter, &str), FrontMatterError> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);

    for (fence, is_toml) in FENCES {
        let Some(rest) = open_fence(source, fence) else {
            continue;
        };
        let (block, body) = split_block(rest, fence).ok_or(FrontMatterError::Unterminated(fence))?;
        let meta = if is_toml {
            parse_toml(block)?
        } else {
            parse_yaml_like(block)?
        };
        return Ok((meta, body));
    }

    Ok((FrontMatter::default(), source))
}

/// Return the text after the opening fence line, if the source starts with one.
fn open_fence<'a>(source: &'a str, fence: &str) -> Option<&'a str> {
    let (first, rest) = source.split_once('\n')?;
    (first.trim_end() == fence).then_some(rest)
}

/// Find the closing fence and return `(block, body)`.
fn split_block<'a>(rest: &'a str, fence: &str) -> Option<(&'a str, &'a str)> {
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == fence {
            return Some((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}

/// Parse `key: value` lines.
///
/// Indented lines and `- item` lines continue the previous key (YAML lists
/// and maps) and are skipped.
fn parse_yaml_like(block: &str) -> Result<FrontMatter, FrontMatterError> {
    let mut meta = FrontMatter::default();

    for (idx, raw) in block.lines().enumerate() {
        // +2: the opening fence is line 1
        let line = idx + 2;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if raw.starts_with([' ', '\t', '-']) {
            continue;
        }

        let (key, value) = trimmed
            .split_once(':')
            .ok_or_else(|| FrontMatterError::MissingSeparator {
                line,
                text: trimmed.to_string(),
            })?;
        let key = key.trim();
        if key.is_empty() {
            return Err(FrontMatterError::EmptyKey { line });
        }
        let value = unquote(value.trim());

        match key {
            "title" => meta.title = non_empty(value),
            "description" => meta.description = non_empty(value),
            "draft" => {
                meta.draft = match value.to_ascii_lowercase().as_str() {
                    "true" | "yes" => true,
                    "false" | "no" | "" => false,
                    _ => return Err(invalid(key, "a boolean", value)),
                }
            }
            "sidebar_position" | "weight" => {
                meta.weight = Some(value.parse().map_err(|_| invalid(key, "an integer", value))?);
            }
            _ => {
                meta.extra.insert(key.to_string(), value.to_string());
            }
        }
    }

    Ok(meta)
}

fn parse_toml(block: &str) -> Result<FrontMatter, FrontMatterError> {
    let table: toml::Table = block.parse()?;
    let mut meta = FrontMatter::default();

    for (key, value) in table {
        match key.as_str() {
            "title" | "description" => {
                let text = value
                    .as_str()
                    .ok_or_else(|| invalid(&key, "a string", &value.to_string()))?;
                if key == "title" {
                    meta.title = non_empty(text);
                } else {
                    meta.description = non_empty(text);
                }
            }
            "draft" => {
                meta.draft = value
                    .as_bool()
                    .ok_or_else(|| invalid(&key, "a boolean", &value.to_string()))?;
            }
            "sidebar_position" | "weight" => {
                meta.weight = Some(
                    value
                        .as_integer()
                        .ok_or_else(|| invalid(&key, "an integer", &value.to_string()))?,
                );
            }
            _ => {
                let text = value
                    .as_str()
                    .map_or_else(|| value.to_string(), str::to_string);
                meta.extra.insert(key, text);
            }
        }
    }

    Ok(meta)
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn invalid(key: &str, expected: &'static str, value: &str) -> FrontMatterError {
    FrontMatterError::InvalidValue {
        key: key.to_string(),
        expected,
        value: value.to_string(),
    }
}
