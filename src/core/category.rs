//! File category definitions.

use std::path::Path;

/// Category of a file in the content tree, determines how it reaches
/// the output directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileCategory {
    /// Markdown document (.md, .markdown) - rendered to HTML
    Markdown,
    /// Anything else - copied verbatim
    Asset,
}

impl FileCategory {
    /// Detect category from file path.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("md" | "markdown") => Self::Markdown,
            _ => Self::Asset,
        }
    }

    /// Display name for progress counters.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Markdown => "pages",
            Self::Asset => "assets",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path() {
        assert_eq!(FileCategory::from_path(Path::new("a/intro.md")), FileCategory::Markdown);
        assert_eq!(FileCategory::from_path(Path::new("NOTES.MARKDOWN")), FileCategory::Markdown);
        assert_eq!(FileCategory::from_path(Path::new("img/logo.png")), FileCategory::Asset);
        assert_eq!(FileCategory::from_path(Path::new("Makefile")), FileCategory::Asset);
    }
}
