//! Path normalization utilities.
//!
//! Pure functions for path manipulation. No side effects.

use std::path::{Component, Path, PathBuf};

/// Normalize a file system path to absolute form.
///
/// Tries `canonicalize()` first (resolves symlinks, `.`, `..`).
/// Falls back to:
/// - Return as-is if already absolute
/// - Join with current directory if relative
#[inline]
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}

/// Render `path` relative to `base` with `/` separators.
///
/// Used for git index entries and site-relative URLs, which are always
/// slash-separated regardless of platform.
pub fn to_slash_relative(path: &Path, base: &Path) -> Option<String> {
    let rel = path.strip_prefix(base).ok()?;
    let parts: Vec<_> = rel
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy()),
            _ => None,
        })
        .collect();
    Some(parts.join("/"))
}

/// Whether any component of `rel` is hidden (starts with `.`).
pub fn is_hidden(rel: &Path) -> bool {
    rel.components().any(|c| match c {
        Component::Normal(s) => s.to_string_lossy().starts_with('.'),
        _ => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path_absolute() {
        let path = Path::new("/absolute/path/file.txt");
        let normalized = normalize_path(path);
        assert!(normalized.is_absolute());
    }

    #[test]
    fn test_normalize_path_relative() {
        let path = Path::new("relative/path/file.txt");
        let normalized = normalize_path(path);
        assert!(normalized.is_absolute());
    }

    #[test]
    fn test_to_slash_relative() {
        let base = Path::new("/site/public");
        assert_eq!(
            to_slash_relative(Path::new("/site/public/docs/intro.html"), base),
            Some("docs/intro.html".to_string())
        );
        assert_eq!(to_slash_relative(Path::new("/elsewhere/x"), base), None);
    }

    #[test]
    fn test_is_hidden() {
        assert!(is_hidden(Path::new(".git/config")));
        assert!(is_hidden(Path::new("docs/.draft/a.md")));
        assert!(!is_hidden(Path::new("docs/intro.md")));
    }
}
