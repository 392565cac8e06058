//! Configuration utility functions.

use std::path::{Path, PathBuf};

/// Find config file by searching upward from `start`
///
/// Walks up parent directories until finding `config_name`.
/// Returns the absolute path to the config file if found.
///
/// # Example
/// ```text
/// /home/user/guide/docs/naming/   ← cwd
/// /home/user/guide/docship.toml   ← found!
/// ```
pub fn find_config_file(start: &Path, config_name: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.exists().then(|| config_name.to_path_buf());
    }

    let mut current = start;
    loop {
        let candidate = current.join(config_name);
        if candidate.is_file() {
            return Some(candidate);
        }

        match current.parent() {
            Some(parent) => current = parent,
            None => return None, // Reached filesystem root
        }
    }
}

/// Expand `~` and resolve a relative path against `root`.
pub fn expand_path(path: &Path, root: &Path) -> PathBuf {
    let expanded = shellexpand::tilde(&path.to_string_lossy()).into_owned();
    let path = PathBuf::from(expanded);
    let full_path = if path.is_relative() {
        root.join(&path)
    } else {
        path
    };
    crate::utils::path::normalize_path(&full_path)
}

/// Resolve a local-path remote against `root`.
///
/// URLs (`scheme://...`) and scp-style `host:path` remotes are returned as-is.
pub fn resolve_remote(remote: &str, root: &Path) -> String {
    let path = Path::new(remote);
    let is_url = remote.contains("://");
    let is_scp = remote
        .split_once(':')
        .is_some_and(|(host, _)| !host.is_empty() && !host.contains('/'));
    if remote.is_empty() || path.is_absolute() || is_url || is_scp {
        return remote.to_string();
    }
    expand_path(path, root).to_string_lossy().into_owned()
}

// ============================================================================
// tests
// ============================================================================
