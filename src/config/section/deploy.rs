//! `[deploy]` section configuration.
//!
//! The publish target is fixed here so that `docship deploy` needs no
//! arguments in CI.
//!
//! # Example
//!
//! ```toml
//! [deploy]
//! remote = "https://github.com/user/style-guide.git"  # Push target (HTTPS, SSH or local path)
//! branch = "gh-pages"                                 # Branch whose history is replaced
//! message = "deploy: {timestamp}"                     # Snapshot commit message
//! marker = ".nojekyll"                                # Disables platform-side processing
//! token_path = "~/.github-token"                      # Optional: PAT file for HTTPS remotes
//!
//! [deploy.author]
//! name = "docship"
//! email = "docship@localhost"
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Deploy configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeployConfig {
    /// Remote repository URL (HTTPS, SSH or a local path).
    pub remote: String,

    /// Target branch, force-replaced on every publish.
    pub branch: String,

    /// Commit message; `{timestamp}` expands to Unix seconds.
    pub message: String,

    /// Marker file created in the output root.
    pub marker: String,

    /// Path to file containing a personal access token.
    ///
    /// # Security
    /// - Store outside repository (e.g., `~/.github-token`)
    /// - Never commit tokens to version control!
    pub token_path: Option<PathBuf>,

    /// Snapshot author identity.
    pub author: AuthorConfig,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            remote: String::new(),
            branch: "gh-pages".to_string(),
            message: "deploy: {timestamp}".to_string(),
            marker: ".nojekyll".to_string(),
            token_path: None,
            author: AuthorConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthorConfig {
    pub name: String,
    pub email: String,
}

impl Default for AuthorConfig {
    fn default() -> Self {
        Self {
            name: "docship".to_string(),
            email: "docship@localhost".to_string(),
        }
    }
}

impl DeployConfig {
    pub const REMOTE: FieldPath = FieldPath::new("deploy.remote");
    pub const BRANCH: FieldPath = FieldPath::new("deploy.branch");
    pub const MESSAGE: FieldPath = FieldPath::new("deploy.message");
    pub const MARKER: FieldPath = FieldPath::new("deploy.marker");
    pub const TOKEN_PATH: FieldPath = FieldPath::new("deploy.token_path");
    pub const AUTHOR: FieldPath = FieldPath::new("deploy.author");

    /// Validate deploy configuration (only for `docship deploy`).
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.remote.trim().is_empty() {
            diag.error_with_hint(
                Self::REMOTE,
                "no remote configured",
                "set `deploy.remote` or pass --remote",
            );
        } else if self.remote.starts_with("https://")
            && let Err(e) = url::Url::parse(&self.remote)
        {
            diag.error(
                Self::REMOTE,
                format!("invalid remote URL `{}`: {e}", self.remote),
            );
        }

        if !is_valid_branch_name(&self.branch) {
            diag.error(
                Self::BRANCH,
                format!("`{}` is not a valid branch name", self.branch),
            );
        }

        if self.message.trim().is_empty() {
            diag.error(Self::MESSAGE, "commit message cannot be empty");
        }

        if !is_plain_file_name(&self.marker) {
            diag.error_with_hint(
                Self::MARKER,
                format!("`{}` must be a plain file name", self.marker),
                "e.g. \".nojekyll\"",
            );
        }

        if self.author.name.trim().is_empty() || self.author.email.trim().is_empty() {
            diag.error(Self::AUTHOR, "author name and email must be set");
        }

        if let Some(path) = &self.token_path {
            if !path.exists() {
                diag.error(
                    Self::TOKEN_PATH,
                    format!("token file not found: {}", path.display()),
                );
            } else if !path.is_file() {
                diag.error(
                    Self::TOKEN_PATH,
                    format!("token path is not a file: {}", path.display()),
                );
            }
            if !self.remote.starts_with("https://") {
                diag.warn(Self::TOKEN_PATH, "token is only used with https remotes");
            }
        }
    }
}

/// Subset of `git check-ref-format` rules that matter for a branch name.
fn is_valid_branch_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('-')
        && !name.starts_with('/')
        && !name.ends_with('/')
        && !name.ends_with(".lock")
        && !name.ends_with('.')
        && !name.contains("..")
        && !name.contains("@{")
        && !name.contains("//")
        && !name
            .chars()
            .any(|c| c.is_whitespace() || c.is_control() || "~^:?*[\\".contains(c))
}

/// A single path component that survives `create_repo`, so not `.git`.
fn is_plain_file_name(name: &str) -> bool {
    let path = Path::new(name);
    !name.is_empty()
        && name != "."
        && name != ".."
        && name != ".git"
        && path.file_name() == Some(path.as_os_str())
}
