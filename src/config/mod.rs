//! Site configuration management for `docship.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── build/     # [build] and sub-sections
//! │   ├── deploy     # [deploy]
//! │   └── site/      # [site] and [[site.nav]]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   └── field      # FieldPath
//! └── mod.rs         # SiteConfig (this file)
//! ```
//!
//! The config is read once at startup and is immutable for the rest of
//! the run.

pub mod section;
pub mod types;
mod util;

use util::{expand_path, find_config_file, resolve_remote};

pub use section::{BuildSectionConfig, DeployConfig, GeneratorKind, HookConfig, NavItem};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath};

use section::SiteSectionConfig;

use crate::{
    cli::{Cli, Commands},
    log,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing docship.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Site metadata and navigation
    #[serde(default)]
    pub site: SiteSectionConfig,

    /// Build settings
    #[serde(default)]
    pub build: BuildSectionConfig,

    /// Deployment settings
    #[serde(default)]
    pub deploy: DeployConfig,
}

impl SiteConfig {
    /// Load configuration from CLI arguments.
    ///
    /// Searches upward from cwd to find the config file. The project root
    /// is the config file's parent directory.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;
        let config_path = find_config_file(&cwd, &cli.config)
            .ok_or_else(|| ConfigError::NotFound(cwd.join(&cli.config)))?;

        let mut config = Self::from_path(&config_path)?;
        config.finalize(&config_path);
        config.apply_cli(cli);
        config.validate(cli.is_deploy())?;

        Ok(config)
    }

    /// Load, normalize and validate a config file without CLI overrides.
    pub fn from_file(config_path: &Path, for_deploy: bool) -> Result<Self> {
        let mut config = Self::from_path(config_path)?;
        config.finalize(config_path);
        config.validate(for_deploy)?;
        Ok(config)
    }

    /// Read and parse a config file, warning about unknown fields.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    pub(crate) fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {} are ignored: {}", display_path, fields.join(", "));
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        &self.root
    }

    /// Join a path with the root directory.
    pub fn root_join(&self, path: impl AsRef<Path>) -> PathBuf {
        self.root.join(path)
    }

    /// Get path relative to the project root, for display.
    pub fn root_relative(&self, path: impl AsRef<Path>) -> PathBuf {
        path.as_ref()
            .strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.as_ref().to_path_buf())
    }

    // ========================================================================
    // finalization
    // ========================================================================

    /// Resolve root and make all configured paths absolute.
    fn finalize(&mut self, config_path: &Path) {
        let config_path = crate::utils::path::normalize_path(config_path);
        self.root = config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        self.config_path = config_path;
        self.normalize_paths();
    }

    /// Normalize all paths relative to root directory.
    fn normalize_paths(&mut self) {
        let root = self.root.clone();
        self.build.content = expand_path(&self.build.content, &root);
        self.build.output = expand_path(&self.build.output, &root);
        self.build.static_dir = expand_path(&self.build.static_dir, &root);

        self.deploy.remote = resolve_remote(&self.deploy.remote, &root);

        if let Some(token_path) = self.deploy.token_path.take() {
            self.deploy.token_path = Some(expand_path(&token_path, &root));
        }
    }

    /// Apply command-line overrides.
    fn apply_cli(&mut self, cli: &Cli) {
        crate::logger::set_verbose(cli.verbose);

        let root = self.root.clone();
        if let Some(content) = &cli.content {
            self.build.content = expand_path(content, &root);
        }
        if let Some(output) = &cli.output {
            self.build.output = expand_path(output, &root);
        }

        if let Commands::Deploy { remote, branch, .. } = &cli.command {
            if let Some(remote) = remote {
                self.deploy.remote = resolve_remote(remote, &root);
            }
            Self::update_option(&mut self.deploy.branch, branch.as_ref());
        }
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate configuration for the current command.
    ///
    /// Collects all validation errors and returns them at once.
    pub fn validate(&self, for_deploy: bool) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.site.validate(&mut diag);
        self.build.validate(&self.root, &mut diag);
        if for_deploy {
            self.deploy.validate(&mut diag);
        }

        diag.print_warnings();
        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config with a minimal `[site]` title.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(extra: &str) -> SiteConfig {
    let config = format!("[site]\ntitle = \"Test\"\n{extra}");
    let (parsed, ignored) = SiteConfig::parse_with_ignored(&config).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

/// Write `docship.toml` plus a content tree into `root` and load it.
#[cfg(test)]
pub fn test_site(root: &Path, toml: &str, pages: &[(&str, &str)]) -> SiteConfig {
    let config_path = root.join("docship.toml");
    fs::write(&config_path, format!("[site]\ntitle = \"Test Guide\"\n{toml}")).unwrap();
    fs::create_dir_all(root.join("docs")).unwrap();
    for (path, body) in pages {
        let path = root.join("docs").join(path);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, body).unwrap();
    }
    SiteConfig::from_file(&config_path, false).unwrap()
}

// ============================================================================
// tests
// ============================================================================
