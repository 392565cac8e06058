//! `[build]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [build]
//! content = "docs"            # Markdown source tree (relative to project root)
//! output = "build"            # Output directory, wiped on every build
//! static = "static"           # Copied verbatim into the output root
//! drafts = false              # Render pages marked `draft: true`
//!
//! [build.generator]
//! kind = "builtin"            # builtin | command
//! ```
//!
//! See submodules for detailed options: [`generator`], [`markdown`], [`hooks`].

mod generator;
mod hooks;
mod markdown;

pub use generator::{GeneratorConfig, GeneratorKind};
pub use hooks::{HookConfig, HooksConfig};
pub use markdown::MarkdownConfig;

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSectionConfig {
    /// Content source directory.
    pub content: PathBuf,

    /// Build output directory.
    pub output: PathBuf,

    /// Static files copied as-is into the output root.
    #[serde(rename = "static")]
    pub static_dir: PathBuf,

    /// Render draft pages.
    pub drafts: bool,

    /// Generator backend settings.
    pub generator: GeneratorConfig,

    /// Markdown extensions for the builtin generator.
    pub markdown: MarkdownConfig,

    /// Build hooks (pre/post commands).
    pub hooks: HooksConfig,
}

impl Default for BuildSectionConfig {
    fn default() -> Self {
        Self {
            content: "docs".into(),
            output: "build".into(),
            static_dir: "static".into(),
            drafts: false,
            generator: GeneratorConfig::default(),
            markdown: MarkdownConfig::default(),
            hooks: HooksConfig::default(),
        }
    }
}

impl BuildSectionConfig {
    pub const CONTENT: FieldPath = FieldPath::new("build.content");
    pub const OUTPUT: FieldPath = FieldPath::new("build.output");
    pub const STATIC: FieldPath = FieldPath::new("build.static");

    /// Validate build configuration.
    ///
    /// Expects paths already normalized against `root`. The output directory
    /// is deleted on every build, so it must not be the project root, the
    /// content tree, the static tree, or any of their ancestors.
    pub fn validate(&self, root: &Path, diag: &mut ConfigDiagnostics) {
        if !self.content.is_dir() {
            diag.error_with_hint(
                Self::CONTENT,
                format!("content directory not found: {}", self.content.display()),
                "create it or point `build.content` at your docs",
            );
        }

        if root.starts_with(&self.output) {
            diag.error(
                Self::OUTPUT,
                format!(
                    "output `{}` contains the project root and would be wiped",
                    self.output.display()
                ),
            );
        } else if self.content.starts_with(&self.output) || self.output.starts_with(&self.content)
        {
            diag.error(
                Self::OUTPUT,
                "output and content directories must not overlap",
            );
        }

        if self.static_dir.starts_with(&self.output) || self.output.starts_with(&self.static_dir) {
            diag.error_with_hint(
                Self::STATIC,
                "output and static directories must not overlap",
                "the output directory is wiped before static files are copied",
            );
        }

        self.generator.validate(diag);
        self.hooks.validate(diag);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.build.content, PathBuf::from("docs"));
        assert_eq!(config.build.output, PathBuf::from("build"));
        assert_eq!(config.build.static_dir, PathBuf::from("static"));
        assert!(!config.build.drafts);
    }

    #[test]
    fn test_static_key_renamed() {
        let config = test_parse_config("[build]\nstatic = \"public-assets\"");
        assert_eq!(config.build.static_dir, PathBuf::from("public-assets"));
    }

    #[test]
    fn test_output_must_not_contain_root() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("site");
        std::fs::create_dir_all(root.join("docs")).unwrap();

        let mut build = BuildSectionConfig::default();
        build.content = root.join("docs");
        build.output = dir.path().to_path_buf();

        let mut diag = ConfigDiagnostics::new();
        build.validate(&root, &mut diag);
        assert!(diag.has_errors());
    }

    #[test]
    fn test_output_inside_content_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("docs")).unwrap();

        let mut build = BuildSectionConfig::default();
        build.content = root.join("docs");
        build.output = root.join("docs/build");

        let mut diag = ConfigDiagnostics::new();
        build.validate(root, &mut diag);
        assert!(diag.has_errors());
    }

    #[test]
    fn test_static_overlapping_output_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("docs")).unwrap();

        for (static_dir, output) in [("build", "build"), ("build/static", "build"), ("public", "public/out")] {
            let mut build = BuildSectionConfig::default();
            build.content = root.join("docs");
            build.static_dir = root.join(static_dir);
            build.output = root.join(output);

            let mut diag = ConfigDiagnostics::new();
            build.validate(root, &mut diag);
            assert!(diag.has_errors(), "static = {static_dir}, output = {output}");
            assert_eq!(diag.errors()[0].field, BuildSectionConfig::STATIC);
        }
    }

    #[test]
    fn test_valid_layout() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("docs")).unwrap();

        let mut build = BuildSectionConfig::default();
        build.content = root.join("docs");
        build.output = root.join("build");

        let mut diag = ConfigDiagnostics::new();
        build.validate(root, &mut diag);
        assert!(!diag.has_errors());
    }
}
