//! Site building orchestration.
//!
//! Build pipeline phases:
//! - **Clean** - Delete and recreate the output directory
//! - **Pre Hooks** - User-defined pre-build commands
//! - **Generate** - Builtin Markdown renderer or external generator
//! - **Post Hooks** - User-defined post-build commands
//! - **Verify** - The output directory must not be empty

use crate::{
    config::SiteConfig,
    generator::{self, BuildError},
    hooks, log,
    utils::plural_count,
};
use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Summary of a finished build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    /// Absolute output directory.
    pub output: PathBuf,
    /// Pages rendered (builtin generator only).
    pub pages: usize,
    /// Files copied verbatim (builtin generator only).
    pub assets: usize,
    /// Drafts left out of the build.
    pub drafts_skipped: usize,
}

/// Build the entire site into a fresh output directory.
///
/// Pipeline: clean -> pre-hooks -> generate -> post-hooks -> verify
pub fn build_site(config: &SiteConfig, quiet: bool) -> Result<BuildReport> {
    let output = &config.build.output;

    // Clean first so pre hooks can already write into the output
    clean_output(output)?;

    hooks::run_pre_hooks(config)?;

    let stats = generator::generate(config, quiet)?;
    if !quiet && stats.drafts_skipped > 0 {
        log!("build"; "{} skipped", plural_count(stats.drafts_skipped, "draft"));
    }

    hooks::run_post_hooks(config)?;

    verify_output(output)?;

    if !quiet {
        log!("build"; "done: {}", config.root_relative(output).display());
    }

    Ok(BuildReport {
        output: output.clone(),
        pages: stats.pages,
        assets: stats.assets,
        drafts_skipped: stats.drafts_skipped,
    })
}

/// Remove anything at `output` and recreate it as an empty directory.
fn clean_output(output: &Path) -> Result<()> {
    match fs::symlink_metadata(output) {
        Ok(meta) if meta.is_dir() => fs::remove_dir_all(output),
        Ok(_) => fs::remove_file(output),
        Err(_) => Ok(()),
    }
    .with_context(|| format!("Failed to clear output directory: {}", output.display()))?;

    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory: {}", output.display()))
}

fn verify_output(output: &Path) -> Result<()> {
    let mut entries = fs::read_dir(output)
        .with_context(|| format!("Failed to read output directory: {}", output.display()))?;
    if entries.next().is_none() {
        return Err(BuildError::EmptyOutput(output.to_path_buf()).into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_site;

    #[test]
    fn test_build_renders_every_page() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_site(
            dir.path(),
            "",
            &[
                ("index.md", "# Style Guide"),
                ("naming.md", "# Naming"),
                ("guide/errors.md", "# Errors"),
                ("guide/diagram.svg", "<svg/>"),
            ],
        );

        let report = build_site(&config, true).unwrap();
        assert_eq!(report.output, config.build.output);
        assert_eq!(report.pages, 3);
        assert_eq!(report.assets, 1);

        for page in ["index.html", "naming.html", "guide/errors.html"] {
            assert!(config.build.output.join(page).is_file(), "{page}");
        }
    }

    #[test]
    fn test_stale_output_removed() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_site(dir.path(), "", &[("index.md", "# Home"), ("old.md", "# Old")]);

        build_site(&config, true).unwrap();
        assert!(config.build.output.join("old.html").exists());

        fs::remove_file(config.build.content.join("old.md")).unwrap();
        fs::write(config.build.output.join("leftover.txt"), "stale").unwrap();
        fs::create_dir_all(config.build.output.join(".git")).unwrap();

        build_site(&config, true).unwrap();
        assert!(config.build.output.join("index.html").exists());
        assert!(!config.build.output.join("old.html").exists());
        assert!(!config.build.output.join("leftover.txt").exists());
        assert!(!config.build.output.join(".git").exists());
    }

    #[test]
    fn test_output_file_replaced_by_directory() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_site(dir.path(), "", &[("index.md", "# Home")]);
        fs::write(&config.build.output, "not a directory").unwrap();

        build_site(&config, true).unwrap();
        assert!(config.build.output.join("index.html").is_file());
    }

    #[test]
    fn test_invalid_document_fails_build() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_site(
            dir.path(),
            "",
            &[("index.md", "# Home"), ("broken.md", "---\nno separator here\n---\n")],
        );

        let err = build_site(&config, true).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BuildError>(),
            Some(BuildError::InvalidDocument { .. })
        ));
        assert!(format!("{err:#}").contains("broken.md"));
    }

    #[test]
    fn test_empty_content_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_site(dir.path(), "", &[]);

        let err = build_site(&config, true).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BuildError>(),
            Some(BuildError::EmptyOutput(_))
        ));
    }

    #[test]
    fn test_hooks_run_around_generator() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_site(
            dir.path(),
            r#"
[[build.hooks.pre]]
command = ["sh", "-c", "echo pre > \"$DOCSHIP_OUTPUT_DIR/pre.txt\""]

[[build.hooks.post]]
command = ["sh", "-c", "test -f \"$DOCSHIP_OUTPUT_DIR/index.html\" && echo docs.example.org > \"$DOCSHIP_OUTPUT_DIR/CNAME\""]
"#,
            &[("index.md", "# Home")],
        );

        build_site(&config, true).unwrap();
        assert!(config.build.output.join("pre.txt").is_file());
        assert!(config.build.output.join("CNAME").is_file());
    }

    #[test]
    fn test_drafts_only_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_site(dir.path(), "", &[("wip.md", "---\ndraft: true\n---\n# WIP")]);

        let err = build_site(&config, true).unwrap_err();
        assert!(err.downcast_ref::<BuildError>().is_some());
    }
}
