//! Publishing the built site.
//!
//! Every publish replaces the target branch with a single root commit holding
//! the whole output directory:
//!
//! ```text
//! build/            marker -> git init -> stage all -> root commit -> push --force
//! ├── .nojekyll                                                      HEAD:refs/heads/gh-pages
//! └── index.html
//! ```

use crate::{
    cli::build::build_site,
    config::{DeployConfig, SiteConfig},
    core::is_shutdown,
    generator::BuildError,
    log,
    utils::git,
};
use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("output directory `{}` is missing or empty, nothing to publish", .0.display())]
    MissingOutput(PathBuf),
}

/// A published (or, with `--dry-run`, committed) snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub commit: gix::ObjectId,
    pub tree: gix::ObjectId,
    /// Files in the snapshot, marker included.
    pub files: usize,
    pub branch: String,
    pub remote: String,
    /// `false` for dry runs.
    pub pushed: bool,
}

/// Build the site, then publish it.
pub fn deploy_site(config: &SiteConfig, dry_run: bool) -> Result<Snapshot> {
    build_site(config, false)?;

    if is_shutdown() {
        return Err(BuildError::Interrupted.into());
    }

    publish(&config.build.output, &config.deploy, dry_run)
}

/// Commit `output_dir` as a fresh single-commit history and force-push it.
///
/// With `dry_run` the repository and commit are still created, only the
/// push is skipped.
pub fn publish(output_dir: &Path, deploy: &DeployConfig, dry_run: bool) -> Result<Snapshot> {
    if !has_content(output_dir) {
        return Err(PublishError::MissingOutput(output_dir.to_path_buf()).into());
    }

    let marker = output_dir.join(&deploy.marker);
    fs::write(&marker, "").with_context(|| format!("Failed to create {}", marker.display()))?;

    let repo = git::create_repo(output_dir, &deploy.author)?;
    let message = render_message(&deploy.message, unix_now());
    let commit = git::commit_all(&repo, &message)?;

    if dry_run {
        log!("deploy"; "dry run, not pushing to {} ({})", deploy.remote, deploy.branch);
    } else {
        git::push(
            output_dir,
            &deploy.remote,
            &deploy.branch,
            deploy.token_path.as_deref(),
        )?;
        log!("deploy"; "published {} to {} ({})", commit.commit.to_hex_with_len(7), deploy.remote, deploy.branch);
    }

    Ok(Snapshot {
        commit: commit.commit,
        tree: commit.tree,
        files: commit.files,
        branch: deploy.branch.clone(),
        remote: deploy.remote.clone(),
        pushed: !dry_run,
    })
}

/// Whether `dir` contains anything besides a stale `.git`.
fn has_content(dir: &Path) -> bool {
    fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(Result::ok)
                .any(|e| e.file_name() != ".git")
        })
        .unwrap_or(false)
}

/// Expand `{timestamp}` to Unix seconds.
fn render_message(template: &str, timestamp: u64) -> String {
    template.replace("{timestamp}", &timestamp.to_string())
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
