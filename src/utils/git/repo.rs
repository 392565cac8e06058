use super::tree::TreeBuilder;
use crate::{config::section::AuthorConfig, debug, log};
use anyhow::{Context, Result, anyhow, bail};
use gix::{Repository, commit::NO_PARENT_IDS, index::State};
use std::{fs, io::Write, path::Path};

/// Ids of a freshly written root commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitInfo {
    pub commit: gix::ObjectId,
    pub tree: gix::ObjectId,
    pub files: usize,
}

/// Create a brand-new repository at `root`, discarding any existing `.git`.
///
/// The author becomes the repository-local `user.name` / `user.email`.
pub fn create_repo(root: &Path, author: &AuthorConfig) -> Result<Repository> {
    let git_dir = root.join(".git");
    if fs::symlink_metadata(&git_dir).is_ok() {
        debug!("git"; "removing previous {}", git_dir.display());
        if git_dir.is_dir() {
            fs::remove_dir_all(&git_dir)
        } else {
            fs::remove_file(&git_dir)
        }
        .with_context(|| format!("Failed to remove {}", git_dir.display()))?;
    }

    let repo = gix::init(root)
        .with_context(|| format!("Failed to initialize repository in {}", root.display()))?;
    write_identity(repo.path(), author)?;

    // Reopen so the identity is part of the loaded config
    Ok(gix::open(root)?)
}

/// Stage the whole work tree and write it as a single root commit on `HEAD`.
pub fn commit_all(repo: &Repository, message: &str) -> Result<CommitInfo> {
    if message.trim().is_empty() {
        bail!("Commit message cannot be empty");
    }

    let root = get_repo_root(repo)?;

    // Build index and tree from working directory
    let mut index = State::new(repo.object_hash());
    let mut builder = TreeBuilder::new(repo, root);
    let tree = builder.build_from_dir(root, &mut index)?;
    let files = builder.file_count();
    index.sort_entries();

    // Write index file so the work tree is clean afterwards
    let mut index_file = gix::index::File::from_state(index, repo.index_path());
    index_file.write(gix::index::write::Options::default())?;

    let tree_id = repo.write_object(&tree)?.detach();
    let commit_id = repo
        .commit("HEAD", message, tree_id, NO_PARENT_IDS)
        .context("Failed to create commit")?
        .detach();

    log!("git"; "commit {} ({} files)", commit_id.to_hex_with_len(7), files);
    Ok(CommitInfo {
        commit: commit_id,
        tree: tree_id,
        files,
    })
}

/// Get repository root path
fn get_repo_root(repo: &Repository) -> Result<&Path> {
    repo.path()
        .parent()
        .ok_or_else(|| anyhow!("Invalid repository path"))
}

/// Append a `[user]` section to the repository config.
fn write_identity(git_dir: &Path, author: &AuthorConfig) -> Result<()> {
    let path = git_dir.join("config");
    let mut file = fs::OpenOptions::new()
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    write!(
        file,
        "\n[user]\n\tname = {}\n\temail = {}\n",
        quote_config_value(&author.name),
        quote_config_value(&author.email)
    )?;
    Ok(())
}

/// Quote a value for a git config file.
fn quote_config_value(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}
