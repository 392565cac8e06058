use crate::utils::path::to_slash_relative;
use anyhow::{Context, Result, anyhow};
use gix::{
    Repository,
    bstr::{BStr, BString},
    index::{
        State,
        entry::{Flags, Mode, Stat},
        fs::Metadata,
    },
    objs::{Tree, tree},
};
use std::{fs, path::Path};

/// Builder for constructing git trees from the filesystem.
///
/// Every file below the work tree is staged, dotfiles included. Only `.git`
/// is skipped.
pub struct TreeBuilder<'a> {
    repo: &'a Repository,
    root: &'a Path,
    files: usize,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(repo: &'a Repository, root: &'a Path) -> Self {
        Self {
            repo,
            root,
            files: 0,
        }
    }

    /// Number of blobs staged so far.
    pub fn file_count(&self) -> usize {
        self.files
    }

    /// Build a git tree from a directory
    ///
    /// Recursively traverses the directory, writing blobs for files and trees
    /// for subdirectories, and records every file in `index`.
    pub fn build_from_dir(&mut self, dir: &Path, index: &mut State) -> Result<Tree> {
        let mut entries = Vec::new();

        for entry in fs::read_dir(dir).with_context(|| format!("Failed to read {}", dir.display()))? {
            let entry = entry?;
            let path = entry.path();
            let filename = get_filename(&entry)?;
            if filename == ".git" {
                continue;
            }

            let file_type = entry.file_type()?;
            if file_type.is_dir() {
                let sub_tree = self.build_from_dir(&path, index)?;
                // Git does not track empty directories
                if sub_tree.entries.is_empty() {
                    continue;
                }
                let tree_id = self.repo.write_object(&sub_tree)?.detach();
                entries.push(tree::Entry {
                    mode: tree::EntryKind::Tree.into(),
                    oid: tree_id,
                    filename,
                });
            } else {
                let (kind, blob_id) = if file_type.is_symlink() {
                    let target = fs::read_link(&path)?;
                    let target = target.to_string_lossy().into_owned().into_bytes();
                    (tree::EntryKind::Link, self.repo.write_blob(target)?.detach())
                } else {
                    let kind = if is_executable(&entry.metadata()?) {
                        tree::EntryKind::BlobExecutable
                    } else {
                        tree::EntryKind::Blob
                    };
                    let contents = fs::read(&path)
                        .with_context(|| format!("Failed to read {}", path.display()))?;
                    (kind, self.repo.write_blob(contents)?.detach())
                };

                self.add_to_index(index, &path, blob_id, kind)?;
                self.files += 1;
                entries.push(tree::Entry {
                    mode: kind.into(),
                    oid: blob_id,
                    filename,
                });
            }
        }

        sort_tree_entries(&mut entries);

        Ok(Tree { entries })
    }

    /// Add a file to the index under its full work-tree path.
    fn add_to_index(
        &self,
        index: &mut State,
        path: &Path,
        blob_id: gix::ObjectId,
        kind: tree::EntryKind,
    ) -> Result<()> {
        let rel = to_slash_relative(path, self.root)
            .ok_or_else(|| anyhow!("{} is outside the work tree", path.display()))?;
        let mode = match kind {
            tree::EntryKind::BlobExecutable => Mode::FILE_EXECUTABLE,
            tree::EntryKind::Link => Mode::SYMLINK,
            _ => Mode::FILE,
        };
        let stat = Stat::from_fs(&Metadata::from_path_no_follow(path)?)?;
        index.dangerously_push_entry(stat, blob_id, Flags::empty(), mode, BStr::new(&rel));
        Ok(())
    }
}

fn get_filename(entry: &fs::DirEntry) -> Result<BString> {
    entry
        .file_name()
        .into_string()
        .map(Into::into)
        .map_err(|name| anyhow!("Invalid UTF-8 in filename: {}", name.to_string_lossy()))
}

#[cfg(unix)]
fn is_executable(meta: &fs::Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    meta.permissions().mode() & 0o111 != 0
}

#[cfg(not(unix))]
fn is_executable(_meta: &fs::Metadata) -> bool {
    false
}

/// Sort entries according to git tree ordering (directories get trailing slash for comparison)
///
/// `foo-bar` (file) < `foo.rs` (file) < `foo` (directory, compared as `foo/`).
fn sort_tree_entries(entries: &mut [tree::Entry]) {
    let tree_mode: tree::EntryMode = tree::EntryKind::Tree.into();
    entries.sort_by_cached_key(|e| {
        let mut key = e.filename.to_vec();
        if e.mode == tree_mode {
            key.push(b'/');
        }
        key
    });
}
