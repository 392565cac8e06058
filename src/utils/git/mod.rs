//! Git operations for publishing the output directory.
//!
//! Handles repository initialization, the snapshot commit, and pushing.

mod remote;
mod repo;
mod tree;

pub use remote::push;
pub use repo::{CommitInfo, commit_all, create_repo};
