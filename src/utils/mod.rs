//! Shared helpers: process execution, git plumbing, paths and HTML text.

pub mod exec;
pub mod git;
pub mod html;
pub mod path;

/// `1 page`, `3 pages`.
pub fn plural_count(count: usize, noun: &str) -> String {
    let suffix = if count == 1 { "" } else { "s" };
    format!("{count} {noun}{suffix}")
}
