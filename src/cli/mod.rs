//! Command-line interface module.

mod args;
pub mod build;
pub mod deploy;

pub use args::{Cli, Commands};
