//! Hook system for build automation.
//!
//! `runner` builds the `$DOCSHIP_*` environment shared by hooks and the
//! external generator, and executes pre/post hooks.

mod runner;

pub use runner::*;
