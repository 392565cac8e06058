//! Site generators.
//!
//! Two backends fill the output directory:
//!
//! - **builtin**: renders the content tree in-process ([`markdown`])
//! - **command**: runs a third-party generator as-is ([`command`])

mod command;
mod error;
pub mod markdown;

pub use error::BuildError;

use crate::config::{GeneratorKind, SiteConfig};
use anyhow::Result;

/// Counters reported by a generator run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerateStats {
    /// Pages rendered (builtin only).
    pub pages: usize,
    /// Files copied verbatim (builtin only).
    pub assets: usize,
    /// Draft pages left out (builtin only).
    pub drafts_skipped: usize,
}

/// Run the configured generator against an existing, empty output directory.
pub fn generate(config: &SiteConfig, quiet: bool) -> Result<GenerateStats> {
    match config.build.generator.kind {
        GeneratorKind::Builtin => markdown::render_site(config, quiet),
        GeneratorKind::Command => {
            command::run_generator(config, quiet)?;
            Ok(GenerateStats::default())
        }
    }
}
