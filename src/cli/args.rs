//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Build a documentation site and publish it to a hosting branch
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Output directory path (relative to project root)
    #[arg(short, long, global = true, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Content directory path (relative to project root)
    #[arg(short, long, global = true, value_hint = clap::ValueHint::DirPath)]
    pub content: Option<PathBuf>,

    /// Config file path (default: docship.toml, searched upward from cwd)
    #[arg(short = 'C', long, global = true, default_value = "docship.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Build the site into a fresh output directory
    #[command(visible_alias = "b")]
    Build,

    /// Build the site, then force-push it as a single snapshot
    #[command(visible_alias = "d")]
    Deploy {
        /// Override the configured remote for this run
        #[arg(short, long)]
        remote: Option<String>,

        /// Override the configured target branch for this run
        #[arg(short, long)]
        branch: Option<String>,

        /// Build and commit the snapshot, but do not push
        #[arg(short = 'n', long)]
        dry_run: bool,
    },
}

impl Cli {
    pub const fn is_deploy(&self) -> bool {
        matches!(self.command, Commands::Deploy { .. })
    }

    pub const fn is_dry_run(&self) -> bool {
        matches!(self.command, Commands::Deploy { dry_run: true, .. })
    }
}
