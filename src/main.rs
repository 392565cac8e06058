//! docship - build a documentation site and publish it as a single snapshot.

mod cli;
mod config;
mod core;
mod generator;
mod hooks;
mod logger;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands, build::build_site, deploy::deploy_site};
use config::SiteConfig;

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    core::setup_shutdown_handler()?;

    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = SiteConfig::load(&cli)?;

    match &cli.command {
        Commands::Build => build_site(&config, false).map(|_| ()),
        Commands::Deploy { .. } => deploy_site(&config, cli.is_dry_run()).map(|_| ()),
    }
}
