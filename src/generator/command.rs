//! External generator backend.
//!
//! Runs a third-party static-site generator with `$DOCSHIP_*` substitution,
//! from the project root, and trusts it to fill `$DOCSHIP_OUTPUT_DIR`.

use super::BuildError;
use crate::{
    config::SiteConfig,
    hooks::{build_vars, resolve_args},
    log,
    utils::exec::{Cmd, EMPTY_FILTER, SILENT_FILTER},
};
use anyhow::{Context, Result, bail};
use std::path::Path;

pub fn run_generator(config: &SiteConfig, quiet: bool) -> Result<()> {
    let vars = build_vars(config);
    let argv = resolve_args(&config.build.generator.command, &vars);
    let Some(program) = argv.first() else {
        bail!("no generator command configured");
    };

    ensure_resolvable(config, program)?;

    if !quiet {
        log!("build"; "running `{}`", argv.join(" "));
    }

    let filter = if quiet { &SILENT_FILTER } else { &EMPTY_FILTER };
    let output = Cmd::from_slice(&argv)
        .cwd(config.get_root())
        .envs(&vars)
        .filter(filter)
        .run()
        .with_context(|| format!("generator `{program}` failed"))?;

    if !quiet {
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stdout = stdout.trim();
        if !stdout.is_empty() {
            println!("{stdout}");
        }
    }

    Ok(())
}

/// Bare names are looked up on `PATH`; anything with a separator is taken
/// relative to the project root.
fn ensure_resolvable(config: &SiteConfig, program: &str) -> Result<()> {
    let found = if program.contains(['/', '\\']) {
        let path = Path::new(program);
        if path.is_absolute() {
            path.is_file()
        } else {
            config.root_join(path).is_file()
        }
    } else {
        which::which(program).is_ok()
    };

    if found {
        Ok(())
    } else {
        Err(BuildError::GeneratorNotFound(program.to_string()).into())
    }
}
