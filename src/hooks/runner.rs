//! Hook execution utilities.
//!
//! Provides environment variable building and command execution for build hooks.

use crate::config::{HookConfig, SiteConfig};
use anyhow::{Context, Result};
use rustc_hash::FxHashMap;

// ============================================================================
// Environment Variables
// ============================================================================

/// Build `$DOCSHIP_*` environment variables for external commands
pub fn build_vars(config: &SiteConfig) -> FxHashMap<String, String> {
    let mut vars = FxHashMap::default();

    vars.insert(
        "DOCSHIP_ROOT".into(),
        config.get_root().display().to_string(),
    );
    vars.insert(
        "DOCSHIP_CONTENT_DIR".into(),
        config.build.content.display().to_string(),
    );
    vars.insert(
        "DOCSHIP_OUTPUT_DIR".into(),
        config.build.output.display().to_string(),
    );

    vars
}

// ============================================================================
// Command Argument Resolution
// ============================================================================

/// Resolve `$DOCSHIP_*` variables in command arguments
///
/// Longer names are substituted first so `$DOCSHIP_ROOT` never clobbers a
/// longer variable sharing its prefix.
pub fn resolve_args(args: &[String], vars: &FxHashMap<String, String>) -> Vec<String> {
    let mut keys: Vec<_> = vars.keys().collect();
    keys.sort_by_key(|k| std::cmp::Reverse(k.len()));

    args.iter()
        .map(|arg| {
            keys.iter().fold(arg.clone(), |acc, key| {
                acc.replace(&format!("${key}"), &vars[key.as_str()])
            })
        })
        .collect()
}

// ============================================================================
// Hook Execution
// ============================================================================

/// Execute a single hook
///
/// The `phase` parameter is used for logging (e.g., "pre" or "post")
pub fn run_hook(hook: &HookConfig, config: &SiteConfig, phase: &str) -> Result<()> {
    use crate::utils::exec::{Cmd, SILENT_FILTER};

    if !hook.enable || hook.command.is_empty() {
        return Ok(());
    }

    let vars = build_vars(config);
    let resolved = resolve_args(&hook.command, &vars);

    if !hook.quiet {
        crate::log!(phase; "`{}` running", hook.display_name());
    }

    let output = Cmd::from_slice(&resolved)
        .cwd(config.get_root())
        .envs(&vars)
        .filter(&SILENT_FILTER)
        .run()
        .with_context(|| format!("{phase} hook `{}` failed", hook.display_name()))?;

    // Print output directly without prefix (unless quiet)
    if !hook.quiet {
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stdout = stdout.trim();
        if !stdout.is_empty() {
            println!("{stdout}");
        }
    }

    Ok(())
}

/// Execute all pre hooks
pub fn run_pre_hooks(config: &SiteConfig) -> Result<()> {
    for hook in &config.build.hooks.pre {
        run_hook(hook, config, "pre")?;
    }
    Ok(())
}

/// Execute all post hooks
pub fn run_post_hooks(config: &SiteConfig) -> Result<()> {
    for hook in &config.build.hooks.post {
        run_hook(hook, config, "post")?;
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_site;

    #[test]
    fn test_resolve_args_simple() {
        let mut vars = FxHashMap::default();
        vars.insert("DOCSHIP_OUTPUT_DIR".into(), "/path/to/output".into());
        vars.insert("DOCSHIP_ROOT".into(), "/path/to/root".into());

        let args = vec![
            "npx".into(),
            "docusaurus".into(),
            "--out-dir".into(),
            "$DOCSHIP_OUTPUT_DIR".into(),
        ];

        let resolved = resolve_args(&args, &vars);
        assert_eq!(resolved[0], "npx");
        assert_eq!(resolved[3], "/path/to/output");
    }

    #[test]
    fn test_resolve_args_no_vars() {
        let vars = FxHashMap::default();
        let args = vec!["echo".into(), "hello".into()];
        let resolved = resolve_args(&args, &vars);
        assert_eq!(resolved, args);
    }

    #[test]
    fn test_resolve_args_multiple_vars_in_one_arg() {
        let mut vars = FxHashMap::default();
        vars.insert("DOCSHIP_ROOT".into(), "/root".into());
        vars.insert("DOCSHIP_OUTPUT_DIR".into(), "/output".into());

        let args = vec!["cp $DOCSHIP_ROOT/CNAME $DOCSHIP_OUTPUT_DIR/CNAME".into()];
        let resolved = resolve_args(&args, &vars);
        assert_eq!(resolved[0], "cp /root/CNAME /output/CNAME");
    }

    #[test]
    fn test_build_vars() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_site(dir.path(), "", &[]);
        let vars = build_vars(&config);
        assert_eq!(vars["DOCSHIP_ROOT"], config.root.display().to_string());
        assert_eq!(vars["DOCSHIP_OUTPUT_DIR"], config.build.output.display().to_string());
    }

    #[test]
    fn test_run_hook_writes_into_output() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_site(
            dir.path(),
            r#"
[[build.hooks.post]]
command = ["sh", "-c", "mkdir -p \"$DOCSHIP_OUTPUT_DIR\" && echo example.org > \"$DOCSHIP_OUTPUT_DIR/CNAME\""]
"#,
            &[],
        );
        run_post_hooks(&config).unwrap();
        let cname = std::fs::read_to_string(config.build.output.join("CNAME")).unwrap();
        assert_eq!(cname.trim(), "example.org");
    }

    #[test]
    fn test_failing_hook_aborts() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_site(
            dir.path(),
            "[[build.hooks.pre]]\nname = \"broken\"\ncommand = [\"sh\", \"-c\", \"exit 1\"]",
            &[],
        );
        let err = run_pre_hooks(&config).unwrap_err();
        assert!(format!("{err:#}").contains("pre hook `broken` failed"));
    }

    #[test]
    fn test_disabled_hook_skipped() {
        let hook = HookConfig {
            enable: false,
            command: vec!["false".into()],
            ..HookConfig::default()
        };
        let config = SiteConfig::default();
        assert!(run_hook(&hook, &config, "pre").is_ok());
    }
}
