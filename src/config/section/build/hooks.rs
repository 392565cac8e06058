//! Build hooks configuration.
//!
//! # Example
//!
//! ```toml
//! # Pre hooks (run after the output dir is cleaned, before generation)
//! [[build.hooks.pre]]
//! command = ["./scripts/gen-diagrams.sh", "$DOCSHIP_CONTENT_DIR"]
//!
//! # Post hooks (run after generation, before publishing)
//! [[build.hooks.post]]
//! name = "cname"
//! command = ["cp", "CNAME", "$DOCSHIP_OUTPUT_DIR/CNAME"]
//! quiet = false
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};

/// Hooks configuration containing pre and post build hooks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HooksConfig {
    /// Pre-build hooks.
    pub pre: Vec<HookConfig>,
    /// Post-build hooks.
    pub post: Vec<HookConfig>,
}

impl HooksConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        for hook in &self.pre {
            hook.validate(FieldPath::new("build.hooks.pre"), diag);
        }
        for hook in &self.post {
            hook.validate(FieldPath::new("build.hooks.post"), diag);
        }
    }
}

/// Configuration for a single build hook.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HookConfig {
    /// Whether this hook is enabled (default: true).
    pub enable: bool,

    /// Display name for logging (defaults to command[0]).
    pub name: Option<String>,

    /// Command and arguments to execute.
    /// Supports `$DOCSHIP_*` variable substitution.
    pub command: Vec<String>,

    /// Suppress output (default: true).
    pub quiet: bool,
}

impl Default for HookConfig {
    fn default() -> Self {
        Self {
            enable: true,
            name: None,
            command: Vec::new(),
            quiet: true,
        }
    }
}

impl HookConfig {
    /// Get the display name for this hook.
    ///
    /// Returns `name` if set, otherwise falls back to `command[0]`.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .unwrap_or_else(|| self.command.first().map(String::as_str).unwrap_or("hook"))
    }

    fn validate(&self, field: FieldPath, diag: &mut ConfigDiagnostics) {
        if !self.enable {
            return;
        }

        let Some(cmd) = self.command.first() else {
            diag.error(field, "hook is enabled but `command` is empty");
            return;
        };

        // Relative scripts are resolved against the project root at run time
        if !cmd.contains('/') && which::which(cmd).is_err() {
            diag.error_with_hint(
                field,
                format!("`{cmd}` not found"),
                "install the command or fix the hook `command`",
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{ConfigDiagnostics, test_parse_config};

    #[test]
    fn test_hooks_parse() {
        let config = test_parse_config(
            r#"
[[build.hooks.pre]]
command = ["echo", "pre"]

[[build.hooks.post]]
name = "cname"
command = ["cp", "CNAME", "$DOCSHIP_OUTPUT_DIR/CNAME"]
quiet = false
"#,
        );
        let hooks = &config.build.hooks;
        assert_eq!(hooks.pre.len(), 1);
        assert!(hooks.pre[0].enable);
        assert!(hooks.pre[0].quiet);
        assert_eq!(hooks.pre[0].display_name(), "echo");
        assert_eq!(hooks.post[0].display_name(), "cname");
        assert!(!hooks.post[0].quiet);
    }

    #[test]
    fn test_hook_empty_command_rejected() {
        let config = test_parse_config("[[build.hooks.pre]]\nname = \"nothing\"");
        let mut diag = ConfigDiagnostics::new();
        config.build.hooks.validate(&mut diag);
        assert!(diag.has_errors());
    }

    #[test]
    fn test_hook_missing_program_rejected() {
        let config =
            test_parse_config("[[build.hooks.post]]\ncommand = [\"docship-no-such-program\"]");
        let mut diag = ConfigDiagnostics::new();
        config.build.hooks.validate(&mut diag);
        assert!(diag.has_errors());
    }

    #[test]
    fn test_disabled_hook_not_validated() {
        let config = test_parse_config("[[build.hooks.pre]]\nenable = false");
        let mut diag = ConfigDiagnostics::new();
        config.build.hooks.validate(&mut diag);
        assert!(!diag.has_errors());
    }
}
