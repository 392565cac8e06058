//! `[build.generator]` configuration.
//!
//! Selects how the output directory is produced.
//!
//! # Example
//!
//! ```toml
//! # Built-in Markdown renderer (default)
//! [build.generator]
//! kind = "builtin"
//!
//! # Third-party generator, used as-is
//! [build.generator]
//! kind = "command"
//! command = ["npx", "docusaurus", "build", "--out-dir", "$DOCSHIP_OUTPUT_DIR"]
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};

/// Generator backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeneratorKind {
    /// Render Markdown in-process.
    #[default]
    Builtin,
    /// Run an external static-site generator.
    Command,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub kind: GeneratorKind,

    /// Generator argv for `kind = "command"`.
    /// Supports `$DOCSHIP_*` variable substitution.
    pub command: Vec<String>,
}

impl GeneratorConfig {
    pub const COMMAND: FieldPath = FieldPath::new("build.generator.command");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        match self.kind {
            GeneratorKind::Command if self.command.is_empty() => {
                diag.error_with_hint(
                    Self::COMMAND,
                    "generator kind is `command` but no command is configured",
                    r#"e.g. command = ["npx", "docusaurus", "build", "--out-dir", "$DOCSHIP_OUTPUT_DIR"]"#,
                );
            }
            GeneratorKind::Builtin if !self.command.is_empty() => {
                diag.warn(Self::COMMAND, "ignored because generator kind is `builtin`");
            }
            _ => {}
        }
    }
}
