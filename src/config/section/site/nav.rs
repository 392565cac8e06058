//! `[[site.nav]]` navigation entries.

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};

/// A single navigation link.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavItem {
    /// Link text.
    pub label: String,

    /// Site-relative path (e.g. `naming.html`) or absolute URL.
    pub path: String,
}

impl NavItem {
    const FIELD: FieldPath = FieldPath::new("site.nav");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.label.trim().is_empty() {
            diag.error(Self::FIELD, format!("nav entry for `{}` has no label", self.path));
        }
        if self.path.trim().is_empty() {
            diag.error(Self::FIELD, format!("nav entry `{}` has no path", self.label));
        }
    }

    /// Whether `path` points off-site.
    pub fn is_external(&self) -> bool {
        self.path.contains("://") || self.path.starts_with("mailto:")
    }
}
