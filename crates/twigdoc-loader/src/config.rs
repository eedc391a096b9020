//! Loader options, as they arrive from a bundler configuration.

use serde::{Deserialize, Serialize};

use crate::imports::TEMPLATE_EXTENSION;

/// Options controlling the loader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoaderOptions {
    /// Property the merged metadata is assigned to.
    pub inject_at: String,
    /// Extension identifying the component template import.
    pub template_extension: String,
    /// Modules whose path contains one of these are passed through untouched.
    pub skip_patterns: Vec<String>,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            inject_at: "__docgenInfo".to_string(),
            template_extension: TEMPLATE_EXTENSION.to_string(),
            skip_patterns: vec![".stories.js".to_string()],
        }
    }
}

impl LoaderOptions {
    /// Parse options from JSON. Missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn with_inject_at(mut self, inject_at: impl Into<String>) -> Self {
        self.inject_at = inject_at.into();
        self
    }

    /// Whether the module at `path` is skipped.
    pub fn skips(&self, path: &str) -> bool {
        path.is_empty() || self.skip_patterns.iter().any(|p| path.contains(p.as_str()))
    }
}
