//! Records handed to the documentation UI.

use serde::{Deserialize, Serialize};

/// One named template block and its pretty-printed source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fragment {
    pub name: String,
    pub code: String,
}

impl Fragment {
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
        }
    }

    /// An empty block renders as a distinct "no content" state.
    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }
}

/// A `<slot>` declared by a component template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotDescriptor {
    pub name: String,
    pub is_default: bool,
    pub is_scoped_slot: bool,
    pub variables: Vec<String>,
}

impl SlotDescriptor {
    /// Name used when a slot has no `name` attribute.
    pub const DEFAULT_NAME: &'static str = "default";

    /// The unnamed default slot without bindings.
    pub fn default_slot() -> Self {
        Self::new(Self::DEFAULT_NAME, Vec::new())
    }

    /// Build a descriptor, deriving the default and scoped flags.
    pub fn new(name: impl Into<String>, variables: Vec<String>) -> Self {
        let name = name.into();
        Self {
            is_default: name == Self::DEFAULT_NAME,
            is_scoped_slot: !variables.is_empty(),
            name,
            variables,
        }
    }
}
