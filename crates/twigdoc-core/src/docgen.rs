//! Docgen descriptor types and merged component metadata.
//!
//! Docgen tools describe props, events and slots either as a list of
//! descriptors or as a mapping keyed by identifier. [`DescriptorSet`] keeps
//! whichever shape it was given so the injected metadata looks exactly like
//! the docgen output minus the filtered entries.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::fragment::Fragment;

/// The tag that hides a descriptor from the documentation.
pub const IGNORE_TAG: &str = "ignore";

/// A single prop, event, or slot description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Descriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Tags>,
    /// Every other field, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Descriptor {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// Attach an extra field.
    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Whether the descriptor is tagged `ignore`.
    pub fn is_ignored(&self) -> bool {
        self.tags.as_ref().map(Tags::has_ignore).unwrap_or(false)
    }
}

/// Doc-block tags attached to a descriptor.
///
/// Props and slots carry a keyed object (`{"ignore": [...]}`), events carry
/// a list of `{"title": ...}` entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Tags {
    List(Vec<TagEntry>),
    Keyed(IndexMap<String, Value>),
}

impl Tags {
    pub fn has_ignore(&self) -> bool {
        match self {
            Tags::List(entries) => entries
                .iter()
                .any(|entry| entry.title.as_deref() == Some(IGNORE_TAG)),
            Tags::Keyed(map) => map.get(IGNORE_TAG).map(is_truthy).unwrap_or(false),
        }
    }
}

/// One entry of a list-shaped tag collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TagEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// JavaScript truthiness of a JSON value.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Key of a descriptor inside its container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptorKey<'a> {
    Index(usize),
    Name(&'a str),
}

/// A collection of descriptors, either list- or map-shaped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DescriptorSet {
    List(Vec<Descriptor>),
    Map(IndexMap<String, Descriptor>),
}

impl Default for DescriptorSet {
    fn default() -> Self {
        DescriptorSet::List(Vec::new())
    }
}

impl DescriptorSet {
    /// Iterate `(key, descriptor)` pairs in container order.
    pub fn iter(&self) -> Box<dyn Iterator<Item = (DescriptorKey<'_>, &Descriptor)> + '_> {
        match self {
            DescriptorSet::List(items) => Box::new(
                items
                    .iter()
                    .enumerate()
                    .map(|(i, d)| (DescriptorKey::Index(i), d)),
            ),
            DescriptorSet::Map(map) => Box::new(
                map.iter()
                    .map(|(k, d)| (DescriptorKey::Name(k.as_str()), d)),
            ),
        }
    }

    /// Keep only the descriptors matching `keep`, preserving container kind and order.
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&Descriptor) -> bool,
    {
        match self {
            DescriptorSet::List(items) => items.retain(|d| keep(d)),
            DescriptorSet::Map(map) => map.retain(|_, d| keep(d)),
        }
    }

    /// Append a descriptor. Map-shaped sets key it by its name.
    pub fn push(&mut self, descriptor: Descriptor) {
        match self {
            DescriptorSet::List(items) => items.push(descriptor),
            DescriptorSet::Map(map) => {
                let key = descriptor
                    .name
                    .clone()
                    .unwrap_or_else(|| map.len().to_string());
                map.insert(key, descriptor);
            }
        }
    }

    pub fn len(&self) -> usize {
        match self {
            DescriptorSet::List(items) => items.len(),
            DescriptorSet::Map(map) => map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Descriptor names in container order (map keys for map-shaped sets).
    pub fn names(&self) -> Vec<&str> {
        self.iter()
            .filter_map(|(key, d)| match key {
                DescriptorKey::Name(name) => Some(name),
                DescriptorKey::Index(_) => d.name.as_deref(),
            })
            .collect()
    }
}

/// Docgen output for one component.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDoc {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub props: Option<DescriptorSet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<DescriptorSet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slots: Option<DescriptorSet>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ComponentDoc {
    /// Export name used when docgen does not report one.
    pub const DEFAULT_EXPORT: &'static str = "default";

    pub fn named(display_name: impl Into<String>) -> Self {
        Self {
            display_name: Some(display_name.into()),
            export_name: Some(Self::DEFAULT_EXPORT.to_string()),
            ..Default::default()
        }
    }

    /// Whether the documented component is the module's default export.
    pub fn is_default_export(&self) -> bool {
        self.export_name
            .as_deref()
            .map(|name| name == Self::DEFAULT_EXPORT)
            .unwrap_or(true)
    }
}

/// Docgen output merged with the extracted template metadata.
///
/// This is what gets serialized into the module and what the panel reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergedComponentMetadata {
    #[serde(flatten)]
    pub doc: ComponentDoc,
    #[serde(default)]
    pub twig_blocks: Vec<Fragment>,
}
