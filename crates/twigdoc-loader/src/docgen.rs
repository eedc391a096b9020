//! The docgen collaborator.
//!
//! Extracting props, events and slots from component scripts is delegated to
//! an external docgen tool. [`Docgen`] is the seam; two simple
//! implementations ship with the loader.

use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use twigdoc_core::{ComponentDoc, DescriptorSet, DocgenError};

/// `name: '...'` directly inside an `export default {` object.
static EXPORT_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"export\s+default\s*\{\s*name:\s*['"]([^'"]+)['"]"#)
        .expect("export name pattern is valid")
});

/// Produces docgen records for a component module.
pub trait Docgen {
    fn parse_source(&self, source: &str, path: &Path) -> Result<Vec<ComponentDoc>, DocgenError>;
}

/// Reports the default export's `name` and nothing else.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExportNameDocgen;

impl Docgen for ExportNameDocgen {
    fn parse_source(&self, source: &str, path: &Path) -> Result<Vec<ComponentDoc>, DocgenError> {
        let display_name = EXPORT_NAME
            .captures(source)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .or_else(|| {
                path.file_stem()
                    .map(|stem| stem.to_string_lossy().into_owned())
            })
            .ok_or_else(|| DocgenError::Failed {
                reason: format!("no component name found in {}", path.display()),
            })?;

        let mut doc = ComponentDoc::named(display_name);
        doc.props = Some(DescriptorSet::default());
        doc.events = Some(DescriptorSet::default());
        doc.slots = Some(DescriptorSet::default());
        Ok(vec![doc])
    }
}

/// Returns a fixed set of records, whatever the source.
#[derive(Debug, Clone, Default)]
pub struct StaticDocgen {
    docs: Vec<ComponentDoc>,
}

impl StaticDocgen {
    pub fn new(docs: Vec<ComponentDoc>) -> Self {
        Self { docs }
    }

    /// Parse either a single record or an array of records.
    pub fn from_json(json: &str) -> Result<Self, DocgenError> {
        let docs = match serde_json::from_str::<Value>(json)? {
            Value::Array(items) => items
                .into_iter()
                .map(serde_json::from_value)
                .collect::<Result<Vec<ComponentDoc>, _>>()?,
            value => vec![serde_json::from_value(value)?],
        };
        Ok(Self { docs })
    }

    pub fn from_file(path: &Path) -> Result<Self, DocgenError> {
        Self::from_json(&fs::read_to_string(path)?)
    }
}

impl Docgen for StaticDocgen {
    fn parse_source(&self, _source: &str, _path: &Path) -> Result<Vec<ComponentDoc>, DocgenError> {
        Ok(self.docs.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_name_docgen() {
        let source = "export default { \n  name: 'sw-card',\n  template,\n};";
        let docs = ExportNameDocgen
            .parse_source(source, Path::new("src/sw-card/index.js"))
            .unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].display_name.as_deref(), Some("sw-card"));
        assert!(docs[0].is_default_export());
        assert!(docs[0].slots.as_ref().unwrap().is_empty());
    }

    #[test]
    fn test_export_name_falls_back_to_file_stem() {
        let docs = ExportNameDocgen
            .parse_source("export default {};", Path::new("src/sw-card.js"))
            .unwrap();
        assert_eq!(docs[0].display_name.as_deref(), Some("sw-card"));
    }

    #[test]
    fn test_static_docgen_from_json() {
        let single = StaticDocgen::from_json(r#"{"displayName": "a"}"#).unwrap();
        assert_eq!(single.parse_source("", Path::new("x.js")).unwrap().len(), 1);

        let many =
            StaticDocgen::from_json(r#"[{"displayName": "a"}, {"displayName": "b", "exportName": "B"}]"#)
                .unwrap();
        let docs = many.parse_source("", Path::new("x.js")).unwrap();
        assert_eq!(docs[1].export_name.as_deref(), Some("B"));
    }

    #[test]
    fn test_static_docgen_invalid_json() {
        let err = StaticDocgen::from_json("[1, 2").unwrap_err();
        assert!(matches!(err, DocgenError::Json(_)));
    }
}
