//! The loader pipeline: one component module in, one module with metadata out.

use std::path::Path;

use log::{debug, warn};
use twigdoc_core::TwigdocError;
use twigdoc_engine::extract_fragments;

use crate::config::LoaderOptions;
use crate::docgen::{Docgen, ExportNameDocgen};
use crate::imports::ImportResolver;
use crate::inject::inject;
use crate::merge::merge_all;
use crate::slots::{RegexSlotScanner, SlotScanner};
use crate::transform::transform_source;

/// Result of loading one module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOutput {
    pub code: String,
    /// Non-fatal problems. When present, `code` is the original content.
    pub warnings: Vec<String>,
}

impl LoadOutput {
    fn unchanged(content: &str) -> Self {
        Self {
            code: content.to_string(),
            warnings: Vec::new(),
        }
    }
}

/// Loads component modules and injects their documentation metadata.
#[derive(Debug, Clone, Default)]
pub struct Loader<D = ExportNameDocgen, S = RegexSlotScanner> {
    options: LoaderOptions,
    docgen: D,
    slots: S,
}

impl<D: Docgen> Loader<D> {
    pub fn new(options: LoaderOptions, docgen: D) -> Self {
        Self {
            options,
            docgen,
            slots: RegexSlotScanner,
        }
    }
}

impl<D: Docgen, S: SlotScanner> Loader<D, S> {
    /// Replace the slot scanner.
    pub fn with_slot_scanner<T: SlotScanner>(self, slots: T) -> Loader<D, T> {
        Loader {
            options: self.options,
            docgen: self.docgen,
            slots,
        }
    }

    pub fn options(&self) -> &LoaderOptions {
        &self.options
    }

    /// Load one module. Never fails: errors become warnings and the
    /// original content is passed through.
    pub fn load(&self, content: &str, source_path: impl AsRef<Path>) -> LoadOutput {
        let path = source_path.as_ref();
        if self.options.skips(&path.to_string_lossy()) {
            debug!("Skipping {}", path.display());
            return LoadOutput::unchanged(content);
        }

        match self.process(content, path) {
            Ok(code) => LoadOutput {
                code,
                warnings: Vec::new(),
            },
            Err(err) => {
                let warning = format!(
                    "[twigdoc-loader] failed to parse the component file {}: {}",
                    path.display(),
                    err
                );
                warn!("{}", warning);
                LoadOutput {
                    code: content.to_string(),
                    warnings: vec![warning],
                }
            }
        }
    }

    /// Run the pipeline, propagating the first error.
    pub fn process(&self, content: &str, path: &Path) -> Result<String, TwigdocError> {
        let source = transform_source(content);
        let docs = self.docgen.parse_source(&source, path)?;

        let resolver = ImportResolver::new(&source, path);
        let (fragments, slots) = match resolver.read_template(&self.options.template_extension)? {
            Some(template) => {
                debug!(
                    "Extracting blocks of {} for {}",
                    template.path.display(),
                    path.display()
                );
                let fragments = extract_fragments(&template.content)?;
                let slots = self.slots.scan(&template.content);
                (fragments, slots)
            }
            None => (Vec::new(), Vec::new()),
        };

        let merged = merge_all(docs, &fragments, &slots);
        Ok(inject(&source, &merged, &self.options.inject_at)?)
    }
}
