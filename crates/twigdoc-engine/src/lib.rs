//! Fragment extraction for Twig component templates.
//!
//! A template is parsed against the structural grammar, stored in the
//! template registry under a fresh id and rendered block by block. Every
//! block body is pretty printed into a [`Fragment`].

pub mod pretty;
pub mod registry;
pub mod render;

pub use pretty::pretty_html;
pub use registry::TemplateRegistry;
pub use render::{RenderMode, RenderOutput, Template, PARENT_PLACEHOLDER};

use log::debug;
use twigdoc_core::{Fragment, ParseError, TemplateId, TwigdocError};
use twigdoc_parser::{structural_grammar, TokenGrammar};

/// Extracts named block fragments from template sources.
#[derive(Debug, Clone, Copy)]
pub struct FragmentExtractor<'a> {
    grammar: &'a TokenGrammar,
    registry: &'a TemplateRegistry,
}

impl FragmentExtractor<'static> {
    /// Extractor using the structural grammar and the global registry.
    pub fn new() -> Result<Self, TwigdocError> {
        Ok(Self {
            grammar: structural_grammar()?,
            registry: TemplateRegistry::global(),
        })
    }
}

impl<'a> FragmentExtractor<'a> {
    pub fn with_registry(grammar: &'a TokenGrammar, registry: &'a TemplateRegistry) -> Self {
        Self { grammar, registry }
    }

    /// Extract one fragment per block, in order of the opening tags.
    pub fn extract(&self, content: &str) -> Result<Vec<Fragment>, ParseError> {
        let id = TemplateId::generate();
        let template = Template::parse(self.grammar, id, content)?;
        let template = self.registry.register(template);

        let blocks = template.render_blocks();
        debug!(
            "Extracted {} block(s) from template {}",
            blocks.len(),
            template.id()
        );

        Ok(blocks
            .into_iter()
            .map(|(name, body)| Fragment::new(name, pretty_html(&body)))
            .collect())
    }
}

/// Extract fragments from `content` with the shared grammar and registry.
pub fn extract_fragments(content: &str) -> Result<Vec<Fragment>, TwigdocError> {
    Ok(FragmentExtractor::new()?.extract(content)?)
}

/// Drop every template cached in the global registry.
pub fn clear_registry() {
    let registry = TemplateRegistry::global();
    debug!("Clearing {} cached template(s)", registry.len());
    registry.clear();
}
