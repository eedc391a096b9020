//! Template rendering.
//!
//! No data context exists at extraction time, so rendering only walks the
//! block structure: text is copied, `{% parent %}` becomes
//! [`PARENT_PLACEHOLDER`] and output expressions render empty.

use indexmap::IndexMap;
use twigdoc_core::{collect_block_names, Node, ParseError, TemplateId};
use twigdoc_parser::TokenGrammar;

/// Text emitted in place of `{% parent %}`.
pub const PARENT_PLACEHOLDER: &str = "{{|PARENT|}}";

/// How a template is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// One string for the whole document.
    #[default]
    Document,
    /// One string per named block.
    Blocks,
}

/// Result of [`Template::render_as`].
#[derive(Debug, Clone, PartialEq)]
pub enum RenderOutput {
    Document(String),
    Blocks(IndexMap<String, String>),
}

/// A parsed template.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    id: TemplateId,
    nodes: Vec<Node>,
}

impl Template {
    /// Parse `source` against `grammar`.
    pub fn parse(grammar: &TokenGrammar, id: TemplateId, source: &str) -> Result<Self, ParseError> {
        let nodes = twigdoc_parser::parse(grammar, source)?;
        Ok(Self { id, nodes })
    }

    pub fn id(&self) -> &TemplateId {
        &self.id
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Block names in order of their opening tags.
    pub fn block_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        collect_block_names(&self.nodes, &mut names);
        names
    }

    /// Render the whole document, blocks inline.
    pub fn render(&self) -> String {
        let mut renderer = Renderer::new(false);
        let mut out = String::new();
        renderer.render_nodes(&self.nodes, &mut out);
        out
    }

    /// Render every block on its own, keyed by block name.
    ///
    /// Nested blocks show up inside their parent's output and under their own key.
    pub fn render_blocks(&self) -> IndexMap<String, String> {
        let mut renderer = Renderer::new(true);
        let mut out = String::new();
        renderer.render_nodes(&self.nodes, &mut out);
        renderer.blocks
    }

    pub fn render_as(&self, mode: RenderMode) -> RenderOutput {
        match mode {
            RenderMode::Document => RenderOutput::Document(self.render()),
            RenderMode::Blocks => RenderOutput::Blocks(self.render_blocks()),
        }
    }
}

struct Renderer {
    capture: bool,
    blocks: IndexMap<String, String>,
}

impl Renderer {
    fn new(capture: bool) -> Self {
        Self {
            capture,
            blocks: IndexMap::new(),
        }
    }

    fn render_nodes(&mut self, nodes: &[Node], out: &mut String) {
        for node in nodes {
            match node {
                Node::Text(text) => out.push_str(text),
                Node::Output(_) => {}
                Node::Parent(_) => out.push_str(PARENT_PLACEHOLDER),
                Node::Block(block) => {
                    if self.capture {
                        // reserve the slot so outer blocks keep their position
                        self.blocks.insert(block.name.clone(), String::new());
                    }
                    let mut body = String::new();
                    self.render_nodes(&block.body, &mut body);
                    out.push_str(&body);
                    if self.capture {
                        self.blocks.insert(block.name.clone(), body);
                    }
                }
            }
        }
    }
}
