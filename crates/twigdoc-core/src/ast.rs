//! Abstract Syntax Tree types for Twig templates.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Source location information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Span {
    /// Byte offset of the first character.
    pub start: usize,
    /// Byte offset one past the last character.
    pub end: usize,
    /// 1-based line number.
    pub line: u32,
    /// 1-based column number (in characters).
    pub column: u32,
}

impl Span {
    /// Compute the span of `start..end` inside `source`.
    pub fn locate(source: &str, start: usize, end: usize) -> Self {
        let before = &source[..start.min(source.len())];
        let line = before.matches('\n').count() as u32 + 1;
        let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let column = before[line_start..].chars().count() as u32 + 1;
        Self { start, end, line, column }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Identifier of a parsed template inside the template registry.
///
/// Every parse gets a fresh one so reparsing the same file never
/// overwrites another entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TemplateId(String);

impl TemplateId {
    /// Generate a new random identifier (16 random bytes, hex encoded).
    pub fn generate() -> Self {
        TemplateId(uuid::Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TemplateId {
    fn from(s: &str) -> Self {
        TemplateId(s.to_string())
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The raw text of one template file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateDocument {
    pub path: PathBuf,
    pub content: String,
}

impl TemplateDocument {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// A node of a parsed template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    /// Literal text, copied to the output as-is.
    Text(String),
    /// An output expression. Only produced by grammars that keep output tokens.
    Output(OutputNode),
    /// A named block.
    Block(BlockNode),
    /// The `{% parent %}` inheritance marker.
    Parent(Span),
}

/// An output expression (`{{ ... }}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputNode {
    pub expression: String,
    pub span: Span,
}

/// A `{% block name %}...{% endblock %}` construct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockNode {
    pub name: String,
    pub body: Vec<Node>,
    pub span: Span,
}

impl BlockNode {
    /// Names of all blocks nested in this block, in source order.
    pub fn nested_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        collect_block_names(&self.body, &mut names);
        names
    }
}

/// Collect block names in pre-order (outer blocks before their children).
pub fn collect_block_names<'a>(nodes: &'a [Node], names: &mut Vec<&'a str>) {
    for node in nodes {
        if let Node::Block(block) = node {
            names.push(&block.name);
            collect_block_names(&block.body, names);
        }
    }
}
