//! Parser for Twig component templates.
//!
//! Only the structural part of Twig is understood: `{% block %}`,
//! `{% endblock %}`, `{% parent %}`, comments and raw sections. Output
//! tokens (`{{ ... }}`) are not part of the structural grammar, so Vue
//! mustache bindings pass through as plain text.

mod grammar;
mod lexer;
mod parser;

pub use grammar::{
    structural_grammar, GrammarBuilder, TagArgs, TagDefinition, TagRole, TokenGrammar,
};
pub use lexer::{tokenize, Token};
pub use parser::parse;

use twigdoc_core::{Node, TwigdocError};

/// Parse a template with the process-wide structural grammar.
///
/// # Example
///
/// ```ignore
/// use twigdoc_parser::parse_template;
///
/// let nodes = parse_template("{% block header %}<h1>{{ title }}</h1>{% endblock %}")?;
/// ```
pub fn parse_template(source: &str) -> Result<Vec<Node>, TwigdocError> {
    let grammar = structural_grammar()?;
    Ok(parse(grammar, source)?)
}
