//! Error types for the twigdoc pipeline.

use std::path::PathBuf;

use crate::ast::Span;
use crate::tokens::TokenKind;
use thiserror::Error;

/// Top-level error type for the twigdoc pipeline.
#[derive(Debug, Error)]
pub enum TwigdocError {
    #[error(transparent)]
    Grammar(#[from] GrammarError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Docgen(#[from] DocgenError),

    #[error(transparent)]
    Inject(#[from] InjectError),

    #[error(transparent)]
    Story(#[from] StoryError),
}

/// The token grammar could not be installed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GrammarError {
    #[error("Token kind {kind} is registered twice")]
    DuplicateToken { kind: TokenKind },

    #[error("Tag '{name}' is registered twice")]
    DuplicateTag { name: String },

    #[error("Tag names must not be empty")]
    EmptyTagName,

    #[error("Tag '{tag}' needs a logic token, but the grammar recognizes none")]
    MissingLogicToken { tag: String },

    #[error("Tag '{tag}' requires the '{requires}' tag to be registered")]
    OrphanTag { tag: String, requires: String },
}

/// Errors while parsing a template against the grammar.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unclosed {kind} token starting at {span}")]
    UnclosedToken { kind: TokenKind, span: Span },

    #[error("Unclosed {tag} section starting at {span}")]
    UnclosedRaw { tag: String, span: Span },

    #[error("Unable to parse '{tag}' at {span}: unknown tag")]
    UnknownTag { tag: String, span: Span },

    #[error("Empty tag at {span}")]
    EmptyTag { span: Span },

    #[error("Unexpected argument {found:?} for tag '{tag}' at {span}")]
    UnexpectedArgument { tag: String, found: String, span: Span },

    #[error("Tag '{tag}' at {span} expects a name")]
    MissingName { tag: String, span: Span },

    #[error("Invalid block name {found:?} at {span}")]
    InvalidName { found: String, span: Span },

    #[error("Block '{name}' opened at {span} is never closed")]
    UnclosedBlock { name: String, span: Span },

    #[error("Unexpected endblock at {span}: no block is open")]
    UnmatchedEndBlock { span: Span },

    #[error("Mismatched endblock at {span}: expected '{expected}', found '{found}'")]
    MismatchedEndBlock {
        expected: String,
        found: String,
        span: Span,
    },

    #[error("The parent tag at {span} is only allowed inside a block")]
    MisplacedParent { span: Span },

    #[error("Block '{name}' at {span} is already defined")]
    DuplicateBlock { name: String, span: Span },
}

impl ParseError {
    /// Source location of the error.
    pub fn span(&self) -> Span {
        match self {
            ParseError::UnclosedToken { span, .. }
            | ParseError::UnclosedRaw { span, .. }
            | ParseError::UnknownTag { span, .. }
            | ParseError::EmptyTag { span }
            | ParseError::UnexpectedArgument { span, .. }
            | ParseError::MissingName { span, .. }
            | ParseError::InvalidName { span, .. }
            | ParseError::UnclosedBlock { span, .. }
            | ParseError::UnmatchedEndBlock { span }
            | ParseError::MismatchedEndBlock { span, .. }
            | ParseError::MisplacedParent { span }
            | ParseError::DuplicateBlock { span, .. } => *span,
        }
    }
}

/// Errors while locating or reading the associated template file.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Failed to read template {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors reported by the docgen collaborator.
#[derive(Debug, Error)]
pub enum DocgenError {
    #[error("Docgen failed: {reason}")]
    Failed { reason: String },

    #[error("Invalid docgen JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error while reading docgen output: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors while injecting metadata into the module text.
#[derive(Debug, Error)]
pub enum InjectError {
    #[error("Cannot inject '{inject_at}': the module has no default export")]
    MissingDefaultExport { inject_at: String },

    #[error("Invalid injection property '{inject_at}'")]
    InvalidProperty { inject_at: String },

    #[error("Failed to serialize metadata: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors while building story metadata.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoryError {
    #[error("Extended component {extends} of {component} not found in the additional components")]
    ExtendedComponentNotFound { component: String, extends: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_message_has_location() {
        let err = ParseError::UnclosedBlock {
            name: "header".into(),
            span: Span {
                start: 0,
                end: 18,
                line: 3,
                column: 5,
            },
        };
        assert_eq!(
            err.to_string(),
            "Block 'header' opened at line 3, column 5 is never closed"
        );
        assert_eq!(err.span().line, 3);
    }

    #[test]
    fn test_umbrella_conversion() {
        let err: TwigdocError = ParseError::EmptyTag { span: Span::default() }.into();
        assert!(matches!(err, TwigdocError::Parse(_)));
    }
}
