//! Token grammar configuration.
//!
//! A [`TokenGrammar`] decides which token kinds the tokenizer recognizes and
//! which statement tags the parser accepts. Grammars are immutable once
//! built; the structural grammar is built once per process and shared.

use indexmap::IndexMap;
use once_cell::sync::OnceCell;
use twigdoc_core::{GrammarError, TokenKind};

/// What a statement tag does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagRole {
    /// Opens a named block.
    BlockOpen,
    /// Closes the innermost open block.
    BlockClose,
    /// Inheritance marker, replaced by the parent placeholder.
    Parent,
}

/// Arguments a statement tag accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagArgs {
    None,
    Name,
    OptionalName,
}

/// A statement tag understood inside logic tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagDefinition {
    pub name: String,
    pub role: TagRole,
    pub args: TagArgs,
}

impl TagDefinition {
    pub fn new(name: &str, role: TagRole, args: TagArgs) -> Self {
        Self {
            name: name.to_string(),
            role,
            args,
        }
    }
}

/// The set of token kinds and tags a parse runs against.
#[derive(Debug, Clone)]
pub struct TokenGrammar {
    tokens: Vec<TokenKind>,
    tags: IndexMap<String, TagDefinition>,
}

impl TokenGrammar {
    pub fn builder() -> GrammarBuilder {
        GrammarBuilder::default()
    }

    /// The restricted grammar used for fragment extraction.
    ///
    /// Output tokens are left out, so `{{ ... }}` is plain text.
    pub fn structural() -> Result<Self, GrammarError> {
        Self::builder()
            .tokens([
                TokenKind::Raw,
                TokenKind::Verbatim,
                TokenKind::LogicWhitespacePre,
                TokenKind::LogicWhitespacePost,
                TokenKind::LogicWhitespaceBoth,
                TokenKind::Logic,
                TokenKind::Comment,
            ])
            .block_tags()
            .build()
    }

    /// Every token kind, with the same tag set as the structural grammar.
    pub fn full() -> Result<Self, GrammarError> {
        Self::builder().tokens(TokenKind::ALL).block_tags().build()
    }

    /// Whether the tokenizer recognizes `kind`.
    pub fn recognizes(&self, kind: TokenKind) -> bool {
        self.tokens.contains(&kind)
    }

    /// Whether any logic token kind is recognized.
    pub fn recognizes_logic(&self) -> bool {
        self.tokens.iter().any(|k| k.is_logic())
    }

    /// Whether any output token kind is recognized.
    pub fn recognizes_output(&self) -> bool {
        self.tokens.iter().any(|k| k.is_output())
    }

    /// Recognized token kinds, in definition order.
    pub fn token_kinds(&self) -> &[TokenKind] {
        &self.tokens
    }

    /// Look up a statement tag by name.
    pub fn tag(&self, name: &str) -> Option<&TagDefinition> {
        self.tags.get(name)
    }

    pub fn tags(&self) -> impl Iterator<Item = &TagDefinition> {
        self.tags.values()
    }
}

/// Builder for [`TokenGrammar`]. Validation happens in [`GrammarBuilder::build`].
#[derive(Debug, Default)]
pub struct GrammarBuilder {
    tokens: Vec<TokenKind>,
    tags: Vec<TagDefinition>,
}

impl GrammarBuilder {
    pub fn token(mut self, kind: TokenKind) -> Self {
        self.tokens.push(kind);
        self
    }

    pub fn tokens(mut self, kinds: impl IntoIterator<Item = TokenKind>) -> Self {
        self.tokens.extend(kinds);
        self
    }

    pub fn tag(mut self, tag: TagDefinition) -> Self {
        self.tags.push(tag);
        self
    }

    /// Register `block`, `endblock` and `parent`.
    pub fn block_tags(self) -> Self {
        self.tag(TagDefinition::new("block", TagRole::BlockOpen, TagArgs::Name))
            .tag(TagDefinition::new(
                "endblock",
                TagRole::BlockClose,
                TagArgs::OptionalName,
            ))
            .tag(TagDefinition::new("parent", TagRole::Parent, TagArgs::None))
    }

    pub fn build(self) -> Result<TokenGrammar, GrammarError> {
        let mut tokens = Vec::with_capacity(self.tokens.len());
        for kind in self.tokens {
            if tokens.contains(&kind) {
                return Err(GrammarError::DuplicateToken { kind });
            }
            tokens.push(kind);
        }

        let mut tags = IndexMap::new();
        for tag in self.tags {
            if tag.name.is_empty() {
                return Err(GrammarError::EmptyTagName);
            }
            if !tokens.iter().any(|k| k.is_logic()) {
                return Err(GrammarError::MissingLogicToken { tag: tag.name });
            }
            if tags.contains_key(&tag.name) {
                return Err(GrammarError::DuplicateTag { name: tag.name });
            }
            tags.insert(tag.name.clone(), tag);
        }

        let has_role = |role: TagRole| tags.values().any(|t: &TagDefinition| t.role == role);
        for tag in tags.values() {
            let requires = match tag.role {
                TagRole::BlockOpen if !has_role(TagRole::BlockClose) => Some("endblock"),
                TagRole::BlockClose | TagRole::Parent if !has_role(TagRole::BlockOpen) => {
                    Some("block")
                }
                _ => None,
            };
            if let Some(requires) = requires {
                return Err(GrammarError::OrphanTag {
                    tag: tag.name.clone(),
                    requires: requires.to_string(),
                });
            }
        }

        Ok(TokenGrammar { tokens, tags })
    }
}

static STRUCTURAL: OnceCell<TokenGrammar> = OnceCell::new();

/// The process-wide structural grammar, built on first use.
pub fn structural_grammar() -> Result<&'static TokenGrammar, GrammarError> {
    STRUCTURAL.get_or_try_init(TokenGrammar::structural)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_grammar_drops_output_tokens() {
        let grammar = TokenGrammar::structural().unwrap();
        assert!(!grammar.recognizes_output());
        assert!(grammar.recognizes(TokenKind::Logic));
        assert!(grammar.recognizes(TokenKind::Comment));
        assert!(grammar.recognizes(TokenKind::Verbatim));
        assert_eq!(grammar.token_kinds().len(), 7);
    }

    #[test]
    fn test_structural_grammar_tags() {
        let grammar = TokenGrammar::structural().unwrap();
        let names: Vec<_> = grammar.tags().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["block", "endblock", "parent"]);
        assert_eq!(grammar.tag("parent").unwrap().args, TagArgs::None);
        assert!(grammar.tag("if").is_none());
    }

    #[test]
    fn test_full_grammar_keeps_output_tokens() {
        let grammar = TokenGrammar::full().unwrap();
        assert!(grammar.recognizes_output());
        assert_eq!(grammar.token_kinds().len(), 11);
    }

    #[test]
    fn test_shared_grammar_is_reused() {
        let a = structural_grammar().unwrap() as *const TokenGrammar;
        let b = structural_grammar().unwrap() as *const TokenGrammar;
        assert_eq!(a, b);
    }

    #[test]
    fn test_duplicate_token_rejected() {
        let err = TokenGrammar::builder()
            .token(TokenKind::Logic)
            .token(TokenKind::Logic)
            .build()
            .unwrap_err();
        assert_eq!(err, GrammarError::DuplicateToken { kind: TokenKind::Logic });
    }

    #[test]
    fn test_tags_need_logic_token() {
        let err = TokenGrammar::builder()
            .token(TokenKind::Comment)
            .block_tags()
            .build()
            .unwrap_err();
        assert!(matches!(err, GrammarError::MissingLogicToken { .. }));
    }

    #[test]
    fn test_parent_requires_block() {
        let err = TokenGrammar::builder()
            .token(TokenKind::Logic)
            .tag(TagDefinition::new("parent", TagRole::Parent, TagArgs::None))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            GrammarError::OrphanTag {
                tag: "parent".into(),
                requires: "block".into()
            }
        );
    }

    #[test]
    fn test_duplicate_tag_rejected() {
        let err = TokenGrammar::builder()
            .token(TokenKind::Logic)
            .block_tags()
            .tag(TagDefinition::new("block", TagRole::BlockOpen, TagArgs::Name))
            .build()
            .unwrap_err();
        assert_eq!(err, GrammarError::DuplicateTag { name: "block".into() });
    }
}
