//! Token kinds of the Twig template language.

use std::fmt;

/// A lexical token kind.
///
/// The variants are listed in the order the Twig tokenizer defines them.
/// Output kinds interpolate data; every other kind is structural.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// `{% raw %}...{% endraw %}`
    Raw,
    /// `{% verbatim %}...{% endverbatim %}`
    Verbatim,
    /// `{{- ... }}`
    OutputWhitespacePre,
    /// `{{ ... -}}`
    OutputWhitespacePost,
    /// `{{- ... -}}`
    OutputWhitespaceBoth,
    /// `{%- ... %}`
    LogicWhitespacePre,
    /// `{% ... -%}`
    LogicWhitespacePost,
    /// `{%- ... -%}`
    LogicWhitespaceBoth,
    /// `{{ ... }}`
    Output,
    /// `{% ... %}`
    Logic,
    /// `{# ... #}`
    Comment,
}

impl TokenKind {
    /// All kinds in definition order.
    pub const ALL: [TokenKind; 11] = [
        TokenKind::Raw,
        TokenKind::Verbatim,
        TokenKind::OutputWhitespacePre,
        TokenKind::OutputWhitespacePost,
        TokenKind::OutputWhitespaceBoth,
        TokenKind::LogicWhitespacePre,
        TokenKind::LogicWhitespacePost,
        TokenKind::LogicWhitespaceBoth,
        TokenKind::Output,
        TokenKind::Logic,
        TokenKind::Comment,
    ];

    /// Whether this kind interpolates data into the output.
    pub fn is_output(self) -> bool {
        matches!(
            self,
            TokenKind::Output
                | TokenKind::OutputWhitespacePre
                | TokenKind::OutputWhitespacePost
                | TokenKind::OutputWhitespaceBoth
        )
    }

    /// Whether this kind carries a statement tag.
    pub fn is_logic(self) -> bool {
        matches!(
            self,
            TokenKind::Logic
                | TokenKind::LogicWhitespacePre
                | TokenKind::LogicWhitespacePost
                | TokenKind::LogicWhitespaceBoth
        )
    }

    /// Whether whitespace before the token is trimmed.
    pub fn trims_before(self) -> bool {
        matches!(
            self,
            TokenKind::OutputWhitespacePre
                | TokenKind::OutputWhitespaceBoth
                | TokenKind::LogicWhitespacePre
                | TokenKind::LogicWhitespaceBoth
        )
    }

    /// Whether whitespace after the token is trimmed.
    pub fn trims_after(self) -> bool {
        matches!(
            self,
            TokenKind::OutputWhitespacePost
                | TokenKind::OutputWhitespaceBoth
                | TokenKind::LogicWhitespacePost
                | TokenKind::LogicWhitespaceBoth
        )
    }

    /// Resolve the whitespace-controlled variant of a logic or output token.
    pub fn with_whitespace(self, pre: bool, post: bool) -> TokenKind {
        match (self.is_output(), pre, post) {
            (true, true, true) => TokenKind::OutputWhitespaceBoth,
            (true, true, false) => TokenKind::OutputWhitespacePre,
            (true, false, true) => TokenKind::OutputWhitespacePost,
            (true, false, false) => TokenKind::Output,
            (false, _, _) if !self.is_logic() => self,
            (false, true, true) => TokenKind::LogicWhitespaceBoth,
            (false, true, false) => TokenKind::LogicWhitespacePre,
            (false, false, true) => TokenKind::LogicWhitespacePost,
            (false, false, false) => TokenKind::Logic,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Raw => "raw",
            TokenKind::Verbatim => "verbatim",
            TokenKind::OutputWhitespacePre => "output_whitespace_pre",
            TokenKind::OutputWhitespacePost => "output_whitespace_post",
            TokenKind::OutputWhitespaceBoth => "output_whitespace_both",
            TokenKind::LogicWhitespacePre => "logic_whitespace_pre",
            TokenKind::LogicWhitespacePost => "logic_whitespace_post",
            TokenKind::LogicWhitespaceBoth => "logic_whitespace_both",
            TokenKind::Output => "output",
            TokenKind::Logic => "logic",
            TokenKind::Comment => "comment",
        };
        f.write_str(name)
    }
}
