//! Tokenizer for Twig templates.
//!
//! Text between recognized tokens is passed through untouched. Anything the
//! grammar does not recognize (for the structural grammar: every `{{ ... }}`)
//! stays part of the surrounding text.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_until, take_while, take_while1},
    character::complete::{char, multispace0},
    combinator::{map, opt, recognize, value},
    sequence::{pair, terminated},
    IResult,
};

use twigdoc_core::{ParseError, Span, TokenKind};

use crate::grammar::TokenGrammar;

/// A token produced by [`tokenize`].
#[derive(Debug, Clone, PartialEq)]
pub enum Token<'a> {
    /// Literal text (including raw/verbatim section content).
    Text { text: &'a str, span: Span },
    /// A `{% ... %}` statement. `body` is trimmed and free of whitespace-control dashes.
    Logic {
        kind: TokenKind,
        body: &'a str,
        span: Span,
    },
    /// A `{{ ... }}` expression.
    Output {
        kind: TokenKind,
        body: &'a str,
        span: Span,
    },
}

impl<'a> Token<'a> {
    pub fn span(&self) -> Span {
        match self {
            Token::Text { span, .. } | Token::Logic { span, .. } | Token::Output { span, .. } => {
                *span
            }
        }
    }
}

/// Parse an identifier (letter or underscore, then alphanumerics/underscores).
pub fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        take_while1(|c: char| c.is_alphabetic() || c == '_'),
        take_while(|c: char| c.is_alphanumeric() || c == '_'),
    ))(input)
}

/// Split a logic body into the tag name and its (trimmed) argument text.
pub fn tag_call(body: &str) -> IResult<&str, (&str, &str)> {
    let (rest, name) = identifier(body)?;
    let (rest, _) = multispace0(rest)?;
    Ok(("", (name, rest.trim_end())))
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Opener {
    Logic { trim: bool },
    Output { trim: bool },
    Comment,
}

fn opener(input: &str) -> IResult<&str, Opener> {
    alt((
        map(pair(tag("{%"), opt(char('-'))), |(_, dash)| Opener::Logic {
            trim: dash.is_some(),
        }),
        map(pair(tag("{{"), opt(char('-'))), |(_, dash)| Opener::Output {
            trim: dash.is_some(),
        }),
        value(Opener::Comment, tag("{#")),
    ))(input)
}

fn logic_inner(input: &str) -> IResult<&str, &str> {
    terminated(take_until("%}"), tag("%}"))(input)
}

fn output_inner(input: &str) -> IResult<&str, &str> {
    terminated(take_until("}}"), tag("}}"))(input)
}

fn comment_inner(input: &str) -> IResult<&str, &str> {
    terminated(take_until("#}"), tag("#}"))(input)
}

/// Strip a trailing whitespace-control dash from a token's inner text.
fn split_trailing_dash(inner: &str) -> (&str, bool) {
    match inner.strip_suffix('-') {
        Some(stripped) => (stripped, true),
        None => (inner, false),
    }
}

/// A tag token as seen by the scanner.
struct Scanned<'a> {
    kind: TokenKind,
    body: &'a str,
    end: usize,
}

struct Lexer<'g, 'a> {
    grammar: &'g TokenGrammar,
    source: &'a str,
    tokens: Vec<Token<'a>>,
    trim_next: bool,
}

/// Split `source` into tokens according to `grammar`.
pub fn tokenize<'a>(
    grammar: &TokenGrammar,
    source: &'a str,
) -> Result<Vec<Token<'a>>, ParseError> {
    let mut lexer = Lexer {
        grammar,
        source,
        tokens: Vec::new(),
        trim_next: false,
    };
    lexer.run()?;
    Ok(lexer.tokens)
}

impl<'g, 'a> Lexer<'g, 'a> {
    fn offset(&self, rest: &str) -> usize {
        self.source.len() - rest.len()
    }

    fn span(&self, start: usize, end: usize) -> Span {
        Span::locate(self.source, start, end)
    }

    fn run(&mut self) -> Result<(), ParseError> {
        let source = self.source;
        let mut text_start = 0;
        let mut cursor = 0;

        while let Some(rel) = source[cursor..].find('{') {
            let at = cursor + rel;
            let rest = &source[at..];

            let Ok((after_open, op)) = opener(rest) else {
                cursor = at + 1;
                continue;
            };

            let end = match op {
                Opener::Comment if self.grammar.recognizes(TokenKind::Comment) => {
                    let (after, _) = comment_inner(after_open).map_err(|_| {
                        ParseError::UnclosedToken {
                            kind: TokenKind::Comment,
                            span: self.span(at, self.source.len()),
                        }
                    })?;
                    self.push_text(text_start, at);
                    self.trim_next = false;
                    self.offset(after)
                }
                Opener::Logic { trim } if self.grammar.recognizes_logic() => {
                    let Some(scanned) = self.scan_logic(at, after_open, trim)? else {
                        cursor = at + 1;
                        continue;
                    };
                    self.push_text(text_start, at);
                    self.emit_logic(at, scanned)?
                }
                Opener::Output { trim } if self.grammar.recognizes_output() => {
                    let (after, inner) = output_inner(after_open).map_err(|_| {
                        ParseError::UnclosedToken {
                            kind: TokenKind::Output,
                            span: self.span(at, self.source.len()),
                        }
                    })?;
                    let (inner, trim_after) = split_trailing_dash(inner);
                    let kind = TokenKind::Output.with_whitespace(trim, trim_after);
                    if !self.grammar.recognizes(kind) {
                        cursor = at + 1;
                        continue;
                    }
                    self.push_text(text_start, at);
                    let end = self.offset(after);
                    let span = self.span(at, end);
                    self.push_tag(
                        kind,
                        Token::Output {
                            kind,
                            body: inner.trim(),
                            span,
                        },
                    );
                    end
                }
                _ => {
                    cursor = at + 1;
                    continue;
                }
            };

            cursor = end;
            text_start = end;
        }

        self.push_text(text_start, source.len());
        Ok(())
    }

    /// Read a logic token starting at `at`. `None` when the grammar does not
    /// recognize its whitespace-control variant.
    fn scan_logic(
        &self,
        at: usize,
        after_open: &'a str,
        trim_before: bool,
    ) -> Result<Option<Scanned<'a>>, ParseError> {
        let (after, inner) = logic_inner(after_open).map_err(|_| ParseError::UnclosedToken {
            kind: TokenKind::Logic,
            span: self.span(at, self.source.len()),
        })?;
        let (inner, trim_after) = split_trailing_dash(inner);
        let kind = TokenKind::Logic.with_whitespace(trim_before, trim_after);
        if !self.grammar.recognizes(kind) {
            return Ok(None);
        }
        Ok(Some(Scanned {
            kind,
            body: inner.trim(),
            end: self.offset(after),
        }))
    }

    /// Emit a logic token, consuming a whole raw/verbatim section when it opens one.
    fn emit_logic(&mut self, at: usize, scanned: Scanned<'a>) -> Result<usize, ParseError> {
        let raw_kind = match scanned.body {
            "raw" => Some((TokenKind::Raw, "endraw")),
            "verbatim" => Some((TokenKind::Verbatim, "endverbatim")),
            _ => None,
        };

        if let Some((raw_kind, end_tag)) = raw_kind.filter(|(k, _)| self.grammar.recognizes(*k)) {
            return self.emit_raw(at, scanned, raw_kind, end_tag);
        }

        let span = self.span(at, scanned.end);
        self.push_tag(
            scanned.kind,
            Token::Logic {
                kind: scanned.kind,
                body: scanned.body,
                span,
            },
        );
        Ok(scanned.end)
    }

    fn emit_raw(
        &mut self,
        at: usize,
        open: Scanned<'a>,
        raw_kind: TokenKind,
        end_tag: &str,
    ) -> Result<usize, ParseError> {
        let source = self.source;
        let mut search = open.end;
        while let Some(rel) = source[search..].find("{%") {
            let close_at = search + rel;
            let trim = source[close_at + 2..].starts_with('-');
            let after_open = &source[close_at + 2 + usize::from(trim)..];
            if let Ok(Some(close)) = self.scan_logic(close_at, after_open, trim) {
                if close.body == end_tag {
                    let mut content = &source[open.end..close_at];
                    if open.kind.trims_after() {
                        content = content.trim_start();
                    }
                    if close.kind.trims_before() {
                        content = content.trim_end();
                    }
                    if open.kind.trims_before() {
                        self.trim_previous();
                    }
                    if !content.is_empty() {
                        self.tokens.push(Token::Text {
                            text: content,
                            span: self.span(open.end, close_at),
                        });
                    }
                    self.trim_next = close.kind.trims_after();
                    return Ok(close.end);
                }
            }
            search = close_at + 2;
        }

        Err(ParseError::UnclosedRaw {
            tag: raw_kind.to_string(),
            span: self.span(at, open.end),
        })
    }

    fn push_text(&mut self, start: usize, end: usize) {
        let source = self.source;
        let mut text = &source[start..end];
        if self.trim_next {
            text = text.trim_start();
            self.trim_next = false;
        }
        if !text.is_empty() {
            self.tokens.push(Token::Text {
                text,
                span: self.span(start, end),
            });
        }
    }

    fn push_tag(&mut self, kind: TokenKind, token: Token<'a>) {
        if kind.trims_before() {
            self.trim_previous();
        }
        self.tokens.push(token);
        self.trim_next = kind.trims_after();
    }

    fn trim_previous(&mut self) {
        if let Some(Token::Text { text, .. }) = self.tokens.last_mut() {
            *text = text.trim_end();
            if text.is_empty() {
                self.tokens.pop();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn structural() -> TokenGrammar {
        TokenGrammar::structural().unwrap()
    }

    fn texts<'a>(tokens: &[Token<'a>]) -> Vec<&'a str> {
        tokens
            .iter()
            .filter_map(|t| match t {
                Token::Text { text, .. } => Some(*text),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_identifier() {
        assert_eq!(identifier("sw_button rest"), Ok((" rest", "sw_button")));
        assert!(identifier("1abc").is_err());
    }

    #[test]
    fn test_tag_call() {
        assert_eq!(tag_call("block  header "), Ok(("", ("block", "header"))));
        assert_eq!(tag_call("parent"), Ok(("", ("parent", ""))));
    }

    #[test]
    fn test_output_is_text_in_structural_grammar() {
        let tokens = tokenize(&structural(), "<p>{{ label }}</p>").unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(texts(&tokens), vec!["<p>{{ label }}</p>"]);
    }

    #[test]
    fn test_output_recognized_in_full_grammar() {
        let grammar = TokenGrammar::full().unwrap();
        let tokens = tokenize(&grammar, "a{{ label }}b").unwrap();
        assert_eq!(tokens.len(), 3);
        assert!(matches!(tokens[1], Token::Output { body: "label", .. }));
    }

    #[test]
    fn test_logic_token() {
        let tokens = tokenize(&structural(), "{% block header %}Hi{% endblock %}").unwrap();
        assert_eq!(tokens.len(), 3);
        match &tokens[0] {
            Token::Logic { kind, body, span } => {
                assert_eq!(*kind, TokenKind::Logic);
                assert_eq!(*body, "block header");
                assert_eq!(span.start, 0);
                assert_eq!(span.end, 18);
            }
            other => panic!("Expected logic token, got {:?}", other),
        }
    }

    #[test]
    fn test_comments_are_dropped() {
        let tokens = tokenize(&structural(), "a{# note #}b").unwrap();
        assert_eq!(texts(&tokens), vec!["a", "b"]);
    }

    #[test]
    fn test_whitespace_control() {
        let tokens = tokenize(&structural(), "a   {%- block x -%}   b").unwrap();
        assert_eq!(texts(&tokens), vec!["a", "b"]);
        assert!(matches!(
            tokens[1],
            Token::Logic {
                kind: TokenKind::LogicWhitespaceBoth,
                body: "block x",
                ..
            }
        ));
    }

    #[test]
    fn test_verbatim_section() {
        let tokens = tokenize(
            &structural(),
            "{% verbatim %}{% block x %}{% endverbatim %}",
        )
        .unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(texts(&tokens), vec!["{% block x %}"]);
    }

    #[test]
    fn test_unclosed_logic_token() {
        let err = tokenize(&structural(), "ok\n{% block header").unwrap_err();
        match err {
            ParseError::UnclosedToken { kind, span } => {
                assert_eq!(kind, TokenKind::Logic);
                assert_eq!(span.line, 2);
                assert_eq!(span.column, 1);
            }
            other => panic!("Unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_unclosed_raw_section() {
        let err = tokenize(&structural(), "{% raw %}never closed").unwrap_err();
        assert!(matches!(err, ParseError::UnclosedRaw { .. }));
    }

    #[test]
    fn test_unclosed_comment() {
        let err = tokenize(&structural(), "{# open").unwrap_err();
        assert!(matches!(
            err,
            ParseError::UnclosedToken {
                kind: TokenKind::Comment,
                ..
            }
        ));
    }

    #[test]
    fn test_vue_bindings_are_plain_text() {
        let source = r#"<sw-icon :class="{ 'is--active': active }" @click="onClick"/>"#;
        let tokens = tokenize(&structural(), source).unwrap();
        assert_eq!(texts(&tokens), vec![source]);
    }
}
