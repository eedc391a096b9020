//! Block structure parser.
//!
//! Turns the token stream into a tree of [`Node`]s. Blocks nest, every block
//! name is unique within a template, and `{% parent %}` is only valid inside
//! a block.

use indexmap::IndexSet;
use smallvec::SmallVec;

use twigdoc_core::{BlockNode, Node, OutputNode, ParseError, Span};

use crate::grammar::{TagArgs, TagDefinition, TagRole, TokenGrammar};
use crate::lexer::{identifier, tag_call, tokenize, Token};

/// Parse a template into nodes using `grammar`.
pub fn parse(grammar: &TokenGrammar, source: &str) -> Result<Vec<Node>, ParseError> {
    let tokens = tokenize(grammar, source)?;
    let mut parser = Parser::new(grammar);
    for token in tokens {
        parser.accept(token)?;
    }
    parser.finish()
}

/// A block whose `endblock` has not been seen yet.
struct OpenBlock {
    name: String,
    body: Vec<Node>,
    span: Span,
}

struct Parser<'g> {
    grammar: &'g TokenGrammar,
    root: Vec<Node>,
    stack: SmallVec<[OpenBlock; 8]>,
    /// Every block name defined so far.
    defined: IndexSet<String>,
}

impl<'g> Parser<'g> {
    fn new(grammar: &'g TokenGrammar) -> Self {
        Self {
            grammar,
            root: Vec::new(),
            stack: SmallVec::new(),
            defined: IndexSet::new(),
        }
    }

    /// Body of the innermost open block, or the template root.
    fn current_body(&mut self) -> &mut Vec<Node> {
        match self.stack.last_mut() {
            Some(open) => &mut open.body,
            None => &mut self.root,
        }
    }

    fn accept(&mut self, token: Token<'_>) -> Result<(), ParseError> {
        match token {
            Token::Text { text, .. } => {
                let body = self.current_body();
                match body.last_mut() {
                    Some(Node::Text(previous)) => previous.push_str(text),
                    _ => body.push(Node::Text(text.to_string())),
                }
                Ok(())
            }
            Token::Output { body, span, .. } => {
                self.current_body().push(Node::Output(OutputNode {
                    expression: body.to_string(),
                    span,
                }));
                Ok(())
            }
            Token::Logic { body, span, .. } => self.accept_tag(body, span),
        }
    }

    fn accept_tag(&mut self, body: &str, span: Span) -> Result<(), ParseError> {
        if body.is_empty() {
            return Err(ParseError::EmptyTag { span });
        }

        let (name, args) = match tag_call(body) {
            Ok((_, call)) => call,
            Err(_) => {
                return Err(ParseError::UnknownTag {
                    tag: body.to_string(),
                    span,
                })
            }
        };

        let definition = self
            .grammar
            .tag(name)
            .ok_or_else(|| ParseError::UnknownTag {
                tag: name.to_string(),
                span,
            })?
            .clone();
        let argument = parse_arguments(&definition, args, span)?;

        match definition.role {
            TagRole::BlockOpen => self.open_block(argument, span),
            TagRole::BlockClose => self.close_block(argument, span),
            TagRole::Parent => {
                if self.stack.is_empty() {
                    return Err(ParseError::MisplacedParent { span });
                }
                self.current_body().push(Node::Parent(span));
                Ok(())
            }
        }
    }

    fn open_block(&mut self, name: Option<&str>, span: Span) -> Result<(), ParseError> {
        let name = name.ok_or_else(|| ParseError::MissingName {
            tag: "block".to_string(),
            span,
        })?;
        if !self.defined.insert(name.to_string()) {
            return Err(ParseError::DuplicateBlock {
                name: name.to_string(),
                span,
            });
        }
        self.stack.push(OpenBlock {
            name: name.to_string(),
            body: Vec::new(),
            span,
        });
        Ok(())
    }

    fn close_block(&mut self, name: Option<&str>, span: Span) -> Result<(), ParseError> {
        let open = self
            .stack
            .pop()
            .ok_or(ParseError::UnmatchedEndBlock { span })?;

        if let Some(name) = name {
            if name != open.name {
                return Err(ParseError::MismatchedEndBlock {
                    expected: open.name,
                    found: name.to_string(),
                    span,
                });
            }
        }

        let block = BlockNode {
            name: open.name,
            body: open.body,
            span: Span {
                end: span.end,
                ..open.span
            },
        };
        self.current_body().push(Node::Block(block));
        Ok(())
    }

    fn finish(mut self) -> Result<Vec<Node>, ParseError> {
        if let Some(open) = self.stack.pop() {
            return Err(ParseError::UnclosedBlock {
                name: open.name,
                span: open.span,
            });
        }
        Ok(self.root)
    }
}

/// Validate a tag's argument text against its definition.
fn parse_arguments<'a>(
    definition: &TagDefinition,
    args: &'a str,
    span: Span,
) -> Result<Option<&'a str>, ParseError> {
    match definition.args {
        TagArgs::None if args.is_empty() => Ok(None),
        TagArgs::None => Err(ParseError::UnexpectedArgument {
            tag: definition.name.clone(),
            found: args.to_string(),
            span,
        }),
        TagArgs::OptionalName if args.is_empty() => Ok(None),
        TagArgs::Name if args.is_empty() => Err(ParseError::MissingName {
            tag: definition.name.clone(),
            span,
        }),
        TagArgs::Name | TagArgs::OptionalName => match identifier(args) {
            Ok(("", name)) => Ok(Some(name)),
            Ok((rest, _)) => Err(ParseError::UnexpectedArgument {
                tag: definition.name.clone(),
                found: rest.trim().to_string(),
                span,
            }),
            Err(_) => Err(ParseError::InvalidName {
                found: args.to_string(),
                span,
            }),
        },
    }
}
