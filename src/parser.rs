//! Parser: token stream → AST.
//!
//! The grammar is juxtaposition application over atoms:
//!
//! ```text
//! expr := app
//! app  := atom atom*
//! atom := bareword | quoted | '[' list ']'
//! list := ε | expr (',' expr)*
//! ```
//!
//! Application binds tighter than list commas. Failures go to the
//! diagnostic sink, never up the stack: the returned tree is always
//! non-empty, with recovery nodes that stay Invalid downstream.

use std::cell::Cell;

use crate::arena::AstArena;
use crate::ast::{Ast, AstKind};
use crate::error::{DiagnosticKind, DiagnosticSink};
use crate::token::{Token, TokenKind};

pub struct ParseOutcome<'a> {
    pub tree: &'a Ast<'a>,
    /// Number of diagnostics this parse emitted.
    pub errors: usize,
}

pub fn parse<'a>(
    tokens: &[Token],
    arena: &'a AstArena,
    sink: &mut DiagnosticSink,
) -> ParseOutcome<'a> {
    let snapshot = sink.snapshot();
    let mut parser = Parser {
        tokens,
        current: 0,
        arena,
        sink,
    };

    let tree = parser.expr();

    // Anything left over is an error; the tree still stands.
    if parser.peek().kind != TokenKind::Eof {
        let found = parser.peek();
        parser.sink.report(
            DiagnosticKind::UnexpectedToken {
                expected: "end of input",
                found: found.kind.describe(),
            },
            found.span,
        );
    }

    let errors = parser.sink.count() - snapshot;
    ParseOutcome { tree, errors }
}

struct Parser<'a, 'p> {
    tokens: &'p [Token],
    current: usize,
    arena: &'a AstArena,
    sink: &'p mut DiagnosticSink,
}

impl<'a, 'p> Parser<'a, 'p> {
    fn peek(&self) -> Token {
        self.tokens[self.current.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) -> Token {
        let token = self.peek();
        if self.current < self.tokens.len() - 1 {
            self.current += 1;
        }
        token
    }

    fn expr(&mut self) -> &'a Ast<'a> {
        self.app()
    }

    /// Juxtaposition: the first atom is the head, the rest are arguments
    /// applied left to right.
    fn app(&mut self) -> &'a Ast<'a> {
        let head = self.atom();

        if !self.peek().kind.starts_atom() {
            return head;
        }

        let mut args = Vec::new();
        while self.peek().kind.starts_atom() {
            args.push(self.atom());
        }

        let span = args
            .iter()
            .fold(head.span, |span, arg: &&Ast| span.merge(arg.span));
        self.arena.node(Ast::new(
            AstKind::FnApp {
                head,
                args: self.arena.children(&args),
            },
            span,
        ))
    }

    fn atom(&mut self) -> &'a Ast<'a> {
        let token = self.peek();
        match token.kind {
            TokenKind::Bareword(name) => {
                self.advance();
                self.arena.node(Ast::new(
                    AstKind::SymbolLit {
                        name,
                        resolved: Cell::new(None),
                    },
                    token.span,
                ))
            }
            TokenKind::Quoted(name) => {
                self.advance();
                self.arena
                    .node(Ast::new(AstKind::StrLit(name), token.span))
            }
            TokenKind::LBracket => self.list(),
            _ => {
                self.sink.report(
                    DiagnosticKind::UnexpectedToken {
                        expected: "an expression",
                        found: token.kind.describe(),
                    },
                    token.span,
                );
                // Consume the offender so parsing cannot loop in place.
                if token.kind != TokenKind::Eof {
                    self.advance();
                }
                self.arena.node(Ast::new(AstKind::Invalid, token.span))
            }
        }
    }

    fn list(&mut self) -> &'a Ast<'a> {
        let open = self.advance(); // '['
        let mut elements = Vec::new();
        let mut span = open.span;

        if self.peek().kind != TokenKind::RBracket {
            loop {
                elements.push(self.expr());

                match self.peek().kind {
                    TokenKind::Comma => {
                        let comma = self.advance();
                        if self.peek().kind == TokenKind::RBracket {
                            self.sink.report(DiagnosticKind::TrailingComma, comma.span);
                            break;
                        }
                    }
                    TokenKind::RBracket => break,
                    TokenKind::Eof => {
                        self.sink
                            .report(DiagnosticKind::UnmatchedBracket, open.span);
                        break;
                    }
                    other => {
                        let token = self.peek();
                        self.sink.report(
                            DiagnosticKind::UnexpectedToken {
                                expected: "',' or ']'",
                                found: other.describe(),
                            },
                            token.span,
                        );
                        break;
                    }
                }
            }
        }

        if self.peek().kind == TokenKind::RBracket {
            let close = self.advance();
            span = span.merge(close.span);
        } else if let Some(last) = elements.last() {
            span = span.merge(last.span);
        }

        self.arena.node(Ast::new(
            AstKind::ListLit(self.arena.children(&elements)),
            span,
        ))
    }
}
