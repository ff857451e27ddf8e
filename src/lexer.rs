//! Lexer: UTF-8 source text → token stream with byte spans.
//!
//! The vocabulary is small: barewords, quoted strings, and the three list
//! punctuators. Whitespace separates tokens. Barewords may contain any
//! printable character that is not punctuation or a quote, so ordinary
//! file names lex as single tokens.

use crate::error::{DiagnosticKind, DiagnosticSink};
use crate::intern::Interner;
use crate::token::{Span, Token, TokenKind};

pub struct Lexer<'src, 'int> {
    source: &'src str,
    pos: usize,
    interner: &'int mut Interner,
}

impl<'src, 'int> Lexer<'src, 'int> {
    pub fn new(source: &'src str, interner: &'int mut Interner) -> Self {
        Lexer {
            source,
            pos: 0,
            interner,
        }
    }

    /// Lex the whole input. The final token is always `Eof`.
    pub fn tokenize(mut self, sink: &mut DiagnosticSink) -> Vec<Token> {
        let mut tokens = Vec::new();

        while let Some(token) = self.next_token(sink) {
            tokens.push(token);
        }

        let end = self.source.len();
        tokens.push(Token::new(TokenKind::Eof, Span::new(end, end)));
        tokens
    }

    fn peek(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.bump();
        }
    }

    fn next_token(&mut self, sink: &mut DiagnosticSink) -> Option<Token> {
        loop {
            self.skip_whitespace();
            let start = self.pos;
            let c = self.peek()?;

            match c {
                '[' => {
                    self.bump();
                    return Some(Token::new(TokenKind::LBracket, Span::new(start, self.pos)));
                }
                ']' => {
                    self.bump();
                    return Some(Token::new(TokenKind::RBracket, Span::new(start, self.pos)));
                }
                ',' => {
                    self.bump();
                    return Some(Token::new(TokenKind::Comma, Span::new(start, self.pos)));
                }
                '"' => return Some(self.quoted(start, sink)),
                c if c.is_control() => {
                    self.bump();
                    sink.report(
                        DiagnosticKind::UnexpectedChar(c),
                        Span::new(start, self.pos),
                    );
                    // Resume lexing after the bad character.
                }
                _ => return Some(self.bareword(start)),
            }
        }
    }

    /// A quoted string runs to the next `"`. There are no escapes; quotes
    /// exist to hold separators and to force file interpretation.
    fn quoted(&mut self, start: usize, sink: &mut DiagnosticSink) -> Token {
        self.bump(); // opening quote
        let text_start = self.pos;

        loop {
            match self.peek() {
                Some('"') => {
                    let text = &self.source[text_start..self.pos];
                    let name = self.interner.intern(text);
                    self.bump();
                    return Token::new(TokenKind::Quoted(name), Span::new(start, self.pos));
                }
                Some(_) => {
                    self.bump();
                }
                None => {
                    sink.report(DiagnosticKind::UnterminatedString, Span::new(start, self.pos));
                    let text = &self.source[text_start..self.pos];
                    let name = self.interner.intern(text);
                    return Token::new(TokenKind::Quoted(name), Span::new(start, self.pos));
                }
            }
        }
    }

    fn bareword(&mut self, start: usize) -> Token {
        while let Some(c) = self.peek() {
            if c.is_whitespace() || c.is_control() || matches!(c, '[' | ']' | ',' | '"') {
                break;
            }
            self.bump();
        }
        let name = self.interner.intern(&self.source[start..self.pos]);
        Token::new(TokenKind::Bareword(name), Span::new(start, self.pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(source: &str) -> (Vec<Token>, Interner, usize) {
        let mut interner = Interner::new();
        let mut sink = DiagnosticSink::new();
        let tokens = Lexer::new(source, &mut interner).tokenize(&mut sink);
        let errors = sink.count();
        (tokens, interner, errors)
    }

    fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
        tokens.iter().map(|t| t.kind).collect()
    }

    #[test]
    fn barewords_split_on_whitespace() {
        let (tokens, interner, errors) = lex("size foo.txt");
        assert_eq!(errors, 0);
        assert_eq!(tokens.len(), 3);
        match (tokens[0].kind, tokens[1].kind) {
            (TokenKind::Bareword(a), TokenKind::Bareword(b)) => {
                assert_eq!(interner.resolve(a), "size");
                assert_eq!(interner.resolve(b), "foo.txt");
            }
            other => panic!("unexpected kinds: {:?}", other),
        }
        assert_eq!(tokens[2].kind, TokenKind::Eof);
    }

    #[test]
    fn spans_are_byte_ranges() {
        let (tokens, _, _) = lex("size foo.txt");
        assert_eq!(tokens[0].span, Span::new(0, 4));
        assert_eq!(tokens[1].span, Span::new(5, 12));
        assert_eq!(tokens[2].span, Span::new(12, 12));
    }

    #[test]
    fn quoted_strings_keep_inner_text() {
        let (tokens, interner, errors) = lex("\"hello world\"");
        assert_eq!(errors, 0);
        match tokens[0].kind {
            TokenKind::Quoted(name) => assert_eq!(interner.resolve(name), "hello world"),
            other => panic!("unexpected kind: {:?}", other),
        }
        assert_eq!(tokens[0].span, Span::new(0, 13));
    }

    #[test]
    fn punctuation_terminates_barewords() {
        let (tokens, _, _) = lex("[a,b]");
        assert_eq!(tokens.len(), 6);
        assert!(matches!(kinds(&tokens)[0], TokenKind::LBracket));
        assert!(matches!(kinds(&tokens)[2], TokenKind::Comma));
        assert!(matches!(kinds(&tokens)[4], TokenKind::RBracket));
    }

    #[test]
    fn unterminated_string_is_reported_once() {
        let (tokens, interner, errors) = lex("\"oops");
        assert_eq!(errors, 1);
        match tokens[0].kind {
            TokenKind::Quoted(name) => assert_eq!(interner.resolve(name), "oops"),
            other => panic!("unexpected kind: {:?}", other),
        }
    }

    #[test]
    fn control_characters_are_skipped_with_a_diagnostic() {
        let (tokens, _, errors) = lex("a\u{1}b");
        assert_eq!(errors, 1);
        // The stray byte splits the word.
        assert_eq!(tokens.len(), 3);
    }

    #[test]
    fn empty_input_lexes_to_eof_only() {
        let (tokens, _, errors) = lex("   ");
        assert_eq!(errors, 0);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Eof);
    }

    #[test]
    fn unicode_barewords_stay_whole() {
        let (tokens, interner, _) = lex("日本語.txt");
        match tokens[0].kind {
            TokenKind::Bareword(name) => assert_eq!(interner.resolve(name), "日本語.txt"),
            other => panic!("unexpected kind: {:?}", other),
        }
    }
}
