use crate::error::Error;
use crate::token::{classifiers, Token, TokenKind};

/// Stateful cursor over the query text, exposing one current token at a time.
///
/// The cursor only ever moves forward. At end of input (or on unrecognizable
/// text) `advance` finds no classifier match and leaves the current token
/// unchanged; the parser detects exhaustion by its expected tokens failing to
/// appear.
pub struct Scanner<'a> {
    input: &'a str,
    pos: usize,
    current: Option<Token>,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a str) -> Self {
        Scanner {
            input,
            pos: 0,
            current: None,
        }
    }

    pub fn current(&self) -> Option<&Token> {
        self.current.as_ref()
    }

    /// Skip whitespace, then try each classifier at the cursor in table
    /// order. The first match becomes the current token and the cursor
    /// advances past its lexeme.
    pub fn advance(&mut self) {
        while let Some(ch) = self.input[self.pos..].chars().next() {
            if !ch.is_whitespace() {
                break;
            }
            self.pos += ch.len_utf8();
        }

        for classifier in classifiers() {
            if let Some(lexeme) = classifier.match_at(self.input, self.pos) {
                self.pos += lexeme.len();
                self.current = Some(Token {
                    kind: classifier.kind(),
                    lexeme: lexeme.to_string(),
                });
                return;
            }
        }
    }

    /// True iff the current token has the given kind.
    pub fn matches(&self, kind: TokenKind) -> bool {
        self.current.as_ref().is_some_and(|t| t.kind == kind)
    }

    /// If the current token matches, consume it and return its lexeme.
    pub fn match_advance(&mut self, kind: TokenKind) -> Option<String> {
        if !self.matches(kind) {
            return None;
        }
        let lexeme = self.current.as_ref().map(|t| t.lexeme.clone());
        self.advance();
        lexeme
    }

    /// Like [`match_advance`](Self::match_advance), but a missing token is a
    /// syntax error. This is the only place the grammar raises one.
    pub fn required(&mut self, kind: TokenKind) -> Result<String, Error> {
        self.match_advance(kind).ok_or_else(|| {
            let found = match &self.current {
                Some(t) => format!("'{}'", t.lexeme),
                None => "end of input".to_string(),
            };
            Error::Syntax(format!("expected {:?}, found {}", kind, found))
        })
    }
}

#[test]
fn test_keywords_before_identifiers() {
    let mut scanner = Scanner::new("select where from");
    scanner.advance();
    assert!(scanner.matches(TokenKind::Select));
    scanner.advance();
    assert!(scanner.matches(TokenKind::Where));
    scanner.advance();
    assert!(scanner.matches(TokenKind::From));
}

#[test]
fn test_relational_operators() {
    let mut scanner = Scanner::new("<> >= =");
    scanner.advance();
    assert_eq!(scanner.match_advance(TokenKind::RelOp), Some("<>".into()));
    assert_eq!(scanner.match_advance(TokenKind::RelOp), Some(">=".into()));
    assert_eq!(scanner.match_advance(TokenKind::RelOp), Some("=".into()));
}

#[test]
fn test_end_of_input_leaves_token() {
    let mut scanner = Scanner::new("42");
    scanner.advance();
    assert!(scanner.matches(TokenKind::Numeric));
    scanner.advance();
    // Nothing left to match; the current token stays put.
    assert!(scanner.matches(TokenKind::Numeric));
}
