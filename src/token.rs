//! Lexical token kinds and the classifier table that recognizes them.
//!
//! The scanner does not hard-code any lexical knowledge of its own; it walks
//! the classifier table in [`classifiers()`] and takes the first match. The
//! table order is part of the language definition: punctuation and keywords
//! come before the generic identifier pattern, so `WHERE` can never be
//! swallowed as an identifier, and a quoted date is recognized before the
//! plain string pattern gets a chance.

use regex::Regex;
use std::sync::LazyLock;

/// The lexical category of a token, compared by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    // Punctuation
    Star,
    Dot,
    Comma,
    LParen,
    RParen,
    // Keywords
    Is,
    Or,
    Not,
    And,
    From,
    Null,
    Like,
    Where,
    Select,
    // Operator and literal classes
    MathOp,
    RelOp,
    Boolean,
    Date,
    String,
    Numeric,
    Identifier,
}

/// One classified lexical unit: a kind plus the exact text it matched.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
}

/// How a classifier recognizes its kind at a given input position.
enum Matcher {
    /// Fixed text, compared case-insensitively. Used for punctuation and
    /// keyword spellings. No word-boundary check: `orders` lexes as `OR`
    /// followed by `ders`, which is the documented tie-break behavior.
    Literal(&'static str),
    /// Regular expression anchored at the cursor; the lexeme is whatever the
    /// pattern consumed.
    Pattern(Regex),
}

pub struct Classifier {
    kind: TokenKind,
    matcher: Matcher,
}

impl Classifier {
    fn literal(kind: TokenKind, text: &'static str) -> Self {
        Classifier {
            kind,
            matcher: Matcher::Literal(text),
        }
    }

    fn pattern(kind: TokenKind, pat: &str) -> Self {
        Classifier {
            kind,
            matcher: Matcher::Pattern(Regex::new(pat).expect("classifier pattern compiles")),
        }
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Try to match this classifier against `input` starting at byte
    /// position `pos`. Returns the matched lexeme on success.
    pub fn match_at<'a>(&self, input: &'a str, pos: usize) -> Option<&'a str> {
        let rest = input.get(pos..)?;
        match &self.matcher {
            Matcher::Literal(text) => rest
                .get(..text.len())
                .filter(|head| head.eq_ignore_ascii_case(text)),
            Matcher::Pattern(re) => re.find(rest).map(|m| m.as_str()),
        }
    }
}

static CLASSIFIERS: LazyLock<Vec<Classifier>> = LazyLock::new(|| {
    vec![
        Classifier::literal(TokenKind::Star, "*"),
        Classifier::literal(TokenKind::Dot, "."),
        Classifier::literal(TokenKind::Comma, ","),
        Classifier::literal(TokenKind::LParen, "("),
        Classifier::literal(TokenKind::RParen, ")"),
        Classifier::literal(TokenKind::Is, "IS"),
        Classifier::literal(TokenKind::Or, "OR"),
        Classifier::literal(TokenKind::Not, "NOT"),
        Classifier::literal(TokenKind::And, "AND"),
        Classifier::literal(TokenKind::From, "FROM"),
        Classifier::literal(TokenKind::Null, "NULL"),
        Classifier::literal(TokenKind::Like, "LIKE"),
        Classifier::literal(TokenKind::Where, "WHERE"),
        Classifier::literal(TokenKind::Select, "SELECT"),
        Classifier::pattern(TokenKind::MathOp, r"^[*+/-]"),
        Classifier::pattern(TokenKind::RelOp, r"^(=|>=|<=|<>|>|<)"),
        Classifier::pattern(TokenKind::Boolean, r"^(true|false)"),
        Classifier::pattern(
            TokenKind::Date,
            r"^('\d{1,2}/\d{1,2}/\d{4}'|'\d{4}-\d{1,2}-\d{1,2}')",
        ),
        // A string literal must close on the same line.
        Classifier::pattern(TokenKind::String, r"^'[^'\r\n]*'"),
        Classifier::pattern(TokenKind::Numeric, r"^\d*\.?\d+"),
        Classifier::pattern(TokenKind::Identifier, r"^[a-zA-Z_][a-zA-Z0-9_]*"),
    ]
});

/// The full classifier list in priority order.
pub fn classifiers() -> &'static [Classifier] {
    &CLASSIFIERS
}
