//! Recursive-descent parser for the query grammar.
//!
//! Single-token lookahead, no backtracking. Every rule consumes tokens
//! through the scanner's `match_advance`/`required` primitives; the only
//! error-raising point is `required`. Precedence, low to high:
//! OR, AND, relational/LIKE, math, then NOT / parentheses / atoms, all
//! left-associative.

use chrono::NaiveDate;

use crate::ast::{Atom, Expr, LogicOp, MathOp, RelOp};
use crate::error::Error;
use crate::scanner::Scanner;
use crate::token::TokenKind;
use crate::value::Value;

/// The parsed shape of a SELECT query.
///
/// `fields` is `None` for `SELECT *` (no projection). The FROM table list is
/// required syntactically but discarded: queries always run against the one
/// collection handed to `execute`.
#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    pub fields: Option<Vec<String>>,
    pub predicate: Option<Expr>,
}

pub struct Parser<'a> {
    scanner: Scanner<'a>,
}

impl<'a> Parser<'a> {
    pub fn new(query: &'a str) -> Self {
        let mut scanner = Scanner::new(query);
        scanner.advance();
        Parser { scanner }
    }

    /// Parse a full query. Returns `None` when the query does not start with
    /// SELECT; no other statement form is supported. Tokens after a complete
    /// query are ignored.
    pub fn parse(&mut self) -> Result<Option<Select>, Error> {
        if self.scanner.match_advance(TokenKind::Select).is_none() {
            return Ok(None);
        }

        let fields = self.id_list()?;
        self.scanner.required(TokenKind::From)?;
        // Table list: same list grammar as the field list, never used.
        self.id_list()?;

        let predicate = if self.scanner.match_advance(TokenKind::Where).is_some() {
            Some(self.expr()?)
        } else {
            None
        };

        Ok(Some(Select { fields, predicate }))
    }

    /// `"*"` or a non-empty comma-separated identifier list, order
    /// preserved. `*` yields `None`.
    fn id_list(&mut self) -> Result<Option<Vec<String>>, Error> {
        if self.scanner.match_advance(TokenKind::Star).is_some() {
            return Ok(None);
        }
        let mut fields = vec![self.scanner.required(TokenKind::Identifier)?];
        while self.scanner.match_advance(TokenKind::Comma).is_some() {
            fields.push(self.scanner.required(TokenKind::Identifier)?);
        }
        Ok(Some(fields))
    }

    pub fn expr(&mut self) -> Result<Expr, Error> {
        let mut left = self.and_expr()?;
        while self.scanner.match_advance(TokenKind::Or).is_some() {
            left = Expr::Logical {
                op: LogicOp::Or,
                left: Box::new(left),
                right: Box::new(self.and_expr()?),
            };
        }
        Ok(left)
    }

    fn and_expr(&mut self) -> Result<Expr, Error> {
        let mut left = self.rel_expr()?;
        while self.scanner.match_advance(TokenKind::And).is_some() {
            left = Expr::Logical {
                op: LogicOp::And,
                left: Box::new(left),
                right: Box::new(self.rel_expr()?),
            };
        }
        Ok(left)
    }

    fn rel_expr(&mut self) -> Result<Expr, Error> {
        let mut left = self.math_expr()?;
        loop {
            if let Some(lexeme) = self.scanner.match_advance(TokenKind::RelOp) {
                let op = RelOp::from_lexeme(&lexeme)
                    .ok_or_else(|| Error::Syntax(format!("unknown operator '{}'", lexeme)))?;
                left = Expr::Relational {
                    op,
                    left: Box::new(left),
                    right: Box::new(self.math_expr()?),
                };
            } else if self.scanner.match_advance(TokenKind::Like).is_some() {
                left = Expr::Like {
                    left: Box::new(left),
                    right: Box::new(self.math_expr()?),
                };
            } else {
                return Ok(left);
            }
        }
    }

    fn math_expr(&mut self) -> Result<Expr, Error> {
        let mut left = self.term()?;
        loop {
            // `*` always classifies as the star punctuation token, so accept
            // it here as multiplication alongside the math-operator kind.
            let op = if let Some(lexeme) = self.scanner.match_advance(TokenKind::MathOp) {
                MathOp::from_lexeme(&lexeme)
                    .ok_or_else(|| Error::Syntax(format!("unknown operator '{}'", lexeme)))?
            } else if self.scanner.match_advance(TokenKind::Star).is_some() {
                MathOp::Multiply
            } else {
                return Ok(left);
            };
            left = Expr::Math {
                op,
                left: Box::new(left),
                right: Box::new(self.term()?),
            };
        }
    }

    /// NOT applies to a whole following `expr`, not just the next factor.
    fn term(&mut self) -> Result<Expr, Error> {
        if self.scanner.match_advance(TokenKind::Not).is_some() {
            Ok(Expr::Not(Box::new(self.expr()?)))
        } else if self.scanner.match_advance(TokenKind::LParen).is_some() {
            let inner = self.expr()?;
            self.scanner.required(TokenKind::RParen)?;
            Ok(inner)
        } else {
            self.factor()
        }
    }

    fn factor(&mut self) -> Result<Expr, Error> {
        if let Some(lexeme) = self.scanner.match_advance(TokenKind::String) {
            return Ok(Expr::Atomic(Atom::Literal(Value::Str(unquote(&lexeme)))));
        }
        if let Some(lexeme) = self.scanner.match_advance(TokenKind::Numeric) {
            let n: f64 = lexeme
                .parse()
                .map_err(|_| Error::Syntax(format!("invalid number '{}'", lexeme)))?;
            return Ok(Expr::Atomic(Atom::Literal(Value::Number(n))));
        }
        if let Some(lexeme) = self.scanner.match_advance(TokenKind::Boolean) {
            return Ok(Expr::Atomic(Atom::Literal(Value::Bool(lexeme == "true"))));
        }
        if self.scanner.match_advance(TokenKind::Null).is_some() {
            return Ok(Expr::Atomic(Atom::Literal(Value::Null)));
        }
        if let Some(lexeme) = self.scanner.match_advance(TokenKind::Date) {
            return Ok(Expr::Atomic(Atom::Literal(Value::Date(parse_date(
                &unquote(&lexeme),
            )?))));
        }

        // Qualified identifier: the table qualifier is discarded, only the
        // final field name is kept as the late-bound lookup key.
        let mut name = self.scanner.required(TokenKind::Identifier)?;
        if self.scanner.match_advance(TokenKind::Dot).is_some() {
            name = self.scanner.required(TokenKind::Identifier)?;
        }
        Ok(Expr::Atomic(Atom::FieldRef(name)))
    }
}

fn unquote(lexeme: &str) -> String {
    lexeme
        .strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
        .unwrap_or(lexeme)
        .to_string()
}

/// `M/D/YYYY` or `YYYY-M-D`, per the date token pattern. A lexically valid
/// but impossible date (month 13, day 40) is a syntax error.
fn parse_date(text: &str) -> Result<NaiveDate, Error> {
    NaiveDate::parse_from_str(text, "%m/%d/%Y")
        .or_else(|_| NaiveDate::parse_from_str(text, "%Y-%m-%d"))
        .map_err(|_| Error::Syntax(format!("invalid date literal '{}'", text)))
}
