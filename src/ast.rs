//! Expression tree for WHERE predicates.
//!
//! A closed set of node variants; each evaluates itself against one record
//! (see `evaluator`). Field references are late-bound: an
//! [`Atom::FieldRef`] carries only the field name and is resolved against
//! whichever record is handed to `evaluate`, never at parse time.

use crate::value::Value;

/// Leaf of the expression tree: either a fixed literal or a deferred
/// field reference.
#[derive(Debug, Clone, PartialEq)]
pub enum Atom {
    Literal(Value),
    FieldRef(String),
}

/// A parsed WHERE expression, immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Atomic(Atom),
    Math {
        op: MathOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Relational {
        op: RelOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// The right operand is compiled as a regular-expression pattern at
    /// evaluation time; this is not SQL `%`/`_` wildcard matching.
    Like {
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Logical {
        op: LogicOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Not(Box<Expr>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathOp {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl MathOp {
    pub fn from_lexeme(lexeme: &str) -> Option<MathOp> {
        match lexeme {
            "+" => Some(MathOp::Add),
            "-" => Some(MathOp::Subtract),
            "*" => Some(MathOp::Multiply),
            "/" => Some(MathOp::Divide),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelOp {
    /// `=` — loose: dates by calendar date, strings case-insensitively.
    Equal,
    /// `<>` — strict, intentionally asymmetric with `=`.
    NotEqual,
    GreaterEqual,
    LessEqual,
    GreaterThan,
    LessThan,
}

impl RelOp {
    pub fn from_lexeme(lexeme: &str) -> Option<RelOp> {
        match lexeme {
            "=" => Some(RelOp::Equal),
            "<>" => Some(RelOp::NotEqual),
            ">=" => Some(RelOp::GreaterEqual),
            "<=" => Some(RelOp::LessEqual),
            ">" => Some(RelOp::GreaterThan),
            "<" => Some(RelOp::LessThan),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicOp {
    And,
    Or,
}
