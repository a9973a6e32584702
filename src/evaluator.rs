//! Per-record evaluation of the expression tree.
//!
//! Every node recomputes from scratch on each call; nothing is cached or
//! memoized, so evaluation is pure and a tree can be reused across records
//! and threads freely.

use regex::Regex;
use std::cmp::Ordering;

use crate::ast::{Atom, Expr, LogicOp, MathOp, RelOp};
use crate::error::Error;
use crate::value::{Record, Value};

impl Expr {
    /// Evaluate this expression against one record.
    ///
    /// A field reference absent from the record reads as [`Value::Absent`]
    /// rather than failing; there is no semantic-error layer. The only
    /// failure here is a LIKE pattern that does not compile.
    pub fn evaluate(&self, record: &Record) -> Result<Value, Error> {
        match self {
            Expr::Atomic(Atom::Literal(value)) => Ok(value.clone()),
            Expr::Atomic(Atom::FieldRef(name)) => {
                Ok(record.get(name).cloned().unwrap_or(Value::Absent))
            }
            Expr::Math { op, left, right } => {
                let l = left.evaluate(record)?;
                let r = right.evaluate(record)?;
                Ok(apply_math(*op, &l, &r))
            }
            Expr::Relational { op, left, right } => {
                let l = left.evaluate(record)?;
                let r = right.evaluate(record)?;
                Ok(Value::Bool(apply_relational(*op, &l, &r)))
            }
            Expr::Like { left, right } => {
                let l = left.evaluate(record)?;
                let r = right.evaluate(record)?;
                let pattern = Regex::new(&r.as_text()).map_err(Error::Pattern)?;
                Ok(Value::Bool(pattern.is_match(&l.as_text())))
            }
            Expr::Logical { op, left, right } => {
                let l = left.evaluate(record)?.is_truthy();
                let r = right.evaluate(record)?.is_truthy();
                Ok(Value::Bool(match op {
                    LogicOp::And => l && r,
                    LogicOp::Or => l || r,
                }))
            }
            Expr::Not(operand) => Ok(Value::Bool(!operand.evaluate(record)?.is_truthy())),
        }
    }
}

fn apply_math(op: MathOp, left: &Value, right: &Value) -> Value {
    match op {
        MathOp::Add => match (left, right) {
            // A string on either side turns + into concatenation.
            (Value::Str(_), _) | (_, Value::Str(_)) => {
                Value::Str(format!("{}{}", left.as_text(), right.as_text()))
            }
            _ => Value::Number(left.as_number() + right.as_number()),
        },
        MathOp::Subtract => Value::Number(left.as_number() - right.as_number()),
        MathOp::Multiply => Value::Number(left.as_number() * right.as_number()),
        MathOp::Divide => Value::Number(left.as_number() / right.as_number()),
    }
}

fn apply_relational(op: RelOp, left: &Value, right: &Value) -> bool {
    match op {
        RelOp::Equal => loose_eq(left, right),
        // Strict by contract, even though `=` is loose: 'ABC' = 'abc' and
        // 'ABC' <> 'abc' both hold.
        RelOp::NotEqual => !strict_eq(left, right),
        RelOp::GreaterThan => matches!(compare(left, right), Some(Ordering::Greater)),
        RelOp::GreaterEqual => matches!(
            compare(left, right),
            Some(Ordering::Greater | Ordering::Equal)
        ),
        RelOp::LessThan => matches!(compare(left, right), Some(Ordering::Less)),
        RelOp::LessEqual => {
            matches!(compare(left, right), Some(Ordering::Less | Ordering::Equal))
        }
    }
}

/// Loose equality for `=`: dates by calendar date, strings
/// case-insensitively, null and absent equal among themselves and nothing
/// else, everything else through numeric coercion.
fn loose_eq(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Date(a), Value::Date(b)) => a == b,
        (Value::Str(a), Value::Str(b)) => a.to_lowercase() == b.to_lowercase(),
        (Value::Null | Value::Absent, Value::Null | Value::Absent) => true,
        (Value::Null | Value::Absent, _) | (_, Value::Null | Value::Absent) => false,
        (Value::Date(_), _) | (_, Value::Date(_)) => false,
        _ => left.as_number() == right.as_number(),
    }
}

/// Strict equality for `<>`: values of different types are never equal
/// (null and absent included) and strings compare case-sensitively.
fn strict_eq(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Null, Value::Null) => true,
        (Value::Absent, Value::Absent) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => a == b,
        (Value::Str(a), Value::Str(b)) => a == b,
        (Value::Date(a), Value::Date(b)) => a == b,
        _ => false,
    }
}

/// Ordering for `> >= < <=`: two strings compare lexicographically,
/// everything else through numeric coercion. NaN orders against nothing, so
/// comparisons involving an unparseable string or an absent field are all
/// false, while an explicit null field coerces to 0 and does order.
fn compare(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
        _ => left.as_number().partial_cmp(&right.as_number()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(value: Value) -> Expr {
        Expr::Atomic(Atom::Literal(value))
    }

    #[test]
    fn test_absent_field_reads_absent() {
        let expr = Expr::Atomic(Atom::FieldRef("missing".to_string()));
        let record = Record::new();
        assert_eq!(expr.evaluate(&record).unwrap(), Value::Absent);
    }

    #[test]
    fn test_absent_is_loose_equal_to_null_but_never_orders() {
        let field = || Box::new(Expr::Atomic(Atom::FieldRef("missing".to_string())));
        let record = Record::new();

        let eq_null = Expr::Relational {
            op: RelOp::Equal,
            left: field(),
            right: Box::new(lit(Value::Null)),
        };
        assert_eq!(eq_null.evaluate(&record).unwrap(), Value::Bool(true));

        for op in [
            RelOp::LessThan,
            RelOp::LessEqual,
            RelOp::GreaterThan,
            RelOp::GreaterEqual,
        ] {
            let cmp = Expr::Relational {
                op,
                left: field(),
                right: Box::new(lit(Value::Number(5.0))),
            };
            assert_eq!(cmp.evaluate(&record).unwrap(), Value::Bool(false));
        }
    }

    #[test]
    fn test_division_by_zero_is_infinite() {
        let expr = Expr::Math {
            op: MathOp::Divide,
            left: Box::new(lit(Value::Number(1.0))),
            right: Box::new(lit(Value::Number(0.0))),
        };
        assert_eq!(
            expr.evaluate(&Record::new()).unwrap(),
            Value::Number(f64::INFINITY)
        );
    }

    #[test]
    fn test_equality_asymmetry() {
        let eq = Expr::Relational {
            op: RelOp::Equal,
            left: Box::new(lit(Value::Str("ABC".to_string()))),
            right: Box::new(lit(Value::Str("abc".to_string()))),
        };
        let ne = Expr::Relational {
            op: RelOp::NotEqual,
            left: Box::new(lit(Value::Str("ABC".to_string()))),
            right: Box::new(lit(Value::Str("abc".to_string()))),
        };
        let record = Record::new();
        assert_eq!(eq.evaluate(&record).unwrap(), Value::Bool(true));
        assert_eq!(ne.evaluate(&record).unwrap(), Value::Bool(true));
    }

    #[test]
    fn test_bad_like_pattern_is_an_error() {
        let expr = Expr::Like {
            left: Box::new(lit(Value::Str("abc".to_string()))),
            right: Box::new(lit(Value::Str("(".to_string()))),
        };
        assert!(matches!(
            expr.evaluate(&Record::new()),
            Err(Error::Pattern(_))
        ));
    }
}
