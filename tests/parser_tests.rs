// tests/parser_tests.rs

use sqlish::ast::{Atom, Expr, LogicOp, MathOp, RelOp};
use sqlish::parser::Parser;
use sqlish::{Error, Value};

fn parse_expr(input: &str) -> Expr {
    Parser::new(input).expr().unwrap()
}

// ============================================================================
// Expression grammar
// ============================================================================

#[test]
fn test_and_binds_tighter_than_or() {
    // a = 1 OR (b = 2 AND c = 3)
    let expr = parse_expr("a = 1 OR b = 2 AND c = 3");
    match expr {
        Expr::Logical {
            op: LogicOp::Or,
            left,
            right,
        } => {
            assert!(matches!(
                *left,
                Expr::Relational {
                    op: RelOp::Equal,
                    ..
                }
            ));
            assert!(matches!(
                *right,
                Expr::Logical {
                    op: LogicOp::And,
                    ..
                }
            ));
        }
        other => panic!("expected OR at the top, got {:?}", other),
    }
}

#[test]
fn test_parentheses_override_precedence() {
    // (a = 1 OR b = 2) AND c = 3
    let expr = parse_expr("(a = 1 OR b = 2) AND c = 3");
    match expr {
        Expr::Logical {
            op: LogicOp::And,
            left,
            ..
        } => {
            assert!(matches!(
                *left,
                Expr::Logical {
                    op: LogicOp::Or,
                    ..
                }
            ));
        }
        other => panic!("expected AND at the top, got {:?}", other),
    }
}

#[test]
fn test_not_applies_to_whole_expression() {
    let expr = parse_expr("NOT a = 1 AND b = 2");
    match expr {
        Expr::Not(inner) => {
            assert!(matches!(
                *inner,
                Expr::Logical {
                    op: LogicOp::And,
                    ..
                }
            ));
        }
        other => panic!("expected NOT at the top, got {:?}", other),
    }
}

#[test]
fn test_math_binds_tighter_than_relational() {
    // (age + 5) > 30
    let expr = parse_expr("age + 5 > 30");
    match expr {
        Expr::Relational {
            op: RelOp::GreaterThan,
            left,
            ..
        } => {
            assert!(matches!(
                *left,
                Expr::Math {
                    op: MathOp::Add,
                    ..
                }
            ));
        }
        other => panic!("expected > at the top, got {:?}", other),
    }
}

#[test]
fn test_star_parses_as_multiplication_in_expressions() {
    let expr = parse_expr("age * 2");
    assert!(matches!(
        expr,
        Expr::Math {
            op: MathOp::Multiply,
            ..
        }
    ));
}

#[test]
fn test_like_parses_at_relational_level() {
    let expr = parse_expr("name LIKE '^A'");
    assert!(matches!(expr, Expr::Like { .. }));
}

#[test]
fn test_qualified_identifier_keeps_only_field_name() {
    let expr = parse_expr("customer.name");
    assert_eq!(
        expr,
        Expr::Atomic(Atom::FieldRef("name".to_string()))
    );
}

#[test]
fn test_literals() {
    assert_eq!(
        parse_expr("'abc'"),
        Expr::Atomic(Atom::Literal(Value::Str("abc".to_string())))
    );
    assert_eq!(
        parse_expr("3.14"),
        Expr::Atomic(Atom::Literal(Value::Number(3.14)))
    );
    assert_eq!(
        parse_expr("true"),
        Expr::Atomic(Atom::Literal(Value::Bool(true)))
    );
    assert_eq!(parse_expr("NULL"), Expr::Atomic(Atom::Literal(Value::Null)));
}

#[test]
fn test_date_literal_both_syntaxes() {
    let slash = parse_expr("'5/1/2023'");
    let dash = parse_expr("'2023-5-1'");
    assert_eq!(slash, dash);
    assert!(matches!(
        slash,
        Expr::Atomic(Atom::Literal(Value::Date(_)))
    ));
}

#[test]
fn test_impossible_date_is_a_syntax_error() {
    let err = Parser::new("'99/99/2024'").expr().unwrap_err();
    assert!(matches!(err, Error::Syntax(_)));
}

// ============================================================================
// Query grammar
// ============================================================================

#[test]
fn test_select_star_has_no_projection() {
    let select = Parser::new("SELECT * FROM t").parse().unwrap().unwrap();
    assert_eq!(select.fields, None);
    assert_eq!(select.predicate, None);
}

#[test]
fn test_field_list_preserves_order() {
    let select = Parser::new("SELECT b, a, c FROM t").parse().unwrap().unwrap();
    assert_eq!(
        select.fields,
        Some(vec!["b".to_string(), "a".to_string(), "c".to_string()])
    );
}

#[test]
fn test_table_list_is_discarded() {
    let one = Parser::new("SELECT a FROM t WHERE a = 1").parse().unwrap().unwrap();
    let two = Parser::new("SELECT a FROM t, u WHERE a = 1").parse().unwrap().unwrap();
    assert_eq!(one, two);
}

#[test]
fn test_where_is_optional() {
    let select = Parser::new("SELECT a FROM t").parse().unwrap().unwrap();
    assert_eq!(select.predicate, None);
}

#[test]
fn test_non_select_yields_no_query() {
    assert_eq!(Parser::new("UPDATE t SET a = 1").parse().unwrap(), None);
    assert_eq!(Parser::new("").parse().unwrap(), None);
}

#[test]
fn test_missing_field_list_is_a_syntax_error() {
    let err = Parser::new("SELECT FROM t").parse().unwrap_err();
    assert!(matches!(err, Error::Syntax(_)));
}

#[test]
fn test_missing_from_is_a_syntax_error() {
    let err = Parser::new("SELECT a WHERE a = 1").parse().unwrap_err();
    assert!(matches!(err, Error::Syntax(_)));
}

#[test]
fn test_unclosed_parenthesis_is_a_syntax_error() {
    let err = Parser::new("SELECT a FROM t WHERE (a = 1").parse().unwrap_err();
    assert!(matches!(err, Error::Syntax(_)));
}

#[test]
fn test_trailing_tokens_are_ignored() {
    // The grammar stops once the query is complete; leftovers are not an error.
    assert!(Parser::new("SELECT a FROM t WHERE a = 1 2 3").parse().is_ok());
}
