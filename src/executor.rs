//! Drives a full query: parse, filter, project.

use crate::error::Error;
use crate::parser::{Parser, Select};
use crate::value::{Record, Value};

/// Execute a query against a collection of records.
///
/// Returns `Ok(None)` when the query is not a SELECT statement — no other
/// query form is supported. Otherwise the WHERE predicate (if any) is
/// evaluated once per record and records where it comes out truthy are kept;
/// a field list then projects each survivor onto new records holding only the
/// listed fields, while `SELECT *` returns the filtered records as-is.
///
/// # Examples
///
/// ```
/// use sqlish::{execute, Record, Value};
///
/// let mut row = Record::new();
/// row.insert("name".to_string(), Value::Str("Alice".to_string()));
/// row.insert("age".to_string(), Value::Number(30.0));
///
/// let result = execute("SELECT name FROM people WHERE age > 26", &[row])
///     .unwrap()
///     .unwrap();
/// assert_eq!(result.len(), 1);
/// assert_eq!(result[0].get("name"), Some(&Value::Str("Alice".to_string())));
/// ```
pub fn execute(query: &str, data: &[Record]) -> Result<Option<Vec<Record>>, Error> {
    let mut parser = Parser::new(query);
    let Some(select) = parser.parse()? else {
        return Ok(None);
    };
    Ok(Some(apply(&select, data)?))
}

fn apply(select: &Select, data: &[Record]) -> Result<Vec<Record>, Error> {
    let rows = match &select.predicate {
        Some(predicate) => {
            let mut kept = Vec::new();
            for record in data {
                if predicate.evaluate(record)?.is_truthy() {
                    kept.push(record.clone());
                }
            }
            kept
        }
        None => data.to_vec(),
    };

    let Some(fields) = &select.fields else {
        return Ok(rows);
    };

    let projected = rows
        .iter()
        .map(|record| {
            fields
                .iter()
                .map(|field| {
                    let value = record.get(field).cloned().unwrap_or(Value::Null);
                    (field.clone(), value)
                })
                .collect()
        })
        .collect();
    Ok(projected)
}
