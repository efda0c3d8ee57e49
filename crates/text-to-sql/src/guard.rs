//! Statement-kind check for generated SQL.
//!
//! Generated SQL is untrusted. It must parse as exactly one statement, and that statement must
//! be a query (`SELECT`, `WITH ... SELECT`, `VALUES`). Everything else is rejected before it
//! reaches the store; the store additionally runs the query on a read-only connection.

use sqlparser::ast::Statement;
use sqlparser::dialect::SQLiteDialect;
use sqlparser::parser::Parser;

use crate::error::PipelineError;

pub fn check_read_only(sql: &str) -> Result<(), PipelineError> {
    if sql.trim().is_empty() {
        return Err(PipelineError::MalformedGeneration("empty SQL".to_string()));
    }

    let statements = Parser::parse_sql(&SQLiteDialect {}, sql)
        .map_err(|e| PipelineError::MalformedGeneration(format!("not valid SQL: {}", e)))?;

    match statements.as_slice() {
        [Statement::Query(_)] => Ok(()),
        [other] => Err(PipelineError::MalformedGeneration(format!(
            "only read queries are allowed, got {}",
            statement_kind(other)
        ))),
        [] => Err(PipelineError::MalformedGeneration("empty SQL".to_string())),
        many => Err(PipelineError::MalformedGeneration(format!(
            "expected a single statement, got {}",
            many.len()
        ))),
    }
}

/// Leading keyword of a statement, e.g. `DELETE`.
fn statement_kind(statement: &Statement) -> String {
    statement
        .to_string()
        .split_whitespace()
        .next()
        .unwrap_or("statement")
        .to_uppercase()
}
