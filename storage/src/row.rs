//! Converts dynamically typed SQLite rows into JSON objects.
//!
//! Ad-hoc queries have no schema known up front, so each value is decoded according to its
//! runtime storage class. Values without a JSON equivalent (blobs, non-finite reals) become text.

use serde_json::{Map, Number, Value};
use sqlx::sqlite::SqliteRow;
use sqlx::{Column, Row as _, TypeInfo, ValueRef};

use crate::error::StorageError;

/// One result row: column name → value, in select-list order.
pub type Row = Map<String, Value>;

pub(crate) fn row_to_json(row: &SqliteRow) -> Result<Row, StorageError> {
    let mut out = Map::with_capacity(row.columns().len());
    for column in row.columns() {
        let value = column_value(row, column.ordinal())?;
        out.insert(column.name().to_string(), value);
    }
    Ok(out)
}

fn column_value(row: &SqliteRow, index: usize) -> Result<Value, StorageError> {
    let type_name = {
        let raw = row.try_get_raw(index)?;
        if raw.is_null() {
            return Ok(Value::Null);
        }
        raw.type_info().name().to_string()
    };

    let value = match type_name.as_str() {
        "INTEGER" | "BOOLEAN" => Value::from(row.try_get::<i64, _>(index)?),
        "REAL" | "NUMERIC" => {
            let v = row.try_get::<f64, _>(index)?;
            Number::from_f64(v)
                .map(Value::Number)
                .unwrap_or_else(|| Value::String(v.to_string()))
        }
        "BLOB" => {
            let bytes = row.try_get::<Vec<u8>, _>(index)?;
            Value::String(format!("<blob {} bytes>", bytes.len()))
        }
        _ => Value::String(row.try_get::<String, _>(index)?),
    };
    Ok(value)
}
