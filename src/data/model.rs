use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

use crate::error::{ProcessorError, Result};

// ---------------------------------------------------------------------------
// ColumnType – the inferred type of a whole column
// ---------------------------------------------------------------------------

/// Type tag inferred from a column's raw text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    Integer,
    Float,
    Text,
}

impl ColumnType {
    pub fn is_numeric(self) -> bool {
        !matches!(self, ColumnType::Text)
    }

    /// Convert a raw cell to this type.
    ///
    /// Numeric types parse the trimmed text; `Text` keeps the raw value
    /// untouched and never fails.
    pub fn coerce(self, raw: &str, column: &str) -> Result<Value> {
        let fail = || ProcessorError::ValueCoercion {
            value: raw.to_string(),
            column: column.to_string(),
            expected: self,
        };
        match self {
            ColumnType::Integer => raw
                .trim()
                .parse::<i128>()
                .map(Value::Integer)
                .map_err(|_| fail()),
            ColumnType::Float => raw.trim().parse::<f64>().map(Value::Float).map_err(|_| fail()),
            ColumnType::Text => Ok(Value::Text(raw.to_string())),
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Integer => write!(f, "integer"),
            ColumnType::Float => write!(f, "float"),
            ColumnType::Text => write!(f, "text"),
        }
    }
}

// ---------------------------------------------------------------------------
// Value – a single cell after coercion
// ---------------------------------------------------------------------------

/// A cell coerced to its column's type.
///
/// Integers are 128-bit so ID-like columns wider than `i64` still coerce.
///
/// `PartialOrd` follows IEEE semantics for floats (NaN compares false with
/// everything), which is what filtering wants. Sorting needs a total order and
/// goes through [`Value::total_cmp`] instead.
#[derive(Debug, Clone, PartialEq, PartialOrd, Serialize)]
#[serde(untagged)]
pub enum Value {
    Integer(i128),
    Float(f64),
    Text(String),
}

impl Value {
    /// Total order used for sorting. Values of one column always share a
    /// variant; mixed variants fall back to variant order.
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        fn rank(v: &Value) -> u8 {
            match v {
                Value::Integer(_) => 0,
                Value::Float(_) => 1,
                Value::Text(_) => 2,
            }
        }
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a.cmp(b),
            (Value::Float(a), Value::Float(b)) => a.total_cmp(b),
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            _ => rank(self).cmp(&rank(other)),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Integer(i) => Some(*i as f64),
            Value::Text(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Text(s) => write!(f, "{s}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Row – one CSV record
// ---------------------------------------------------------------------------

/// One record of raw text, positionally aligned with [`Dataset::columns`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    values: Vec<String>,
}

impl Row {
    pub fn new(values: Vec<String>) -> Self {
        Row { values }
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.values.get(index).map(String::as_str)
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }
}

impl<S: Into<String>> FromIterator<S> for Row {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Row::new(iter.into_iter().map(Into::into).collect())
    }
}

// ---------------------------------------------------------------------------
// Dataset – header plus rows
// ---------------------------------------------------------------------------

/// Ordered rows sharing one ordered column list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Dataset {
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        debug_assert!(rows.iter().all(|r| r.values.len() == columns.len()));
        Dataset { columns, rows }
    }

    /// A dataset with the same columns and a different set of rows.
    pub fn with_rows(&self, rows: Vec<Row>) -> Self {
        Dataset::new(self.columns.clone(), rows)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.column_index(column).is_some()
    }

    /// Raw text of `column` in `row`, if the column exists.
    pub fn value<'a>(&self, row: &'a Row, column: &str) -> Option<&'a str> {
        self.column_index(column).and_then(|i| row.get(i))
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
