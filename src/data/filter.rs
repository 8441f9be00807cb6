use std::fmt;
use std::str::FromStr;

use crate::error::{ProcessorError, Result};

use super::model::{ColumnType, Dataset, Value};

// ---------------------------------------------------------------------------
// Comparison operator
// ---------------------------------------------------------------------------

/// Comparison applied between a row's value and the filter operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Greater,
    Less,
    Equal,
}

impl Operator {
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '>' => Some(Operator::Greater),
            '<' => Some(Operator::Less),
            '=' => Some(Operator::Equal),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Operator::Greater => '>',
            Operator::Less => '<',
            Operator::Equal => '=',
        }
    }

    /// `item <op> operand`. Float NaN never satisfies any operator.
    pub fn apply(self, item: &Value, operand: &Value) -> bool {
        match self {
            Operator::Greater => item > operand,
            Operator::Less => item < operand,
            Operator::Equal => item == operand,
        }
    }
}

impl FromStr for Operator {
    type Err = ProcessorError;

    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.chars();
        match (chars.next().and_then(Operator::from_symbol), chars.next()) {
            (Some(op), None) => Ok(op),
            _ => Err(ProcessorError::InvalidConditionFormat(s.to_string())),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

// ---------------------------------------------------------------------------
// Row filtering
// ---------------------------------------------------------------------------

/// Keep the rows whose `column` value, coerced to `column_type`, satisfies
/// `operator` against `operand`. Row order is preserved.
///
/// The caller has already checked that `column` exists and coerced the
/// operand; a row value that fails coercion aborts the whole filter.
pub fn filter_rows(
    dataset: &Dataset,
    column: &str,
    column_type: ColumnType,
    operator: Operator,
    operand: &Value,
) -> Result<Dataset> {
    let idx = dataset
        .column_index(column)
        .ok_or_else(|| ProcessorError::ColumnNotFound(column.to_string()))?;

    let mut kept = Vec::new();
    for row in dataset.rows() {
        let raw = row.get(idx).unwrap_or_default();
        let item = column_type.coerce(raw, column)?;
        if operator.apply(&item, operand) {
            kept.push(row.clone());
        }
    }
    Ok(dataset.with_rows(kept))
}
