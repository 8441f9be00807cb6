use std::fmt;
use std::str::FromStr;

use crate::error::{ProcessorError, Result};

use super::model::{ColumnType, Dataset, Value};

/// Reduction applied over a numeric column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateFn {
    Avg,
    Min,
    Max,
}

impl AggregateFn {
    pub fn name(self) -> &'static str {
        match self {
            AggregateFn::Avg => "avg",
            AggregateFn::Min => "min",
            AggregateFn::Max => "max",
        }
    }
}

impl FromStr for AggregateFn {
    type Err = ProcessorError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "avg" => Ok(AggregateFn::Avg),
            "min" => Ok(AggregateFn::Min),
            "max" => Ok(AggregateFn::Max),
            other => Err(ProcessorError::UnsupportedFunction(other.to_string())),
        }
    }
}

impl fmt::Display for AggregateFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Reduce `column` of `dataset` with `function`.
///
/// `avg` always yields a float; `min`/`max` keep the column's type and return
/// the first extremal value in row order.
pub fn aggregate_column(
    dataset: &Dataset,
    column: &str,
    column_type: ColumnType,
    function: AggregateFn,
) -> Result<Value> {
    if !column_type.is_numeric() {
        return Err(ProcessorError::AggregationUnsupported(column.to_string()));
    }
    let idx = dataset
        .column_index(column)
        .ok_or_else(|| ProcessorError::ColumnNotFound(column.to_string()))?;
    if dataset.is_empty() {
        return Err(ProcessorError::EmptyDataset);
    }

    let values = dataset
        .rows()
        .iter()
        .map(|row| column_type.coerce(row.get(idx).unwrap_or_default(), column))
        .collect::<Result<Vec<Value>>>()?;

    let result = match function {
        AggregateFn::Avg => Value::Float(mean(&values)),
        AggregateFn::Min => extremum(values, |candidate, best| candidate < best)
            .ok_or(ProcessorError::EmptyDataset)?,
        AggregateFn::Max => extremum(values, |candidate, best| candidate > best)
            .ok_or(ProcessorError::EmptyDataset)?,
    };
    Ok(result)
}

fn mean(values: &[Value]) -> f64 {
    let count = values.len() as f64;
    // Exact integer sum before the single division, unless it overflows.
    let exact = values.iter().try_fold(0i128, |acc, v| match v {
        Value::Integer(i) => acc.checked_add(*i),
        _ => None,
    });
    match exact {
        Some(sum) => sum as f64 / count,
        None => values.iter().filter_map(Value::as_f64).sum::<f64>() / count,
    }
}

/// Scan left to right, replacing the current best only when `better` holds,
/// so ties keep the earliest value.
fn extremum(values: Vec<Value>, better: impl Fn(&Value, &Value) -> bool) -> Option<Value> {
    values.into_iter().reduce(|best, candidate| {
        if better(&candidate, &best) {
            candidate
        } else {
            best
        }
    })
}
