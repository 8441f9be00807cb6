use std::collections::HashMap;
use std::path::Path;

use crate::data::aggregate::{aggregate_column, AggregateFn};
use crate::data::filter::{filter_rows, Operator};
use crate::data::loader::{load_csv_with, LoadOptions};
use crate::data::model::{ColumnType, Dataset, Row, Value};
use crate::data::sort::{sort_rows, Direction};
use crate::error::{ProcessorError, Result};

// ---------------------------------------------------------------------------
// Processor state
// ---------------------------------------------------------------------------

/// Owns the working rows and the per-column type cache.
pub struct Processor {
    /// Rows currently operated on. Replaced wholesale by [`Processor::replace_rows`].
    dataset: Dataset,

    /// Inferred column types. A missing entry means "not computed yet".
    /// Entries are never dropped, even when rows are replaced.
    type_cache: HashMap<String, ColumnType>,
}

impl Processor {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset,
            type_cache: HashMap::new(),
        }
    }

    /// Load `path` with default options.
    pub fn from_path(path: &Path) -> Result<Self> {
        Self::from_path_with(path, &LoadOptions::default())
    }

    pub fn from_path_with(path: &Path, options: &LoadOptions) -> Result<Self> {
        load_csv_with(path, options).map(Self::new)
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn columns(&self) -> &[String] {
        self.dataset.columns()
    }

    /// Swap in a new set of rows (typically a filter result).
    ///
    /// The type cache is kept as-is: types inferred from the full data stay
    /// in force for the narrower row set.
    pub fn replace_rows(&mut self, rows: Vec<Row>) {
        log::debug!("replacing {} rows with {}", self.dataset.len(), rows.len());
        self.dataset = self.dataset.with_rows(rows);
    }

    /// Fail with `ColumnNotFound` unless `column` is in the header.
    pub fn require_column(&self, column: &str) -> Result<()> {
        if self.dataset.has_column(column) {
            Ok(())
        } else {
            Err(ProcessorError::ColumnNotFound(column.to_string()))
        }
    }

    // -- Type inference --

    /// Inferred type of `column`, computed on first use and cached.
    ///
    /// Values are trimmed and parsed as floats in row order. The first one
    /// that fails makes the column `Text` without looking further. Otherwise
    /// the column is `Float` if any value contains a `.`, else `Integer`.
    pub fn infer_type(&mut self, column: &str) -> Result<ColumnType> {
        if let Some(&cached) = self.type_cache.get(column) {
            return Ok(cached);
        }
        let idx = self
            .dataset
            .column_index(column)
            .ok_or_else(|| ProcessorError::ColumnNotFound(column.to_string()))?;

        let inferred = scan_column_type(
            self.dataset
                .rows()
                .iter()
                .map(|row| row.get(idx).unwrap_or_default()),
        );
        log::debug!("column '{column}' inferred as {inferred}");
        self.type_cache.insert(column.to_string(), inferred);
        Ok(inferred)
    }

    /// Type of `column` if it has been inferred already.
    pub fn cached_type(&self, column: &str) -> Option<ColumnType> {
        self.type_cache.get(column).copied()
    }

    // -- Operations --

    /// Rows where `column <operator> raw_value`, in their current order.
    ///
    /// `raw_value` is coerced to the column's inferred type first. The
    /// processor's own rows are left untouched.
    pub fn filter(&mut self, column: &str, operator: Operator, raw_value: &str) -> Result<Dataset> {
        self.require_column(column)?;
        let column_type = self.infer_type(column)?;
        let operand = column_type.coerce(raw_value, column)?;

        let result = filter_rows(&self.dataset, column, column_type, operator, &operand)?;
        log::debug!(
            "filter {column}{operator}{raw_value}: {} of {} rows kept",
            result.len(),
            self.dataset.len()
        );
        Ok(result)
    }

    /// Reduce a numeric column to one value.
    pub fn aggregate(&mut self, column: &str, function: AggregateFn) -> Result<Value> {
        self.require_column(column)?;
        let column_type = self.infer_type(column)?;
        let value = aggregate_column(&self.dataset, column, column_type, function)?;
        log::debug!("{function}({column}) = {value}");
        Ok(value)
    }

    /// All rows stably sorted by `column`. The processor's rows keep their order.
    pub fn sort(&mut self, column: &str, direction: Direction) -> Result<Dataset> {
        self.require_column(column)?;
        let column_type = self.infer_type(column)?;
        sort_rows(&self.dataset, column, column_type, direction)
    }
}

/// Classify a column from its raw values.
///
/// An empty column is vacuously numeric without a decimal point, so it is
/// `Integer`.
pub fn scan_column_type<'a>(values: impl IntoIterator<Item = &'a str>) -> ColumnType {
    let mut has_decimal_point = false;
    for raw in values {
        let value = raw.trim();
        if value.parse::<f64>().is_err() {
            return ColumnType::Text;
        }
        if value.contains('.') {
            has_decimal_point = true;
        }
    }
    if has_decimal_point {
        ColumnType::Float
    } else {
        ColumnType::Integer
    }
}
