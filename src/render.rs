use std::collections::BTreeMap;
use std::io::Write;

use prettytable::{Cell, Row as TableRow, Table};
use serde_json::{Map, Value as JsonValue};

use crate::data::model::{Dataset, Value};
use crate::error::Result;

/// Printed instead of a table when there are no rows.
pub const NO_DATA_MESSAGE: &str = "No data to display";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Grid table with a header row
    #[default]
    Table,
    /// JSON array of objects, keys in column order
    Json,
}

// ---------------------------------------------------------------------------
// Rows
// ---------------------------------------------------------------------------

/// Write every row of `dataset` in the requested format.
pub fn write_dataset<W: Write + ?Sized>(
    out: &mut W,
    dataset: &Dataset,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Table => write_dataset_table(out, dataset),
        OutputFormat::Json => write_dataset_json(out, dataset),
    }
}

fn write_dataset_table<W: Write + ?Sized>(out: &mut W, dataset: &Dataset) -> Result<()> {
    if dataset.is_empty() {
        writeln!(out, "{NO_DATA_MESSAGE}")?;
        return Ok(());
    }

    let mut table = Table::new();
    table.set_titles(TableRow::new(dataset.columns().iter().map(|c| Cell::new(c)).collect()));
    for row in dataset.rows() {
        table.add_row(TableRow::new(row.values().iter().map(|v| Cell::new(v)).collect()));
    }
    table.print(out)?;
    Ok(())
}

fn write_dataset_json<W: Write + ?Sized>(out: &mut W, dataset: &Dataset) -> Result<()> {
    let records: Vec<JsonValue> = dataset
        .rows()
        .iter()
        .map(|row| {
            let object: Map<String, JsonValue> = dataset
                .columns()
                .iter()
                .zip(row.values())
                .map(|(column, value)| (column.clone(), JsonValue::String(value.clone())))
                .collect();
            JsonValue::Object(object)
        })
        .collect();
    serde_json::to_writer_pretty(&mut *out, &records)?;
    writeln!(out)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Aggregate result
// ---------------------------------------------------------------------------

/// Write a single aggregate as a one-row table headed `header`.
pub fn write_aggregate<W: Write + ?Sized>(
    out: &mut W,
    header: &str,
    value: &Value,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Table => {
            let mut table = Table::new();
            table.set_titles(TableRow::new(vec![Cell::new(header)]));
            table.add_row(TableRow::new(vec![Cell::new(&value.to_string())]));
            table.print(out)?;
        }
        OutputFormat::Json => {
            // Written directly so 128-bit integers keep every digit.
            let record = BTreeMap::from([(header, value)]);
            serde_json::to_writer_pretty(&mut *out, &[record])?;
            writeln!(out)?;
        }
    }
    Ok(())
}
