use std::io::Write;
use std::path::PathBuf;

use clap::{CommandFactory, Parser};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::data::aggregate::AggregateFn;
use crate::data::filter::Operator;
use crate::data::loader::LoadOptions;
use crate::data::sort::Direction;
use crate::error::{ProcessorError, Result};
use crate::processor::Processor;
use crate::render::{self, OutputFormat};

// Column up to the first operator, then the rest as value.
static CONDITION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([^<>=]+?)([<>=])(.+)$").expect("condition regex is valid"));

// ---------------------------------------------------------------------------
// Arguments
// ---------------------------------------------------------------------------

/// CSV file processor
#[derive(Parser, Debug, Clone)]
#[command(name = "csv-processor")]
#[command(about = "CSV file processor: filter, aggregate or sort rows", long_about = None)]
pub struct Cli {
    /// Path to the CSV file
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Filter condition, e.g. price>100
    #[arg(long = "where", value_name = "CONDITION")]
    pub filter: Option<String>,

    /// Aggregation, e.g. price=avg (avg, min, max)
    #[arg(long, value_name = "COLUMN=FUNCTION")]
    pub aggregate: Option<String>,

    /// Sorting, e.g. price=desc or name=asc
    #[arg(long = "order-by", value_name = "COLUMN=DIRECTION")]
    pub order_by: Option<String>,

    /// Field delimiter of the input file
    #[arg(long, default_value = ",", value_parser = parse_delimiter)]
    pub delimiter: u8,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

impl Cli {
    /// Whether any of `--where`, `--aggregate`, `--order-by` was given.
    pub fn has_operations(&self) -> bool {
        self.filter.is_some() || self.aggregate.is_some() || self.order_by.is_some()
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            delimiter: self.delimiter,
        }
    }
}

fn parse_delimiter(s: &str) -> std::result::Result<u8, String> {
    match s.as_bytes() {
        [byte] if byte.is_ascii() => Ok(*byte),
        _ => Err(format!("delimiter must be a single ASCII character, got '{s}'")),
    }
}

// ---------------------------------------------------------------------------
// Condition strings
// ---------------------------------------------------------------------------

/// A parsed `<column><op><value>` string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub column: String,
    pub operator: Operator,
    pub value: String,
}

/// Split `price>100`-style text into column, operator and value.
///
/// The column stops at the first `<`, `>` or `=`; column and value are
/// trimmed. `--aggregate` and `--order-by` reuse this and ignore the operator.
pub fn parse_condition(condition: &str) -> Result<Condition> {
    let invalid = || ProcessorError::InvalidConditionFormat(condition.to_string());
    let caps = CONDITION_RE.captures(condition).ok_or_else(invalid)?;

    let operator: Operator = caps[2].parse().map_err(|_| invalid())?;

    Ok(Condition {
        column: caps[1].trim().to_string(),
        operator,
        value: caps[3].trim().to_string(),
    })
}

// ---------------------------------------------------------------------------
// Top-level run
// ---------------------------------------------------------------------------

/// Run the command and report any failure as a single line on `out`.
pub fn run<W: Write + ?Sized>(cli: &Cli, out: &mut W) {
    if let Err(e) = execute(cli, out) {
        log::error!("{e:#}");
        let line = error_line(&e);
        if let Err(write_err) = writeln!(out, "{line}") {
            log::error!("could not report error: {write_err}");
        }
    }
}

/// `Error: ...` for known failures, `Unexpected error: ...` otherwise.
pub fn error_line(err: &anyhow::Error) -> String {
    match err.downcast_ref::<ProcessorError>() {
        Some(e) if !e.is_unexpected() => format!("Error: {e}"),
        _ => format!("Unexpected error: {err}"),
    }
}

/// Load, then filter, then either aggregate or sort, writing the result to `out`.
pub fn execute<W: Write + ?Sized>(cli: &Cli, out: &mut W) -> anyhow::Result<()> {
    if !cli.has_operations() {
        write!(out, "{}", Cli::command().render_help())?;
        return Ok(());
    }

    let mut processor = Processor::from_path_with(&cli.file, &cli.load_options())?;
    log::info!(
        "loaded {} rows from {}",
        processor.dataset().len(),
        cli.file.display()
    );

    if let Some(condition) = &cli.filter {
        let Condition {
            column,
            operator,
            value,
        } = parse_condition(condition)?;
        let filtered = processor.filter(&column, operator, &value)?;
        processor.replace_rows(filtered.into_rows());
    }

    if let Some(aggregation) = &cli.aggregate {
        let Condition {
            column,
            value: function,
            ..
        } = parse_condition(aggregation)?;
        processor.require_column(&column)?;
        let function: AggregateFn = function.parse()?;
        let value = processor.aggregate(&column, function)?;
        render::write_aggregate(out, &format!("{column}_{function}"), &value, cli.format)?;
        return Ok(());
    }

    let sorted = match &cli.order_by {
        Some(ordering) => {
            let Condition { column, value, .. } = parse_condition(ordering)?;
            let direction: Direction = value.parse()?;
            Some(processor.sort(&column, direction)?)
        }
        None => None,
    };

    let shown = sorted.as_ref().unwrap_or_else(|| processor.dataset());
    render::write_dataset(out, shown, cli.format)?;
    Ok(())
}
