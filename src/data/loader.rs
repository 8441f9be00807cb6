use std::fs::File;
use std::path::Path;

use crate::error::{ProcessorError, Result};

use super::model::{Dataset, Row};

// ---------------------------------------------------------------------------
// Loader options
// ---------------------------------------------------------------------------

/// Settings for reading a CSV file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// Field delimiter, `,` by default.
    pub delimiter: u8,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a comma-separated file with a header row.
pub fn load_csv(path: &Path) -> Result<Dataset> {
    load_csv_with(path, &LoadOptions::default())
}

/// Load a CSV file with a header row.
///
/// The header gives the column names in order; every following record is
/// kept as raw text, one value per column. Records whose field count differs
/// from the header are rejected by the reader.
pub fn load_csv_with(path: &Path, options: &LoadOptions) -> Result<Dataset> {
    let file = File::open(path).map_err(|e| {
        log::debug!("opening {}: {e}", path.display());
        ProcessorError::FileNotFound {
            path: path.display().to_string(),
        }
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(true)
        .trim(csv::Trim::None)
        .from_reader(file);

    let columns: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let rows = reader
        .records()
        .map(|record| -> Result<Row> { Ok(record?.iter().collect()) })
        .collect::<Result<Vec<Row>>>()?;

    log::debug!(
        "loaded {} rows with columns {:?} from {}",
        rows.len(),
        columns,
        path.display()
    );

    Ok(Dataset::new(columns, rows))
}
