//! Load a CSV file into memory, infer column types from the data, and filter,
//! aggregate or sort its rows.

pub mod cli;
pub mod data;
pub mod error;
pub mod processor;
pub mod render;

pub use data::aggregate::AggregateFn;
pub use data::filter::Operator;
pub use data::loader::{load_csv, load_csv_with, LoadOptions};
pub use data::model::{ColumnType, Dataset, Row, Value};
pub use data::sort::Direction;
pub use error::{ProcessorError, Result};
pub use processor::Processor;
