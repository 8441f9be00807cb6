//! Data layer: core types, loading, and the three row operations.
//!
//! Architecture:
//! ```text
//!        .csv
//!         │
//!         ▼
//!   ┌──────────┐
//!   │  loader  │  parse file → Dataset (raw text)
//!   └──────────┘
//!         │
//!         ▼
//!   ┌──────────┐
//!   │ Dataset  │  columns + Vec<Row>
//!   └──────────┘
//!         │   coerced through the column's ColumnType
//!         ▼
//!   ┌──────────┬─────────────┬──────────┐
//!   │  filter  │  aggregate  │   sort   │
//!   └──────────┴─────────────┴──────────┘
//! ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
pub mod sort;
