use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::{ProcessorError, Result};

use super::model::{ColumnType, Dataset, Row, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Direction::Asc => ordering,
            Direction::Desc => ordering.reverse(),
        }
    }
}

impl FromStr for Direction {
    type Err = ProcessorError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "asc" => Ok(Direction::Asc),
            "desc" => Ok(Direction::Desc),
            other => Err(ProcessorError::InvalidDirection(other.to_string())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Asc => f.write_str("asc"),
            Direction::Desc => f.write_str("desc"),
        }
    }
}

/// Stable sort of all rows by `column` coerced to `column_type`.
///
/// Every key is coerced up front so a bad value fails the sort before any
/// reordering. Equal keys keep their input order in both directions.
pub fn sort_rows(
    dataset: &Dataset,
    column: &str,
    column_type: ColumnType,
    direction: Direction,
) -> Result<Dataset> {
    let idx = dataset
        .column_index(column)
        .ok_or_else(|| ProcessorError::ColumnNotFound(column.to_string()))?;

    let mut keyed: Vec<(Value, &Row)> = Vec::with_capacity(dataset.len());
    for row in dataset.rows() {
        let key = column_type.coerce(row.get(idx).unwrap_or_default(), column)?;
        keyed.push((key, row));
    }

    // `sort_by` is stable.
    keyed.sort_by(|(a, _), (b, _)| direction.apply(a.total_cmp(b)));

    Ok(dataset.with_rows(keyed.into_iter().map(|(_, row)| row.clone()).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phones() -> Dataset {
        Dataset::new(
            vec!["name".into(), "price".into()],
            vec![
                Row::from_iter(["iphone", "999"]),
                Row::from_iter(["galaxy", "1199"]),
                Row::from_iter(["redmi", "199"]),
                Row::from_iter(["poco", "299"]),
                Row::from_iter(["pixel", "999"]),
            ],
        )
    }

    fn names(ds: &Dataset) -> Vec<&str> {
        ds.rows().iter().map(|r| r.get(0).unwrap()).collect()
    }

    #[test]
    fn ascending_numeric_and_stable() {
        let out = sort_rows(&phones(), "price", ColumnType::Integer, Direction::Asc).unwrap();
        assert_eq!(names(&out), ["redmi", "poco", "iphone", "pixel", "galaxy"]);
    }

    #[test]
    fn descending_keeps_ties_in_input_order() {
        let out = sort_rows(&phones(), "price", ColumnType::Integer, Direction::Desc).unwrap();
        assert_eq!(names(&out), ["galaxy", "iphone", "pixel", "poco", "redmi"]);
    }

    #[test]
    fn text_sort_is_lexicographic() {
        let out = sort_rows(&phones(), "price", ColumnType::Text, Direction::Asc).unwrap();
        let prices: Vec<_> = out.rows().iter().map(|r| r.get(1).unwrap()).collect();
        assert_eq!(prices, ["1199", "199", "299", "999", "999"]);
    }

    #[test]
    fn direction_parsing() {
        assert_eq!("desc".parse::<Direction>().unwrap(), Direction::Desc);
        let err = "up".parse::<Direction>().unwrap_err();
        assert_eq!(err.to_string(), "Sort direction must be 'asc' or 'desc', got: up");
    }
}
