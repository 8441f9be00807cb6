//! End-to-end tests of loading and processing CSV files through the library API.

use std::io::Write;
use std::path::Path;

use csv_processor::{
    load_csv, AggregateFn, ColumnType, Direction, Operator, Processor, ProcessorError, Value,
};
use tempfile::NamedTempFile;

const PHONES: &str = "\
name,brand,price,rating
iphone 15 pro,apple,999,4.9
galaxy s23 ultra,samsung,1199,4.8
redmi note 12,xiaomi,199,4.6
poco x5 pro,xiaomi,299,4.4";

const PRODUCTS: &str = "\
product,category,price,stock
laptop,electronics,1500,10
mouse,electronics,25,50
desk,furniture,300,5
chair,furniture,150,8";

fn csv_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn column<'a>(dataset: &'a csv_processor::Dataset, name: &str) -> Vec<&'a str> {
    dataset
        .rows()
        .iter()
        .map(|row| dataset.value(row, name).unwrap())
        .collect()
}

#[test]
fn test_load_reads_header_and_rows() {
    let file = csv_file(PHONES);
    let dataset = load_csv(file.path()).unwrap();

    assert_eq!(dataset.len(), 4);
    assert_eq!(dataset.columns(), ["name", "brand", "price", "rating"]);
    assert_eq!(dataset.value(&dataset.rows()[0], "name"), Some("iphone 15 pro"));
    assert_eq!(dataset.value(&dataset.rows()[0], "brand"), Some("apple"));
}

#[test]
fn test_load_nonexistent_file() {
    let err = Processor::from_path(Path::new("nonexistent_file.csv")).err().unwrap();
    assert!(matches!(err, ProcessorError::FileNotFound { .. }));
    assert_eq!(err.to_string(), "File 'nonexistent_file.csv' not found");
}

#[test]
fn test_column_type_detection() {
    let file = csv_file(PHONES);
    let mut processor = Processor::from_path(file.path()).unwrap();

    assert_eq!(processor.infer_type("name").unwrap(), ColumnType::Text);
    assert_eq!(processor.infer_type("brand").unwrap(), ColumnType::Text);
    assert_eq!(processor.infer_type("price").unwrap(), ColumnType::Integer);
    assert_eq!(processor.infer_type("rating").unwrap(), ColumnType::Float);
}

#[test]
fn test_filter_equals() {
    let file = csv_file(PHONES);
    let mut processor = Processor::from_path(file.path()).unwrap();

    let result = processor.filter("brand", Operator::Equal, "xiaomi").unwrap();
    assert_eq!(result.len(), 2);
    assert!(column(&result, "brand").iter().all(|b| *b == "xiaomi"));
}

#[test]
fn test_filter_greater_than() {
    let file = csv_file(PHONES);
    let mut processor = Processor::from_path(file.path()).unwrap();

    let result = processor.filter("price", Operator::Greater, "500").unwrap();
    assert_eq!(column(&result, "name"), ["iphone 15 pro", "galaxy s23 ultra"]);
}

#[test]
fn test_filter_less_than_on_float_column() {
    let file = csv_file(PHONES);
    let mut processor = Processor::from_path(file.path()).unwrap();

    let result = processor.filter("rating", Operator::Less, "4.7").unwrap();
    assert_eq!(column(&result, "name"), ["redmi note 12", "poco x5 pro"]);
}

#[test]
fn test_filter_invalid_column() {
    let file = csv_file(PHONES);
    let mut processor = Processor::from_path(file.path()).unwrap();

    let err = processor.filter("invalid_column", Operator::Equal, "value").unwrap_err();
    assert_eq!(err.to_string(), "'invalid_column' not found in data columns");
}

#[test]
fn test_aggregate_avg_min_max() {
    let file = csv_file(PHONES);
    let mut processor = Processor::from_path(file.path()).unwrap();

    assert_eq!(processor.aggregate("price", AggregateFn::Avg).unwrap(), Value::Float(674.0));
    assert_eq!(processor.aggregate("price", AggregateFn::Min).unwrap(), Value::Integer(199));
    assert_eq!(processor.aggregate("price", AggregateFn::Max).unwrap(), Value::Integer(1199));
}

#[test]
fn test_aggregate_text_column_error() {
    let file = csv_file(PHONES);
    let mut processor = Processor::from_path(file.path()).unwrap();

    let err = processor.aggregate("name", AggregateFn::Avg).unwrap_err();
    assert!(matches!(err, ProcessorError::AggregationUnsupported(_)));
}

#[test]
fn test_sort_asc_and_desc() {
    let file = csv_file(PHONES);
    let mut processor = Processor::from_path(file.path()).unwrap();

    let asc = processor.sort("price", Direction::Asc).unwrap();
    assert_eq!(column(&asc, "price"), ["199", "299", "999", "1199"]);

    let desc = processor.sort("price", Direction::Desc).unwrap();
    assert_eq!(column(&desc, "price"), ["1199", "999", "299", "199"]);

    // Sorting returns a new ordering only.
    assert_eq!(column(processor.dataset(), "price"), ["999", "1199", "199", "299"]);
}

#[test]
fn test_sort_is_monotonic_on_floats() {
    let file = csv_file(PHONES);
    let mut processor = Processor::from_path(file.path()).unwrap();

    let sorted = processor.sort("rating", Direction::Asc).unwrap();
    let ratings: Vec<f64> = column(&sorted, "rating")
        .iter()
        .map(|r| r.parse().unwrap())
        .collect();
    assert!(ratings.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn test_filter_then_aggregate() {
    let file = csv_file(PRODUCTS);
    let mut processor = Processor::from_path(file.path()).unwrap();

    let filtered = processor.filter("category", Operator::Equal, "electronics").unwrap();
    assert_eq!(filtered.len(), 2);
    processor.replace_rows(filtered.into_rows());

    let avg = processor.aggregate("price", AggregateFn::Avg).unwrap();
    assert_eq!(avg, Value::Float((1500.0 + 25.0) / 2.0));
}

#[test]
fn test_filter_to_nothing_then_aggregate() {
    let file = csv_file(PRODUCTS);
    let mut processor = Processor::from_path(file.path()).unwrap();

    let filtered = processor.filter("price", Operator::Greater, "100000").unwrap();
    processor.replace_rows(filtered.into_rows());

    let err = processor.aggregate("price", AggregateFn::Avg).unwrap_err();
    assert!(matches!(err, ProcessorError::EmptyDataset));
}

#[test]
fn test_integers_wider_than_i64() {
    let file = csv_file("id\n12345678901234567890\n5\n");
    let mut processor = Processor::from_path(file.path()).unwrap();

    assert_eq!(processor.infer_type("id").unwrap(), ColumnType::Integer);

    let sorted = processor.sort("id", Direction::Asc).unwrap();
    assert_eq!(column(&sorted, "id"), ["5", "12345678901234567890"]);

    assert_eq!(
        processor.aggregate("id", AggregateFn::Max).unwrap(),
        Value::Integer(12_345_678_901_234_567_890)
    );
    let avg = processor.aggregate("id", AggregateFn::Avg).unwrap();
    assert_eq!(avg, Value::Float(12_345_678_901_234_567_895_f64 / 2.0));

    let big = processor.filter("id", Operator::Greater, "10000000000000000000").unwrap();
    assert_eq!(column(&big, "id"), ["12345678901234567890"]);
}

#[test]
fn test_filter_text_greater_than() {
    let file = csv_file(PHONES);
    let mut processor = Processor::from_path(file.path()).unwrap();

    let result = processor.filter("brand", Operator::Greater, "m").unwrap();
    assert_eq!(column(&result, "brand"), ["samsung", "xiaomi", "xiaomi"]);
}
