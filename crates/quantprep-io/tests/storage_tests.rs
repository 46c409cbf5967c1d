//! Round-trip tests for dataset storage.

use chrono::NaiveDate;
use tempfile::TempDir;

use quantprep_core::prelude::*;
use quantprep_io::{read_dataset, write_dataset, StorageError};

// ============================================================================
// Test Utilities
// ============================================================================

fn sample() -> Dataset<f64> {
    let mut ds: Dataset<f64> = Dataset::new();
    ds.add_column(
        "date",
        Column::Datetime(vec![
            NaiveDate::from_ymd_opt(2024, 1, 1),
            NaiveDate::from_ymd_opt(2024, 1, 2),
            None,
        ]),
    )
    .unwrap();
    ds.set_numeric("close", Series::from_vec(vec![101.25, f64::NAN, 103.5]))
        .unwrap();
    ds.add_column(
        "ticker",
        Column::Categorical(vec![Some("AAA".to_string()), None, Some("BBB".to_string())]),
    )
    .unwrap();
    ds
}

fn assert_roundtrip(original: &Dataset<f64>, recovered: &Dataset<f64>) {
    assert_eq!(original.column_names(), recovered.column_names());
    assert_eq!(original.len(), recovered.len());
    assert_eq!(
        original.kind("date").unwrap(),
        recovered.kind("date").unwrap()
    );
    assert_eq!(original, recovered);
}

// ============================================================================
// CSV
// ============================================================================

#[test]
fn test_csv_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("prices.csv");

    let ds = sample();
    let written = write_dataset(&ds, &path).unwrap();
    assert_eq!(written, path);

    let recovered = read_dataset(&path, &["date"]).unwrap();
    assert_roundtrip(&ds, &recovered);
}

#[test]
fn test_csv_gz_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("prices.csv.gz");

    let ds = sample();
    write_dataset(&ds, &path).unwrap();

    let recovered = read_dataset(&path, &["date"]).unwrap();
    assert_roundtrip(&ds, &recovered);
}

#[test]
fn test_csv_without_parse_dates_is_categorical() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("prices.csv");

    write_dataset(&sample(), &path).unwrap();
    let recovered = read_dataset(&path, &[]).unwrap();

    assert_eq!(recovered.kind("date").unwrap(), ColumnKind::Categorical);
    assert_eq!(recovered.kind("close").unwrap(), ColumnKind::Numeric);
}

#[test]
fn test_write_creates_parent_directories() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested/deeper/prices.csv");

    write_dataset(&sample(), &path).unwrap();
    assert!(path.is_file());
}

// ============================================================================
// Extension dispatch
// ============================================================================

#[test]
fn test_unsupported_extension_on_read() {
    let result = read_dataset(std::path::Path::new("prices.xlsx"), &[]);
    assert!(matches!(
        result,
        Err(StorageError::UnsupportedFormat { .. })
    ));
}

#[test]
fn test_unsupported_extension_on_write() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("prices.xlsx");

    let result = write_dataset(&sample(), &path);
    assert!(matches!(
        result,
        Err(StorageError::UnsupportedFormat { .. })
    ));
}

// ============================================================================
// Parquet
// ============================================================================

#[cfg(feature = "parquet")]
#[test]
fn test_parquet_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("prices.parquet");

    let ds = sample();
    write_dataset(&ds, &path).unwrap();

    let recovered = read_dataset(&path, &[]).unwrap();
    // Date columns survive as real dates without parse_dates
    assert_eq!(recovered.kind("date").unwrap(), ColumnKind::Datetime);
    assert_roundtrip(&ds, &recovered);
}

#[cfg(feature = "parquet")]
#[test]
fn test_parq_extension_dispatches_to_parquet() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("prices.parq");

    write_dataset(&sample(), &path).unwrap();
    let recovered = read_dataset(&path, &[]).unwrap();
    assert_eq!(recovered.len(), 3);
}

#[cfg(feature = "parquet")]
#[test]
fn test_corrupt_parquet_is_codec_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.parquet");
    std::fs::write(&path, b"this is not a parquet file").unwrap();

    let result = read_dataset(&path, &[]);
    assert!(matches!(
        result,
        Err(StorageError::CodecUnavailable { .. })
    ));
}

#[cfg(not(feature = "parquet"))]
#[test]
fn test_parquet_unavailable_without_feature() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("prices.parquet");

    let result = write_dataset(&sample(), &path);
    assert!(matches!(
        result,
        Err(StorageError::CodecUnavailable { .. })
    ));
}
