//! Extension-dispatched dataset reading and writing.
//!
//! Supported formats:
//! * `.csv` - plain CSV with a header row
//! * `.csv.gz` (any `.gz`) - gzip-compressed CSV
//! * `.parquet` / `.parq` - Parquet via Arrow, behind the `parquet`
//!   feature
//!
//! CSV columns are type-inferred: a caller-declared date column parses as
//! ISO dates, a column whose non-empty cells all parse as floats is
//! numeric, and anything else is categorical. Empty cells are missing.

use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use log::{debug, info};

use quantprep_core::{Column, Dataset};

use crate::error::StorageError;

/// On-disk formats dispatched by extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Csv,
    CsvGz,
    Parquet,
}

fn detect_format(path: &Path) -> Option<Format> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => Some(Format::Csv),
        // A bare .gz is read as gzipped CSV, matching the `.csv.gz` contract
        "gz" => Some(Format::CsvGz),
        "parquet" | "parq" => Some(Format::Parquet),
        _ => None,
    }
}

/// Read a dataset from a file, dispatching on the extension.
///
/// `parse_dates` names the columns to interpret as `%Y-%m-%d` dates;
/// unparseable entries in those columns become missing.
///
/// # Errors
///
/// Returns [`StorageError::UnsupportedFormat`] for an unknown extension
/// and [`StorageError::CodecUnavailable`] for any Parquet failure.
pub fn read_dataset(path: &Path, parse_dates: &[&str]) -> Result<Dataset<f64>, StorageError> {
    let format = detect_format(path).ok_or_else(|| StorageError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;
    debug!("reading dataset from {} as {:?}", path.display(), format);

    let ds = match format {
        Format::Csv => read_csv_from(File::open(path)?, parse_dates)?,
        Format::CsvGz => read_csv_from(GzDecoder::new(File::open(path)?), parse_dates)?,
        Format::Parquet => parquet_codec::read(path, parse_dates)?,
    };

    debug!(
        "read {} rows x {} columns from {}",
        ds.len(),
        ds.column_count(),
        path.display()
    );
    Ok(ds)
}

/// Write a dataset to a file, dispatching on the extension.
///
/// Missing parent directories are created. Returns the path written.
///
/// # Errors
///
/// Returns [`StorageError::UnsupportedFormat`] for an unknown extension
/// and [`StorageError::CodecUnavailable`] for any Parquet failure.
pub fn write_dataset(ds: &Dataset<f64>, path: &Path) -> Result<PathBuf, StorageError> {
    let format = detect_format(path).ok_or_else(|| StorageError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    match format {
        Format::Csv => write_csv_to(ds, File::create(path)?)?,
        Format::CsvGz => {
            write_csv_to(ds, GzEncoder::new(File::create(path)?, Compression::default()))?;
        }
        Format::Parquet => parquet_codec::write(ds, path)?,
    }

    info!(
        "wrote {} rows x {} columns to {}",
        ds.len(),
        ds.column_count(),
        path.display()
    );
    Ok(path.to_path_buf())
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

fn parse_date(cell: &str) -> Option<NaiveDate> {
    let cell = cell.trim();
    NaiveDate::parse_from_str(cell, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            // Datetime strings: take the leading date part
            cell.get(..10)
                .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
        })
}

fn read_csv_from<R: Read>(reader: R, parse_dates: &[&str]) -> Result<Dataset<f64>, StorageError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let headers: Vec<String> = csv_reader.headers()?.iter().map(str::to_string).collect();

    let mut cells: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
    for record in csv_reader.records() {
        let record = record?;
        for (i, column) in cells.iter_mut().enumerate() {
            column.push(record.get(i).unwrap_or("").to_string());
        }
    }

    let mut ds = Dataset::with_capacity(headers.len());
    for (name, raw) in headers.into_iter().zip(cells) {
        let column = infer_column(&raw, parse_dates.contains(&name.as_str()));
        ds.add_column(name, column)?;
    }
    Ok(ds)
}

/// Decide a column's kind from its raw cells.
///
/// Declared date columns become datetime. A column whose non-empty cells
/// all parse as floats becomes numeric (an entirely empty column counts);
/// anything else is categorical. Empty cells are missing in every kind.
fn infer_column(raw: &[String], as_date: bool) -> Column<f64> {
    if as_date {
        return Column::Datetime(raw.iter().map(|cell| parse_date(cell)).collect());
    }

    let all_numeric = raw
        .iter()
        .filter(|cell| !cell.trim().is_empty())
        .all(|cell| cell.trim().parse::<f64>().is_ok());

    if all_numeric {
        Column::Numeric(
            raw.iter()
                .map(|cell| cell.trim().parse::<f64>().unwrap_or(f64::NAN))
                .collect(),
        )
    } else {
        Column::Categorical(
            raw.iter()
                .map(|cell| {
                    if cell.trim().is_empty() {
                        None
                    } else {
                        Some(cell.to_string())
                    }
                })
                .collect(),
        )
    }
}

fn write_csv_to<W: Write>(ds: &Dataset<f64>, writer: W) -> Result<(), StorageError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(ds.column_names())?;

    for row in 0..ds.len() {
        let record: Vec<String> = ds.iter().map(|(_, column)| format_cell(column, row)).collect();
        csv_writer.write_record(&record)?;
    }

    csv_writer.flush()?;
    Ok(())
}

fn format_cell(column: &Column<f64>, row: usize) -> String {
    match column {
        Column::Numeric(s) => {
            let v = s[row];
            if v.is_nan() {
                String::new()
            } else {
                v.to_string()
            }
        }
        Column::Categorical(v) => v[row].clone().unwrap_or_default(),
        Column::Datetime(v) => v[row].map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default(),
    }
}

// ---------------------------------------------------------------------------
// Parquet (feature-gated codec)
// ---------------------------------------------------------------------------

#[cfg(feature = "parquet")]
mod parquet_codec {
    use std::fs::File;
    use std::path::Path;
    use std::sync::Arc;

    use arrow::array::{
        Array, ArrayRef, BooleanArray, Date32Array, Float32Array, Float64Array, Int32Array,
        Int64Array, StringArray,
    };
    use arrow::datatypes::{DataType, Field, Schema};
    use arrow::record_batch::RecordBatch;
    use chrono::NaiveDate;
    use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
    use parquet::arrow::ArrowWriter;

    use quantprep_core::{Column, Dataset};

    use crate::error::StorageError;

    fn epoch() -> NaiveDate {
        NaiveDate::from_ymd_opt(1970, 1, 1).unwrap()
    }

    fn codec_err(path: &Path, source: impl std::fmt::Display) -> StorageError {
        StorageError::CodecUnavailable {
            path: path.to_path_buf(),
            message: source.to_string(),
        }
    }

    /// Per-column accumulator across record batches.
    enum ColumnAcc {
        Numeric(Vec<f64>),
        Categorical(Vec<Option<String>>),
        Datetime(Vec<Option<NaiveDate>>),
    }

    impl ColumnAcc {
        fn into_column(self) -> Column<f64> {
            match self {
                Self::Numeric(v) => Column::Numeric(v.into()),
                Self::Categorical(v) => Column::Categorical(v),
                Self::Datetime(v) => Column::Datetime(v),
            }
        }
    }

    pub(super) fn read(path: &Path, parse_dates: &[&str]) -> Result<Dataset<f64>, StorageError> {
        let file = File::open(path)?;
        let builder = ParquetRecordBatchReaderBuilder::try_new(file).map_err(|e| codec_err(path, e))?;
        let schema = builder.schema().clone();
        let reader = builder.build().map_err(|e| codec_err(path, e))?;

        let mut names: Vec<String> = Vec::with_capacity(schema.fields().len());
        let mut accs: Vec<ColumnAcc> = Vec::with_capacity(schema.fields().len());
        for field in schema.fields() {
            names.push(field.name().clone());
            let acc = match field.data_type() {
                DataType::Float64
                | DataType::Float32
                | DataType::Int64
                | DataType::Int32
                | DataType::Boolean => ColumnAcc::Numeric(Vec::new()),
                DataType::Date32 => ColumnAcc::Datetime(Vec::new()),
                DataType::Utf8 | DataType::LargeUtf8 => {
                    if parse_dates.contains(&field.name().as_str()) {
                        ColumnAcc::Datetime(Vec::new())
                    } else {
                        ColumnAcc::Categorical(Vec::new())
                    }
                }
                other => {
                    return Err(codec_err(
                        path,
                        format!("unsupported parquet column type {other:?} for '{}'", field.name()),
                    ))
                }
            };
            accs.push(acc);
        }

        for batch in reader {
            let batch = batch.map_err(|e| codec_err(path, e))?;
            for (index, acc) in accs.iter_mut().enumerate() {
                append_column(acc, batch.column(index), path)?;
            }
        }

        let columns = names
            .into_iter()
            .zip(accs)
            .map(|(name, acc)| (name, acc.into_column()))
            .collect();
        Ok(Dataset::from_columns(columns)?)
    }

    fn append_column(
        acc: &mut ColumnAcc,
        array: &ArrayRef,
        path: &Path,
    ) -> Result<(), StorageError> {
        match acc {
            ColumnAcc::Numeric(values) => {
                for row in 0..array.len() {
                    values.push(numeric_value(array, row));
                }
            }
            ColumnAcc::Categorical(values) => {
                let strings = array
                    .as_any()
                    .downcast_ref::<StringArray>()
                    .ok_or_else(|| codec_err(path, "expected a string column"))?;
                for row in 0..strings.len() {
                    if strings.is_null(row) {
                        values.push(None);
                    } else {
                        values.push(Some(strings.value(row).to_string()));
                    }
                }
            }
            ColumnAcc::Datetime(values) => match array.data_type() {
                DataType::Date32 => {
                    let dates = array
                        .as_any()
                        .downcast_ref::<Date32Array>()
                        .ok_or_else(|| codec_err(path, "expected a date32 column"))?;
                    for row in 0..dates.len() {
                        if dates.is_null(row) {
                            values.push(None);
                        } else {
                            let days = i64::from(dates.value(row));
                            values.push(epoch().checked_add_signed(chrono::Duration::days(days)));
                        }
                    }
                }
                _ => {
                    let strings = array
                        .as_any()
                        .downcast_ref::<StringArray>()
                        .ok_or_else(|| codec_err(path, "expected a string date column"))?;
                    for row in 0..strings.len() {
                        if strings.is_null(row) {
                            values.push(None);
                        } else {
                            values.push(super::parse_date(strings.value(row)));
                        }
                    }
                }
            },
        }
        Ok(())
    }

    fn numeric_value(array: &ArrayRef, row: usize) -> f64 {
        if array.is_null(row) {
            return f64::NAN;
        }
        match array.data_type() {
            DataType::Float64 => array.as_any().downcast_ref::<Float64Array>().map(|a| a.value(row)),
            DataType::Float32 => array
                .as_any()
                .downcast_ref::<Float32Array>()
                .map(|a| f64::from(a.value(row))),
            DataType::Int64 => array
                .as_any()
                .downcast_ref::<Int64Array>()
                .map(|a| a.value(row) as f64),
            DataType::Int32 => array
                .as_any()
                .downcast_ref::<Int32Array>()
                .map(|a| f64::from(a.value(row))),
            DataType::Boolean => array
                .as_any()
                .downcast_ref::<BooleanArray>()
                .map(|a| if a.value(row) { 1.0 } else { 0.0 }),
            _ => None,
        }
        .unwrap_or(f64::NAN)
    }

    pub(super) fn write(ds: &Dataset<f64>, path: &Path) -> Result<(), StorageError> {
        let mut fields = Vec::with_capacity(ds.column_count());
        let mut arrays: Vec<ArrayRef> = Vec::with_capacity(ds.column_count());

        for (name, column) in ds.iter() {
            match column {
                Column::Numeric(series) => {
                    fields.push(Field::new(name, DataType::Float64, false));
                    arrays.push(Arc::new(Float64Array::from(series.as_slice().to_vec())));
                }
                Column::Categorical(values) => {
                    fields.push(Field::new(name, DataType::Utf8, true));
                    arrays.push(Arc::new(StringArray::from(values.clone())));
                }
                Column::Datetime(values) => {
                    fields.push(Field::new(name, DataType::Date32, true));
                    let days: Vec<Option<i32>> = values
                        .iter()
                        .map(|opt| opt.map(|d| (d - epoch()).num_days() as i32))
                        .collect();
                    arrays.push(Arc::new(Date32Array::from(days)));
                }
            }
        }

        let schema = Arc::new(Schema::new(fields));
        let batch =
            RecordBatch::try_new(schema.clone(), arrays).map_err(|e| codec_err(path, e))?;

        let file = File::create(path)?;
        let mut writer = ArrowWriter::try_new(file, schema, None).map_err(|e| codec_err(path, e))?;
        writer.write(&batch).map_err(|e| codec_err(path, e))?;
        writer.close().map_err(|e| codec_err(path, e))?;
        Ok(())
    }
}

#[cfg(not(feature = "parquet"))]
mod parquet_codec {
    use std::path::Path;

    use quantprep_core::Dataset;

    use crate::error::StorageError;

    fn unavailable(path: &Path) -> StorageError {
        StorageError::CodecUnavailable {
            path: path.to_path_buf(),
            message: "built without the 'parquet' feature".to_string(),
        }
    }

    pub(super) fn read(path: &Path, _parse_dates: &[&str]) -> Result<Dataset<f64>, StorageError> {
        Err(unavailable(path))
    }

    pub(super) fn write(_ds: &Dataset<f64>, path: &Path) -> Result<(), StorageError> {
        Err(unavailable(path))
    }
}
