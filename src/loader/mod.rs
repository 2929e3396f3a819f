//! Training log loader (CSV/Parquet → Arrow)
//!
//! The loader only moves bytes into record batches. CSV columns are read as
//! text so a stray value never fails the whole file; typing and row dropping
//! are the validator's job.

use crate::{Error, Result};
use arrow::csv::reader::Format;
use arrow::csv::ReaderBuilder;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use std::fs::File;
use std::io::{Seek, SeekFrom};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Rows per CSV record batch
const CSV_BATCH_ROWS: usize = 8192;

/// Supported on-disk formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Comma-separated text with a header row
    Csv,
    /// Apache Parquet
    Parquet,
}

impl LogFormat {
    /// Detect the format from a file extension
    ///
    /// # Errors
    /// Returns [`Error::UnsupportedFormat`] for unknown extensions
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "csv" => Ok(Self::Csv),
            "parquet" | "pq" => Ok(Self::Parquet),
            _ => Err(Error::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// A loaded training log, held as Arrow record batches
#[derive(Debug, Clone, Default)]
pub struct TrainingLog {
    batches: Vec<RecordBatch>,
}

impl TrainingLog {
    /// Create a log from existing batches
    ///
    /// Useful for testing and for front ends that read data themselves
    #[must_use]
    pub fn new(batches: Vec<RecordBatch>) -> Self {
        Self { batches }
    }

    /// Load a log, picking the reader from the file extension
    ///
    /// # Errors
    /// Returns error if the format is unsupported or the file cannot be read
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        match LogFormat::from_path(path)? {
            LogFormat::Csv => Self::load_csv(path),
            LogFormat::Parquet => Self::load_parquet(path),
        }
    }

    /// Load a log from a CSV file with a header row
    ///
    /// Every column is read as nullable text. Short rows are padded with
    /// nulls so the validator drops them instead of failing the file. A
    /// header-only file yields one empty batch so the schema can still be
    /// checked.
    ///
    /// # Errors
    /// Returns error if the file cannot be opened or is not valid CSV
    pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut file = File::open(path)
            .map_err(|e| Error::StorageError(format!("Failed to open CSV file: {e}")))?;

        let (inferred, _) = Format::default()
            .with_header(true)
            .with_truncated_rows(true)
            .infer_schema(&mut file, Some(1))
            .map_err(|e| Error::StorageError(format!("Failed to read CSV header: {e}")))?;
        let schema = Arc::new(text_schema(&inferred));

        file.seek(SeekFrom::Start(0))?;
        let reader = ReaderBuilder::new(Arc::clone(&schema))
            .with_header(true)
            .with_truncated_rows(true)
            .with_batch_size(CSV_BATCH_ROWS)
            .build(file)
            .map_err(|e| Error::StorageError(format!("Failed to create CSV reader: {e}")))?;

        let mut batches = Vec::new();
        for batch in reader {
            let batch = batch
                .map_err(|e| Error::StorageError(format!("Failed to read CSV rows: {e}")))?;
            batches.push(batch);
        }
        if batches.is_empty() {
            batches.push(RecordBatch::new_empty(schema));
        }

        let log = Self { batches };
        info!(path = %path.display(), rows = log.num_rows(), "loaded CSV training log");
        Ok(log)
    }

    /// Load a log from a Parquet file
    ///
    /// # Errors
    /// Returns error if file cannot be read or parsed
    pub fn load_parquet<P: AsRef<Path>>(path: P) -> Result<Self> {
        use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            Error::StorageError(format!("Failed to open Parquet file: {e}"))
        })?;

        let builder = ParquetRecordBatchReaderBuilder::try_new(file).map_err(|e| {
            Error::StorageError(format!("Failed to parse Parquet file: {e}"))
        })?;
        let schema = Arc::clone(builder.schema());

        let reader = builder.build().map_err(|e| {
            Error::StorageError(format!("Failed to create Parquet reader: {e}"))
        })?;

        let mut batches = Vec::new();
        for batch in reader {
            let batch = batch.map_err(|e| {
                Error::StorageError(format!("Failed to read record batch: {e}"))
            })?;
            batches.push(batch);
        }
        if batches.is_empty() {
            batches.push(RecordBatch::new_empty(schema));
        }

        let log = Self { batches };
        info!(path = %path.display(), rows = log.num_rows(), "loaded Parquet training log");
        Ok(log)
    }

    /// Get all record batches
    #[must_use]
    pub fn batches(&self) -> &[RecordBatch] {
        &self.batches
    }

    /// Total number of rows across batches
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.batches.iter().map(RecordBatch::num_rows).sum()
    }
}

/// Same column names as `schema`, every column nullable text
fn text_schema(schema: &Schema) -> Schema {
    let fields: Vec<Field> = schema
        .fields()
        .iter()
        .map(|f| Field::new(f.name(), DataType::Utf8, true))
        .collect();
    Schema::new(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{Array, AsArray};
    use std::io::Write;

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(LogFormat::from_path(Path::new("a/log.csv")).unwrap(), LogFormat::Csv);
        assert_eq!(LogFormat::from_path(Path::new("log.CSV")).unwrap(), LogFormat::Csv);
        assert_eq!(
            LogFormat::from_path(Path::new("log.parquet")).unwrap(),
            LogFormat::Parquet
        );
        assert!(matches!(
            LogFormat::from_path(Path::new("log.xlsx")),
            Err(Error::UnsupportedFormat(_))
        ));
        assert!(LogFormat::from_path(Path::new("log")).is_err());
    }

    #[test]
    fn test_load_csv_reads_text_columns() {
        let file = write_temp(
            ".csv",
            "ID,Exercise,Reps,Load,Weight_Used,Good,Timestamp\n\
             1,S,1,7,100,y,2024-01-01\n\
             2,S,1,7,,n,2024-01-02\n",
        );

        let log = TrainingLog::load(file.path()).unwrap();
        assert_eq!(log.num_rows(), 2);

        let batch = &log.batches()[0];
        assert_eq!(batch.num_columns(), 7);
        for field in batch.schema().fields() {
            assert_eq!(field.data_type(), &DataType::Utf8);
        }

        let reps = batch.column_by_name("Reps").unwrap().as_string::<i32>();
        assert_eq!(reps.value(0), "1");

        let weight = batch.column_by_name("Weight_Used").unwrap();
        let weight = weight.as_string::<i32>();
        assert!(weight.is_null(1) || weight.value(1).is_empty());
    }

    #[test]
    fn test_load_csv_pads_short_rows() {
        let file = write_temp(
            ".csv",
            "ID,Exercise,Reps,Load,Weight_Used,Good,Timestamp\n\
             1,S,1,7,100,y,2024-01-01\n\
             2,S,1,7\n",
        );

        let log = TrainingLog::load_csv(file.path()).unwrap();
        assert_eq!(log.num_rows(), 2);
        let batch = &log.batches()[0];
        let weight = batch.column_by_name("Weight_Used").unwrap();
        assert!(weight.is_null(1));
        assert!(batch.column_by_name("Timestamp").unwrap().is_null(1));
    }

    #[test]
    fn test_load_csv_header_only() {
        let file = write_temp(".csv", "ID,Exercise,Reps,Load,Weight_Used,Good,Timestamp\n");

        let log = TrainingLog::load_csv(file.path()).unwrap();
        assert_eq!(log.num_rows(), 0);
        assert_eq!(log.batches().len(), 1);
        assert_eq!(log.batches()[0].schema().fields().len(), 7);
    }

    #[test]
    fn test_load_missing_file() {
        let result = TrainingLog::load("/nonexistent/training-data.csv");
        assert!(matches!(result, Err(Error::StorageError(_))));
    }
}
