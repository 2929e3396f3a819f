//! Record validation over Arrow record batches
//!
//! Turns loosely-typed log tables into [`TrainingRecord`]s. A missing column is
//! a schema error; a missing or malformed cell drops the row and is counted.

use arrow::array::{Array, AsArray, StringArray};
use arrow::compute::cast;
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use serde::Serialize;
use tracing::{debug, warn};

use crate::record::{Timestamp, TrainingRecord};
use crate::{Error, Result};

/// Raw column names of the training log.
pub mod columns {
    /// Attempt id
    pub const ID: &str = "ID";
    /// Exercise code
    pub const EXERCISE: &str = "Exercise";
    /// Repetition count
    pub const REPS: &str = "Reps";
    /// Effort rating (named `Load` in the raw log)
    pub const LOAD: &str = "Load";
    /// Weight lifted
    pub const WEIGHT_USED: &str = "Weight_Used";
    /// Single-character pass/fail flag
    pub const GOOD: &str = "Good";
    /// When the attempt happened
    pub const TIMESTAMP: &str = "Timestamp";
}

/// Columns that must exist in every input batch.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    columns::ID,
    columns::EXERCISE,
    columns::REPS,
    columns::LOAD,
    columns::WEIGHT_USED,
    columns::GOOD,
    columns::TIMESTAMP,
];

/// Output of validation: the kept records and how many rows were dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidatedRecords {
    records: Vec<TrainingRecord>,
    dropped_rows: usize,
}

impl ValidatedRecords {
    /// Kept records, in input order.
    #[must_use]
    pub fn records(&self) -> &[TrainingRecord] {
        &self.records
    }

    /// Consume into the kept records.
    #[must_use]
    pub fn into_records(self) -> Vec<TrainingRecord> {
        self.records
    }

    /// Number of rows dropped for missing or malformed required values.
    #[must_use]
    pub const fn dropped_rows(&self) -> usize {
        self.dropped_rows
    }

    /// Number of kept records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no record survived validation.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Check that `batch` carries every required column.
///
/// # Errors
///
/// Returns [`Error::Schema`] naming the first missing column.
pub fn check_schema(batch: &RecordBatch) -> Result<()> {
    let schema = batch.schema();
    match REQUIRED_COLUMNS
        .iter()
        .find(|name| schema.index_of(name).is_err())
    {
        Some(missing) => Err(Error::Schema {
            column: (*missing).to_string(),
        }),
        None => Ok(()),
    }
}

/// Validate a set of record batches.
///
/// Every batch is schema-checked before any row is read, so a schema error
/// never comes with partial output. An empty slice validates to no records.
///
/// # Errors
///
/// Returns [`Error::Schema`] if a required column is missing, or
/// [`Error::Arrow`] if a column cannot be cast to text.
pub fn validate(batches: &[RecordBatch]) -> Result<ValidatedRecords> {
    for batch in batches {
        check_schema(batch)?;
    }

    let mut validated = ValidatedRecords::default();
    for batch in batches {
        validate_batch(batch, &mut validated)?;
    }

    if validated.dropped_rows > 0 {
        warn!(
            dropped_rows = validated.dropped_rows,
            kept_rows = validated.records.len(),
            "dropped training log rows with missing required values"
        );
    }
    debug!(records = validated.records.len(), "validated training log");

    Ok(validated)
}

/// Text view of every column the validator reads.
struct TextColumns {
    id: StringArray,
    exercise: StringArray,
    reps: StringArray,
    load: StringArray,
    weight_used: StringArray,
    good: StringArray,
    timestamp: StringArray,
}

impl TextColumns {
    fn new(batch: &RecordBatch) -> Result<Self> {
        Ok(Self {
            id: text_column(batch, columns::ID)?,
            exercise: text_column(batch, columns::EXERCISE)?,
            reps: text_column(batch, columns::REPS)?,
            load: text_column(batch, columns::LOAD)?,
            weight_used: text_column(batch, columns::WEIGHT_USED)?,
            good: text_column(batch, columns::GOOD)?,
            timestamp: text_column(batch, columns::TIMESTAMP)?,
        })
    }

    fn record(&self, row: usize) -> Option<TrainingRecord> {
        let exercise = cell(&self.exercise, row)?;
        let reps = cell(&self.reps, row).and_then(parse_integer)?;
        let effort = cell(&self.load, row).and_then(parse_integer)?;
        let weight_used = cell(&self.weight_used, row).and_then(parse_weight)?;
        let good = cell(&self.good, row)?;

        let mut builder = TrainingRecord::builder(exercise, reps, effort, weight_used, good);
        if let Some(id) = cell(&self.id, row).and_then(parse_integer) {
            builder = builder.id(id);
        }
        if let Some(ts) = cell(&self.timestamp, row) {
            builder = builder.timestamp(ts);
        }
        Some(builder.build())
    }
}

fn validate_batch(batch: &RecordBatch, out: &mut ValidatedRecords) -> Result<()> {
    let text = TextColumns::new(batch)?;

    for row in 0..batch.num_rows() {
        match text.record(row) {
            Some(record) => out.records.push(record),
            None => {
                debug!(row, "dropping row with missing required value");
                out.dropped_rows += 1;
            }
        }
    }
    Ok(())
}

fn text_column(batch: &RecordBatch, name: &str) -> Result<StringArray> {
    let column = batch.column_by_name(name).ok_or_else(|| Error::Schema {
        column: name.to_string(),
    })?;
    let utf8 = cast(column.as_ref(), &DataType::Utf8)?;
    Ok(utf8.as_string::<i32>().clone())
}

/// Non-null, non-blank cell text.
fn cell(array: &StringArray, row: usize) -> Option<&str> {
    if array.is_null(row) {
        return None;
    }
    let value = array.value(row).trim();
    (!value.is_empty()).then_some(value)
}

/// Integer parse that also accepts whole floats such as `3.0`.
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_precision_loss)]
fn parse_integer(value: &str) -> Option<i64> {
    if let Ok(n) = value.parse::<i64>() {
        return Some(n);
    }
    let float = value.parse::<f64>().ok()?;
    let in_range = float >= i64::MIN as f64 && float < i64::MAX as f64;
    (float.is_finite() && float.fract() == 0.0 && in_range).then_some(float as i64)
}

fn parse_weight(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|w| w.is_finite())
}
