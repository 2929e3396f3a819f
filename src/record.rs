//! Training Record - one lift attempt from the training log

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::bucket::{effort_bucket, rep_bucket, EffortBucket, RepBucket};

/// Raw `Good` value that marks an attempt as flagged.
pub const FLAGGED_MARKER: &str = "n";

/// Pass/fail outcome of an attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Acceptable form or successful lift.
    Normal,
    /// Failed or flagged lift.
    Flagged,
}

impl Outcome {
    /// Interpret the single-character `Good` column.
    ///
    /// Only `"n"` flags an attempt; any other value is normal.
    #[must_use]
    pub fn from_flag(raw: &str) -> Self {
        if raw.trim() == FLAGGED_MARKER {
            Self::Flagged
        } else {
            Self::Normal
        }
    }

    /// `true` unless the attempt is flagged.
    #[must_use]
    pub const fn is_good(self) -> bool {
        matches!(self, Self::Normal)
    }
}

/// Sortable part of a [`Timestamp`].
///
/// Variant order defines ordering across kinds: date-times first, then
/// sequence markers, then free text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimestampKey {
    /// Calendar date-time (dates are taken at midnight, offsets as UTC).
    DateTime(NaiveDateTime),
    /// Plain integer sequence marker.
    Marker(i64),
    /// Anything else, compared lexically.
    Text(String),
}

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

impl TimestampKey {
    fn parse(raw: &str) -> Self {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Self::DateTime(dt.naive_utc());
        }
        for format in NAIVE_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
                return Self::DateTime(dt);
            }
        }
        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Self::DateTime(date.and_time(NaiveTime::MIN));
        }
        raw.parse::<i64>()
            .map_or_else(|_| Self::Text(raw.to_string()), Self::Marker)
    }
}

/// When an attempt happened.
///
/// Keeps the raw text for display and a parsed key for ordering. Two
/// timestamps compare equal when their keys do, so `2024-01-01` and
/// `2024-01-01T00:00:00` are ties.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Timestamp {
    raw: String,
    key: TimestampKey,
}

impl Timestamp {
    /// Parse a raw timestamp value. Never fails; unparseable values sort as text.
    #[must_use]
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into().trim().to_string();
        let key = TimestampKey::parse(&raw);
        Self { raw, key }
    }

    /// Raw value as read from the log.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Parsed ordering key.
    #[must_use]
    pub const fn key(&self) -> &TimestampKey {
        &self.key
    }
}

impl From<String> for Timestamp {
    fn from(raw: String) -> Self {
        Self::parse(raw)
    }
}

impl From<&str> for Timestamp {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl From<Timestamp> for String {
    fn from(ts: Timestamp) -> Self {
        ts.raw
    }
}

impl PartialEq for Timestamp {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Timestamp {}

impl PartialOrd for Timestamp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Timestamp {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Training Record represents one validated lift attempt.
///
/// Every field the validator requires is non-optional here. `id` and
/// `timestamp` may be missing in the raw log without dropping the row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrainingRecord {
    id: Option<i64>,
    exercise: String,
    reps: i64,
    effort: i64,
    weight_used: f64,
    good: String,
    timestamp: Option<Timestamp>,
}

impl TrainingRecord {
    /// Create a record with no id and no timestamp.
    ///
    /// # Arguments
    ///
    /// * `exercise` - Exercise code (e.g. "S", "B", "D")
    /// * `reps` - Repetitions performed
    /// * `effort` - Effort rating (the raw `Load` column)
    /// * `weight_used` - Load lifted in kg
    /// * `good` - Raw `Good` flag (`"n"` = flagged)
    #[must_use]
    pub fn new(
        exercise: impl Into<String>,
        reps: i64,
        effort: i64,
        weight_used: f64,
        good: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            exercise: exercise.into(),
            reps,
            effort,
            weight_used,
            good: good.into(),
            timestamp: None,
        }
    }

    /// Create a builder for constructing a record with id and timestamp.
    #[must_use]
    pub fn builder(
        exercise: impl Into<String>,
        reps: i64,
        effort: i64,
        weight_used: f64,
        good: impl Into<String>,
    ) -> TrainingRecordBuilder {
        TrainingRecordBuilder {
            record: Self::new(exercise, reps, effort, weight_used, good),
        }
    }

    /// Get the attempt id, if the log had one.
    #[must_use]
    pub const fn id(&self) -> Option<i64> {
        self.id
    }

    /// Get the exercise code.
    #[must_use]
    pub fn exercise(&self) -> &str {
        &self.exercise
    }

    /// Get the repetition count.
    #[must_use]
    pub const fn reps(&self) -> i64 {
        self.reps
    }

    /// Get the effort rating.
    #[must_use]
    pub const fn effort(&self) -> i64 {
        self.effort
    }

    /// Get the weight lifted.
    #[must_use]
    pub const fn weight_used(&self) -> f64 {
        self.weight_used
    }

    /// Get the raw `Good` flag.
    #[must_use]
    pub fn good(&self) -> &str {
        &self.good
    }

    /// Pass/fail outcome derived from the `Good` flag.
    #[must_use]
    pub fn outcome(&self) -> Outcome {
        Outcome::from_flag(&self.good)
    }

    /// Get the timestamp, if the log had one.
    #[must_use]
    pub const fn timestamp(&self) -> Option<&Timestamp> {
        self.timestamp.as_ref()
    }

    /// Rep bucket of this attempt.
    #[must_use]
    pub const fn rep_bucket(&self) -> RepBucket {
        rep_bucket(self.reps)
    }

    /// Effort bucket of this attempt.
    #[must_use]
    pub const fn effort_bucket(&self) -> EffortBucket {
        effort_bucket(self.effort)
    }
}

/// Builder for `TrainingRecord`.
#[derive(Debug)]
pub struct TrainingRecordBuilder {
    record: TrainingRecord,
}

impl TrainingRecordBuilder {
    /// Set the attempt id.
    #[must_use]
    pub const fn id(mut self, id: i64) -> Self {
        self.record.id = Some(id);
        self
    }

    /// Set the timestamp.
    #[must_use]
    pub fn timestamp(mut self, timestamp: impl Into<Timestamp>) -> Self {
        self.record.timestamp = Some(timestamp.into());
        self
    }

    /// Build the `TrainingRecord`.
    #[must_use]
    pub fn build(self) -> TrainingRecord {
        self.record
    }
}
