//! Deterministic ordering of one group
//!
//! Sorting is stable: members with equal keys keep their input order. Missing
//! ids or timestamps sort after every present value.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::record::TrainingRecord;
use crate::Error;

/// Sort key used to sequence a group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortPolicy {
    /// Ascending attempt id.
    #[default]
    ById,
    /// Ascending timestamp.
    ByTimestamp,
}

impl SortPolicy {
    /// Compare two records under this policy.
    #[must_use]
    pub fn compare(self, a: &TrainingRecord, b: &TrainingRecord) -> Ordering {
        match self {
            Self::ById => missing_last(a.id().as_ref(), b.id().as_ref()),
            Self::ByTimestamp => missing_last(a.timestamp(), b.timestamp()),
        }
    }
}

impl fmt::Display for SortPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ById => "by_id",
            Self::ByTimestamp => "by_timestamp",
        })
    }
}

impl FromStr for SortPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "id" | "by_id" => Ok(Self::ById),
            "timestamp" | "by_timestamp" => Ok(Self::ByTimestamp),
            other => Err(Error::InvalidInput(format!(
                "unknown sort policy `{other}` (expected `id` or `timestamp`)"
            ))),
        }
    }
}

fn missing_last<T: Ord>(a: Option<&T>, b: Option<&T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// A group member with its 1-based position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sequenced<'a> {
    index: usize,
    record: &'a TrainingRecord,
}

impl<'a> Sequenced<'a> {
    /// 1-based sequence index.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// The sequenced record.
    #[must_use]
    pub const fn record(&self) -> &'a TrainingRecord {
        self.record
    }
}

/// Order `members` by `policy` and number them `1..=N`.
///
/// ```rust
/// use training_charts::record::TrainingRecord;
/// use training_charts::sequence::{sequence, SortPolicy};
///
/// let a = TrainingRecord::builder("S", 1, 7, 100.0, "y").id(2).build();
/// let b = TrainingRecord::builder("S", 1, 7, 95.0, "y").id(1).build();
///
/// let seq = sequence(&[&a, &b], SortPolicy::ById);
/// assert_eq!(seq[0].record().id(), Some(1));
/// assert_eq!(seq[1].index(), 2);
/// ```
#[must_use]
pub fn sequence<'a>(members: &[&'a TrainingRecord], policy: SortPolicy) -> Vec<Sequenced<'a>> {
    let mut ordered = members.to_vec();
    // slice::sort_by is stable
    ordered.sort_by(|a, b| policy.compare(a, b));

    ordered
        .into_iter()
        .enumerate()
        .map(|(i, record)| Sequenced {
            index: i + 1,
            record,
        })
        .collect()
}
