//! Three-level grouping: exercise → rep bucket → effort bucket
//!
//! The partition borrows validated records and never copies or mutates them.
//! Within one exercise, groups are held in a `BTreeMap` keyed by bucket pair,
//! so iteration follows the bucket enums' canonical order.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::bucket::{EffortBucket, RepBucket};
use crate::record::TrainingRecord;

/// Identity of one group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupKey {
    exercise: String,
    rep_bucket: RepBucket,
    effort_bucket: EffortBucket,
}

impl GroupKey {
    /// Create a group key.
    #[must_use]
    pub fn new(exercise: impl Into<String>, rep_bucket: RepBucket, effort_bucket: EffortBucket) -> Self {
        Self {
            exercise: exercise.into(),
            rep_bucket,
            effort_bucket,
        }
    }

    /// Key of the group `record` belongs to.
    #[must_use]
    pub fn of(record: &TrainingRecord) -> Self {
        Self::new(record.exercise(), record.rep_bucket(), record.effort_bucket())
    }

    /// Exercise code.
    #[must_use]
    pub fn exercise(&self) -> &str {
        &self.exercise
    }

    /// Rep bucket.
    #[must_use]
    pub const fn rep_bucket(&self) -> RepBucket {
        self.rep_bucket
    }

    /// Effort bucket.
    #[must_use]
    pub const fn effort_bucket(&self) -> EffortBucket {
        self.effort_bucket
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {} / {}", self.exercise, self.rep_bucket, self.effort_bucket)
    }
}

/// Caller-defined exercise order (one tab per exercise).
///
/// Duplicate codes are dropped after their first occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct ExerciseOrder {
    codes: Vec<String>,
}

impl ExerciseOrder {
    /// Build an order from exercise codes.
    ///
    /// Codes are trimmed; blank codes and repeats are skipped.
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for code in codes {
            let code = code.into().trim().to_string();
            if !code.is_empty() && !unique.contains(&code) {
                unique.push(code);
            }
        }
        Self { codes: unique }
    }

    /// Exercise codes in order.
    #[must_use]
    pub fn codes(&self) -> &[String] {
        &self.codes
    }

    /// Whether `exercise` is part of the order.
    #[must_use]
    pub fn contains(&self, exercise: &str) -> bool {
        self.codes.iter().any(|c| c == exercise)
    }

    /// Number of exercises.
    #[must_use]
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Whether the order lists no exercise.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

/// Squat, bench, deadlift.
impl Default for ExerciseOrder {
    fn default() -> Self {
        Self::new(["S", "B", "D"])
    }
}

impl From<Vec<String>> for ExerciseOrder {
    fn from(codes: Vec<String>) -> Self {
        Self::new(codes)
    }
}

impl From<ExerciseOrder> for Vec<String> {
    fn from(order: ExerciseOrder) -> Self {
        order.codes
    }
}

type BucketGroups<'a> = BTreeMap<(RepBucket, EffortBucket), Vec<&'a TrainingRecord>>;

/// Records grouped by (exercise, rep bucket, effort bucket).
///
/// Member lists keep input order; ordering them is the sequencer's job.
#[derive(Debug, Default)]
pub struct Partition<'a> {
    exercises: FxHashMap<&'a str, BucketGroups<'a>>,
    records: usize,
}

impl<'a> Partition<'a> {
    /// Partition validated records.
    #[must_use]
    pub fn new(records: &'a [TrainingRecord]) -> Self {
        let mut exercises: FxHashMap<&'a str, BucketGroups<'a>> = FxHashMap::default();
        for record in records {
            exercises
                .entry(record.exercise())
                .or_default()
                .entry((record.rep_bucket(), record.effort_bucket()))
                .or_default()
                .push(record);
        }
        Self {
            exercises,
            records: records.len(),
        }
    }

    /// Total number of partitioned records.
    #[must_use]
    pub const fn record_count(&self) -> usize {
        self.records
    }

    /// Number of non-empty groups.
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.exercises.values().map(BTreeMap::len).sum()
    }

    /// Whether the partition holds no records.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.records == 0
    }

    /// Members of one group, or `None` if the group is empty.
    #[must_use]
    pub fn get(&self, key: &GroupKey) -> Option<&[&'a TrainingRecord]> {
        self.exercises
            .get(key.exercise())
            .and_then(|groups| groups.get(&(key.rep_bucket(), key.effort_bucket())))
            .map(Vec::as_slice)
    }

    /// Exercise codes present in the data, sorted.
    #[must_use]
    pub fn exercises(&self) -> Vec<&'a str> {
        let mut codes: Vec<&'a str> = self.exercises.keys().copied().collect();
        codes.sort_unstable();
        codes
    }

    /// Groups of one exercise in canonical bucket order.
    pub fn groups_for<'s>(
        &'s self,
        exercise: &str,
    ) -> impl Iterator<Item = (GroupKey, &'s [&'a TrainingRecord])> + 's {
        let code = exercise.to_string();
        self.exercises
            .get(exercise)
            .into_iter()
            .flat_map(BTreeMap::iter)
            .map(move |(&(rep, effort), members)| {
                (GroupKey::new(code.clone(), rep, effort), members.as_slice())
            })
    }

    /// Groups of the listed exercises, in presentation order.
    ///
    /// Exercises absent from `order` are skipped.
    pub fn iter_ordered<'s>(
        &'s self,
        order: &'s ExerciseOrder,
    ) -> impl Iterator<Item = (GroupKey, &'s [&'a TrainingRecord])> + 's {
        order
            .codes()
            .iter()
            .flat_map(move |code| self.groups_for(code))
    }

    /// Every group, exercises sorted by code.
    pub fn iter(&self) -> impl Iterator<Item = (GroupKey, &[&'a TrainingRecord])> + '_ {
        self.exercises()
            .into_iter()
            .flat_map(move |code| self.groups_for(code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(id: i64, exercise: &str, reps: i64, effort: i64) -> TrainingRecord {
        TrainingRecord::builder(exercise, reps, effort, 100.0, "y")
            .id(id)
            .build()
    }

    #[test]
    fn test_exercise_order_dedup() {
        let order = ExerciseOrder::new(["D", "S", "D", "B", "S"]);
        assert_eq!(order.codes(), ["D", "S", "B"]);
        assert!(order.contains("B"));
        assert!(!order.contains("OHP"));
        assert_eq!(ExerciseOrder::default().codes(), ["S", "B", "D"]);
    }

    #[test]
    fn test_exercise_order_trims_codes() {
        let order = ExerciseOrder::new("S, B ,,D".split(','));
        assert_eq!(order.codes(), ["S", "B", "D"]);
        assert!(order.contains("B"));
        assert!(!order.contains(" B"));
    }

    #[test]
    fn test_partition_groups_by_three_keys() {
        let records = vec![
            rec(1, "S", 1, 7),
            rec(2, "S", 3, 7),
            rec(3, "S", 1, 7),
            rec(4, "B", 5, 9),
            rec(5, "S", 1, 8),
        ];
        let partition = Partition::new(&records);

        assert_eq!(partition.record_count(), 5);
        assert_eq!(partition.group_count(), 4);

        let key = GroupKey::new("S", RepBucket::Single, EffortBucket::Hard);
        let ids: Vec<_> = partition.get(&key).unwrap().iter().map(|r| r.id()).collect();
        assert_eq!(ids, [Some(1), Some(3)]);

        let empty = GroupKey::new("D", RepBucket::Single, EffortBucket::Hard);
        assert!(partition.get(&empty).is_none());
    }

    #[test]
    fn test_iter_ordered_is_canonical() {
        let records = vec![
            rec(1, "S", 5, 9),
            rec(2, "B", 1, 6),
            rec(3, "S", 1, 9),
            rec(4, "S", 1, 6),
            rec(5, "S", 2, 7),
            rec(6, "X", 1, 7),
        ];
        let partition = Partition::new(&records);
        let order = ExerciseOrder::new(["S", "B"]);

        let keys: Vec<_> = partition.iter_ordered(&order).map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec![
                GroupKey::new("S", RepBucket::Single, EffortBucket::Moderate),
                GroupKey::new("S", RepBucket::Single, EffortBucket::NearMax),
                GroupKey::new("S", RepBucket::TwoToThree, EffortBucket::Hard),
                GroupKey::new("S", RepBucket::FourPlus, EffortBucket::NearMax),
                GroupKey::new("B", RepBucket::Single, EffortBucket::Moderate),
            ]
        );

        // Unlisted exercises stay in the partition
        assert_eq!(partition.iter().count(), 6);
        assert_eq!(partition.exercises(), ["B", "S", "X"]);
    }

    #[test]
    fn test_empty_partition() {
        let partition = Partition::new(&[]);
        assert!(partition.is_empty());
        assert_eq!(partition.group_count(), 0);
        assert_eq!(partition.iter_ordered(&ExerciseOrder::default()).count(), 0);
    }

    #[test]
    fn test_group_key_display() {
        let key = GroupKey::new("D", RepBucket::FourPlus, EffortBucket::Moderate);
        assert_eq!(key.to_string(), "D / 4+ Reps / 5-6");
    }
}
