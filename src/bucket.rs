//! Rep-range and effort-range classification
//!
//! Both classifiers are total over `i64`. Values outside the observed domain
//! land in whichever bucket the boundary chain reaches first: `reps <= 0` is
//! not `1`, so it falls into [`RepBucket::TwoToThree`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Repetition-count bucket.
///
/// Variant order is the canonical presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RepBucket {
    /// Exactly one repetition.
    #[serde(rename = "1 Rep")]
    Single,
    /// Two or three repetitions.
    #[serde(rename = "2-3 Reps")]
    TwoToThree,
    /// Four or more repetitions.
    #[serde(rename = "4+ Reps")]
    FourPlus,
}

impl RepBucket {
    /// All rep buckets in presentation order.
    pub const ALL: [Self; 3] = [Self::Single, Self::TwoToThree, Self::FourPlus];

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Single => "1 Rep",
            Self::TwoToThree => "2-3 Reps",
            Self::FourPlus => "4+ Reps",
        }
    }
}

impl fmt::Display for RepBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Effort-rating bucket.
///
/// Variant order is the canonical presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EffortBucket {
    /// Rating 6 or below.
    #[serde(rename = "5-6")]
    Moderate,
    /// Rating exactly 7.
    #[serde(rename = "7")]
    Hard,
    /// Rating 8 or above.
    #[serde(rename = "8-9")]
    NearMax,
}

impl EffortBucket {
    /// All effort buckets in presentation order.
    pub const ALL: [Self; 3] = [Self::Moderate, Self::Hard, Self::NearMax];

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Moderate => "5-6",
            Self::Hard => "7",
            Self::NearMax => "8-9",
        }
    }
}

impl fmt::Display for EffortBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a repetition count.
///
/// ```rust
/// use training_charts::bucket::{rep_bucket, RepBucket};
///
/// assert_eq!(rep_bucket(1), RepBucket::Single);
/// assert_eq!(rep_bucket(3).label(), "2-3 Reps");
/// assert_eq!(rep_bucket(12), RepBucket::FourPlus);
/// ```
#[must_use]
pub const fn rep_bucket(reps: i64) -> RepBucket {
    if reps == 1 {
        RepBucket::Single
    } else if reps <= 3 {
        RepBucket::TwoToThree
    } else {
        RepBucket::FourPlus
    }
}

/// Classify an effort rating (the raw `Load` column).
#[must_use]
pub const fn effort_bucket(effort: i64) -> EffortBucket {
    if effort <= 6 {
        EffortBucket::Moderate
    } else if effort == 7 {
        EffortBucket::Hard
    } else {
        EffortBucket::NearMax
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rep_bucket_boundaries() {
        assert_eq!(rep_bucket(1), RepBucket::Single);
        assert_eq!(rep_bucket(2), RepBucket::TwoToThree);
        assert_eq!(rep_bucket(3), RepBucket::TwoToThree);
        assert_eq!(rep_bucket(4), RepBucket::FourPlus);
        assert_eq!(rep_bucket(100), RepBucket::FourPlus);
    }

    #[test]
    fn test_rep_bucket_out_of_domain_fallback() {
        assert_eq!(rep_bucket(0), RepBucket::TwoToThree);
        assert_eq!(rep_bucket(-5), RepBucket::TwoToThree);
        assert_eq!(rep_bucket(i64::MIN), RepBucket::TwoToThree);
        assert_eq!(rep_bucket(i64::MAX), RepBucket::FourPlus);
    }

    #[test]
    fn test_effort_bucket_boundaries() {
        assert_eq!(effort_bucket(5), EffortBucket::Moderate);
        assert_eq!(effort_bucket(6), EffortBucket::Moderate);
        assert_eq!(effort_bucket(7), EffortBucket::Hard);
        assert_eq!(effort_bucket(8), EffortBucket::NearMax);
        assert_eq!(effort_bucket(9), EffortBucket::NearMax);
        assert_eq!(effort_bucket(10), EffortBucket::NearMax);
        assert_eq!(effort_bucket(0), EffortBucket::Moderate);
    }

    #[test]
    fn test_labels_and_order() {
        let rep_labels: Vec<_> = RepBucket::ALL.iter().map(|b| b.label()).collect();
        assert_eq!(rep_labels, ["1 Rep", "2-3 Reps", "4+ Reps"]);

        let effort_labels: Vec<_> = EffortBucket::ALL.iter().map(ToString::to_string).collect();
        assert_eq!(effort_labels, ["5-6", "7", "8-9"]);

        assert!(RepBucket::Single < RepBucket::TwoToThree);
        assert!(EffortBucket::Hard < EffortBucket::NearMax);
    }

    #[test]
    fn test_bucket_serializes_as_label() {
        let json = serde_json::to_string(&RepBucket::FourPlus).unwrap();
        assert_eq!(json, "\"4+ Reps\"");
        let back: EffortBucket = serde_json::from_str("\"8-9\"").unwrap();
        assert_eq!(back, EffortBucket::NearMax);
    }
}
