//! Plot-ready series assembly
//!
//! A [`Series`] is the raw ordered points of one group. No trendline or
//! smoothing is ever computed here.

use serde::{Deserialize, Serialize};

use crate::partition::GroupKey;
use crate::record::Outcome;
use crate::sequence::Sequenced;

/// Color signal of a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointColor {
    /// Good attempt.
    Normal,
    /// Flagged attempt.
    Flagged,
}

impl From<Outcome> for PointColor {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Normal => Self::Normal,
            Outcome::Flagged => Self::Flagged,
        }
    }
}

/// Display metadata attached to a point. Not used in any computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointMetadata {
    /// Attempt id
    pub id: Option<i64>,
    /// Repetitions
    pub reps: i64,
    /// Effort rating
    pub effort: i64,
    /// Raw `Good` flag
    pub good: String,
    /// Raw timestamp
    pub timestamp: Option<String>,
}

/// One plotted datum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// 1-based sequence index
    pub x: usize,
    /// Weight used (kg)
    pub y: f64,
    /// Pass/fail color signal
    pub color: PointColor,
    /// Display metadata
    pub metadata: PointMetadata,
}

impl SeriesPoint {
    /// Whether the attempt was good.
    #[must_use]
    pub fn is_good(&self) -> bool {
        self.color == PointColor::Normal
    }
}

impl From<&Sequenced<'_>> for SeriesPoint {
    fn from(item: &Sequenced<'_>) -> Self {
        let record = item.record();
        Self {
            x: item.index(),
            y: record.weight_used(),
            color: record.outcome().into(),
            metadata: PointMetadata {
                id: record.id(),
                reps: record.reps(),
                effort: record.effort(),
                good: record.good().to_string(),
                timestamp: record.timestamp().map(ToString::to_string),
            },
        }
    }
}

/// Ordered points of one non-empty group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    key: GroupKey,
    points: Vec<SeriesPoint>,
}

impl Series {
    /// Assemble a series from a sequenced group.
    ///
    /// Returns `None` for an empty group.
    #[must_use]
    pub fn assemble(key: GroupKey, sequenced: &[Sequenced<'_>]) -> Option<Self> {
        if sequenced.is_empty() {
            return None;
        }
        Some(Self {
            key,
            points: sequenced.iter().map(SeriesPoint::from).collect(),
        })
    }

    /// Group this series belongs to.
    #[must_use]
    pub const fn key(&self) -> &GroupKey {
        &self.key
    }

    /// Points in sequence order.
    #[must_use]
    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`: empty groups never become a series.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of flagged points.
    #[must_use]
    pub fn flagged_count(&self) -> usize {
        self.points.iter().filter(|p| !p.is_good()).count()
    }
}

/// Every non-empty group's series, in presentation order.
///
/// This is the ordered mapping `(exercise, rep_bucket, effort_bucket) ->
/// points` handed to the rendering layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssembledSeries {
    series: Vec<Series>,
    dropped_rows: usize,
}

impl AssembledSeries {
    /// Wrap series already in presentation order.
    #[must_use]
    pub const fn new(series: Vec<Series>, dropped_rows: usize) -> Self {
        Self {
            series,
            dropped_rows,
        }
    }

    /// All series in order.
    #[must_use]
    pub fn series(&self) -> &[Series] {
        &self.series
    }

    /// Points of one group, or `None` if the group is empty.
    #[must_use]
    pub fn get(&self, key: &GroupKey) -> Option<&[SeriesPoint]> {
        self.series
            .iter()
            .find(|s| s.key() == key)
            .map(Series::points)
    }

    /// Group keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &GroupKey> {
        self.series.iter().map(Series::key)
    }

    /// Series of one exercise, in bucket order.
    pub fn for_exercise<'s>(&'s self, exercise: &'s str) -> impl Iterator<Item = &'s Series> {
        self.series
            .iter()
            .filter(move |s| s.key().exercise() == exercise)
    }

    /// Rows dropped during validation.
    #[must_use]
    pub const fn dropped_rows(&self) -> usize {
        self.dropped_rows
    }

    /// Number of series.
    #[must_use]
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Whether no group had any record.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Total number of points across all series.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.series.iter().map(Series::len).sum()
    }
}

impl IntoIterator for AssembledSeries {
    type Item = Series;
    type IntoIter = std::vec::IntoIter<Series>;

    fn into_iter(self) -> Self::IntoIter {
        self.series.into_iter()
    }
}

impl<'s> IntoIterator for &'s AssembledSeries {
    type Item = &'s Series;
    type IntoIter = std::slice::Iter<'s, Series>;

    fn into_iter(self) -> Self::IntoIter {
        self.series.iter()
    }
}
