//! Categorization and series assembly engine
//!
//! Validator → classifier → partitioner → sequencer → assembler, as one pure
//! pass over an immutable record set. The engine keeps configuration only.

use arrow::record_batch::RecordBatch;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use crate::chart::LabelStyle;
use crate::dashboard::Dashboard;
use crate::partition::{ExerciseOrder, Partition};
use crate::record::TrainingRecord;
use crate::sequence::{sequence, SortPolicy};
use crate::series::{AssembledSeries, Series};
use crate::validate::validate;
use crate::{Error, Result};

/// Default dashboard title.
pub const DEFAULT_TITLE: &str = "Training Dashboard";

/// Engine configuration.
///
/// Serializable so a front end can keep it next to its own settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Sort key for sequencing groups
    pub sort_policy: SortPolicy,
    /// Hover text richness
    pub label_style: LabelStyle,
    /// Exercise (tab) order
    pub exercise_order: ExerciseOrder,
    /// Tab labels by exercise code
    pub display_names: BTreeMap<String, String>,
    /// Dashboard title
    pub title: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let display_names = [("S", "SQUAT"), ("B", "BENCH"), ("D", "DEADLIFT")]
            .into_iter()
            .map(|(code, name)| (code.to_string(), name.to_string()))
            .collect();
        Self {
            sort_policy: SortPolicy::default(),
            label_style: LabelStyle::default(),
            exercise_order: ExerciseOrder::default(),
            display_names,
            title: DEFAULT_TITLE.to_string(),
        }
    }
}

impl EngineConfig {
    /// Tab label for an exercise; falls back to the code itself.
    #[must_use]
    pub fn display_name<'s>(&'s self, exercise: &'s str) -> &'s str {
        self.display_names
            .get(exercise)
            .map_or(exercise, String::as_str)
    }
}

/// Series assembly engine
#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    /// Create a new engine builder
    #[must_use]
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// Create an engine from a full configuration
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the exercise order is empty
    pub fn with_config(config: EngineConfig) -> Result<Self> {
        if config.exercise_order.is_empty() {
            return Err(Error::InvalidInput(
                "exercise order must list at least one exercise".to_string(),
            ));
        }
        Ok(Self { config })
    }

    /// Engine configuration
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Validate raw batches and assemble every non-empty group.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Schema`] if a required column is missing. No series is
    /// produced in that case.
    pub fn assemble(&self, batches: &[RecordBatch]) -> Result<AssembledSeries> {
        let validated = validate(batches)?;
        let series = self.assemble_validated(validated.records());
        Ok(AssembledSeries::new(series, validated.dropped_rows()))
    }

    /// Assemble already-validated records.
    #[must_use]
    pub fn assemble_records(&self, records: &[TrainingRecord]) -> AssembledSeries {
        AssembledSeries::new(self.assemble_validated(records), 0)
    }

    fn assemble_validated(&self, records: &[TrainingRecord]) -> Vec<Series> {
        let partition = Partition::new(records);
        let series: Vec<Series> = self
            .config
            .exercise_order
            .codes()
            .iter()
            .flat_map(|code| self.assemble_exercise(&partition, code))
            .collect();

        debug!(
            records = partition.record_count(),
            groups = partition.group_count(),
            series = series.len(),
            sort_policy = %self.config.sort_policy,
            "assembled training series"
        );
        series
    }

    /// Assemble one exercise tab per rayon task.
    ///
    /// Output is identical to [`Engine::assemble`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Schema`] if a required column is missing.
    #[cfg(feature = "rayon")]
    pub fn assemble_parallel(&self, batches: &[RecordBatch]) -> Result<AssembledSeries> {
        use rayon::prelude::*;

        let validated = validate(batches)?;
        let partition = Partition::new(validated.records());
        let per_exercise: Vec<Vec<Series>> = self
            .config
            .exercise_order
            .codes()
            .par_iter()
            .map(|code| self.assemble_exercise(&partition, code))
            .collect();

        Ok(AssembledSeries::new(
            per_exercise.into_iter().flatten().collect(),
            validated.dropped_rows(),
        ))
    }

    /// Validate, assemble and lay out the dashboard in one call.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Schema`] if a required column is missing.
    pub fn dashboard(&self, batches: &[RecordBatch]) -> Result<Dashboard> {
        let assembled = self.assemble(batches)?;
        Ok(Dashboard::build(&assembled, &self.config))
    }

    fn assemble_exercise(&self, partition: &Partition<'_>, exercise: &str) -> Vec<Series> {
        partition
            .groups_for(exercise)
            .filter_map(|(key, members)| {
                Series::assemble(key, &sequence(members, self.config.sort_policy))
            })
            .collect()
    }
}

/// Engine builder
#[derive(Debug, Default)]
pub struct EngineBuilder {
    config: EngineConfig,
}

impl EngineBuilder {
    /// Set the sequencing sort policy
    #[must_use]
    pub const fn sort_policy(mut self, policy: SortPolicy) -> Self {
        self.config.sort_policy = policy;
        self
    }

    /// Set the hover label style
    #[must_use]
    pub const fn label_style(mut self, style: LabelStyle) -> Self {
        self.config.label_style = style;
        self
    }

    /// Set the exercise (tab) order
    #[must_use]
    pub fn exercise_order(mut self, order: ExerciseOrder) -> Self {
        self.config.exercise_order = order;
        self
    }

    /// Set the tab label of an exercise
    #[must_use]
    pub fn display_name(mut self, exercise: impl Into<String>, name: impl Into<String>) -> Self {
        self.config.display_names.insert(exercise.into(), name.into());
        self
    }

    /// Set the dashboard title
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.config.title = title.into();
        self
    }

    /// Build the engine
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the exercise order is empty
    pub fn build(self) -> Result<Engine> {
        Engine::with_config(self.config)
    }
}

/// Assemble `batches` with the given exercise order and sort policy.
///
/// Shorthand for building an [`Engine`] with default labels. The input is
/// validated before the configuration, so a schema problem is always reported
/// first.
///
/// # Errors
///
/// Returns [`Error::Schema`] if a required column is missing, otherwise
/// [`Error::InvalidInput`] if `exercise_order` is empty.
pub fn assemble(
    batches: &[RecordBatch],
    exercise_order: &ExerciseOrder,
    sort_policy: SortPolicy,
) -> Result<AssembledSeries> {
    let validated = validate(batches)?;
    let engine = Engine::builder()
        .exercise_order(exercise_order.clone())
        .sort_policy(sort_policy)
        .build()?;
    Ok(AssembledSeries::new(
        engine.assemble_validated(validated.records()),
        validated.dropped_rows(),
    ))
}
