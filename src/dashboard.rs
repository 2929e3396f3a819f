//! Page model: tabs → rep-range sections → effort charts
//!
//! Tabs follow the exercise order and always appear, even with no data.
//! Sections and charts appear only for non-empty groups.

use serde::{Deserialize, Serialize};

use crate::bucket::RepBucket;
use crate::chart::ChartSpec;
use crate::engine::EngineConfig;
use crate::series::AssembledSeries;
use crate::Result;

/// One rep-range block inside a tab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Rep bucket shown in this section
    pub rep_bucket: RepBucket,
    /// Section heading (the bucket label)
    pub heading: String,
    /// Charts in effort-bucket order
    pub charts: Vec<ChartSpec>,
}

/// One exercise tab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tab {
    /// Exercise code
    pub exercise: String,
    /// Tab label, e.g. `SQUAT`
    pub label: String,
    /// Non-empty rep-range sections
    pub sections: Vec<Section>,
}

impl Tab {
    /// Number of charts across all sections.
    #[must_use]
    pub fn chart_count(&self) -> usize {
        self.sections.iter().map(|s| s.charts.len()).sum()
    }
}

/// Whole dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    /// Page title
    pub title: String,
    /// Tabs in exercise order
    pub tabs: Vec<Tab>,
    /// Rows dropped during validation
    pub dropped_rows: usize,
}

impl Dashboard {
    /// Lay out assembled series.
    #[must_use]
    pub fn build(assembled: &AssembledSeries, config: &EngineConfig) -> Self {
        let tabs = config
            .exercise_order
            .codes()
            .iter()
            .map(|code| build_tab(assembled, config, code))
            .collect();

        Self {
            title: config.title.clone(),
            tabs,
            dropped_rows: assembled.dropped_rows(),
        }
    }

    /// Tab of one exercise.
    #[must_use]
    pub fn tab(&self, exercise: &str) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.exercise == exercise)
    }

    /// Encode the dashboard as JSON for a plotting front end.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Json`] if encoding fails.
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}

fn build_tab(assembled: &AssembledSeries, config: &EngineConfig, exercise: &str) -> Tab {
    let mut sections: Vec<Section> = Vec::new();

    for series in assembled.for_exercise(exercise) {
        let rep_bucket = series.key().rep_bucket();
        let chart = ChartSpec::from_series(series, config.label_style);
        match sections.last_mut() {
            Some(section) if section.rep_bucket == rep_bucket => section.charts.push(chart),
            _ => sections.push(Section {
                rep_bucket,
                heading: rep_bucket.label().to_string(),
                charts: vec![chart],
            }),
        }
    }

    Tab {
        exercise: exercise.to_string(),
        label: config.display_name(exercise).to_string(),
        sections,
    }
}
