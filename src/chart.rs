//! Chart specifications for the rendering layer
//!
//! A [`ChartSpec`] is everything a line+marker plotting backend needs to draw
//! one group: titles, axis setup, trace styling and per-point text. Turning it
//! into pixels is the front end's concern.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::partition::GroupKey;
use crate::series::{PointColor, Series, SeriesPoint};
use crate::Error;

/// X-axis title.
pub const X_AXIS_TITLE: &str = "Sequence";
/// Y-axis title.
pub const Y_AXIS_TITLE: &str = "Weight Used (kg)";
/// Chart height in pixels.
pub const CHART_HEIGHT: u32 = 400;
/// Marker diameter in pixels.
pub const MARKER_SIZE: u32 = 8;
/// Point label font size.
pub const TEXT_FONT_SIZE: u32 = 10;
/// Line and normal-marker color.
pub const NORMAL_COLOR: &str = "blue";
/// Flagged-marker color.
pub const FLAGGED_COLOR: &str = "red";

/// How much metadata the hover text carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelStyle {
    /// Id, reps, RPE, weight and flag.
    #[default]
    Rich,
    /// Weight and timestamp only.
    Plain,
}

impl FromStr for LabelStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rich" => Ok(Self::Rich),
            "plain" => Ok(Self::Plain),
            other => Err(Error::InvalidInput(format!(
                "unknown label style `{other}` (expected `rich` or `plain`)"
            ))),
        }
    }
}

/// Axis configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisSpec {
    /// Axis title
    pub title: String,
    /// Integer tick spacing `(first_tick, step)`; `None` leaves ticks to the backend.
    pub integer_ticks: Option<(i64, i64)>,
}

/// Trace styling shared by every point of a chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceStyle {
    /// Connecting line color
    pub line_color: String,
    /// Marker diameter
    pub marker_size: u32,
    /// Where point labels sit relative to markers
    pub text_position: String,
    /// Point label font size
    pub text_font_size: u32,
    /// Whether to draw a legend
    pub show_legend: bool,
}

impl Default for TraceStyle {
    fn default() -> Self {
        Self {
            line_color: NORMAL_COLOR.to_string(),
            marker_size: MARKER_SIZE,
            text_position: "top right".to_string(),
            text_font_size: TEXT_FONT_SIZE,
            show_legend: false,
        }
    }
}

/// Per-point rendering hints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointAnnotation {
    /// Marker color
    pub marker_color: String,
    /// Always-visible label (the raw timestamp)
    pub text: String,
    /// Hover text, one field per line
    pub hover: Vec<String>,
}

/// Plain-data description of one chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    /// Group the chart shows
    pub key: GroupKey,
    /// Chart title, e.g. `RPE 8-9`
    pub title: String,
    /// X axis (sequence index)
    pub x_axis: AxisSpec,
    /// Y axis (weight)
    pub y_axis: AxisSpec,
    /// Chart height
    pub height: u32,
    /// Trace styling
    pub style: TraceStyle,
    /// Points in sequence order
    pub points: Vec<SeriesPoint>,
    /// Rendering hints, parallel to `points`
    pub annotations: Vec<PointAnnotation>,
}

impl ChartSpec {
    /// Build the chart for one series.
    #[must_use]
    pub fn from_series(series: &Series, labels: LabelStyle) -> Self {
        let key = series.key().clone();
        Self {
            title: format!("RPE {}", key.effort_bucket()),
            key,
            x_axis: AxisSpec {
                title: X_AXIS_TITLE.to_string(),
                integer_ticks: Some((1, 1)),
            },
            y_axis: AxisSpec {
                title: Y_AXIS_TITLE.to_string(),
                integer_ticks: None,
            },
            height: CHART_HEIGHT,
            style: TraceStyle::default(),
            points: series.points().to_vec(),
            annotations: series
                .points()
                .iter()
                .map(|p| annotate(p, labels))
                .collect(),
        }
    }
}

fn marker_color(color: PointColor) -> &'static str {
    match color {
        PointColor::Normal => NORMAL_COLOR,
        PointColor::Flagged => FLAGGED_COLOR,
    }
}

fn annotate(point: &SeriesPoint, labels: LabelStyle) -> PointAnnotation {
    let meta = &point.metadata;
    let timestamp = meta.timestamp.clone().unwrap_or_default();

    let weight = format!("Weight: {} kg", point.y);

    let hover = match labels {
        LabelStyle::Rich => vec![
            format!("ID: {}", meta.id.map(|id| id.to_string()).unwrap_or_default()),
            format!("Reps: {}", meta.reps),
            format!("RPE: {}", meta.effort),
            weight,
            format!("Good: {}", meta.good),
        ],
        LabelStyle::Plain => vec![weight, format!("Date: {timestamp}")],
    };

    PointAnnotation {
        marker_color: marker_color(point.color).to_string(),
        text: timestamp,
        hover,
    }
}
