//! # training-charts: Lift Log Categorization and Series Assembly
//!
//! Turns a resistance-training log (one row per lift attempt) into plot-ready
//! progress series, grouped by exercise, rep range and effort rating.
//!
//! ## Pipeline
//!
//! ```text
//! TrainingLog (CSV/Parquet → Arrow)
//!   → validate     drop rows missing Exercise/Reps/Load/Weight_Used/Good
//!   → bucket       reps → "1 Rep" | "2-3 Reps" | "4+ Reps"
//!                  effort → "5-6" | "7" | "8-9"
//!   → partition    exercise → rep bucket → effort bucket
//!   → sequence     stable sort by id or timestamp, index 1..N
//!   → series       x = index, y = weight, color = normal | flagged
//!   → chart/dashboard  plain-data specs for any plotting front end
//! ```
//!
//! Every stage is a pure function of its input. Loading and caching are the
//! only stateful parts and live in [`loader`] and [`cache`].
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use training_charts::loader::TrainingLog;
//! use training_charts::sequence::SortPolicy;
//! use training_charts::Engine;
//!
//! let log = TrainingLog::load("data/training-data.csv")?;
//! let engine = Engine::builder()
//!     .sort_policy(SortPolicy::ByTimestamp)
//!     .build()?;
//!
//! for series in &engine.assemble(log.batches())? {
//!     println!("{}: {} points", series.key(), series.len());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod bucket;
pub mod cache;
pub mod chart;
pub mod dashboard;
pub mod engine;
pub mod error;
pub mod loader;
pub mod partition;
pub mod record;
pub mod sequence;
pub mod series;
pub mod validate;

pub use engine::{assemble, Engine, EngineBuilder, EngineConfig};
pub use error::{Error, Result};
