//! Integration test: training log file → loader → engine → dashboard
//!
//! Covers both on-disk formats and the load cache.

use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use training_charts::bucket::{EffortBucket, RepBucket};
use training_charts::cache::CachedLoader;
use training_charts::loader::TrainingLog;
use training_charts::partition::GroupKey;
use training_charts::sequence::SortPolicy;
use training_charts::series::PointColor;
use training_charts::{Engine, Error};

const SAMPLE_CSV: &str = "\
ID,Exercise,Reps,Load,Weight_Used,Good,Timestamp,Notes
1,S,1,7,100,y,2024-01-01,opener
2,S,1,7,102,n,2024-01-02,
3,B,3,8,80,y,2024-01-02,
4,B,3,8,,y,2024-01-03,forgot to log weight
5,D,5,6,160,y,2024-01-04,
6,D,1,9,200,y,2024-01-05,
7,S,1,7,101,y,2024-01-01 18:00,evening
";

fn write_csv(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    let mut file = File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path
}

/// Create a typed Parquet training log
fn create_test_parquet<P: AsRef<Path>>(path: P) -> Result<(), Box<dyn std::error::Error>> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("ID", DataType::Int64, true),
        Field::new("Exercise", DataType::Utf8, true),
        Field::new("Reps", DataType::Int64, true),
        Field::new("Load", DataType::Int64, true),
        Field::new("Weight_Used", DataType::Float64, true),
        Field::new("Good", DataType::Utf8, true),
        Field::new("Timestamp", DataType::Utf8, true),
    ]));

    let batch = RecordBatch::try_new(
        Arc::clone(&schema),
        vec![
            Arc::new(Int64Array::from(vec![Some(2), Some(1), Some(3)])),
            Arc::new(StringArray::from(vec![Some("D"), Some("D"), Some("D")])),
            Arc::new(Int64Array::from(vec![Some(2), Some(3), Some(2)])),
            Arc::new(Int64Array::from(vec![Some(8), Some(9), None])),
            Arc::new(Float64Array::from(vec![Some(190.0), Some(185.0), Some(195.0)])),
            Arc::new(StringArray::from(vec![Some("y"), Some("n"), Some("y")])),
            Arc::new(StringArray::from(vec![
                Some("2024-02-02"),
                Some("2024-02-01"),
                Some("2024-02-03"),
            ])),
        ],
    )?;

    let file = File::create(path.as_ref())?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

#[test]
fn test_csv_log_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(dir.path(), "training-data.csv", SAMPLE_CSV);

    let log = TrainingLog::load(&path).expect("Failed to load CSV log");
    assert_eq!(log.num_rows(), 7);

    let engine = Engine::builder().build().unwrap();
    let assembled = engine.assemble(log.batches()).unwrap();
    assert_eq!(assembled.dropped_rows(), 1);
    assert_eq!(assembled.point_count(), 6);

    let squat = GroupKey::new("S", RepBucket::Single, EffortBucket::Hard);
    let points = assembled.get(&squat).unwrap();
    let ids: Vec<_> = points.iter().map(|p| p.metadata.id).collect();
    assert_eq!(ids, [Some(1), Some(2), Some(7)]);
    assert_eq!(points[1].color, PointColor::Flagged);

    // The row with no weight was the only 2-3 rep bench attempt at RPE 8
    let bench = GroupKey::new("B", RepBucket::TwoToThree, EffortBucket::NearMax);
    assert_eq!(assembled.get(&bench).map(<[_]>::len), Some(1));
}

#[test]
fn test_csv_log_by_timestamp() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(dir.path(), "training-data.csv", SAMPLE_CSV);
    let log = TrainingLog::load(&path).unwrap();

    let engine = Engine::builder()
        .sort_policy(SortPolicy::ByTimestamp)
        .build()
        .unwrap();
    let assembled = engine.assemble(log.batches()).unwrap();

    let squat = GroupKey::new("S", RepBucket::Single, EffortBucket::Hard);
    let ids: Vec<_> = assembled
        .get(&squat)
        .unwrap()
        .iter()
        .map(|p| p.metadata.id)
        .collect();
    assert_eq!(ids, [Some(1), Some(7), Some(2)]);
}

#[test]
fn test_csv_missing_column_is_schema_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(
        dir.path(),
        "training-data.csv",
        "ID,Exercise,Reps,Load,Good,Timestamp\n1,S,1,7,y,2024-01-01\n",
    );

    let log = TrainingLog::load(&path).unwrap();
    let err = Engine::default().dashboard(log.batches()).unwrap_err();
    assert!(matches!(err, Error::Schema { ref column } if column == "Weight_Used"));
}

#[test]
fn test_short_csv_row_is_dropped_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(
        dir.path(),
        "training-data.csv",
        "ID,Exercise,Reps,Load,Weight_Used,Good,Timestamp\n\
         1,S,1,7,100,y,2024-01-01\n\
         2,S,1,7\n",
    );

    let log = TrainingLog::load(&path).expect("short row must not fail the load");
    let assembled = Engine::default().assemble(log.batches()).unwrap();
    assert_eq!(assembled.dropped_rows(), 1);
    assert_eq!(assembled.point_count(), 1);
}

#[test]
fn test_header_only_csv_yields_empty_tabs() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(
        dir.path(),
        "training-data.csv",
        "ID,Exercise,Reps,Load,Weight_Used,Good,Timestamp\n",
    );

    let log = TrainingLog::load(&path).unwrap();
    let dashboard = Engine::default().dashboard(log.batches()).unwrap();
    assert_eq!(dashboard.tabs.len(), 3);
    assert!(dashboard.tabs.iter().all(|t| t.sections.is_empty()));
}

#[test]
fn test_parquet_log_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("training-data.parquet");
    create_test_parquet(&path).expect("Failed to create test Parquet file");

    let log = TrainingLog::load(&path).expect("Failed to load Parquet log");
    assert_eq!(log.num_rows(), 3);

    let assembled = Engine::default().assemble(log.batches()).unwrap();
    assert_eq!(assembled.dropped_rows(), 1);

    let key = GroupKey::new("D", RepBucket::TwoToThree, EffortBucket::NearMax);
    let points = assembled.get(&key).unwrap();
    let ids: Vec<_> = points.iter().map(|p| p.metadata.id).collect();
    assert_eq!(ids, [Some(1), Some(2)]);
    assert_eq!(points[0].metadata.reps, 3);
    assert_eq!(points[0].color, PointColor::Flagged);
}

#[test]
fn test_cached_loader_feeds_engine() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(dir.path(), "training-data.csv", SAMPLE_CSV);
    let loader = CachedLoader::in_memory();
    let engine = Engine::default();

    let first = engine.assemble(loader.load(&path).unwrap().batches()).unwrap();
    let second = engine.assemble(loader.load(&path).unwrap().batches()).unwrap();
    assert_eq!(first, second);
    assert_eq!(loader.cache().len(), 1);
}

#[test]
fn test_unsupported_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(dir.path(), "training-data.txt", SAMPLE_CSV);
    assert!(matches!(
        TrainingLog::load(&path),
        Err(Error::UnsupportedFormat(_))
    ));
}
