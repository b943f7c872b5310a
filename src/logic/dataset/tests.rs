use super::export;
use super::record::DatasetRecord;
use super::writer::DatasetWriter;
use super::{load_matrix, load_records};
use crate::error::PipelineError;
use crate::logic::cookie::Category;
use crate::logic::features::layout::{layout_hash, FEATURE_COUNT, FEATURE_VERSION};
use crate::logic::labeler::LabelSource;
use std::fs;
use tempfile::tempdir;

fn record(label: Category, fill: f32) -> DatasetRecord {
    DatasetRecord {
        timestamp: 1234567890,
        feature_version: FEATURE_VERSION,
        layout_hash: layout_hash(),
        features: vec![fill; FEATURE_COUNT],
        label,
        label_source: LabelSource::Heuristic,
        cookie_name: "_ga".to_string(),
        cookie_domain: "google.com".to_string(),
    }
}

#[test]
fn test_dataset_append_and_read() {
    let dir = tempdir().unwrap();
    let writer = DatasetWriter::from_path(dir.path().to_path_buf()).unwrap();

    writer.append(&record(Category::Analytics, 0.1)).unwrap();
    writer.flush().unwrap();

    // Should be 1 file ending in jsonl
    let entries: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap())
        .collect();

    assert_eq!(entries.len(), 1);
    let path = entries[0].path();
    assert!(path.extension().unwrap() == "jsonl");

    let content = fs::read_to_string(&path).unwrap();
    let deserialized: DatasetRecord = serde_json::from_str(content.trim()).unwrap();

    assert_eq!(deserialized.label, Category::Analytics);
    assert_eq!(deserialized.label_source, LabelSource::Heuristic);
    assert_eq!(deserialized.features.len(), FEATURE_COUNT);
    assert!(content.contains("\"label\":\"analytics\""));
    assert!(content.contains("\"label_source\":\"heuristic\""));
}

#[test]
fn test_small_writes_stay_in_one_file() {
    let dir = tempdir().unwrap();
    let writer = DatasetWriter::from_path(dir.path().to_path_buf()).unwrap();

    writer.append(&record(Category::Unknown, 0.0)).unwrap();
    writer.append(&record(Category::Unknown, 0.0)).unwrap();

    let stats = writer.get_stats().unwrap();
    assert_eq!(stats.total_files, 1);
    assert!(stats.current_file.starts_with("dataset-"));
}

#[test]
fn test_rotation_creates_new_file() {
    let dir = tempdir().unwrap();
    // Any non-empty file is "full"
    let writer = DatasetWriter::with_max_file_size(dir.path().to_path_buf(), 1).unwrap();

    writer.append(&record(Category::Social, 0.0)).unwrap();
    writer.append(&record(Category::Social, 0.0)).unwrap();
    writer.append(&record(Category::Social, 0.0)).unwrap();

    assert_eq!(writer.get_stats().unwrap().total_files, 3);
    assert_eq!(load_records(dir.path()).unwrap().len(), 3);
}

#[test]
fn test_new_writer_continues_latest_file() {
    let dir = tempdir().unwrap();

    {
        let writer = DatasetWriter::from_path(dir.path().to_path_buf()).unwrap();
        writer.append(&record(Category::Essential, 1.0)).unwrap();
    }
    let writer = DatasetWriter::from_path(dir.path().to_path_buf()).unwrap();
    writer.append(&record(Category::Essential, 2.0)).unwrap();

    assert_eq!(writer.get_stats().unwrap().total_files, 1);
    assert_eq!(load_records(dir.path()).unwrap().len(), 2);
}

#[test]
fn test_load_matrix_shape_and_labels() {
    let dir = tempdir().unwrap();
    let writer = DatasetWriter::from_path(dir.path().to_path_buf()).unwrap();

    writer.append(&record(Category::Essential, 1.0)).unwrap();
    writer.append(&record(Category::Advertising, 2.0)).unwrap();
    writer.flush().unwrap();

    let matrix = load_matrix(dir.path()).unwrap();
    assert_eq!(matrix.features.dim(), (2, FEATURE_COUNT));
    assert_eq!(matrix.features[[1, 0]], 2.0);
    assert_eq!(matrix.labels, vec![Category::Essential, Category::Advertising]);
    assert_eq!(matrix.class_indices(), vec![0, 3]);
}

#[test]
fn test_load_matrix_rejects_other_layout() {
    let dir = tempdir().unwrap();
    let writer = DatasetWriter::from_path(dir.path().to_path_buf()).unwrap();

    let mut stale = record(Category::Unknown, 0.0);
    stale.feature_version = FEATURE_VERSION + 1;
    writer.append(&stale).unwrap();

    let err = load_matrix(dir.path()).unwrap_err();
    assert!(matches!(err, PipelineError::LayoutMismatch(_)));
}

#[test]
fn test_load_records_skips_garbage_lines() {
    let dir = tempdir().unwrap();
    let line = serde_json::to_string(&record(Category::Functional, 0.5)).unwrap();
    fs::write(
        dir.path().join("dataset-2024-01-01-000000.jsonl"),
        format!("{}\nnot json\n\n{}\n", line, line),
    )
    .unwrap();

    assert_eq!(load_records(dir.path()).unwrap().len(), 2);
}

#[test]
fn test_load_records_skips_non_utf8_lines() {
    let dir = tempdir().unwrap();
    let line = serde_json::to_string(&record(Category::Social, 0.5)).unwrap();

    let mut bytes = line.clone().into_bytes();
    bytes.extend_from_slice(b"\n\xFF\xFE\n");
    bytes.extend_from_slice(line.as_bytes());
    bytes.push(b'\n');
    fs::write(dir.path().join("dataset-2024-01-01-000000.jsonl"), bytes).unwrap();

    assert_eq!(load_records(dir.path()).unwrap().len(), 2);
    assert_eq!(load_matrix(dir.path()).unwrap().len(), 2);
}

#[test]
fn test_export_merges_files_in_order() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("dataset-2024-01-02-000000.jsonl"), "b\n").unwrap();
    fs::write(dir.path().join("dataset-2024-01-01-000000.jsonl"), "a").unwrap();

    let target = dir.path().join("out").join("merged.jsonl");
    let count = export::to_jsonl(dir.path(), &target).unwrap();

    assert_eq!(count, 2);
    assert_eq!(fs::read_to_string(&target).unwrap(), "a\nb\n");
}

#[test]
fn test_export_missing_dir() {
    let dir = tempdir().unwrap();
    let result = export::to_jsonl(&dir.path().join("missing"), &dir.path().join("x.jsonl"));
    assert!(result.is_err());
}
