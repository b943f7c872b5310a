//! Batch Pipeline
//!
//! Chạy extractor / labeler trên nhiều cookie song song (rayon).
//! Kết quả luôn giữ đúng thứ tự input.

use std::collections::BTreeMap;

use chrono::Utc;
use rayon::prelude::*;
use serde::Serialize;

use crate::logic::cookie::{Category, CookieRecord};
use crate::logic::dataset::{DatasetRecord, DatasetWriter};
use crate::logic::features::{FeatureExtractor, FeatureVector};
use crate::logic::labeler::{HeuristicLabeler, LabelDecision, LabelSource};
use crate::error::Result;

// ============================================================================
// BATCH EXTRACTION / LABELING
// ============================================================================

/// Feature vectors for every record, same order as input.
/// One clock read per batch so every record sees the same `now`.
pub fn extract_batch(extractor: &FeatureExtractor<'_>, records: &[CookieRecord]) -> Vec<FeatureVector> {
    let now = Utc::now().timestamp_millis() as f64 / 1000.0;
    extract_batch_at(extractor, records, now)
}

pub fn extract_batch_at(
    extractor: &FeatureExtractor<'_>,
    records: &[CookieRecord],
    now: f64,
) -> Vec<FeatureVector> {
    records
        .par_iter()
        .map(|record| extractor.extract_vector_at(record, now))
        .collect()
}

/// Heuristic decisions for every record, same order as input
pub fn label_batch(labeler: &HeuristicLabeler, records: &[CookieRecord]) -> Vec<LabelDecision> {
    records.par_iter().map(|record| labeler.decide(record)).collect()
}

/// Write heuristic labels back onto the records.
/// Existing ground-truth labels are kept unless `overwrite`.
/// Returns how many records got a new label.
pub fn apply_heuristic_labels(
    labeler: &HeuristicLabeler,
    records: &mut [CookieRecord],
    overwrite: bool,
) -> usize {
    let changed: usize = records
        .par_iter_mut()
        .map(|record| {
            if record.label.is_some() && !overwrite {
                return 0;
            }
            let label = labeler.label(record);
            record.set_label(label);
            1
        })
        .sum();

    log::info!("Labeled {} of {} cookies", changed, records.len());
    changed
}

// ============================================================================
// LABEL DISTRIBUTION
// ============================================================================

/// Per-category counts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LabelDistribution {
    counts: BTreeMap<Category, usize>,
    unlabeled: usize,
}

impl LabelDistribution {
    pub fn from_records(records: &[CookieRecord]) -> Self {
        let mut dist = Self::default();
        for record in records {
            match record.label {
                Some(label) => dist.add(label),
                None => dist.unlabeled += 1,
            }
        }
        dist
    }

    pub fn add(&mut self, category: Category) {
        *self.counts.entry(category).or_insert(0) += 1;
    }

    pub fn count(&self, category: Category) -> usize {
        self.counts.get(&category).copied().unwrap_or(0)
    }

    pub fn unlabeled(&self) -> usize {
        self.unlabeled
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Categories with at least one record, in `Category` order
    pub fn iter(&self) -> impl Iterator<Item = (Category, usize)> + '_ {
        self.counts.iter().map(|(c, n)| (*c, *n))
    }

    pub fn log_summary(&self) {
        log::info!("Label distribution:");
        for (category, count) in self.iter() {
            log::info!("  {}: {}", category, count);
        }
        if self.unlabeled > 0 {
            log::info!("  (unlabeled): {}", self.unlabeled);
        }
    }
}

// ============================================================================
// DATASET PREPARATION
// ============================================================================

/// Result of `prepare_dataset`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub written: usize,
    pub skipped_unlabeled: usize,
    pub distribution: LabelDistribution,
}

/// Extract features for every labeled record and append them to the dataset.
/// Records without a label are skipped.
pub fn prepare_dataset(
    extractor: &FeatureExtractor<'_>,
    records: &[CookieRecord],
    source: LabelSource,
    writer: &DatasetWriter,
) -> Result<DatasetSummary> {
    let labeled: Vec<&CookieRecord> = records.iter().filter(|r| r.label.is_some()).collect();
    let mut summary = DatasetSummary {
        skipped_unlabeled: records.len() - labeled.len(),
        ..Default::default()
    };

    if summary.skipped_unlabeled > 0 {
        log::warn!("Skipping {} cookies without a label", summary.skipped_unlabeled);
    }

    let now = Utc::now();
    let now_secs = now.timestamp_millis() as f64 / 1000.0;
    let timestamp = now.timestamp().max(0) as u64;

    let rows: Vec<DatasetRecord> = labeled
        .par_iter()
        .filter_map(|record| {
            let label = record.label?;
            let vector = extractor.extract_vector_at(record, now_secs);
            Some(DatasetRecord {
                timestamp,
                feature_version: vector.version,
                layout_hash: vector.layout_hash,
                features: vector.values.to_vec(),
                label,
                label_source: source,
                cookie_name: record.name.clone(),
                cookie_domain: record.domain.clone(),
            })
        })
        .collect();

    for row in &rows {
        writer.append(row)?;
        summary.distribution.add(row.label);
        summary.written += 1;
    }
    writer.flush()?;

    log::info!(
        "Wrote {} dataset records to {}",
        summary.written,
        writer.base_dir().display()
    );
    Ok(summary)
}
