//! Dataset Module - Training Data for the external classifier
//!
//! Records versioned feature vectors + labels for offline training.
//! Stores data in JSONL format with automatic rotation.

pub mod export;
pub mod record;
pub mod writer;

#[cfg(test)]
mod tests;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use ndarray::Array2;

pub use record::DatasetRecord;
pub use writer::{DatasetStats, DatasetWriter};

use crate::error::{PipelineError, Result};
use crate::logic::cookie::Category;
use crate::logic::features::layout::{validate_layout, FEATURE_COUNT};

/// N×16 feature matrix plus labels, ready for the trainer
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingMatrix {
    pub features: Array2<f32>,
    pub labels: Vec<Category>,
}

impl TrainingMatrix {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Labels as class indices (`Category::ALL` order)
    pub fn class_indices(&self) -> Vec<usize> {
        self.labels.iter().map(Category::index).collect()
    }
}

/// Read every record under `dir`. Unparsable lines (bad JSON or bad UTF-8)
/// are skipped with a warning
pub fn load_records(dir: &Path) -> Result<Vec<DatasetRecord>> {
    let mut records = Vec::new();

    for path in writer::list_jsonl_files(dir)? {
        let reader = BufReader::new(File::open(&path)?);

        for (line_no, line) in reader.split(b'\n').enumerate() {
            let line = line?;
            if line.iter().all(u8::is_ascii_whitespace) {
                continue;
            }

            match serde_json::from_slice::<DatasetRecord>(&line) {
                Ok(record) => records.push(record),
                Err(e) => log::warn!("Skipping {}:{}: {}", path.display(), line_no + 1, e),
            }
        }
    }

    Ok(records)
}

/// Load the dataset as a matrix. Fails on records from another feature layout
pub fn load_matrix(dir: &Path) -> Result<TrainingMatrix> {
    let records = load_records(dir)?;
    let mut flat = Vec::with_capacity(records.len() * FEATURE_COUNT);
    let mut labels = Vec::with_capacity(records.len());

    for record in &records {
        validate_layout(record.feature_version, record.layout_hash)?;

        if record.features.len() != FEATURE_COUNT {
            return Err(PipelineError::InvalidArgument(format!(
                "record for cookie {:?} has {} features, expected {}",
                record.cookie_name,
                record.features.len(),
                FEATURE_COUNT
            )));
        }

        flat.extend_from_slice(&record.features);
        labels.push(record.label);
    }

    let features = Array2::from_shape_vec((labels.len(), FEATURE_COUNT), flat)
        .map_err(|e| PipelineError::InvalidArgument(e.to_string()))?;

    log::info!("Loaded training matrix {}x{}", features.nrows(), features.ncols());
    Ok(TrainingMatrix { features, labels })
}
