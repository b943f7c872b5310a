//! Pipeline Configuration
//!
//! Đọc cấu hình từ environment, fallback về `constants`.

use std::env;
use std::path::PathBuf;

use crate::constants::*;

/// Runtime configuration for the labeling / dataset pipeline
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Raw cookie JSON array (scraper output)
    pub raw_path: PathBuf,

    /// Labeled cookie JSON array
    pub labeled_path: PathBuf,

    /// Directory for rotated training JSONL files
    pub dataset_dir: PathBuf,

    /// Mock cookie count
    pub mock_count: usize,

    /// Mock RNG seed
    pub mock_seed: u64,

    /// Rayon worker threads (0 = rayon default)
    pub workers: usize,

    /// Replace existing ground-truth labels with heuristic ones
    pub overwrite_labels: bool,

    /// Rotation size for dataset files
    pub max_dataset_file_size: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            raw_path: PathBuf::from(DEFAULT_RAW_PATH),
            labeled_path: PathBuf::from(DEFAULT_LABELED_PATH),
            dataset_dir: default_dataset_dir(),
            mock_count: DEFAULT_MOCK_COUNT,
            mock_seed: DEFAULT_MOCK_SEED,
            workers: 0,
            overwrite_labels: false,
            max_dataset_file_size: DEFAULT_MAX_DATASET_FILE_SIZE,
        }
    }
}

impl PipelineConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            raw_path: env::var(ENV_RAW_PATH)
                .map(PathBuf::from)
                .unwrap_or(defaults.raw_path),

            labeled_path: env::var(ENV_LABELED_PATH)
                .map(PathBuf::from)
                .unwrap_or(defaults.labeled_path),

            dataset_dir: env::var(ENV_DATASET_DIR)
                .map(PathBuf::from)
                .unwrap_or(defaults.dataset_dir),

            mock_count: env::var(ENV_MOCK_COUNT)
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.mock_count),

            mock_seed: env::var(ENV_MOCK_SEED)
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.mock_seed),

            workers: env::var(ENV_WORKERS)
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.workers),

            overwrite_labels: env::var(ENV_OVERWRITE_LABELS)
                .map(|s| parse_flag(&s))
                .unwrap_or(defaults.overwrite_labels),

            max_dataset_file_size: defaults.max_dataset_file_size,
        }
    }

    /// Configure the global rayon pool (only effective once per process)
    pub fn init_thread_pool(&self) {
        if self.workers == 0 {
            return;
        }

        if let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .build_global()
        {
            log::warn!("Rayon pool already initialized: {}", e);
        }
    }
}

/// Default dataset directory under the platform local-data dir
pub fn default_dataset_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
        .join(DATASET_DIR_NAME)
}

fn parse_flag(s: &str) -> bool {
    matches!(s.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
