//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! Env overrides are resolved in `logic::config`.

/// Raw cookies collected by the external scraper (JSON array)
pub const DEFAULT_RAW_PATH: &str = "data/raw/cookies.json";

/// Cookies with a `label` field written back
pub const DEFAULT_LABELED_PATH: &str = "data/processed/labeled_cookies.json";

/// Sub-directory (under the local data dir) for training JSONL files
pub const DATASET_DIR_NAME: &str = "dataset";

/// Default number of mock cookies
pub const DEFAULT_MOCK_COUNT: usize = 1000;

/// Default RNG seed for mock data
pub const DEFAULT_MOCK_SEED: u64 = 42;

/// Dataset file rotation size
pub const DEFAULT_MAX_DATASET_FILE_SIZE: u64 = 10 * 1024 * 1024; // 10 MB

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "cookieguard";

// ============================================
// Env var names
// ============================================

pub const ENV_RAW_PATH: &str = "COOKIEGUARD_RAW_PATH";
pub const ENV_LABELED_PATH: &str = "COOKIEGUARD_LABELED_PATH";
pub const ENV_DATASET_DIR: &str = "COOKIEGUARD_DATASET_DIR";
pub const ENV_MOCK_COUNT: &str = "COOKIEGUARD_MOCK_COUNT";
pub const ENV_MOCK_SEED: &str = "COOKIEGUARD_MOCK_SEED";
pub const ENV_WORKERS: &str = "COOKIEGUARD_WORKERS";
pub const ENV_OVERWRITE_LABELS: &str = "COOKIEGUARD_OVERWRITE_LABELS";
