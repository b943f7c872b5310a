//! Logic Module - Pipeline Engines
//!
//! Chứa các engines xử lý: Feature Extractor, Heuristic Labeler, Dataset.
//!
//! ## Architecture
//! - `cookie/` - Cookie record model + JSON file I/O
//! - `features/` - Feature extraction (16-slot versioned vector)
//! - `labeler/` - Rule-cascade heuristic labeler
//! - `dataset/` - Training JSONL (rotation, export, matrix loading)
//! - `pipeline` - Parallel batch operations over the above

pub mod config;
pub mod cookie;
pub mod dataset;
pub mod features;
pub mod labeler;
pub mod mock;
pub mod pipeline;
