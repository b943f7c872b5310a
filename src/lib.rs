//! CookieGuard ML - Cookie feature extraction & heuristic labeling
//!
//! Turns browser cookie records into fixed 16-slot feature vectors and
//! assigns heuristic categories for training the external classifier.

pub mod constants;
pub mod error;
pub mod logic;

pub use error::{PipelineError, Result};
pub use logic::cookie::{Category, CookieRecord};
pub use logic::features::{FeatureExtractor, FeatureVector};
pub use logic::labeler::{HeuristicLabeler, LabelDecision};
