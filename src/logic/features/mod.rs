//! Features Module - Feature Extraction Engine
//!
//! Tách logic trích xuất features khỏi labeler và pipeline.
//! Thứ tự features do `layout` quyết định, không nơi nào khác.

pub mod entropy;
pub mod extractor;
pub mod layout;
pub mod patterns;
pub mod vector;

#[cfg(test)]
mod tests;

// Re-export common types
pub use entropy::shannon_entropy;
pub use extractor::{feature_names, features_to_vector, FeatureExtractor};
pub use layout::{Feature, LayoutInfo, FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_VERSION};
pub use patterns::PatternLibrary;
pub use vector::{FeatureMap, FeatureVector};
