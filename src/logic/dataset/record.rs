use serde::{Deserialize, Serialize};

use crate::logic::cookie::Category;
use crate::logic::labeler::LabelSource;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DatasetRecord {
    pub timestamp: u64,

    // Feature contract
    pub feature_version: u8,
    pub layout_hash: u32,
    pub features: Vec<f32>,

    // Label
    pub label: Category,
    pub label_source: LabelSource,

    // Provenance (not model input)
    pub cookie_name: String,
    pub cookie_domain: String,
}
