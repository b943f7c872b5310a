//! Feature Map & Feature Vector
//!
//! `FeatureMap` là kết quả trích xuất (key theo tên), `FeatureVector` là
//! dạng tuyến tính hóa theo `FEATURE_LAYOUT` để đưa vào model.

use std::collections::HashMap;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use super::layout::{
    layout_hash, validate_layout, Feature, LayoutMismatchError, FEATURE_COUNT, FEATURE_LAYOUT,
    FEATURE_VERSION,
};

// ============================================================================
// FEATURE MAP
// ============================================================================

/// Named feature values for one cookie
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureMap {
    values: HashMap<Feature, f64>,
}

impl FeatureMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, feature: Feature, value: f64) {
        self.values.insert(feature, value);
    }

    pub fn get(&self, feature: Feature) -> Option<f64> {
        self.values.get(&feature).copied()
    }

    pub fn get_by_name(&self, name: &str) -> Option<f64> {
        Feature::from_name(name).and_then(|f| self.get(f))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Present entries, in layout order
    pub fn iter(&self) -> impl Iterator<Item = (Feature, f64)> + '_ {
        FEATURE_LAYOUT
            .iter()
            .filter_map(move |&f| self.get(f).map(|v| (f, v)))
    }

    /// Linearize against the canonical layout; missing keys → 0
    pub fn to_vector(&self) -> FeatureVector {
        FeatureVector::from_values(FEATURE_LAYOUT.map(|f| self.get(f).unwrap_or(0.0) as f32))
    }
}

impl Serialize for FeatureMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (feature, value) in self.iter() {
            map.serialize_entry(feature.name(), &value)?;
        }
        map.end()
    }
}

// ============================================================================
// VERSIONED FEATURE VECTOR
// ============================================================================

/// Versioned Feature Vector with layout metadata
///
/// Width and order are the input contract of the exported classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Feature layout version
    pub version: u8,
    /// CRC32 hash of the feature layout (for mismatch detection)
    pub layout_hash: u32,
    /// Feature values in order defined by FEATURE_LAYOUT
    pub values: [f32; FEATURE_COUNT],
}

impl FeatureVector {
    /// Create a new zeroed feature vector with current version
    pub fn new() -> Self {
        Self::from_values([0.0; FEATURE_COUNT])
    }

    pub fn from_values(values: [f32; FEATURE_COUNT]) -> Self {
        Self {
            version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            values,
        }
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    pub fn get(&self, index: usize) -> Option<f32> {
        self.values.get(index).copied()
    }

    pub fn get_by_name(&self, name: &str) -> Option<f32> {
        super::layout::feature_index(name).and_then(|i| self.get(i))
    }

    /// Validate that this vector is compatible with current layout
    pub fn validate(&self) -> Result<(), LayoutMismatchError> {
        validate_layout(self.version, self.layout_hash)
    }

    pub fn is_compatible(&self) -> bool {
        self.validate().is_ok()
    }

    /// Convert to JSON-serializable format for logging
    pub fn to_log_entry(&self) -> serde_json::Value {
        serde_json::json!({
            "feature_version": self.version,
            "layout_hash": self.layout_hash,
            "values": self.values,
            "named_values": FEATURE_LAYOUT.iter()
                .zip(self.values.iter())
                .map(|(feature, value)| (feature.name().to_string(), *value))
                .collect::<std::collections::HashMap<_, _>>(),
        })
    }
}

impl Default for FeatureVector {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&FeatureMap> for FeatureVector {
    fn from(map: &FeatureMap) -> Self {
        map.to_vector()
    }
}
