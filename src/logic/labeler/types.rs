//! Labeler Types
//!
//! Data structures only - no rule logic.

use serde::{Deserialize, Serialize};

use crate::logic::cookie::{Category, CookieRecord};

/// Outcome of the rule cascade for one cookie
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LabelDecision {
    pub category: Category,
    /// Rule that fired (`UNKNOWN_DEFAULT` if none)
    pub rule_id: &'static str,
    pub confidence: f32,
}

/// Where a training label came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelSource {
    GroundTruth,
    Heuristic,
}

/// Normalized view of a cookie the rules look at
#[derive(Debug, Clone, PartialEq)]
pub struct LabelInput {
    /// Lower-cased name
    pub name: String,
    /// Lower-cased domain
    pub domain: String,
    pub host_only: bool,
    pub is_session: bool,
}

impl LabelInput {
    pub fn from_record(record: &CookieRecord) -> Self {
        Self {
            name: record.name.to_lowercase(),
            domain: record.domain.to_lowercase(),
            host_only: record.host_only,
            is_session: record.is_session(),
        }
    }
}
