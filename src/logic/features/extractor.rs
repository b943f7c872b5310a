//! Cookie Feature Extractor
//!
//! CookieRecord → FeatureMap → FeatureVector.
//! Never fails: missing or malformed fields degrade to defaults.

use chrono::Utc;

use super::entropy::shannon_entropy;
use super::layout::{Feature, FEATURE_COUNT};
use super::patterns::PatternLibrary;
use super::vector::{FeatureMap, FeatureVector};
use crate::logic::cookie::CookieRecord;

pub const SECONDS_PER_DAY: f64 = 60.0 * 60.0 * 24.0;

/// Ceiling for `expirationDays` (10 years)
pub const MAX_EXPIRATION_DAYS: f64 = 365.0 * 10.0;

/// Feature extractor bound to a pattern library
#[derive(Debug, Clone, Copy)]
pub struct FeatureExtractor<'a> {
    patterns: &'a PatternLibrary,
}

impl Default for FeatureExtractor<'static> {
    fn default() -> Self {
        Self::new(PatternLibrary::shared())
    }
}

impl<'a> FeatureExtractor<'a> {
    pub fn new(patterns: &'a PatternLibrary) -> Self {
        Self { patterns }
    }

    /// Extract features using the wall clock for `expirationDays`
    pub fn extract_features(&self, record: &CookieRecord) -> FeatureMap {
        self.extract_features_at(record, now_secs())
    }

    /// Extract features relative to `now` (epoch seconds)
    pub fn extract_features_at(&self, record: &CookieRecord, now: f64) -> FeatureMap {
        let name = record.name.as_str();
        let value = record.value.as_str();
        let mut map = FeatureMap::new();

        map.insert(Feature::NameLength, name.chars().count() as f64);
        map.insert(Feature::ValueLength, value.chars().count() as f64);
        map.insert(Feature::HasSecure, flag(record.secure));
        map.insert(Feature::HasHttpOnly, flag(record.http_only));
        map.insert(Feature::SameSite, encode_same_site(record.same_site.as_deref()));

        map.insert(Feature::IsSession, flag(record.is_session()));
        map.insert(Feature::ExpirationDays, expiration_days(record, now));

        map.insert(Feature::IsFirstParty, flag(record.host_only));
        map.insert(Feature::DomainDepth, record.domain.matches('.').count() as f64);

        map.insert(Feature::NameEntropy, shannon_entropy(name));
        map.insert(Feature::ValueEntropy, shannon_entropy(value));

        map.insert(Feature::MatchesTrackingPattern, flag(self.patterns.matches_tracking_pattern(name)));
        map.insert(Feature::HasPii, flag(self.patterns.has_pii(value)));
        map.insert(Feature::HasUuid, flag(self.patterns.has_uuid(value)));
        map.insert(Feature::HasNumericOnly, flag(self.patterns.is_numeric_only(value)));
        map.insert(Feature::HasBase64, flag(self.patterns.is_base64(value)));

        debug_assert_eq!(map.len(), FEATURE_COUNT);
        map
    }

    /// Extract and linearize in one step
    pub fn extract_vector(&self, record: &CookieRecord) -> FeatureVector {
        self.extract_features(record).to_vector()
    }

    pub fn extract_vector_at(&self, record: &CookieRecord, now: f64) -> FeatureVector {
        self.extract_features_at(record, now).to_vector()
    }
}

/// Linearize a map into the canonical 16-slot order
pub fn features_to_vector(map: &FeatureMap) -> FeatureVector {
    map.to_vector()
}

/// Ordered feature names (same schema as `features_to_vector`)
pub fn feature_names() -> [&'static str; FEATURE_COUNT] {
    super::layout::feature_names()
}

// ============================================================================
// ENCODERS
// ============================================================================

fn flag(b: bool) -> f64 {
    if b { 1.0 } else { 0.0 }
}

fn now_secs() -> f64 {
    Utc::now().timestamp_millis() as f64 / 1000.0
}

/// strict→2, lax→1, none/no_restriction/unset/other→0
pub fn encode_same_site(same_site: Option<&str>) -> f64 {
    match same_site.map(str::to_lowercase).as_deref() {
        Some("strict") => 2.0,
        Some("lax") => 1.0,
        _ => 0.0,
    }
}

/// Days until expiry clamped to [0, 3650]; 0.0 when absent or unparsable
pub fn expiration_days(record: &CookieRecord, now: f64) -> f64 {
    let expires = match record.expiration_date.as_ref() {
        Some(e) if e.is_set() => e,
        _ => return 0.0,
    };

    let Some(epoch) = expires.epoch_seconds() else {
        log::trace!("Unparsable expirationDate on cookie {:?}", record.name);
        return 0.0;
    };

    let days = (epoch - now) / SECONDS_PER_DAY;
    if days.is_nan() {
        return 0.0;
    }
    days.clamp(0.0, MAX_EXPIRATION_DAYS)
}
