//! Feature Layout - Centralized Feature Definition
//!
//! **CRITICAL: This file controls the feature schema**
//!
//! The exported classifier takes a `[N, 16]` float tensor in exactly this
//! order. Naming, map building and vectorization all read `FEATURE_LAYOUT`;
//! there is no second list.
//!
//! ## Rules (NEVER break these):
//! 1. Add feature → increment FEATURE_VERSION
//! 2. Change order → increment FEATURE_VERSION
//! 3. Remove feature → increment FEATURE_VERSION

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

// ============================================================================
// FEATURE VERSION
// ============================================================================

/// Current feature layout version
/// MUST be incremented when layout changes
pub const FEATURE_VERSION: u8 = 1;

/// Total number of features (width of the model input tensor)
pub const FEATURE_COUNT: usize = 16;

// ============================================================================
// FEATURES
// ============================================================================

/// One named feature of a cookie
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    NameLength,
    ValueLength,
    HasSecure,
    HasHttpOnly,
    SameSite,
    IsSession,
    ExpirationDays,
    IsFirstParty,
    DomainDepth,
    NameEntropy,
    ValueEntropy,
    MatchesTrackingPattern,
    HasPii,
    HasUuid,
    HasNumericOnly,
    HasBase64,
}

impl Feature {
    /// Canonical (wire) name
    pub fn name(&self) -> &'static str {
        match self {
            Feature::NameLength => "nameLength",
            Feature::ValueLength => "valueLength",
            Feature::HasSecure => "hasSecure",
            Feature::HasHttpOnly => "hasHttpOnly",
            Feature::SameSite => "sameSite",
            Feature::IsSession => "isSession",
            Feature::ExpirationDays => "expirationDays",
            Feature::IsFirstParty => "isFirstParty",
            Feature::DomainDepth => "domainDepth",
            Feature::NameEntropy => "nameEntropy",
            Feature::ValueEntropy => "valueEntropy",
            Feature::MatchesTrackingPattern => "matchesTrackingPattern",
            Feature::HasPii => "hasPII",
            Feature::HasUuid => "hasUUID",
            Feature::HasNumericOnly => "hasNumericOnly",
            Feature::HasBase64 => "hasBase64",
        }
    }

    pub fn from_name(name: &str) -> Option<Feature> {
        FEATURE_LAYOUT.iter().copied().find(|f| f.name() == name)
    }

    /// Slot in the vector
    pub fn index(&self) -> usize {
        // FEATURE_LAYOUT lists every variant, so the search always hits
        FEATURE_LAYOUT
            .iter()
            .position(|f| f == self)
            .unwrap_or(FEATURE_COUNT)
    }
}

// ============================================================================
// FEATURE LAYOUT (Authoritative source)
// ============================================================================

/// Features in exact order they appear in the vector
/// This is the SINGLE SOURCE OF TRUTH for feature layout
pub const FEATURE_LAYOUT: [Feature; FEATURE_COUNT] = [
    // === Shape (0-1) ===
    Feature::NameLength,             // 0: chars in name
    Feature::ValueLength,            // 1: chars in value

    // === Attributes (2-4) ===
    Feature::HasSecure,              // 2
    Feature::HasHttpOnly,            // 3
    Feature::SameSite,               // 4: strict=2, lax=1, else 0

    // === Lifetime (5-6) ===
    Feature::IsSession,              // 5
    Feature::ExpirationDays,         // 6: clamped [0, 3650]

    // === Scope (7-8) ===
    Feature::IsFirstParty,           // 7: hostOnly
    Feature::DomainDepth,            // 8: '.' count

    // === Entropy (9-10) ===
    Feature::NameEntropy,            // 9
    Feature::ValueEntropy,           // 10

    // === Pattern flags (11-15) ===
    Feature::MatchesTrackingPattern, // 11
    Feature::HasPii,                 // 12
    Feature::HasUuid,                // 13
    Feature::HasNumericOnly,         // 14
    Feature::HasBase64,              // 15
];

/// Ordered feature names, derived from `FEATURE_LAYOUT`
pub fn feature_names() -> [&'static str; FEATURE_COUNT] {
    FEATURE_LAYOUT.map(|f| f.name())
}

// ============================================================================
// LAYOUT HASH
// ============================================================================

/// Compute CRC32 hash of the feature layout
/// Used to detect layout mismatches at runtime
pub fn compute_layout_hash() -> u32 {
    let mut hasher = Hasher::new();

    hasher.update(&[FEATURE_VERSION]);

    for feature in FEATURE_LAYOUT {
        hasher.update(feature.name().as_bytes());
        hasher.update(&[0]); // Separator
    }

    hasher.finalize()
}

pub fn layout_hash() -> u32 {
    compute_layout_hash()
}

// ============================================================================
// LAYOUT INFO
// ============================================================================

/// Complete layout information for serialization/logging
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutInfo {
    pub version: u8,
    pub hash: u32,
    pub feature_count: usize,
    pub feature_names: Vec<String>,
}

impl LayoutInfo {
    pub fn current() -> Self {
        Self {
            version: FEATURE_VERSION,
            hash: layout_hash(),
            feature_count: FEATURE_COUNT,
            feature_names: feature_names().iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Default for LayoutInfo {
    fn default() -> Self {
        Self::current()
    }
}

// ============================================================================
// LAYOUT VALIDATION
// ============================================================================

/// Error when feature layout doesn't match expected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutMismatchError {
    pub expected_version: u8,
    pub expected_hash: u32,
    pub actual_version: u8,
    pub actual_hash: u32,
}

impl std::fmt::Display for LayoutMismatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Feature layout mismatch: expected v{} (hash: {:08x}), got v{} (hash: {:08x})",
            self.expected_version,
            self.expected_hash,
            self.actual_version,
            self.actual_hash
        )
    }
}

impl std::error::Error for LayoutMismatchError {}

/// Validate that incoming data matches current layout
pub fn validate_layout(incoming_version: u8, incoming_hash: u32) -> Result<(), LayoutMismatchError> {
    let current_hash = layout_hash();

    if incoming_version != FEATURE_VERSION || incoming_hash != current_hash {
        return Err(LayoutMismatchError {
            expected_version: FEATURE_VERSION,
            expected_hash: current_hash,
            actual_version: incoming_version,
            actual_hash: incoming_hash,
        });
    }

    Ok(())
}

pub fn is_layout_compatible(version: u8, hash: u32) -> bool {
    version == FEATURE_VERSION && hash == layout_hash()
}

// ============================================================================
// FEATURE INDEX LOOKUP
// ============================================================================

/// Get feature index by name
pub fn feature_index(name: &str) -> Option<usize> {
    Feature::from_name(name).map(|f| f.index())
}

/// Get feature name by index
pub fn feature_name(index: usize) -> Option<&'static str> {
    FEATURE_LAYOUT.get(index).map(|f| f.name())
}
