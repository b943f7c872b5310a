//! Pattern Library
//!
//! Compiled matchers for tracking-like cookie names, PII-like values and
//! value shapes (UUID, numeric, base64). Built once, shared read-only.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::Result;

// ============================================================================
// PATTERN SOURCES
// ============================================================================

/// Tracking-name patterns, searched case-insensitively in the cookie name
pub const TRACKING_PATTERNS: &[&str] = &[
    r"^(_ga|_gid|_gat)",                               // Google Analytics
    r"^(__utm[a-z])",                                  // legacy Analytics
    r"^(fr|datr|c_user)",                              // Facebook/Meta
    r"^(_fbp|_fbc)",                                   // Facebook pixel
    r"(uuid|guid|visitor|session|tracker|analytics)",  // generic identifiers
    r"^(id|uid|user_id|sess)",                         // generic id prefixes
    r"(doubleclick|adsense|adserver)",                 // ad networks
];

/// PII patterns, searched case-sensitively in the cookie value
pub const PII_PATTERNS: &[&str] = &[
    r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}\b", // email
    r"\b\d{3}[-.]?\d{3}[-.]?\d{4}\b",                       // phone
    r"\b\d{3}-\d{2}-\d{4}\b",                               // SSN
];

const UUID_PATTERN: &str = r"(?i)[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}";
const NUMERIC_ONLY_PATTERN: &str = r"^\d+$";
const BASE64_PATTERN: &str = r"^[A-Za-z0-9+/=]{20,}$";

static SHARED: Lazy<PatternLibrary> = Lazy::new(|| {
    PatternLibrary::compile().unwrap_or_else(|e| {
        log::error!("Pattern library failed to compile, matchers disabled: {}", e);
        PatternLibrary::empty()
    })
});

// ============================================================================
// PATTERN LIBRARY
// ============================================================================

/// Immutable set of compiled matchers
#[derive(Debug, Clone)]
pub struct PatternLibrary {
    tracking: Vec<Regex>,
    pii: Vec<Regex>,
    uuid: Option<Regex>,
    numeric_only: Option<Regex>,
    base64: Option<Regex>,
}

impl PatternLibrary {
    /// Compile all patterns
    pub fn compile() -> Result<Self> {
        let tracking = TRACKING_PATTERNS
            .iter()
            .map(|p| Regex::new(&format!("(?i){}", p)))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let pii = PII_PATTERNS
            .iter()
            .map(|p| Regex::new(p))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self {
            tracking,
            pii,
            uuid: Some(Regex::new(UUID_PATTERN)?),
            numeric_only: Some(Regex::new(NUMERIC_ONLY_PATTERN)?),
            base64: Some(Regex::new(BASE64_PATTERN)?),
        })
    }

    /// Library with no matchers; every check returns false
    pub fn empty() -> Self {
        Self {
            tracking: Vec::new(),
            pii: Vec::new(),
            uuid: None,
            numeric_only: None,
            base64: None,
        }
    }

    /// Process-wide instance, compiled on first use
    pub fn shared() -> &'static PatternLibrary {
        &SHARED
    }

    /// Any tracking pattern found anywhere in the name
    pub fn matches_tracking_pattern(&self, name: &str) -> bool {
        self.tracking.iter().any(|re| re.is_match(name))
    }

    /// Any PII pattern found anywhere in the value
    pub fn has_pii(&self, value: &str) -> bool {
        self.pii.iter().any(|re| re.is_match(value))
    }

    /// Value contains an 8-4-4-4-12 hex UUID
    pub fn has_uuid(&self, value: &str) -> bool {
        self.uuid.as_ref().map_or(false, |re| re.is_match(value))
    }

    /// Non-empty and digits only
    pub fn is_numeric_only(&self, value: &str) -> bool {
        self.numeric_only.as_ref().map_or(false, |re| re.is_match(value))
    }

    /// Base64 alphabet only, at least 20 chars
    pub fn is_base64(&self, value: &str) -> bool {
        self.base64.as_ref().map_or(false, |re| re.is_match(value))
    }
}

impl Default for PatternLibrary {
    fn default() -> Self {
        Self::shared().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lib() -> PatternLibrary {
        PatternLibrary::compile().unwrap()
    }

    #[test]
    fn test_all_patterns_compile() {
        let lib = lib();
        assert_eq!(lib.tracking.len(), TRACKING_PATTERNS.len());
        assert_eq!(lib.pii.len(), PII_PATTERNS.len());
    }

    #[test]
    fn test_tracking_prefixes() {
        let lib = lib();
        for name in ["_ga", "_gid", "_gat_UA-1", "__utma", "__utmz", "fr", "datr", "c_user", "_fbp", "_fbc", "id", "uid", "user_id", "sess_x"] {
            assert!(lib.matches_tracking_pattern(name), "{} should match", name);
        }
    }

    #[test]
    fn test_tracking_is_case_insensitive() {
        let lib = lib();
        assert!(lib.matches_tracking_pattern("_GA"));
        assert!(lib.matches_tracking_pattern("IDE"));
        assert!(lib.matches_tracking_pattern("my_Visitor_key"));
        assert!(lib.matches_tracking_pattern("xDoubleClickx"));
    }

    #[test]
    fn test_tracking_search_not_full_match() {
        let lib = lib();
        assert!(lib.matches_tracking_pattern("app_session_token"));
        assert!(lib.matches_tracking_pattern("site_analytics"));
        // prefix-only patterns don't match mid-string
        assert!(!lib.matches_tracking_pattern("x_ga"));
        assert!(!lib.matches_tracking_pattern("theme"));
        assert!(!lib.matches_tracking_pattern("lang"));
        assert!(!lib.matches_tracking_pattern(""));
    }

    #[test]
    fn test_pii() {
        let lib = lib();
        assert!(lib.has_pii("user=john.doe@example.com"));
        assert!(lib.has_pii("555-123-4567"));
        assert!(lib.has_pii("tel:5551234567"));
        assert!(lib.has_pii("123-45-6789"));
        assert!(!lib.has_pii("abc123def456"));
        assert!(!lib.has_pii(""));
    }

    #[test]
    fn test_value_shapes() {
        let lib = lib();
        assert!(lib.has_uuid("id=550E8400-e29b-41d4-a716-446655440000;"));
        assert!(!lib.has_uuid("550e8400e29b41d4a716446655440000"));

        assert!(lib.is_numeric_only("123456"));
        assert!(!lib.is_numeric_only(""));
        assert!(!lib.is_numeric_only("12a"));

        assert!(lib.is_base64("QUJDREVGR0hJSktMTU5PUFFSU1Q="));
        assert!(!lib.is_base64("QUJDREVGR0hJSktM")); // < 20
        assert!(!lib.is_base64("GA1.2.123456789.1234567890"));
    }

    #[test]
    fn test_empty_library_matches_nothing() {
        let lib = PatternLibrary::empty();
        assert!(!lib.matches_tracking_pattern("_ga"));
        assert!(!lib.has_pii("a@b.com"));
        assert!(!lib.is_numeric_only("1"));
    }

    #[test]
    fn test_shared_is_usable_across_threads() {
        let handles: Vec<_> = (0..4)
            .map(|_| std::thread::spawn(|| PatternLibrary::shared().matches_tracking_pattern("_ga")))
            .collect();
        for h in handles {
            assert!(h.join().unwrap());
        }
    }
}
