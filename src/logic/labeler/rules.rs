//! Heuristic Label Rules
//!
//! Bảng quyết định: (predicate, category) theo thứ tự ưu tiên.
//! Rule đầu tiên khớp sẽ thắng, không backtracking.

use once_cell::sync::Lazy;
use regex::Regex;

use super::types::LabelInput;
use crate::logic::cookie::Category;

// ============================================================================
// CONFIDENCE (per category)
// ============================================================================

pub const ESSENTIAL_CONFIDENCE: f32 = 0.95;
pub const ANALYTICS_CONFIDENCE: f32 = 0.9;
pub const ADVERTISING_CONFIDENCE: f32 = 0.9;
pub const SOCIAL_CONFIDENCE: f32 = 0.85;
pub const FUNCTIONAL_CONFIDENCE: f32 = 0.7;
pub const UNKNOWN_CONFIDENCE: f32 = 0.5;

pub const UNKNOWN_RULE_ID: &str = "UNKNOWN_DEFAULT";

// ============================================================================
// KEYWORDS
// ============================================================================

const ESSENTIAL_PREFIXES: &[&str] = &["session", "csrf", "xsrf", "auth", "token"];
const FRAMEWORK_SESSION_PREFIXES: &[&str] = &["laravel", "phpsessid", "jsessionid"];
const GA_PREFIXES: &[&str] = &["_ga", "_gid", "_gat"];
const ANALYTICS_KEYWORDS: &[&str] = &["analytics", "stats"];
const PIXEL_PREFIXES: &[&str] = &["_fbp", "_fbc", "fr"];
const AD_DOMAINS: &[&str] = &["doubleclick", "adsense"];
const AD_ID_PREFIXES: &[&str] = &["id", "uid", "uuid", "visitor"];
const SOCIAL_DOMAINS: &[&str] = &["facebook", "twitter", "linkedin", "instagram"];

static CONSENT_RE: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^(cookie.?consent|cookie.?banner)").ok());
static UTM_RE: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"^__utm[a-z]").ok());

// ============================================================================
// RULE TABLE
// ============================================================================

/// One row of the decision table
#[derive(Debug, Clone, Copy)]
pub struct LabelRule {
    pub id: &'static str,
    pub category: Category,
    pub confidence: f32,
    pub predicate: fn(&LabelInput) -> bool,
}

impl LabelRule {
    pub fn matches(&self, input: &LabelInput) -> bool {
        (self.predicate)(input)
    }
}

/// Rules in priority order
pub const LABEL_RULES: &[LabelRule] = &[
    // === Essential ===
    LabelRule {
        id: "ESSENTIAL_AUTH_PREFIX",
        category: Category::Essential,
        confidence: ESSENTIAL_CONFIDENCE,
        predicate: |i| starts_with_any(&i.name, ESSENTIAL_PREFIXES),
    },
    LabelRule {
        id: "ESSENTIAL_CONSENT",
        category: Category::Essential,
        confidence: ESSENTIAL_CONFIDENCE,
        predicate: |i| regex_match(&CONSENT_RE, &i.name),
    },
    LabelRule {
        id: "ESSENTIAL_FRAMEWORK_SESSION",
        category: Category::Essential,
        confidence: ESSENTIAL_CONFIDENCE,
        predicate: |i| starts_with_any(&i.name, FRAMEWORK_SESSION_PREFIXES),
    },

    // === Analytics ===
    LabelRule {
        id: "ANALYTICS_GA_PREFIX",
        category: Category::Analytics,
        confidence: ANALYTICS_CONFIDENCE,
        predicate: |i| starts_with_any(&i.name, GA_PREFIXES),
    },
    LabelRule {
        id: "ANALYTICS_UTM_PREFIX",
        category: Category::Analytics,
        confidence: ANALYTICS_CONFIDENCE,
        predicate: |i| regex_match(&UTM_RE, &i.name),
    },
    LabelRule {
        id: "ANALYTICS_KEYWORD",
        category: Category::Analytics,
        confidence: ANALYTICS_CONFIDENCE,
        predicate: |i| contains_any(&i.name, ANALYTICS_KEYWORDS),
    },

    // === Advertising ===
    LabelRule {
        id: "ADVERTISING_PIXEL_PREFIX",
        category: Category::Advertising,
        confidence: ADVERTISING_CONFIDENCE,
        predicate: |i| starts_with_any(&i.name, PIXEL_PREFIXES),
    },
    LabelRule {
        id: "ADVERTISING_AD_DOMAIN",
        category: Category::Advertising,
        confidence: ADVERTISING_CONFIDENCE,
        predicate: |i| contains_any(&i.domain, AD_DOMAINS),
    },
    LabelRule {
        id: "ADVERTISING_ID_PREFIX",
        category: Category::Advertising,
        confidence: ADVERTISING_CONFIDENCE,
        predicate: |i| starts_with_any(&i.name, AD_ID_PREFIXES),
    },

    // === Social ===
    LabelRule {
        id: "SOCIAL_DOMAIN",
        category: Category::Social,
        confidence: SOCIAL_CONFIDENCE,
        predicate: |i| contains_any(&i.domain, SOCIAL_DOMAINS),
    },

    // === Functional ===
    LabelRule {
        id: "FUNCTIONAL_FIRST_PARTY_SESSION",
        category: Category::Functional,
        confidence: FUNCTIONAL_CONFIDENCE,
        predicate: |i| i.host_only && i.is_session,
    },
];

fn starts_with_any(text: &str, prefixes: &[&str]) -> bool {
    prefixes.iter().any(|p| text.starts_with(p))
}

fn contains_any(text: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| text.contains(n))
}

fn regex_match(re: &Lazy<Option<Regex>>, text: &str) -> bool {
    re.as_ref().map_or(false, |r| r.is_match(text))
}
