//! Cookie Record
//!
//! Strongly-typed cookie as produced by the external collector.
//! Decoding is lenient: malformed fields fall back to defaults instead of
//! failing the whole batch.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};

use super::category::Category;

// ============================================================================
// EXPIRATION
// ============================================================================

/// Raw `expirationDate` as it appeared in the input
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Expiration {
    /// Epoch seconds
    Number(Number),
    /// Textual value, parsed lazily
    Text(String),
    Flag(bool),
}

impl Expiration {
    pub fn from_secs(secs: f64) -> Option<Self> {
        Number::from_f64(secs).map(Expiration::Number)
    }

    fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Number(n) => Some(Expiration::Number(n)),
            Value::String(s) => Some(Expiration::Text(s)),
            Value::Bool(b) => Some(Expiration::Flag(b)),
            Value::Array(a) if a.is_empty() => None,
            Value::Object(o) if o.is_empty() => None,
            other => Some(Expiration::Text(other.to_string())),
        }
    }

    /// Falsy values (`0`, `""`, `false`) count as "no expiration"
    pub fn is_set(&self) -> bool {
        match self {
            Expiration::Number(n) => n.as_f64().map_or(true, |v| v != 0.0),
            Expiration::Text(s) => !s.is_empty(),
            Expiration::Flag(b) => *b,
        }
    }

    /// Explicit fallible parse to epoch seconds.
    /// `None` means unparsable; callers fall back to a default.
    pub fn epoch_seconds(&self) -> Option<f64> {
        match self {
            // Out-of-range literals (1e400) read as ±inf
            Expiration::Number(n) => n.as_f64().or_else(|| n.to_string().parse().ok()),
            Expiration::Text(s) => s.trim().parse::<f64>().ok(),
            Expiration::Flag(b) => Some(if *b { 1.0 } else { 0.0 }),
        }
    }
}

// ============================================================================
// COOKIE RECORD
// ============================================================================

/// One cookie, one JSON object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawCookieRecord")]
pub struct CookieRecord {
    pub name: String,
    pub value: String,
    pub domain: String,
    pub path: String,
    pub secure: bool,
    pub http_only: bool,

    /// Raw attribute; encoding happens in the feature extractor
    pub same_site: Option<String>,

    /// Absent = session cookie
    pub expiration_date: Option<Expiration>,

    pub host_only: bool,

    /// Ground truth, or the heuristic label once written back
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<Category>,

    /// Collector fields we don't interpret (source_url, ...), kept for write-back.
    /// A `label` outside the six categories also lands here, untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Wire shape before label resolution
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCookieRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    name: String,

    #[serde(default, deserialize_with = "lenient_string")]
    value: String,

    #[serde(default, deserialize_with = "lenient_string")]
    domain: String,

    #[serde(default = "default_path", deserialize_with = "lenient_path")]
    path: String,

    #[serde(default, deserialize_with = "truthy")]
    secure: bool,

    #[serde(default, deserialize_with = "truthy")]
    http_only: bool,

    #[serde(default, deserialize_with = "lenient_same_site")]
    same_site: Option<String>,

    #[serde(default, deserialize_with = "lenient_expiration")]
    expiration_date: Option<Expiration>,

    #[serde(default, deserialize_with = "truthy")]
    host_only: bool,

    #[serde(default)]
    label: Option<Value>,

    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl From<RawCookieRecord> for CookieRecord {
    fn from(raw: RawCookieRecord) -> Self {
        let mut extra = raw.extra;

        let label = match raw.label {
            Some(Value::String(s)) => match s.parse::<Category>() {
                Ok(c) => Some(c),
                Err(e) => {
                    log::debug!("Keeping unrecognized label as-is: {}", e);
                    extra.insert(LABEL_KEY.to_string(), Value::String(s));
                    None
                }
            },
            Some(Value::Null) | None => None,
            Some(other) => {
                extra.insert(LABEL_KEY.to_string(), other);
                None
            }
        };

        Self {
            name: raw.name,
            value: raw.value,
            domain: raw.domain,
            path: raw.path,
            secure: raw.secure,
            http_only: raw.http_only,
            same_site: raw.same_site,
            expiration_date: raw.expiration_date,
            host_only: raw.host_only,
            label,
            extra,
        }
    }
}

const LABEL_KEY: &str = "label";

impl Default for CookieRecord {
    fn default() -> Self {
        Self {
            name: String::new(),
            value: String::new(),
            domain: String::new(),
            path: default_path(),
            secure: false,
            http_only: false,
            same_site: None,
            expiration_date: None,
            host_only: false,
            label: None,
            extra: Map::new(),
        }
    }
}

impl CookieRecord {
    pub fn new(name: impl Into<String>, value: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            domain: domain.into(),
            ..Default::default()
        }
    }

    pub fn with_expiration(mut self, epoch_secs: f64) -> Self {
        self.expiration_date = Expiration::from_secs(epoch_secs);
        self
    }

    pub fn with_same_site(mut self, same_site: impl Into<String>) -> Self {
        self.same_site = Some(same_site.into());
        self
    }

    pub fn with_host_only(mut self, host_only: bool) -> Self {
        self.host_only = host_only;
        self
    }

    pub fn with_flags(mut self, secure: bool, http_only: bool) -> Self {
        self.secure = secure;
        self.http_only = http_only;
        self
    }

    pub fn with_label(mut self, label: Category) -> Self {
        self.set_label(label);
        self
    }

    /// Replace the label, dropping any unrecognized raw one kept in `extra`
    pub fn set_label(&mut self, label: Category) {
        self.extra.remove(LABEL_KEY);
        self.label = Some(label);
    }

    /// No usable expiration → session cookie
    pub fn is_session(&self) -> bool {
        !self.expiration_date.as_ref().map_or(false, Expiration::is_set)
    }
}

// ============================================================================
// LENIENT DECODERS
// ============================================================================

fn default_path() -> String {
    "/".to_string()
}

fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(match Option::<Value>::deserialize(d)? {
        Some(Value::String(s)) => s,
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    })
}

fn lenient_path<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    match Option::<Value>::deserialize(d)? {
        Some(Value::String(s)) => Ok(s),
        _ => Ok(default_path()),
    }
}

fn truthy<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    Ok(match Option::<Value>::deserialize(d)? {
        Some(Value::Bool(b)) => b,
        Some(Value::Number(n)) => n.as_f64().map_or(true, |v| v != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(a)) => !a.is_empty(),
        Some(Value::Object(o)) => !o.is_empty(),
        Some(Value::Null) | None => false,
    })
}

fn lenient_same_site<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<Value>::deserialize(d)? {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}

fn lenient_expiration<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Expiration>, D::Error> {
    Ok(Option::<Value>::deserialize(d)?.and_then(Expiration::from_json))
}
