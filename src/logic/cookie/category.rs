//! Cookie Category
//!
//! Closed set of labels shared by the heuristic labeler, the training
//! dataset and the external classifier.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Cookie category labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Session, CSRF, auth, consent - site cannot work without it
    Essential,
    /// Preferences tied to the first-party session
    Functional,
    Analytics,
    Advertising,
    Social,
    /// No rule matched
    Unknown,
}

impl Category {
    /// All categories, in the class-index order used by the exported model
    pub const ALL: [Category; 6] = [
        Category::Essential,
        Category::Functional,
        Category::Analytics,
        Category::Advertising,
        Category::Social,
        Category::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Essential => "essential",
            Category::Functional => "functional",
            Category::Analytics => "analytics",
            Category::Advertising => "advertising",
            Category::Social => "social",
            Category::Unknown => "unknown",
        }
    }

    /// Class index in `ALL`
    pub fn index(&self) -> usize {
        match self {
            Category::Essential => 0,
            Category::Functional => 1,
            Category::Analytics => 2,
            Category::Advertising => 3,
            Category::Social => 4,
            Category::Unknown => 5,
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::Unknown
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error for label strings outside the six categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl std::fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown cookie category: {:?}", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_exact_names() {
        for c in Category::ALL {
            assert_eq!(c.as_str().parse::<Category>(), Ok(c));
        }
        assert!("Essential".parse::<Category>().is_err());
        assert!("tracking".parse::<Category>().is_err());
    }

    #[test]
    fn test_index_matches_all_order() {
        for (i, c) in Category::ALL.iter().enumerate() {
            assert_eq!(c.index(), i);
        }
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Category::Advertising).unwrap();
        assert_eq!(json, "\"advertising\"");
        let back: Category = serde_json::from_str("\"social\"").unwrap();
        assert_eq!(back, Category::Social);
    }
}
