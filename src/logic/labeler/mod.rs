//! Heuristic Labeler
//!
//! Gán category cho cookie từ name/domain khi chưa có ground truth.
//! Input: CookieRecord
//! Output: LabelDecision (category + rule + confidence)
//!
//! Independent of the feature extractor.

pub mod rules;
pub mod types;

pub use rules::{LabelRule, LABEL_RULES};
pub use types::{LabelDecision, LabelInput, LabelSource};

use crate::logic::cookie::{Category, CookieRecord};
use rules::{UNKNOWN_CONFIDENCE, UNKNOWN_RULE_ID};

/// Rule-cascade labeler over `LABEL_RULES`
#[derive(Debug, Clone, Copy)]
pub struct HeuristicLabeler {
    rules: &'static [LabelRule],
}

impl Default for HeuristicLabeler {
    fn default() -> Self {
        Self { rules: LABEL_RULES }
    }
}

impl HeuristicLabeler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Category only
    pub fn label(&self, record: &CookieRecord) -> Category {
        self.decide(record).category
    }

    /// First matching rule wins; `Unknown` if none
    pub fn decide(&self, record: &CookieRecord) -> LabelDecision {
        let input = LabelInput::from_record(record);

        for rule in self.rules {
            if rule.matches(&input) {
                log::trace!("Cookie {:?} matched {}", record.name, rule.id);
                return LabelDecision {
                    category: rule.category,
                    rule_id: rule.id,
                    confidence: rule.confidence,
                };
            }
        }

        LabelDecision {
            category: Category::Unknown,
            rule_id: UNKNOWN_RULE_ID,
            confidence: UNKNOWN_CONFIDENCE,
        }
    }

    /// Ordered decision table
    pub fn rules(&self) -> &'static [LabelRule] {
        self.rules
    }
}
