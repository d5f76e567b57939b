//! Serializable view of a knowledge base, for dumps and debugging.

use serde::Serialize;

use super::item::{FactId, RuleId, Support};
use super::store::KnowledgeBase;

/// A justification rendered as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SupportEntry {
    pub fact: String,
    pub rule: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FactEntry {
    pub id: FactId,
    pub statement: String,
    pub user_asserted: bool,
    pub justifications: Vec<SupportEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleEntry {
    pub id: RuleId,
    pub lhs: Vec<String>,
    pub rhs: String,
    pub user_asserted: bool,
    pub justifications: Vec<SupportEntry>,
}

/// Every fact and rule with its provenance, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KbSnapshot {
    pub facts: Vec<FactEntry>,
    pub rules: Vec<RuleEntry>,
}

impl KbSnapshot {
    pub fn capture(kb: &KnowledgeBase) -> Self {
        let render = |supports: &[Support]| -> Vec<SupportEntry> {
            supports
                .iter()
                .map(|s| SupportEntry {
                    fact: kb
                        .fact(s.fact)
                        .map(|f| f.statement().to_string())
                        .unwrap_or_else(|| s.fact.to_string()),
                    rule: kb
                        .rule(s.rule)
                        .map(|r| r.to_string())
                        .unwrap_or_else(|| s.rule.to_string()),
                })
                .collect()
        };

        KbSnapshot {
            facts: kb
                .facts()
                .map(|(id, fact)| FactEntry {
                    id,
                    statement: fact.statement().to_string(),
                    user_asserted: fact.is_user_asserted(),
                    justifications: render(fact.justifications()),
                })
                .collect(),
            rules: kb
                .rules()
                .map(|(id, rule)| RuleEntry {
                    id,
                    lhs: rule.lhs().iter().map(|s| s.to_string()).collect(),
                    rhs: rule.rhs().to_string(),
                    user_asserted: rule.is_user_asserted(),
                    justifications: render(rule.justifications()),
                })
                .collect(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl KnowledgeBase {
    /// Capture a serializable snapshot of the store.
    pub fn snapshot(&self) -> KbSnapshot {
        KbSnapshot::capture(self)
    }
}
