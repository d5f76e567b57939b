//! Single-step forward resolution of one fact against one rule.

use super::item::{Fact, FactId, Item, Rule, RuleId, Support};
use crate::syntax::Statement;
use crate::unify::{instantiate, match_statements, Substitution, UnifyResult};

/// What a resolution step produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Derived {
    /// The rule's last antecedent was satisfied.
    Fact(Statement),
    /// The first antecedent was satisfied; the rest remain.
    Rule { lhs: Vec<Statement>, rhs: Statement },
}

/// A derivation product together with the pair that justifies it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Derivation {
    pub product: Derived,
    pub support: Support,
}

impl Derivation {
    /// Turn the product into an assertable item justified by `support`.
    pub fn into_item(self) -> Item {
        match self.product {
            Derived::Fact(statement) => Item::Fact(Fact::derived(statement, self.support)),
            Derived::Rule { lhs, rhs } => Item::Rule(Rule::derived(lhs, rhs, self.support)),
        }
    }
}

/// Try to resolve `rule`'s first antecedent against `fact`.
///
/// Returns `None` when the first antecedent does not match (or the rule has
/// no antecedents). This is one step only; the knowledge base drives
/// saturation by calling it for every new fact/rule pair.
pub fn resolve_step(fact_id: FactId, fact: &Fact, rule_id: RuleId, rule: &Rule) -> Option<Derivation> {
    let (first, rest) = rule.lhs.split_first()?;
    let bindings = match match_statements(first, &fact.statement, &Substitution::empty()) {
        UnifyResult::Success(bindings) => bindings,
        UnifyResult::Failure(_) => return None,
    };

    let rhs = instantiate(&rule.rhs, &bindings);
    let product = if rest.is_empty() {
        Derived::Fact(rhs)
    } else {
        Derived::Rule {
            lhs: rest.iter().map(|stmt| instantiate(stmt, &bindings)).collect(),
            rhs,
        }
    };

    Some(Derivation {
        product,
        support: Support::new(fact_id, rule_id),
    })
}
