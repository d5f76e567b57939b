//! Facts and rules held by the knowledge base, with their provenance links.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::syntax::Statement;

/// Stable identifier of a fact inside one knowledge base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FactId(pub(crate) u64);

/// Stable identifier of a rule inside one knowledge base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RuleId(pub(crate) u64);

impl fmt::Display for FactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "f{}", self.0)
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}

/// Either kind of stored item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemId {
    Fact(FactId),
    Rule(RuleId),
}

impl ItemId {
    pub fn as_fact(self) -> Option<FactId> {
        match self {
            ItemId::Fact(id) => Some(id),
            ItemId::Rule(_) => None,
        }
    }

    pub fn as_rule(self) -> Option<RuleId> {
        match self {
            ItemId::Rule(id) => Some(id),
            ItemId::Fact(_) => None,
        }
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemId::Fact(id) => write!(f, "{}", id),
            ItemId::Rule(id) => write!(f, "{}", id),
        }
    }
}

/// One derivation path: the fact and rule that produced an item in a single
/// resolution step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Support {
    pub fact: FactId,
    pub rule: RuleId,
}

impl Support {
    pub fn new(fact: FactId, rule: RuleId) -> Self {
        Support { fact, rule }
    }

    /// Whether either half of this pair is `item`.
    pub fn mentions(&self, item: ItemId) -> bool {
        match item {
            ItemId::Fact(id) => self.fact == id,
            ItemId::Rule(id) => self.rule == id,
        }
    }
}

/// A statement believed true, with provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fact {
    pub(crate) statement: Statement,
    pub(crate) justifications: Vec<Support>,
    pub(crate) derived_facts: Vec<FactId>,
    pub(crate) derived_rules: Vec<RuleId>,
    pub(crate) user_asserted: bool,
}

impl Fact {
    /// A fact supplied directly by a caller.
    pub fn new(statement: Statement) -> Self {
        Fact {
            statement,
            justifications: Vec::new(),
            derived_facts: Vec::new(),
            derived_rules: Vec::new(),
            user_asserted: true,
        }
    }

    /// A fact produced by one resolution step.
    pub fn derived(statement: Statement, support: Support) -> Self {
        Fact {
            statement,
            justifications: vec![support],
            derived_facts: Vec::new(),
            derived_rules: Vec::new(),
            user_asserted: false,
        }
    }

    pub fn statement(&self) -> &Statement {
        &self.statement
    }

    pub fn justifications(&self) -> &[Support] {
        &self.justifications
    }

    /// Facts this fact helped derive.
    pub fn derived_facts(&self) -> &[FactId] {
        &self.derived_facts
    }

    /// Rules this fact helped derive.
    pub fn derived_rules(&self) -> &[RuleId] {
        &self.derived_rules
    }

    pub fn is_user_asserted(&self) -> bool {
        self.user_asserted
    }

    pub fn is_supported(&self) -> bool {
        !self.justifications.is_empty()
    }
}

impl fmt::Display for Fact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fact: {}", self.statement)
    }
}

/// A conditional statement: antecedents `lhs` imply `rhs`.
///
/// A rule with a single antecedent is primitive; longer rules are residuals
/// or user rules still waiting on more than one condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub(crate) lhs: Vec<Statement>,
    pub(crate) rhs: Statement,
    pub(crate) justifications: Vec<Support>,
    pub(crate) derived_facts: Vec<FactId>,
    pub(crate) derived_rules: Vec<RuleId>,
    pub(crate) user_asserted: bool,
}

impl Rule {
    /// A rule supplied directly by a caller.
    pub fn new(lhs: Vec<Statement>, rhs: Statement) -> Self {
        Rule {
            lhs,
            rhs,
            justifications: Vec::new(),
            derived_facts: Vec::new(),
            derived_rules: Vec::new(),
            user_asserted: true,
        }
    }

    /// A residual rule produced by one resolution step.
    pub fn derived(lhs: Vec<Statement>, rhs: Statement, support: Support) -> Self {
        Rule {
            lhs,
            rhs,
            justifications: vec![support],
            derived_facts: Vec::new(),
            derived_rules: Vec::new(),
            user_asserted: false,
        }
    }

    pub fn lhs(&self) -> &[Statement] {
        &self.lhs
    }

    pub fn rhs(&self) -> &Statement {
        &self.rhs
    }

    pub fn is_primitive(&self) -> bool {
        self.lhs.len() == 1
    }

    pub fn justifications(&self) -> &[Support] {
        &self.justifications
    }

    pub fn derived_facts(&self) -> &[FactId] {
        &self.derived_facts
    }

    pub fn derived_rules(&self) -> &[RuleId] {
        &self.derived_rules
    }

    pub fn is_user_asserted(&self) -> bool {
        self.user_asserted
    }

    pub fn is_supported(&self) -> bool {
        !self.justifications.is_empty()
    }

    /// Structural equality on antecedents and consequent only.
    pub(crate) fn same_shape(&self, lhs: &[Statement], rhs: &Statement) -> bool {
        self.lhs == lhs && &self.rhs == rhs
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rule: (")?;
        for (i, stmt) in self.lhs.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", stmt)?;
        }
        write!(f, ") -> {}", self.rhs)
    }
}

/// Anything that can be asserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    Fact(Fact),
    Rule(Rule),
}

impl Item {
    pub fn justifications(&self) -> &[Support] {
        match self {
            Item::Fact(fact) => &fact.justifications,
            Item::Rule(rule) => &rule.justifications,
        }
    }
}

impl From<Fact> for Item {
    fn from(fact: Fact) -> Self {
        Item::Fact(fact)
    }
}

impl From<Rule> for Item {
    fn from(rule: Rule) -> Self {
        Item::Rule(rule)
    }
}

impl From<Statement> for Item {
    fn from(statement: Statement) -> Self {
        Item::Fact(Fact::new(statement))
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Item::Fact(fact) => write!(f, "{}", fact),
            Item::Rule(rule) => write!(f, "{}", rule),
        }
    }
}
