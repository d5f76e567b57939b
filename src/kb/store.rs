//! The knowledge base: fact and rule storage, assertion with eager forward
//! chaining, queries, and cascading retraction.

use std::collections::{BTreeMap, VecDeque};
use std::fmt;

use tracing::{debug, info, warn};

use super::answer::{Evidence, ListOfBindings};
use super::config::{KbConfig, Verbosity};
use super::error::KbError;
use super::infer::{resolve_step, Derivation};
use super::item::{Fact, FactId, Item, ItemId, Rule, RuleId, Support};
use crate::syntax::{is_fact_query, Statement};
use crate::unify::{match_statements, Substitution};

/// What a retraction did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RetractReport {
    /// Facts removed from the store, in removal order.
    pub removed_facts: Vec<Fact>,
    /// Rules removed from the store, in removal order.
    pub removed_rules: Vec<Rule>,
    /// Items left in place because they were still supported when the
    /// cascade finished.
    pub refused: Vec<ItemId>,
}

impl RetractReport {
    pub fn is_empty(&self) -> bool {
        self.removed_facts.is_empty() && self.removed_rules.is_empty() && self.refused.is_empty()
    }
}

impl fmt::Display for RetractReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "removed {} fact(s) and {} rule(s)",
            self.removed_facts.len(),
            self.removed_rules.len()
        )?;
        if !self.refused.is_empty() {
            write!(f, "; {} still supported", self.refused.len())?;
        }
        Ok(())
    }
}

/// A store of facts and rules with provenance.
///
/// Facts and rules live in id-keyed maps; justifications and back-references
/// are id pairs, never owning links. Ids grow monotonically, so iteration
/// follows insertion order and an id is never reused after removal.
#[derive(Debug, Default)]
pub struct KnowledgeBase {
    facts: BTreeMap<FactId, Fact>,
    rules: BTreeMap<RuleId, Rule>,
    next_fact: u64,
    next_rule: u64,
    config: KbConfig,
}

impl KnowledgeBase {
    /// Create an empty knowledge base.
    pub fn new() -> Self {
        Self::with_config(KbConfig::default())
    }

    /// Create an empty knowledge base with the given configuration.
    pub fn with_config(config: KbConfig) -> Self {
        KnowledgeBase {
            facts: BTreeMap::new(),
            rules: BTreeMap::new(),
            next_fact: 0,
            next_rule: 0,
            config,
        }
    }

    pub fn config(&self) -> &KbConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut KbConfig {
        &mut self.config
    }

    /// Assert a fact or rule, then derive everything that follows from it.
    ///
    /// An item equal to one already stored is merged: its justifications are
    /// appended, or, for a bare assertion, the stored item is marked as user
    /// asserted. Derivation runs to a fixed point before returning; there is
    /// no cycle guard beyond the configured derivation limit.
    ///
    /// Returns the id of the stored item (new or merged).
    pub fn assert(&mut self, item: impl Into<Item>) -> Result<ItemId, KbError> {
        let item = item.into();
        if let Item::Rule(rule) = &item {
            if rule.lhs.is_empty() {
                return Err(KbError::EmptyRule);
            }
        }
        if self.traces(Verbosity::Assertions) {
            info!(item = %item, "asserting");
        }

        let mut queue = VecDeque::new();
        let root = self.add(item, &mut queue);

        let mut processed = 0usize;
        while let Some(derivation) = queue.pop_front() {
            if let Some(limit) = self.config.derivation_limit {
                if processed >= limit {
                    warn!(
                        limit,
                        dropped = queue.len() + 1,
                        "derivation limit reached; stopping forward chaining"
                    );
                    return Err(KbError::DerivationLimit { limit });
                }
            }
            processed += 1;
            self.add(derivation.into_item(), &mut queue);
        }

        Ok(root)
    }

    fn add(&mut self, item: Item, queue: &mut VecDeque<Derivation>) -> ItemId {
        let supports = item.justifications().to_vec();
        let id = match item {
            Item::Fact(fact) => ItemId::Fact(self.add_fact(fact, queue)),
            Item::Rule(rule) => ItemId::Rule(self.add_rule(rule, queue)),
        };
        self.record_products(id, &supports);
        id
    }

    fn add_fact(&mut self, fact: Fact, queue: &mut VecDeque<Derivation>) -> FactId {
        if let Some(id) = self.find_fact(&fact.statement) {
            if let Some(existing) = self.facts.get_mut(&id) {
                if self.config.verbosity >= Verbosity::Inference {
                    debug!(fact = %existing, "merging with existing fact");
                }
                merge(
                    &mut existing.justifications,
                    &mut existing.user_asserted,
                    fact.justifications,
                );
            }
            return id;
        }

        let id = FactId(self.next_fact);
        self.next_fact += 1;
        if self.traces(Verbosity::Inference) {
            debug!(%id, fact = %fact, "adding fact");
        }
        self.facts.insert(id, fact);

        let rule_ids: Vec<RuleId> = self.rules.keys().copied().collect();
        for rule_id in rule_ids {
            if let Some(derivation) = self.resolve(id, rule_id) {
                queue.push_back(derivation);
            }
        }
        id
    }

    fn add_rule(&mut self, rule: Rule, queue: &mut VecDeque<Derivation>) -> RuleId {
        if let Some(id) = self.find_rule(&rule.lhs, &rule.rhs) {
            if let Some(existing) = self.rules.get_mut(&id) {
                if self.config.verbosity >= Verbosity::Inference {
                    debug!(rule = %existing, "merging with existing rule");
                }
                merge(
                    &mut existing.justifications,
                    &mut existing.user_asserted,
                    rule.justifications,
                );
            }
            return id;
        }

        let id = RuleId(self.next_rule);
        self.next_rule += 1;
        if self.traces(Verbosity::Inference) {
            debug!(%id, rule = %rule, "adding rule");
        }
        self.rules.insert(id, rule);

        let fact_ids: Vec<FactId> = self.facts.keys().copied().collect();
        for fact_id in fact_ids {
            if let Some(derivation) = self.resolve(fact_id, id) {
                queue.push_back(derivation);
            }
        }
        id
    }

    fn resolve(&self, fact_id: FactId, rule_id: RuleId) -> Option<Derivation> {
        let fact = self.facts.get(&fact_id)?;
        let rule = self.rules.get(&rule_id)?;
        if self.traces(Verbosity::Inference) {
            debug!(fact = %fact.statement, rule = %rule, "attempting to infer");
        }
        resolve_step(fact_id, fact, rule_id, rule)
    }

    /// Record `product` as derived from each support pair's fact and rule.
    fn record_products(&mut self, product: ItemId, supports: &[Support]) {
        for support in supports {
            if let Some(fact) = self.facts.get_mut(&support.fact) {
                push_product(&mut fact.derived_facts, &mut fact.derived_rules, product);
            }
            if let Some(rule) = self.rules.get_mut(&support.rule) {
                push_product(&mut rule.derived_facts, &mut rule.derived_rules, product);
            }
        }
    }

    /// Ask which stored facts match `query`.
    ///
    /// A negated query is rejected with [`KbError::InvalidQuery`]. No match
    /// is an empty result, not an error. Asking never triggers inference.
    pub fn ask(&self, query: &Statement) -> Result<ListOfBindings, KbError> {
        if !is_fact_query(query) {
            warn!(query = %query, "invalid ask");
            return Err(KbError::InvalidQuery {
                query: query.clone(),
            });
        }
        if self.traces(Verbosity::Assertions) {
            info!(query = %query, "asking");
        }

        let mut answers = ListOfBindings::new();
        for (id, fact) in &self.facts {
            if let Some(bindings) = match_statements(query, &fact.statement, &Substitution::empty()).ok() {
                answers.add_bindings(
                    bindings,
                    vec![Evidence {
                        id: *id,
                        statement: fact.statement.clone(),
                    }],
                );
            }
        }
        Ok(answers)
    }

    /// Retract every fact matching `pattern`, then everything that loses its
    /// last justification as a result.
    ///
    /// Work proceeds breadth-first. A still-supported item is never removed;
    /// the refusal is logged and listed in the report.
    pub fn retract(&mut self, pattern: &Statement) -> RetractReport {
        if self.traces(Verbosity::Assertions) {
            info!(pattern = %pattern, "retracting");
        }

        let mut queue: VecDeque<ItemId> = self
            .facts
            .iter()
            .filter(|(_, fact)| {
                match_statements(pattern, &fact.statement, &Substitution::empty()).is_success()
            })
            .map(|(id, _)| ItemId::Fact(*id))
            .collect();

        let mut report = RetractReport::default();
        while let Some(curr) = queue.pop_front() {
            match curr {
                ItemId::Fact(id) => {
                    let Some(fact) = self.facts.get(&id) else {
                        continue;
                    };
                    if fact.is_supported() {
                        refuse(&mut report, curr, &fact.to_string());
                        continue;
                    }
                    if let Some(fact) = self.facts.remove(&id) {
                        if self.traces(Verbosity::Inference) {
                            debug!(%id, fact = %fact, "removed fact");
                        }
                        self.sever(curr, &fact.derived_facts, &fact.derived_rules, &mut queue);
                        report.refused.retain(|item| *item != curr);
                        report.removed_facts.push(fact);
                    }
                }
                ItemId::Rule(id) => {
                    let Some(rule) = self.rules.get(&id) else {
                        continue;
                    };
                    if rule.is_supported() {
                        refuse(&mut report, curr, &rule.to_string());
                        continue;
                    }
                    if let Some(rule) = self.rules.remove(&id) {
                        if self.traces(Verbosity::Inference) {
                            debug!(%id, rule = %rule, "removed rule");
                        }
                        self.sever(curr, &rule.derived_facts, &rule.derived_rules, &mut queue);
                        report.refused.retain(|item| *item != curr);
                        report.removed_rules.push(rule);
                    }
                }
            }
        }
        report
    }

    /// Queue every dependant of `removed` and drop the support pairs naming it.
    fn sever(
        &mut self,
        removed: ItemId,
        derived_facts: &[FactId],
        derived_rules: &[RuleId],
        queue: &mut VecDeque<ItemId>,
    ) {
        for fact_id in derived_facts {
            queue.push_back(ItemId::Fact(*fact_id));
            let Some(fact) = self.facts.get_mut(fact_id) else {
                continue;
            };
            let dropped = drop_supports(&mut fact.justifications, removed);
            let remaining = fact.justifications.clone();
            self.unlink(ItemId::Fact(*fact_id), &dropped, &remaining);
        }
        for rule_id in derived_rules {
            queue.push_back(ItemId::Rule(*rule_id));
            let Some(rule) = self.rules.get_mut(rule_id) else {
                continue;
            };
            let dropped = drop_supports(&mut rule.justifications, removed);
            let remaining = rule.justifications.clone();
            self.unlink(ItemId::Rule(*rule_id), &dropped, &remaining);
        }
    }

    /// Forget `product` on the surviving partners of its dropped supports,
    /// unless a remaining support still names them.
    fn unlink(&mut self, product: ItemId, dropped: &[Support], remaining: &[Support]) {
        for support in dropped {
            let partner = ItemId::Fact(support.fact);
            if !remaining.iter().any(|s| s.mentions(partner)) {
                if let Some(fact) = self.facts.get_mut(&support.fact) {
                    remove_product(&mut fact.derived_facts, &mut fact.derived_rules, product);
                }
            }
            let partner = ItemId::Rule(support.rule);
            if !remaining.iter().any(|s| s.mentions(partner)) {
                if let Some(rule) = self.rules.get_mut(&support.rule) {
                    remove_product(&mut rule.derived_facts, &mut rule.derived_rules, product);
                }
            }
        }
    }

    /// Id of the stored fact structurally equal to `statement`.
    pub fn find_fact(&self, statement: &Statement) -> Option<FactId> {
        self.facts
            .iter()
            .find(|(_, fact)| &fact.statement == statement)
            .map(|(id, _)| *id)
    }

    /// Id of the stored rule structurally equal to `lhs -> rhs`.
    pub fn find_rule(&self, lhs: &[Statement], rhs: &Statement) -> Option<RuleId> {
        self.rules
            .iter()
            .find(|(_, rule)| rule.same_shape(lhs, rhs))
            .map(|(id, _)| *id)
    }

    pub fn fact(&self, id: FactId) -> Option<&Fact> {
        self.facts.get(&id)
    }

    pub fn rule(&self, id: RuleId) -> Option<&Rule> {
        self.rules.get(&id)
    }

    /// Stored facts in insertion order.
    pub fn facts(&self) -> impl Iterator<Item = (FactId, &Fact)> {
        self.facts.iter().map(|(id, fact)| (*id, fact))
    }

    /// Stored rules in insertion order.
    pub fn rules(&self) -> impl Iterator<Item = (RuleId, &Rule)> {
        self.rules.iter().map(|(id, rule)| (*id, rule))
    }

    pub fn len_facts(&self) -> usize {
        self.facts.len()
    }

    pub fn len_rules(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty() && self.rules.is_empty()
    }

    fn traces(&self, level: Verbosity) -> bool {
        self.config.verbosity >= level
    }
}

fn merge(justifications: &mut Vec<Support>, user_asserted: &mut bool, incoming: Vec<Support>) {
    if incoming.is_empty() {
        *user_asserted = true;
    } else {
        justifications.extend(incoming);
    }
}

fn push_product(derived_facts: &mut Vec<FactId>, derived_rules: &mut Vec<RuleId>, product: ItemId) {
    match product {
        ItemId::Fact(id) => {
            if !derived_facts.contains(&id) {
                derived_facts.push(id);
            }
        }
        ItemId::Rule(id) => {
            if !derived_rules.contains(&id) {
                derived_rules.push(id);
            }
        }
    }
}

fn remove_product(derived_facts: &mut Vec<FactId>, derived_rules: &mut Vec<RuleId>, product: ItemId) {
    match product {
        ItemId::Fact(id) => derived_facts.retain(|f| *f != id),
        ItemId::Rule(id) => derived_rules.retain(|r| *r != id),
    }
}

/// Remove and return the supports naming `removed`.
fn drop_supports(justifications: &mut Vec<Support>, removed: ItemId) -> Vec<Support> {
    let (dropped, kept): (Vec<Support>, Vec<Support>) =
        justifications.drain(..).partition(|s| s.mentions(removed));
    *justifications = kept;
    dropped
}

fn refuse(report: &mut RetractReport, item: ItemId, rendered: &str) {
    if report.refused.contains(&item) {
        return;
    }
    info!(item = rendered, "attempt to remove supported item refused");
    report.refused.push(item);
}

impl fmt::Display for KnowledgeBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Knowledge Base:")?;
        for fact in self.facts.values() {
            writeln!(f, "{}", fact)?;
        }
        for rule in self.rules.values() {
            writeln!(f, "{}", rule)?;
        }
        Ok(())
    }
}
