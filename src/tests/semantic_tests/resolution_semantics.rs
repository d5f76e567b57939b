use super::*;

// =============================================================================
// RESOLUTION SEMANTICS
// =============================================================================
//
// One step matches a fact against a rule's first antecedent. A single
// remaining antecedent list shrinks into a residual rule; an exhausted list
// yields the instantiated consequent as a fact. Saturation is the store's
// job: every new fact meets every stored rule and vice versa.

#[test]
fn first_antecedent_match_leaves_residual_rule() {
    let mut kb = KnowledgeBase::new();
    let r0 = assert_rule(
        &mut kb,
        rule(&[stmt("P", &["?x"]), stmt("Q", &["?x"])], stmt("R", &["?x"])),
    );
    let pa = assert_fact(&mut kb, stmt("P", &["a"]));

    let residual = kb
        .find_rule(&[stmt("Q", &["a"])], &stmt("R", &["a"]))
        .expect("residual rule (Q a) -> (R a)");
    let residual = kb.rule(residual).unwrap();
    assert!(residual.is_primitive());
    assert!(!residual.is_user_asserted());
    assert_eq!(residual.justifications(), &[Support::new(pa, r0)]);
    assert!(!has_fact(&kb, &stmt("R", &["a"])));
}

#[test]
fn residual_rule_fires_on_remaining_antecedent() {
    let mut kb = KnowledgeBase::new();
    let r0 = assert_rule(
        &mut kb,
        rule(&[stmt("P", &["?x"]), stmt("Q", &["?x"])], stmt("R", &["?x"])),
    );
    let pa = assert_fact(&mut kb, stmt("P", &["a"]));
    let qa = assert_fact(&mut kb, stmt("Q", &["a"]));
    let r1 = kb.find_rule(&[stmt("Q", &["a"])], &stmt("R", &["a"])).unwrap();

    // R(a) <- (Q(a), r1) and r1 <- (P(a), r0): a provenance chain of two.
    let ra = fact_of(&kb, &stmt("R", &["a"]));
    assert_eq!(ra.justifications(), &[Support::new(qa, r1)]);
    assert_eq!(kb.rule(r1).unwrap().justifications(), &[Support::new(pa, r0)]);
}

#[test]
fn consequent_is_not_asserted_when_only_some_antecedents_hold() {
    let mut kb = KnowledgeBase::new();
    assert_rule(
        &mut kb,
        rule(&[stmt("P", &["?x"]), stmt("Q", &["?x"])], stmt("R", &["?x"])),
    );
    assert_fact(&mut kb, stmt("P", &["a"]));
    assert_fact(&mut kb, stmt("Q", &["b"]));
    assert!(!has_fact(&kb, &stmt("R", &["a"])));
    assert!(!has_fact(&kb, &stmt("R", &["b"])));
}

#[test]
fn only_first_antecedent_is_matched() {
    // Q(a) alone does not touch (P ?x) (Q ?x) -> (R ?x).
    let mut kb = KnowledgeBase::new();
    assert_rule(
        &mut kb,
        rule(&[stmt("P", &["?x"]), stmt("Q", &["?x"])], stmt("R", &["?x"])),
    );
    assert_fact(&mut kb, stmt("Q", &["a"]));
    assert_eq!(kb.len_rules(), 1);
    assert_eq!(kb.len_facts(), 1);
}

fn blocks_world(rule_first: bool) -> KnowledgeBase {
    let transitive = rule(
        &[stmt("isa", &["?x", "?y"]), stmt("isa", &["?y", "?z"])],
        stmt("isa", &["?x", "?z"]),
    );
    let facts = [
        stmt("isa", &["cube", "block"]),
        stmt("isa", &["block", "object"]),
        stmt("isa", &["object", "thing"]),
    ];

    let mut kb = KnowledgeBase::new();
    if rule_first {
        assert_rule(&mut kb, transitive.clone());
    }
    for f in facts {
        assert_fact(&mut kb, f);
    }
    if !rule_first {
        assert_rule(&mut kb, transitive);
    }
    kb
}

fn fact_statements(kb: &KnowledgeBase) -> Vec<String> {
    let mut out: Vec<String> = kb.facts().map(|(_, f)| f.statement().to_string()).collect();
    out.sort();
    out
}

#[test]
fn transitive_chain_reaches_fixed_point() {
    let kb = blocks_world(false);
    assert_eq!(
        fact_statements(&kb),
        vec![
            "(isa block object)",
            "(isa block thing)",
            "(isa cube block)",
            "(isa cube object)",
            "(isa cube thing)",
            "(isa object thing)",
        ]
    );
    assert_eq!(kb.len_rules(), 7);
}

#[test]
fn closure_does_not_depend_on_assertion_order() {
    assert_eq!(
        fact_statements(&blocks_world(false)),
        fact_statements(&blocks_world(true))
    );
}

#[test]
fn fact_derived_twice_carries_both_supports() {
    // (isa cube thing) follows via (block thing) and via (cube object).
    let kb = blocks_world(false);
    assert_eq!(
        fact_of(&kb, &stmt("isa", &["cube", "thing"])).justifications().len(),
        2
    );
}

#[test]
fn derivation_limit_stops_runaway_chaining() {
    let mut kb = KnowledgeBase::with_config(
        crate::kb::KbConfig::default().with_derivation_limit(Some(5)),
    );
    assert_rule(
        &mut kb,
        rule(&[stmt("n", &["?x"])], Statement::pos("n", vec![Term::app("s", vec![Term::var("x")])])),
    );
    let err = kb.assert(Fact::new(stmt("n", &["z"]))).unwrap_err();
    assert_eq!(err, KbError::DerivationLimit { limit: 5 });
    // The seed plus the five derivations that ran.
    assert_eq!(kb.len_facts(), 6);
}
