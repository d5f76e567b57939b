use super::*;

// =============================================================================
// ASSERTION SEMANTICS
// =============================================================================
//
// Asserting an item equal to a stored one never creates a second copy. A bare
// user assertion marks the stored item as user asserted; a derived assertion
// only ever appends justifications.

#[test]
fn asserting_same_fact_twice_stores_one_copy() {
    let mut kb = KnowledgeBase::new();
    let first = assert_fact(&mut kb, stmt("isa", &["cube", "block"]));
    let second = assert_fact(&mut kb, stmt("isa", &["cube", "block"]));
    assert_eq!(first, second);
    assert_eq!(kb.len_facts(), 1);
    assert!(kb.fact(first).unwrap().justifications().is_empty());
}

#[test]
fn asserting_same_rule_twice_stores_one_copy() {
    let mut kb = KnowledgeBase::new();
    let r = rule(&[stmt("p", &["?x"])], stmt("q", &["?x"]));
    let first = assert_rule(&mut kb, r.clone());
    let second = assert_rule(&mut kb, r);
    assert_eq!(first, second);
    assert_eq!(kb.len_rules(), 1);
}

#[test]
fn rules_differing_in_variable_names_are_distinct() {
    // Deduplication is structural; renamed variables are a different rule.
    let mut kb = KnowledgeBase::new();
    assert_rule(&mut kb, rule(&[stmt("p", &["?x"])], stmt("q", &["?x"])));
    assert_rule(&mut kb, rule(&[stmt("p", &["?y"])], stmt("q", &["?y"])));
    assert_eq!(kb.len_rules(), 2);
}

#[test]
fn user_assertion_of_derived_fact_marks_it_without_new_support() {
    let mut kb = KnowledgeBase::new();
    assert_fact(&mut kb, stmt("p", &["a"]));
    assert_rule(&mut kb, rule(&[stmt("p", &["?x"])], stmt("q", &["?x"])));

    let before = fact_of(&kb, &stmt("q", &["a"])).clone();
    assert!(!before.is_user_asserted());
    assert_eq!(before.justifications().len(), 1);

    assert_fact(&mut kb, stmt("q", &["a"]));
    let after = fact_of(&kb, &stmt("q", &["a"]));
    assert!(after.is_user_asserted());
    assert_eq!(after.justifications(), before.justifications());
}

#[test]
fn second_derivation_path_appends_justification() {
    let mut kb = KnowledgeBase::new();
    assert_rule(&mut kb, rule(&[stmt("p", &["?x"])], stmt("r", &["?x"])));
    assert_rule(&mut kb, rule(&[stmt("q", &["?x"])], stmt("r", &["?x"])));
    assert_fact(&mut kb, stmt("p", &["a"]));
    assert_eq!(fact_of(&kb, &stmt("r", &["a"])).justifications().len(), 1);

    assert_fact(&mut kb, stmt("q", &["a"]));
    let r_a = fact_of(&kb, &stmt("r", &["a"]));
    assert_eq!(r_a.justifications().len(), 2);
    assert!(!r_a.is_user_asserted());
    assert_eq!(kb.len_facts(), 3);
}

#[test]
fn justifications_only_grow_during_assertion() {
    let mut kb = KnowledgeBase::new();
    assert_rule(&mut kb, rule(&[stmt("p", &["?x"])], stmt("r", &["?x"])));
    assert_rule(&mut kb, rule(&[stmt("q", &["?x"])], stmt("r", &["?x"])));
    assert_fact(&mut kb, stmt("p", &["a"]));
    let snapshot: Vec<Support> = fact_of(&kb, &stmt("r", &["a"])).justifications().to_vec();

    assert_fact(&mut kb, stmt("q", &["a"]));
    assert_fact(&mut kb, stmt("p", &["b"]));
    let now = fact_of(&kb, &stmt("r", &["a"])).justifications();
    assert!(snapshot.iter().all(|s| now.contains(s)));
}

#[test]
fn producers_record_what_they_derived() {
    let mut kb = KnowledgeBase::new();
    let p = assert_fact(&mut kb, stmt("p", &["a"]));
    let r = assert_rule(&mut kb, rule(&[stmt("p", &["?x"])], stmt("q", &["?x"])));
    let q = kb.find_fact(&stmt("q", &["a"])).unwrap();

    assert_eq!(kb.fact(p).unwrap().derived_facts(), &[q]);
    assert_eq!(kb.rule(r).unwrap().derived_facts(), &[q]);
    assert_eq!(kb.fact(q).unwrap().justifications(), &[Support::new(p, r)]);
}

#[test]
fn empty_rule_is_rejected() {
    let mut kb = KnowledgeBase::new();
    let err = kb.assert(rule(&[], stmt("q", &["a"]))).unwrap_err();
    assert_eq!(err, KbError::EmptyRule);
    assert!(kb.is_empty());
}
