use super::*;

// =============================================================================
// QUERY SEMANTICS
// =============================================================================
//
// Asking matches the query against stored facts only. One answer per
// matching fact, in store order, each carrying the bindings and the fact it
// rests on. Asking never derives anything.

fn pq_kb() -> KnowledgeBase {
    let mut kb = KnowledgeBase::new();
    assert_fact(&mut kb, stmt("P", &["a"]));
    assert_fact(&mut kb, stmt("P", &["b"]));
    assert_fact(&mut kb, stmt("Q", &["a"]));
    kb
}

#[test]
fn variable_query_answers_each_matching_fact() {
    let kb = pq_kb();
    let answers = kb.ask(&stmt("P", &["?x"])).unwrap();
    assert_eq!(answers.len(), 2);
    assert_eq!(answers.values_of("x"), vec!["a", "b"]);

    let evidence: Vec<&Statement> = answers
        .iter()
        .map(|a| &a.evidence[0].statement)
        .collect();
    assert_eq!(evidence, vec![&stmt("P", &["a"]), &stmt("P", &["b"])]);
}

#[test]
fn ground_query_answers_with_empty_bindings() {
    let kb = pq_kb();
    let answers = kb.ask(&stmt("Q", &["a"])).unwrap();
    assert_eq!(answers.len(), 1);
    assert!(answers.answers()[0].bindings.is_empty());
    assert_eq!(answers.to_string(), "Yes");
}

#[test]
fn unmatched_query_is_empty_not_error() {
    let kb = pq_kb();
    let answers = kb.ask(&stmt("Q", &["b"])).unwrap();
    assert!(answers.is_empty());
    assert_eq!(answers.to_string(), "No");
}

#[test]
fn negated_query_is_invalid() {
    let kb = pq_kb();
    let query = Statement::neg("P", vec![Term::var("x")]);
    assert_eq!(
        kb.ask(&query).unwrap_err(),
        KbError::InvalidQuery { query: query.clone() }
    );
}

#[test]
fn repeated_variable_constrains_answers() {
    let mut kb = KnowledgeBase::new();
    assert_fact(&mut kb, stmt("on", &["a", "a"]));
    assert_fact(&mut kb, stmt("on", &["a", "b"]));
    let answers = kb.ask(&stmt("on", &["?x", "?x"])).unwrap();
    assert_eq!(answers.values_of("x"), vec!["a"]);
}

#[test]
fn derived_facts_are_answered() {
    let mut kb = pq_kb();
    assert_rule(&mut kb, rule(&[stmt("P", &["?x"])], stmt("S", &["?x"])));
    let answers = kb.ask(&stmt("S", &["?y"])).unwrap();
    assert_eq!(answers.values_of("y"), vec!["a", "b"]);
}

#[test]
fn asking_does_not_change_the_store() {
    let kb = pq_kb();
    let before = kb.to_string();
    let _ = kb.ask(&stmt("P", &["?x"])).unwrap();
    assert_eq!(kb.to_string(), before);
    assert_eq!(kb.len_facts(), 3);
}
