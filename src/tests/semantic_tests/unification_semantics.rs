use super::*;

// =============================================================================
// MATCHING SEMANTICS
// =============================================================================
//
// Statements match when signs, predicates and arities agree and every
// argument pair matches. A variable on either side binds to the opposite
// term; a variable already bound must meet a structurally equal term.

fn var(name: &str) -> Var {
    Var::new(name)
}

fn matched(pattern: &Statement, target: &Statement) -> Option<Substitution> {
    match_statements(pattern, target, &Substitution::empty()).ok()
}

#[test]
fn variable_binds_to_constant() {
    let subst = matched(&stmt("isa", &["?x", "block"]), &stmt("isa", &["cube", "block"])).unwrap();
    assert_eq!(subst.lookup(&var("x")), Some(&Term::constant("cube")));
    assert_eq!(subst.len(), 1);
}

#[test]
fn variable_in_target_binds_too() {
    let subst = matched(&stmt("isa", &["cube", "block"]), &stmt("isa", &["?y", "block"])).unwrap();
    assert_eq!(subst.bound_to("y"), Some(&Term::constant("cube")));
}

#[test]
fn sign_predicate_and_arity_must_agree() {
    let p = stmt("p", &["a"]);
    assert!(matched(&p, &Statement::neg("p", vec![Term::constant("a")])).is_none());
    assert!(matched(&p, &stmt("q", &["a"])).is_none());
    assert!(matched(&p, &stmt("p", &["a", "b"])).is_none());
}

#[test]
fn repeated_variable_must_bind_consistently() {
    assert!(matched(&stmt("on", &["?x", "?x"]), &stmt("on", &["a", "b"])).is_none());
    assert!(matched(&stmt("on", &["?x", "?x"]), &stmt("on", &["a", "a"])).is_some());
}

#[test]
fn incoming_bindings_constrain_the_match() {
    let bound = Substitution::singleton(var("x"), Term::constant("a"));
    let pattern = stmt("p", &["?x"]);
    assert!(match_statements(&pattern, &stmt("p", &["b"]), &bound).is_failure());

    let extended = match_statements(&stmt("q", &["?x", "?y"]), &stmt("q", &["a", "c"]), &bound)
        .ok()
        .unwrap();
    assert_eq!(extended.len(), 2);
    // The input is not modified.
    assert_eq!(bound.len(), 1);
}

#[test]
fn nested_terms_match_structurally() {
    let pattern = Statement::pos("p", vec![Term::app("f", vec![Term::var("x"), Term::constant("b")])]);
    let target = Statement::pos("p", vec![Term::app("f", vec![Term::constant("a"), Term::constant("b")])]);
    let subst = matched(&pattern, &target).unwrap();
    assert_eq!(instantiate(&pattern, &subst), target);

    let other = Statement::pos("p", vec![Term::app("g", vec![Term::constant("a"), Term::constant("b")])]);
    assert!(matched(&pattern, &other).is_none());
}

#[test]
fn instantiate_leaves_unbound_variables() {
    let subst = Substitution::singleton(var("x"), Term::constant("a"));
    let out = instantiate(&stmt("r", &["?x", "?y"]), &subst);
    assert_eq!(out, stmt("r", &["a", "?y"]));
    assert!(!out.is_ground());
}

#[test]
fn failure_reports_the_clash() {
    let result = match_statements(&stmt("p", &["a"]), &stmt("p", &["b"]), &Substitution::empty());
    assert!(matches!(result, UnifyResult::Failure(_)));
}
