//! Matching two statements under a binding, and instantiating statements.

use super::Substitution;
use crate::syntax::{Statement, Term, Var};

/// Result of a matching attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnifyResult {
    /// Matching succeeded with the given (extended) binding.
    Success(Substitution),
    /// Matching failed.
    Failure(UnifyError),
}

impl UnifyResult {
    pub fn is_success(&self) -> bool {
        matches!(self, UnifyResult::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, UnifyResult::Failure(_))
    }

    /// Convert into an optional binding, discarding the failure reason.
    pub fn ok(self) -> Option<Substitution> {
        match self {
            UnifyResult::Success(subst) => Some(subst),
            UnifyResult::Failure(_) => None,
        }
    }
}

/// Reasons why matching can fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnifyError {
    /// One statement is negated and the other is not.
    SignMismatch,
    /// Predicates don't match.
    PredicateClash { expected: String, found: String },
    /// Symbols don't match.
    SymbolClash { expected: String, found: String },
    /// Argument count differs for the same symbol or predicate.
    ArityMismatch {
        symbol: String,
        expected: usize,
        found: usize,
    },
    /// A variable is already bound to a different term.
    BindingConflict { var: Var, bound: Term, found: Term },
}

/// Match `pattern` against `target`, extending `subst`.
///
/// Variables on either side may bind to the term opposite them. A variable
/// that is already bound must meet a structurally equal term. The input
/// binding is not modified.
pub fn match_statements(pattern: &Statement, target: &Statement, subst: &Substitution) -> UnifyResult {
    if pattern.positive != target.positive {
        return UnifyResult::Failure(UnifyError::SignMismatch);
    }
    if pattern.predicate() != target.predicate() {
        return UnifyResult::Failure(UnifyError::PredicateClash {
            expected: pattern.predicate().to_string(),
            found: target.predicate().to_string(),
        });
    }
    if pattern.args().len() != target.args().len() {
        return UnifyResult::Failure(UnifyError::ArityMismatch {
            symbol: pattern.predicate().to_string(),
            expected: pattern.args().len(),
            found: target.args().len(),
        });
    }

    let mut result = subst.clone();
    for (p, t) in pattern.args().iter().zip(target.args()) {
        if let Err(e) = match_into(p, t, &mut result) {
            return UnifyResult::Failure(e);
        }
    }
    UnifyResult::Success(result)
}

/// Match two terms, extending `subst`. See [`match_statements`].
pub fn match_terms(pattern: &Term, target: &Term, subst: &Substitution) -> UnifyResult {
    let mut result = subst.clone();
    match match_into(pattern, target, &mut result) {
        Ok(()) => UnifyResult::Success(result),
        Err(e) => UnifyResult::Failure(e),
    }
}

fn match_into(pattern: &Term, target: &Term, subst: &mut Substitution) -> Result<(), UnifyError> {
    match (pattern, target) {
        (Term::Var(v), other) | (other, Term::Var(v)) => bind(v, other, subst),
        (Term::App(f, f_args), Term::App(g, g_args)) => {
            if f.name != g.name {
                return Err(UnifyError::SymbolClash {
                    expected: f.name.clone(),
                    found: g.name.clone(),
                });
            }
            if f_args.len() != g_args.len() {
                return Err(UnifyError::ArityMismatch {
                    symbol: f.name.clone(),
                    expected: f_args.len(),
                    found: g_args.len(),
                });
            }
            for (a, b) in f_args.iter().zip(g_args) {
                match_into(a, b, subst)?;
            }
            Ok(())
        }
    }
}

fn bind(var: &Var, term: &Term, subst: &mut Substitution) -> Result<(), UnifyError> {
    if subst.test_and_bind(var, term) {
        return Ok(());
    }
    let bound = subst.lookup(var).cloned().unwrap_or_else(|| Term::Var(var.clone()));
    Err(UnifyError::BindingConflict {
        var: var.clone(),
        bound,
        found: term.clone(),
    })
}

/// Replace every bound variable of `stmt` by its binding.
///
/// Variables absent from `subst` remain variables.
pub fn instantiate(stmt: &Statement, subst: &Substitution) -> Statement {
    stmt.apply_subst(subst)
}
