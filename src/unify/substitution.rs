//! Substitution: mapping variables to terms.

use std::collections::BTreeMap;
use std::fmt;

use crate::syntax::{Term, Var};

/// A substitution (binding set) mapping variables to terms.
///
/// A substitution σ = {?x₁ → t₁, ..., ?xₙ → tₙ} maps variables to terms.
/// Bindings are kept ordered by variable so that answers print deterministically.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Substitution {
    bindings: BTreeMap<Var, Term>,
}

impl Substitution {
    /// Create an empty substitution (identity).
    pub fn empty() -> Self {
        Substitution {
            bindings: BTreeMap::new(),
        }
    }

    /// Create a substitution with a single binding.
    pub fn singleton(var: Var, term: Term) -> Self {
        let mut subst = Substitution::empty();
        subst.bind(var, term);
        subst
    }

    /// Add a binding to this substitution, replacing any previous one.
    pub fn bind(&mut self, var: Var, term: Term) {
        self.bindings.insert(var, term);
    }

    /// Bind `var` to `term` unless it is already bound to something else.
    ///
    /// Returns false when `var` is bound to a term that is not structurally
    /// equal to `term`; the substitution is left untouched in that case.
    pub fn test_and_bind(&mut self, var: &Var, term: &Term) -> bool {
        match self.bindings.get(var) {
            Some(bound) => bound == term,
            None => {
                self.bindings.insert(var.clone(), term.clone());
                true
            }
        }
    }

    /// Look up a variable in this substitution.
    pub fn lookup(&self, var: &Var) -> Option<&Term> {
        self.bindings.get(var)
    }

    /// Look up a variable by name (without the leading `?`).
    pub fn bound_to(&self, name: &str) -> Option<&Term> {
        self.bindings.get(&Var::new(name))
    }

    /// Compose two substitutions: (self ∘ other)(x) = self(other(x))
    pub fn compose(&self, other: &Substitution) -> Substitution {
        let mut result = Substitution::empty();

        for (var, term) in &other.bindings {
            result.bind(var.clone(), self.apply_to_term(term));
        }

        for (var, term) in &self.bindings {
            if !other.bindings.contains_key(var) {
                result.bind(var.clone(), term.clone());
            }
        }

        result
    }

    /// Apply this substitution to a term.
    ///
    /// Each variable is replaced once; a binding whose value is itself a
    /// bound variable is not chased further.
    pub fn apply_to_term(&self, term: &Term) -> Term {
        match term {
            Term::Var(var) => match self.bindings.get(var) {
                Some(t) => t.clone(),
                None => term.clone(),
            },
            Term::App(fn_sym, args) => {
                let new_args: Vec<Term> = args.iter().map(|arg| self.apply_to_term(arg)).collect();
                Term::App(fn_sym.clone(), new_args)
            }
        }
    }

    /// Iterate over the bindings in variable order.
    pub fn bindings(&self) -> impl Iterator<Item = (&Var, &Term)> {
        self.bindings.iter()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Check if this substitution is empty (has no bindings).
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl fmt::Display for Substitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (var, term) in &self.bindings {
            if !first {
                write!(f, ", ")?;
            }
            first = false;
            write!(f, "{} : {}", var, term)?;
        }
        Ok(())
    }
}
