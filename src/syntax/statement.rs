//! Statements: signed predicate applications.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::term::{Term, Var};
use crate::unify::Substitution;

/// An atom (predicate application).
///
/// In S-expression syntax: `(predicate arg1 arg2 ...)`
/// Examples:
/// - `(isa cube block)` - binary predicate
/// - `(color ?x red)` - with a variable
/// - `(raining)` - 0-ary predicate
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Atom {
    pub predicate: String,
    pub args: Vec<Term>,
}

impl Atom {
    pub fn new(predicate: impl Into<String>, args: Vec<Term>) -> Self {
        Atom {
            predicate: predicate.into(),
            args,
        }
    }

    /// Collect all variables in this atom.
    pub fn variables(&self) -> HashSet<Var> {
        let mut set = HashSet::new();
        for arg in &self.args {
            arg.collect_variables(&mut set);
        }
        set
    }

    /// Check if this atom is ground (contains no variables).
    pub fn is_ground(&self) -> bool {
        self.args.iter().all(|arg| arg.is_ground())
    }

    /// Apply a substitution to this atom.
    pub fn apply_subst(&self, subst: &Substitution) -> Atom {
        Atom {
            predicate: self.predicate.clone(),
            args: self.args.iter().map(|arg| subst.apply_to_term(arg)).collect(),
        }
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}", self.predicate)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        write!(f, ")")
    }
}

/// A statement is a signed atom.
///
/// - Positive: `(isa cube block)` asserts that the atom holds
/// - Negative: `~(isa cube block)` denies it
///
/// Equality is structural: two statements are equal iff sign, predicate
/// and every argument tree match exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Statement {
    /// True if positive, false if negated
    pub positive: bool,
    /// The underlying atom
    pub atom: Atom,
}

impl Statement {
    /// Create a positive statement.
    pub fn positive(atom: Atom) -> Self {
        Statement {
            positive: true,
            atom,
        }
    }

    /// Create a negative statement.
    pub fn negative(atom: Atom) -> Self {
        Statement {
            positive: false,
            atom,
        }
    }

    /// Create a positive statement from predicate and args.
    pub fn pos(predicate: impl Into<String>, args: Vec<Term>) -> Self {
        Statement::positive(Atom::new(predicate, args))
    }

    /// Create a negative statement from predicate and args.
    pub fn neg(predicate: impl Into<String>, args: Vec<Term>) -> Self {
        Statement::negative(Atom::new(predicate, args))
    }

    pub fn predicate(&self) -> &str {
        &self.atom.predicate
    }

    pub fn args(&self) -> &[Term] {
        &self.atom.args
    }

    /// Return the negation of this statement.
    pub fn negated(&self) -> Statement {
        Statement {
            positive: !self.positive,
            atom: self.atom.clone(),
        }
    }

    /// Collect all variables in this statement.
    pub fn variables(&self) -> HashSet<Var> {
        self.atom.variables()
    }

    /// Check if this statement is ground.
    pub fn is_ground(&self) -> bool {
        self.atom.is_ground()
    }

    /// Apply a substitution to this statement.
    pub fn apply_subst(&self, subst: &Substitution) -> Statement {
        Statement {
            positive: self.positive,
            atom: self.atom.apply_subst(subst),
        }
    }
}

/// Whether `stmt` is a well-formed question for the knowledge base.
///
/// Only plain positive statements can be asked.
pub fn is_fact_query(stmt: &Statement) -> bool {
    stmt.positive
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.positive {
            write!(f, "~")?;
        }
        write!(f, "{}", self.atom)
    }
}
