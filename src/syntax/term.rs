//! Terms: variables and symbol applications (including 0-ary constants).

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::unify::Substitution;

/// A variable.
///
/// Variables are written `?name` in the surface syntax; the stored name
/// omits the leading `?`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Var {
    name: String,
}

impl Var {
    pub fn new(name: impl Into<String>) -> Self {
        Var { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "?{}", self.name)
    }
}

/// A symbol with its arity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FnSym {
    pub name: String,
    pub arity: usize,
}

impl FnSym {
    pub fn new(name: impl Into<String>, arity: usize) -> Self {
        FnSym {
            name: name.into(),
            arity,
        }
    }
}

/// A term.
///
/// Terms are built from variables and applications (constants are 0-ary applications).
/// In S-expression syntax:
/// - Variables: `?x`, `?block`
/// - Constants: `cube`, `red`, `42`
/// - Applications: `(f a ?x)`, `(color cube)`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Term {
    /// A variable
    Var(Var),
    /// Application: f(t1, ..., tn)
    App(FnSym, Vec<Term>),
}

impl Term {
    /// Create a variable term.
    pub fn var(name: impl Into<String>) -> Self {
        Term::Var(Var::new(name))
    }

    /// Create a constant term.
    pub fn constant(name: impl Into<String>) -> Self {
        Term::App(FnSym::new(name, 0), Vec::new())
    }

    /// Create an application term.
    pub fn app(name: impl Into<String>, args: Vec<Term>) -> Self {
        let arity = args.len();
        Term::App(FnSym::new(name, arity), args)
    }

    pub fn is_var(&self) -> bool {
        matches!(self, Term::Var(_))
    }

    /// Collect all variables occurring in this term.
    pub fn variables(&self) -> HashSet<Var> {
        let mut set = HashSet::new();
        self.collect_variables(&mut set);
        set
    }

    pub(crate) fn collect_variables(&self, set: &mut HashSet<Var>) {
        match self {
            Term::Var(var) => {
                set.insert(var.clone());
            }
            Term::App(_, args) => {
                for arg in args {
                    arg.collect_variables(set);
                }
            }
        }
    }

    /// Check if this term contains no variables (is ground).
    pub fn is_ground(&self) -> bool {
        match self {
            Term::Var(_) => false,
            Term::App(_, args) => args.iter().all(|arg| arg.is_ground()),
        }
    }

    /// Apply a substitution to this term.
    pub fn apply_subst(&self, subst: &Substitution) -> Term {
        subst.apply_to_term(self)
    }

    /// Get the head symbol of this term. Returns None for variables.
    pub fn symbol(&self) -> Option<&str> {
        match self {
            Term::Var(_) => None,
            Term::App(fn_sym, _) => Some(&fn_sym.name),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Var(var) => write!(f, "{}", var),
            Term::App(fn_sym, args) => {
                if args.is_empty() {
                    write!(f, "{}", fn_sym.name)
                } else {
                    write!(f, "({}", fn_sym.name)?;
                    for arg in args {
                        write!(f, " {}", arg)?;
                    }
                    write!(f, ")")
                }
            }
        }
    }
}
