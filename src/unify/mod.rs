//! Unification: matching statements and applying bindings.

mod substitution;
mod unify;

pub use substitution::Substitution;
pub use unify::{instantiate, match_statements, match_terms, UnifyError, UnifyResult};
