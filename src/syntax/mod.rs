//! Syntax types for terms and statements.

mod statement;
mod term;

pub use statement::{is_fact_query, Atom, Statement};
pub use term::{FnSym, Term, Var};
