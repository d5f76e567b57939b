//! fclog: a small forward-chaining reasoner with truth maintenance
//!
//! Facts and rules are asserted into a [`kb::KnowledgeBase`], which eagerly
//! derives every consequence by unifying rule antecedents against facts and
//! records, for each derived item, the fact/rule pairs that support it.
//! Retracting a fact removes it and, breadth-first, everything that loses its
//! last justification as a result.

pub mod kb;
pub mod parser;
pub mod repl;
pub mod session;
pub mod syntax;
pub mod unify;
