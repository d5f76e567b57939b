use thiserror::Error;

use crate::syntax::Statement;

/// Errors reported by knowledge-base operations.
///
/// None of these leave the store in an inconsistent state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KbError {
    #[error("invalid ask: {query} is not a positive fact query")]
    InvalidQuery { query: Statement },

    #[error("rule has no antecedents")]
    EmptyRule,

    #[error("derivation limit of {limit} reached; remaining derivations were dropped")]
    DerivationLimit { limit: usize },
}
