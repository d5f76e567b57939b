//! Knowledge base: facts and rules with justification links, eager forward
//! chaining on assertion, and truth-maintenance retraction.

mod answer;
mod config;
mod error;
mod infer;
mod item;
mod snapshot;
mod store;

pub use answer::{Answer, Evidence, ListOfBindings};
pub use config::{KbConfig, Verbosity};
pub use error::KbError;
pub use infer::{resolve_step, Derivation, Derived};
pub use item::{Fact, FactId, Item, ItemId, Rule, RuleId, Support};
pub use snapshot::{FactEntry, KbSnapshot, RuleEntry, SupportEntry};
pub use store::{KnowledgeBase, RetractReport};
