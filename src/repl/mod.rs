//! Line-oriented interactive front end.

mod repl;

pub use repl::{Repl, ReplError};
