//! Commands of the knowledge-base surface syntax.

use crate::syntax::Statement;

/// One command from a source file or REPL line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `fact: (p a)`
    Fact(Statement),
    /// `rule: ((p ?x) (q ?x)) -> (r ?x)`
    Rule { lhs: Vec<Statement>, rhs: Statement },
    /// `ask: (p ?x)` or `?- (p ?x)`
    Ask(Statement),
    /// `retract: (p a)`
    Retract(Statement),
    /// `:name args`
    Directive(Directive),
}

/// A directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// Load a file
    Load(String),
    /// Set a configuration option
    Set(String, String),
    /// Print the knowledge base
    Show,
    /// Print a JSON snapshot of the knowledge base
    Dump,
    Help,
    Quit,
}
