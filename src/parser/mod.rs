//! Parser for the knowledge-base surface syntax.

mod ast;
mod lexer;
mod parser;

pub use ast::{Command, Directive};
pub use parser::{parse_command, parse_file, parse_statement, ParseError};
