//! Session: end-to-end API for loading knowledge bases and running commands.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use crate::kb::{
    Fact, ItemId, KbConfig, KbError, KnowledgeBase, ListOfBindings, RetractReport, Rule,
    Verbosity,
};
use crate::parser::{parse_command, parse_file, Command, Directive, ParseError};

pub const HELP: &str = "\
Commands:
  fact: (pred arg ...)                 assert a fact
  rule: ((pred ?x ...) ...) -> (pred ?x ...)   assert a rule
  ask: (pred ?x ...)    ?- (pred ?x ...)      query stored facts
  retract: (pred arg ...)              retract matching facts and their consequences
  :load \"file\"                        run every command in a file
  :set verbosity quiet|assertions|inference
  :set derivation_limit <n>|none
  :show                                print the knowledge base
  :dump                                print a JSON snapshot
  :quit";

/// Result of executing a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecResult {
    Asserted(ItemId),
    Answers(ListOfBindings),
    Retracted(RetractReport),
    DirectiveApplied(DirectiveResult),
}

/// Result of applying a directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectiveResult {
    Loaded { path: String, commands: usize },
    Set { key: String, value: String },
    Shown(String),
    Help,
    Quit,
}

/// Session error.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Kb(#[from] KbError),

    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is already being loaded")]
    RecursiveLoad { path: String },

    #[error("cannot serialize snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),

    #[error("invalid setting {key}={value}: {reason}")]
    Setting {
        key: String,
        value: String,
        reason: String,
    },
}

/// A session owns one knowledge base.
#[derive(Debug, Default)]
pub struct Session {
    kb: KnowledgeBase,
    /// Canonical paths of the files currently being loaded, outermost first.
    loading: Vec<PathBuf>,
}

impl Session {
    /// Create a new empty session.
    pub fn new() -> Self {
        Self::with_config(KbConfig::default())
    }

    /// Create a session with the given configuration.
    pub fn with_config(config: KbConfig) -> Self {
        Session {
            kb: KnowledgeBase::with_config(config),
            loading: Vec::new(),
        }
    }

    /// Parse and execute one line.
    pub fn execute_line(&mut self, line: &str) -> Result<ExecResult, SessionError> {
        let command = parse_command(line)?;
        self.execute(command)
    }

    /// Execute a parsed command.
    pub fn execute(&mut self, command: Command) -> Result<ExecResult, SessionError> {
        match command {
            Command::Ask(query) => Ok(ExecResult::Answers(self.kb.ask(&query)?)),
            Command::Retract(pattern) => Ok(ExecResult::Retracted(self.kb.retract(&pattern))),
            Command::Directive(directive) => {
                Ok(ExecResult::DirectiveApplied(self.apply_directive(directive)?))
            }
            Command::Fact(statement) => {
                Ok(ExecResult::Asserted(self.kb.assert(Fact::new(statement))?))
            }
            Command::Rule { lhs, rhs } => {
                Ok(ExecResult::Asserted(self.kb.assert(Rule::new(lhs, rhs))?))
            }
        }
    }

    /// Execute every command in `source`, stopping at `:quit`.
    pub fn run_source(&mut self, source: &str) -> Result<Vec<ExecResult>, SessionError> {
        let commands = parse_file(source)?;
        let mut results = Vec::with_capacity(commands.len());
        for command in commands {
            let result = self.execute(command)?;
            let quit = result == ExecResult::DirectiveApplied(DirectiveResult::Quit);
            results.push(result);
            if quit {
                break;
            }
        }
        Ok(results)
    }

    /// Load a file and run all of its commands.
    ///
    /// A relative path met while another file is loading is resolved against
    /// that file's directory. Loading a file that is already being loaded is
    /// an error.
    pub fn load_file(&mut self, path: &str) -> Result<DirectiveResult, SessionError> {
        let canonical = self
            .resolve(path)
            .canonicalize()
            .map_err(|source| io_error(path, source))?;
        if self.loading.contains(&canonical) {
            warn!(path, "recursive load refused");
            return Err(SessionError::RecursiveLoad {
                path: path.to_string(),
            });
        }
        let source = fs::read_to_string(&canonical).map_err(|source| io_error(path, source))?;

        self.loading.push(canonical);
        let results = self.run_source(&source);
        self.loading.pop();
        let results = results?;

        info!(path, commands = results.len(), "loaded knowledge base file");
        Ok(DirectiveResult::Loaded {
            path: path.to_string(),
            commands: results.len(),
        })
    }

    fn resolve(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        match self.loading.last().and_then(|current| current.parent()) {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path.to_path_buf(),
        }
    }

    /// Apply a directive.
    pub fn apply_directive(&mut self, directive: Directive) -> Result<DirectiveResult, SessionError> {
        match directive {
            Directive::Load(path) => self.load_file(&path),
            Directive::Set(key, value) => self.set_option(&key, &value),
            Directive::Show => Ok(DirectiveResult::Shown(self.kb.to_string())),
            Directive::Dump => Ok(DirectiveResult::Shown(self.kb.snapshot().to_json()?)),
            Directive::Help => Ok(DirectiveResult::Help),
            Directive::Quit => Ok(DirectiveResult::Quit),
        }
    }

    /// Update the configuration from a key/value pair.
    pub fn set_option(&mut self, key: &str, value: &str) -> Result<DirectiveResult, SessionError> {
        let invalid = |reason: String| SessionError::Setting {
            key: key.to_string(),
            value: value.to_string(),
            reason,
        };
        match key {
            "verbosity" => {
                self.kb.config_mut().verbosity = value.parse::<Verbosity>().map_err(invalid)?;
            }
            "derivation_limit" => {
                self.kb.config_mut().derivation_limit = match value {
                    "none" | "off" => None,
                    n => Some(n.parse::<usize>().map_err(|e| invalid(e.to_string()))?),
                };
            }
            _ => return Err(invalid("unknown setting".to_string())),
        }
        Ok(DirectiveResult::Set {
            key: key.to_string(),
            value: value.to_string(),
        })
    }

    /// Access the knowledge base.
    pub fn kb(&self) -> &KnowledgeBase {
        &self.kb
    }

    pub fn kb_mut(&mut self) -> &mut KnowledgeBase {
        &mut self.kb
    }

    /// Access the current configuration.
    pub fn config(&self) -> &KbConfig {
        self.kb.config()
    }
}

fn io_error(path: &str, source: std::io::Error) -> SessionError {
    SessionError::Io {
        path: path.to_string(),
        source,
    }
}
