//! REPL implementation.

use std::io::{self, BufRead, Write};

use thiserror::Error;

use crate::kb::KbConfig;
use crate::session::{DirectiveResult, ExecResult, Session, SessionError, HELP};

/// REPL error.
#[derive(Debug, Error)]
pub enum ReplError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

/// Interactive REPL over one session.
#[derive(Debug, Default)]
pub struct Repl {
    session: Session,
    done: bool,
}

impl Repl {
    /// Create a new REPL.
    pub fn new() -> Self {
        Self::with_config(KbConfig::default())
    }

    pub fn with_config(config: KbConfig) -> Self {
        Repl {
            session: Session::with_config(config),
            done: false,
        }
    }

    /// Load a file into the REPL.
    pub fn load_file(&mut self, path: &str) -> Result<String, ReplError> {
        let result = self.session.load_file(path)?;
        Ok(self.render(ExecResult::DirectiveApplied(result)))
    }

    /// Process a line of input, returning the text to print.
    pub fn process_line(&mut self, line: &str) -> Result<String, ReplError> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with("//") {
            return Ok(String::new());
        }
        let result = self.session.execute_line(trimmed)?;
        Ok(self.render(result))
    }

    fn render(&mut self, result: ExecResult) -> String {
        match result {
            ExecResult::Asserted(id) => format!("Asserted ({}).", id),
            ExecResult::Answers(answers) => answers.to_string(),
            ExecResult::Retracted(report) => {
                let mut out = report.to_string();
                for fact in &report.removed_facts {
                    out.push_str(&format!("\n  - {}", fact));
                }
                for rule in &report.removed_rules {
                    out.push_str(&format!("\n  - {}", rule));
                }
                out
            }
            ExecResult::DirectiveApplied(directive) => match directive {
                DirectiveResult::Loaded { path, commands } => {
                    format!("Loaded {} ({} commands).", path, commands)
                }
                DirectiveResult::Set { key, value } => format!("{} = {}", key, value),
                DirectiveResult::Shown(text) => text.trim_end().to_string(),
                DirectiveResult::Help => HELP.to_string(),
                DirectiveResult::Quit => {
                    self.done = true;
                    "Bye.".to_string()
                }
            },
        }
    }

    /// Whether `:quit` has been processed.
    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Run the REPL on stdin/stdout until end of input or `:quit`.
    pub fn run(&mut self) -> Result<(), ReplError> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        let mut lines = stdin.lock().lines();

        while !self.done {
            write!(stdout, "fclog> ")?;
            stdout.flush()?;
            let Some(line) = lines.next() else {
                writeln!(stdout)?;
                break;
            };
            match self.process_line(&line?) {
                Ok(output) if output.is_empty() => {}
                Ok(output) => writeln!(stdout, "{}", output)?,
                Err(e) => eprintln!("Error: {}", e),
            }
        }
        Ok(())
    }
}
