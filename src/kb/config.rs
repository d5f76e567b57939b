//! Per-knowledge-base configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How much the knowledge base reports about its own work.
///
/// Owned by each knowledge base; diagnostics (invalid asks, refused
/// retractions, exhausted derivation limits) are reported at every level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verbosity {
    /// Diagnostics only.
    #[default]
    Quiet,
    /// Every external assert and retract.
    Assertions,
    /// Additionally every resolution attempt, insertion and merge.
    Inference,
}

impl FromStr for Verbosity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "quiet" | "0" => Ok(Verbosity::Quiet),
            "assertions" | "1" => Ok(Verbosity::Assertions),
            "inference" | "2" => Ok(Verbosity::Inference),
            _ => Err(format!(
                "unknown verbosity '{}' (expected quiet, assertions or inference)",
                s
            )),
        }
    }
}

impl fmt::Display for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Verbosity::Quiet => "quiet",
            Verbosity::Assertions => "assertions",
            Verbosity::Inference => "inference",
        };
        write!(f, "{}", name)
    }
}

/// Configuration for a knowledge base.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KbConfig {
    pub verbosity: Verbosity,
    /// Maximum number of derivations a single `assert` may process
    /// (None for unlimited).
    pub derivation_limit: Option<usize>,
}

impl KbConfig {
    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub fn with_derivation_limit(mut self, limit: Option<usize>) -> Self {
        self.derivation_limit = limit;
        self
    }
}
