//! Results of asking the knowledge base.

use std::fmt;

use super::item::FactId;
use crate::syntax::Statement;
use crate::unify::Substitution;

/// A stored fact that an answer rests on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evidence {
    pub id: FactId,
    pub statement: Statement,
}

/// One way a query matched the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub bindings: Substitution,
    pub evidence: Vec<Evidence>,
}

/// Every answer to a query, in store order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOfBindings {
    answers: Vec<Answer>,
}

impl ListOfBindings {
    pub fn new() -> Self {
        ListOfBindings::default()
    }

    pub fn add_bindings(&mut self, bindings: Substitution, evidence: Vec<Evidence>) {
        self.answers.push(Answer { bindings, evidence });
    }

    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Answer> {
        self.answers.iter()
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    /// The term bound to variable `name` in each answer, in order.
    pub fn values_of(&self, name: &str) -> Vec<String> {
        self.answers
            .iter()
            .filter_map(|a| a.bindings.bound_to(name).map(|t| t.to_string()))
            .collect()
    }
}

impl<'a> IntoIterator for &'a ListOfBindings {
    type Item = &'a Answer;
    type IntoIter = std::slice::Iter<'a, Answer>;

    fn into_iter(self) -> Self::IntoIter {
        self.answers.iter()
    }
}

impl IntoIterator for ListOfBindings {
    type Item = Answer;
    type IntoIter = std::vec::IntoIter<Answer>;

    fn into_iter(self) -> Self::IntoIter {
        self.answers.into_iter()
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.bindings.is_empty() {
            write!(f, "Yes")?;
        } else {
            write!(f, "{}", self.bindings)?;
        }
        for evidence in &self.evidence {
            write!(f, "  <- fact: {}", evidence.statement)?;
        }
        Ok(())
    }
}

impl fmt::Display for ListOfBindings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.answers.is_empty() {
            return write!(f, "No");
        }
        for (i, answer) in self.answers.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", answer)?;
        }
        Ok(())
    }
}
