//! The formula value type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A named formula and the answer the user is expected to recall.
///
/// Immutable once built; two formulas are equal when both name and answer match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Formula {
    name: String,
    answer: String,
}

impl Formula {
    pub fn new(name: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            answer: answer.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    /// A formula is blank if either half is empty after trimming.
    pub fn is_blank(&self) -> bool {
        self.name.trim().is_empty() || self.answer.trim().is_empty()
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.name, self.answer)
    }
}

/// Opaque handle to a formula stored in a [`FormulaBank`](crate::bank::FormulaBank).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FormulaId(pub(crate) usize);

impl FormulaId {
    pub fn index(self) -> usize {
        self.0
    }
}
