//! Bounded per-formula answer history.
//!
//! Every formula gets a FIFO queue of outcomes (`true` = answered correctly).
//! Queues are created on the first recorded answer and never exceed the
//! configured capacity: at capacity the oldest outcome is evicted before the
//! new one is appended.

use std::collections::{HashMap, VecDeque};

use serde::{Deserialize, Serialize};

use crate::formula::FormulaId;

/// Default number of outcomes kept per formula.
pub const DEFAULT_HISTORY_CAPACITY: usize = 1000;

/// Correct/incorrect counts over some window of a history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub correct: usize,
    pub incorrect: usize,
}

impl Tally {
    pub fn total(&self) -> usize {
        self.correct + self.incorrect
    }

    /// Tally a sequence of outcomes.
    pub fn of(outcomes: impl IntoIterator<Item = bool>) -> Self {
        outcomes.into_iter().fold(Self::default(), |mut t, ok| {
            if ok {
                t.correct += 1;
            } else {
                t.incorrect += 1;
            }
            t
        })
    }

    /// Fold another tally into this one.
    pub fn merge(&mut self, other: Tally) {
        self.correct += other.correct;
        self.incorrect += other.incorrect;
    }
}

/// Answer history store keyed by formula handle.
#[derive(Debug, Clone)]
pub struct AnswerHistory {
    capacity: usize,
    entries: HashMap<FormulaId, VecDeque<bool>>,
}

impl Default for AnswerHistory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

impl AnswerHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store keeping at most `capacity` outcomes per formula.
    ///
    /// A capacity of zero is raised to one.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: HashMap::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append an outcome, evicting the oldest one when the queue is full.
    pub fn record_answer(&mut self, formula: FormulaId, is_correct: bool) {
        let queue = self.entries.entry(formula).or_default();
        while queue.len() >= self.capacity {
            queue.pop_front();
        }
        queue.push_back(is_correct);
        tracing::debug!(
            formula = formula.index(),
            is_correct,
            len = queue.len(),
            "recorded answer"
        );
    }

    /// The most recent `limit` outcomes (or all of them), oldest first.
    pub fn get_history(&self, formula: FormulaId, limit: Option<usize>) -> Vec<bool> {
        self.window(formula, limit).collect()
    }

    /// Iterate over the most recent `limit` outcomes without copying.
    pub fn window(
        &self,
        formula: FormulaId,
        limit: Option<usize>,
    ) -> impl Iterator<Item = bool> + '_ {
        let queue = self.entries.get(&formula);
        let len = queue.map_or(0, VecDeque::len);
        let skip = limit.map_or(0, |n| len.saturating_sub(n));
        queue.into_iter().flatten().skip(skip).copied()
    }

    /// Correct/incorrect counts over a window.
    pub fn tally(&self, formula: FormulaId, limit: Option<usize>) -> Tally {
        Tally::of(self.window(formula, limit))
    }

    /// Fraction of incorrect outcomes in the full history.
    ///
    /// A formula that was never answered has an error rate of exactly 0.0.
    pub fn error_rate(&self, formula: FormulaId) -> f64 {
        let tally = self.tally(formula, None);
        if tally.total() == 0 {
            return 0.0;
        }
        tally.incorrect as f64 / tally.total() as f64
    }

    /// Number of outcomes stored for a formula.
    pub fn len(&self, formula: FormulaId) -> usize {
        self.entries.get(&formula).map_or(0, VecDeque::len)
    }

    /// Returns `true` if no formula has any recorded outcome.
    pub fn is_empty(&self) -> bool {
        self.entries.values().all(VecDeque::is_empty)
    }
}
