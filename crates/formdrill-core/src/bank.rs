//! The formula bank: topics mapped to ordered formula lists.
//!
//! Formulas live in a flat arena and topics hold [`FormulaId`] handles into it,
//! so a formula keeps a stable identity for history lookups no matter how a
//! drill later reorders its topic.

use std::collections::HashMap;

use crate::error::DrillError;
use crate::formula::{Formula, FormulaId};

/// Result of inserting a formula into a topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
    /// The formula was appended to the topic.
    Added(FormulaId),
    /// An equal formula already existed in the topic; nothing changed.
    Duplicate(FormulaId),
}

impl Insertion {
    pub fn id(self) -> FormulaId {
        match self {
            Insertion::Added(id) | Insertion::Duplicate(id) => id,
        }
    }

    pub fn is_duplicate(self) -> bool {
        matches!(self, Insertion::Duplicate(_))
    }
}

#[derive(Debug, Clone)]
struct Topic {
    name: String,
    formulas: Vec<FormulaId>,
}

/// Topic name to ordered formula list, in topic insertion order.
#[derive(Debug, Clone, Default)]
pub struct FormulaBank {
    formulas: Vec<Formula>,
    topics: Vec<Topic>,
    by_name: HashMap<String, usize>,
}

impl FormulaBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a formula to a topic, creating the topic on first use.
    ///
    /// Inserting a formula equal to one already in the same topic is a no-op
    /// that returns [`Insertion::Duplicate`].
    pub fn add_formula(&mut self, topic: &str, formula: Formula) -> Result<Insertion, DrillError> {
        if topic.trim().is_empty() {
            return Err(DrillError::InvalidArgument("topic name is empty".into()));
        }
        if formula.is_blank() {
            return Err(DrillError::InvalidArgument(format!(
                "formula in topic '{topic}' has an empty name or answer"
            )));
        }

        let slot = match self.by_name.get(topic) {
            Some(&slot) => slot,
            None => {
                self.topics.push(Topic {
                    name: topic.to_string(),
                    formulas: Vec::new(),
                });
                let slot = self.topics.len() - 1;
                self.by_name.insert(topic.to_string(), slot);
                slot
            }
        };

        let existing = self.topics[slot]
            .formulas
            .iter()
            .copied()
            .find(|id| self.formulas[id.0] == formula);
        if let Some(id) = existing {
            tracing::warn!(
                "formula '{}' already exists in topic '{}', skipping",
                formula.name(),
                topic
            );
            return Ok(Insertion::Duplicate(id));
        }

        let id = FormulaId(self.formulas.len());
        self.formulas.push(formula);
        self.topics[slot].formulas.push(id);
        Ok(Insertion::Added(id))
    }

    /// Topic names in insertion order.
    pub fn list_topics(&self) -> Vec<String> {
        self.topics.iter().map(|t| t.name.clone()).collect()
    }

    pub fn contains_topic(&self, topic: &str) -> bool {
        self.by_name.contains_key(topic)
    }

    /// Formula handles of a topic in insertion order.
    pub fn formulas_in(&self, topic: &str) -> Result<&[FormulaId], DrillError> {
        self.by_name
            .get(topic)
            .map(|&slot| self.topics[slot].formulas.as_slice())
            .ok_or_else(|| DrillError::UnknownTopic(topic.to_string()))
    }

    /// Checked lookup; `None` for a handle issued by a larger bank.
    pub fn get(&self, id: FormulaId) -> Option<&Formula> {
        self.formulas.get(id.0)
    }

    /// Look up a formula by a handle this bank issued.
    ///
    /// # Panics
    ///
    /// Panics if `id` came from a different bank holding more formulas than
    /// this one. Use [`FormulaBank::get`] when the origin of a handle is not
    /// known.
    pub fn formula(&self, id: FormulaId) -> &Formula {
        &self.formulas[id.0]
    }

    pub fn topic_count(&self) -> usize {
        self.topics.len()
    }

    /// Total number of stored formulas across all topics.
    pub fn len(&self) -> usize {
        self.formulas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formulas.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topics_created_on_first_insert() {
        let mut bank = FormulaBank::new();
        bank.add_formula("Geometry", Formula::new("Area", "πr²")).unwrap();
        bank.add_formula("Algebra", Formula::new("Square", "(a+b)²")).unwrap();
        bank.add_formula("Geometry", Formula::new("Perimeter", "2πr")).unwrap();

        assert_eq!(bank.list_topics(), vec!["Geometry", "Algebra"]);
        assert_eq!(bank.formulas_in("Geometry").unwrap().len(), 2);
        assert_eq!(bank.len(), 3);
    }

    #[test]
    fn duplicate_in_same_topic_is_skipped() {
        let mut bank = FormulaBank::new();
        let first = bank
            .add_formula("Algebra", Formula::new("Quadratic", "x=..."))
            .unwrap();
        let second = bank
            .add_formula("Algebra", Formula::new("Quadratic", "x=..."))
            .unwrap();

        assert_eq!(first, Insertion::Added(first.id()));
        assert!(second.is_duplicate());
        assert_eq!(second.id(), first.id());
        assert_eq!(bank.formulas_in("Algebra").unwrap().len(), 1);
    }

    #[test]
    fn same_formula_in_two_topics_gets_two_ids() {
        let mut bank = FormulaBank::new();
        let a = bank
            .add_formula("Algebra", Formula::new("Pythagoras", "a²+b²=c²"))
            .unwrap();
        let b = bank
            .add_formula("Geometry", Formula::new("Pythagoras", "a²+b²=c²"))
            .unwrap();

        assert!(!b.is_duplicate());
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn blank_input_is_rejected() {
        let mut bank = FormulaBank::new();
        let err = bank
            .add_formula("Algebra", Formula::new("", "x"))
            .unwrap_err();
        assert!(matches!(err, DrillError::InvalidArgument(_)));

        let err = bank
            .add_formula("  ", Formula::new("Area", "πr²"))
            .unwrap_err();
        assert!(matches!(err, DrillError::InvalidArgument(_)));
        assert!(bank.is_empty());
        assert_eq!(bank.topic_count(), 0);
    }

    #[test]
    fn get_rejects_handles_from_a_larger_bank() {
        let mut large = FormulaBank::new();
        large.add_formula("Algebra", Formula::new("Square", "(a+b)²")).unwrap();
        let foreign = large
            .add_formula("Algebra", Formula::new("Cube", "(a+b)³"))
            .unwrap()
            .id();

        let mut small = FormulaBank::new();
        let own = small
            .add_formula("Geometry", Formula::new("Area", "πr²"))
            .unwrap()
            .id();

        assert_eq!(small.get(own).map(Formula::name), Some("Area"));
        assert!(small.get(foreign).is_none());
        assert_eq!(large.get(foreign).map(Formula::answer), Some("(a+b)³"));
    }

    #[test]
    #[should_panic]
    fn formula_panics_on_foreign_handle() {
        let mut large = FormulaBank::new();
        large.add_formula("Algebra", Formula::new("Square", "(a+b)²")).unwrap();
        let foreign = large
            .add_formula("Algebra", Formula::new("Cube", "(a+b)³"))
            .unwrap()
            .id();

        FormulaBank::new().formula(foreign);
    }

    #[test]
    fn unknown_topic_lookup_fails() {
        let bank = FormulaBank::new();
        assert!(matches!(
            bank.formulas_in("Physics"),
            Err(DrillError::UnknownTopic(_))
        ));
    }
}
