//! Per-topic answer statistics and hardest-formula ranking.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::bank::FormulaBank;
use crate::history::{AnswerHistory, Tally};

/// Default number of hardest formulas listed per topic.
pub const DEFAULT_HARDEST_LIMIT: usize = 3;

/// Statistics for every topic in a bank.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// Drill session the answers came from, if any.
    #[serde(default)]
    pub session_id: Option<Uuid>,
    /// When the report was computed.
    pub created_at: DateTime<Utc>,
    /// Most recent answers counted per formula; `None` means full history.
    pub window: Option<usize>,
    /// One entry per topic, in bank order.
    pub topics: Vec<TopicStats>,
}

/// Aggregate counts for one topic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicStats {
    pub topic: String,
    pub total: usize,
    pub correct: usize,
    pub incorrect: usize,
    /// Share of correct answers in percent, unrounded.
    pub correct_pct: f64,
    /// Share of incorrect answers in percent, unrounded.
    pub incorrect_pct: f64,
    /// Formulas with the most incorrect answers, worst first.
    pub hardest: Vec<HardFormula>,
}

/// A formula that was missed at least once in the window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HardFormula {
    pub name: String,
    pub incorrect: usize,
    pub total: usize,
    pub incorrect_pct: f64,
}

/// `part` as a percentage of `whole`; zero when `whole` is zero.
pub fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64 * 100.0
}

/// Compute statistics for every topic in the bank.
///
/// With `window = Some(n)` only the `n` most recent answers of each formula
/// are counted.
pub fn compute_report(
    bank: &FormulaBank,
    history: &AnswerHistory,
    window: Option<usize>,
    hardest_limit: usize,
) -> StatsReport {
    let topics = bank
        .list_topics()
        .into_iter()
        .map(|topic| compute_topic_stats(bank, history, &topic, window, hardest_limit))
        .collect();

    StatsReport {
        id: Uuid::new_v4(),
        session_id: None,
        created_at: Utc::now(),
        window,
        topics,
    }
}

/// Compute statistics for one topic. An unknown topic yields empty stats.
pub fn compute_topic_stats(
    bank: &FormulaBank,
    history: &AnswerHistory,
    topic: &str,
    window: Option<usize>,
    hardest_limit: usize,
) -> TopicStats {
    let ids = bank.formulas_in(topic).unwrap_or_default();

    let per_formula: Vec<(usize, Tally)> = ids
        .iter()
        .enumerate()
        .map(|(pos, &id)| (pos, history.tally(id, window)))
        .collect();

    let mut totals = Tally::default();
    for (_, tally) in &per_formula {
        totals.merge(*tally);
    }

    let mut missed: Vec<(usize, Tally)> = per_formula
        .into_iter()
        .filter(|(_, t)| t.incorrect > 0)
        .collect();
    // Stable: equal counts keep bank order.
    missed.sort_by(|a, b| b.1.incorrect.cmp(&a.1.incorrect));

    let hardest = missed
        .into_iter()
        .take(hardest_limit)
        .map(|(pos, tally)| HardFormula {
            name: bank.formula(ids[pos]).name().to_string(),
            incorrect: tally.incorrect,
            total: tally.total(),
            incorrect_pct: percentage(tally.incorrect, tally.total()),
        })
        .collect();

    TopicStats {
        topic: topic.to_string(),
        total: totals.total(),
        correct: totals.correct,
        incorrect: totals.incorrect,
        correct_pct: percentage(totals.correct, totals.total()),
        incorrect_pct: percentage(totals.incorrect, totals.total()),
        hardest,
    }
}

impl StatsReport {
    /// Look up a topic's stats by name.
    pub fn topic(&self, name: &str) -> Option<&TopicStats> {
        self.topics.iter().find(|t| t.topic == name)
    }

    /// Total answers counted across all topics.
    pub fn total_answers(&self) -> usize {
        self.topics.iter().map(|t| t.total).sum()
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: StatsReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }
}
