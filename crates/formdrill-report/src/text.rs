//! Plain-text statistics summary, as printed at the end of a drill.

use std::fmt::Write;

use formdrill_core::statistics::{StatsReport, TopicStats};

/// Describe the history window a report was computed over.
pub fn window_label(window: Option<usize>) -> String {
    match window {
        Some(n) => format!("Counting the last {n} answers per formula"),
        None => "Counting all answers".to_string(),
    }
}

/// Render a report as the human-readable console summary.
pub fn render_text(report: &StatsReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n|~~~ Statistics ~~~|");
    let _ = writeln!(out, "{}", window_label(report.window));

    for topic in &report.topics {
        render_topic(&mut out, topic);
    }

    out
}

fn render_topic(out: &mut String, topic: &TopicStats) {
    let _ = writeln!(out, "\nTopic: {}", topic.topic);
    let _ = writeln!(out, "Total answers: {}", topic.total);
    let _ = writeln!(
        out,
        "Correct answers: {} ({:.2}%)",
        topic.correct, topic.correct_pct
    );
    let _ = writeln!(
        out,
        "Incorrect answers: {} ({:.2}%)",
        topic.incorrect, topic.incorrect_pct
    );

    if topic.hardest.is_empty() {
        return;
    }

    let _ = writeln!(out, "\nHardest formulas:");
    for hard in &topic.hardest {
        let _ = writeln!(
            out,
            "{}: {} incorrect out of {} ({:.2}%)",
            hard.name, hard.incorrect, hard.total, hard.incorrect_pct
        );
    }
}
