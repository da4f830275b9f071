//! The `formdrill drill` command.

use std::io;
use std::path::PathBuf;

use anyhow::Result;

use formdrill_core::config::{load_config_from, ReportFormat};
use formdrill_core::console::IoConsole;
use formdrill_core::engine::{DrillEngine, EndReason};
use formdrill_core::statistics::StatsReport;
use formdrill_report::html::{generate_html, write_html_report};
use formdrill_report::text::render_text;

use super::load_bank;

pub fn execute(
    formulas: Option<PathBuf>,
    topics: Option<String>,
    last: Option<usize>,
    format: Option<String>,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let format: ReportFormat = match format {
        Some(f) => f.parse().map_err(|e: String| anyhow::anyhow!("{}", e))?,
        None => config.report_format,
    };
    let window = last.or(config.stats_window);

    let formulas = formulas.unwrap_or(config.formulas);
    let (bank, summary) = load_bank(&formulas)?;
    if summary.duplicates > 0 {
        eprintln!("Skipped {} duplicate formula(s).", summary.duplicates);
    }

    let selected: Vec<String> = match &topics {
        Some(list) => list
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        None => bank.list_topics(),
    };

    let mut engine = DrillEngine::with_history_capacity(bank, config.history_capacity);
    let mut console = IoConsole::new(io::stdin().lock(), io::stdout());
    let drill = engine.start_drill(&selected, &mut console)?;

    if drill.ended_by == EndReason::NoTopics {
        return Ok(());
    }

    eprintln!(
        "Answered {} formula(s): {} correct, {} incorrect",
        drill.answered, drill.correct, drill.incorrect
    );

    let report = engine.report(window, config.hardest_limit);
    emit_report(&report, format, output)
}

fn emit_report(report: &StatsReport, format: ReportFormat, output: Option<PathBuf>) -> Result<()> {
    match (format, output) {
        (ReportFormat::Text, None) => print!("{}", render_text(report)),
        (ReportFormat::Text, Some(path)) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, render_text(report))?;
            eprintln!("Statistics saved to: {}", path.display());
        }
        (ReportFormat::Json, None) => println!("{}", serde_json::to_string_pretty(report)?),
        (ReportFormat::Json, Some(path)) => {
            report.save_json(&path)?;
            eprintln!("Statistics saved to: {}", path.display());
        }
        (ReportFormat::Html, None) => println!("{}", generate_html(report)),
        (ReportFormat::Html, Some(path)) => {
            write_html_report(report, &path)?;
            eprintln!("HTML report: {}", path.display());
        }
    }
    Ok(())
}
