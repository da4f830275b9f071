//! The `formdrill topics` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use formdrill_core::config::load_config_from;

use super::load_bank;

pub fn execute(formulas: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let formulas = formulas.unwrap_or(config.formulas);

    let (bank, summary) = load_bank(&formulas)?;

    if bank.topic_count() == 0 {
        println!("No topics available. Run `formdrill init` to create a sample formula file.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Topic", "Formulas"]);
    for topic in bank.list_topics() {
        let count = bank.formulas_in(&topic)?.len();
        table.add_row(vec![Cell::new(&topic), Cell::new(count)]);
    }
    println!("{table}");

    println!("{} topic(s), {} formula(s)", bank.topic_count(), bank.len());
    if summary.duplicates > 0 {
        println!("{} duplicate formula(s) skipped.", summary.duplicates);
    }
    if summary.skipped > 0 {
        println!("{} malformed line(s) skipped.", summary.skipped);
    }

    Ok(())
}
