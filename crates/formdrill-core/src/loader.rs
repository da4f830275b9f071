//! Line-oriented formula source loader.
//!
//! Each record is `topic|name|answer`. Lines that do not split into exactly
//! three fields are skipped without complaint, so a partially broken file
//! still loads everything it can.

use std::path::Path;

use crate::bank::FormulaBank;
use crate::error::DrillError;
use crate::formula::Formula;

/// Field separator in formula source files.
pub const FIELD_DELIMITER: char = '|';

/// Counts produced by a single load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    /// Formulas appended to the bank.
    pub added: usize,
    /// Records equal to a formula already in their topic.
    pub duplicates: usize,
    /// Malformed records (wrong field count or a blank field).
    pub skipped: usize,
}

/// Load formulas from in-memory source text.
pub fn load_formulas_str(bank: &mut FormulaBank, content: &str) -> LoadSummary {
    let mut summary = LoadSummary::default();

    for (lineno, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = trimmed.split(FIELD_DELIMITER).map(str::trim).collect();
        let [topic, name, answer] = fields.as_slice() else {
            tracing::debug!(line = lineno + 1, "skipping record with {} fields", fields.len());
            summary.skipped += 1;
            continue;
        };

        match bank.add_formula(topic, Formula::new(*name, *answer)) {
            Ok(insertion) if insertion.is_duplicate() => summary.duplicates += 1,
            Ok(_) => summary.added += 1,
            Err(e) => {
                tracing::debug!(line = lineno + 1, "skipping record: {e}");
                summary.skipped += 1;
            }
        }
    }

    summary
}

/// Load formulas from a UTF-8 file.
///
/// Invalid byte sequences are replaced rather than rejected, so one corrupt
/// line is skipped like any other malformed record. On failure to read the
/// file the bank is left exactly as it was.
pub fn load_formulas_file(bank: &mut FormulaBank, path: &Path) -> Result<LoadSummary, DrillError> {
    let bytes = std::fs::read(path).map_err(|source| DrillError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    let content = String::from_utf8_lossy(&bytes);

    let summary = load_formulas_str(bank, &content);
    tracing::info!(
        "loaded {} formulas from {} ({} duplicates, {} skipped)",
        summary.added,
        path.display(),
        summary.duplicates,
        summary.skipped
    );
    Ok(summary)
}
