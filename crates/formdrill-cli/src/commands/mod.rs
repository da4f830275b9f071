pub mod drill;
pub mod init;
pub mod topics;

use std::path::Path;

use formdrill_core::bank::FormulaBank;
use formdrill_core::loader::{load_formulas_file, LoadSummary};

/// Load a formula file, reporting an unreadable source instead of failing.
pub(crate) fn load_bank(path: &Path) -> anyhow::Result<(FormulaBank, LoadSummary)> {
    let mut bank = FormulaBank::new();
    match load_formulas_file(&mut bank, path) {
        Ok(summary) => Ok((bank, summary)),
        Err(e) if e.is_recoverable() => {
            tracing::warn!("{e}");
            eprintln!("Could not open formula file: {}", path.display());
            Ok((bank, LoadSummary::default()))
        }
        Err(e) => Err(e.into()),
    }
}
