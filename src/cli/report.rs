//! Report formatting and printing utilities.
//!
//! The merged report goes to stdout as plain JSON; stale-key warnings and
//! verbose progress go to stderr.

use std::{io::Write, path::Path};

use anyhow::Result;
use colored::Colorize;

use crate::catalog::{Catalog, MergeReport, StaleKeyWarning, SyncObserver};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Print the combined report as pretty JSON.
pub fn print_report_to<W: Write>(report: &MergeReport, writer: &mut W) -> Result<()> {
    writer.write_all(report.to_json()?.as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Print one stale-key block:
///
/// ```text
/// At lang/fr.json:
/// WARN: Message Old label is no longer used!
/// ```
pub fn print_stale_warning_to<W: Write>(warning: &StaleKeyWarning, writer: &mut W) {
    let _ = writeln!(writer, "At {}:", warning.path.display());
    for key in &warning.keys {
        let _ = writeln!(
            writer,
            "{} Message {} is no longer used!",
            "WARN:".bold().yellow(),
            key
        );
    }
}

/// Print a verbose progress line.
pub fn print_progress_to<W: Write>(message: &str, writer: &mut W) {
    let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), message.dimmed());
}

/// Forwards synchronization events to a diagnostics stream.
pub struct Diagnostics<'w, W: Write> {
    writer: &'w mut W,
    verbose: bool,
}

impl<'w, W: Write> Diagnostics<'w, W> {
    pub fn new(writer: &'w mut W, verbose: bool) -> Self {
        Self { writer, verbose }
    }
}

impl<W: Write> SyncObserver for Diagnostics<'_, W> {
    fn stale_keys(&mut self, warning: &StaleKeyWarning) {
        print_stale_warning_to(warning, self.writer);
    }

    fn catalog_synced(&mut self, locale: &str, path: &Path, catalog: &Catalog, written: bool) {
        if !self.verbose {
            return;
        }
        let action = if written { "Updated" } else { "Would update" };
        let message = format!(
            "{} {} ({}, {} {})",
            action,
            path.display(),
            locale,
            catalog.len(),
            if catalog.len() == 1 { "key" } else { "keys" }
        );
        print_progress_to(&message, self.writer);
    }
}
