//! Shared CLI helpers used across multiple commands.

use std::path::Path;

use anyhow::Context;
use dspreset::{ExportError, ExportOptions, ExportReport, InstrumentPreset, Settings};

/// Import a preset file, naming the file in the error.
pub fn load_preset(path: &Path) -> anyhow::Result<InstrumentPreset> {
    InstrumentPreset::from_dspreset(path)
        .with_context(|| format!("failed to import '{}'", path.display()))
}

/// Export `preset` and remember `output` in the recent files.
///
/// Validation failures are printed one per line before the error is returned.
pub fn export_and_record(
    preset: &InstrumentPreset,
    output: &Path,
    settings: &mut Settings,
    options: &ExportOptions,
    settings_path: &Path,
) -> anyhow::Result<ExportReport> {
    let report = match preset.to_dspreset_with(output, options) {
        Ok(report) => report,
        Err(ExportError::Validation(errors)) => {
            print_validation_errors(&errors);
            anyhow::bail!("{} validation error(s), nothing written", errors.len());
        }
        Err(e) => return Err(e).with_context(|| format!("failed to export '{}'", output.display())),
    };

    settings.push_recent_file(output);
    if let Err(e) = settings.save_to(settings_path) {
        tracing::warn!(error = %e, "could not update recent files");
    }

    print_report(&report);
    Ok(report)
}

/// Print validation errors to stderr.
pub fn print_validation_errors(errors: &[dspreset::ValidationError]) {
    for error in errors {
        eprintln!("  - {error}");
    }
}

fn print_report(report: &ExportReport) {
    println!("Wrote:    {}", report.output.display());
    println!("Controls: {}", report.control_names.len());
    println!("Samples:  {} copied, {} up to date", report.copied, report.skipped);
    for name in &report.dropped_routes {
        println!("Dropped modulation route from unknown LFO '{name}'");
    }
}
