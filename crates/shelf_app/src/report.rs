//! Console summary of a finished run.

use shelf_engine::{Capability, RunReport};

/// Lines printed after a run that did not fail.
pub fn summary_lines(report: &RunReport) -> Vec<String> {
    if report.extraction_skipped {
        return vec![format!(
            "{} disabled; nothing fetched.",
            Capability::RunWebsiteParser
        )];
    }
    let mut lines = Vec::new();
    if report.sinks.is_empty() {
        lines.push(format!(
            "Extracted {} items; no output sink enabled.",
            report.catalog.len()
        ));
    } else {
        lines.push(format!("Saved {} items to:", report.catalog.len()));
    }
    for sink in &report.sinks {
        match &sink.result {
            Ok(summary) if summary.files_written == 1 => {
                lines.push(format!("  {}: {}", sink.sink, summary.destination.display()));
            }
            Ok(summary) => lines.push(format!(
                "  {}: {} ({} files)",
                sink.sink,
                summary.destination.display(),
                summary.files_written
            )),
            Err(err) => lines.push(format!(
                "  {}: FAILED writing {}: {}",
                sink.sink,
                sink.destination.display(),
                err
            )),
        }
    }
    for store in &report.stores {
        lines.push(format!("  {}: {} (not stored)", store.kind, store.target));
    }
    lines
}
