//! Plain-text rendering of queue reports.

use std::fmt::Write;

use contact_queue::{QueueReport, QueueSummary};

pub fn table(report: &QueueReport<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Contact queue for {}", report.today);
    if report.items.is_empty() {
        let _ = writeln!(out, "  (nobody to contact)");
        return out;
    }
    let _ = writeln!(out, "{:>4}  {:>5}  {:>4}  {}", "#", "days", "risk", "placement");
    for (rank, item) in report.items.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>4}  {:>5}  {:>4}  {}",
            rank + 1,
            item.days_since_last_contact,
            item.risk_score,
            item.explain()
        );
    }
    out
}

pub fn exclusions(report: &QueueReport<'_>) -> String {
    let mut out = String::new();
    if report.excluded.is_empty() {
        return out;
    }
    let _ = writeln!(out, "\nExcluded:");
    for exclusion in &report.excluded {
        let _ = writeln!(out, "  record {:>6}  {}", exclusion.record_id, exclusion.reason.as_str());
    }
    out
}

pub fn summary(summary: &QueueSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "\n{} records, {} eligible, {} excluded, {} over capacity, {} overdue",
        summary.total_records, summary.eligible, summary.excluded, summary.truncated, summary.overdue
    );
    let levels: Vec<String> = summary
        .by_level
        .iter()
        .filter(|(_, count)| **count > 0)
        .map(|(level, count)| format!("{}={}", level, count))
        .collect();
    if !levels.is_empty() {
        let _ = writeln!(out, "levels: {}", levels.join(", "));
    }
    out
}
