use crate::summary::{format_rfc3339, AggregatedSummary, GroupResult};
use std::fmt::Write;

/// Plain-text rendering for terminals. Zero counters are left out, as on the wire.
#[must_use]
pub fn render_text(summary: &AggregatedSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "project {}  seed {}",
        summary.project_id, summary.seed
    );
    let _ = write!(out, "branch {}", summary.branch);
    if !summary.sha.is_empty() {
        let _ = write!(out, "  sha {}", summary.sha);
    }
    out.push('\n');
    let _ = writeln!(
        out,
        "status {}  tests {}",
        summary.overall_status, summary.spec_count
    );
    match (&summary.start_time, &summary.end_time) {
        (Some(start), Some(end)) => {
            let _ = writeln!(out, "span {} .. {}", format_rfc3339(start), format_rfc3339(end));
        }
        (Some(start), None) => {
            let _ = writeln!(out, "started {}", format_rfc3339(start));
        }
        (None, Some(end)) => {
            let _ = writeln!(out, "ended {}", format_rfc3339(end));
        }
        (None, None) => {}
    }

    if summary.groups.is_empty() {
        out.push_str("no specs\n");
        return out;
    }
    out.push('\n');
    for group in &summary.groups {
        out.push_str(&render_group(group));
        out.push('\n');
    }
    out
}

fn render_group(group: &GroupResult) -> String {
    let key = if group.values.is_empty() {
        "(all)".to_string()
    } else {
        group
            .values
            .iter()
            .map(|(c, v)| format!("{c}={v}"))
            .collect::<Vec<_>>()
            .join(" ")
    };
    let counts = group
        .counts
        .non_zero()
        .map(|(name, n)| format!("{name}={n}"))
        .collect::<Vec<_>>()
        .join(" ");
    format!("  {key}  {counts}")
}
