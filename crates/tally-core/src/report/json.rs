use crate::summary::AggregatedSummary;
use std::path::Path;

pub fn to_json(summary: &AggregatedSummary, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(summary)
    } else {
        serde_json::to_string(summary)
    }
}

pub fn write_json(summary: &AggregatedSummary, out: &Path) -> anyhow::Result<()> {
    std::fs::write(out, to_json(summary, true)?)?;
    Ok(())
}
