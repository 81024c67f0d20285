use anyhow::Result;
use serde_json::json;
use std::io::Write;
use textdiff::{distance_similarity, precision_recall, DiffReport};

/// Writes the report as pretty JSON; with `stats` the metrics ride along
/// under a separate key so the report schema stays unchanged.
pub fn write_json_report<W: Write>(w: &mut W, report: &DiffReport, stats: bool) -> Result<()> {
    if stats {
        let pr = precision_recall(report);
        let ds = distance_similarity(report);
        let payload = json!({
            "report": report,
            "metrics": {
                "precision": pr.precision,
                "recall": pr.recall,
                "true_positives": pr.true_positives,
                "false_positives": pr.false_positives,
                "false_negatives": pr.false_negatives,
                "distance": ds.distance,
                "similarity": ds.similarity,
            },
        });
        serde_json::to_writer_pretty(&mut *w, &payload)?;
    } else {
        serde_json::to_writer_pretty(&mut *w, report)?;
    }
    writeln!(w)?;
    Ok(())
}
