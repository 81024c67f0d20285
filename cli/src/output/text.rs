use crate::commands::diff::Verbosity;
use anyhow::Result;
use std::io::Write;
use textdiff::{distance_similarity, precision_recall, DiffReport, MergedItem};

// Same palette as classic terminal diff visualizers: inserts on green,
// deletes on red, black foreground.
const INSERT_START: &str = "\x1b[30;42m";
const DELETE_START: &str = "\x1b[30;41m";
const COLOR_END: &str = "\x1b[0m";

pub fn write_text_report<W: Write>(
    w: &mut W,
    report: &DiffReport,
    color: bool,
    verbosity: Verbosity,
    stats: bool,
) -> Result<()> {
    if report.is_identical() && verbosity != Verbosity::Quiet {
        writeln!(w, "No differences found.")?;
    }

    if !report.is_identical() && verbosity != Verbosity::Quiet {
        write_token_stream(w, report, color)?;
        writeln!(w)?;
    }

    if verbosity == Verbosity::Verbose {
        write_groups(w, report)?;
    }

    write_summary(w, report)?;

    if stats {
        write_stats(w, report)?;
    }

    Ok(())
}

/// Renders the merged position-ordered stream on one line, marking inserts
/// and deletes. Without color the markers degrade to `+tok` / `-tok`.
fn write_token_stream<W: Write>(w: &mut W, report: &DiffReport, color: bool) -> Result<()> {
    let mut first = true;
    for item in report.merged_items() {
        if !first {
            write!(w, " ")?;
        }
        first = false;
        let token = report.resolve(item.token()).unwrap_or("<unknown>");
        match item {
            MergedItem::Common { .. } => write!(w, "{}", token)?,
            MergedItem::Insert { .. } => {
                if color {
                    write!(w, "{}{}{}", INSERT_START, token, COLOR_END)?;
                } else {
                    write!(w, "+{}", token)?;
                }
            }
            MergedItem::Delete { .. } => {
                if color {
                    write!(w, "{}{}{}", DELETE_START, token, COLOR_END)?;
                } else {
                    write!(w, "-{}", token)?;
                }
            }
        }
    }
    writeln!(w)?;
    Ok(())
}

fn write_groups<W: Write>(w: &mut W, report: &DiffReport) -> Result<()> {
    for (idx, group) in report.replaces.iter().enumerate() {
        writeln!(w, "Region {}:", idx + 1)?;
        for del in &group.deletes {
            writeln!(
                w,
                "  - {} (old position {})",
                report.resolve(del.token).unwrap_or("<unknown>"),
                del.pos_old
            )?;
        }
        for ins in &group.inserts {
            writeln!(
                w,
                "  + {} (new position {})",
                report.resolve(ins.token).unwrap_or("<unknown>"),
                ins.pos_new
            )?;
        }
    }
    if !report.replaces.is_empty() {
        writeln!(w)?;
    }
    Ok(())
}

fn write_summary<W: Write>(w: &mut W, report: &DiffReport) -> Result<()> {
    writeln!(
        w,
        "{} common, {} inserted, {} deleted ({} mismatch regions)",
        report.num_commons(),
        report.num_inserts(),
        report.num_deletes(),
        report.replaces.len()
    )?;
    Ok(())
}

fn write_stats<W: Write>(w: &mut W, report: &DiffReport) -> Result<()> {
    let pr = precision_recall(report);
    let ds = distance_similarity(report);
    writeln!(w, "precision:  {:.4}", pr.precision)?;
    writeln!(w, "recall:     {:.4}", pr.recall)?;
    writeln!(w, "distance:   {}", ds.distance)?;
    writeln!(w, "similarity: {:.4}", ds.similarity)?;
    Ok(())
}
