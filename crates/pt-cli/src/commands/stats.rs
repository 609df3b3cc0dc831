//! Stats command: minutes per activity.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;
use pt_core::{ActivityReport, Training, aggregate_by_activity};
use serde::Serialize;

use super::util::{fit, format_minutes, progress_bar};

const ACTIVITY_WIDTH: usize = 20;

/// Formats the human-readable statistics.
pub fn format_stats(report: &ActivityReport) -> String {
    let mut output = String::new();

    writeln!(output, "TRAINING STATISTICS").unwrap();
    writeln!(output).unwrap();

    let Some(top) = report.most_popular() else {
        writeln!(output, "No training sessions recorded.").unwrap();
        return output;
    };

    writeln!(output, "MINUTES PER ACTIVITY").unwrap();
    writeln!(output, "────────────────────").unwrap();
    for entry in &report.entries {
        writeln!(
            output,
            "{:<ACTIVITY_WIDTH$}  {:>5} min  {}",
            fit(&entry.activity, ACTIVITY_WIDTH),
            entry.minutes,
            progress_bar(entry.minutes, top.minutes),
        )
        .unwrap();
    }

    let total = report.total_minutes();
    writeln!(output).unwrap();
    writeln!(output, "SUMMARY").unwrap();
    writeln!(output, "───────").unwrap();
    writeln!(output, "Total activities:      {}", report.activity_count()).unwrap();
    writeln!(
        output,
        "Total training time:   {total} minutes ({})",
        format_minutes(total)
    )
    .unwrap();
    writeln!(
        output,
        "Most popular activity: {} ({} minutes)",
        top.activity, top.minutes
    )
    .unwrap();

    output
}

/// JSON stats structure.
#[derive(Debug, Serialize)]
pub struct JsonStats<'a> {
    pub activities: &'a ActivityReport,
    pub activity_count: usize,
    pub total_minutes: u64,
    pub most_popular: Option<&'a str>,
}

/// Formats the statistics as JSON.
pub fn format_stats_json(report: &ActivityReport) -> Result<String> {
    let json = JsonStats {
        activities: report,
        activity_count: report.activity_count(),
        total_minutes: report.total_minutes(),
        most_popular: report.most_popular().map(|e| e.activity.as_str()),
    };
    Ok(serde_json::to_string_pretty(&json)?)
}

/// Runs the stats command.
pub fn run<W: Write>(writer: &mut W, trainings: &[Training], json: bool) -> Result<()> {
    let report = aggregate_by_activity(trainings);

    if json {
        writeln!(writer, "{}", format_stats_json(&report)?)?;
    } else {
        write!(writer, "{}", format_stats(&report))?;
    }
    Ok(())
}
