//! Shared utilities for CLI commands.

use anyhow::Context;
use chrono::{Local, NaiveDate};
use pt_core::{SortDirection, SortState};

/// Parse a `--date` argument, defaulting to today.
///
/// Supports `YYYY-MM-DD` plus the shorthands `today`, `yesterday` and `tomorrow`.
pub fn parse_date(s: Option<&str>) -> anyhow::Result<NaiveDate> {
    let today = Local::now().date_naive();
    match s.map(str::trim) {
        None | Some("today") => Ok(today),
        Some("yesterday") => Ok(today - chrono::Duration::days(1)),
        Some("tomorrow") => Ok(today + chrono::Duration::days(1)),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .with_context(|| format!("invalid date: {s}. Use YYYY-MM-DD (e.g., 2025-04-15)")),
    }
}

/// Formats minutes as `Xh Ym` if at least an hour, `Xm` otherwise.
pub fn format_minutes(minutes: u64) -> String {
    let hours = minutes / 60;
    let rest = minutes % 60;
    if hours >= 1 {
        format!("{hours}h {rest}m")
    } else {
        format!("{rest}m")
    }
}

/// Generates a 10-character progress bar.
/// Values <5% of max get a single block for visibility.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn progress_bar(value: u64, max: u64) -> String {
    if max == 0 {
        return "░░░░░░░░░░".to_string();
    }

    let ratio = value as f64 / max as f64;
    let filled = if ratio < 0.05 && value > 0 {
        1
    } else {
        (ratio * 10.0).round().min(10.0) as usize
    };

    let empty = 10 - filled;
    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

/// Truncates to `width` characters, ending in `...` when cut.
///
/// Counts characters, not bytes, so multi-byte UTF-8 never splits.
pub fn fit(value: &str, width: usize) -> String {
    if value.chars().count() > width {
        let kept: String = value.chars().take(width.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        value.to_string()
    }
}

/// Column label with a sort arrow when the list is sorted by it.
pub fn header<F: Copy + PartialEq>(label: &str, field: F, sort: &SortState<F>) -> String {
    if sort.field != field {
        return label.to_string();
    }
    match sort.direction {
        SortDirection::Ascending => format!("{label} ▲"),
        SortDirection::Descending => format!("{label} ▼"),
    }
}

/// A rule of `─` matching each column width, two spaces apart.
pub fn rule(widths: &[usize]) -> String {
    widths
        .iter()
        .map(|w| "─".repeat(*w))
        .collect::<Vec<_>>()
        .join("  ")
}
