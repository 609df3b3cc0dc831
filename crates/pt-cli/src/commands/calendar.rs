//! Calendar command: sessions in a month, week or day.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;
use chrono::NaiveDate;
use pt_core::{
    CalendarEvent, CalendarView, Customer, CustomerLookup, TimeRange, Training, events_in_range,
    project, view_range,
};
use serde::Serialize;

/// Events visible in one calendar view.
#[derive(Debug)]
pub struct CalendarData {
    pub view: CalendarView,
    pub range: TimeRange,
    pub events: Vec<CalendarEvent>,
}

/// Projects every session and keeps those the view shows around `anchor`.
pub fn calendar_data(
    trainings: &[Training],
    customers: &[Customer],
    view: CalendarView,
    anchor: NaiveDate,
) -> CalendarData {
    let lookup = CustomerLookup::new(customers);
    let range = view_range(view, anchor);
    let events = events_in_range(&project(trainings, &lookup), range);
    tracing::debug!(%view, %anchor, events = events.len(), "built calendar view");
    CalendarData {
        view,
        range,
        events,
    }
}

fn format_heading(data: &CalendarData) -> String {
    let start = data.range.start.date();
    match data.view {
        CalendarView::Month => start.format("%B %Y").to_string(),
        CalendarView::Week => format!("Week of {}", start.format("%b %-d, %Y")),
        CalendarView::Day => start.format("%A, %b %-d, %Y").to_string(),
    }
}

/// Formats the human-readable calendar, one group per start day.
pub fn format_calendar(data: &CalendarData) -> String {
    let mut output = String::new();

    writeln!(output, "CALENDAR: {}", format_heading(data)).unwrap();

    if data.events.is_empty() {
        writeln!(output).unwrap();
        writeln!(output, "No training sessions in this {}.", data.view).unwrap();
        return output;
    }

    let mut current_day = None;
    for event in &data.events {
        let day = event.start.date();
        if current_day != Some(day) {
            writeln!(output).unwrap();
            writeln!(output, "{}", day.format("%a %b %-d")).unwrap();
            current_day = Some(day);
        }
        writeln!(
            output,
            "  {}-{}  {}",
            event.start.format("%H:%M"),
            event.end.format("%H:%M"),
            event.title
        )
        .unwrap();
    }

    output
}

/// JSON calendar structure.
#[derive(Debug, Serialize)]
pub struct JsonCalendar<'a> {
    pub view: CalendarView,
    pub start: String,
    pub end: String,
    pub events: &'a [CalendarEvent],
}

/// Formats the calendar as JSON.
pub fn format_calendar_json(data: &CalendarData) -> Result<String> {
    let json = JsonCalendar {
        view: data.view,
        start: data.range.start.format("%Y-%m-%dT%H:%M:%S").to_string(),
        end: data.range.end.format("%Y-%m-%dT%H:%M:%S").to_string(),
        events: &data.events,
    };
    Ok(serde_json::to_string_pretty(&json)?)
}

/// Runs the calendar command.
pub fn run<W: Write>(
    writer: &mut W,
    trainings: &[Training],
    customers: &[Customer],
    view: CalendarView,
    anchor: NaiveDate,
    json: bool,
) -> Result<()> {
    let data = calendar_data(trainings, customers, view, anchor);

    if json {
        writeln!(writer, "{}", format_calendar_json(&data)?)?;
    } else {
        write!(writer, "{}", format_calendar(&data))?;
    }
    Ok(())
}
