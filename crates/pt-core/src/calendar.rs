//! Projecting training sessions onto a calendar.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::lookup::CustomerNames;
use crate::training::Training;
use crate::types::{TrainingId, ValidationError};

/// One session as a time interval on the calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarEvent {
    pub id: TrainingId,
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// Maps every session to exactly one event, in input order.
///
/// The end is plain time arithmetic on the start, so sessions may run past
/// midnight or into the next month. Dangling customer references are titled
/// with the "Unknown" placeholder.
pub fn project<N>(trainings: &[Training], names: &N) -> Vec<CalendarEvent>
where
    N: CustomerNames + ?Sized,
{
    trainings
        .iter()
        .map(|training| CalendarEvent {
            id: training.id.clone(),
            title: format!(
                "{} – {}",
                training.activity,
                names.display_name(&training.customer_id)
            ),
            start: training.date,
            end: training.end(),
        })
        .collect()
}

// ========== Views ==========

/// Calendar zoom level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarView {
    #[default]
    Month,
    Week,
    Day,
}

impl CalendarView {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Month => "month",
            Self::Week => "week",
            Self::Day => "day",
        }
    }
}

impl fmt::Display for CalendarView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CalendarView {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "month" => Ok(Self::Month),
            "week" => Ok(Self::Week),
            "day" => Ok(Self::Day),
            _ => Err(ValidationError::UnknownField {
                entity: "calendar view",
                value: s.to_string(),
            }),
        }
    }
}

/// Half-open `[start, end)` interval of wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TimeRange {
    fn overlaps(&self, event: &CalendarEvent) -> bool {
        event.start < self.end && event.end > self.start
    }
}

fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Monday 00:00 to the following Monday 00:00.
fn week_range(anchor: NaiveDate) -> TimeRange {
    let days_since_monday = anchor.weekday().num_days_from_monday();
    let monday = anchor
        .checked_sub_days(Days::new(u64::from(days_since_monday)))
        .unwrap_or(NaiveDate::MIN);
    let next_monday = monday
        .checked_add_days(Days::new(7))
        .unwrap_or(NaiveDate::MAX);
    TimeRange {
        start: midnight(monday),
        end: midnight(next_monday),
    }
}

/// The first of the month to the first of the next month.
fn month_range(anchor: NaiveDate) -> TimeRange {
    let first = anchor.with_day(1).unwrap_or(anchor);
    let next = first
        .checked_add_months(chrono::Months::new(1))
        .unwrap_or(NaiveDate::MAX);
    TimeRange {
        start: midnight(first),
        end: midnight(next),
    }
}

/// Today 00:00 to tomorrow 00:00.
fn day_range(anchor: NaiveDate) -> TimeRange {
    TimeRange {
        start: midnight(anchor),
        end: midnight(anchor.checked_add_days(Days::new(1)).unwrap_or(NaiveDate::MAX)),
    }
}

/// The interval a view shows around `anchor`.
pub fn view_range(view: CalendarView, anchor: NaiveDate) -> TimeRange {
    match view {
        CalendarView::Month => month_range(anchor),
        CalendarView::Week => week_range(anchor),
        CalendarView::Day => day_range(anchor),
    }
}

/// Events overlapping `range`, ordered by start time.
pub fn events_in_range(events: &[CalendarEvent], range: TimeRange) -> Vec<CalendarEvent> {
    let mut visible: Vec<CalendarEvent> = events
        .iter()
        .filter(|e| range.overlaps(e))
        .cloned()
        .collect();
    visible.sort_by_key(|e| e.start);
    visible
}
