//! Training sessions booked for customers.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

use crate::types::{CustomerId, TrainingId, ValidationError, require};

/// Suggested activity labels offered when booking a session.
///
/// Advisory only: sessions may carry any non-empty label, and statistics
/// report whatever labels actually occur.
pub const ACTIVITY_OPTIONS: [&str; 10] = [
    "Running",
    "Yoga",
    "Strength Training",
    "Spinning",
    "Swimming",
    "Pilates",
    "Boxing",
    "Cycling",
    "HIIT",
    "Stretching",
];

/// Returns true if the label is one of [`ACTIVITY_OPTIONS`].
pub fn is_suggested_activity(activity: &str) -> bool {
    ACTIVITY_OPTIONS.contains(&activity)
}

/// A single training session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Training {
    pub id: TrainingId,
    /// Wall-clock start of the session.
    pub date: NaiveDateTime,
    pub activity: String,
    /// Length in minutes, always positive.
    pub duration: u32,
    /// Non-owning reference; the customer may since have been deleted.
    pub customer_id: CustomerId,
}

/// Session fields as entered, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingDraft {
    pub date: NaiveDateTime,
    pub activity: String,
    pub duration: i64,
    pub customer_id: CustomerId,
}

impl Training {
    /// Builds a session from a draft.
    pub fn new(id: TrainingId, draft: TrainingDraft) -> Result<Self, ValidationError> {
        let activity = require(&draft.activity, "activity")?;
        let duration = u32::try_from(draft.duration)
            .ok()
            .filter(|minutes| *minutes > 0)
            .ok_or(ValidationError::NonPositiveDuration {
                value: draft.duration,
            })?;
        if draft
            .date
            .checked_add_signed(chrono::Duration::minutes(i64::from(duration)))
            .is_none()
        {
            return Err(ValidationError::InvalidTimestamp {
                value: draft.date.to_string(),
            });
        }

        Ok(Self {
            id,
            date: draft.date,
            activity,
            duration,
            customer_id: draft.customer_id,
        })
    }

    /// Wall-clock end of the session, clamped to the latest representable time.
    pub fn end(&self) -> NaiveDateTime {
        self.date
            .checked_add_signed(chrono::Duration::minutes(i64::from(self.duration)))
            .unwrap_or(NaiveDateTime::MAX)
    }
}

/// Parses a session start time.
///
/// Accepts local wall-clock times (`2025-04-15T10:30:00`, `2025-04-15T10:30`),
/// RFC 3339 timestamps with an offset (converted to local time), and bare
/// dates, which start at midnight.
pub fn parse_session_time(text: &str) -> Result<NaiveDateTime, ValidationError> {
    let text = text.trim();

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(dt);
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.with_timezone(&Local).naive_local());
    }

    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN));
    }

    Err(ValidationError::InvalidTimestamp {
        value: text.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(text: &str) -> NaiveDateTime {
        parse_session_time(text).unwrap()
    }

    fn draft(duration: i64) -> TrainingDraft {
        TrainingDraft {
            date: at("2025-04-15T10:30:00"),
            activity: "Running".to_string(),
            duration,
            customer_id: CustomerId::new("c1").unwrap(),
        }
    }

    #[test]
    fn new_accepts_positive_duration() {
        let training = Training::new(TrainingId::new("t1").unwrap(), draft(30)).unwrap();
        assert_eq!(training.duration, 30);
        assert_eq!(training.end(), at("2025-04-15T11:00:00"));
    }

    #[test]
    fn new_rejects_non_positive_duration() {
        let id = TrainingId::new("t1").unwrap();
        assert_eq!(
            Training::new(id.clone(), draft(0)).unwrap_err(),
            ValidationError::NonPositiveDuration { value: 0 }
        );
        assert!(Training::new(id, draft(-15)).is_err());
    }

    #[test]
    fn new_rejects_end_past_representable_range() {
        let late = TrainingDraft {
            date: NaiveDateTime::MAX - chrono::Duration::minutes(10),
            ..draft(30)
        };
        assert!(matches!(
            Training::new(TrainingId::new("t1").unwrap(), late),
            Err(ValidationError::InvalidTimestamp { .. })
        ));
    }

    #[test]
    fn end_clamps_instead_of_overflowing() {
        let mut training = Training::new(TrainingId::new("t1").unwrap(), draft(30)).unwrap();
        training.date = NaiveDateTime::MAX - chrono::Duration::minutes(10);
        assert_eq!(training.end(), NaiveDateTime::MAX);
    }

    #[test]
    fn new_rejects_blank_activity() {
        let blank = TrainingDraft {
            activity: " ".to_string(),
            ..draft(30)
        };
        assert_eq!(
            Training::new(TrainingId::new("t1").unwrap(), blank).unwrap_err(),
            ValidationError::Empty { field: "activity" }
        );
    }

    #[test]
    fn off_list_activities_are_allowed() {
        let custom = TrainingDraft {
            activity: "Climbing".to_string(),
            ..draft(30)
        };
        assert!(!is_suggested_activity("Climbing"));
        assert!(Training::new(TrainingId::new("t1").unwrap(), custom).is_ok());
    }

    #[test]
    fn parse_session_time_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 4, 15)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();
        assert_eq!(at("2025-04-15T10:30:00"), expected);
        assert_eq!(at("2025-04-15T10:30"), expected);
        assert_eq!(at("2025-04-15 10:30"), expected);
        assert_eq!(
            at("2025-04-15"),
            NaiveDate::from_ymd_opt(2025, 4, 15)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        );
    }

    #[test]
    fn parse_session_time_converts_offsets_to_local() {
        let utc = DateTime::parse_from_rfc3339("2025-04-15T10:30:00Z").unwrap();
        assert_eq!(
            at("2025-04-15T10:30:00Z"),
            utc.with_timezone(&Local).naive_local()
        );
    }

    #[test]
    fn parse_session_time_rejects_garbage() {
        assert!(matches!(
            parse_session_time("next tuesday"),
            Err(ValidationError::InvalidTimestamp { .. })
        ));
    }

    #[test]
    fn date_serializes_as_iso_wall_clock() {
        let training = Training::new(TrainingId::new("t1").unwrap(), draft(30)).unwrap();
        let json = serde_json::to_value(&training).unwrap();
        assert_eq!(json["date"], "2025-04-15T10:30:00");
        assert_eq!(json["customerId"], "c1");
    }
}
