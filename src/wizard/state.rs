//! Session and draft types

use crate::db::NewReservation;
use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

/// The input the wizard expects next.
///
/// Strictly forward, no skipping: each step is entered exactly once per
/// pass through the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    AwaitDate,
    AwaitTime,
    AwaitName,
    AwaitPeople,
    AwaitLink,
    AwaitNotes,
}

/// Reservation fields collected so far. All optional until set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    /// ISO `YYYY-MM-DD`, from the 7-day date keyboard.
    pub date: Option<String>,
    /// `HH:MM`, from the fixed 09:00..=22:45 grid.
    pub time: Option<String>,
    pub full_name: Option<String>,
    pub num_people: Option<i64>,
    pub restaurant_link: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("draft is missing {0}")]
    Missing(&'static str),
    #[error("draft has an unparseable date: {0}")]
    BadDate(String),
    #[error("draft has an unparseable time: {0}")]
    BadTime(String),
}

impl Draft {
    /// Convert a finished draft into a writable reservation.
    ///
    /// Date and time were only shape-checked on entry; this is where the
    /// calendar parse actually happens.
    pub fn complete(&self, user_id: i64) -> Result<NewReservation, DraftError> {
        let date = self.date.as_deref().ok_or(DraftError::Missing("date"))?;
        let time = self.time.as_deref().ok_or(DraftError::Missing("time"))?;
        let full_name = self
            .full_name
            .clone()
            .ok_or(DraftError::Missing("full_name"))?;
        let num_people = self.num_people.ok_or(DraftError::Missing("num_people"))?;

        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|_| DraftError::BadDate(date.to_string()))?;
        let time = NaiveTime::parse_from_str(time, "%H:%M")
            .map_err(|_| DraftError::BadTime(time.to_string()))?;

        Ok(NewReservation {
            user_id,
            full_name,
            num_people,
            date,
            time,
            restaurant_link: self.restaurant_link.clone(),
            notes: self.notes.clone(),
        })
    }
}

/// A per-user in-progress reservation: the draft plus the current step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub draft: Draft,
    pub step: Step,
}

impl Session {
    /// Fresh session at the top of the flow.
    pub fn new() -> Self {
        Self {
            draft: Draft::default(),
            step: Step::AwaitDate,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> Draft {
        Draft {
            date: Some("2025-06-01".to_string()),
            time: Some("19:30".to_string()),
            full_name: Some("Jane Doe".to_string()),
            num_people: Some(2),
            restaurant_link: Some("https://example.com/r/1".to_string()),
            notes: Some(String::new()),
        }
    }

    #[test]
    fn complete_builds_a_reservation() {
        let reservation = filled().complete(42).unwrap();
        assert_eq!(reservation.user_id, 42);
        assert_eq!(reservation.date_text(), "2025-06-01");
        assert_eq!(reservation.time_text(), "19:30");
        assert_eq!(reservation.num_people, 2);
    }

    #[test]
    fn complete_reports_the_first_missing_field() {
        let draft = Draft {
            full_name: None,
            ..filled()
        };
        assert_eq!(draft.complete(1), Err(DraftError::Missing("full_name")));
    }

    #[test]
    fn complete_rejects_a_forged_date_token() {
        let draft = Draft {
            date: Some("2025-02-30".to_string()),
            ..filled()
        };
        assert!(matches!(draft.complete(1), Err(DraftError::BadDate(_))));
    }

    #[test]
    fn complete_rejects_a_forged_time_token() {
        let draft = Draft {
            time: Some("25:99".to_string()),
            ..filled()
        };
        assert!(matches!(draft.complete(1), Err(DraftError::BadTime(_))));
    }
}
