use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A bookable training slot. Identity is the integer `id`; clients attach
/// to a session through `Schedule` records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: i32,
    pub start_time: NaiveDateTime,
    pub duration_minutes: i64,
    pub exercise_type: String,
}

impl Session {
    pub fn new(
        id: i32,
        start_time: NaiveDateTime,
        duration_minutes: i64,
        exercise_type: impl Into<String>,
    ) -> Self {
        Self {
            id,
            start_time,
            duration_minutes,
            exercise_type: exercise_type.into(),
        }
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_time.date()
    }

    pub fn end_time(&self) -> NaiveDateTime {
        self.start_time + Duration::minutes(self.duration_minutes)
    }
}
