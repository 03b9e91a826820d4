use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use thiserror::Error;

use crate::calendar::task::{NewTask, OwnerId, Priority};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DraftError {
    #[error("Task title cannot be empty")]
    EmptyTitle,
    #[error("Invalid time {hour:02}:{minute:02}")]
    InvalidTime { hour: u32, minute: u32 },
    #[error("Invalid time '{0}', expected HH:MM")]
    UnreadableTime(String),
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    UnreadableDate(String),
}

/// A task being composed before it is handed to the store.
///
/// The date part and the time part are picked independently and only meet
/// in [`TaskDraft::compose_due`]; setting one never touches the other.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    date: NaiveDate,
    time: NaiveTime,
}

impl TaskDraft {
    pub fn new(date: NaiveDate, time: NaiveTime) -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            priority: Priority::Low,
            date,
            time,
        }
    }

    /// Starts a draft on `date` at the whole hour of `now`.
    pub fn starting_on(date: NaiveDate, now: NaiveDateTime) -> Self {
        let time = NaiveTime::from_hms_opt(now.hour(), 0, 0).unwrap_or(NaiveTime::MIN);
        Self::new(date, time)
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn time(&self) -> NaiveTime {
        self.time
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        self.date = date;
    }

    pub fn set_time(&mut self, hour: u32, minute: u32) -> Result<(), DraftError> {
        let time = NaiveTime::from_hms_opt(hour, minute, 0)
            .ok_or(DraftError::InvalidTime { hour, minute })?;
        self.time = time;
        Ok(())
    }

    pub fn compose_due(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }

    /// Validates the draft and builds the store payload.
    pub fn to_new_task(&self, owner_id: OwnerId) -> Result<NewTask, DraftError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(DraftError::EmptyTitle);
        }

        let description = self.description.trim();

        Ok(NewTask {
            owner_id,
            title: title.to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
            due: self.compose_due(),
            priority: self.priority,
        })
    }
}
