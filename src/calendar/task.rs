use chrono::{DateTime, Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

pub type TaskId = i64;
pub type OwnerId = i64;

/// Wire format for due timestamps handed to the store.
pub const DUE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub owner_id: OwnerId,
    pub title: String,
    pub description: Option<String>,
    /// Local wall-clock time the task is due.
    pub due: NaiveDateTime,
    pub priority: Priority,
    pub status: TaskStatus,
    pub completed_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
}

/// Payload for a task that does not exist in the store yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    pub owner_id: OwnerId,
    pub title: String,
    pub description: Option<String>,
    pub due: NaiveDateTime,
    pub priority: Priority,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Low" => Some(Priority::Low),
            "Medium" => Some(Priority::Medium),
            "High" => Some(Priority::High),
            _ => None,
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Priority::Low => Priority::Medium,
            Priority::Medium => Priority::High,
            Priority::High => Priority::Low,
        }
    }
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "PENDING",
            TaskStatus::InProgress => "IN_PROGRESS",
            TaskStatus::Completed => "COMPLETED",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "PENDING" => Some(TaskStatus::Pending),
            "IN_PROGRESS" => Some(TaskStatus::InProgress),
            "COMPLETED" => Some(TaskStatus::Completed),
            _ => None,
        }
    }
}

impl NewTask {
    pub fn due_string(&self) -> String {
        format_due(self.due)
    }
}

pub fn format_due(due: NaiveDateTime) -> String {
    due.format(DUE_FORMAT).to_string()
}

/// Parses a stored due timestamp into local wall-clock time.
///
/// Values carrying an offset (RFC 3339, e.g. `2024-03-15T09:00:00Z`) are
/// converted to the local zone; naive values are taken as already local.
pub fn parse_due(value: &str) -> Option<NaiveDateTime> {
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(value) {
        return Some(with_offset.with_timezone(&Local).naive_local());
    }

    NaiveDateTime::parse_from_str(value, DUE_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn due(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn priority_cycles_through_all_levels() {
        assert_eq!(Priority::Low.next(), Priority::Medium);
        assert_eq!(Priority::Medium.next(), Priority::High);
        assert_eq!(Priority::High.next(), Priority::Low);
    }

    #[test]
    fn status_uses_store_spelling() {
        assert_eq!(TaskStatus::Pending.as_str(), "PENDING");
        assert_eq!(TaskStatus::parse("COMPLETED"), Some(TaskStatus::Completed));
        assert_eq!(TaskStatus::parse("done"), None);
    }

    #[test]
    fn unknown_priority_is_rejected() {
        assert_eq!(Priority::parse("Urgent"), None);
        assert_eq!(Priority::parse("High"), Some(Priority::High));
    }

    #[test]
    fn due_string_is_naive_iso() {
        let task = NewTask {
            owner_id: 1,
            title: "Dentist".to_string(),
            description: None,
            due: due(2024, 3, 10, 14, 30),
            priority: Priority::Medium,
        };

        assert_eq!(task.due_string(), "2024-03-10T14:30:00");
    }

    #[test]
    fn parse_due_accepts_naive_forms() {
        assert_eq!(parse_due("2024-03-15T09:00:00"), Some(due(2024, 3, 15, 9, 0)));
        assert_eq!(parse_due("2024-03-15T09:05"), Some(due(2024, 3, 15, 9, 5)));
    }

    #[test]
    fn parse_due_converts_offsets_to_local_time() {
        let utc = Utc.with_ymd_and_hms(2024, 3, 15, 9, 0, 0).unwrap();
        let expected = utc.with_timezone(&Local).naive_local();

        assert_eq!(parse_due("2024-03-15T09:00:00Z"), Some(expected));
    }

    #[test]
    fn parse_due_rejects_garbage() {
        assert_eq!(parse_due("next tuesday"), None);
    }
}
