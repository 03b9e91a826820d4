use chrono::{NaiveDate, Timelike};

use crate::calendar::Task;

/// Which slot a task must fall into, by its local due components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotMatcher {
    Day(NaiveDate),
    Hour(NaiveDate, u32),
}

impl SlotMatcher {
    pub fn matches(&self, task: &Task) -> bool {
        match *self {
            SlotMatcher::Day(date) => task.due.date() == date,
            SlotMatcher::Hour(date, hour) => task.due.date() == date && task.due.hour() == hour,
        }
    }
}

/// Tasks accepted by `matcher`, in their original order.
pub fn bucketize<F>(tasks: &[Task], matcher: F) -> Vec<Task>
where
    F: Fn(&Task) -> bool,
{
    tasks.iter().filter(|task| matcher(task)).cloned().collect()
}

pub fn tasks_in(tasks: &[Task], slot: SlotMatcher) -> Vec<Task> {
    bucketize(tasks, |task| slot.matches(task))
}
