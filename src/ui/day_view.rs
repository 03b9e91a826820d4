use chrono::NaiveDate;
use serde::Serialize;

use crate::calendar::Task;
use crate::ui::bucket::{tasks_in, SlotMatcher};

pub const HOURS_PER_DAY: u32 = 24;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayAgenda {
    pub date: NaiveDate,
    pub is_today: bool,
    pub slots: Vec<HourSlot>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourSlot {
    pub hour: u32,
    pub date: NaiveDate,
    pub tasks: Vec<Task>,
}

impl HourSlot {
    pub fn build(date: NaiveDate, hour: u32, tasks: &[Task]) -> Self {
        Self {
            hour,
            date,
            tasks: tasks_in(tasks, SlotMatcher::Hour(date, hour)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl DayAgenda {
    pub fn task_count(&self) -> usize {
        self.slots.iter().map(|slot| slot.tasks.len()).sum()
    }

    pub fn busy_slots(&self) -> impl Iterator<Item = &HourSlot> {
        self.slots.iter().filter(|slot| !slot.is_empty())
    }
}

pub fn build(anchor: NaiveDate, tasks: &[Task], today: NaiveDate) -> DayAgenda {
    let slots = (0..HOURS_PER_DAY)
        .map(|hour| HourSlot::build(anchor, hour, tasks))
        .collect();

    DayAgenda {
        date: anchor,
        is_today: anchor == today,
        slots,
    }
}
