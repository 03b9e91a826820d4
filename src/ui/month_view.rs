use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::calendar::dates::{add_days, days_in_month, first_of_month, weekday_index};
use crate::calendar::Task;
use crate::ui::bucket::{tasks_in, SlotMatcher};

pub const DAYS_PER_WEEK: usize = 7;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub weekday_labels: Vec<String>,
    pub rows: Vec<Vec<GridCell>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridCell {
    pub date: NaiveDate,
    pub is_today: bool,
    pub is_padding: bool,
    pub tasks: Vec<Task>,
}

impl GridCell {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            is_today: false,
            is_padding: false,
            tasks: Vec::new(),
        }
    }

    pub fn with_today(mut self, today: bool) -> Self {
        self.is_today = today;
        self
    }

    pub fn with_padding(mut self, padding: bool) -> Self {
        self.is_padding = padding;
        self
    }

    pub fn with_tasks(mut self, tasks: Vec<Task>) -> Self {
        self.tasks = tasks;
        self
    }
}

impl MonthGrid {
    pub fn cells(&self) -> impl Iterator<Item = &GridCell> {
        self.rows.iter().flatten()
    }

    /// The in-month cell for `date`, if the grid shows that month.
    pub fn cell_for(&self, date: NaiveDate) -> Option<&GridCell> {
        self.cells().find(|cell| !cell.is_padding && cell.date == date)
    }

    pub fn task_count(&self) -> usize {
        self.cells().map(|cell| cell.tasks.len()).sum()
    }
}

/// Lays out the month containing `anchor` as Sunday-first rows of seven.
///
/// Leading cells stand in for the tail of the previous month and trailing
/// cells complete the last row, so every row is full.
pub fn build(anchor: NaiveDate, tasks: &[Task], today: NaiveDate, weekday_labels: &[String]) -> MonthGrid {
    let year = anchor.year();
    let month = anchor.month();
    let first_day = first_of_month(anchor);

    let Some(day_count) = days_in_month(year, month) else {
        return MonthGrid {
            year,
            month,
            weekday_labels: weekday_labels.to_vec(),
            rows: Vec::new(),
        };
    };

    let leading = weekday_index(first_day) as i64;
    let mut cells = Vec::with_capacity(6 * DAYS_PER_WEEK);

    for offset in (1..=leading).rev() {
        cells.push(GridCell::new(add_days(first_day, -offset)).with_padding(true));
    }

    for offset in 0..day_count as i64 {
        let date = add_days(first_day, offset);
        cells.push(
            GridCell::new(date)
                .with_today(date == today)
                .with_tasks(tasks_in(tasks, SlotMatcher::Day(date))),
        );
    }

    let mut trailing = 0;
    while cells.len() % DAYS_PER_WEEK != 0 {
        let date = add_days(first_day, day_count as i64 + trailing);
        cells.push(GridCell::new(date).with_padding(true));
        trailing += 1;
    }

    let rows = cells
        .chunks(DAYS_PER_WEEK)
        .map(|row| row.to_vec())
        .collect();

    MonthGrid {
        year,
        month,
        weekday_labels: weekday_labels.to_vec(),
        rows,
    }
}
