use chrono::NaiveDate;
use serde::Serialize;

use crate::calendar::dates::{add_days, week_start};
use crate::calendar::Task;
use crate::ui::day_view::{HourSlot, HOURS_PER_DAY};
use crate::ui::month_view::DAYS_PER_WEEK;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekGrid {
    pub week_start: NaiveDate,
    pub days: Vec<WeekDay>,
    pub hours: Vec<HourRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekDay {
    pub date: NaiveDate,
    pub label: String,
    pub is_today: bool,
}

/// One hour across the seven days of the week, Sunday first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourRow {
    pub hour: u32,
    pub slots: Vec<HourSlot>,
}

impl WeekGrid {
    pub fn week_end(&self) -> NaiveDate {
        add_days(self.week_start, DAYS_PER_WEEK as i64 - 1)
    }

    pub fn slot(&self, date: NaiveDate, hour: u32) -> Option<&HourSlot> {
        self.hours
            .get(hour as usize)?
            .slots
            .iter()
            .find(|slot| slot.date == date)
    }

    pub fn slots(&self) -> impl Iterator<Item = &HourSlot> {
        self.hours.iter().flat_map(|row| row.slots.iter())
    }

    pub fn task_count(&self) -> usize {
        self.slots().map(|slot| slot.tasks.len()).sum()
    }
}

/// Builds the Sunday..Saturday week that contains `anchor`, hour by hour.
pub fn build(anchor: NaiveDate, tasks: &[Task], today: NaiveDate, weekday_labels: &[String]) -> WeekGrid {
    let start = week_start(anchor);
    let dates: Vec<NaiveDate> = (0..DAYS_PER_WEEK as i64)
        .map(|offset| add_days(start, offset))
        .collect();

    let days = dates
        .iter()
        .enumerate()
        .map(|(index, &date)| WeekDay {
            date,
            label: weekday_labels.get(index).cloned().unwrap_or_default(),
            is_today: date == today,
        })
        .collect();

    let hours = (0..HOURS_PER_DAY)
        .map(|hour| HourRow {
            hour,
            slots: dates
                .iter()
                .map(|&date| HourSlot::build(date, hour, tasks))
                .collect(),
        })
        .collect();

    WeekGrid {
        week_start: start,
        days,
        hours,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{Priority, TaskStatus};
    use chrono::{Datelike, Weekday};
    use proptest::prelude::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn create_task(id: i64, due_date: NaiveDate, hour: u32) -> Task {
        Task {
            id,
            owner_id: 1,
            title: format!("Task {}", id),
            description: Some("from test".to_string()),
            due: due_date.and_hms_opt(hour, 15, 0).unwrap(),
            priority: Priority::Medium,
            status: TaskStatus::Pending,
            completed_at: None,
        }
    }

    fn no_today() -> NaiveDate {
        date(1999, 1, 1)
    }

    #[test]
    fn week_grid_has_seven_days_and_twenty_four_hours() {
        let grid = build(date(2024, 3, 13), &[], no_today(), &[]);

        assert_eq!(grid.days.len(), 7);
        assert_eq!(grid.hours.len(), 24);
        assert!(grid.hours.iter().all(|row| row.slots.len() == 7));
    }

    #[test]
    fn week_starts_on_sunday_and_ends_on_saturday() {
        let grid = build(date(2024, 3, 13), &[], no_today(), &[]);

        assert_eq!(grid.week_start, date(2024, 3, 10));
        assert_eq!(grid.days[0].date.weekday(), Weekday::Sun);
        assert_eq!(grid.days[6].date.weekday(), Weekday::Sat);
        assert_eq!(grid.week_end(), date(2024, 3, 16));
    }

    #[test]
    fn week_spanning_new_year_uses_real_dates() {
        let grid = build(date(2025, 1, 1), &[], no_today(), &[]);

        let dates: Vec<_> = grid.days.iter().map(|d| d.date).collect();
        assert_eq!(
            dates,
            vec![
                date(2024, 12, 29),
                date(2024, 12, 30),
                date(2024, 12, 31),
                date(2025, 1, 1),
                date(2025, 1, 2),
                date(2025, 1, 3),
                date(2025, 1, 4),
            ]
        );
    }

    #[test]
    fn every_slot_in_a_column_shares_its_date() {
        let grid = build(date(2024, 2, 28), &[], no_today(), &[]);

        for row in &grid.hours {
            for (column, slot) in row.slots.iter().enumerate() {
                assert_eq!(slot.date, grid.days[column].date);
                assert_eq!(slot.hour, row.hour);
            }
        }
    }

    #[test]
    fn today_is_flagged_once_when_in_week() {
        let grid = build(date(2024, 3, 13), &[], date(2024, 3, 15), &[]);

        let flagged: Vec<_> = grid.days.iter().filter(|d| d.is_today).collect();
        assert_eq!(flagged.len(), 1);
        assert_eq!(flagged[0].date, date(2024, 3, 15));

        let other_week = build(date(2024, 3, 20), &[], date(2024, 3, 15), &[]);
        assert!(other_week.days.iter().all(|d| !d.is_today));
    }

    #[test]
    fn labels_follow_the_columns() {
        let labels: Vec<String> = ["S", "M", "T", "W", "T", "F", "S"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let grid = build(date(2024, 3, 13), &[], no_today(), &labels);

        assert_eq!(grid.days[1].label, "M");
        assert_eq!(grid.days[5].label, "F");
    }

    #[test]
    fn task_lands_in_its_day_and_hour() {
        let tasks = vec![create_task(1, date(2024, 3, 15), 9)];

        let grid = build(date(2024, 3, 15), &tasks, no_today(), &[]);

        let slot = grid.slot(date(2024, 3, 15), 9).unwrap();
        assert_eq!(slot.tasks[0].id, 1);
        assert_eq!(grid.hours[9].slots[5].tasks.len(), 1);
        assert_eq!(grid.task_count(), 1);
    }

    #[test]
    fn tasks_outside_the_week_are_ignored() {
        let tasks = vec![
            create_task(1, date(2024, 3, 9), 9),
            create_task(2, date(2024, 3, 17), 9),
        ];

        let grid = build(date(2024, 3, 13), &tasks, no_today(), &[]);

        assert_eq!(grid.task_count(), 0);
    }

    proptest! {
        #[test]
        fn any_anchor_in_the_week_builds_the_same_week(offset in 0i64..7) {
            let anchor = add_days(date(2024, 3, 10), offset);
            let grid = build(anchor, &[], no_today(), &[]);

            prop_assert_eq!(grid.week_start, date(2024, 3, 10));
            prop_assert_eq!(grid.days[6].date, date(2024, 3, 16));
        }
    }
}
