use chrono::{Datelike, Days, Months, NaiveDate};

/// Number of days in the given month, or `None` for an invalid month.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_first = first.checked_add_months(Months::new(1))?;
    Some((next_first - first).num_days() as u32)
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Weekday index of `date` with Sunday as 0.
pub fn weekday_index(date: NaiveDate) -> u32 {
    date.weekday().num_days_from_sunday()
}

/// Shifts `date` by whole calendar months.
///
/// The day of month is clamped to the last day of the target month, so
/// Jan 31 + 1 month is Feb 28 (or 29), never early March.
pub fn add_months_clamped(date: NaiveDate, delta: i32) -> NaiveDate {
    let total = date.year() * 12 + date.month0() as i32 + delta;
    let year = total.div_euclid(12);
    let month = total.rem_euclid(12) as u32 + 1;

    let Some(last_day) = days_in_month(year, month) else {
        return date;
    };

    NaiveDate::from_ymd_opt(year, month, date.day().min(last_day)).unwrap_or(date)
}

/// The Sunday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date.checked_sub_days(Days::new(weekday_index(date) as u64))
        .unwrap_or(date)
}

pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    let shifted = if days >= 0 {
        date.checked_add_days(Days::new(days as u64))
    } else {
        date.checked_sub_days(Days::new(days.unsigned_abs()))
    };
    shifted.unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;
    use proptest::prelude::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn february_has_29_days_in_leap_years() {
        assert_eq!(days_in_month(2024, 2), Some(29));
        assert_eq!(days_in_month(2023, 2), Some(28));
        assert_eq!(days_in_month(1900, 2), Some(28));
        assert_eq!(days_in_month(2000, 2), Some(29));
    }

    #[test]
    fn december_has_31_days() {
        assert_eq!(days_in_month(2024, 12), Some(31));
    }

    #[test]
    fn invalid_month_has_no_length() {
        assert_eq!(days_in_month(2024, 13), None);
    }

    #[test]
    fn weekday_index_counts_from_sunday() {
        assert_eq!(weekday_index(date(2024, 3, 10)), 0);
        assert_eq!(weekday_index(date(2024, 3, 15)), 5);
        assert_eq!(weekday_index(date(2024, 3, 16)), 6);
    }

    #[test]
    fn adding_month_to_jan_31_clamps_to_end_of_february() {
        assert_eq!(add_months_clamped(date(2024, 1, 31), 1), date(2024, 2, 29));
        assert_eq!(add_months_clamped(date(2023, 1, 31), 1), date(2023, 2, 28));
    }

    #[test]
    fn month_shift_rolls_over_year_boundaries() {
        assert_eq!(add_months_clamped(date(2024, 12, 15), 1), date(2025, 1, 15));
        assert_eq!(add_months_clamped(date(2024, 1, 15), -1), date(2023, 12, 15));
        assert_eq!(add_months_clamped(date(2024, 3, 31), -1), date(2024, 2, 29));
    }

    #[test]
    fn week_start_crosses_month_and_year() {
        let start = week_start(date(2025, 1, 2));
        assert_eq!(start, date(2024, 12, 29));
        assert_eq!(start.weekday(), Weekday::Sun);
    }

    #[test]
    fn week_start_of_sunday_is_itself() {
        assert_eq!(week_start(date(2024, 3, 10)), date(2024, 3, 10));
    }

    #[test]
    fn add_days_moves_both_directions() {
        assert_eq!(add_days(date(2024, 2, 28), 2), date(2024, 3, 1));
        assert_eq!(add_days(date(2024, 1, 1), -1), date(2023, 12, 31));
    }

    proptest! {
        #[test]
        fn month_shift_never_leaves_target_month(
            year in 1970i32..2100,
            month in 1u32..=12,
            day in 1u32..=31,
            delta in -24i32..=24,
        ) {
            let last = days_in_month(year, month).unwrap();
            let start = date(year, month, day.min(last));
            let shifted = add_months_clamped(start, delta);

            let months_apart = (shifted.year() - start.year()) * 12
                + shifted.month() as i32 - start.month() as i32;
            prop_assert_eq!(months_apart, delta);
            prop_assert!(shifted.day() <= start.day());
        }

        #[test]
        fn week_start_is_the_sunday_within_six_days(
            days_from_epoch in 0i64..60_000,
        ) {
            let anchor = add_days(date(1970, 1, 1), days_from_epoch);
            let start = week_start(anchor);

            prop_assert_eq!(start.weekday(), Weekday::Sun);
            let gap = (anchor - start).num_days();
            prop_assert!((0..7).contains(&gap));
        }
    }
}
