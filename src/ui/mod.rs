pub mod bucket;
pub mod day_view;
pub mod month_view;
pub mod theme;
pub mod week_view;
pub mod weekday_labels;
