pub mod day;
pub mod month;
pub mod task_list;
pub mod week;
