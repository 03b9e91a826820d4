pub mod app;
pub mod calendar;
pub mod input;
pub mod storage;
pub mod ui;
pub mod view_model;

pub use app::{AppState, LoadStatus, Mode};
pub use calendar::{NewTask, Priority, Task, TaskDraft, TaskStatus};
pub use view_model::{CalendarGrid, CalendarViewModel, Direction, ViewMode};

pub use input::{insert_mode, normal_mode};
