mod calendar_views;
mod dialogs;
mod presentation;
mod sample_tasks;
mod session;

pub use session::{open_store, run_tui};
