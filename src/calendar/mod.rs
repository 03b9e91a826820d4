pub mod dates;
pub mod draft;
pub mod task;

pub use draft::{DraftError, TaskDraft};
pub use task::{NewTask, OwnerId, Priority, Task, TaskId, TaskStatus};
