pub mod help;
pub mod task_form;
