pub mod insert_mode;
pub mod normal_mode;
