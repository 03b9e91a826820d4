pub mod config;
pub mod identity;
pub mod task_store;

pub use config::Config;
pub use identity::{ConfiguredIdentity, IdentityProvider};
pub use task_store::{SqliteTaskStore, StoreError, TaskStore};
