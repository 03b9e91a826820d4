use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use rusqlite::{Connection, Result as SqliteResult};
use thiserror::Error;

use crate::calendar::task::{format_due, parse_due};
use crate::calendar::{NewTask, OwnerId, Priority, Task, TaskId, TaskStatus};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid task: {0}")]
    Validation(String),
    #[error("Database error: {0}")]
    Persistence(#[from] rusqlite::Error),
    #[error("Unreadable task {id}: {reason}")]
    CorruptRow { id: TaskId, reason: String },
}

/// Where tasks live. The calendar only reads them and submits new ones.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn get_tasks(&self, owner_id: OwnerId) -> Result<Vec<Task>, StoreError>;

    async fn create_task(&self, task: &NewTask) -> Result<TaskId, StoreError>;
}

pub struct SqliteTaskStore {
    conn: Mutex<Connection>,
}

struct TaskRow {
    id: TaskId,
    title: String,
    description: Option<String>,
    date: String,
    status: String,
    priority: String,
    completion_date: Option<String>,
    user_id: OwnerId,
}

impl TaskRow {
    fn into_task(self) -> Result<Task, StoreError> {
        let corrupt = |reason: String| StoreError::CorruptRow { id: self.id, reason };

        let due = parse_due(&self.date).ok_or_else(|| corrupt(format!("bad date '{}'", self.date)))?;
        let status = TaskStatus::parse(&self.status)
            .ok_or_else(|| corrupt(format!("unknown status '{}'", self.status)))?;
        let priority = Priority::parse(&self.priority)
            .ok_or_else(|| corrupt(format!("unknown priority '{}'", self.priority)))?;
        let completed_at = match &self.completion_date {
            Some(value) => Some(parse_due(value).ok_or_else(|| corrupt(format!("bad completion date '{}'", value)))?),
            None => None,
        };

        Ok(Task {
            id: self.id,
            owner_id: self.user_id,
            title: self.title,
            description: self.description,
            due,
            priority,
            status,
            completed_at,
        })
    }
}

impl SqliteTaskStore {
    pub fn new(conn: Connection) -> Self {
        Self { conn: Mutex::new(conn) }
    }

    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let store = Self::new(Connection::open(path)?);
        store.initialize()?;
        Ok(store)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        let store = Self::new(Connection::open_in_memory()?);
        store.initialize()?;
        Ok(store)
    }

    fn connection(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn initialize(&self) -> Result<(), StoreError> {
        self.connection().execute(
            "CREATE TABLE IF NOT EXISTS tasks (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                description TEXT,
                date TEXT NOT NULL,
                status TEXT NOT NULL,
                priority TEXT NOT NULL,
                completion_date TEXT,
                user_id INTEGER NOT NULL
            )",
            [],
        )?;

        Ok(())
    }

    pub fn insert_task(&self, task: &NewTask) -> Result<TaskId, StoreError> {
        if task.title.trim().is_empty() {
            return Err(StoreError::Validation("title is required".to_string()));
        }
        if task.owner_id <= 0 {
            return Err(StoreError::Validation(format!("invalid owner id {}", task.owner_id)));
        }

        let conn = self.connection();
        conn.execute(
            "INSERT INTO tasks (title, description, date, status, priority, completion_date, user_id)
             VALUES (?1, ?2, ?3, ?4, ?5, NULL, ?6)",
            rusqlite::params![
                &task.title,
                &task.description,
                task.due_string(),
                TaskStatus::Pending.as_str(),
                task.priority.as_str(),
                task.owner_id,
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    pub fn load_tasks(&self, owner_id: OwnerId) -> Result<Vec<Task>, StoreError> {
        let conn = self.connection();
        let mut stmt = conn.prepare(
            "SELECT id, title, description, date, status, priority, completion_date, user_id
             FROM tasks WHERE user_id = ?1 ORDER BY id",
        )?;

        let rows = stmt.query_map([owner_id], |row| {
            Ok(TaskRow {
                id: row.get(0)?,
                title: row.get(1)?,
                description: row.get(2)?,
                date: row.get(3)?,
                status: row.get(4)?,
                priority: row.get(5)?,
                completion_date: row.get(6)?,
                user_id: row.get(7)?,
            })
        })?;

        rows.map(|row| row.map_err(StoreError::from).and_then(TaskRow::into_task))
            .collect()
    }

    pub fn table_exists(&self, table_name: &str) -> bool {
        let result: SqliteResult<i32> = self.connection().query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1",
            [table_name],
            |row| row.get(0),
        );
        result.unwrap_or(0) > 0
    }

    #[cfg(test)]
    fn execute_raw(&self, sql: &str) -> Result<usize, StoreError> {
        Ok(self.connection().execute(sql, [])?)
    }
}

#[async_trait]
impl TaskStore for SqliteTaskStore {
    async fn get_tasks(&self, owner_id: OwnerId) -> Result<Vec<Task>, StoreError> {
        self.load_tasks(owner_id)
    }

    async fn create_task(&self, task: &NewTask) -> Result<TaskId, StoreError> {
        let id = self.insert_task(task)?;
        tracing::info!("Stored task {} '{}' due {}", id, task.title, format_due(task.due));
        Ok(id)
    }
}
