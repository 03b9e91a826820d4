use chrono::{Local, NaiveDate, NaiveDateTime, Timelike};
use thiserror::Error;

use crate::calendar::{DraftError, Task, TaskDraft, TaskId};
use crate::storage::{IdentityProvider, StoreError, TaskStore};
use crate::ui::theme::Theme;
use crate::view_model::{CalendarGrid, CalendarViewModel};

#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    Normal,
    Insert,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadStatus {
    Idle,
    Loading,
    Loaded(usize),
    SignedOut,
    Error(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Info(String),
    Error(String),
}

/// Result of one trip to the task store.
#[derive(Debug)]
pub enum TaskLoad {
    Loaded(Vec<Task>),
    SignedOut,
    Failed(StoreError),
}

/// Identifies the screen generation a fetch was started for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("No task is being edited")]
    NoDraft,
    #[error("Sign in to create tasks")]
    SignedOut,
    #[error(transparent)]
    Draft(#[from] DraftError),
    #[error("Could not save task: {0}")]
    Store(#[from] StoreError),
}

pub async fn load_tasks(store: &dyn TaskStore, identity: &dyn IdentityProvider) -> TaskLoad {
    let Some(owner_id) = identity.current_owner_id() else {
        return TaskLoad::SignedOut;
    };

    match store.get_tasks(owner_id).await {
        Ok(tasks) => TaskLoad::Loaded(tasks),
        Err(e) => TaskLoad::Failed(e),
    }
}

pub struct AppState {
    pub mode: Mode,
    pub calendar: CalendarViewModel,
    pub tasks: Vec<Task>,
    pub load_status: LoadStatus,
    pub task_form: Option<TaskForm>,
    pub notice: Option<Notice>,
    pub show_help: bool,
    pub help_scroll: usize,
    pub theme: Theme,
    generation: u64,
    active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormField {
    Title,
    Description,
    Priority,
    Date,
    Time,
}

/// Text inputs of the new-task dialog layered over a [`TaskDraft`].
///
/// Date and time have separate buffers; each one is only written back to
/// the draft when its own field is committed.
#[derive(Debug, Clone)]
pub struct TaskForm {
    pub draft: TaskDraft,
    pub active_field: FormField,
    pub date_input_buffer: String,
    pub time_input_buffer: String,
    pub date_buffer_touched: bool,
    pub time_buffer_touched: bool,
}

impl TaskForm {
    pub fn new(draft: TaskDraft) -> Self {
        Self {
            date_input_buffer: format_date(draft.date()),
            time_input_buffer: format_time(draft.time().hour(), draft.time().minute()),
            draft,
            active_field: FormField::Title,
            date_buffer_touched: false,
            time_buffer_touched: false,
        }
    }

    pub fn next_field(&mut self) -> Result<(), DraftError> {
        let committed = self.commit_active_field();
        self.active_field = match self.active_field {
            FormField::Title => FormField::Description,
            FormField::Description => FormField::Priority,
            FormField::Priority => FormField::Date,
            FormField::Date => FormField::Time,
            FormField::Time => FormField::Title,
        };
        committed
    }

    pub fn prev_field(&mut self) -> Result<(), DraftError> {
        let committed = self.commit_active_field();
        self.active_field = match self.active_field {
            FormField::Title => FormField::Time,
            FormField::Description => FormField::Title,
            FormField::Priority => FormField::Description,
            FormField::Date => FormField::Priority,
            FormField::Time => FormField::Date,
        };
        committed
    }

    pub fn commit_active_field(&mut self) -> Result<(), DraftError> {
        match self.active_field {
            FormField::Date => self.parse_date_input(),
            FormField::Time => self.parse_time_input(),
            _ => Ok(()),
        }
    }

    /// Writes the date buffer into the draft; the time part is untouched.
    pub fn parse_date_input(&mut self) -> Result<(), DraftError> {
        if !self.date_buffer_touched {
            return Ok(());
        }

        let input = self.date_input_buffer.trim().to_string();
        let parsed = NaiveDate::parse_from_str(&input, "%Y-%m-%d");

        self.date_buffer_touched = false;
        match parsed {
            Ok(date) => {
                self.draft.set_date(date);
                self.date_input_buffer = format_date(date);
                Ok(())
            }
            Err(_) => {
                self.date_input_buffer = format_date(self.draft.date());
                Err(DraftError::UnreadableDate(input))
            }
        }
    }

    /// Writes the time buffer (`HH:MM`, `HHMM` or `HH`) into the draft; the
    /// date part is untouched.
    pub fn parse_time_input(&mut self) -> Result<(), DraftError> {
        if !self.time_buffer_touched {
            return Ok(());
        }

        let input = self.time_input_buffer.replace(':', "");
        self.time_buffer_touched = false;

        let result = match input.parse::<u32>() {
            Ok(num) if input.len() == 3 || input.len() == 4 => self.draft.set_time(num / 100, num % 100),
            Ok(num) if input.len() <= 2 => self.draft.set_time(num, 0),
            _ => Err(DraftError::UnreadableTime(self.time_input_buffer.clone())),
        };

        let time = self.draft.time();
        self.time_input_buffer = format_time(time.hour(), time.minute());
        result
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn format_time(hour: u32, minute: u32) -> String {
    format!("{:02}:{:02}", hour, minute)
}

impl AppState {
    pub fn new(calendar: CalendarViewModel) -> Self {
        Self {
            mode: Mode::Normal,
            calendar,
            tasks: Vec::new(),
            load_status: LoadStatus::Idle,
            task_form: None,
            notice: None,
            show_help: false,
            help_scroll: 0,
            theme: Theme::default(),
            generation: 0,
            active: false,
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn grid(&self) -> CalendarGrid {
        self.calendar.build_grid(&self.tasks)
    }

    pub fn tasks_on(&self, date: NaiveDate) -> Vec<&Task> {
        let mut tasks: Vec<&Task> = self.tasks.iter().filter(|task| task.due.date() == date).collect();
        tasks.sort_by_key(|task| task.due);
        tasks
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Marks the calendar screen as shown and starts its first fetch.
    pub fn activate(&mut self) -> FetchTicket {
        self.active = true;
        self.begin_fetch()
    }

    /// Marks the screen as gone; fetches still in flight are ignored.
    pub fn deactivate(&mut self) {
        self.active = false;
        self.generation += 1;
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.generation += 1;
        self.load_status = LoadStatus::Loading;
        FetchTicket { generation: self.generation }
    }

    /// Installs a finished fetch. Returns `false` when the result arrived
    /// for a screen that was closed or superseded.
    pub fn apply_fetch(&mut self, ticket: FetchTicket, load: TaskLoad) -> bool {
        if !self.active || ticket.generation != self.generation {
            tracing::debug!(
                "Dropping stale task fetch (ticket {}, current {})",
                ticket.generation,
                self.generation
            );
            return false;
        }

        match load {
            TaskLoad::Loaded(tasks) => {
                tracing::info!("Loaded {} tasks", tasks.len());
                self.load_status = LoadStatus::Loaded(tasks.len());
                self.tasks = tasks;
            }
            TaskLoad::SignedOut => {
                self.load_status = LoadStatus::SignedOut;
                self.tasks = Vec::new();
            }
            TaskLoad::Failed(e) => {
                tracing::warn!("Task fetch failed, showing no tasks: {}", e);
                self.load_status = LoadStatus::Error(e.to_string());
                self.tasks = Vec::new();
            }
        }
        true
    }

    pub async fn refresh(&mut self, store: &dyn TaskStore, identity: &dyn IdentityProvider) {
        let ticket = self.begin_fetch();
        let load = load_tasks(store, identity).await;
        self.apply_fetch(ticket, load);
    }

    pub fn open_task_form(&mut self) {
        self.open_task_form_at(Local::now().naive_local());
    }

    pub fn open_task_form_at(&mut self, now: NaiveDateTime) {
        let draft = TaskDraft::starting_on(self.calendar.anchor(), now);
        self.task_form = Some(TaskForm::new(draft));
        self.mode = Mode::Insert;
    }

    pub fn discard_task_form(&mut self) {
        self.task_form = None;
        self.mode = Mode::Normal;
    }

    /// Validates and stores the draft, then refetches so the new task shows.
    ///
    /// On any failure the form stays open with its contents intact.
    pub async fn submit_task_form(
        &mut self,
        store: &dyn TaskStore,
        identity: &dyn IdentityProvider,
    ) -> Result<TaskId, SubmitError> {
        let result = self.store_draft(store, identity).await;

        match &result {
            Ok(id) => {
                self.task_form = None;
                self.mode = Mode::Normal;
                self.notice = Some(Notice::Info(format!("Task {} created", id)));
                self.refresh(store, identity).await;
            }
            Err(e) => {
                tracing::error!("Task submission failed: {}", e);
                self.notice = Some(Notice::Error(e.to_string()));
            }
        }

        result
    }

    async fn store_draft(
        &mut self,
        store: &dyn TaskStore,
        identity: &dyn IdentityProvider,
    ) -> Result<TaskId, SubmitError> {
        let form = self.task_form.as_mut().ok_or(SubmitError::NoDraft)?;
        form.commit_active_field()?;
        let owner_id = identity.current_owner_id().ok_or(SubmitError::SignedOut)?;
        let new_task = form.draft.to_new_task(owner_id)?;

        Ok(store.create_task(&new_task).await?)
    }
}
