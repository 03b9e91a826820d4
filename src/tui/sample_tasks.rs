use chrono::{Local, NaiveDate};
use mandarina::{
    calendar::{NewTask, OwnerId, Priority},
    storage::{SqliteTaskStore, StoreError},
};

pub const SAMPLE_OWNER: OwnerId = 1;

/// In-memory store with a handful of tasks around today.
pub fn sample_store() -> Result<SqliteTaskStore, StoreError> {
    let store = SqliteTaskStore::open_in_memory()?;
    let today = Local::now().date_naive();

    for task in sample_tasks(today) {
        store.insert_task(&task)?;
    }

    Ok(store)
}

fn sample_tasks(today: NaiveDate) -> Vec<NewTask> {
    let Some(tomorrow) = today.succ_opt() else { return Vec::new() };
    let Some(yesterday) = today.pred_opt() else { return Vec::new() };

    let tasks = [
        ("Water the plants", today, 8, 30, Priority::Low, None),
        ("Dentist appointment", today, 15, 0, Priority::High, Some("Bring insurance card")),
        ("Grocery run", tomorrow, 10, 0, Priority::Medium, Some("Oranges, rice, coffee")),
        ("Pay electricity bill", tomorrow, 18, 0, Priority::High, None),
        ("Call grandma", yesterday, 19, 30, Priority::Medium, None),
        ("Clean the fridge", yesterday, 11, 0, Priority::Low, None),
    ];

    tasks
        .into_iter()
        .filter_map(|(title, date, hour, minute, priority, description)| {
            Some(NewTask {
                owner_id: SAMPLE_OWNER,
                title: title.to_string(),
                description: description.map(String::from),
                due: date.and_hms_opt(hour, minute, 0)?,
                priority,
            })
        })
        .collect()
}
