//! Single-list to-do manager with completion filtering.

use crate::{
    dates::now_iso,
    dialog::Dialogs,
    error::TodoError,
    storage::{load_tasks, save_tasks, Storage},
};
use log::{error, info};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const STORAGE_KEY: &str = "task_manager_tasks";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoTask {
    pub id: String,
    pub title: String,
    pub completed: bool,
    pub due_date: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    pub const ALL: [Filter; 3] = [Filter::All, Filter::Active, Filter::Completed];

    pub fn matches(self, task: &TodoTask) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => !task.completed,
            Filter::Completed => task.completed,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Filter::All => "All",
            Filter::Active => "Active",
            Filter::Completed => "Completed",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Filter::All => Filter::Active,
            Filter::Active => Filter::Completed,
            Filter::Completed => Filter::All,
        }
    }
}

/// Application state of the to-do list: the authoritative collection, the
/// slot it is mirrored into, and the active filter.
pub struct TodoList {
    storage: Box<dyn Storage>,
    tasks: Vec<TodoTask>,
    filter: Filter,
}

impl TodoList {
    pub fn load(storage: Box<dyn Storage>) -> Self {
        let tasks = load_tasks(storage.as_ref(), STORAGE_KEY);
        info!("loaded {} tasks", tasks.len());
        Self {
            storage,
            tasks,
            filter: Filter::All,
        }
    }

    pub fn tasks(&self) -> &[TodoTask] {
        &self.tasks
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    /// Tasks passing the active filter, in insertion order.
    pub fn visible(&self) -> impl Iterator<Item = &TodoTask> {
        let filter = self.filter;
        self.tasks.iter().filter(move |t| filter.matches(t))
    }

    /// Appends a new task. Blank titles are ignored.
    pub fn add(&mut self, title: &str, due_date: Option<&str>) -> Option<&TodoTask> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }
        let due_date = due_date
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string);

        self.tasks.push(TodoTask {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            completed: false,
            due_date,
            created_at: now_iso(),
        });
        self.persist();
        self.tasks.last()
    }

    /// Flips completion of the task with `id`. Returns `false` if there is none.
    pub fn toggle_completion(&mut self, id: &str) -> bool {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return false;
        };
        task.completed = !task.completed;
        self.persist();
        true
    }

    pub fn edit(&mut self, id: &str, title: &str) -> Result<bool, TodoError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(TodoError::EmptyTitle);
        }
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(false);
        };
        task.title = title.to_string();
        self.persist();
        Ok(true)
    }

    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() == before {
            return false;
        }
        self.persist();
        true
    }

    /// Asks for a new title. Cancelling changes nothing; a blank answer is
    /// reported through an alert and also changes nothing.
    pub fn prompt_edit(&mut self, id: &str, dialogs: &mut dyn Dialogs) -> bool {
        let Some(current) = self.tasks.iter().find(|t| t.id == id) else {
            return false;
        };
        let Some(answer) = dialogs.prompt("Edit task:", &current.title) else {
            return false;
        };
        match self.edit(id, &answer) {
            Ok(changed) => changed,
            Err(err) => {
                dialogs.alert(&err.to_string());
                false
            }
        }
    }

    pub fn confirm_delete(&mut self, id: &str, dialogs: &mut dyn Dialogs) -> bool {
        if !dialogs.confirm("Are you sure you want to delete this task?") {
            return false;
        }
        self.delete(id)
    }

    // Write failures are logged only; the in-memory list stays authoritative.
    fn persist(&mut self) {
        if let Err(err) = save_tasks(self.storage.as_mut(), STORAGE_KEY, &self.tasks) {
            error!("Error saving tasks to storage: {err}");
        }
    }
}
