use crate::{
    dates::now_iso,
    dialog::Dialogs,
    drag::DragState,
    error::StorageError,
    storage::{load_tasks, save_tasks, Storage},
    task::{default_columns, Column, Task, DONE},
    theme::{Theme, THEME_KEY},
};
use log::{debug, info};
use uuid::Uuid;

pub const STORAGE_KEY: &str = "trelloTasks";

/// Application state of the board. Every mutation rewrites the whole
/// collection and hands write failures back to the caller.
pub struct KanbanBoard {
    storage: Box<dyn Storage>,
    tasks: Vec<Task>,
    columns: Vec<Column>,
    pub theme: Theme,
    pub drag: DragState,
    pub selected_status: usize,
    pub selected_task: usize,
}

impl KanbanBoard {
    pub fn load(storage: Box<dyn Storage>) -> Self {
        Self::with_columns(storage, default_columns())
    }

    pub fn with_columns(storage: Box<dyn Storage>, columns: Vec<Column>) -> Self {
        let tasks: Vec<Task> = load_tasks(storage.as_ref(), STORAGE_KEY);
        let theme = Theme::load(storage.as_ref());
        info!("loaded {} cards, theme {}", tasks.len(), theme.as_str());
        Self {
            storage,
            tasks,
            columns,
            theme,
            drag: DragState::Idle,
            selected_status: 0,
            selected_task: 0,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn get_tasks_by_status(&self, status: &str) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.status == status).collect()
    }

    pub fn column_index(&self, status: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.status == status)
    }

    /// Card under the column/card cursor.
    pub fn selected(&self) -> Option<&Task> {
        let column = self.columns.get(self.selected_status)?;
        self.get_tasks_by_status(&column.status)
            .into_iter()
            .nth(self.selected_task)
    }

    /// Adds a card to the column holding `status`. `None` or blank text means
    /// the entry was cancelled and nothing happens.
    pub fn add_task(
        &mut self,
        status: &str,
        text: Option<&str>,
        due_date: &str,
    ) -> Result<Option<&Task>, StorageError> {
        let Some(text) = text.map(str::trim).filter(|t| !t.is_empty()) else {
            return Ok(None);
        };
        self.tasks.push(Task {
            id: Uuid::new_v4().to_string(),
            text: text.to_string(),
            status: status.to_string(),
            created_at: now_iso(),
            due_date: due_date.trim().to_string(),
        });
        self.save_to_storage()?;
        Ok(self.tasks.last())
    }

    /// Moves the card to the terminal column. There is no way back from here
    /// other than dragging.
    pub fn set_done(&mut self, id: &str) -> Result<bool, StorageError> {
        self.reassign_status(id, DONE)
    }

    pub fn edit_task(&mut self, id: &str, text: Option<&str>) -> Result<bool, StorageError> {
        let Some(text) = text.map(str::trim).filter(|t| !t.is_empty()) else {
            return Ok(false);
        };
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(false);
        };
        task.text = text.to_string();
        self.save_to_storage()?;
        Ok(true)
    }

    /// Removes the card immediately; the board never asks for confirmation.
    pub fn delete_task(&mut self, id: &str) -> Result<bool, StorageError> {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() == before {
            return Ok(false);
        }
        self.clamp_selection();
        self.save_to_storage()?;
        Ok(true)
    }

    pub fn reassign_status(&mut self, id: &str, status: &str) -> Result<bool, StorageError> {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(false);
        };
        debug!("card {} {} -> {}", task.id, task.status, status);
        task.status = status.to_string();
        self.clamp_selection();
        self.save_to_storage()?;
        Ok(true)
    }

    pub fn prompt_add(
        &mut self,
        column: usize,
        dialogs: &mut dyn Dialogs,
    ) -> Result<bool, StorageError> {
        let Some(status) = self.columns.get(column).map(|c| c.status.clone()) else {
            return Ok(false);
        };
        let Some(text) = dialogs.prompt("Enter task description", "") else {
            return Ok(false);
        };
        if text.trim().is_empty() {
            return Ok(false);
        }
        let due_date = dialogs
            .prompt("Enter due date (YYYY-MM-DD)", "")
            .unwrap_or_default();
        Ok(self.add_task(&status, Some(&text), &due_date)?.is_some())
    }

    pub fn prompt_edit(&mut self, id: &str, dialogs: &mut dyn Dialogs) -> Result<bool, StorageError> {
        let Some(current) = self.tasks.iter().find(|t| t.id == id) else {
            return Ok(false);
        };
        let answer = dialogs.prompt("Edit task", &current.text);
        self.edit_task(id, answer.as_deref())
    }

    pub fn start_drag(&mut self, id: &str) {
        let Some(column) = self
            .tasks
            .iter()
            .find(|t| t.id == id)
            .and_then(|t| self.column_index(&t.status))
        else {
            return;
        };
        self.drag.start(id, column);
    }

    pub fn drag_over(&mut self, column: Option<usize>) {
        self.drag.over(column.filter(|c| *c < self.columns.len()));
    }

    /// Commits the held card to the column it was last placed in.
    pub fn end_drag(&mut self) -> Result<Option<String>, StorageError> {
        let Some(gesture) = self.drag.end() else {
            return Ok(None);
        };
        let status = self.columns[gesture.hover].status.clone();
        self.reassign_status(&gesture.task_id, &status)?;
        // The card leaves the bottom of the column and returns to collection order.
        self.selected_status = gesture.hover;
        self.selected_task = self
            .get_tasks_by_status(&status)
            .iter()
            .position(|t| t.id == gesture.task_id)
            .unwrap_or(0);
        Ok(Some(status))
    }

    pub fn toggle_theme(&mut self) -> Result<Theme, StorageError> {
        self.theme = self.theme.toggled();
        self.storage.set_item(THEME_KEY, self.theme.as_str())?;
        Ok(self.theme)
    }

    fn clamp_selection(&mut self) {
        let len = self
            .columns
            .get(self.selected_status)
            .map(|c| self.get_tasks_by_status(&c.status).len())
            .unwrap_or(0);
        self.selected_task = self.selected_task.min(len.saturating_sub(1));
    }

    fn save_to_storage(&mut self) -> Result<(), StorageError> {
        save_tasks(self.storage.as_mut(), STORAGE_KEY, &self.tasks)
    }
}
