use crate::{
    dates::short_local_date,
    todo::{Filter, TodoList, TodoTask},
};

pub const EMPTY_MESSAGE: &str = "No tasks here. Add something!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoView {
    Empty { message: &'static str },
    Items(Vec<TodoRow>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoRow {
    pub id: String,
    pub checked: bool,
    pub title: String,
    pub struck: bool,
    pub meta: String,
    pub actions: [&'static str; 2],
}

impl TodoView {
    pub fn rows(&self) -> &[TodoRow] {
        match self {
            TodoView::Empty { .. } => &[],
            TodoView::Items(rows) => rows,
        }
    }
}

/// Projects the list through its active filter. The result depends only on
/// the list, never on what was drawn before.
pub fn render(list: &TodoList) -> TodoView {
    render_tasks(list.tasks(), list.filter())
}

pub fn render_tasks(tasks: &[TodoTask], filter: Filter) -> TodoView {
    let rows: Vec<TodoRow> = tasks
        .iter()
        .filter(|t| filter.matches(t))
        .map(|t| TodoRow {
            id: t.id.clone(),
            checked: t.completed,
            title: t.title.clone(),
            struck: t.completed,
            meta: format_meta(t),
            actions: ["Edit", "Delete"],
        })
        .collect();

    if rows.is_empty() {
        TodoView::Empty {
            message: EMPTY_MESSAGE,
        }
    } else {
        TodoView::Items(rows)
    }
}

/// Due date and creation date, joined by a bullet. A creation stamp that
/// does not parse is left out.
pub fn format_meta(task: &TodoTask) -> String {
    let mut parts = Vec::new();
    if let Some(due) = task.due_date.as_deref().filter(|d| !d.is_empty()) {
        parts.push(format!("Due: {due}"));
    }
    if let Some(added) = short_local_date(&task.created_at) {
        parts.push(format!("Added: {added}"));
    }
    parts.join(" • ")
}
