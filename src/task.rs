use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub text: String,
    pub status: String, // one of the board's column statuses
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub due_date: String,
}

/// A board column and the status every card inside it carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub status: String,
    pub title: String,
}

impl Column {
    pub fn new(status: &str, title: &str) -> Self {
        Self {
            status: status.to_string(),
            title: title.to_string(),
        }
    }
}

pub const DONE: &str = "done";

pub fn default_columns() -> Vec<Column> {
    vec![
        Column::new("todo", "TODO"),
        Column::new("doing", "DOING"),
        Column::new(DONE, "DONE"),
    ]
}
