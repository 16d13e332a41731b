pub mod board_view;
pub mod config;
pub mod dates;
pub mod dialog;
pub mod drag;
pub mod error;
pub mod kanban_board;
pub mod logging;
pub mod storage;
pub mod task;
pub mod theme;
pub mod todo;
pub mod todo_ui;
pub mod todo_view;
pub mod ui;

pub use error::{StorageError, TodoError};
pub use kanban_board::KanbanBoard;
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use todo::TodoList;
