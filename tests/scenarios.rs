use taskdeck::{
    board_view,
    dialog::ScriptedDialogs,
    storage::load_tasks,
    task::Task,
    todo::{Filter, TodoTask, STORAGE_KEY},
    todo_view::{self, TodoView},
    FileStorage, KanbanBoard, TodoList,
};

#[test]
fn list_toggle_empties_active_filter() {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = tempfile::tempdir().unwrap();
    let mut list = TodoList::load(Box::new(FileStorage::new(dir.path())));
    assert!(list.tasks().is_empty());

    let id = list.add("Buy milk", Some("2024-01-01")).unwrap().id.clone();
    assert_eq!(list.tasks().len(), 1);
    assert!(!list.tasks()[0].completed);

    assert!(list.toggle_completion(&id));
    let view = todo_view::render(&list);
    assert!(view.rows()[0].struck);

    list.set_filter(Filter::Active);
    assert!(matches!(todo_view::render(&list), TodoView::Empty { .. }));

    let reopened = TodoList::load(Box::new(FileStorage::new(dir.path())));
    assert_eq!(reopened.tasks(), list.tasks());
}

#[test]
fn list_delete_removes_from_store_and_view() {
    let dir = tempfile::tempdir().unwrap();
    let mut list = TodoList::load(Box::new(FileStorage::new(dir.path())));
    let keep = list.add("keep", None).unwrap().id.clone();
    let doomed = list.add("drop", None).unwrap().id.clone();

    let mut dialogs = ScriptedDialogs::new().confirm_with(true);
    assert!(list.confirm_delete(&doomed, &mut dialogs));

    let view = todo_view::render(&list);
    assert!(view.rows().iter().all(|r| r.id != doomed));
    assert_eq!(view.rows()[0].id, keep);

    let storage = FileStorage::new(dir.path());
    let stored: Vec<TodoTask> = load_tasks(&storage, STORAGE_KEY);
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, keep);
}

#[test]
fn list_recovers_from_corrupt_slot() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("task_manager_tasks.json"), "[{broken").unwrap();
    let mut list = TodoList::load(Box::new(FileStorage::new(dir.path())));
    assert!(list.tasks().is_empty());
    assert!(list.add("fresh start", None).is_some());
}

#[test]
fn board_drag_from_todo_to_done() {
    let dir = tempfile::tempdir().unwrap();
    let mut board = KanbanBoard::load(Box::new(FileStorage::new(dir.path())));
    let id = board
        .add_task("todo", Some("Write report"), "")
        .unwrap()
        .unwrap()
        .id
        .clone();

    board.start_drag(&id);
    board.drag_over(Some(2));
    board.end_drag().unwrap();

    let storage = FileStorage::new(dir.path());
    let stored: Vec<Task> = load_tasks(&storage, taskdeck::kanban_board::STORAGE_KEY);
    assert_eq!(stored[0].status, "done");

    let view = board_view::render(&board);
    assert!(view.card_ids(0).is_empty());
    assert_eq!(view.card_ids(2), [id.as_str()]);
}

#[test]
fn board_theme_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let mut board = KanbanBoard::load(Box::new(FileStorage::new(dir.path())));
    board.toggle_theme().unwrap();

    let reopened = KanbanBoard::load(Box::new(FileStorage::new(dir.path())));
    assert_eq!(reopened.theme, taskdeck::theme::Theme::Dark);
}
