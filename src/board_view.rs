use crate::{
    dates::short_local_date,
    kanban_board::KanbanBoard,
    task::{Task, DONE},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView {
    pub columns: Vec<ColumnView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnView {
    pub title: String,
    pub cards: Vec<CardView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub id: String,
    pub text: String,
    pub meta: String,
    pub can_complete: bool,
    pub dragging: bool,
}

impl BoardView {
    pub fn card_ids(&self, column: usize) -> Vec<&str> {
        self.columns
            .get(column)
            .map(|c| c.cards.iter().map(|card| card.id.as_str()).collect())
            .unwrap_or_default()
    }
}

/// Partitions the cards by status into their columns. A held card is drawn
/// at the bottom of the column it is hovering over instead of its own.
pub fn render(board: &KanbanBoard) -> BoardView {
    let mut columns: Vec<ColumnView> = board
        .columns()
        .iter()
        .map(|c| ColumnView {
            title: c.title.clone(),
            cards: Vec::new(),
        })
        .collect();

    let mut held = None;
    for task in board.tasks() {
        if let Some(hover) = board.drag.placement(&task.id) {
            held = Some((hover, card(task, true)));
            continue;
        }
        if let Some(index) = board.column_index(&task.status) {
            columns[index].cards.push(card(task, false));
        }
    }
    if let Some((hover, card)) = held {
        if let Some(column) = columns.get_mut(hover) {
            column.cards.push(card);
        }
    }

    BoardView { columns }
}

fn card(task: &Task, dragging: bool) -> CardView {
    CardView {
        id: task.id.clone(),
        text: task.text.clone(),
        meta: format_meta(task),
        can_complete: task.status != DONE,
        dragging,
    }
}

pub fn format_meta(task: &Task) -> String {
    let created = short_local_date(&task.created_at).unwrap_or_else(|| "Invalid Date".to_string());
    if task.due_date.is_empty() {
        format!("Created: {created}")
    } else {
        format!("Due: {} | Created: {created}", task.due_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn board_with(cards: &[(&str, &str)]) -> (KanbanBoard, Vec<String>) {
        let mut board = KanbanBoard::load(Box::new(MemoryStorage::new()));
        let ids = cards
            .iter()
            .map(|(status, text)| {
                board
                    .add_task(status, Some(text), "")
                    .unwrap()
                    .unwrap()
                    .id
                    .clone()
            })
            .collect();
        (board, ids)
    }

    #[test]
    fn partitions_by_status_in_insertion_order() {
        let (board, ids) = board_with(&[("todo", "a"), ("done", "b"), ("todo", "c")]);
        let view = render(&board);
        assert_eq!(view.card_ids(0), [ids[0].as_str(), ids[2].as_str()]);
        assert!(view.card_ids(1).is_empty());
        assert_eq!(view.card_ids(2), [ids[1].as_str()]);
        assert!(view.columns[0].cards[0].can_complete);
        assert!(!view.columns[2].cards[0].can_complete);
    }

    #[test]
    fn held_card_is_drawn_in_hover_column() {
        let (mut board, ids) = board_with(&[("todo", "a"), ("doing", "b")]);
        board.start_drag(&ids[0]);
        board.drag_over(Some(1));

        let view = render(&board);
        assert!(view.card_ids(0).is_empty());
        assert_eq!(view.card_ids(1), [ids[1].as_str(), ids[0].as_str()]);
        assert!(view.columns[1].cards[1].dragging);
        assert_eq!(board.tasks()[0].status, "todo");
    }

    #[test]
    fn unknown_status_is_not_drawn() {
        let (board, _) = board_with(&[("archived", "a")]);
        let view = render(&board);
        assert!(view.columns.iter().all(|c| c.cards.is_empty()));
    }

    #[test]
    fn malformed_created_at_shows_invalid_date() {
        let task = Task {
            id: "1".into(),
            text: "x".into(),
            status: "todo".into(),
            created_at: "garbage".into(),
            due_date: "2024-01-01".into(),
        };
        assert_eq!(format_meta(&task), "Due: 2024-01-01 | Created: Invalid Date");
    }
}
