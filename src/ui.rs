use crate::{
    board_view::{self, BoardView, CardView},
    dialog::TerminalDialogs,
    kanban_board::KanbanBoard,
    theme::Theme,
};
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use log::debug;
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame, Terminal,
};
use std::error::Error;

const CARD_HEIGHT: u16 = 2;
const HELP: &str = "←/→ column  ↑/↓ card  a add  e edit  c complete  d delete  space grab/drop  t theme  q quit";

pub fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    board: &mut KanbanBoard,
) -> Result<(), Box<dyn Error>> {
    let mut columns_area: Vec<Rect> = Vec::new();
    loop {
        let view = board_view::render(board);
        follow_held_card(board, &view);
        terminal.draw(|f| columns_area = draw(f, board, &view))?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if !handle_key(terminal, board, &view, key)? {
                    return Ok(());
                }
            }
            Event::Mouse(mouse) => handle_mouse(board, &view, &columns_area, mouse)?,
            _ => {}
        }
    }
}

/// Returns `false` once the user asks to quit.
fn handle_key<B: Backend>(
    terminal: &mut Terminal<B>,
    board: &mut KanbanBoard,
    view: &BoardView,
    key: KeyEvent,
) -> Result<bool, Box<dyn Error>> {
    if let Some(hover) = board.drag.gesture().map(|g| g.hover) {
        match key.code {
            KeyCode::Left => board.drag_over(hover.checked_sub(1)),
            KeyCode::Right => board.drag_over(Some(hover + 1)),
            KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Esc => {
                board.end_drag()?;
            }
            _ => {}
        }
        return Ok(true);
    }

    // Outside a drag the view lists each column in collection order, so the
    // board's own cursor lookup matches what is on screen.
    let selected = board.selected().map(|task| task.id.clone());

    match key.code {
        KeyCode::Char('q') => return Ok(false),
        KeyCode::Char('a') => {
            let mut dialogs = TerminalDialogs::new(terminal, board.theme);
            board.prompt_add(board.selected_status, &mut dialogs)?;
        }
        KeyCode::Char('e') => {
            if let Some(id) = selected {
                let mut dialogs = TerminalDialogs::new(terminal, board.theme);
                board.prompt_edit(&id, &mut dialogs)?;
            }
        }
        KeyCode::Char('c') => {
            if let Some(id) = selected {
                board.set_done(&id)?;
            }
        }
        KeyCode::Char('d') => {
            if let Some(id) = selected {
                board.delete_task(&id)?;
            }
        }
        KeyCode::Char(' ') => {
            if let Some(id) = selected {
                board.start_drag(&id);
            }
        }
        KeyCode::Char('t') => {
            board.toggle_theme()?;
        }
        KeyCode::Left => {
            if board.selected_status > 0 {
                board.selected_status -= 1;
                board.selected_task = 0;
            }
        }
        KeyCode::Right => {
            if board.selected_status < view.columns.len().saturating_sub(1) {
                board.selected_status += 1;
                board.selected_task = 0;
            }
        }
        KeyCode::Up => {
            board.selected_task = board.selected_task.saturating_sub(1);
        }
        KeyCode::Down => {
            let max_tasks = view
                .columns
                .get(board.selected_status)
                .map_or(0, |c| c.cards.len());
            if board.selected_task + 1 < max_tasks {
                board.selected_task += 1;
            }
        }
        _ => {}
    }
    Ok(true)
}

fn handle_mouse(
    board: &mut KanbanBoard,
    view: &BoardView,
    columns_area: &[Rect],
    mouse: MouseEvent,
) -> Result<(), Box<dyn Error>> {
    let position = Position::new(mouse.column, mouse.row);
    let column = columns_area.iter().position(|area| area.contains(position));
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let Some(column) = column else {
                return Ok(());
            };
            if let Some(id) = card_at(view, columns_area, column, mouse.row) {
                debug!("drag start {id}");
                board.start_drag(&id);
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => board.drag_over(column),
        MouseEventKind::Up(MouseButton::Left) => {
            board.end_drag()?;
        }
        _ => {}
    }
    Ok(())
}

fn card_at(view: &BoardView, columns_area: &[Rect], column: usize, row: u16) -> Option<String> {
    let area = columns_area.get(column)?;
    let offset = row.checked_sub(area.y + 1)?;
    let index = usize::from(offset / CARD_HEIGHT);
    view.columns
        .get(column)?
        .cards
        .get(index)
        .map(|card| card.id.clone())
}

// Keeps the cursor on the held card while it travels between columns.
fn follow_held_card(board: &mut KanbanBoard, view: &BoardView) {
    let Some(gesture) = board.drag.gesture() else {
        return;
    };
    let hover = gesture.hover;
    if let Some(index) = view
        .columns
        .get(hover)
        .and_then(|c| c.cards.iter().position(|card| card.dragging))
    {
        board.selected_status = hover;
        board.selected_task = index;
    }
}

fn draw(f: &mut Frame, board: &KanbanBoard, view: &BoardView) -> Vec<Rect> {
    let theme = board.theme;
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(f.area());

    let count = view.columns.len().max(1) as u32;
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(view.columns.iter().map(|_| Constraint::Ratio(1, count)))
        .split(outer[0]);

    for (i, column) in view.columns.iter().enumerate() {
        let items: Vec<ListItem> = column
            .cards
            .iter()
            .enumerate()
            .map(|(j, card)| {
                let selected = board.selected_status == i && board.selected_task == j;
                card_item(theme, card, selected)
            })
            .collect();

        let list = List::new(items).style(theme.base()).block(
            Block::default()
                .title(format!("{} ({})", column.title, column.cards.len()))
                .borders(Borders::ALL)
                .border_style(if board.selected_status == i {
                    theme.accent()
                } else {
                    theme.base()
                }),
        );

        f.render_widget(list, chunks[i]);
    }

    let status = if board.drag.is_dragging() {
        "holding card: ←/→ move  space/enter/esc drop"
    } else {
        HELP
    };
    f.render_widget(Paragraph::new(status).style(theme.muted()), outer[1]);

    chunks.to_vec()
}

fn card_item(theme: Theme, card: &CardView, selected: bool) -> ListItem<'static> {
    let text_style = if card.dragging {
        theme.held()
    } else if selected {
        theme.base().add_modifier(Modifier::BOLD | Modifier::REVERSED)
    } else {
        theme.base()
    };
    let mut meta = vec![Span::styled(card.meta.clone(), theme.muted())];
    meta.push(Span::styled(
        if card.can_complete { "  [e] [d] [c]" } else { "  [e] [d]" },
        theme.accent(),
    ));
    ListItem::new(vec![
        Line::from(Span::styled(card.text.clone(), text_style)),
        Line::from(meta),
    ])
}
