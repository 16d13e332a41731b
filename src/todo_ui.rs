use crate::{
    dialog::{Dialogs, TerminalDialogs},
    theme::Theme,
    todo::{Filter, TodoList},
    todo_view::{self, TodoView},
};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Tabs},
    Frame, Terminal,
};
use std::io;

const HELP: &str = "a add  space toggle  e edit  d delete  tab/1/2/3 filter  ↑/↓ select  q quit";

pub fn run_app<B: Backend>(terminal: &mut Terminal<B>, list: &mut TodoList) -> io::Result<()> {
    let mut selected: usize = 0;
    loop {
        let view = todo_view::render(list);
        selected = selected.min(view.rows().len().saturating_sub(1));
        terminal.draw(|f| draw(f, list.filter(), &view, selected))?;

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        let current = view.rows().get(selected).map(|row| row.id.clone());

        match key.code {
            KeyCode::Char('q') => return Ok(()),
            KeyCode::Char('a') => {
                let mut dialogs = TerminalDialogs::new(terminal, Theme::Light);
                add_task(list, &mut dialogs);
            }
            KeyCode::Char(' ') => {
                if let Some(id) = current {
                    list.toggle_completion(&id);
                }
            }
            KeyCode::Char('e') => {
                if let Some(id) = current {
                    let mut dialogs = TerminalDialogs::new(terminal, Theme::Light);
                    list.prompt_edit(&id, &mut dialogs);
                }
            }
            KeyCode::Char('d') => {
                if let Some(id) = current {
                    let mut dialogs = TerminalDialogs::new(terminal, Theme::Light);
                    list.confirm_delete(&id, &mut dialogs);
                }
            }
            KeyCode::Tab => list.set_filter(list.filter().next()),
            KeyCode::Char(c @ '1'..='3') => {
                let index = c as usize - '1' as usize;
                list.set_filter(Filter::ALL[index]);
            }
            KeyCode::Up => selected = selected.saturating_sub(1),
            KeyCode::Down => selected += 1,
            _ => {}
        }
    }
}

/// The add form: a title, then an optional due date.
pub fn add_task(list: &mut TodoList, dialogs: &mut dyn Dialogs) -> bool {
    let Some(title) = dialogs.prompt("New task", "") else {
        return false;
    };
    if title.trim().is_empty() {
        return false;
    }
    let due_date = dialogs.prompt("Due date (YYYY-MM-DD, optional)", "");
    list.add(&title, due_date.as_deref()).is_some()
}

fn draw(f: &mut Frame, filter: Filter, view: &TodoView, selected: usize) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(f.area());

    let titles: Vec<&str> = Filter::ALL.iter().map(|tab| tab.label()).collect();
    let index = Filter::ALL.iter().position(|tab| *tab == filter).unwrap_or(0);
    let tabs = Tabs::new(titles)
        .select(index)
        .block(Block::default().title("Tasks").borders(Borders::ALL))
        .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
    f.render_widget(tabs, chunks[0]);

    let block = Block::default().borders(Borders::ALL);
    match view {
        TodoView::Empty { message } => {
            let placeholder = Paragraph::new(*message)
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            f.render_widget(placeholder, chunks[1]);
        }
        TodoView::Items(rows) => {
            let items: Vec<ListItem> = rows
                .iter()
                .enumerate()
                .map(|(i, row)| {
                    let mut title_style = Style::default();
                    if row.struck {
                        title_style = title_style
                            .fg(Color::DarkGray)
                            .add_modifier(Modifier::CROSSED_OUT);
                    }
                    if i == selected {
                        title_style = title_style.add_modifier(Modifier::REVERSED);
                    }
                    ListItem::new(vec![
                        Line::from(vec![
                            Span::raw(if row.checked { "[x] " } else { "[ ] " }),
                            Span::styled(row.title.clone(), title_style),
                            Span::styled(
                                format!("  [{}] [{}]", row.actions[0], row.actions[1]),
                                Style::default().fg(Color::Cyan),
                            ),
                        ]),
                        Line::from(Span::styled(
                            format!("    {}", row.meta),
                            Style::default().fg(Color::DarkGray),
                        )),
                    ])
                })
                .collect();
            f.render_widget(List::new(items).block(block), chunks[1]);
        }
    }

    f.render_widget(
        Paragraph::new(HELP).style(Style::default().fg(Color::DarkGray)),
        chunks[2],
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{dialog::ScriptedDialogs, storage::MemoryStorage};
    use ratatui::backend::TestBackend;

    fn screen(list: &TodoList) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 12)).unwrap();
        let view = todo_view::render(list);
        terminal.draw(|f| draw(f, list.filter(), &view, 0)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|line| line.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn add_form_takes_title_and_due_date() {
        let mut list = TodoList::load(Box::new(MemoryStorage::new()));
        let mut dialogs = ScriptedDialogs::new()
            .answer(Some("Buy milk"))
            .answer(Some("2024-01-01"));
        assert!(add_task(&mut list, &mut dialogs));
        assert_eq!(list.tasks()[0].due_date.as_deref(), Some("2024-01-01"));
    }

    #[test]
    fn cancelled_add_form_adds_nothing() {
        let mut list = TodoList::load(Box::new(MemoryStorage::new()));
        assert!(!add_task(&mut list, &mut ScriptedDialogs::new()));
        assert!(list.tasks().is_empty());
    }

    #[test]
    fn empty_list_shows_placeholder() {
        let list = TodoList::load(Box::new(MemoryStorage::new()));
        assert!(screen(&list).contains(todo_view::EMPTY_MESSAGE));
    }

    #[test]
    fn rows_show_title_and_checkbox() {
        let mut list = TodoList::load(Box::new(MemoryStorage::new()));
        let id = list.add("Buy milk", None).unwrap().id.clone();
        list.toggle_completion(&id);
        let screen = screen(&list);
        assert!(screen.contains("[x] Buy milk"));
        assert!(screen.contains("[Edit] [Delete]"));
    }
}
