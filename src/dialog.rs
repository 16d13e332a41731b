//! Modal text entry and yes/no confirmation.
//!
//! Both applications ask the user for input synchronously: the calling
//! handler blocks until the modal is answered, then carries on with the
//! mutation.

use crate::theme::Theme;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use log::error;
use ratatui::{
    backend::Backend,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};
use std::{collections::VecDeque, io};

pub trait Dialogs {
    /// Asks for a line of text. `None` means the user cancelled.
    fn prompt(&mut self, message: &str, default: &str) -> Option<String>;
    fn confirm(&mut self, message: &str) -> bool;
    fn alert(&mut self, message: &str);
}

pub struct TerminalDialogs<'a, B: Backend> {
    terminal: &'a mut Terminal<B>,
    theme: Theme,
}

impl<'a, B: Backend> TerminalDialogs<'a, B> {
    pub fn new(terminal: &'a mut Terminal<B>, theme: Theme) -> Self {
        Self { terminal, theme }
    }

    fn show(&mut self, message: &str, input: Option<&str>, hint: &str) -> io::Result<()> {
        let theme = self.theme;
        self.terminal
            .draw(|f| draw_modal(f, theme, message, input, hint))
            .map(|_| ())
    }

    /// Shows the modal and waits for the next key press.
    fn ask(&mut self, message: &str, input: Option<&str>, hint: &str) -> Option<KeyEvent> {
        let answer = self.show(message, input, hint).and_then(|_| next_key_press());
        match answer {
            Ok(key) => Some(key),
            Err(err) => {
                error!("dialog aborted: {err}");
                None
            }
        }
    }
}

impl<B: Backend> Dialogs for TerminalDialogs<'_, B> {
    fn prompt(&mut self, message: &str, default: &str) -> Option<String> {
        let mut input = default.to_string();
        loop {
            let key = self.ask(message, Some(&input), "enter: ok  esc: cancel")?;
            match key.code {
                KeyCode::Enter => return Some(input),
                KeyCode::Esc => return None,
                KeyCode::Backspace => {
                    input.pop();
                }
                KeyCode::Char(c) => input.push(c),
                _ => {}
            }
        }
    }

    fn confirm(&mut self, message: &str) -> bool {
        loop {
            let Some(key) = self.ask(message, None, "y: yes  n: no") else {
                return false;
            };
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => return true,
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => return false,
                _ => {}
            }
        }
    }

    fn alert(&mut self, message: &str) {
        self.ask(message, None, "press any key");
    }
}

fn next_key_press() -> io::Result<KeyEvent> {
    loop {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(key);
            }
        }
    }
}

fn draw_modal(f: &mut Frame, theme: Theme, message: &str, input: Option<&str>, hint: &str) {
    let area = centered(f.area(), 60, if input.is_some() { 5 } else { 4 });
    let mut lines = Vec::new();
    if let Some(input) = input {
        lines.push(Line::from(vec![
            Span::styled(input.to_string(), theme.base()),
            Span::styled("_", theme.accent()),
        ]));
    }
    lines.push(Line::from(Span::styled(hint.to_string(), theme.muted())));

    let modal = Paragraph::new(lines)
        .style(theme.base())
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(message.to_string())
                .borders(Borders::ALL)
                .border_style(theme.accent()),
        );
    f.render_widget(Clear, area);
    f.render_widget(modal, area);
}

pub(crate) fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Replays canned answers. Unanswered prompts cancel and unanswered
/// confirmations decline.
#[derive(Debug, Default)]
pub struct ScriptedDialogs {
    prompts: VecDeque<Option<String>>,
    confirms: VecDeque<bool>,
    pub asked: Vec<String>,
    pub alerts: Vec<String>,
}

impl ScriptedDialogs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(mut self, text: Option<&str>) -> Self {
        self.prompts.push_back(text.map(str::to_string));
        self
    }

    pub fn confirm_with(mut self, yes: bool) -> Self {
        self.confirms.push_back(yes);
        self
    }
}

impl Dialogs for ScriptedDialogs {
    fn prompt(&mut self, message: &str, _default: &str) -> Option<String> {
        self.asked.push(message.to_string());
        self.prompts.pop_front().flatten()
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.asked.push(message.to_string());
        self.confirms.pop_front().unwrap_or(false)
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }
}
