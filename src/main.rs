use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{error, info};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use taskdeck::{
    config::{App, Cli},
    logging, todo_ui, ui, FileStorage, KanbanBoard, TodoList,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init(&cli.log, &cli.log_path())?;
    info!("starting {:?} in {}", cli.app, cli.data_dir.display());

    let storage = Box::new(FileStorage::new(&cli.data_dir));

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result: Result<(), Box<dyn std::error::Error>> = match cli.app {
        App::List => {
            let mut list = TodoList::load(storage);
            todo_ui::run_app(&mut terminal, &mut list).map_err(Into::into)
        }
        App::Board => {
            let mut board = KanbanBoard::load(storage);
            ui::run_app(&mut terminal, &mut board)
        }
    };

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        error!("{err}");
        eprintln!("{err}");
        return Err(err);
    }
    Ok(())
}
