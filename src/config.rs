use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub const LOG_FILE: &str = "taskdeck.log";

#[derive(Debug, Parser)]
#[command(name = "taskdeck", version, about = "Terminal to-do list and kanban board")]
pub struct Cli {
    /// Directory holding the persisted task slots.
    #[arg(long, env = "TASKDECK_DATA_DIR", default_value = ".")]
    pub data_dir: PathBuf,

    /// Log filter, e.g. `info` or `taskdeck=debug`.
    #[arg(long, env = "TASKDECK_LOG", default_value = "info")]
    pub log: String,

    #[command(subcommand)]
    pub app: App,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum App {
    /// Single list with All / Active / Completed filters
    List,
    /// Three-column board with drag and drop
    Board,
}

impl Cli {
    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join(LOG_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_working_directory() {
        let cli = Cli::try_parse_from(["taskdeck", "board"]).unwrap();
        assert_eq!(cli.app, App::Board);
        assert_eq!(cli.data_dir, PathBuf::from("."));
        assert_eq!(cli.log_path(), PathBuf::from("./taskdeck.log"));
    }

    #[test]
    fn accepts_data_dir_and_filter() {
        let cli =
            Cli::try_parse_from(["taskdeck", "--data-dir", "/tmp/td", "--log", "debug", "list"])
                .unwrap();
        assert_eq!(cli.app, App::List);
        assert_eq!(cli.data_dir, PathBuf::from("/tmp/td"));
        assert_eq!(cli.log, "debug");
    }

    #[test]
    fn requires_an_app() {
        assert!(Cli::try_parse_from(["taskdeck"]).is_err());
    }

    #[test]
    fn definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
