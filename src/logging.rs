use env_logger::{Builder, Target};
use std::{fs, io, path::Path};

/// Sends log records to `path` so they never paint over the terminal UI.
pub fn init(filter: &str, path: &Path) -> io::Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = fs::OpenOptions::new().create(true).append(true).open(path)?;
    Builder::new()
        .parse_filters(filter)
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .map_err(io::Error::other)
}
