//! File logging and the panic hook. The popup owns the terminal, so nothing
//! is ever logged to stdout or stderr while it runs.
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crossterm::{
    ExecutableCommand,
    event::DisableBracketedPaste,
    terminal::{LeaveAlternateScreen, disable_raw_mode},
};
use tracing_subscriber::EnvFilter;

use dm_base::constants::{LOG_ENV, LOG_FILE};
use dm_base::shared::{ensure_dir, errors_dir};

const DEFAULT_FILTER: &str = "warn";

fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Filter from `DEMYSTIFY_LOG`, defaulting to warnings only
fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Route `tracing` output to `<store>/demystify.log`.
pub fn init(store: &Path) -> io::Result<()> {
    ensure_dir(store)?;
    let file = open_append(&store.join(LOG_FILE))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| io::Error::other(e.to_string()))
}

/// Append one panic record to `<store>/errors/panic.log`, returning its path.
pub fn write_panic_record(store: &Path, message: &str) -> io::Result<PathBuf> {
    let dir = errors_dir(store);
    ensure_dir(&dir)?;
    let path = dir.join("panic.log");
    let ts = std::time::SystemTime::now().duration_since(std::time::UNIX_EPOCH).map(|d| d.as_secs()).unwrap_or(0);
    open_append(&path)?.write_all(format!("[{}] {}\n\n---\n", ts, message).as_bytes())?;
    Ok(path)
}

/// Restore the terminal and record the panic before the default hook runs.
/// Without this a panic leaves the pane in raw mode on the alternate screen.
pub fn install_panic_hook(store: PathBuf) {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = io::stdout().execute(DisableBracketedPaste);
        let _ = io::stdout().execute(LeaveAlternateScreen);

        let backtrace = std::backtrace::Backtrace::force_capture();
        let _ = write_panic_record(&store, &format!("{}\n\n{}", info, backtrace));

        default_hook(info);
    }));
}
