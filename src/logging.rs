//! File-backed logger setup.
//!
//! The terminal belongs to the TUI, so records go to a log file instead of
//! stderr. `DUET_LOG` (same syntax as `RUST_LOG`) overrides `log.level`.

use std::fs::{self, OpenOptions};
use std::path::Path;

use env_logger::{Builder, Env, Target};

use crate::config::Settings;

pub const LOG_ENV: &str = "DUET_LOG";

/// Install the global logger. Failing to open the log file only disables logging.
pub fn init(settings: &Settings) {
    let Some(path) = settings.log_path() else {
        eprintln!("duet: no log location (HOME unset), logging disabled");
        return;
    };

    let file = match open_log_file(&path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("duet: cannot open log file {}: {e}", path.display());
            return;
        }
    };

    let env = Env::default().filter_or(LOG_ENV, settings.log.level.as_str());
    let result = Builder::from_env(env)
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init();

    if let Err(e) = result {
        eprintln!("duet: logger already installed: {e}");
    }
}

fn open_log_file(path: &Path) -> std::io::Result<fs::File> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}
