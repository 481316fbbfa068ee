use log::LevelFilter;
use simplelog::{Config, WriteLogger};
use std::env;
use std::fs::File;
use std::io;
use std::path::Path;

pub const LOG_ENV_VAR: &str = "CHESS_LOG";

/// Maps a level name to a filter. Unknown names fall back to `Error`.
pub fn parse_level(s: &str) -> LevelFilter {
    match s.trim().to_lowercase().as_str() {
        "off" | "none" => LevelFilter::Off,
        "error" | "err" => LevelFilter::Error,
        "warn" | "warning" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Error,
    }
}

/// Explicit level wins over `CHESS_LOG`, which wins over `Error`.
pub fn resolve_level(explicit: Option<&str>) -> LevelFilter {
    level_from(explicit, env::var(LOG_ENV_VAR).ok().as_deref())
}

fn level_from(explicit: Option<&str>, from_env: Option<&str>) -> LevelFilter {
    explicit
        .or(from_env)
        .map(parse_level)
        .unwrap_or(LevelFilter::Error)
}

/// Installs the global logger. Logs go to stderr unless `log_file` is set, so
/// stdout stays reserved for the transcript.
///
/// Fails if the file cannot be created or a logger is already installed.
pub fn init(level: LevelFilter, log_file: Option<&Path>) -> io::Result<()> {
    let installed = match log_file {
        Some(path) => WriteLogger::init(level, Config::default(), File::create(path)?),
        None => WriteLogger::init(level, Config::default(), io::stderr()),
    };
    installed.map_err(io::Error::other)
}
