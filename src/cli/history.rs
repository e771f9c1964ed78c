//! # History File Management
//!
//! Resolves the location of the REPL history file. By default history is
//! stored in `~/.leafdb_history`; the `LEAFDB_HISTORY` environment
//! variable overrides the path, and an empty value disables persistence.
//! rustyline handles the actual file I/O.

use std::env;
use std::path::PathBuf;

const HISTORY_ENV_VAR: &str = "LEAFDB_HISTORY";
const DEFAULT_HISTORY_FILE: &str = ".leafdb_history";

/// The history file to use for this session, or `None` when persistence
/// is disabled. The override is taken as-is even when it is not valid
/// UTF-8; only the `HOME` fallback requires the variable to exist.
pub fn history_path() -> Option<PathBuf> {
    match env::var_os(HISTORY_ENV_VAR) {
        Some(value) if value.is_empty() => None,
        Some(value) => Some(PathBuf::from(value)),
        None => {
            let mut path = PathBuf::from(env::var_os("HOME")?);
            path.push(DEFAULT_HISTORY_FILE);
            Some(path)
        }
    }
}
