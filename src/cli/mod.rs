//! # CLI Module
//!
//! The interactive shell over the storage engine:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                 Entry Point (bin/leafdb.rs)          │
//! ├─────────────────────────────────────────────────────┤
//! │                     REPL Loop                        │
//! │  - Reads input via rustyline (prompt "SQLite > ")    │
//! │  - Dispatches meta-commands vs statements            │
//! │  - Prints rows, "Executed", and input errors         │
//! ├─────────────────────────────────────────────────────┤
//! │     Commands            │          History           │
//! │  (.exit, .btree,        │  Persistent file,          │
//! │   .constants, .help)    │  ~/.leafdb_history         │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! Input errors keep the loop alive; I/O errors propagate out of `run` and
//! terminate the process with exit code 1.

pub mod commands;
pub mod history;
pub mod repl;

pub use commands::{CommandHandler, CommandResult};
pub use repl::Repl;
