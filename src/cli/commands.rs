//! # Meta-Command Handler
//!
//! Parses and executes dot commands for database inspection and REPL
//! control. Meta-commands start with a period and bypass the statement
//! parser.
//!
//! | Command      | Description                          |
//! |--------------|--------------------------------------|
//! | `.exit`      | Close the database and leave         |
//! | `.btree`     | Dump the keys of the root leaf       |
//! | `.constants` | Dump the on-page layout constants    |
//! | `.help`      | Show available commands              |
//!
//! Commands are matched exactly. Each returns a [`CommandResult`]: text to
//! print, a signal to exit, or an error message for an unrecognized
//! command.

use crate::btree::{
    LEAF_CELL_SIZE, LEAF_CELL_SPACE, LEAF_HEADER_SIZE, LEAF_KEY_SIZE, LEAF_MAX_CELLS,
    NODE_HEADER_SIZE,
};
use crate::record::ROW_SIZE;
use crate::table::Table;

#[derive(Debug, PartialEq, Eq)]
pub enum CommandResult {
    Output(String),
    Exit,
    Error(String),
}

pub struct CommandHandler;

impl CommandHandler {
    pub fn is_command(input: &str) -> bool {
        input.trim().starts_with('.')
    }

    pub fn execute(input: &str, table: &mut Table) -> CommandResult {
        match input.trim() {
            ".exit" => CommandResult::Exit,
            ".btree" => show_btree(table),
            ".constants" => CommandResult::Output(constants_text()),
            ".help" => CommandResult::Output(help_text()),
            other => CommandResult::Error(format!("Unrecognized command '{}'.", other)),
        }
    }
}

fn show_btree(table: &mut Table) -> CommandResult {
    let keys = match table.root_keys() {
        Ok(keys) => keys,
        Err(e) => return CommandResult::Error(e.to_string()),
    };

    let mut out = String::from("Tree:\n");
    out.push_str(&format!("leaf (size {})", keys.len()));
    for (i, key) in keys.iter().enumerate() {
        out.push_str(&format!("\n  - {} : {}", i, key));
    }
    CommandResult::Output(out)
}

fn constants_text() -> String {
    format!(
        "Constants:\n\
         ROW_SIZE: {}\n\
         NODE_HEADER_SIZE: {}\n\
         LEAF_HEADER_SIZE: {}\n\
         LEAF_KEY_SIZE: {}\n\
         LEAF_CELL_SIZE: {}\n\
         LEAF_CELL_SPACE: {}\n\
         LEAF_MAX_CELLS: {}",
        ROW_SIZE,
        NODE_HEADER_SIZE,
        LEAF_HEADER_SIZE,
        LEAF_KEY_SIZE,
        LEAF_CELL_SIZE,
        LEAF_CELL_SPACE,
        LEAF_MAX_CELLS
    )
}

fn help_text() -> String {
    "Meta-commands:\n\
     \x20 .exit       Close the database and leave\n\
     \x20 .btree      Dump the keys of the root leaf\n\
     \x20 .constants  Dump the on-page layout constants\n\
     \x20 .help       Show this message\n\
     \n\
     Statements:\n\
     \x20 INSERT <id> <username> <email>\n\
     \x20 SELECT"
        .to_string()
}
