//! # REPL - Read-Eval-Print Loop
//!
//! The main interactive loop. Each line is either a meta-command
//! (starts with `.`) or a statement handed to the parser and executor.
//!
//! Input errors print their message and the loop continues; storage
//! errors propagate out of [`Repl::run`] and the binary turns them into a
//! fatal exit. Leaving the loop through `.exit`, EOF, or a read failure
//! always closes the table, so every mutation made during the session is
//! flushed before the process ends.

use eyre::{Result, WrapErr};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::cli::commands::{CommandHandler, CommandResult};
use crate::cli::history::history_path;
use crate::sql::{execute, parse, ExecuteResult};
use crate::table::Table;

const PROMPT: &str = "SQLite > ";

pub struct Repl {
    table: Table,
    editor: DefaultEditor,
}

impl Repl {
    pub fn new(table: Table) -> Result<Self> {
        let mut editor = DefaultEditor::new().wrap_err("failed to initialize line editor")?;

        if let Some(history_file) = history_path() {
            let _ = editor.load_history(&history_file);
        }

        Ok(Self { table, editor })
    }

    /// Runs until `.exit` or EOF, then closes the table.
    pub fn run(mut self) -> Result<()> {
        loop {
            match self.editor.readline(PROMPT) {
                Ok(line) => {
                    if !self.handle_line(&line)? {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                }
                Err(ReadlineError::Eof) => {
                    println!();
                    break;
                }
                Err(err) => {
                    eprintln!("Error reading input: {}", err);
                    break;
                }
            }
        }

        self.save_history();
        println!("Goodbye!");
        self.table.close()
    }

    fn handle_line(&mut self, line: &str) -> Result<bool> {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            return Ok(true);
        }

        self.editor.add_history_entry(trimmed).ok();

        if CommandHandler::is_command(trimmed) {
            return Ok(self.execute_command(trimmed));
        }

        match parse(trimmed) {
            Ok(statement) => match execute(statement, &mut self.table)? {
                ExecuteResult::Inserted => println!("Executed"),
                ExecuteResult::TableFull => println!("Error: Table full."),
                ExecuteResult::Rows(rows) => {
                    for row in &rows {
                        println!("{}", row);
                    }
                    println!("Executed");
                }
            },
            Err(e) => println!("{}", e),
        }

        Ok(true)
    }

    fn execute_command(&mut self, input: &str) -> bool {
        match CommandHandler::execute(input, &mut self.table) {
            CommandResult::Exit => false,
            CommandResult::Output(text) => {
                println!("{}", text);
                true
            }
            CommandResult::Error(msg) => {
                println!("{}", msg);
                true
            }
        }
    }

    fn save_history(&mut self) {
        if let Some(history_file) = history_path() {
            if let Err(e) = self.editor.save_history(&history_file) {
                eprintln!("Warning: could not save history: {}", e);
            }
        }
    }
}
