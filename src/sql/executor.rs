//! # Statement Executor
//!
//! Routes parsed statements to table operations. Outcomes the user must
//! see (rows, a full table) come back as [`ExecuteResult`] variants; only
//! real failures (I/O, corrupt pages) propagate as errors.

use eyre::Result;

use crate::record::Row;
use crate::sql::Statement;
use crate::table::{InsertOutcome, Table};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecuteResult {
    Inserted,
    Rows(Vec<Row>),
    TableFull,
}

pub fn execute(statement: Statement, table: &mut Table) -> Result<ExecuteResult> {
    match statement {
        Statement::Insert(row) => match table.insert(&row)? {
            InsertOutcome::Inserted => Ok(ExecuteResult::Inserted),
            InsertOutcome::TableFull => Ok(ExecuteResult::TableFull),
        },
        Statement::Select => Ok(ExecuteResult::Rows(table.select()?)),
    }
}
