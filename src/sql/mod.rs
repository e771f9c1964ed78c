//! # Statement Module
//!
//! The SQL-ish surface of the store: a parser that turns one input line
//! into a [`Statement`], and an executor that dispatches statements to the
//! table. Only two statements exist:
//!
//! ```text
//! INSERT <id> <username> <email>
//! SELECT
//! ```
//!
//! Keywords are case-sensitive uppercase. Parse failures are typed
//! [`PrepareError`] values whose `Display` text is exactly what the REPL
//! shows the user; they never abort the process.

pub mod executor;
pub mod parser;

pub use executor::{execute, ExecuteResult};
pub use parser::{parse, PrepareError, Statement};
