//! # Statement Parser
//!
//! Turns a raw input line into a [`Statement`]. Validation that belongs to
//! the surface lives here: keyword recognition, id sign and range, and
//! string field lengths. The row codec below assumes these checks have
//! already run.

use std::fmt;

use crate::record::{Row, EMAIL_CAPACITY, USERNAME_CAPACITY};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Insert(Row),
    Select,
}

/// Recoverable input errors. The REPL prints the message and keeps going.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrepareError {
    UnrecognizedKeyword(String),
    Syntax,
    StringTooLong,
    NegativeId,
}

impl fmt::Display for PrepareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrepareError::UnrecognizedKeyword(line) => {
                write!(f, "Unrecognized keyword in '{}'.", line)
            }
            PrepareError::Syntax => write!(f, "Syntax error. Could not parse command."),
            PrepareError::StringTooLong => write!(f, "String too long. Could not insert."),
            PrepareError::NegativeId => write!(f, "Negative ID. Could not insert."),
        }
    }
}

impl std::error::Error for PrepareError {}

pub fn parse(line: &str) -> Result<Statement, PrepareError> {
    let mut tokens = line.split_whitespace();

    match tokens.next() {
        Some("SELECT") => Ok(Statement::Select),
        Some("INSERT") => {
            let id_token = tokens.next().ok_or(PrepareError::Syntax)?;
            let username = tokens.next().ok_or(PrepareError::Syntax)?;
            let email = tokens.next().ok_or(PrepareError::Syntax)?;

            // Parsed signed first so "-1" reports a negative id rather
            // than a syntax error.
            let id: i64 = id_token.parse().map_err(|_| PrepareError::Syntax)?;
            if id < 0 {
                return Err(PrepareError::NegativeId);
            }
            let id = u32::try_from(id).map_err(|_| PrepareError::Syntax)?;

            if username.len() > USERNAME_CAPACITY || email.len() > EMAIL_CAPACITY {
                return Err(PrepareError::StringTooLong);
            }

            Ok(Statement::Insert(Row::new(id, username, email)))
        }
        _ => Err(PrepareError::UnrecognizedKeyword(line.trim().to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_select() {
        assert_eq!(parse("SELECT"), Ok(Statement::Select));
    }

    #[test]
    fn parses_insert() {
        let statement = parse("INSERT 1 alice alice@example.com").unwrap();

        assert_eq!(
            statement,
            Statement::Insert(Row::new(1, "alice", "alice@example.com"))
        );
    }

    #[test]
    fn keywords_are_case_sensitive() {
        assert_eq!(
            parse("select"),
            Err(PrepareError::UnrecognizedKeyword("select".to_string()))
        );
    }

    #[test]
    fn insert_with_missing_args_is_syntax_error() {
        assert_eq!(parse("INSERT 1 alice"), Err(PrepareError::Syntax));
    }

    #[test]
    fn insert_with_non_numeric_id_is_syntax_error() {
        assert_eq!(parse("INSERT abc u e"), Err(PrepareError::Syntax));
    }

    #[test]
    fn negative_id_is_reported_before_syntax() {
        assert_eq!(parse("INSERT -1 u e"), Err(PrepareError::NegativeId));
    }

    #[test]
    fn id_beyond_u32_is_syntax_error() {
        assert_eq!(parse("INSERT 4294967296 u e"), Err(PrepareError::Syntax));
    }

    #[test]
    fn oversized_username_is_too_long() {
        let line = format!("INSERT 1 {} e@x", "u".repeat(USERNAME_CAPACITY + 1));

        assert_eq!(parse(&line), Err(PrepareError::StringTooLong));
    }

    #[test]
    fn oversized_email_is_too_long() {
        let line = format!("INSERT 1 u {}", "e".repeat(EMAIL_CAPACITY + 1));

        assert_eq!(parse(&line), Err(PrepareError::StringTooLong));
    }

    #[test]
    fn max_length_fields_are_accepted() {
        let line = format!(
            "INSERT 1 {} {}",
            "u".repeat(USERNAME_CAPACITY),
            "e".repeat(EMAIL_CAPACITY)
        );

        assert!(parse(&line).is_ok());
    }

    #[test]
    fn error_messages_match_repl_output() {
        assert_eq!(
            PrepareError::Syntax.to_string(),
            "Syntax error. Could not parse command."
        );
        assert_eq!(
            PrepareError::StringTooLong.to_string(),
            "String too long. Could not insert."
        );
        assert_eq!(
            PrepareError::NegativeId.to_string(),
            "Negative ID. Could not insert."
        );
    }
}
