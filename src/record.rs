//! # Row Serialization
//!
//! A table row is a fixed-schema record serialized into a fixed-size byte
//! image. All rows occupy exactly [`ROW_SIZE`] bytes on a page, which keeps
//! cell arithmetic trivial in the B-tree layer.
//!
//! ## Row Image Layout (293 bytes)
//!
//! ```text
//! Offset  Size  Field     Description
//! ------  ----  --------  ---------------------------------------
//! 0       4     id        Row id, little-endian u32
//! 4       33    username  Up to 32 bytes, null-terminated
//! 37      256   email     Up to 255 bytes, null-terminated
//! ```
//!
//! String fields reserve one byte for the terminator, so a field of
//! capacity N occupies N+1 bytes. Encoding writes the payload followed by a
//! single zero byte and leaves the remainder of the field untouched, so a
//! round-trip through encode/decode preserves whatever bytes were already
//! in the destination span. Decoding stops at the first zero byte.
//!
//! Length validation belongs to the statement parser; the codec only
//! guards the span boundaries it is handed.

use eyre::{ensure, Result};
use std::fmt;

pub const ID_SIZE: usize = 4;
pub const USERNAME_CAPACITY: usize = 32;
pub const EMAIL_CAPACITY: usize = 255;
pub const USERNAME_FIELD_SIZE: usize = USERNAME_CAPACITY + 1;
pub const EMAIL_FIELD_SIZE: usize = EMAIL_CAPACITY + 1;

pub const ID_OFFSET: usize = 0;
pub const USERNAME_OFFSET: usize = ID_OFFSET + ID_SIZE;
pub const EMAIL_OFFSET: usize = USERNAME_OFFSET + USERNAME_FIELD_SIZE;
pub const ROW_SIZE: usize = ID_SIZE + USERNAME_FIELD_SIZE + EMAIL_FIELD_SIZE;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub id: u32,
    pub username: String,
    pub email: String,
}

impl Row {
    pub fn new(id: u32, username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            email: email.into(),
        }
    }

    /// Serializes the row into the first [`ROW_SIZE`] bytes of `dst`.
    pub fn encode(&self, dst: &mut [u8]) -> Result<()> {
        ensure!(
            dst.len() >= ROW_SIZE,
            "destination too small for row: {} < {}",
            dst.len(),
            ROW_SIZE
        );
        ensure!(
            self.username.len() <= USERNAME_CAPACITY,
            "username exceeds field capacity: {} > {}",
            self.username.len(),
            USERNAME_CAPACITY
        );
        ensure!(
            self.email.len() <= EMAIL_CAPACITY,
            "email exceeds field capacity: {} > {}",
            self.email.len(),
            EMAIL_CAPACITY
        );

        dst[ID_OFFSET..ID_OFFSET + ID_SIZE].copy_from_slice(&self.id.to_le_bytes());
        write_terminated(&mut dst[USERNAME_OFFSET..], self.username.as_bytes());
        write_terminated(&mut dst[EMAIL_OFFSET..], self.email.as_bytes());
        Ok(())
    }

    /// Reconstructs a row from the first [`ROW_SIZE`] bytes of `src`.
    pub fn decode(src: &[u8]) -> Result<Self> {
        ensure!(
            src.len() >= ROW_SIZE,
            "source too small for row: {} < {}",
            src.len(),
            ROW_SIZE
        );

        let id = u32::from_le_bytes(src[ID_OFFSET..ID_OFFSET + ID_SIZE].try_into().unwrap());
        let username =
            read_terminated(&src[USERNAME_OFFSET..USERNAME_OFFSET + USERNAME_FIELD_SIZE]);
        let email = read_terminated(&src[EMAIL_OFFSET..EMAIL_OFFSET + EMAIL_FIELD_SIZE]);

        Ok(Self {
            id,
            username,
            email,
        })
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {}, Username: {}, Email: {}",
            self.id, self.username, self.email
        )
    }
}

fn write_terminated(field: &mut [u8], payload: &[u8]) {
    field[..payload.len()].copy_from_slice(payload);
    field[payload.len()] = 0;
}

fn read_terminated(field: &[u8]) -> String {
    let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
    String::from_utf8_lossy(&field[..end]).into_owned()
}
