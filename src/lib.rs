//! # LeafDB - Single-File Embedded Row Store
//!
//! LeafDB persists rows of a fixed schema into a single file of 4 KiB
//! pages arranged as a B-tree, accessed through a line-oriented REPL. The
//! tree is currently a single root leaf; the on-disk format reserves the
//! fields (node type, parent pointer) that internal nodes and splits will
//! need.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │        CLI / REPL (rustyline)        │
//! ├─────────────────────────────────────┤
//! │    Statements (parser / executor)    │
//! ├─────────────────────────────────────┤
//! │         Table + Cursor               │
//! ├─────────────────────────────────────┤
//! │       B-Tree Leaf Node Views         │
//! ├─────────────────────────────────────┤
//! │     Row Serialization (293 B)        │
//! ├─────────────────────────────────────┤
//! │   Pager (write-back 4 KiB cache)     │
//! └─────────────────────────────────────┘
//! ```
//!
//! ## File Format
//!
//! A database is a sequence of 4096-byte pages; page 0 is the root leaf.
//! Every leaf page carries a 10-byte header (node type, root flag, parent
//! page, cell count) followed by up to 13 fixed-size cells of
//! `key || row`. Multi-byte integers are little-endian, so files are
//! portable across hosts.
//!
//! ## Durability
//!
//! Mutations stay in the pager's resident buffers until the table closes,
//! which writes every resident page back in full and syncs. A crash before
//! close loses the session's changes; a clean close makes them all
//! visible to the next open.
//!
//! ## Module Overview
//!
//! - [`storage`]: pager and page cache over the backing file
//! - [`btree`]: leaf node layout and typed page views
//! - [`record`]: fixed-offset row serialization
//! - [`table`]: table lifecycle and cursors
//! - [`sql`]: statement parsing and execution
//! - [`cli`]: REPL, meta-commands, history

pub mod btree;
pub mod cli;
pub mod record;
pub mod sql;
pub mod storage;
pub mod table;

pub use record::Row;
pub use table::{Cursor, InsertOutcome, Table};
