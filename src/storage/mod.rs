//! # Storage Module
//!
//! The foundational storage layer: a single backing file divided into
//! fixed-size pages, fronted by a demand-loaded write-back cache.
//!
//! ## Architecture
//!
//! All I/O happens in whole pages of [`PAGE_SIZE`] bytes. The [`Pager`]
//! owns the file handle and a fixed array of page slots; a page is read
//! from disk the first time it is requested and stays resident (and
//! possibly dirty) until the table is closed, at which point every
//! resident page is written back in full.
//!
//! ```text
//! page_mut(n) ──► slot n resident? ──yes──► &mut buffer
//!                      │ no
//!                      ▼
//!            allocate zeroed 4 KiB
//!            n on disk? ──yes──► read page n
//!                      │
//!                      ▼
//!            install buffer, bump num_pages
//! ```
//!
//! There is no eviction: at most [`TABLE_MAX_PAGES`] pages may be resident,
//! and requesting a page number at or beyond that bound is an error. This
//! caps a table at 100 pages.
//!
//! ## Durability
//!
//! Mutations touch only the in-memory buffers. Nothing reaches the file
//! until [`Pager::flush`]/[`Pager::flush_all`] run, so a process that exits
//! without closing its table loses every change since the last successful
//! close. The file size is kept a whole multiple of the page size; a file
//! that fails that check at open time is rejected as corrupt.

mod pager;

pub use pager::Pager;

pub const PAGE_SIZE: usize = 4096;
pub const TABLE_MAX_PAGES: usize = 100;

/// A fixed 4 KiB page buffer.
pub type PageBuf = [u8; PAGE_SIZE];
