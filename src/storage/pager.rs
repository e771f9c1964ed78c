//! # Pager
//!
//! Demand-loaded write-back page cache over a single database file.
//!
//! The pager translates logical page numbers into in-memory 4 KiB buffers.
//! A cache miss allocates a zeroed buffer and, when the page exists on
//! disk, fills it with one full-page read. Writes never happen implicitly:
//! callers mutate resident buffers and the table flushes them in bulk when
//! it closes. Every read and write transfers exactly [`PAGE_SIZE`] bytes at
//! offset `page_num * PAGE_SIZE`, so the file is always a whole number of
//! pages after a clean close.
//!
//! ## Error Handling
//!
//! All fallible operations return `eyre::Result` with the file path and
//! page number in context. I/O failures are not recoverable at this layer;
//! the caller decides whether to abort or surface them.

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use eyre::{ensure, Result, WrapErr};

use super::{PageBuf, PAGE_SIZE, TABLE_MAX_PAGES};

#[derive(Debug)]
pub struct Pager {
    file: File,
    path: PathBuf,
    file_size: u64,
    num_pages: u32,
    pages: [Option<Box<PageBuf>>; TABLE_MAX_PAGES],
}

impl Pager {
    /// Opens the database file, creating it (mode 0600) if absent.
    ///
    /// A non-empty file whose size is not a whole multiple of the page
    /// size is rejected as corrupt.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let mut options = OpenOptions::new();
        options.read(true).write(true).create(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let file = options
            .open(path)
            .wrap_err_with(|| format!("failed to open database file '{}'", path.display()))?;

        let metadata = file
            .metadata()
            .wrap_err_with(|| format!("failed to get metadata for '{}'", path.display()))?;
        let file_size = metadata.len();

        ensure!(
            file_size % PAGE_SIZE as u64 == 0,
            "database file '{}' size {} is not a multiple of page size {}; file is corrupt",
            path.display(),
            file_size,
            PAGE_SIZE
        );

        Ok(Self {
            file,
            path: path.to_path_buf(),
            file_size,
            num_pages: (file_size / PAGE_SIZE as u64) as u32,
            pages: std::array::from_fn(|_| None),
        })
    }

    /// Number of logical pages currently known to the table. Grows when a
    /// page beyond the end of the file is materialized.
    pub fn num_pages(&self) -> u32 {
        self.num_pages
    }

    /// Returns the resident buffer for `page_num`, loading it from disk on
    /// a cache miss.
    pub fn page_mut(&mut self, page_num: u32) -> Result<&mut PageBuf> {
        ensure!(
            (page_num as usize) < TABLE_MAX_PAGES,
            "page number {} out of bounds (max {})",
            page_num,
            TABLE_MAX_PAGES
        );

        if self.pages[page_num as usize].is_none() {
            let mut buf: Box<PageBuf> = Box::new([0u8; PAGE_SIZE]);

            // Pages below the on-disk count are loaded in full; the
            // whole-page file invariant rules out short reads.
            let pages_on_disk = (self.file_size / PAGE_SIZE as u64) as u32;
            if page_num < pages_on_disk {
                self.file
                    .seek(SeekFrom::Start(page_num as u64 * PAGE_SIZE as u64))
                    .wrap_err_with(|| {
                        format!(
                            "failed to seek to page {} in '{}'",
                            page_num,
                            self.path.display()
                        )
                    })?;
                self.file.read_exact(buf.as_mut_slice()).wrap_err_with(|| {
                    format!(
                        "failed to read page {} from '{}'",
                        page_num,
                        self.path.display()
                    )
                })?;
            }

            self.pages[page_num as usize] = Some(buf);
            if page_num >= self.num_pages {
                self.num_pages = page_num + 1;
            }
        }

        Ok(self.pages[page_num as usize].as_mut().unwrap())
    }

    /// Writes the resident buffer for `page_num` back to disk in full.
    ///
    /// Flushing a page that was never materialized is a programmer error.
    pub fn flush(&mut self, page_num: u32) -> Result<()> {
        ensure!(
            (page_num as usize) < TABLE_MAX_PAGES,
            "page number {} out of bounds (max {})",
            page_num,
            TABLE_MAX_PAGES
        );

        let buf = self.pages[page_num as usize]
            .as_ref()
            .ok_or_else(|| eyre::eyre!("tried to flush unallocated page {}", page_num))?;

        self.file
            .seek(SeekFrom::Start(page_num as u64 * PAGE_SIZE as u64))
            .wrap_err_with(|| {
                format!(
                    "failed to seek to page {} in '{}'",
                    page_num,
                    self.path.display()
                )
            })?;
        self.file.write_all(buf.as_slice()).wrap_err_with(|| {
            format!(
                "failed to write page {} to '{}'",
                page_num,
                self.path.display()
            )
        })?;

        if (page_num + 1) as u64 * PAGE_SIZE as u64 > self.file_size {
            self.file_size = (page_num + 1) as u64 * PAGE_SIZE as u64;
        }
        Ok(())
    }

    /// Flushes every resident page in `[0, num_pages)` and releases its
    /// buffer.
    pub fn flush_all(&mut self) -> Result<()> {
        for page_num in 0..self.num_pages {
            if self.pages[page_num as usize].is_some() {
                self.flush(page_num)?;
                self.pages[page_num as usize] = None;
            }
        }
        Ok(())
    }

    /// Forces flushed pages to stable storage.
    pub fn sync(&self) -> Result<()> {
        self.file
            .sync_all()
            .wrap_err_with(|| format!("failed to sync '{}'", self.path.display()))
    }
}
