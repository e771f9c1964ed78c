//! # Table and Cursor
//!
//! The table owns a [`Pager`] and the root page number, and is the only
//! layer that knows how pages compose into a tree. The tree is currently a
//! single root leaf at page 0: opening an empty file materializes page 0
//! and stamps it as an empty leaf.
//!
//! ## Cursors
//!
//! A [`Cursor`] is a transient logical position into the table:
//!
//! ```text
//! (page_num, cell_num, end_of_table)
//! ```
//!
//! Cursors borrow the table mutably, so the borrow checker enforces the
//! single-mutator rule: no two cursors can exist at once, and a cursor
//! cannot outlive its table. Higher layers read, advance, and insert
//! through cursors without knowing node geometry.
//!
//! ## Lifecycle and Durability
//!
//! `open` → mutate through cursors → `close`. All mutations live in the
//! pager's buffers until `close`, which flushes every resident page in
//! full, syncs the file, and releases everything. A crash before `close`
//! loses all changes since the previous successful close.

use std::path::Path;

use eyre::Result;

use crate::btree::{LeafNode, LeafNodeMut, LEAF_MAX_CELLS};
use crate::record::Row;
use crate::storage::Pager;

pub struct Table {
    pager: Pager,
    root_page_num: u32,
}

/// Outcome of an insert: the single-leaf tree rejects rows once the root
/// is full instead of splitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    TableFull,
}

impl Table {
    /// Opens the database file at `path`, bootstrapping page 0 as an empty
    /// root leaf when the file is new.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut pager = Pager::open(path)?;

        if pager.num_pages() == 0 {
            let page = pager.page_mut(0)?;
            LeafNodeMut::initialize(page.as_mut_slice())?;
        }

        Ok(Self {
            pager,
            root_page_num: 0,
        })
    }

    /// Flushes every resident page, syncs the file, and releases the
    /// table. All mutations since the previous successful close are on
    /// disk exactly when this returns.
    pub fn close(mut self) -> Result<()> {
        self.pager.flush_all()?;
        self.pager.sync()
    }

    pub fn num_pages(&self) -> u32 {
        self.pager.num_pages()
    }

    /// Appends a row keyed by its id, or reports [`InsertOutcome::TableFull`]
    /// when the root leaf already holds [`LEAF_MAX_CELLS`] cells.
    pub fn insert(&mut self, row: &Row) -> Result<InsertOutcome> {
        if self.root_num_cells()? as usize >= LEAF_MAX_CELLS {
            return Ok(InsertOutcome::TableFull);
        }

        let key = row.id;
        let mut cursor = self.end()?;
        cursor.insert(key, row)?;
        Ok(InsertOutcome::Inserted)
    }

    /// Reads every row in cell order.
    pub fn select(&mut self) -> Result<Vec<Row>> {
        let mut rows = Vec::new();
        let mut cursor = self.start()?;
        while !cursor.end_of_table() {
            rows.push(Row::decode(cursor.value()?)?);
            cursor.advance()?;
        }
        Ok(rows)
    }

    /// Cursor at the first cell; already at the end when the table is
    /// empty.
    pub fn start(&mut self) -> Result<Cursor<'_>> {
        let num_cells = self.root_num_cells()?;
        let page_num = self.root_page_num;
        Ok(Cursor {
            table: self,
            page_num,
            cell_num: 0,
            end_of_table: num_cells == 0,
        })
    }

    /// Cursor one past the last cell.
    pub fn end(&mut self) -> Result<Cursor<'_>> {
        let num_cells = self.root_num_cells()?;
        let page_num = self.root_page_num;
        Ok(Cursor {
            table: self,
            page_num,
            cell_num: num_cells,
            end_of_table: true,
        })
    }

    /// Keys of the root leaf in cell order, for tree inspection.
    pub fn root_keys(&mut self) -> Result<Vec<u32>> {
        let page = self.pager.page_mut(self.root_page_num)?;
        let node = LeafNode::from_page(page.as_slice())?;
        (0..node.num_cells() as usize).map(|i| node.key_at(i)).collect()
    }

    fn root_num_cells(&mut self) -> Result<u32> {
        let page = self.pager.page_mut(self.root_page_num)?;
        Ok(LeafNode::from_page(page.as_slice())?.num_cells())
    }
}

pub struct Cursor<'a> {
    table: &'a mut Table,
    page_num: u32,
    cell_num: u32,
    end_of_table: bool,
}

impl<'a> Cursor<'a> {
    /// True once the cursor sits one past the last cell.
    pub fn end_of_table(&self) -> bool {
        self.end_of_table
    }

    /// The value bytes of the current cell.
    pub fn value(&mut self) -> Result<&mut [u8]> {
        let page = self.table.pager.page_mut(self.page_num)?;
        LeafNodeMut::from_page(page.as_mut_slice())?.into_value_at(self.cell_num as usize)
    }

    /// Moves to the next cell, raising `end_of_table` past the last one.
    pub fn advance(&mut self) -> Result<()> {
        self.cell_num += 1;
        let page = self.table.pager.page_mut(self.page_num)?;
        let node = LeafNode::from_page(page.as_slice())?;
        if self.cell_num >= node.num_cells() {
            self.end_of_table = true;
        }
        Ok(())
    }

    /// Writes `key`/`row` into the leaf at the cursor position, shifting
    /// later cells right.
    pub fn insert(&mut self, key: u32, row: &Row) -> Result<()> {
        let page = self.table.pager.page_mut(self.page_num)?;
        let mut node = LeafNodeMut::from_page(page.as_mut_slice())?;
        node.insert_at(self.cell_num as usize, key, row)
    }
}
