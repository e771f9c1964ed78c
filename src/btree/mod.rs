//! # B-Tree Module
//!
//! Pages interpreted as B-tree nodes. The tree currently consists of a
//! single leaf node at page 0; the node header nevertheless carries a
//! `node_type` discriminant and a `parent_page` pointer so internal nodes
//! remain representable in the on-disk format when splits arrive.
//!
//! ## Node Layout
//!
//! Every node begins with a 6-byte common header, and a leaf extends it to
//! 10 bytes:
//!
//! ```text
//! Offset  Size  Field        Description
//! ------  ----  -----------  ------------------------------------
//! 0       1     node_type    0 = internal, 1 = leaf
//! 1       1     is_root      Boolean
//! 2       4     parent_page  Parent page number (LE u32)
//! 6       4     num_cells    Number of cells in a leaf (LE u32)
//! 10      ...   cell array   num_cells cells of LEAF_CELL_SIZE
//! ```
//!
//! Each cell is a 4-byte little-endian key followed by a serialized row,
//! giving `LEAF_CELL_SIZE = 297` and `LEAF_MAX_CELLS = 13` per 4 KiB page.
//! Bytes past the cell array are unused but preserved, since pages are
//! always read and written in full.

mod leaf;

pub use leaf::{LeafHeader, LeafNode, LeafNodeMut, NodeType};

use crate::record::ROW_SIZE;
use crate::storage::PAGE_SIZE;

pub const NODE_HEADER_SIZE: usize = 6;
pub const LEAF_HEADER_SIZE: usize = 10;
pub const LEAF_KEY_SIZE: usize = 4;
pub const LEAF_CELL_SIZE: usize = LEAF_KEY_SIZE + ROW_SIZE;
pub const LEAF_CELL_SPACE: usize = PAGE_SIZE - LEAF_HEADER_SIZE;
pub const LEAF_MAX_CELLS: usize = LEAF_CELL_SPACE / LEAF_CELL_SIZE;
