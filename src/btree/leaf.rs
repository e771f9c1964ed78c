//! # Leaf Node Views
//!
//! Typed, allocation-free views over a 4 KiB page holding a B-tree leaf.
//!
//! [`LeafHeader`] uses `zerocopy` for safe transmutation from raw page
//! bytes, so header reads and writes go straight through the page buffer
//! without copying. [`LeafNode`] and [`LeafNodeMut`] borrow a page and
//! expose the cell array by index:
//!
//! ```text
//! struct LeafNode<'a>    { data: &'a [u8] }      // read-only view
//! struct LeafNodeMut<'a> { data: &'a mut [u8] }  // mutating view
//! ```
//!
//! Both views validate the page length and node type at construction;
//! the accessors beyond that boundary only bounds-check the cell index.
//!
//! ## Insertion
//!
//! `insert_at` writes a cell at an arbitrary position:
//!
//! ```text
//! 1. Shift cells [index, num_cells) right by one cell width
//! 2. Write the key (LE u32) at the freed slot
//! 3. Encode the row into the slot's value bytes
//! 4. Increment num_cells
//! ```
//!
//! Cells are kept in the order cursors insert them; the table layer always
//! inserts through the end-of-table cursor, so the array is in arrival
//! order. Key-sorted maintenance is deferred until internal nodes exist.

use eyre::{ensure, Result};
use zerocopy::byteorder::little_endian::U32 as U32Le;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use super::{LEAF_CELL_SIZE, LEAF_HEADER_SIZE, LEAF_KEY_SIZE, LEAF_MAX_CELLS};
use crate::record::{Row, ROW_SIZE};
use crate::storage::PAGE_SIZE;

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    Internal = 0,
    Leaf = 1,
}

impl NodeType {
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            0 => Some(NodeType::Internal),
            1 => Some(NodeType::Leaf),
            _ => None,
        }
    }
}

/// On-page leaf header: the 6-byte common node header plus the 4-byte
/// leaf cell count.
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct LeafHeader {
    node_type: u8,
    is_root: u8,
    parent_page: U32Le,
    num_cells: U32Le,
}

impl LeafHeader {
    pub fn new() -> Self {
        Self {
            node_type: NodeType::Leaf as u8,
            is_root: 0,
            parent_page: U32Le::new(0),
            num_cells: U32Le::new(0),
        }
    }

    pub fn from_bytes(data: &[u8]) -> Result<&Self> {
        ensure!(
            data.len() >= size_of::<Self>(),
            "buffer too small for LeafHeader: {} < {}",
            data.len(),
            size_of::<Self>()
        );
        Self::ref_from_bytes(&data[..size_of::<Self>()])
            .map_err(|e| eyre::eyre!("failed to read LeafHeader: {:?}", e))
    }

    pub fn from_bytes_mut(data: &mut [u8]) -> Result<&mut Self> {
        ensure!(
            data.len() >= size_of::<Self>(),
            "buffer too small for LeafHeader: {} < {}",
            data.len(),
            size_of::<Self>()
        );
        Self::mut_from_bytes(&mut data[..size_of::<Self>()])
            .map_err(|e| eyre::eyre!("failed to read LeafHeader: {:?}", e))
    }

    pub fn node_type(&self) -> Option<NodeType> {
        NodeType::from_byte(self.node_type)
    }

    pub fn is_root(&self) -> bool {
        self.is_root != 0
    }

    pub fn set_is_root(&mut self, is_root: bool) {
        self.is_root = is_root as u8;
    }

    pub fn parent_page(&self) -> u32 {
        self.parent_page.get()
    }

    pub fn set_parent_page(&mut self, page_num: u32) {
        self.parent_page.set(page_num);
    }

    pub fn num_cells(&self) -> u32 {
        self.num_cells.get()
    }

    pub fn set_num_cells(&mut self, count: u32) {
        self.num_cells.set(count);
    }
}

impl Default for LeafHeader {
    fn default() -> Self {
        Self::new()
    }
}

fn cell_offset(index: usize) -> usize {
    LEAF_HEADER_SIZE + index * LEAF_CELL_SIZE
}

fn validate_leaf(data: &[u8]) -> Result<()> {
    ensure!(
        data.len() == PAGE_SIZE,
        "invalid page size: {} != {}",
        data.len(),
        PAGE_SIZE
    );
    let header = LeafHeader::from_bytes(data)?;
    ensure!(
        header.node_type() == Some(NodeType::Leaf),
        "expected leaf node, got type byte {:#04x}",
        data[0]
    );
    ensure!(
        header.num_cells() as usize <= LEAF_MAX_CELLS,
        "leaf cell count {} exceeds maximum {}",
        header.num_cells(),
        LEAF_MAX_CELLS
    );
    Ok(())
}

#[derive(Debug)]
pub struct LeafNode<'a> {
    data: &'a [u8],
}

impl<'a> LeafNode<'a> {
    pub fn from_page(data: &'a [u8]) -> Result<Self> {
        validate_leaf(data)?;
        Ok(Self { data })
    }

    pub fn num_cells(&self) -> u32 {
        LeafHeader::from_bytes(self.data).unwrap().num_cells()
    }

    pub fn is_root(&self) -> bool {
        LeafHeader::from_bytes(self.data).unwrap().is_root()
    }

    pub fn parent_page(&self) -> u32 {
        LeafHeader::from_bytes(self.data).unwrap().parent_page()
    }

    pub fn key_at(&self, index: usize) -> Result<u32> {
        ensure!(
            index < self.num_cells() as usize,
            "cell index {} out of bounds (num_cells={})",
            index,
            self.num_cells()
        );
        let offset = cell_offset(index);
        Ok(u32::from_le_bytes(
            self.data[offset..offset + LEAF_KEY_SIZE].try_into().unwrap(),
        ))
    }

    pub fn value_at(&self, index: usize) -> Result<&'a [u8]> {
        ensure!(
            index < self.num_cells() as usize,
            "cell index {} out of bounds (num_cells={})",
            index,
            self.num_cells()
        );
        let offset = cell_offset(index) + LEAF_KEY_SIZE;
        Ok(&self.data[offset..offset + ROW_SIZE])
    }
}

pub struct LeafNodeMut<'a> {
    data: &'a mut [u8],
}

impl<'a> LeafNodeMut<'a> {
    /// Stamps a fresh leaf header onto `data` and returns the mutating
    /// view. `is_root` and `parent_page` are left zero, the valid defaults
    /// while the tree is a single root leaf.
    pub fn initialize(data: &'a mut [u8]) -> Result<Self> {
        ensure!(
            data.len() == PAGE_SIZE,
            "invalid page size: {} != {}",
            data.len(),
            PAGE_SIZE
        );
        data[..size_of::<LeafHeader>()].copy_from_slice(LeafHeader::new().as_bytes());
        Ok(Self { data })
    }

    pub fn from_page(data: &'a mut [u8]) -> Result<Self> {
        validate_leaf(data)?;
        Ok(Self { data })
    }

    pub fn num_cells(&self) -> u32 {
        LeafHeader::from_bytes(self.data).unwrap().num_cells()
    }

    pub fn key_at(&self, index: usize) -> Result<u32> {
        ensure!(
            index < self.num_cells() as usize,
            "cell index {} out of bounds (num_cells={})",
            index,
            self.num_cells()
        );
        let offset = cell_offset(index);
        Ok(u32::from_le_bytes(
            self.data[offset..offset + LEAF_KEY_SIZE].try_into().unwrap(),
        ))
    }

    /// Consumes the view, returning the value bytes of cell `index` with
    /// the lifetime of the underlying page.
    pub fn into_value_at(self, index: usize) -> Result<&'a mut [u8]> {
        ensure!(
            index < self.num_cells() as usize,
            "cell index {} out of bounds (num_cells={})",
            index,
            self.num_cells()
        );
        let offset = cell_offset(index) + LEAF_KEY_SIZE;
        let data = self.data;
        Ok(&mut data[offset..offset + ROW_SIZE])
    }

    /// Inserts `key`/`row` as the cell at `index`, shifting the cells at
    /// and after `index` right by one.
    ///
    /// The table layer checks capacity before positioning a cursor, so a
    /// full leaf here is an invariant violation rather than user error.
    pub fn insert_at(&mut self, index: usize, key: u32, row: &Row) -> Result<()> {
        let num_cells = self.num_cells() as usize;
        ensure!(
            num_cells < LEAF_MAX_CELLS,
            "leaf node full: {} cells",
            num_cells
        );
        ensure!(
            index <= num_cells,
            "cell index {} out of bounds for insert (num_cells={})",
            index,
            num_cells
        );

        let start = cell_offset(index);
        if index < num_cells {
            let end = cell_offset(num_cells);
            self.data.copy_within(start..end, start + LEAF_CELL_SIZE);
        }

        self.data[start..start + LEAF_KEY_SIZE].copy_from_slice(&key.to_le_bytes());
        row.encode(&mut self.data[start + LEAF_KEY_SIZE..start + LEAF_CELL_SIZE])?;

        LeafHeader::from_bytes_mut(self.data)
            .unwrap()
            .set_num_cells(num_cells as u32 + 1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::btree::LEAF_CELL_SPACE;

    fn leaf_page() -> Vec<u8> {
        let mut page = vec![0u8; PAGE_SIZE];
        LeafNodeMut::initialize(&mut page).unwrap();
        page
    }

    #[test]
    fn header_is_10_bytes() {
        assert_eq!(size_of::<LeafHeader>(), 10);
    }

    #[test]
    fn layout_constants() {
        assert_eq!(LEAF_CELL_SIZE, 297);
        assert_eq!(LEAF_CELL_SPACE, 4086);
        assert_eq!(LEAF_MAX_CELLS, 13);
    }

    #[test]
    fn header_field_offsets() {
        let mut page = leaf_page();
        let header = LeafHeader::from_bytes_mut(&mut page).unwrap();
        header.set_is_root(true);
        header.set_parent_page(0x0A0B0C0D);
        header.set_num_cells(5);

        assert_eq!(page[0], 1);
        assert_eq!(page[1], 1);
        assert_eq!(&page[2..6], &[0x0D, 0x0C, 0x0B, 0x0A]);
        assert_eq!(&page[6..10], &[5, 0, 0, 0]);
    }

    #[test]
    fn initialize_produces_empty_leaf() {
        let page = leaf_page();

        let node = LeafNode::from_page(&page).unwrap();

        assert_eq!(node.num_cells(), 0);
        assert!(!node.is_root());
        assert_eq!(node.parent_page(), 0);
    }

    #[test]
    fn from_page_rejects_wrong_size() {
        let page = vec![0u8; PAGE_SIZE - 1];

        assert!(LeafNode::from_page(&page).is_err());
    }

    #[test]
    fn from_page_rejects_internal_node() {
        let mut page = leaf_page();
        page[0] = NodeType::Internal as u8;

        let result = LeafNode::from_page(&page);

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("expected leaf"));
    }

    #[test]
    fn from_page_rejects_corrupt_cell_count() {
        let mut page = leaf_page();
        LeafHeader::from_bytes_mut(&mut page)
            .unwrap()
            .set_num_cells(LEAF_MAX_CELLS as u32 + 1);

        assert!(LeafNode::from_page(&page).is_err());
    }

    #[test]
    fn insert_at_end_appends() {
        let mut page = leaf_page();
        let mut node = LeafNodeMut::from_page(&mut page).unwrap();

        node.insert_at(0, 10, &Row::new(10, "a", "a@x")).unwrap();
        node.insert_at(1, 20, &Row::new(20, "b", "b@x")).unwrap();

        assert_eq!(node.num_cells(), 2);
        assert_eq!(node.key_at(0).unwrap(), 10);
        assert_eq!(node.key_at(1).unwrap(), 20);
    }

    #[test]
    fn insert_at_front_shifts_cells_right() {
        let mut page = leaf_page();
        let mut node = LeafNodeMut::from_page(&mut page).unwrap();
        node.insert_at(0, 2, &Row::new(2, "b", "b@x")).unwrap();
        node.insert_at(0, 1, &Row::new(1, "a", "a@x")).unwrap();

        assert_eq!(node.key_at(0).unwrap(), 1);
        assert_eq!(node.key_at(1).unwrap(), 2);

        let view = LeafNode::from_page(&page).unwrap();
        let shifted = Row::decode(view.value_at(1).unwrap()).unwrap();
        assert_eq!(shifted, Row::new(2, "b", "b@x"));
    }

    #[test]
    fn insert_rejects_full_leaf() {
        let mut page = leaf_page();
        let mut node = LeafNodeMut::from_page(&mut page).unwrap();
        for i in 0..LEAF_MAX_CELLS {
            node.insert_at(i, i as u32, &Row::new(i as u32, "u", "e"))
                .unwrap();
        }

        let result = node.insert_at(LEAF_MAX_CELLS, 99, &Row::new(99, "u", "e"));

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("leaf node full"));
    }

    #[test]
    fn insert_rejects_gap_index() {
        let mut page = leaf_page();
        let mut node = LeafNodeMut::from_page(&mut page).unwrap();

        assert!(node.insert_at(1, 1, &Row::new(1, "u", "e")).is_err());
    }

    #[test]
    fn value_round_trips_through_cell() {
        let mut page = leaf_page();
        let row = Row::new(7, "carol", "carol@example.com");
        LeafNodeMut::from_page(&mut page)
            .unwrap()
            .insert_at(0, 7, &row)
            .unwrap();

        let node = LeafNode::from_page(&page).unwrap();
        let decoded = Row::decode(node.value_at(0).unwrap()).unwrap();

        assert_eq!(decoded, row);
    }

    #[test]
    fn into_value_at_allows_in_place_write() {
        let mut page = leaf_page();
        LeafNodeMut::from_page(&mut page)
            .unwrap()
            .insert_at(0, 1, &Row::new(1, "old", "old@x"))
            .unwrap();

        let node = LeafNodeMut::from_page(&mut page).unwrap();
        let value = node.into_value_at(0).unwrap();
        Row::new(1, "new", "new@x").encode(value).unwrap();

        let view = LeafNode::from_page(&page).unwrap();
        let decoded = Row::decode(view.value_at(0).unwrap()).unwrap();
        assert_eq!(decoded.username, "new");
    }
}
