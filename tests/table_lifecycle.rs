//! # Table Lifecycle Tests
//!
//! End-to-end coverage of the storage engine through the library API:
//! insert/select visibility, durability across close and reopen, capacity
//! limits, and the on-disk page format.

use leafdb::btree::LEAF_MAX_CELLS;
use leafdb::storage::PAGE_SIZE;
use leafdb::{InsertOutcome, Row, Table};
use tempfile::tempdir;

#[test]
fn inserted_rows_are_visible_to_select() {
    let dir = tempdir().unwrap();
    let mut table = Table::open(dir.path().join("test.db")).unwrap();

    for id in 1..=5u32 {
        let row = Row::new(id, format!("user{}", id), format!("user{}@example.com", id));
        assert_eq!(table.insert(&row).unwrap(), InsertOutcome::Inserted);
    }

    let rows = table.select().unwrap();
    assert_eq!(rows.len(), 5);
    assert!(rows.contains(&Row::new(3, "user3", "user3@example.com")));
}

#[test]
fn rows_survive_close_and_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.db");

    let mut table = Table::open(&path).unwrap();
    table.insert(&Row::new(7, "bob", "b@x")).unwrap();
    table.close().unwrap();

    let mut reopened = Table::open(&path).unwrap();
    assert_eq!(reopened.select().unwrap(), vec![Row::new(7, "bob", "b@x")]);
}

#[test]
fn reopen_accumulates_rows_across_sessions() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.db");

    for id in 1..=3u32 {
        let mut table = Table::open(&path).unwrap();
        table.insert(&Row::new(id, "u", "e")).unwrap();
        table.close().unwrap();
    }

    let mut table = Table::open(&path).unwrap();
    let ids: Vec<u32> = table.select().unwrap().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[test]
fn select_on_fresh_database_is_empty() {
    let dir = tempdir().unwrap();
    let mut table = Table::open(dir.path().join("test.db")).unwrap();

    assert!(table.select().unwrap().is_empty());
    assert!(table.root_keys().unwrap().is_empty());
}

#[test]
fn table_full_after_thirteen_rows() {
    let dir = tempdir().unwrap();
    let mut table = Table::open(dir.path().join("test.db")).unwrap();

    for id in 0..LEAF_MAX_CELLS as u32 {
        assert_eq!(
            table.insert(&Row::new(id, "u", "e")).unwrap(),
            InsertOutcome::Inserted
        );
    }

    assert_eq!(
        table.insert(&Row::new(99, "u", "e")).unwrap(),
        InsertOutcome::TableFull
    );
    assert_eq!(table.root_keys().unwrap().len(), LEAF_MAX_CELLS);
}

#[test]
fn closed_file_is_a_whole_number_of_pages() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.db");

    let mut table = Table::open(&path).unwrap();
    table.insert(&Row::new(1, "u", "e")).unwrap();
    let num_pages = table.num_pages() as u64;
    table.close().unwrap();

    assert_eq!(
        std::fs::metadata(&path).unwrap().len(),
        num_pages * PAGE_SIZE as u64
    );
}

#[test]
fn misaligned_file_is_rejected_as_corrupt() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.db");
    std::fs::write(&path, vec![0u8; 1000]).unwrap();

    let result = Table::open(&path);

    assert!(result.is_err());
}

#[test]
fn on_disk_leaf_layout_matches_format() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.db");

    let mut table = Table::open(&path).unwrap();
    table
        .insert(&Row::new(0x11223344, "alice", "alice@example.com"))
        .unwrap();
    table.close().unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(bytes.len(), PAGE_SIZE);

    // Header: leaf node type, cell count 1 (LE u32 at offset 6).
    assert_eq!(bytes[0], 1);
    assert_eq!(&bytes[6..10], &[1, 0, 0, 0]);

    // First cell at offset 10: key, then the row image (id at +4,
    // username at +8, email at +41).
    assert_eq!(&bytes[10..14], &[0x44, 0x33, 0x22, 0x11]);
    assert_eq!(&bytes[14..18], &[0x44, 0x33, 0x22, 0x11]);
    assert_eq!(&bytes[18..24], b"alice\0");
    assert_eq!(&bytes[51..69], b"alice@example.com\0");
}
