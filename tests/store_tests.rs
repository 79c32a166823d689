//! Tests for the record store
//!
//! These tests verify:
//! - Append-only create and list
//! - First-match search by id and by name
//! - All-matches update and delete semantics
//! - Bad-slot handling: skip on read, abort on mutation
//! - Report rendering
//! - The full CRUD lifecycle

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use stockpile::record::{encode_record, Record, RECORD_SIZE};
use stockpile::{RecordPatch, RecordStore, SearchKey, StoreError};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_temp_store() -> (TempDir, PathBuf, RecordStore) {
    let temp_dir = TempDir::new().unwrap();
    let data_path = temp_dir.path().join("data.bin");
    let store = RecordStore::open_path(&data_path).unwrap();
    (temp_dir, data_path, store)
}

fn sample_record(id: i32) -> Record {
    Record::new(id, format!("item{}", id), "part", id * 10, "Acme")
}

fn append_raw(path: &PathBuf, bytes: &[u8]) {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .unwrap();
    file.write_all(bytes).unwrap();
}

fn corrupt_slot() -> [u8; RECORD_SIZE] {
    let mut slot = encode_record(&sample_record(999));
    slot[4] = 0xFF;
    slot
}

// =============================================================================
// Open Tests
// =============================================================================

#[test]
fn test_open_rejects_directory_path() {
    let temp_dir = TempDir::new().unwrap();

    let err = RecordStore::open_path(temp_dir.path()).unwrap_err();
    assert!(matches!(err, StoreError::Config(_)));
}

#[test]
fn test_open_does_not_create_the_file() {
    let (_temp, path, _store) = setup_temp_store();

    assert!(!path.exists());
}

// =============================================================================
// Create / List Tests
// =============================================================================

#[test]
fn test_add_creates_file_and_appends() {
    let (_temp, path, store) = setup_temp_store();

    store.add_record(&sample_record(1)).unwrap();
    store.add_record(&sample_record(2)).unwrap();

    assert_eq!(fs::metadata(&path).unwrap().len(), 2 * RECORD_SIZE as u64);
    assert_eq!(store.list_records().unwrap().len(), 2);
}

#[test]
fn test_add_never_touches_existing_slots() {
    let (_temp, path, store) = setup_temp_store();

    store.add_record(&sample_record(1)).unwrap();
    let before = fs::read(&path).unwrap();

    store.add_record(&sample_record(2)).unwrap();
    let after = fs::read(&path).unwrap();

    assert_eq!(&after[..RECORD_SIZE], &before[..]);
}

#[test]
fn test_duplicate_ids_are_accepted() {
    let (_temp, _path, store) = setup_temp_store();

    store.add_record(&sample_record(7)).unwrap();
    store.add_record(&sample_record(7)).unwrap();

    assert_eq!(store.list_records().unwrap().len(), 2);
}

#[test]
fn test_list_on_missing_file_is_empty() {
    let (_temp, _path, store) = setup_temp_store();

    assert!(store.list_records().unwrap().is_empty());
}

#[test]
fn test_list_skips_undecodable_slots() {
    let (_temp, path, store) = setup_temp_store();

    store.add_record(&sample_record(1)).unwrap();
    append_raw(&path, &corrupt_slot());
    store.add_record(&sample_record(3)).unwrap();

    let ids: Vec<i32> = store.list_records().unwrap().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 3]);
}

#[test]
fn test_list_tolerates_short_trailing_chunk() {
    let (_temp, path, store) = setup_temp_store();

    store.add_record(&sample_record(1)).unwrap();
    append_raw(&path, &[0xAB; 5]);

    let ids: Vec<i32> = store.list_records().unwrap().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1]);
}

// =============================================================================
// Search Tests
// =============================================================================

#[test]
fn test_search_by_id() {
    let (_temp, _path, store) = setup_temp_store();
    store.add_record(&sample_record(1)).unwrap();
    store.add_record(&sample_record(2)).unwrap();

    let found = store.search(&SearchKey::ById(2)).unwrap().unwrap();
    assert_eq!(found, sample_record(2));
}

#[test]
fn test_search_by_name_is_case_insensitive() {
    let (_temp, _path, store) = setup_temp_store();
    store
        .add_record(&Record::new(1, "Widget", "part", 10, "Acme"))
        .unwrap();

    let found = store
        .search(&SearchKey::ByName("wIdGeT".to_string()))
        .unwrap();
    assert!(found.is_some());
}

#[test]
fn test_search_miss_is_none_not_error() {
    let (_temp, _path, store) = setup_temp_store();
    store.add_record(&sample_record(1)).unwrap();

    assert!(store.search(&SearchKey::ById(99)).unwrap().is_none());
    assert!(store
        .search(&SearchKey::ByName("nope".to_string()))
        .unwrap()
        .is_none());
}

#[test]
fn test_search_returns_first_match_by_id() {
    let (_temp, _path, store) = setup_temp_store();
    store
        .add_record(&Record::new(5, "first", "d", 1, "s"))
        .unwrap();
    store
        .add_record(&Record::new(5, "second", "d", 2, "s"))
        .unwrap();

    let found = store.search(&SearchKey::ById(5)).unwrap().unwrap();
    assert_eq!(found.name, "first");
}

#[test]
fn test_search_returns_first_match_by_name() {
    let (_temp, _path, store) = setup_temp_store();
    store
        .add_record(&Record::new(1, "Widget", "d", 1, "s"))
        .unwrap();
    store
        .add_record(&Record::new(2, "WIDGET", "d", 2, "s"))
        .unwrap();

    let found = store
        .search(&SearchKey::ByName("widget".to_string()))
        .unwrap()
        .unwrap();
    assert_eq!(found.id, 1);
}

#[test]
fn test_search_on_missing_file_is_none() {
    let (_temp, _path, store) = setup_temp_store();

    assert!(store.search(&SearchKey::ById(1)).unwrap().is_none());
}

// =============================================================================
// Update Tests
// =============================================================================

#[test]
fn test_update_applies_patch_to_all_matches() {
    let (_temp, _path, store) = setup_temp_store();
    store.add_record(&Record::new(5, "a", "d", 1, "s")).unwrap();
    store.add_record(&sample_record(2)).unwrap();
    store.add_record(&Record::new(5, "b", "d", 2, "s")).unwrap();

    let updated = store.update(5, &RecordPatch::new().stock(99)).unwrap();

    assert_eq!(updated, 2);
    let records = store.list_records().unwrap();
    assert_eq!(records[0].stock, 99);
    assert_eq!(records[1].stock, 20);
    assert_eq!(records[2].stock, 99);
}

#[test]
fn test_update_keeps_unpatched_fields() {
    let (_temp, _path, store) = setup_temp_store();
    store
        .add_record(&Record::new(1, "Widget", "Small part", 10, "Acme"))
        .unwrap();

    store
        .update(1, &RecordPatch::new().supplier("Globex"))
        .unwrap();

    let record = store.search(&SearchKey::ById(1)).unwrap().unwrap();
    assert_eq!(record.name, "Widget");
    assert_eq!(record.description, "Small part");
    assert_eq!(record.stock, 10);
    assert_eq!(record.supplier, "Globex");
}

#[test]
fn test_update_distinguishes_absent_from_explicit_empty() {
    let (_temp, _path, store) = setup_temp_store();
    store
        .add_record(&Record::new(1, "Widget", "Small part", 10, "Acme"))
        .unwrap();

    // None leaves the description alone; Some("") really clears it
    store.update(1, &RecordPatch::new().stock(0)).unwrap();
    let record = store.search(&SearchKey::ById(1)).unwrap().unwrap();
    assert_eq!(record.description, "Small part");
    assert_eq!(record.stock, 0);

    store.update(1, &RecordPatch::new().description("")).unwrap();
    let record = store.search(&SearchKey::ById(1)).unwrap().unwrap();
    assert_eq!(record.description, "");
}

#[test]
fn test_update_leaves_non_matching_slots_byte_identical() {
    let (_temp, path, store) = setup_temp_store();
    store.add_record(&sample_record(1)).unwrap();
    store.add_record(&sample_record(2)).unwrap();

    let before = fs::read(&path).unwrap();
    store.update(2, &RecordPatch::new().stock(99)).unwrap();
    let after = fs::read(&path).unwrap();

    assert_eq!(&after[..RECORD_SIZE], &before[..RECORD_SIZE]);
    assert_ne!(&after[RECORD_SIZE..], &before[RECORD_SIZE..]);
}

#[test]
fn test_update_miss_still_rewrites_identically() {
    let (_temp, path, store) = setup_temp_store();
    store.add_record(&sample_record(1)).unwrap();

    let before = fs::read(&path).unwrap();
    let updated = store.update(99, &RecordPatch::new().stock(1)).unwrap();

    assert_eq!(updated, 0);
    assert_eq!(fs::read(&path).unwrap(), before);
}

#[test]
fn test_update_truncates_patch_values_to_field_capacity() {
    let (_temp, _path, store) = setup_temp_store();
    store.add_record(&sample_record(1)).unwrap();

    store
        .update(1, &RecordPatch::new().description("d".repeat(60)))
        .unwrap();

    let record = store.search(&SearchKey::ById(1)).unwrap().unwrap();
    assert_eq!(record.description, "d".repeat(20));
}

#[test]
fn test_update_aborts_on_undecodable_slot() {
    let (_temp, path, store) = setup_temp_store();
    store.add_record(&sample_record(1)).unwrap();
    append_raw(&path, &corrupt_slot());

    let before = fs::read(&path).unwrap();
    let err = store.update(1, &RecordPatch::new().stock(99)).unwrap_err();

    assert!(matches!(err, StoreError::Decode(_)));
    // The file was not rewritten
    assert_eq!(fs::read(&path).unwrap(), before);
}

#[test]
fn test_update_aborts_on_short_trailing_chunk() {
    let (_temp, path, store) = setup_temp_store();
    store.add_record(&sample_record(1)).unwrap();
    append_raw(&path, &[0xAB; 7]);

    let before = fs::read(&path).unwrap();
    let err = store.update(1, &RecordPatch::new().stock(99)).unwrap_err();

    assert!(matches!(err, StoreError::SizeMismatch { .. }));
    assert_eq!(fs::read(&path).unwrap(), before);
}

// =============================================================================
// Delete Tests
// =============================================================================

#[test]
fn test_delete_removes_all_matches_and_preserves_order() {
    let (_temp, _path, store) = setup_temp_store();
    store.add_record(&sample_record(1)).unwrap();
    store.add_record(&Record::new(5, "a", "d", 1, "s")).unwrap();
    store.add_record(&sample_record(2)).unwrap();
    store.add_record(&Record::new(5, "b", "d", 2, "s")).unwrap();
    store.add_record(&sample_record(3)).unwrap();

    let removed = store.delete(5).unwrap();

    assert_eq!(removed, 2);
    let ids: Vec<i32> = store.list_records().unwrap().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[test]
fn test_delete_is_idempotent() {
    let (_temp, path, store) = setup_temp_store();
    store.add_record(&sample_record(1)).unwrap();
    store.add_record(&sample_record(2)).unwrap();

    assert_eq!(store.delete(1).unwrap(), 1);
    let after_first = fs::read(&path).unwrap();

    assert_eq!(store.delete(1).unwrap(), 0);
    assert_eq!(fs::read(&path).unwrap(), after_first);
}

#[test]
fn test_delete_miss_is_noop_copy() {
    let (_temp, path, store) = setup_temp_store();
    store.add_record(&sample_record(1)).unwrap();

    let before = fs::read(&path).unwrap();
    assert_eq!(store.delete(99).unwrap(), 0);
    assert_eq!(fs::read(&path).unwrap(), before);
}

#[test]
fn test_delete_aborts_on_undecodable_slot() {
    let (_temp, path, store) = setup_temp_store();
    store.add_record(&sample_record(1)).unwrap();
    append_raw(&path, &corrupt_slot());

    let before = fs::read(&path).unwrap();
    let err = store.delete(1).unwrap_err();

    assert!(matches!(err, StoreError::Decode(_)));
    assert_eq!(fs::read(&path).unwrap(), before);
}

// =============================================================================
// Report Tests
// =============================================================================

#[test]
fn test_report_lists_every_record() {
    let (_temp, _path, store) = setup_temp_store();
    store
        .add_record(&Record::new(1, "Widget", "Small part", 10, "Acme"))
        .unwrap();
    store
        .add_record(&Record::new(2, "Gadget", "Large part", 3, "Globex"))
        .unwrap();

    let report = store.generate_report().unwrap();
    let lines: Vec<&str> = report.lines().collect();

    assert_eq!(lines.len(), 4); // header + separator + 2 rows
    assert!(lines[0].starts_with("ID"));
    assert_eq!(lines[1], "-".repeat(80));
    assert!(lines[2].starts_with("1        Widget"));
    assert!(lines[3].starts_with("2        Gadget"));
}

#[test]
fn test_report_on_empty_store_is_header_only() {
    let (_temp, _path, store) = setup_temp_store();

    let report = store.generate_report().unwrap();
    assert_eq!(report.lines().count(), 2);
}

// =============================================================================
// End-to-End Tests
// =============================================================================

#[test]
fn test_full_crud_lifecycle() {
    let (_temp, _path, store) = setup_temp_store();

    // Create
    let record = Record::new(1, "Widget", "Small part", 10, "Acme");
    store.add_record(&record).unwrap();

    // Read
    let listed = store.list_records().unwrap();
    assert_eq!(listed, vec![record]);

    // Update
    store.update(1, &RecordPatch::new().stock(5)).unwrap();
    let found = store.search(&SearchKey::ById(1)).unwrap().unwrap();
    assert_eq!(found.stock, 5);

    // Delete
    store.delete(1).unwrap();
    assert!(store.list_records().unwrap().is_empty());
}
