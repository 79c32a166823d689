//! Record codec
//!
//! Encoding and decoding functions for the fixed-width slot format.
//!
//! ## Field Offsets
//! ```text
//! ┌────────┬────────────┬───────────────┬───────────┬───────────────┐
//! │ 0..4   │ 4..24      │ 24..44        │ 44..48    │ 48..78        │
//! │ id:i32 │ name       │ description   │ stock:i32 │ supplier      │
//! └────────┴────────────┴───────────────┴───────────┴───────────────┘
//! ```

use crate::error::{Result, StoreError};

use super::{
    Record, DESCRIPTION_CAPACITY, INT_SIZE, NAME_CAPACITY, RECORD_SIZE, SUPPLIER_CAPACITY,
};

// Field offsets within a slot, derived from the capacities
const ID_OFFSET: usize = 0;
const NAME_OFFSET: usize = ID_OFFSET + INT_SIZE;
const DESCRIPTION_OFFSET: usize = NAME_OFFSET + NAME_CAPACITY;
const STOCK_OFFSET: usize = DESCRIPTION_OFFSET + DESCRIPTION_CAPACITY;
const SUPPLIER_OFFSET: usize = STOCK_OFFSET + INT_SIZE;

// =============================================================================
// Encoding
// =============================================================================

/// Encode a record into one 78-byte slot
///
/// Integers are packed little-endian. Text fields are truncated at the
/// byte level to their capacity and zero-padded to exactly that capacity.
/// Truncation never fails, even when it splits a multi-byte character;
/// the resulting slot will surface a decode error when read back.
pub fn encode_record(record: &Record) -> [u8; RECORD_SIZE] {
    let mut slot = [0u8; RECORD_SIZE];

    slot[ID_OFFSET..ID_OFFSET + INT_SIZE].copy_from_slice(&record.id.to_le_bytes());
    pack_text(&mut slot[NAME_OFFSET..NAME_OFFSET + NAME_CAPACITY], &record.name);
    pack_text(
        &mut slot[DESCRIPTION_OFFSET..DESCRIPTION_OFFSET + DESCRIPTION_CAPACITY],
        &record.description,
    );
    slot[STOCK_OFFSET..STOCK_OFFSET + INT_SIZE].copy_from_slice(&record.stock.to_le_bytes());
    pack_text(
        &mut slot[SUPPLIER_OFFSET..SUPPLIER_OFFSET + SUPPLIER_CAPACITY],
        &record.supplier,
    );

    slot
}

/// Truncate text to the field width and copy it in; the field is already
/// zero-filled, so shorter values come out right-padded.
fn pack_text(field: &mut [u8], text: &str) {
    let bytes = text.as_bytes();
    let len = bytes.len().min(field.len());
    field[..len].copy_from_slice(&bytes[..len]);
}

// =============================================================================
// Decoding
// =============================================================================

/// Decode one 78-byte slot into a record
///
/// Returns `SizeMismatch` unless the input is exactly [`RECORD_SIZE`]
/// bytes, and `Decode` if any text field holds invalid UTF-8 after the
/// trailing zero padding is stripped.
pub fn decode_record(bytes: &[u8]) -> Result<Record> {
    if bytes.len() != RECORD_SIZE {
        return Err(StoreError::SizeMismatch {
            expected: RECORD_SIZE,
            actual: bytes.len(),
        });
    }

    let id = i32::from_le_bytes(bytes[ID_OFFSET..ID_OFFSET + INT_SIZE].try_into().unwrap());
    let stock = i32::from_le_bytes(
        bytes[STOCK_OFFSET..STOCK_OFFSET + INT_SIZE]
            .try_into()
            .unwrap(),
    );

    let name = unpack_text(&bytes[NAME_OFFSET..NAME_OFFSET + NAME_CAPACITY], "name")?;
    let description = unpack_text(
        &bytes[DESCRIPTION_OFFSET..DESCRIPTION_OFFSET + DESCRIPTION_CAPACITY],
        "description",
    )?;
    let supplier = unpack_text(
        &bytes[SUPPLIER_OFFSET..SUPPLIER_OFFSET + SUPPLIER_CAPACITY],
        "supplier",
    )?;

    Ok(Record {
        id,
        name,
        description,
        stock,
        supplier,
    })
}

/// Strip trailing zero padding and validate UTF-8
fn unpack_text(field: &[u8], field_name: &str) -> Result<String> {
    let end = field
        .iter()
        .rposition(|&b| b != 0)
        .map(|pos| pos + 1)
        .unwrap_or(0);

    std::str::from_utf8(&field[..end])
        .map(str::to_owned)
        .map_err(|e| StoreError::Decode(format!("invalid UTF-8 in {}: {}", field_name, e)))
}
