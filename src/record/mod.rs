//! Record Module
//!
//! The fixed-width inventory record and its binary slot layout.
//!
//! ## Slot Format
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │ Slot (78 bytes, no header, no tombstone)                     │
//! │ ┌─────────┬───────────┬──────────────┬──────────┬──────────┐ │
//! │ │ Id (4)  │ Name (20) │ Descr. (20)  │ Stock(4) │ Supp.(30)│ │
//! │ └─────────┴───────────┴──────────────┴──────────┴──────────┘ │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Integers are little-endian `i32`. Text fields are UTF-8, truncated at
//! the byte level to their capacity and right-padded with zero bytes.
//! Byte-level truncation can split a multi-byte character; such a slot
//! fails UTF-8 validation on decode and is surfaced as a decode error.
//!
//! The backing file is a flat sequence of these slots: no magic number,
//! no version, no record count. Deletion is physical removal via a full
//! file rewrite, never an in-place flag.

mod codec;

pub use codec::{decode_record, encode_record};

// =============================================================================
// Shared Constants (used by codec, scanner, rewrite)
// =============================================================================

/// Capacity of the `name` field in bytes
pub const NAME_CAPACITY: usize = 20;

/// Capacity of the `description` field in bytes
pub const DESCRIPTION_CAPACITY: usize = 20;

/// Capacity of the `supplier` field in bytes
pub const SUPPLIER_CAPACITY: usize = 30;

/// Width of the packed `id` and `stock` integers
pub(crate) const INT_SIZE: usize = std::mem::size_of::<i32>();

/// Total slot width: 4 + 20 + 20 + 4 + 30 = 78 bytes
pub const RECORD_SIZE: usize =
    INT_SIZE + NAME_CAPACITY + DESCRIPTION_CAPACITY + INT_SIZE + SUPPLIER_CAPACITY;

// =============================================================================
// Record
// =============================================================================

/// One inventory record
///
/// `id` is intended to be unique but the store does not enforce it:
/// duplicate ids are accepted on append and matched in file order by
/// search, update, and delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Record identifier (uniqueness is the caller's responsibility)
    pub id: i32,

    /// Item name (truncated to 20 bytes on encode)
    pub name: String,

    /// Item description (truncated to 20 bytes on encode)
    pub description: String,

    /// Stock quantity
    pub stock: i32,

    /// Supplier name (truncated to 30 bytes on encode)
    pub supplier: String,
}

impl Record {
    /// Create a new record
    pub fn new(
        id: i32,
        name: impl Into<String>,
        description: impl Into<String>,
        stock: i32,
        supplier: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            stock,
            supplier: supplier.into(),
        }
    }
}
