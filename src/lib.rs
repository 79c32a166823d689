//! # Stockpile
//!
//! A minimal flat-file record store for inventory data:
//! - Fixed-width 78-byte binary records (no header, no index)
//! - Scan-based CRUD: append to create, linear scan to read
//! - Whole-file rewrite for update/delete
//! - Temp-file + rename to narrow the rewrite corruption window
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       Caller                                │
//! │              (CLI binary / library user)                    │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                    RecordStore                              │
//! │      add / list / search / update / delete / report         │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │   Scanner   │          │   Rewrite   │
//!   │ (seq. read) │          │ (tmp+rename)│
//!   └──────┬──────┘          └──────┬──────┘
//!          │                        │
//!          └───────────┬────────────┘
//!                      ▼
//!              ┌─────────────┐
//!              │  data.bin   │
//!              │ (78B slots) │
//!              └─────────────┘
//! ```
//!
//! ## Concurrency
//!
//! Single-threaded by design. There is no file locking: a concurrent
//! append racing a truncate-and-rewrite can lose or corrupt data. Callers
//! must guarantee a single writer per backing file.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod record;
pub mod report;
pub mod store;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{Result, StoreError};
pub use config::Config;
pub use record::Record;
pub use store::{RecordPatch, RecordStore, SearchKey};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of Stockpile
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
