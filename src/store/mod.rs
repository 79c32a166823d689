//! Store Module
//!
//! The record store facade that coordinates slot I/O.
//!
//! ## Responsibilities
//! - Append-only create
//! - Linear-scan list and search
//! - Whole-file rewrite for update and delete
//! - Report generation over the scan path
//!
//! Every operation opens the backing file, uses it, and closes it within
//! the call; no handle is held across operations. There is no locking:
//! callers must guarantee a single writer per backing file.

mod rewrite;
mod scanner;

pub use scanner::Scanner;

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::config::Config;
use crate::error::{Result, StoreError};
use crate::record::{encode_record, Record};
use crate::report;

// =============================================================================
// Search Key
// =============================================================================

/// Key for [`RecordStore::search`]
///
/// Two explicit variants instead of an untyped id-or-name parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchKey {
    /// Exact match on the record id
    ById(i32),

    /// Case-insensitive exact match on the decoded name
    ByName(String),
}

impl SearchKey {
    /// Whether a record matches this key
    pub fn matches(&self, record: &Record) -> bool {
        match self {
            SearchKey::ById(id) => record.id == *id,
            SearchKey::ByName(name) => record.name.to_lowercase() == name.to_lowercase(),
        }
    }
}

// =============================================================================
// Record Patch
// =============================================================================

/// Field overrides for [`RecordStore::update`]
///
/// `None` means leave the field unchanged. An explicit empty string or
/// zero is a real override, distinguishable from absence.
#[derive(Debug, Clone, Default)]
pub struct RecordPatch {
    /// Replacement description, if any
    pub description: Option<String>,

    /// Replacement stock quantity, if any
    pub stock: Option<i32>,

    /// Replacement supplier, if any
    pub supplier: Option<String>,
}

impl RecordPatch {
    /// Create an empty patch (updates nothing)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the replacement description
    pub fn description(mut self, value: impl Into<String>) -> Self {
        self.description = Some(value.into());
        self
    }

    /// Set the replacement stock quantity
    pub fn stock(mut self, value: i32) -> Self {
        self.stock = Some(value);
        self
    }

    /// Set the replacement supplier
    pub fn supplier(mut self, value: impl Into<String>) -> Self {
        self.supplier = Some(value.into());
        self
    }

    /// Apply the overrides to a record, keeping unpatched fields
    fn apply_to(&self, record: &mut Record) {
        if let Some(description) = &self.description {
            record.description = description.clone();
        }
        if let Some(stock) = self.stock {
            record.stock = stock;
        }
        if let Some(supplier) = &self.supplier {
            record.supplier = supplier.clone();
        }
    }
}

// =============================================================================
// Record Store
// =============================================================================

/// The flat-file record store
///
/// ## Mutation Protocol
///
/// Update and delete scan the whole file into memory, transform the
/// record sequence, and rewrite the file through a temp-file + rename.
/// Any slot that cannot be decoded aborts the mutation before the
/// rewrite: rebuilding the file from partial knowledge would silently
/// drop the unreadable records.
#[derive(Debug)]
pub struct RecordStore {
    /// Store configuration (backing file path)
    config: Config,
}

impl RecordStore {
    /// Open a store over the configured backing file
    ///
    /// The file itself is created lazily by the first append.
    pub fn open(config: Config) -> Result<Self> {
        if config.data_path.as_os_str().is_empty() {
            return Err(StoreError::Config("data path must not be empty".to_string()));
        }
        if config.data_path.is_dir() {
            return Err(StoreError::Config(format!(
                "data path {} is a directory",
                config.data_path.display()
            )));
        }

        Ok(Self { config })
    }

    /// Open with a path (convenience method)
    pub fn open_path(path: &Path) -> Result<Self> {
        Self::open(Config::builder().data_path(path).build())
    }

    /// Start a lazy scan over every slot in the backing file
    ///
    /// Each call opens the file afresh, so the scan is restartable.
    pub fn scan(&self) -> Result<Scanner> {
        Scanner::open(&self.config.data_path)
    }

    /// Append a record to the end of the file
    ///
    /// Opens in append mode (creating the file if absent) and never
    /// touches existing slots. Duplicate ids are accepted; search and
    /// mutation resolve them by file order.
    pub fn add_record(&self, record: &Record) -> Result<()> {
        let slot = encode_record(record);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.config.data_path)?;
        file.write_all(&slot)?;

        tracing::debug!(
            "appended record id={} to {}",
            record.id,
            self.config.data_path.display()
        );

        Ok(())
    }

    /// Collect every decodable record, skipping bad slots
    ///
    /// An undecodable slot or short trailing fragment is logged and
    /// skipped; only real I/O failures propagate.
    pub fn list_records(&self) -> Result<Vec<Record>> {
        let mut records = Vec::new();

        for item in self.scan()? {
            match item {
                Ok(record) => records.push(record),
                Err(StoreError::Io(e)) => return Err(StoreError::Io(e)),
                Err(e) => tracing::warn!("skipping unreadable slot: {}", e),
            }
        }

        Ok(records)
    }

    /// Find the FIRST record matching the key, in file order
    ///
    /// Later matches (including duplicate ids) are ignored. A miss is
    /// `Ok(None)`, not an error. Undecodable slots are skipped, as on any
    /// read-only scan.
    pub fn search(&self, key: &SearchKey) -> Result<Option<Record>> {
        for item in self.scan()? {
            let record = match item {
                Ok(record) => record,
                Err(StoreError::Io(e)) => return Err(StoreError::Io(e)),
                Err(e) => {
                    tracing::warn!("skipping unreadable slot during search: {}", e);
                    continue;
                }
            };

            tracing::trace!("comparing against id={} name={:?}", record.id, record.name);

            if key.matches(&record) {
                return Ok(Some(record));
            }
        }

        Ok(None)
    }

    /// Apply a patch to EVERY record with the given id
    ///
    /// All matches are updated, unlike search's first-match rule. The
    /// whole file is rewritten even when nothing matched. Returns the
    /// number of records updated.
    pub fn update(&self, id: i32, patch: &RecordPatch) -> Result<usize> {
        let mut records = self.collect_strict()?;

        let mut updated = 0;
        for record in records.iter_mut().filter(|r| r.id == id) {
            patch.apply_to(record);
            updated += 1;
        }

        // Unconditional rewrite: a miss still round-trips the file
        rewrite::rewrite_records(&self.config.data_path, &records)?;

        tracing::debug!("update id={} touched {} record(s)", id, updated);

        Ok(updated)
    }

    /// Remove EVERY record with the given id
    ///
    /// No match makes the rewrite a no-op copy, so a second delete of the
    /// same id is harmless. Returns the number of records removed.
    pub fn delete(&self, id: i32) -> Result<usize> {
        let records = self.collect_strict()?;
        let before = records.len();

        let kept: Vec<Record> = records.into_iter().filter(|r| r.id != id).collect();
        let removed = before - kept.len();

        rewrite::rewrite_records(&self.config.data_path, &kept)?;

        tracing::debug!("delete id={} removed {} record(s)", id, removed);

        Ok(removed)
    }

    /// Render the fixed-width listing of every record
    pub fn generate_report(&self) -> Result<String> {
        let records = self.list_records()?;
        Ok(report::render_report(&records))
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Scan the whole file into memory for a mutation
    ///
    /// Unlike the read-only paths, ANY unreadable slot is fatal here:
    /// the rewrite would otherwise omit records it never saw.
    fn collect_strict(&self) -> Result<Vec<Record>> {
        self.scan()?.collect()
    }
}
