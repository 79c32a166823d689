//! File Rewrite
//!
//! The truncate-and-replace protocol used by update and delete.

use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{Result, StoreError};
use crate::record::{encode_record, Record};

/// Replace the backing file's contents with the given records, in order
///
/// Writes every slot to a temp file beside the target, syncs it, then
/// renames it over the original. A failure before the rename leaves the
/// original file untouched. This narrows the corruption window of a
/// mid-rewrite crash; it does not make mutation safe against a concurrent
/// appender, whose slots land in a file that is about to be replaced.
pub(super) fn rewrite_records(path: &Path, records: &[Record]) -> Result<()> {
    let tmp_path = tmp_sibling(path);

    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&tmp_path)?;

    let mut writer = BufWriter::new(file);
    for record in records {
        writer.write_all(&encode_record(record))?;
    }
    writer.flush()?;

    // Sync before the rename so the replacement is durable, not just renamed
    let file = writer
        .into_inner()
        .map_err(|e| StoreError::Io(e.into_error()))?;
    file.sync_all()?;

    fs::rename(&tmp_path, path)?;

    tracing::debug!(
        "rewrote {} with {} record(s)",
        path.display(),
        records.len()
    );

    Ok(())
}

/// Temp file path next to the target: "data.bin" → "data.bin.tmp"
fn tmp_sibling(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}
