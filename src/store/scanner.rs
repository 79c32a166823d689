//! Slot Scanner
//!
//! Sequential iteration over the slots of a backing file.

use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;

use crate::error::{Result, StoreError};
use crate::record::{decode_record, Record, RECORD_SIZE};

/// Iterator over the records of a backing file, in append order
///
/// Reads successive 78-byte chunks from offset 0. The scan is lazy and
/// finite; restart it by constructing a new `Scanner`. Per-slot failures
/// are yielded as error items rather than ending the scan:
/// - a slot with invalid UTF-8 yields `Decode` and iteration continues
///   with the next slot;
/// - a short trailing chunk yields `SizeMismatch`, after which the scan
///   ends (there is nothing after the trailing fragment).
pub struct Scanner {
    /// None when the backing file does not exist (scans as empty)
    reader: Option<BufReader<File>>,
    /// Index of the next slot, for log context
    slot: u64,
    /// Set after EOF or an unrecoverable read failure
    done: bool,
}

impl Scanner {
    /// Open a backing file for scanning
    ///
    /// A missing file is not an error: the store treats it as empty until
    /// the first append creates it.
    pub fn open(path: &Path) -> Result<Self> {
        let reader = match File::open(path) {
            Ok(file) => Some(BufReader::new(file)),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            reader,
            slot: 0,
            done: false,
        })
    }

    /// Read the next raw slot
    ///
    /// Returns `Ok(None)` at a clean end-of-file, `SizeMismatch` when the
    /// file ends partway through a slot.
    fn read_slot(&mut self) -> Result<Option<[u8; RECORD_SIZE]>> {
        let reader = match self.reader.as_mut() {
            Some(r) => r,
            None => return Ok(None),
        };

        let mut slot = [0u8; RECORD_SIZE];
        let mut filled = 0;

        while filled < RECORD_SIZE {
            match reader.read(&mut slot[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }

        match filled {
            0 => Ok(None),
            n if n < RECORD_SIZE => Err(StoreError::SizeMismatch {
                expected: RECORD_SIZE,
                actual: n,
            }),
            _ => Ok(Some(slot)),
        }
    }
}

impl Iterator for Scanner {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let slot = match self.read_slot() {
            Ok(Some(slot)) => slot,
            Ok(None) => {
                self.done = true;
                return None;
            }
            Err(e) => {
                // Short trailing chunk or I/O failure: nothing readable follows
                self.done = true;
                return Some(Err(e));
            }
        };

        let index = self.slot;
        self.slot += 1;

        // Decode failures are local to the slot; the next one may be fine
        Some(decode_record(&slot).map_err(|e| {
            tracing::trace!("slot {} failed to decode: {}", index, e);
            e
        }))
    }
}
