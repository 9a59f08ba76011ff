/// Private data attached to a resource
///
/// Applications attach opaque byte blobs to a resource under a 128-bit
/// identifier. Setting an identifier twice replaces its blob.

use rustc_hash::FxHashMap;
use crate::error::{Error, Result};
use crate::engine_bail;

/// Identifier → blob store owned by a resource
#[derive(Debug, Default)]
pub struct PrivateDataStore {
    entries: FxHashMap<u128, Vec<u8>>,
}

impl PrivateDataStore {
    pub fn new() -> Self {
        Self { entries: FxHashMap::default() }
    }

    /// Attach `data` under `guid`, replacing any previous blob
    pub fn set(&mut self, guid: u128, data: &[u8]) {
        self.entries.insert(guid, data.to_vec());
    }

    /// Blob attached under `guid`
    pub fn get(&self, guid: u128) -> Result<&[u8]> {
        match self.entries.get(&guid) {
            Some(data) => Ok(data.as_slice()),
            None => engine_bail!("sw3d::PrivateData",
                Error::NotFound(format!("no private data for {:032x}", guid))),
        }
    }

    /// Remove the blob attached under `guid`
    pub fn free(&mut self, guid: u128) -> Result<()> {
        if self.entries.remove(&guid).is_none() {
            engine_bail!("sw3d::PrivateData",
                Error::NotFound(format!("no private data for {:032x}", guid)));
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "private_data_tests.rs"]
mod tests;
