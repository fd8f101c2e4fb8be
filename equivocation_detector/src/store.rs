use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use types::{EquivocationRecord, RecordKey, SeqNum, ValidatorId};

/// The outstanding-equivocation set, shared across concurrent block admissions.
///
/// Mutating operations take the write lock only long enough to swap one entry; a detection pass
/// takes the read lock only long enough to clone the current records out, so a long-running
/// justification walk over one record never blocks an insert for an unrelated equivocation.
/// Cloning the `Arc` is cheap and shares the same underlying map, the way callers are expected to
/// hand the tracker around.
#[derive(Clone, Default)]
pub struct RecordStore {
    records: Arc<RwLock<HashMap<RecordKey, EquivocationRecord>>>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new record for `(equivocator, base_seq_num)` if one doesn't already exist.
    /// Returns `false` if a record was already present — the uniqueness invariant in the data
    /// model forbids ever inserting over it.
    pub fn insert(&self, equivocator: ValidatorId, base_seq_num: SeqNum) -> bool {
        let mut records = self.records.write();
        let key = (equivocator, base_seq_num);
        if records.contains_key(&key) {
            return false;
        }
        records.insert(key, EquivocationRecord::new(equivocator, base_seq_num));
        true
    }

    /// A stable snapshot of all records, for a single detection pass. Records inserted after
    /// this call are not reflected in the returned `Vec` — they are picked up by the next pass.
    pub fn snapshot(&self) -> Vec<EquivocationRecord> {
        self.records.read().values().cloned().collect()
    }

    /// Atomically swaps the record at `key` for `updated`. A no-op if `key` no longer names a
    /// record, which should not happen in practice since records are never deleted.
    pub fn replace_witnesses(&self, key: RecordKey, updated: EquivocationRecord) {
        self.records.write().insert(key, updated);
    }

    pub fn get(&self, key: RecordKey) -> Option<EquivocationRecord> {
        self.records.read().get(&key).cloned()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}
