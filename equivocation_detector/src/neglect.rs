use log::info;

use error_utils::DetectionError;
use types::{Block, EquivocationRecord, RecordKey};

use crate::block_view::BlockView;
use crate::store::RecordStore;
use crate::walker;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DiscoveryStatus {
    /// `block` had enough evidence in its justification cone to slash the equivocation and
    /// didn't. The block is invalid.
    Neglected,
    /// `block` is new evidence of the equivocation; it becomes a witness.
    Detected,
    /// `block` genuinely could not see the equivocation yet.
    Oblivious,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum NeglectOutcome {
    Valid,
    /// Carries the key of the record `block` neglected, so the caller can report which
    /// equivocation was at fault.
    NeglectedEquivocation(RecordKey),
}

/// Iterates a snapshot of `store`, updating witnesses for every record `block` newly proves and
/// short-circuiting the first time `block` turns out to have neglected one.
pub fn check_neglect(
    block: &Block,
    store: &RecordStore,
    view: &impl BlockView,
) -> Result<NeglectOutcome, DetectionError> {
    for record in store.snapshot() {
        match discovery_status(&record, block, view)? {
            DiscoveryStatus::Neglected => {
                return Ok(NeglectOutcome::NeglectedEquivocation(record.key()));
            }
            DiscoveryStatus::Detected => {
                info!(
                    "block {} witnesses equivocation by {} at base seq {}",
                    block.hash, record.equivocator, record.base_seq_num
                );
                store.replace_witnesses(record.key(), record.with_witness(block.hash));
            }
            DiscoveryStatus::Oblivious => {}
        }
    }

    Ok(NeglectOutcome::Valid)
}

fn discovery_status(
    record: &EquivocationRecord,
    block: &Block,
    view: &impl BlockView,
) -> Result<DiscoveryStatus, DetectionError> {
    match block.bonds.get(&record.equivocator) {
        // A validator can only leave the bond set via a slashing transaction, so a block that
        // already dropped the equivocator has already acknowledged the equivocation.
        None => Ok(DiscoveryStatus::Detected),
        // `stake == 0` shouldn't occur under the proof-of-stake contract, but the guard is kept
        // rather than treated as unreachable: see the open question in the design notes.
        Some(&stake) if stake == 0 => Ok(DiscoveryStatus::Detected),
        Some(_) => {
            if walker::is_provable(block, record, view)? {
                Ok(DiscoveryStatus::Neglected)
            } else {
                Ok(DiscoveryStatus::Oblivious)
            }
        }
    }
}
