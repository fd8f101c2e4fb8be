use std::collections::{HashMap, HashSet};

use crate::primitives::{BlockHash, SeqNum, Stake, ValidatorId};

/// A single entry of `Block::justifications`: the latest block the block's creator had seen
/// from `validator` at creation time.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Justification {
    pub validator: ValidatorId,
    pub block_hash: BlockHash,
}

/// The bonded validator set as of a given block: validator identity to stake. A validator
/// absent from this map is not bonded; per protocol rule the only way to leave it is to be
/// slashed.
pub type Bonds = HashMap<ValidatorId, Stake>;

/// The fields of a block this core reads. Block storage, state roots, signatures and payloads
/// are the enclosing pipeline's concern; this is the read-only view handed to the detector.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Block {
    pub hash: BlockHash,
    pub sender: ValidatorId,
    pub seq_num: SeqNum,
    /// At most one entry per validator.
    pub justifications: Vec<Justification>,
    pub bonds: Bonds,
}

impl Block {
    /// The hash of the creator's own prior block, as named in `justifications`, if any.
    pub fn creator_justification(&self) -> Option<BlockHash> {
        self.justification_for(self.sender)
    }

    /// The hash of the latest block from `validator` this block's creator had seen, if any.
    pub fn justification_for(&self, validator: ValidatorId) -> Option<BlockHash> {
        self.justifications
            .iter()
            .find(|justification| justification.validator == validator)
            .map(|justification| justification.block_hash)
    }
}

/// An outstanding equivocation known to the local node. Owned by this core; created by the
/// enclosing pipeline the moment it escalates an `AdmissibleEquivocation`, then only ever
/// mutated by [`crate::EquivocationRecord::with_witness`] through the record store.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct EquivocationRecord {
    pub equivocator: ValidatorId,
    pub base_seq_num: SeqNum,
    pub witnesses: HashSet<BlockHash>,
}

/// Uniquely identifies an [`EquivocationRecord`]; at most one record exists per key.
pub type RecordKey = (ValidatorId, SeqNum);

impl EquivocationRecord {
    pub fn new(equivocator: ValidatorId, base_seq_num: SeqNum) -> Self {
        Self {
            equivocator,
            base_seq_num,
            witnesses: HashSet::new(),
        }
    }

    pub fn key(&self) -> RecordKey {
        (self.equivocator, self.base_seq_num)
    }

    /// Returns a copy of this record with `witness` added. Witnesses only ever grow; this never
    /// removes anything already present.
    pub fn with_witness(&self, witness: BlockHash) -> Self {
        let mut witnesses = self.witnesses.clone();
        witnesses.insert(witness);
        Self {
            witnesses,
            ..self.clone()
        }
    }
}
