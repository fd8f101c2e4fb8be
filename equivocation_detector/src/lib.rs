//! Equivocation detection for a Casper-style message DAG.
//!
//! A validator equivocates when it authors two distinct blocks at the same personal sequence
//! number. This crate answers the two questions the enclosing validation pipeline needs on every
//! new block: does it equivocate against what the local node already knows ([`classify_local`]),
//! and has it neglected to slash an equivocation its own justification cone could already prove
//! ([`check_neglect`])? Block storage, the wider DAG and the validation pipeline itself are the
//! caller's concern, reached only through [`BlockView`].

pub mod block_view;
pub mod classifier;
pub mod neglect;
pub mod store;
mod walker;

pub use crate::block_view::BlockView;
pub use crate::classifier::{classify_local, LocalOutcome};
pub use crate::neglect::{check_neglect, DiscoveryStatus, NeglectOutcome};
pub use crate::store::RecordStore;

use error_utils::DetectionError;
use types::{Block, SeqNum, ValidatorId};

/// Bundles the record store with the two block-admission checks, so the enclosing pipeline only
/// has to hold one handle per DAG it is tracking.
#[derive(Clone, Default)]
pub struct EquivocationTracker {
    store: RecordStore,
}

impl EquivocationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn classify_local(&self, block: &Block, view: &impl BlockView) -> LocalOutcome {
        classifier::classify_local(block, view)
    }

    pub fn check_neglect(
        &self,
        block: &Block,
        view: &impl BlockView,
    ) -> Result<NeglectOutcome, DetectionError> {
        neglect::check_neglect(block, &self.store, view)
    }

    /// Called by the outer pipeline once it has classified a block as `AdmissibleEquivocation`
    /// and decided to escalate it. Returns `false` if a record already existed for this
    /// `(equivocator, base_seq_num)` pair.
    pub fn record_equivocation(&self, equivocator: ValidatorId, base_seq_num: SeqNum) -> bool {
        self.store.insert(equivocator, base_seq_num)
    }

    pub fn record_store(&self) -> &RecordStore {
        &self.store
    }
}
