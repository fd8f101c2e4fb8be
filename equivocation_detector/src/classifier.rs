use types::Block;

use crate::block_view::BlockView;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LocalOutcome {
    Valid,
    AdmissibleEquivocation,
    IgnorableEquivocation,
}

/// Decides whether `block` branches its creator's known chain, and if so, whether the fork must
/// be accommodated.
///
/// Pure: depends only on `block`'s own fields, the latest-message index and the dependency DAG.
/// Never mutates the record store — record creation on `AdmissibleEquivocation` is the outer
/// pipeline's job, via `EquivocationTracker::record_equivocation`.
pub fn classify_local(block: &Block, view: &impl BlockView) -> LocalOutcome {
    let creator_justification = block.creator_justification();
    let latest_known = view.latest_messages().get(&block.sender).copied();

    // A block whose creator-justification matches the locally-known latest block from the same
    // creator cannot be branching the creator's chain.
    if creator_justification == latest_known {
        return LocalOutcome::Valid;
    }

    // Any mismatch means either the creator forked or the local view is stale. Admissibility is
    // decided by whether the protocol already committed to accepting the block via a dependency
    // request, not by which of those two it is.
    if view.is_requested_as_dependency(block.hash) {
        LocalOutcome::AdmissibleEquivocation
    } else {
        LocalOutcome::IgnorableEquivocation
    }
}
