use std::collections::HashMap;

use types::{Block, BlockHash, ValidatorId};

/// The external seam this core is generic over: byte-addressable block storage, the
/// latest-message index, and the pending-block dependency DAG. Block storage, gossip,
/// persistence and the wider validation pipeline all live on the other side of this trait; the
/// core never constructs a [`Block`] itself, only reads the ones handed back through here.
pub trait BlockView {
    /// Looks up a block by hash in the local view. `None` means the hash could not be resolved —
    /// callers turn this into `error_utils::DetectionError::MissingBlock`.
    fn fetch_block(&self, hash: BlockHash) -> Option<Block>;

    /// A snapshot of the most recent block seen locally from each validator.
    fn latest_messages(&self) -> HashMap<ValidatorId, BlockHash>;

    /// Whether some other pending block has already declared `hash` as a dependency it is
    /// waiting on.
    fn is_requested_as_dependency(&self, hash: BlockHash) -> bool;
}
