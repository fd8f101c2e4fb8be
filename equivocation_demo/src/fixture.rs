//! A toy in-memory [`BlockView`] standing in for the enclosing pipeline's real block store and
//! dependency DAG. Production callers plug in their own; this one exists only so the demo has
//! something to drive the core against.

use std::cell::RefCell;
use std::collections::HashMap;

use equivocation_detector::BlockView;
use types::{Block, BlockHash, ValidatorId};

#[derive(Default)]
pub struct InMemoryView {
    blocks: RefCell<HashMap<BlockHash, Block>>,
    latest_messages: RefCell<HashMap<ValidatorId, BlockHash>>,
    requested: RefCell<Vec<BlockHash>>,
}

impl InMemoryView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Admits `block` into the local view, advancing its sender's latest-message pointer if
    /// `block` has a higher sequence number than what is currently known.
    pub fn admit(&self, block: Block) {
        let current = self.latest_messages.borrow().get(&block.sender).copied();
        let should_advance = match current {
            None => true,
            Some(existing) => self.blocks.borrow()[&existing].seq_num < block.seq_num,
        };
        if should_advance {
            self.latest_messages
                .borrow_mut()
                .insert(block.sender, block.hash);
        }
        self.blocks.borrow_mut().insert(block.hash, block);
    }

    /// Marks `hash` as having been requested as a dependency by some other pending block.
    pub fn request(&self, hash: BlockHash) {
        self.requested.borrow_mut().push(hash);
    }
}

impl BlockView for InMemoryView {
    fn fetch_block(&self, hash: BlockHash) -> Option<Block> {
        self.blocks.borrow().get(&hash).cloned()
    }

    fn latest_messages(&self) -> HashMap<ValidatorId, BlockHash> {
        self.latest_messages.borrow().clone()
    }

    fn is_requested_as_dependency(&self, hash: BlockHash) -> bool {
        self.requested.borrow().contains(&hash)
    }
}
