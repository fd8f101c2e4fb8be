//! The reachability walk at the heart of neglect detection.
//!
//! Expressed as an explicit iterative fold over a block's justifications, carrying the children
//! set as an accumulator, rather than as recursion — a deep justification cone should not grow
//! the stack.

use std::collections::HashSet;

use error_utils::DetectionError;
use types::{Block, BlockHash, EquivocationRecord, SeqNum};

use crate::block_view::BlockView;

/// Folds over `root`'s justifications, fetching blocks from `view` on demand, to decide whether
/// the equivocation in `record` is provable from `root`'s justification cone: either a
/// previously known witness appears, or two distinct blocks by `record.equivocator` above
/// `record.base_seq_num` are reached.
pub fn is_provable(
    root: &Block,
    record: &EquivocationRecord,
    view: &impl BlockView,
) -> Result<bool, DetectionError> {
    let mut children: HashSet<BlockHash> = HashSet::new();

    for justification in &root.justifications {
        if record.witnesses.contains(&justification.block_hash) {
            return Ok(true);
        }

        let justification_block =
            view.fetch_block(justification.block_hash)
                .ok_or(DetectionError::MissingBlock {
                    hash: justification.block_hash,
                })?;

        maybe_add_equivocation_child(&justification_block, record, view, &mut children)?;

        if children.len() >= 2 {
            return Ok(true);
        }
    }

    Ok(false)
}

/// Updates `children` with whatever equivocation child `justification_block` implies, if any.
fn maybe_add_equivocation_child(
    justification_block: &Block,
    record: &EquivocationRecord,
    view: &impl BlockView,
    children: &mut HashSet<BlockHash>,
) -> Result<(), DetectionError> {
    let candidate = if justification_block.sender == record.equivocator {
        // `justification_block` is itself on the equivocator's chain.
        if justification_block.seq_num <= record.base_seq_num {
            // Predates or is the base block; not a branch.
            return Ok(());
        }
        justification_block.clone()
    } else {
        // Consult `justification_block`'s own pointer to the equivocator's latest known block.
        let latest_hash = justification_block
            .justification_for(record.equivocator)
            .ok_or(DetectionError::MissingEquivocatorJustification {
                block: justification_block.hash,
                validator: record.equivocator,
            })?;

        let latest_block = view
            .fetch_block(latest_hash)
            .ok_or(DetectionError::MissingBlock { hash: latest_hash })?;

        if latest_block.seq_num <= record.base_seq_num {
            return Ok(());
        }
        latest_block
    };

    add_equivocation_child(candidate, record.base_seq_num, view, children)
}

/// Canonicalizes `candidate` to the ancestor of its own branch at sequence number
/// `base_seq_num + 1`, then adds that ancestor to `children`. Two blocks on the same branch
/// above the base always canonicalize to the same ancestor, which is what makes
/// `children.len() >= 2` equivalent to "two distinct branches observed".
fn add_equivocation_child(
    mut candidate: Block,
    base_seq_num: SeqNum,
    view: &impl BlockView,
    children: &mut HashSet<BlockHash>,
) -> Result<(), DetectionError> {
    let target_seq_num = base_seq_num + 1;

    while candidate.seq_num > target_seq_num {
        let parent_hash = candidate.creator_justification().ok_or(
            DetectionError::MissingBranchAncestor {
                block: candidate.hash,
                target_seq_num,
            },
        )?;

        candidate = view
            .fetch_block(parent_hash)
            .ok_or(DetectionError::MissingBlock { hash: parent_hash })?;
    }

    if candidate.seq_num != target_seq_num {
        return Err(DetectionError::MissingBranchAncestor {
            block: candidate.hash,
            target_seq_num,
        });
    }

    children.insert(candidate.hash);
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use types::{Bonds, Justification, ValidatorId};

    use super::*;

    struct MapView(HashMap<BlockHash, Block>);

    impl BlockView for MapView {
        fn fetch_block(&self, hash: BlockHash) -> Option<Block> {
            self.0.get(&hash).cloned()
        }

        fn latest_messages(&self) -> HashMap<ValidatorId, BlockHash> {
            HashMap::new()
        }

        fn is_requested_as_dependency(&self, _hash: BlockHash) -> bool {
            false
        }
    }

    fn id(byte: u8) -> ValidatorId {
        ValidatorId::from([byte; 32])
    }

    fn hash(byte: u8) -> BlockHash {
        BlockHash::from([byte; 32])
    }

    fn bonds(validators: &[ValidatorId]) -> Bonds {
        validators.iter().map(|&v| (v, 10)).collect()
    }

    fn block(
        hash: BlockHash,
        sender: ValidatorId,
        seq_num: u64,
        justifications: Vec<(ValidatorId, BlockHash)>,
    ) -> Block {
        Block {
            hash,
            sender,
            seq_num,
            justifications: justifications
                .into_iter()
                .map(|(validator, block_hash)| Justification {
                    validator,
                    block_hash,
                })
                .collect(),
            bonds: bonds(&[sender]),
        }
    }

    // Property 5: two blocks on the same branch above the base, at different depths, must
    // canonicalize to the same sequence-(S+1) ancestor rather than being counted as distinct
    // children.
    #[test]
    fn same_branch_at_different_depths_canonicalizes_to_one_child() {
        let e = id(1);
        let mut children = HashSet::new();
        let mut blocks = HashMap::new();

        let e1 = block(hash(1), e, 1, vec![]); // base, seq 1
        let e2 = block(hash(2), e, 2, vec![(e, hash(1))]); // S+1
        let e3 = block(hash(3), e, 3, vec![(e, hash(2))]); // deeper on the same branch
        blocks.insert(e1.hash, e1.clone());
        blocks.insert(e2.hash, e2.clone());
        blocks.insert(e3.hash, e3.clone());
        let view = MapView(blocks);

        add_equivocation_child(e2.clone(), 1, &view, &mut children).unwrap();
        add_equivocation_child(e3, 1, &view, &mut children).unwrap();

        assert_eq!(children.len(), 1);
        assert!(children.contains(&e2.hash));
    }

    #[test]
    fn missing_justification_block_is_fatal() {
        let e = id(1);
        let record = EquivocationRecord::new(e, 1);
        let view = MapView(HashMap::new());

        let root = block(hash(9), id(2), 1, vec![(e, hash(99))]);

        let err = is_provable(&root, &record, &view).unwrap_err();
        assert_eq!(err, DetectionError::MissingBlock { hash: hash(99) });
    }

    #[test]
    fn block_from_another_sender_without_equivocator_pointer_is_fatal() {
        let e = id(1);
        let other = id(2);
        let record = EquivocationRecord::new(e, 1);

        let mut blocks = HashMap::new();
        // `jb` is authored by `other` and carries no justification entry for `e`.
        let jb = block(hash(5), other, 1, vec![]);
        blocks.insert(jb.hash, jb.clone());
        let view = MapView(blocks);

        let root = block(hash(9), id(3), 1, vec![(other, hash(5))]);

        let err = is_provable(&root, &record, &view).unwrap_err();
        assert_eq!(
            err,
            DetectionError::MissingEquivocatorJustification {
                block: hash(5),
                validator: e,
            }
        );
    }

    #[test]
    fn candidate_with_no_ancestor_at_target_seq_is_fatal() {
        let e = id(1);
        let mut children = HashSet::new();
        let mut blocks = HashMap::new();

        // e3 sits two sequence numbers above the base but carries no creator-justification back
        // to an ancestor at S+1, which should already have been admitted.
        let e3 = block(hash(3), e, 3, vec![]);
        blocks.insert(e3.hash, e3.clone());
        let view = MapView(blocks);

        let err = add_equivocation_child(e3, 1, &view, &mut children).unwrap_err();
        assert_eq!(
            err,
            DetectionError::MissingBranchAncestor {
                block: hash(3),
                target_seq_num: 2,
            }
        );
    }
}
