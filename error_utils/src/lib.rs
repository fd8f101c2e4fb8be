//! The fatal-error taxonomy shared by the detection core and its callers.
//!
//! These three variants are not validation outcomes — they signal that the local DAG has
//! violated an invariant the enclosing pipeline is supposed to guarantee before handing a block
//! to this core (every justification resolves, every branch has an admitted successor). None of
//! them are expected to occur in a correctly functioning node; surfacing them unchanged to the
//! caller is the only sane response.

use thiserror::Error;
use types::{BlockHash, SeqNum, ValidatorId};

#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum DetectionError {
    #[error("justification referenced block {hash} which is not present in the local view")]
    MissingBlock { hash: BlockHash },

    #[error(
        "block {block} was authored by a validator other than {validator} but carries no \
         justification entry for them"
    )]
    MissingEquivocatorJustification {
        block: BlockHash,
        validator: ValidatorId,
    },

    #[error(
        "block {block}'s branch should already contain an ancestor at sequence number \
         {target_seq_num} but the local view does not have one"
    )]
    MissingBranchAncestor {
        block: BlockHash,
        target_seq_num: SeqNum,
    },
}
