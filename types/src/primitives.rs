//! The opaque identifiers this core is built around.
//!
//! Validator identities and block hashes are both fixed-width digests; wrapping
//! `ethereum_types::H256` (rather than passing bare byte arrays around) keeps the two from being
//! accidentally interchanged, the same role `Version`/`Domain` play over `H32`/`H64` in a
//! sibling crate of this lineage.

use derive_more::Display;
use ethereum_types::H256;
use serde::{Deserialize, Serialize};

/// A non-negative, per-validator personal chain position. Monotonic: a validator's `n`th block
/// always has `seq_num == n`, with the genesis block at `0`.
pub type SeqNum = u64;

/// Bonded stake, in whatever unit the enclosing chain uses. Never negative.
pub type Stake = u64;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Debug, Display, Deserialize, Serialize)]
#[display(fmt = "{:#x}", _0)]
pub struct ValidatorId(pub H256);

impl From<H256> for ValidatorId {
    fn from(hash: H256) -> Self {
        Self(hash)
    }
}

impl From<[u8; 32]> for ValidatorId {
    fn from(bytes: [u8; 32]) -> Self {
        Self(H256(bytes))
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Debug, Display, Deserialize, Serialize)]
#[display(fmt = "{:#x}", _0)]
pub struct BlockHash(pub H256);

impl From<H256> for BlockHash {
    fn from(hash: H256) -> Self {
        Self(hash)
    }
}

impl From<[u8; 32]> for BlockHash {
    fn from(bytes: [u8; 32]) -> Self {
        Self(H256(bytes))
    }
}
