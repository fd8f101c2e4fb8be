//! A thin driver standing in for "the enclosing validation pipeline": it wires a toy in-memory
//! block view to the equivocation-detection core, replays a handful of blocks, and logs the
//! classification/neglect outcome for each at the same call sites the detection functions are
//! invoked. It carries no protocol logic of its own.

mod fixture;

use anyhow::Result;
use log::info;

use equivocation_detector::{classify_local, EquivocationTracker, LocalOutcome, NeglectOutcome};
use types::{Block, BlockHash, Bonds, Justification, ValidatorId};

use crate::fixture::InMemoryView;

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
    bonds: Bonds,
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
        bonds,
    }
}

/// Admits `candidate` the way the enclosing pipeline would: classify, escalate admissible
/// equivocations into a fresh record, run neglect detection, then add the block to the view.
fn accept_block(view: &InMemoryView, tracker: &EquivocationTracker, candidate: Block) -> Result<()> {
    info!("received block {} from {}", candidate.hash, candidate.sender);

    match tracker.classify_local(&candidate, view) {
        LocalOutcome::Valid => info!("  -> valid, linear extension of {}'s chain", candidate.sender),
        LocalOutcome::IgnorableEquivocation => {
            info!("  -> ignorable equivocation, discarding");
            return Ok(());
        }
        LocalOutcome::AdmissibleEquivocation => {
            let base_seq_num = candidate.seq_num - 1;
            if tracker.record_equivocation(candidate.sender, base_seq_num) {
                info!(
                    "  -> admissible equivocation, recording new fork by {} at base seq {}",
                    candidate.sender, base_seq_num
                );
            }
        }
    }

    match tracker.check_neglect(&candidate, view)? {
        NeglectOutcome::Valid => {}
        NeglectOutcome::NeglectedEquivocation((equivocator, base_seq_num)) => {
            info!(
                "  -> NEGLECTED: block had evidence to prove {}'s equivocation at base seq {} \
                 and did not slash",
                equivocator, base_seq_num
            );
            return Ok(());
        }
    }

    view.admit(candidate);
    Ok(())
}

fn main() -> Result<()> {
    simple_logger::init()?;

    let (a, b, c, d) = (id(1), id(2), id(3), id(4));
    let view = InMemoryView::new();
    let tracker = EquivocationTracker::new();

    // A plain linear chain: each block extends its creator's own prior block. Valid.
    let a1 = block(hash(1), a, 1, vec![], bonds(&[a, b, c, d]));
    view.admit(a1);
    let a2 = block(hash(2), a, 2, vec![(a, hash(1))], bonds(&[a, b, c, d]));
    accept_block(&view, &tracker, a2)?;

    // A forks. a2' is ignored until something requests it as a dependency, then it becomes
    // admissible and a record is opened.
    let a2_prime = block(hash(3), a, 2, vec![(a, hash(1))], bonds(&[a, b, c, d]));
    assert_eq!(classify_local(&a2_prime, &view), LocalOutcome::IgnorableEquivocation);
    view.request(a2_prime.hash);
    accept_block(&view, &tracker, a2_prime)?;

    // C only sees one branch of the fork — oblivious.
    let c1 = block(hash(10), c, 1, vec![(a, hash(2))], bonds(&[a, b, c, d]));
    accept_block(&view, &tracker, c1)?;

    // B's latest block points at a2'; C's next block reaches both branches and becomes a
    // witness.
    let b1 = block(hash(20), b, 1, vec![(a, hash(3))], bonds(&[a, b, c, d]));
    view.admit(b1);
    let c2 = block(
        hash(11),
        c,
        2,
        vec![(a, hash(2)), (b, hash(20)), (c, hash(10))],
        bonds(&[a, b, c, d]),
    );
    accept_block(&view, &tracker, c2)?;

    // D cites C's witness block directly and neglects to slash.
    let d1 = block(hash(30), d, 1, vec![(c, hash(11))], bonds(&[a, b, c, d]));
    accept_block(&view, &tracker, d1)?;

    let store = tracker.record_store();
    info!(
        "{} outstanding equivocation record(s) tracked (store empty: {})",
        store.len(),
        store.is_empty()
    );

    // A fresh fork whose equivocator is dropped from the bond set is detected on the spot,
    // independent of justifications.
    let e = id(5);
    assert!(tracker.record_equivocation(e, 1));
    let e1 = block(hash(40), e, 1, vec![], bonds(&[a, b, c, d]));
    accept_block(&view, &tracker, e1)?;

    Ok(())
}
