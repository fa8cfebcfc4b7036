//! Append-only SHA-256 Merkle accumulator for validator deposit records.
//!
//! The tree has a fixed depth of 32 and commits to every deposit ever
//! appended, in order, while storing only the 32-slot frontier (`branch`)
//! plus a leaf count — never the full tree. The right-hand side of the tree
//! is represented by precomputed empty-subtree roots, and the final root
//! mixes in the leaf count so that trees with identical leaves but different
//! lengths never collide.
//!
//! # Core types
//!
//! - [`DepositTree`] — the incremental accumulator (append, root).
//! - [`DepositData`] — one validator deposit record and its leaf
//!   merkleization.
//! - [`DepositEvent`] — the append-event record emitted per deposit.
//! - [`DepositLog`] — off-core indexer that replays the event stream and
//!   generates inclusion proofs.
//! - [`DepositProof`] — inclusion proof for one leaf, checked by
//!   [`verify_deposit_proof`].
//!
//! Proof generation is deliberately kept out of the accumulator: the
//! accumulator holds O(depth) state, and anything that needs the full leaf
//! set replays the event log instead.

#![warn(missing_docs)]

mod deposit;
mod error;
pub(crate) mod hash;
mod log;
mod proof;
mod serialization;
mod tree;
mod verify;

#[cfg(test)]
pub(crate) mod test_utils;

pub use deposit::{
    DepositData, PUBKEY_LENGTH, SIGNATURE_LENGTH, WITHDRAWAL_CREDENTIALS_LENGTH,
};
pub use error::{Error, Result};
pub use hash::{
    hash_count_for_append, hash_nodes, mix_in_length, pad_le_u64, ZeroHashes,
    DEPOSIT_TREE_DEPTH, EMPTY_DEPOSIT_ROOT, MAX_DEPOSIT_COUNT,
};
pub use log::{DepositEvent, DepositLog, DEPOSIT_EVENT_LENGTH};
pub use proof::DepositProof;
pub use serialization::SERIALIZED_STATE_LENGTH;
pub use tree::DepositTree;
pub use verify::verify_deposit_proof;
