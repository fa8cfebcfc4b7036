//! Stateless verification of deposit inclusion proofs.

use crate::{
    hash::{hash_nodes, mix_in_length},
    proof::DepositProof,
};

/// Check that `proof` binds `leaf` into `root`.
///
/// Folds the leaf up through all 32 heights, choosing the combine order at
/// each height from the corresponding bit of the leaf index, then mixes in
/// the proof's leaf count and compares against the committed root. The
/// root must have been produced by a tree of exactly `proof.count()`
/// leaves.
pub fn verify_deposit_proof(leaf: &[u8; 32], proof: &DepositProof, root: &[u8; 32]) -> bool {
    let mut node = *leaf;
    for (height, sibling) in proof.siblings().iter().enumerate() {
        if (proof.index() >> height) & 1 == 1 {
            node = hash_nodes(sibling, &node);
        } else {
            node = hash_nodes(&node, sibling);
        }
    }
    mix_in_length(&node, proof.count()) == *root
}
