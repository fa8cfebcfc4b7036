//! Shared test helpers: fixture records and a naive reference
//! merkleization the incremental tree is checked against.

use rand::RngExt;

use crate::{
    deposit::DepositData,
    hash::{hash_nodes, mix_in_length, ZeroHashes, DEPOSIT_TREE_DEPTH},
};

/// Deterministic fixture record derived from a seed byte.
pub(crate) fn sample_deposit(seed: u8) -> DepositData {
    DepositData {
        pubkey: [seed; 48],
        withdrawal_credentials: [seed.wrapping_add(1); 32],
        amount: 32_000_000_000 + seed as u64,
        signature: [seed.wrapping_add(2); 96],
    }
}

/// Record with uniformly random field bytes.
pub(crate) fn random_deposit<R: RngExt>(rng: &mut R) -> DepositData {
    let mut pubkey = [0u8; 48];
    let mut withdrawal_credentials = [0u8; 32];
    let mut signature = [0u8; 96];
    rng.fill(&mut pubkey[..]);
    rng.fill(&mut withdrawal_credentials[..]);
    rng.fill(&mut signature[..]);
    DepositData {
        pubkey,
        withdrawal_credentials,
        amount: rng.random(),
        signature,
    }
}

/// Reference root computation: merkleize the full leaf list level by
/// level, padding each level with the empty-subtree root of that height,
/// then mix in the length.
///
/// Deliberately shares no mechanism with the incremental tree or the
/// replay indexer so it can serve as an independent cross-check.
pub(crate) fn naive_root(leaves: &[[u8; 32]]) -> [u8; 32] {
    let zeros = ZeroHashes::build();
    let mut level: Vec<[u8; 32]> = leaves.to_vec();
    for height in 0..DEPOSIT_TREE_DEPTH {
        if level.is_empty() {
            level.push(zeros.table()[height]);
        }
        if level.len() % 2 == 1 {
            level.push(zeros.table()[height]);
        }
        level = level
            .chunks(2)
            .map(|pair| hash_nodes(&pair[0], &pair[1]))
            .collect();
    }
    mix_in_length(&level[0], leaves.len() as u64)
}
