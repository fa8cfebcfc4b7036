//! Persisted state layout for the deposit tree.
//!
//! Format (fixed 2056 bytes, no framing):
//!
//! ```text
//! zero_hashes:   32 x 32 bytes, ordered by height
//! branch:        32 x 32 bytes, ordered by height
//! deposit_count: u64 LE (8 bytes)
//! ```
//!
//! The zero-hash table is a pure function of the depth, but it is part of
//! the persisted layout; `deserialize` recomputes it and rejects any
//! mismatch so that storage corruption fails closed instead of producing
//! wrong roots.

use crate::{
    error::{Error, Result},
    hash::{ZeroHashes, DEPOSIT_TREE_DEPTH},
    tree::DepositTree,
};

/// Serialized size of the tree state:
/// `32 * 32` zero hashes + `32 * 32` branch + 8-byte count.
pub const SERIALIZED_STATE_LENGTH: usize = DEPOSIT_TREE_DEPTH * 32 * 2 + 8;

impl DepositTree {
    /// Serialize the tree state to the fixed persisted layout.
    pub fn serialize(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(SERIALIZED_STATE_LENGTH);
        for zero in self.zero_hashes().table() {
            buf.extend_from_slice(zero);
        }
        for node in self.branch() {
            buf.extend_from_slice(node);
        }
        buf.extend_from_slice(&self.deposit_count().to_le_bytes());
        buf
    }

    /// Reconstitute a tree from the fixed persisted layout.
    ///
    /// Fails with [`Error::InvalidData`] on wrong length, on a zero-hash
    /// table that does not match the recomputed one, or on a count beyond
    /// capacity.
    pub fn deserialize(data: &[u8]) -> Result<Self> {
        if data.len() != SERIALIZED_STATE_LENGTH {
            return Err(Error::InvalidData(format!(
                "tree state expected {} bytes, got {}",
                SERIALIZED_STATE_LENGTH,
                data.len()
            )));
        }

        let expected = ZeroHashes::build();
        let mut pos = 0;
        for (height, zero) in expected.table().iter().enumerate() {
            if &data[pos..pos + 32] != zero {
                return Err(Error::InvalidData(format!(
                    "zero hash mismatch at height {}",
                    height
                )));
            }
            pos += 32;
        }

        let mut branch = [[0u8; 32]; DEPOSIT_TREE_DEPTH];
        for node in branch.iter_mut() {
            *node = data[pos..pos + 32]
                .try_into()
                .map_err(|_| Error::InvalidData("bad branch bytes".to_string()))?;
            pos += 32;
        }

        let deposit_count = u64::from_le_bytes(
            data[pos..pos + 8]
                .try_into()
                .map_err(|_| Error::InvalidData("bad count bytes".to_string()))?,
        );

        DepositTree::from_parts(branch, deposit_count)
    }
}
