//! Inclusion proofs for individual deposit leaves.

use crate::{
    error::{Error, Result},
    hash::{DEPOSIT_TREE_DEPTH, MAX_DEPOSIT_COUNT},
};

/// Serialized size of a [`DepositProof`]: index (8) + count (8) + 32
/// sibling hashes.
pub(crate) const SERIALIZED_PROOF_LENGTH: usize = 8 + 8 + DEPOSIT_TREE_DEPTH * 32;

/// Merkle inclusion proof for one deposit leaf.
///
/// Carries one sibling hash per tree height plus the leaf index and the
/// tree length the proof was generated against. Verification must use the
/// same length, since the committed root mixes it in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepositProof {
    index: u64,
    count: u64,
    siblings: [[u8; 32]; DEPOSIT_TREE_DEPTH],
}

impl DepositProof {
    pub(crate) fn new(
        index: u64,
        count: u64,
        siblings: [[u8; 32]; DEPOSIT_TREE_DEPTH],
    ) -> Self {
        Self {
            index,
            count,
            siblings,
        }
    }

    /// 0-based index of the proven leaf.
    pub fn index(&self) -> u64 {
        self.index
    }

    /// Leaf count of the tree this proof was generated against.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Sibling hash at the given height, or `None` for heights at or
    /// beyond the tree depth.
    pub fn sibling(&self, height: usize) -> Option<&[u8; 32]> {
        self.siblings.get(height)
    }

    /// All sibling hashes, ordered leaf-to-root.
    pub fn siblings(&self) -> &[[u8; 32]; DEPOSIT_TREE_DEPTH] {
        &self.siblings
    }

    /// Serialize to the fixed layout: index (8 LE), count (8 LE), then the
    /// 32 sibling hashes leaf-to-root.
    pub fn serialize(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(SERIALIZED_PROOF_LENGTH);
        buf.extend_from_slice(&self.index.to_le_bytes());
        buf.extend_from_slice(&self.count.to_le_bytes());
        for sibling in &self.siblings {
            buf.extend_from_slice(sibling);
        }
        buf
    }

    /// Deserialize from the fixed layout, validating shape and bounds.
    pub fn deserialize(data: &[u8]) -> Result<Self> {
        if data.len() != SERIALIZED_PROOF_LENGTH {
            return Err(Error::InvalidProof(format!(
                "deposit proof expected {} bytes, got {}",
                SERIALIZED_PROOF_LENGTH,
                data.len()
            )));
        }
        let index = u64::from_le_bytes(
            data[..8]
                .try_into()
                .map_err(|_| Error::InvalidProof("bad index bytes".to_string()))?,
        );
        let count = u64::from_le_bytes(
            data[8..16]
                .try_into()
                .map_err(|_| Error::InvalidProof("bad count bytes".to_string()))?,
        );
        if count > MAX_DEPOSIT_COUNT {
            return Err(Error::InvalidProof(format!(
                "proof count {} exceeds capacity {}",
                count, MAX_DEPOSIT_COUNT
            )));
        }
        if index >= count {
            return Err(Error::InvalidProof(format!(
                "proof index {} not below count {}",
                index, count
            )));
        }
        let mut siblings = [[0u8; 32]; DEPOSIT_TREE_DEPTH];
        for (height, sibling) in siblings.iter_mut().enumerate() {
            let start = 16 + height * 32;
            *sibling = data[start..start + 32]
                .try_into()
                .map_err(|_| Error::InvalidProof("bad sibling bytes".to_string()))?;
        }
        Ok(Self {
            index,
            count,
            siblings,
        })
    }
}
