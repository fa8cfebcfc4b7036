//! The incremental deposit Merkle tree.

use crate::{
    deposit::DepositData,
    error::{Error, Result},
    hash::{hash_nodes, mix_in_length, ZeroHashes, DEPOSIT_TREE_DEPTH, MAX_DEPOSIT_COUNT},
    log::DepositEvent,
};

/// Append-only Merkle accumulator over deposit leaves.
///
/// Stores only the 32-slot frontier (`branch`), the zero-hash table, and
/// the leaf count — roughly 2KB regardless of how many leaves have been
/// appended. Slot `h` of the branch holds the root of the closed
/// height-`h` subtree corresponding to bit `h` of the count, exactly the
/// carry structure of a binary counter.
///
/// Each append merges the new leaf with the closed subtrees below the
/// count's lowest zero bit and writes exactly one branch slot, so both
/// `append` and `root` are O(depth) in hash invocations.
///
/// `append` takes `&mut self`, which is the required mutual-exclusion
/// boundary: the carry loop reads and writes multiple branch slots
/// non-atomically. `root` is a pure read.
#[derive(Debug, Clone)]
pub struct DepositTree {
    branch: [[u8; 32]; DEPOSIT_TREE_DEPTH],
    zero_hashes: ZeroHashes,
    deposit_count: u64,
}

impl DepositTree {
    /// Create an empty tree. Builds the zero-hash table once.
    pub fn new() -> Self {
        Self {
            branch: [[0u8; 32]; DEPOSIT_TREE_DEPTH],
            zero_hashes: ZeroHashes::build(),
            deposit_count: 0,
        }
    }

    /// Reconstitute a tree from persisted frontier state.
    pub fn from_parts(
        branch: [[u8; 32]; DEPOSIT_TREE_DEPTH],
        deposit_count: u64,
    ) -> Result<Self> {
        if deposit_count > MAX_DEPOSIT_COUNT {
            return Err(Error::InvalidData(format!(
                "deposit count {} exceeds capacity {}",
                deposit_count, MAX_DEPOSIT_COUNT
            )));
        }
        Ok(Self {
            branch,
            zero_hashes: ZeroHashes::build(),
            deposit_count,
        })
    }

    /// Number of leaves appended so far.
    pub fn deposit_count(&self) -> u64 {
        self.deposit_count
    }

    /// The frontier, one slot per tree height.
    ///
    /// Slot `h` is meaningful only while bit `h` of the count is set;
    /// other slots hold stale carries.
    pub fn branch(&self) -> &[[u8; 32]; DEPOSIT_TREE_DEPTH] {
        &self.branch
    }

    /// The zero-hash table this tree was built with.
    pub fn zero_hashes(&self) -> &ZeroHashes {
        &self.zero_hashes
    }

    /// Append one leaf. Returns `(new_count, new_root)`.
    ///
    /// Fails with [`Error::Full`] before touching any state once the tree
    /// holds [`MAX_DEPOSIT_COUNT`] leaves; there is no partial mutation.
    pub fn append(&mut self, leaf: [u8; 32]) -> Result<(u64, [u8; 32])> {
        if self.deposit_count >= MAX_DEPOSIT_COUNT {
            return Err(Error::Full {
                count: self.deposit_count,
            });
        }

        // Carry propagation over the post-increment count: merge the new
        // node with the closed subtree at each height whose bit is zero,
        // then park it at the first height whose bit is one. The capacity
        // check guarantees the new count has a set bit within the depth,
        // so the loop always parks the node.
        let mut node = leaf;
        let mut size = self.deposit_count + 1;
        for height in 0..DEPOSIT_TREE_DEPTH {
            if size & 1 == 1 {
                self.branch[height] = node;
                break;
            }
            node = hash_nodes(&self.branch[height], &node);
            size >>= 1;
        }

        self.deposit_count += 1;
        Ok((self.deposit_count, self.root()))
    }

    /// Current hash tree root over all appended leaves.
    ///
    /// Folds an empty node up through the frontier: at each height the
    /// corresponding count bit selects between the closed subtree in the
    /// branch (left sibling) and the empty-subtree root (right sibling).
    /// The leaf count is then mixed into the result.
    pub fn root(&self) -> [u8; 32] {
        let mut node = [0u8; 32];
        let mut size = self.deposit_count;
        for (closed, zero) in self.branch.iter().zip(self.zero_hashes.table()) {
            if size & 1 == 1 {
                node = hash_nodes(closed, &node);
            } else {
                node = hash_nodes(&node, zero);
            }
            size >>= 1;
        }
        mix_in_length(&node, self.deposit_count)
    }

    /// Merkleize `data`, append its leaf, and produce the append-event
    /// record carrying the raw fields plus the new count.
    pub fn deposit(&mut self, data: &DepositData) -> Result<DepositEvent> {
        let leaf = data.hash_tree_root();
        let (new_count, _) = self.append(leaf)?;
        Ok(DepositEvent::new(data, new_count))
    }
}

impl Default for DepositTree {
    fn default() -> Self {
        Self::new()
    }
}
