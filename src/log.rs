//! Append-event records and the off-core replay indexer.
//!
//! The accumulator keeps O(depth) state, so inclusion proofs cannot be
//! served from it. Instead every append emits a [`DepositEvent`]; the
//! [`DepositLog`] replays that stream, rebuilds the leaf set (O(N) by
//! design), and generates proofs. The indexer is deliberately separate
//! from the accumulator hot path.

use crate::{
    deposit::{
        DepositData, PUBKEY_LENGTH, SIGNATURE_LENGTH, WITHDRAWAL_CREDENTIALS_LENGTH,
    },
    error::{Error, Result},
    hash::{hash_nodes, mix_in_length, ZeroHashes, DEPOSIT_TREE_DEPTH},
    proof::DepositProof,
};

/// Serialized size of a [`DepositEvent`]: 48 + 32 + 8 + 96 + 8 bytes.
pub const DEPOSIT_EVENT_LENGTH: usize =
    PUBKEY_LENGTH + WITHDRAWAL_CREDENTIALS_LENGTH + 8 + SIGNATURE_LENGTH + 8;

/// The append-event record emitted once per successful deposit.
///
/// Field order and byte encodings are a compatibility surface: off-chain
/// observers reconstruct the full tree and arbitrary inclusion proofs from
/// this stream, so the layout must never be reordered or reformatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepositEvent {
    /// Validator public key, as submitted.
    pub pubkey: [u8; PUBKEY_LENGTH],
    /// Withdrawal credential, as submitted.
    pub withdrawal_credentials: [u8; WITHDRAWAL_CREDENTIALS_LENGTH],
    /// Deposit amount in Gwei, 8 bytes little-endian.
    pub amount: [u8; 8],
    /// Deposit signature, as submitted.
    pub signature: [u8; SIGNATURE_LENGTH],
    /// Deposit count after this append, 8 bytes little-endian.
    pub index: [u8; 8],
}

impl DepositEvent {
    /// Build the event for `data` appended as leaf number `new_count`.
    pub fn new(data: &DepositData, new_count: u64) -> Self {
        Self {
            pubkey: data.pubkey,
            withdrawal_credentials: data.withdrawal_credentials,
            amount: data.amount.to_le_bytes(),
            signature: data.signature,
            index: new_count.to_le_bytes(),
        }
    }

    /// The deposit record carried by this event.
    pub fn deposit_data(&self) -> DepositData {
        DepositData {
            pubkey: self.pubkey,
            withdrawal_credentials: self.withdrawal_credentials,
            amount: u64::from_le_bytes(self.amount),
            signature: self.signature,
        }
    }

    /// Deposit count after the append this event records.
    pub fn new_count(&self) -> u64 {
        u64::from_le_bytes(self.index)
    }

    /// Serialize to the fixed 192-byte layout, fields in order.
    pub fn serialize(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(DEPOSIT_EVENT_LENGTH);
        buf.extend_from_slice(&self.pubkey);
        buf.extend_from_slice(&self.withdrawal_credentials);
        buf.extend_from_slice(&self.amount);
        buf.extend_from_slice(&self.signature);
        buf.extend_from_slice(&self.index);
        buf
    }

    /// Deserialize from the fixed 192-byte layout.
    pub fn deserialize(data: &[u8]) -> Result<Self> {
        if data.len() != DEPOSIT_EVENT_LENGTH {
            return Err(Error::InvalidData(format!(
                "deposit event expected {} bytes, got {}",
                DEPOSIT_EVENT_LENGTH,
                data.len()
            )));
        }
        let bad = |field: &str| Error::InvalidData(format!("bad {} bytes", field));
        let mut pos = 0;
        let pubkey = data[pos..pos + PUBKEY_LENGTH]
            .try_into()
            .map_err(|_| bad("pubkey"))?;
        pos += PUBKEY_LENGTH;
        let withdrawal_credentials = data[pos..pos + WITHDRAWAL_CREDENTIALS_LENGTH]
            .try_into()
            .map_err(|_| bad("withdrawal credential"))?;
        pos += WITHDRAWAL_CREDENTIALS_LENGTH;
        let amount = data[pos..pos + 8].try_into().map_err(|_| bad("amount"))?;
        pos += 8;
        let signature = data[pos..pos + SIGNATURE_LENGTH]
            .try_into()
            .map_err(|_| bad("signature"))?;
        pos += SIGNATURE_LENGTH;
        let index = data[pos..pos + 8].try_into().map_err(|_| bad("index"))?;
        Ok(Self {
            pubkey,
            withdrawal_credentials,
            amount,
            signature,
            index,
        })
    }
}

/// Off-core indexer that rebuilds the full tree from the event stream.
///
/// Holds every leaf (O(N) storage) so it can recompute the commitment and
/// generate inclusion proofs for arbitrary leaves — the two things the
/// O(depth) accumulator cannot do.
#[derive(Debug, Clone)]
pub struct DepositLog {
    leaves: Vec<[u8; 32]>,
    zero_hashes: ZeroHashes,
}

impl DepositLog {
    /// Create an empty indexer.
    pub fn new() -> Self {
        Self {
            leaves: Vec::new(),
            zero_hashes: ZeroHashes::build(),
        }
    }

    /// Apply the next event from the stream.
    ///
    /// Events must arrive in emission order; a gap or replay fails with
    /// [`Error::InvalidData`] and leaves the indexer unchanged.
    pub fn apply(&mut self, event: &DepositEvent) -> Result<()> {
        let expected = self.leaves.len() as u64 + 1;
        if event.new_count() != expected {
            return Err(Error::InvalidData(format!(
                "deposit event out of order: expected count {}, got {}",
                expected,
                event.new_count()
            )));
        }
        self.leaves.push(event.deposit_data().hash_tree_root());
        Ok(())
    }

    /// Number of replayed deposits.
    pub fn len(&self) -> u64 {
        self.leaves.len() as u64
    }

    /// Whether no events have been replayed yet.
    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    /// The replayed leaf values, in append order.
    pub fn leaves(&self) -> &[[u8; 32]] {
        &self.leaves
    }

    /// Recompute the commitment over the replayed leaves.
    ///
    /// Equals [`DepositTree::root`](crate::DepositTree::root) after the
    /// same deposits.
    pub fn root(&self) -> [u8; 32] {
        let full = hash_nodes(
            &self.subtree_root(0, DEPOSIT_TREE_DEPTH - 1),
            &self.subtree_root(1 << (DEPOSIT_TREE_DEPTH - 1), DEPOSIT_TREE_DEPTH - 1),
        );
        mix_in_length(&full, self.len())
    }

    /// Generate an inclusion proof for leaf `index`.
    ///
    /// The proof carries one sibling per height; siblings over regions no
    /// leaf has reached are the precomputed empty-subtree roots.
    pub fn prove(&self, index: u64) -> Result<DepositProof> {
        if index >= self.len() {
            return Err(Error::InvalidProof(format!(
                "leaf index {} beyond replayed deposits {}",
                index,
                self.len()
            )));
        }
        let mut siblings = [[0u8; 32]; DEPOSIT_TREE_DEPTH];
        for (height, sibling) in siblings.iter_mut().enumerate() {
            let sibling_index = (index >> height) ^ 1;
            *sibling = self.subtree_root((sibling_index as usize) << height, height);
        }
        Ok(DepositProof::new(index, self.len(), siblings))
    }

    /// Root of the subtree of the given height whose leftmost leaf is
    /// `start`. Empty regions resolve to the zero-hash table.
    fn subtree_root(&self, start: usize, height: usize) -> [u8; 32] {
        if height == 0 {
            return self.leaves.get(start).copied().unwrap_or([0u8; 32]);
        }
        if start >= self.leaves.len() {
            // Callers stay below the tree depth, where the table is total.
            return self.zero_hashes.table()[height];
        }
        let half = 1usize << (height - 1);
        hash_nodes(
            &self.subtree_root(start, height - 1),
            &self.subtree_root(start + half, height - 1),
        )
    }
}

impl Default for DepositLog {
    fn default() -> Self {
        Self::new()
    }
}
