//! Validator deposit records and their leaf merkleization.

use crate::{
    error::{Error, Result},
    hash::{hash_nodes, pad_le_u64, sha256},
};

/// Byte length of a validator public key.
pub const PUBKEY_LENGTH: usize = 48;
/// Byte length of a withdrawal credential.
pub const WITHDRAWAL_CREDENTIALS_LENGTH: usize = 32;
/// Byte length of a deposit signature.
pub const SIGNATURE_LENGTH: usize = 96;

/// One validator deposit record.
///
/// The record is transient: it is merkleized into a 32-byte leaf via
/// [`hash_tree_root`](Self::hash_tree_root) and is not retained by the
/// tree. Amount bounds checking and any signature verification are the
/// caller's responsibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepositData {
    /// Validator public key, 48 bytes.
    pub pubkey: [u8; PUBKEY_LENGTH],
    /// Withdrawal credential, 32 bytes.
    pub withdrawal_credentials: [u8; WITHDRAWAL_CREDENTIALS_LENGTH],
    /// Deposit amount in the chain's smallest unit (Gwei).
    pub amount: u64,
    /// Deposit signature, 96 bytes.
    pub signature: [u8; SIGNATURE_LENGTH],
}

impl DepositData {
    /// Build a record from raw byte slices, validating every fixed length.
    ///
    /// Returns [`Error::MalformedRecord`] naming the offending field on any
    /// length mismatch; nothing is silently truncated or padded.
    pub fn from_slices(
        pubkey: &[u8],
        withdrawal_credentials: &[u8],
        amount: u64,
        signature: &[u8],
    ) -> Result<Self> {
        Ok(Self {
            pubkey: pubkey.try_into().map_err(|_| Error::MalformedRecord {
                field: "pubkey",
                expected: PUBKEY_LENGTH,
                actual: pubkey.len(),
            })?,
            withdrawal_credentials: withdrawal_credentials.try_into().map_err(|_| {
                Error::MalformedRecord {
                    field: "withdrawal_credentials",
                    expected: WITHDRAWAL_CREDENTIALS_LENGTH,
                    actual: withdrawal_credentials.len(),
                }
            })?,
            amount,
            signature: signature.try_into().map_err(|_| Error::MalformedRecord {
                field: "signature",
                expected: SIGNATURE_LENGTH,
                actual: signature.len(),
            })?,
        })
    }

    /// Merkleize this record into its 32-byte leaf value.
    ///
    /// The record is treated as a 4-field container laid out as a depth-2
    /// binary tree of field roots:
    ///
    /// ```text
    /// pubkey_root    = sha256(pubkey || 16 zero bytes)
    /// signature_root = sha256(sha256(s0 || s1) || sha256(s2 || zero32))
    /// amount_chunk   = amount as 8 bytes LE, right-padded to 32
    /// leaf = sha256(sha256(pubkey_root || withdrawal_credentials)
    ///            || sha256(amount_chunk || signature_root))
    /// ```
    ///
    /// where `s0..s2` are the three 32-byte signature chunks. Field order
    /// and padding are a compatibility surface shared with independently
    /// verifying clients.
    pub fn hash_tree_root(&self) -> [u8; 32] {
        let mut padded_pubkey = [0u8; 64];
        padded_pubkey[..PUBKEY_LENGTH].copy_from_slice(&self.pubkey);
        let pubkey_root = sha256(&padded_pubkey);

        let sig_left = sha256(&self.signature[..64]);
        let mut sig_tail = [0u8; 64];
        sig_tail[..32].copy_from_slice(&self.signature[64..]);
        let sig_right = sha256(&sig_tail);
        let signature_root = hash_nodes(&sig_left, &sig_right);

        let amount_chunk = pad_le_u64(self.amount);

        hash_nodes(
            &hash_nodes(&pubkey_root, &self.withdrawal_credentials),
            &hash_nodes(&amount_chunk, &signature_root),
        )
    }
}
