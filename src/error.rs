use thiserror::Error;

/// Alias for `core::result::Result<T, Error>`.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors from deposit tree operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Append attempted on a tree that already holds the maximum number of
    /// leaves. The tree state is left untouched.
    #[error("deposit tree is full (count {count})")]
    Full {
        /// Leaf count at the time of the rejected append.
        count: u64,
    },
    /// A fixed-length record field did not match its required byte length.
    #[error("malformed {field}: expected {expected} bytes, got {actual}")]
    MalformedRecord {
        /// Name of the offending field.
        field: &'static str,
        /// Required byte length.
        expected: usize,
        /// Byte length actually supplied.
        actual: usize,
    },
    /// Invalid persisted or replayed data (deserialization, corruption,
    /// out-of-order events).
    #[error("invalid data: {0}")]
    InvalidData(String),
    /// Invalid proof request or proof encoding.
    #[error("invalid proof: {0}")]
    InvalidProof(String),
}
