use thiserror::Error;

/// Alias for `core::result::Result<T, MerkleError>`.
pub type Result<T> = core::result::Result<T, MerkleError>;

/// Errors from Merkle tree operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MerkleError {
    /// Empty leaf list, packed buffer of the wrong length, malformed digest.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// A proof was requested for a leaf that does not exist.
    #[error("leaf index {index} is out of range (leaf count {leaf_count})")]
    IndexOutOfRange {
        /// Requested leaf index.
        index: usize,
        /// Number of leaves in the tree.
        leaf_count: usize,
    },
    /// An encoded proof could not be decoded.
    #[error("invalid proof: {0}")]
    InvalidProof(String),
}
