//! Binary Merkle tree over pre-hashed leaves.
//!
//! Leaves are combined pairwise, left to right, one level at a time. When a
//! level has an odd number of nodes the last one is carried up unchanged
//! rather than being paired with itself:
//!
//! ```text
//!            root
//!           /    \
//!        h0123    d4        <- d4 carried twice
//!        /   \
//!     h01    h23     d4
//!    /  \   /  \
//!   d0  d1 d2  d3    d4
//! ```
//!
//! The node combination function is a [`Merge`] strategy chosen at compile
//! time. [`Blake2s256Merge`] is the reference strategy; see [`hashers`] for
//! the others.
//!
//! ```
//! use mrkl::{Blake2s256Merge, compute_root, create_proof, verify_proof};
//!
//! let leaves = [[1u8; 32], [2u8; 32], [1u8; 32], [3u8; 32], [4u8; 32]];
//! let root = compute_root::<Blake2s256Merge>(&leaves).unwrap();
//! let proof = create_proof::<Blake2s256Merge>(4, &leaves).unwrap();
//! assert_eq!(verify_proof::<Blake2s256Merge>(&leaves[4], &proof), root);
//! ```

#![warn(missing_docs)]

mod error;
pub mod hashers;
mod level;
mod merge;
pub mod packed;
#[cfg(feature = "parallel")]
pub mod parallel;
pub mod proof;
mod tree;

#[cfg(test)]
pub(crate) mod test_utils;

pub use error::{MerkleError, Result};
pub use hashers::{
    Blake2s256Merge, Blake2sSpr, Blake3Merge, Blake3Tagged, DIGEST_LEN, Digest, Sha256Merge,
};
pub use level::reduce_level;
pub use merge::Merge;
pub use proof::{Proof, ProofElem};
pub use tree::MerkleTree;

use level::sibling_step;

/// Compute the Merkle root of an ordered, non-empty list of leaves.
///
/// Only one level is held in memory at a time.
pub fn compute_root<M: Merge>(leaves: &[M::Hash]) -> Result<M::Hash> {
    let mut level = leaf_level::<M>(leaves)?;
    while level.len() > 1 {
        level = reduce_level::<M>(&level);
    }
    level
        .pop()
        .ok_or_else(|| MerkleError::InvalidInput("tree reduced to an empty level".into()))
}

/// Create the inclusion proof for the leaf at `leaf_index`.
///
/// The tree is rebuilt for this call. Use [`construct`] or [`MerkleTree`] when
/// proofs for many leaves of the same list are needed.
pub fn create_proof<M: Merge>(leaf_index: usize, leaves: &[M::Hash]) -> Result<Proof<M::Hash>> {
    check_index(leaf_index, leaves.len())?;
    let mut level = leaf_level::<M>(leaves)?;
    let mut position = leaf_index;
    let mut proof = Vec::new();
    while level.len() > 1 {
        proof.extend(sibling_step(&level, position));
        position /= 2;
        level = reduce_level::<M>(&level);
    }
    Ok(proof)
}

/// Replay `proof` starting from `leaf` and return the root it reconstructs.
///
/// The caller compares the result against the known root; see
/// [`is_included`].
pub fn verify_proof<M: Merge>(leaf: &M::Hash, proof: &[ProofElem<M::Hash>]) -> M::Hash {
    proof
        .iter()
        .fold(M::leaf(leaf), |current, step| step.merge::<M>(&current))
}

/// Check whether `proof` proves `leaf` to be part of the tree with `root`.
pub fn is_included<M: Merge>(leaf: &M::Hash, root: &M::Hash, proof: &[ProofElem<M::Hash>]) -> bool {
    verify_proof::<M>(leaf, proof) == *root
}

/// Compute the root and the proof of every leaf in one pass.
///
/// Equivalent to calling [`compute_root`] and [`create_proof`] for each index,
/// but every level is built exactly once (`n - 1` merges in total) and each
/// proof is read off the materialized levels.
pub fn construct<M: Merge>(leaves: &[M::Hash]) -> Result<(M::Hash, Vec<Proof<M::Hash>>)> {
    let tree = MerkleTree::<M>::from_leaves(leaves)?;
    let proofs = tree.proofs();
    tracing::debug!(
        leaf_count = tree.leaf_count(),
        depth = tree.depth(),
        "constructed root and all proofs"
    );
    Ok((tree.root().clone(), proofs))
}

/// Map caller leaves into level 0 of the tree.
pub(crate) fn leaf_level<M: Merge>(leaves: &[M::Hash]) -> Result<Vec<M::Hash>> {
    if leaves.is_empty() {
        return Err(MerkleError::InvalidInput(
            "leaf list must contain at least one leaf".into(),
        ));
    }
    Ok(leaves.iter().map(M::leaf).collect())
}

pub(crate) fn check_index(index: usize, leaf_count: usize) -> Result<()> {
    if index >= leaf_count {
        return Err(MerkleError::IndexOutOfRange { index, leaf_count });
    }
    Ok(())
}
