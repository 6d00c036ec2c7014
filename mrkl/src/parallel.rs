//! Rayon backed variants of the batch operations (feature `parallel`).
//!
//! Pairs within a level are hashed on the rayon pool, and in [`construct`]
//! each leaf's proof is walked independently. Results are identical to the
//! sequential functions.

use rayon::prelude::*;

use crate::{Merge, MerkleError, MerkleTree, Proof, Result, leaf_level};

/// Levels shorter than this are reduced on the calling thread.
const MIN_PARALLEL_LEVEL: usize = 1024;

/// Parallel [`reduce_level`](crate::reduce_level).
pub fn reduce_level<M: Merge>(level: &[M::Hash]) -> Vec<M::Hash>
where
    M::Hash: Send + Sync,
{
    if level.len() < MIN_PARALLEL_LEVEL {
        return crate::reduce_level::<M>(level);
    }
    level
        .par_chunks(2)
        .map(|pair| match pair {
            [left, right] => M::merge(left, right),
            carried => carried[0].clone(),
        })
        .collect()
}

/// Parallel [`compute_root`](crate::compute_root).
pub fn compute_root<M: Merge>(leaves: &[M::Hash]) -> Result<M::Hash>
where
    M::Hash: Send + Sync,
{
    let mut level = leaf_level::<M>(leaves)?;
    while level.len() > 1 {
        level = reduce_level::<M>(&level);
    }
    level
        .pop()
        .ok_or_else(|| MerkleError::InvalidInput("tree reduced to an empty level".into()))
}

/// Parallel [`construct`](crate::construct).
pub fn construct<M: Merge>(leaves: &[M::Hash]) -> Result<(M::Hash, Vec<Proof<M::Hash>>)>
where
    M::Hash: Send + Sync,
{
    let tree = MerkleTree::<M>::build(leaves, reduce_level::<M>)?;
    let proofs = (0..tree.leaf_count())
        .into_par_iter()
        .map(|index| tree.path(index))
        .collect();
    Ok((tree.root().clone(), proofs))
}
