use core::{fmt, marker::PhantomData};

use crate::{
    Merge, Proof, Result, check_index,
    level::{reduce_level, sibling_step},
    leaf_level,
};

/// A Merkle tree with every level materialized.
///
/// `levels()[0]` holds the leaves (after [`Merge::leaf`]) and the last level
/// holds only the root. Total storage is under `2n` nodes for `n` leaves,
/// and proofs are read off the stored levels without hashing.
pub struct MerkleTree<M: Merge> {
    levels: Vec<Vec<M::Hash>>,
    root: M::Hash,
    _merge: PhantomData<fn() -> M>,
}

impl<M: Merge> MerkleTree<M> {
    /// Build the tree for an ordered, non-empty list of leaves.
    pub fn from_leaves(leaves: &[M::Hash]) -> Result<Self> {
        Self::build(leaves, reduce_level::<M>)
    }

    /// Build the tree, producing each level above the leaves with `reduce`.
    pub(crate) fn build(
        leaves: &[M::Hash],
        reduce: impl Fn(&[M::Hash]) -> Vec<M::Hash>,
    ) -> Result<Self> {
        let mut level = leaf_level::<M>(leaves)?;
        let mut levels = Vec::new();
        while level.len() > 1 {
            let next = reduce(&level);
            tracing::trace!(height = levels.len() + 1, nodes = next.len(), "reduced level");
            levels.push(level);
            level = next;
        }
        let root = level[0].clone();
        levels.push(level);
        tracing::debug!(
            leaf_count = leaves.len(),
            depth = levels.len() - 1,
            "materialized merkle tree"
        );
        Ok(Self {
            levels,
            root,
            _merge: PhantomData,
        })
    }

    /// The root of the tree.
    pub fn root(&self) -> &M::Hash {
        &self.root
    }

    /// Number of leaves.
    pub fn leaf_count(&self) -> usize {
        self.levels.first().map_or(0, Vec::len)
    }

    /// Number of levels above the leaves. Zero for a single-leaf tree.
    pub fn depth(&self) -> usize {
        self.levels.len() - 1
    }

    /// All levels, leaves first, root last.
    pub fn levels(&self) -> &[Vec<M::Hash>] {
        &self.levels
    }

    /// Consume the tree and return its levels, leaves first.
    pub fn into_levels(self) -> Vec<Vec<M::Hash>> {
        self.levels
    }

    /// Inclusion proof for the leaf at `index`.
    pub fn create_proof(&self, index: usize) -> Result<Proof<M::Hash>> {
        check_index(index, self.leaf_count())?;
        Ok(self.path(index))
    }

    /// Proofs for every leaf, in leaf order.
    pub fn proofs(&self) -> Vec<Proof<M::Hash>> {
        (0..self.leaf_count()).map(|index| self.path(index)).collect()
    }

    /// Walk from leaf `index` to the root. `index` must be a valid leaf.
    pub(crate) fn path(&self, index: usize) -> Proof<M::Hash> {
        let mut position = index;
        let mut proof = Vec::with_capacity(self.depth());
        for level in &self.levels[..self.depth()] {
            proof.extend(sibling_step(level, position));
            position /= 2;
        }
        proof
    }
}

impl<M: Merge> Clone for MerkleTree<M> {
    fn clone(&self) -> Self {
        Self {
            levels: self.levels.clone(),
            root: self.root.clone(),
            _merge: PhantomData,
        }
    }
}

impl<M: Merge> fmt::Debug for MerkleTree<M>
where
    M::Hash: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MerkleTree")
            .field("leaf_count", &self.leaf_count())
            .field("depth", &self.depth())
            .field("root", &self.root)
            .finish()
    }
}
