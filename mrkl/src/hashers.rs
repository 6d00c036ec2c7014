//! 32-byte digest strategies.
//!
//! | strategy           | leaf                 | internal node                 |
//! |--------------------|----------------------|-------------------------------|
//! | [`Blake2s256Merge`] | `d`                  | `blake2s(left \|\| right)`       |
//! | [`Blake2sSpr`]      | `blake2s(d)`         | `blake2s(left \|\| right)`       |
//! | [`Blake3Merge`]     | `d`                  | `blake3(left \|\| right)`        |
//! | [`Blake3Tagged`]    | `blake3(0x00 \|\| d)` | `blake3(0x01 \|\| left \|\| right)` |
//! | [`Sha256Merge`]     | `d`                  | `sha256(left \|\| right)`        |
//!
//! The strategies with an identity leaf do not distinguish a leaf digest from
//! an internal node digest. [`Blake2sSpr`] and [`Blake3Tagged`] do.

use blake2::Digest as _;

use crate::Merge;

/// Width in bytes of every digest in the tree.
pub const DIGEST_LEN: usize = 32;

/// A 32-byte digest.
pub type Digest = [u8; DIGEST_LEN];

/// Domain tag prepended to leaf hash inputs by [`Blake3Tagged`].
const LEAF_TAG: u8 = 0x00;
/// Domain tag prepended to internal merge inputs by [`Blake3Tagged`].
const INTERNAL_TAG: u8 = 0x01;

/// Reference strategy: `blake2s-256(left || right)`, leaves used as given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Blake2s256Merge;

impl Merge for Blake2s256Merge {
    type Hash = Digest;

    fn merge(left: &Digest, right: &Digest) -> Digest {
        blake2s(&[left.as_slice(), right.as_slice()])
    }
}

/// Blake2s, second preimage resistant.
///
/// Leaves are hashed once more with blake2s before entering the tree, so a
/// leaf can never be mistaken for an internal node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Blake2sSpr;

impl Merge for Blake2sSpr {
    type Hash = Digest;

    fn leaf(leaf: &Digest) -> Digest {
        blake2s(&[leaf.as_slice()])
    }

    fn merge(left: &Digest, right: &Digest) -> Digest {
        blake2s(&[left.as_slice(), right.as_slice()])
    }
}

/// `blake3(left || right)`, leaves used as given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Blake3Merge;

impl Merge for Blake3Merge {
    type Hash = Digest;

    fn merge(left: &Digest, right: &Digest) -> Digest {
        let mut input = [0u8; 2 * DIGEST_LEN];
        input[..DIGEST_LEN].copy_from_slice(left);
        input[DIGEST_LEN..].copy_from_slice(right);
        *blake3::hash(&input).as_bytes()
    }
}

/// Blake3 with domain separation.
///
/// - Leaf nodes:     `blake3(0x00 || leaf)`
/// - Internal nodes: `blake3(0x01 || left || right)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Blake3Tagged;

impl Merge for Blake3Tagged {
    type Hash = Digest;

    fn leaf(leaf: &Digest) -> Digest {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&[LEAF_TAG]);
        hasher.update(leaf);
        *hasher.finalize().as_bytes()
    }

    fn merge(left: &Digest, right: &Digest) -> Digest {
        let mut input = [0u8; 2 * DIGEST_LEN + 1];
        input[0] = INTERNAL_TAG;
        input[1..DIGEST_LEN + 1].copy_from_slice(left);
        input[DIGEST_LEN + 1..].copy_from_slice(right);
        *blake3::hash(&input).as_bytes()
    }
}

/// `sha256(left || right)`, leaves used as given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sha256Merge;

impl Merge for Sha256Merge {
    type Hash = Digest;

    fn merge(left: &Digest, right: &Digest) -> Digest {
        let mut hasher = sha2::Sha256::new();
        hasher.update(left);
        hasher.update(right);
        hasher.finalize().into()
    }
}

fn blake2s(parts: &[&[u8]]) -> Digest {
    let mut hasher = blake2::Blake2s256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}
