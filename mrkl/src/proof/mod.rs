//! Inclusion proofs.
//!
//! A proof is the ordered list of siblings met on the way from a leaf to the
//! root, each tagged with the side it sits on. Levels where the tracked node
//! is carried contribute no step, so proofs through the unbalanced right
//! edge of a tree are shorter than `ceil(log2(n))`.
//!
//! Encodings:
//! - binary, via bincode: [`encode_proof`] / [`decode_proof`]
//! - text, one token per step: `l<64 hex chars>` or `r<64 hex chars>`
//! - serde (feature `serde`): `{"Left": [..]}` / `{"Right": [..]}`

use core::{fmt, str::FromStr};

use bincode::{Decode, Encode};

use crate::{DIGEST_LEN, Digest, Merge, MerkleError, Result};


/// Longest proof any tree indexable by `usize` can produce.
pub const MAX_PROOF_STEPS: usize = usize::BITS as usize;

/// Size limit for decoding a binary proof.
const MAX_ENCODED_PROOF_BYTES: usize = 64 * 1024;

/// Ordered proof steps, leaf level first.
pub type Proof<T> = Vec<ProofElem<T>>;

/// One step of an inclusion proof.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Encode, Decode)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProofElem<T> {
    /// The sibling is the left child; combine as `H(sibling, current)`.
    Left(T),
    /// The sibling is the right child; combine as `H(current, sibling)`.
    Right(T),
}

impl<T> ProofElem<T> {
    /// The sibling node carried by this step.
    pub fn sibling(&self) -> &T {
        match self {
            Self::Left(sibling) | Self::Right(sibling) => sibling,
        }
    }

    /// Consume the step and return the sibling node.
    pub fn into_sibling(self) -> T {
        match self {
            Self::Left(sibling) | Self::Right(sibling) => sibling,
        }
    }

    /// Whether the sibling sits on the left.
    pub fn is_left(&self) -> bool {
        matches!(self, Self::Left(_))
    }

    /// Combine `current` with this step's sibling, giving the parent.
    pub fn merge<M: Merge<Hash = T>>(&self, current: &T) -> T {
        match self {
            Self::Left(sibling) => M::merge(sibling, current),
            Self::Right(sibling) => M::merge(current, sibling),
        }
    }

    /// Apply `f` to the sibling, keeping the orientation.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ProofElem<U> {
        match self {
            Self::Left(sibling) => ProofElem::Left(f(sibling)),
            Self::Right(sibling) => ProofElem::Right(f(sibling)),
        }
    }

    fn tag(&self) -> char {
        match self {
            Self::Left(_) => 'l',
            Self::Right(_) => 'r',
        }
    }
}

impl<T: AsRef<[u8]>> fmt::Display for ProofElem<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.tag(), hex::encode(self.sibling()))
    }
}

impl FromStr for ProofElem<Digest> {
    type Err = MerkleError;

    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.chars();
        let tag = chars.next();
        let sibling = || parse_hex_digest(chars.as_str());
        match tag {
            Some('l') => sibling().map(Self::Left),
            Some('r') => sibling().map(Self::Right),
            _ => Err(MerkleError::InvalidInput(format!(
                "proof step {:?} must be prefixed with either 'l' or 'r'",
                s
            ))),
        }
    }
}

/// Parse a 64 character hex string into a digest.
pub fn parse_hex_digest(s: &str) -> Result<Digest> {
    let mut digest = [0u8; DIGEST_LEN];
    hex::decode_to_slice(s, &mut digest).map_err(|e| {
        MerkleError::InvalidInput(format!(
            "expected {} hex encoded bytes, got {:?}: {}",
            DIGEST_LEN, s, e
        ))
    })?;
    Ok(digest)
}

/// Format a proof as space separated text steps.
pub fn proof_to_text<T: AsRef<[u8]>>(proof: &[ProofElem<T>]) -> String {
    proof
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse whitespace separated text steps into a proof.
pub fn proof_from_text(s: &str) -> Result<Proof<Digest>> {
    s.split_whitespace().map(str::parse).collect()
}

/// Encode a proof to bytes using bincode.
pub fn encode_proof(proof: &[ProofElem<Digest>]) -> Result<Vec<u8>> {
    let config = bincode::config::standard().with_big_endian();
    bincode::encode_to_vec(proof, config)
        .map_err(|e| MerkleError::InvalidProof(format!("encode error: {}", e)))
}

/// Decode a proof from bytes produced by [`encode_proof`].
///
/// Rejects trailing bytes and proofs longer than [`MAX_PROOF_STEPS`].
pub fn decode_proof(bytes: &[u8]) -> Result<Proof<Digest>> {
    let config = bincode::config::standard()
        .with_big_endian()
        .with_limit::<MAX_ENCODED_PROOF_BYTES>();
    let (proof, consumed): (Proof<Digest>, _) = bincode::decode_from_slice(bytes, config)
        .map_err(|e| MerkleError::InvalidProof(format!("decode error: {}", e)))?;
    if consumed != bytes.len() {
        return Err(MerkleError::InvalidProof(format!(
            "{} trailing bytes after proof",
            bytes.len() - consumed
        )));
    }
    if proof.len() > MAX_PROOF_STEPS {
        return Err(MerkleError::InvalidProof(format!(
            "proof has {} steps, at most {} are possible",
            proof.len(),
            MAX_PROOF_STEPS
        )));
    }
    Ok(proof)
}
