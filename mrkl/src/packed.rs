//! Byte buffer interface.
//!
//! Leaves arrive packed into one flat buffer: bytes `[32 * i, 32 * i + 32)`
//! are leaf `i`. These functions validate and split the buffer, then run the
//! tree operations with a 32-byte [`Merge`] strategy.

use crate::{DIGEST_LEN, Digest, Merge, MerkleError, Proof, ProofElem, Result};

/// Split a packed buffer into leaf digests.
///
/// Fails if the buffer is empty or its length is not a multiple of 32.
pub fn split_leaves(packed: &[u8]) -> Result<Vec<Digest>> {
    if packed.is_empty() {
        return Err(MerkleError::InvalidInput(
            "packed leaf buffer is empty".into(),
        ));
    }
    if packed.len() % DIGEST_LEN != 0 {
        return Err(MerkleError::InvalidInput(format!(
            "packed leaf buffer length {} is not a multiple of {}",
            packed.len(),
            DIGEST_LEN
        )));
    }
    packed.chunks_exact(DIGEST_LEN).map(to_digest).collect()
}

/// Concatenate digests into a packed buffer.
pub fn pack_leaves(leaves: &[Digest]) -> Vec<u8> {
    leaves.concat()
}

/// Interpret exactly 32 bytes as a digest.
pub fn to_digest(bytes: &[u8]) -> Result<Digest> {
    bytes.try_into().map_err(|_| {
        MerkleError::InvalidInput(format!(
            "digest must be {} bytes, got {}",
            DIGEST_LEN,
            bytes.len()
        ))
    })
}

/// Root of the packed leaves.
pub fn compute_root<M: Merge<Hash = Digest>>(packed: &[u8]) -> Result<Digest> {
    crate::compute_root::<M>(&split_leaves(packed)?)
}

/// Inclusion proof for leaf `leaf_index` of the packed leaves.
pub fn create_proof<M: Merge<Hash = Digest>>(
    leaf_index: usize,
    packed: &[u8],
) -> Result<Proof<Digest>> {
    crate::create_proof::<M>(leaf_index, &split_leaves(packed)?)
}

/// Root reconstructed from a raw leaf digest and its proof.
pub fn verify_proof<M: Merge<Hash = Digest>>(
    leaf: &[u8],
    proof: &[ProofElem<Digest>],
) -> Result<Digest> {
    Ok(crate::verify_proof::<M>(&to_digest(leaf)?, proof))
}

/// Root and every proof of the packed leaves, in one pass.
pub fn construct<M: Merge<Hash = Digest>>(packed: &[u8]) -> Result<(Digest, Vec<Proof<Digest>>)> {
    crate::construct::<M>(&split_leaves(packed)?)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::{Blake2s256Merge, test_utils::hashed_leaves};

    #[test]
    fn test_split_roundtrip() {
        let leaves = hashed_leaves(4);
        let packed = pack_leaves(&leaves);
        assert_eq!(packed.len(), 128);
        assert_eq!(&packed[32..64], &leaves[1]);
        assert_eq!(split_leaves(&packed).expect("split"), leaves);
    }

    #[test]
    fn test_split_rejects_empty() {
        assert_matches!(split_leaves(&[]), Err(MerkleError::InvalidInput(_)));
    }

    #[test]
    fn test_split_rejects_partial_digest() {
        for len in [1, 31, 33, 63, 65] {
            assert_matches!(
                split_leaves(&vec![0u8; len]),
                Err(MerkleError::InvalidInput(msg)) if msg.contains("not a multiple"),
                "length {} should be rejected",
                len
            );
        }
    }

    #[test]
    fn test_to_digest_width() {
        assert_eq!(to_digest(&[5u8; 32]).expect("32 bytes"), [5u8; 32]);
        assert_matches!(to_digest(&[5u8; 31]), Err(MerkleError::InvalidInput(_)));
        assert_matches!(to_digest(&[]), Err(MerkleError::InvalidInput(_)));
    }

    #[test]
    fn test_packed_operations_match_slice_operations() {
        let leaves = hashed_leaves(9);
        let packed = pack_leaves(&leaves);

        let root = compute_root::<Blake2s256Merge>(&packed).expect("root");
        assert_eq!(root, crate::compute_root::<Blake2s256Merge>(&leaves).expect("root"));

        let (batch_root, proofs) = construct::<Blake2s256Merge>(&packed).expect("construct");
        assert_eq!(batch_root, root);
        for (index, leaf) in leaves.iter().enumerate() {
            let proof = create_proof::<Blake2s256Merge>(index, &packed).expect("proof");
            assert_eq!(proof, proofs[index]);
            assert_eq!(
                verify_proof::<Blake2s256Merge>(leaf, &proof).expect("verify"),
                root
            );
        }
    }

    #[test]
    fn test_packed_index_out_of_range() {
        let packed = pack_leaves(&hashed_leaves(3));
        assert_matches!(
            create_proof::<Blake2s256Merge>(3, &packed),
            Err(MerkleError::IndexOutOfRange { index: 3, leaf_count: 3 })
        );
    }

    #[test]
    fn test_packed_verify_rejects_short_leaf() {
        assert_matches!(
            verify_proof::<Blake2s256Merge>(&[0u8; 16], &[]),
            Err(MerkleError::InvalidInput(_))
        );
    }

    #[test]
    fn test_packed_empty_buffer_is_invalid_input() {
        assert_matches!(
            compute_root::<Blake2s256Merge>(&[]),
            Err(MerkleError::InvalidInput(_))
        );
        assert_matches!(
            create_proof::<Blake2s256Merge>(0, &[]),
            Err(MerkleError::InvalidInput(_))
        );
        assert_matches!(
            construct::<Blake2s256Merge>(&[]),
            Err(MerkleError::InvalidInput(_))
        );
    }
}
