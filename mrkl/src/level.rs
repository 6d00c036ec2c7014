use crate::{Merge, ProofElem};

/// Reduce one tree level to the level above it.
///
/// Consecutive pairs are merged left to right. When the level has an odd
/// length the last node has no sibling and is carried into the last slot of
/// the next level unchanged. The result has `level.len().div_ceil(2)` nodes.
pub fn reduce_level<M: Merge>(level: &[M::Hash]) -> Vec<M::Hash> {
    let pairs = level.chunks_exact(2);
    let carried = pairs.remainder().first().cloned();
    let mut next = Vec::with_capacity(level.len().div_ceil(2));
    next.extend(pairs.map(|pair| M::merge(&pair[0], &pair[1])));
    next.extend(carried);
    next
}

/// The proof step contributed by the node at `position`, or `None` if the
/// node is carried.
///
/// `position` must be within `level`.
pub(crate) fn sibling_step<T: Clone>(level: &[T], position: usize) -> Option<ProofElem<T>> {
    if position % 2 == 1 {
        Some(ProofElem::Left(level[position - 1].clone()))
    } else {
        level.get(position + 1).cloned().map(ProofElem::Right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{Cat, labels};

    #[test]
    fn test_reduce_even_level() {
        let next = reduce_level::<Cat>(&labels(4));
        assert_eq!(next, vec!["(01)", "(23)"]);
    }

    #[test]
    fn test_reduce_odd_level_carries_last() {
        let next = reduce_level::<Cat>(&labels(5));
        assert_eq!(next, vec!["(01)", "(23)", "4"]);
    }

    #[test]
    fn test_reduce_single_node() {
        assert_eq!(reduce_level::<Cat>(&labels(1)), vec!["0"]);
    }

    #[test]
    fn test_reduce_halves_length() {
        for k in 1..40 {
            assert_eq!(reduce_level::<Cat>(&labels(k)).len(), k.div_ceil(2));
        }
    }

    #[test]
    fn test_sibling_step_orientation() {
        let level = labels(5);
        assert_eq!(sibling_step(&level, 0), Some(ProofElem::Right("1".to_string())));
        assert_eq!(sibling_step(&level, 3), Some(ProofElem::Left("2".to_string())));
        assert_eq!(sibling_step(&level, 4), None);
    }
}
