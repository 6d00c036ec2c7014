//! Test strategies and leaf generators.

use std::{cell::Cell, marker::PhantomData};

use crate::{Digest, Merge};

/// Builds a parenthesized label for every merge, exposing the tree shape.
pub(crate) struct Cat;

impl Merge for Cat {
    type Hash = String;

    fn merge(left: &String, right: &String) -> String {
        format!("({}{})", left, right)
    }
}

/// Wrapping byte sum. Order-insensitive, so only useful for totals.
pub(crate) struct Sum;

impl Merge for Sum {
    type Hash = u8;

    fn merge(left: &u8, right: &u8) -> u8 {
        left.wrapping_add(*right)
    }
}

thread_local! {
    static MERGE_CALLS: Cell<usize> = const { Cell::new(0) };
}

/// Wraps a strategy and counts its merges on the current thread.
pub(crate) struct Counting<M>(PhantomData<M>);

impl<M: Merge> Merge for Counting<M> {
    type Hash = M::Hash;

    fn leaf(leaf: &M::Hash) -> M::Hash {
        M::leaf(leaf)
    }

    fn merge(left: &M::Hash, right: &M::Hash) -> M::Hash {
        MERGE_CALLS.with(|calls| calls.set(calls.get() + 1));
        M::merge(left, right)
    }
}

/// Return and reset the merge count of the current thread.
pub(crate) fn take_merge_calls() -> usize {
    MERGE_CALLS.with(|calls| calls.replace(0))
}

/// Labels `"0"`, `"1"`, ... for [`Cat`] trees.
pub(crate) fn labels(count: usize) -> Vec<String> {
    (0..count).map(|i| i.to_string()).collect()
}

/// Distinct, deterministic 32-byte leaves.
pub(crate) fn hashed_leaves(count: usize) -> Vec<Digest> {
    (0..count as u64)
        .map(|i| *blake3::hash(&i.to_le_bytes()).as_bytes())
        .collect()
}
