/// Node combination strategy for a Merkle tree.
///
/// Implementations are usually zero-sized marker types; all methods are
/// associated functions so the strategy is fixed at compile time.
///
/// Leaves handed to the tree are expected to be hashed already. `leaf` may
/// transform them once more before they enter level 0, which is how a
/// strategy separates leaf hashes from internal node hashes:
///
/// ```
/// use mrkl::Merge;
///
/// /// Concatenates node labels, handy for looking at tree shapes.
/// struct Labels;
///
/// impl Merge for Labels {
///     type Hash = String;
///
///     fn merge(left: &String, right: &String) -> String {
///         format!("({left}{right})")
///     }
/// }
///
/// let leaves: Vec<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
/// assert_eq!(mrkl::compute_root::<Labels>(&leaves).unwrap(), "((ab)c)");
/// ```
pub trait Merge {
    /// Node value type.
    type Hash: Clone + Eq;

    /// Map a caller supplied leaf into the tree. Identity by default.
    fn leaf(leaf: &Self::Hash) -> Self::Hash {
        leaf.clone()
    }

    /// Combine a left and a right child into their parent.
    fn merge(left: &Self::Hash, right: &Self::Hash) -> Self::Hash;
}
