use std::collections::BTreeSet;

use quickcheck::{Arbitrary, Gen};

use crate::avl::AvlTree;
use crate::bst::BinarySearchTree;
use crate::rbt::RedBlackTree;

/// An enum for the various kinds of "things" to do to
/// binary search trees in a quicktest.
#[derive(Copy, Clone, Debug)]
pub(crate) enum Op<K> {
    /// Insert the K into the tree
    Insert(K),
    /// Delete the K from the tree
    Delete(K),
    /// Compare the sorted keys
    Keys,
}

impl<K> Arbitrary for Op<K>
where
    K: Arbitrary,
{
    /// Tells quickcheck how to randomly choose an operation
    fn arbitrary(g: &mut Gen) -> Self {
        match g.choose(&[0, 1, 2]).unwrap() {
            0 => Op::Insert(K::arbitrary(g)),
            1 => Op::Delete(K::arbitrary(g)),
            2 => Op::Keys,
            _ => unreachable!(),
        }
    }
}

/// The operations every tree in the crate supports, so one driver can fuzz all of them.
pub(crate) trait OrderedSet<K> {
    fn insert(&mut self, key: K) -> bool;
    fn delete(&mut self, key: &K) -> bool;
    fn keys(&self) -> Vec<&K>;
    fn len(&self) -> usize;
}

macro_rules! ordered_set {
    ($tree:ident) => {
        impl<K: Ord> OrderedSet<K> for $tree<K> {
            fn insert(&mut self, key: K) -> bool {
                $tree::insert(self, key)
            }

            fn delete(&mut self, key: &K) -> bool {
                $tree::delete(self, key)
            }

            fn keys(&self) -> Vec<&K> {
                $tree::keys(self)
            }

            fn len(&self) -> usize {
                $tree::len(self)
            }
        }
    };
}

ordered_set!(RedBlackTree);
ordered_set!(AvlTree);
ordered_set!(BinarySearchTree);

/// Applies a set of operations to a tree and a `BTreeSet`.
/// This way we can ensure that after a random smattering of inserts
/// and deletes we have the same set of keys in both. Inserts of keys that
/// are already present and deletes of missing keys must leave the tree
/// exactly as it was. `check` runs after every operation.
pub(crate) fn run_ops<K, T>(ops: &[Op<K>], tree: &mut T, check: impl Fn(&T)) -> bool
where
    K: Ord + Clone,
    T: OrderedSet<K> + Clone + PartialEq,
{
    let mut set = BTreeSet::new();
    for op in ops {
        match op {
            Op::Insert(k) => {
                let before = tree.clone();
                let inserted = tree.insert(k.clone());
                if inserted != set.insert(k.clone()) || (!inserted && *tree != before) {
                    return false;
                }
            }
            Op::Delete(k) => {
                let before = tree.clone();
                let found = tree.delete(k);
                if found != set.remove(k) || (!found && *tree != before) {
                    return false;
                }
            }
            Op::Keys => {
                if !tree.keys().into_iter().eq(set.iter()) {
                    return false;
                }
            }
        }
        check(tree);
        if tree.len() != set.len() {
            return false;
        }
    }

    tree.keys().into_iter().eq(set.iter())
}
