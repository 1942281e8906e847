//! A plain, unbalanced Binary Search Tree. It is the baseline the self-balancing trees are measured
//! against: no rotations, no bookkeeping, and a depth that is entirely at the mercy of the
//! insertion order. Inserting sorted keys produces a linked list.
//!
//! Insert and delete recurse once per level. On a degenerate tree that is once per key, so very
//! large adversarial inputs can exhaust the stack. Dropping the tree is iterative and does not have
//! this problem.
//!
//! # Examples
//!
//! ```
//! use treemaker::bst::BinarySearchTree;
//!
//! let mut tree = BinarySearchTree::new();
//!
//! assert!(tree.insert(50));
//! assert!(tree.insert(30));
//! assert!(tree.insert(70));
//!
//! // Inserting a key twice isn't applied.
//! assert!(!tree.insert(30));
//!
//! assert!(tree.delete(&30));
//! // Deleting a missing key leaves the tree alone.
//! assert!(!tree.delete(&30));
//!
//! assert_eq!(tree.keys(), vec![&50, &70]);
//! ```

use std::cmp::Ordering;
use std::iter::FromIterator;

use log::debug;

use crate::node::{self, Link, Node};

/// A node of a [`BinarySearchTree`]. It carries no augmentation.
pub type BstNode<K> = Node<K, ()>;

/// An unbalanced Binary Search Tree storing unique keys.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinarySearchTree<K> {
    root: Link<K, ()>,
    len: usize,
}

impl<K> Default for BinarySearchTree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Drop for BinarySearchTree<K> {
    fn drop(&mut self) {
        node::dismantle(self.root.take());
    }
}

impl<K> BinarySearchTree<K> {
    /// Generates a new, empty `BinarySearchTree`.
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// The root node, or `None` for an empty tree.
    pub fn root(&self) -> Option<&BstNode<K>> {
        self.root.as_deref()
    }

    /// Whether the tree holds no keys.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The number of keys in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// The number of levels in the tree.
    pub fn height(&self) -> usize {
        node::depth(self.root())
    }

    /// All keys in ascending order.
    pub fn keys(&self) -> Vec<&K> {
        node::inorder(self.root())
    }

    /// Removes every key.
    pub fn clear(&mut self) {
        node::dismantle(self.root.take());
        self.len = 0;
    }
}

impl<K: Ord> BinarySearchTree<K> {
    /// Inserts `key` unless it is already present. Returns whether the key was inserted.
    pub fn insert(&mut self, key: K) -> bool {
        let mut inserted = false;
        self.root = Some(insert(self.root.take(), key, &mut inserted));
        if inserted {
            self.len += 1;
        }
        debug!("bst insert applied: {inserted} (len {})", self.len);
        inserted
    }

    /// Deletes `key` from the tree. Returns `false`, leaving the tree untouched, if it wasn't there.
    pub fn delete(&mut self, key: &K) -> bool {
        let mut found = false;
        self.root = delete(self.root.take(), key, &mut found);
        if found {
            self.len -= 1;
        }
        debug!("bst delete found: {found} (len {})", self.len);
        found
    }

    /// Finds the node holding `key`.
    pub fn search(&self, key: &K) -> Option<&BstNode<K>> {
        self.root().and_then(|root| root.find(key))
    }

    /// Whether `key` is in the tree.
    pub fn contains(&self, key: &K) -> bool {
        self.search(key).is_some()
    }
}

impl<K: Ord> Extend<K> for BinarySearchTree<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, keys: I) {
        for key in keys {
            self.insert(key);
        }
    }
}

impl<K: Ord> FromIterator<K> for BinarySearchTree<K> {
    fn from_iter<I: IntoIterator<Item = K>>(keys: I) -> Self {
        let mut tree = Self::new();
        tree.extend(keys);
        tree
    }
}

fn insert<K: Ord>(link: Link<K, ()>, key: K, inserted: &mut bool) -> Box<BstNode<K>> {
    let Some(mut node) = link else {
        *inserted = true;
        return Node::new_boxed(key, ());
    };
    match key.cmp(&node.key) {
        Ordering::Less => node.left = Some(insert(node.left.take(), key, inserted)),
        Ordering::Equal => {}
        Ordering::Greater => node.right = Some(insert(node.right.take(), key, inserted)),
    }
    node
}

fn delete<K: Ord>(link: Link<K, ()>, key: &K, found: &mut bool) -> Link<K, ()> {
    let mut node = link?;
    match key.cmp(&node.key) {
        Ordering::Less => node.left = delete(node.left.take(), key, found),
        Ordering::Greater => node.right = delete(node.right.take(), key, found),
        Ordering::Equal => {
            *found = true;
            match (node.left.take(), node.right.take()) {
                (None, right) => return right,
                (left, None) => return left,
                // Two children: the inorder successor (smallest key on the right) takes this
                // node's place.
                (left, Some(right)) => {
                    let (rest, successor) = remove_min(right);
                    node.key = successor;
                    node.left = left;
                    node.right = rest;
                }
            }
        }
    }
    Some(node)
}

/// Removes the smallest node of a subtree. Returns what is left of the subtree and the key.
fn remove_min<K>(mut node: Box<BstNode<K>>) -> (Link<K, ()>, K) {
    match node.left.take() {
        None => {
            let Node { key, right, .. } = *node;
            (right, key)
        }
        Some(left) => {
            let (rest, min) = remove_min(left);
            node.left = rest;
            (Some(node), min)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::TreeNode;

    fn keys_of(tree: &BinarySearchTree<i32>) -> Vec<i32> {
        tree.keys().into_iter().copied().collect()
    }

    #[test]
    fn test_insert() {
        let mut tree = BinarySearchTree::new();
        assert!(tree.is_empty());

        assert!(tree.insert(1));

        assert_eq!(tree.search(&1).map(|n| *n.key()), Some(1));
        assert_eq!(tree.len(), 1);
        assert!(!tree.is_empty());
    }

    #[test]
    fn duplicate_insert_is_not_applied() {
        let mut tree: BinarySearchTree<_> = [5, 3, 8].into_iter().collect();
        let before = tree.clone();

        assert!(!tree.insert(3));

        assert_eq!(tree, before);
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn delete_missing_key_is_a_no_op() {
        let mut tree: BinarySearchTree<_> = [5, 3, 8].into_iter().collect();
        let before = tree.clone();

        assert!(!tree.delete(&4));

        assert_eq!(tree, before);
        assert!(!BinarySearchTree::<i32>::new().delete(&4));
    }

    #[test]
    fn delete_two_children_promotes_successor() {
        let mut tree: BinarySearchTree<_> = [50, 30, 70, 20, 40].into_iter().collect();

        assert!(tree.delete(&30));

        assert_eq!(keys_of(&tree), vec![20, 40, 50, 70]);
        let root = tree.root().unwrap();
        let promoted = root.left().unwrap();
        assert_eq!(*promoted.key(), 40);
        assert_eq!(promoted.left().map(|n| *n.key()), Some(20));
        assert!(promoted.right().is_none());
    }

    #[test]
    fn delete_with_deeper_successor() {
        let mut tree: BinarySearchTree<_> = [5, 3, 8, 2, 6, 9, 7].into_iter().collect();

        assert!(tree.delete(&5));

        let root = tree.root().unwrap();
        assert_eq!(*root.key(), 6);
        // 6's old right child moves up into its slot.
        assert_eq!(root.right().and_then(|n| n.left()).map(|n| *n.key()), Some(7));
        assert_eq!(keys_of(&tree), vec![2, 3, 6, 7, 8, 9]);
    }

    #[test]
    fn delete_with_one_child() {
        let mut tree: BinarySearchTree<_> = [5, 3, 7, 9].into_iter().collect();

        assert!(tree.delete(&7));
        assert_eq!(tree.root().and_then(|n| n.right()).map(|n| *n.key()), Some(9));

        assert!(tree.delete(&3));
        assert!(tree.delete(&5));
        assert_eq!(tree.root().map(|n| *n.key()), Some(9));
        assert_eq!(keys_of(&tree), vec![9]);
    }

    #[test]
    fn delete_root() {
        let mut tree = BinarySearchTree::new();
        tree.insert(5);

        assert!(tree.delete(&5));
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
    }

    #[test]
    fn sorted_input_degenerates() {
        let tree: BinarySearchTree<_> = (0..64).collect();

        assert_eq!(tree.height(), 64);
        assert!(tree.root().unwrap().child(crate::node::Side::Left).is_none());
    }

    #[test]
    fn clear_empties_the_tree() {
        let mut tree: BinarySearchTree<_> = (0..10).collect();
        tree.clear();

        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert!(tree.keys().is_empty());
    }
}
