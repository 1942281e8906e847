//! A self-balancing Binary Search Tree (specifically, an AVL tree). Every node caches the height of
//! its subtree and the heights of any node's two subtrees never differ by more than one, which
//! keeps the depth of the tree logarithmic in the number of keys.
//!
//! Mutations are written in a value-returning style: each recursive step takes ownership of a
//! subtree and hands back its (possibly new) root, rebalancing on the way back up.
//!
//! # Examples
//!
//! ```
//! use treemaker::avl::AvlTree;
//!
//! let mut tree = AvlTree::new();
//! tree.insert(10);
//! tree.insert(20);
//! tree.insert(30);
//!
//! // Three ascending keys trigger a single left rotation.
//! let root = tree.root().unwrap();
//! assert_eq!(*root.key(), 20);
//! assert_eq!(root.height(), 2);
//! assert_eq!(root.balance(), 0);
//! ```

use std::cmp::Ordering;
use std::iter::FromIterator;

use log::{debug, trace};

use crate::node::{self, Link, Node, Side};

/// A node of an [`AvlTree`]. The augmentation is the height of the subtree rooted here.
pub type AvlNode<K> = Node<K, usize>;

impl<K> Node<K, usize> {
    /// How many levels are in the subtree rooted at this node. A node with no children has a
    /// height of 1.
    pub fn height(&self) -> usize {
        self.aug
    }

    /// The height of the left subtree minus the height of the right subtree.
    pub fn balance(&self) -> isize {
        height(&self.left) as isize - height(&self.right) as isize
    }

    fn fix_height(&mut self) {
        self.aug = height(&self.left).max(height(&self.right)) + 1;
    }
}

fn height<K>(link: &Link<K, usize>) -> usize {
    link.as_ref().map_or(0, |n| n.aug)
}

/// An AVL tree storing unique keys.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AvlTree<K> {
    root: Link<K, usize>,
    len: usize,
}

impl<K> Default for AvlTree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> AvlTree<K> {
    /// Generates a new, empty `AvlTree`.
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// The root node, or `None` for an empty tree.
    pub fn root(&self) -> Option<&AvlNode<K>> {
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

    /// The number of levels in the tree. This is the cached height of the root.
    pub fn height(&self) -> usize {
        height(&self.root)
    }

    /// All keys in ascending order.
    pub fn keys(&self) -> Vec<&K> {
        node::inorder(self.root())
    }

    /// Removes every key.
    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }
}

impl<K: Ord> AvlTree<K> {
    /// Inserts `key` unless it is already present, rebalancing the tree if needed. Returns whether
    /// the key was inserted.
    ///
    /// # Examples
    ///
    /// ```
    /// use treemaker::avl::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    ///
    /// assert!(tree.insert(1));
    /// assert!(!tree.insert(1));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K) -> bool {
        let (root, descent) = insert(self.root.take(), key);
        self.root = Some(root);
        if descent.inserted {
            self.len += 1;
        }
        debug!("avl insert applied: {} (len {})", descent.inserted, self.len);
        descent.inserted
    }

    /// Deletes `key` from the tree, rebalancing as needed. Returns `false`, leaving the tree
    /// untouched, if it wasn't there.
    ///
    /// # Examples
    ///
    /// ```
    /// use treemaker::avl::AvlTree;
    ///
    /// let mut tree: AvlTree<_> = (1..=7).collect();
    ///
    /// assert!(tree.delete(&4));
    /// assert!(!tree.delete(&4));
    /// assert_eq!(tree.keys(), vec![&1, &2, &3, &5, &6, &7]);
    /// ```
    pub fn delete(&mut self, key: &K) -> bool {
        let mut found = false;
        self.root = delete(self.root.take(), key, &mut found);
        if found {
            self.len -= 1;
        }
        debug!("avl delete found: {found} (len {})", self.len);
        found
    }

    /// Finds the node holding `key`.
    pub fn search(&self, key: &K) -> Option<&AvlNode<K>> {
        self.root().and_then(|root| root.find(key))
    }

    /// Whether `key` is in the tree.
    pub fn contains(&self, key: &K) -> bool {
        self.search(key).is_some()
    }
}

impl<K: Ord> Extend<K> for AvlTree<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, keys: I) {
        for key in keys {
            self.insert(key);
        }
    }
}

impl<K: Ord> FromIterator<K> for AvlTree<K> {
    fn from_iter<I: IntoIterator<Item = K>>(keys: I) -> Self {
        let mut tree = Self::new();
        tree.extend(keys);
        tree
    }
}

/// What an insertion into a subtree did.
struct Descent {
    /// Whether a new node was created somewhere below.
    inserted: bool,
    /// Which way the key went at the root of the returned subtree. `None` when the root itself is
    /// the new node or held the key already.
    side: Option<Side>,
}

fn insert<K: Ord>(link: Link<K, usize>, key: K) -> (Box<AvlNode<K>>, Descent) {
    let Some(mut node) = link else {
        let descent = Descent {
            inserted: true,
            side: None,
        };
        return (Node::new_boxed(key, 1), descent);
    };

    let (side, below) = match key.cmp(&node.key) {
        Ordering::Less => {
            let (left, below) = insert(node.left.take(), key);
            node.left = Some(left);
            (Side::Left, below)
        }
        // Nothing below changes so neither does this node's height.
        Ordering::Equal => {
            let descent = Descent {
                inserted: false,
                side: None,
            };
            return (node, descent);
        }
        Ordering::Greater => {
            let (right, below) = insert(node.right.take(), key);
            node.right = Some(right);
            (Side::Right, below)
        }
    };

    node.fix_height();
    let balance = node.balance();
    // The key's path through this node and its child picks the case.
    let node = match (side, below.side) {
        (Side::Left, Some(Side::Left)) if balance > 1 => {
            trace!("avl insert: left-left, rotating right");
            rotate_right(node)
        }
        (Side::Right, Some(Side::Right)) if balance < -1 => {
            trace!("avl insert: right-right, rotating left");
            rotate_left(node)
        }
        (Side::Left, Some(Side::Right)) if balance > 1 => {
            trace!("avl insert: left-right, rotating left then right");
            node.left = node.left.take().map(rotate_left);
            rotate_right(node)
        }
        (Side::Right, Some(Side::Left)) if balance < -1 => {
            trace!("avl insert: right-left, rotating right then left");
            node.right = node.right.take().map(rotate_right);
            rotate_left(node)
        }
        _ => node,
    };
    check_balance(&node);

    let descent = Descent {
        inserted: below.inserted,
        side: Some(side),
    };
    (node, descent)
}

fn delete<K: Ord>(link: Link<K, usize>, key: &K, found: &mut bool) -> Link<K, usize> {
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
    Some(rebalance(node))
}

/// Removes the smallest node of a subtree, rebalancing every level it passes through. Returns what
/// is left of the subtree and the key.
fn remove_min<K>(mut node: Box<AvlNode<K>>) -> (Link<K, usize>, K) {
    match node.left.take() {
        None => {
            let Node { key, right, .. } = *node;
            (right, key)
        }
        Some(left) => {
            let (rest, min) = remove_min(left);
            node.left = rest;
            (Some(rebalance(node)), min)
        }
    }
}

/// Restores the AVL invariant at `node` after a deletion below it. The removed key may be gone
/// from the subtree by now, so the case is picked from the taller child's own balance.
fn rebalance<K>(mut node: Box<AvlNode<K>>) -> Box<AvlNode<K>> {
    node.fix_height();
    let balance = node.balance();
    let node = if balance > 1 {
        if node.left.as_ref().map_or(0, |n| n.balance()) >= 0 {
            trace!("avl delete: left-left, rotating right");
            rotate_right(node)
        } else {
            trace!("avl delete: left-right, rotating left then right");
            node.left = node.left.take().map(rotate_left);
            rotate_right(node)
        }
    } else if balance < -1 {
        if node.right.as_ref().map_or(0, |n| n.balance()) <= 0 {
            trace!("avl delete: right-right, rotating left");
            rotate_left(node)
        } else {
            trace!("avl delete: right-left, rotating right then left");
            node.right = node.right.take().map(rotate_right);
            rotate_left(node)
        }
    } else {
        node
    };
    check_balance(&node);
    node
}

/// In debug builds, assert that `node` caches the right height and satisfies the AVL invariant.
fn check_balance<K>(node: &AvlNode<K>) {
    if cfg!(debug_assertions) {
        assert_eq!(
            node.aug,
            height(&node.left).max(height(&node.right)) + 1
        );
        assert!(node.balance().abs() <= 1);
    }
}

/// Rotate `old_root` to the right. This moves the left child up vertically and `old_root` down
/// vertically. Used to rebalance the tree when the left child is too tall, so a node without a left
/// child is handed back unchanged.
///
/// ```text
///      old_root                 new_root
///       /     \                 /     \
///   new_root   z   rotate ->   x    old_root
///    /  \                              /  \
///   x    y                            y    z
/// ```
fn rotate_right<K>(mut old_root: Box<AvlNode<K>>) -> Box<AvlNode<K>> {
    let Some(mut new_root) = old_root.left.take() else {
        return old_root;
    };
    old_root.left = new_root.right.take();
    old_root.fix_height();

    new_root.right = Some(old_root);
    new_root.fix_height();
    new_root
}

/// The mirror image of [`rotate_right`]: the right child moves up and `old_root` becomes its left
/// child.
fn rotate_left<K>(mut old_root: Box<AvlNode<K>>) -> Box<AvlNode<K>> {
    let Some(mut new_root) = old_root.right.take() else {
        return old_root;
    };
    old_root.right = new_root.left.take();
    old_root.fix_height();

    new_root.left = Some(old_root);
    new_root.fix_height();
    new_root
}
