//! The pieces shared by the trees in this crate.
//!
//! The AVL and plain BST engines both store their keys in a [`Node`] that owns its two subtrees.
//! The only difference between them is the augmentation `A` each node carries: the AVL tree caches
//! a subtree height (`usize`) while the plain BST carries nothing (`()`). The red-black engine keeps
//! its nodes in an arena instead (see [`crate::rbt`]), but all three trees hand out read-only
//! handles implementing [`TreeNode`], so traversals and renderers only need to be written once.
//!
//! # Examples
//!
//! ```
//! use treemaker::avl::AvlTree;
//! use treemaker::node;
//!
//! let tree: AvlTree<_> = [3, 1, 2].into_iter().collect();
//!
//! assert_eq!(node::inorder(tree.root()), vec![&1, &2, &3]);
//! assert_eq!(node::depth(tree.root()), 2);
//! ```

use std::cmp::Ordering;

/// Which child of its parent a subtree hangs from. Rotations are described by the side the pivot
/// moves down to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    /// The left (smaller keys) child.
    Left,
    /// The right (larger keys) child.
    Right,
}

impl Side {
    /// The mirror image of this side.
    pub fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

pub(crate) type Link<K, A> = Option<Box<Node<K, A>>>;

/// A node that exclusively owns its children. `A` is the per-tree augmentation: a cached height for
/// the AVL tree and `()` for the plain BST.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node<K, A> {
    pub(crate) key: K,
    pub(crate) left: Link<K, A>,
    pub(crate) right: Link<K, A>,
    pub(crate) aug: A,
}

impl<K, A> Node<K, A> {
    pub(crate) fn new_boxed(key: K, aug: A) -> Box<Self> {
        Box::new(Self {
            key,
            left: None,
            right: None,
            aug,
        })
    }

    /// The key stored in this node.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// The root of the left subtree, if there is one.
    pub fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    /// The root of the right subtree, if there is one.
    pub fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    /// Walks down from this node looking for `key`.
    pub(crate) fn find(&self, key: &K) -> Option<&Self>
    where
        K: Ord,
    {
        let mut current = Some(self);
        while let Some(node) = current {
            current = match key.cmp(&node.key) {
                Ordering::Less => node.left(),
                Ordering::Equal => return Some(node),
                Ordering::Greater => node.right(),
            };
        }
        None
    }
}

/// Tears a subtree down one node at a time. Dropping a `Box<Node>` directly recurses once per
/// level, which a degenerate tree turns into one stack frame per key.
pub(crate) fn dismantle<K, A>(root: Link<K, A>) {
    let mut stack: Vec<Box<Node<K, A>>> = root.into_iter().collect();
    while let Some(mut node) = stack.pop() {
        stack.extend(node.left.take());
        stack.extend(node.right.take());
    }
}

/// A cheap, copyable, read-only handle to a node of one of the trees. This is the whole surface a
/// renderer gets to see: the key and the two children. Tree specific data (colors, heights) is
/// available on the concrete handle types.
pub trait TreeNode<'a>: Copy {
    /// The key type of the tree.
    type Key: 'a;

    /// The key stored in this node.
    fn key(self) -> &'a Self::Key;

    /// The root of the left subtree, if there is one.
    fn left(self) -> Option<Self>;

    /// The root of the right subtree, if there is one.
    fn right(self) -> Option<Self>;

    /// The child on the given side.
    fn child(self, side: Side) -> Option<Self> {
        match side {
            Side::Left => self.left(),
            Side::Right => self.right(),
        }
    }
}

impl<'a, K, A> TreeNode<'a> for &'a Node<K, A> {
    type Key = K;

    fn key(self) -> &'a K {
        &self.key
    }

    fn left(self) -> Option<Self> {
        self.left.as_deref()
    }

    fn right(self) -> Option<Self> {
        self.right.as_deref()
    }
}

/// Collects the keys below `root` in sorted order. The walk keeps its own stack so it is safe on
/// degenerate trees.
pub fn inorder<'a, N: TreeNode<'a>>(root: Option<N>) -> Vec<&'a N::Key> {
    let mut keys = Vec::new();
    let mut stack = Vec::new();
    let mut current = root;
    loop {
        while let Some(node) = current {
            stack.push(node);
            current = node.left();
        }
        let Some(node) = stack.pop() else {
            break;
        };
        keys.push(node.key());
        current = node.right();
    }
    keys
}

/// The number of levels below `root` (an empty tree has depth 0, a single node depth 1).
pub fn depth<'a, N: TreeNode<'a>>(root: Option<N>) -> usize {
    let mut deepest = 0;
    let mut stack: Vec<(N, usize)> = root.into_iter().map(|n| (n, 1)).collect();
    while let Some((node, level)) = stack.pop() {
        deepest = deepest.max(level);
        stack.extend(node.left().map(|n| (n, level + 1)));
        stack.extend(node.right().map(|n| (n, level + 1)));
    }
    deepest
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(key: i32) -> Link<i32, ()> {
        Some(Node::new_boxed(key, ()))
    }

    fn branch(key: i32, left: Link<i32, ()>, right: Link<i32, ()>) -> Link<i32, ()> {
        Some(Box::new(Node {
            key,
            left,
            right,
            aug: (),
        }))
    }

    #[test]
    fn inorder_visits_keys_sorted() {
        let root = branch(4, branch(2, leaf(1), leaf(3)), branch(6, None, leaf(7)));

        assert_eq!(inorder(root.as_deref()), vec![&1, &2, &3, &4, &6, &7]);
        assert_eq!(depth(root.as_deref()), 3);
    }

    #[test]
    fn empty_tree_has_no_keys() {
        let root: Link<i32, ()> = None;

        assert!(inorder(root.as_deref()).is_empty());
        assert_eq!(depth(root.as_deref()), 0);
    }

    #[test]
    fn find_walks_both_ways() {
        let root = branch(4, branch(2, leaf(1), leaf(3)), leaf(6));
        let root = root.as_deref().unwrap();

        assert_eq!(root.find(&3).map(|n| n.key), Some(3));
        assert_eq!(root.find(&6).map(|n| n.key), Some(6));
        assert!(root.find(&5).is_none());
    }

    #[test]
    fn dismantle_handles_long_spines() {
        let mut root = None;
        for key in 0..100_000 {
            root = branch(key, root, None);
        }
        dismantle(root);
    }

    #[test]
    fn opposite_sides() {
        assert_eq!(Side::Left.opposite(), Side::Right);
        assert_eq!(Side::Right.opposite(), Side::Left);
    }
}
