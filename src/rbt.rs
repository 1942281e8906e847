//! A Red-Black Tree. Every node is colored red or black such that
//!
//! 1. the root is black,
//! 2. a red node never has a red child, and
//! 3. every path from a node down to a leaf passes through the same number of black nodes.
//!
//! Together these bound the height of the tree by `2 * lg(N + 1)`.
//!
//! The nodes live in an arena and refer to each other (including their parent) by index, so the
//! parent links needed to walk back up during fixup don't turn into ownership cycles. Absent
//! children point at a single black sentinel, `NIL`, which is a reserved index rather than a
//! real slot. Insertion and deletion restore the coloring with iterative fixup loops that walk the
//! parent links.
//!
//! # Examples
//!
//! ```
//! use treemaker::rbt::{Color, RedBlackTree};
//!
//! let mut tree = RedBlackTree::new();
//! tree.insert(10);
//! tree.insert(20);
//! tree.insert(30);
//!
//! let root = tree.root().unwrap();
//! assert_eq!((*root.key(), root.color()), (20, Color::Black));
//! assert_eq!(root.left().map(|n| (*n.key(), n.color())), Some((10, Color::Red)));
//! assert_eq!(root.right().map(|n| (*n.key(), n.color())), Some((30, Color::Red)));
//!
//! assert!(tree.delete(&20));
//! assert!(!tree.delete(&20));
//! assert_eq!(tree.keys(), vec![&10, &30]);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::iter::FromIterator;
use std::mem;
use std::ptr;

use log::{debug, trace};

use crate::node::{self, Side, TreeNode};

/// Index of a node in the tree's arena.
type NodeId = usize;

/// The sentinel every absent child (and the root of an empty tree) points at. It is always black
/// and never stored in the arena.
const NIL: NodeId = usize::MAX;

/// The color of a red-black node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    /// New nodes start out red.
    Red,
    /// The root and the sentinel are always black.
    Black,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Slot<K> {
    key: K,
    left: NodeId,
    right: NodeId,
    /// `NIL` only for the root.
    parent: NodeId,
    color: Color,
}

/// A Red-Black Tree storing unique keys.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RedBlackTree<K> {
    slots: Vec<Slot<K>>,
    root: NodeId,
    /// The sentinel's parent. `transplant` points it at the node a deleted slot hung from so
    /// delete fixup can climb out of an empty child. It is reset once a delete finishes.
    nil_parent: NodeId,
}

impl<K> Default for RedBlackTree<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// A read-only handle to a node of a [`RedBlackTree`].
pub struct NodeRef<'a, K> {
    tree: &'a RedBlackTree<K>,
    id: NodeId,
}

impl<K> Clone for NodeRef<'_, K> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<K> Copy for NodeRef<'_, K> {}

impl<K> PartialEq for NodeRef<'_, K> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}
impl<K> Eq for NodeRef<'_, K> {}

impl<K: fmt::Debug> fmt::Debug for NodeRef<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("key", self.key())
            .field("color", &self.color())
            .finish()
    }
}

impl<'a, K> NodeRef<'a, K> {
    fn slot(self) -> &'a Slot<K> {
        &self.tree.slots[self.id]
    }

    /// The key stored in this node.
    pub fn key(self) -> &'a K {
        &self.slot().key
    }

    /// The color of this node.
    pub fn color(self) -> Color {
        self.slot().color
    }

    /// The root of the left subtree, if there is one.
    pub fn left(self) -> Option<Self> {
        self.tree.node(self.slot().left)
    }

    /// The root of the right subtree, if there is one.
    pub fn right(self) -> Option<Self> {
        self.tree.node(self.slot().right)
    }

    /// The node this one hangs from. `None` for the root.
    pub fn parent(self) -> Option<Self> {
        self.tree.node(self.slot().parent)
    }
}

impl<'a, K> TreeNode<'a> for NodeRef<'a, K> {
    type Key = K;

    fn key(self) -> &'a K {
        &self.slot().key
    }

    fn left(self) -> Option<Self> {
        self.tree.node(self.slot().left)
    }

    fn right(self) -> Option<Self> {
        self.tree.node(self.slot().right)
    }
}

impl<K> RedBlackTree<K> {
    /// Generates a new, empty `RedBlackTree`.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            root: NIL,
            nil_parent: NIL,
        }
    }

    /// The root node, or `None` for an empty tree.
    pub fn root(&self) -> Option<NodeRef<'_, K>> {
        self.node(self.root)
    }

    /// Whether the tree holds no keys.
    pub fn is_empty(&self) -> bool {
        self.root == NIL
    }

    /// The number of keys in the tree.
    pub fn len(&self) -> usize {
        self.slots.len()
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
        self.slots.clear();
        self.root = NIL;
        self.nil_parent = NIL;
    }

    fn node(&self, id: NodeId) -> Option<NodeRef<'_, K>> {
        (id != NIL).then_some(NodeRef { tree: self, id })
    }

    fn color(&self, id: NodeId) -> Color {
        if id == NIL {
            Color::Black
        } else {
            self.slots[id].color
        }
    }

    /// Recolors `id`. The sentinel stays black no matter what.
    fn set_color(&mut self, id: NodeId, color: Color) {
        if id != NIL {
            self.slots[id].color = color;
        }
    }

    fn parent(&self, id: NodeId) -> NodeId {
        if id == NIL {
            self.nil_parent
        } else {
            self.slots[id].parent
        }
    }

    fn set_parent(&mut self, id: NodeId, parent: NodeId) {
        if id == NIL {
            self.nil_parent = parent;
        } else {
            self.slots[id].parent = parent;
        }
    }

    fn child(&self, id: NodeId, side: Side) -> NodeId {
        if id == NIL {
            return NIL;
        }
        match side {
            Side::Left => self.slots[id].left,
            Side::Right => self.slots[id].right,
        }
    }

    fn set_child(&mut self, id: NodeId, side: Side, child: NodeId) {
        match side {
            Side::Left => self.slots[id].left = child,
            Side::Right => self.slots[id].right = child,
        }
    }

    /// Which child of its parent `id` is. `id` must have a parent.
    fn side_of(&self, id: NodeId) -> Side {
        if self.slots[self.parent(id)].left == id {
            Side::Left
        } else {
            Side::Right
        }
    }

    /// Points whatever referenced `old` from `parent` (or the root, if `parent` is `NIL`) at `new`.
    fn replace_child(&mut self, parent: NodeId, old: NodeId, new: NodeId) {
        if parent == NIL {
            self.root = new;
        } else if self.slots[parent].left == old {
            self.slots[parent].left = new;
        } else {
            self.slots[parent].right = new;
        }
    }

    /// Rotate `x` down towards `side`. Its child on the other side moves up into its place.
    ///
    /// ```text
    ///        x                          y
    ///       / \                        / \
    ///      a   y    rotate(x, Left)   x   c
    ///         / \   -------------->  / \
    ///        b   c                  a   b
    /// ```
    ///
    /// The sentinel's parent isn't touched even if `b` is `NIL`; delete fixup may still need it.
    fn rotate(&mut self, x: NodeId, side: Side) {
        let y = self.child(x, side.opposite());
        debug_assert_ne!(y, NIL, "rotating towards an empty child");

        let inner = self.child(y, side);
        self.set_child(x, side.opposite(), inner);
        if inner != NIL {
            self.slots[inner].parent = x;
        }

        let parent = self.slots[x].parent;
        self.slots[y].parent = parent;
        self.replace_child(parent, x, y);

        self.set_child(y, side, x);
        self.slots[x].parent = y;
    }

    /// Puts `v` where `u` hangs. `v` may be the sentinel, in which case the sentinel remembers
    /// `u`'s parent.
    fn transplant(&mut self, u: NodeId, v: NodeId) {
        let parent = self.slots[u].parent;
        self.replace_child(parent, u, v);
        self.set_parent(v, parent);
    }

    fn minimum(&self, mut id: NodeId) -> NodeId {
        while self.slots[id].left != NIL {
            id = self.slots[id].left;
        }
        id
    }

    fn swap_keys(&mut self, a: NodeId, b: NodeId) {
        let (low, high) = (a.min(b), a.max(b));
        let (head, tail) = self.slots.split_at_mut(high);
        mem::swap(&mut head[low].key, &mut tail[0].key);
    }

    /// Frees the slot of a node that is no longer linked into the tree. The last slot moves into
    /// the hole, so the links pointing at it are re-targeted.
    fn release(&mut self, id: NodeId) {
        let last = self.slots.len() - 1;
        if id != last {
            let Slot {
                left,
                right,
                parent,
                ..
            } = self.slots[last];
            self.replace_child(parent, last, id);
            if left != NIL {
                self.slots[left].parent = id;
            }
            if right != NIL {
                self.slots[right].parent = id;
            }
        }
        self.slots.swap_remove(id);
    }

    fn insert_fixup(&mut self, mut z: NodeId) {
        // The root's parent is the sentinel, which is black, so this stops at the root.
        while self.color(self.parent(z)) == Color::Red {
            let parent = self.parent(z);
            // A red parent isn't the root, so the grandparent exists.
            let grandparent = self.parent(parent);
            let side = self.side_of(parent);
            let uncle = self.child(grandparent, side.opposite());

            if self.color(uncle) == Color::Red {
                trace!("rbt insert fixup: red uncle, recoloring");
                self.set_color(parent, Color::Black);
                self.set_color(uncle, Color::Black);
                self.set_color(grandparent, Color::Red);
                z = grandparent;
                continue;
            }

            if z == self.child(parent, side.opposite()) {
                trace!("rbt insert fixup: triangle, rotating parent");
                z = parent;
                self.rotate(z, side);
            }

            trace!("rbt insert fixup: line, rotating grandparent");
            let parent = self.parent(z);
            let grandparent = self.parent(parent);
            self.set_color(parent, Color::Black);
            self.set_color(grandparent, Color::Red);
            self.rotate(grandparent, side.opposite());
        }
        let root = self.root;
        self.set_color(root, Color::Black);
    }

    /// Resolves the extra black pending at `x` after a black node was removed from above it.
    fn delete_fixup(&mut self, mut x: NodeId) {
        while x != self.root && self.color(x) == Color::Black {
            let parent = self.parent(x);
            let side = if self.slots[parent].left == x {
                Side::Left
            } else {
                Side::Right
            };
            let far = side.opposite();
            let mut sibling = self.child(parent, far);

            if self.color(sibling) == Color::Red {
                trace!("rbt delete fixup: red sibling, rotating parent");
                self.set_color(sibling, Color::Black);
                self.set_color(parent, Color::Red);
                self.rotate(parent, side);
                sibling = self.child(parent, far);
            }

            if self.color(self.child(sibling, Side::Left)) == Color::Black
                && self.color(self.child(sibling, Side::Right)) == Color::Black
            {
                trace!("rbt delete fixup: black sibling with black children, moving up");
                self.set_color(sibling, Color::Red);
                x = parent;
                continue;
            }

            if self.color(self.child(sibling, far)) == Color::Black {
                trace!("rbt delete fixup: near nephew red, rotating sibling");
                let near = self.child(sibling, side);
                self.set_color(near, Color::Black);
                self.set_color(sibling, Color::Red);
                self.rotate(sibling, far);
                sibling = self.child(parent, far);
            }

            trace!("rbt delete fixup: far nephew red, rotating parent");
            let parent_color = self.color(parent);
            self.set_color(sibling, parent_color);
            self.set_color(parent, Color::Black);
            let far_nephew = self.child(sibling, far);
            self.set_color(far_nephew, Color::Black);
            self.rotate(parent, side);
            x = self.root;
        }
        self.set_color(x, Color::Black);
    }
}

impl<K: Ord> RedBlackTree<K> {
    /// Inserts `key` unless it is already present, recoloring and rotating to keep the tree
    /// balanced. Returns whether the key was inserted.
    ///
    /// # Examples
    ///
    /// ```
    /// use treemaker::rbt::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// assert!(tree.insert(5));
    /// assert!(tree.insert(8));
    /// // repeat inserts aren't applied
    /// assert!(!tree.insert(5));
    /// ```
    pub fn insert(&mut self, key: K) -> bool {
        let mut parent = NIL;
        let mut side = Side::Left;
        let mut current = self.root;
        while current != NIL {
            parent = current;
            let slot = &self.slots[current];
            (current, side) = match key.cmp(&slot.key) {
                Ordering::Less => (slot.left, Side::Left),
                Ordering::Equal => {
                    debug!("rbt insert applied: false (len {})", self.len());
                    return false;
                }
                Ordering::Greater => (slot.right, Side::Right),
            };
        }

        let id = self.slots.len();
        self.slots.push(Slot {
            key,
            left: NIL,
            right: NIL,
            parent,
            color: Color::Red,
        });
        if parent == NIL {
            self.root = id;
        } else {
            self.set_child(parent, side, id);
        }

        self.insert_fixup(id);
        debug_assert_eq!(self.color(self.root), Color::Black);
        debug!("rbt insert applied: true (len {})", self.len());
        true
    }

    /// Deletes `key` from the tree, recoloring and rotating to keep the tree balanced. Returns
    /// `false`, leaving the tree untouched, if it wasn't there.
    ///
    /// # Examples
    ///
    /// ```
    /// use treemaker::rbt::RedBlackTree;
    ///
    /// let mut tree: RedBlackTree<_> = [5, 8].into_iter().collect();
    /// assert!(tree.delete(&5));
    /// assert!(!tree.contains(&5));
    /// // deleting a key that isn't in the tree reports so
    /// assert!(!tree.delete(&6));
    /// ```
    pub fn delete(&mut self, key: &K) -> bool {
        let target = self.find(key);
        if target == NIL {
            debug!("rbt delete found: false (len {})", self.len());
            return false;
        }

        // The node whose slot is vacated: the target itself if it has at most one child, else its
        // inorder successor, whose key moves up into the target.
        let slot = &self.slots[target];
        let vacated = if slot.left == NIL || slot.right == NIL {
            target
        } else {
            self.minimum(slot.right)
        };
        let slot = &self.slots[vacated];
        let x = if slot.left != NIL { slot.left } else { slot.right };
        let vacated_color = slot.color;

        self.transplant(vacated, x);
        if vacated != target {
            self.swap_keys(target, vacated);
        }
        if vacated_color == Color::Black {
            self.delete_fixup(x);
        }
        self.nil_parent = NIL;
        self.release(vacated);

        debug_assert_eq!(self.color(self.root), Color::Black);
        debug!("rbt delete found: true (len {})", self.len());
        true
    }

    /// Finds the node holding `key`.
    pub fn search(&self, key: &K) -> Option<NodeRef<'_, K>> {
        self.node(self.find(key))
    }

    /// Whether `key` is in the tree.
    pub fn contains(&self, key: &K) -> bool {
        self.find(key) != NIL
    }

    fn find(&self, key: &K) -> NodeId {
        let mut current = self.root;
        while current != NIL {
            let slot = &self.slots[current];
            current = match key.cmp(&slot.key) {
                Ordering::Less => slot.left,
                Ordering::Equal => return current,
                Ordering::Greater => slot.right,
            };
        }
        NIL
    }
}

impl<K: Ord> Extend<K> for RedBlackTree<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, keys: I) {
        for key in keys {
            self.insert(key);
        }
    }
}

impl<K: Ord> FromIterator<K> for RedBlackTree<K> {
    fn from_iter<I: IntoIterator<Item = K>>(keys: I) -> Self {
        let mut tree = Self::new();
        tree.extend(keys);
        tree
    }
}
