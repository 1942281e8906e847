//! This crate exposes three in-memory ordered-key trees, mostly for
//! educational purposes: a Red-Black Tree, an AVL tree and a plain
//! unbalanced Binary Search Tree to measure them against.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored keys. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` will typically store
//! some sort of key (the key that was inserted, for example) and will
//! sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    key less than its own key.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    key greater than its own key.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching for a key takes `O(height)` (where `height` is defined as the longest
//! path from the root `Node` to a leaf `Node`). Nothing stops a plain BST from
//! degenerating into a list ([`bst`]), so the other two trees restore a bound of
//! `O(lg N)` on the height after every change: [`rbt`] by recoloring and rotating
//! along parent links, [`avl`] by rotating on the way back up a recursive descent.
//!
//! All three store each key at most once. Inserting a key that is already present
//! and deleting a key that isn't are both reported through a `bool` and leave the
//! tree exactly as it was. Trees can be read back through the [`node::TreeNode`]
//! handles their `root()` returns, which is all [`layout`] needs to place them on
//! a canvas. [`input`] parses the comma-separated key lists a front end collects.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod avl;
pub mod bst;
pub mod input;
pub mod layout;
pub mod node;
pub mod rbt;

#[cfg(test)]
mod test;
