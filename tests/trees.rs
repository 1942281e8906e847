//! Exercises the three trees through their public API only.

use treemaker::avl::AvlTree;
use treemaker::bst::BinarySearchTree;
use treemaker::input;
use treemaker::layout::{layout, LayoutConfig};
use treemaker::node::{self, TreeNode};
use treemaker::rbt::{Color, RedBlackTree};

/// The keys a front end would send for "50, 30, 70, 20, 40, 60, 80, 10".
fn typed_keys() -> Vec<i64> {
    input::parse_keys("50, 30, 70, 20, 40, 60, 80, 10").unwrap()
}

#[test]
fn red_black_right_right_case() {
    let mut tree = RedBlackTree::new();
    for key in [10, 20, 30] {
        assert!(tree.insert(key));
    }

    let root = tree.root().unwrap();
    assert_eq!((*root.key(), root.color()), (20, Color::Black));
    let left = root.left().unwrap();
    let right = root.right().unwrap();
    assert_eq!((*left.key(), left.color()), (10, Color::Red));
    assert_eq!((*right.key(), right.color()), (30, Color::Red));
    assert_eq!(left.parent(), Some(root));
}

#[test]
fn avl_single_left_rotation() {
    let mut tree = AvlTree::new();
    for key in [10, 20, 30] {
        assert!(tree.insert(key));
    }

    let root = tree.root().unwrap();
    assert_eq!((*root.key(), root.height(), root.balance()), (20, 2, 0));
    let (left, right) = (root.left().unwrap(), root.right().unwrap());
    assert_eq!((*left.key(), left.height()), (10, 1));
    assert_eq!((*right.key(), right.height()), (30, 1));
}

#[test]
fn bst_delete_uses_successor() {
    let mut tree: BinarySearchTree<_> = [50, 30, 70, 20, 40].into_iter().collect();

    assert!(tree.delete(&30));

    assert_eq!(tree.keys(), vec![&20, &40, &50, &70]);
    assert_eq!(tree.root().unwrap().left().map(|n| *n.key()), Some(40));
}

#[test]
fn all_trees_agree_on_the_keys() {
    let keys = typed_keys();
    let rbt: RedBlackTree<_> = keys.iter().copied().collect();
    let avl: AvlTree<_> = keys.iter().copied().collect();
    let bst: BinarySearchTree<_> = keys.iter().copied().collect();

    let mut sorted = keys.clone();
    sorted.sort_unstable();
    let sorted: Vec<&i64> = sorted.iter().collect();

    assert_eq!(rbt.keys(), sorted);
    assert_eq!(avl.keys(), sorted);
    assert_eq!(bst.keys(), sorted);
    assert_eq!((rbt.len(), avl.len(), bst.len()), (8, 8, 8));
}

#[test]
fn duplicates_and_missing_keys_are_not_errors() {
    let mut rbt: RedBlackTree<_> = typed_keys().into_iter().collect();
    let mut avl: AvlTree<_> = typed_keys().into_iter().collect();
    let mut bst: BinarySearchTree<_> = typed_keys().into_iter().collect();
    let (rbt_before, avl_before, bst_before) = (rbt.clone(), avl.clone(), bst.clone());

    assert!(!rbt.insert(40));
    assert!(!avl.insert(40));
    assert!(!bst.insert(40));
    assert!(!rbt.delete(&45));
    assert!(!avl.delete(&45));
    assert!(!bst.delete(&45));

    assert_eq!(rbt, rbt_before);
    assert_eq!(avl, avl_before);
    assert_eq!(bst, bst_before);
}

#[test]
fn delete_then_reinsert_keeps_the_keys() {
    let keys = typed_keys();
    let mut rbt: RedBlackTree<_> = keys.iter().copied().collect();
    let mut avl: AvlTree<_> = keys.iter().copied().collect();
    let mut bst: BinarySearchTree<_> = keys.iter().copied().collect();

    for key in &keys {
        let expected: Vec<i64> = rbt.keys().into_iter().copied().collect();

        assert!(rbt.delete(key) && rbt.insert(*key));
        assert!(avl.delete(key) && avl.insert(*key));
        assert!(bst.delete(key) && bst.insert(*key));

        for got in [rbt.keys(), avl.keys(), bst.keys()] {
            assert_eq!(got.into_iter().copied().collect::<Vec<_>>(), expected);
        }
    }
}

#[test]
fn search_finds_handles() {
    let rbt: RedBlackTree<_> = typed_keys().into_iter().collect();
    let avl: AvlTree<_> = typed_keys().into_iter().collect();

    assert_eq!(rbt.search(&60).map(|n| *n.key()), Some(60));
    assert!(rbt.search(&65).is_none());
    assert!(avl.search(&10).is_some_and(|n| n.height() == 1));
    assert!(!avl.contains(&65));
}

#[test]
fn balanced_trees_stay_shallow_on_sorted_input() {
    let rbt: RedBlackTree<_> = (0..4096).collect();
    let avl: AvlTree<_> = (0..4096).collect();
    let bst: BinarySearchTree<_> = (0..512).collect();

    assert!(rbt.height() <= 2 * 13);
    assert!(avl.height() <= 13);
    assert_eq!(bst.height(), 512);
    assert_eq!(node::depth(bst.root()), 512);
}

#[test]
fn renderer_reads_through_handles() {
    let rbt: RedBlackTree<_> = [10, 20, 30].into_iter().collect();
    let config = LayoutConfig::default();
    let placed = layout(rbt.root(), &config);

    let red: Vec<i32> = placed
        .placements
        .iter()
        .filter(|p| p.node.color() == Color::Red)
        .map(|p| *TreeNode::key(p.node))
        .collect();
    assert_eq!(red, vec![10, 30]);
    assert_eq!(placed.placements[1].x, config.origin_x - config.offset);
}

#[test]
fn empty_trees() {
    let rbt = RedBlackTree::<i32>::default();
    let avl = AvlTree::<i32>::default();
    let bst = BinarySearchTree::<i32>::default();

    assert!(rbt.is_empty() && avl.is_empty() && bst.is_empty());
    assert!(rbt.root().is_none() && avl.root().is_none() && bst.root().is_none());
    assert_eq!((rbt.height(), avl.height(), bst.height()), (0, 0, 0));
}
