//! Computes where a renderer should draw each node of a tree. The root sits at a fixed origin and
//! each level is drawn a fixed distance below its parent, with the horizontal offset to the
//! children halving at every level. Only the read-only [`TreeNode`] surface is used, so the same
//! layout works for all three trees.
//!
//! # Examples
//!
//! ```
//! use treemaker::layout::{layout, LayoutConfig};
//! use treemaker::rbt::RedBlackTree;
//!
//! let tree: RedBlackTree<_> = [10, 20, 30].into_iter().collect();
//! let placed = layout(tree.root(), &LayoutConfig::default());
//!
//! let coords: Vec<_> = placed.placements.iter().map(|p| (*p.node.key(), p.x, p.y)).collect();
//! assert_eq!(coords, vec![(20, 1000, 50), (10, 600, 150), (30, 1400, 150)]);
//! assert_eq!(placed.edges, vec![(0, 1), (0, 2)]);
//! ```

use crate::node::{self, Side, TreeNode};

/// The geometry of a layout. The defaults match a canvas that scrolls to fit wide trees.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayoutConfig {
    /// Horizontal position of the root.
    pub origin_x: i64,
    /// Vertical position of the root.
    pub origin_y: i64,
    /// Horizontal distance from the root to its children. Halved at every level below.
    pub offset: i64,
    /// Vertical distance between levels.
    pub level_gap: i64,
    /// Radius of a drawn node. Edges start and end on the circle.
    pub node_radius: i64,
    /// The canvas is never smaller than this in either direction.
    pub min_extent: i64,
    /// Canvas width per leaf slot of a full tree of the same height.
    pub column_width: i64,
    /// Canvas height per level.
    pub row_height: i64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            origin_x: 1000,
            origin_y: 50,
            offset: 400,
            level_gap: 100,
            node_radius: 28,
            min_extent: 2000,
            column_width: 150,
            row_height: 120,
        }
    }
}

impl LayoutConfig {
    /// The `(width, height)` of a canvas big enough for a tree with `levels` levels.
    pub fn extent(&self, levels: usize) -> (i64, i64) {
        // Past 2^62 the width saturates anyway.
        let columns = 1i64 << levels.min(62);
        let width = self.column_width.saturating_mul(columns);
        let height = self.row_height.saturating_mul(levels as i64);
        (width.max(self.min_extent), height.max(self.min_extent))
    }
}

/// Where a single node goes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement<N> {
    /// The node being placed.
    pub node: N,
    /// Horizontal center.
    pub x: i64,
    /// Vertical center.
    pub y: i64,
    /// Distance from the root (the root is at depth 0).
    pub depth: usize,
}

/// A laid out tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout<N> {
    /// Every node, in preorder (a node, then its left subtree, then its right subtree).
    pub placements: Vec<Placement<N>>,
    /// `(parent, child)` pairs of indices into `placements`.
    pub edges: Vec<(usize, usize)>,
    /// Canvas width needed to show the tree.
    pub width: i64,
    /// Canvas height needed to show the tree.
    pub height: i64,
}

impl<N> Layout<N> {
    /// The end points of an edge, shortened so the line meets the two circles instead of their
    /// centers.
    pub fn edge_endpoints(
        &self,
        edge: (usize, usize),
        config: &LayoutConfig,
    ) -> ((i64, i64), (i64, i64)) {
        let (parent, child) = (&self.placements[edge.0], &self.placements[edge.1]);
        (
            (parent.x, parent.y + config.node_radius),
            (child.x, child.y - config.node_radius),
        )
    }
}

/// Lays out the tree below `root`. The walk keeps its own stack so deep trees are fine.
pub fn layout<'a, N: TreeNode<'a>>(root: Option<N>, config: &LayoutConfig) -> Layout<N> {
    let (width, height) = config.extent(node::depth(root));
    let mut placements = Vec::new();
    let mut edges = Vec::new();

    struct Pending<N> {
        node: N,
        x: i64,
        y: i64,
        offset: i64,
        depth: usize,
        parent: Option<usize>,
    }

    let mut stack: Vec<Pending<N>> = root
        .into_iter()
        .map(|node| Pending {
            node,
            x: config.origin_x,
            y: config.origin_y,
            offset: config.offset,
            depth: 0,
            parent: None,
        })
        .collect();

    while let Some(pending) = stack.pop() {
        let index = placements.len();
        placements.push(Placement {
            node: pending.node,
            x: pending.x,
            y: pending.y,
            depth: pending.depth,
        });
        if let Some(parent) = pending.parent {
            edges.push((parent, index));
        }

        // Right first so the left subtree is placed first.
        for side in [Side::Right, Side::Left] {
            let Some(child) = pending.node.child(side) else {
                continue;
            };
            let x = match side {
                Side::Left => pending.x - pending.offset,
                Side::Right => pending.x + pending.offset,
            };
            stack.push(Pending {
                node: child,
                x,
                y: pending.y + config.level_gap,
                offset: pending.offset / 2,
                depth: pending.depth + 1,
                parent: Some(index),
            });
        }
    }

    Layout {
        placements,
        edges,
        width,
        height,
    }
}
