// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tidy tree layout over the visible part of a [`LiveTree`].
//!
//! The placement is the linear-time Reingold–Tilford variant by Buchheim,
//! Jünger, and Leipert: a post-order walk assigns preliminary breadth
//! positions and merges subtree contours (using threads and shifts), and a
//! pre-order walk accumulates the modifiers into final positions. The root
//! ends up at breadth `0`.
//!
//! Coordinates follow the usual tree convention: `x` runs across siblings
//! (breadth) and `y` runs down the levels (depth). A horizontal renderer
//! draws `(y, x)`; this is why [`Orientation::Horizontal`] swaps the node
//! size before spacing nodes.

use alloc::{vec, vec::Vec};

use kurbo::{Point, Rect, Size};
use smallvec::SmallVec;

use crate::restrict::restricted_offset;
use crate::tree::LiveTree;
use crate::types::{Attributes, NodeId, NodeShape, NodeStyles};

/// Direction in which the tree grows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Orientation {
    /// Root on the left, levels grow to the right.
    #[default]
    Horizontal,
    /// Root at the top, levels grow downward.
    Vertical,
}

/// Minimum spacing between neighbors on the same level, in node widths.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Separation {
    /// Spacing between nodes that share a parent.
    pub siblings: f64,
    /// Spacing between nodes with different parents.
    pub non_siblings: f64,
}

impl Default for Separation {
    fn default() -> Self {
        Self {
            siblings: 1.0,
            non_siblings: 2.0,
        }
    }
}

/// Geometry settings for [`compute_layout`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct LayoutConfig {
    /// Growth direction.
    pub orientation: Orientation,
    /// Footprint of one node: `width` along the x screen axis, `height` along y.
    pub node_size: Size,
    /// Neighbor spacing.
    pub separation: Separation,
    /// If set, place every level at `depth * depth_factor` instead of using
    /// the node size.
    pub depth_factor: Option<f64>,
    /// Keep horizontal trees from spreading vertically (see
    /// [`restricted_offset`](crate::restricted_offset)). Ignored for vertical trees.
    pub bound_height: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            orientation: Orientation::Horizontal,
            node_size: Size::new(140.0, 140.0),
            separation: Separation::default(),
            depth_factor: None,
            bound_height: false,
        }
    }
}

impl LayoutConfig {
    /// Node size as (breadth, depth) spacing for the configured orientation.
    fn spacing(&self) -> (f64, f64) {
        match self.orientation {
            Orientation::Horizontal => (self.node_size.height, self.node_size.width),
            Orientation::Vertical => (self.node_size.width, self.node_size.height),
        }
    }
}

/// A positioned visible node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutNode {
    /// The live node.
    pub id: NodeId,
    /// Its parent, `None` for the root.
    pub parent: Option<NodeId>,
    /// Breadth (`x`) and depth (`y`) position.
    pub position: Point,
    /// Level, `0` for the root.
    pub depth: u32,
}

/// A parent → child edge between two visible nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Link {
    /// Parent end.
    pub source: NodeId,
    /// Child end.
    pub target: NodeId,
}

/// Result of a layout pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TreeLayout {
    /// Visible nodes in depth-first pre-order (root first).
    pub nodes: Vec<LayoutNode>,
    /// One edge per non-root node, in node order.
    pub links: Vec<Link>,
}

impl TreeLayout {
    /// The laid-out node for `id`, if it is visible.
    pub fn get(&self, id: NodeId) -> Option<&LayoutNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// Position of `id`, if it is visible.
    pub fn position_of(&self, id: NodeId) -> Option<Point> {
        self.get(id).map(|node| node.position)
    }

    /// Bounding box of all node positions (not of their footprints).
    pub fn bounds(&self) -> Option<Rect> {
        let mut points = self.nodes.iter().map(|node| node.position);
        let first = points.next()?;
        Some(points.fold(Rect::from_points(first, first), |acc, p| {
            acc.union_pt(p)
        }))
    }

    /// Join positions with the live payload, ready for a renderer.
    pub fn views<'a>(&'a self, tree: &'a LiveTree) -> impl Iterator<Item = NodeView<'a>> + 'a {
        self.nodes.iter().filter_map(move |laid| {
            let node = tree.get(laid.id)?;
            Some(NodeView {
                id: laid.id,
                name: node.name(),
                position: laid.position,
                depth: laid.depth,
                attributes: node.attributes(),
                collapsed: node.is_collapsed(),
                active: node.is_active(),
                styles: node.styles(),
                shape: node.shape(),
            })
        })
    }
}

/// Everything a renderer needs to draw one node.
#[derive(Clone, Copy, Debug)]
pub struct NodeView<'a> {
    /// Stable identifier, suitable as a list key.
    pub id: NodeId,
    /// Display name.
    pub name: &'a str,
    /// Breadth (`x`) and depth (`y`) position.
    pub position: Point,
    /// Level, `0` for the root.
    pub depth: u32,
    /// Attributes shown next to the node.
    pub attributes: &'a Attributes,
    /// Whether the node hides its children.
    pub collapsed: bool,
    /// Whether the node lies on an auto-expanded path.
    pub active: bool,
    /// Style overrides.
    pub styles: Option<&'a NodeStyles>,
    /// Shape hint.
    pub shape: Option<&'a NodeShape>,
}

/// Lay out the visible nodes of `tree`.
///
/// An empty tree yields an empty layout. Nothing here can fail: all
/// arithmetic is total over finite inputs.
///
/// ```rust
/// use kurbo::{Point, Size};
/// use understory_tidy_tree::{LayoutConfig, LiveTree, Orientation, RawNode, compute_layout};
///
/// let raw = RawNode::new("root")
///     .with_child(RawNode::new("a"))
///     .with_child(RawNode::new("b"));
/// let tree = LiveTree::from_raw(&raw).unwrap();
/// let config = LayoutConfig {
///     orientation: Orientation::Vertical,
///     node_size: Size::new(100.0, 50.0),
///     ..LayoutConfig::default()
/// };
///
/// let layout = compute_layout(&tree, &config);
/// assert_eq!(layout.nodes[0].position, Point::new(0.0, 0.0));
/// assert_eq!(layout.nodes[1].position, Point::new(-50.0, 50.0));
/// assert_eq!(layout.nodes[2].position, Point::new(50.0, 50.0));
/// assert_eq!(layout.links.len(), 2);
/// ```
pub fn compute_layout(tree: &LiveTree, config: &LayoutConfig) -> TreeLayout {
    let Some(mut walker) = Walker::new(tree, config.separation) else {
        return TreeLayout::default();
    };
    walker.place();

    let (breadth, level) = config.spacing();
    for slot in &mut walker.slots {
        slot.x *= breadth;
        slot.y = f64::from(slot.depth) * config.depth_factor.unwrap_or(level);
    }

    if config.bound_height && config.orientation == Orientation::Horizontal {
        // Pre-order: a parent is always adjusted before its children read it.
        for i in 1..walker.slots.len() {
            let Some(p) = walker.slots[i].parent else {
                continue;
            };
            let parent = &walker.slots[p];
            if let Some(x) = restricted_offset(
                parent.children.len(),
                walker.slots[i].number,
                walker.slots[i].depth,
                parent.x,
                config.node_size.height,
            ) {
                walker.slots[i].x = x;
            }
        }
    }

    walker.into_layout()
}

/// Per-node scratch state for the Buchheim walks.
#[derive(Clone, Debug)]
struct Slot {
    id: NodeId,
    parent: Option<usize>,
    children: SmallVec<[usize; 4]>,
    /// Index among the parent's (visible) children.
    number: usize,
    depth: u32,
    prelim: f64,
    modifier: f64,
    shift: f64,
    change: f64,
    thread: Option<usize>,
    ancestor: usize,
    /// Default ancestor while apportioning this node's children.
    default_ancestor: Option<usize>,
    x: f64,
    y: f64,
}

#[derive(Debug)]
struct Walker {
    /// Visible nodes in pre-order; index 0 is the root.
    slots: Vec<Slot>,
    separation: Separation,
}

impl Walker {
    fn new(tree: &LiveTree, separation: Separation) -> Option<Self> {
        let root = tree.root()?;
        let mut slots: Vec<Slot> = Vec::with_capacity(tree.len());
        let mut stack = vec![(root, None, 0_usize)];
        while let Some((id, parent, number)) = stack.pop() {
            let index = slots.len();
            let node = tree.node(id);
            slots.push(Slot {
                id,
                parent,
                children: SmallVec::new(),
                number,
                depth: node.depth(),
                prelim: 0.0,
                modifier: 0.0,
                shift: 0.0,
                change: 0.0,
                thread: None,
                ancestor: index,
                default_ancestor: None,
                x: 0.0,
                y: 0.0,
            });
            if let Some(p) = parent {
                slots[p].children.push(index);
            }
            for (n, &child) in node.visible_children().iter().enumerate().rev() {
                stack.push((child, Some(index), n));
            }
        }
        Some(Self { slots, separation })
    }

    fn place(&mut self) {
        for v in self.post_order() {
            self.first_walk(v);
        }
        // Pre-order, so parents already carry their final modifier.
        for v in 0..self.slots.len() {
            let parent_modifier = match self.slots[v].parent {
                Some(p) => self.slots[p].modifier,
                // Shifts the whole tree so the root lands on 0.
                None => -self.slots[v].prelim,
            };
            let slot = &mut self.slots[v];
            slot.x = slot.prelim + parent_modifier;
            slot.modifier += parent_modifier;
        }
    }

    /// Left-to-right post-order.
    fn post_order(&self) -> Vec<usize> {
        let mut order = Vec::with_capacity(self.slots.len());
        let mut stack = vec![0];
        while let Some(v) = stack.pop() {
            order.push(v);
            stack.extend(self.slots[v].children.iter().copied());
        }
        order.reverse();
        order
    }

    fn first_walk(&mut self, v: usize) {
        let parent = self.slots[v].parent;
        let left_sibling = match (parent, self.slots[v].number) {
            (Some(p), n) if n > 0 => Some(self.slots[p].children[n - 1]),
            _ => None,
        };

        if let (Some(&first), Some(&last)) =
            (self.slots[v].children.first(), self.slots[v].children.last())
        {
            self.execute_shifts(v);
            let midpoint = (self.slots[first].prelim + self.slots[last].prelim) / 2.0;
            if let Some(w) = left_sibling {
                let prelim = self.slots[w].prelim + self.separation(v, w);
                self.slots[v].prelim = prelim;
                self.slots[v].modifier = prelim - midpoint;
            } else {
                self.slots[v].prelim = midpoint;
            }
        } else if let Some(w) = left_sibling {
            self.slots[v].prelim = self.slots[w].prelim + self.separation(v, w);
        }

        if let Some(p) = parent {
            let default = self.slots[p]
                .default_ancestor
                .unwrap_or(self.slots[p].children[0]);
            let ancestor = self.apportion(v, left_sibling, default);
            self.slots[p].default_ancestor = Some(ancestor);
        }
    }

    /// Push the subtree of `v` right until it clears everything to its left.
    fn apportion(&mut self, v: usize, left_sibling: Option<usize>, mut ancestor: usize) -> usize {
        let Some(w) = left_sibling else {
            return ancestor;
        };
        let Some(p) = self.slots[v].parent else {
            return ancestor;
        };
        // Inner/outer contours on the right (p = plus) and left (m = minus) side.
        let mut vop = v;
        let mut vom = self.slots[p].children[0];
        let mut sip = self.slots[v].modifier;
        let mut sop = self.slots[v].modifier;
        let mut sim = self.slots[w].modifier;
        let mut som = self.slots[vom].modifier;

        let mut next_vim = self.right(w);
        let mut next_vip = self.left(v);
        while let (Some(vim), Some(vip)) = (next_vim, next_vip) {
            // Outer contours are at least as deep as the inner ones.
            vom = self.left(vom).unwrap_or(vom);
            vop = self.right(vop).unwrap_or(vop);
            self.slots[vop].ancestor = v;
            let shift = self.slots[vim].prelim + sim - self.slots[vip].prelim - sip
                + self.separation(vim, vip);
            if shift > 0.0 {
                let from = self.ancestor_of(vim, v, ancestor);
                self.move_subtree(from, v, shift);
                sip += shift;
                sop += shift;
            }
            sim += self.slots[vim].modifier;
            sip += self.slots[vip].modifier;
            som += self.slots[vom].modifier;
            sop += self.slots[vop].modifier;
            next_vim = self.right(vim);
            next_vip = self.left(vip);
        }

        if let Some(vim) = next_vim
            && self.right(vop).is_none()
        {
            self.slots[vop].thread = Some(vim);
            self.slots[vop].modifier += sim - sop;
        }
        if let Some(vip) = next_vip
            && self.left(vom).is_none()
        {
            self.slots[vom].thread = Some(vip);
            self.slots[vom].modifier += sip - som;
            ancestor = v;
        }
        ancestor
    }

    fn left(&self, v: usize) -> Option<usize> {
        self.slots[v].children.first().copied().or(self.slots[v].thread)
    }

    fn right(&self, v: usize) -> Option<usize> {
        self.slots[v].children.last().copied().or(self.slots[v].thread)
    }

    fn ancestor_of(&self, vim: usize, v: usize, default: usize) -> usize {
        let candidate = self.slots[vim].ancestor;
        if self.slots[candidate].parent == self.slots[v].parent {
            candidate
        } else {
            default
        }
    }

    fn move_subtree(&mut self, wm: usize, wp: usize, shift: f64) {
        let subtrees = (self.slots[wp].number - self.slots[wm].number) as f64;
        let change = shift / subtrees;
        self.slots[wp].change -= change;
        self.slots[wp].shift += shift;
        self.slots[wm].change += change;
        self.slots[wp].prelim += shift;
        self.slots[wp].modifier += shift;
    }

    /// Spread the shifts recorded by `move_subtree` over the children of `v`.
    fn execute_shifts(&mut self, v: usize) {
        let mut shift = 0.0;
        let mut change = 0.0;
        let children = self.slots[v].children.clone();
        for &w in children.iter().rev() {
            let slot = &mut self.slots[w];
            slot.prelim += shift;
            slot.modifier += shift;
            change += slot.change;
            shift += slot.shift + change;
        }
    }

    fn separation(&self, a: usize, b: usize) -> f64 {
        if self.slots[a].parent == self.slots[b].parent {
            self.separation.siblings
        } else {
            self.separation.non_siblings
        }
    }

    fn into_layout(self) -> TreeLayout {
        let slots = self.slots;
        let nodes = slots
            .iter()
            .map(|slot| LayoutNode {
                id: slot.id,
                parent: slot.parent.map(|p| slots[p].id),
                position: Point::new(slot.x, slot.y),
                depth: slot.depth,
            })
            .collect();
        let links = slots
            .iter()
            .filter_map(|slot| {
                slot.parent.map(|p| Link {
                    source: slots[p].id,
                    target: slot.id,
                })
            })
            .collect();
        TreeLayout { nodes, links }
    }
}
