// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collapse, expand, and active-path transitions on a [`LiveTree`].
//!
//! All operations take a [`NodeId`] and silently ignore stale identifiers,
//! like the setters on the box tree do.

use alloc::{vec, vec::Vec};

use crate::tree::{LiveNode, LiveTree};
use crate::types::{NodeId, NodeState};

/// Picks which child an auto-expanded path descends into next.
///
/// The host owns the policy; the engine only drives the
/// expand → mark → advance loop (see [`LiveTree::auto_expand`]). Closures of
/// the shape `Fn(&LiveTree, &LiveNode) -> Option<NodeId>` implement this trait.
///
/// ```rust
/// use understory_tidy_tree::{ChildSelector, LiveNode, LiveTree, NodeId};
///
/// // Always follow the last child.
/// let last = |_: &LiveTree, node: &LiveNode| -> Option<NodeId> { node.children().last().copied() };
/// # fn takes(_: &dyn ChildSelector) {}
/// # takes(&last);
/// ```
pub trait ChildSelector {
    /// Return the child of `node` to descend into, or `None` to stop.
    ///
    /// Returning an identifier that is not a child of `node` stops the walk.
    fn select(&self, tree: &LiveTree, node: &LiveNode) -> Option<NodeId>;
}

impl<F> ChildSelector for F
where
    F: Fn(&LiveTree, &LiveNode) -> Option<NodeId>,
{
    fn select(&self, tree: &LiveTree, node: &LiveNode) -> Option<NodeId> {
        self(tree, node)
    }
}

impl LiveTree {
    /// Collapse `id` and its whole subtree.
    ///
    /// Every node below `id` (visible or not) is collapsed and loses its
    /// active mark, so re-expanding later reveals one level at a time and no
    /// stale path markers.
    pub fn collapse(&mut self, id: NodeId) {
        if !self.is_alive(id) {
            return;
        }
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let node = self.node_mut(current);
            node.state.insert(NodeState::COLLAPSED);
            node.state.remove(NodeState::ACTIVE);
            stack.extend_from_slice(node.children());
        }
    }

    /// Expand `id`. Children keep whatever collapse state they had.
    pub fn expand(&mut self, id: NodeId) {
        if let Some(node) = self.get_mut(id) {
            node.state.remove(NodeState::COLLAPSED);
        }
    }

    /// Mark `id` as lying on an active path.
    pub fn mark_active(&mut self, id: NodeId) {
        if let Some(node) = self.get_mut(id) {
            node.state.insert(NodeState::ACTIVE);
        }
    }

    /// Clear the active mark of `id`.
    pub fn unmark_active(&mut self, id: NodeId) {
        if let Some(node) = self.get_mut(id) {
            node.state.remove(NodeState::ACTIVE);
        }
    }

    /// Collapse every visible node at the same depth as `target`, except `target`.
    pub fn collapse_neighbors(&mut self, target: NodeId) {
        let Some(depth) = self.get(target).map(LiveNode::depth) else {
            return;
        };
        let neighbors: Vec<NodeId> = self
            .find_all_at_depth(depth)
            .into_iter()
            .filter(|id| *id != target)
            .collect();
        tracing::trace!(?target, count = neighbors.len(), "collapsing neighbors");
        for id in neighbors {
            self.collapse(id);
        }
    }

    /// Expand a path chosen by `selector`, starting at `start`.
    ///
    /// `start` is expanded and marked active. Then, repeatedly, the selector
    /// picks a child of the current node; that child is marked active and, if
    /// it has children of its own, expanded and made current. The walk ends
    /// when the selector returns `None`, returns something that is not a
    /// child of the current node, or picks a leaf (which is marked but never
    /// expanded).
    ///
    /// Nothing happens if `start` has no children.
    pub fn auto_expand<S>(&mut self, start: NodeId, selector: &S)
    where
        S: ChildSelector + ?Sized,
    {
        if !self.get(start).is_some_and(LiveNode::has_children) {
            return;
        }
        self.expand(start);
        self.mark_active(start);

        let mut current = start;
        loop {
            let node = self.node(current);
            let Some(next) = selector.select(self, node) else {
                break;
            };
            if !node.children().contains(&next) {
                tracing::warn!(?current, ?next, "selector returned a non-child, stopping");
                break;
            }
            self.mark_active(next);
            if !self.node(next).has_children() {
                break;
            }
            tracing::trace!(?next, "auto-expanding");
            self.expand(next);
            current = next;
        }
    }

    /// Set `collapsed = depth >= cap` on every currently visible node.
    ///
    /// Nodes already hidden keep their state.
    pub fn cap_visible_depth(&mut self, cap: u32) {
        let visible: Vec<(NodeId, u32)> = self
            .iter_visible()
            .map(|node| (node.id(), node.depth()))
            .collect();
        for (id, depth) in visible {
            self.node_mut(id)
                .state
                .set(NodeState::COLLAPSED, depth >= cap);
        }
        tracing::debug!(cap, "applied initial depth");
    }
}
