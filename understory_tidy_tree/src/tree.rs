// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Live tree arena: slots, identity assignment, and lookups.

use alloc::{string::String, vec, vec::Vec};
use smallvec::SmallVec;

use crate::error::TreeError;
use crate::reconcile::{ExternalBinding, apply_external};
use crate::types::{Attributes, NodeId, NodeShape, NodeState, NodeStyles, RawNode};

pub(crate) type ChildList = SmallVec<[NodeId; 4]>;

/// A node of the live tree.
///
/// Live nodes own their payload (name, attributes, renderer hints) and carry
/// the interaction state. Structure is expressed through [`NodeId`]s; the
/// parent link is a plain back-reference and never owns anything.
#[derive(Clone, Debug)]
pub struct LiveNode {
    id: NodeId,
    parent: Option<NodeId>,
    children: ChildList,
    depth: u32,
    pub(crate) state: NodeState,
    pub(crate) name: String,
    pub(crate) attributes: Attributes,
    pub(crate) shape: Option<NodeShape>,
    pub(crate) styles: Option<NodeStyles>,
}

impl LiveNode {
    /// Stable identifier of this node.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Display name (also the merge key).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attributes shown next to the node.
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Renderer shape hint, if any.
    pub fn shape(&self) -> Option<&NodeShape> {
        self.shape.as_ref()
    }

    /// Style overrides, if any.
    pub fn styles(&self) -> Option<&NodeStyles> {
        self.styles.as_ref()
    }

    /// Parent node, or `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Distance from the root (the root has depth 0).
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// All children, regardless of collapse state.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Children exposed to layout: empty while collapsed, otherwise all of them.
    pub fn visible_children(&self) -> &[NodeId] {
        if self.is_collapsed() {
            &[]
        } else {
            &self.children
        }
    }

    /// Returns `true` if the node has at least one child.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Interaction state flags.
    pub fn state(&self) -> NodeState {
        self.state
    }

    /// Returns `true` if the node hides its descendants.
    pub fn is_collapsed(&self) -> bool {
        self.state.contains(NodeState::COLLAPSED)
    }

    /// Returns `true` if the node lies on an auto-expanded path.
    pub fn is_active(&self) -> bool {
        self.state.contains(NodeState::ACTIVE)
    }
}

/// Arena holding one generation of live nodes under a single optional root.
///
/// Nodes are created in bulk from a [`RawNode`] by [`LiveTree::assign`] and
/// are addressed by [`NodeId`]. Replacing the contents frees every slot;
/// reused slots get a new generation, so identifiers from the previous
/// generation never resolve again.
///
/// ## Example
///
/// ```rust
/// use understory_tidy_tree::{LiveTree, RawNode};
///
/// let raw = RawNode::new("root").with_child(RawNode::new("leaf"));
/// let tree = LiveTree::from_raw(&raw).unwrap();
///
/// let root = tree.root().unwrap();
/// assert_eq!(tree.len(), 2);
/// assert_eq!(tree.children_of(root).len(), 1);
/// ```
pub struct LiveTree {
    /// slots
    nodes: Vec<Option<LiveNode>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
    root: Option<NodeId>,
}

impl core::fmt::Debug for LiveTree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LiveTree")
            .field("nodes_total", &self.nodes.len())
            .field("nodes_alive", &self.len())
            .field("free_list", &self.free_list.len())
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

impl Default for LiveTree {
    fn default() -> Self {
        Self::new()
    }
}

impl LiveTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            root: None,
        }
    }

    /// Materialize a raw tree with fresh identities and everything expanded.
    pub fn from_raw(raw: &RawNode) -> Result<Self, TreeError> {
        let mut tree = Self::new();
        tree.assign(raw, None)?;
        Ok(tree)
    }

    /// Replace the whole contents with a freshly materialized copy of `raw`.
    ///
    /// Every node gets a new identifier and starts expanded and inactive.
    /// With a `binding`, the externally controlled fields of each raw node are
    /// mirrored into its live state right away.
    ///
    /// Input is validated before anything is touched: on error the previous
    /// contents stay in place.
    pub fn assign(
        &mut self,
        raw: &RawNode,
        binding: Option<ExternalBinding>,
    ) -> Result<NodeId, TreeError> {
        validate(raw)?;
        self.clear();
        let root = self.insert_subtree(raw, None, 0, binding);
        self.root = Some(root);
        tracing::debug!(nodes = self.len(), ?root, "assigned live tree");
        Ok(root)
    }

    /// Drop every node. Identifiers handed out so far become stale.
    pub fn clear(&mut self) {
        for (idx, slot) in self.nodes.iter_mut().enumerate() {
            if slot.take().is_some() {
                self.free_list.push(idx);
            }
        }
        self.root = None;
    }

    /// The root node, if the tree is not empty.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.nodes.len() - self.free_list.len()
    }

    /// Returns `true` if the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns true if `id` refers to a live node.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Look up a live node by identifier, visible or not.
    pub fn get(&self, id: NodeId) -> Option<&LiveNode> {
        self.nodes
            .get(id.idx())
            .and_then(|slot| slot.as_ref())
            .filter(|node| node.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut LiveNode> {
        self.nodes
            .get_mut(id.idx())
            .and_then(|slot| slot.as_mut())
            .filter(|node| node.id == id)
    }

    /// Access a node that is known to be live; panics if `id` is stale.
    pub(crate) fn node(&self, id: NodeId) -> &LiveNode {
        self.get(id).expect("dangling NodeId")
    }

    /// Returns the parent of a node if live, or `None` for the root or stale ids.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(LiveNode::parent)
    }

    /// Get all children of a node, or an empty slice if the node is stale.
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(LiveNode::children).unwrap_or(&[])
    }

    /// Depth-first pre-order walk over every node, collapsed branches included.
    pub fn iter(&self) -> Walk<'_> {
        Walk::new(self, false)
    }

    /// Depth-first pre-order walk over the nodes currently exposed to layout.
    pub fn iter_visible(&self) -> Walk<'_> {
        Walk::new(self, true)
    }

    /// Find a node among the visible nodes.
    ///
    /// The walk stops at the first match. Nodes hidden below a collapsed
    /// ancestor are not found, which mirrors what a user can click on.
    pub fn find_by_id(&self, id: NodeId) -> Option<&LiveNode> {
        self.iter_visible().find(|node| node.id == id)
    }

    /// Collect the visible nodes at `depth`, in depth-first order.
    ///
    /// Collapsed branches are never descended into.
    pub fn find_all_at_depth(&self, depth: u32) -> Vec<NodeId> {
        self.iter_visible()
            .filter(|node| node.depth == depth)
            .map(LiveNode::id)
            .collect()
    }

    fn insert_subtree(
        &mut self,
        raw: &RawNode,
        parent: Option<NodeId>,
        depth: u32,
        binding: Option<ExternalBinding>,
    ) -> NodeId {
        let id = self.alloc(LiveNode {
            id: NodeId::new(0, 0),
            parent,
            children: ChildList::new(),
            depth,
            state: NodeState::empty(),
            name: raw.name.clone(),
            attributes: raw.attributes.clone(),
            shape: raw.shape.clone(),
            styles: raw.styles.clone(),
        });
        if let Some(binding) = binding {
            apply_external(self.node_mut(id), raw, binding);
        }
        for child in &raw.children {
            let child_id = self.insert_subtree(child, Some(id), depth + 1, binding);
            self.node_mut(id).children.push(child_id);
        }
        id
    }

    fn alloc(&mut self, mut node: LiveNode) -> NodeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            (idx, generation)
        } else {
            self.generations.push(1);
            self.nodes.push(None);
            (self.nodes.len() - 1, 1)
        };
        #[allow(
            clippy::cast_possible_truncation,
            reason = "NodeId stores 32-bit slot indices"
        )]
        let id = NodeId::new(idx as u32, generation);
        node.id = id;
        self.nodes[idx] = Some(node);
        id
    }

    /// Access a node mutably; panics if `id` is stale.
    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut LiveNode {
        self.get_mut(id).expect("dangling NodeId")
    }
}

/// Reject raw input that cannot be materialized.
pub(crate) fn validate(raw: &RawNode) -> Result<(), TreeError> {
    validate_at(raw, &mut Vec::new())
}

fn validate_at(raw: &RawNode, path: &mut Vec<usize>) -> Result<(), TreeError> {
    if raw.name.is_empty() {
        return Err(TreeError::MalformedInput {
            path: path.clone(),
            reason: "node name is empty",
        });
    }
    for (index, child) in raw.children.iter().enumerate() {
        path.push(index);
        validate_at(child, path)?;
        path.pop();
    }
    Ok(())
}

/// Depth-first pre-order iterator over a [`LiveTree`].
///
/// Created by [`LiveTree::iter`] and [`LiveTree::iter_visible`].
#[derive(Debug)]
pub struct Walk<'a> {
    tree: &'a LiveTree,
    stack: Vec<NodeId>,
    visible_only: bool,
}

impl<'a> Walk<'a> {
    fn new(tree: &'a LiveTree, visible_only: bool) -> Self {
        Self {
            tree,
            stack: tree.root.map(|root| vec![root]).unwrap_or_default(),
            visible_only,
        }
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a LiveNode;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let node = self.tree.node(id);
        let children = if self.visible_only {
            node.visible_children()
        } else {
            node.children()
        };
        // Reversed so the first child is popped first.
        self.stack.extend(children.iter().rev().copied());
        Some(node)
    }
}
