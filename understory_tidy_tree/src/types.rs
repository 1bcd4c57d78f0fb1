// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types: node identifiers, state flags, and raw host input.

use alloc::{collections::BTreeMap, string::String, vec::Vec};

/// Identifier for a live node (generational).
///
/// Identifiers are handed out when a raw tree is materialized and stay valid
/// until the whole generation is replaced. Slots freed by a replacement are
/// reused with a bumped generation, so an identifier from an older generation
/// never aliases a node of a newer one.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Interaction state of a live node.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct NodeState: u8 {
        /// Descendants are hidden from layout (but kept in the tree).
        const COLLAPSED = 0b0000_0001;
        /// Node lies on an auto-expanded path.
        const ACTIVE    = 0b0000_0010;
    }
}

/// Free-form key/value attributes shown next to a node.
pub type Attributes = BTreeMap<String, String>;

/// Renderer hint describing how a node should be drawn.
///
/// The engine carries this through untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NodeShape {
    /// Shape kind, for example `"circle"` or `"rect"`.
    pub kind: String,
    /// Shape parameters, for example `r` for a circle.
    pub props: Attributes,
}

/// Per-node style overrides mirrored from host data.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NodeStyles {
    /// Style of the node glyph.
    pub shape: Attributes,
    /// Style of the name label.
    pub name: Attributes,
    /// Style of the attribute labels.
    pub attributes: Attributes,
}

/// A node of host-supplied hierarchical data.
///
/// `name` doubles as the join key when a new version of the data is merged
/// into a live tree. It must not be empty.
///
/// `collapsed` and `active` are only read when an
/// [`ExternalBinding`](crate::ExternalBinding) is configured. `styles` is
/// copied whenever the tree is (re)built; merges only carry it over when the
/// binding opts in with [`ExternalBinding::styles`](crate::ExternalBinding::styles).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct RawNode {
    /// Display name and merge key.
    pub name: String,
    /// Child nodes, in display order.
    pub children: Vec<RawNode>,
    /// Attributes shown next to the node.
    pub attributes: Attributes,
    /// Optional renderer shape hint.
    pub shape: Option<NodeShape>,
    /// Externally controlled collapse state.
    pub collapsed: Option<bool>,
    /// Externally controlled active state.
    pub active: Option<bool>,
    /// Style overrides; see above for when updates reach the live tree.
    pub styles: Option<NodeStyles>,
}

impl RawNode {
    /// Create a childless node with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Append a child.
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Append several children.
    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = Self>) -> Self {
        self.children.extend(children);
        self
    }

    /// Set an attribute.
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Set the externally controlled collapse state.
    #[must_use]
    pub fn with_collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = Some(collapsed);
        self
    }

    /// Set the externally controlled active state.
    #[must_use]
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    /// Set the style overrides.
    #[must_use]
    pub fn with_styles(mut self, styles: NodeStyles) -> Self {
        self.styles = Some(styles);
        self
    }

    /// Set the renderer shape hint.
    #[must_use]
    pub fn with_shape(mut self, shape: NodeShape) -> Self {
        self.shape = Some(shape);
        self
    }

    /// Total number of nodes in this subtree, including `self`.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(Self::count).sum::<usize>()
    }
}
