// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Tidy Tree: state and layout for collapsible tree diagrams.
//!
//! Feed it a nested description of a hierarchy (an org chart, a file tree, a
//! decision tree) and it keeps a live, identity-stable copy of it, tracks
//! which nodes are collapsed, and produces tidy node positions and
//! parent → child links for whatever is currently visible. Drawing, path
//! curves, and gesture capture stay with the host.
//!
//! - Hierarchical data is materialized once into an arena with generational
//!   [`NodeId`]s; toggles and hover events address nodes by id.
//! - Collapsing hides a whole subtree; expanding reveals one level, or a
//!   path chosen by a pluggable [`ChildSelector`].
//! - Host data updates either replace the tree or, with an
//!   [`ExternalBinding`], merge into it by node name so ids and local state
//!   survive.
//! - Layout is the Reingold–Tilford "tidy tree" in its linear-time form, with
//!   configurable node size, orientation, and sibling/cousin separation.
//!
//! ## API overview
//!
//! - [`TreeView`]: the interactive façade. Owns the tree, a [`TreeConfig`],
//!   the pan/zoom [`Viewport`], and the toggle [`TransitionLock`]; reports to a
//!   [`TreeObserver`].
//! - [`LiveTree`] / [`LiveNode`]: the arena and its nodes.
//! - [`RawNode`]: host input, deserializable with the `serde` feature.
//! - [`compute_layout`] → [`TreeLayout`] of [`LayoutNode`]s and [`Link`]s.
//!
//! Key operations:
//! - [`TreeView::set_data`] (→ [`LiveTree::reconcile`], [`LiveTree::assign`]).
//! - [`TreeView::toggle`] (→ [`LiveTree::collapse`], [`LiveTree::expand`],
//!   [`LiveTree::auto_expand`], [`LiveTree::collapse_neighbors`]).
//! - [`TreeView::mouse_over`] / [`TreeView::mouse_out`].
//! - [`TreeView::on_zoom`], [`TreeView::pan_by`], [`TreeView::zoom_about`].
//! - [`LiveTree::find_by_id`] and [`LiveTree::find_all_at_depth`] search the
//!   visible tree.
//!
//! ## Time
//!
//! Toggles start a short busy window so an animation can finish before the
//! next toggle lands. The crate never reads a clock: every call that cares
//! takes a `now` in milliseconds from the host.
//!
//! ## Example
//!
//! ```rust
//! use understory_tidy_tree::{RawNode, ToggleOutcome, TreeConfig, TreeView};
//!
//! let org = RawNode::new("CEO")
//!     .with_child(RawNode::new("CTO").with_child(RawNode::new("Engineer")))
//!     .with_child(RawNode::new("CFO"));
//!
//! let mut view = TreeView::new(TreeConfig {
//!     initial_depth: Some(1),
//!     ..TreeConfig::default()
//! });
//! view.set_data(&org).unwrap();
//!
//! let layout = view.layout();
//! assert_eq!(layout.nodes.len(), 3);
//!
//! let cto = layout.nodes[1].id;
//! assert_eq!(view.toggle(cto, 0), Ok(ToggleOutcome::Expanded));
//! assert_eq!(view.layout().nodes.len(), 4);
//! ```
//!
//! ## Features
//!
//! - `std` (default): forwards to `kurbo/std`.
//! - `libm`: float math for `no_std` builds, forwarded to `kurbo/libm`.
//! - `serde`: `Deserialize`/`Serialize` for [`RawNode`], [`TreeConfig`] and the
//!   settings it nests. Enables `kurbo/serde`.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod error;
mod layout;
mod reconcile;
mod restrict;
mod transition;
mod tree;
mod types;
mod view;
mod viewport;
mod visibility;

pub use error::TreeError;
pub use layout::{
    LayoutConfig, LayoutNode, Link, NodeView, Orientation, Separation, TreeLayout, compute_layout,
};
pub use reconcile::{ExternalBinding, ReconcileMode, Reconciliation};
pub use restrict::restricted_offset;
pub use transition::{SETTLE_GRACE_MS, TransitionLock};
pub use tree::{LiveNode, LiveTree, Walk};
pub use types::{Attributes, NodeId, NodeShape, NodeState, NodeStyles, RawNode};
pub use view::{ToggleOutcome, TreeConfig, TreeObserver, TreeView, Update};
pub use viewport::{ScaleExtent, Viewport, ViewportConfig};
pub use visibility::ChildSelector;
