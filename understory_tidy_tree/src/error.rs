// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type shared by the fallible tree operations.

use alloc::{string::String, vec::Vec};

use crate::types::NodeId;

/// Errors reported by [`LiveTree`](crate::LiveTree) and [`TreeView`](crate::TreeView).
///
/// None of these leave the tree in a partially updated state.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum TreeError {
    /// The identifier does not refer to a node of the visible tree.
    ///
    /// This can happen benignly when an interaction was queued against a tree
    /// that has since been replaced.
    #[error("node {0:?} is not part of the visible tree")]
    NodeNotFound(NodeId),
    /// The raw input cannot be materialized.
    #[error("malformed input at child path {path:?}: {reason}")]
    MalformedInput {
        /// Child indices leading from the root to the offending node.
        path: Vec<usize>,
        /// What is wrong with that node.
        reason: &'static str,
    },
    /// A name occurs more than once while merging in strict mode.
    #[error("duplicate node name {0:?}")]
    DuplicateName(String),
}
