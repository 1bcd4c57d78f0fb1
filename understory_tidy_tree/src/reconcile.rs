// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Merging a new version of host data into a live tree.
//!
//! Without an [`ExternalBinding`] every data update replaces the live tree
//! wholesale. With a binding, nodes are matched by name and the externally
//! controlled fields are copied over while identities stay put. This is a
//! heuristic: if the number of distinct names changes, the tree is rebuilt
//! instead of diffed, and when names repeat the last node in depth-first
//! order wins. [`ReconcileMode::Strict`] refuses repeated names instead.

use alloc::{string::ToString, vec, vec::Vec};

use hashbrown::HashMap;

use crate::error::TreeError;
use crate::tree::{LiveNode, LiveTree, validate};
use crate::types::{NodeId, NodeState, RawNode};

/// Which externally supplied fields are mirrored into the live state.
///
/// Configuring a binding at all mirrors [`RawNode::collapsed`] and
/// [`RawNode::attributes`]; the flags below opt into the remaining fields.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ExternalBinding {
    /// Mirror [`RawNode::active`].
    pub active: bool,
    /// Mirror [`RawNode::styles`].
    pub styles: bool,
}

/// How nodes are matched between tree versions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum ReconcileMode {
    /// Match by name; when names repeat, the last one in depth-first order wins.
    #[default]
    LastNameWins,
    /// Match by name and fail with [`TreeError::DuplicateName`] on repeats.
    Strict,
}

/// What [`LiveTree::reconcile`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reconciliation {
    /// Existing nodes were updated in place; `matched` of them found a counterpart.
    Merged {
        /// Number of live nodes that were updated.
        matched: usize,
    },
    /// The tree was replaced and every node has a fresh identifier.
    Rebuilt,
}

impl LiveTree {
    /// Merge `raw` into this tree.
    ///
    /// - No `binding`, or an empty tree: replace everything (see [`LiveTree::assign`]).
    /// - With a `binding`, both trees are flattened into name-keyed maps. If
    ///   the map sizes differ the tree is rebuilt. Otherwise every live node
    ///   whose name appears in `raw` takes over that node's attributes and
    ///   bound fields, and keeps its identifier.
    ///
    /// Input is validated first; on error the tree is left untouched.
    pub fn reconcile(
        &mut self,
        raw: &RawNode,
        binding: Option<ExternalBinding>,
        mode: ReconcileMode,
    ) -> Result<Reconciliation, TreeError> {
        let Some(binding) = binding.filter(|_| !self.is_empty()) else {
            self.assign(raw, binding)?;
            return Ok(Reconciliation::Rebuilt);
        };

        validate(raw)?;
        let incoming = flatten_raw(raw, mode)?;
        let current = self.flatten(mode)?;
        let current_len = current.len();
        if incoming.len() != current_len {
            // The map borrows the arena; release it before rebuilding.
            drop(current);
            tracing::debug!(
                current = current_len,
                incoming = incoming.len(),
                "name count changed, rebuilding live tree"
            );
            self.assign(raw, Some(binding))?;
            return Ok(Reconciliation::Rebuilt);
        }

        let updates: Vec<(NodeId, &RawNode)> = current
            .iter()
            .filter_map(|(name, id)| incoming.get(name).map(|raw| (*id, *raw)))
            .collect();
        drop(current);
        for (id, raw) in &updates {
            apply_external(self.node_mut(*id), raw, binding);
        }
        tracing::debug!(matched = updates.len(), "merged host data into live tree");
        Ok(Reconciliation::Merged {
            matched: updates.len(),
        })
    }

    fn flatten(&self, mode: ReconcileMode) -> Result<HashMap<&str, NodeId>, TreeError> {
        let mut map = HashMap::with_capacity(self.len());
        for node in self.iter() {
            if map.insert(node.name(), node.id()).is_some() && mode == ReconcileMode::Strict {
                return Err(TreeError::DuplicateName(node.name().to_string()));
            }
        }
        Ok(map)
    }
}

fn flatten_raw(root: &RawNode, mode: ReconcileMode) -> Result<HashMap<&str, &RawNode>, TreeError> {
    let mut map = HashMap::new();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if map.insert(node.name.as_str(), node).is_some() && mode == ReconcileMode::Strict {
            return Err(TreeError::DuplicateName(node.name.clone()));
        }
        stack.extend(node.children.iter().rev());
    }
    Ok(map)
}

/// Copy the bound fields of `raw` onto `node`.
pub(crate) fn apply_external(node: &mut LiveNode, raw: &RawNode, binding: ExternalBinding) {
    node.attributes = raw.attributes.clone();
    node.state
        .set(NodeState::COLLAPSED, raw.collapsed.unwrap_or(false));
    if binding.active {
        node.state.set(NodeState::ACTIVE, raw.active.unwrap_or(false));
    }
    if binding.styles {
        node.styles = raw.styles.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NodeStyles;
    use alloc::string::String;

    const BINDING: ExternalBinding = ExternalBinding {
        active: true,
        styles: true,
    };

    fn v1() -> RawNode {
        RawNode::new("root")
            .with_child(
                RawNode::new("left")
                    .with_attribute("rev", "1")
                    .with_child(RawNode::new("left.a")),
            )
            .with_child(RawNode::new("right").with_attribute("rev", "1"))
    }

    fn ids(tree: &LiveTree) -> Vec<NodeId> {
        tree.iter().map(LiveNode::id).collect()
    }

    fn by_name<'a>(tree: &'a LiveTree, name: &str) -> &'a LiveNode {
        tree.iter().find(|n| n.name() == name).unwrap()
    }

    #[test]
    fn no_binding_always_rebuilds() {
        let mut tree = LiveTree::from_raw(&v1()).unwrap();
        let before = ids(&tree);
        let outcome = tree
            .reconcile(&v1(), None, ReconcileMode::default())
            .unwrap();
        assert_eq!(outcome, Reconciliation::Rebuilt);
        assert!(before.iter().all(|id| !tree.is_alive(*id)));
    }

    #[test]
    fn same_count_merges_and_keeps_ids() {
        let mut tree = LiveTree::new();
        tree.assign(&v1(), Some(BINDING)).unwrap();
        let before = ids(&tree);

        let styles = NodeStyles {
            name: [(String::from("fill"), String::from("red"))].into(),
            ..NodeStyles::default()
        };
        let v2 = RawNode::new("root")
            .with_child(
                RawNode::new("left")
                    .with_attribute("rev", "2")
                    .with_collapsed(true)
                    .with_active(true)
                    .with_styles(styles.clone())
                    .with_child(RawNode::new("left.a")),
            )
            .with_child(RawNode::new("right").with_attribute("rev", "2"));

        let outcome = tree
            .reconcile(&v2, Some(BINDING), ReconcileMode::default())
            .unwrap();
        assert_eq!(outcome, Reconciliation::Merged { matched: 4 });
        assert_eq!(ids(&tree), before, "identities must survive a merge");

        let left = by_name(&tree, "left");
        assert_eq!(left.attributes().get("rev").map(String::as_str), Some("2"));
        assert!(left.is_collapsed(), "collapse state is mirrored");
        assert!(left.is_active(), "active state is mirrored");
        assert_eq!(left.styles(), Some(&styles));
        let right = by_name(&tree, "right");
        assert_eq!(right.attributes().get("rev").map(String::as_str), Some("2"));
        assert!(!right.is_collapsed());
    }

    #[test]
    fn unbound_fields_are_left_alone() {
        let mut tree = LiveTree::new();
        let binding = ExternalBinding::default();
        tree.assign(&v1(), Some(binding)).unwrap();
        let left = by_name(&tree, "left").id();
        tree.mark_active(left);

        let v2 = RawNode::new("root")
            .with_child(
                RawNode::new("left")
                    .with_active(false)
                    .with_child(RawNode::new("left.a")),
            )
            .with_child(RawNode::new("right"));
        tree.reconcile(&v2, Some(binding), ReconcileMode::default())
            .unwrap();
        assert!(
            tree.get(left).unwrap().is_active(),
            "active is not bound, so local state wins"
        );
    }

    #[test]
    fn styles_are_seeded_on_build_and_merged_only_when_bound() {
        let fill = |color: &str| NodeStyles {
            shape: [(String::from("fill"), String::from(color))].into(),
            ..NodeStyles::default()
        };
        let version = |color: &str| {
            RawNode::new("root")
                .with_styles(fill(color))
                .with_child(RawNode::new("leaf"))
        };
        let mut tree = LiveTree::from_raw(&version("red")).unwrap();
        let root = tree.root().unwrap();
        assert_eq!(tree.get(root).unwrap().styles(), Some(&fill("red")));

        let binding = ExternalBinding::default();
        tree.reconcile(&version("blue"), Some(binding), ReconcileMode::default())
            .unwrap();
        assert_eq!(
            tree.get(root).unwrap().styles(),
            Some(&fill("red")),
            "styles are not bound, so the merge keeps them"
        );

        let binding = ExternalBinding {
            styles: true,
            ..binding
        };
        tree.reconcile(&version("blue"), Some(binding), ReconcileMode::default())
            .unwrap();
        assert_eq!(tree.get(root).unwrap().styles(), Some(&fill("blue")));
    }

    #[test]
    fn count_change_rebuilds_with_fresh_ids() {
        let mut tree = LiveTree::new();
        tree.assign(&v1(), Some(BINDING)).unwrap();
        let before = ids(&tree);

        let v2 = v1().with_child(RawNode::new("extra").with_collapsed(true));
        let outcome = tree
            .reconcile(&v2, Some(BINDING), ReconcileMode::default())
            .unwrap();
        assert_eq!(outcome, Reconciliation::Rebuilt);
        assert_eq!(tree.len(), 5);
        assert!(before.iter().all(|id| !tree.is_alive(*id)), "all ids replaced");
        assert!(
            by_name(&tree, "extra").is_collapsed(),
            "bound fields are seeded on rebuild"
        );
    }

    #[test]
    fn duplicate_names_last_one_wins() {
        let raw = RawNode::new("root")
            .with_child(RawNode::new("dup").with_attribute("which", "first"))
            .with_child(RawNode::new("dup").with_attribute("which", "second"));
        let mut tree = LiveTree::new();
        tree.assign(&raw, Some(BINDING)).unwrap();

        let update = RawNode::new("root")
            .with_child(RawNode::new("dup").with_attribute("which", "new-first"))
            .with_child(RawNode::new("dup").with_attribute("which", "new-second"));
        let outcome = tree
            .reconcile(&update, Some(BINDING), ReconcileMode::LastNameWins)
            .unwrap();
        // Only the last live "dup" is in the flattened map, and it takes the
        // last incoming "dup".
        assert_eq!(outcome, Reconciliation::Merged { matched: 2 });
        let root = tree.root().unwrap();
        let [first, second] = tree.children_of(root) else {
            panic!("expected two children");
        };
        let which = |id: &NodeId| tree.get(*id).unwrap().attributes()["which"].clone();
        assert_eq!(which(first), "first");
        assert_eq!(which(second), "new-second");
    }

    #[test]
    fn strict_mode_rejects_duplicates() {
        let raw = RawNode::new("root")
            .with_child(RawNode::new("dup"))
            .with_child(RawNode::new("dup"));
        let mut tree = LiveTree::new();
        tree.assign(&v1(), Some(BINDING)).unwrap();
        let before = ids(&tree);
        let err = tree
            .reconcile(&raw, Some(BINDING), ReconcileMode::Strict)
            .unwrap_err();
        assert_eq!(err, TreeError::DuplicateName("dup".into()));
        assert_eq!(ids(&tree), before, "tree untouched on error");
    }

    #[test]
    fn malformed_update_is_rejected() {
        let mut tree = LiveTree::new();
        tree.assign(&v1(), Some(BINDING)).unwrap();
        let before = ids(&tree);
        let bad = RawNode::new("root")
            .with_child(RawNode::new("left").with_child(RawNode::new("left.a")))
            .with_child(RawNode::default());
        let err = tree
            .reconcile(&bad, Some(BINDING), ReconcileMode::default())
            .unwrap_err();
        assert!(matches!(err, TreeError::MalformedInput { .. }));
        assert_eq!(ids(&tree), before);
    }
}
