// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The interactive façade: data updates, toggles, hover, and pan/zoom.
//!
//! [`TreeView`] owns a [`LiveTree`], its [`TreeConfig`], the current
//! [`Viewport`] and the toggle [`TransitionLock`]. Hosts feed it raw data
//! and interaction events, call [`TreeView::layout`] to get something to
//! draw, and receive callbacks through a [`TreeObserver`].

use alloc::boxed::Box;
use core::fmt;

use kurbo::{Point, Vec2};

use crate::error::TreeError;
use crate::layout::{LayoutConfig, TreeLayout, compute_layout};
use crate::reconcile::{ExternalBinding, ReconcileMode, Reconciliation};
use crate::transition::TransitionLock;
use crate::tree::{LiveNode, LiveTree};
use crate::types::{NodeId, RawNode};
use crate::viewport::{ScaleExtent, Viewport, ViewportConfig};
use crate::visibility::ChildSelector;

/// Everything a [`TreeView`] can be configured with.
///
/// Build with struct update syntax:
///
/// ```
/// use understory_tidy_tree::{Orientation, TreeConfig};
///
/// let mut config = TreeConfig {
///     initial_depth: Some(2),
///     collapse_neighbors: true,
///     ..TreeConfig::default()
/// };
/// config.layout.orientation = Orientation::Vertical;
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct TreeConfig {
    /// Geometry of the layout pass.
    pub layout: LayoutConfig,
    /// Initial pan/zoom and zoom bounds.
    pub viewport: ViewportConfig,
    /// Collapse everything at or below this depth whenever the tree is rebuilt.
    ///
    /// Ignored while `external` is set: the mirrored `collapsed` fields decide.
    pub initial_depth: Option<u32>,
    /// Whether toggles change visibility at all. Clicks are reported either way.
    pub collapsible: bool,
    /// Collapse the other nodes of a level when one of them is expanded.
    pub collapse_neighbors: bool,
    /// Mirror host-controlled fields into the live tree on every data update.
    pub external: Option<ExternalBinding>,
    /// Name matching policy for data updates with an external binding.
    pub reconcile_mode: ReconcileMode,
    /// Length of the expand/collapse animation, in milliseconds.
    pub transition_duration: u64,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            viewport: ViewportConfig::default(),
            initial_depth: None,
            collapsible: true,
            collapse_neighbors: false,
            external: None,
            reconcile_mode: ReconcileMode::default(),
            transition_duration: 500,
        }
    }
}

/// State reported through [`TreeObserver::on_update`].
#[derive(Clone, Copy, Debug)]
pub struct Update<'a> {
    /// The node that was toggled, or `None` for data and viewport changes.
    pub node: Option<&'a LiveNode>,
    /// Current scale.
    pub zoom: f64,
    /// Current translation.
    pub translate: Vec2,
}

/// Callbacks from a [`TreeView`]. Every method defaults to doing nothing.
pub trait TreeObserver {
    /// A node was clicked (toggled), whether or not its visibility changed.
    fn on_click(&mut self, node: &LiveNode) {
        let _ = node;
    }

    /// The pointer entered a node.
    fn on_mouse_over(&mut self, node: &LiveNode) {
        let _ = node;
    }

    /// The pointer left a node.
    fn on_mouse_out(&mut self, node: &LiveNode) {
        let _ = node;
    }

    /// Something the host may want to persist changed.
    fn on_update(&mut self, update: Update<'_>) {
        let _ = update;
    }
}

/// What [`TreeView::toggle`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The node was collapsed and is now open.
    Expanded,
    /// The node was open and is now collapsed.
    Collapsed,
    /// A transition is still running; nothing changed.
    Busy,
    /// Toggling is disabled; nothing changed.
    NotCollapsible,
}

impl ToggleOutcome {
    /// Whether visibility changed.
    pub fn changed(self) -> bool {
        matches!(self, Self::Expanded | Self::Collapsed)
    }
}

/// A collapsible tree together with its configuration and interaction state.
///
/// ```
/// use understory_tidy_tree::{RawNode, ToggleOutcome, TreeConfig, TreeView};
///
/// let raw = RawNode::new("root").with_child(RawNode::new("leaf"));
/// let mut view = TreeView::new(TreeConfig::default());
/// view.set_data(&raw).unwrap();
///
/// let root = view.tree().root().unwrap();
/// assert_eq!(view.toggle(root, 0), Ok(ToggleOutcome::Collapsed));
/// assert_eq!(view.toggle(root, 100), Ok(ToggleOutcome::Busy));
/// assert_eq!(view.layout().nodes.len(), 1);
/// ```
pub struct TreeView {
    tree: LiveTree,
    config: TreeConfig,
    selector: Option<Box<dyn ChildSelector>>,
    observer: Option<Box<dyn TreeObserver>>,
    viewport: Viewport,
    transition: TransitionLock,
}

impl fmt::Debug for TreeView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeView")
            .field("tree", &self.tree)
            .field("config", &self.config)
            .field("selector", &self.selector.is_some())
            .field("observer", &self.observer.is_some())
            .field("viewport", &self.viewport)
            .field("transition", &self.transition)
            .finish()
    }
}

impl TreeView {
    /// An empty view.
    pub fn new(config: TreeConfig) -> Self {
        Self {
            tree: LiveTree::new(),
            config,
            selector: None,
            observer: None,
            viewport: Viewport::from_config(&config.viewport),
            transition: TransitionLock::new(),
        }
    }

    /// Expand along the path `selector` picks whenever a collapsed node is
    /// toggled open, and from the root after the initial depth is applied.
    pub fn with_child_selector(mut self, selector: impl ChildSelector + 'static) -> Self {
        self.set_child_selector(Some(Box::new(selector)));
        self
    }

    /// Replace or remove the auto-expand selector.
    pub fn set_child_selector(&mut self, selector: Option<Box<dyn ChildSelector>>) {
        self.selector = selector;
    }

    /// Receive click, hover, and update callbacks.
    pub fn with_observer(mut self, observer: impl TreeObserver + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// The live tree.
    pub fn tree(&self) -> &LiveTree {
        &self.tree
    }

    /// The active configuration.
    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Current pan and zoom.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Replace the configuration.
    ///
    /// The viewport is recomputed (and reported) only if the viewport
    /// settings changed, so pan/zoom state survives unrelated updates.
    pub fn set_config(&mut self, config: TreeConfig) {
        let viewport_changed = config.viewport != self.config.viewport;
        self.config = config;
        if viewport_changed {
            self.viewport = Viewport::from_config(&config.viewport);
            tracing::debug!(scale = self.viewport.scale, "viewport settings changed");
            self.notify_update(None);
        }
    }

    /// Load or update the host data.
    ///
    /// The first load, and every update without an external binding,
    /// rebuilds the tree; see [`LiveTree::reconcile`] for the merge rules.
    /// After a rebuild the initial depth is applied again. On error nothing
    /// changes.
    pub fn set_data(&mut self, raw: &RawNode) -> Result<Reconciliation, TreeError> {
        let outcome =
            self.tree
                .reconcile(raw, self.config.external, self.config.reconcile_mode)?;
        if outcome == Reconciliation::Rebuilt {
            self.transition.reset();
            self.apply_initial_depth();
        }
        self.notify_update(None);
        Ok(outcome)
    }

    fn apply_initial_depth(&mut self) {
        let Some(cap) = self.config.initial_depth else {
            return;
        };
        if self.config.external.is_some() {
            // Host-declared collapse state owns the initial shape.
            tracing::debug!(cap, "external binding set, initial depth not applied");
            return;
        }
        self.tree.cap_visible_depth(cap);
        if let (Some(selector), Some(root)) = (&self.selector, self.tree.root()) {
            self.tree.auto_expand(root, selector.as_ref());
        }
    }

    /// Positions and links for everything currently visible.
    pub fn layout(&self) -> TreeLayout {
        compute_layout(&self.tree, &self.config.layout)
    }

    /// Whether a toggle transition is still running (as of the last call
    /// that took a timestamp).
    pub fn is_transitioning(&self) -> bool {
        self.transition.is_busy()
    }

    /// Release the transition lock if its deadline has passed.
    pub fn settle(&mut self, now: u64) -> bool {
        self.transition.settle(now)
    }

    /// Click on `id` at time `now` (milliseconds).
    ///
    /// A collapsed node is expanded (along the selector's path if one is
    /// set, collapsing its neighbors if configured); an open node is
    /// collapsed with its whole subtree. While a previous toggle is still
    /// transitioning, or when toggling is disabled, only the click is
    /// reported.
    pub fn toggle(&mut self, id: NodeId, now: u64) -> Result<ToggleOutcome, TreeError> {
        self.transition.settle(now);
        let Some((collapsed, has_children)) = self
            .tree
            .find_by_id(id)
            .map(|node| (node.is_collapsed(), node.has_children()))
        else {
            tracing::debug!(?id, "toggle on a node that is not visible");
            return Err(TreeError::NodeNotFound(id));
        };
        let outcome = if !self.config.collapsible {
            ToggleOutcome::NotCollapsible
        } else if self.transition.is_busy() {
            ToggleOutcome::Busy
        } else if collapsed {
            match &self.selector {
                // Auto-expansion never opens a leaf, so leaves take the plain path.
                Some(selector) if has_children => self.tree.auto_expand(id, selector.as_ref()),
                _ => self.tree.expand(id),
            }
            if self.config.collapse_neighbors {
                self.tree.collapse_neighbors(id);
            }
            ToggleOutcome::Expanded
        } else {
            self.tree.collapse(id);
            ToggleOutcome::Collapsed
        };

        if outcome.changed() {
            let deadline = self.transition.begin(now, self.config.transition_duration);
            tracing::debug!(?id, ?outcome, deadline, "toggled node");
        }
        if let (Some(observer), Some(node)) = (self.observer.as_deref_mut(), self.tree.get(id)) {
            observer.on_click(node);
        }
        if outcome.changed() {
            self.notify_update(Some(id));
        }
        Ok(outcome)
    }

    /// The pointer entered `id`.
    pub fn mouse_over(&mut self, id: NodeId) -> Result<(), TreeError> {
        let node = hovered(&self.tree, id)?;
        if let Some(observer) = self.observer.as_deref_mut() {
            observer.on_mouse_over(node);
        }
        Ok(())
    }

    /// The pointer left `id`.
    pub fn mouse_out(&mut self, id: NodeId) -> Result<(), TreeError> {
        let node = hovered(&self.tree, id)?;
        if let Some(observer) = self.observer.as_deref_mut() {
            observer.on_mouse_out(node);
        }
        Ok(())
    }

    /// Record the result of a pan/zoom gesture.
    ///
    /// Returns `false` (and changes nothing) when the view is not zoomable
    /// or when `scale` is not a positive finite number.
    pub fn on_zoom(&mut self, scale: f64, translate: Vec2) -> bool {
        if !(scale.is_finite() && scale > 0.0) {
            tracing::debug!(scale, "ignoring degenerate zoom scale");
            return false;
        }
        self.update_viewport(|viewport, extent| {
            viewport.scale = extent.clamp(scale);
            viewport.translate = translate;
        })
    }

    /// Pan by `delta` screen units.
    pub fn pan_by(&mut self, delta: Vec2) -> bool {
        self.update_viewport(|viewport, _| viewport.pan_by(delta))
    }

    /// Zoom by `factor` around the screen point `anchor`.
    pub fn zoom_about(&mut self, factor: f64, anchor: Point) -> bool {
        self.update_viewport(|viewport, extent| viewport.zoom_about(factor, anchor, extent))
    }

    fn update_viewport(
        &mut self,
        apply: impl FnOnce(&mut Viewport, ScaleExtent),
    ) -> bool {
        if !self.config.viewport.zoomable {
            tracing::trace!("ignoring pan/zoom on a fixed view");
            return false;
        }
        apply(&mut self.viewport, self.config.viewport.scale_extent);
        self.notify_update(None);
        true
    }

    fn notify_update(&mut self, id: Option<NodeId>) {
        let Some(observer) = self.observer.as_deref_mut() else {
            return;
        };
        observer.on_update(Update {
            node: id.and_then(|id| self.tree.get(id)),
            zoom: self.viewport.scale,
            translate: self.viewport.translate,
        });
    }
}

fn hovered(tree: &LiveTree, id: NodeId) -> Result<&LiveNode, TreeError> {
    tree.find_by_id(id).ok_or_else(|| {
        tracing::warn!(?id, "hover on a node that is not visible");
        TreeError::NodeNotFound(id)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::{format, rc::Rc, string::String, vec::Vec};
    use core::cell::RefCell;

    #[derive(Clone, Default)]
    struct Recorder(Rc<RefCell<Vec<String>>>);

    impl Recorder {
        fn take(&self) -> Vec<String> {
            core::mem::take(&mut *self.0.borrow_mut())
        }
    }

    impl TreeObserver for Recorder {
        fn on_click(&mut self, node: &LiveNode) {
            self.0.borrow_mut().push(format!("click {}", node.name()));
        }

        fn on_mouse_over(&mut self, node: &LiveNode) {
            self.0.borrow_mut().push(format!("over {}", node.name()));
        }

        fn on_mouse_out(&mut self, node: &LiveNode) {
            self.0.borrow_mut().push(format!("out {}", node.name()));
        }

        fn on_update(&mut self, update: Update<'_>) {
            let name = update.node.map_or("-", LiveNode::name);
            self.0
                .borrow_mut()
                .push(format!("update {name} {}", update.zoom));
        }
    }

    fn org_chart() -> RawNode {
        RawNode::new("CEO")
            .with_child(
                RawNode::new("CTO")
                    .with_child(RawNode::new("Engineer"))
                    .with_child(RawNode::new("Designer")),
            )
            .with_child(RawNode::new("CFO").with_child(RawNode::new("Accountant")))
    }

    fn id_of(view: &TreeView, name: &str) -> NodeId {
        view.tree().iter().find(|n| n.name() == name).unwrap().id()
    }

    fn visible(view: &TreeView) -> Vec<String> {
        view.layout()
            .views(view.tree())
            .map(|v| String::from(v.name))
            .collect()
    }

    #[test]
    fn initial_depth_hides_deeper_levels_until_toggled() {
        let config = TreeConfig {
            initial_depth: Some(1),
            ..TreeConfig::default()
        };
        let mut view = TreeView::new(config);
        view.set_data(&org_chart()).unwrap();
        assert_eq!(visible(&view), ["CEO", "CTO", "CFO"]);

        let cto = id_of(&view, "CTO");
        assert_eq!(view.toggle(cto, 0), Ok(ToggleOutcome::Expanded));
        assert_eq!(visible(&view), ["CEO", "CTO", "Engineer", "Designer", "CFO"]);
    }

    #[test]
    fn toggles_within_the_busy_window_change_nothing() {
        let mut view = TreeView::new(TreeConfig::default());
        view.set_data(&org_chart()).unwrap();
        let cto = id_of(&view, "CTO");

        assert_eq!(view.toggle(cto, 1_000), Ok(ToggleOutcome::Collapsed));
        assert!(view.is_transitioning());
        assert_eq!(view.toggle(cto, 1_300), Ok(ToggleOutcome::Busy));
        assert_eq!(visible(&view), ["CEO", "CTO", "CFO", "Accountant"]);

        // 500 ms duration plus the grace period.
        assert_eq!(view.toggle(cto, 1_510), Ok(ToggleOutcome::Expanded));
    }

    #[test]
    fn non_collapsible_view_only_reports_clicks() {
        let recorder = Recorder::default();
        let config = TreeConfig {
            collapsible: false,
            ..TreeConfig::default()
        };
        let mut view = TreeView::new(config).with_observer(recorder.clone());
        view.set_data(&org_chart()).unwrap();
        recorder.take();

        let cto = id_of(&view, "CTO");
        assert_eq!(view.toggle(cto, 0), Ok(ToggleOutcome::NotCollapsible));
        assert!(!view.is_transitioning());
        assert_eq!(recorder.take(), ["click CTO"]);
    }

    #[test]
    fn observer_sees_clicks_hovers_and_updates() {
        let recorder = Recorder::default();
        let mut view = TreeView::new(TreeConfig::default()).with_observer(recorder.clone());
        view.set_data(&org_chart()).unwrap();
        assert_eq!(recorder.take(), ["update - 1"]);

        let cfo = id_of(&view, "CFO");
        view.mouse_over(cfo).unwrap();
        view.mouse_out(cfo).unwrap();
        view.toggle(cfo, 0).unwrap();
        view.toggle(cfo, 10).unwrap();
        assert_eq!(
            recorder.take(),
            ["over CFO", "out CFO", "click CFO", "update CFO 1", "click CFO"]
        );
    }

    #[test]
    fn hidden_and_stale_ids_are_not_found() {
        let mut view = TreeView::new(TreeConfig::default());
        view.set_data(&org_chart()).unwrap();
        let cto = id_of(&view, "CTO");
        let engineer = id_of(&view, "Engineer");
        view.toggle(cto, 0).unwrap();

        assert_eq!(
            view.toggle(engineer, 1_000),
            Err(TreeError::NodeNotFound(engineer))
        );
        assert_eq!(view.mouse_over(engineer), Err(TreeError::NodeNotFound(engineer)));

        view.set_data(&org_chart()).unwrap();
        assert_eq!(view.toggle(cto, 2_000), Err(TreeError::NodeNotFound(cto)));
    }

    #[test]
    fn expanding_collapses_neighbors_when_asked() {
        let config = TreeConfig {
            initial_depth: Some(1),
            collapse_neighbors: true,
            ..TreeConfig::default()
        };
        let mut view = TreeView::new(config);
        view.set_data(&org_chart()).unwrap();
        view.toggle(id_of(&view, "CTO"), 0).unwrap();
        view.toggle(id_of(&view, "CFO"), 1_000).unwrap();
        assert_eq!(visible(&view), ["CEO", "CTO", "CFO", "Accountant"]);
    }

    #[test]
    fn selector_drives_initial_and_toggled_expansion() {
        let config = TreeConfig {
            initial_depth: Some(0),
            ..TreeConfig::default()
        };
        let last = |_: &LiveTree, node: &LiveNode| node.children().last().copied();
        let mut view = TreeView::new(config).with_child_selector(last);
        view.set_data(&org_chart()).unwrap();
        assert_eq!(visible(&view), ["CEO", "CTO", "CFO", "Accountant"]);
        assert!(view.tree().get(id_of(&view, "Accountant")).unwrap().is_active());

        let cto = id_of(&view, "CTO");
        view.toggle(cto, 0).unwrap();
        let designer = view.tree().get(id_of(&view, "Designer")).unwrap();
        assert!(designer.is_active(), "selector picked the last child");
    }

    #[test]
    fn toggling_a_collapsed_leaf_opens_it_with_a_selector() {
        let config = TreeConfig {
            initial_depth: Some(1),
            ..TreeConfig::default()
        };
        let first = |_: &LiveTree, node: &LiveNode| node.children().first().copied();
        let mut view = TreeView::new(config).with_child_selector(first);
        let raw = RawNode::new("root").with_child(RawNode::new("leaf"));
        view.set_data(&raw).unwrap();

        let leaf = id_of(&view, "leaf");
        assert!(view.tree().get(leaf).unwrap().is_collapsed());
        assert_eq!(view.toggle(leaf, 0), Ok(ToggleOutcome::Expanded));
        assert!(
            !view.tree().get(leaf).unwrap().is_collapsed(),
            "reported outcome matches the node state"
        );
    }

    #[test]
    fn merged_updates_keep_interaction_state() {
        let config = TreeConfig {
            external: Some(ExternalBinding::default()),
            initial_depth: Some(1),
            ..TreeConfig::default()
        };
        let mut view = TreeView::new(config);
        assert_eq!(view.set_data(&org_chart()), Ok(Reconciliation::Rebuilt));
        let cto = id_of(&view, "CTO");

        let update = org_chart().with_attribute("rev", "2");
        assert_eq!(view.set_data(&update), Ok(Reconciliation::Merged { matched: 6 }));
        assert_eq!(id_of(&view, "CTO"), cto, "ids survive a merge");
        // Without `collapsed` in the update, the mirrored field opens everything.
        assert_eq!(visible(&view).len(), 6);
    }

    #[test]
    fn host_collapse_state_wins_over_initial_depth() {
        let config = TreeConfig {
            external: Some(ExternalBinding::default()),
            initial_depth: Some(2),
            ..TreeConfig::default()
        };
        let mut view = TreeView::new(config);
        let raw = RawNode::new("root")
            .with_collapsed(true)
            .with_child(RawNode::new("a").with_child(RawNode::new("a1")))
            .with_child(RawNode::new("b"));
        view.set_data(&raw).unwrap();

        let root = view.tree().root().unwrap();
        assert!(
            view.tree().get(root).unwrap().is_collapsed(),
            "host declared the root collapsed"
        );
        assert_eq!(visible(&view), ["root"]);

        // Nothing declared collapsed: the initial depth does not close anything either.
        let open = RawNode::new("root")
            .with_child(RawNode::new("a").with_child(RawNode::new("a1").with_child(RawNode::new("x"))))
            .with_child(RawNode::new("b"));
        view.set_data(&open).unwrap();
        assert_eq!(visible(&view), ["root", "a", "a1", "x", "b"]);
    }

    #[test]
    fn malformed_data_keeps_previous_tree() {
        let mut view = TreeView::new(TreeConfig::default());
        view.set_data(&org_chart()).unwrap();
        let bad = RawNode::new("root").with_child(RawNode::new(""));
        assert!(matches!(
            view.set_data(&bad),
            Err(TreeError::MalformedInput { .. })
        ));
        assert_eq!(view.tree().len(), 6);
    }

    #[test]
    fn viewport_is_clamped_and_reported() {
        let recorder = Recorder::default();
        let config = TreeConfig {
            viewport: ViewportConfig {
                zoom: 5.0,
                scale_extent: ScaleExtent { min: 0.5, max: 2.0 },
                ..ViewportConfig::default()
            },
            ..TreeConfig::default()
        };
        let mut view = TreeView::new(config).with_observer(recorder.clone());
        assert_eq!(view.viewport().scale, 2.0);

        assert!(view.on_zoom(0.1, Vec2::new(4.0, 2.0)));
        assert_eq!(view.viewport().scale, 0.5);
        assert_eq!(view.viewport().translate, Vec2::new(4.0, 2.0));
        assert_eq!(recorder.take(), ["update - 0.5"]);

        // Unrelated config changes keep the gesture state.
        let mut next = *view.config();
        next.collapsible = false;
        view.set_config(next);
        assert_eq!(view.viewport().scale, 0.5);
        assert!(recorder.take().is_empty(), "no viewport change, no update");

        next.viewport.zoom = 1.5;
        view.set_config(next);
        assert_eq!(view.viewport().scale, 1.5);
        assert_eq!(view.viewport().translate, Vec2::ZERO);
        assert_eq!(recorder.take(), ["update - 1.5"]);
    }

    #[test]
    fn fixed_view_ignores_gestures() {
        let config = TreeConfig {
            viewport: ViewportConfig {
                zoomable: false,
                ..ViewportConfig::default()
            },
            ..TreeConfig::default()
        };
        let mut view = TreeView::new(config);
        assert!(!view.pan_by(Vec2::new(10.0, 0.0)));
        assert!(!view.zoom_about(0.5, Point::ZERO));
        assert!(!view.on_zoom(0.5, Vec2::ZERO));
        assert_eq!(view.viewport(), Viewport::default());
    }

    #[test]
    fn degenerate_zoom_scales_are_rejected() {
        let recorder = Recorder::default();
        let mut view = TreeView::new(TreeConfig::default()).with_observer(recorder.clone());
        assert!(!view.on_zoom(f64::NAN, Vec2::new(1.0, 1.0)));
        assert!(!view.on_zoom(0.0, Vec2::new(1.0, 1.0)));
        assert!(!view.on_zoom(f64::INFINITY, Vec2::new(1.0, 1.0)));
        assert_eq!(view.viewport(), Viewport::default());
        assert!(recorder.take().is_empty(), "rejected gestures are not reported");
    }

    #[test]
    fn separation_keeps_cousins_apart() {
        let mut view = TreeView::new(TreeConfig::default());
        view.set_data(&org_chart()).unwrap();
        let layout = view.layout();
        let x = |name| layout.position_of(id_of(&view, name)).unwrap().x;
        let sibling_gap = x("Designer") - x("Engineer");
        let cousin_gap = x("Accountant") - x("Designer");
        assert!(sibling_gap < cousin_gap, "{sibling_gap} vs {cousin_gap}");
    }
}
