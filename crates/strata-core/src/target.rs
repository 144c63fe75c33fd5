//! The target-owned visibility protocol.
//!
//! A target is a node that is also a rendering context. For every node it can
//! show, the (node, target) pair is in one of three states:
//!
//! | state                  | view exists | flag  |
//! |------------------------|-------------|-------|
//! | no view                | no          |       |
//! | hidden (persistent)    | yes         | false |
//! | visible                | yes         | true  |
//!
//! [`Scene::show_view`] and [`Scene::hide_view`] are the only transitions.
//! A view that does not stay alive when invisible goes straight from visible
//! back to "no view". Removing a view always updates the target's
//! "shown here" list and the node's [`ViewList`] together.

use crate::class::Class;
use crate::logging::targets;
use crate::node::{Node, NodeData, NodeId, TargetData, BASE_NODE};
use crate::scene::Scene;
use crate::view::{BaseView, ViewId};
use crate::view_list::{ViewBinding, ViewList};

/// Root class of every target node.
pub static TARGET_NODE: Class = Class::derived("TargetNode", &BASE_NODE);

impl Scene {
    /// Add a free-standing target node to the scene.
    pub fn insert_target<N: Node>(&mut self, node: N) -> NodeId {
        let id = self
            .nodes
            .insert(NodeData::new(Box::new(node), Some(TargetData::default())));
        tracing::trace!(
            target: targets::SCENE,
            ?id,
            class = self.nodes[id].payload.class_name(),
            "inserted target"
        );
        id
    }

    /// Whether `node` was inserted as a target.
    pub fn is_target(&self, node: NodeId) -> bool {
        self.nodes.get(node).is_some_and(|data| data.target.is_some())
    }

    /// Every view `target` has instantiated. `None` if `target` is not a target.
    pub fn views_shown_here(&self, target: NodeId) -> Option<&ViewList> {
        self.nodes.get(target)?.target.as_ref().map(|data| &data.shown_here)
    }

    /// The view of `node` in `target`, if one exists.
    pub fn view_for(&self, node: NodeId, target: NodeId) -> Option<ViewId> {
        self.nodes.get(node)?.views.find_by_target(target)
    }

    /// Whether the factory can produce a view of `node` for `target`.
    pub fn can_show_view(&self, target: NodeId, node: NodeId) -> bool {
        let (Some(target_data), Some(node_data)) = (self.nodes.get(target), self.nodes.get(node))
        else {
            return false;
        };
        target_data.target.is_some()
            && self
                .factory
                .can_create(node_data.payload.as_ref(), target_data.payload.class())
    }

    /// Whether `node` has a view in `target` and the view is shown.
    pub fn is_visible_view(&self, target: NodeId, node: NodeId) -> bool {
        self.view_for(node, target)
            .and_then(|view| self.views.get(view))
            .is_some_and(BaseView::is_visible)
    }

    /// Show `node` in `target`.
    ///
    /// Creates, binds and initializes a view if none exists; re-shows a hidden
    /// persistent view. Returns `false` if nothing changed, including when the
    /// factory has no view for the pair.
    pub fn show_view(&mut self, target: NodeId, node: NodeId) -> bool {
        if !self.is_target(target) || !self.contains(node) {
            tracing::warn!(
                target: targets::VIEW,
                ?target,
                ?node,
                "show_view: invalid target or node"
            );
            return false;
        }

        if let Some(view_id) = self.view_for(node, target) {
            let Some(view) = self.views.get_mut(view_id) else {
                return false;
            };
            if view.is_visible() || !view.stay_alive_if_invisible() {
                return false;
            }
            view.show();
            tracing::debug!(target: targets::VIEW, ?target, ?node, ?view_id, "hidden -> visible");
            return true;
        }

        let target_class = self.nodes[target].payload.class();
        let Some(view) = self.factory.create(self.nodes[node].payload.as_ref(), target_class) else {
            return false;
        };

        let view_id = self.views.insert(BaseView::attach(view, node, target));
        let binding = ViewBinding {
            view: view_id,
            node,
            target,
        };
        self.nodes[node].views.add(binding);
        if let Some(target_data) = self.nodes[target].target.as_mut() {
            target_data.shown_here.add(binding);
        }
        self.views[view_id].show();
        tracing::debug!(target: targets::VIEW, ?target, ?node, ?view_id, "no view -> visible");
        true
    }

    /// Hide `node` in `target`.
    ///
    /// A persistent view is kept hidden; any other view is torn down. Returns
    /// `false` if there was no visible view.
    pub fn hide_view(&mut self, target: NodeId, node: NodeId) -> bool {
        let Some(view_id) = self.view_for(node, target) else {
            return false;
        };
        let Some(view) = self.views.get_mut(view_id) else {
            return false;
        };
        if !view.is_visible() {
            return false;
        }
        if view.stay_alive_if_invisible() {
            view.hide();
            tracing::debug!(target: targets::VIEW, ?target, ?node, ?view_id, "visible -> hidden");
            return true;
        }
        tracing::debug!(target: targets::VIEW, ?target, ?node, ?view_id, "visible -> no view");
        self.remove_view_shown_here(target, view_id)
    }

    /// Tear down one view instantiated by `target`.
    ///
    /// The view is hidden if needed, disposed, removed from `target`'s list and
    /// from its node's list, and dropped. Returns `false` if the view is not (or
    /// no longer) shown in `target`.
    pub fn remove_view_shown_here(&mut self, target: NodeId, view: ViewId) -> bool {
        let removed = self
            .nodes
            .get_mut(target)
            .and_then(|data| data.target.as_mut())
            .and_then(|data| data.shown_here.remove(view));
        if removed.is_none() {
            tracing::trace!(
                target: targets::VIEW,
                ?target,
                ?view,
                "remove_view_shown_here: not shown here"
            );
            return false;
        }
        self.teardown_view(view, false);
        true
    }

    /// Tear down every view `target` has instantiated.
    ///
    /// Every view is hidden before it is disposed, including persistent views
    /// that are already hidden. Returns how many views were removed. Afterwards
    /// no node refers to a view in `target`.
    #[tracing::instrument(skip(self), target = "strata_core::view", level = "debug")]
    pub fn remove_all_views_shown_here(&mut self, target: NodeId) -> usize {
        let Some(target_data) = self
            .nodes
            .get_mut(target)
            .and_then(|data| data.target.as_mut())
        else {
            return 0;
        };
        let bindings = target_data.shown_here.take();
        let count = bindings.len();
        for binding in bindings {
            self.teardown_view(binding.view, true);
        }
        tracing::debug!(target: targets::VIEW, ?target, count, "removed all views shown here");
        count
    }

    /// Hide, dispose, unlist from the node and drop a view that has already
    /// been unlisted from its target.
    ///
    /// Without `force_hide`, a hidden persistent view is not hidden again.
    fn teardown_view(&mut self, view_id: ViewId, force_hide: bool) {
        let Some(mut view) = self.views.remove(view_id) else {
            return;
        };
        if force_hide || view.is_visible() || !view.stay_alive_if_invisible() {
            view.hide();
        }
        view.dispose();
        if let Some(node) = self.nodes.get_mut(view.node()) {
            node.views.remove(view_id);
        }
        view.detach();
    }
}
