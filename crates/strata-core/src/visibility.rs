//! The node-facing visibility API.
//!
//! Everything here is expressed through [`Scene::show_view`] and
//! [`Scene::hide_view`], so the node-driven and target-driven call styles
//! cannot disagree.

use crate::event::{Changes, NodeEventArgs};
use crate::logging::targets;
use crate::node::NodeId;
use crate::scene::Scene;

/// Aggregate visibility of a node and its subtree in one target, as shown by
/// a tree-view check box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckBoxState {
    /// Nothing in the subtree can be shown in the target.
    Never,
    /// Nothing is visible and the node refuses to be checked.
    Disabled,
    /// Nothing is visible.
    None,
    /// Some, but not all, of the showable nodes are visible.
    Some,
    /// Every showable node is visible.
    All,
}

impl Scene {
    /// Whether `node` has a visible view in `target`.
    pub fn is_visible(&self, node: NodeId, target: NodeId) -> bool {
        self.is_visible_view(target, node)
    }

    /// Show or hide `node` in `target`. Returns whether anything changed.
    ///
    /// `true` delegates to [`show_view`](Self::show_view), `false` to
    /// [`hide_view`](Self::hide_view).
    pub fn set_visible(&mut self, node: NodeId, target: NodeId, visible: bool) -> bool {
        if visible {
            self.show_view(target, node)
        } else {
            self.hide_view(target, node)
        }
    }

    /// [`set_visible`](Self::set_visible), then notify [`Changes::VisibleState`]
    /// if the visibility changed.
    ///
    /// This is the entry point for UI commands.
    pub fn set_visible_interactive(&mut self, node: NodeId, target: NodeId, visible: bool) -> bool {
        if !self.set_visible(node, target, visible) {
            return false;
        }
        self.notify_visible_state(node, true);
        true
    }

    /// Aggregate visibility of `node` and its descendants in `target`.
    pub fn check_box_state(&self, node: NodeId, target: NodeId) -> CheckBoxState {
        let mut candidates = 0usize;
        let mut all = 0usize;
        let mut none = 0usize;

        if self.can_show_view(target, node) {
            candidates += 1;
            if self.is_visible(node, target) {
                all += 1;
            } else {
                none += 1;
            }
        }
        for &child in self.children(node) {
            match self.check_box_state(child, target) {
                CheckBoxState::Never => continue,
                CheckBoxState::All => all += 1,
                CheckBoxState::None => none += 1,
                // A disabled child keeps the parent out of both All and None.
                CheckBoxState::Disabled | CheckBoxState::Some => {}
            }
            candidates += 1;
        }

        if candidates == 0 {
            CheckBoxState::Never
        } else if candidates == all {
            CheckBoxState::All
        } else if candidates == none {
            if self.can_be_checked(node, target) {
                CheckBoxState::None
            } else {
                CheckBoxState::Disabled
            }
        } else {
            CheckBoxState::Some
        }
    }

    /// Show or hide `node` and every showable descendant in `target`.
    ///
    /// Each node whose subtree changed is notified with
    /// [`Changes::VisibleState`]. Returns whether anything changed.
    pub fn set_visible_interactive_recursive(
        &mut self,
        node: NodeId,
        target: NodeId,
        visible: bool,
    ) -> bool {
        self.set_subtree_visible(node, target, visible, true)
    }

    /// Check-box click: show the whole subtree if nothing in it is visible,
    /// otherwise hide it.
    pub fn toggle_visible_interactive(&mut self, node: NodeId, target: NodeId) -> bool {
        match self.check_box_state(node, target) {
            CheckBoxState::Never | CheckBoxState::Disabled => false,
            CheckBoxState::None => self.set_visible_interactive_recursive(node, target, true),
            CheckBoxState::Some | CheckBoxState::All => {
                self.set_visible_interactive_recursive(node, target, false)
            }
        }
    }

    fn set_subtree_visible(
        &mut self,
        node: NodeId,
        target: NodeId,
        visible: bool,
        top_level: bool,
    ) -> bool {
        if matches!(
            self.check_box_state(node, target),
            CheckBoxState::Never | CheckBoxState::Disabled
        ) {
            return false;
        }

        let mut changed = self.set_visible(node, target, visible);
        let children = self.children(node).to_vec();
        for child in children {
            if self.set_subtree_visible(child, target, visible, false) {
                changed = true;
            }
        }
        if changed {
            self.notify_visible_state(node, top_level);
        }
        changed
    }

    fn can_be_checked(&self, node: NodeId, target: NodeId) -> bool {
        match (self.node(node), self.node(target)) {
            (Some(node), Some(target)) => node.can_be_checked(target),
            _ => false,
        }
    }

    fn notify_visible_state(&mut self, node: NodeId, include_ancestors: bool) {
        let args = NodeEventArgs::new(Changes::VisibleState, node);
        self.notify(node, &args);
        if !include_ancestors || !self.config.notify_ancestors_on_visibility {
            return;
        }
        let ancestors: Vec<_> = self.ancestors_except_root(node).collect();
        tracing::trace!(
            target: targets::SCENE,
            ?node,
            count = ancestors.len(),
            "notifying ancestors of visibility change"
        );
        for ancestor in ancestors {
            self.notify(ancestor, &args);
        }
    }
}
