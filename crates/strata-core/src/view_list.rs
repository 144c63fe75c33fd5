//! Ordered, duplicate-free view collections.
//!
//! A data node keeps one [`ViewList`] of the views created for it (at most one
//! per target). A target keeps a second list of every view it has instantiated.
//! Both lists hold [`ViewBinding`]s, so either side can resolve the other
//! without touching the view arena.

use crate::node::NodeId;
use crate::view::ViewId;

/// The (view, node, target) triple recorded when a view is attached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewBinding {
    /// The view.
    pub view: ViewId,
    /// The node the view presents.
    pub node: NodeId,
    /// The target the view is shown in.
    pub target: NodeId,
}

/// An insertion-ordered list of view bindings with no duplicate views.
#[derive(Clone, Debug, Default)]
pub struct ViewList {
    entries: Vec<ViewBinding>,
}

impl ViewList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of views in the list.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `view` is in the list.
    pub fn contains(&self, view: ViewId) -> bool {
        self.entries.iter().any(|entry| entry.view == view)
    }

    /// Append a binding. Returns `false` if the view is already listed.
    pub fn add(&mut self, binding: ViewBinding) -> bool {
        if self.contains(binding.view) {
            return false;
        }
        self.entries.push(binding);
        true
    }

    /// Remove `view`, returning its binding if it was listed.
    pub fn remove(&mut self, view: ViewId) -> Option<ViewBinding> {
        let index = self.entries.iter().position(|entry| entry.view == view)?;
        Some(self.entries.remove(index))
    }

    /// The first view shown in `target`.
    pub fn find_by_target(&self, target: NodeId) -> Option<ViewId> {
        self.entries
            .iter()
            .find(|entry| entry.target == target)
            .map(|entry| entry.view)
    }

    /// The first view presenting `node`.
    pub fn find_by_node(&self, node: NodeId) -> Option<ViewId> {
        self.entries
            .iter()
            .find(|entry| entry.node == node)
            .map(|entry| entry.view)
    }

    /// Number of views shown in `target`.
    pub fn count_by_target(&self, target: NodeId) -> usize {
        self.entries.iter().filter(|entry| entry.target == target).count()
    }

    /// Iterate the bindings in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, ViewBinding> {
        self.entries.iter()
    }

    /// The listed view ids in insertion order.
    pub fn view_ids(&self) -> Vec<ViewId> {
        self.entries.iter().map(|entry| entry.view).collect()
    }

    /// Remove every binding.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Take every binding, leaving the list empty.
    pub fn take(&mut self) -> Vec<ViewBinding> {
        std::mem::take(&mut self.entries)
    }
}

impl<'a> IntoIterator for &'a ViewList {
    type Item = &'a ViewBinding;
    type IntoIter = std::slice::Iter<'a, ViewBinding>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn ids() -> (Vec<NodeId>, Vec<ViewId>) {
        let mut nodes = SlotMap::<NodeId, ()>::with_key();
        let mut views = SlotMap::<ViewId, ()>::with_key();
        let node_ids = (0..3).map(|_| nodes.insert(())).collect();
        let view_ids = (0..3).map(|_| views.insert(())).collect();
        (node_ids, view_ids)
    }

    #[test]
    fn test_add_rejects_duplicates() {
        let (nodes, views) = ids();
        let mut list = ViewList::new();
        let binding = ViewBinding {
            view: views[0],
            node: nodes[0],
            target: nodes[1],
        };
        assert!(list.add(binding));
        assert!(!list.add(binding));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_lookup_by_target_and_node() {
        let (nodes, views) = ids();
        let mut list = ViewList::new();
        list.add(ViewBinding {
            view: views[0],
            node: nodes[0],
            target: nodes[1],
        });
        list.add(ViewBinding {
            view: views[1],
            node: nodes[0],
            target: nodes[2],
        });

        assert_eq!(list.find_by_target(nodes[2]), Some(views[1]));
        assert_eq!(list.find_by_target(nodes[0]), None);
        assert_eq!(list.find_by_node(nodes[0]), Some(views[0]));
        assert_eq!(list.count_by_target(nodes[1]), 1);
    }

    #[test]
    fn test_remove_preserves_order() {
        let (nodes, views) = ids();
        let mut list = ViewList::new();
        for &view in &views {
            list.add(ViewBinding {
                view,
                node: nodes[0],
                target: nodes[1],
            });
        }

        assert!(list.remove(views[1]).is_some());
        assert!(list.remove(views[1]).is_none());
        assert_eq!(list.view_ids(), vec![views[0], views[2]]);

        let taken = list.take();
        assert_eq!(taken.len(), 2);
        assert!(list.is_empty());
    }
}
