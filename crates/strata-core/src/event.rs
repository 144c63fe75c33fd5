//! Node change notifications.

use crate::node::NodeId;

/// What changed about a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Changes {
    /// The node's visibility in some target changed.
    VisibleState,
    /// The node was renamed.
    NodeName,
    /// The node became active or inactive.
    Active,
    /// A child was attached to the node.
    ChildAdded,
    /// A child of the node was removed from the scene.
    ChildDeleted,
    /// The node's domain data changed; views should re-derive their presentation.
    Data,
}

/// Immutable payload delivered to every view of a node by
/// [`Scene::notify`](crate::Scene::notify).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeEventArgs {
    change: Changes,
    origin: NodeId,
}

impl NodeEventArgs {
    /// Create a notification for `change` raised by `origin`.
    pub fn new(change: Changes, origin: NodeId) -> Self {
        Self { change, origin }
    }

    /// The kind of change.
    pub fn change(&self) -> Changes {
        self.change
    }

    /// The node that raised the notification.
    pub fn origin(&self) -> NodeId {
        self.origin
    }

    /// Whether this notification is about `change`.
    pub fn is_changed(&self, change: Changes) -> bool {
        self.change == change
    }
}
