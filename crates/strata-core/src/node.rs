//! Domain nodes and tree traversal.
//!
//! Concrete node types implement [`Node`] and are handed to a
//! [`Scene`](crate::Scene), which owns them together with the framework state
//! each node carries: name, parent, ordered children, the node's
//! [`ViewList`], and, for targets, the list of views shown there.
//!
//! Traversal is exposed as lazy iterators ([`Descendants`], [`Ancestors`]).
//! Each call to the scene yields a fresh iterator; none of them is a live
//! cursor.

use std::any::Any;

use slotmap::{new_key_type, SlotMap};

use crate::class::{Class, Identifiable};
use crate::event::NodeEventArgs;
use crate::view_list::ViewList;

new_key_type! {
    /// A stable handle to a node in a [`Scene`](crate::Scene).
    ///
    /// The handle stays valid while the node moves around the tree and becomes
    /// invalid when the node is removed from the scene.
    pub struct NodeId;

    /// Identifies an event listener registered on a node.
    pub struct ListenerId;
}

/// Root class of every node.
pub static BASE_NODE: Class = Class::root("BaseNode");

/// Domain data placed in the scene tree.
///
/// Everything except [`Identifiable::class`] has a default.
pub trait Node: Identifiable + Any {
    /// Type name used to generate default node names.
    fn type_name(&self) -> &str {
        self.class_name()
    }

    /// Extra text shown after the name in [`Scene::display_name`](crate::Scene::display_name).
    fn name_extension(&self) -> Option<String> {
        None
    }

    /// Whether the node takes part in
    /// [`Scene::set_active_interactive`](crate::Scene::set_active_interactive).
    fn can_be_active(&self) -> bool {
        false
    }

    /// Whether an unchecked node may be checked in `target`.
    fn can_be_checked(&self, _target: &dyn Node) -> bool {
        true
    }

    /// One-time setup, run by [`Scene::initialize`](crate::Scene::initialize).
    fn initialize_core(&mut self) {}

    /// Called last for every notification raised on the node.
    fn notify_core(&mut self, _args: &NodeEventArgs) {}
}

pub(crate) type EventListener = Box<dyn FnMut(&NodeEventArgs)>;

/// State carried by a node that is also a rendering target.
#[derive(Default)]
pub(crate) struct TargetData {
    pub(crate) shown_here: ViewList,
}

/// Scene-side record of a node.
pub(crate) struct NodeData {
    pub(crate) payload: Box<dyn Node>,
    pub(crate) name: Option<String>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) views: ViewList,
    pub(crate) target: Option<TargetData>,
    pub(crate) listeners: SlotMap<ListenerId, EventListener>,
    pub(crate) active: bool,
    pub(crate) initialized: bool,
}

impl NodeData {
    pub(crate) fn new(payload: Box<dyn Node>, target: Option<TargetData>) -> Self {
        Self {
            payload,
            name: None,
            parent: None,
            children: Vec::new(),
            views: ViewList::new(),
            target,
            listeners: SlotMap::with_key(),
            active: false,
            initialized: false,
        }
    }

    pub(crate) fn payload_is<T: Node>(&self) -> bool {
        (self.payload.as_ref() as &dyn Any).is::<T>()
    }
}

/// Depth-first pre-order iterator over a subtree.
///
/// A child is yielded before its own descendants, siblings in insertion order.
pub struct Descendants<'a> {
    nodes: &'a SlotMap<NodeId, NodeData>,
    stack: Vec<NodeId>,
}

impl<'a> Descendants<'a> {
    pub(crate) fn new(
        nodes: &'a SlotMap<NodeId, NodeData>,
        start: NodeId,
        include_start: bool,
    ) -> Self {
        let stack = match nodes.get(start) {
            Some(_) if include_start => vec![start],
            Some(data) => data.children.iter().rev().copied().collect(),
            None => Vec::new(),
        };
        Self { nodes, stack }
    }
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        if let Some(data) = self.nodes.get(id) {
            self.stack.extend(data.children.iter().rev().copied());
        }
        Some(id)
    }
}

/// Iterator walking parent links towards the root.
pub struct Ancestors<'a> {
    nodes: &'a SlotMap<NodeId, NodeData>,
    next: Option<NodeId>,
    skip_root: bool,
}

impl<'a> Ancestors<'a> {
    pub(crate) fn new(
        nodes: &'a SlotMap<NodeId, NodeData>,
        start: NodeId,
        include_start: bool,
    ) -> Self {
        let next = if include_start {
            nodes.get(start).map(|_| start)
        } else {
            nodes.get(start).and_then(|data| data.parent)
        };
        Self {
            nodes,
            next,
            skip_root: false,
        }
    }

    /// Stop before the node that has no parent.
    pub(crate) fn except_root(mut self) -> Self {
        self.skip_root = true;
        self
    }
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.next?;
        let parent = self.nodes.get(id).and_then(|data| data.parent);
        if self.skip_root && parent.is_none() {
            self.next = None;
            return None;
        }
        self.next = parent;
        Some(id)
    }
}
