//! The scene arena.
//!
//! A [`Scene`] owns every node and view of one application tree. Nodes and
//! views are stored in `slotmap` arenas and referenced by [`NodeId`] and
//! [`ViewId`], so parent links, view lists and the view-to-target
//! back-reference never form ownership cycles.
//!
//! This module holds the tree half of the node API: ownership, traversal,
//! naming, notification and removal. The show/hide protocol lives in
//! [`crate::target`].

use std::any::Any;
use std::fmt::Write as FmtWrite;
use std::sync::Arc;

use slotmap::SlotMap;

use crate::class::Class;
use crate::config::SceneConfig;
use crate::error::{SceneError, SceneResult};
use crate::event::{Changes, NodeEventArgs};
use crate::factory::ViewFactory;
use crate::logging::targets;
use crate::node::{Ancestors, Descendants, ListenerId, Node, NodeData, NodeId};
use crate::view::{BaseView, View, ViewId};
use crate::view_list::ViewList;

/// Arena of nodes and views sharing one [`ViewFactory`].
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use strata_core::class::{Class, Identifiable};
/// use strata_core::node::{Node, BASE_NODE};
/// use strata_core::{Scene, ViewFactory};
///
/// static FOLDER_NODE: Class = Class::derived("FolderNode", &BASE_NODE);
///
/// struct FolderNode;
///
/// impl Identifiable for FolderNode {
///     fn class(&self) -> &'static Class {
///         &FOLDER_NODE
///     }
/// }
///
/// impl Node for FolderNode {}
///
/// let mut scene = Scene::new(Arc::new(ViewFactory::new()));
/// let root = scene.insert_node(FolderNode);
/// let child = scene.insert_node(FolderNode);
/// scene.add_child(root, child)?;
///
/// assert_eq!(scene.parent(child), Some(root));
/// assert_eq!(scene.name(child), "FolderNode 1");
/// assert_eq!(scene.this_and_descendants(root).count(), 2);
/// # Ok::<(), strata_core::SceneError>(())
/// ```
pub struct Scene {
    pub(crate) nodes: SlotMap<NodeId, NodeData>,
    pub(crate) views: SlotMap<ViewId, BaseView>,
    pub(crate) factory: Arc<ViewFactory>,
    pub(crate) config: SceneConfig,
}

impl Scene {
    /// Create an empty scene resolving views through `factory`.
    pub fn new(factory: Arc<ViewFactory>) -> Self {
        Self::with_config(factory, SceneConfig::default())
    }

    /// Create an empty scene with explicit configuration.
    pub fn with_config(factory: Arc<ViewFactory>, config: SceneConfig) -> Self {
        Self {
            nodes: SlotMap::with_key(),
            views: SlotMap::with_key(),
            factory,
            config,
        }
    }

    /// The factory views are resolved through.
    pub fn factory(&self) -> &ViewFactory {
        &self.factory
    }

    /// The scene configuration.
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    // =========================================================================
    // Storage
    // =========================================================================

    /// Add a free-standing node to the scene.
    pub fn insert_node<N: Node>(&mut self, node: N) -> NodeId {
        let id = self.nodes.insert(NodeData::new(Box::new(node), None));
        tracing::trace!(
            target: targets::SCENE,
            ?id,
            class = self.nodes[id].payload.class_name(),
            "inserted node"
        );
        id
    }

    /// Whether `id` refers to a node in this scene.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of nodes in the scene.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of live views in the scene.
    pub fn view_count(&self) -> usize {
        self.views.len()
    }

    /// The node payload.
    pub fn node(&self, id: NodeId) -> Option<&dyn Node> {
        self.nodes.get(id).map(|data| data.payload.as_ref())
    }

    /// The node payload, mutably.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut dyn Node> {
        Some(self.nodes.get_mut(id)?.payload.as_mut())
    }

    /// The node payload downcast to `T`.
    pub fn node_as<T: Node>(&self, id: NodeId) -> Option<&T> {
        let payload = self.nodes.get(id)?.payload.as_ref();
        (payload as &dyn Any).downcast_ref::<T>()
    }

    /// The node payload downcast to `T`, mutably.
    pub fn node_as_mut<T: Node>(&mut self, id: NodeId) -> Option<&mut T> {
        let payload = self.nodes.get_mut(id)?.payload.as_mut();
        (payload as &mut dyn Any).downcast_mut::<T>()
    }

    /// The class of the node payload.
    pub fn class_of(&self, id: NodeId) -> Option<&'static Class> {
        self.node(id).map(|node| node.class())
    }

    /// The views created for `node`, one per target.
    pub fn views(&self, node: NodeId) -> Option<&ViewList> {
        self.nodes.get(node).map(|data| &data.views)
    }

    /// A live view.
    pub fn view(&self, id: ViewId) -> Option<&BaseView> {
        self.views.get(id)
    }

    /// A live view downcast to its concrete type.
    pub fn view_as<V: View>(&self, id: ViewId) -> Option<&V> {
        self.views.get(id)?.downcast_ref::<V>()
    }

    /// Every node without a parent.
    pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .filter(|(_, data)| data.parent.is_none())
            .map(|(id, _)| id)
    }

    // =========================================================================
    // Child-parent relationship
    // =========================================================================

    /// Append `child` to `parent`'s children.
    ///
    /// A child that already has a parent is detached from it first. There is no
    /// cycle detection: callers must not add an ancestor below its descendant.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> SceneResult<()> {
        self.insert_child(parent, child, false)
    }

    /// Insert `child` as the first of `parent`'s children.
    pub fn add_child_first(&mut self, parent: NodeId, child: NodeId) -> SceneResult<()> {
        self.insert_child(parent, child, true)
    }

    /// [`add_child`](Self::add_child), then notify the parent with
    /// [`Changes::ChildAdded`].
    pub fn add_child_interactive(&mut self, parent: NodeId, child: NodeId) -> SceneResult<()> {
        self.insert_child(parent, child, false)?;
        self.notify(parent, &NodeEventArgs::new(Changes::ChildAdded, child));
        Ok(())
    }

    fn insert_child(&mut self, parent: NodeId, child: NodeId, first: bool) -> SceneResult<()> {
        if !self.nodes.contains_key(parent) {
            return Err(SceneError::InvalidNode(parent));
        }
        if !self.nodes.contains_key(child) {
            return Err(SceneError::InvalidNode(child));
        }
        if parent == child {
            return Err(SceneError::IllegalChild(child));
        }
        if self.nodes[child].parent.is_some() {
            self.detach(child);
        }

        let siblings = &mut self.nodes[parent].children;
        if first {
            siblings.insert(0, child);
        } else {
            siblings.push(child);
        }
        self.nodes[child].parent = Some(parent);

        if self.config.generate_names && self.nodes[child].name.is_none() {
            let name = self.generate_name(child);
            self.nodes[child].name = Some(name);
        }
        tracing::trace!(target: targets::SCENE, ?parent, ?child, first, "added child");
        Ok(())
    }

    /// Remove `node` from its parent's children and clear its parent.
    ///
    /// Returns `false` if the node has no parent or is missing from the
    /// parent's children.
    pub fn detach(&mut self, node: NodeId) -> bool {
        let Some(parent) = self.nodes.get(node).and_then(|data| data.parent) else {
            tracing::warn!(target: targets::SCENE, ?node, "detach: node has no parent");
            return false;
        };
        let Some(index) = self.child_index(node) else {
            tracing::warn!(
                target: targets::SCENE,
                ?node,
                ?parent,
                "detach: node is not a child of its parent"
            );
            return false;
        };
        self.nodes[parent].children.remove(index);
        self.nodes[node].parent = None;
        tracing::trace!(target: targets::SCENE, ?node, ?parent, "detached");
        true
    }

    /// Sort `node`'s children by name.
    pub fn sort_children_by_name(&mut self, node: NodeId) {
        let Some(data) = self.nodes.get(node) else {
            return;
        };
        let mut keyed: Vec<_> = data
            .children
            .iter()
            .map(|&child| (self.name(child), child))
            .collect();
        keyed.sort_by(|(a, _), (b, _)| a.cmp(b));
        self.nodes[node].children = keyed.into_iter().map(|(_, child)| child).collect();
    }

    /// The children of `node` in insertion order. Empty for a stale id.
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes.get(node).map_or(&[], |data| data.children.as_slice())
    }

    /// Number of children of `node`.
    pub fn child_count(&self, node: NodeId) -> usize {
        self.children(node).len()
    }

    /// The child at `index`.
    pub fn child(&self, node: NodeId, index: usize) -> Option<NodeId> {
        self.children(node).get(index).copied()
    }

    /// Position of `node` among its parent's children.
    pub fn child_index(&self, node: NodeId) -> Option<usize> {
        let parent = self.parent(node)?;
        self.children(parent).iter().position(|&child| child == node)
    }

    /// The parent of `node`.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node)?.parent
    }

    /// Whether `node` has a parent.
    pub fn has_parent(&self, node: NodeId) -> bool {
        self.parent(node).is_some()
    }

    /// The topmost ancestor of `node` (the node itself if it has no parent).
    pub fn root(&self, node: NodeId) -> Option<NodeId> {
        self.this_and_ancestors(node).last()
    }

    // =========================================================================
    // Traversal
    // =========================================================================

    /// Descendants of `node` in depth-first pre-order.
    pub fn descendants(&self, node: NodeId) -> Descendants<'_> {
        Descendants::new(&self.nodes, node, false)
    }

    /// `node` followed by its descendants in depth-first pre-order.
    pub fn this_and_descendants(&self, node: NodeId) -> Descendants<'_> {
        Descendants::new(&self.nodes, node, true)
    }

    /// Ancestors of `node` from the parent up to the root.
    pub fn ancestors(&self, node: NodeId) -> Ancestors<'_> {
        Ancestors::new(&self.nodes, node, false)
    }

    /// `node` followed by its ancestors.
    pub fn this_and_ancestors(&self, node: NodeId) -> Ancestors<'_> {
        Ancestors::new(&self.nodes, node, true)
    }

    /// Ancestors of `node`, stopping before the root.
    pub fn ancestors_except_root(&self, node: NodeId) -> Ancestors<'_> {
        Ancestors::new(&self.nodes, node, false).except_root()
    }

    // =========================================================================
    // Lookup by type, class or name
    // =========================================================================

    /// The first child whose payload is a `T`.
    pub fn child_of_type<T: Node>(&self, node: NodeId) -> Option<NodeId> {
        self.children_of_type::<T>(node).next()
    }

    /// Whether any child's payload is a `T`.
    pub fn has_child_of_type<T: Node>(&self, node: NodeId) -> bool {
        self.child_of_type::<T>(node).is_some()
    }

    /// Children whose payload is a `T`.
    pub fn children_of_type<T: Node>(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(node)
            .iter()
            .copied()
            .filter(move |&child| self.nodes[child].payload_is::<T>())
    }

    /// Descendants whose payload is a `T`, in pre-order.
    pub fn descendants_of_type<T: Node>(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.descendants(node)
            .filter(move |&id| self.nodes[id].payload_is::<T>())
    }

    /// The nearest ancestor whose payload is a `T`.
    pub fn ancestor_of_type<T: Node>(&self, node: NodeId) -> Option<NodeId> {
        self.ancestors(node).find(|&id| self.nodes[id].payload_is::<T>())
    }

    /// `node` itself or its nearest ancestor whose payload is a `T`.
    pub fn this_or_ancestor_of_type<T: Node>(&self, node: NodeId) -> Option<NodeId> {
        self.this_and_ancestors(node)
            .find(|&id| self.nodes[id].payload_is::<T>())
    }

    /// Children whose class is `class` or derives from it.
    pub fn children_by_class<'a>(
        &'a self,
        node: NodeId,
        class: &'a Class,
    ) -> impl Iterator<Item = NodeId> + 'a {
        self.children(node)
            .iter()
            .copied()
            .filter(move |&child| self.nodes[child].payload.is_a(class))
    }

    /// The first child named `name`.
    pub fn child_by_name(&self, node: NodeId, name: &str) -> Option<NodeId> {
        self.children(node)
            .iter()
            .copied()
            .find(|&child| self.nodes[child].name.as_deref() == Some(name))
    }

    // =========================================================================
    // Names
    // =========================================================================

    /// The node's name, falling back to its type name. Empty for a stale id.
    pub fn name(&self, node: NodeId) -> String {
        match self.nodes.get(node) {
            Some(data) => data
                .name
                .clone()
                .unwrap_or_else(|| data.payload.type_name().to_string()),
            None => String::new(),
        }
    }

    /// Set the node's name. Returns `false` for a stale id.
    pub fn set_name(&mut self, node: NodeId, name: impl Into<String>) -> bool {
        match self.nodes.get_mut(node) {
            Some(data) => {
                data.name = Some(name.into());
                true
            }
            None => false,
        }
    }

    /// Rename the node and notify [`Changes::NodeName`] if the name changed.
    pub fn set_name_interactive(&mut self, node: NodeId, name: impl Into<String>) -> bool {
        let name = name.into();
        if !self.contains(node) || self.name(node) == name {
            return false;
        }
        self.set_name(node, name);
        self.notify(node, &NodeEventArgs::new(Changes::NodeName, node));
        true
    }

    /// Notify [`Changes::Data`] so views re-derive their presentation from the
    /// node's domain data. Returns `false` for a stale id.
    pub fn data_changed(&mut self, node: NodeId) -> bool {
        if !self.contains(node) {
            return false;
        }
        self.notify(node, &NodeEventArgs::new(Changes::Data, node));
        true
    }

    /// The name followed by the node's name extension in brackets, if any.
    pub fn display_name(&self, node: NodeId) -> String {
        let name = self.name(node);
        match self.node(node).and_then(|payload| payload.name_extension()) {
            Some(extension) if !extension.is_empty() => format!("{name} [{extension}]"),
            _ => name,
        }
    }

    /// Names from the root down to `node`, each preceded by `\`.
    pub fn path(&self, node: NodeId) -> String {
        let mut chain: Vec<_> = self.this_and_ancestors(node).collect();
        chain.reverse();
        chain.into_iter().fold(String::new(), |mut path, id| {
            path.push('\\');
            path.push_str(&self.name(id));
            path
        })
    }

    /// `"<TypeName> <n>"`, `n` one past the number of same-typed siblings and
    /// bumped until no sibling carries the name. The bare type name for a node
    /// without a parent.
    fn generate_name(&self, node: NodeId) -> String {
        let type_name = self.nodes[node].payload.type_name().to_string();
        let Some(parent) = self.parent(node) else {
            return type_name;
        };
        let siblings: Vec<_> = self
            .children(parent)
            .iter()
            .copied()
            .filter(|&sibling| sibling != node)
            .collect();
        let same_typed = siblings
            .iter()
            .filter(|&&sibling| self.nodes[sibling].payload.type_name() == type_name)
            .count();

        let mut index = same_typed + 1;
        loop {
            let name = format!("{type_name} {index}");
            let taken = siblings
                .iter()
                .any(|&sibling| self.nodes[sibling].name.as_deref() == Some(name.as_str()));
            if !taken {
                return name;
            }
            index += 1;
        }
    }

    // =========================================================================
    // Notification
    // =========================================================================

    /// Deliver `args` to every view of `node` in list order, then to the node's
    /// listeners, then to the node itself.
    pub fn notify(&mut self, node: NodeId, args: &NodeEventArgs) {
        let Some(data) = self.nodes.get_mut(node) else {
            return;
        };
        tracing::trace!(
            target: targets::SCENE,
            ?node,
            change = ?args.change(),
            views = data.views.len(),
            "notify"
        );

        for binding in data.views.iter() {
            if let Some(view) = self.views.get_mut(binding.view) {
                view.notify(args);
            }
        }
        for listener in data.listeners.values_mut() {
            listener(args);
        }
        data.payload.notify_core(args);
    }

    /// Register a callback invoked for every notification on `node`.
    pub fn add_event_listener<F>(&mut self, node: NodeId, listener: F) -> Option<ListenerId>
    where
        F: FnMut(&NodeEventArgs) + 'static,
    {
        let data = self.nodes.get_mut(node)?;
        Some(data.listeners.insert(Box::new(listener)))
    }

    /// Remove a callback. Returns `false` if it was not registered on `node`.
    pub fn remove_event_listener(&mut self, node: NodeId, listener: ListenerId) -> bool {
        self.nodes
            .get_mut(node)
            .is_some_and(|data| data.listeners.remove(listener).is_some())
    }

    // =========================================================================
    // Initialization and activation
    // =========================================================================

    /// Run the node's one-time setup. Returns `false` if it already ran.
    pub fn initialize(&mut self, node: NodeId) -> bool {
        let Some(data) = self.nodes.get_mut(node) else {
            return false;
        };
        if data.initialized {
            return false;
        }
        data.payload.initialize_core();
        data.initialized = true;
        true
    }

    /// Initialize `node` and its descendants in pre-order.
    pub fn initialize_recursive(&mut self, node: NodeId) {
        let subtree: Vec<_> = self.this_and_descendants(node).collect();
        for id in subtree {
            self.initialize(id);
        }
    }

    /// Whether [`initialize`](Self::initialize) has run for `node`.
    pub fn is_initialized(&self, node: NodeId) -> bool {
        self.nodes.get(node).is_some_and(|data| data.initialized)
    }

    /// Whether `node` is the active one among its same-class siblings.
    pub fn is_active(&self, node: NodeId) -> bool {
        self.nodes.get(node).is_some_and(|data| data.active)
    }

    /// Make `node` active, deactivating any active sibling of the same class.
    ///
    /// Returns `false` if the node is already active or cannot be active, or
    /// if a sibling of the same class cannot be active. Nothing changes in
    /// that case.
    pub fn set_active_interactive(&mut self, node: NodeId) -> bool {
        let Some(data) = self.nodes.get(node) else {
            return false;
        };
        if data.active || !data.payload.can_be_active() {
            return false;
        }
        let class = data.payload.class();

        let same_class: Vec<_> = match data.parent {
            Some(parent) => self
                .children(parent)
                .iter()
                .copied()
                .filter(|&sibling| sibling != node && self.nodes[sibling].payload.class() == class)
                .collect(),
            None => Vec::new(),
        };
        if same_class
            .iter()
            .any(|&sibling| !self.nodes[sibling].payload.can_be_active())
        {
            tracing::debug!(
                target: targets::SCENE,
                ?node,
                "set_active_interactive: sibling cannot be active"
            );
            return false;
        }
        for sibling in same_class {
            if !self.nodes[sibling].active {
                continue;
            }
            self.nodes[sibling].active = false;
            self.notify(sibling, &NodeEventArgs::new(Changes::Active, sibling));
        }

        self.nodes[node].active = true;
        self.notify(node, &NodeEventArgs::new(Changes::Active, node));
        true
    }

    // =========================================================================
    // Removal
    // =========================================================================

    /// Remove `node` and its subtree from the scene.
    ///
    /// Every view of every node in the subtree is torn down on both sides,
    /// every target in the subtree drops the views shown in it, and the former
    /// parent is notified with [`Changes::ChildDeleted`].
    #[tracing::instrument(skip(self), target = "strata_core::scene", level = "debug")]
    pub fn remove_interactive(&mut self, node: NodeId) -> bool {
        if !self.contains(node) {
            return false;
        }
        let subtree: Vec<_> = self.this_and_descendants(node).collect();

        for &id in &subtree {
            if self.is_target(id) {
                self.remove_all_views_shown_here(id);
            }
            let bindings = self.nodes[id].views.take();
            for binding in bindings {
                self.remove_view_shown_here(binding.target, binding.view);
            }
        }

        let parent = self.parent(node);
        if parent.is_some() {
            self.detach(node);
        }
        for id in subtree {
            self.nodes.remove(id);
        }
        tracing::debug!(target: targets::SCENE, ?node, "removed subtree");

        if let Some(parent) = parent {
            self.notify(parent, &NodeEventArgs::new(Changes::ChildDeleted, node));
        }
        true
    }

    // =========================================================================
    // Debugging
    // =========================================================================

    /// One-line description of `node`.
    pub fn debug_string(&self, node: NodeId) -> String {
        let Some(data) = self.nodes.get(node) else {
            return String::from("(removed)");
        };
        let mut result = self.name(node);
        let _ = write!(result, " typeName={}", data.payload.type_name());
        let _ = write!(result, " class={}", data.payload.class_name());
        let _ = write!(result, " id={node:?}");
        if data.active {
            result.push_str(" active");
        }
        if !data.views.is_empty() {
            let _ = write!(result, " views={}", data.views.len());
        }
        if let Some(target) = &data.target {
            let _ = write!(result, " shown_here={}", target.shown_here.len());
        }
        result
    }
}
