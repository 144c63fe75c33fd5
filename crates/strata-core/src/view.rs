//! Renderer-specific presentation of one node in one target.
//!
//! A concrete presentation implements [`View`]. The scene wraps it in a
//! [`BaseView`], which carries the binding state the framework owns: the
//! originating node, the back-reference to the target, and the visibility
//! flag. Lifecycle hooks are only ever invoked by the target protocol in
//! [`crate::target`], never by application code.

use std::any::Any;
use std::fmt;

use slotmap::new_key_type;

use crate::class::{Class, Identifiable};
use crate::event::NodeEventArgs;
use crate::logging::targets;
use crate::node::NodeId;

new_key_type! {
    /// A stable handle to a view in a [`Scene`](crate::Scene).
    ///
    /// The handle becomes invalid once the view is torn down; a view created
    /// later for the same (node, target) pair gets a distinct id.
    pub struct ViewId;
}

/// Root class of every view.
pub static BASE_VIEW: Class = Class::root("BaseView");

/// A renderer-specific presentation object.
///
/// All hooks default to no-ops. The concrete type is fixed when the factory
/// constructs it and never changes for the lifetime of the binding.
pub trait View: Identifiable + Any {
    /// Whether the view survives a hide in a hidden state instead of being
    /// disposed. This is a property of the view type, not mutable state.
    fn stay_alive_if_invisible(&self) -> bool {
        false
    }

    /// Called once when the view is bound to its node and target.
    fn on_attach(&mut self, _node: NodeId, _target: NodeId) {}

    /// One-time setup, called before the first [`on_show`](Self::on_show).
    fn initialize(&mut self) {}

    /// Called on every transition to visible.
    fn on_show(&mut self) {}

    /// Called on every transition to hidden.
    fn on_hide(&mut self) {}

    /// Called for every notification raised on the view's node.
    fn on_notify(&mut self, _args: &NodeEventArgs) {}

    /// Release acquired resources. Called exactly once, right before the view
    /// is detached for good.
    fn dispose(&mut self) {}

    /// Called when the back-reference to the target is cleared.
    fn on_detach(&mut self) {}
}

/// Framework-side record of an attached view.
pub struct BaseView {
    view: Box<dyn View>,
    node: NodeId,
    target: Option<NodeId>,
    visible: bool,
    initialized: bool,
    disposed: bool,
}

impl BaseView {
    /// Bind a freshly constructed view to `node` and `target`.
    pub(crate) fn attach(mut view: Box<dyn View>, node: NodeId, target: NodeId) -> Self {
        tracing::trace!(target: targets::VIEW, class = view.class_name(), ?node, ?target, "attach");
        view.on_attach(node, target);
        Self {
            view,
            node,
            target: Some(target),
            visible: false,
            initialized: false,
            disposed: false,
        }
    }

    /// The node this view presents.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// The target this view is shown in, or `None` once detached.
    pub fn target(&self) -> Option<NodeId> {
        self.target
    }

    /// Whether the view is currently shown.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether [`View::initialize`] has run.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// See [`View::stay_alive_if_invisible`].
    pub fn stay_alive_if_invisible(&self) -> bool {
        self.view.stay_alive_if_invisible()
    }

    /// The class of the concrete view.
    pub fn class(&self) -> &'static Class {
        self.view.class()
    }

    /// The concrete view.
    pub fn view(&self) -> &dyn View {
        self.view.as_ref()
    }

    /// Downcast the concrete view.
    pub fn downcast_ref<V: View>(&self) -> Option<&V> {
        (self.view.as_ref() as &dyn Any).downcast_ref::<V>()
    }

    /// Set the flag and run `initialize` (first time only) and `on_show`.
    pub(crate) fn show(&mut self) {
        self.visible = true;
        if !self.initialized {
            tracing::trace!(target: targets::VIEW, class = self.class().name(), "initialize");
            self.view.initialize();
            self.initialized = true;
        }
        tracing::trace!(target: targets::VIEW, class = self.class().name(), "on_show");
        self.view.on_show();
    }

    pub(crate) fn hide(&mut self) {
        tracing::trace!(target: targets::VIEW, class = self.class().name(), "on_hide");
        self.view.on_hide();
        self.visible = false;
    }

    pub(crate) fn notify(&mut self, args: &NodeEventArgs) {
        self.view.on_notify(args);
    }

    pub(crate) fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        tracing::trace!(target: targets::VIEW, class = self.class().name(), "dispose");
        self.view.dispose();
        self.disposed = true;
    }

    pub(crate) fn detach(&mut self) {
        if self.target.take().is_some() {
            self.view.on_detach();
        }
    }
}

impl fmt::Debug for BaseView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BaseView")
            .field("class", &self.class().name())
            .field("node", &self.node)
            .field("target", &self.target)
            .field("visible", &self.visible)
            .field("initialized", &self.initialized)
            .finish()
    }
}
