//! Resolution of (node class, target class) pairs to view constructors.
//!
//! A [`ViewFactory`] is built by the application's composition root, filled by
//! [`Module::install`](crate::Module::install), and shared with every
//! [`Scene`](crate::Scene) through an `Arc`. Lookups match both classes exactly;
//! there is no fallback to a base class.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::class::Class;
use crate::logging::targets;
use crate::node::Node;
use crate::view::View;

type Constructor = Arc<dyn Fn() -> Box<dyn View> + Send + Sync>;

type FactoryKey = (&'static Class, &'static Class);

/// Registry of view constructors keyed by node class and target class.
///
/// # Example
///
/// ```
/// use strata_core::class::{Class, Identifiable};
/// use strata_core::node::BASE_NODE;
/// use strata_core::target::TARGET_NODE;
/// use strata_core::view::{View, BASE_VIEW};
/// use strata_core::ViewFactory;
///
/// static SURFACE_NODE: Class = Class::derived("SurfaceNode", &BASE_NODE);
/// static THREE_TARGET: Class = Class::derived("ThreeTarget", &TARGET_NODE);
/// static SURFACE_VIEW: Class = Class::derived("SurfaceView", &BASE_VIEW);
///
/// #[derive(Default)]
/// struct SurfaceView;
///
/// impl Identifiable for SurfaceView {
///     fn class(&self) -> &'static Class {
///         &SURFACE_VIEW
///     }
/// }
///
/// impl View for SurfaceView {}
///
/// let factory = ViewFactory::new();
/// factory.register_default::<SurfaceView>(&SURFACE_NODE, &THREE_TARGET);
/// assert!(factory.contains(&SURFACE_NODE, &THREE_TARGET));
/// assert!(!factory.contains(&BASE_NODE, &THREE_TARGET));
/// ```
pub struct ViewFactory {
    constructors: RwLock<HashMap<FactoryKey, Constructor>>,
}

impl ViewFactory {
    /// Create an empty factory.
    pub fn new() -> Self {
        Self {
            constructors: RwLock::new(HashMap::new()),
        }
    }

    /// Install a constructor for views of `node_class` in `target_class`.
    ///
    /// Registering the same pair again replaces the previous constructor.
    pub fn register<F>(
        &self,
        node_class: &'static Class,
        constructor: F,
        target_class: &'static Class,
    ) where
        F: Fn() -> Box<dyn View> + Send + Sync + 'static,
    {
        let previous = self
            .constructors
            .write()
            .insert((node_class, target_class), Arc::new(constructor));
        if previous.is_some() {
            tracing::debug!(
                target: targets::FACTORY,
                node_class = node_class.name(),
                target_class = target_class.name(),
                "view constructor overridden"
            );
        } else {
            tracing::trace!(
                target: targets::FACTORY,
                node_class = node_class.name(),
                target_class = target_class.name(),
                "view constructor registered"
            );
        }
    }

    /// Install `V::default` as the constructor for the pair.
    pub fn register_default<V>(&self, node_class: &'static Class, target_class: &'static Class)
    where
        V: View + Default + 'static,
    {
        self.register(node_class, || Box::new(V::default()) as Box<dyn View>, target_class);
    }

    /// Whether a constructor is registered for the exact pair.
    pub fn contains(&self, node_class: &'static Class, target_class: &'static Class) -> bool {
        self.constructors
            .read()
            .contains_key(&(node_class, target_class))
    }

    /// Whether a view can be created for `node` in a target of `target_class`.
    pub fn can_create(&self, node: &dyn Node, target_class: &'static Class) -> bool {
        self.contains(node.class(), target_class)
    }

    /// Construct an unbound view for `node` in a target of `target_class`.
    ///
    /// Returns `None` when the pair is not registered.
    pub fn create(&self, node: &dyn Node, target_class: &'static Class) -> Option<Box<dyn View>> {
        let node_class = node.class();
        // Clone out of the lock so constructors may consult the factory themselves.
        let constructor = self
            .constructors
            .read()
            .get(&(node_class, target_class))
            .map(Arc::clone);

        match constructor {
            Some(constructor) => Some(constructor()),
            None => {
                tracing::debug!(
                    target: targets::FACTORY,
                    node_class = node_class.name(),
                    target_class = target_class.name(),
                    "no view registered"
                );
                None
            }
        }
    }

    /// Number of registered pairs.
    pub fn len(&self) -> usize {
        self.constructors.read().len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.constructors.read().is_empty()
    }
}

impl Default for ViewFactory {
    fn default() -> Self {
        Self::new()
    }
}

static_assertions::assert_impl_all!(ViewFactory: Send, Sync);

impl fmt::Debug for ViewFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let constructors = self.constructors.read();
        let mut pairs: Vec<_> = constructors
            .keys()
            .map(|(node, target)| format!("{node} -> {target}"))
            .collect();
        pairs.sort();
        f.debug_struct("ViewFactory").field("pairs", &pairs).finish()
    }
}
