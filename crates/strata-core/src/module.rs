//! Rendering-backend modules.
//!
//! A module is the seam between the renderer-agnostic core and one backend:
//! it registers the backend's views with a [`ViewFactory`] and may build the
//! initial scene for an application.

use std::sync::Arc;

use crate::config::SceneConfig;
use crate::factory::ViewFactory;
use crate::logging::targets;
use crate::node::NodeId;
use crate::scene::Scene;

/// A bundle of view registrations plus optional scene bootstrapping.
///
/// Only [`name`](Module::name) and
/// [`register_views_core`](Module::register_views_core) are required.
///
/// # Example
///
/// ```
/// use strata_core::class::{Class, Identifiable};
/// use strata_core::node::{Node, NodeId, BASE_NODE};
/// use strata_core::target::TARGET_NODE;
/// use strata_core::view::{View, BASE_VIEW};
/// use strata_core::{Module, Scene, SceneConfig, ViewFactory};
///
/// static POINTS_NODE: Class = Class::derived("PointsNode", &BASE_NODE);
/// static VIEWPORT: Class = Class::derived("Viewport", &TARGET_NODE);
/// static POINTS_VIEW: Class = Class::derived("PointsView", &BASE_VIEW);
///
/// struct PointsNode;
/// impl Identifiable for PointsNode {
///     fn class(&self) -> &'static Class { &POINTS_NODE }
/// }
/// impl Node for PointsNode {}
///
/// #[derive(Default)]
/// struct PointsView;
/// impl Identifiable for PointsView {
///     fn class(&self) -> &'static Class { &POINTS_VIEW }
/// }
/// impl View for PointsView {}
///
/// struct PointsModule;
///
/// impl Module for PointsModule {
///     fn name(&self) -> &str {
///         "points"
///     }
///
///     fn register_views_core(&self, factory: &ViewFactory) {
///         factory.register_default::<PointsView>(&POINTS_NODE, &VIEWPORT);
///     }
///
///     fn create_root(&self, scene: &mut Scene) -> Option<NodeId> {
///         Some(scene.insert_node(PointsNode))
///     }
/// }
///
/// let (scene, root) = PointsModule.build_scene(SceneConfig::default());
/// assert!(scene.factory().contains(&POINTS_NODE, &VIEWPORT));
/// assert!(root.is_some_and(|root| scene.is_initialized(root)));
/// ```
pub trait Module {
    /// Name used in log output.
    fn name(&self) -> &str;

    /// Register this module's (node class, view, target class) triples.
    fn register_views_core(&self, factory: &ViewFactory);

    /// Create the root of the application tree, if this module owns one.
    fn create_root(&self, _scene: &mut Scene) -> Option<NodeId> {
        None
    }

    /// Populate the tree under `root`.
    fn load_data(&self, _scene: &mut Scene, _root: NodeId) {}

    /// Make the initial selection of nodes visible.
    fn set_default_visible(&self, _scene: &mut Scene, _root: NodeId) {}

    /// Register this module's views with `factory`.
    ///
    /// Must run before any show call for the pairs the module provides.
    fn install(&self, factory: &ViewFactory) {
        let before = factory.len();
        self.register_views_core(factory);
        tracing::info!(
            target: targets::MODULE,
            module = self.name(),
            registered = factory.len().saturating_sub(before),
            "module installed"
        );
    }

    /// Install into a fresh factory and build a scene on top of it.
    ///
    /// The root, if any, is populated, initialized and given its default
    /// visibility in that order.
    fn build_scene(&self, config: SceneConfig) -> (Scene, Option<NodeId>) {
        let factory = ViewFactory::new();
        self.install(&factory);

        let mut scene = Scene::with_config(Arc::new(factory), config);
        let root = self.create_root(&mut scene);
        if let Some(root) = root {
            self.load_data(&mut scene, root);
            scene.initialize_recursive(root);
            self.set_default_visible(&mut scene, root);
            tracing::debug!(
                target: targets::MODULE,
                module = self.name(),
                nodes = scene.node_count(),
                "scene built"
            );
        }
        (scene, root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{LabelView, TestNode, PLAIN_TARGET, TEST_NODE, WELL_NODE};

    struct WellModule;

    impl Module for WellModule {
        fn name(&self) -> &str {
            "wells"
        }

        fn register_views_core(&self, factory: &ViewFactory) {
            factory.register_default::<LabelView>(&TEST_NODE, &PLAIN_TARGET);
            factory.register_default::<LabelView>(&WELL_NODE, &PLAIN_TARGET);
        }

        fn create_root(&self, scene: &mut Scene) -> Option<NodeId> {
            Some(scene.insert_node(TestNode::plain()))
        }

        fn load_data(&self, scene: &mut Scene, root: NodeId) {
            let target = scene.insert_target(TestNode::target());
            scene.add_child(root, target).unwrap();
            for _ in 0..3 {
                let well = scene.insert_node(TestNode::well());
                scene.add_child(root, well).unwrap();
            }
        }

        fn set_default_visible(&self, scene: &mut Scene, root: NodeId) {
            let Some(target) = scene
                .children(root)
                .iter()
                .copied()
                .find(|&id| scene.is_target(id))
            else {
                return;
            };
            let wells: Vec<_> = scene.children_by_class(root, &WELL_NODE).collect();
            for well in wells {
                scene.set_visible(well, target, true);
            }
        }
    }

    struct EmptyModule;

    impl Module for EmptyModule {
        fn name(&self) -> &str {
            "empty"
        }

        fn register_views_core(&self, _factory: &ViewFactory) {}
    }

    #[test]
    fn test_install_registers_views() {
        let factory = ViewFactory::new();
        WellModule.install(&factory);
        assert_eq!(factory.len(), 2);
        assert!(factory.contains(&WELL_NODE, &PLAIN_TARGET));
    }

    #[test]
    fn test_build_scene_runs_hooks_in_order() {
        let (scene, root) = WellModule.build_scene(SceneConfig::default());
        let root = root.unwrap();

        assert_eq!(scene.child_count(root), 4);
        assert!(scene.this_and_descendants(root).all(|id| scene.is_initialized(id)));

        let target = scene.child(root, 0).unwrap();
        let wells: Vec<_> = scene.children_by_class(root, &WELL_NODE).collect();
        assert_eq!(wells.len(), 3);
        assert!(wells.iter().all(|&well| scene.is_visible(well, target)));
        assert_eq!(scene.views_shown_here(target).unwrap().len(), 3);
    }

    #[test]
    fn test_build_scene_without_root() {
        let (scene, root) = EmptyModule.build_scene(SceneConfig::default());
        assert!(root.is_none());
        assert_eq!(scene.node_count(), 0);
        assert!(scene.factory().is_empty());
    }
}
