//! Core of the Strata node/view framework.
//!
//! This crate ties a tree of domain nodes to any number of independent
//! rendering targets:
//!
//! - **Scene**: arena owning nodes and views, with parent/child ownership,
//!   depth-first traversal, naming and notification
//! - **Identity**: static [`Class`](class::Class) descriptors with ancestry tests
//! - **Targets**: nodes that are also rendering contexts and own the
//!   show/hide protocol for the views instantiated in them
//! - **View factory**: resolution of (node class, target class) to a view
//!   constructor, filled in by backend [`Module`]s
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use strata_core::class::{Class, Identifiable};
//! use strata_core::node::{Node, BASE_NODE};
//! use strata_core::target::TARGET_NODE;
//! use strata_core::view::{View, BASE_VIEW};
//! use strata_core::{Scene, ViewFactory};
//!
//! static SURFACE_NODE: Class = Class::derived("SurfaceNode", &BASE_NODE);
//! static VIEWPORT: Class = Class::derived("Viewport", &TARGET_NODE);
//! static SURFACE_VIEW: Class = Class::derived("SurfaceView", &BASE_VIEW);
//!
//! struct Surface;
//! impl Identifiable for Surface {
//!     fn class(&self) -> &'static Class { &SURFACE_NODE }
//! }
//! impl Node for Surface {}
//!
//! struct Viewport;
//! impl Identifiable for Viewport {
//!     fn class(&self) -> &'static Class { &VIEWPORT }
//! }
//! impl Node for Viewport {}
//!
//! #[derive(Default)]
//! struct SurfaceView;
//! impl Identifiable for SurfaceView {
//!     fn class(&self) -> &'static Class { &SURFACE_VIEW }
//! }
//! impl View for SurfaceView {}
//!
//! let factory = ViewFactory::new();
//! factory.register_default::<SurfaceView>(&SURFACE_NODE, &VIEWPORT);
//!
//! let mut scene = Scene::new(Arc::new(factory));
//! let viewport = scene.insert_target(Viewport);
//! let surface = scene.insert_node(Surface);
//!
//! assert!(scene.set_visible(surface, viewport, true));
//! assert!(scene.is_visible(surface, viewport));
//!
//! // Closing the viewport leaves no view behind on the node side.
//! scene.remove_all_views_shown_here(viewport);
//! assert!(scene.views(surface).is_some_and(|views| views.is_empty()));
//! ```

pub mod class;
mod config;
mod error;
mod event;
pub mod factory;
pub mod logging;
mod module;
pub mod node;
mod scene;
pub mod target;
pub mod view;
pub mod view_list;
mod visibility;

#[cfg(test)]
mod test_support;

pub use class::{Class, Identifiable};
pub use config::SceneConfig;
pub use error::{SceneError, SceneResult};
pub use event::{Changes, NodeEventArgs};
pub use factory::ViewFactory;
pub use logging::{SceneTreeDebug, TreeFormatOptions, TreeStyle};
pub use module::Module;
pub use node::{Ancestors, Descendants, ListenerId, Node, NodeId, BASE_NODE};
pub use scene::Scene;
pub use target::TARGET_NODE;
pub use view::{BaseView, View, ViewId, BASE_VIEW};
pub use view_list::{ViewBinding, ViewList};
pub use visibility::CheckBoxState;
