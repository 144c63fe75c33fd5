//! Logging and debugging facilities.
//!
//! The crate reports through `tracing`. Every event carries one of the
//! [`targets`] below so the node tree, the view lifecycle and the factory can be
//! filtered independently:
//!
//! ```text
//! RUST_LOG=strata_core::view=trace,strata_core::scene=debug
//! ```
//!
//! [`SceneTreeDebug`] renders a scene hierarchy for inspection.

use std::fmt::Write as FmtWrite;

use crate::error::{SceneError, SceneResult};
use crate::node::NodeId;
use crate::scene::Scene;

/// Target names for log filtering.
pub mod targets {
    /// Tree structure and notifications.
    pub const SCENE: &str = "strata_core::scene";
    /// Show/hide protocol and view lifecycle hooks.
    pub const VIEW: &str = "strata_core::view";
    /// View factory registrations and lookups.
    pub const FACTORY: &str = "strata_core::factory";
    /// Module installation.
    pub const MODULE: &str = "strata_core::module";
}

/// Style options for tree visualization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TreeStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
    /// Compact single-line representation.
    Compact,
}

/// Configuration for scene tree debug output.
#[derive(Debug, Clone)]
pub struct TreeFormatOptions {
    /// The style of tree visualization.
    pub style: TreeStyle,
    /// Whether to show node ids.
    pub show_ids: bool,
    /// Whether to show class names.
    pub show_classes: bool,
    /// Whether to show how many views each node has (and, for targets, how
    /// many views are shown there).
    pub show_view_counts: bool,
    /// Maximum depth to traverse (None for unlimited).
    pub max_depth: Option<usize>,
    /// Indent size for each level.
    pub indent_size: usize,
}

impl Default for TreeFormatOptions {
    fn default() -> Self {
        Self {
            style: TreeStyle::default(),
            show_ids: true,
            show_classes: true,
            show_view_counts: false,
            max_depth: None,
            indent_size: 2,
        }
    }
}

impl TreeFormatOptions {
    /// Options for detailed debugging output.
    pub fn detailed() -> Self {
        Self {
            show_view_counts: true,
            ..Default::default()
        }
    }

    /// Options for minimal output.
    pub fn minimal() -> Self {
        Self {
            show_ids: false,
            show_classes: false,
            show_view_counts: false,
            ..Default::default()
        }
    }
}

/// Renders scene hierarchies as indented text.
#[derive(Debug, Clone, Default)]
pub struct SceneTreeDebug {
    options: TreeFormatOptions,
}

impl SceneTreeDebug {
    /// Create a visualizer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a visualizer with custom options.
    pub fn with_options(options: TreeFormatOptions) -> Self {
        Self { options }
    }

    /// Format every tree in the scene.
    pub fn format_all(&self, scene: &Scene) -> String {
        let mut output = String::new();
        let _ = writeln!(
            output,
            "Scene ({} nodes, {} views):",
            scene.node_count(),
            scene.view_count()
        );

        let roots: Vec<_> = scene.roots().collect();
        if roots.is_empty() {
            let _ = writeln!(output, "  (empty)");
        }
        for root in roots {
            self.format_subtree_into(scene, root, 0, true, &mut output);
        }
        output
    }

    /// Format the subtree rooted at `root`.
    pub fn format_subtree(&self, scene: &Scene, root: NodeId) -> SceneResult<String> {
        if !scene.contains(root) {
            return Err(SceneError::InvalidNode(root));
        }
        let mut output = String::new();
        self.format_subtree_into(scene, root, 0, true, &mut output);
        Ok(output)
    }

    fn format_subtree_into(
        &self,
        scene: &Scene,
        id: NodeId,
        depth: usize,
        is_last: bool,
        output: &mut String,
    ) {
        if self.options.max_depth.is_some_and(|max| depth > max) {
            return;
        }
        let Some(node) = scene.node(id) else {
            return;
        };

        output.push_str(&self.build_prefix(depth, is_last));
        output.push_str(&scene.name(id));

        if self.options.show_ids {
            let _ = write!(output, " [{id:?}]");
        }
        if self.options.show_classes {
            let _ = write!(output, " ({})", node.class_name());
        }
        if self.options.show_view_counts {
            let views = scene.views(id).map_or(0, |list| list.len());
            let _ = write!(output, " views={views}");
            if let Some(shown_here) = scene.views_shown_here(id) {
                let _ = write!(output, " shown_here={}", shown_here.len());
            }
        }
        output.push('\n');

        let children = scene.children(id);
        let child_count = children.len();
        for (i, &child) in children.iter().enumerate() {
            self.format_subtree_into(scene, child, depth + 1, i + 1 == child_count, output);
        }
    }

    fn build_prefix(&self, depth: usize, is_last: bool) -> String {
        if depth == 0 {
            return String::new();
        }

        let (branch, corner, last) = match self.options.style {
            TreeStyle::Ascii => ("|", "+--", "`--"),
            TreeStyle::Unicode => (
                "\u{2502}",
                "\u{251c}\u{2500}\u{2500}",
                "\u{2514}\u{2500}\u{2500}",
            ),
            TreeStyle::Compact => ("", "-", "-"),
        };

        let mut prefix = String::new();
        for _ in 0..(depth - 1) {
            prefix.push_str(branch);
            prefix.push_str(&" ".repeat(self.options.indent_size));
        }
        prefix.push_str(if is_last { last } else { corner });
        prefix.push(' ');
        prefix
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{scene_with_factory, TestNode};

    #[test]
    fn test_format_empty() {
        let scene = scene_with_factory();
        let output = SceneTreeDebug::new().format_all(&scene);
        assert!(output.contains("(empty)"));
    }

    #[test]
    fn test_format_hierarchy() {
        let mut scene = scene_with_factory();
        let root = scene.insert_node(TestNode::plain());
        let child = scene.insert_node(TestNode::well());
        scene.set_name(root, "project");
        scene.add_child(root, child).unwrap();

        let output = SceneTreeDebug::new().format_subtree(&scene, root).unwrap();
        assert!(output.contains("project"));
        assert!(output.contains("WellNode 1"));
        assert!(output.contains("(WellNode)"));
        assert!(output.contains("\u{2514}"));
    }

    #[test]
    fn test_format_minimal_and_depth() {
        let mut scene = scene_with_factory();
        let root = scene.insert_node(TestNode::plain());
        let child = scene.insert_node(TestNode::plain());
        scene.add_child(root, child).unwrap();

        let options = TreeFormatOptions {
            max_depth: Some(0),
            ..TreeFormatOptions::minimal()
        };
        let output = SceneTreeDebug::with_options(options).format_subtree(&scene, root).unwrap();
        assert_eq!(output, "TestNode\n");
    }

    #[test]
    fn test_format_stale_root() {
        let mut scene = scene_with_factory();
        let root = scene.insert_node(TestNode::plain());
        scene.remove_interactive(root);
        let result = SceneTreeDebug::new().format_subtree(&scene, root);
        assert_eq!(result, Err(SceneError::InvalidNode(root)));
    }
}
