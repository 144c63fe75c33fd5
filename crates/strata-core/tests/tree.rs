//! Integration tests for tree structure, traversal and debug output.

use std::sync::Arc;

use strata_core::class::{Class, Identifiable};
use strata_core::node::{Node, NodeId, BASE_NODE};
use strata_core::{Scene, SceneConfig, SceneTreeDebug, TreeFormatOptions, TreeStyle, ViewFactory};

static FOLDER_NODE: Class = Class::derived("FolderNode", &BASE_NODE);
static POINTS_NODE: Class = Class::derived("PointsNode", &BASE_NODE);

struct Folder;

impl Identifiable for Folder {
    fn class(&self) -> &'static Class {
        &FOLDER_NODE
    }
}

impl Node for Folder {}

struct Points;

impl Identifiable for Points {
    fn class(&self) -> &'static Class {
        &POINTS_NODE
    }
}

impl Node for Points {}

fn setup() -> Scene {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    Scene::new(Arc::new(ViewFactory::new()))
}

fn add<N: Node>(scene: &mut Scene, parent: NodeId, node: N) -> NodeId {
    let id = scene.insert_node(node);
    scene.add_child(parent, id).unwrap();
    id
}

/// root -> { a -> { a1, a2 -> { a2x } }, b -> { b1, b2, b3 } }
fn build_tree(scene: &mut Scene) -> (NodeId, Vec<NodeId>) {
    let root = scene.insert_node(Folder);
    let a = add(scene, root, Folder);
    let a1 = add(scene, a, Points);
    let a2 = add(scene, a, Folder);
    let a2x = add(scene, a2, Points);
    let b = add(scene, root, Folder);
    let b1 = add(scene, b, Points);
    let b2 = add(scene, b, Points);
    let b3 = add(scene, b, Points);
    (root, vec![a, a1, a2, a2x, b, b1, b2, b3])
}

#[test]
fn traversal_counts() {
    let mut scene = setup();
    let (root, _) = build_tree(&mut scene);

    assert_eq!(scene.this_and_descendants(root).count(), 9);
    assert_eq!(scene.descendants(root).count(), 8);
}

#[test]
fn descendants_are_pre_order() {
    let mut scene = setup();
    let (root, expected) = build_tree(&mut scene);

    let visited: Vec<_> = scene.descendants(root).collect();
    assert_eq!(visited, expected);
}

#[test]
fn parent_and_children_stay_consistent() {
    let mut scene = setup();
    let (root, nodes) = build_tree(&mut scene);

    for id in scene.descendants(root) {
        let parent = scene.parent(id).unwrap();
        let occurrences = scene
            .children(parent)
            .iter()
            .filter(|&&child| child == id)
            .count();
        assert_eq!(occurrences, 1);
    }

    let b2 = nodes[6];
    let b = nodes[4];
    assert!(scene.detach(b2));
    assert_eq!(scene.parent(b2), None);
    assert!(!scene.children(b).contains(&b2));
    assert!(!scene.detach(b2));
}

#[test]
fn typed_lookups() {
    let mut scene = setup();
    let (root, nodes) = build_tree(&mut scene);
    let a2x = nodes[3];

    assert_eq!(scene.descendants_of_type::<Points>(root).count(), 5);
    assert_eq!(scene.ancestor_of_type::<Folder>(a2x), Some(nodes[2]));
    assert!(!scene.has_child_of_type::<Points>(root));
    assert_eq!(scene.children_by_class(nodes[4], &POINTS_NODE).count(), 3);
    assert_eq!(scene.children_by_class(nodes[4], &BASE_NODE).count(), 3);
}

#[test]
fn generated_names_and_paths() {
    let mut scene = setup();
    let (root, nodes) = build_tree(&mut scene);
    scene.set_name(root, "Project");

    assert_eq!(scene.name(nodes[7]), "PointsNode 3");
    assert_eq!(scene.path(nodes[3]), "\\Project\\FolderNode 1\\FolderNode 1\\PointsNode 1");
}

#[test]
fn names_are_not_generated_when_disabled() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let config = SceneConfig::default().with_generated_names(false);
    let mut scene = Scene::with_config(Arc::new(ViewFactory::new()), config);
    let root = scene.insert_node(Folder);
    let child = add(&mut scene, root, Points);

    assert_eq!(scene.name(child), "PointsNode");
}

#[test]
fn tree_debug_output() {
    let mut scene = setup();
    let (root, _) = build_tree(&mut scene);
    scene.set_name(root, "Project");

    let options = TreeFormatOptions {
        style: TreeStyle::Ascii,
        ..TreeFormatOptions::minimal()
    };
    let output = SceneTreeDebug::with_options(options).format_subtree(&scene, root).unwrap();
    let lines: Vec<_> = output.lines().collect();
    assert_eq!(lines.len(), 9);
    assert_eq!(lines[0], "Project");
    assert_eq!(lines[1], "+-- FolderNode 1");
    assert!(lines[8].ends_with("`-- PointsNode 3"));

    let all = SceneTreeDebug::new().format_all(&scene);
    assert!(all.starts_with("Scene (9 nodes, 0 views):"));
}
