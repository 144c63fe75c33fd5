//! Node and view fixtures shared by the unit tests.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::class::{Class, Identifiable};
use crate::event::NodeEventArgs;
use crate::factory::ViewFactory;
use crate::node::{Node, NodeId, BASE_NODE};
use crate::scene::Scene;
use crate::target::TARGET_NODE;
use crate::view::{View, BASE_VIEW};

pub static TEST_NODE: Class = Class::derived("TestNode", &BASE_NODE);
pub static WELL_NODE: Class = Class::derived("WellNode", &TEST_NODE);
pub static PLAIN_TARGET: Class = Class::derived("PlainTarget", &TARGET_NODE);

static LABEL_VIEW: Class = Class::derived("LabelView", &BASE_VIEW);
static RECORDING_VIEW: Class = Class::derived("RecordingView", &BASE_VIEW);

pub struct TestNode {
    class: &'static Class,
    extension: Option<String>,
    can_activate: bool,
    checkable: bool,
    pub notified: u32,
    pub initialized: u32,
}

impl TestNode {
    fn with_class(class: &'static Class) -> Self {
        Self {
            class,
            extension: None,
            can_activate: false,
            checkable: true,
            notified: 0,
            initialized: 0,
        }
    }

    pub fn plain() -> Self {
        Self::with_class(&TEST_NODE)
    }

    pub fn well() -> Self {
        Self::with_class(&WELL_NODE)
    }

    pub fn target() -> Self {
        Self::with_class(&PLAIN_TARGET)
    }

    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension = Some(extension.to_string());
        self
    }

    pub fn activatable(mut self) -> Self {
        self.can_activate = true;
        self
    }

    pub fn uncheckable(mut self) -> Self {
        self.checkable = false;
        self
    }
}

impl Identifiable for TestNode {
    fn class(&self) -> &'static Class {
        self.class
    }
}

impl Node for TestNode {
    fn name_extension(&self) -> Option<String> {
        self.extension.clone()
    }

    fn can_be_active(&self) -> bool {
        self.can_activate
    }

    fn can_be_checked(&self, _target: &dyn Node) -> bool {
        self.checkable
    }

    fn initialize_core(&mut self) {
        self.initialized += 1;
    }

    fn notify_core(&mut self, _args: &NodeEventArgs) {
        self.notified += 1;
    }
}

/// Shared log of view hook calls.
#[derive(Clone, Default)]
pub struct Recorder(Arc<Mutex<Vec<String>>>);

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, event: &str) {
        self.0.lock().push(event.to_string());
    }

    pub fn events(&self) -> Vec<String> {
        self.0.lock().clone()
    }

    pub fn count(&self, event: &str) -> usize {
        self.0.lock().iter().filter(|recorded| *recorded == event).count()
    }
}

pub struct RecordingView {
    recorder: Recorder,
    persistent: bool,
}

impl RecordingView {
    pub fn new(recorder: Recorder, persistent: bool) -> Self {
        Self { recorder, persistent }
    }
}

impl Identifiable for RecordingView {
    fn class(&self) -> &'static Class {
        &RECORDING_VIEW
    }
}

impl View for RecordingView {
    fn stay_alive_if_invisible(&self) -> bool {
        self.persistent
    }

    fn on_attach(&mut self, _node: NodeId, _target: NodeId) {
        self.recorder.push("attach");
    }

    fn initialize(&mut self) {
        self.recorder.push("initialize");
    }

    fn on_show(&mut self) {
        self.recorder.push("show");
    }

    fn on_hide(&mut self) {
        self.recorder.push("hide");
    }

    fn on_notify(&mut self, _args: &NodeEventArgs) {
        self.recorder.push("notify");
    }

    fn dispose(&mut self) {
        self.recorder.push("dispose");
    }

    fn on_detach(&mut self) {
        self.recorder.push("detach");
    }
}

#[derive(Default)]
pub struct LabelView;

impl Identifiable for LabelView {
    fn class(&self) -> &'static Class {
        &LABEL_VIEW
    }
}

impl View for LabelView {}

/// A scene whose factory shows `TestNode` (not `WellNode`) in `PlainTarget`.
pub fn scene_with_factory() -> Scene {
    let factory = ViewFactory::new();
    factory.register_default::<LabelView>(&TEST_NODE, &PLAIN_TARGET);
    Scene::new(Arc::new(factory))
}

/// Like [`scene_with_factory`], with views that log their hooks to `recorder`.
pub fn recording_scene(recorder: &Recorder, persistent: bool) -> Scene {
    let factory = ViewFactory::new();
    let recorder = recorder.clone();
    factory.register(
        &TEST_NODE,
        move || Box::new(RecordingView::new(recorder.clone(), persistent)) as Box<dyn View>,
        &PLAIN_TARGET,
    );
    Scene::new(Arc::new(factory))
}
