//! Scene configuration.

/// Behavior switches for a [`Scene`](crate::Scene).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SceneConfig {
    /// Also notify the ancestors (except the root) of a node whose visibility
    /// changed through an interactive call.
    pub notify_ancestors_on_visibility: bool,
    /// Give unnamed nodes a name like `"SurfaceNode 2"` when they are attached.
    pub generate_names: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            notify_ancestors_on_visibility: true,
            generate_names: true,
        }
    }
}

impl SceneConfig {
    /// Set [`notify_ancestors_on_visibility`](Self::notify_ancestors_on_visibility).
    pub fn with_notify_ancestors(mut self, enabled: bool) -> Self {
        self.notify_ancestors_on_visibility = enabled;
        self
    }

    /// Set [`generate_names`](Self::generate_names).
    pub fn with_generated_names(mut self, enabled: bool) -> Self {
        self.generate_names = enabled;
        self
    }
}
