//! Error types for scene operations.
//!
//! Routine absence (no parent, no view for a target, no factory entry) is
//! reported through `bool` and `Option` results. This type covers structural
//! misuse only.

use crate::node::NodeId;

/// Result type alias for scene operations.
pub type SceneResult<T> = std::result::Result<T, SceneError>;

/// Errors raised by structural scene operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SceneError {
    /// The node id is invalid or the node has been removed.
    #[error("invalid or removed node {0:?}")]
    InvalidNode(NodeId),

    /// A node cannot be added as its own child.
    #[error("node {0:?} cannot be added as its own child")]
    IllegalChild(NodeId),
}
