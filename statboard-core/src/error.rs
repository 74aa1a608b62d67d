//! Error types for scene operations.

use thiserror::Error;

use crate::node::{NodeId, NodeKind};
use crate::patch::Field;

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;

/// Errors that can occur in scene operations.
///
/// Only structurally invalid requests surface here; requests that merely
/// arrive late (a move after a delete) are dropped without an error.
#[derive(Debug, Error)]
pub enum SceneError {
    /// Node not found in scene.
    #[error("Node not found: {0}")]
    UnknownNodeId(NodeId),

    /// Resize requested on a fixed-footprint kind.
    #[error("Node {id} ({kind}) cannot be resized")]
    NotResizable {
        /// Target node.
        id: NodeId,
        /// Its kind.
        kind: NodeKind,
    },

    /// Delete requested on a singleton.
    #[error("Node {id} ({kind}) is a singleton and cannot be deleted")]
    NotDeletable {
        /// Target node.
        id: NodeId,
        /// Its kind.
        kind: NodeKind,
    },

    /// Field offered to a kind that has no such field.
    #[error("Field {field} does not apply to {kind}")]
    InvalidPayloadField {
        /// Target kind.
        kind: NodeKind,
        /// Offending field.
        field: Field,
    },

    /// Draft update for a node that is not in editing mode.
    #[error("Node {0} is not being edited")]
    NotEditing(NodeId),

    /// Unrecognized toolbar item identifier.
    #[error("Unknown toolbar item: {0}")]
    UnknownToolbarItem(String),

    /// A player lookup or image pipeline failed; the scene is unchanged.
    #[error("External update failed: {0}")]
    ExternalAdapterFailure(String),

    /// Scene serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
