//! Scene mutations as data.
//!
//! Every change to a scene is expressed as a [`Mutation`] so that batches,
//! scripts and adapters all go through the same transition function.

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Size};
use crate::node::{Node, NodeId};
use crate::patch::{NodePatch, PatchOutcome};
use crate::toolbar::ToolbarItem;

/// A single requested change to the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Mutation {
    /// Add a node from the toolbar.
    Create {
        /// Toolbar entry to instantiate.
        item: ToolbarItem,
    },
    /// Drag a node.
    Move {
        /// Target node.
        id: NodeId,
        /// Requested top-left position.
        position: Point,
    },
    /// Resize a resizable node.
    Resize {
        /// Target node.
        id: NodeId,
        /// Requested footprint.
        size: Size,
    },
    /// Write payload fields.
    Commit {
        /// Target node.
        id: NodeId,
        /// Fields to overwrite.
        patch: NodePatch,
    },
    /// Remove a non-singleton node.
    Delete {
        /// Target node.
        id: NodeId,
    },
    /// Change or clear the selection.
    Select {
        /// New selection, or `None` to clear.
        #[serde(default)]
        id: Option<NodeId>,
    },
    /// Raise a node above every other.
    BringToFront {
        /// Target node.
        id: NodeId,
    },
}

impl Mutation {
    /// The node this mutation targets, if any.
    #[must_use]
    pub fn target(&self) -> Option<&NodeId> {
        match self {
            Self::Create { .. } => None,
            Self::Select { id } => id.as_ref(),
            Self::Move { id, .. }
            | Self::Resize { id, .. }
            | Self::Commit { id, .. }
            | Self::Delete { id }
            | Self::BringToFront { id } => Some(id),
        }
    }
}

/// Result of applying one mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// A node was created with this id.
    Created(NodeId),
    /// Position, size, selection or stacking changed.
    Changed,
    /// A patch was applied; some fields may have been dropped.
    Committed(PatchOutcome),
    /// The node was removed.
    Deleted(Node),
    /// The request was dropped without effect.
    Ignored,
}

impl Outcome {
    /// Check whether the scene or selection was modified.
    #[must_use]
    pub fn is_change(&self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mutation_wire_format() {
        let json = r#"[
            {"op": "create", "item": "circle-lg"},
            {"op": "move", "id": "circle1", "position": {"x": 10.0, "y": 20.0}},
            {"op": "commit", "id": "box1", "patch": {"value": "12"}},
            {"op": "select"},
            {"op": "bringToFront", "id": "rating"}
        ]"#;
        let batch: Vec<Mutation> = serde_json::from_str(json).expect("parse");
        assert_eq!(batch.len(), 5);
        assert_eq!(
            batch[0],
            Mutation::Create {
                item: ToolbarItem::CircleLg
            }
        );
        assert_eq!(batch[3], Mutation::Select { id: None });
        match &batch[2] {
            Mutation::Commit { patch, .. } => assert_eq!(patch.value.as_deref(), Some("12")),
            other => panic!("unexpected mutation {other:?}"),
        }
    }

    #[test]
    fn test_unknown_toolbar_item_fails_to_parse() {
        let result = serde_json::from_str::<Mutation>(r#"{"op": "create", "item": "radar"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_target() {
        let m = Mutation::Delete {
            id: NodeId::new("circle1"),
        };
        assert_eq!(m.target().map(NodeId::as_str), Some("circle1"));
        assert!(Mutation::Create {
            item: ToolbarItem::StatBox
        }
        .target()
        .is_none());
    }
}
