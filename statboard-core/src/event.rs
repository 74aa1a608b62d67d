//! Events reported upward by the rendering surface.

use serde::{Deserialize, Serialize};

use crate::error::SceneResult;
use crate::geometry::{Point, Size};
use crate::node::NodeId;
use crate::store::SceneStore;

/// An interaction reported by a renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum CanvasEvent {
    /// A node was dragged.
    PositionChanged {
        /// Dragged node.
        id: NodeId,
        /// New top-left position.
        position: Point,
    },
    /// A resize handle was dragged.
    SizeChanged {
        /// Resized node.
        id: NodeId,
        /// New footprint.
        size: Size,
    },
    /// A node was clicked.
    Selected {
        /// Clicked node.
        id: NodeId,
    },
    /// A node was double-activated for editing.
    EditRequested {
        /// Target node.
        id: NodeId,
    },
    /// Empty canvas area was clicked.
    CanvasClicked,
    /// A raw pointer press at canvas coordinates.
    Pointer {
        /// Press location.
        point: Point,
    },
}

impl SceneStore {
    /// Route a renderer event to the matching store operation.
    ///
    /// Drag events are safe to deliver on every intermediate pointer
    /// position; clamping does not accumulate.
    ///
    /// # Errors
    ///
    /// Resize of a fixed-footprint kind, or edit of an unknown node.
    pub fn handle_event(&mut self, event: CanvasEvent) -> SceneResult<()> {
        match event {
            CanvasEvent::PositionChanged { id, position } => self.move_node(&id, position),
            CanvasEvent::SizeChanged { id, size } => self.resize_node(&id, size)?,
            CanvasEvent::Selected { id } => self.select(Some(id)),
            CanvasEvent::EditRequested { id } => self.begin_edit(&id)?,
            CanvasEvent::CanvasClicked => self.select(None),
            CanvasEvent::Pointer { point } => {
                let hit = self.scene().node_at(point).map(|n| n.id.clone());
                tracing::debug!("Pointer at ({}, {}) hit {:?}", point.x, point.y, hit);
                self.select(hit);
            }
        }
        Ok(())
    }
}
