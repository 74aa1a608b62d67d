//! Canonical serialized snapshot handed to renderers and exporters.

use serde::{Deserialize, Serialize};

use crate::error::SceneResult;
use crate::geometry::{Canvas, Size};
use crate::node::{Node, NodeId};
use crate::state::CanvasState;
use crate::surface::SurfaceHandle;

/// One node as a renderer sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDocument {
    /// The node itself.
    #[serde(flatten)]
    pub node: Node,
    /// Resolved footprint, present for every kind.
    pub size: Size,
    /// Selection flag.
    #[serde(default)]
    pub selected: bool,
}

/// Read-only snapshot of a scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneDocument {
    /// Surface the export collaborator captures.
    pub surface: SurfaceHandle,
    /// Canvas dimensions.
    pub canvas: Canvas,
    /// Store revision this snapshot was taken at.
    pub revision: u64,
    /// Active selection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection: Option<NodeId>,
    /// Nodes bottom-to-top.
    pub nodes: Vec<NodeDocument>,
}

impl SceneDocument {
    /// Build a snapshot from canvas state.
    #[must_use]
    pub fn from_state(surface: SurfaceHandle, state: &CanvasState, revision: u64) -> Self {
        let selection = state.selection().cloned();
        let nodes = state
            .scene
            .stacking_order()
            .into_iter()
            .map(|node| NodeDocument {
                size: node.size(),
                selected: selection.as_ref() == Some(&node.id),
                node: node.clone(),
            })
            .collect();
        Self {
            surface,
            canvas: state.scene.canvas,
            revision,
            selection,
            nodes,
        }
    }

    /// Find a node in the snapshot.
    #[must_use]
    pub fn node(&self, id: &NodeId) -> Option<&NodeDocument> {
        self.nodes.iter().find(|doc| &doc.node.id == id)
    }

    /// Serialize to pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> SceneResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a snapshot from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is not a valid snapshot.
    pub fn from_json(json: &str) -> SceneResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
