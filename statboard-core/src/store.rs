//! The scene store: sole owner and mutator of the scene.
//!
//! Every write goes through [`SceneStore::apply`] or
//! [`SceneStore::apply_batch`]; readers only ever see whole revisions.

use crate::command::{Mutation, Outcome};
use crate::document::SceneDocument;
use crate::edit::{EditSessions, EditState};
use crate::error::{SceneError, SceneResult};
use crate::geometry::{Point, Size};
use crate::node::{Node, NodeId};
use crate::patch::{NodePatch, PatchOutcome};
use crate::scene::Scene;
use crate::state::CanvasState;
use crate::surface::SurfaceHandle;
use crate::toolbar::ToolbarItem;

/// Single-owner container for the scene, selection and open drafts.
#[derive(Debug, Clone)]
pub struct SceneStore {
    state: CanvasState,
    edits: EditSessions,
    surface: SurfaceHandle,
    revision: u64,
}

impl SceneStore {
    /// A store holding the default template.
    #[must_use]
    pub fn new() -> Self {
        Self::with_scene(Scene::template())
    }

    /// A store holding the given scene.
    #[must_use]
    pub fn with_scene(scene: Scene) -> Self {
        Self {
            state: CanvasState::new(scene),
            edits: EditSessions::new(),
            surface: SurfaceHandle::new(),
            revision: 0,
        }
    }

    /// Read-only view of the scene.
    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.state.scene
    }

    /// Full canvas state.
    #[must_use]
    pub fn state(&self) -> &CanvasState {
        &self.state
    }

    /// Active selection.
    #[must_use]
    pub fn selection(&self) -> Option<&NodeId> {
        self.state.selection()
    }

    /// Handle to the rendered surface for export collaborators.
    #[must_use]
    pub fn surface(&self) -> SurfaceHandle {
        self.surface
    }

    /// Number of committed changes so far.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Nodes bottom-to-top, as a renderer should draw them.
    #[must_use]
    pub fn render_order(&self) -> Vec<&Node> {
        self.state.scene.stacking_order()
    }

    /// Snapshot for renderers.
    #[must_use]
    pub fn document(&self) -> SceneDocument {
        SceneDocument::from_state(self.surface, &self.state, self.revision)
    }

    /// Apply one mutation.
    ///
    /// # Errors
    ///
    /// See [`CanvasState::apply`]; on error nothing changes.
    pub fn apply(&mut self, mutation: Mutation) -> SceneResult<Outcome> {
        let outcome = self.state.apply(mutation)?;
        if let Outcome::Deleted(node) = &outcome {
            // A pending end-edit for this node must find nothing to commit.
            self.edits.take(&node.id);
        }
        if outcome.is_change() {
            self.revision += 1;
        }
        Ok(outcome)
    }

    /// Apply mutations as one unit: either all succeed or none are visible.
    ///
    /// # Errors
    ///
    /// Returns the first error encountered; the store is left exactly as it
    /// was before the call.
    pub fn apply_batch(
        &mut self,
        mutations: impl IntoIterator<Item = Mutation>,
    ) -> SceneResult<Vec<Outcome>> {
        let mut staged = self.state.clone();
        let mut outcomes = Vec::new();
        for mutation in mutations {
            match staged.apply(mutation) {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => {
                    tracing::warn!("Batch rejected after {} mutations: {e}", outcomes.len());
                    return Err(e);
                }
            }
        }

        self.state = staged;
        self.edits.retain_existing(&self.state.scene);
        if outcomes.iter().any(Outcome::is_change) {
            self.revision += 1;
        }
        tracing::info!(
            "Applied batch of {} mutations (revision {})",
            outcomes.len(),
            self.revision
        );
        Ok(outcomes)
    }

    /// Create a node from the toolbar. Does not select it.
    pub fn create_node(&mut self, item: ToolbarItem) -> NodeId {
        let id = self.state.create_node(item);
        self.revision += 1;
        id
    }

    /// Drag a node. Unknown ids are ignored.
    pub fn move_node(&mut self, id: &NodeId, position: Point) {
        if let Err(e) = self.apply(Mutation::Move {
            id: id.clone(),
            position,
        }) {
            tracing::debug!("Move of {id} rejected: {e}");
        }
    }

    /// Resize a node, re-clamping its position.
    ///
    /// # Errors
    ///
    /// Unknown id or a fixed-footprint kind.
    pub fn resize_node(&mut self, id: &NodeId, size: Size) -> SceneResult<()> {
        self.apply(Mutation::Resize {
            id: id.clone(),
            size,
        })
        .map(drop)
    }

    /// Write payload fields. Fields the kind lacks are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::UnknownNodeId`] if the node does not exist.
    pub fn commit_edit(&mut self, id: &NodeId, patch: NodePatch) -> SceneResult<PatchOutcome> {
        match self.apply(Mutation::Commit {
            id: id.clone(),
            patch,
        })? {
            Outcome::Committed(outcome) => Ok(outcome),
            _ => Ok(PatchOutcome::default()),
        }
    }

    /// Delete a node, clearing the selection if it pointed there.
    ///
    /// # Errors
    ///
    /// Unknown id, or [`SceneError::NotDeletable`] for singletons.
    pub fn delete_node(&mut self, id: &NodeId) -> SceneResult<()> {
        self.apply(Mutation::Delete { id: id.clone() }).map(drop)
    }

    /// Set or clear the selection. Unknown ids leave it unchanged.
    pub fn select(&mut self, id: Option<NodeId>) {
        if let Err(e) = self.apply(Mutation::Select { id }) {
            tracing::debug!("Selection rejected: {e}");
        }
    }

    /// Raise a node above all others. Unknown ids are ignored.
    pub fn bring_to_front(&mut self, id: &NodeId) {
        if let Err(e) = self.apply(Mutation::BringToFront { id: id.clone() }) {
            tracing::debug!("Bring-to-front of {id} rejected: {e}");
        }
    }

    /// Open a draft for a node.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::UnknownNodeId`] if the node does not exist.
    pub fn begin_edit(&mut self, id: &NodeId) -> SceneResult<()> {
        let node = self
            .state
            .scene
            .get(id)
            .ok_or_else(|| SceneError::UnknownNodeId(id.clone()))?;
        self.edits.begin(node);
        tracing::debug!("Editing {id}");
        Ok(())
    }

    /// Change the draft without touching the scene.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::NotEditing`] if no draft is open.
    pub fn update_draft(&mut self, id: &NodeId, change: &NodePatch) -> SceneResult<()> {
        self.edits.update(id, change)
    }

    /// Close the draft and commit the fields typed into it.
    ///
    /// Fields the user never touched are not written, so changes that
    /// landed while the draft was open survive. Returns `Ok(None)` when
    /// nothing was typed or the node was deleted while its draft was open.
    ///
    /// # Errors
    ///
    /// Propagates commit errors.
    pub fn end_edit(&mut self, id: &NodeId) -> SceneResult<Option<PatchOutcome>> {
        let Some(draft) = self.edits.take(id) else {
            return Ok(None);
        };
        if !self.state.scene.contains(id) {
            tracing::debug!("Dropping commit for deleted node {id}");
            return Ok(None);
        }
        if draft.is_empty() {
            return Ok(None);
        }
        self.commit_edit(id, draft).map(Some)
    }

    /// Discard the draft. Returns whether one was open.
    pub fn cancel_edit(&mut self, id: &NodeId) -> bool {
        self.edits.take(id).is_some()
    }

    /// Check whether a node has an open draft.
    #[must_use]
    pub fn is_editing(&self, id: &NodeId) -> bool {
        self.edits.state(id) == EditState::Editing
    }

    /// Fields typed into the open draft for a node.
    #[must_use]
    pub fn draft(&self, id: &NodeId) -> Option<&NodePatch> {
        self.edits.draft(id)
    }

    /// Values an edit control should display: committed fields overlaid
    /// with the typed ones.
    #[must_use]
    pub fn draft_view(&self, id: &NodeId) -> Option<NodePatch> {
        self.edits.view(id)
    }
}

impl Default for SceneStore {
    fn default() -> Self {
        Self::new()
    }
}
