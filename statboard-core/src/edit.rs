//! Two-phase editing: drafts live here until they are committed.
//!
//! A node is either idle or being edited. While it is being edited, every
//! keystroke lands in a draft [`NodePatch`]; the scene only sees the draft
//! when the edit ends.

use std::collections::HashMap;

use crate::error::{SceneError, SceneResult};
use crate::node::{Node, NodeId};
use crate::patch::NodePatch;
use crate::scene::Scene;

/// Edit state of one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditState {
    /// No draft exists; the node shows its committed values.
    Idle,
    /// A draft is open.
    Editing,
}

/// One open draft: the committed values it started from and the changes
/// typed since.
#[derive(Debug, Clone, Default, PartialEq)]
struct Draft {
    seed: NodePatch,
    changes: NodePatch,
}

/// Open drafts, keyed by node.
#[derive(Debug, Clone, Default)]
pub struct EditSessions {
    drafts: HashMap<NodeId, Draft>,
}

impl EditSessions {
    /// Create an empty session table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state for a node.
    #[must_use]
    pub fn state(&self, id: &NodeId) -> EditState {
        if self.drafts.contains_key(id) {
            EditState::Editing
        } else {
            EditState::Idle
        }
    }

    /// Open a draft seeded from the node's committed fields.
    ///
    /// Reopening an open draft keeps what was already typed.
    pub fn begin(&mut self, node: &Node) {
        self.drafts.entry(node.id.clone()).or_insert_with(|| Draft {
            seed: NodePatch::from_node(node),
            changes: NodePatch::default(),
        });
    }

    /// Merge a change into an open draft.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::NotEditing`] if no draft is open for `id`.
    pub fn update(&mut self, id: &NodeId, change: &NodePatch) -> SceneResult<()> {
        let draft = self
            .drafts
            .get_mut(id)
            .ok_or_else(|| SceneError::NotEditing(id.clone()))?;
        draft.changes.merge(change);
        Ok(())
    }

    /// Fields changed since the draft was opened. Only these are committed.
    #[must_use]
    pub fn draft(&self, id: &NodeId) -> Option<&NodePatch> {
        self.drafts.get(id).map(|d| &d.changes)
    }

    /// What an edit control should show: the seed overlaid with the changes.
    #[must_use]
    pub fn view(&self, id: &NodeId) -> Option<NodePatch> {
        self.drafts.get(id).map(|d| {
            let mut view = d.seed.clone();
            view.merge(&d.changes);
            view
        })
    }

    /// Close a draft and hand back its changes for committing.
    pub fn take(&mut self, id: &NodeId) -> Option<NodePatch> {
        self.drafts.remove(id).map(|d| d.changes)
    }

    /// Drop drafts whose node no longer exists.
    pub fn retain_existing(&mut self, scene: &Scene) {
        self.drafts.retain(|id, _| {
            let alive = scene.contains(id);
            if !alive {
                tracing::debug!("Discarding draft for deleted node {id}");
            }
            alive
        });
    }

    /// Number of open drafts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.drafts.len()
    }

    /// Check if no draft is open.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }
}
