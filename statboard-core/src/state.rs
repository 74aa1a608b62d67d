//! Canvas state and the pure mutation transition.

use serde::{Deserialize, Serialize};

use crate::command::{Mutation, Outcome};
use crate::error::{SceneError, SceneResult};
use crate::geometry::{Point, Size};
use crate::node::{Node, NodeData, NodeId, NodeKind, Preset, PLAYER_IMAGE_MIN, PROGRESS_BAR_MIN};
use crate::patch::NodePatch;
use crate::scene::Scene;
use crate::toolbar::ToolbarItem;

/// The complete canvas state: scene, selection and id allocator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasState {
    /// The scene graph.
    pub scene: Scene,
    /// Currently selected node.
    selection: Option<NodeId>,
    /// Next serial for generated ids. Never rewinds.
    next_serial: u64,
}

impl CanvasState {
    /// Wrap a scene with no selection.
    #[must_use]
    pub fn new(scene: Scene) -> Self {
        Self {
            scene,
            selection: None,
            next_serial: 1,
        }
    }

    /// The active selection.
    #[must_use]
    pub fn selection(&self) -> Option<&NodeId> {
        self.selection.as_ref()
    }

    /// Apply a mutation in place.
    ///
    /// Unknown ids are dropped for move, select and bring-to-front, and
    /// rejected for resize, commit and delete.
    ///
    /// # Errors
    ///
    /// Returns an error for structurally invalid requests: unknown id on
    /// resize/commit/delete, resize of a fixed-footprint kind, or delete of
    /// a singleton. The state is untouched when an error is returned.
    pub fn apply(&mut self, mutation: Mutation) -> SceneResult<Outcome> {
        let outcome = match mutation {
            Mutation::Create { item } => Ok(Outcome::Created(self.create_node(item))),
            Mutation::Move { id, position } => Ok(self.move_to(&id, position)),
            Mutation::Resize { id, size } => self.resize(&id, size),
            Mutation::Commit { id, patch } => self.commit(&id, &patch),
            Mutation::Delete { id } => self.delete(&id),
            Mutation::Select { id } => Ok(self.select(id)),
            Mutation::BringToFront { id } => Ok(self.bring_to_front(&id)),
        };
        debug_assert!(self.scene.invariants_hold(), "scene invariants violated");
        outcome
    }

    /// Apply a mutation to a copy, returning the new state.
    ///
    /// # Errors
    ///
    /// Same as [`CanvasState::apply`].
    pub fn transition(&self, mutation: Mutation) -> SceneResult<(Self, Outcome)> {
        let mut next = self.clone();
        let outcome = next.apply(mutation)?;
        Ok((next, outcome))
    }

    fn allocate_id(&mut self, kind: NodeKind) -> NodeId {
        loop {
            let id = NodeId::new(format!("{}-{}", kind.id_prefix(), self.next_serial));
            self.next_serial += 1;
            if !self.scene.contains(&id) {
                return id;
            }
        }
    }

    /// Insert a fresh node from the toolbar and return its id.
    pub(crate) fn create_node(&mut self, item: ToolbarItem) -> NodeId {
        let id = self.allocate_id(item.kind());
        let mut node = item.build(id.clone()).with_z_index(self.scene.next_z_index());
        node.position = self.scene.canvas.clamp_position(node.position, node.size());
        tracing::debug!("Created {} node {id}", node.kind());
        self.scene.insert(node);
        id
    }

    fn move_to(&mut self, id: &NodeId, position: Point) -> Outcome {
        let canvas = self.scene.canvas;
        let Some(node) = self.scene.get_mut(id) else {
            tracing::debug!("Dropping move for unknown node {id}");
            return Outcome::Ignored;
        };
        node.position = canvas.clamp_position(position, node.size());
        Outcome::Changed
    }

    fn resize(&mut self, id: &NodeId, size: Size) -> SceneResult<Outcome> {
        let canvas = self.scene.canvas;
        let node = self
            .scene
            .get_mut(id)
            .ok_or_else(|| SceneError::UnknownNodeId(id.clone()))?;
        let kind = node.kind();
        match &mut node.data {
            NodeData::Circle { preset, .. } => {
                *preset = Preset::nearest_circle(size.width.max(size.height));
            }
            NodeData::PlayerImage { size: current, .. } => {
                *current = canvas.clamp_size(size, PLAYER_IMAGE_MIN);
            }
            NodeData::ProgressBar { size: current, .. } => {
                *current = canvas.clamp_size(size, PROGRESS_BAR_MIN);
            }
            NodeData::Divider {
                orientation,
                size: current,
                ..
            } => {
                *current = canvas.clamp_size(size, orientation.min_size());
            }
            _ => {
                return Err(SceneError::NotResizable {
                    id: id.clone(),
                    kind,
                })
            }
        }

        node.position = canvas.clamp_position(node.position, node.size());
        Ok(Outcome::Changed)
    }

    fn commit(&mut self, id: &NodeId, patch: &NodePatch) -> SceneResult<Outcome> {
        let canvas = self.scene.canvas;
        let node = self
            .scene
            .get_mut(id)
            .ok_or_else(|| SceneError::UnknownNodeId(id.clone()))?;
        let outcome = patch.apply(node);
        if !outcome.dropped.is_empty() {
            tracing::debug!(
                "Dropped fields {:?} not applicable to {} node {id}",
                outcome.dropped,
                node.kind()
            );
        }
        // Text and preset edits change the footprint.
        node.position = canvas.clamp_position(node.position, node.size());
        Ok(Outcome::Committed(outcome))
    }

    fn delete(&mut self, id: &NodeId) -> SceneResult<Outcome> {
        let kind = self
            .scene
            .get(id)
            .map(Node::kind)
            .ok_or_else(|| SceneError::UnknownNodeId(id.clone()))?;
        if kind.is_singleton() {
            return Err(SceneError::NotDeletable {
                id: id.clone(),
                kind,
            });
        }
        let node = self
            .scene
            .remove(id)
            .ok_or_else(|| SceneError::UnknownNodeId(id.clone()))?;
        if self.selection.as_ref() == Some(id) {
            self.selection = None;
        }
        tracing::debug!("Deleted {kind} node {id}");
        Ok(Outcome::Deleted(node))
    }

    fn select(&mut self, id: Option<NodeId>) -> Outcome {
        match id {
            Some(id) if !self.scene.contains(&id) => {
                tracing::debug!("Ignoring selection of unknown node {id}");
                Outcome::Ignored
            }
            id => {
                self.selection = id;
                Outcome::Changed
            }
        }
    }

    fn bring_to_front(&mut self, id: &NodeId) -> Outcome {
        let Some(current) = self.scene.get(id).map(|n| n.z_index) else {
            return Outcome::Ignored;
        };
        let top = self.scene.max_z_index();
        let shared = self.scene.nodes().filter(|n| n.z_index == top).count() > 1;
        if current == top && !shared {
            return Outcome::Ignored;
        }
        let z = self.scene.next_z_index();
        if let Some(node) = self.scene.get_mut(id) {
            node.z_index = z;
        }
        Outcome::Changed
    }
}

impl Default for CanvasState {
    fn default() -> Self {
        Self::new(Scene::template())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Orientation;

    fn id(s: &str) -> NodeId {
        NodeId::new(s)
    }

    #[test]
    fn test_create_allocates_unique_ids() {
        let mut state = CanvasState::default();
        let mut ids = Vec::new();
        for _ in 0..3 {
            match state
                .apply(Mutation::Create {
                    item: ToolbarItem::CircleSm,
                })
                .expect("create")
            {
                Outcome::Created(id) => ids.push(id),
                other => panic!("unexpected outcome {other:?}"),
            }
        }
        assert_eq!(ids[0].as_str(), "circle-1");
        assert_eq!(ids[1].as_str(), "circle-2");
        assert_ne!(ids[1], ids[2]);
        assert!(state.selection().is_none());
    }

    #[test]
    fn test_ids_not_reused_after_delete() {
        let mut state = CanvasState::default();
        let Outcome::Created(first) = state
            .apply(Mutation::Create {
                item: ToolbarItem::StatBox,
            })
            .expect("create")
        else {
            panic!("expected create");
        };
        state
            .apply(Mutation::Delete { id: first.clone() })
            .expect("delete");
        let Outcome::Created(second) = state
            .apply(Mutation::Create {
                item: ToolbarItem::StatBox,
            })
            .expect("create")
        else {
            panic!("expected create");
        };
        assert_ne!(first, second);
    }

    #[test]
    fn test_move_clamps_and_ignores_unknown() {
        let mut state = CanvasState::default();
        state
            .apply(Mutation::Move {
                id: id("box1"),
                position: Point::new(9999.0, -50.0),
            })
            .expect("move");
        let node = state.scene.get(&id("box1")).expect("box");
        assert!((node.position.x - 610.0).abs() < f32::EPSILON);
        assert!(node.position.y.abs() < f32::EPSILON);

        let before = state.clone();
        let outcome = state
            .apply(Mutation::Move {
                id: id("ghost"),
                position: Point::new(1.0, 1.0),
            })
            .expect("move");
        assert_eq!(outcome, Outcome::Ignored);
        assert_eq!(state, before);
    }

    #[test]
    fn test_resize_rules() {
        let mut state = CanvasState::default();
        assert!(matches!(
            state.apply(Mutation::Resize {
                id: id("box1"),
                size: Size::new(10.0, 10.0),
            }),
            Err(SceneError::NotResizable { .. })
        ));
        assert!(matches!(
            state.apply(Mutation::Resize {
                id: id("ghost"),
                size: Size::new(10.0, 10.0),
            }),
            Err(SceneError::UnknownNodeId(_))
        ));

        state
            .apply(Mutation::Resize {
                id: id("circle3"),
                size: Size::new(150.0, 150.0),
            })
            .expect("resize");
        match &state.scene.get(&id("circle3")).expect("circle").data {
            NodeData::Circle { preset, .. } => assert_eq!(*preset, Preset::Lg),
            other => panic!("unexpected payload {other:?}"),
        }
    }

    #[test]
    fn test_vertical_divider_minimum() {
        let mut state = CanvasState::default();
        let Outcome::Created(divider) = state
            .apply(Mutation::Create {
                item: ToolbarItem::DividerV,
            })
            .expect("create")
        else {
            panic!("expected create");
        };
        state
            .apply(Mutation::Resize {
                id: divider.clone(),
                size: Size::new(1.0, 10.0),
            })
            .expect("resize");
        let node = state.scene.get(&divider).expect("divider");
        assert_eq!(node.size(), Orientation::Vertical.min_size());
    }

    #[test]
    fn test_player_image_grow_reclamps_position() {
        let mut state = CanvasState::default();
        state
            .apply(Mutation::Resize {
                id: id("playerImage"),
                size: Size::new(700.0, 800.0),
            })
            .expect("resize");
        let node = state.scene.get(&id("playerImage")).expect("image");
        assert!(state.scene.canvas.contains(&node.bounds()));
        assert!((node.position.x - 50.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_delete_singleton_is_rejected() {
        let mut state = CanvasState::default();
        let result = state.apply(Mutation::Delete { id: id("header") });
        assert!(matches!(result, Err(SceneError::NotDeletable { .. })));
        assert!(state.scene.contains(&id("header")));
    }

    #[test]
    fn test_delete_clears_matching_selection() {
        let mut state = CanvasState::default();
        state
            .apply(Mutation::Select {
                id: Some(id("circle2")),
            })
            .expect("select");
        state
            .apply(Mutation::Delete { id: id("circle2") })
            .expect("delete");
        assert!(state.selection().is_none());
    }

    #[test]
    fn test_select_unknown_keeps_selection() {
        let mut state = CanvasState::default();
        state
            .apply(Mutation::Select {
                id: Some(id("box1")),
            })
            .expect("select");
        state
            .apply(Mutation::Select {
                id: Some(id("ghost")),
            })
            .expect("select");
        assert_eq!(state.selection(), Some(&id("box1")));
    }

    #[test]
    fn test_bring_to_front() {
        let mut state = CanvasState::default();
        let outcome = state
            .apply(Mutation::BringToFront { id: id("header") })
            .expect("raise");
        assert_eq!(outcome, Outcome::Changed);
        let top = state.scene.stacking_order().last().map(|n| n.id.clone());
        assert_eq!(top, Some(id("header")));

        let again = state
            .apply(Mutation::BringToFront { id: id("header") })
            .expect("raise");
        assert_eq!(again, Outcome::Ignored);
    }

    #[test]
    fn test_transition_leaves_original_untouched() {
        let state = CanvasState::default();
        let (next, outcome) = state
            .transition(Mutation::Create {
                item: ToolbarItem::TextLabel,
            })
            .expect("create");
        assert!(matches!(outcome, Outcome::Created(_)));
        assert_eq!(next.scene.len(), state.scene.len() + 1);
    }
}
