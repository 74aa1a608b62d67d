//! Scene graph: every placed node, partitioned by kind.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::geometry::{Canvas, Point, Size};
use crate::node::{
    ChartPoint, Node, NodeData, NodeId, NodeKind, Palette, Preset, StatRole, SubStat,
};

/// The aggregate of all nodes on one canvas.
///
/// Collections are keyed by kind, so iteration order is render order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Drawing surface.
    pub canvas: Canvas,
    /// Nodes per kind, each collection in insertion order.
    collections: BTreeMap<NodeKind, Vec<Node>>,
}

impl Scene {
    /// An empty scene. Callers must insert every singleton before use.
    fn empty(canvas: Canvas) -> Self {
        Self {
            canvas,
            collections: BTreeMap::new(),
        }
    }

    /// The default infographic layout.
    #[must_use]
    pub fn template() -> Self {
        let mut scene = Self::empty(Canvas::STANDARD);
        let text = |s: &str| s.to_string();

        scene.push(Node::new(
            "header",
            Point::new(30.0, 20.0),
            NodeData::Header {
                title: text("FANTASTATISTICHE"),
                subtitle: text("4ª GIORNATA RITORNO"),
            },
        ));
        scene.push(Node::new(
            "playerImage",
            Point::new(220.0, 120.0),
            NodeData::PlayerImage {
                image: None,
                size: Size::new(350.0, 450.0),
            },
        ));
        for (id, value, label, color, preset, at, role) in [
            (
                "circle1",
                "78%",
                "passaggi riusciti",
                Palette::Gold,
                Preset::Lg,
                Point::new(40.0, 100.0),
                Some(StatRole::PassAccuracy),
            ),
            (
                "circle2",
                "52%",
                "contrasti vinti",
                Palette::Emerald,
                Preset::Md,
                Point::new(80.0, 280.0),
                Some(StatRole::TacklesWon),
            ),
            (
                "circle3",
                "85%",
                "precisione tiri",
                Palette::Gold,
                Preset::Sm,
                Point::new(40.0, 420.0),
                None,
            ),
        ] {
            let mut node = Node::new(
                id,
                at,
                NodeData::Circle {
                    value: text(value),
                    label: text(label),
                    color,
                    preset,
                },
            );
            node.stat_role = role;
            scene.push(node);
        }
        scene.push(
            Node::new(
                "box1",
                Point::new(30.0, 540.0),
                NodeData::Box {
                    value: text("2"),
                    label: text("GOAL"),
                    sub_stats: vec![SubStat::new("Bundesliga", "4|0"), SubStat::new("Algeria", "1|0")],
                },
            )
            .with_role(StatRole::Goals),
        );
        scene.push(Node::new(
            "playerName",
            Point::new(420.0, 320.0),
            NodeData::PlayerName {
                first_name: text("IBRAHIM"),
                last_name: text("MAZA"),
                number: text("22"),
                country: text("ALGERIA"),
            },
        ));
        scene.push(Node::new(
            "chart1",
            Point::new(480.0, 520.0),
            NodeData::PerformanceChart {
                title: text("MATCH PERFORMANCE"),
                data: [2.0, -3.0, 5.0, 8.0, -2.0, 6.0, 4.0, -5.0, 7.0, 3.0, -1.0, 4.0]
                    .into_iter()
                    .map(|value| ChartPoint { value })
                    .collect(),
            },
        ));
        for (id, value, label, sublabel, at, role) in [
            ("mini1", "684", "MIN", "giocati", Point::new(300.0, 590.0), StatRole::MinutesPlayed),
            ("mini2", "19", "TIRI", "totali", Point::new(200.0, 680.0), StatRole::Appearances),
            ("mini3", "26", "SCA", "azioni create", Point::new(310.0, 680.0), StatRole::Assists),
        ] {
            scene.push(
                Node::new(
                    id,
                    at,
                    NodeData::MiniStat {
                        value: text(value),
                        label: text(label),
                        sublabel: Some(text(sublabel)),
                    },
                )
                .with_role(role),
            );
        }
        scene.push(Node::new(
            "rating",
            Point::new(30.0, 680.0),
            NodeData::RatingBadge {
                value: text("7.2"),
                label: text("FANTAMEDIA"),
            },
        ));
        scene
    }

    /// Append a template node, stacking it above everything so far.
    fn push(&mut self, node: Node) {
        let z = self.next_z_index();
        self.insert(node.with_z_index(z));
    }

    /// Get a node by id.
    #[must_use]
    pub fn get(&self, id: &NodeId) -> Option<&Node> {
        self.nodes().find(|n| &n.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: &NodeId) -> Option<&mut Node> {
        self.collections
            .values_mut()
            .flat_map(|c| c.iter_mut())
            .find(|n| &n.id == id)
    }

    /// Check whether a node with this id exists.
    #[must_use]
    pub fn contains(&self, id: &NodeId) -> bool {
        self.get(id).is_some()
    }

    /// All nodes in kind-category order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.collections.values().flatten()
    }

    /// The collection for one kind.
    #[must_use]
    pub fn nodes_of(&self, kind: NodeKind) -> &[Node] {
        self.collections.get(&kind).map_or(&[], Vec::as_slice)
    }

    /// The instance of a singleton kind.
    #[must_use]
    pub fn singleton(&self, kind: NodeKind) -> Option<&Node> {
        if kind.is_singleton() {
            self.nodes_of(kind).first()
        } else {
            None
        }
    }

    /// Nodes tagged with the given stat role.
    pub fn with_role(&self, role: StatRole) -> impl Iterator<Item = &Node> {
        self.nodes().filter(move |n| n.stat_role == Some(role))
    }

    /// Total number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.collections.values().map(Vec::len).sum()
    }

    /// Check if the scene has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn insert(&mut self, node: Node) {
        self.collections.entry(node.kind()).or_default().push(node);
    }

    pub(crate) fn remove(&mut self, id: &NodeId) -> Option<Node> {
        for collection in self.collections.values_mut() {
            if let Some(index) = collection.iter().position(|n| &n.id == id) {
                return Some(collection.remove(index));
            }
        }
        None
    }

    /// Highest stacking order in use.
    #[must_use]
    pub fn max_z_index(&self) -> i32 {
        self.nodes().map(|n| n.z_index).max().unwrap_or(0)
    }

    pub(crate) fn next_z_index(&self) -> i32 {
        self.max_z_index().saturating_add(1)
    }

    /// Nodes bottom-to-top: by z-index, ties broken by kind category.
    #[must_use]
    pub fn stacking_order(&self) -> Vec<&Node> {
        let mut nodes: Vec<_> = self.nodes().collect();
        // Stable sort keeps category order among equal z-indices.
        nodes.sort_by_key(|n| n.z_index);
        nodes
    }

    /// The topmost node whose bounds contain `point`.
    #[must_use]
    pub fn node_at(&self, point: Point) -> Option<&Node> {
        self.stacking_order()
            .into_iter()
            .rev()
            .find(|n| n.bounds().contains_point(point))
    }

    /// Check the structural invariants: unique ids, every node on the
    /// canvas, every node filed under its own kind, one of each singleton.
    #[must_use]
    pub fn invariants_hold(&self) -> bool {
        let mut ids: Vec<&NodeId> = self.nodes().map(|n| &n.id).collect();
        let total = ids.len();
        ids.sort();
        ids.dedup();
        let unique = ids.len() == total;

        let bounded = self.nodes().all(|n| self.canvas.contains(&n.bounds()));
        let filed = self
            .collections
            .iter()
            .all(|(kind, nodes)| nodes.iter().all(|n| n.kind() == *kind));
        let singletons = NodeKind::ALL
            .into_iter()
            .filter(|k| k.is_singleton())
            .all(|k| self.nodes_of(k).len() == 1);

        unique && bounded && filed && singletons
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::template()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_is_valid() {
        let scene = Scene::template();
        assert!(scene.invariants_hold());
        assert_eq!(scene.len(), 13);
        assert_eq!(scene.nodes_of(NodeKind::Circle).len(), 3);
        assert_eq!(scene.nodes_of(NodeKind::MiniStat).len(), 3);
        assert!(scene.nodes_of(NodeKind::Divider).is_empty());
    }

    #[test]
    fn test_nodes_follow_render_order() {
        let scene = Scene::template();
        let kinds: Vec<_> = scene.nodes().map(Node::kind).collect();
        let mut sorted = kinds.clone();
        sorted.sort();
        assert_eq!(kinds, sorted);
        assert_eq!(kinds.first(), Some(&NodeKind::Header));
        assert_eq!(kinds.last(), Some(&NodeKind::RatingBadge));
    }

    #[test]
    fn test_singleton_lookup() {
        let scene = Scene::template();
        let rating = scene.singleton(NodeKind::RatingBadge).expect("rating");
        assert_eq!(rating.id.as_str(), "rating");
        assert!(scene.singleton(NodeKind::Circle).is_none());
    }

    #[test]
    fn test_template_roles() {
        let scene = Scene::template();
        let goals: Vec<_> = scene.with_role(StatRole::Goals).map(|n| n.id.as_str()).collect();
        assert_eq!(goals, vec!["box1"]);
        assert_eq!(
            scene
                .with_role(StatRole::PassAccuracy)
                .map(|n| n.id.as_str())
                .collect::<Vec<_>>(),
            vec!["circle1"]
        );
    }

    #[test]
    fn test_node_at_prefers_topmost() {
        let scene = Scene::template();
        // circle1 (40..200, 100..260) sits over nothing else except the canvas.
        let hit = scene.node_at(Point::new(100.0, 150.0)).expect("hit");
        assert_eq!(hit.id.as_str(), "circle1");
        // The player name block is stacked above the player image where they overlap.
        let hit = scene.node_at(Point::new(500.0, 400.0)).expect("hit");
        assert_eq!(hit.id.as_str(), "playerName");
        assert!(scene.node_at(Point::new(740.0, 840.0)).is_none());
    }

    #[test]
    fn test_remove_and_contains() {
        let mut scene = Scene::template();
        let id = NodeId::new("circle3");
        assert!(scene.contains(&id));
        let removed = scene.remove(&id).expect("removed");
        assert_eq!(removed.kind(), NodeKind::Circle);
        assert!(!scene.contains(&id));
        assert!(scene.remove(&id).is_none());
    }

    #[test]
    fn test_scene_json_roundtrip() {
        let scene = Scene::template();
        let json = serde_json::to_string(&scene).expect("serialize");
        let back: Scene = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, scene);
    }
}
