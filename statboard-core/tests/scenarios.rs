//! End-to-end editing scenarios against the scene store.

use statboard_core::{
    NodeData, NodeId, NodeKind, NodePatch, Point, PlayerRecord, PlayerStats, Preset, SceneError,
    SceneStore, Size, ToolbarItem, DEFAULT_CREATION_POINT,
};

fn box_values(store: &SceneStore) -> Vec<String> {
    store
        .scene()
        .nodes_of(NodeKind::Box)
        .iter()
        .map(|n| match &n.data {
            NodeData::Box { value, .. } => value.clone(),
            other => panic!("unexpected payload {other:?}"),
        })
        .collect()
}

// ============================================================================
// Toolbar lifecycle
// ============================================================================

#[test]
fn test_create_select_delete_circle() {
    let mut store = SceneStore::new();
    for id in ["circle1", "circle2", "circle3"] {
        store.delete_node(&NodeId::new(id)).expect("delete template circle");
    }
    assert!(store.scene().nodes_of(NodeKind::Circle).is_empty());

    let id = store.create_node("circle-lg".parse().expect("toolbar item"));
    assert!(store.selection().is_none(), "creation must not auto-select");

    let node = store.scene().get(&id).expect("created");
    assert_eq!(node.position, DEFAULT_CREATION_POINT);
    match &node.data {
        NodeData::Circle { value, label, .. } => {
            assert_eq!(value, "0%");
            assert_eq!(label, "New Stat");
        }
        other => panic!("unexpected payload {other:?}"),
    }

    store.select(Some(id.clone()));
    assert_eq!(store.selection(), Some(&id));
    store.delete_node(&id).expect("delete");
    assert!(store.selection().is_none());
    assert_eq!(store.scene().nodes_of(NodeKind::Circle).len(), 0);
}

#[test]
fn test_overlapping_creations_share_default_point() {
    let mut store = SceneStore::new();
    let a = store.create_node(ToolbarItem::MiniStat);
    let b = store.create_node(ToolbarItem::MiniStat);
    assert_ne!(a, b);
    let pa = store.scene().get(&a).map(|n| n.position);
    let pb = store.scene().get(&b).map(|n| n.position);
    assert_eq!(pa, pb);
    // The later node is on top.
    let hit = store
        .scene()
        .node_at(Point::new(360.0, 410.0))
        .map(|n| n.id.clone());
    assert_eq!(hit, Some(b));
}

#[test]
fn test_unknown_toolbar_item_creates_nothing() {
    let store = SceneStore::new();
    let result = "hexagon".parse::<ToolbarItem>();
    assert!(matches!(result, Err(SceneError::UnknownToolbarItem(_))));
    assert_eq!(store.scene().len(), 13);
}

// ============================================================================
// Resize
// ============================================================================

#[test]
fn test_divider_resize_clamps_to_minimum() {
    let mut store = SceneStore::new();
    let id = store.create_node(ToolbarItem::DividerH);
    assert_eq!(store.scene().get(&id).map(|n| n.size()), Some(Size::new(150.0, 4.0)));

    store
        .resize_node(&id, Size::new(10.0, 4.0))
        .expect("resize");
    assert_eq!(store.scene().get(&id).map(|n| n.size()), Some(Size::new(50.0, 4.0)));
}

#[test]
fn test_divider_grow_reclamps_position() {
    let mut store = SceneStore::new();
    let id = store.create_node(ToolbarItem::DividerH);
    store.move_node(&id, Point::new(600.0, 100.0));
    store
        .resize_node(&id, Size::new(400.0, 4.0))
        .expect("resize");
    let node = store.scene().get(&id).expect("divider");
    assert!((node.position.x - 350.0).abs() < f32::EPSILON);
    assert!(store.scene().canvas.contains(&node.bounds()));
}

#[test]
fn test_fixed_kinds_reject_resize() {
    let mut store = SceneStore::new();
    for id in ["header", "box1", "mini1", "rating", "playerName", "chart1"] {
        let result = store.resize_node(&NodeId::new(id), Size::new(300.0, 300.0));
        assert!(
            matches!(result, Err(SceneError::NotResizable { .. })),
            "{id} accepted a resize"
        );
    }
}

// ============================================================================
// Singletons
// ============================================================================

#[test]
fn test_singletons_cannot_be_deleted() {
    let mut store = SceneStore::new();
    for kind in NodeKind::ALL.into_iter().filter(|k| k.is_singleton()) {
        let id = store.scene().singleton(kind).expect("singleton").id.clone();
        let result = store.delete_node(&id);
        assert!(matches!(result, Err(SceneError::NotDeletable { .. })));
        assert!(store.scene().contains(&id));
    }
}

// ============================================================================
// Edit buffers
// ============================================================================

#[test]
fn test_delete_during_edit_drops_commit() {
    let mut store = SceneStore::new();
    let id = store.create_node(ToolbarItem::TextLabel);
    store.begin_edit(&id).expect("begin");
    store
        .update_draft(
            &id,
            &NodePatch {
                text: Some("Half-typed".to_string()),
                ..NodePatch::default()
            },
        )
        .expect("draft");

    store.delete_node(&id).expect("delete");
    let count = store.scene().len();

    assert_eq!(store.end_edit(&id).expect("end"), None);
    assert!(!store.scene().contains(&id));
    assert_eq!(store.scene().len(), count);
    assert!(!store.is_editing(&id));
}

#[test]
fn test_draft_is_invisible_until_commit() {
    let mut store = SceneStore::new();
    let id = NodeId::new("mini2");
    store.begin_edit(&id).expect("begin");
    store
        .update_draft(
            &id,
            &NodePatch {
                value: Some("2".to_string()),
                ..NodePatch::default()
            },
        )
        .expect("draft");

    let doc = store.document();
    match &doc.node(&id).expect("mini2").node.data {
        NodeData::MiniStat { value, .. } => assert_eq!(value, "19"),
        other => panic!("unexpected payload {other:?}"),
    }

    store.end_edit(&id).expect("end");
    match &store.scene().get(&id).expect("mini2").data {
        NodeData::MiniStat { value, .. } => assert_eq!(value, "2"),
        other => panic!("unexpected payload {other:?}"),
    }
}

#[test]
fn test_commit_is_idempotent() {
    let mut store = SceneStore::new();
    let id = NodeId::new("circle2");
    store.begin_edit(&id).expect("begin");
    store
        .update_draft(
            &id,
            &NodePatch {
                value: Some("61%".to_string()),
                custom_color: Some("#3b82f6".to_string()),
                ..NodePatch::default()
            },
        )
        .expect("draft");
    let draft = store.draft(&id).cloned().expect("draft");
    store.end_edit(&id).expect("end");
    let once = store.scene().clone();

    store.commit_edit(&id, draft).expect("commit again");
    assert_eq!(store.scene(), &once);
}

#[test]
fn test_commit_unknown_node_is_reported() {
    let mut store = SceneStore::new();
    let before = store.scene().clone();
    let result = store.commit_edit(&NodeId::new("ghost"), NodePatch::default());
    assert!(matches!(result, Err(SceneError::UnknownNodeId(_))));
    assert_eq!(store.scene(), &before);
}

#[test]
fn test_resize_during_edit_survives_end_edit() {
    let mut store = SceneStore::new();
    let id = NodeId::new("circle3");
    store.begin_edit(&id).expect("begin");
    store
        .update_draft(
            &id,
            &NodePatch {
                label: Some("dribbling".to_string()),
                ..NodePatch::default()
            },
        )
        .expect("draft");

    store
        .resize_node(&id, Size::new(160.0, 160.0))
        .expect("resize");
    store.end_edit(&id).expect("end").expect("committed");

    match &store.scene().get(&id).expect("circle3").data {
        NodeData::Circle { preset, label, .. } => {
            assert_eq!(*preset, Preset::Lg);
            assert_eq!(label, "dribbling");
        }
        other => panic!("unexpected payload {other:?}"),
    }
}

#[test]
fn test_lookup_during_edit_survives_end_edit() {
    let mut store = SceneStore::new();
    let id = NodeId::new("box1");
    let record = PlayerRecord {
        name: "Ibrahim Maza".to_string(),
        stats: PlayerStats {
            goals: 12.0,
            ..PlayerStats::default()
        },
        ..PlayerRecord::default()
    };

    // Nothing typed: closing the edit writes nothing.
    store.begin_edit(&id).expect("begin");
    store
        .apply_player_lookup(Ok::<_, std::io::Error>(record.clone()))
        .expect("apply");
    assert_eq!(store.end_edit(&id).expect("end"), None);
    assert_eq!(box_values(&store), vec!["12"]);

    // A typed label lands without rewinding the value.
    store.begin_edit(&id).expect("begin");
    store
        .update_draft(
            &id,
            &NodePatch {
                label: Some("GOALS".to_string()),
                ..NodePatch::default()
            },
        )
        .expect("draft");
    store
        .apply_player_lookup(Ok::<_, std::io::Error>(PlayerRecord {
            stats: PlayerStats {
                goals: 13.0,
                ..record.stats
            },
            ..record
        }))
        .expect("apply");
    store.end_edit(&id).expect("end").expect("committed");
    match &store.scene().get(&id).expect("box1").data {
        NodeData::Box { value, label, .. } => {
            assert_eq!(value, "13");
            assert_eq!(label, "GOALS");
        }
        other => panic!("unexpected payload {other:?}"),
    }
}

// ============================================================================
// Player lookup batches
// ============================================================================

#[test]
fn test_player_goals_update_every_box() {
    let mut store = SceneStore::new();
    store.create_node(ToolbarItem::StatBox);
    store.create_node(ToolbarItem::StatBox);
    assert_eq!(box_values(&store), vec!["2", "0", "0"]);

    let record = PlayerRecord {
        name: "Ibrahim Maza".to_string(),
        nationality: "Algeria".to_string(),
        stats: PlayerStats {
            goals: 12.0,
            rating: 7.0,
            ..PlayerStats::default()
        },
        ..PlayerRecord::default()
    };
    store
        .apply_player_lookup(Ok::<_, std::io::Error>(record))
        .expect("apply");
    assert_eq!(box_values(&store), vec!["12", "12", "12"]);
}

#[test]
fn test_failed_lookup_keeps_boxes() {
    let mut store = SceneStore::new();
    store.create_node(ToolbarItem::StatBox);
    let before = box_values(&store);
    let revision = store.revision();

    let failure = std::io::Error::new(std::io::ErrorKind::TimedOut, "lookup timed out");
    let result = store.apply_player_lookup(Err::<PlayerRecord, _>(failure));
    assert!(matches!(result, Err(SceneError::ExternalAdapterFailure(_))));
    assert_eq!(box_values(&store), before);
    assert_eq!(store.revision(), revision);
}
