//! Property tests for scene invariants under arbitrary mutation sequences.
//!
//! Whatever the store is asked to do, every node stays on the canvas and
//! ids stay unique.

use std::collections::HashSet;

use proptest::prelude::*;
use statboard_core::{
    IconType, Mutation, NodeId, NodePatch, Outcome, Point, SceneStore, Size, ToolbarItem,
};

const IDS: &[&str] = &[
    "header",
    "playerImage",
    "circle1",
    "circle2",
    "circle3",
    "box1",
    "playerName",
    "chart1",
    "mini1",
    "rating",
    "circle-1",
    "box-2",
    "divider-3",
    "text-4",
    "bar-5",
    "icon-6",
    "ghost",
];

/// Quarter-unit coordinates, exactly representable.
#[allow(clippy::cast_precision_loss)]
fn coord(lo: i32, hi: i32) -> impl Strategy<Value = f32> {
    (lo * 4..hi * 4).prop_map(|v| v as f32 / 4.0)
}

fn arb_id() -> impl Strategy<Value = NodeId> {
    prop::sample::select(IDS).prop_map(NodeId::new)
}

fn arb_item() -> impl Strategy<Value = ToolbarItem> {
    prop_oneof![
        Just(ToolbarItem::CircleLg),
        Just(ToolbarItem::CircleMd),
        Just(ToolbarItem::CircleSm),
        Just(ToolbarItem::StatBox),
        Just(ToolbarItem::MiniStat),
        Just(ToolbarItem::ProgressBar),
        Just(ToolbarItem::DividerH),
        Just(ToolbarItem::DividerV),
        prop::sample::select(IconType::ALL.to_vec()).prop_map(ToolbarItem::Icon),
        Just(ToolbarItem::TextLabel),
    ]
}

fn arb_patch() -> impl Strategy<Value = NodePatch> {
    (
        prop::option::of("[a-zA-Z0-9 %]{0,60}"),
        prop::option::of("[a-zA-Z ]{0,60}"),
        prop::option::of(-50.0f32..500.0),
    )
        .prop_map(|(value, text, font_size)| NodePatch {
            value,
            text,
            font_size,
            ..NodePatch::default()
        })
}

fn arb_mutation() -> impl Strategy<Value = Mutation> {
    prop_oneof![
        arb_item().prop_map(|item| Mutation::Create { item }),
        (arb_id(), coord(-1000, 2000), coord(-1000, 2000)).prop_map(|(id, x, y)| {
            Mutation::Move {
                id,
                position: Point::new(x, y),
            }
        }),
        (arb_id(), coord(-100, 1500), coord(-100, 1500)).prop_map(|(id, w, h)| {
            Mutation::Resize {
                id,
                size: Size::new(w, h),
            }
        }),
        (arb_id(), arb_patch()).prop_map(|(id, patch)| Mutation::Commit { id, patch }),
        arb_id().prop_map(|id| Mutation::Delete { id }),
        prop::option::of(arb_id()).prop_map(|id| Mutation::Select { id }),
        arb_id().prop_map(|id| Mutation::BringToFront { id }),
    ]
}

proptest! {
    #[test]
    fn prop_nodes_stay_on_canvas(ops in prop::collection::vec(arb_mutation(), 0..60)) {
        let mut store = SceneStore::new();
        for op in ops {
            let _ = store.apply(op);
            let canvas = store.scene().canvas;
            for node in store.scene().nodes() {
                prop_assert!(
                    canvas.contains(&node.bounds()),
                    "{} escaped the canvas: {:?}",
                    node.id,
                    node.bounds()
                );
            }
        }
    }

    #[test]
    fn prop_ids_stay_unique(ops in prop::collection::vec(arb_mutation(), 0..60)) {
        let mut store = SceneStore::new();
        let mut ever_created = HashSet::new();
        for op in ops {
            if let Ok(Outcome::Created(id)) = store.apply(op) {
                prop_assert!(ever_created.insert(id.clone()), "id {} reused", id);
            }
            let ids: Vec<_> = store.scene().nodes().map(|n| n.id.clone()).collect();
            let unique: HashSet<_> = ids.iter().collect();
            prop_assert_eq!(unique.len(), ids.len());
            prop_assert!(store.scene().invariants_hold());
        }
    }

    #[test]
    fn prop_selection_always_resolves(ops in prop::collection::vec(arb_mutation(), 0..60)) {
        let mut store = SceneStore::new();
        for op in ops {
            let _ = store.apply(op);
            if let Some(id) = store.selection() {
                prop_assert!(store.scene().contains(id));
            }
        }
    }

    #[test]
    fn prop_unknown_id_touches_nothing(
        x in coord(-500, 1500),
        y in coord(-500, 1500),
        patch in arb_patch(),
    ) {
        let mut store = SceneStore::new();
        let before = store.scene().clone();
        let ghost = NodeId::new("ghost");
        store.move_node(&ghost, Point::new(x, y));
        let _ = store.resize_node(&ghost, Size::new(x, y));
        let _ = store.commit_edit(&ghost, patch);
        store.select(Some(ghost.clone()));
        store.bring_to_front(&ghost);
        prop_assert_eq!(store.scene(), &before);
        prop_assert!(store.selection().is_none());
    }

    #[test]
    fn prop_drag_clamping_is_idempotent(x in coord(-1000, 2000), y in coord(-1000, 2000)) {
        let mut store = SceneStore::new();
        let id = NodeId::new("playerName");
        store.move_node(&id, Point::new(x, y));
        let once = store.scene().get(&id).map(|n| n.position);
        if let Some(p) = once {
            store.move_node(&id, p);
        }
        prop_assert_eq!(store.scene().get(&id).map(|n| n.position), once);
    }
}
