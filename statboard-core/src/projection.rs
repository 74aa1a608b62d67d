//! Property projection: the generic editor's view of the selected node.
//!
//! [`fields_for`] is the single place that decides which fields a kind
//! exposes. Writes go back through the store as a commit or a resize;
//! position is never written here.

use serde::{Deserialize, Serialize};

use crate::command::Outcome;
use crate::error::{SceneError, SceneResult};
use crate::geometry::Size;
use crate::node::{Node, NodeData, NodeId, NodeKind, Palette, Preset};
use crate::patch::{Field, NodePatch};
use crate::scene::Scene;
use crate::store::SceneStore;

/// Fields the property editor offers for a kind.
#[must_use]
pub const fn fields_for(kind: NodeKind) -> &'static [Field] {
    use Field::{
        Color, Country, CustomColor, FirstName, FontSize, Height, Label, LastName, Number,
        Preset, Sublabel, Subtitle, Text, Title, Value, Width,
    };
    match kind {
        NodeKind::Circle => &[Value, Label, Color, CustomColor, Preset],
        NodeKind::Box => &[Value, Label, CustomColor],
        NodeKind::MiniStat => &[Value, Label, Sublabel, CustomColor],
        NodeKind::ProgressBar => &[Value, Label, Color, CustomColor, Width, Height],
        NodeKind::Divider => &[Color, CustomColor],
        NodeKind::IconBadge => &[Color, Preset, CustomColor],
        NodeKind::TextLabel => &[Text, FontSize, Color, CustomColor],
        NodeKind::RatingBadge => &[Value, Label],
        NodeKind::Header => &[Title, Subtitle],
        NodeKind::PlayerName => &[FirstName, LastName, Number, Country],
        NodeKind::PerformanceChart => &[Title],
        NodeKind::PlayerImage => &[Width, Height],
    }
}

/// A value shown in, or written from, the property editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum PropertyValue {
    /// Free text.
    Text(String),
    /// A number (sizes, font size, progress percentage).
    Number(f32),
    /// A palette entry.
    Palette(Palette),
    /// A size preset.
    Preset(Preset),
}

/// One row of the property sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyEntry {
    /// Field name.
    pub field: Field,
    /// Current committed value.
    pub value: PropertyValue,
}

/// The editable view of one node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertySheet {
    /// Projected node.
    pub id: NodeId,
    /// Its kind.
    pub kind: NodeKind,
    /// Rows in display order.
    pub entries: Vec<PropertyEntry>,
}

impl PropertySheet {
    /// Value of one field, if the kind exposes it.
    #[must_use]
    pub fn get(&self, field: Field) -> Option<&PropertyValue> {
        self.entries
            .iter()
            .find(|e| e.field == field)
            .map(|e| &e.value)
    }
}

/// Project the selected node, if any.
#[must_use]
pub fn project(scene: &Scene, selection: Option<&NodeId>) -> Option<PropertySheet> {
    let node = scene.get(selection?)?;
    let entries = fields_for(node.kind())
        .iter()
        .map(|&field| PropertyEntry {
            field,
            value: read(node, field),
        })
        .collect();
    Some(PropertySheet {
        id: node.id.clone(),
        kind: node.kind(),
        entries,
    })
}

fn read(node: &Node, field: Field) -> PropertyValue {
    let size = node.size();
    let text = |s: &str| PropertyValue::Text(s.to_string());
    match (&node.data, field) {
        (_, Field::Width) => PropertyValue::Number(size.width),
        (_, Field::Height) => PropertyValue::Number(size.height),
        (_, Field::CustomColor) => text(node.custom_color.as_ref().map_or("", |c| c.as_str())),
        (NodeData::ProgressBar { value, .. }, Field::Value) => {
            PropertyValue::Number(f32::from(*value))
        }
        (
            NodeData::Circle { value, .. }
            | NodeData::Box { value, .. }
            | NodeData::MiniStat { value, .. }
            | NodeData::RatingBadge { value, .. },
            Field::Value,
        ) => text(value),
        (
            NodeData::Circle { label, .. }
            | NodeData::Box { label, .. }
            | NodeData::MiniStat { label, .. }
            | NodeData::ProgressBar { label, .. }
            | NodeData::RatingBadge { label, .. },
            Field::Label,
        ) => text(label),
        (NodeData::MiniStat { sublabel, .. }, Field::Sublabel) => {
            text(sublabel.as_deref().unwrap_or_default())
        }
        (
            NodeData::Circle { color, .. }
            | NodeData::ProgressBar { color, .. }
            | NodeData::Divider { color, .. }
            | NodeData::IconBadge { color, .. }
            | NodeData::TextLabel { color, .. },
            Field::Color,
        ) => PropertyValue::Palette(*color),
        (
            NodeData::Circle { preset, .. } | NodeData::IconBadge { preset, .. },
            Field::Preset,
        ) => PropertyValue::Preset(*preset),
        (NodeData::TextLabel { text: t, .. }, Field::Text) => text(t),
        (NodeData::TextLabel { font_size, .. }, Field::FontSize) => {
            PropertyValue::Number(*font_size)
        }
        (
            NodeData::Header { title, .. } | NodeData::PerformanceChart { title, .. },
            Field::Title,
        ) => text(title),
        (NodeData::Header { subtitle, .. }, Field::Subtitle) => text(subtitle),
        (NodeData::PlayerName { first_name, .. }, Field::FirstName) => text(first_name),
        (NodeData::PlayerName { last_name, .. }, Field::LastName) => text(last_name),
        (NodeData::PlayerName { number, .. }, Field::Number) => text(number),
        (NodeData::PlayerName { country, .. }, Field::Country) => text(country),
        // fields_for never pairs a kind with a field it lacks.
        _ => text(""),
    }
}

/// Translate one editor write into a patch.
fn to_patch(kind: NodeKind, field: Field, value: PropertyValue) -> SceneResult<NodePatch> {
    let invalid = || SceneError::InvalidPayloadField { kind, field };
    let mut patch = NodePatch::default();
    match (field, value) {
        (Field::Value, PropertyValue::Text(v)) => patch.value = Some(v),
        (Field::Value, PropertyValue::Number(n)) if n.is_finite() => {
            patch.value = Some(format!("{}", n.round()));
        }
        (Field::Label, PropertyValue::Text(v)) => patch.label = Some(v),
        (Field::Sublabel, PropertyValue::Text(v)) => patch.sublabel = Some(v),
        (Field::Color, PropertyValue::Palette(p)) => patch.color = Some(p),
        (Field::CustomColor, PropertyValue::Text(v)) => patch.custom_color = Some(v),
        (Field::Preset, PropertyValue::Preset(p)) => patch.preset = Some(p),
        (Field::Text, PropertyValue::Text(v)) => patch.text = Some(v),
        (Field::FontSize, PropertyValue::Number(n)) => patch.font_size = Some(n),
        (Field::Title, PropertyValue::Text(v)) => patch.title = Some(v),
        (Field::Subtitle, PropertyValue::Text(v)) => patch.subtitle = Some(v),
        (Field::FirstName, PropertyValue::Text(v)) => patch.first_name = Some(v),
        (Field::LastName, PropertyValue::Text(v)) => patch.last_name = Some(v),
        (Field::Number, PropertyValue::Text(v)) => patch.number = Some(v),
        (Field::Country, PropertyValue::Text(v)) => patch.country = Some(v),
        _ => return Err(invalid()),
    }
    Ok(patch)
}

impl SceneStore {
    /// Property sheet for the current selection.
    #[must_use]
    pub fn properties(&self) -> Option<PropertySheet> {
        project(self.scene(), self.selection())
    }

    /// Write one field of the selected node.
    ///
    /// Size fields and circle presets become resizes; everything else is
    /// committed as a single-field patch. Without a selection nothing
    /// happens.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::InvalidPayloadField`] if the selected kind does
    /// not expose `field` or the value has the wrong type, and propagates
    /// store errors otherwise.
    pub fn write_property(&mut self, field: Field, value: PropertyValue) -> SceneResult<Outcome> {
        let Some(node) = self.selection().and_then(|id| self.scene().get(id)) else {
            return Ok(Outcome::Ignored);
        };
        let id = node.id.clone();
        let kind = node.kind();
        let current = node.size();

        if !fields_for(kind).contains(&field) {
            return Err(SceneError::InvalidPayloadField { kind, field });
        }

        let resize = match (field, &value) {
            (Field::Width, PropertyValue::Number(w)) => Some(Size::new(*w, current.height)),
            (Field::Height, PropertyValue::Number(h)) => Some(Size::new(current.width, *h)),
            (Field::Preset, PropertyValue::Preset(p)) if kind == NodeKind::Circle => {
                Some(Size::square(p.circle_diameter()))
            }
            (Field::Width | Field::Height, _) => {
                return Err(SceneError::InvalidPayloadField { kind, field })
            }
            _ => None,
        };
        if let Some(size) = resize {
            self.resize_node(&id, size)?;
            return Ok(Outcome::Changed);
        }

        let patch = to_patch(kind, field, value)?;
        self.commit_edit(&id, patch).map(Outcome::Committed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toolbar::ToolbarItem;

    #[test]
    fn test_every_kind_has_fields() {
        for kind in NodeKind::ALL {
            assert!(!fields_for(kind).is_empty(), "{kind} exposes nothing");
        }
    }

    #[test]
    fn test_only_resizable_kinds_expose_size() {
        for kind in NodeKind::ALL {
            let fields = fields_for(kind);
            if fields.contains(&Field::Width) || fields.contains(&Field::Height) {
                assert!(kind.is_resizable(), "{kind} exposes size");
            }
        }
    }

    #[test]
    fn test_divider_projection() {
        let mut store = SceneStore::new();
        let id = store.create_node(ToolbarItem::DividerH);
        store.select(Some(id.clone()));
        let sheet = store.properties().expect("sheet");
        assert_eq!(sheet.id, id);
        let fields: Vec<_> = sheet.entries.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec![Field::Color, Field::CustomColor]);
        assert_eq!(
            sheet.get(Field::Color),
            Some(&PropertyValue::Palette(Palette::Gold))
        );
    }

    #[test]
    fn test_no_selection_projects_nothing() {
        let mut store = SceneStore::new();
        assert!(store.properties().is_none());
        let outcome = store
            .write_property(Field::Value, PropertyValue::Text("1".to_string()))
            .expect("write");
        assert_eq!(outcome, Outcome::Ignored);
    }

    #[test]
    fn test_write_text_field_commits() {
        let mut store = SceneStore::new();
        store.select(Some(NodeId::new("header")));
        store
            .write_property(Field::Title, PropertyValue::Text("TOP 5".to_string()))
            .expect("write");
        let sheet = store.properties().expect("sheet");
        assert_eq!(
            sheet.get(Field::Title),
            Some(&PropertyValue::Text("TOP 5".to_string()))
        );
    }

    #[test]
    fn test_write_unoffered_field_is_rejected() {
        let mut store = SceneStore::new();
        store.select(Some(NodeId::new("header")));
        let before = store.scene().clone();
        let result = store.write_property(Field::Value, PropertyValue::Text("9".to_string()));
        assert!(matches!(
            result,
            Err(SceneError::InvalidPayloadField {
                kind: NodeKind::Header,
                field: Field::Value
            })
        ));
        assert_eq!(store.scene(), &before);
    }

    #[test]
    fn test_write_wrong_value_type_is_rejected() {
        let mut store = SceneStore::new();
        store.select(Some(NodeId::new("circle1")));
        let result = store.write_property(Field::Color, PropertyValue::Number(3.0));
        assert!(matches!(result, Err(SceneError::InvalidPayloadField { .. })));
    }

    #[test]
    fn test_circle_preset_routes_to_resize() {
        let mut store = SceneStore::new();
        store.select(Some(NodeId::new("circle3")));
        store
            .write_property(Field::Preset, PropertyValue::Preset(Preset::Lg))
            .expect("write");
        let sheet = store.properties().expect("sheet");
        assert_eq!(sheet.get(Field::Preset), Some(&PropertyValue::Preset(Preset::Lg)));
    }

    #[test]
    fn test_player_image_width_routes_to_resize() {
        let mut store = SceneStore::new();
        store.select(Some(NodeId::new("playerImage")));
        store
            .write_property(Field::Width, PropertyValue::Number(20.0))
            .expect("write");
        let sheet = store.properties().expect("sheet");
        assert_eq!(sheet.get(Field::Width), Some(&PropertyValue::Number(100.0)));
        assert_eq!(sheet.get(Field::Height), Some(&PropertyValue::Number(450.0)));
    }

    #[test]
    fn test_progress_value_as_number() {
        let mut store = SceneStore::new();
        let id = store.create_node(ToolbarItem::ProgressBar);
        store.select(Some(id));
        assert_eq!(
            store.properties().and_then(|s| s.get(Field::Value).cloned()),
            Some(PropertyValue::Number(75.0))
        );
        store
            .write_property(Field::Value, PropertyValue::Number(42.4))
            .expect("write");
        assert_eq!(
            store.properties().and_then(|s| s.get(Field::Value).cloned()),
            Some(PropertyValue::Number(42.0))
        );
    }
}
