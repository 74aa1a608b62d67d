//! Structurally-typed partial updates to node payloads.
//!
//! A [`NodePatch`] names the fields to overwrite. Fields that do not belong
//! to the target node's kind are skipped and reported in the
//! [`PatchOutcome`], never applied.

use serde::{Deserialize, Serialize};

use crate::node::{
    ChartPoint, FontWeight, HexColor, ImageHandle, Node, NodeData, NodeKind, Palette, Preset,
    StatRole, SubStat, FONT_SIZE_MAX, FONT_SIZE_MIN,
};

/// Every editable field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub enum Field {
    Value,
    Label,
    Sublabel,
    Color,
    CustomColor,
    Preset,
    Text,
    FontSize,
    FontWeight,
    Title,
    Subtitle,
    FirstName,
    LastName,
    Number,
    Country,
    SubStats,
    ChartData,
    Image,
    StatRole,
    Width,
    Height,
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Value => "value",
            Self::Label => "label",
            Self::Sublabel => "sublabel",
            Self::Color => "color",
            Self::CustomColor => "customColor",
            Self::Preset => "preset",
            Self::Text => "text",
            Self::FontSize => "fontSize",
            Self::FontWeight => "fontWeight",
            Self::Title => "title",
            Self::Subtitle => "subtitle",
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Number => "number",
            Self::Country => "country",
            Self::SubStats => "subStats",
            Self::ChartData => "chartData",
            Self::Image => "image",
            Self::StatRole => "statRole",
            Self::Width => "width",
            Self::Height => "height",
        };
        f.write_str(name)
    }
}

/// A partial update. `None` leaves a field untouched.
///
/// An empty `custom_color` string clears the override color.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct NodePatch {
    pub value: Option<String>,
    pub label: Option<String>,
    pub sublabel: Option<String>,
    pub color: Option<Palette>,
    pub custom_color: Option<String>,
    pub preset: Option<Preset>,
    pub text: Option<String>,
    pub font_size: Option<f32>,
    pub font_weight: Option<FontWeight>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub number: Option<String>,
    pub country: Option<String>,
    pub sub_stats: Option<Vec<SubStat>>,
    pub chart_data: Option<Vec<ChartPoint>>,
    pub image: Option<ImageHandle>,
    pub stat_role: Option<StatRole>,
}

/// What happened when a patch met a node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchOutcome {
    /// Fields written.
    pub applied: Vec<Field>,
    /// Fields skipped because the kind has no such field or the value was malformed.
    pub dropped: Vec<Field>,
}

impl PatchOutcome {
    fn record(&mut self, field: Field, applied: bool) {
        if applied {
            self.applied.push(field);
        } else {
            self.dropped.push(field);
        }
    }
}

impl NodePatch {
    /// Check whether the patch sets nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Capture the editable fields of a node as a patch.
    ///
    /// Applying the result to the same node leaves it unchanged.
    #[must_use]
    pub fn from_node(node: &Node) -> Self {
        let mut patch = Self {
            stat_role: node.stat_role,
            ..Self::default()
        };
        if node.kind().supports_custom_color() {
            patch.custom_color = Some(
                node.custom_color
                    .as_ref()
                    .map(|c| c.as_str().to_string())
                    .unwrap_or_default(),
            );
        }
        match &node.data {
            NodeData::Circle {
                value,
                label,
                color,
                preset,
            } => {
                patch.value = Some(value.clone());
                patch.label = Some(label.clone());
                patch.color = Some(*color);
                patch.preset = Some(*preset);
            }
            NodeData::Box {
                value,
                label,
                sub_stats,
            } => {
                patch.value = Some(value.clone());
                patch.label = Some(label.clone());
                patch.sub_stats = Some(sub_stats.clone());
            }
            NodeData::MiniStat {
                value,
                label,
                sublabel,
            } => {
                patch.value = Some(value.clone());
                patch.label = Some(label.clone());
                patch.sublabel = Some(sublabel.clone().unwrap_or_default());
            }
            NodeData::ProgressBar {
                value,
                label,
                color,
                ..
            } => {
                patch.value = Some(value.to_string());
                patch.label = Some(label.clone());
                patch.color = Some(*color);
            }
            NodeData::Divider { color, .. } => patch.color = Some(*color),
            NodeData::IconBadge { color, preset, .. } => {
                patch.color = Some(*color);
                patch.preset = Some(*preset);
            }
            NodeData::TextLabel {
                text,
                font_size,
                font_weight,
                color,
            } => {
                patch.text = Some(text.clone());
                patch.font_size = Some(*font_size);
                patch.font_weight = Some(*font_weight);
                patch.color = Some(*color);
            }
            NodeData::Header { title, subtitle } => {
                patch.title = Some(title.clone());
                patch.subtitle = Some(subtitle.clone());
            }
            NodeData::PlayerName {
                first_name,
                last_name,
                number,
                country,
            } => {
                patch.first_name = Some(first_name.clone());
                patch.last_name = Some(last_name.clone());
                patch.number = Some(number.clone());
                patch.country = Some(country.clone());
            }
            NodeData::PerformanceChart { title, data } => {
                patch.title = Some(title.clone());
                patch.chart_data = Some(data.clone());
            }
            NodeData::PlayerImage { image, .. } => patch.image = image.clone(),
            NodeData::RatingBadge { value, label } => {
                patch.value = Some(value.clone());
                patch.label = Some(label.clone());
            }
        }
        patch
    }

    /// Overlay the fields set in `other` onto this patch.
    pub fn merge(&mut self, other: &Self) {
        fn take<T: Clone>(slot: &mut Option<T>, incoming: &Option<T>) {
            if let Some(v) = incoming {
                *slot = Some(v.clone());
            }
        }
        take(&mut self.value, &other.value);
        take(&mut self.label, &other.label);
        take(&mut self.sublabel, &other.sublabel);
        take(&mut self.color, &other.color);
        take(&mut self.custom_color, &other.custom_color);
        take(&mut self.preset, &other.preset);
        take(&mut self.text, &other.text);
        take(&mut self.font_size, &other.font_size);
        take(&mut self.font_weight, &other.font_weight);
        take(&mut self.title, &other.title);
        take(&mut self.subtitle, &other.subtitle);
        take(&mut self.first_name, &other.first_name);
        take(&mut self.last_name, &other.last_name);
        take(&mut self.number, &other.number);
        take(&mut self.country, &other.country);
        take(&mut self.sub_stats, &other.sub_stats);
        take(&mut self.chart_data, &other.chart_data);
        take(&mut self.image, &other.image);
        take(&mut self.stat_role, &other.stat_role);
    }

    /// Write the applicable fields into `node`.
    pub fn apply(&self, node: &mut Node) -> PatchOutcome {
        let mut outcome = PatchOutcome::default();
        if let Some(v) = &self.value {
            outcome.record(Field::Value, set_value(&mut node.data, v));
        }
        if let Some(v) = &self.label {
            outcome.record(Field::Label, set_label(&mut node.data, v));
        }
        if let Some(v) = &self.sublabel {
            let applied = match &mut node.data {
                NodeData::MiniStat { sublabel, .. } => {
                    *sublabel = (!v.is_empty()).then(|| v.clone());
                    true
                }
                _ => false,
            };
            outcome.record(Field::Sublabel, applied);
        }
        if let Some(v) = self.color {
            outcome.record(Field::Color, set_color(&mut node.data, v));
        }
        if let Some(v) = &self.custom_color {
            outcome.record(Field::CustomColor, set_custom_color(node, v));
        }
        if let Some(v) = self.preset {
            let applied = match &mut node.data {
                NodeData::Circle { preset, .. } | NodeData::IconBadge { preset, .. } => {
                    *preset = v;
                    true
                }
                _ => false,
            };
            outcome.record(Field::Preset, applied);
        }
        if let Some(v) = &self.text {
            let applied = match &mut node.data {
                NodeData::TextLabel { text, .. } => {
                    text.clone_from(v);
                    true
                }
                _ => false,
            };
            outcome.record(Field::Text, applied);
        }
        if let Some(v) = self.font_size {
            let applied = match &mut node.data {
                NodeData::TextLabel { font_size, .. } if v.is_finite() => {
                    *font_size = v.clamp(FONT_SIZE_MIN, FONT_SIZE_MAX);
                    true
                }
                _ => false,
            };
            outcome.record(Field::FontSize, applied);
        }
        if let Some(v) = self.font_weight {
            let applied = match &mut node.data {
                NodeData::TextLabel { font_weight, .. } => {
                    *font_weight = v;
                    true
                }
                _ => false,
            };
            outcome.record(Field::FontWeight, applied);
        }
        if let Some(v) = &self.title {
            let applied = match &mut node.data {
                NodeData::Header { title, .. } | NodeData::PerformanceChart { title, .. } => {
                    title.clone_from(v);
                    true
                }
                _ => false,
            };
            outcome.record(Field::Title, applied);
        }
        if let Some(v) = &self.subtitle {
            let applied = match &mut node.data {
                NodeData::Header { subtitle, .. } => {
                    subtitle.clone_from(v);
                    true
                }
                _ => false,
            };
            outcome.record(Field::Subtitle, applied);
        }
        self.apply_player_name(node, &mut outcome);
        if let Some(v) = &self.sub_stats {
            let applied = match &mut node.data {
                NodeData::Box { sub_stats, .. } => {
                    sub_stats.clone_from(v);
                    true
                }
                _ => false,
            };
            outcome.record(Field::SubStats, applied);
        }
        if let Some(v) = &self.chart_data {
            let applied = match &mut node.data {
                NodeData::PerformanceChart { data, .. } => {
                    data.clone_from(v);
                    true
                }
                _ => false,
            };
            outcome.record(Field::ChartData, applied);
        }
        if let Some(v) = &self.image {
            let applied = match &mut node.data {
                NodeData::PlayerImage { image, .. } => {
                    *image = Some(v.clone());
                    true
                }
                _ => false,
            };
            outcome.record(Field::Image, applied);
        }
        if let Some(v) = self.stat_role {
            let applied = carries_role(node.kind());
            if applied {
                node.stat_role = Some(v);
            }
            outcome.record(Field::StatRole, applied);
        }
        outcome
    }

    fn apply_player_name(&self, node: &mut Node, outcome: &mut PatchOutcome) {
        let fields = [
            (Field::FirstName, &self.first_name),
            (Field::LastName, &self.last_name),
            (Field::Number, &self.number),
            (Field::Country, &self.country),
        ];
        for (field, incoming) in fields {
            let Some(v) = incoming else { continue };
            let applied = match &mut node.data {
                NodeData::PlayerName {
                    first_name,
                    last_name,
                    number,
                    country,
                } => {
                    let slot = match field {
                        Field::FirstName => first_name,
                        Field::LastName => last_name,
                        Field::Number => number,
                        _ => country,
                    };
                    slot.clone_from(v);
                    true
                }
                _ => false,
            };
            outcome.record(field, applied);
        }
    }
}

/// Kinds whose displayed number can be tagged with a [`StatRole`].
#[must_use]
pub const fn carries_role(kind: NodeKind) -> bool {
    matches!(
        kind,
        NodeKind::Circle | NodeKind::Box | NodeKind::MiniStat | NodeKind::ProgressBar
    )
}

fn set_value(data: &mut NodeData, v: &str) -> bool {
    match data {
        NodeData::Circle { value, .. }
        | NodeData::Box { value, .. }
        | NodeData::MiniStat { value, .. }
        | NodeData::RatingBadge { value, .. } => {
            *value = v.to_string();
            true
        }
        NodeData::ProgressBar { value, .. } => {
            *value = parse_percent(v);
            true
        }
        _ => false,
    }
}

fn set_label(data: &mut NodeData, v: &str) -> bool {
    match data {
        NodeData::Circle { label, .. }
        | NodeData::Box { label, .. }
        | NodeData::MiniStat { label, .. }
        | NodeData::ProgressBar { label, .. }
        | NodeData::RatingBadge { label, .. } => {
            *label = v.to_string();
            true
        }
        _ => false,
    }
}

fn set_color(data: &mut NodeData, v: Palette) -> bool {
    match data {
        NodeData::Circle { color, .. }
        | NodeData::ProgressBar { color, .. }
        | NodeData::Divider { color, .. }
        | NodeData::IconBadge { color, .. }
        | NodeData::TextLabel { color, .. } => {
            *color = v;
            true
        }
        _ => false,
    }
}

fn set_custom_color(node: &mut Node, v: &str) -> bool {
    if !node.kind().supports_custom_color() {
        return false;
    }
    if v.trim().is_empty() {
        node.custom_color = None;
        return true;
    }
    match HexColor::parse(v) {
        Some(color) => {
            node.custom_color = Some(color);
            true
        }
        None => false,
    }
}

/// Parse a percentage draft; anything unparsable commits as 0.
fn parse_percent(raw: &str) -> u8 {
    let digits: String = raw
        .trim()
        .trim_end_matches('%')
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '-')
        .collect();
    digits
        .parse::<i64>()
        .map_or(0, |n| u8::try_from(n.clamp(0, 100)).unwrap_or(0))
}
