//! Toolbar items and the default payloads they create.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SceneError;
use crate::geometry::{Point, Size};
use crate::node::{
    FontWeight, IconType, Node, NodeData, NodeId, NodeKind, Orientation, Palette, Preset,
    StatRole,
};

/// Where new nodes land before the user drags them.
pub const DEFAULT_CREATION_POINT: Point = Point::new(350.0, 400.0);

/// An entry in the widget toolbar.
///
/// Serialized as its toolbar identifier, e.g. `"circle-lg"` or `"icon-flame"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ToolbarItem {
    /// Large gold circle.
    CircleLg,
    /// Medium emerald circle.
    CircleMd,
    /// Small gold circle.
    CircleSm,
    /// Stat box.
    StatBox,
    /// Mini stat tile.
    MiniStat,
    /// Progress bar.
    ProgressBar,
    /// Horizontal divider.
    DividerH,
    /// Vertical divider.
    DividerV,
    /// Icon badge with the given glyph.
    Icon(IconType),
    /// Text label.
    TextLabel,
}

impl ToolbarItem {
    /// The kind of node this item creates.
    #[must_use]
    pub const fn kind(self) -> NodeKind {
        match self {
            Self::CircleLg | Self::CircleMd | Self::CircleSm => NodeKind::Circle,
            Self::StatBox => NodeKind::Box,
            Self::MiniStat => NodeKind::MiniStat,
            Self::ProgressBar => NodeKind::ProgressBar,
            Self::DividerH | Self::DividerV => NodeKind::Divider,
            Self::Icon(_) => NodeKind::IconBadge,
            Self::TextLabel => NodeKind::TextLabel,
        }
    }

    /// Default payload for a fresh instance.
    #[must_use]
    pub fn default_data(self) -> NodeData {
        let circle = |color, preset| NodeData::Circle {
            value: "0%".to_string(),
            label: "New Stat".to_string(),
            color,
            preset,
        };
        match self {
            Self::CircleLg => circle(Palette::Gold, Preset::Lg),
            Self::CircleMd => circle(Palette::Emerald, Preset::Md),
            Self::CircleSm => circle(Palette::Gold, Preset::Sm),
            Self::StatBox => NodeData::Box {
                value: "0".to_string(),
                label: "NEW".to_string(),
                sub_stats: Vec::new(),
            },
            Self::MiniStat => NodeData::MiniStat {
                value: "0".to_string(),
                label: "STAT".to_string(),
                sublabel: Some("label".to_string()),
            },
            Self::ProgressBar => NodeData::ProgressBar {
                value: 75,
                label: "Progress".to_string(),
                color: Palette::Gold,
                size: Size::new(200.0, 40.0),
            },
            Self::DividerH => NodeData::Divider {
                orientation: Orientation::Horizontal,
                color: Palette::Gold,
                size: Size::new(150.0, 4.0),
            },
            Self::DividerV => NodeData::Divider {
                orientation: Orientation::Vertical,
                color: Palette::Gold,
                size: Size::new(4.0, 100.0),
            },
            Self::Icon(icon) => NodeData::IconBadge {
                icon,
                color: Palette::Gold,
                preset: Preset::Md,
            },
            Self::TextLabel => NodeData::TextLabel {
                text: "Label".to_string(),
                font_size: 24.0,
                font_weight: FontWeight::Bold,
                color: Palette::Gold,
            },
        }
    }

    /// Build the node this item creates, at the default creation point.
    #[must_use]
    pub fn build(self, id: NodeId) -> Node {
        let node = Node::new(id, DEFAULT_CREATION_POINT, self.default_data());
        // A stat box always shows a goal tally in this template family.
        match self {
            Self::StatBox => node.with_role(StatRole::Goals),
            _ => node,
        }
    }
}

impl std::fmt::Display for ToolbarItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CircleLg => f.write_str("circle-lg"),
            Self::CircleMd => f.write_str("circle-md"),
            Self::CircleSm => f.write_str("circle-sm"),
            Self::StatBox => f.write_str("stat-box"),
            Self::MiniStat => f.write_str("mini-stat"),
            Self::ProgressBar => f.write_str("progress-bar"),
            Self::DividerH => f.write_str("divider-h"),
            Self::DividerV => f.write_str("divider-v"),
            Self::Icon(icon) => write!(f, "icon-{}", icon.as_str()),
            Self::TextLabel => f.write_str("text-label"),
        }
    }
}

impl FromStr for ToolbarItem {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let item = match s {
            "circle-lg" => Self::CircleLg,
            "circle-md" => Self::CircleMd,
            "circle-sm" => Self::CircleSm,
            "stat-box" => Self::StatBox,
            "mini-stat" => Self::MiniStat,
            "progress-bar" => Self::ProgressBar,
            "divider-h" => Self::DividerH,
            "divider-v" => Self::DividerV,
            "text-label" => Self::TextLabel,
            other => other
                .strip_prefix("icon-")
                .and_then(IconType::from_name)
                .map(Self::Icon)
                .ok_or_else(|| SceneError::UnknownToolbarItem(other.to_string()))?,
        };
        Ok(item)
    }
}

impl TryFrom<String> for ToolbarItem {
    type Error = SceneError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ToolbarItem> for String {
    fn from(item: ToolbarItem) -> Self {
        item.to_string()
    }
}
