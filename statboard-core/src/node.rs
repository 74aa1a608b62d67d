//! Nodes - the widgets placed on an infographic canvas.

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect, Size, CANVAS_WIDTH};

/// Footprint of a stat box.
pub const BOX_SIZE: Size = Size::new(140.0, 100.0);
/// Footprint of a mini stat.
pub const MINI_STAT_SIZE: Size = Size::new(100.0, 80.0);
/// Footprint of the rating badge.
pub const RATING_SIZE: Size = Size::new(120.0, 100.0);
/// Footprint of the header banner.
pub const HEADER_SIZE: Size = Size::new(280.0, 60.0);
/// Footprint of the player name block.
pub const PLAYER_NAME_SIZE: Size = Size::new(300.0, 180.0);
/// Footprint of the performance chart.
pub const CHART_SIZE: Size = Size::new(240.0, 140.0);

/// Smallest progress bar.
pub const PROGRESS_BAR_MIN: Size = Size::new(100.0, 40.0);
/// Smallest player image.
pub const PLAYER_IMAGE_MIN: Size = Size::new(100.0, 100.0);
/// Shortest a divider may be along its long axis.
pub const DIVIDER_MIN_LENGTH: f32 = 50.0;
/// Thinnest a divider may be along its short axis.
pub const DIVIDER_MIN_THICKNESS: f32 = 2.0;

/// Smallest text label font size.
pub const FONT_SIZE_MIN: f32 = 12.0;
/// Largest text label font size.
pub const FONT_SIZE_MAX: f32 = 120.0;

/// Unique identifier for a node.
///
/// Ids share one flat namespace across every kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Wrap an existing identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The closed set of widget kinds.
///
/// Variants are declared in render order, so `Ord` sorts by paint layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeKind {
    /// Title banner (singleton).
    Header,
    /// Cut-out player photo (singleton).
    PlayerImage,
    /// Percentage ring.
    Circle,
    /// Stat box with optional sub-stats.
    Box,
    /// Player name block (singleton).
    PlayerName,
    /// Match performance line chart (singleton).
    PerformanceChart,
    /// Small value/label tile.
    MiniStat,
    /// Overall rating badge (singleton).
    RatingBadge,
    /// Horizontal percentage bar.
    ProgressBar,
    /// Straight separator line.
    Divider,
    /// Icon in a rounded tile.
    IconBadge,
    /// Free text.
    TextLabel,
}

impl NodeKind {
    /// Every kind, in render order.
    pub const ALL: [Self; 12] = [
        Self::Header,
        Self::PlayerImage,
        Self::Circle,
        Self::Box,
        Self::PlayerName,
        Self::PerformanceChart,
        Self::MiniStat,
        Self::RatingBadge,
        Self::ProgressBar,
        Self::Divider,
        Self::IconBadge,
        Self::TextLabel,
    ];

    /// Kinds with exactly one always-present instance.
    #[must_use]
    pub const fn is_singleton(self) -> bool {
        matches!(
            self,
            Self::Header
                | Self::PlayerName
                | Self::PlayerImage
                | Self::PerformanceChart
                | Self::RatingBadge
        )
    }

    /// Kinds whose footprint may be changed by a resize.
    #[must_use]
    pub const fn is_resizable(self) -> bool {
        matches!(
            self,
            Self::Circle | Self::PlayerImage | Self::ProgressBar | Self::Divider
        )
    }

    /// Kinds that accept a literal override color.
    #[must_use]
    pub const fn supports_custom_color(self) -> bool {
        !self.is_singleton()
    }

    /// Prefix used when generating ids for new instances.
    #[must_use]
    pub const fn id_prefix(self) -> &'static str {
        match self {
            Self::Header => "header",
            Self::PlayerImage => "playerImage",
            Self::Circle => "circle",
            Self::Box => "box",
            Self::PlayerName => "playerName",
            Self::PerformanceChart => "chart",
            Self::MiniStat => "mini",
            Self::RatingBadge => "rating",
            Self::ProgressBar => "bar",
            Self::Divider => "divider",
            Self::IconBadge => "icon",
            Self::TextLabel => "text",
        }
    }

    /// Wire name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Header => "header",
            Self::PlayerImage => "playerImage",
            Self::Circle => "circle",
            Self::Box => "box",
            Self::PlayerName => "playerName",
            Self::PerformanceChart => "performanceChart",
            Self::MiniStat => "miniStat",
            Self::RatingBadge => "ratingBadge",
            Self::ProgressBar => "progressBar",
            Self::Divider => "divider",
            Self::IconBadge => "iconBadge",
            Self::TextLabel => "textLabel",
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Theme palette entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Palette {
    /// Primary accent.
    #[default]
    Gold,
    /// Secondary accent.
    Emerald,
}

/// Fixed size step for circles and icon badges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Small.
    Sm,
    /// Medium.
    #[default]
    Md,
    /// Large.
    Lg,
}

impl Preset {
    const ORDER: [Self; 3] = [Self::Sm, Self::Md, Self::Lg];

    /// Diameter of a stat circle at this preset.
    #[must_use]
    pub const fn circle_diameter(self) -> f32 {
        match self {
            Self::Sm => 96.0,
            Self::Md => 128.0,
            Self::Lg => 160.0,
        }
    }

    /// Edge length of an icon badge at this preset.
    #[must_use]
    pub const fn icon_extent(self) -> f32 {
        match self {
            Self::Sm => 40.0,
            Self::Md => 56.0,
            Self::Lg => 80.0,
        }
    }

    /// The circle preset whose diameter is closest to `extent`.
    #[must_use]
    pub fn nearest_circle(extent: f32) -> Self {
        if !extent.is_finite() {
            return Self::Sm;
        }
        Self::ORDER
            .into_iter()
            .min_by(|a, b| {
                let da = (a.circle_diameter() - extent).abs();
                let db = (b.circle_diameter() - extent).abs();
                da.total_cmp(&db)
            })
            .unwrap_or_default()
    }
}

/// Divider direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Long axis along x.
    Horizontal,
    /// Long axis along y.
    Vertical,
}

impl Orientation {
    /// Minimum divider footprint for this orientation.
    #[must_use]
    pub const fn min_size(self) -> Size {
        match self {
            Self::Horizontal => Size::new(DIVIDER_MIN_LENGTH, DIVIDER_MIN_THICKNESS),
            Self::Vertical => Size::new(DIVIDER_MIN_THICKNESS, DIVIDER_MIN_LENGTH),
        }
    }
}

/// Text weight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    /// Regular weight.
    Normal,
    /// Bold weight.
    #[default]
    Bold,
}

/// Glyph shown by an icon badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[allow(missing_docs)]
pub enum IconType {
    Trophy,
    Award,
    Target,
    Crown,
    Flame,
    Star,
    Shield,
    Heart,
    Zap,
    Flag,
    Medal,
    Sparkles,
}

impl IconType {
    /// Every icon.
    pub const ALL: [Self; 12] = [
        Self::Trophy,
        Self::Award,
        Self::Target,
        Self::Crown,
        Self::Flame,
        Self::Star,
        Self::Shield,
        Self::Heart,
        Self::Zap,
        Self::Flag,
        Self::Medal,
        Self::Sparkles,
    ];

    /// Icon identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trophy => "trophy",
            Self::Award => "award",
            Self::Target => "target",
            Self::Crown => "crown",
            Self::Flame => "flame",
            Self::Star => "star",
            Self::Shield => "shield",
            Self::Heart => "heart",
            Self::Zap => "zap",
            Self::Flag => "flag",
            Self::Medal => "medal",
            Self::Sparkles => "sparkles",
        }
    }

    /// Look up an icon by identifier.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|icon| icon.as_str() == name)
    }
}

/// Secondary (label, value) pair shown under a stat box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubStat {
    /// Competition or context label.
    pub label: String,
    /// Displayed value.
    pub value: String,
}

impl SubStat {
    /// Create a new sub-stat.
    #[must_use]
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// One sample of the performance chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    /// Sample value (may be negative).
    pub value: f32,
}

/// Semantic meaning of the number a node displays.
///
/// External adapters map incoming stats onto nodes by role rather than by
/// position in a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub enum StatRole {
    PassAccuracy,
    TacklesWon,
    Goals,
    Assists,
    Appearances,
    MinutesPlayed,
}

/// A literal `#rgb` / `#rrggbb` color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(String);

impl HexColor {
    /// Parse a hex literal, returning `None` when malformed.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let digits = raw.trim().strip_prefix('#')?;
        let valid = matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit());
        valid.then(|| Self(format!("#{}", digits.to_ascii_uppercase())))
    }

    /// The normalized literal, e.g. `#D4AF37`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for HexColor {
    type Error = String;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(&raw).ok_or_else(|| format!("invalid hex color: {raw}"))
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.0
    }
}

/// Opaque reference to an image produced outside the core.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageHandle(String);

impl ImageHandle {
    /// Wrap a collaborator-supplied reference (object URL, path, key).
    #[must_use]
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    /// A fresh, unique handle.
    #[must_use]
    pub fn generate() -> Self {
        Self(format!("image:{}", uuid::Uuid::new_v4()))
    }

    /// The underlying reference.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ImageHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Kind-specific payload of a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
#[allow(missing_docs)] // Variant fields are described on the variant.
pub enum NodeData {
    /// Percentage ring: value, caption, accent and preset diameter.
    Circle {
        value: String,
        label: String,
        color: Palette,
        preset: Preset,
    },
    /// Headline number with caption and optional breakdown rows.
    Box {
        value: String,
        label: String,
        sub_stats: Vec<SubStat>,
    },
    /// Small tile with value, label and optional sublabel.
    MiniStat {
        value: String,
        label: String,
        sublabel: Option<String>,
    },
    /// Percentage bar (0..=100) with caption and free size.
    ProgressBar {
        value: u8,
        label: String,
        color: Palette,
        size: Size,
    },
    /// Separator line with free size.
    Divider {
        orientation: Orientation,
        color: Palette,
        size: Size,
    },
    /// Icon tile at a preset size.
    IconBadge {
        icon: IconType,
        color: Palette,
        preset: Preset,
    },
    /// Free text whose footprint follows its content.
    TextLabel {
        text: String,
        font_size: f32,
        font_weight: FontWeight,
        color: Palette,
    },
    /// Title and subtitle banner.
    Header { title: String, subtitle: String },
    /// Player name, shirt number and country.
    PlayerName {
        first_name: String,
        last_name: String,
        number: String,
        country: String,
    },
    /// Titled line chart.
    PerformanceChart { title: String, data: Vec<ChartPoint> },
    /// Player photo; `None` until an image is imported.
    PlayerImage {
        image: Option<ImageHandle>,
        size: Size,
    },
    /// Rating value with caption.
    RatingBadge { value: String, label: String },
}

impl NodeData {
    /// The kind tag of this payload.
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::Circle { .. } => NodeKind::Circle,
            Self::Box { .. } => NodeKind::Box,
            Self::MiniStat { .. } => NodeKind::MiniStat,
            Self::ProgressBar { .. } => NodeKind::ProgressBar,
            Self::Divider { .. } => NodeKind::Divider,
            Self::IconBadge { .. } => NodeKind::IconBadge,
            Self::TextLabel { .. } => NodeKind::TextLabel,
            Self::Header { .. } => NodeKind::Header,
            Self::PlayerName { .. } => NodeKind::PlayerName,
            Self::PerformanceChart { .. } => NodeKind::PerformanceChart,
            Self::PlayerImage { .. } => NodeKind::PlayerImage,
            Self::RatingBadge { .. } => NodeKind::RatingBadge,
        }
    }

    /// The footprint implied by this payload.
    #[must_use]
    pub fn size(&self) -> Size {
        match self {
            Self::Circle { preset, .. } => Size::square(preset.circle_diameter()),
            Self::IconBadge { preset, .. } => Size::square(preset.icon_extent()),
            Self::ProgressBar { size, .. }
            | Self::Divider { size, .. }
            | Self::PlayerImage { size, .. } => *size,
            Self::TextLabel {
                text, font_size, ..
            } => text_footprint(text, *font_size),
            Self::Box { .. } => BOX_SIZE,
            Self::MiniStat { .. } => MINI_STAT_SIZE,
            Self::Header { .. } => HEADER_SIZE,
            Self::PlayerName { .. } => PLAYER_NAME_SIZE,
            Self::PerformanceChart { .. } => CHART_SIZE,
            Self::RatingBadge { .. } => RATING_SIZE,
        }
    }
}

/// Estimated box around a single line of text; long text wraps at the canvas width.
#[allow(clippy::cast_precision_loss)]
fn text_footprint(text: &str, font_size: f32) -> Size {
    let glyphs = text.chars().count() as f32;
    Size::new(
        (glyphs * font_size * 0.6).clamp(50.0, CANVAS_WIDTH),
        font_size * 1.2,
    )
}

/// A placed widget instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Unique identifier.
    pub id: NodeId,
    /// Top-left anchor in canvas coordinates.
    pub position: Point,
    /// Stacking order; higher paints later.
    pub z_index: i32,
    /// Literal color that overrides the palette when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_color: Option<HexColor>,
    /// Meaning of the displayed number, used by external adapters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stat_role: Option<StatRole>,
    /// Kind-specific payload.
    pub data: NodeData,
}

impl Node {
    /// Create a node at a position.
    #[must_use]
    pub fn new(id: impl Into<NodeId>, position: Point, data: NodeData) -> Self {
        Self {
            id: id.into(),
            position,
            z_index: 0,
            custom_color: None,
            stat_role: None,
            data,
        }
    }

    /// Tag the node with a stat role.
    #[must_use]
    pub fn with_role(mut self, role: StatRole) -> Self {
        self.stat_role = Some(role);
        self
    }

    /// Set the stacking order.
    #[must_use]
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// The node's kind.
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        self.data.kind()
    }

    /// Current footprint.
    #[must_use]
    pub fn size(&self) -> Size {
        self.data.size()
    }

    /// Bounding box in canvas coordinates.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::new(self.position, self.size())
    }
}
