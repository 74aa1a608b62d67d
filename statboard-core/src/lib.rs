//! # Statboard Core
//!
//! Scene graph and property-editing engine for football statistics
//! infographics.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │                statboard-core                 │
//! ├───────────────────────────────────────────────┤
//! │  Node Model       │  Scene Store              │
//! │  - Kinds/payloads │  - Mutations & batches    │
//! │  - Patches        │  - Selection & z-order    │
//! │  - Geometry       │  - Edit buffers           │
//! ├───────────────────────────────────────────────┤
//! │  Projection       │  Adapters                 │
//! │  - Property sheet │  - Player data by role    │
//! │  - Field routing  │  - Image import/uploads   │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! All state changes are [`Mutation`]s applied by a [`SceneStore`]. The
//! scene never holds a node outside the canvas or two nodes with one id.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod adapter;
pub mod command;
pub mod document;
pub mod edit;
pub mod error;
pub mod event;
pub mod geometry;
pub mod node;
pub mod patch;
pub mod projection;
pub mod scene;
pub mod state;
pub mod store;
pub mod surface;
pub mod toolbar;
pub mod upload;

pub use adapter::{image_import, player_data, PlayerRecord, PlayerStats};
pub use command::{Mutation, Outcome};
pub use document::{NodeDocument, SceneDocument};
pub use edit::{EditSessions, EditState};
pub use error::{SceneError, SceneResult};
pub use event::CanvasEvent;
pub use geometry::{Canvas, Point, Rect, Size, CANVAS_HEIGHT, CANVAS_WIDTH};
pub use node::{
    FontWeight, HexColor, IconType, ImageHandle, Node, NodeData, NodeId, NodeKind, Orientation,
    Palette, Preset, StatRole, SubStat,
};
pub use patch::{Field, NodePatch, PatchOutcome};
pub use projection::{fields_for, project, PropertyEntry, PropertySheet, PropertyValue};
pub use scene::Scene;
pub use state::CanvasState;
pub use store::SceneStore;
pub use surface::{SceneRenderer, SurfaceHandle};
pub use toolbar::{ToolbarItem, DEFAULT_CREATION_POINT};
pub use upload::{UploadResolution, UploadTicket, UploadTracker};

/// Statboard core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
