//! Collaborator contracts for rendering and export.

use serde::{Deserialize, Serialize};

use crate::document::SceneDocument;

/// Stable reference to the rendered surface of one store.
///
/// An export collaborator holds this to capture the canvas as an image or
/// document; the handle does not change for the lifetime of the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SurfaceHandle(uuid::Uuid);

impl SurfaceHandle {
    /// A fresh handle.
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// The underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> uuid::Uuid {
        self.0
    }
}

impl Default for SurfaceHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SurfaceHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "surface:{}", self.0)
    }
}

/// Something that paints a scene snapshot.
///
/// Implementors receive read-only documents and report user interaction
/// back as [`crate::CanvasEvent`]s through the store.
pub trait SceneRenderer {
    /// Output produced for one frame.
    type Output;
    /// Error type for rendering failures.
    type Error;

    /// Render one snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be painted.
    fn render(&mut self, document: &SceneDocument) -> Result<Self::Output, Self::Error>;
}
