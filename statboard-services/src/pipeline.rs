//! Background-removal pipeline driver.
//!
//! Wraps a [`BackgroundRemover`] with upload supersession: starting a new
//! upload invalidates the one in flight, and a failed removal falls back to
//! the original image.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use statboard_core::{ImageHandle, SceneResult, SceneStore, UploadResolution, UploadTracker};
use thiserror::Error;

/// Errors from a background-removal collaborator.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The model or service could not be reached.
    #[error("background removal unavailable: {0}")]
    Unavailable(String),
    /// Processing ran but failed.
    #[error("background removal failed: {0}")]
    Failed(String),
}

/// Something that isolates the subject of an image.
#[async_trait]
pub trait BackgroundRemover: Send + Sync {
    /// Process `source`, reporting progress (0 to 100) as it goes.
    async fn remove_background(
        &self,
        source: &ImageHandle,
        progress: &(dyn Fn(u8) + Send + Sync),
    ) -> Result<ImageHandle, PipelineError>;
}

/// Remover that returns the source untouched. Used when no model is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughRemover;

#[async_trait]
impl BackgroundRemover for PassthroughRemover {
    async fn remove_background(
        &self,
        source: &ImageHandle,
        progress: &(dyn Fn(u8) + Send + Sync),
    ) -> Result<ImageHandle, PipelineError> {
        progress(100);
        Ok(source.clone())
    }
}

/// Drives uploads through a remover, one live upload at a time.
pub struct ImagePipeline<R> {
    remover: R,
    tracker: Mutex<UploadTracker>,
}

impl<R: BackgroundRemover> ImagePipeline<R> {
    /// Create a pipeline around a remover.
    #[must_use]
    pub fn new(remover: R) -> Self {
        Self {
            remover,
            tracker: Mutex::new(UploadTracker::new()),
        }
    }

    /// Progress of the live upload, if one is running.
    #[must_use]
    pub fn progress(&self) -> Option<u8> {
        self.tracker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .progress()
    }

    /// Process an upload.
    ///
    /// Returns `None` if a newer upload started before this one finished.
    pub async fn process(&self, source: ImageHandle) -> Option<UploadResolution> {
        let ticket = self
            .tracker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .begin();
        tracing::debug!("Upload {} started for {source}", ticket.generation());

        let report = |percent: u8| {
            self.tracker
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .report_progress(ticket, percent);
        };
        let result = self.remover.remove_background(&source, &report).await;

        self.tracker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .finish(ticket, result, source)
    }

    /// Process an upload and import the result into the player image.
    ///
    /// Superseded uploads import nothing.
    ///
    /// # Errors
    ///
    /// Propagates the import batch error.
    pub async fn process_and_import(
        &self,
        store: &mut SceneStore,
        source: ImageHandle,
    ) -> SceneResult<Option<UploadResolution>> {
        let Some(resolution) = self.process(source).await else {
            return Ok(None);
        };
        store.import_image(resolution.image().clone())?;
        Ok(Some(resolution))
    }
}
