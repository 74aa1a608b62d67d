//! Upload supersession for the background-removal pipeline.
//!
//! Each upload takes a ticket. Starting a new upload invalidates every
//! earlier ticket, so progress and results from a stale upload are ignored
//! instead of racing the newer one.

use crate::node::ImageHandle;

/// Proof of which upload a progress report or result belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UploadTicket {
    generation: u64,
}

impl UploadTicket {
    /// Generation number of this ticket.
    #[must_use]
    pub const fn generation(self) -> u64 {
        self.generation
    }
}

/// What to show once an upload resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadResolution {
    /// Background removal succeeded.
    Processed(ImageHandle),
    /// Background removal failed; the unprocessed image is used instead.
    Fallback(ImageHandle),
}

impl UploadResolution {
    /// The image to import.
    #[must_use]
    pub fn image(&self) -> &ImageHandle {
        match self {
            Self::Processed(image) | Self::Fallback(image) => image,
        }
    }

    /// Consume into the image to import.
    #[must_use]
    pub fn into_image(self) -> ImageHandle {
        match self {
            Self::Processed(image) | Self::Fallback(image) => image,
        }
    }
}

/// Tracks the one upload that is allowed to finish.
#[derive(Debug, Clone, Default)]
pub struct UploadTracker {
    generation: u64,
    active: Option<u64>,
    progress: u8,
}

impl UploadTracker {
    /// Create an idle tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start an upload, superseding any in flight.
    pub fn begin(&mut self) -> UploadTicket {
        if let Some(previous) = self.active {
            tracing::debug!("Upload {previous} superseded");
        }
        self.generation += 1;
        self.active = Some(self.generation);
        self.progress = 0;
        UploadTicket {
            generation: self.generation,
        }
    }

    /// Check whether a ticket still belongs to the live upload.
    #[must_use]
    pub fn is_current(&self, ticket: UploadTicket) -> bool {
        self.active == Some(ticket.generation)
    }

    /// Record progress (0 to 100). Returns `false` for stale tickets.
    pub fn report_progress(&mut self, ticket: UploadTicket, percent: u8) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.progress = percent.min(100).max(self.progress);
        true
    }

    /// Progress of the live upload, if one is running.
    #[must_use]
    pub fn progress(&self) -> Option<u8> {
        self.active.map(|_| self.progress)
    }

    /// Resolve an upload.
    ///
    /// Returns `None` if the ticket was superseded; otherwise the processed
    /// image, or the original when processing failed.
    pub fn finish<E: std::fmt::Display>(
        &mut self,
        ticket: UploadTicket,
        result: Result<ImageHandle, E>,
        original: ImageHandle,
    ) -> Option<UploadResolution> {
        if !self.is_current(ticket) {
            tracing::debug!("Discarding result of stale upload {}", ticket.generation);
            return None;
        }
        self.active = None;
        self.progress = 100;
        Some(match result {
            Ok(image) => UploadResolution::Processed(image),
            Err(e) => {
                tracing::warn!("Background removal failed, using original image: {e}");
                UploadResolution::Fallback(original)
            }
        })
    }
}
