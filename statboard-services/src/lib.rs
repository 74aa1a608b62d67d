//! # Statboard Services
//!
//! Async collaborators that feed results into a [`statboard_core::SceneStore`]:
//!
//! - [`lookup`]: player lookup over HTTP, applied as one batch
//! - [`pipeline`]: background removal with upload supersession

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod lookup;
pub mod pipeline;

pub use lookup::{
    search_and_apply, HttpPlayerLookup, LookupConfig, LookupError, PlayerLookup, RetryConfig,
};
pub use pipeline::{BackgroundRemover, ImagePipeline, PassthroughRemover, PipelineError};
