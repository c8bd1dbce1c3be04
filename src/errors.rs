//! Error Types
//!
//! This module defines the error types used throughout the crate.
//!
//! # Overview
//!
//! The main error type [`WorldError`] covers the failure modes that are *not*
//! self-healing:
//! - Asset loading and decoding errors (textures, fonts, audio)
//! - Scene-build failures (empty world input)
//! - Lifecycle violations (illegal stage transitions)
//! - Configuration parsing errors
//!
//! Malformed descriptor fields never surface here: they are logged and
//! replaced by a fallback variant.
//!
//! # Usage
//!
//! All fallible public APIs return [`Result<T>`] which is an alias for
//! `std::result::Result<T, WorldError>`.

use thiserror::Error;

use crate::world::lifecycle::Stage;

/// The main error type for world construction and the lifecycle pipeline.
#[derive(Error, Debug)]
pub enum WorldError {
    // ========================================================================
    // Scene Build Errors
    // ========================================================================
    /// The world-object list handed to the scene-build stage was empty.
    #[error("Cannot build world scene: no world objects were provided")]
    EmptyWorld,

    /// A scene index did not resolve to a registered scene.
    #[error("Scene not found at index {0}")]
    SceneNotFound(usize),

    // ========================================================================
    // Lifecycle Errors
    // ========================================================================
    /// The orchestrator attempted a stage transition the state machine forbids.
    #[error("Illegal lifecycle transition: {from:?} -> {to:?}")]
    InvalidTransition {
        /// Stage the lifecycle was in
        from: Stage,
        /// Stage that was requested
        to: Stage,
    },

    /// A pending delay was dropped before it elapsed.
    #[error("Scheduled delay was cancelled before it elapsed")]
    DelayCancelled(#[from] futures::channel::oneshot::Canceled),

    // ========================================================================
    // Asset Loading Errors
    // ========================================================================
    /// A texture or font could not be loaded.
    #[error("Failed to load asset '{url}': {reason}")]
    AssetLoad {
        /// The url that was requested
        url: String,
        /// Loader-specific failure description
        reason: String,
    },

    /// Audio initialization failed.
    #[error("Audio initialization failed: {0}")]
    Audio(String),

    /// Image decoding error.
    #[error("Image decode error: {0}")]
    ImageDecode(String),

    // ========================================================================
    // I/O & Format Errors
    // ========================================================================
    /// File I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parse error (world configuration).
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<image::ImageError> for WorldError {
    fn from(err: image::ImageError) -> Self {
        WorldError::ImageDecode(err.to_string())
    }
}

/// Alias for `Result<T, WorldError>`.
pub type Result<T> = std::result::Result<T, WorldError>;
