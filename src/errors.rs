//! Error Types
//!
//! This module defines the error types used throughout the crate.
//!
//! # Overview
//!
//! The main error type [`ShowreelError`] covers the failure modes that reach
//! the caller:
//! - Invalid presentation configuration
//! - Edits addressed to unknown entities or to a frozen timeline
//! - Per-entity asset load failures
//! - Config file I/O and JSON parsing
//!
//! Conditions that are normal at runtime (an empty scene under the pointer,
//! a media clock reporting a garbage time for one tick) are not errors and
//! never surface here.
//!
//! # Usage
//!
//! ```rust,ignore
//! use showreel::errors::{ShowreelError, Result};
//!
//! fn edit() -> Result<()> {
//!     Ok(())
//! }
//! ```

use thiserror::Error;

use crate::roster::EntityId;

/// The main error type for the crate.
#[derive(Error, Debug)]
pub enum ShowreelError {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// A configuration value violates its invariant.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// An edit addressed an entity that is not configured.
    #[error("Unknown entity: {0}")]
    UnknownEntity(EntityId),

    // ========================================================================
    // Scheduling Errors
    // ========================================================================
    /// A timing edit arrived after the guided phase ended.
    #[error("Timeline is frozen: timing can no longer be rebuilt")]
    TimelineFrozen,

    // ========================================================================
    // Asset Loading Errors
    // ========================================================================
    /// An entity's visual asset failed to load.
    #[error("Failed to load asset '{path}': {reason}")]
    AssetLoad {
        /// Asset path as configured
        path: String,
        /// Loader-provided reason
        reason: String,
    },

    // ========================================================================
    // I/O & Parsing Errors
    // ========================================================================
    /// File I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parse error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Alias for `Result<T, ShowreelError>`.
pub type Result<T> = std::result::Result<T, ShowreelError>;
