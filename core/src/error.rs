//! Error Types
//!
//! Errors raised while resolving figures and building a bone.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur while building or rendering a bone
#[derive(Debug, Error)]
pub enum BoneError {
    /// The named figure is in no search path
    #[error("not found {name:?} bonefile")]
    NotFound {
        /// Requested figure name
        name: String,
    },

    /// A figure file or search path directory could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// No figures are available to choose from
    #[error("no bonefiles available")]
    NoFigures,

    /// Configuration rejected by validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Settings file could not be loaded
    #[error(transparent)]
    Settings(#[from] ConfigError),
}

/// Result alias for bone operations
pub type Result<T> = std::result::Result<T, BoneError>;
