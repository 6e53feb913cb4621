//! # Traffic Light Error Types
//!
//! Channel and phase operations cannot fail. Errors only come from
//! lifecycle misuse, thread spawning, and configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when configuring or starting a traffic light.
#[derive(Error, Debug)]
pub enum LightError {
    /// The OS refused to spawn the toggling thread.
    #[error("failed to spawn toggling thread: {0}")]
    Spawn(#[source] std::io::Error),

    /// `start` was called on a light whose loop is already running.
    #[error("traffic light already started")]
    AlreadyStarted,

    /// `start` was called after `stop`.
    #[error("traffic light has been stopped")]
    Stopped,

    /// Configuration values are inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be read.
    #[error("failed to read config {}: {source}", path.display())]
    ConfigIo {
        /// The file that was requested.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid TOML for [`LightConfig`](crate::LightConfig).
    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

/// Result type for traffic light operations.
pub type LightResult<T> = Result<T, LightError>;
