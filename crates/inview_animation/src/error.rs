//! Error types for inview_animation

use inview_dom::DomError;
use thiserror::Error;

/// Errors raised while loading or validating an [`EngineConfig`](crate::EngineConfig)
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The TOML document could not be parsed
    #[error("Failed to parse engine config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A field holds a value the engine cannot work with
    #[error("Invalid engine config: {0}")]
    Invalid(String),

    /// An easing name outside the preset set
    #[error("Unknown easing preset: {0}")]
    UnknownEasing(String),
}

/// Errors surfaced by the lifecycle controller
///
/// Attribute parsing never fails; only the host document or the engine
/// config can.
#[derive(Error, Debug)]
pub enum AnimationError {
    /// The host rejected a document operation
    #[error("Host document error: {0}")]
    Dom(#[from] DomError),

    /// The engine config is unusable
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type for inview_animation operations
pub type Result<T> = std::result::Result<T, AnimationError>;
