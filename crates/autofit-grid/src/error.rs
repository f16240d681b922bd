//! Error types for grid sizing.

use thiserror::Error;

/// Errors raised while configuring a [`GridSizer`](crate::GridSizer).
///
/// A sizing pass itself never fails: degenerate content is clamped or
/// skipped. Only construction and configuration loading return errors.
#[derive(Debug, Error)]
pub enum GridError {
    /// No container was supplied to the builder.
    #[error("container is required")]
    MissingContainer,

    /// The grid declares no header columns.
    #[error("grid has no header columns")]
    NoColumns,

    /// A configuration value was rejected.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// JSON configuration could not be parsed.
    #[error("failed to parse JSON configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML configuration could not be parsed.
    #[error("failed to parse YAML configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type for grid sizing operations.
pub type Result<T> = std::result::Result<T, GridError>;
