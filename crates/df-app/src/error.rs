//! Error types for the df-app service layer.

use std::path::PathBuf;

/// Application error type that wraps errors from the engine crates and
/// gives the CLI one error to report.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Design error: {0}")]
    Design(String),

    #[error("Failed to read design file: {path}")]
    DesignFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write design file: {path}")]
    DesignFileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Design validation failed: {0}")]
    Validation(String),

    #[error("Junction not found: {0}")]
    JunctionNotFound(String),

    #[error("Service not found: {0}")]
    ServiceNotFound(String),

    #[error("Topology error: {0}")]
    Topology(String),

    #[error("Sizing error: {0}")]
    Sizing(String),

    #[error("Resolution error: {0}")]
    Resolution(String),

    #[error("BOM error: {0}")]
    Bom(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for df-app operations.
pub type AppResult<T> = Result<T, AppError>;

// Conversions from engine error types
impl From<df_model::ModelError> for AppError {
    fn from(err: df_model::ModelError) -> Self {
        AppError::Design(err.to_string())
    }
}

impl From<df_model::ConfigError> for AppError {
    fn from(err: df_model::ConfigError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<df_topology::TopologyError> for AppError {
    fn from(err: df_topology::TopologyError) -> Self {
        AppError::Topology(err.to_string())
    }
}

impl From<df_sizing::SizingError> for AppError {
    fn from(err: df_sizing::SizingError) -> Self {
        AppError::Sizing(err.to_string())
    }
}

impl From<df_resolver::ResolutionError> for AppError {
    fn from(err: df_resolver::ResolutionError) -> Self {
        AppError::Resolution(err.to_string())
    }
}

impl From<df_bom::BomError> for AppError {
    fn from(err: df_bom::BomError) -> Self {
        AppError::Bom(err.to_string())
    }
}
