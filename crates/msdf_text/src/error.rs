//! Crate-level error type

use crate::config::ConfigError;
use crate::text::{FontError, GeometryError, LayoutError};

/// Result type for operations spanning several subsystems
pub type TextResult<T> = Result<T, TextError>;

/// Any error the crate can produce
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    /// Font descriptor error
    #[error(transparent)]
    Font(#[from] FontError),

    /// Layout configuration error
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// Buffer generation error
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Config file error
    #[error(transparent)]
    Config(#[from] ConfigError),
}
