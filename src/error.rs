//! Error type shared by every stage of icon composition.

use std::path::PathBuf;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ComposeError>;

/// Errors raised while validating, rendering, encoding or writing an icon.
///
/// Validation errors ([`InvalidGeometry`](Self::InvalidGeometry) and
/// [`InvalidColor`](Self::InvalidColor)) are always reported before a canvas
/// is allocated, so a failed render never leaves a half-drawn image behind.
#[derive(Debug, thiserror::Error)]
pub enum ComposeError {
    /// A bounding box is empty or inverted, a polygon has fewer than three
    /// points, a line has fewer than two, or a stroke has zero width.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    /// A shape is missing a color it needs, or a color string is malformed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// The canvas cannot be allocated at the requested size.
    #[error("invalid canvas: {0}")]
    InvalidCanvas(String),

    /// An export configuration is unusable (zero size, clashing file names).
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// PNG encoding or decoding failed.
    #[error("png encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    /// Reading or writing a file failed.
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A composition or configuration document could not be (de)serialized.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ComposeError {
    pub fn geometry(msg: impl Into<String>) -> Self {
        Self::InvalidGeometry(msg.into())
    }

    pub fn color(msg: impl Into<String>) -> Self {
        Self::InvalidColor(msg.into())
    }

    pub fn canvas(msg: impl Into<String>) -> Self {
        Self::InvalidCanvas(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
