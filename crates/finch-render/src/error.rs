//! Error type for rendering operations.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while turning a path into SVG or raster output.
#[derive(Debug, Error)]
pub enum RenderError {
    /// There are no points to compute a view box from.
    #[error("cannot render an empty path")]
    EmptyPath,
    /// An output file could not be written.
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        /// Destination that failed.
        path: PathBuf,
        /// Underlying I/O failure.
        source: io::Error,
    },
    /// The PNG encoder rejected the image.
    #[cfg(feature = "png")]
    #[error("failed to encode PNG: {0}")]
    Image(#[from] image::ImageError),
    /// A custom raster backend failed.
    #[error("raster backend `{backend}` failed: {message}")]
    Backend {
        /// Name reported by the backend.
        backend: String,
        /// Backend-specific description.
        message: String,
    },
}
