//! Error types for the elevations client.

use h3o::error::InvalidCellIndex;
use h3o::Resolution;
use thiserror::Error;

/// Errors that can occur when requesting elevations.
#[derive(Error, Debug)]
pub enum ElevationsError {
    /// No identifiers were given.
    #[error("No {what} given")]
    EmptyInput { what: &'static str },

    /// A cell index is not a valid H3 cell.
    #[error("Invalid H3 cell index at position {position}: {index}")]
    InvalidCell {
        position: usize,
        index: u64,
        #[source]
        source: InvalidCellIndex,
    },

    /// A coordinate is not a well-formed latitude/longitude pair.
    #[error("Invalid coordinate at position {position}: {message}")]
    InvalidCoordinate { position: usize, message: String },

    /// The polygon cannot be converted to cells.
    #[error("Invalid polygon: {message}")]
    InvalidPolygon { message: String },

    /// The polygon is too small to contain any cell centroid.
    #[error("Polygon contains no H3 cells at resolution {resolution}")]
    NoCellsInPolygon { resolution: Resolution },

    /// GeoJSON input doesn't contain a usable polygon.
    #[cfg(feature = "geojson")]
    #[error("Invalid geometry: {message}")]
    InvalidGeometry { message: String },

    /// Client configuration is invalid.
    #[error("Invalid configuration: {message}")]
    Config { message: String },

    /// HTTP request failed or returned an error status.
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Response body isn't the expected JSON.
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Response is valid JSON but its contents can't be decoded.
    #[error("Invalid response: {message}")]
    InvalidResponse { message: String },
}

impl ElevationsError {
    /// Whether the error was raised by input validation, before any request was made.
    pub fn is_validation(&self) -> bool {
        match self {
            ElevationsError::EmptyInput { .. }
            | ElevationsError::InvalidCell { .. }
            | ElevationsError::InvalidCoordinate { .. }
            | ElevationsError::InvalidPolygon { .. }
            | ElevationsError::NoCellsInPolygon { .. } => true,
            #[cfg(feature = "geojson")]
            ElevationsError::InvalidGeometry { .. } => true,
            ElevationsError::Config { .. }
            | ElevationsError::Request(_)
            | ElevationsError::Parse(_)
            | ElevationsError::InvalidResponse { .. } => false,
        }
    }
}

/// Result type alias using [`ElevationsError`].
pub type Result<T> = std::result::Result<T, ElevationsError>;
