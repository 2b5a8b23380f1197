//! # Elevations Client
//!
//! Client library for the elevations API, which serves terrain and bathymetry
//! elevations for [H3](https://h3geo.org/) cells.
//!
//! Elevations can be requested for:
//!
//! - **H3 cells**: integer cell indexes
//! - **Coordinates**: latitude/longitude pairs, looked up at an H3 resolution
//! - **Polygons**: every cell whose centroid lies inside the polygon
//!
//! All input is validated before anything is sent, and each call makes a
//! single blocking HTTP request. Nothing is retried or cached.
//!
//! ## Quick Start
//!
//! ```ignore
//! use elevations_client::get_h3_cell_elevations;
//!
//! let result = get_h3_cell_elevations(&[630949280935159295, 630949280220393983])?;
//! for (cell, elevation) in &result.elevations {
//!     println!("{cell}: {elevation}m");
//! }
//! ```
//!
//! ## Lazily-Loaded Data
//!
//! The service loads its elevation database on demand. Identifiers that
//! aren't available yet are returned in [`Elevations::later`] together with
//! [`Elevations::estimated_wait_time`]; request them again once the wait has
//! passed. The client never does this itself.

pub mod client;
pub mod config;
pub mod error;
#[cfg(feature = "geojson")]
pub mod geojson;
pub mod polygon;
pub mod response;
pub mod transport;
pub mod types;
pub mod validate;

use h3o::Resolution;

// Re-export main types at crate root for convenience
pub use client::{ElevationsClient, ElevationsClientBuilder, DEFAULT_RESOLUTION};
pub use config::{ClientConfig, DEFAULT_API_URL};
pub use error::{ElevationsError, Result};
pub use transport::{HttpTransport, Transport};
pub use types::{CellElevations, Coordinate, CoordinateElevations, Elevations};

/// Get the elevations of H3 cells using a default client.
///
/// See [`ElevationsClient::get_h3_cell_elevations`].
pub fn get_h3_cell_elevations(cells: &[u64]) -> Result<CellElevations> {
    ElevationsClient::new()?.get_h3_cell_elevations(cells)
}

/// Get the elevations of latitude/longitude coordinates using a default client.
///
/// See [`ElevationsClient::get_coordinate_elevations`].
pub fn get_coordinate_elevations<C: AsRef<[f64]>>(
    coordinates: &[C],
    resolution: Resolution,
) -> Result<CoordinateElevations> {
    ElevationsClient::new()?.get_coordinate_elevations(coordinates, resolution)
}

/// Get the elevations of the H3 cells inside a polygon using a default client.
///
/// See [`ElevationsClient::get_h3_cell_elevations_in_polygon`].
pub fn get_h3_cell_elevations_in_polygon<C: AsRef<[f64]>>(
    polygon: &[C],
    resolution: Resolution,
) -> Result<CellElevations> {
    ElevationsClient::new()?.get_h3_cell_elevations_in_polygon(polygon, resolution)
}
