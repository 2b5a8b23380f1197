//! Client-side input validation.
//!
//! Every request is validated in full before anything is sent, so a single
//! bad identifier rejects the whole call without touching the network.

use h3o::CellIndex;

use crate::error::{ElevationsError, Result};
use crate::types::Coordinate;

/// Minimum number of distinct vertices in a polygon ring.
pub const MIN_POLYGON_VERTICES: usize = 3;

/// Check that `cells` is non-empty and every entry is a valid H3 cell index.
///
/// # Example
///
/// ```
/// use elevations_client::validate::validate_cells;
///
/// assert!(validate_cells(&[630949280935159295]).is_ok());
/// assert!(validate_cells(&[630949280935159295, 1]).is_err());
/// assert!(validate_cells(&[]).is_err());
/// ```
pub fn validate_cells(cells: &[u64]) -> Result<Vec<CellIndex>> {
    if cells.is_empty() {
        return Err(ElevationsError::EmptyInput { what: "H3 cells" });
    }

    cells
        .iter()
        .enumerate()
        .map(|(position, &index)| {
            CellIndex::try_from(index).map_err(|source| ElevationsError::InvalidCell {
                position,
                index,
                source,
            })
        })
        .collect()
}

/// Check that `coordinates` is non-empty and every entry is a `[lat, lng]` pair.
///
/// Each entry must have exactly two finite elements, with the latitude in
/// `[-90, 90]` and the longitude in `[-180, 180]`.
pub fn validate_coordinates<C: AsRef<[f64]>>(coordinates: &[C]) -> Result<Vec<Coordinate>> {
    if coordinates.is_empty() {
        return Err(ElevationsError::EmptyInput {
            what: "coordinates",
        });
    }

    coordinates
        .iter()
        .enumerate()
        .map(|(position, coord)| {
            parse_coordinate(coord.as_ref())
                .map_err(|message| ElevationsError::InvalidCoordinate { position, message })
        })
        .collect()
}

/// Check that `polygon` is a ring of at least three well-formed vertices.
///
/// A closing vertex equal to the first one is dropped from the returned ring
/// and doesn't count towards the minimum.
pub fn validate_polygon<C: AsRef<[f64]>>(polygon: &[C]) -> Result<Vec<Coordinate>> {
    let mut vertices = polygon
        .iter()
        .enumerate()
        .map(|(position, coord)| {
            parse_coordinate(coord.as_ref()).map_err(|message| ElevationsError::InvalidPolygon {
                message: format!("vertex {position}: {message}"),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    if vertices.len() > 1 && vertices.first() == vertices.last() {
        vertices.pop();
    }

    if vertices.len() < MIN_POLYGON_VERTICES {
        return Err(ElevationsError::InvalidPolygon {
            message: format!(
                "expected at least {MIN_POLYGON_VERTICES} vertices, got {}",
                vertices.len()
            ),
        });
    }

    Ok(vertices)
}

fn parse_coordinate(values: &[f64]) -> std::result::Result<Coordinate, String> {
    let &[lat, lng] = values else {
        return Err(format!(
            "expected a [lat, lng] pair, got {} values",
            values.len()
        ));
    };

    if !lat.is_finite() || !lng.is_finite() {
        return Err(format!("non-finite value in ({lat}, {lng})"));
    }
    if !(-90.0..=90.0).contains(&lat) {
        return Err(format!("latitude {lat} out of range (valid: ±90°)"));
    }
    if !(-180.0..=180.0).contains(&lng) {
        return Err(format!("longitude {lng} out of range (valid: ±180°)"));
    }

    Ok(Coordinate::new(lat, lng))
}
