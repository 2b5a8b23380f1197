//! Polygon to H3 cell conversion.

use geo::{LineString, Polygon};
use h3o::geom::{ContainmentMode, TilerBuilder};
use h3o::Resolution;

use crate::error::{ElevationsError, Result};
use crate::types::Coordinate;

/// Get the H3 cells whose centroids lie inside a polygon.
///
/// `vertices` is the exterior ring in latitude/longitude order; it doesn't
/// need to be explicitly closed. The returned cell indexes are sorted and
/// contain no duplicates. An empty result is not an error here.
///
/// # Example
///
/// ```
/// use elevations_client::{polygon::polygon_to_cells, Coordinate};
/// use h3o::Resolution;
///
/// let square = [
///     Coordinate::new(54.53, 5.96),
///     Coordinate::new(54.53, 5.97),
///     Coordinate::new(54.52, 5.97),
///     Coordinate::new(54.52, 5.96),
/// ];
/// let cells = polygon_to_cells(&square, Resolution::Nine)?;
/// assert!(!cells.is_empty());
/// # Ok::<(), elevations_client::ElevationsError>(())
/// ```
pub fn polygon_to_cells(vertices: &[Coordinate], resolution: Resolution) -> Result<Vec<u64>> {
    // geo uses x = longitude, y = latitude
    let exterior: LineString<f64> = vertices
        .iter()
        .map(|coord| (coord.lng, coord.lat))
        .collect::<Vec<_>>()
        .into();
    let polygon = Polygon::new(exterior, Vec::new());

    let mut tiler = TilerBuilder::new(resolution)
        .containment_mode(ContainmentMode::ContainsCentroid)
        .build();
    tiler
        .add(polygon)
        .map_err(|e| ElevationsError::InvalidPolygon {
            message: e.to_string(),
        })?;

    let mut cells: Vec<u64> = tiler.into_coverage().map(u64::from).collect();
    cells.sort_unstable();
    cells.dedup();

    tracing::debug!(
        vertices = vertices.len(),
        resolution = u8::from(resolution),
        cells = cells.len(),
        "Converted polygon to H3 cells"
    );

    Ok(cells)
}
