//! GeoJSON input and output.
//!
//! Enable the `geojson` feature to use this module.
//!
//! GeoJSON positions are `[longitude, latitude]`, whereas the rest of this
//! crate works in `[latitude, longitude]` order. The functions here take care
//! of the swap.
//!
//! # Example
//!
//! ```ignore
//! use elevations_client::{geojson::polygon_from_geojson, ElevationsClient};
//! use h3o::Resolution;
//!
//! let geojson: geojson::GeoJson = std::fs::read_to_string("site.geojson")?.parse()?;
//! let polygon = polygon_from_geojson(&geojson)?;
//!
//! let client = ElevationsClient::new()?;
//! let result = client.get_h3_cell_elevations_in_polygon(&polygon, Resolution::Ten)?;
//! ```

use ::geojson::{Feature, FeatureCollection, GeoJson, Geometry, JsonObject, Value};
use h3o::CellIndex;

use crate::error::{ElevationsError, Result};
use crate::types::CellElevations;

/// Extract the exterior ring of the first polygon in a GeoJSON document.
///
/// Looks through geometries, features and feature collections (in order)
/// for a `Polygon` or `MultiPolygon`. Holes are ignored. The vertices are
/// returned as `[lat, lng]` pairs ready to pass to
/// [`get_h3_cell_elevations_in_polygon`](crate::ElevationsClient::get_h3_cell_elevations_in_polygon).
///
/// # Errors
///
/// Returns [`ElevationsError::InvalidGeometry`] if the document contains no
/// polygon or a position has fewer than two elements.
pub fn polygon_from_geojson(geojson: &GeoJson) -> Result<Vec<[f64; 2]>> {
    let ring = match geojson {
        GeoJson::Geometry(geometry) => exterior_ring(geometry),
        GeoJson::Feature(feature) => feature.geometry.as_ref().and_then(exterior_ring),
        GeoJson::FeatureCollection(collection) => collection
            .features
            .iter()
            .filter_map(|feature| feature.geometry.as_ref())
            .find_map(exterior_ring),
    }
    .ok_or_else(|| ElevationsError::InvalidGeometry {
        message: "No Polygon or MultiPolygon found".to_string(),
    })?;

    ring.iter()
        .map(|position| match position.as_slice() {
            [lng, lat, ..] => Ok([*lat, *lng]),
            _ => Err(ElevationsError::InvalidGeometry {
                message: "Position must have at least 2 elements (lon, lat)".to_string(),
            }),
        })
        .collect()
}

fn exterior_ring(geometry: &Geometry) -> Option<&Vec<Vec<f64>>> {
    match &geometry.value {
        Value::Polygon(rings) => rings.first(),
        Value::MultiPolygon(polygons) => polygons.first().and_then(|rings| rings.first()),
        Value::GeometryCollection(geometries) => geometries.iter().find_map(exterior_ring),
        _ => None,
    }
}

/// Convert cell elevations to a feature collection of cell boundaries.
///
/// Each feature is the hexagon (or pentagon) of one cell with `h3_index`
/// (hexadecimal string) and `elevation` properties. Features are sorted by
/// cell index. Deferred cells are not included.
///
/// # Errors
///
/// Returns [`ElevationsError::InvalidResponse`] if a returned index isn't a
/// valid H3 cell.
pub fn cell_elevations_to_geojson(result: &CellElevations) -> Result<FeatureCollection> {
    let mut entries: Vec<_> = result.elevations.iter().collect();
    entries.sort_unstable_by_key(|(index, _)| **index);

    let features = entries
        .into_iter()
        .map(|(&index, &elevation)| {
            let cell =
                CellIndex::try_from(index).map_err(|e| ElevationsError::InvalidResponse {
                    message: format!("cell index {index}: {e}"),
                })?;

            let mut ring: Vec<Vec<f64>> = cell
                .boundary()
                .iter()
                .map(|vertex| vec![vertex.lng(), vertex.lat()])
                .collect();
            if let Some(first) = ring.first().cloned() {
                ring.push(first);
            }

            let mut properties = JsonObject::new();
            properties.insert("h3_index".to_string(), cell.to_string().into());
            properties.insert("elevation".to_string(), elevation.into());

            Ok(Feature {
                bbox: None,
                geometry: Some(Geometry::new(Value::Polygon(vec![ring]))),
                id: None,
                properties: Some(properties),
                foreign_members: None,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    })
}
