use anyhow::{Context, Result};
use elevations_client::{Coordinate, CoordinateElevations};
use h3o::Resolution;
use serde::Serialize;

use super::{report_deferred, with_spinner, GlobalOpts};

#[derive(Serialize)]
struct CoordinateElevation {
    lat: f64,
    lon: f64,
    elevation: Option<f64>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pending: bool,
}

pub fn run(global: &GlobalOpts, coordinates: &[[f64; 2]], resolution: Resolution) -> Result<()> {
    let client = global.client()?;

    let result = with_spinner("Requesting coordinate elevations", || {
        client.get_coordinate_elevations(coordinates, resolution)
    })
    .context("Failed to get coordinate elevations")?;

    let rows = rows_in_input_order(coordinates, &result);

    if global.json {
        println!("{}", serde_json::to_string(&rows)?);
    } else {
        for row in &rows {
            match row.elevation {
                Some(elevation) => println!("{},{}\t{}", row.lat, row.lon, elevation),
                None if row.pending => println!("{},{}\tpending", row.lat, row.lon),
                None => println!("{},{}\tmissing", row.lat, row.lon),
            }
        }
        report_deferred(
            result.later.as_ref().map_or(0, Vec::len),
            result.estimated_wait_time,
        );
    }

    Ok(())
}

/// Pair each requested coordinate with its elevation, keeping the input order.
fn rows_in_input_order(
    coordinates: &[[f64; 2]],
    result: &CoordinateElevations,
) -> Vec<CoordinateElevation> {
    coordinates
        .iter()
        .map(|&pair| {
            let coord = Coordinate::from(pair);
            let pending = result
                .later
                .as_ref()
                .is_some_and(|later| later.contains(&coord));
            CoordinateElevation {
                lat: coord.lat,
                lon: coord.lng,
                elevation: result.elevations.get(&coord).copied(),
                pending,
            }
        })
        .collect()
}
