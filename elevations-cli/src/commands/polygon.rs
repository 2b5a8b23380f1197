use anyhow::{Context, Result};
use elevations_client::geojson::polygon_from_geojson;
use h3o::Resolution;
use std::fs;
use std::path::{Path, PathBuf};

use super::{print_cell_elevations, with_spinner, write_cell_geojson, GlobalOpts};

pub fn run(
    global: &GlobalOpts,
    vertices: Vec<[f64; 2]>,
    geojson: Option<PathBuf>,
    resolution: Resolution,
    geojson_out: Option<PathBuf>,
) -> Result<()> {
    let polygon = match geojson {
        Some(path) => read_polygon(&path)?,
        None => vertices,
    };

    let client = global.client()?;

    let result = with_spinner("Requesting polygon elevations", || {
        client.get_h3_cell_elevations_in_polygon(&polygon, resolution)
    })
    .context("Failed to get polygon elevations")?;

    print_cell_elevations(&result, global.json)?;

    if let Some(path) = geojson_out {
        write_cell_geojson(&result, &path)?;
    }

    Ok(())
}

/// Read the first polygon from a GeoJSON file as `[lat, lon]` vertices.
fn read_polygon(path: &Path) -> Result<Vec<[f64; 2]>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let geojson: geojson::GeoJson = contents.parse().context("Failed to parse GeoJSON")?;
    Ok(polygon_from_geojson(&geojson)?)
}
