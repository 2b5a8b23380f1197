use anyhow::{Context, Result};
use std::path::PathBuf;

use super::{print_cell_elevations, with_spinner, write_cell_geojson, GlobalOpts};

pub fn run(global: &GlobalOpts, cells: &[u64], geojson_out: Option<PathBuf>) -> Result<()> {
    let client = global.client()?;

    let result = with_spinner("Requesting cell elevations", || {
        client.get_h3_cell_elevations(cells)
    })
    .context("Failed to get cell elevations")?;

    print_cell_elevations(&result, global.json)?;

    if let Some(path) = geojson_out {
        write_cell_geojson(&result, &path)?;
    }

    Ok(())
}
