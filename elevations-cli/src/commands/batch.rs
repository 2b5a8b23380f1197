use anyhow::{bail, Context, Result};
use elevations_client::{Coordinate, CoordinateElevations};
use h3o::Resolution;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use super::{report_deferred, with_spinner, GlobalOpts};

/// Value written for coordinates the API deferred.
const PENDING: &str = "pending";

pub fn run(
    global: &GlobalOpts,
    input: PathBuf,
    output: Option<PathBuf>,
    lat_col: &str,
    lon_col: &str,
    resolution: Resolution,
) -> Result<()> {
    let extension = input
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    if extension != "csv" {
        bail!("Unsupported file format: {}. Use .csv", extension);
    }

    let (headers, records, coordinates) = read_csv(&input, lat_col, lon_col)?;
    if coordinates.is_empty() {
        bail!("No rows found in {}", input.display());
    }

    let client = global.client()?;
    let result = with_spinner(
        &format!("Requesting elevations for {} coordinates", coordinates.len()),
        || client.get_coordinate_elevations(&coordinates, resolution),
    )
    .context("Failed to get coordinate elevations")?;

    let output_path = output.unwrap_or_else(|| default_output_path(&input));
    write_csv(&output_path, &headers, &records, &coordinates, &result)?;

    if global.json {
        let summary = serde_json::json!({
            "output": output_path,
            "rows": records.len(),
            "pending": result.later.as_ref().map_or(0, Vec::len),
            "estimated_wait_time": result.estimated_wait_time,
        });
        println!("{}", serde_json::to_string(&summary)?);
    } else {
        println!("Output written to: {}", output_path.display());
        report_deferred(
            result.later.as_ref().map_or(0, Vec::len),
            result.estimated_wait_time,
        );
    }

    Ok(())
}

fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    input.with_file_name(format!("{}_elevation.csv", stem))
}

/// Read all records and their `[lat, lon]` pairs from a CSV file.
fn read_csv(
    input: &Path,
    lat_col: &str,
    lon_col: &str,
) -> Result<(csv::StringRecord, Vec<csv::StringRecord>, Vec<[f64; 2]>)> {
    let file = File::open(input).context("Failed to open input file")?;
    let mut reader = csv::Reader::from_reader(BufReader::new(file));

    // Find column indices
    let headers = reader.headers()?.clone();
    let lat_idx = headers
        .iter()
        .position(|h| h == lat_col)
        .with_context(|| format!("Column '{}' not found in CSV", lat_col))?;
    let lon_idx = headers
        .iter()
        .position(|h| h == lon_col)
        .with_context(|| format!("Column '{}' not found in CSV", lon_col))?;

    let records: Vec<_> = reader.records().collect::<Result<_, _>>()?;

    let coordinates = records
        .iter()
        .enumerate()
        .map(|(row, record)| {
            let lat: f64 = record
                .get(lat_idx)
                .context("Missing latitude")?
                .trim()
                .parse()
                .with_context(|| format!("Invalid latitude on row {}", row + 1))?;
            let lon: f64 = record
                .get(lon_idx)
                .context("Missing longitude")?
                .trim()
                .parse()
                .with_context(|| format!("Invalid longitude on row {}", row + 1))?;
            Ok([lat, lon])
        })
        .collect::<Result<Vec<_>>>()?;

    Ok((headers, records, coordinates))
}

/// Write the input records with an `elevation` column appended.
fn write_csv(
    output: &Path,
    headers: &csv::StringRecord,
    records: &[csv::StringRecord],
    coordinates: &[[f64; 2]],
    result: &CoordinateElevations,
) -> Result<()> {
    let output_file = File::create(output).context("Failed to create output file")?;
    let mut writer = csv::Writer::from_writer(BufWriter::new(output_file));

    let mut new_headers: Vec<&str> = headers.iter().collect();
    new_headers.push("elevation");
    writer.write_record(&new_headers)?;

    for (record, &pair) in records.iter().zip(coordinates) {
        let coord = Coordinate::from(pair);
        let elevation = match result.elevations.get(&coord) {
            Some(elevation) => elevation.to_string(),
            None if result
                .later
                .as_ref()
                .is_some_and(|later| later.contains(&coord)) =>
            {
                PENDING.to_string()
            }
            None => String::new(),
        };

        let mut new_record: Vec<&str> = record.iter().collect();
        new_record.push(&elevation);
        writer.write_record(&new_record)?;
    }

    writer.flush()?;
    Ok(())
}
