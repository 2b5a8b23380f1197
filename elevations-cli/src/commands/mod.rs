pub mod batch;
pub mod cells;
pub mod coordinates;
pub mod polygon;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use elevations_client::{geojson::cell_elevations_to_geojson, CellElevations, ElevationsClient};
use h3o::Resolution;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

/// Options shared by every subcommand.
#[derive(Args, Debug, Default)]
pub struct GlobalOpts {
    /// Elevations API endpoint
    #[arg(long, env = "ELEVATIONS_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Request timeout in seconds (no timeout by default)
    #[arg(short, long, env = "ELEVATIONS_TIMEOUT_SECS", global = true)]
    pub timeout: Option<u64>,

    /// Output results as JSON
    #[arg(short, long, global = true)]
    pub json: bool,
}

impl GlobalOpts {
    /// Build an API client from the command-line options.
    pub fn client(&self) -> Result<ElevationsClient> {
        let mut builder = ElevationsClient::builder();
        if let Some(url) = &self.api_url {
            builder = builder.api_url(url);
        }
        if let Some(secs) = self.timeout {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        builder.build().context("Failed to create API client")
    }
}

/// Parse a `LAT,LON` pair.
pub fn parse_lat_lon(s: &str) -> Result<[f64; 2], String> {
    let (lat, lon) = s
        .split_once(',')
        .ok_or_else(|| format!("expected LAT,LON, got '{s}'"))?;
    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|_| format!("invalid latitude '{}'", lat.trim()))?;
    let lon: f64 = lon
        .trim()
        .parse()
        .map_err(|_| format!("invalid longitude '{}'", lon.trim()))?;
    Ok([lat, lon])
}

/// Parse an H3 resolution (0-15).
pub fn parse_resolution(s: &str) -> Result<Resolution, String> {
    let value: u8 = s
        .parse()
        .map_err(|_| format!("invalid resolution '{s}'"))?;
    Resolution::try_from(value).map_err(|e| e.to_string())
}

/// Run `f` while showing a spinner on stderr.
pub fn with_spinner<T>(message: &str, f: impl FnOnce() -> T) -> T {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg} [{elapsed}]") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = f();
    spinner.finish_and_clear();
    result
}

/// Tell the user which identifiers the API hasn't loaded yet.
pub fn report_deferred(count: usize, estimated_wait_time: Option<u64>) {
    if count == 0 {
        return;
    }
    match estimated_wait_time {
        Some(secs) => eprintln!(
            "{count} elevation(s) not available yet; request them again in about {secs}s"
        ),
        None => eprintln!("{count} elevation(s) not available yet; request them again later"),
    }
}

#[derive(Serialize)]
struct CellElevation {
    h3_cell: u64,
    elevation: f64,
}

#[derive(Serialize)]
struct CellElevationsOutput {
    elevations: Vec<CellElevation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    later: Option<Vec<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    estimated_wait_time: Option<u64>,
}

/// Print cell elevations sorted by cell index.
pub fn print_cell_elevations(result: &CellElevations, json: bool) -> Result<()> {
    let mut elevations: Vec<_> = result
        .elevations
        .iter()
        .map(|(&h3_cell, &elevation)| CellElevation { h3_cell, elevation })
        .collect();
    elevations.sort_unstable_by_key(|e| e.h3_cell);

    if json {
        let output = CellElevationsOutput {
            elevations,
            later: result.later.clone(),
            estimated_wait_time: result.estimated_wait_time,
        };
        println!("{}", serde_json::to_string(&output)?);
    } else {
        for e in &elevations {
            println!("{}\t{}", e.h3_cell, e.elevation);
        }
        report_deferred(
            result.later.as_ref().map_or(0, Vec::len),
            result.estimated_wait_time,
        );
    }

    Ok(())
}

/// Write cell elevations to a GeoJSON file.
pub fn write_cell_geojson(result: &CellElevations, path: &Path) -> Result<()> {
    let collection = cell_elevations_to_geojson(result)?;
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &collection)?;
    writer.flush()?;
    eprintln!("GeoJSON written to: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lat_lon() {
        assert_eq!(parse_lat_lon("54.53097,5.96836"), Ok([54.53097, 5.96836]));
        assert_eq!(parse_lat_lon(" -33.9 , 18.4 "), Ok([-33.9, 18.4]));
        assert!(parse_lat_lon("54.53097").is_err());
        assert!(parse_lat_lon("north,5.9").is_err());
        assert!(parse_lat_lon("54.5,").is_err());
    }

    #[test]
    fn test_parse_resolution() {
        assert_eq!(parse_resolution("0"), Ok(Resolution::Zero));
        assert_eq!(parse_resolution("15"), Ok(Resolution::Fifteen));
        assert!(parse_resolution("16").is_err());
        assert!(parse_resolution("-1").is_err());
    }

    #[test]
    fn test_global_opts_client() {
        let opts = GlobalOpts {
            api_url: Some("http://localhost:8080/elevations".to_string()),
            timeout: Some(20),
            json: false,
        };
        let client = opts.client().unwrap();
        assert_eq!(client.config().api_url, "http://localhost:8080/elevations");
        assert_eq!(client.config().timeout, Some(Duration::from_secs(20)));

        let opts = GlobalOpts {
            api_url: Some("localhost".to_string()),
            ..Default::default()
        };
        assert!(opts.client().is_err());
    }

    #[test]
    fn test_write_cell_geojson() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("cells.geojson");
        let result = CellElevations {
            elevations: [(630949280935159295, 151.216965)].into_iter().collect(),
            later: None,
            estimated_wait_time: None,
        };

        write_cell_geojson(&result, &path).unwrap();

        let geojson: geojson::GeoJson = std::fs::read_to_string(&path).unwrap().parse().unwrap();
        match geojson {
            geojson::GeoJson::FeatureCollection(fc) => assert_eq!(fc.features.len(), 1),
            _ => panic!("Expected FeatureCollection"),
        }
    }
}
