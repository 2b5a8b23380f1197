use anyhow::Result;
use clap::{Parser, Subcommand};
use h3o::Resolution;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::{parse_lat_lon, parse_resolution, GlobalOpts};

/// H3 elevations API command-line client
#[derive(Parser)]
#[command(name = "elevations")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalOpts,

    /// Log requests and responses to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Get elevations of H3 cells
    Cells {
        /// Integer H3 cell indexes
        #[arg(required = true)]
        cells: Vec<u64>,

        /// Also write the cells as a GeoJSON FeatureCollection
        #[arg(long)]
        geojson_out: Option<PathBuf>,
    },

    /// Get elevations of latitude/longitude coordinates
    Coordinates {
        /// Coordinate as LAT,LON in decimal degrees (repeatable)
        #[arg(
            short = 'p',
            long = "point",
            required = true,
            value_parser = parse_lat_lon,
            allow_hyphen_values = true
        )]
        coordinates: Vec<[f64; 2]>,

        /// H3 resolution to look the elevations up at (0-15)
        #[arg(short, long, default_value = "12", value_parser = parse_resolution)]
        resolution: Resolution,
    },

    /// Get elevations of the H3 cells inside a polygon
    Polygon {
        /// Polygon vertex as LAT,LON in decimal degrees (repeatable)
        #[arg(
            short = 'p',
            long = "point",
            value_parser = parse_lat_lon,
            allow_hyphen_values = true,
            required_unless_present = "geojson",
            conflicts_with = "geojson"
        )]
        vertices: Vec<[f64; 2]>,

        /// Read the polygon from a GeoJSON file instead
        #[arg(long)]
        geojson: Option<PathBuf>,

        /// H3 resolution of the cells (0-15)
        #[arg(short, long, default_value = "12", value_parser = parse_resolution)]
        resolution: Resolution,

        /// Also write the cells as a GeoJSON FeatureCollection
        #[arg(long)]
        geojson_out: Option<PathBuf>,
    },

    /// Add elevations to the coordinates in a CSV file
    Batch {
        /// Input CSV file
        input: PathBuf,

        /// Output file (defaults to <input>_elevation.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Column name for latitude
        #[arg(long, default_value = "lat")]
        lat_col: String,

        /// Column name for longitude
        #[arg(long, default_value = "lon")]
        lon_col: String,

        /// H3 resolution to look the elevations up at (0-15)
        #[arg(short, long, default_value = "12", value_parser = parse_resolution)]
        resolution: Resolution,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "elevations_client=debug,elevations=debug"
    } else {
        "elevations_client=warn,elevations=warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Cells { cells, geojson_out } => {
            commands::cells::run(&cli.global, &cells, geojson_out)
        }
        Commands::Coordinates {
            coordinates,
            resolution,
        } => commands::coordinates::run(&cli.global, &coordinates, resolution),
        Commands::Polygon {
            vertices,
            geojson,
            resolution,
            geojson_out,
        } => commands::polygon::run(&cli.global, vertices, geojson, resolution, geojson_out),
        Commands::Batch {
            input,
            output,
            lat_col,
            lon_col,
            resolution,
        } => commands::batch::run(&cli.global, input, output, &lat_col, &lon_col, resolution),
    }
}
