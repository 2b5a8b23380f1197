//! Basic example demonstrating elevations-client usage.
//!
//! Run with: cargo run --example basic

use elevations_client::{Coordinate, ElevationsClient, ElevationsError, DEFAULT_RESOLUTION};
use h3o::Resolution;

fn main() -> Result<(), ElevationsError> {
    let client = ElevationsClient::new()?;

    // Elevations of individual cells
    let result = client.get_h3_cell_elevations(&[630949280935159295, 630949280220393983])?;
    println!("Cell elevations:");
    for (cell, elevation) in &result.elevations {
        println!("  {}: {}m", cell, elevation);
    }

    // Elevations of coordinates
    let locations = [
        ("Mount Fuji, Japan", [35.3606, 138.7274]),
        ("North Sea", [54.53097, 5.96836]),
    ];
    let coordinates: Vec<[f64; 2]> = locations.iter().map(|(_, coord)| *coord).collect();
    let result = client.get_coordinate_elevations(&coordinates, DEFAULT_RESOLUTION)?;

    println!("\nCoordinate elevations:");
    for (name, [lat, lng]) in &locations {
        match result.elevations.get(&Coordinate::new(*lat, *lng)) {
            Some(elevation) => println!("  {}: {}m", name, elevation),
            None => println!("  {}: not available yet", name),
        }
    }

    // Elevations of every cell inside a polygon
    let polygon = [
        [54.53097, 5.96836],
        [54.53075, 5.96435],
        [54.52926, 5.96432],
        [54.52903, 5.96888],
    ];
    let result = client.get_h3_cell_elevations_in_polygon(&polygon, Resolution::Ten)?;
    println!("\nPolygon: {} cells", result.elevations.len());

    if !result.is_complete() {
        println!(
            "Some elevations are still loading; try again in {:?}",
            result.estimated_wait()
        );
    }

    Ok(())
}
