//! Request identifiers and elevation results.

use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in decimal degrees.
///
/// Serialized as a two-element array `[lat, lng]`, which is also how the API
/// encodes coordinate keys in its responses.
///
/// Equality and hashing compare the exact bit patterns of both components so
/// that coordinates can key a [`HashMap`]. A coordinate decoded from a
/// response therefore matches the one that was sent only if the server echoes
/// it back unchanged.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinate {
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lng: f64,
}

impl Coordinate {
    /// Create a new coordinate. No range checks are applied.
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self { lat, lng }
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(coord: Coordinate) -> Self {
        [coord.lat, coord.lng]
    }
}

impl PartialEq for Coordinate {
    fn eq(&self, other: &Self) -> bool {
        self.lat.to_bits() == other.lat.to_bits() && self.lng.to_bits() == other.lng.to_bits()
    }
}

impl Eq for Coordinate {}

impl Hash for Coordinate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.lat.to_bits().hash(state);
        self.lng.to_bits().hash(state);
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

/// Elevations returned by the API, keyed by the identifier they were requested for.
///
/// The service loads its data lazily. Identifiers whose elevations aren't
/// available yet are listed in [`later`](Self::later) together with an
/// estimated wait before they should be requested again. Both fields are
/// passed through from the response as-is.
#[derive(Debug, Clone)]
pub struct Elevations<K> {
    /// Identifiers mapped to their elevations in meters.
    pub elevations: HashMap<K, f64>,
    /// Identifiers to request again after the wait time.
    pub later: Option<Vec<K>>,
    /// Estimated wait time in seconds.
    pub estimated_wait_time: Option<u64>,
}

/// Elevations keyed by H3 cell index.
pub type CellElevations = Elevations<u64>;

/// Elevations keyed by latitude/longitude coordinate.
pub type CoordinateElevations = Elevations<Coordinate>;

impl<K> Elevations<K> {
    /// Whether every requested identifier has an elevation.
    pub fn is_complete(&self) -> bool {
        self.later.as_ref().map_or(true, Vec::is_empty)
    }

    /// The estimated wait time as a [`Duration`].
    pub fn estimated_wait(&self) -> Option<Duration> {
        self.estimated_wait_time.map(Duration::from_secs)
    }

    /// Split into `(elevations, later, estimated_wait_time)`.
    pub fn into_parts(self) -> (HashMap<K, f64>, Option<Vec<K>>, Option<u64>) {
        (self.elevations, self.later, self.estimated_wait_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_serde() {
        let coord = Coordinate::new(54.53097, 5.96836);
        assert_eq!(serde_json::to_string(&coord).unwrap(), "[54.53097,5.96836]");

        let parsed: Coordinate = serde_json::from_str("[54.53097, 5.96836]").unwrap();
        assert_eq!(parsed, coord);

        assert!(serde_json::from_str::<Coordinate>("[54.53097]").is_err());
    }

    #[test]
    fn test_coordinate_as_map_key() {
        let mut map = HashMap::new();
        map.insert(Coordinate::new(54.53097, 5.96836), 0.0);
        assert_eq!(map.get(&Coordinate::from((54.53097, 5.96836))), Some(&0.0));
        assert_eq!(map.get(&Coordinate::new(5.96836, 54.53097)), None);
    }

    #[test]
    fn test_coordinate_display() {
        assert_eq!(Coordinate::new(-12.5, 77.0).to_string(), "-12.5,77");
    }

    #[test]
    fn test_elevations_completeness() {
        let mut elevations = CellElevations {
            elevations: HashMap::from([(630949280935159295, 151.216965)]),
            later: None,
            estimated_wait_time: None,
        };
        assert!(elevations.is_complete());
        assert_eq!(elevations.estimated_wait(), None);

        elevations.later = Some(vec![]);
        assert!(elevations.is_complete());

        elevations.later = Some(vec![630949280220393983]);
        elevations.estimated_wait_time = Some(30);
        assert!(!elevations.is_complete());
        assert_eq!(elevations.estimated_wait(), Some(Duration::from_secs(30)));

        let (map, later, wait) = elevations.into_parts();
        assert_eq!(map.len(), 1);
        assert_eq!(later, Some(vec![630949280220393983]));
        assert_eq!(wait, Some(30));
    }
}
