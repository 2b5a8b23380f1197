//! Request payloads and response decoding.
//!
//! Every endpoint answers with the same envelope:
//!
//! ```json
//! {"data": {"elevations": {"<key>": 12.5}, "later": [...], "estimated_wait_time": 30}}
//! ```
//!
//! Response keys are strings: decimal cell indexes for cell requests and
//! JSON-encoded `[lat, lng]` arrays for coordinate requests. A `null`
//! elevation means the service has no value for that identifier; such
//! entries are left out of the decoded map.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{ElevationsError, Result};
use crate::types::{CellElevations, Coordinate, CoordinateElevations, Elevations};

/// Body of a cell elevations request.
#[derive(Debug, Serialize)]
pub(crate) struct CellsRequest<'a> {
    pub h3_cells: &'a [u64],
}

/// Body of a coordinate elevations request.
#[derive(Debug, Serialize)]
pub(crate) struct CoordinatesRequest<'a> {
    pub coordinates: &'a [Coordinate],
    pub resolution: u8,
}

#[derive(Debug, Deserialize)]
struct Envelope<L> {
    data: Data<L>,
}

#[derive(Debug, Deserialize)]
struct Data<L> {
    elevations: HashMap<String, Option<f64>>,
    later: Option<Vec<L>>,
    estimated_wait_time: Option<u64>,
}

/// Decode the response to a cell elevations request.
pub fn parse_cell_elevations(body: &str) -> Result<CellElevations> {
    decode(body, |key| {
        key.parse::<u64>()
            .map_err(|e| format!("cell index key {key:?}: {e}"))
    })
}

/// Decode the response to a coordinate elevations request.
pub fn parse_coordinate_elevations(body: &str) -> Result<CoordinateElevations> {
    decode(body, |key| {
        serde_json::from_str::<Coordinate>(key)
            .map_err(|e| format!("coordinate key {key:?}: {e}"))
    })
}

fn decode<K, F>(body: &str, parse_key: F) -> Result<Elevations<K>>
where
    K: DeserializeOwned + Eq + std::hash::Hash,
    F: Fn(&str) -> std::result::Result<K, String>,
{
    let Envelope { data } = serde_json::from_str::<Envelope<K>>(body)?;

    let received = data.elevations.len();
    let mut elevations = HashMap::with_capacity(received);
    for (key, elevation) in data.elevations {
        let key = parse_key(&key).map_err(|message| ElevationsError::InvalidResponse { message })?;
        if let Some(elevation) = elevation {
            elevations.insert(key, elevation);
        }
    }
    if elevations.len() < received {
        tracing::warn!(
            missing = received - elevations.len(),
            "Response contains identifiers without an elevation"
        );
    }

    if let Some(later) = data.later.as_ref().filter(|later| !later.is_empty()) {
        tracing::info!(
            deferred = later.len(),
            estimated_wait_time = data.estimated_wait_time,
            "Some elevations are not available yet"
        );
    }

    Ok(Elevations {
        elevations,
        later: data.later,
        estimated_wait_time: data.estimated_wait_time,
    })
}
