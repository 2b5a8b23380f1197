//! Elevations API client.
//!
//! [`ElevationsClient`] validates its input, posts a single JSON request and
//! decodes the response. Nothing is retried or cached, and identifiers the
//! service defers are returned to the caller rather than polled for.
//!
//! ```ignore
//! use elevations_client::ElevationsClientBuilder;
//! use std::time::Duration;
//!
//! let client = ElevationsClientBuilder::from_env()?
//!     .timeout(Duration::from_secs(60))
//!     .build()?;
//!
//! let result = client.get_h3_cell_elevations(&[630949280935159295])?;
//! if !result.is_complete() {
//!     println!("Try again in {:?}", result.estimated_wait());
//! }
//! ```

use std::fmt;
use std::time::Duration;

use h3o::Resolution;

use crate::config::ClientConfig;
use crate::error::{ElevationsError, Result};
use crate::polygon::polygon_to_cells;
use crate::response::{
    parse_cell_elevations, parse_coordinate_elevations, CellsRequest, CoordinatesRequest,
};
use crate::transport::{HttpTransport, Transport};
use crate::types::{CellElevations, CoordinateElevations};
use crate::validate::{validate_cells, validate_coordinates, validate_polygon};

/// Resolution used for coordinate and polygon requests when none is given.
pub const DEFAULT_RESOLUTION: Resolution = Resolution::Twelve;

/// Client for the elevations API.
///
/// Each request method makes exactly one HTTP request, and none at all when
/// the input fails validation.
pub struct ElevationsClient {
    config: ClientConfig,
    transport: Box<dyn Transport>,
}

impl fmt::Debug for ElevationsClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElevationsClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ElevationsClient {
    /// Create a client with the default configuration.
    pub fn new() -> Result<Self> {
        ElevationsClientBuilder::new().build()
    }

    /// Create a builder for configuring a client.
    pub fn builder() -> ElevationsClientBuilder {
        ElevationsClientBuilder::new()
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the elevations of the given H3 cells.
    ///
    /// The service loads its data lazily: cells whose elevations aren't
    /// available yet are returned in [`later`](crate::Elevations::later)
    /// along with an estimated wait time.
    ///
    /// # Errors
    ///
    /// - [`ElevationsError::EmptyInput`] if `cells` is empty
    /// - [`ElevationsError::InvalidCell`] if any index isn't a valid H3 cell
    /// - [`ElevationsError::Request`] / [`ElevationsError::Parse`] if the request fails
    pub fn get_h3_cell_elevations(&self, cells: &[u64]) -> Result<CellElevations> {
        validate_cells(cells)?;

        tracing::debug!(
            url = %self.config.api_url,
            cells = cells.len(),
            "Requesting H3 cell elevations"
        );

        let body = serde_json::to_value(CellsRequest { h3_cells: cells })?;
        let response = self.transport.post_json(&self.config.api_url, &body)?;
        parse_cell_elevations(&response)
    }

    /// Get the elevations of latitude/longitude coordinates.
    ///
    /// Each coordinate is given as a `[lat, lng]` pair in decimal degrees.
    /// `resolution` is the H3 resolution the elevations are looked up at.
    ///
    /// # Errors
    ///
    /// - [`ElevationsError::EmptyInput`] if `coordinates` is empty
    /// - [`ElevationsError::InvalidCoordinate`] if any entry isn't a valid pair
    /// - [`ElevationsError::Request`] / [`ElevationsError::Parse`] if the request fails
    ///
    /// # Example
    ///
    /// ```ignore
    /// use elevations_client::{ElevationsClient, Coordinate};
    /// use h3o::Resolution;
    ///
    /// let client = ElevationsClient::new()?;
    /// let result = client.get_coordinate_elevations(&[[54.53097, 5.96836]], Resolution::Eleven)?;
    /// println!("{:?}", result.elevations.get(&Coordinate::new(54.53097, 5.96836)));
    /// ```
    pub fn get_coordinate_elevations<C: AsRef<[f64]>>(
        &self,
        coordinates: &[C],
        resolution: Resolution,
    ) -> Result<CoordinateElevations> {
        let coordinates = validate_coordinates(coordinates)?;

        tracing::debug!(
            url = %self.config.api_url,
            coordinates = coordinates.len(),
            resolution = u8::from(resolution),
            "Requesting coordinate elevations"
        );

        let body = serde_json::to_value(CoordinatesRequest {
            coordinates: &coordinates,
            resolution: u8::from(resolution),
        })?;
        let response = self.transport.post_json(&self.config.api_url, &body)?;
        parse_coordinate_elevations(&response)
    }

    /// Get the elevations of the H3 cells inside a polygon.
    ///
    /// `polygon` is the exterior ring as `[lat, lng]` vertices. It's converted
    /// to the cells whose centroids lie inside it at `resolution`, which are
    /// then requested as in [`get_h3_cell_elevations`](Self::get_h3_cell_elevations).
    ///
    /// # Errors
    ///
    /// - [`ElevationsError::InvalidPolygon`] if the polygon has fewer than
    ///   three vertices or any vertex isn't a valid pair
    /// - [`ElevationsError::NoCellsInPolygon`] if no cell centroid lies inside
    /// - [`ElevationsError::Request`] / [`ElevationsError::Parse`] if the request fails
    pub fn get_h3_cell_elevations_in_polygon<C: AsRef<[f64]>>(
        &self,
        polygon: &[C],
        resolution: Resolution,
    ) -> Result<CellElevations> {
        let vertices = validate_polygon(polygon)?;
        let cells = polygon_to_cells(&vertices, resolution)?;
        if cells.is_empty() {
            return Err(ElevationsError::NoCellsInPolygon { resolution });
        }

        self.get_h3_cell_elevations(&cells)
    }
}

/// Builder for [`ElevationsClient`].
///
/// # Example
///
/// ```
/// use elevations_client::ElevationsClientBuilder;
/// use std::time::Duration;
///
/// let client = ElevationsClientBuilder::new()
///     .api_url("http://localhost:8080/elevations")
///     .timeout(Duration::from_secs(30))
///     .build()?;
/// assert_eq!(client.config().api_url, "http://localhost:8080/elevations");
/// # Ok::<(), elevations_client::ElevationsError>(())
/// ```
#[derive(Default)]
pub struct ElevationsClientBuilder {
    config: ClientConfig,
    transport: Option<Box<dyn Transport>>,
}

impl ElevationsClientBuilder {
    /// Create a builder with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder configured from environment variables.
    ///
    /// See [`config`](crate::config) for the variables read.
    pub fn from_env() -> Result<Self> {
        Ok(Self::from_config(ClientConfig::from_env()?))
    }

    /// Create a builder from an existing configuration.
    pub fn from_config(config: ClientConfig) -> Self {
        Self {
            config,
            transport: None,
        }
    }

    /// Set the URL requests are posted to.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_url = url.into();
        self
    }

    /// Set a request timeout. By default requests wait indefinitely.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Set the `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Use a custom transport instead of [`HttpTransport`].
    ///
    /// Timeout and user agent settings only apply to the default transport.
    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Box::new(transport));
        self
    }

    /// Build the [`ElevationsClient`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// can't be created (e.g. due to TLS initialization failure).
    pub fn build(self) -> Result<ElevationsClient> {
        self.config.validate()?;

        let transport = match self.transport {
            Some(transport) => transport,
            None => Box::new(HttpTransport::new(&self.config)?),
        };

        Ok(ElevationsClient {
            config: self.config,
            transport,
        })
    }
}
