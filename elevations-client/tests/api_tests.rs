//! Integration tests for the HTTP client against a local mock API.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use elevations_client::{Coordinate, ElevationsClient, ElevationsClientBuilder, ElevationsError};
use h3o::Resolution;
use serde_json::{json, Value};

/// State shared with the mock API handler.
#[derive(Clone)]
struct MockState {
    status: StatusCode,
    response: Value,
    requests: Arc<Mutex<Vec<Value>>>,
}

/// A mock elevations API running on a background thread.
struct MockApi {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<Value>>>,
}

impl MockApi {
    fn start(response: Value) -> Self {
        Self::start_with_status(StatusCode::OK, response)
    }

    fn start_with_status(status: StatusCode, response: Value) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            status,
            response,
            requests: Arc::clone(&requests),
        };

        let (tx, rx) = std::sync::mpsc::channel();
        std::thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().unwrap();
            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
                tx.send(listener.local_addr().unwrap()).unwrap();

                let app = Router::new()
                    .route("/elevations-api", post(handle))
                    .with_state(state);
                axum::serve(listener, app).await.unwrap();
            });
        });

        let addr = rx.recv().unwrap();
        Self { addr, requests }
    }

    fn url(&self) -> String {
        format!("http://{}/elevations-api", self.addr)
    }

    fn client(&self) -> ElevationsClient {
        ElevationsClientBuilder::new()
            .api_url(self.url())
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap()
    }

    fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    fn last_request(&self) -> Value {
        self.requests.lock().unwrap().last().cloned().unwrap()
    }
}

async fn handle(State(state): State<MockState>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    state.requests.lock().unwrap().push(body);
    (state.status, Json(state.response.clone()))
}

#[test]
fn test_get_h3_cell_elevations() {
    let api = MockApi::start(json!({"data": {"elevations": {
        "630949280935159295": 151.216965,
        "630949280220393983": 180.708115
    }}}));

    let result = api
        .client()
        .get_h3_cell_elevations(&[630949280935159295, 630949280220393983])
        .unwrap();

    assert_eq!(
        result.elevations,
        HashMap::from([
            (630949280935159295, 151.216965),
            (630949280220393983, 180.708115),
        ])
    );
    assert!(result.later.is_none());
    assert!(result.estimated_wait_time.is_none());

    assert_eq!(api.calls(), 1);
    assert_eq!(
        api.last_request(),
        json!({"h3_cells": [630949280935159295u64, 630949280220393983u64]})
    );
}

#[test]
fn test_invalid_cells_make_no_request() {
    let api = MockApi::start(json!({}));
    let client = api.client();

    let err = client.get_h3_cell_elevations(&[]).unwrap_err();
    assert!(matches!(err, ElevationsError::EmptyInput { .. }));

    let err = client
        .get_h3_cell_elevations(&[630949280935159295, 1])
        .unwrap_err();
    assert!(matches!(err, ElevationsError::InvalidCell { .. }));

    assert_eq!(api.calls(), 0);
}

#[test]
fn test_get_coordinate_elevations() {
    let api = MockApi::start(json!({"data": {"elevations": {"[54.53097, 5.96836]": 0.0}}}));

    let result = api
        .client()
        .get_coordinate_elevations(&[[54.53097, 5.96836]], Resolution::Eleven)
        .unwrap();

    assert_eq!(
        result.elevations,
        HashMap::from([(Coordinate::new(54.53097, 5.96836), 0.0)])
    );
    assert!(result.later.is_none());
    assert_eq!(
        api.last_request(),
        json!({"coordinates": [[54.53097, 5.96836]], "resolution": 11})
    );
}

#[test]
fn test_invalid_coordinates_make_no_request() {
    let api = MockApi::start(json!({}));
    let client = api.client();

    let cases: [Vec<Vec<f64>>; 3] = [vec![], vec![vec![]], vec![vec![1.0, 2.0], vec![3.0]]];
    for coordinates in cases {
        let result = client.get_coordinate_elevations(&coordinates, Resolution::Twelve);
        assert!(result.unwrap_err().is_validation());
    }

    assert_eq!(api.calls(), 0);
}

#[test]
fn test_get_h3_cell_elevations_in_polygon() {
    let api = MockApi::start(json!({"data": {"elevations": {
        "622045820847718399": 0.0,
        "622045820847849471": 0.0,
        "622045848952471551": 0.0,
        "622045848952602623": 0.0
    }}}));

    let polygon = [
        [54.53097, 5.96836],
        [54.53075, 5.96435],
        [54.52926, 5.96432],
        [54.52903, 5.96888],
    ];
    let result = api
        .client()
        .get_h3_cell_elevations_in_polygon(&polygon, Resolution::Ten)
        .unwrap();

    assert_eq!(
        result.elevations,
        HashMap::from([
            (622045820847718399, 0.0),
            (622045820847849471, 0.0),
            (622045848952471551, 0.0),
            (622045848952602623, 0.0),
        ])
    );
    assert_eq!(api.calls(), 1);
}

#[test]
fn test_invalid_polygon_makes_no_request() {
    let api = MockApi::start(json!({}));
    let client = api.client();

    let cases: [Vec<Vec<f64>>; 3] = [vec![], vec![vec![]], vec![vec![1.0, 2.0], vec![3.0]]];
    for polygon in cases {
        let err = client
            .get_h3_cell_elevations_in_polygon(&polygon, Resolution::Twelve)
            .unwrap_err();
        assert!(matches!(err, ElevationsError::InvalidPolygon { .. }));
    }

    assert_eq!(api.calls(), 0);
}

#[test]
fn test_deferred_cells_passed_through() {
    let api = MockApi::start(json!({"data": {
        "elevations": {"630949280935159295": 151.216965},
        "later": [630949280220393983u64],
        "estimated_wait_time": 600
    }}));

    let result = api
        .client()
        .get_h3_cell_elevations(&[630949280935159295, 630949280220393983])
        .unwrap();

    assert_eq!(result.elevations.len(), 1);
    assert_eq!(result.later, Some(vec![630949280220393983]));
    assert_eq!(result.estimated_wait_time, Some(600));
    // Exactly one request, no polling
    assert_eq!(api.calls(), 1);
}

#[test]
fn test_server_error_is_request_error() {
    let api = MockApi::start_with_status(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({"error": "database unavailable"}),
    );

    let err = api
        .client()
        .get_h3_cell_elevations(&[630949280935159295])
        .unwrap_err();

    match err {
        ElevationsError::Request(e) => {
            assert_eq!(e.status(), Some(reqwest::StatusCode::INTERNAL_SERVER_ERROR))
        }
        other => panic!("Expected request error, got {other:?}"),
    }
    // No retries
    assert_eq!(api.calls(), 1);
}

#[test]
fn test_malformed_response_is_parse_error() {
    let api = MockApi::start(json!({"result": "ok"}));

    let err = api
        .client()
        .get_h3_cell_elevations(&[630949280935159295])
        .unwrap_err();

    assert!(matches!(err, ElevationsError::Parse(_)));
}

#[test]
fn test_unreachable_server_is_request_error() {
    let client = ElevationsClientBuilder::new()
        .api_url("http://127.0.0.1:1/elevations-api")
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap();

    let err = client.get_h3_cell_elevations(&[630949280935159295]).unwrap_err();
    assert!(matches!(err, ElevationsError::Request(_)));
    assert!(!err.is_validation());
}

/// Tests against the hosted API. Run with `cargo test -- --ignored`.
mod live {
    use super::*;

    #[test]
    #[ignore = "requires network access to the hosted API"]
    fn test_live_get_h3_cell_elevations() {
        let result =
            elevations_client::get_h3_cell_elevations(&[630949280935159295, 630949280220393983])
                .unwrap();
        assert_eq!(
            result.elevations,
            HashMap::from([
                (630949280935159295, 151.216965),
                (630949280220393983, 180.708115),
            ])
        );
        assert!(result.later.is_none());
        assert!(result.estimated_wait_time.is_none());
    }

    #[test]
    #[ignore = "requires network access to the hosted API"]
    fn test_live_get_coordinate_elevations() {
        let result =
            elevations_client::get_coordinate_elevations(&[[54.53097, 5.96836]], Resolution::Eleven)
                .unwrap();
        assert_eq!(
            result.elevations,
            HashMap::from([(Coordinate::new(54.53097, 5.96836), 0.0)])
        );
    }

    #[test]
    #[ignore = "requires network access to the hosted API"]
    fn test_live_get_h3_cell_elevations_in_polygon() {
        let polygon = [
            [54.53097, 5.96836],
            [54.53075, 5.96435],
            [54.52926, 5.96432],
            [54.52903, 5.96888],
        ];
        let result =
            elevations_client::get_h3_cell_elevations_in_polygon(&polygon, Resolution::Ten)
                .unwrap();
        assert_eq!(
            result.elevations,
            HashMap::from([
                (622045820847718399, 0.0),
                (622045820847849471, 0.0),
                (622045848952471551, 0.0),
                (622045848952602623, 0.0),
            ])
        );
    }
}
