//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use serde::de::DeserializeOwned;
use tracing::{debug, error, warn};

use crate::domain::NetworkError;
use crate::graph::{Route, StopDetail};
use crate::loader::NetworkSpec;
use crate::network::TransitNetwork;
use crate::planner::Connectivity;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/network", put(build_network))
        .route("/routes", post(insert_route))
        .route("/routes/:from/:to", delete(delete_route))
        .route("/routes/distance", get(shortest_distance))
        .route("/routes/fare", get(min_fare))
        .route("/routes/k-best", get(k_best_paths))
        .route("/routes/transfers", get(min_transfers))
        .route("/stops", get(list_stops))
        .route("/stops/:id", get(stop_detail))
        .route("/connectivity", get(connectivity))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Replace the whole network.
async fn build_network(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<BuildNetworkResponse>, AppError> {
    let spec: NetworkSpec = parse_body(&body)?;
    let mut network = state.write()?;
    let summary = network.build(spec.stop_count, &spec.routes)?;
    Ok(Json(BuildNetworkResponse::new(spec.stop_count, summary)))
}

/// Shortest path by distance.
async fn shortest_distance(
    State(state): State<AppState>,
    Query(query): Query<StopPairQuery>,
) -> Result<Json<ItineraryResult>, AppError> {
    let itinerary = run_query(state, move |network| {
        let from = network.stop(query.from)?;
        let to = network.stop(query.to)?;
        Ok(network.shortest_distance(from, to)?)
    })
    .await?;
    Ok(Json(itinerary.into()))
}

/// Cheapest path by fare.
async fn min_fare(
    State(state): State<AppState>,
    Query(query): Query<StopPairQuery>,
) -> Result<Json<ItineraryResult>, AppError> {
    let itinerary = run_query(state, move |network| {
        let from = network.stop(query.from)?;
        let to = network.stop(query.to)?;
        Ok(network.min_fare(from, to)?)
    })
    .await?;
    Ok(Json(itinerary.into()))
}

/// Lengths of the k shortest walks.
async fn k_best_paths(
    State(state): State<AppState>,
    Query(query): Query<KBestQuery>,
) -> Result<Json<KBestResponse>, AppError> {
    let lengths = run_query(state, move |network| {
        let limit = network.config().max_k_paths;
        if query.k > limit {
            return Err(AppError::BadRequest {
                message: format!("k must be at most {limit}, got {}", query.k),
            });
        }
        let from = network.stop(query.from)?;
        let to = network.stop(query.to)?;
        Ok(network.k_best_paths(from, to, query.k)?)
    })
    .await?;
    Ok(Json(KBestResponse { lengths }))
}

/// Path with the fewest transfers.
async fn min_transfers(
    State(state): State<AppState>,
    Query(query): Query<StopPairQuery>,
) -> Result<Json<TransferResult>, AppError> {
    let route = run_query(state, move |network| {
        let from = network.stop(query.from)?;
        let to = network.stop(query.to)?;
        Ok(network.min_transfers(from, to)?)
    })
    .await?;
    Ok(Json(route.into()))
}

/// Open a new route.
async fn insert_route(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<StatusCode, AppError> {
    let req: InsertRouteRequest = parse_body(&body)?;
    let mut network = state.write()?;
    let from = network.stop(req.from)?;
    let to = network.stop(req.to)?;
    network.insert_route(Route::new(from, to, req.cost, req.distance))?;
    Ok(StatusCode::CREATED)
}

/// Close a route.
async fn delete_route(
    State(state): State<AppState>,
    Path((from, to)): Path<(u32, u32)>,
) -> Result<StatusCode, AppError> {
    let mut network = state.write()?;
    let from = network.stop(from)?;
    let to = network.stop(to)?;
    network.delete_route(from, to)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Every active stop with its routes.
async fn list_stops(State(state): State<AppState>) -> Result<Json<StopListResponse>, AppError> {
    let network = state.read()?;
    Ok(Json(StopListResponse {
        stops: network.stops(),
    }))
}

/// One stop with its routes.
async fn stop_detail(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<StopDetail>, AppError> {
    let network = state.read()?;
    let stop = network.stop(id)?;
    Ok(Json(network.stop_detail(stop)?))
}

/// Components, or the tour weight when connected.
async fn connectivity(State(state): State<AppState>) -> Result<Json<Connectivity>, AppError> {
    let report = run_query(state, |network| Ok(network.connectivity())).await?;
    Ok(Json(report))
}

/// Run a read-only search on the blocking pool, under the shared lock.
async fn run_query<T, F>(state: AppState, search: F) -> Result<T, AppError>
where
    T: Send + 'static,
    F: FnOnce(&TransitNetwork) -> Result<T, AppError> + Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let network = state.read()?;
        search(&network)
    })
    .await
    .map_err(|e| AppError::Internal {
        message: format!("query task failed: {e}"),
    })?
}

/// Parse a JSON body, logging it on failure.
fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, AppError> {
    serde_json::from_slice(body).map_err(|e| {
        debug!(body = %String::from_utf8_lossy(body), "rejected request body");
        AppError::BadRequest {
            message: format!("invalid JSON: {e}"),
        }
    })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Conflict { message: String },
    Unprocessable { message: String },
    Internal { message: String },
}

impl From<NetworkError> for AppError {
    fn from(e: NetworkError) -> Self {
        let message = e.to_string();
        match e {
            NetworkError::InvalidStop { .. }
            | NetworkError::SelfLoop(_)
            | NetworkError::WeightTooLarge { .. }
            | NetworkError::CapacityExceeded { .. } => AppError::BadRequest { message },
            NetworkError::EdgeNotFound { .. } | NetworkError::InactiveStop(_) => {
                AppError::NotFound { message }
            }
            NetworkError::EdgeExists { .. } => AppError::Conflict { message },
            NetworkError::Unreachable { .. } | NetworkError::InsufficientPaths { .. } => {
                AppError::Unprocessable { message }
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Conflict { message } => (StatusCode::CONFLICT, message),
            AppError::Unprocessable { message } => (StatusCode::UNPROCESSABLE_ENTITY, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, "{message}");
        } else {
            warn!(%status, "{message}");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::EngineConfig;

    const SAMPLE: &str = r#"{
        "stop_count": 9,
        "routes": [
            {"from": 1, "to": 2, "cost": 2, "distance": 3},
            {"from": 1, "to": 4, "cost": 1, "distance": 4},
            {"from": 2, "to": 6, "cost": 3, "distance": 7},
            {"from": 4, "to": 6, "cost": 6, "distance": 9},
            {"from": 5, "to": 3, "cost": 11, "distance": 12},
            {"from": 2, "to": 7, "cost": 17, "distance": 21},
            {"from": 3, "to": 7, "cost": 100, "distance": 100},
            {"from": 8, "to": 9, "cost": 0, "distance": 0}
        ]
    }"#;

    async fn sample_state() -> AppState {
        let state = AppState::new(TransitNetwork::new(EngineConfig::new(100, 5)));
        build_network(State(state.clone()), Bytes::from_static(SAMPLE.as_bytes()))
            .await
            .unwrap();
        state
    }

    fn pair(from: u32, to: u32) -> Query<StopPairQuery> {
        Query(StopPairQuery { from, to })
    }

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[tokio::test]
    async fn health_is_ok() {
        assert_eq!(health().await, "ok");
    }

    #[tokio::test]
    async fn build_reports_summary() {
        let state = AppState::new(TransitNetwork::default());
        let Json(summary) = build_network(
            State(state),
            Bytes::from_static(
                br#"{"stop_count": 3, "routes": [
                    {"from": 1, "to": 2, "cost": 1, "distance": 1},
                    {"from": 2, "to": 2, "cost": 1, "distance": 1},
                    {"from": 2, "to": 1, "cost": 5, "distance": 5}
                ]}"#,
            ),
        )
        .await
        .unwrap();
        assert_eq!(summary.stop_count, 3);
        assert_eq!(summary.routes, 1);
        assert_eq!(summary.overwritten, 1);
        assert_eq!(summary.self_loops, 1);
    }

    #[tokio::test]
    async fn malformed_body_is_bad_request() {
        let state = AppState::new(TransitNetwork::default());
        let err = build_network(State(state), Bytes::from_static(b"{\"stop_count\":"))
            .await
            .unwrap_err();
        assert_eq!(status_of(err), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn distance_and_fare_queries() {
        let state = sample_state().await;

        let Json(by_distance) = shortest_distance(State(state.clone()), pair(1, 6))
            .await
            .unwrap();
        assert_eq!(by_distance.weight, 10);

        let Json(by_fare) = min_fare(State(state), pair(1, 6)).await.unwrap();
        assert_eq!(by_fare.weight, 5);
    }

    #[tokio::test]
    async fn unreachable_is_unprocessable() {
        let state = sample_state().await;
        let err = shortest_distance(State(state), pair(1, 9)).await.unwrap_err();
        assert_eq!(status_of(err), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn unknown_stop_is_bad_request() {
        let state = sample_state().await;
        let err = min_transfers(State(state.clone()), pair(0, 3)).await.unwrap_err();
        assert_eq!(status_of(err), StatusCode::BAD_REQUEST);
        let err = min_fare(State(state), pair(1, 10)).await.unwrap_err();
        assert_eq!(status_of(err), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn k_best_respects_limit() {
        let state = sample_state().await;
        let Json(response) = k_best_paths(
            State(state.clone()),
            Query(KBestQuery {
                from: 1,
                to: 6,
                k: 3,
            }),
        )
        .await
        .unwrap();
        assert_eq!(response.lengths, vec![10, 13, 16]);

        let err = k_best_paths(
            State(state),
            Query(KBestQuery {
                from: 1,
                to: 6,
                k: 6,
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(status_of(err), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn insert_and_delete_routes() {
        let state = sample_state().await;

        let created = insert_route(
            State(state.clone()),
            Bytes::from_static(br#"{"from": 7, "to": 8, "cost": 1, "distance": 2}"#),
        )
        .await
        .unwrap();
        assert_eq!(created, StatusCode::CREATED);

        let err = insert_route(
            State(state.clone()),
            Bytes::from_static(br#"{"from": 8, "to": 7, "cost": 1, "distance": 2}"#),
        )
        .await
        .unwrap_err();
        assert_eq!(status_of(err), StatusCode::CONFLICT);

        let Json(result) = min_transfers(State(state.clone()), pair(1, 9)).await.unwrap();
        assert_eq!(result.hops, 4);

        let removed = delete_route(State(state.clone()), Path((8, 7))).await.unwrap();
        assert_eq!(removed, StatusCode::NO_CONTENT);

        let err = delete_route(State(state), Path((8, 7))).await.unwrap_err();
        assert_eq!(status_of(err), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn oversized_weight_is_bad_request() {
        let state = sample_state().await;
        let err = insert_route(
            State(state.clone()),
            Bytes::from_static(br#"{"from": 7, "to": 8, "cost": 1, "distance": 9223372036854775809}"#),
        )
        .await
        .unwrap_err();
        assert_eq!(status_of(err), StatusCode::BAD_REQUEST);

        let err = min_transfers(State(state), pair(7, 8)).await.unwrap_err();
        assert_eq!(status_of(err), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn stops_and_detail() {
        let state = sample_state().await;
        let Json(listing) = list_stops(State(state.clone())).await.unwrap();
        assert_eq!(listing.stops.len(), 9);

        let Json(detail) = stop_detail(State(state.clone()), Path(7)).await.unwrap();
        assert_eq!(detail.neighbors.len(), 2);

        delete_route(State(state.clone()), Path((8, 9))).await.unwrap();
        let err = stop_detail(State(state), Path(8)).await.unwrap_err();
        assert_eq!(status_of(err), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn connectivity_reports_components() {
        let state = sample_state().await;
        let Json(report) = connectivity(State(state)).await.unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["status"], "fragmented");
        assert_eq!(json["components"].as_array().unwrap().len(), 2);
    }
}
