// Handlers for the route dashboard API
// All state goes through the shared RouteStore; handlers never touch routes directly

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::Value;

use crate::{
    AppState,
    error::{LoadError, ResolveError, RouteError},
    geometry::route_distance,
    gpx_export::encode_route_as_gpx,
    loader::build_collection,
    models::{
        ApiError, DistanceMetrics, GpxResponse, HighlightRequest, HighlightView, NormalizeResponse,
        Route, RouteSummary,
    },
    normalize::normalize_route,
    resolve::RouteIdentifier,
};

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

/// GET /api/routes - Summaries of the loaded routes, empty before the first load
pub async fn list_routes(State(state): State<AppState>) -> Json<Vec<RouteSummary>> {
    let summaries = state
        .store
        .snapshot()
        .map(|collection| collection.summaries())
        .unwrap_or_default();
    Json(summaries)
}

/// GET /api/routes/:identifier - Index, id or partial name
pub async fn get_route(
    State(state): State<AppState>,
    Path(identifier): Path<String>,
) -> ApiResult<Route> {
    state
        .store
        .resolve(&RouteIdentifier::from(identifier))
        .map(Json)
        .map_err(resolve_error)
}

/// GET /api/routes/:identifier/metrics
pub async fn route_metrics(
    State(state): State<AppState>,
    Path(identifier): Path<String>,
) -> ApiResult<DistanceMetrics> {
    let route = state
        .store
        .resolve(&RouteIdentifier::from(identifier))
        .map_err(resolve_error)?;
    Ok(Json(route_distance(&route.waypoints)))
}

/// GET /api/routes/:identifier/gpx
pub async fn route_gpx(
    State(state): State<AppState>,
    Path(identifier): Path<String>,
) -> ApiResult<GpxResponse> {
    let route = state
        .store
        .resolve(&RouteIdentifier::from(identifier))
        .map_err(resolve_error)?;
    let gpx_base64 = encode_route_as_gpx(&route).map_err(route_error)?;
    Ok(Json(GpxResponse {
        route_id: route.id,
        gpx_base64,
    }))
}

/// POST /api/normalize - Normalize one raw route payload without storing it
pub async fn normalize(Json(raw): Json<Value>) -> Json<NormalizeResponse> {
    let normalized = normalize_route(&raw);
    let metrics = route_distance(&normalized.waypoints);
    Json(NormalizeResponse {
        displayable: normalized.is_displayable(),
        dropped: normalized.dropped,
        source: normalized.source,
        waypoints: normalized.waypoints,
        metrics,
    })
}

/// POST /api/routes/reload - Replace the whole collection with a new payload
pub async fn reload_routes(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> ApiResult<Vec<RouteSummary>> {
    let collection = build_collection(&payload).map_err(|err| route_error(err.into()))?;
    let summaries = collection.summaries();
    state.store.replace(collection);
    Ok(Json(summaries))
}

/// GET /api/highlight
pub async fn get_highlight(State(state): State<AppState>) -> Json<HighlightView> {
    Json(state.store.highlight_view())
}

/// POST /api/highlight - Highlight exactly one route and centre the map on it
pub async fn set_highlight(
    State(state): State<AppState>,
    Json(req): Json<HighlightRequest>,
) -> ApiResult<HighlightView> {
    let identifier = RouteIdentifier::from_json(&req.identifier).map_err(resolve_error)?;
    state
        .store
        .highlight(&identifier)
        .map(Json)
        .map_err(resolve_error)
}

/// DELETE /api/highlight
pub async fn clear_highlight(State(state): State<AppState>) -> Json<HighlightView> {
    Json(state.store.clear_highlight())
}

fn resolve_error(err: ResolveError) -> (StatusCode, Json<ApiError>) {
    let status = match err {
        ResolveError::NotFound(_) => StatusCode::NOT_FOUND,
        ResolveError::InvalidIdentifierType(_) => StatusCode::BAD_REQUEST,
    };
    (
        status,
        Json(ApiError {
            message: err.to_string(),
        }),
    )
}

fn route_error(err: RouteError) -> (StatusCode, Json<ApiError>) {
    let status = match &err {
        RouteError::Load(LoadError::UnexpectedPayload(_) | LoadError::Parse(_)) => {
            StatusCode::BAD_REQUEST
        }
        RouteError::Load(LoadError::Http(_)) => StatusCode::BAD_GATEWAY,
        RouteError::Load(LoadError::Io(_)) | RouteError::Gpx(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    tracing::warn!("request failed: {}", err);
    (
        status,
        Json(ApiError {
            message: err.to_string(),
        }),
    )
}
