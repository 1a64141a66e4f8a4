use serde::{Deserialize, Serialize};
pub use shared::{
    ApiError, DistanceMetrics, HighlightView, Leg, Route, RouteBounds, RouteStyle, RouteSummary,
    Waypoint,
};

use crate::normalize::SourceKind;

/// Routes of one data load, in load order. Never patched in place: a refresh
/// builds a new collection and swaps it in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteCollection {
    routes: Vec<Route>,
}

impl RouteCollection {
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn get(&self, index: usize) -> Option<&Route> {
        self.routes.get(index)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn summaries(&self) -> Vec<RouteSummary> {
        self.routes.iter().map(Route::summary).collect()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NormalizeResponse {
    pub waypoints: Vec<Waypoint>,
    pub dropped: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceKind>,
    pub displayable: bool,
    pub metrics: DistanceMetrics,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HighlightRequest {
    pub identifier: serde_json::Value,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GpxResponse {
    pub route_id: String,
    pub gpx_base64: String,
}
