use serde::{Deserialize, Serialize};

/// A single navigational point of a route, as produced by normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub lat: f64,
    pub lon: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// 0-based position in the normalized sequence.
    pub sequence: usize,
}

impl Waypoint {
    /// Display label, `WP<n>` (1-based) when the waypoint carries no name.
    pub fn label(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("WP{}", self.sequence + 1))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub id: String,
    pub index: usize,
    pub name: String,
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub destination: String,
    pub waypoints: Vec<Waypoint>,
    pub total_distance_nm: f64,
}

impl Route {
    pub fn is_displayable(&self) -> bool {
        self.waypoints.len() >= 2
    }

    pub fn summary(&self) -> RouteSummary {
        RouteSummary {
            id: self.id.clone(),
            index: self.index,
            name: self.name.clone(),
            origin: self.origin.clone(),
            destination: self.destination.clone(),
            waypoint_count: self.waypoints.len(),
            total_distance_nm: self.total_distance_nm,
            displayable: self.is_displayable(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSummary {
    pub id: String,
    pub index: usize,
    pub name: String,
    pub origin: String,
    pub destination: String,
    pub waypoint_count: usize,
    pub total_distance_nm: f64,
    pub displayable: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Leg {
    pub from_index: usize,
    pub to_index: usize,
    pub distance_km: f64,
    pub distance_nm: f64,
    pub bearing_degrees: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DistanceMetrics {
    pub total_km: f64,
    pub total_nm: f64,
    pub average_leg_nm: f64,
    pub legs: Vec<Leg>,
}

/// Visual style of one route polyline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteStyle {
    pub color: String,
    pub weight: f64,
    pub opacity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dash_array: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighlightView {
    pub highlighted: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_id: Option<String>,
    pub styles: Vec<RouteStyle>,
    /// Last view-centering request sent to the map.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view: Option<RouteBounds>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub message: String,
}
