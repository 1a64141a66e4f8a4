//! Great-circle math over normalized waypoints.
//!
//! Spherical earth model, double precision throughout. The routes served here
//! stay inside the Norwegian coastal box so antipodal points and pole
//! crossings are not special-cased.

use serde::Serialize;

use crate::models::{DistanceMetrics, Leg, RouteBounds, Waypoint};

pub const EARTH_RADIUS_KM: f64 = 6_371.0;
pub const KM_PER_NM: f64 = 1.852;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Distance {
    pub km: f64,
    pub nm: f64,
}

pub fn haversine_km(a: &Waypoint, b: &Waypoint) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = (b.lat - a.lat).to_radians();
    let dlon = (b.lon - a.lon).to_radians();

    let sin_dlat = (dlat / 2.0).sin();
    let sin_dlon = (dlon / 2.0).sin();

    let h = sin_dlat * sin_dlat + lat1.cos() * lat2.cos() * sin_dlon * sin_dlon;
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

pub fn great_circle_distance(a: &Waypoint, b: &Waypoint) -> Distance {
    let km = haversine_km(a, b);
    Distance {
        km,
        nm: km / KM_PER_NM,
    }
}

/// Forward azimuth from `a` towards `b`, in degrees within `[0, 360)`,
/// rounded to 2 decimals.
pub fn initial_bearing(a: &Waypoint, b: &Waypoint) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlon = (b.lon - a.lon).to_radians();

    let y = dlon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlon.cos();

    let degrees = y.atan2(x).to_degrees().rem_euclid(360.0);
    let rounded = (degrees * 100.0).round() / 100.0;
    if rounded >= 360.0 { 0.0 } else { rounded }
}

/// Sums consecutive legs. Fewer than 2 waypoints yields zero totals and no
/// legs.
pub fn route_distance(waypoints: &[Waypoint]) -> DistanceMetrics {
    let legs: Vec<Leg> = waypoints
        .windows(2)
        .enumerate()
        .map(|(i, pair)| {
            let distance = great_circle_distance(&pair[0], &pair[1]);
            Leg {
                from_index: i,
                to_index: i + 1,
                distance_km: distance.km,
                distance_nm: distance.nm,
                bearing_degrees: initial_bearing(&pair[0], &pair[1]),
            }
        })
        .collect();

    let total_km: f64 = legs.iter().map(|leg| leg.distance_km).sum();
    let total_nm = total_km / KM_PER_NM;
    let average_leg_nm = if legs.is_empty() {
        0.0
    } else {
        total_nm / legs.len() as f64
    };

    DistanceMetrics {
        total_km,
        total_nm,
        average_leg_nm,
        legs,
    }
}

pub fn route_bounds(waypoints: &[Waypoint]) -> Option<RouteBounds> {
    let first = waypoints.first()?;
    let seed = RouteBounds {
        min_lat: first.lat,
        max_lat: first.lat,
        min_lon: first.lon,
        max_lon: first.lon,
    };
    Some(waypoints.iter().skip(1).fold(seed, |bounds, wp| RouteBounds {
        min_lat: bounds.min_lat.min(wp.lat),
        max_lat: bounds.max_lat.max(wp.lat),
        min_lon: bounds.min_lon.min(wp.lon),
        max_lon: bounds.max_lon.max(wp.lon),
    }))
}
