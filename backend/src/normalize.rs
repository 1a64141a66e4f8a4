//! Turns route payloads of any supported shape into an ordered waypoint
//! sequence.
//!
//! Supported shapes:
//! - array of objects with `lat`/`lon` (or `latitude`/`longitude`, `lng`)
//! - array of `[lon, lat]` pairs, GeoJSON axis order
//! - object with `geometry.coordinates`
//! - object with `path`
//!
//! An object is probed `waypoints`, then `geometry.coordinates`, then `path`.
//! The first source with at least one parseable entry wins; sources are never
//! merged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    error::GeometryError,
    geometry::route_distance,
    models::{Route, Waypoint},
    resolve::synthetic_route_id,
};

pub const MIN_LAT: f64 = 55.0;
pub const MAX_LAT: f64 = 72.0;
pub const MIN_LON: f64 = 0.0;
pub const MAX_LON: f64 = 32.0;

const LAT_KEYS: [&str; 2] = ["lat", "latitude"];
const LON_KEYS: [&str; 3] = ["lon", "lng", "longitude"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    ArrayOfObjects,
    ArrayOfPairs,
    GeoJsonGeometry,
    PathArray,
}

/// One candidate geometry source found in a payload.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteSource<'a> {
    ArrayOfObjects(Vec<&'a Value>),
    ArrayOfPairs(Vec<&'a Value>),
    GeoJsonGeometry(Vec<&'a Value>),
    PathArray(Vec<&'a Value>),
}

impl<'a> RouteSource<'a> {
    pub fn kind(&self) -> SourceKind {
        match self {
            RouteSource::ArrayOfObjects(_) => SourceKind::ArrayOfObjects,
            RouteSource::ArrayOfPairs(_) => SourceKind::ArrayOfPairs,
            RouteSource::GeoJsonGeometry(_) => SourceKind::GeoJsonGeometry,
            RouteSource::PathArray(_) => SourceKind::PathArray,
        }
    }

    pub fn entries(&self) -> &[&'a Value] {
        match self {
            RouteSource::ArrayOfObjects(entries)
            | RouteSource::ArrayOfPairs(entries)
            | RouteSource::GeoJsonGeometry(entries)
            | RouteSource::PathArray(entries) => entries,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct NormalizedRoute {
    pub waypoints: Vec<Waypoint>,
    /// Entries of the winning source that failed parsing or the bounds check.
    pub dropped: usize,
    pub source: Option<SourceKind>,
}

impl NormalizedRoute {
    pub fn is_displayable(&self) -> bool {
        self.waypoints.len() >= 2
    }

    pub fn geometry(&self) -> Result<&[Waypoint], GeometryError> {
        if self.is_displayable() {
            Ok(&self.waypoints)
        } else {
            Err(GeometryError::InsufficientGeometry {
                count: self.waypoints.len(),
            })
        }
    }
}

/// Lists the geometry sources of `raw` in the order they are tried.
pub fn classify(raw: &Value) -> Vec<RouteSource<'_>> {
    match raw {
        Value::Array(items) => classify_items(items.iter().collect())
            .into_iter()
            .collect(),
        Value::Object(map) => {
            let mut candidates = Vec::new();
            if let Some(entries) = map.get("waypoints").and_then(sequence_entries) {
                candidates.extend(classify_items(entries));
            }
            if let Some(Value::Array(coords)) =
                map.get("geometry").and_then(|geometry| geometry.get("coordinates"))
            {
                candidates.push(RouteSource::GeoJsonGeometry(coords.iter().collect()));
            }
            if let Some(entries) = map.get("path").and_then(sequence_entries) {
                candidates.push(RouteSource::PathArray(entries));
            }
            candidates
        }
        _ => Vec::new(),
    }
}

pub fn normalize_route(raw: &Value) -> NormalizedRoute {
    for source in classify(raw) {
        let parsed: Vec<Option<Candidate>> = source.entries().iter().map(|e| parse_entry(e)).collect();
        if parsed.iter().all(Option::is_none) {
            continue;
        }

        let total = parsed.len();
        let waypoints: Vec<Waypoint> = parsed
            .into_iter()
            .flatten()
            .filter(Candidate::in_bounds)
            .enumerate()
            .map(|(sequence, candidate)| candidate.into_waypoint(sequence))
            .collect();
        let dropped = total - waypoints.len();

        if dropped > 0 {
            tracing::debug!(
                "normalize_route: dropped {} of {} entries from {:?}",
                dropped,
                total,
                source.kind()
            );
        }

        return NormalizedRoute {
            waypoints,
            dropped,
            source: Some(source.kind()),
        };
    }

    NormalizedRoute::default()
}

/// Builds the route at `index` of a collection from its raw object.
pub fn build_route(raw: &Value, index: usize) -> (Route, NormalizedRoute) {
    let name = string_field(raw, &["name", "route_name"])
        .unwrap_or_else(|| format!("Route {}", index + 1));
    let id = string_field(raw, &["id", "route_id"])
        .unwrap_or_else(|| synthetic_route_id(index, &name));
    let normalized = normalize_route(raw);
    let total_distance_nm = route_distance(&normalized.waypoints).total_nm;

    let route = Route {
        id,
        index,
        name,
        origin: string_field(raw, &["origin"]).unwrap_or_default(),
        destination: string_field(raw, &["destination"]).unwrap_or_default(),
        waypoints: normalized.waypoints.clone(),
        total_distance_nm,
    };
    (route, normalized)
}

#[derive(Debug, Clone, PartialEq)]
struct Candidate {
    lat: f64,
    lon: f64,
    name: Option<String>,
}

impl Candidate {
    fn in_bounds(&self) -> bool {
        (MIN_LAT..=MAX_LAT).contains(&self.lat) && (MIN_LON..=MAX_LON).contains(&self.lon)
    }

    fn into_waypoint(self, sequence: usize) -> Waypoint {
        Waypoint {
            lat: self.lat,
            lon: self.lon,
            name: Some(self.name.unwrap_or_else(|| format!("WP{}", sequence + 1))),
            sequence,
        }
    }
}

/// The first array or object entry decides the shape; scalar entries are left
/// for `parse_entry` to reject and count.
fn classify_items(items: Vec<&Value>) -> Option<RouteSource<'_>> {
    let first = *items
        .iter()
        .find(|item| item.is_array() || item.is_object())?;
    match first {
        Value::Array(_) => Some(RouteSource::ArrayOfPairs(items)),
        Value::Object(_) => Some(RouteSource::ArrayOfObjects(items)),
        _ => None,
    }
}

/// Entries of an array, or of an object keyed by index (`{"0": .., "1": ..}`)
/// in numeric key order.
fn sequence_entries(value: &Value) -> Option<Vec<&Value>> {
    match value {
        Value::Array(items) => Some(items.iter().collect()),
        Value::Object(map) => indexed_entries(map),
        _ => None,
    }
}

fn indexed_entries(map: &Map<String, Value>) -> Option<Vec<&Value>> {
    let mut keyed = map
        .iter()
        .map(|(key, value)| key.parse::<usize>().ok().map(|k| (k, value)))
        .collect::<Option<Vec<_>>>()?;
    keyed.sort_by_key(|(k, _)| *k);
    Some(keyed.into_iter().map(|(_, value)| value).collect())
}

fn parse_entry(entry: &Value) -> Option<Candidate> {
    match entry {
        Value::Object(map) => Some(Candidate {
            lat: first_number(map, &LAT_KEYS)?,
            lon: first_number(map, &LON_KEYS)?,
            name: map
                .get("name")
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_owned),
        }),
        // GeoJSON order: [lon, lat]
        Value::Array(pair) if pair.len() >= 2 => Some(Candidate {
            lat: number(&pair[1])?,
            lon: number(&pair[0])?,
            name: None,
        }),
        _ => None,
    }
}

fn first_number(map: &Map<String, Value>, keys: &[&str]) -> Option<f64> {
    keys.iter().find_map(|key| map.get(*key)).and_then(number)
}

fn number(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    parsed.is_finite().then_some(parsed)
}

fn string_field(raw: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match raw.get(*key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_owned()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}
