use std::{fs::File, io::Read, path::Path, time::Duration};

use serde_json::Value;

use crate::{error::LoadError, models::RouteCollection, normalize::build_route};

/// Builds a collection from a payload that is either an array of route
/// objects or an object holding them under `routes`.
pub fn build_collection(payload: &Value) -> Result<RouteCollection, LoadError> {
    let raw_routes = match payload {
        Value::Array(routes) => routes,
        Value::Object(map) => match map.get("routes") {
            Some(Value::Array(routes)) => routes,
            _ => return Err(LoadError::UnexpectedPayload("object without a `routes` array")),
        },
        Value::Null => return Err(LoadError::UnexpectedPayload("null")),
        Value::Bool(_) => return Err(LoadError::UnexpectedPayload("boolean")),
        Value::Number(_) => return Err(LoadError::UnexpectedPayload("number")),
        Value::String(_) => return Err(LoadError::UnexpectedPayload("string")),
    };

    let mut routes = Vec::with_capacity(raw_routes.len());
    let mut dropped = 0;
    for (index, raw) in raw_routes.iter().enumerate() {
        let (route, normalized) = build_route(raw, index);
        if !normalized.is_displayable() {
            tracing::warn!(
                "route {} ({}) has {} valid waypoint(s), it cannot be drawn",
                route.id,
                route.name,
                route.waypoints.len()
            );
        }
        dropped += normalized.dropped;
        routes.push(route);
    }

    let displayable = routes.iter().filter(|route| route.is_displayable()).count();
    tracing::info!(
        "loaded {} routes ({} displayable, {} waypoints dropped)",
        routes.len(),
        displayable,
        dropped
    );

    Ok(RouteCollection::new(routes))
}

pub fn load_from_reader(reader: impl Read) -> Result<RouteCollection, LoadError> {
    let payload: Value = serde_json::from_reader(reader)?;
    build_collection(&payload)
}

pub fn load_from_file(path: impl AsRef<Path>) -> Result<RouteCollection, LoadError> {
    let file = File::open(path)?;
    load_from_reader(file)
}

pub async fn load_from_url(url: &str, timeout: Duration) -> Result<RouteCollection, LoadError> {
    let client = reqwest::Client::builder().timeout(timeout).build()?;
    tracing::info!("fetching routes from {url}");
    let payload: Value = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    build_collection(&payload)
}
