use std::fmt;

use serde_json::Value;

use crate::{error::ResolveError, models::Route};

/// What a UI event hands us to name a route: a collection index, a route id,
/// or part of a route name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteIdentifier {
    Index(u64),
    Text(String),
}

impl RouteIdentifier {
    /// Accepts any JSON number or string. Integral non-negative numbers (also
    /// `2.0`) are indices; other numbers go through the text rules. Anything
    /// else is a caller bug and is reported as `InvalidIdentifierType`.
    pub fn from_json(value: &Value) -> Result<Self, ResolveError> {
        match value {
            Value::Number(n) => Ok(n
                .as_u64()
                .or_else(|| n.as_f64().and_then(integral_index))
                .map(RouteIdentifier::Index)
                .unwrap_or_else(|| RouteIdentifier::Text(n.to_string()))),
            Value::String(s) => Ok(RouteIdentifier::Text(s.clone())),
            Value::Null => Err(ResolveError::InvalidIdentifierType("null".into())),
            Value::Bool(_) => Err(ResolveError::InvalidIdentifierType("boolean".into())),
            Value::Array(_) => Err(ResolveError::InvalidIdentifierType("array".into())),
            Value::Object(_) => Err(ResolveError::InvalidIdentifierType("object".into())),
        }
    }

    fn as_index(&self) -> Option<usize> {
        match self {
            RouteIdentifier::Index(n) => usize::try_from(*n).ok(),
            RouteIdentifier::Text(s) => {
                let s = s.trim();
                if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
                    s.parse().ok()
                } else {
                    None
                }
            }
        }
    }
}

fn integral_index(value: f64) -> Option<u64> {
    let integral = value.is_finite() && value >= 0.0 && value.fract() == 0.0;
    (integral && value <= u64::MAX as f64).then_some(value as u64)
}

impl fmt::Display for RouteIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteIdentifier::Index(n) => write!(f, "{n}"),
            RouteIdentifier::Text(s) => write!(f, "{}", s.trim()),
        }
    }
}

impl From<usize> for RouteIdentifier {
    fn from(index: usize) -> Self {
        RouteIdentifier::Index(index as u64)
    }
}

impl From<&str> for RouteIdentifier {
    fn from(text: &str) -> Self {
        RouteIdentifier::Text(text.to_owned())
    }
}

impl From<String> for RouteIdentifier {
    fn from(text: String) -> Self {
        RouteIdentifier::Text(text)
    }
}

/// Maps an identifier to exactly one position in `routes`.
///
/// Rules, each tried only when the previous one fails:
/// 1. a number or all-digit string inside `[0, len)` is a direct index
/// 2. exact match on `id`
/// 3. exact match on the index-derived synthetic id
/// 4. case-insensitive substring of `name`, first in collection order
///
/// Out-of-range indices are not clamped.
pub fn resolve_route_index(
    identifier: &RouteIdentifier,
    routes: &[Route],
) -> Result<usize, ResolveError> {
    if let Some(index) = identifier.as_index().filter(|i| *i < routes.len()) {
        return Ok(index);
    }

    let text = identifier.to_string();
    if text.is_empty() {
        return Err(ResolveError::NotFound(text));
    }

    if let Some(index) = routes.iter().position(|route| route.id == text) {
        return Ok(index);
    }

    if let Some(index) = routes
        .iter()
        .enumerate()
        .position(|(i, route)| synthetic_route_id(i, &route.name) == text)
    {
        return Ok(index);
    }

    let needle = text.to_lowercase();
    routes
        .iter()
        .position(|route| route.name.to_lowercase().contains(&needle))
        .ok_or(ResolveError::NotFound(text))
}

/// `route_<index>_<slug(name)>`. Same inputs always give the same id.
pub fn synthetic_route_id(index: usize, name: &str) -> String {
    let slug = slug(name);
    if slug.is_empty() {
        format!("route_{index}_unnamed")
    } else {
        format!("route_{index}_{slug}")
    }
}

/// Lowercase alphanumerics, other runs collapsed to a single `_`.
pub fn slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_separator = false;
    for c in name.chars() {
        if c.is_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('_');
            }
            pending_separator = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_separator = true;
        }
    }
    slug
}
