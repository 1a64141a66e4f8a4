use thiserror::Error;

/// A normalized route that cannot be drawn as a line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    #[error("route has {count} valid waypoint(s), at least 2 are needed to draw it")]
    InsufficientGeometry { count: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("route not found: {0}")]
    NotFound(String),
    #[error("route identifier must be a number or a string, got {0}")]
    InvalidIdentifierType(String),
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read route payload: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid route payload: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to fetch route payload: {0}")]
    Http(#[from] reqwest::Error),
    #[error("route payload must be an array of routes or an object with a `routes` array, got {0}")]
    UnexpectedPayload(&'static str),
}

#[derive(Debug, Error)]
pub enum RouteError {
    #[error("failed to build GPX document: {0}")]
    Gpx(#[from] gpx::errors::GpxError),
    #[error(transparent)]
    Load(#[from] LoadError),
}
