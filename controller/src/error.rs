use thiserror::Error;

/// The three ways a route cycle can end without a drawn route.
///
/// `Display` carries the category prefix shown to the user.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RouteError {
    #[error("Please select two points on the map first.")]
    SelectionIncomplete,
    #[error("Routing error: {0}")]
    Backend(String),
    #[error("Network error: {0}")]
    Network(String),
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("{0}")]
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum HullError {
    #[error("hull input contains a non-finite coordinate")]
    NonFinite,
    #[error("hull needs at least 3 distinct points, got {0}")]
    Degenerate(usize),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MapError {
    #[error("cannot fit viewport: {0}")]
    Viewport(String),
}
