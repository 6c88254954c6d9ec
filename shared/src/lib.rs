use std::fmt;

use serde::{Deserialize, Serialize};

/// Algorithm used when no selector is registered.
pub const DEFAULT_ALGO: &str = "astar";

/// Algorithm identifiers understood by the routing backend.
pub const KNOWN_ALGOS: [&str; 2] = ["astar", "dijkstra"];

/// A map position in degrees. Travels over the wire as `[lat, lon]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 2]", into = "[f64; 2]")]
pub struct Point {
    pub lat: f64,
    pub lon: f64,
}

impl Point {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NonFiniteCoordinate(pub [f64; 2]);

impl fmt::Display for NonFiniteCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "coordinate [{}, {}] is not finite", self.0[0], self.0[1])
    }
}

impl std::error::Error for NonFiniteCoordinate {}

impl TryFrom<[f64; 2]> for Point {
    type Error = NonFiniteCoordinate;

    fn try_from(value: [f64; 2]) -> Result<Self, Self::Error> {
        let point = Point::new(value[0], value[1]);
        if point.is_finite() {
            Ok(point)
        } else {
            Err(NonFiniteCoordinate(value))
        }
    }
}

impl From<Point> for [f64; 2] {
    fn from(point: Point) -> Self {
        [point.lat, point.lon]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRequest {
    pub start: Point,
    pub end: Point,
    #[serde(default = "default_algo")]
    pub algo: String,
}

/// Graph node identifier; the backend emits either strings or integers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeId {
    Number(i64),
    Text(String),
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeId::Number(id) => write!(f, "{id}"),
            NodeId::Text(id) => f.write_str(id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteResponse {
    pub path: Vec<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_path: Option<Vec<NodeId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_m: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_s: Option<f64>,
    /// Set by the backend when no finite-distance path exists.
    #[serde(default)]
    pub unreachable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
}

/// Body of a `/route` answer. A body carrying `error` is always a failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RouteReply {
    Failed(ApiError),
    Found(RouteResponse),
}

pub fn default_algo() -> String {
    DEFAULT_ALGO.to_string()
}
