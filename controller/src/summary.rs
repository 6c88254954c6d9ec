use serde::Serialize;
use shared::RouteResponse;

/// Human-readable figures forwarded to the info display after a route is drawn.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RouteSummary {
    pub distance: Option<String>,
    pub node_count: Option<usize>,
    pub details: RouteDetails,
    pub unreachable: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RouteDetails {
    pub time: Option<String>,
    /// Visited node ids joined with arrows.
    pub text: Option<String>,
}

impl RouteSummary {
    pub fn from_response(route: &RouteResponse) -> Self {
        let text = route
            .node_path
            .as_ref()
            .filter(|nodes| !nodes.is_empty())
            .map(|nodes| {
                nodes
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(" → ")
            });

        Self {
            distance: route.distance_m.map(format_distance),
            node_count: route.node_path.as_ref().map(Vec::len),
            details: RouteDetails {
                time: route.time_s.map(format_elapsed),
                text,
            },
            unreachable: route.unreachable,
        }
    }
}

/// Kilometres with two decimals from 1000 m upwards, whole metres below.
pub fn format_distance(meters: f64) -> String {
    if meters >= 1000.0 {
        format!("{} km", fixed(meters / 1000.0, 2))
    } else {
        format!("{} m", meters.round() as i64)
    }
}

pub fn format_elapsed(seconds: f64) -> String {
    format!("{} s", fixed(seconds, 4))
}

/// `decimals` places with exact ties rounded up, not to even.
fn fixed(value: f64, decimals: usize) -> String {
    let scale = 10f64.powi(decimals as i32);
    let rounded = (value * scale).round() / scale;
    format!("{rounded:.decimals$}")
}
