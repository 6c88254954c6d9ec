use shared::{Point, RouteResponse};
use tracing::{debug, warn};

use crate::geometry::{Bounds, HullFn};
use crate::map::{HULL_STYLE, LayerId, MapEngine, Padding, ROUTE_STYLE};
use crate::summary::RouteSummary;

/// Owns the route polyline and hull polygon layers.
///
/// Every draw removes the layer it replaces first, so repeated renders never
/// leave more than one route line and one hull on the map.
#[derive(Debug)]
pub struct OverlayRenderer {
    route: Option<LayerId>,
    hull: Option<LayerId>,
    hull_fn: HullFn,
    padding: Padding,
}

impl OverlayRenderer {
    pub fn new(hull_fn: HullFn, padding: Padding) -> Self {
        Self {
            route: None,
            hull: None,
            hull_fn,
            padding,
        }
    }

    pub fn route_layer(&self) -> Option<LayerId> {
        self.route
    }

    pub fn hull_layer(&self) -> Option<LayerId> {
        self.hull
    }

    /// Draw a successful route and return its summary.
    ///
    /// Hull and viewport framing are best effort: their failures are logged
    /// and never stop the route line from being drawn.
    pub fn render(&mut self, map: &mut impl MapEngine, route: &RouteResponse) -> RouteSummary {
        self.clear_route(map);
        self.route = Some(map.add_polyline(&route.path, &ROUTE_STYLE));
        debug!(points = route.path.len(), "route line drawn");

        self.draw_hull(map, &route.path);
        self.frame(map, &route.path);

        if route.unreachable {
            warn!("backend reported the destination as unreachable");
        }
        RouteSummary::from_response(route)
    }

    pub fn clear(&mut self, map: &mut impl MapEngine) {
        self.clear_route(map);
        self.clear_hull(map);
    }

    fn clear_route(&mut self, map: &mut impl MapEngine) {
        if let Some(layer) = self.route.take() {
            map.remove_layer(layer);
        }
    }

    fn clear_hull(&mut self, map: &mut impl MapEngine) {
        if let Some(layer) = self.hull.take() {
            map.remove_layer(layer);
        }
    }

    /// The previous hull is removed even when the new one is too small to draw.
    fn draw_hull(&mut self, map: &mut impl MapEngine, path: &[Point]) {
        self.clear_hull(map);
        match (self.hull_fn)(path) {
            Ok(hull) if hull.len() >= 3 => {
                self.hull = Some(map.add_polygon(&hull, &HULL_STYLE));
            }
            Ok(hull) => debug!(vertices = hull.len(), "hull too small to draw"),
            Err(err) => warn!("could not draw hull: {err}"),
        }
    }

    fn frame(&self, map: &mut impl MapEngine, path: &[Point]) {
        let Some(bounds) = Bounds::from_points(path) else {
            debug!("empty route, viewport left unchanged");
            return;
        };
        if let Err(err) = map.fit_bounds(bounds, self.padding) {
            warn!("{err}");
        }
    }
}
