use shared::{Point, RouteReply, RouteRequest};
use tracing::{debug, warn};

use crate::config::{ControllerConfig, Hooks};
use crate::error::{RouteError, TransportError};
use crate::map::{BOUNDARY_STYLE, LayerId, MapEngine};
use crate::render::OverlayRenderer;
use crate::report::ErrorReporter;
use crate::request::{PendingRoute, RouteOutcome, RouteTransport, classify};
use crate::selection::Selection;

/// Interaction and rendering state for one map.
///
/// All mutation happens through `&mut self`, so a host drives it from a
/// single event loop: clicks go to [`Controller::handle_click`], the "go"
/// trigger to [`Controller::go`] (or the split
/// [`Controller::begin_route`] / [`Controller::finish_route`] pair when the
/// host owns the await).
pub struct Controller<M: MapEngine, R> {
    map: M,
    reporter: R,
    selection: Selection,
    renderer: OverlayRenderer,
    boundary: Option<LayerId>,
    hooks: Hooks,
    default_algo: String,
    issued: u64,
    in_flight: Option<u64>,
}

impl<M, R> Controller<M, R>
where
    M: MapEngine,
    R: ErrorReporter,
{
    /// Draw the study-area boundary and start with an empty selection.
    pub fn new(mut map: M, reporter: R, config: ControllerConfig, hooks: Hooks) -> Self {
        let boundary = (config.boundary.len() >= 3)
            .then(|| map.add_polygon(&config.boundary, &BOUNDARY_STYLE));
        Self {
            map,
            reporter,
            selection: Selection::new(),
            renderer: OverlayRenderer::new(config.hull, config.fit_padding),
            boundary,
            hooks,
            default_algo: config.default_algo,
            issued: 0,
            in_flight: None,
        }
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn renderer(&self) -> &OverlayRenderer {
        &self.renderer
    }

    pub fn boundary_layer(&self) -> Option<LayerId> {
        self.boundary
    }

    /// Ticket of the cycle whose reply is still awaited, if any.
    pub fn in_flight(&self) -> Option<u64> {
        self.in_flight
    }

    /// A click on a full selection also drops the route drawn for it.
    pub fn handle_click(&mut self, point: Point) {
        if self.selection.is_full() {
            self.renderer.clear(&mut self.map);
            if let Some(ticket) = self.in_flight.take() {
                debug!(ticket, "selection reset, dropping in-flight route");
            }
        }
        self.selection.pick(&mut self.map, point);
    }

    /// Validate the selection and build the request for a new cycle.
    ///
    /// Any cycle still in flight is superseded by the returned ticket.
    pub fn begin_route(&mut self) -> Result<PendingRoute, RouteError> {
        let Some((start, end)) = self.selection.endpoints() else {
            let err = RouteError::SelectionIncomplete;
            self.report(&err);
            return Err(err);
        };
        let algo = self
            .hooks
            .selected_algorithm()
            .unwrap_or_else(|| self.default_algo.clone());

        self.issued += 1;
        if let Some(previous) = self.in_flight.replace(self.issued) {
            debug!(previous, ticket = self.issued, "superseding in-flight route");
        }
        debug!(ticket = self.issued, %algo, "route requested");
        Ok(PendingRoute {
            ticket: self.issued,
            request: RouteRequest { start, end, algo },
        })
    }

    /// Apply the reply of a cycle started by [`Controller::begin_route`].
    pub fn finish_route(
        &mut self,
        pending: &PendingRoute,
        reply: Result<RouteReply, TransportError>,
    ) -> RouteOutcome {
        if self.in_flight != Some(pending.ticket) {
            debug!(ticket = pending.ticket, "ignoring stale route reply");
            return RouteOutcome::Superseded;
        }
        self.in_flight = None;

        match classify(reply) {
            Ok(route) => {
                let summary = self.renderer.render(&mut self.map, &route);
                self.hooks.show_info(&summary);
                RouteOutcome::Rendered(summary)
            }
            Err(err) => {
                self.report(&err);
                RouteOutcome::Failed(err)
            }
        }
    }

    /// Run one full route cycle against `transport`.
    pub async fn go<T: RouteTransport>(&mut self, transport: &T) -> RouteOutcome {
        let pending = match self.begin_route() {
            Ok(pending) => pending,
            Err(err) => return RouteOutcome::Failed(err),
        };
        let reply = transport.post_route(pending.request()).await;
        self.finish_route(&pending, reply)
    }

    fn report(&mut self, err: &RouteError) {
        warn!("route cycle failed: {err}");
        self.reporter.report(&err.to_string());
    }
}
