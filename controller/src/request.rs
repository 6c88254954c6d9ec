//! Types shared by every route request cycle.

use shared::{RouteReply, RouteRequest, RouteResponse};

use crate::error::{RouteError, TransportError};
use crate::summary::RouteSummary;

/// Sends one route request to the routing backend.
///
/// Implementations make exactly one attempt; retries are up to the user.
#[allow(async_fn_in_trait)]
pub trait RouteTransport {
    async fn post_route(&self, request: &RouteRequest) -> Result<RouteReply, TransportError>;
}

/// A request handed out by the controller and awaiting its reply.
///
/// The ticket identifies the cycle; only the most recent one may render.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingRoute {
    pub(crate) ticket: u64,
    pub(crate) request: RouteRequest,
}

impl PendingRoute {
    pub fn ticket(&self) -> u64 {
        self.ticket
    }

    pub fn request(&self) -> &RouteRequest {
        &self.request
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RouteOutcome {
    Rendered(RouteSummary),
    Failed(RouteError),
    /// A newer cycle or a selection reset replaced this one.
    Superseded,
}

/// Split a transport result into a drawable route or a user-facing error.
pub fn classify(reply: Result<RouteReply, TransportError>) -> Result<RouteResponse, RouteError> {
    match reply {
        Ok(RouteReply::Found(route)) => Ok(route),
        Ok(RouteReply::Failed(api)) => Err(RouteError::Backend(api.error)),
        Err(err) => Err(RouteError::Network(err.to_string())),
    }
}
