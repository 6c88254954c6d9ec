//! Interaction controller for a two-point routing map.

pub mod config;
pub mod controller;
pub mod error;
pub mod geometry;
pub mod http;
pub mod map;
pub mod render;
pub mod report;
pub mod request;
pub mod selection;
pub mod summary;

pub use config::{ControllerConfig, Hooks};
pub use controller::Controller;
pub use error::{HullError, MapError, RouteError, TransportError};
pub use http::{HttpConfig, HttpTransport};
pub use map::{InMemoryMap, LayerId, MapEngine};
pub use report::{ErrorReporter, LogReporter};
pub use request::{PendingRoute, RouteOutcome, RouteTransport};
pub use summary::RouteSummary;
