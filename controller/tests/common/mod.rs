#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use controller::{
    Controller, ControllerConfig, Hooks, InMemoryMap, RouteSummary, RouteTransport,
    TransportError,
};
use shared::{ApiError, Point, RouteReply, RouteRequest, RouteResponse};

pub type Messages = Rc<RefCell<Vec<String>>>;
pub type TestController = Controller<InMemoryMap, Box<dyn FnMut(&str)>>;

/// Answers every request with a canned reply and counts the calls.
pub struct ScriptedTransport {
    reply: Box<dyn Fn() -> Result<RouteReply, TransportError>>,
    pub calls: Cell<usize>,
    pub last_request: RefCell<Option<RouteRequest>>,
}

impl ScriptedTransport {
    pub fn route(path: Vec<Point>) -> Self {
        Self::replying(move || Ok(RouteReply::Found(route(path.clone()))))
    }

    pub fn backend_error(message: &'static str) -> Self {
        Self::replying(move || {
            Ok(RouteReply::Failed(ApiError {
                error: message.to_string(),
            }))
        })
    }

    pub fn unreachable_host() -> Self {
        Self::replying(|| Err(TransportError::Other("connection refused".into())))
    }

    fn replying(reply: impl Fn() -> Result<RouteReply, TransportError> + 'static) -> Self {
        Self {
            reply: Box::new(reply),
            calls: Cell::new(0),
            last_request: RefCell::new(None),
        }
    }
}

impl RouteTransport for ScriptedTransport {
    async fn post_route(&self, request: &RouteRequest) -> Result<RouteReply, TransportError> {
        self.calls.set(self.calls.get() + 1);
        *self.last_request.borrow_mut() = Some(request.clone());
        (self.reply)()
    }
}

pub fn route(path: Vec<Point>) -> RouteResponse {
    RouteResponse {
        path,
        node_path: None,
        distance_m: Some(1500.0),
        time_s: Some(0.12345),
        unreachable: false,
    }
}

pub fn triangle() -> Vec<Point> {
    vec![
        Point::new(43.131, -79.101),
        Point::new(43.139, -79.109),
        Point::new(43.132, -79.108),
    ]
}

pub fn setup_with(hooks: Hooks) -> (TestController, Messages) {
    let messages: Messages = Rc::default();
    let sink = Rc::clone(&messages);
    let reporter: Box<dyn FnMut(&str)> =
        Box::new(move |msg: &str| sink.borrow_mut().push(msg.to_string()));
    let controller = Controller::new(
        InMemoryMap::new(),
        reporter,
        ControllerConfig::default(),
        hooks,
    );
    (controller, messages)
}

pub fn setup() -> (TestController, Messages) {
    setup_with(Hooks::new())
}

pub fn recording_info(hooks: Hooks) -> (Hooks, Rc<RefCell<Vec<RouteSummary>>>) {
    let seen: Rc<RefCell<Vec<RouteSummary>>> = Rc::default();
    let sink = Rc::clone(&seen);
    let hooks = hooks.with_info_display(move |summary| sink.borrow_mut().push(summary.clone()));
    (hooks, seen)
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "controller=debug".into()),
        )
        .with_test_writer()
        .try_init();
}
