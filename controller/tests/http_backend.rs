mod common;

use std::net::SocketAddr;

use axum::{Json, Router, http::StatusCode, routing::post};
use common::{init_tracing, setup, setup_with};
use controller::map::HULL_STYLE;
use controller::{HttpConfig, HttpTransport, Hooks, RouteError, RouteOutcome};
use serde_json::{Value, json};
use shared::{Point, RouteRequest};

/// Stand-in for the routing backend: answers like the real `/route` handler.
async fn route_handler(Json(req): Json<RouteRequest>) -> (StatusCode, Json<Value>) {
    if req.start == req.end {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Invalid start or end"})),
        );
    }
    if req.algo == "dijkstra" {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "no path found"})),
        );
    }
    let mid = [req.start.lat + 0.004, req.end.lon];
    (
        StatusCode::OK,
        Json(json!({
            "path": [[req.start.lat, req.start.lon], mid, [req.end.lat, req.end.lon]],
            "node_path": ["n1", "n2", "n3"],
            "distance_m": 812.4,
            "time_s": 0.0021,
            "unreachable": false
        })),
    )
}

async fn spawn_backend() -> SocketAddr {
    let app = Router::new()
        .route("/route", post(route_handler))
        .route("/broken", post(|| async { "<html>oops</html>" }));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn transport(addr: SocketAddr, path: &str) -> HttpTransport {
    HttpTransport::new(HttpConfig {
        endpoint: format!("http://{addr}{path}"),
        timeout: None,
    })
    .unwrap()
}

const START: Point = Point::new(43.131, -79.101);
const END: Point = Point::new(43.139, -79.109);

#[tokio::test]
async fn route_cycle_over_http_renders_backend_path() {
    init_tracing();
    let addr = spawn_backend().await;
    let (mut ctl, messages) = setup();
    ctl.handle_click(START);
    ctl.handle_click(END);

    let outcome = ctl.go(&transport(addr, "/route")).await;

    let RouteOutcome::Rendered(summary) = outcome else {
        panic!("expected a rendered route, got {outcome:?}");
    };
    assert_eq!(summary.distance.as_deref(), Some("812 m"));
    assert_eq!(summary.node_count, Some(3));
    assert_eq!(summary.details.text.as_deref(), Some("n1 → n2 → n3"));
    assert_eq!(summary.details.time.as_deref(), Some("0.0021 s"));

    let lines = ctl.map().polylines();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].first(), Some(&START));
    assert_eq!(lines[0].last(), Some(&END));
    assert_eq!(ctl.map().polygons(&HULL_STYLE).len(), 1);
    assert!(messages.borrow().is_empty());
}

#[tokio::test]
async fn error_status_body_is_read_as_backend_error() {
    let addr = spawn_backend().await;
    let (mut ctl, messages) =
        setup_with(Hooks::new().with_algorithm_selector(|| "dijkstra".to_string()));
    ctl.handle_click(START);
    ctl.handle_click(END);

    let outcome = ctl.go(&transport(addr, "/route")).await;

    assert_eq!(
        outcome,
        RouteOutcome::Failed(RouteError::Backend("no path found".into()))
    );
    assert_eq!(*messages.borrow(), vec!["Routing error: no path found"]);
    assert!(ctl.map().polylines().is_empty());
}

#[tokio::test]
async fn unparseable_body_is_a_network_error() {
    let addr = spawn_backend().await;
    let (mut ctl, messages) = setup();
    ctl.handle_click(START);
    ctl.handle_click(END);

    let outcome = ctl.go(&transport(addr, "/broken")).await;

    assert!(matches!(outcome, RouteOutcome::Failed(RouteError::Network(_))));
    assert!(messages.borrow()[0].starts_with("Network error: malformed response"));
    assert!(ctl.map().polylines().is_empty());
}

#[tokio::test]
async fn refused_connection_is_a_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let (mut ctl, messages) = setup();
    ctl.handle_click(START);
    ctl.handle_click(END);

    let outcome = ctl.go(&transport(addr, "/route")).await;

    assert!(matches!(outcome, RouteOutcome::Failed(RouteError::Network(_))));
    assert_eq!(messages.borrow().len(), 1);
    assert!(messages.borrow()[0].starts_with("Network error: "));
}
