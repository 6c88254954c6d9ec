mod leaflet;

use std::{cell::RefCell, rc::Rc};

use controller::selection::SelectionState;
use controller::{
    Controller, ControllerConfig, Hooks, HttpConfig, HttpTransport, PendingRoute, RouteSummary,
    RouteTransport, TransportError,
};
use seed::{prelude::*, virtual_dom::AtValue, *};
use serde::Deserialize;
use shared::{KNOWN_ALGOS, Point, RouteReply};
use wasm_bindgen::{JsCast, prelude::wasm_bindgen};

use crate::leaflet::{AlertReporter, LeafletMap};

fn api_root() -> String {
    if let Some(url) = option_env!("FRONTEND_API_ROOT") {
        return url.trim_end_matches('/').to_string();
    }
    "http://localhost:5000/route".to_string()
}

pub struct Model {
    controller: Controller<LeafletMap, AlertReporter>,
    transport: Option<HttpTransport>,
    algo: Rc<RefCell<String>>,
    info: Rc<RefCell<Option<RouteSummary>>>,
}

pub enum Msg {
    MapClicked { lat: f64, lon: f64 },
    AlgoChanged(String),
    Go,
    RouteFetched(PendingRoute, Result<RouteReply, TransportError>),
}

#[derive(Deserialize)]
struct MapClickPayload {
    lat: f64,
    lon: f64,
}

pub fn init(_: Url, orders: &mut impl Orders<Msg>) -> Model {
    orders.stream(streams::window_event(Ev::from("map-click"), |event| {
        let detail = event.dyn_into::<web_sys::CustomEvent>().ok()?.detail();
        let payload: MapClickPayload = serde_wasm_bindgen::from_value(detail).ok()?;
        Some(Msg::MapClicked {
            lat: payload.lat,
            lon: payload.lon,
        })
    }));

    let config = ControllerConfig::default();
    let map = LeafletMap::init(config.initial_view);
    let algo = Rc::new(RefCell::new(config.default_algo.clone()));
    let info = Rc::new(RefCell::new(None));

    let hooks = {
        let algo = Rc::clone(&algo);
        let info = Rc::clone(&info);
        Hooks::new()
            .with_algorithm_selector(move || algo.borrow().clone())
            .with_info_display(move |summary| *info.borrow_mut() = Some(summary.clone()))
    };

    let transport = HttpTransport::new(HttpConfig {
        endpoint: api_root(),
        timeout: None,
    })
    .map_err(|err| {
        web_sys::console::error_1(&format!("[frontend] cannot build HTTP client: {err}").into());
    })
    .ok();

    Model {
        controller: Controller::new(map, AlertReporter, config, hooks),
        transport,
        algo,
        info,
    }
}

pub fn update(msg: Msg, model: &mut Model, orders: &mut impl Orders<Msg>) {
    match msg {
        Msg::MapClicked { lat, lon } => {
            web_sys::console::debug_1(
                &format!("[frontend] map click lat={lat:.5} lon={lon:.5}").into(),
            );
            model.controller.handle_click(Point::new(lat, lon));
        }
        Msg::AlgoChanged(algo) => *model.algo.borrow_mut() = algo,
        Msg::Go => {
            let Ok(pending) = model.controller.begin_route() else {
                return;
            };
            web_sys::console::debug_1(&request_log_line(&pending).into());
            let Some(transport) = model.transport.clone() else {
                let reply = Err(TransportError::Other("HTTP client unavailable".into()));
                model.controller.finish_route(&pending, reply);
                return;
            };
            orders.perform_cmd(async move {
                let reply = transport.post_route(pending.request()).await;
                Msg::RouteFetched(pending, reply)
            });
        }
        Msg::RouteFetched(pending, reply) => {
            let outcome = model.controller.finish_route(&pending, reply);
            web_sys::console::debug_1(
                &format!("[frontend] route #{} finished: {outcome:?}", pending.ticket()).into(),
            );
        }
    }
}

pub fn view(model: &Model) -> Node<Msg> {
    div![
        C!["route-panel"],
        h1!["Route planner"],
        view_controls(model),
        view_info(model)
    ]
}

fn view_controls(model: &Model) -> Node<Msg> {
    let selected = model.algo.borrow().clone();
    let options = KNOWN_ALGOS.iter().map(|&algo| {
        option![
            attrs! {
                At::Value => algo,
                At::Selected => bool_attr(algo == selected),
            },
            algo
        ]
    });

    div![
        C!["controls"],
        p![
            C!["hint"],
            selection_hint(model.controller.selection().state())
        ],
        label![
            "Algorithm ",
            select![options, input_ev(Ev::Change, Msg::AlgoChanged)],
        ],
        button![
            "Go",
            ev(Ev::Click, |event| {
                event.prevent_default();
                Msg::Go
            }),
        ],
        IF!(model.controller.in_flight().is_some() => span![C!["pending"], "Routing…"]),
    ]
}

fn view_info(model: &Model) -> Node<Msg> {
    match model.info.borrow().as_ref() {
        Some(summary) => div![
            C!["info"],
            h2!["Last route"],
            summary_lines(summary).into_iter().map(|line| p![line]),
            IF!(summary.unreachable => p![C!["warning"], "Destination unreachable"]),
        ],
        None => div![C!["info"], p!["No route yet."]],
    }
}

fn selection_hint(state: SelectionState) -> &'static str {
    match state {
        SelectionState::Empty => "Click the map to choose a start point.",
        SelectionState::OnePicked => "Click the map to choose a destination.",
        SelectionState::TwoPicked => "Press Go to compute the route, or click again to start over.",
    }
}

fn summary_lines(summary: &RouteSummary) -> Vec<String> {
    let na = || "n/a".to_string();
    let mut lines = vec![
        format!(
            "Distance: {}",
            summary.distance.clone().unwrap_or_else(na)
        ),
        format!(
            "Nodes: {}",
            summary
                .node_count
                .map(|count| count.to_string())
                .unwrap_or_else(na)
        ),
        format!(
            "Search time: {}",
            summary.details.time.clone().unwrap_or_else(na)
        ),
    ];
    if let Some(text) = &summary.details.text {
        lines.push(format!("Path: {text}"));
    }
    lines
}

fn request_log_line(pending: &PendingRoute) -> String {
    let request = pending.request();
    format!(
        "[frontend] route #{} start=({:.5},{:.5}) end=({:.5},{:.5}) algo={}",
        pending.ticket(),
        request.start.lat,
        request.start.lon,
        request.end.lat,
        request.end.lon,
        request.algo
    )
}

fn bool_attr(value: bool) -> AtValue {
    if value {
        AtValue::Some("true".into())
    } else {
        AtValue::Ignored
    }
}

#[wasm_bindgen(start)]
pub fn start() {
    App::start("app", init, update, view);
}
