//! Leaflet-backed map engine and browser error reporter.

use controller::config::MapView;
use controller::geometry::Bounds;
use controller::map::{LayerId, MapEngine, Padding, PolygonStyle, PolylineStyle};
use controller::{ErrorReporter, MapError};
use serde::Serialize;
use serde_wasm_bindgen::to_value;
use shared::Point;
use wasm_bindgen::prelude::{JsValue, wasm_bindgen};

#[wasm_bindgen(module = "/leaflet_map.js")]
extern "C" {
    #[wasm_bindgen(js_name = initMap)]
    fn init_map(lat: f64, lon: f64, zoom: u8);
    #[wasm_bindgen(js_name = addMarker)]
    fn add_marker_js(lat: f64, lon: f64) -> u32;
    #[wasm_bindgen(js_name = addPolyline)]
    fn add_polyline_js(coords: JsValue, style: JsValue) -> u32;
    #[wasm_bindgen(js_name = addPolygon)]
    fn add_polygon_js(coords: JsValue, style: JsValue) -> u32;
    #[wasm_bindgen(js_name = removeLayer)]
    fn remove_layer_js(id: u32);
    #[wasm_bindgen(catch, js_name = fitBounds)]
    fn fit_bounds_js(
        south: f64,
        west: f64,
        north: f64,
        east: f64,
        pad_x: u32,
        pad_y: u32,
    ) -> Result<(), JsValue>;
}

/// Path options in the shape Leaflet expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeafletStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dash_array: Option<&'static str>,
}

impl From<&PolylineStyle> for LeafletStyle {
    fn from(style: &PolylineStyle) -> Self {
        Self {
            color: Some(style.color),
            weight: None,
            fill_opacity: None,
            dash_array: None,
        }
    }
}

impl From<&PolygonStyle> for LeafletStyle {
    fn from(style: &PolygonStyle) -> Self {
        Self {
            color: style.color,
            weight: Some(style.weight),
            fill_opacity: Some(style.fill_opacity),
            dash_array: style.dash_array,
        }
    }
}

/// Handle on the page's Leaflet map.
#[derive(Debug)]
pub struct LeafletMap;

impl LeafletMap {
    pub fn init(view: MapView) -> Self {
        init_map(view.center.lat, view.center.lon, view.zoom);
        LeafletMap
    }
}

fn js_value(value: &impl Serialize) -> JsValue {
    to_value(value).unwrap_or_else(|err| {
        web_sys::console::error_1(&format!("[frontend] cannot convert value: {err}").into());
        JsValue::NULL
    })
}

impl MapEngine for LeafletMap {
    fn add_marker(&mut self, at: Point) -> LayerId {
        LayerId(u64::from(add_marker_js(at.lat, at.lon)))
    }

    fn add_polyline(&mut self, path: &[Point], style: &PolylineStyle) -> LayerId {
        let id = add_polyline_js(js_value(&path), js_value(&LeafletStyle::from(style)));
        LayerId(u64::from(id))
    }

    fn add_polygon(&mut self, ring: &[Point], style: &PolygonStyle) -> LayerId {
        let id = add_polygon_js(js_value(&ring), js_value(&LeafletStyle::from(style)));
        LayerId(u64::from(id))
    }

    fn remove_layer(&mut self, layer: LayerId) {
        if let Ok(id) = u32::try_from(layer.0) {
            remove_layer_js(id);
        }
    }

    fn fit_bounds(&mut self, bounds: Bounds, padding: Padding) -> Result<(), MapError> {
        fit_bounds_js(
            bounds.south_west.lat,
            bounds.south_west.lon,
            bounds.north_east.lat,
            bounds.north_east.lon,
            padding.x,
            padding.y,
        )
        .map_err(|err| MapError::Viewport(format!("{err:?}")))
    }
}

/// Shows failures in a blocking browser alert.
#[derive(Debug, Default)]
pub struct AlertReporter;

impl ErrorReporter for AlertReporter {
    fn report(&mut self, message: &str) {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }
}
