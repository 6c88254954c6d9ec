//! Contract with the map rendering engine.
//!
//! The controller only ever adds layers, removes layers it created, and asks
//! the engine to frame a bounding box. Everything else (tiles, projection,
//! event plumbing) belongs to the engine.

use std::collections::BTreeMap;

use shared::Point;

use crate::error::MapError;
use crate::geometry::Bounds;

/// Handle to a layer previously added to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LayerId(pub u64);

#[derive(Debug, Clone, PartialEq)]
pub struct PolylineStyle {
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PolygonStyle {
    pub color: Option<&'static str>,
    pub weight: f64,
    pub fill_opacity: f64,
    pub dash_array: Option<&'static str>,
}

pub const ROUTE_STYLE: PolylineStyle = PolylineStyle { color: "blue" };

pub const HULL_STYLE: PolygonStyle = PolygonStyle {
    color: Some("orange"),
    weight: 2.0,
    fill_opacity: 0.05,
    dash_array: None,
};

pub const BOUNDARY_STYLE: PolygonStyle = PolygonStyle {
    color: None,
    weight: 3.0,
    fill_opacity: 0.04,
    dash_array: Some("6 6"),
};

/// Pixel padding applied around a fitted viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Padding {
    pub x: u32,
    pub y: u32,
}

/// Trait for map rendering engines.
///
/// Implemented by the Leaflet bridge in the browser and by [`InMemoryMap`]
/// for headless hosts and tests.
pub trait MapEngine {
    fn add_marker(&mut self, at: Point) -> LayerId;

    fn add_polyline(&mut self, path: &[Point], style: &PolylineStyle) -> LayerId;

    fn add_polygon(&mut self, ring: &[Point], style: &PolygonStyle) -> LayerId;

    fn remove_layer(&mut self, layer: LayerId);

    fn fit_bounds(&mut self, bounds: Bounds, padding: Padding) -> Result<(), MapError>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum Layer {
    Marker(Point),
    Polyline(Vec<Point>),
    Polygon {
        ring: Vec<Point>,
        style: PolygonStyle,
    },
}

/// Headless engine that keeps every live layer in memory.
#[derive(Debug, Default)]
pub struct InMemoryMap {
    layers: BTreeMap<LayerId, Layer>,
    next_id: u64,
    fits: Vec<Bounds>,
    fail_fits: bool,
}

impl InMemoryMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `fit_bounds` call fail.
    pub fn failing_viewport(mut self) -> Self {
        self.fail_fits = true;
        self
    }

    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.get(&id)
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn markers(&self) -> Vec<Point> {
        self.layers
            .values()
            .filter_map(|layer| match layer {
                Layer::Marker(p) => Some(*p),
                _ => None,
            })
            .collect()
    }

    pub fn polylines(&self) -> Vec<&[Point]> {
        self.layers
            .values()
            .filter_map(|layer| match layer {
                Layer::Polyline(path) => Some(path.as_slice()),
                _ => None,
            })
            .collect()
    }

    /// Polygons drawn with the given style.
    pub fn polygons(&self, style: &PolygonStyle) -> Vec<&[Point]> {
        self.layers
            .values()
            .filter_map(|layer| match layer {
                Layer::Polygon { ring, style: s } if s == style => Some(ring.as_slice()),
                _ => None,
            })
            .collect()
    }

    /// Bounds passed to every successful viewport fit, oldest first.
    pub fn fits(&self) -> &[Bounds] {
        &self.fits
    }

    fn insert(&mut self, layer: Layer) -> LayerId {
        self.next_id += 1;
        let id = LayerId(self.next_id);
        self.layers.insert(id, layer);
        id
    }
}

impl MapEngine for InMemoryMap {
    fn add_marker(&mut self, at: Point) -> LayerId {
        self.insert(Layer::Marker(at))
    }

    fn add_polyline(&mut self, path: &[Point], _style: &PolylineStyle) -> LayerId {
        self.insert(Layer::Polyline(path.to_vec()))
    }

    fn add_polygon(&mut self, ring: &[Point], style: &PolygonStyle) -> LayerId {
        self.insert(Layer::Polygon {
            ring: ring.to_vec(),
            style: style.clone(),
        })
    }

    fn remove_layer(&mut self, layer: LayerId) {
        self.layers.remove(&layer);
    }

    fn fit_bounds(&mut self, bounds: Bounds, _padding: Padding) -> Result<(), MapError> {
        if self.fail_fits {
            return Err(MapError::Viewport("viewport unavailable".into()));
        }
        self.fits.push(bounds);
        Ok(())
    }
}
