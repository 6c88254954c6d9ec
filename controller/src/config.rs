use shared::{DEFAULT_ALGO, Point};

use crate::geometry::{HullFn, convex_hull};
use crate::map::Padding;
use crate::summary::RouteSummary;

/// Study area outline drawn once when the controller starts.
pub const STUDY_AREA: [Point; 4] = [
    Point::new(43.141_388_888_9, -79.101_111_111_1),
    Point::new(43.143_055_555_6, -79.112_777_777_8),
    Point::new(43.13, -79.1125),
    Point::new(43.13, -79.1),
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapView {
    pub center: Point,
    pub zoom: u8,
}

pub const INITIAL_VIEW: MapView = MapView {
    center: Point::new(43.136_389, -79.1075),
    zoom: 16,
};

#[derive(Debug, Clone)]
pub struct ControllerConfig {
    pub default_algo: String,
    pub boundary: Vec<Point>,
    pub fit_padding: Padding,
    pub hull: HullFn,
    pub initial_view: MapView,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            default_algo: DEFAULT_ALGO.to_string(),
            boundary: STUDY_AREA.to_vec(),
            fit_padding: Padding { x: 20, y: 20 },
            hull: convex_hull,
            initial_view: INITIAL_VIEW,
        }
    }
}

type AlgorithmSelector = Box<dyn Fn() -> String>;
type InfoDisplay = Box<dyn FnMut(&RouteSummary)>;

/// Optional collaborators supplied by the host page.
pub struct Hooks {
    algorithm: Option<AlgorithmSelector>,
    info: InfoDisplay,
}

impl Default for Hooks {
    fn default() -> Self {
        Self {
            algorithm: None,
            info: Box::new(|_| {}),
        }
    }
}

impl Hooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_algorithm_selector(mut self, selector: impl Fn() -> String + 'static) -> Self {
        self.algorithm = Some(Box::new(selector));
        self
    }

    pub fn with_info_display(mut self, display: impl FnMut(&RouteSummary) + 'static) -> Self {
        self.info = Box::new(display);
        self
    }

    /// Algorithm picked by the selector, if one is registered and answers.
    pub fn selected_algorithm(&self) -> Option<String> {
        self.algorithm
            .as_ref()
            .map(|select| select())
            .filter(|algo| !algo.trim().is_empty())
    }

    pub fn show_info(&mut self, summary: &RouteSummary) {
        (self.info)(summary)
    }
}
