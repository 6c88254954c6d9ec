use shared::Point;
use tracing::debug;

use crate::map::{LayerId, MapEngine};

/// Maximum number of points held by a selection.
pub const MAX_PICKS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    Empty,
    OnePicked,
    TwoPicked,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Pick {
    point: Point,
    marker: LayerId,
}

/// Ordered selection of up to two clicked points, each shown as a marker.
#[derive(Debug, Default)]
pub struct Selection {
    picks: Vec<Pick>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SelectionState {
        match self.picks.len() {
            0 => SelectionState::Empty,
            1 => SelectionState::OnePicked,
            _ => SelectionState::TwoPicked,
        }
    }

    pub fn len(&self) -> usize {
        self.picks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.picks.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.picks.len() >= MAX_PICKS
    }

    pub fn points(&self) -> Vec<Point> {
        self.picks.iter().map(|pick| pick.point).collect()
    }

    /// First and second clicked points, once both exist.
    pub fn endpoints(&self) -> Option<(Point, Point)> {
        match self.picks.as_slice() {
            [start, end, ..] => Some((start.point, end.point)),
            _ => None,
        }
    }

    /// Add a marker for `point` and append it.
    ///
    /// Returns `true` when a full selection had to be discarded first.
    pub fn pick(&mut self, map: &mut impl MapEngine, point: Point) -> bool {
        let overflowed = self.is_full();
        if overflowed {
            self.clear(map);
        }
        let marker = map.add_marker(point);
        self.picks.push(Pick { point, marker });
        debug!(
            lat = point.lat,
            lon = point.lon,
            state = ?self.state(),
            "point selected"
        );
        overflowed
    }

    /// Remove every marker and forget the points.
    pub fn clear(&mut self, map: &mut impl MapEngine) {
        for pick in self.picks.drain(..) {
            map.remove_layer(pick.marker);
        }
    }
}
