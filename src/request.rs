use fxhash::FxHashSet;
use grid_util::point::Point;
use thiserror::Error;

use crate::grid::RoutingGrid;

/// Malformed search input, rejected before any search begins.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("tank capacity must be positive, got {0}")]
    NonPositiveCapacity(i32),
    #[error("fuel cost per move must be positive, got {0}")]
    NonPositiveFuelCost(i32),
    #[error("cell {0} lies outside the {1}x{2} grid")]
    OutOfBounds(Point, usize, usize),
    #[error("start and end cells are identical")]
    StartEqualsEnd,
    #[error("endpoint {0} is inside the forbidden set")]
    EndpointForbidden(Point),
}

/// One self-contained search problem: grid bounds, cell classification
/// inputs, endpoints and the fuel model. Immutable for the duration of a
/// search; every strategy builds whatever per-call scratch state it needs
/// from this and drops it on return.
///
/// Fuel arithmetic is integral throughout. Callers with real-world fuel
/// units are expected to normalize them into integer units beforehand.
#[derive(Clone, Debug)]
pub struct SearchRequest {
    pub tank_capacity: i32,
    pub fuel_cost: i32,
    pub forbidden: FxHashSet<Point>,
    /// Refuel stations, carrier/airport and tanker cells merged. The
    /// distinction between the two only matters to presentation layers.
    pub refuel_cells: Vec<Point>,
    pub start: Point,
    pub end: Point,
    pub grid_size: (usize, usize),
}

impl SearchRequest {
    fn in_bounds(&self, p: Point) -> bool {
        let (w, h) = self.grid_size;
        p.x >= 0 && p.y >= 0 && (p.x as usize) < w && (p.y as usize) < h
    }

    /// Fails fast on malformed input. Strategies invoked directly remain
    /// total over degenerate inputs (e.g. `start == end` yields a
    /// single-cell path), but the orchestrator boundary rejects them.
    pub fn validate(&self) -> Result<(), RequestError> {
        if self.tank_capacity <= 0 {
            return Err(RequestError::NonPositiveCapacity(self.tank_capacity));
        }
        if self.fuel_cost <= 0 {
            return Err(RequestError::NonPositiveFuelCost(self.fuel_cost));
        }
        let (w, h) = self.grid_size;
        for endpoint in [self.start, self.end] {
            if !self.in_bounds(endpoint) {
                return Err(RequestError::OutOfBounds(endpoint, w, h));
            }
            if self.forbidden.contains(&endpoint) {
                return Err(RequestError::EndpointForbidden(endpoint));
            }
        }
        if self.start == self.end {
            return Err(RequestError::StartEqualsEnd);
        }
        Ok(())
    }

    /// Builds the per-search [RoutingGrid] view of this request.
    pub fn grid(&self) -> RoutingGrid {
        let (w, h) = self.grid_size;
        RoutingGrid::new(
            w,
            h,
            self.forbidden.iter().copied(),
            self.refuel_cells.iter().copied(),
        )
    }
}
