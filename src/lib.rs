//! # fuel_pathfinding
//!
//! Pathfinding for an agent crossing a 2-D grid under a consumable-resource
//! constraint: every move drains a fuel tank, forbidden cells are
//! impassable and refuel cells reset the tank to full capacity. Five
//! interchangeable strategies (breadth-first, depth-first with
//! branch-and-bound, Dijkstra, A* and a two-phase refuel-aware Dijkstra
//! variant) share one request shape, and an [Orchestrator] can run them all
//! on the same input for comparison. Movement is 4-connected; there are no
//! diagonal moves and no moving obstacles.
//!
//! Everything is an in-process, synchronous computation: no I/O, no
//! persisted state, and all search bookkeeping lives inside a single call.
//!
//! ```
//! use fuel_pathfinding::{Orchestrator, Point, SearchReport, SearchRequest, Strategy};
//!
//! let request = SearchRequest {
//!     tank_capacity: 20,
//!     fuel_cost: 1,
//!     forbidden: Default::default(),
//!     refuel_cells: vec![],
//!     start: Point::new(0, 0),
//!     end: Point::new(4, 4),
//!     grid_size: (5, 5),
//! };
//! let report = Orchestrator::default().run(&request, Strategy::Dijkstra).unwrap();
//! match report {
//!     SearchReport::Single(run) => assert_eq!(run.path_len(), 9),
//!     SearchReport::Comparison(_) => unreachable!(),
//! }
//! ```

pub mod grid;
pub mod ledger;
pub mod orchestrator;
pub mod request;
pub mod solver;

pub use grid_util::point::Point;

pub use crate::grid::{CellKind, RoutingGrid};
pub use crate::ledger::FuelLedger;
pub use crate::orchestrator::{
    Comparison, Orchestrator, RunStatus, SearchReport, Strategy, StrategyRun,
};
pub use crate::request::{RequestError, SearchRequest};
pub use crate::solver::{
    AstarSolver, BfsSolver, DfsSolver, DijkstraSolver, RefuelAwareSolver, SolveOutcome, Solver,
};

/// An ordered sequence of cells from start to end inclusive, each
/// consecutive pair 4-adjacent. Empty means no path was found.
pub type Path = Vec<Point>;
