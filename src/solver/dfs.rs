use grid_util::point::Point;
use log::info;
use rand::rngs::ThreadRng;
use rand::seq::SliceRandom;
use rand::{thread_rng, Rng};

use crate::grid::RoutingGrid;
use crate::ledger::FuelLedger;
use crate::request::SearchRequest;
use crate::solver::{SolveOutcome, Solver};
use crate::Path;

/// Default ceiling on the recursion depth of the depth-first strategy.
pub const DEFAULT_RECURSION_LIMIT: usize = 2500;

/// Exhaustive backtracking search with branch-and-bound pruning, retained
/// for completeness and comparison. Can be very slow: the bound starts at
/// `width * height` (an upper bound on any simple path) and branches are cut
/// once their distance reaches the best complete distance found so far.
///
/// Recursion depth is capped; hitting the cap aborts the whole search with
/// [SolveOutcome::RecursionLimitExceeded], which callers must not confuse
/// with "no path found". Roughly one expansion in twenty shuffles its
/// neighbour order to avoid a deterministic bias towards one axis.
#[derive(Clone, Debug)]
pub struct DfsSolver {
    pub recursion_limit: usize,
}

impl Default for DfsSolver {
    fn default() -> DfsSolver {
        DfsSolver {
            recursion_limit: DEFAULT_RECURSION_LIMIT,
        }
    }
}

impl DfsSolver {
    pub fn new(recursion_limit: usize) -> DfsSolver {
        DfsSolver { recursion_limit }
    }
}

/// All bookkeeping of one DFS invocation, owned by the call so that
/// repeated or abandoned runs cannot interfere with each other.
struct DfsContext<'a> {
    grid: &'a RoutingGrid,
    goal: Point,
    tank_capacity: i32,
    fuel_cost: i32,
    recursion_limit: usize,
    best_distance: usize,
    best_path: Option<Path>,
    trail: Path,
    visited: FuelLedger,
    rng: ThreadRng,
    limit_hit: bool,
}

impl DfsContext<'_> {
    fn descend(&mut self, cell: Point, fuel: i32, distance: usize, depth: usize) {
        self.trail.push(cell);
        self.step(cell, fuel, distance, depth);
        self.trail.pop();
    }

    fn step(&mut self, cell: Point, fuel: i32, distance: usize, depth: usize) {
        if self.limit_hit {
            return;
        }
        if depth > self.recursion_limit {
            self.limit_hit = true;
            return;
        }
        if fuel < 0 {
            return;
        }
        if distance >= self.best_distance {
            return;
        }
        if cell == self.goal {
            self.best_distance = distance;
            self.best_path = Some(self.trail.clone());
            return;
        }
        if fuel == 0 {
            return;
        }
        self.visited.record(cell, fuel);
        let mut neighbours = self.grid.neighbours(cell);
        if self.rng.gen_range(0..20) == 0 {
            neighbours.shuffle(&mut self.rng);
        }
        for neighbour in neighbours {
            if self.limit_hit {
                return;
            }
            if self.grid.is_forbidden(neighbour) {
                continue;
            }
            if self.grid.is_refuel(neighbour) {
                // Revisiting a refuel point gains nothing and only loops.
                if !self.visited.contains(neighbour) {
                    self.descend(neighbour, self.tank_capacity, distance + 1, depth + 1);
                }
            } else if self.visited.admits(neighbour, fuel - self.fuel_cost) {
                self.descend(neighbour, fuel - self.fuel_cost, distance + 1, depth + 1);
            }
        }
    }
}

impl Solver for DfsSolver {
    fn solve(&self, request: &SearchRequest) -> SolveOutcome {
        let grid = request.grid();
        if grid.unreachable(&request.start, &request.end) {
            return SolveOutcome::Path(Vec::new());
        }
        let (width, height) = request.grid_size;
        let mut context = DfsContext {
            grid: &grid,
            goal: request.end,
            tank_capacity: request.tank_capacity,
            fuel_cost: request.fuel_cost,
            recursion_limit: self.recursion_limit,
            best_distance: width * height,
            best_path: None,
            trail: Vec::new(),
            visited: FuelLedger::new(),
            rng: thread_rng(),
            limit_hit: false,
        };
        context.descend(request.start, request.tank_capacity, 0, 1);
        if context.limit_hit {
            return SolveOutcome::RecursionLimitExceeded;
        }
        let path = context.best_path.unwrap_or_default();
        info!("DFS finished, best distance: {}", context.best_distance);
        SolveOutcome::Path(path)
    }
}
