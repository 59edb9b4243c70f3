use std::cmp::Ordering;
use std::collections::BinaryHeap;

use fxhash::{FxHashMap, FxHashSet};
use grid_util::point::Point;
use log::info;

use crate::request::SearchRequest;
use crate::solver::{SolveOutcome, Solver};
use crate::Path;

fn manhattan_distance(a: &Point, b: &Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

fn in_bounds(p: Point, width: usize, height: usize) -> bool {
    p.x >= 0 && p.y >= 0 && (p.x as usize) < width && (p.y as usize) < height
}

fn neighbours(p: Point, width: usize, height: usize) -> Vec<Point> {
    let mut neighbours = Vec::with_capacity(4);
    for (dx, dy) in [(-1, 0), (1, 0), (0, -1), (0, 1)] {
        let n = Point::new(p.x + dx, p.y + dy);
        if in_bounds(n, width, height) {
            neighbours.push(n);
        }
    }
    neighbours
}

/// Frontier entry carrying the accumulated path prefix, so the output path
/// is read straight off the popped goal state instead of being rebuilt from
/// back-pointers.
struct PathHolder {
    priority: i32,
    fuel: i32,
    cell: Point,
    path: Path,
}

impl Eq for PathHolder {}

impl PartialEq for PathHolder {
    fn eq(&self, other: &Self) -> bool {
        self.priority.eq(&other.priority) && self.fuel.eq(&other.fuel)
    }
}

impl PartialOrd for PathHolder {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PathHolder {
    fn cmp(&self, other: &Self) -> Ordering {
        match other.priority.cmp(&self.priority) {
            Ordering::Equal => self.fuel.cmp(&other.fuel),
            s => s,
        }
    }
}

/// Heuristic-guided search using the Manhattan distance to the goal, which
/// is admissible on a 4-connected unit-cost grid. Works on the raw
/// forbidden/refuel sets rather than a [RoutingGrid](crate::grid::RoutingGrid).
///
/// The relaxation rule is fuel-first, not distance-first: a cell is
/// re-expanded whenever a state arrives with strictly more fuel, even at a
/// higher path cost. This departs from textbook A* on purpose; it favours
/// feasibility of the remainder of the route and in rare configurations can
/// return a longer path than Dijkstra does for the same input.
#[derive(Clone, Debug, Default)]
pub struct AstarSolver;

impl Solver for AstarSolver {
    fn solve(&self, request: &SearchRequest) -> SolveOutcome {
        let (width, height) = request.grid_size;
        let refuel: FxHashSet<Point> = request.refuel_cells.iter().copied().collect();

        let mut cost_so_far: FxHashMap<Point, i32> = FxHashMap::default();
        let mut fuel_so_far: FxHashMap<Point, i32> = FxHashMap::default();
        cost_so_far.insert(request.start, 0);
        fuel_so_far.insert(request.start, request.tank_capacity);

        let mut frontier = BinaryHeap::new();
        frontier.push(PathHolder {
            priority: 0,
            fuel: request.tank_capacity,
            cell: request.start,
            path: Vec::new(),
        });

        while let Some(PathHolder {
            fuel,
            cell,
            mut path,
            ..
        }) = frontier.pop()
        {
            path.push(cell);
            if cell == request.end {
                info!("A* finished, path length: {}", path.len());
                return SolveOutcome::Path(path);
            }
            let cell_cost = match cost_so_far.get(&cell) {
                Some(&cost) => cost,
                None => continue,
            };
            for next in neighbours(cell, width, height) {
                if request.forbidden.contains(&next) {
                    continue;
                }
                let new_cost = cell_cost + 1;
                let new_fuel = if refuel.contains(&next) {
                    request.tank_capacity
                } else {
                    fuel - request.fuel_cost
                };
                if new_fuel < 0 {
                    continue;
                }
                let dominated = fuel_so_far
                    .get(&next)
                    .map_or(false, |&recorded| new_fuel <= recorded);
                if cost_so_far.contains_key(&next) && dominated {
                    continue;
                }
                cost_so_far.insert(next, new_cost);
                fuel_so_far.insert(next, new_fuel);
                frontier.push(PathHolder {
                    priority: new_cost + manhattan_distance(&next, &request.end),
                    fuel: new_fuel,
                    cell: next,
                    path: path.clone(),
                });
            }
        }
        SolveOutcome::Path(Vec::new())
    }
}
