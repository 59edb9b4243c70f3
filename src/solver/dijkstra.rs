use std::cmp::Ordering;
use std::collections::BinaryHeap;

use fxhash::FxBuildHasher;
use grid_util::point::Point;
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use log::info;
use num_traits::Zero;

use crate::grid::RoutingGrid;
use crate::request::SearchRequest;
use crate::solver::{SolveOutcome, Solver};
use crate::Path;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Best arrival recorded for a cell: the index of the cell it was entered
/// from, the distance so far and the remaining fuel *before* any refuel
/// reset at the cell itself.
struct NodeRecord<C> {
    parent: usize,
    distance: C,
    fuel: i32,
}

struct QueueEntry<C> {
    distance: C,
    fuel: i32,
    index: usize,
}

impl<C: PartialEq> Eq for QueueEntry<C> {}

impl<C: PartialEq> PartialEq for QueueEntry<C> {
    fn eq(&self, other: &Self) -> bool {
        self.distance.eq(&other.distance) && self.fuel.eq(&other.fuel)
    }
}

impl<C: Ord> PartialOrd for QueueEntry<C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<C: Ord> Ord for QueueEntry<C> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Orders by distance ascending; among equal distances the
        // fuel-richest state is popped first.
        match other.distance.cmp(&self.distance) {
            Ordering::Equal => self.fuel.cmp(&other.fuel),
            s => s,
        }
    }
}

fn reverse_path<C>(nodes: &FxIndexMap<Point, NodeRecord<C>>, goal_index: usize) -> Path {
    let mut path: Path = itertools::unfold(goal_index, |i| {
        nodes.get_index(*i).map(|(node, record)| {
            *i = record.parent;
            *node
        })
    })
    .collect();
    path.reverse();
    path
}

/// Dijkstra over fuel-constrained states, generic in the edge-cost type so
/// that the refuel-aware planner can run it with a tie-broken cost.
/// `edge_cost` gives the cost of entering a neighbour cell.
///
/// One record is kept per cell. A neighbour is relaxed when its tentative
/// distance is strictly smaller than the recorded one, or equal while the
/// new remaining fuel strictly exceeds the recorded fuel; the latter
/// tie-break is what steers equal-length alternatives towards fuel-richer
/// routes, which keeps later segments feasible. Transitions that would turn
/// the fuel negative are never pushed. A state popped with no fuel left is
/// dead unless it sits on the goal or on a refuel cell, whose reset applies
/// before the check.
pub(crate) fn dijkstra_core<C, FC>(
    grid: &RoutingGrid,
    start: Point,
    goal: Point,
    tank_capacity: i32,
    fuel_cost: i32,
    mut edge_cost: FC,
) -> Path
where
    C: Zero + Ord + Copy,
    FC: FnMut(&Point) -> C,
{
    if grid.unreachable(&start, &goal) {
        return Vec::new();
    }
    let mut nodes: FxIndexMap<Point, NodeRecord<C>> = FxIndexMap::default();
    nodes.insert(
        start,
        NodeRecord {
            parent: usize::MAX,
            distance: Zero::zero(),
            fuel: tank_capacity,
        },
    );
    let mut to_see = BinaryHeap::new();
    to_see.push(QueueEntry {
        distance: Zero::zero(),
        fuel: tank_capacity,
        index: 0,
    });
    let mut goal_index = None;
    while let Some(QueueEntry {
        distance,
        mut fuel,
        index,
    }) = to_see.pop()
    {
        let cell = match nodes.get_index(index) {
            Some((cell, _)) => *cell,
            None => continue,
        };
        if grid.is_refuel(cell) {
            fuel = tank_capacity;
        }
        if cell == goal {
            goal_index = Some(index);
            break;
        }
        if fuel <= 0 {
            continue;
        }
        for neighbour in grid.open_neighbours(cell) {
            let fuel_left = fuel - fuel_cost;
            if fuel_left < 0 {
                continue;
            }
            let new_distance = distance + edge_cost(&neighbour);
            let next_index;
            match nodes.entry(neighbour) {
                Vacant(e) => {
                    next_index = e.index();
                    e.insert(NodeRecord {
                        parent: index,
                        distance: new_distance,
                        fuel: fuel_left,
                    });
                }
                Occupied(mut e) => {
                    let record = e.get();
                    let improves = new_distance < record.distance
                        || (new_distance == record.distance && fuel_left > record.fuel);
                    if !improves {
                        continue;
                    }
                    next_index = e.index();
                    e.insert(NodeRecord {
                        parent: index,
                        distance: new_distance,
                        fuel: fuel_left,
                    });
                }
            }
            to_see.push(QueueEntry {
                distance: new_distance,
                fuel: fuel_left,
                index: next_index,
            });
        }
    }
    match goal_index {
        Some(index) => reverse_path(&nodes, index),
        None => Vec::new(),
    }
}

/// Cost-optimal search where cost is the number of moves; refuel
/// transitions are not weighted differently from ordinary ones.
#[derive(Clone, Debug, Default)]
pub struct DijkstraSolver;

impl Solver for DijkstraSolver {
    fn solve(&self, request: &SearchRequest) -> SolveOutcome {
        let grid = request.grid();
        let path = dijkstra_core(
            &grid,
            request.start,
            request.end,
            request.tank_capacity,
            request.fuel_cost,
            |_| 1i32,
        );
        info!("Dijkstra finished, path length: {}", path.len());
        SolveOutcome::Path(path)
    }
}

#[cfg(test)]
mod tests {
    use fxhash::FxHashSet;

    use super::*;

    fn open_request(size: usize, start: Point, end: Point, capacity: i32) -> SearchRequest {
        SearchRequest {
            tank_capacity: capacity,
            fuel_cost: 1,
            forbidden: FxHashSet::default(),
            refuel_cells: vec![],
            start,
            end,
            grid_size: (size, size),
        }
    }

    #[test]
    fn start_equals_end_yields_single_cell() {
        let request = open_request(3, Point::new(1, 1), Point::new(1, 1), 5);
        let path = DijkstraSolver.solve(&request).into_path();
        assert_eq!(path, vec![Point::new(1, 1)]);
    }

    #[test]
    fn open_grid_path_has_manhattan_length() {
        let request = open_request(5, Point::new(0, 0), Point::new(4, 4), 20);
        let path = DijkstraSolver.solve(&request).into_path();
        assert_eq!(path.len(), 9);
    }

    #[test]
    fn fuel_bound_without_refuel_fails() {
        // Straight-line distance 4 with a 3 unit tank and no station.
        let request = open_request(5, Point::new(0, 0), Point::new(4, 0), 3);
        let path = DijkstraSolver.solve(&request).into_path();
        assert!(path.is_empty());
    }

    #[test]
    fn refuel_station_on_route_extends_reach() {
        let mut request = open_request(5, Point::new(0, 0), Point::new(4, 0), 3);
        request.refuel_cells = vec![Point::new(2, 0)];
        let path = DijkstraSolver.solve(&request).into_path();
        assert_eq!(path.len(), 5);
        assert!(path.contains(&Point::new(2, 0)));
    }

    #[test]
    fn walls_are_routed_around() {
        let mut request = open_request(3, Point::new(0, 0), Point::new(2, 0), 10);
        request.forbidden = [Point::new(1, 0)].into_iter().collect();
        let path = DijkstraSolver.solve(&request).into_path();
        assert_eq!(path.len(), 5);
        assert!(!path.contains(&Point::new(1, 0)));
    }

    #[test]
    fn deterministic_across_runs() {
        let request = open_request(8, Point::new(0, 7), Point::new(7, 0), 30);
        let first = DijkstraSolver.solve(&request).into_path();
        let second = DijkstraSolver.solve(&request).into_path();
        assert_eq!(first, second);
    }
}
