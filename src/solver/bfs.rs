use std::collections::VecDeque;

use grid_util::point::Point;
use log::info;
use rand::seq::SliceRandom;
use rand::thread_rng;

use crate::ledger::FuelLedger;
use crate::request::SearchRequest;
use crate::solver::{SolveOutcome, Solver};
use crate::Path;

/// Level-order exploration that returns *a* valid path, not necessarily a
/// shortest one under the fuel constraint. The neighbour order is shuffled
/// at every expansion, so repeated runs on the same input produce varied
/// path shapes; every returned path is still valid.
///
/// Refuel neighbours are re-enqueued at full capacity regardless of prior
/// visits; non-refuel neighbours pass through the strictly-more-fuel
/// [FuelLedger] rule.
#[derive(Clone, Debug, Default)]
pub struct BfsSolver;

impl Solver for BfsSolver {
    fn solve(&self, request: &SearchRequest) -> SolveOutcome {
        let grid = request.grid();
        if grid.unreachable(&request.start, &request.end) {
            return SolveOutcome::Path(Vec::new());
        }
        let mut rng = thread_rng();
        let mut visited = FuelLedger::new();
        let mut queue: VecDeque<(Point, i32, Path)> = VecDeque::new();
        queue.push_back((request.start, request.tank_capacity, Vec::new()));
        visited.record(request.start, request.tank_capacity);

        while let Some((cell, fuel, mut path)) = queue.pop_front() {
            path.push(cell);
            if fuel < 0 {
                continue;
            }
            if cell == request.end {
                info!("BFS finished, path length: {}", path.len());
                return SolveOutcome::Path(path);
            }
            let mut neighbours = grid.neighbours(cell);
            neighbours.shuffle(&mut rng);
            for neighbour in neighbours {
                if grid.is_forbidden(neighbour) {
                    continue;
                }
                if grid.is_refuel(neighbour) {
                    queue.push_back((neighbour, request.tank_capacity, path.clone()));
                    visited.record(neighbour, request.tank_capacity);
                } else if visited.admits(neighbour, fuel - request.fuel_cost) {
                    let new_fuel = fuel - request.fuel_cost;
                    queue.push_back((neighbour, new_fuel, path.clone()));
                    visited.record(neighbour, new_fuel);
                }
            }
        }
        SolveOutcome::Path(Vec::new())
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

    fn assert_valid(path: &[Point], request: &SearchRequest) {
        assert_eq!(path.first(), Some(&request.start));
        assert_eq!(path.last(), Some(&request.end));
        for pair in path.windows(2) {
            let d = (pair[0].x - pair[1].x).abs() + (pair[0].y - pair[1].y).abs();
            assert_eq!(d, 1);
        }
        assert!(path.iter().all(|p| !request.forbidden.contains(p)));
    }

    #[test]
    fn start_equals_end_yields_single_cell() {
        let request = open_request(3, Point::new(0, 0), Point::new(0, 0), 5);
        let path = BfsSolver.solve(&request).into_path();
        assert_eq!(path, vec![Point::new(0, 0)]);
    }

    #[test]
    fn every_run_is_a_valid_path() {
        let mut request = open_request(6, Point::new(0, 0), Point::new(5, 5), 40);
        request.forbidden = [Point::new(2, 2), Point::new(3, 2)].into_iter().collect();
        for _ in 0..20 {
            let path = BfsSolver.solve(&request).into_path();
            assert!(!path.is_empty());
            assert_valid(&path, &request);
        }
    }

    #[test]
    fn walled_off_goal_is_not_found() {
        let mut request = open_request(4, Point::new(0, 0), Point::new(3, 3), 40);
        request.forbidden = [Point::new(2, 3), Point::new(2, 2), Point::new(3, 2)]
            .into_iter()
            .collect();
        let path = BfsSolver.solve(&request).into_path();
        assert!(path.is_empty());
    }

    #[test]
    fn tank_smaller_than_one_move_fails() {
        let mut request = open_request(3, Point::new(0, 0), Point::new(2, 0), 1);
        request.fuel_cost = 2;
        let path = BfsSolver.solve(&request).into_path();
        assert!(path.is_empty());
    }
}
