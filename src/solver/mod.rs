pub mod astar;
pub mod bfs;
pub mod dfs;
pub mod dijkstra;
pub mod refuel;

pub use astar::AstarSolver;
pub use bfs::BfsSolver;
pub use dfs::DfsSolver;
pub use dijkstra::DijkstraSolver;
pub use refuel::RefuelAwareSolver;

use grid_util::point::Point;

use crate::request::SearchRequest;
use crate::Path;

/// Result of one strategy invocation. An empty path is the ordinary
/// "no path found" outcome; the recursion-limit variant is specific to the
/// depth-first strategy and is never coerced into an empty path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SolveOutcome {
    Path(Path),
    RecursionLimitExceeded,
}

impl SolveOutcome {
    pub fn path(&self) -> Option<&[Point]> {
        match self {
            SolveOutcome::Path(path) => Some(path),
            SolveOutcome::RecursionLimitExceeded => None,
        }
    }

    pub fn into_path(self) -> Path {
        match self {
            SolveOutcome::Path(path) => path,
            SolveOutcome::RecursionLimitExceeded => Vec::new(),
        }
    }

    pub fn hit_recursion_limit(&self) -> bool {
        matches!(self, SolveOutcome::RecursionLimitExceeded)
    }
}

/// Common contract of the search strategies: a [SearchRequest] in, a
/// [SolveOutcome] out. Strategies build all scratch state per call and share
/// nothing between invocations.
pub trait Solver {
    fn solve(&self, request: &SearchRequest) -> SolveOutcome;
}
