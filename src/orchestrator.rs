use std::time::{Duration, Instant};

use log::info;

use crate::request::{RequestError, SearchRequest};
use crate::solver::dfs::DEFAULT_RECURSION_LIMIT;
use crate::solver::{
    AstarSolver, BfsSolver, DfsSolver, DijkstraSolver, RefuelAwareSolver, SolveOutcome, Solver,
};
use crate::Path;

/// Strategy selector, including the comparison mode that runs several
/// strategies on the same request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    Bfs,
    Dfs,
    Dijkstra,
    RefuelAwareDijkstra,
    Astar,
    CompareAll,
}

/// How a strategy run ended. `Skipped` only occurs for DFS in comparison
/// mode when it is disabled by configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunStatus {
    Completed,
    RecursionLimitExceeded,
    Skipped,
}

/// One timed strategy invocation. An empty path with [RunStatus::Completed]
/// means the search space was exhausted without reaching the goal.
#[derive(Clone, Debug)]
pub struct StrategyRun {
    pub strategy: Strategy,
    pub path: Path,
    pub elapsed: Duration,
    pub status: RunStatus,
}

impl StrategyRun {
    pub fn path_len(&self) -> usize {
        self.path.len()
    }

    pub fn found_path(&self) -> bool {
        !self.path.is_empty()
    }
}

/// Per-strategy results of [Strategy::CompareAll], timed independently so a
/// failure of one strategy never suppresses the results of the others.
#[derive(Clone, Debug)]
pub struct Comparison {
    pub dijkstra: StrategyRun,
    pub astar: StrategyRun,
    pub bfs: StrategyRun,
    pub dfs: StrategyRun,
}

#[derive(Clone, Debug)]
pub enum SearchReport {
    Single(StrategyRun),
    Comparison(Comparison),
}

/// Dispatches a validated [SearchRequest] to one strategy, or to the
/// comparison mode. Every dispatch is synchronous and self-contained;
/// callers wanting a responsive surface run this on a worker they may
/// abandon, which is safe because no run leaves shared state behind.
#[derive(Clone, Debug)]
pub struct Orchestrator {
    /// Whether comparison mode includes the (potentially very slow) DFS.
    pub include_dfs: bool,
    pub dfs_recursion_limit: usize,
}

impl Default for Orchestrator {
    fn default() -> Orchestrator {
        Orchestrator {
            include_dfs: true,
            dfs_recursion_limit: DEFAULT_RECURSION_LIMIT,
        }
    }
}

impl Orchestrator {
    pub fn without_dfs() -> Orchestrator {
        Orchestrator {
            include_dfs: false,
            ..Orchestrator::default()
        }
    }

    /// Validates the request, then runs the requested strategy.
    pub fn run(
        &self,
        request: &SearchRequest,
        strategy: Strategy,
    ) -> Result<SearchReport, RequestError> {
        request.validate()?;
        match strategy {
            Strategy::CompareAll => Ok(SearchReport::Comparison(self.compare_all(request))),
            single => Ok(SearchReport::Single(self.run_single(request, single))),
        }
    }

    fn run_single(&self, request: &SearchRequest, strategy: Strategy) -> StrategyRun {
        let started = Instant::now();
        let outcome = match strategy {
            Strategy::Bfs => BfsSolver.solve(request),
            Strategy::Dfs => DfsSolver::new(self.dfs_recursion_limit).solve(request),
            Strategy::Dijkstra => DijkstraSolver.solve(request),
            Strategy::RefuelAwareDijkstra => RefuelAwareSolver.solve(request),
            Strategy::Astar => AstarSolver.solve(request),
            Strategy::CompareAll => unreachable!("comparison mode is dispatched in run"),
        };
        let elapsed = started.elapsed();
        info!("{:?} took {:?}", strategy, elapsed);
        match outcome {
            SolveOutcome::Path(path) => StrategyRun {
                strategy,
                path,
                elapsed,
                status: RunStatus::Completed,
            },
            SolveOutcome::RecursionLimitExceeded => StrategyRun {
                strategy,
                path: Vec::new(),
                elapsed,
                status: RunStatus::RecursionLimitExceeded,
            },
        }
    }

    fn compare_all(&self, request: &SearchRequest) -> Comparison {
        let dijkstra = self.run_single(request, Strategy::Dijkstra);
        let astar = self.run_single(request, Strategy::Astar);
        let bfs = self.run_single(request, Strategy::Bfs);
        let dfs = if self.include_dfs {
            self.run_single(request, Strategy::Dfs)
        } else {
            StrategyRun {
                strategy: Strategy::Dfs,
                path: Vec::new(),
                elapsed: Duration::ZERO,
                status: RunStatus::Skipped,
            }
        };
        Comparison {
            dijkstra,
            astar,
            bfs,
            dfs,
        }
    }
}
