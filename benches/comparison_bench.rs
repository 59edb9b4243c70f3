use criterion::{criterion_group, criterion_main, Criterion};
use fuel_pathfinding::{
    AstarSolver, BfsSolver, DijkstraSolver, Point, RefuelAwareSolver, SearchRequest, Solver,
};
use fxhash::FxHashSet;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::hint::black_box;

const N: usize = 48;

/// One representative fuel-constrained problem: a quarter of the map
/// forbidden, a handful of refuel stations and a tank that forces at least
/// one refuel stop on a corner-to-corner crossing.
fn benchmark_request() -> SearchRequest {
    let mut rng = StdRng::seed_from_u64(0);
    let start = Point::new(0, 0);
    let end = Point::new(N as i32 - 1, N as i32 - 1);
    let mut forbidden = FxHashSet::default();
    for x in 0..N as i32 {
        for y in 0..N as i32 {
            let p = Point::new(x, y);
            if p != start && p != end && rng.gen_bool(0.25) {
                forbidden.insert(p);
            }
        }
    }
    let mut refuel_cells = Vec::new();
    while refuel_cells.len() < 12 {
        let p = Point::new(rng.gen_range(0..N as i32), rng.gen_range(0..N as i32));
        let adjacent = refuel_cells
            .iter()
            .any(|s: &Point| (s.x - p.x).abs() + (s.y - p.y).abs() <= 1);
        if !forbidden.contains(&p) && p != start && p != end && !adjacent {
            refuel_cells.push(p);
        }
    }
    SearchRequest {
        tank_capacity: 40,
        fuel_cost: 1,
        forbidden,
        refuel_cells,
        start,
        end,
        grid_size: (N, N),
    }
}

fn strategy_bench(c: &mut Criterion) {
    let request = benchmark_request();
    let solvers: Vec<(&str, Box<dyn Solver>)> = vec![
        ("dijkstra", Box::new(DijkstraSolver)),
        ("astar", Box::new(AstarSolver)),
        ("bfs", Box::new(BfsSolver)),
        ("refuel-aware", Box::new(RefuelAwareSolver)),
    ];
    for (name, solver) in &solvers {
        c.bench_function(format!("{N}x{N}, {name}").as_str(), |b| {
            b.iter(|| black_box(solver.solve(&request)))
        });
    }
}

criterion_group!(benches, strategy_bench);
criterion_main!(benches);
