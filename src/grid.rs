use core::fmt;

use fxhash::FxHashSet;
use grid_util::grid::{BoolGrid, Grid};
use grid_util::point::Point;
use log::info;
use petgraph::unionfind::UnionFind;

/// Classification of a single grid cell. Forbidden cells can never be
/// entered; refuel cells restore the tank to full capacity on arrival.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellKind {
    Open,
    Refuel,
    Forbidden,
}

/// [RoutingGrid] is the per-search view of the cell space: a [BoolGrid]
/// forbidden mask, refuel membership, and connected components over the
/// non-forbidden cells in a [UnionFind] structure. Components are
/// fuel-agnostic, so they can only ever prove a goal *unreachable*; they are
/// used to bail out of a search before flood-filling a separated region.
#[derive(Clone, Debug)]
pub struct RoutingGrid {
    forbidden: BoolGrid,
    refuel: FxHashSet<Point>,
    components: UnionFind<usize>,
}

impl RoutingGrid {
    pub fn new<F, R>(width: usize, height: usize, forbidden: F, refuel: R) -> RoutingGrid
    where
        F: IntoIterator<Item = Point>,
        R: IntoIterator<Item = Point>,
    {
        let mut mask = BoolGrid::new(width, height, false);
        for p in forbidden {
            if p.x >= 0 && p.y >= 0 && mask.index_in_bounds(p.x as usize, p.y as usize) {
                mask.set(p.x as usize, p.y as usize, true);
            }
        }
        let mut grid = RoutingGrid {
            forbidden: mask,
            refuel: FxHashSet::default(),
            components: UnionFind::new(width * height),
        };
        // Forbidden classification takes precedence over a refuel listing.
        for p in refuel {
            if grid.in_bounds(p.x, p.y) && !grid.is_forbidden(p) {
                grid.refuel.insert(p);
            }
        }
        grid.generate_components();
        grid
    }

    pub fn width(&self) -> usize {
        self.forbidden.width
    }

    pub fn height(&self) -> usize {
        self.forbidden.height
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && self.forbidden.index_in_bounds(x as usize, y as usize)
    }

    pub fn is_forbidden(&self, p: Point) -> bool {
        !self.in_bounds(p.x, p.y) || self.forbidden.get(p.x as usize, p.y as usize)
    }

    pub fn is_refuel(&self, p: Point) -> bool {
        self.refuel.contains(&p)
    }

    /// Out-of-bounds positions classify as [CellKind::Forbidden].
    pub fn kind(&self, p: Point) -> CellKind {
        if self.is_forbidden(p) {
            CellKind::Forbidden
        } else if self.refuel.contains(&p) {
            CellKind::Refuel
        } else {
            CellKind::Open
        }
    }

    /// The in-bounds subset of the 4 axis-aligned neighbours of `p`, in a
    /// fixed west/east/south/north order. Strategies that want a randomized
    /// expansion order shuffle this themselves.
    pub fn neighbours(&self, p: Point) -> Vec<Point> {
        let mut neighbours = Vec::with_capacity(4);
        for (dx, dy) in [(-1, 0), (1, 0), (0, -1), (0, 1)] {
            if self.in_bounds(p.x + dx, p.y + dy) {
                neighbours.push(Point::new(p.x + dx, p.y + dy));
            }
        }
        neighbours
    }

    /// Like [neighbours](Self::neighbours) but with forbidden cells filtered out.
    pub fn open_neighbours(&self, p: Point) -> Vec<Point> {
        self.neighbours(p)
            .into_iter()
            .filter(|n| !self.is_forbidden(*n))
            .collect()
    }

    fn get_ix(&self, p: &Point) -> usize {
        self.forbidden.get_ix(p.x as usize, p.y as usize)
    }

    /// Checks whether start and goal are on different components, ignoring
    /// fuel. A [true] result means no strategy can find a path.
    pub fn unreachable(&self, start: &Point, goal: &Point) -> bool {
        if self.is_forbidden(*start) || self.is_forbidden(*goal) {
            return true;
        }
        let start_ix = self.get_ix(start);
        let goal_ix = self.get_ix(goal);
        if self.components.equiv(start_ix, goal_ix) {
            false
        } else {
            info!("{} and {} are on different components", start, goal);
            true
        }
    }

    /// Generates a new [UnionFind] structure and links up open grid
    /// neighbours to the same components.
    fn generate_components(&mut self) {
        let w = self.forbidden.width;
        let h = self.forbidden.height;
        self.components = UnionFind::new(w * h);
        for x in 0..w as i32 {
            for y in 0..h as i32 {
                let point = Point::new(x, y);
                if self.is_forbidden(point) {
                    continue;
                }
                let parent_ix = self.get_ix(&point);
                for n in [Point::new(x + 1, y), Point::new(x, y + 1)] {
                    if !self.is_forbidden(n) {
                        let ix = self.get_ix(&n);
                        self.components.union(parent_ix, ix);
                    }
                }
            }
        }
    }
}

impl fmt::Display for RoutingGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in (0..self.forbidden.height as i32).rev() {
            for x in 0..self.forbidden.width as i32 {
                let c = match self.kind(Point::new(x, y)) {
                    CellKind::Open => '.',
                    CellKind::Refuel => 'R',
                    CellKind::Forbidden => '#',
                };
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
