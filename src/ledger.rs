use fxhash::FxHashMap;
use grid_util::point::Point;

/// Per-cell record of the best remaining fuel any explored state arrived
/// with. More fuel at the same cell can only extend reachability, so an
/// arrival is worth exploring exactly when it strictly beats the recorded
/// amount. Shared by the BFS and DFS strategies; the priority-queue
/// strategies keep their own distance-aware variants of this rule.
#[derive(Debug, Default)]
pub struct FuelLedger {
    best: FxHashMap<Point, i32>,
}

impl FuelLedger {
    pub fn new() -> FuelLedger {
        FuelLedger::default()
    }

    pub fn contains(&self, cell: Point) -> bool {
        self.best.contains_key(&cell)
    }

    /// Whether an arrival at `cell` with `fuel` remaining dominates every
    /// previously recorded arrival there.
    pub fn admits(&self, cell: Point, fuel: i32) -> bool {
        match self.best.get(&cell) {
            Some(&recorded) => fuel > recorded,
            None => true,
        }
    }

    pub fn record(&mut self, cell: Point, fuel: i32) {
        self.best.insert(cell, fuel);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unseen_cell_is_admitted() {
        let ledger = FuelLedger::new();
        assert!(ledger.admits(Point::new(0, 0), 0));
    }

    #[test]
    fn only_strictly_more_fuel_is_admitted() {
        let mut ledger = FuelLedger::new();
        let p = Point::new(2, 3);
        ledger.record(p, 5);
        assert!(!ledger.admits(p, 4));
        assert!(!ledger.admits(p, 5));
        assert!(ledger.admits(p, 6));
    }
}
