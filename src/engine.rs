use tracing::trace;

use crate::grid::Grid;
use crate::grid::Transition;
use crate::rule_set::RuleSet;

/// Computes generations of a [`Grid`] under a [`RuleSet`].
///
/// The engine holds no state of its own. Every cell is judged against the same snapshot of the
/// grid and nothing is written until the resulting [`Transition`] is applied, so births and
/// deaths happen simultaneously.
#[derive(Debug, Clone, Copy, Default)]
pub struct Engine {
    rules: RuleSet,
}

impl Engine {
    pub fn new(rules: RuleSet) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> RuleSet {
        self.rules
    }

    /// Work out which cells are born and which die going into the next generation.
    pub fn next_generation(&self, grid: &Grid) -> Transition {
        let mut transition = Transition::default();

        for ((x, y), alive) in grid.cells() {
            let n = grid.live_neighbors(x, y);

            match (alive, self.rules.next_state(alive, n)) {
                (false, true) => {
                    transition.enliven.insert((x, y));
                }
                (true, false) => {
                    transition.kill.insert((x, y));
                }
                _ => {}
            }
        }

        trace!(
            born = transition.enliven.len(),
            died = transition.kill.len(),
            "computed next generation"
        );

        transition
    }
}

/// [`Engine::next_generation`] under the rules of Conway's Game of Life.
pub fn next_generation(grid: &Grid) -> Transition {
    Engine::default().next_generation(grid)
}

#[cfg(test)]
mod test {
    use std::collections::BTreeSet;

    use super::Engine;
    use super::next_generation;
    use crate::Coord;
    use crate::grid::Grid;
    use crate::rule_set::RuleSet;

    fn grid_with(width: usize, height: usize, live: &[Coord]) -> Grid {
        let mut grid = Grid::new(width, height).unwrap();
        for &(x, y) in live {
            grid.set_alive(x, y, true).unwrap();
        }

        grid
    }

    fn set(cells: &[Coord]) -> BTreeSet<Coord> {
        cells.iter().copied().collect()
    }

    #[test]
    fn empty_grid_stays_empty() {
        let grid = Grid::new(6, 6).unwrap();

        assert!(next_generation(&grid).is_empty());
    }

    #[test]
    fn birth_needs_exactly_three() {
        // an L of three cells gives birth in the corner it surrounds
        let grid = grid_with(4, 4, &[(1, 1), (2, 1), (1, 2)]);

        let t = next_generation(&grid);

        assert_eq!(t.enliven, set(&[(2, 2)]));
        assert!(t.kill.is_empty());
    }

    #[test]
    fn underpopulation() {
        let grid = grid_with(4, 4, &[(1, 1), (2, 1)]);

        let t = next_generation(&grid);

        assert_eq!(t.kill, set(&[(1, 1), (2, 1)]));
        assert!(t.enliven.is_empty());
    }

    #[test]
    fn overpopulation() {
        // a plus sign: the center has four neighbors, each arm three
        let grid = grid_with(5, 5, &[(2, 2), (1, 2), (3, 2), (2, 1), (2, 3)]);

        let t = next_generation(&grid);

        assert!(t.kill.contains(&(2, 2)));
        assert_eq!(t.kill.len(), 1);
        assert_eq!(t.enliven, set(&[(1, 1), (3, 1), (1, 3), (3, 3)]));
    }

    #[test]
    fn other_rules() {
        // under B1/S, every isolated cell dies and seeds its whole neighborhood
        let engine = Engine::new(RuleSet::new(0b10, 0));
        let grid = grid_with(3, 3, &[(1, 1)]);

        let t = engine.next_generation(&grid);

        assert_eq!(t.kill, set(&[(1, 1)]));
        assert_eq!(t.enliven.len(), 8);
    }
}
