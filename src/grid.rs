use std::collections::BTreeSet;

use thiserror::Error;

use crate::Coord;

/// Relative offsets of the 8 cells surrounding a cell, row by row.
///
/// ```notrust
///   (-1,-1) (0,-1) (1,-1)
///   (-1, 0)        (1, 0)
///   (-1, 1) (0, 1) (1, 1)
/// ```
const OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("({x}, {y}) is outside of the {width}x{height} grid")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    #[error("({x}, {y}) is scheduled to be both enlivened and killed")]
    InvalidTransition { x: usize, y: usize },

    #[error("A grid needs a positive width and height, got {width}x{height}")]
    EmptyDimensions { width: usize, height: usize },

    #[error("A {width}x{height} grid has more cells than fit in memory")]
    TooLarge { width: usize, height: usize },
}

/// A fixed size, non-wrapping board of live and dead cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /// Cell states, row major
    cells: Vec<bool>,

    width: usize,
    height: usize,
}

impl Grid {
    /// Create a `width` by `height` grid where every cell is dead.
    pub fn new(width: usize, height: usize) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::EmptyDimensions { width, height });
        }

        let len = width
            .checked_mul(height)
            .filter(|&len| len <= isize::MAX as usize)
            .ok_or(GridError::TooLarge { width, height })?;

        Ok(Self {
            cells: vec![false; len],
            width,
            height,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_alive(&self, x: usize, y: usize) -> Result<bool, GridError> {
        let i = self.index(x, y)?;

        Ok(self.cells[i])
    }

    pub fn set_alive(&mut self, x: usize, y: usize, alive: bool) -> Result<(), GridError> {
        let i = self.index(x, y)?;
        self.cells[i] = alive;

        Ok(())
    }

    /// The in-bounds coordinates adjacent to `(x, y)`, diagonals included.
    pub fn neighbors(&self, x: usize, y: usize) -> Result<Neighbors, GridError> {
        self.index(x, y)?;

        Ok(Neighbors::new(x, y, self.width, self.height))
    }

    /// Enliven every cell in `transition.enliven` and kill every cell in `transition.kill`.
    ///
    /// Both sets are validated before any cell is written, so a rejected transition leaves the
    /// grid untouched.
    pub fn apply_transition(&mut self, transition: &Transition) -> Result<(), GridError> {
        if let Some(&(x, y)) = transition.enliven.intersection(&transition.kill).next() {
            return Err(GridError::InvalidTransition { x, y });
        }

        for &(x, y) in transition.enliven.iter().chain(&transition.kill) {
            self.index(x, y)?;
        }

        for &(x, y) in &transition.enliven {
            self.cells[y * self.width + x] = true;
        }

        for &(x, y) in &transition.kill {
            self.cells[y * self.width + x] = false;
        }

        Ok(())
    }

    /// Number of live cells on the board
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// Kill every cell
    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    /// Every coordinate with its state, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (Coord, bool)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &alive)| ((i % self.width, i / self.width), alive))
    }

    /// Count the live neighbors of a cell already known to be in bounds.
    pub(crate) fn live_neighbors(&self, x: usize, y: usize) -> u8 {
        Neighbors::new(x, y, self.width, self.height)
            .filter(|&(nx, ny)| self.cells[ny * self.width + nx])
            .count() as u8
    }

    fn index(&self, x: usize, y: usize) -> Result<usize, GridError> {
        if x >= self.width || y >= self.height {
            return Err(GridError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }

        Ok(y * self.width + x)
    }
}

/// Iterator over the in-bounds neighbors of a cell. See [`Grid::neighbors`].
#[derive(Debug, Clone)]
pub struct Neighbors {
    x: usize,
    y: usize,
    width: usize,
    height: usize,

    /// Next entry of `OFFSETS` to try
    next: usize,
}

impl Neighbors {
    fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
            next: 0,
        }
    }
}

impl Iterator for Neighbors {
    type Item = Coord;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(&(dx, dy)) = OFFSETS.get(self.next) {
            self.next += 1;

            // `checked_add_signed` fails below zero, which leaves only the far edges to check
            let (Some(x), Some(y)) = (self.x.checked_add_signed(dx), self.y.checked_add_signed(dy))
            else {
                continue;
            };

            if x < self.width && y < self.height {
                return Some((x, y));
            }
        }

        None
    }
}

/// The births and deaths that take a grid from one generation to the next.
///
/// A coordinate may appear in at most one of the two sets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transition {
    pub enliven: BTreeSet<Coord>,
    pub kill: BTreeSet<Coord>,
}

impl Transition {
    /// A transition that only brings `cells` to life
    pub fn enliven_only<I>(cells: I) -> Self
    where
        I: IntoIterator<Item = Coord>,
    {
        Self {
            enliven: cells.into_iter().collect(),
            kill: BTreeSet::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.enliven.is_empty() && self.kill.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::Grid;
    use super::GridError;
    use super::Transition;

    #[test]
    fn new_grid_is_dead() {
        let grid = Grid::new(3, 2).unwrap();

        assert_eq!(grid.population(), 0);
        assert_eq!(grid.cells().count(), 6);
    }

    #[test]
    fn zero_sized_grid() {
        assert_eq!(
            Grid::new(0, 4),
            Err(GridError::EmptyDimensions {
                width: 0,
                height: 4
            })
        );
    }

    #[test]
    fn oversized_grid() {
        let side = 1 << (usize::BITS / 2);

        assert_eq!(
            Grid::new(side, side + 1),
            Err(GridError::TooLarge {
                width: side,
                height: side + 1
            })
        );
        assert!(matches!(
            Grid::new(usize::MAX, 2),
            Err(GridError::TooLarge { .. })
        ));
    }

    #[test]
    fn set_and_read() {
        let mut grid = Grid::new(4, 3).unwrap();

        grid.set_alive(3, 2, true).unwrap();
        assert!(grid.is_alive(3, 2).unwrap());
        assert!(!grid.is_alive(2, 2).unwrap());

        grid.set_alive(3, 2, false).unwrap();
        assert!(!grid.is_alive(3, 2).unwrap());
    }

    #[test]
    fn out_of_bounds_is_rejected() {
        let mut grid = Grid::new(4, 3).unwrap();
        let err = GridError::OutOfBounds {
            x: 4,
            y: 0,
            width: 4,
            height: 3,
        };

        assert_eq!(grid.is_alive(4, 0), Err(err));
        assert!(grid.set_alive(0, 3, true).is_err());
        assert!(grid.neighbors(7, 7).is_err());
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn corner_neighbors() {
        let grid = Grid::new(5, 5).unwrap();

        let n: Vec<_> = grid.neighbors(0, 0).unwrap().collect();
        assert_eq!(n, vec![(1, 0), (0, 1), (1, 1)]);

        let n: Vec<_> = grid.neighbors(4, 4).unwrap().collect();
        assert_eq!(n, vec![(3, 3), (4, 3), (3, 4)]);
    }

    #[test]
    fn edge_and_interior_neighbors() {
        let grid = Grid::new(5, 5).unwrap();

        assert_eq!(grid.neighbors(2, 0).unwrap().count(), 5);
        assert_eq!(grid.neighbors(0, 2).unwrap().count(), 5);
        assert_eq!(grid.neighbors(2, 2).unwrap().count(), 8);
    }

    #[test]
    fn single_cell_grid_has_no_neighbors() {
        let grid = Grid::new(1, 1).unwrap();

        assert_eq!(grid.neighbors(0, 0).unwrap().count(), 0);
    }

    #[test]
    fn apply_transition() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.set_alive(0, 0, true).unwrap();

        let mut transition = Transition::enliven_only([(1, 1), (2, 2)]);
        transition.kill.insert((0, 0));

        grid.apply_transition(&transition).unwrap();

        assert!(!grid.is_alive(0, 0).unwrap());
        assert!(grid.is_alive(1, 1).unwrap());
        assert!(grid.is_alive(2, 2).unwrap());
        assert_eq!(grid.population(), 2);
    }

    #[test]
    fn overlapping_transition_is_rejected() {
        let mut grid = Grid::new(3, 3).unwrap();

        let mut transition = Transition::enliven_only([(0, 0), (1, 1)]);
        transition.kill.insert((1, 1));

        assert_eq!(
            grid.apply_transition(&transition),
            Err(GridError::InvalidTransition { x: 1, y: 1 })
        );
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn out_of_bounds_transition_writes_nothing() {
        let mut grid = Grid::new(3, 3).unwrap();
        let transition = Transition::enliven_only([(0, 0), (3, 0)]);

        assert!(grid.apply_transition(&transition).is_err());
        assert!(!grid.is_alive(0, 0).unwrap());
    }
}
