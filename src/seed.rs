use std::fmt;

use rand::Rng;
use thiserror::Error;
use tracing::debug;

use crate::Coord;

/// Where the seeding workflow is at.
///
/// ```notrust
/// Idle --select--> Selecting --confirm--> Seeded --start--> Running
///   |                  |                    ^
///   +------------------+--lock / randomize--+
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionState {
    /// Nothing picked yet
    #[default]
    Idle,

    /// Accumulating picked cells. The simulation can't run yet.
    Selecting,

    /// A seed is locked in, waiting to start
    Seeded,

    /// The engine is ticking. There is no way back from here.
    Running,
}

impl fmt::Display for SelectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SelectionState::Idle => "idle",
            SelectionState::Selecting => "selecting",
            SelectionState::Seeded => "seeded",
            SelectionState::Running => "running",
        };

        f.write_str(s)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Nothing selected yet, pick at least one cell before confirming")]
    EmptyConfirm,

    #[error("Cells can no longer be picked, the selection is {0}")]
    SelectionClosed(SelectionState),

    #[error("Cannot start while {0}, a seed has to be locked in first")]
    NotSeeded(SelectionState),

    #[error("Cannot advance a generation while {0}")]
    NotRunning(SelectionState),
}

/// The seeding workflow: the picked cells, the locked in seed, and the state tying them together.
///
/// Coordinates are taken as given. Bounds are the grid's business.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    state: SelectionState,

    /// Picked cells, in the order they were picked. May contain duplicates.
    selected: Vec<Coord>,

    seed: Option<Vec<Coord>>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn selected(&self) -> &[Coord] {
        &self.selected
    }

    pub fn seed(&self) -> Option<&[Coord]> {
        self.seed.as_deref()
    }

    /// Add a cell to the selection.
    pub fn select(&mut self, cell: Coord) -> Result<(), SelectionError> {
        match self.state {
            SelectionState::Idle | SelectionState::Selecting => {
                self.selected.push(cell);
                self.state = SelectionState::Selecting;

                Ok(())
            }
            state => Err(SelectionError::SelectionClosed(state)),
        }
    }

    /// Lock in the picked cells as the seed.
    pub fn confirm(&mut self) -> Result<&[Coord], SelectionError> {
        match self.state {
            SelectionState::Idle | SelectionState::Selecting if self.selected.is_empty() => {
                Err(SelectionError::EmptyConfirm)
            }
            SelectionState::Idle | SelectionState::Selecting => {
                let seed = self.selected.clone();
                Ok(self.lock_unchecked(seed))
            }
            state => Err(SelectionError::SelectionClosed(state)),
        }
    }

    /// Lock in `seed` directly, discarding whatever was picked so far.
    pub fn lock(&mut self, seed: Vec<Coord>) -> Result<&[Coord], SelectionError> {
        match self.state {
            SelectionState::Idle | SelectionState::Selecting => Ok(self.lock_unchecked(seed)),
            state => Err(SelectionError::SelectionClosed(state)),
        }
    }

    /// Move from `Seeded` to `Running`, handing back the seed to bring to life.
    pub fn start(&mut self) -> Result<&[Coord], SelectionError> {
        match (self.state, &self.seed) {
            (SelectionState::Seeded, Some(seed)) => {
                self.state = SelectionState::Running;

                Ok(seed.as_slice())
            }
            (state, _) => Err(SelectionError::NotSeeded(state)),
        }
    }

    fn lock_unchecked(&mut self, seed: Vec<Coord>) -> &[Coord] {
        debug!(cells = seed.len(), "seed locked in");

        self.state = SelectionState::Seeded;
        self.seed.insert(seed).as_slice()
    }
}

/// Draw a random seed for a `width` by `height` grid.
///
/// The number of cells `k` is drawn from `[0, width * height]`, then `k` x and `k` y coordinates
/// are drawn independently, with replacement, and paired up. This is not a sample of distinct
/// cells: the same cell can come up more than once.
pub fn random_seed<R>(rng: &mut R, width: usize, height: usize) -> Vec<Coord>
where
    R: Rng + ?Sized,
{
    let k = rng.gen_range(0..=width.saturating_mul(height));

    scatter(rng, width, height, k)
}

/// Pair up `k` random x coordinates with `k` random y coordinates. See [`random_seed`].
///
/// An empty grid has no coordinates to draw from, so nothing is returned whatever `k` is.
pub fn scatter<R>(rng: &mut R, width: usize, height: usize, k: usize) -> Vec<Coord>
where
    R: Rng + ?Sized,
{
    if width == 0 || height == 0 {
        return Vec::new();
    }

    let xs: Vec<usize> = (0..k).map(|_| rng.gen_range(0..width)).collect();
    let ys: Vec<usize> = (0..k).map(|_| rng.gen_range(0..height)).collect();

    xs.into_iter().zip(ys).collect()
}

#[cfg(test)]
mod test {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::Selection;
    use super::SelectionError;
    use super::SelectionState;

    #[test]
    fn picking_cells() {
        let mut selection = Selection::new();
        assert_eq!(selection.state(), SelectionState::Idle);

        selection.select((1, 1)).unwrap();
        assert_eq!(selection.state(), SelectionState::Selecting);

        selection.select((2, 1)).unwrap();
        selection.select((1, 1)).unwrap();
        assert_eq!(selection.selected(), &[(1, 1), (2, 1), (1, 1)]);
        assert_eq!(selection.seed(), None);
    }

    #[test]
    fn confirm_locks_the_selection() {
        let mut selection = Selection::new();
        selection.select((0, 3)).unwrap();
        selection.select((4, 0)).unwrap();

        assert_eq!(selection.confirm().unwrap(), &[(0, 3), (4, 0)]);
        assert_eq!(selection.state(), SelectionState::Seeded);

        assert_eq!(
            selection.select((1, 1)),
            Err(SelectionError::SelectionClosed(SelectionState::Seeded))
        );
        assert_eq!(selection.seed(), Some([(0, 3), (4, 0)].as_slice()));
    }

    #[test]
    fn empty_confirm_is_a_no_op() {
        let mut selection = Selection::new();
        assert_eq!(selection.confirm(), Err(SelectionError::EmptyConfirm));
        assert_eq!(selection.state(), SelectionState::Idle);
        assert_eq!(selection.seed(), None);
    }

    #[test]
    fn lock_replaces_the_selection() {
        let mut selection = Selection::new();
        selection.select((0, 0)).unwrap();

        selection.lock(vec![(2, 2)]).unwrap();

        assert_eq!(selection.state(), SelectionState::Seeded);
        assert_eq!(selection.seed(), Some([(2, 2)].as_slice()));
    }

    #[test]
    fn start_requires_a_seed() {
        let mut selection = Selection::new();
        assert_eq!(
            selection.start(),
            Err(SelectionError::NotSeeded(SelectionState::Idle))
        );

        selection.lock(vec![]).unwrap();
        assert!(selection.start().unwrap().is_empty());
        assert_eq!(selection.state(), SelectionState::Running);

        assert_eq!(
            selection.start(),
            Err(SelectionError::NotSeeded(SelectionState::Running))
        );
        assert_eq!(
            selection.lock(vec![(1, 1)]),
            Err(SelectionError::SelectionClosed(SelectionState::Running))
        );
    }

    #[test]
    fn scatter_stays_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        let seed = super::scatter(&mut rng, 3, 7, 50);

        assert_eq!(seed.len(), 50);
        assert!(seed.iter().all(|&(x, y)| x < 3 && y < 7));
    }

    #[test]
    fn scatter_nothing() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        assert!(super::scatter(&mut rng, 10, 10, 0).is_empty());
    }

    #[test]
    fn scatter_on_an_empty_grid() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        assert!(super::scatter(&mut rng, 0, 10, 5).is_empty());
        assert!(super::scatter(&mut rng, 10, 0, 5).is_empty());
        assert!(super::random_seed(&mut rng, 0, 0).is_empty());
    }

    #[test]
    fn random_seed_is_reproducible() {
        let a = super::random_seed(&mut ChaCha8Rng::seed_from_u64(7), 10, 10);
        let b = super::random_seed(&mut ChaCha8Rng::seed_from_u64(7), 10, 10);

        assert_eq!(a, b);
        assert!(a.len() <= 100);
    }
}
