use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use thiserror::Error;
use tracing::debug;
use tracing::info;

use crate::Coord;
use crate::config::Config;
use crate::engine::Engine;
use crate::events::SeedEvent;
use crate::grid::Grid;
use crate::grid::GridError;
use crate::grid::Transition;
use crate::rule_set::RuleSet;
use crate::seed;
use crate::seed::Selection;
use crate::seed::SelectionError;
use crate::seed::SelectionState;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LifeError {
    #[error("Grid error: {0}")]
    Grid(#[from] GridError),

    #[error("Selection error: {0}")]
    Selection(#[from] SelectionError),
}

impl LifeError {
    /// Selection errors leave everything as it was and can be shrugged off. Grid errors point at a
    /// bug, either in coordinate conversion or in the engine.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, LifeError::Selection(_))
    }
}

/// A game of life: the grid, the engine driving it, and the seeding workflow in front of it.
///
/// The presentation layer reads the grid and the selection from here, and forwards input through
/// the `on_*` callbacks. Every callback either does what it says or returns an error and leaves
/// the game untouched.
pub struct Life {
    grid: Grid,
    engine: Engine,
    selection: Selection,
    rng: ChaCha8Rng,

    /// Generations computed since the run started
    generation: u64,
}

impl Life {
    /// A `width` by `height` game of Conway's life, with entropy for randomness.
    pub fn new(width: usize, height: usize) -> Result<Self, GridError> {
        Ok(Self {
            grid: Grid::new(width, height)?,
            engine: Engine::default(),
            selection: Selection::new(),
            rng: ChaCha8Rng::from_entropy(),
            generation: 0,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, GridError> {
        let life = Self::new(config.width, config.height)?.with_rules(config.rules);

        Ok(match config.rng_seed {
            Some(seed) => life.with_rng_seed(seed),
            None => life,
        })
    }

    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.engine = Engine::new(rules);
        self
    }

    /// Make randomized seeds reproducible
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
        self
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn state(&self) -> SelectionState {
        self.selection.state()
    }

    /// Cells picked so far, in order
    pub fn selected(&self) -> &[Coord] {
        self.selection.selected()
    }

    pub fn seed(&self) -> Option<&[Coord]> {
        self.selection.seed()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn rules(&self) -> RuleSet {
        self.engine.rules()
    }

    /// Dispatch a forwarded input event to its callback.
    pub fn handle(&mut self, event: SeedEvent) -> Result<(), LifeError> {
        match event {
            SeedEvent::PointerDown { x, y } => self.on_pointer_down(x, y),
            SeedEvent::Confirm => self.on_confirm(),
            SeedEvent::Randomize => self.on_randomize(),
            SeedEvent::Start => self.on_start(),
            SeedEvent::Launch => {
                // Already confirmed with Enter, only the start is left
                if self.state() != SelectionState::Seeded {
                    self.on_confirm()?;
                }

                self.on_start()
            }
        }
    }

    /// Pick the cell at `(x, y)`. It shows up alive right away, but only as a preview.
    pub fn on_pointer_down(&mut self, x: usize, y: usize) -> Result<(), LifeError> {
        self.grid.is_alive(x, y)?;
        self.selection.select((x, y))?;
        self.grid.set_alive(x, y, true)?;

        debug!(x, y, picked = self.selection.selected().len(), "cell picked");

        Ok(())
    }

    /// Lock in the picked cells as the seed. Fails without side effects if nothing was picked.
    pub fn on_confirm(&mut self) -> Result<(), LifeError> {
        let seed = self.selection.confirm()?;
        info!(cells = seed.len(), "selection confirmed");

        Ok(())
    }

    /// Lock in `cells` as the seed, skipping interactive selection.
    pub fn seed_cells<I>(&mut self, cells: I) -> Result<(), LifeError>
    where
        I: IntoIterator<Item = Coord>,
    {
        let cells: Vec<Coord> = cells.into_iter().collect();
        for &(x, y) in &cells {
            self.grid.is_alive(x, y)?;
        }

        self.selection.lock(cells)?;

        Ok(())
    }

    /// Seed the grid at random and start running.
    pub fn on_randomize(&mut self) -> Result<(), LifeError> {
        if !matches!(
            self.state(),
            SelectionState::Idle | SelectionState::Selecting
        ) {
            return Err(SelectionError::SelectionClosed(self.state()).into());
        }

        let cells = seed::random_seed(&mut self.rng, self.grid.width(), self.grid.height());
        info!(cells = cells.len(), "random seed drawn");

        self.selection.lock(cells)?;
        self.on_start()
    }

    /// Bring the seed to life and start running.
    pub fn on_start(&mut self) -> Result<(), LifeError> {
        // Seed coordinates were bounds checked on the way in, so this can't fail halfway
        let seed = self.selection.start()?;
        let init = Transition::enliven_only(seed.iter().copied());

        self.grid.clear();
        self.grid.apply_transition(&init)?;

        info!(
            population = self.grid.population(),
            rules = %self.engine.rules(),
            "simulation running"
        );

        Ok(())
    }

    /// Advance one generation, returning the cells that flipped.
    pub fn on_tick(&mut self) -> Result<Transition, LifeError> {
        if self.state() != SelectionState::Running {
            return Err(SelectionError::NotRunning(self.state()).into());
        }

        let transition = self.engine.next_generation(&self.grid);
        self.grid.apply_transition(&transition)?;
        self.generation += 1;

        debug!(
            generation = self.generation,
            born = transition.enliven.len(),
            died = transition.kill.len(),
            population = self.grid.population(),
            "tick"
        );

        Ok(transition)
    }
}
