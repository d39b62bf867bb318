pub mod config;
pub mod engine;
pub mod events;
pub mod grid;
pub mod io;
pub mod life;
pub mod render;
pub mod rule_set;
pub mod seed;

pub type ScreenSize = u16;

/// A cell position on the grid, `(x, y)` from the top left
pub type Coord = (usize, usize);
