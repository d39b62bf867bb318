use std::str::FromStr;

use thiserror::Error;

use crate::Coord;
use crate::ScreenSize;
use crate::grid::Grid;

/// Terminal columns taken up by one cell
pub const CELL_COLUMNS: ScreenSize = 2;

/// Terminal rows taken up by one cell
pub const CELL_ROWS: ScreenSize = 1;

/// How a live cell is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Shape {
    #[default]
    Rectangle,
    Circle,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown shape \"{0}\", expected rect or circle")]
pub struct ShapeError(String);

impl FromStr for Shape {
    type Err = ShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rect" | "rectangle" => Ok(Shape::Rectangle),
            "circle" => Ok(Shape::Circle),
            _ => Err(ShapeError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub shape: Shape,

    /// Draw dead cells as a dotted grid rather than blank space
    pub gridlines: bool,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            shape: Shape::Rectangle,
            gridlines: true,
        }
    }
}

impl Style {
    /// The glyphs for a single cell. Each is [`CELL_COLUMNS`] wide.
    pub fn glyph(&self, alive: bool) -> &'static str {
        match (alive, self.shape, self.gridlines) {
            (true, Shape::Rectangle, _) => "██",
            (true, Shape::Circle, _) => "()",
            (false, _, true) => "··",
            (false, _, false) => "  ",
        }
    }
}

/// Draws a [`Grid`] as text, one glyph per cell and one line per row.
///
/// The canvas only ever looks at cell states. Where a cell lands on screen is worked out from its
/// coordinates and the fixed cell size.
pub struct Canvas {
    /// The frame buffer
    fb: String,

    style: Style,

    /// Width of the grid, in cells
    w: usize,

    /// Height of the grid, in cells
    h: usize,
}

impl Canvas {
    pub fn new(w: usize, h: usize, style: Style) -> Self {
        // Glyphs are at most 3 bytes per char, and each line needs a newline
        let fb = String::with_capacity(w * h * CELL_COLUMNS as usize * 3 + h);

        Self { fb, style, w, h }
    }

    pub fn style(&self) -> Style {
        self.style
    }

    pub fn toggle_gridlines(&mut self) {
        self.style.gridlines = !self.style.gridlines;
    }

    pub fn toggle_shape(&mut self) {
        self.style.shape = match self.style.shape {
            Shape::Rectangle => Shape::Circle,
            Shape::Circle => Shape::Rectangle,
        };
    }

    /// The cell under a terminal position, relative to the top left of the drawing.
    ///
    /// Positions past the right or bottom of the drawing have no cell.
    pub fn cell_at(&self, column: ScreenSize, row: ScreenSize) -> Option<Coord> {
        let x = (column / CELL_COLUMNS) as usize;
        let y = (row / CELL_ROWS) as usize;

        (x < self.w && y < self.h).then_some((x, y))
    }

    /// Redraw the frame buffer from `grid`. The canvas takes on the size of the grid it draws.
    pub fn render(&mut self, grid: &Grid) -> &str {
        self.w = grid.width();
        self.h = grid.height();

        self.fb.clear();

        for ((x, _), alive) in grid.cells() {
            self.fb.push_str(self.style.glyph(alive));

            if x + 1 == self.w {
                self.fb.push('\n');
            }
        }

        &self.fb
    }
}
