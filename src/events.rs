use crate::ScreenSize;

pub enum Event {
    SeedEvent(SeedEvent),
    AppEvent(AppEvent),
}

/// Input forwarded to [`crate::life::Life::handle`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedEvent {
    /// Pick the cell at grid coordinates `(x, y)`
    PointerDown { x: usize, y: usize },

    /// Lock in the picked cells
    Confirm,

    /// Seed at random and start
    Randomize,

    /// Start running a locked in seed
    Start,

    /// Confirm, then start
    Launch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    Resize { cols: ScreenSize, rows: ScreenSize },
    ToggleGridlines,
    ToggleShape,

    /// Exit the application
    Exit,
}
