use crossterm::event::Event as CrossTermEvent;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;
use crossterm::event::MouseButton;
use crossterm::event::MouseEvent;
use crossterm::event::MouseEventKind;
use tracing::trace;

use crate::events::AppEvent;
use crate::events::Event;
use crate::events::SeedEvent;
use crate::render::Canvas;

/// Converts a crossterm event into a gridlife event
///
/// Mouse positions are translated to grid coordinates through `canvas`, assuming it is drawn from
/// the top left corner of the terminal. Clicks that miss the grid are dropped.
pub fn convert_event(event: CrossTermEvent, canvas: &Canvas) -> Option<Event> {
    trace!(?event, "terminal event");

    match event {
        CrossTermEvent::Key(key_event) => convert_key(key_event),
        CrossTermEvent::Mouse(MouseEvent {
            kind: MouseEventKind::Down(button),
            column,
            row,
            ..
        }) => match button {
            MouseButton::Left => {
                let (x, y) = canvas.cell_at(column, row)?;
                Some(Event::SeedEvent(SeedEvent::PointerDown { x, y }))
            }
            MouseButton::Right => Some(Event::SeedEvent(SeedEvent::Launch)),
            MouseButton::Middle => None,
        },
        CrossTermEvent::Resize(cols, rows) => Some(Event::AppEvent(AppEvent::Resize { cols, rows })),
        _ => None,
    }
}

fn convert_key(key_event: KeyEvent) -> Option<Event> {
    // Windows reports releases too
    if key_event.kind == KeyEventKind::Release {
        return None;
    }

    let event = match key_event {
        KeyEvent {
            code: KeyCode::Char('q') | KeyCode::Esc,
            ..
        }
        | KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            ..
        } => Event::AppEvent(AppEvent::Exit),
        KeyEvent {
            code: KeyCode::Enter,
            ..
        } => Event::SeedEvent(SeedEvent::Confirm),
        KeyEvent {
            code: KeyCode::Char('r'),
            ..
        } => Event::SeedEvent(SeedEvent::Randomize),
        KeyEvent {
            code: KeyCode::Char(' '),
            ..
        } => Event::SeedEvent(SeedEvent::Start),
        KeyEvent {
            code: KeyCode::Char('g'),
            ..
        } => Event::AppEvent(AppEvent::ToggleGridlines),
        KeyEvent {
            code: KeyCode::Char('s'),
            ..
        } => Event::AppEvent(AppEvent::ToggleShape),
        _ => return None,
    };

    Some(event)
}
