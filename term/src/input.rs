use std::time::Duration;

use concentration_core::{InputEvent, InputSource, Point};
use crossterm::event::{
    self, Event, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};

/// Pixel the session sees for a terminal cell, the inverse of the renderer's mapping.
pub fn to_point(column: u16, row: u16) -> Point {
    (i32::from(column), i32::from(row) * 2)
}

pub fn translate(event: Event) -> Option<InputEvent> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
            KeyCode::Esc | KeyCode::Char('q') => Some(InputEvent::QuitRequested),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(InputEvent::QuitRequested)
            }
            _ => None,
        },
        Event::Mouse(mouse) => {
            let (x, y) = to_point(mouse.column, mouse.row);
            match mouse.kind {
                MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                    Some(InputEvent::PointerMoved { x, y })
                }
                MouseEventKind::Up(MouseButton::Left) => Some(InputEvent::PointerClicked { x, y }),
                _ => None,
            }
        }
        _ => None,
    }
}

/// Drains whatever crossterm has queued without blocking.
#[derive(Debug, Default)]
pub struct TerminalInput;

impl InputSource for TerminalInput {
    fn poll(&mut self) -> Option<InputEvent> {
        loop {
            match event::poll(Duration::ZERO) {
                Ok(true) => {}
                Ok(false) => return None,
                Err(err) => {
                    log::error!("Polling terminal events failed: {err}");
                    return Some(InputEvent::QuitRequested);
                }
            }
            match event::read() {
                Ok(event) => {
                    if let Some(input) = translate(event) {
                        return Some(input);
                    }
                }
                Err(err) => {
                    log::error!("Reading terminal event failed: {err}");
                    return Some(InputEvent::QuitRequested);
                }
            }
        }
    }
}
