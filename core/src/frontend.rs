use core::time::Duration;
use serde::{Deserialize, Serialize};

use crate::*;

/// Pointer and window events, already in the pixel space of [`Layout`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    PointerMoved { x: i32, y: i32 },
    PointerClicked { x: i32, y: i32 },
    QuitRequested,
}

/// Drawing surface the session paints a frame on.
///
/// Calls between two [`Renderer::present`] make up one frame, later calls paint
/// over earlier ones. Geometry comes from the shared [`Layout`], the session only
/// hands out cell coordinates and logical icons. Failures are the renderer's own
/// business.
pub trait Renderer {
    /// Floods the whole surface with `color`. Every frame starts with one.
    fn draw_flash(&mut self, color: Rgb);

    fn draw_covered_tile(&mut self, coords: Coord2);

    /// Covers the leftmost `coverage` pixels of a tile, clamped to the tile.
    fn draw_partial_cover(&mut self, coords: Coord2, coverage: Coverage);

    fn draw_icon(&mut self, icon: Icon, coords: Coord2);

    /// Outlines the tile under the pointer.
    fn draw_highlight(&mut self, coords: Coord2);

    fn present(&mut self);
}

pub trait InputSource {
    /// Next pending event of the current tick, `None` once drained.
    fn poll(&mut self) -> Option<InputEvent>;
}

pub trait Clock {
    /// Waits out the rest of the current frame.
    fn tick(&mut self);

    /// Blocks for a fixed display delay.
    fn hold(&mut self, duration: Duration);
}

impl<T: Renderer + ?Sized> Renderer for &mut T {
    fn draw_flash(&mut self, color: Rgb) {
        (**self).draw_flash(color)
    }

    fn draw_covered_tile(&mut self, coords: Coord2) {
        (**self).draw_covered_tile(coords)
    }

    fn draw_partial_cover(&mut self, coords: Coord2, coverage: Coverage) {
        (**self).draw_partial_cover(coords, coverage)
    }

    fn draw_icon(&mut self, icon: Icon, coords: Coord2) {
        (**self).draw_icon(icon, coords)
    }

    fn draw_highlight(&mut self, coords: Coord2) {
        (**self).draw_highlight(coords)
    }

    fn present(&mut self) {
        (**self).present()
    }
}

impl<T: InputSource + ?Sized> InputSource for &mut T {
    fn poll(&mut self) -> Option<InputEvent> {
        (**self).poll()
    }
}

impl<T: Clock + ?Sized> Clock for &mut T {
    fn tick(&mut self) {
        (**self).tick()
    }

    fn hold(&mut self, duration: Duration) {
        (**self).hold(duration)
    }
}
