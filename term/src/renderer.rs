//! Mouse-driven terminal surface.
//!
//! One pixel of the shared [`Layout`] maps to one terminal column horizontally
//! and to half a terminal row vertically, so square tiles look roughly square.
//! Draw calls paint into a [`FrameBuffer`] that is flushed on `present`.

use std::io::{self, Stdout, Write};

use concentration_core::{Coord2, Coverage, GameConfig, Icon, Layout, Renderer, Rgb, Shape, palette};
use crossterm::style::{Color as TermColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::{cursor, event, execute, queue, terminal};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    pub glyph: char,
    pub fg: Rgb,
    pub bg: Rgb,
}

impl Cell {
    const fn blank(bg: Rgb) -> Self {
        Self {
            glyph: ' ',
            fg: bg,
            bg,
        }
    }
}

/// Block of terminal cells, `col`/`row` may lie off screen.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CellRect {
    pub col: i32,
    pub row: i32,
    pub cols: i32,
    pub rows: i32,
}

impl CellRect {
    /// Terminal cells touched by a pixel rectangle.
    pub fn from_pixels(left: i32, top: i32, width: i32, height: i32) -> Self {
        let row = top.div_euclid(2);
        let end_row = (top + height + 1).div_euclid(2);
        Self {
            col: left,
            row,
            cols: width.max(0),
            rows: (end_row - row).max(0),
        }
    }

    fn contains(&self, col: i32, row: i32) -> bool {
        (self.col..self.col + self.cols).contains(&col) && (self.row..self.row + self.rows).contains(&row)
    }

    fn grow(&self, by: i32) -> Self {
        Self {
            col: self.col - by,
            row: self.row - by,
            cols: self.cols + 2 * by,
            rows: self.rows + 2 * by,
        }
    }
}

/// Terminal size needed to show a window of `width` x `height` pixels.
pub fn cells_for((width, height): (u16, u16)) -> (u16, u16) {
    (width, height.div_ceil(2))
}

#[derive(Clone, Debug, PartialEq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::blank(palette::BACKGROUND); usize::from(width) * usize::from(height)],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn get(&self, col: i32, row: i32) -> Option<&Cell> {
        self.index(col, row).map(|i| &self.cells[i])
    }

    pub fn fill(&mut self, bg: Rgb) {
        self.cells.fill(Cell::blank(bg));
    }

    pub fn fill_rect(&mut self, rect: CellRect, bg: Rgb) {
        self.for_each_in(rect, |cell| *cell = Cell::blank(bg));
    }

    /// Draws `glyph` over a block, keeping whatever background is there.
    pub fn paint_glyph(&mut self, rect: CellRect, glyph: char, fg: Rgb) {
        self.for_each_in(rect, |cell| {
            cell.glyph = glyph;
            cell.fg = fg;
        });
    }

    /// Colors the ring of cells just outside `rect`.
    pub fn outline(&mut self, rect: CellRect, bg: Rgb) {
        let ring = rect.grow(1);
        for row in ring.row..ring.row + ring.rows {
            for col in ring.col..ring.col + ring.cols {
                if rect.contains(col, row) {
                    continue;
                }
                if let Some(i) = self.index(col, row) {
                    self.cells[i] = Cell::blank(bg);
                }
            }
        }
    }

    fn for_each_in(&mut self, rect: CellRect, mut f: impl FnMut(&mut Cell)) {
        for row in rect.row..rect.row + rect.rows {
            for col in rect.col..rect.col + rect.cols {
                if let Some(i) = self.index(col, row) {
                    f(&mut self.cells[i]);
                }
            }
        }
    }

    fn index(&self, col: i32, row: i32) -> Option<usize> {
        let col = u16::try_from(col).ok().filter(|&c| c < self.width)?;
        let row = u16::try_from(row).ok().filter(|&r| r < self.height)?;
        Some(usize::from(row) * usize::from(self.width) + usize::from(col))
    }

    fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(usize::from(self.width().max(1)))
    }
}

const fn glyph(shape: Shape) -> char {
    match shape {
        Shape::Donut => '◎',
        Shape::Square => '■',
        Shape::Diamond => '◆',
        Shape::Lines => '╱',
        Shape::Oval => '●',
    }
}

const fn term_color(Rgb(r, g, b): Rgb) -> TermColor {
    TermColor::Rgb { r, g, b }
}

pub struct TerminalRenderer<W: Write = Stdout> {
    layout: Layout,
    fb: FrameBuffer,
    out: W,
    failure: Option<io::Error>,
}

impl TerminalRenderer<Stdout> {
    pub fn new(config: &GameConfig) -> Self {
        Self::with_writer(config, io::stdout())
    }

    pub fn enter(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.out,
            terminal::EnterAlternateScreen,
            event::EnableMouseCapture,
            cursor::Hide
        )
    }

    pub fn exit(&mut self) -> io::Result<()> {
        execute!(
            self.out,
            ResetColor,
            cursor::Show,
            event::DisableMouseCapture,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn with_writer(config: &GameConfig, out: W) -> Self {
        let (cols, rows) = cells_for(config.window);
        Self {
            layout: Layout::new(config),
            fb: FrameBuffer::new(cols, rows),
            out,
            failure: None,
        }
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.fb
    }

    /// First write error hit while presenting, if any.
    pub fn take_failure(&mut self) -> Option<io::Error> {
        self.failure.take()
    }

    fn tile_rect(&self, coords: Coord2, width: i32) -> CellRect {
        let (left, top) = self.layout.tile_origin(coords);
        let tile = self.layout.tile_size();
        CellRect::from_pixels(left, top, width, tile)
    }

    fn flush_frame(&mut self) -> io::Result<()> {
        let mut colors = None;
        for (row, cells) in self.fb.rows().enumerate() {
            queue!(self.out, cursor::MoveTo(0, row as u16))?;
            for cell in cells {
                if colors != Some((cell.fg, cell.bg)) {
                    queue!(
                        self.out,
                        SetForegroundColor(term_color(cell.fg)),
                        SetBackgroundColor(term_color(cell.bg))
                    )?;
                    colors = Some((cell.fg, cell.bg));
                }
                queue!(self.out, Print(cell.glyph))?;
            }
        }
        queue!(self.out, ResetColor)?;
        self.out.flush()
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn draw_flash(&mut self, color: Rgb) {
        self.fb.fill(color);
    }

    fn draw_covered_tile(&mut self, coords: Coord2) {
        let rect = self.tile_rect(coords, self.layout.tile_size());
        self.fb.fill_rect(rect, palette::TILE);
    }

    fn draw_partial_cover(&mut self, coords: Coord2, coverage: Coverage) {
        let width = i32::from(coverage).clamp(0, self.layout.tile_size());
        if width > 0 {
            let rect = self.tile_rect(coords, width);
            self.fb.fill_rect(rect, palette::TILE);
        }
    }

    fn draw_icon(&mut self, icon: Icon, coords: Coord2) {
        let rect = self.tile_rect(coords, self.layout.tile_size());
        self.fb.paint_glyph(rect, glyph(icon.shape), icon.color.rgb());
    }

    fn draw_highlight(&mut self, coords: Coord2) {
        let rect = self.tile_rect(coords, self.layout.tile_size());
        self.fb.outline(rect, palette::HIGHLIGHT);
    }

    fn present(&mut self) {
        if self.failure.is_some() {
            return;
        }
        if let Err(err) = self.flush_frame() {
            log::error!("Failed to draw frame: {err}");
            self.failure = Some(err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use concentration_core::Color;

    fn config() -> GameConfig {
        GameConfig::new((2, 2))
            .unwrap()
            .with_geometry(4, 2)
            .fit_window(2)
    }

    fn renderer() -> TerminalRenderer<Vec<u8>> {
        TerminalRenderer::with_writer(&config(), Vec::new())
    }

    #[test]
    fn pixel_rows_pair_up() {
        assert_eq!(
            CellRect::from_pixels(2, 2, 4, 4),
            CellRect {
                col: 2,
                row: 1,
                cols: 4,
                rows: 2
            }
        );
        assert_eq!(cells_for((16, 16)), (16, 8));
        assert_eq!(cells_for((16, 15)), (16, 8));
    }

    #[test]
    fn covered_tile_fills_its_block() {
        let mut renderer = renderer();
        renderer.draw_flash(palette::BACKGROUND);

        renderer.draw_covered_tile((1, 0));

        let fb = renderer.frame_buffer();
        assert!(fb.get(15, 7).is_some());
        assert!(fb.get(16, 0).is_none() && fb.get(0, 8).is_none());
        // tile (1, 0) spans columns 8..12 and rows 1..3
        assert_eq!(fb.get(8, 1).unwrap().bg, palette::TILE);
        assert_eq!(fb.get(11, 2).unwrap().bg, palette::TILE);
        assert_eq!(fb.get(12, 1).unwrap().bg, palette::BACKGROUND);
        assert_eq!(fb.get(8, 3).unwrap().bg, palette::BACKGROUND);
        assert_eq!(fb.get(2, 1).unwrap().bg, palette::BACKGROUND);
    }

    #[test]
    fn partial_cover_grows_from_the_left() {
        let mut renderer = renderer();
        renderer.draw_flash(palette::BACKGROUND);

        renderer.draw_partial_cover((0, 0), 2);
        let fb = renderer.frame_buffer();
        assert_eq!(fb.get(3, 1).unwrap().bg, palette::TILE);
        assert_eq!(fb.get(4, 1).unwrap().bg, palette::BACKGROUND);

        renderer.draw_flash(palette::BACKGROUND);
        renderer.draw_partial_cover((0, 0), -1);
        assert_eq!(renderer.frame_buffer().get(2, 1).unwrap().bg, palette::BACKGROUND);
    }

    #[test]
    fn icon_keeps_background() {
        let mut renderer = renderer();
        renderer.draw_flash(palette::LIGHT_BACKGROUND);

        renderer.draw_icon(Icon::new(Shape::Diamond, Color::Yellow), (0, 1));

        let cell = *renderer.frame_buffer().get(2, 4).unwrap();
        assert_eq!(
            cell,
            Cell {
                glyph: '◆',
                fg: Color::Yellow.rgb(),
                bg: palette::LIGHT_BACKGROUND
            }
        );
    }

    #[test]
    fn highlight_rings_the_tile() {
        let mut renderer = renderer();
        renderer.draw_flash(palette::BACKGROUND);
        renderer.draw_covered_tile((0, 0));

        renderer.draw_highlight((0, 0));

        let fb = renderer.frame_buffer();
        assert_eq!(fb.get(1, 0).unwrap().bg, palette::HIGHLIGHT);
        assert_eq!(fb.get(6, 3).unwrap().bg, palette::HIGHLIGHT);
        assert_eq!(fb.get(1, 2).unwrap().bg, palette::HIGHLIGHT);
        assert_eq!(fb.get(2, 1).unwrap().bg, palette::TILE);
        assert_eq!(fb.get(7, 1).unwrap().bg, palette::BACKGROUND);
    }

    #[test]
    fn present_writes_every_row() {
        let mut renderer = renderer();
        renderer.draw_flash(palette::BACKGROUND);

        renderer.present();

        assert!(renderer.take_failure().is_none());
        let written = String::from_utf8(renderer.out.clone()).unwrap();
        assert_eq!(written.matches(' ').count(), 16 * 8);
    }
}
