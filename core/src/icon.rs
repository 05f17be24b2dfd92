use serde::{Deserialize, Serialize};

use crate::*;

/// Plain 8-bit RGB triple handed to renderers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Fixed surface colors shared by every renderer.
pub mod palette {
    use super::Rgb;

    pub const BACKGROUND: Rgb = Rgb(60, 60, 100);
    pub const LIGHT_BACKGROUND: Rgb = Rgb(100, 100, 100);
    pub const TILE: Rgb = Rgb(255, 255, 255);
    pub const HIGHLIGHT: Rgb = Rgb(0, 0, 255);
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shape {
    Donut,
    Square,
    Diamond,
    Lines,
    Oval,
}

impl Shape {
    pub const ALL: [Shape; 5] = [
        Shape::Donut,
        Shape::Square,
        Shape::Diamond,
        Shape::Lines,
        Shape::Oval,
    ];

    const fn index(self) -> usize {
        self as usize
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Green,
    Blue,
    Yellow,
    Orange,
    Purple,
    Cyan,
}

impl Color {
    pub const ALL: [Color; 7] = [
        Color::Red,
        Color::Green,
        Color::Blue,
        Color::Yellow,
        Color::Orange,
        Color::Purple,
        Color::Cyan,
    ];

    pub const fn rgb(self) -> Rgb {
        use Color::*;
        match self {
            Red => Rgb(255, 0, 0),
            Green => Rgb(0, 255, 0),
            Blue => Rgb(0, 0, 255),
            Yellow => Rgb(255, 255, 0),
            Orange => Rgb(255, 128, 0),
            Purple => Rgb(255, 0, 255),
            Cyan => Rgb(0, 255, 255),
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// What a tile hides. Two tiles showing equal icons form a match.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Icon {
    pub shape: Shape,
    pub color: Color,
}

impl Icon {
    pub const fn new(shape: Shape, color: Color) -> Self {
        Self { shape, color }
    }

    /// Dense position of this icon in the catalog, always below [`CATALOG_SIZE`].
    pub const fn catalog_index(self) -> usize {
        self.color.index() * Shape::ALL.len() + self.shape.index()
    }
}

/// Number of distinct icons, one per shape and color combination.
pub const CATALOG_SIZE: usize = Shape::ALL.len() * Color::ALL.len();

/// Every icon in the catalog, grouped by color.
pub fn all_icons() -> impl Iterator<Item = Icon> {
    Color::ALL
        .into_iter()
        .flat_map(|color| Shape::ALL.into_iter().map(move |shape| Icon::new(shape, color)))
}

/// Checks that a `size` board can be filled with distinct pairs from the catalog.
pub fn validate_feasible((size_x, size_y): Coord2) -> core::result::Result<(), ConfigError> {
    if size_x == 0 || size_y == 0 {
        return Err(ConfigError::EmptyBoard);
    }

    let cells = mult(size_x, size_y);
    if cells % 2 != 0 {
        return Err(ConfigError::OddCellCount { cells });
    }

    let needed = cells / 2;
    let available = CATALOG_SIZE as CellCount;
    if needed > available {
        return Err(ConfigError::NotEnoughIcons { needed, available });
    }

    Ok(())
}
