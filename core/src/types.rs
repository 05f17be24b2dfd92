/// Single coordinate axis used for board width, height, and positions.
pub type Coord = u8;

/// Count type used for pair counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional cell coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

/// Screen-space position in pixels `(x, y)`.
pub type Point = (i32, i32);

/// How many pixels of a tile are still covered during a sweep.
///
/// Can dip slightly below zero on the last frame of a reveal, renderers clamp it.
pub type Coverage = i16;

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Iterates every coordinate of a `size` grid, column by column (`x` outer, `y` inner).
pub fn iter_coords((size_x, size_y): Coord2) -> impl Iterator<Item = Coord2> {
    (0..size_x).flat_map(move |x| (0..size_y).map(move |y| (x, y)))
}
