use crate::*;

/// Screen placement of every tile: a centered grid of square tiles separated by gaps.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    size: Coord2,
    tile: i32,
    gap: i32,
    margin: Point,
}

impl Layout {
    pub fn new(config: &GameConfig) -> Self {
        let tile = i32::from(config.tile_size);
        let gap = i32::from(config.gap_size);
        let stride = tile + gap;
        let (window_x, window_y) = config.window;
        let margin = (
            (i32::from(window_x) - i32::from(config.size.0) * stride) / 2,
            (i32::from(window_y) - i32::from(config.size.1) * stride) / 2,
        );
        Self {
            size: config.size,
            tile,
            gap,
            margin,
        }
    }

    pub fn size(&self) -> Coord2 {
        self.size
    }

    pub fn tile_size(&self) -> i32 {
        self.tile
    }

    pub fn margin(&self) -> Point {
        self.margin
    }

    /// Top-left pixel of a tile.
    pub fn tile_origin(&self, (x, y): Coord2) -> Point {
        let stride = self.tile + self.gap;
        (
            i32::from(x) * stride + self.margin.0,
            i32::from(y) * stride + self.margin.1,
        )
    }

    pub fn tile_center(&self, coords: Coord2) -> Point {
        let (left, top) = self.tile_origin(coords);
        (left + self.tile / 2, top + self.tile / 2)
    }

    /// Tile under a screen point, `None` over gaps, margins or past the grid.
    pub fn cell_at_point(&self, (px, py): Point) -> Option<Coord2> {
        let x = self.axis_cell(px, self.margin.0, self.size.0)?;
        let y = self.axis_cell(py, self.margin.1, self.size.1)?;
        Some((x, y))
    }

    fn axis_cell(&self, pos: i32, margin: i32, count: Coord) -> Option<Coord> {
        let stride = self.tile + self.gap;
        let offset = pos - margin;
        if offset < 0 || stride <= 0 {
            return None;
        }
        if offset % stride >= self.tile {
            return None;
        }
        let index = Coord::try_from(offset / stride).ok()?;
        (index < count).then_some(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn margins_center_the_grid() {
        let layout = Layout::new(&GameConfig::default());

        assert_eq!(layout.margin(), (70, 65));
        assert_eq!(layout.tile_origin((0, 0)), (70, 65));
        assert_eq!(layout.tile_origin((9, 6)), (520, 365));
    }

    #[test]
    fn tile_centers_map_back_to_their_cell() {
        for config in [
            GameConfig::default(),
            GameConfig::new((4, 3)).unwrap().with_geometry(4, 2).fit_window(2),
            GameConfig::new((2, 1)).unwrap(),
        ] {
            let layout = Layout::new(&config);
            for coords in iter_coords(config.size) {
                assert_eq!(
                    layout.cell_at_point(layout.tile_center(coords)),
                    Some(coords),
                    "{config:?}"
                );
                assert_eq!(layout.cell_at_point(layout.tile_origin(coords)), Some(coords));
            }
        }
    }

    #[test]
    fn tile_edges_are_inclusive_exclusive() {
        let layout = Layout::new(&GameConfig::default());

        assert_eq!(layout.cell_at_point((109, 104)), Some((0, 0)));
        assert_eq!(layout.cell_at_point((110, 85)), None);
        assert_eq!(layout.cell_at_point((90, 105)), None);
        assert_eq!(layout.cell_at_point((120, 115)), Some((1, 1)));
    }

    #[test]
    fn gaps_and_margins_hit_nothing() {
        let layout = Layout::new(&GameConfig::default());

        // horizontal gap between (0, 0) and (1, 0)
        assert_eq!(layout.cell_at_point((115, 85)), None);
        // vertical gap between (0, 0) and (0, 1)
        assert_eq!(layout.cell_at_point((90, 110)), None);
        assert_eq!(layout.cell_at_point((10, 10)), None);
        assert_eq!(layout.cell_at_point((-5, 85)), None);
        // past the last column
        assert_eq!(layout.cell_at_point((575, 85)), None);
        assert_eq!(layout.cell_at_point((90, 420)), None);
    }
}
