use alloc::vec::Vec;
use core::ops::Index;
use ndarray::Array2;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::*;

/// Grid of icons where every icon used sits on exactly two cells.
///
/// Immutable once built, flipping tiles happens on the [`RevealState`] overlay.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    icons: Array2<Icon>,
}

impl Board {
    /// Deals a random subset of the catalog as shuffled pairs.
    pub fn generate<R: Rng + ?Sized>(size: Coord2, rng: &mut R) -> Result<Self> {
        validate_feasible(size)?;

        let pair_count = usize::from(mult(size.0, size.1) / 2);
        let mut catalog: Vec<Icon> = all_icons().collect();
        catalog.shuffle(rng);
        catalog.truncate(pair_count);

        let mut icons = Vec::with_capacity(pair_count * 2);
        icons.extend_from_slice(&catalog);
        icons.extend_from_slice(&catalog);
        icons.shuffle(rng);

        let icons = Array2::from_shape_vec(size.to_nd_index(), icons)
            .map_err(|_| GameError::InvalidBoardShape)?;
        log::debug!("Generated {}x{} board with {} pairs", size.0, size.1, pair_count);
        Ok(Self { icons })
    }

    /// Wraps a fixed layout, checking that it is made of distinct pairs only.
    pub fn from_icons(icons: Array2<Icon>) -> Result<Self> {
        let (dim_x, dim_y) = icons.dim();
        let size: Coord2 = (
            dim_x.try_into().map_err(|_| GameError::InvalidBoardShape)?,
            dim_y.try_into().map_err(|_| GameError::InvalidBoardShape)?,
        );
        validate_feasible(size)?;

        let mut counts = [0u16; CATALOG_SIZE];
        for icon in icons.iter() {
            counts[icon.catalog_index()] += 1;
        }
        if let Some(icon) = icons
            .iter()
            .copied()
            .find(|icon| counts[icon.catalog_index()] != 2)
        {
            return Err(GameError::UnpairedIcon(icon));
        }

        Ok(Self { icons })
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds { coords, size })
        }
    }

    pub fn size(&self) -> Coord2 {
        let (dim_x, dim_y) = self.icons.dim();
        // both dimensions were checked against `Coord` on construction
        (dim_x as Coord, dim_y as Coord)
    }

    pub fn total_cells(&self) -> CellCount {
        let (size_x, size_y) = self.size();
        mult(size_x, size_y)
    }

    pub fn pair_count(&self) -> CellCount {
        self.total_cells() / 2
    }

    pub fn icon_at(&self, coords: Coord2) -> Result<Icon> {
        let coords = self.validate_coords(coords)?;
        Ok(self[coords])
    }

    /// All cell coordinates, column by column.
    pub fn cells(&self) -> impl Iterator<Item = Coord2> + use<> {
        iter_coords(self.size())
    }

    /// Cells paired with their icons, column by column.
    pub fn iter(&self) -> impl Iterator<Item = (Coord2, Icon)> + '_ {
        self.cells().map(|coords| (coords, self[coords]))
    }
}

impl Index<Coord2> for Board {
    type Output = Icon;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.icons[coords.to_nd_index()]
    }
}

/// Face-up flags laid over a [`Board`], all covered when created.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RevealState {
    revealed: Array2<bool>,
    revealed_count: CellCount,
}

impl RevealState {
    pub fn new(size: Coord2) -> Self {
        Self {
            revealed: Array2::default(size.to_nd_index()),
            revealed_count: 0,
        }
    }

    pub fn size(&self) -> Coord2 {
        let (dim_x, dim_y) = self.revealed.dim();
        (dim_x as Coord, dim_y as Coord)
    }

    pub fn is_revealed(&self, coords: Coord2) -> Result<bool> {
        let coords = self.validate_coords(coords)?;
        Ok(self[coords])
    }

    /// Turns a tile face-up, returns whether it was covered before.
    pub fn reveal(&mut self, coords: Coord2) -> Result<bool> {
        self.set(coords, true)
    }

    /// Turns a tile face-down, returns whether it was revealed before.
    pub fn cover(&mut self, coords: Coord2) -> Result<bool> {
        self.set(coords, false)
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn all_revealed(&self) -> bool {
        usize::from(self.revealed_count) == self.revealed.len()
    }

    pub fn reset(&mut self) {
        self.revealed.fill(false);
        self.revealed_count = 0;
    }

    fn set(&mut self, coords: Coord2, value: bool) -> Result<bool> {
        let coords = self.validate_coords(coords)?;
        let cell = &mut self.revealed[coords.to_nd_index()];
        if *cell == value {
            return Ok(false);
        }
        *cell = value;
        if value {
            self.revealed_count += 1;
        } else {
            self.revealed_count -= 1;
        }
        Ok(true)
    }

    fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds { coords, size })
        }
    }
}

impl Index<Coord2> for RevealState {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.revealed[coords.to_nd_index()]
    }
}
