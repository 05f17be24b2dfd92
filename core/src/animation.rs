//! Frame sequences for the sliding tile covers and the win flash.
//!
//! Everything here only describes what to draw: a [`Sweep`] yields one
//! [`Coverage`] per frame for a fixed set of cells, and it is up to the caller
//! to redraw the board around it and to flip the [`RevealState`] at the right
//! moment.

use alloc::vec::Vec;
use core::iter::FusedIterator;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SweepKind {
    /// Cover shrinks from the full tile down to nothing.
    Reveal,
    /// Cover grows from nothing back to the full tile.
    Cover,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AnimationSequencer {
    tile_size: i32,
    step: i32,
}

impl AnimationSequencer {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            tile_size: i32::from(config.tile_size),
            step: i32::from(config.reveal_speed.max(1)),
        }
    }

    /// Frames in every reveal or cover sweep: enough steps to get from a full
    /// cover to zero, plus the starting frame. The last frame is exactly zero
    /// when `step` divides the tile size and never goes a whole step past it.
    pub fn frames_per_sweep(&self) -> u16 {
        let steps = (self.tile_size + self.step - 1) / self.step;
        u16::try_from(steps + 1).unwrap_or(u16::MAX)
    }

    pub fn reveal(&self, cells: Vec<Coord2>) -> Sweep {
        self.sweep(SweepKind::Reveal, cells)
    }

    pub fn cover(&self, cells: Vec<Coord2>) -> Sweep {
        self.sweep(SweepKind::Cover, cells)
    }

    /// Reveals then covers the board in random groups of at most `group_size`
    /// cells, one group after the other.
    pub fn intro<R: Rng + ?Sized>(
        &self,
        mut cells: Vec<Coord2>,
        group_size: usize,
        rng: &mut R,
    ) -> IntroSequence {
        cells.shuffle(rng);
        let groups: Vec<Vec<Coord2>> = cells
            .chunks(group_size.max(1))
            .map(<[Coord2]>::to_vec)
            .collect();
        log::trace!("Intro over {} cells in {} groups", cells.len(), groups.len());
        IntroSequence {
            sequencer: *self,
            group_count: groups.len(),
            groups: groups.into_iter(),
            pending_cover: None,
        }
    }

    pub fn flash(&self, count: u8) -> FlashSequence {
        FlashSequence {
            index: 0,
            count: count.into(),
        }
    }

    fn sweep(&self, kind: SweepKind, cells: Vec<Coord2>) -> Sweep {
        Sweep {
            kind,
            cells,
            tile_size: self.tile_size,
            step: self.step,
            frame: 0,
            frames: self.frames_per_sweep(),
        }
    }
}

/// One-shot sequence of coverage offsets applied to every cell in [`Sweep::cells`].
#[derive(Debug)]
pub struct Sweep {
    kind: SweepKind,
    cells: Vec<Coord2>,
    tile_size: i32,
    step: i32,
    frame: u16,
    frames: u16,
}

impl Sweep {
    pub fn kind(&self) -> SweepKind {
        self.kind
    }

    pub fn cells(&self) -> &[Coord2] {
        &self.cells
    }
}

impl Iterator for Sweep {
    type Item = Coverage;

    fn next(&mut self) -> Option<Self::Item> {
        if self.frame >= self.frames {
            return None;
        }
        let steps = match self.kind {
            SweepKind::Reveal => self.frame,
            SweepKind::Cover => self.frames - 1 - self.frame,
        };
        self.frame += 1;

        let coverage = self.tile_size - i32::from(steps) * self.step;
        Some(coverage.clamp(Coverage::MIN.into(), Coverage::MAX.into()) as Coverage)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::from(self.frames - self.frame);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Sweep {}

impl FusedIterator for Sweep {}

/// Reveal and cover sweeps of the intro groups, alternating.
#[derive(Debug)]
pub struct IntroSequence {
    sequencer: AnimationSequencer,
    groups: alloc::vec::IntoIter<Vec<Coord2>>,
    pending_cover: Option<Vec<Coord2>>,
    group_count: usize,
}

impl IntroSequence {
    pub fn group_count(&self) -> usize {
        self.group_count
    }
}

impl Iterator for IntroSequence {
    type Item = Sweep;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(cells) = self.pending_cover.take() {
            return Some(self.sequencer.cover(cells));
        }
        let group = self.groups.next()?;
        self.pending_cover = Some(group.clone());
        Some(self.sequencer.reveal(group))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.groups.len() * 2 + usize::from(self.pending_cover.is_some());
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for IntroSequence {}

impl FusedIterator for IntroSequence {}

/// Background colors of the win animation, starting with the light one.
#[derive(Debug)]
pub struct FlashSequence {
    index: u16,
    count: u16,
}

impl Iterator for FlashSequence {
    type Item = Rgb;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.count {
            return None;
        }
        let color = if self.index % 2 == 0 {
            palette::LIGHT_BACKGROUND
        } else {
            palette::BACKGROUND
        };
        self.index += 1;
        Some(color)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::from(self.count - self.index);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for FlashSequence {}

impl FusedIterator for FlashSequence {}
