use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Idle -> AwaitingSecond
/// - AwaitingSecond -> Idle (match)
/// - AwaitingSecond -> Mismatched -> Idle (after covering)
/// - AwaitingSecond -> Won -> Idle (after reset)
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnState {
    Idle,
    AwaitingSecond { first: Coord2 },
    /// Both tiles are up and must be covered before the next turn.
    Mismatched { first: Coord2, second: Coord2 },
    Won,
}

impl Default for TurnState {
    fn default() -> Self {
        Self::Idle
    }
}

/// Tiles picked during the current turn.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Selection {
    None,
    One(Coord2),
    Two(Coord2, Coord2),
}

/// Turn state machine over a board and its face-up overlay.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchEngine {
    board: Board,
    revealed: RevealState,
    state: TurnState,
    pairs_found: CellCount,
}

impl MatchEngine {
    pub fn new(board: Board) -> Self {
        let revealed = RevealState::new(board.size());
        Self {
            board,
            revealed,
            state: Default::default(),
            pairs_found: 0,
        }
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn revealed(&self) -> &RevealState {
        &self.revealed
    }

    pub fn size(&self) -> Coord2 {
        self.board.size()
    }

    pub fn pairs_found(&self) -> CellCount {
        self.pairs_found
    }

    pub fn is_revealed(&self, coords: Coord2) -> Result<bool> {
        self.revealed.is_revealed(coords)
    }

    pub fn has_won(&self) -> bool {
        self.revealed.all_revealed()
    }

    pub fn selection(&self) -> Selection {
        match self.state {
            TurnState::Idle | TurnState::Won => Selection::None,
            TurnState::AwaitingSecond { first } => Selection::One(first),
            TurnState::Mismatched { first, second } => Selection::Two(first, second),
        }
    }

    /// Flips the tile at `coords` and resolves the pair once two tiles are up.
    pub fn select(&mut self, coords: Coord2) -> Result<SelectOutcome> {
        let coords = self.board.validate_coords(coords)?;

        match self.state {
            TurnState::Won => return Err(GameError::AlreadyEnded),
            TurnState::Mismatched { .. } => return Err(GameError::CoverPending),
            TurnState::Idle | TurnState::AwaitingSecond { .. } => {}
        }

        if self.revealed[coords] {
            log::trace!("{:?} already revealed, ignored", coords);
            return Ok(SelectOutcome::Ignored);
        }
        self.revealed.reveal(coords)?;

        let TurnState::AwaitingSecond { first } = self.state else {
            self.state = TurnState::AwaitingSecond { first: coords };
            return Ok(SelectOutcome::FirstRevealed(coords));
        };
        let second = coords;

        if self.board[first] != self.board[second] {
            log::debug!("{:?} and {:?} do not match", first, second);
            self.state = TurnState::Mismatched { first, second };
            return Ok(SelectOutcome::Mismatched { first, second });
        }

        self.pairs_found += 1;
        if self.has_won() {
            log::info!("All {} pairs found", self.pairs_found);
            self.state = TurnState::Won;
            Ok(SelectOutcome::Won { first, second })
        } else {
            log::debug!("{:?} and {:?} match", first, second);
            self.state = TurnState::Idle;
            Ok(SelectOutcome::Matched { first, second })
        }
    }

    /// Turns a mismatched pair face-down again and ends the turn.
    pub fn cover_mismatch(&mut self) -> Result<(Coord2, Coord2)> {
        let TurnState::Mismatched { first, second } = self.state else {
            return Err(GameError::NothingToCover);
        };
        self.revealed.cover(first)?;
        self.revealed.cover(second)?;
        self.state = TurnState::Idle;
        Ok((first, second))
    }

    /// Starts a new round on `board` with every tile face-down.
    pub fn reset(&mut self, board: Board) {
        if board.size() == self.revealed.size() {
            self.revealed.reset();
        } else {
            self.revealed = RevealState::new(board.size());
        }
        self.board = board;
        self.state = TurnState::Idle;
        self.pairs_found = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;

    const A: Icon = Icon::new(Shape::Diamond, Color::Orange);
    const B: Icon = Icon::new(Shape::Oval, Color::Green);

    // (0, 0) = A, (0, 1) = B, (1, 0) = A, (1, 1) = B
    fn engine() -> MatchEngine {
        MatchEngine::new(Board::from_icons(arr2(&[[A, B], [A, B]])).unwrap())
    }

    #[test]
    fn first_selection_awaits_second() {
        let mut engine = engine();

        assert_eq!(engine.select((0, 0)), Ok(SelectOutcome::FirstRevealed((0, 0))));
        assert_eq!(engine.state(), TurnState::AwaitingSecond { first: (0, 0) });
        assert_eq!(engine.selection(), Selection::One((0, 0)));
        assert_eq!(engine.is_revealed((0, 0)), Ok(true));
    }

    #[test]
    fn reselecting_pending_tile_is_ignored() {
        let mut engine = engine();
        engine.select((0, 0)).unwrap();

        assert_eq!(engine.select((0, 0)), Ok(SelectOutcome::Ignored));
        assert_eq!(engine.state(), TurnState::AwaitingSecond { first: (0, 0) });
    }

    #[test]
    fn matching_pair_stays_revealed() {
        let mut engine = engine();
        engine.select((0, 0)).unwrap();

        let outcome = engine.select((1, 0)).unwrap();

        assert_eq!(
            outcome,
            SelectOutcome::Matched {
                first: (0, 0),
                second: (1, 0)
            }
        );
        assert_eq!(engine.state(), TurnState::Idle);
        assert_eq!(engine.selection(), Selection::None);
        assert_eq!(engine.is_revealed((0, 0)), Ok(true));
        assert_eq!(engine.is_revealed((1, 0)), Ok(true));
        assert_eq!(engine.pairs_found(), 1);
        assert_eq!(engine.select((1, 0)), Ok(SelectOutcome::Ignored));
    }

    #[test]
    fn mismatched_pair_must_be_covered() {
        let mut engine = engine();
        engine.select((0, 0)).unwrap();

        let outcome = engine.select((1, 1)).unwrap();

        assert_eq!(
            outcome,
            SelectOutcome::Mismatched {
                first: (0, 0),
                second: (1, 1)
            }
        );
        assert_eq!(engine.selection(), Selection::Two((0, 0), (1, 1)));
        assert_eq!(engine.select((0, 1)), Err(GameError::CoverPending));

        assert_eq!(engine.cover_mismatch(), Ok(((0, 0), (1, 1))));
        assert_eq!(engine.state(), TurnState::Idle);
        assert_eq!(engine.revealed().revealed_count(), 0);
        assert_eq!(engine.cover_mismatch(), Err(GameError::NothingToCover));
    }

    #[test]
    fn last_pair_wins() {
        let mut engine = engine();
        engine.select((0, 0)).unwrap();
        engine.select((1, 0)).unwrap();
        engine.select((1, 1)).unwrap();

        let outcome = engine.select((0, 1)).unwrap();

        assert_eq!(
            outcome,
            SelectOutcome::Won {
                first: (1, 1),
                second: (0, 1)
            }
        );
        assert!(engine.has_won());
        assert_eq!(engine.state(), TurnState::Won);
        assert_eq!(engine.select((0, 0)), Err(GameError::AlreadyEnded));
    }

    #[test]
    fn reset_starts_covered_round() {
        let mut engine = engine();
        engine.select((0, 0)).unwrap();
        engine.select((1, 0)).unwrap();
        engine.select((0, 1)).unwrap();
        engine.select((1, 1)).unwrap();
        assert!(engine.has_won());

        engine.reset(Board::from_icons(arr2(&[[B, B]])).unwrap());

        assert_eq!(engine.state(), TurnState::Idle);
        assert_eq!(engine.size(), (1, 2));
        assert!(!engine.has_won());
        assert_eq!(engine.pairs_found(), 0);
        assert_eq!(engine.revealed().revealed_count(), 0);
    }

    #[test]
    fn out_of_bounds_selection_is_an_error() {
        let mut engine = engine();

        assert_eq!(
            engine.select((2, 0)),
            Err(GameError::OutOfBounds {
                coords: (2, 0),
                size: (2, 2)
            })
        );
        assert_eq!(engine.state(), TurnState::Idle);
    }
}
