use alloc::vec;
use alloc::vec::Vec;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    /// Resolved pairs of selections, matched or not.
    pub turns: u32,
    pub matches: u32,
    pub mismatches: u32,
    pub rounds_won: u32,
}

/// A running game: board state plus the collaborators it is drawn on and driven by.
///
/// Single threaded, every animation and hold blocks until it is done.
pub struct GameSession<R, I, C, G> {
    config: GameConfig,
    layout: Layout,
    sequencer: AnimationSequencer,
    engine: MatchEngine,
    renderer: R,
    input: I,
    clock: C,
    rng: G,
    pointer: Point,
    stats: SessionStats,
}

impl<R, I, C, G> GameSession<R, I, C, G>
where
    R: Renderer,
    I: InputSource,
    C: Clock,
    G: Rng,
{
    pub fn new(config: GameConfig, renderer: R, input: I, clock: C, mut rng: G) -> Result<Self> {
        config.validate()?;
        let board = Board::generate(config.size, &mut rng)?;
        log::info!(
            "New session on a {}x{} board ({} pairs)",
            config.size.0,
            config.size.1,
            board.pair_count()
        );

        Ok(Self {
            layout: Layout::new(&config),
            sequencer: AnimationSequencer::new(&config),
            engine: MatchEngine::new(board),
            config,
            renderer,
            input,
            clock,
            rng,
            pointer: (0, 0),
            stats: SessionStats::default(),
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn engine(&self) -> &MatchEngine {
        &self.engine
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Shows the covered board and plays the intro animation.
    pub fn start(&mut self) {
        self.draw_board(palette::BACKGROUND, &[]);
        self.renderer.present();
        self.play_intro();
    }

    /// Runs frames until the input source asks to quit.
    pub fn run(&mut self) -> Result<SessionStats> {
        while self.step()? == Flow::Continue {}
        log::info!(
            "Session over after {} turns, {} rounds won",
            self.stats.turns,
            self.stats.rounds_won
        );
        Ok(self.stats)
    }

    /// Handles one frame: input, hover highlight, a click if there was one.
    ///
    /// At most one click is taken per frame, events queued after it wait for
    /// the next one.
    pub fn step(&mut self) -> Result<Flow> {
        let mut click = None;
        while let Some(event) = self.input.poll() {
            match event {
                InputEvent::QuitRequested => {
                    log::debug!("Quit requested");
                    return Ok(Flow::Quit);
                }
                InputEvent::PointerMoved { x, y } => self.pointer = (x, y),
                InputEvent::PointerClicked { x, y } => {
                    self.pointer = (x, y);
                    click = Some((x, y));
                    break;
                }
            }
        }

        self.draw_board(palette::BACKGROUND, &[]);
        if let Some(coords) = self.layout.cell_at_point(self.pointer) {
            if !self.engine.is_revealed(coords)? {
                self.renderer.draw_highlight(coords);
            }
        }
        if let Some(coords) = click.and_then(|point| self.layout.cell_at_point(point)) {
            self.select(coords)?;
        }
        self.renderer.present();
        self.clock.tick();
        Ok(Flow::Continue)
    }

    fn select(&mut self, coords: Coord2) -> Result<()> {
        use SelectOutcome::*;

        let outcome = self.engine.select(coords)?;
        if !outcome.has_update() {
            return Ok(());
        }
        if let Some(revealed) = outcome.revealed() {
            let sweep = self.sequencer.reveal(vec![revealed]);
            self.play(sweep);
        }

        match outcome {
            Ignored | FirstRevealed(_) => {}
            Matched { .. } => {
                self.stats.turns += 1;
                self.stats.matches += 1;
            }
            Mismatched { first, second } => {
                self.stats.turns += 1;
                self.stats.mismatches += 1;
                self.clock.hold(self.config.timing.mismatch_delay);
                let sweep = self.sequencer.cover(vec![first, second]);
                self.play(sweep);
                self.engine.cover_mismatch()?;
            }
            Won { .. } => {
                self.stats.turns += 1;
                self.stats.matches += 1;
                self.celebrate();
                self.reset()?;
            }
        }
        Ok(())
    }

    fn celebrate(&mut self) {
        let timing = self.config.timing;
        for color in self.sequencer.flash(timing.flash_count) {
            self.draw_board(color, &[]);
            self.renderer.present();
            self.clock.hold(timing.flash_interval);
        }
        self.clock.hold(timing.win_delay);
    }

    fn reset(&mut self) -> Result<()> {
        let board = Board::generate(self.config.size, &mut self.rng)?;
        self.engine.reset(board);
        self.stats.rounds_won += 1;
        log::info!("Round {} won, dealing a new board", self.stats.rounds_won);

        self.draw_board(palette::BACKGROUND, &[]);
        self.renderer.present();
        self.clock.hold(self.config.timing.reset_delay);
        self.play_intro();
        Ok(())
    }

    fn play_intro(&mut self) {
        let cells: Vec<Coord2> = self.engine.board().cells().collect();
        let intro = self
            .sequencer
            .intro(cells, self.config.intro_group_size, &mut self.rng);
        for sweep in intro {
            self.play(sweep);
        }
    }

    /// Draws every frame of `sweep` over the rest of the board.
    fn play(&mut self, mut sweep: Sweep) {
        while let Some(coverage) = sweep.next() {
            self.draw_board(palette::BACKGROUND, sweep.cells());
            for &coords in sweep.cells() {
                self.renderer.draw_icon(self.engine.board()[coords], coords);
                self.renderer.draw_partial_cover(coords, coverage);
            }
            self.renderer.present();
            self.clock.tick();
        }
    }

    /// Paints every tile except `animating` as either covered or face-up.
    fn draw_board(&mut self, background: Rgb, animating: &[Coord2]) {
        self.renderer.draw_flash(background);
        for (coords, icon) in self.engine.board().iter() {
            if animating.contains(&coords) {
                continue;
            }
            if self.engine.revealed()[coords] {
                self.renderer.draw_icon(icon, coords);
            } else {
                self.renderer.draw_covered_tile(coords);
            }
        }
    }
}
