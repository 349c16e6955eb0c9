use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Playing -> Lost
/// - Playing -> Won
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    #[default]
    Playing,
    Lost,
    Won,
}

impl Outcome {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// One match from the first click to a win or a loss.
///
/// Clicks arrive as pixel positions that the caller has already clipped to [`Match::rect`].
/// Once the outcome is decided every further click is ignored.
#[derive(Clone, Debug)]
pub struct Match<N> {
    grid: Grid,
    outcome: Outcome,
    triggered_mine: Option<Coord2>,
    notifier: N,
}

impl<N: LossNotifier> Match<N> {
    /// Starts a match on a randomly generated board centered on `center`.
    ///
    /// # Panics
    ///
    /// Panics if `config` has no mines or no safe cell.
    pub fn new(config: BoardConfig, center: PixelPos, seed: u64, notifier: N) -> Self {
        let layout = RandomLayoutGenerator::new(seed).generate(config);
        Self::from_layout(&layout, center, notifier)
    }

    /// Starts a match on a known board.
    pub fn from_layout(layout: &MineLayout, center: PixelPos, notifier: N) -> Self {
        let grid = Grid::new(layout, center);
        log::info!(
            "New {}x{} match with {} mines",
            grid.width(),
            grid.height(),
            grid.mine_count()
        );
        Self {
            grid,
            outcome: Outcome::Playing,
            triggered_mine: None,
            notifier,
        }
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_finished()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn size(&self) -> Coord2 {
        self.grid.size()
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self.grid[coords]
    }

    pub fn tile_view_at(&self, coords: Coord2) -> TileView {
        self.grid[coords].view(self.outcome)
    }

    /// The revealed mine that ended the match, if it was lost.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn flagged_count(&self) -> CellCount {
        self.grid.count_in_state(CellState::Flagged)
    }

    /// Mines minus flags, negative when the player over-flags.
    pub fn mines_left(&self) -> i32 {
        i32::from(self.grid.mine_count()) - i32::from(self.flagged_count())
    }

    /// Pixel area of the tiles, clicks must land inside it.
    pub fn rect(&self) -> PixelRect {
        self.grid.rect()
    }

    pub fn contains(&self, pos: PixelPos) -> bool {
        self.grid.rect().contains(pos)
    }

    /// Reveals the hidden tile under `pos`.
    ///
    /// Flagged and revealed tiles are left alone, as is everything once the match is over.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is outside of the board.
    pub fn on_reveal(&mut self, pos: PixelPos) -> RevealOutcome {
        if self.outcome.is_finished() {
            return RevealOutcome::NoChange;
        }

        let coords = self.grid.pixel_to_grid(pos);
        log::debug!("reveal {:?} at pixel {:?}", coords, pos);

        let cell = self.grid.cell_mut(coords);
        if !matches!(cell.state(), CellState::Hidden) {
            return RevealOutcome::NoChange;
        }

        cell.reveal();
        if cell.has_mine() {
            self.triggered_mine = Some(coords);
            self.end(Outcome::Lost);
            self.notifier.on_loss();
            RevealOutcome::HitMine
        } else if self.grid.is_cleared() {
            self.end(Outcome::Won);
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        }
    }

    /// Toggles the flag on the unrevealed tile under `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is outside of the board.
    pub fn on_flag(&mut self, pos: PixelPos) -> MarkOutcome {
        if self.outcome.is_finished() {
            return MarkOutcome::NoChange;
        }

        let coords = self.grid.pixel_to_grid(pos);
        log::debug!("toggle flag {:?} at pixel {:?}", coords, pos);

        let cell = self.grid.cell_mut(coords);
        if matches!(cell.state(), CellState::Revealed) {
            return MarkOutcome::NoChange;
        }

        cell.toggle_flag();
        MarkOutcome::Changed
    }

    fn end(&mut self, outcome: Outcome) {
        assert!(
            !self.outcome.is_finished(),
            "match already ended as {:?}",
            self.outcome
        );
        log::info!("match ended: {:?}", outcome);
        self.outcome = outcome;
    }

    /// Draws the border, the board background and then every tile, row by row.
    pub fn render<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        let rect = self.grid.rect();
        renderer.fill_rect(rect.expanded(BORDER_THICKNESS), Color::BORDER);
        renderer.fill_rect(rect, Color::BASE);

        for (coords, cell) in self.grid.iter() {
            let pos = self.grid.grid_to_pixel(coords);
            for &sprite in cell.view(self.outcome).sprites() {
                renderer.draw_sprite(pos, sprite);
            }
        }
    }
}
