use serde::{Deserialize, Serialize};

use crate::*;

/// Player-visible state of a single cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Hidden,
    Flagged,
    Revealed,
}

/// One grid unit. The mine and the neighbor count are written once while the grid is built,
/// only `state` changes during play.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Cell {
    has_mine: bool,
    state: CellState,
    neighbor_mines: Option<u8>,
}

impl Cell {
    pub const fn has_mine(self) -> bool {
        self.has_mine
    }

    pub const fn state(self) -> CellState {
        self.state
    }

    /// `None` until the grid has counted the neighborhood.
    pub const fn neighbor_mines(self) -> Option<u8> {
        self.neighbor_mines
    }

    pub(crate) fn spawn_mine(&mut self) {
        assert!(!self.has_mine, "cell already holds a mine");
        self.has_mine = true;
    }

    pub(crate) fn set_neighbor_mines(&mut self, count: u8) {
        assert!(
            self.neighbor_mines.is_none(),
            "neighbor count already set to {:?}",
            self.neighbor_mines
        );
        assert!(count <= 8, "a cell has at most 8 neighbors, got {count}");
        self.neighbor_mines = Some(count);
    }

    pub(crate) fn reveal(&mut self) {
        assert_eq!(
            self.state,
            CellState::Hidden,
            "only hidden cells can be revealed"
        );
        self.state = CellState::Revealed;
    }

    pub(crate) fn toggle_flag(&mut self) {
        self.state = match self.state {
            CellState::Hidden => CellState::Flagged,
            CellState::Flagged => CellState::Hidden,
            CellState::Revealed => panic!("revealed cells cannot be flagged"),
        };
    }

    /// Which tile to draw for this cell. A lost match discloses mines and wrong flags.
    pub fn view(self, outcome: Outcome) -> TileView {
        use CellState::*;

        let lost = matches!(outcome, Outcome::Lost);
        match (self.state, self.has_mine) {
            (Hidden, true) if lost => TileView::Mine,
            (Hidden, _) => TileView::Hidden,
            (Flagged, true) if lost => TileView::FlaggedMine,
            (Flagged, false) if lost => TileView::Misflagged,
            (Flagged, _) => TileView::Flagged,
            (Revealed, true) if lost => TileView::TriggeredMine,
            (Revealed, true) => TileView::Mine,
            (Revealed, false) => TileView::Revealed(
                self.neighbor_mines
                    .expect("neighbor count is set when the grid is built"),
            ),
        }
    }
}
