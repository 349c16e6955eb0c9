//! Minefield engine: mine placement, neighbor counts, per-cell state and the match outcome.
//!
//! Drawing, sound and input devices are left to the caller through [`Renderer`] and
//! [`LossNotifier`]; the engine only ever deals in pixel positions and tile views.
#![no_std]

extern crate alloc;

use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use cell::*;
pub use controller::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use render::*;
pub use types::*;

mod cell;
mod controller;
mod error;
mod generator;
mod grid;
mod render;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl BoardConfig {
    /// The regular board.
    pub const GENERAL: Self = Self::new_unchecked((20, 16), 40);

    /// Reduced board, handy for trying things out.
    pub const DEMO: Self = Self::new_unchecked((6, 5), 4);

    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    pub fn new(size: Coord2, mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(size, mines);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.size.0 == 0 || self.size.1 == 0 {
            Err(GameError::EmptyBoard)
        } else if self.mines == 0 {
            Err(GameError::NoMines)
        } else if self.mines >= self.total_cells() {
            Err(GameError::TooManyMines)
        } else {
            Ok(())
        }
    }

    /// Whether the mine count is in `1..total_cells`, which every match requires.
    pub const fn is_valid(&self) -> bool {
        self.mines > 0 && self.mines < self.total_cells()
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::GENERAL
    }
}

/// Where the mines are on a board, and nothing else.
///
/// Decoding recounts the mines from the mask and rejects layouts no match can be played on.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MineMask")]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

#[derive(Deserialize)]
struct MineMask {
    mine_mask: Array2<bool>,
}

impl TryFrom<MineMask> for MineLayout {
    type Error = GameError;

    fn try_from(MineMask { mine_mask }: MineMask) -> Result<Self> {
        let (rows, cols) = mine_mask.dim();
        if Coord::try_from(rows).is_err() || Coord::try_from(cols).is_err() {
            return Err(GameError::InvalidCoords);
        }

        let mines = mine_mask.iter().filter(|&&mine| mine).count();
        let layout = Self {
            mine_mask,
            mine_count: CellCount::try_from(mines).map_err(|_| GameError::TooManyMines)?,
        };
        layout.config().validate()?;
        Ok(layout)
    }
}

impl MineLayout {
    pub(crate) fn empty((width, height): Coord2) -> Self {
        Self {
            mine_mask: Array2::default((usize::from(height), usize::from(width))),
            mine_count: 0,
        }
    }

    /// Builds a layout from explicit mine positions. Duplicates are counted once.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut layout = Self::empty(size);

        for &coords in mine_coords {
            layout.validate_coords(coords)?;
            layout.place_mine(coords);
        }

        layout.config().validate()?;
        Ok(layout)
    }

    /// Marks `coords` as a mine, returns `false` if it already was one.
    pub(crate) fn place_mine(&mut self, coords: Coord2) -> bool {
        let cell = &mut self.mine_mask[coords.to_nd_index()];
        if *cell {
            false
        } else {
            *cell = true;
            self.mine_count += 1;
            true
        }
    }

    pub fn config(&self) -> BoardConfig {
        BoardConfig::new_unchecked(self.size(), self.mine_count)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    /// Board size as `(width, height)`.
    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.mine_mask.dim();
        (narrow(cols), narrow(rows))
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        let count = NeighborIter::new(coords, self.size())
            .filter(|&pos| self[pos])
            .count();
        // at most eight neighbors
        count as u8
    }

    pub fn iter_mines(&self) -> impl Iterator<Item = Coord2> + '_ {
        iter_coords(self.size()).filter(|&coords| self[coords])
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

/// Array dimensions always come from a [`Coord2`], so they fit back into a [`Coord`].
pub(crate) fn narrow(dim: usize) -> Coord {
    Coord::try_from(dim).unwrap_or(Coord::MAX)
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn presets_are_valid() {
        assert_eq!(BoardConfig::GENERAL.validate(), Ok(()));
        assert_eq!(BoardConfig::DEMO.validate(), Ok(()));
        assert_eq!(BoardConfig::GENERAL.total_cells(), 320);
        assert_eq!(BoardConfig::DEMO.total_cells(), 30);
    }

    #[test]
    fn config_rejects_bad_mine_counts() {
        assert_eq!(BoardConfig::new((3, 3), 0), Err(GameError::NoMines));
        assert_eq!(BoardConfig::new((3, 3), 9), Err(GameError::TooManyMines));
        assert_eq!(BoardConfig::new((0, 3), 1), Err(GameError::EmptyBoard));
        assert!(BoardConfig::new((3, 3), 8).is_ok());
        assert!(!BoardConfig::new_unchecked((3, 3), 9).is_valid());
    }

    #[test]
    fn config_decodes_from_json() {
        let config: BoardConfig = serde_json::from_str(r#"{"size":[6,5],"mines":4}"#).unwrap();
        assert_eq!(config, BoardConfig::DEMO);
    }

    #[test]
    fn layout_from_coords_counts_unique_mines() {
        let layout = MineLayout::from_mine_coords((3, 2), &[(0, 0), (2, 1), (0, 0)]).unwrap();

        assert_eq!(layout.size(), (3, 2));
        assert_eq!(layout.mine_count(), 2);
        assert!(layout.contains_mine((2, 1)));
        assert!(!layout.contains_mine((1, 0)));
        assert_eq!(layout.iter_mines().collect::<Vec<_>>(), [(0, 0), (2, 1)]);
    }

    #[test]
    fn layout_from_coords_rejects_out_of_range() {
        assert_eq!(
            MineLayout::from_mine_coords((3, 3), &[(3, 0)]),
            Err(GameError::InvalidCoords)
        );
        assert_eq!(
            MineLayout::from_mine_coords((2, 1), &[(0, 0), (1, 0)]),
            Err(GameError::TooManyMines)
        );
    }

    #[test]
    fn decoded_layout_recounts_mines() {
        let layout: MineLayout = serde_json::from_str(
            r#"{"mine_mask":{"v":1,"dim":[1,3],"data":[true,false,false]},"mine_count":7}"#,
        )
        .unwrap();

        assert_eq!(layout.size(), (3, 1));
        assert_eq!(layout.mine_count(), 1);
        assert_eq!(layout.config(), BoardConfig::new_unchecked((3, 1), 1));
    }

    #[test]
    fn decoding_rejects_unplayable_layouts() {
        let full = r#"{"mine_mask":{"v":1,"dim":[2,2],"data":[true,true,true,true]},"mine_count":1}"#;
        let empty = r#"{"mine_mask":{"v":1,"dim":[2,2],"data":[false,false,false,false]},"mine_count":1}"#;

        assert!(serde_json::from_str::<MineLayout>(full).is_err());
        assert!(serde_json::from_str::<MineLayout>(empty).is_err());
    }

    #[test]
    fn adjacent_mine_count_is_clamped() {
        let layout = MineLayout::from_mine_coords((3, 3), &[(0, 0), (2, 2)]).unwrap();

        assert_eq!(layout.adjacent_mine_count((1, 1)), 2);
        assert_eq!(layout.adjacent_mine_count((0, 1)), 1);
        assert_eq!(layout.adjacent_mine_count((2, 0)), 0);
    }
}
