use core::ops::Index;
use ndarray::Array2;
use serde::Serialize;

use crate::*;

/// The cells of one match plus where the board sits on screen.
///
/// Cells are stored row-major, linear index `row * width + column`. Mines and neighbor counts
/// are fixed when the grid is built; only cell states change afterwards.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Grid {
    cells: Array2<Cell>,
    mine_count: CellCount,
    origin: PixelPos,
}

impl Grid {
    /// Builds the cells for `layout` with the board centered on `center`.
    ///
    /// # Panics
    ///
    /// Panics if the layout has no mines or no safe cell, or if its mask disagrees with its
    /// mine count.
    pub fn new(layout: &MineLayout, center: PixelPos) -> Self {
        let config = layout.config();
        assert!(
            config.is_valid(),
            "mine count must be in 1..{}, got {}",
            config.total_cells(),
            config.mines
        );

        let (width, height) = layout.size();
        let mut cells: Array2<Cell> = Array2::default(layout.size().to_nd_index());
        let mut placed: CellCount = 0;
        for coords in layout.iter_mines() {
            cells[coords.to_nd_index()].spawn_mine();
            placed += 1;
        }
        assert_eq!(
            placed, config.mines,
            "layout holds {placed} mines but reports {}",
            config.mines
        );

        for coords in iter_coords(layout.size()) {
            cells[coords.to_nd_index()].set_neighbor_mines(layout.adjacent_mine_count(coords));
        }

        let origin = (
            center.0 - Pixel::from(width) * TILE_SIZE / 2,
            center.1 - Pixel::from(height) * TILE_SIZE / 2,
        );

        Self {
            cells,
            mine_count: config.mines,
            origin,
        }
    }

    /// Board size as `(width, height)`.
    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        (narrow(cols), narrow(rows))
    }

    pub fn width(&self) -> Coord {
        self.size().0
    }

    pub fn height(&self) -> Coord {
        self.size().1
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    /// Pixel position of the top-left tile.
    pub fn origin(&self) -> PixelPos {
        self.origin
    }

    pub fn is_valid_coords(&self, (x, y): Coord2) -> bool {
        let (width, height) = self.size();
        x < width && y < height
    }

    /// # Panics
    ///
    /// Panics if `coords` is outside of the grid.
    pub fn cell(&self, coords: Coord2) -> &Cell {
        self.check_coords(coords);
        &self.cells[coords.to_nd_index()]
    }

    pub(crate) fn cell_mut(&mut self, coords: Coord2) -> &mut Cell {
        self.check_coords(coords);
        &mut self.cells[coords.to_nd_index()]
    }

    fn check_coords(&self, coords: Coord2) {
        assert!(
            self.is_valid_coords(coords),
            "grid coordinates {coords:?} outside of {:?} board",
            self.size()
        );
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size())
    }

    /// All cells with their coordinates, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (Coord2, Cell)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((row, col), &cell)| ((narrow(col), narrow(row)), cell))
    }

    pub fn count_in_state(&self, state: CellState) -> CellCount {
        let count = self.cells.iter().filter(|cell| cell.state() == state).count();
        // bounded by total cells
        count as CellCount
    }

    /// Every mine is flagged and every safe cell is revealed.
    pub fn is_cleared(&self) -> bool {
        self.cells.iter().all(|cell| match cell.state() {
            CellState::Flagged => cell.has_mine(),
            CellState::Revealed => !cell.has_mine(),
            CellState::Hidden => false,
        })
    }

    /// Pixel area covered by the tiles, without the border.
    pub fn rect(&self) -> PixelRect {
        let (width, height) = self.size();
        PixelRect::new(
            self.origin,
            Pixel::from(width) * TILE_SIZE,
            Pixel::from(height) * TILE_SIZE,
        )
    }

    /// Top-left pixel of the tile at `coords`.
    ///
    /// # Panics
    ///
    /// Panics if `coords` is outside of the grid.
    pub fn grid_to_pixel(&self, coords: Coord2) -> PixelPos {
        self.check_coords(coords);
        (
            self.origin.0 + Pixel::from(coords.0) * TILE_SIZE,
            self.origin.1 + Pixel::from(coords.1) * TILE_SIZE,
        )
    }

    /// Tile under the pixel `pos`, or [`GameError::OutOfBoard`].
    pub fn try_pixel_to_grid(&self, pos: PixelPos) -> Result<Coord2> {
        if !self.rect().contains(pos) {
            return Err(GameError::OutOfBoard);
        }

        let x = (pos.0 - self.origin.0) / TILE_SIZE;
        let y = (pos.1 - self.origin.1) / TILE_SIZE;
        Ok((narrow_pixel(x), narrow_pixel(y)))
    }

    /// Tile under the pixel `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is not on the board; callers clip input to [`Self::rect`] first.
    pub fn pixel_to_grid(&self, pos: PixelPos) -> Coord2 {
        match self.try_pixel_to_grid(pos) {
            Ok(coords) => coords,
            Err(_) => panic!("pixel {pos:?} is outside of the board {:?}", self.rect()),
        }
    }
}

/// Only called on offsets already known to be inside the board.
fn narrow_pixel(offset: Pixel) -> Coord {
    Coord::try_from(offset).unwrap_or(Coord::MAX)
}

impl Index<Coord2> for Grid {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        self.cell(coords)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(size: Coord2, mines: &[Coord2]) -> Grid {
        Grid::new(&MineLayout::from_mine_coords(size, mines).unwrap(), (0, 0))
    }

    #[test]
    fn counts_neighbors_without_wrapping() {
        let grid = grid((3, 3), &[(0, 0), (2, 2)]);

        assert_eq!(grid[(1, 1)].neighbor_mines(), Some(2));
        assert_eq!(grid[(0, 1)].neighbor_mines(), Some(1));
        assert_eq!(grid[(2, 0)].neighbor_mines(), Some(0));
        assert_eq!(grid[(0, 2)].neighbor_mines(), Some(0));
        // mines count their neighbors too
        assert_eq!(grid[(0, 0)].neighbor_mines(), Some(0));
    }

    #[test]
    #[should_panic(expected = "layout holds 4 mines but reports 1")]
    fn mismatched_layout_is_rejected() {
        let layout = MineLayout {
            mine_mask: Array2::from_elem((2, 2), true),
            mine_count: 1,
        };
        Grid::new(&layout, (0, 0));
    }

    #[test]
    fn every_cell_is_counted() {
        let layout = RandomLayoutGenerator::new(3).generate(BoardConfig::GENERAL);
        let grid = Grid::new(&layout, (320, 240));

        for (coords, cell) in grid.iter() {
            let expected = grid
                .iter_neighbors(coords)
                .filter(|&pos| layout.contains_mine(pos))
                .count();
            assert_eq!(cell.neighbor_mines(), Some(expected as u8), "at {coords:?}");
            assert_eq!(cell.has_mine(), layout.contains_mine(coords));
        }
        assert_eq!(grid.iter().filter(|(_, cell)| cell.has_mine()).count(), 40);
    }

    #[test]
    fn cells_iterate_row_major() {
        let grid = grid((20, 16), &[(19, 0)]);
        let (index, _) = grid
            .iter()
            .enumerate()
            .find(|(_, (_, cell))| cell.has_mine())
            .unwrap();
        assert_eq!(index, linear_index((19, 0), 20));
        assert_eq!(grid.iter().nth(21).unwrap().0, (1, 1));
    }

    #[test]
    fn board_is_centered() {
        let layout = MineLayout::from_mine_coords((6, 5), &[(0, 0)]).unwrap();
        let grid = Grid::new(&layout, (100, 100));

        assert_eq!(grid.origin(), (100 - 48, 100 - 40));
        assert_eq!(grid.rect(), PixelRect::new((52, 60), 96, 80));
    }

    #[test]
    fn pixel_mapping_inverts_grid_mapping() {
        let layout = MineLayout::from_mine_coords((20, 16), &[(4, 4)]).unwrap();
        let grid = Grid::new(&layout, (400, 300));

        for coords in iter_coords(grid.size()) {
            let (x, y) = grid.grid_to_pixel(coords);
            assert_eq!(grid.pixel_to_grid((x, y)), coords);
            assert_eq!(grid.pixel_to_grid((x + TILE_SIZE - 1, y + TILE_SIZE - 1)), coords);
        }
    }

    #[test]
    fn pixels_off_board_are_rejected() {
        let grid = grid((6, 5), &[(0, 0)]);
        let rect = grid.rect();

        assert_eq!(
            grid.try_pixel_to_grid((rect.left - 1, rect.top)),
            Err(GameError::OutOfBoard)
        );
        assert_eq!(
            grid.try_pixel_to_grid((rect.right, rect.top)),
            Err(GameError::OutOfBoard)
        );
        assert_eq!(grid.try_pixel_to_grid((rect.right - 1, rect.bottom - 1)), Ok((5, 4)));
    }

    #[test]
    #[should_panic(expected = "outside of the board")]
    fn pixel_to_grid_panics_off_board() {
        let grid = grid((6, 5), &[(0, 0)]);
        grid.pixel_to_grid((-1000, 0));
    }

    #[test]
    #[should_panic(expected = "outside of")]
    fn indexing_out_of_range_panics() {
        let grid = grid((3, 3), &[(0, 0)]);
        grid.cell((3, 0));
    }

    #[test]
    fn cleared_needs_flags_and_reveals() {
        let mut grid = grid((2, 1), &[(0, 0)]);
        assert!(!grid.is_cleared());

        grid.cell_mut((1, 0)).reveal();
        assert!(!grid.is_cleared());

        grid.cell_mut((0, 0)).toggle_flag();
        assert!(grid.is_cleared());
        assert_eq!(grid.count_in_state(CellState::Flagged), 1);
        assert_eq!(grid.count_in_state(CellState::Revealed), 1);
    }
}
