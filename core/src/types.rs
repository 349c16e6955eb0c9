/// Single grid axis, used for board width, height and cell positions.
pub type Coord = u8;

/// Count type for mines and total cells.
pub type CellCount = u16;

/// Grid coordinates `(column, row)`.
pub type Coord2 = (Coord, Coord);

/// Single pixel axis in screen space. Signed so a board can sit partially off-screen.
pub type Pixel = i32;

/// Screen coordinates `(x, y)` in pixels.
pub type PixelPos = (Pixel, Pixel);

/// Edge length of a square tile, in pixels.
pub const TILE_SIZE: Pixel = 16;

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

/// Grids are stored row-major, so the row comes first in the ndarray index.
impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.1.into(), self.0.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Row-major linear index of `coords` on a board `width` columns wide.
pub const fn linear_index((x, y): Coord2, width: Coord) -> usize {
    y as usize * width as usize + x as usize
}

/// Iterates all coordinates of a board of `size`, row by row.
pub fn iter_coords((width, height): Coord2) -> impl Iterator<Item = Coord2> {
    (0..height).flat_map(move |y| (0..width).map(move |x| (x, y)))
}

const DISPLACEMENTS: [(i8, i8); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (i8, i8), bounds: Coord2) -> Option<Coord2> {
    let (x, y) = coords;
    let (dx, dy) = delta;
    let (max_x, max_y) = bounds;

    let next_x = x.checked_add_signed(dx)?;
    if next_x >= max_x {
        return None;
    }

    let next_y = y.checked_add_signed(dy)?;
    if next_y >= max_y {
        return None;
    }

    Some((next_x, next_y))
}

/// Moore neighborhood of a cell, clamped to the board. Edge cells yield fewer than eight items.
#[derive(Debug, Clone)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl NeighborIter {
    pub fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(&delta) = DISPLACEMENTS.get(usize::from(self.index)) {
            self.index += 1;
            if let Some(next_item) = apply_delta(self.center, delta, self.bounds) {
                return Some(next_item);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn corner_has_three_neighbors() {
        let neighbors: Vec<_> = NeighborIter::new((0, 0), (3, 3)).collect();
        assert_eq!(neighbors, [(1, 0), (0, 1), (1, 1)]);
    }

    #[test]
    fn edges_do_not_wrap() {
        let neighbors: Vec<_> = NeighborIter::new((2, 1), (3, 3)).collect();
        assert_eq!(neighbors.len(), 5);
        assert!(neighbors.iter().all(|&(x, _)| x != 0));
    }

    #[test]
    fn center_has_eight_neighbors() {
        assert_eq!(NeighborIter::new((1, 1), (3, 3)).count(), 8);
    }

    #[test]
    fn single_cell_board_has_no_neighbors() {
        assert_eq!(NeighborIter::new((0, 0), (1, 1)).count(), 0);
    }

    #[test]
    fn coords_are_row_major() {
        let coords: Vec<_> = iter_coords((3, 2)).collect();
        assert_eq!(coords, [(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]);
        for (index, &coords) in coords.iter().enumerate() {
            assert_eq!(linear_index(coords, 3), index);
        }
    }
}
