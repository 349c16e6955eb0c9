use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Board background behind the tiles.
    pub const BASE: Self = Self::rgb(192, 192, 192);
    pub const BORDER: Self = Self::rgb(0, 0, 255);
}

/// Half-open pixel rectangle, `left..right` by `top..bottom`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PixelRect {
    pub left: Pixel,
    pub top: Pixel,
    pub right: Pixel,
    pub bottom: Pixel,
}

impl PixelRect {
    pub const fn new(top_left: PixelPos, width: Pixel, height: Pixel) -> Self {
        Self {
            left: top_left.0,
            top: top_left.1,
            right: top_left.0 + width,
            bottom: top_left.1 + height,
        }
    }

    pub const fn width(&self) -> Pixel {
        self.right - self.left
    }

    pub const fn height(&self) -> Pixel {
        self.bottom - self.top
    }

    pub const fn top_left(&self) -> PixelPos {
        (self.left, self.top)
    }

    pub const fn contains(&self, (x, y): PixelPos) -> bool {
        x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }

    #[must_use]
    pub const fn expanded(&self, by: Pixel) -> Self {
        Self {
            left: self.left - by,
            top: self.top - by,
            right: self.right + by,
            bottom: self.bottom + by,
        }
    }
}

/// Border drawn around the board, in pixels.
pub const BORDER_THICKNESS: Pixel = 10;

/// Icon set a [`Renderer`] must be able to draw at a tile position.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Sprite {
    /// Raised, unopened tile.
    Button,
    Flag,
    /// Opened tile with its neighbor mine count, `0..=8`.
    Number(u8),
    Mine,
    /// The mine that lost the match.
    ExplodedMine,
    /// Marks a flag that was placed on a safe cell.
    Cross,
}

/// What a single tile looks like, see [`Cell::view`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TileView {
    Hidden,
    Flagged,
    Revealed(u8),
    Mine,
    TriggeredMine,
    FlaggedMine,
    Misflagged,
}

impl TileView {
    /// Sprites that make up this tile, bottom layer first.
    pub fn sprites(self) -> &'static [Sprite] {
        use Sprite::*;

        static NUMBERS: [[Sprite; 1]; 9] = [
            [Number(0)],
            [Number(1)],
            [Number(2)],
            [Number(3)],
            [Number(4)],
            [Number(5)],
            [Number(6)],
            [Number(7)],
            [Number(8)],
        ];

        match self {
            Self::Hidden => &[Button],
            Self::Flagged => &[Button, Flag],
            Self::Revealed(count) => NUMBERS
                .get(usize::from(count))
                .expect("neighbor count is at most 8"),
            Self::Mine => &[Mine],
            Self::TriggeredMine => &[ExplodedMine],
            Self::FlaggedMine => &[Mine, Flag],
            Self::Misflagged => &[Mine, Cross],
        }
    }
}

/// Drawing backend the board is rendered through.
pub trait Renderer {
    fn fill_rect(&mut self, rect: PixelRect, color: Color);

    /// Draws `sprite` on the tile whose top-left corner is `pos`.
    fn draw_sprite(&mut self, pos: PixelPos, sprite: Sprite);
}

/// Gets told when a match is lost, typically to play a sound.
pub trait LossNotifier {
    fn on_loss(&mut self);
}

impl LossNotifier for () {
    fn on_loss(&mut self) {}
}

impl<T: LossNotifier + ?Sized> LossNotifier for &mut T {
    fn on_loss(&mut self) {
        (**self).on_loss();
    }
}
