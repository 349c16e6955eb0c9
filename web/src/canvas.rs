use core::f64::consts::TAU;
use sapper_core::{
    BORDER_THICKNESS, BoardConfig, Color, Pixel, PixelPos, PixelRect, Renderer, Sprite, TILE_SIZE,
};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

const TILE: f64 = TILE_SIZE as f64;

const LIGHT: Color = Color::rgb(255, 255, 255);
const SHADOW: Color = Color::rgb(123, 123, 123);
const BLACK: Color = Color::rgb(0, 0, 0);
const RED: Color = Color::rgb(255, 0, 0);

/// Canvas size needed to fit a board of `config` with its border.
pub(crate) fn canvas_size(config: &BoardConfig) -> (u32, u32) {
    let (width, height) = config.size;
    let side = |tiles: u8| (Pixel::from(tiles) * TILE_SIZE + 2 * BORDER_THICKNESS).unsigned_abs();
    (side(width), side(height))
}

fn css(color: Color) -> String {
    format!("rgb({}, {}, {})", color.r, color.g, color.b)
}

pub(crate) fn number_color(count: u8) -> Color {
    match count {
        1 => Color::rgb(0, 0, 255),
        2 => Color::rgb(0, 123, 0),
        3 => Color::rgb(255, 0, 0),
        4 => Color::rgb(0, 0, 123),
        5 => Color::rgb(123, 0, 0),
        6 => Color::rgb(0, 123, 123),
        7 => BLACK,
        _ => SHADOW,
    }
}

/// Draws the board sprites with plain 2D canvas primitives.
pub(crate) struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    pub(crate) fn from_canvas(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { ctx })
    }

    fn fill(&self, x: f64, y: f64, width: f64, height: f64, color: Color) {
        self.ctx.set_fill_style_str(&css(color));
        self.ctx.fill_rect(x, y, width, height);
    }

    fn button(&self, x: f64, y: f64) {
        self.fill(x, y, TILE, TILE, LIGHT);
        self.fill(x + 2.0, y + 2.0, TILE - 2.0, TILE - 2.0, SHADOW);
        self.fill(x + 2.0, y + 2.0, TILE - 4.0, TILE - 4.0, Color::BASE);
    }

    fn open(&self, x: f64, y: f64) {
        self.fill(x, y, TILE, TILE, SHADOW);
        self.fill(x + 1.0, y + 1.0, TILE - 1.0, TILE - 1.0, Color::BASE);
    }

    fn mine(&self, x: f64, y: f64) {
        let (cx, cy) = (x + TILE / 2.0, y + TILE / 2.0);
        self.ctx.set_fill_style_str(&css(BLACK));
        self.ctx.begin_path();
        if let Err(err) = self.ctx.arc(cx, cy, TILE / 4.0, 0.0, TAU) {
            log::error!("Could not draw mine: {:?}", err);
        }
        self.ctx.fill();
        self.fill(cx - 1.0, y + 2.0, 2.0, TILE - 4.0, BLACK);
        self.fill(x + 2.0, cy - 1.0, TILE - 4.0, 2.0, BLACK);
        self.fill(cx - 3.0, cy - 3.0, 2.0, 2.0, LIGHT);
    }

    fn flag(&self, x: f64, y: f64) {
        self.ctx.set_fill_style_str(&css(RED));
        self.ctx.begin_path();
        self.ctx.move_to(x + 9.0, y + 3.0);
        self.ctx.line_to(x + 9.0, y + 9.0);
        self.ctx.line_to(x + 4.0, y + 6.0);
        self.ctx.close_path();
        self.ctx.fill();
        self.fill(x + 8.0, y + 9.0, 2.0, 3.0, BLACK);
        self.fill(x + 5.0, y + 12.0, 8.0, 2.0, BLACK);
    }

    fn cross(&self, x: f64, y: f64) {
        self.ctx.set_stroke_style_str(&css(RED));
        self.ctx.set_line_width(2.0);
        self.ctx.begin_path();
        self.ctx.move_to(x + 3.0, y + 3.0);
        self.ctx.line_to(x + TILE - 3.0, y + TILE - 3.0);
        self.ctx.move_to(x + TILE - 3.0, y + 3.0);
        self.ctx.line_to(x + 3.0, y + TILE - 3.0);
        self.ctx.stroke();
    }

    fn number(&self, x: f64, y: f64, count: u8) {
        self.open(x, y);
        if count == 0 {
            return;
        }

        self.ctx.set_fill_style_str(&css(number_color(count)));
        self.ctx.set_font("bold 12px monospace");
        self.ctx.set_text_align("center");
        self.ctx.set_text_baseline("middle");
        if let Err(err) = self
            .ctx
            .fill_text(&count.to_string(), x + TILE / 2.0, y + TILE / 2.0 + 1.0)
        {
            log::error!("Could not draw number {}: {:?}", count, err);
        }
    }
}

impl Renderer for CanvasRenderer {
    fn fill_rect(&mut self, rect: PixelRect, color: Color) {
        self.fill(
            rect.left.into(),
            rect.top.into(),
            rect.width().into(),
            rect.height().into(),
            color,
        );
    }

    fn draw_sprite(&mut self, (x, y): PixelPos, sprite: Sprite) {
        let (x, y) = (f64::from(x), f64::from(y));
        match sprite {
            Sprite::Button => self.button(x, y),
            Sprite::Flag => self.flag(x, y),
            Sprite::Number(count) => self.number(x, y, count),
            Sprite::Mine => {
                self.open(x, y);
                self.mine(x, y);
            }
            Sprite::ExplodedMine => {
                self.fill(x, y, TILE, TILE, RED);
                self.mine(x, y);
            }
            Sprite::Cross => self.cross(x, y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canvas_fits_board_and_border() {
        assert_eq!(canvas_size(&BoardConfig::GENERAL), (340, 276));
        assert_eq!(canvas_size(&BoardConfig::DEMO), (116, 100));
    }

    #[test]
    fn numbers_have_distinct_colors() {
        for a in 1..=8 {
            for b in (a + 1)..=8 {
                assert_ne!(number_color(a), number_color(b), "{a} and {b}");
            }
        }
    }
}
