//! Drawing targets for the rain.
//!
//! `GlyphRain` only ever talks to a [`Surface`], so the same frame code paints a
//! real `<canvas>` in the browser and a [`RecordingSurface`] in native tests.

use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// The three drawing calls a rain frame needs.
pub trait Surface {
    /// Fill `width` x `height` from the origin with a (translucent) fill style.
    fn fade(&mut self, fill_style: &str, width: f64, height: f64);
    /// Set the fill style and font used by subsequent [`Surface::draw_glyph`] calls.
    fn set_glyph_style(&mut self, fill_style: &str, font: &str);
    fn draw_glyph(&mut self, glyph: char, x: f64, y: f64);
}

/// A 2d canvas context plus the element it belongs to.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement, ctx: CanvasRenderingContext2d) -> Self {
        Self { canvas, ctx }
    }

    /// Resize the backing store. This also clears the canvas and resets context state.
    pub fn set_size(&self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    pub fn width(&self) -> u32 {
        self.canvas.width()
    }

    pub fn height(&self) -> u32 {
        self.canvas.height()
    }
}

impl Surface for CanvasSurface {
    fn fade(&mut self, fill_style: &str, width: f64, height: f64) {
        self.ctx.set_fill_style_str(fill_style);
        self.ctx.fill_rect(0.0, 0.0, width, height);
    }

    fn set_glyph_style(&mut self, fill_style: &str, font: &str) {
        self.ctx.set_fill_style_str(fill_style);
        self.ctx.set_font(font);
    }

    fn draw_glyph(&mut self, glyph: char, x: f64, y: f64) {
        let mut buf = [0u8; 4];
        if let Err(err) = self.ctx.fill_text(glyph.encode_utf8(&mut buf), x, y) {
            tracing::trace!(?err, "fill_text failed");
        }
    }
}

/// One recorded drawing call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Fade { fill_style: String, width: f64, height: f64 },
    Style { fill_style: String, font: String },
    Glyph { glyph: char, x: f64, y: f64 },
}

/// Remembers every call instead of drawing; used for tests and snapshots.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Positions of all glyphs drawn so far, in draw order.
    pub fn glyph_positions(&self) -> Vec<(f64, f64)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Glyph { x, y, .. } => Some((*x, *y)),
                _ => None,
            })
            .collect()
    }

    pub fn glyph_count(&self) -> usize {
        self.ops.iter().filter(|op| matches!(op, DrawOp::Glyph { .. })).count()
    }

    pub fn clear(&mut self) {
        self.ops.clear();
    }
}

impl Surface for RecordingSurface {
    fn fade(&mut self, fill_style: &str, width: f64, height: f64) {
        self.ops.push(DrawOp::Fade { fill_style: fill_style.to_string(), width, height });
    }

    fn set_glyph_style(&mut self, fill_style: &str, font: &str) {
        self.ops.push(DrawOp::Style { fill_style: fill_style.to_string(), font: font.to_string() });
    }

    fn draw_glyph(&mut self, glyph: char, x: f64, y: f64) {
        self.ops.push(DrawOp::Glyph { glyph, x, y });
    }
}
