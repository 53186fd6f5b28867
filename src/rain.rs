//! Falling glyph rain: per-column row cursors advanced once per frame.
//!
//! Each column owns an independent stream. Every frame a translucent overlay
//! dims what was drawn before, one random glyph is painted at each column's
//! cursor, and cursors that have left the bottom edge restart at the top with a
//! small probability so the columns drift out of phase.

use rand::Rng;

use crate::config::RainConfig;
use crate::error::RainError;
use crate::surface::Surface;

pub struct GlyphRain {
    glyph_size: u32,
    width: u32,
    height: u32,
    alphabet: Vec<char>,
    /// Row index (in glyph units) per column. Length is always `width / glyph_size`.
    drops: Vec<u32>,
    reset_probability: f64,
    fade_style: String,
    glyph_color: String,
    font: String,
}

impl GlyphRain {
    /// Build an empty (zero column) rain; call [`GlyphRain::resize`] before drawing.
    pub fn new(config: &RainConfig) -> Result<Self, RainError> {
        config.validate()?;
        Ok(Self {
            glyph_size: config.glyph_size,
            width: 0,
            height: 0,
            alphabet: config.alphabet.chars().collect(),
            drops: Vec::new(),
            reset_probability: config.reset_probability,
            fade_style: config.fade_style(),
            glyph_color: config.glyph_color.clone(),
            font: config.font(),
        })
    }

    /// Match the viewport and restart every column at row 1.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        let columns = (width / self.glyph_size) as usize;
        self.drops.clear();
        self.drops.resize(columns, 1);
        tracing::debug!(width, height, columns, "rain resized");
    }

    pub fn render_frame<S, R>(&mut self, surface: &mut S, rng: &mut R)
    where
        S: Surface + ?Sized,
        R: Rng + ?Sized,
    {
        let height = f64::from(self.height);
        surface.fade(&self.fade_style, f64::from(self.width), height);
        surface.set_glyph_style(&self.glyph_color, &self.font);

        let size = f64::from(self.glyph_size);
        for (i, drop) in self.drops.iter_mut().enumerate() {
            let glyph = self.alphabet[rng.gen_range(0..self.alphabet.len())];
            let x = i as f64 * size;
            let y = f64::from(*drop) * size;
            surface.draw_glyph(glyph, x, y);

            // The reset roll only happens once the stream is off screen.
            if y > height && rng.gen_bool(self.reset_probability) {
                *drop = 0;
            }
            *drop = drop.saturating_add(1);
        }
    }

    pub fn columns(&self) -> usize {
        self.drops.len()
    }

    pub fn drops(&self) -> &[u32] {
        &self.drops
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn glyph_size(&self) -> u32 {
        self.glyph_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawOp, RecordingSurface};
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn rain_with(reset_probability: f64) -> GlyphRain {
        let config = RainConfig { reset_probability, ..RainConfig::default() };
        GlyphRain::new(&config).unwrap()
    }

    #[test]
    fn test_resize_sets_column_count_and_rows() {
        let mut rain = rain_with(0.025);
        rain.resize(140, 100);
        assert_eq!(rain.columns(), 10);
        assert!(rain.drops().iter().all(|&d| d == 1));

        rain.resize(153, 40);
        assert_eq!(rain.columns(), 10);
        rain.resize(13, 40);
        assert_eq!(rain.columns(), 0);
    }

    #[test]
    fn test_frame_paints_fade_then_style_then_glyphs() {
        let mut rain = rain_with(0.0);
        rain.resize(42, 100);
        let mut surface = RecordingSurface::new();
        let mut rng = SmallRng::seed_from_u64(1);
        rain.render_frame(&mut surface, &mut rng);

        assert_eq!(
            surface.ops[0],
            DrawOp::Fade { fill_style: "rgba(10, 14, 39, 0.05)".into(), width: 42.0, height: 100.0 }
        );
        assert_eq!(
            surface.ops[1],
            DrawOp::Style { fill_style: "#00ff41".into(), font: "14px monospace".into() }
        );
        assert_eq!(surface.glyph_positions(), vec![(0.0, 14.0), (14.0, 14.0), (28.0, 14.0)]);
        assert_eq!(rain.drops(), &[2, 2, 2]);
    }

    #[test]
    fn test_glyphs_come_from_alphabet() {
        let config = RainConfig { alphabet: "xy".into(), ..RainConfig::default() };
        let mut rain = GlyphRain::new(&config).unwrap();
        rain.resize(14 * 8, 50);
        let mut surface = RecordingSurface::new();
        let mut rng = SmallRng::seed_from_u64(99);
        for _ in 0..20 {
            rain.render_frame(&mut surface, &mut rng);
        }
        for op in &surface.ops {
            if let DrawOp::Glyph { glyph, .. } = op {
                assert!(*glyph == 'x' || *glyph == 'y');
            }
        }
    }

    #[test]
    fn test_certain_reset_restarts_offscreen_columns() {
        let mut rain = rain_with(1.0);
        // Height 28: row 3 sits at y = 42 which is past the bottom edge.
        rain.resize(28, 28);
        let mut surface = RecordingSurface::new();
        let mut rng = SmallRng::seed_from_u64(5);
        rain.render_frame(&mut surface, &mut rng); // y = 14
        rain.render_frame(&mut surface, &mut rng); // y = 28, not strictly past
        assert_eq!(rain.drops(), &[3, 3]);
        rain.render_frame(&mut surface, &mut rng); // y = 42, reset then step
        assert_eq!(rain.drops(), &[1, 1]);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = RainConfig { glyph_size: 0, ..RainConfig::default() };
        assert!(GlyphRain::new(&config).is_err());
    }
}
