//! Tunables for the rain. Defaults reproduce the portfolio page look.

use crate::error::RainError;

/// Katakana plus binary digits, the classic "digital rain" set.
pub const DEFAULT_ALPHABET: &str =
    "01アイウエオカキクケコサシスセソタチツテトナニヌネノハヒフヘホマミムメモヤユヨラリルレロワヲン";

pub const DEFAULT_CANVAS_ID: &str = "matrix-canvas";

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RainConfig {
    /// Id of the `<canvas>` element the rain is painted on.
    pub canvas_id: String,
    /// Column width and row height in pixels; also the font size.
    pub glyph_size: u32,
    pub font_family: String,
    pub alphabet: String,
    /// CSS colour for the glyphs.
    pub glyph_color: String,
    /// Page background as RGB; the fade overlay is painted in this colour.
    pub background: [u8; 3],
    /// Overlay opacity per frame. Lower means longer trails.
    pub fade_alpha: f64,
    /// Chance per frame that a column past the bottom edge restarts at the top.
    pub reset_probability: f64,
    /// Fixed RNG seed; `None` seeds from the browser.
    pub seed: Option<u64>,
}

impl Default for RainConfig {
    fn default() -> Self {
        Self {
            canvas_id: DEFAULT_CANVAS_ID.to_string(),
            glyph_size: 14,
            font_family: "monospace".to_string(),
            alphabet: DEFAULT_ALPHABET.to_string(),
            glyph_color: "#00ff41".to_string(),
            background: [10, 14, 39],
            fade_alpha: 0.05,
            reset_probability: 0.025,
            seed: None,
        }
    }
}

impl RainConfig {
    /// Parse a (possibly partial) JSON object; missing fields take their defaults.
    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self, RainError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| RainError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), RainError> {
        if self.glyph_size == 0 {
            return Err(RainError::InvalidConfig("glyph_size must be at least 1".into()));
        }
        if self.alphabet.is_empty() {
            return Err(RainError::InvalidConfig("alphabet is empty".into()));
        }
        if !unit_interval(self.reset_probability) {
            return Err(RainError::InvalidConfig(format!(
                "reset_probability {} outside [0, 1]",
                self.reset_probability
            )));
        }
        if !unit_interval(self.fade_alpha) {
            return Err(RainError::InvalidConfig(format!(
                "fade_alpha {} outside [0, 1]",
                self.fade_alpha
            )));
        }
        Ok(())
    }

    /// Canvas fill style for the fade overlay, e.g. `rgba(10, 14, 39, 0.05)`.
    pub fn fade_style(&self) -> String {
        let [r, g, b] = self.background;
        format!("rgba({}, {}, {}, {})", r, g, b, self.fade_alpha)
    }

    /// Canvas font string, e.g. `14px monospace`.
    pub fn font(&self) -> String {
        format!("{}px {}", self.glyph_size, self.font_family)
    }
}

fn unit_interval(v: f64) -> bool {
    v.is_finite() && (0.0..=1.0).contains(&v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_page_styles() {
        let cfg = RainConfig::default();
        assert_eq!(cfg.fade_style(), "rgba(10, 14, 39, 0.05)");
        assert_eq!(cfg.font(), "14px monospace");
        assert_eq!(cfg.canvas_id, "matrix-canvas");
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn rejects_degenerate_values() {
        let zero = RainConfig { glyph_size: 0, ..RainConfig::default() };
        assert!(matches!(zero.validate(), Err(RainError::InvalidConfig(_))));

        let empty = RainConfig { alphabet: String::new(), ..RainConfig::default() };
        assert!(empty.validate().is_err());

        let nan = RainConfig { reset_probability: f64::NAN, ..RainConfig::default() };
        assert!(nan.validate().is_err());

        let opaque = RainConfig { fade_alpha: 1.5, ..RainConfig::default() };
        assert!(opaque.validate().is_err());
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = RainConfig::from_json(r#"{ "glyph_size": 20, "seed": 7 }"#).unwrap();
        assert_eq!(cfg.glyph_size, 20);
        assert_eq!(cfg.seed, Some(7));
        assert_eq!(cfg.alphabet, DEFAULT_ALPHABET);
        assert_eq!(cfg.reset_probability, 0.025);
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn json_is_validated() {
        let err = RainConfig::from_json(r#"{ "reset_probability": 2.0 }"#).unwrap_err();
        assert!(matches!(err, RainError::InvalidConfig(_)));
        let err = RainConfig::from_json("not json").unwrap_err();
        assert!(matches!(err, RainError::Config(_)));
    }
}
