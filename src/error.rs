use wasm_bindgen::JsValue;

/// Failures that can happen while wiring the rain (or a flourish) into the page.
///
/// The frame loop itself never fails; everything here is a setup problem.
#[derive(Debug, thiserror::Error)]
pub enum RainError {
    #[error("no global window")]
    NoWindow,

    #[error("window has no document")]
    NoDocument,

    #[error("no element with id '{0}'")]
    CanvasNotFound(String),

    #[error("element '{0}' is not a canvas")]
    NotACanvas(String),

    #[error("canvas has no 2d context")]
    NoContext,

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("malformed config: {0}")]
    Config(String),

    #[error("browser call failed: {0}")]
    Js(String),
}

impl From<JsValue> for RainError {
    fn from(value: JsValue) -> Self {
        let text = value.as_string().unwrap_or_else(|| format!("{value:?}"));
        Self::Js(text)
    }
}

impl From<RainError> for JsValue {
    fn from(err: RainError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_element() {
        let err = RainError::CanvasNotFound("matrix-canvas".into());
        assert_eq!(err.to_string(), "no element with id 'matrix-canvas'");
        let err = RainError::InvalidConfig("glyph_size must be at least 1".into());
        assert_eq!(err.to_string(), "invalid config: glyph_size must be at least 1");
    }
}
