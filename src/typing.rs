//! Typewriter reveal for the hero role line.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlElement, Window};

use crate::error::RainError;

pub const DEFAULT_START_DELAY_MS: i32 = 1500;
pub const DEFAULT_SPEED_MS: i32 = 80;

/// Reveals a string one character at a time.
#[derive(Clone, Debug)]
pub struct Typewriter {
    text: String,
    /// Byte offset just past each character.
    ends: Vec<usize>,
    shown: usize,
}

impl Typewriter {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let ends = text.char_indices().map(|(i, c)| i + c.len_utf8()).collect();
        Self { text, ends, shown: 0 }
    }

    /// Next visible prefix, one character longer than the last; `None` once complete.
    pub fn advance(&mut self) -> Option<&str> {
        let end = *self.ends.get(self.shown)?;
        self.shown += 1;
        Some(&self.text[..end])
    }

    pub fn is_done(&self) -> bool {
        self.shown >= self.ends.len()
    }
}

struct Reveal {
    window: Window,
    element: Element,
    typer: Typewriter,
    speed_ms: i32,
}

impl Reveal {
    fn schedule(self, delay_ms: i32) -> Result<(), RainError> {
        let window = self.window.clone();
        let step = Closure::once_into_js(move || self.step());
        window.set_timeout_with_callback_and_timeout_and_arguments_0(
            step.unchecked_ref(),
            delay_ms,
        )?;
        Ok(())
    }

    fn step(mut self) {
        if let Some(prefix) = self.typer.advance() {
            self.element.set_text_content(Some(prefix));
            let speed = self.speed_ms;
            if let Err(err) = self.schedule(speed) {
                tracing::warn!(%err, "typing reveal stopped");
            }
            return;
        }
        // Caret border goes away once the full line is shown.
        if let Some(el) = self.element.dyn_ref::<HtmlElement>() {
            el.style().set_property("border-right", "none").ok();
        }
    }
}

/// Clear the element, then type its original text back in.
///
/// A missing element is not an error; the page may simply not have one.
pub fn start_reveal(
    window: &Window,
    element_id: &str,
    delay_ms: i32,
    speed_ms: i32,
) -> Result<(), RainError> {
    let doc = window.document().ok_or(RainError::NoDocument)?;
    let Some(element) = doc.get_element_by_id(element_id) else {
        tracing::debug!(element_id, "no typing target");
        return Ok(());
    };
    let text = element.text_content().unwrap_or_default();
    element.set_text_content(Some(""));
    let reveal = Reveal {
        window: window.clone(),
        element,
        typer: Typewriter::new(text),
        speed_ms: speed_ms.max(0),
    };
    reveal.schedule(delay_ms.max(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reveals_one_char_per_step() {
        let mut t = Typewriter::new("Dev");
        assert_eq!(t.advance(), Some("D"));
        assert_eq!(t.advance(), Some("De"));
        assert!(!t.is_done());
        assert_eq!(t.advance(), Some("Dev"));
        assert!(t.is_done());
        assert_eq!(t.advance(), None);
    }

    #[test]
    fn test_multibyte_prefixes_stay_on_char_boundaries() {
        let mut t = Typewriter::new("日本語 ok");
        let steps: Vec<String> = std::iter::from_fn(|| t.advance().map(str::to_owned)).collect();
        assert_eq!(steps.len(), 6);
        assert_eq!(steps[0], "日");
        assert_eq!(steps[2], "日本語");
        assert_eq!(steps[5], "日本語 ok");
    }

    #[test]
    fn test_empty_text_is_immediately_done() {
        let mut t = Typewriter::new("");
        assert!(t.is_done());
        assert_eq!(t.advance(), None);
    }
}
