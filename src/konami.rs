//! Keyboard easter egg: the Konami code makes the page cycle colours for a few seconds.

use std::collections::VecDeque;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, KeyboardEvent, Window};

use crate::error::RainError;

pub const KONAMI_SEQUENCE: [&str; 10] = [
    "ArrowUp",
    "ArrowUp",
    "ArrowDown",
    "ArrowDown",
    "ArrowLeft",
    "ArrowRight",
    "ArrowLeft",
    "ArrowRight",
    "b",
    "a",
];

const CELEBRATE_ANIMATION: &str = "rainbow 2s infinite";
const CELEBRATE_MS: i32 = 5000;

/// Rolling window over the most recent key presses.
#[derive(Debug, Default)]
pub struct KonamiDetector {
    recent: VecDeque<String>,
}

impl KonamiDetector {
    /// Record a key (`KeyboardEvent.key`); `true` when the last ten keys spell the code.
    pub fn push(&mut self, key: &str) -> bool {
        self.recent.push_back(key.to_string());
        while self.recent.len() > KONAMI_SEQUENCE.len() {
            self.recent.pop_front();
        }
        self.recent.iter().map(String::as_str).eq(KONAMI_SEQUENCE)
    }
}

/// Listen for the code on `keydown` for the rest of the page's life.
pub fn install(window: &Window) -> Result<(), RainError> {
    let doc = window.document().ok_or(RainError::NoDocument)?;
    let mut detector = KonamiDetector::default();
    let win = window.clone();
    let closure = Closure::wrap(Box::new(move |evt: KeyboardEvent| {
        if detector.push(&evt.key()) {
            tracing::info!("konami code entered");
            if let Err(err) = celebrate(&win) {
                tracing::warn!(%err, "easter egg failed");
            }
        }
    }) as Box<dyn FnMut(_)>);
    doc.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn celebrate(window: &Window) -> Result<(), RainError> {
    let doc = window.document().ok_or(RainError::NoDocument)?;
    set_body_animation(&doc, CELEBRATE_ANIMATION)?;
    let reset = Closure::once_into_js(move || {
        set_body_animation(&doc, "").ok();
    });
    window.set_timeout_with_callback_and_timeout_and_arguments_0(
        reset.unchecked_ref(),
        CELEBRATE_MS,
    )?;
    Ok(())
}

fn set_body_animation(doc: &Document, value: &str) -> Result<(), RainError> {
    if let Some(body) = doc.body() {
        body.style().set_property("animation", value)?;
    }
    Ok(())
}
