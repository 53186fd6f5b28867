// Sanity checks for the default glyph alphabet and page defaults.
// Native-friendly; no wasm/browser APIs.

use std::collections::HashSet;

use glyph_rain::config::DEFAULT_ALPHABET;
use glyph_rain::RainConfig;

#[test]
fn default_alphabet_has_unique_printable_glyphs() {
    let mut seen = HashSet::new();
    for c in DEFAULT_ALPHABET.chars() {
        assert!(seen.insert(c), "duplicate glyph '{}'", c);
        assert!(!c.is_whitespace() && !c.is_control(), "unprintable glyph {:?}", c);
    }
    assert_eq!(seen.len(), 48);
}

#[test]
fn default_alphabet_starts_with_binary_digits() {
    assert!(DEFAULT_ALPHABET.starts_with("01"));
    assert!(DEFAULT_ALPHABET.ends_with('ン'));
}

#[test]
fn default_config_validates() {
    assert!(RainConfig::default().validate().is_ok());
}
