//! Deterministic fixed-metrics font provider
//!
//! Every glyph advances half the font size, ascent is 0.8em and descent
//! 0.2em. Useful for tests and for headless layout when no real atlas is
//! attached; layout stays fully deterministic across platforms.

use crate::style::types::{FontStyle, FontWeight};
use crate::text::{FontHandle, FontProvider};

/// A provider with uniform glyph metrics
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedFontProvider {
  advance_ratio: f32,
}

impl FixedFontProvider {
  pub fn new() -> Self {
    Self { advance_ratio: 0.5 }
  }

  /// Overrides the advance-to-size ratio (default 0.5)
  pub fn with_advance_ratio(advance_ratio: f32) -> Self {
    Self { advance_ratio }
  }
}

impl FontProvider for FixedFontProvider {
  fn font(&self, _families: &[String], _weight: FontWeight, _style: FontStyle) -> FontHandle {
    FontHandle::DEFAULT
  }

  fn advance(&self, _font: FontHandle, _codepoint: char, size_px: f32) -> f32 {
    size_px * self.advance_ratio
  }
}
