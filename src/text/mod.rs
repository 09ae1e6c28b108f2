//! Glyph provider interface
//!
//! Fonts are an external collaborator: atlas generation, loading and
//! rasterization live outside the core. The core only needs synchronous
//! metric lookups, which must be safe to call repeatedly once a lookup has
//! succeeded (providers populated by worker threads synchronize internally).
//!
//! All string operations take byte offsets on `char` boundaries and decode
//! UTF-8 with `char_indices`, so 2-, 3- and 4-byte sequences are measured as
//! single codepoints. A glyph the provider cannot supply contributes no
//! advance and is silently dropped from the line; this is never an error.

pub mod fixed;

use crate::style::types::{FontStyle, FontWeight};

pub use fixed::FixedFontProvider;

/// Opaque handle to a resolved font face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontHandle(pub u32);

impl FontHandle {
  /// The provider's default face, used when no family matches
  pub const DEFAULT: Self = Self(0);
}

/// Synchronous glyph metrics provider
///
/// `font` resolves a family list through the fallback chain (explicit list,
/// then `serif`, then any loaded face). The metric methods are pure
/// functions of `(handle, codepoint, size)`.
pub trait FontProvider {
  /// Resolves a font for a family list, weight and style
  fn font(&self, families: &[String], weight: FontWeight, style: FontStyle) -> FontHandle;

  /// Horizontal advance of one codepoint at `size_px`. Returns 0.0 for
  /// missing glyphs and for providers not yet ready for this codepoint.
  fn advance(&self, font: FontHandle, codepoint: char, size_px: f32) -> f32;

  /// Distance from the baseline to the top of the em box
  fn ascent(&self, font: FontHandle, size_px: f32) -> f32 {
    size_px * 0.8
  }

  /// Distance from the baseline to the bottom of the em box
  fn descent(&self, font: FontHandle, size_px: f32) -> f32 {
    size_px * 0.2
  }

  /// Width of a whole string. Control characters below U+0020 contribute
  /// nothing.
  fn text_width(&self, font: FontHandle, text: &str, size_px: f32) -> f32 {
    let mut width = 0.0;
    for c in text.chars() {
      if (c as u32) < 32 {
        continue;
      }
      width += self.advance(font, c, size_px);
    }
    width
  }

  /// Byte index of the character a local X position falls on. The pointer
  /// picks the character whose advance midpoint it has not yet passed;
  /// past the last midpoint the index is `text.len()`.
  fn hit_test(&self, font: FontHandle, text: &str, local_x: f32, size_px: f32) -> usize {
    if text.is_empty() || local_x <= 0.0 {
      return 0;
    }

    let mut x = 0.0;
    for (byte_idx, c) in text.char_indices() {
      let advance = if (c as u32) < 32 {
        0.0
      } else {
        self.advance(font, c, size_px)
      };
      let midpoint = x + advance / 2.0;
      if local_x < midpoint {
        return byte_idx;
      }
      x += advance;
    }

    text.len()
  }

  /// Local X position of the caret before the character at `byte_index`
  fn position_at_index(&self, font: FontHandle, text: &str, byte_index: usize, size_px: f32) -> f32 {
    let mut x = 0.0;
    for (byte_idx, c) in text.char_indices() {
      if byte_idx >= byte_index {
        break;
      }
      if (c as u32) < 32 {
        continue;
      }
      x += self.advance(font, c, size_px);
    }
    x
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn text_width_sums_advances() {
    let fonts = FixedFontProvider::new();
    let font = FontHandle::DEFAULT;
    // Fixed provider: advance is half the size
    assert_eq!(fonts.text_width(font, "abcd", 16.0), 32.0);
    assert_eq!(fonts.text_width(font, "", 16.0), 0.0);
  }

  #[test]
  fn multibyte_codepoints_count_once() {
    let fonts = FixedFontProvider::new();
    let font = FontHandle::DEFAULT;
    // U+2019 is three bytes but one glyph
    assert_eq!(fonts.text_width(font, "a\u{2019}b", 16.0), 24.0);
    // 4-byte emoji measures as one advance
    assert_eq!(fonts.text_width(font, "\u{1F600}", 16.0), 8.0);
  }

  #[test]
  fn hit_test_uses_midpoints() {
    let fonts = FixedFontProvider::new();
    let font = FontHandle::DEFAULT;
    // Advances of 8px at size 16: midpoints at 4, 12, 20...
    assert_eq!(fonts.hit_test(font, "abc", 0.0, 16.0), 0);
    assert_eq!(fonts.hit_test(font, "abc", 3.9, 16.0), 0);
    assert_eq!(fonts.hit_test(font, "abc", 4.1, 16.0), 1);
    assert_eq!(fonts.hit_test(font, "abc", 13.0, 16.0), 2);
    assert_eq!(fonts.hit_test(font, "abc", 99.0, 16.0), 3);
  }

  #[test]
  fn hit_test_returns_char_boundaries() {
    let fonts = FixedFontProvider::new();
    let font = FontHandle::DEFAULT;
    let text = "a\u{2019}b";
    let idx = fonts.hit_test(font, text, 9.0, 16.0);
    assert!(text.is_char_boundary(idx));
    assert_eq!(idx, 1);
  }

  #[test]
  fn position_at_index_is_prefix_width() {
    let fonts = FixedFontProvider::new();
    let font = FontHandle::DEFAULT;
    assert_eq!(fonts.position_at_index(font, "abcd", 0, 16.0), 0.0);
    assert_eq!(fonts.position_at_index(font, "abcd", 2, 16.0), 16.0);
    assert_eq!(fonts.position_at_index(font, "abcd", 4, 16.0), 32.0);
  }
}
