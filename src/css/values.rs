//! CSS value types
//!
//! A [`CssValue`] is a numeric magnitude plus a unit tag. Resolution to
//! pixels takes the containing-block size, the current font size and the
//! viewport dimensions; `auto` and `none` resolve to the sentinel `-1.0`,
//! which consumers read as "not set".

/// CSS units understood by the value grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CssUnit {
  Px,
  Em,
  Rem,
  Percent,
  Vw,
  Vh,
  Auto,
  None,
}

/// A CSS length/keyword value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CssValue {
  pub value: f32,
  pub unit: CssUnit,
}

impl Default for CssValue {
  fn default() -> Self {
    Self {
      value: 0.0,
      unit: CssUnit::Px,
    }
  }
}

impl CssValue {
  pub const AUTO: Self = Self {
    value: -1.0,
    unit: CssUnit::Auto,
  };

  pub const NONE: Self = Self {
    value: -1.0,
    unit: CssUnit::None,
  };

  pub const fn px(value: f32) -> Self {
    Self {
      value,
      unit: CssUnit::Px,
    }
  }

  pub const fn em(value: f32) -> Self {
    Self {
      value,
      unit: CssUnit::Em,
    }
  }

  pub const fn percent(value: f32) -> Self {
    Self {
      value,
      unit: CssUnit::Percent,
    }
  }

  pub fn is_auto(self) -> bool {
    self.unit == CssUnit::Auto
  }

  /// True for the `auto`/`none` sentinels that never resolve to a length
  pub fn is_unset(self) -> bool {
    matches!(self.unit, CssUnit::Auto | CssUnit::None)
  }

  /// Resolves this value to CSS pixels.
  ///
  /// `parent_size` backs percentages, `font_size` backs em. `auto`/`none`
  /// resolve to `-1.0`.
  pub fn to_px(self, parent_size: f32, font_size: f32, viewport_width: f32, viewport_height: f32) -> f32 {
    match self.unit {
      CssUnit::Px => self.value,
      CssUnit::Em => self.value * font_size,
      CssUnit::Rem => self.value * 16.0,
      CssUnit::Percent => (self.value / 100.0) * parent_size,
      CssUnit::Vw => (self.value / 100.0) * viewport_width,
      CssUnit::Vh => (self.value / 100.0) * viewport_height,
      CssUnit::Auto | CssUnit::None => -1.0,
    }
  }

  /// Resolution shortcut for values that only depend on font size
  pub fn to_px_simple(self, parent_size: f32, font_size: f32) -> f32 {
    self.to_px(parent_size, font_size, 0.0, 0.0)
  }

  /// Parses the unit grammar: optional sign, digits with optional decimal
  /// point, then a unit token. Unknown units fall back to px. `auto` and
  /// `none` yield their sentinels; empty or unparseable input yields 0px.
  pub fn parse(input: &str) -> CssValue {
    let s = input.trim();

    if s.is_empty() {
      return CssValue::default();
    }
    if s.eq_ignore_ascii_case("auto") {
      return CssValue::AUTO;
    }
    if s.eq_ignore_ascii_case("none") {
      return CssValue::NONE;
    }

    let bytes = s.as_bytes();
    let mut i = 0;
    let negative = bytes[0] == b'-';
    if negative || bytes[0] == b'+' {
      i = 1;
    }

    let num_start = i;
    while i < bytes.len() && (bytes[i].is_ascii_digit() || bytes[i] == b'.') {
      i += 1;
    }
    if i == num_start {
      return CssValue::default();
    }

    let mut value: f32 = match s[num_start..i].parse() {
      Ok(v) => v,
      Err(_) => return CssValue::default(),
    };
    if negative {
      value = -value;
    }

    let unit = match s[i..].trim().to_ascii_lowercase().as_str() {
      "" | "px" => CssUnit::Px,
      "em" => CssUnit::Em,
      "rem" => CssUnit::Rem,
      "%" => CssUnit::Percent,
      "vw" => CssUnit::Vw,
      "vh" => CssUnit::Vh,
      _ => CssUnit::Px,
    };

    CssValue { value, unit }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_basic_units() {
    assert_eq!(CssValue::parse("10px"), CssValue::px(10.0));
    assert_eq!(CssValue::parse("1.5em"), CssValue::em(1.5));
    assert_eq!(CssValue::parse("50%"), CssValue::percent(50.0));
    assert_eq!(CssValue::parse("-4px"), CssValue::px(-4.0));
    assert_eq!(CssValue::parse("2rem").unit, CssUnit::Rem);
    assert_eq!(CssValue::parse("10vw").unit, CssUnit::Vw);
  }

  #[test]
  fn bare_numbers_and_unknown_units_are_px() {
    assert_eq!(CssValue::parse("12"), CssValue::px(12.0));
    assert_eq!(CssValue::parse("3pc"), CssValue::px(3.0));
  }

  #[test]
  fn keywords_resolve_to_sentinel() {
    assert!(CssValue::parse("auto").is_auto());
    assert!(CssValue::parse("none").is_unset());
    assert_eq!(CssValue::AUTO.to_px(100.0, 16.0, 800.0, 600.0), -1.0);
  }

  #[test]
  fn resolution_uses_context() {
    assert_eq!(CssValue::em(2.0).to_px(0.0, 16.0, 0.0, 0.0), 32.0);
    assert_eq!(CssValue::percent(50.0).to_px(200.0, 16.0, 0.0, 0.0), 100.0);
    assert_eq!(
      CssValue {
        value: 10.0,
        unit: CssUnit::Vw
      }
      .to_px(0.0, 16.0, 1024.0, 768.0),
      102.4
    );
    assert_eq!(
      CssValue {
        value: 50.0,
        unit: CssUnit::Vh
      }
      .to_px(0.0, 16.0, 1024.0, 768.0),
      384.0
    );
    assert_eq!(
      CssValue {
        value: 2.0,
        unit: CssUnit::Rem
      }
      .to_px(0.0, 20.0, 0.0, 0.0),
      32.0
    );
  }
}
