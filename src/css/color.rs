//! Color values and parsing
//!
//! Colors are four floats in `[0, 1]`. Parsing recognises the fixed named
//! color table, hex notation (`#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`),
//! `rgb()`/`rgba()` with comma-separated components, and `hsl()`/`hsla()`
//! converted by the standard algorithm.

/// An RGBA color with components in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
  pub r: f32,
  pub g: f32,
  pub b: f32,
  pub a: f32,
}

impl Rgba {
  pub const BLACK: Self = Self::opaque(0.0, 0.0, 0.0);
  pub const WHITE: Self = Self::opaque(1.0, 1.0, 1.0);
  pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

  pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
    Self { r, g, b, a }
  }

  pub const fn opaque(r: f32, g: f32, b: f32) -> Self {
    Self { r, g, b, a: 1.0 }
  }

  pub fn is_visible(self) -> bool {
    self.a > 0.0
  }

  /// Parses a CSS color. Returns `None` for unrecognised input; the caller
  /// keeps its previous value, matching the skip-bad-declarations policy.
  pub fn parse(input: &str) -> Option<Rgba> {
    let s = input.trim().to_ascii_lowercase();
    if s.is_empty() {
      return None;
    }

    if let Some(color) = named_color(&s) {
      return Some(color);
    }
    if let Some(hex) = s.strip_prefix('#') {
      return parse_hex(hex);
    }
    if s.starts_with("rgb(") || s.starts_with("rgba(") {
      return parse_rgb(&s);
    }
    if s.starts_with("hsl(") || s.starts_with("hsla(") {
      return parse_hsl(&s);
    }

    None
  }
}

impl Default for Rgba {
  fn default() -> Self {
    Self::BLACK
  }
}

/// The fixed named-color table
fn named_color(name: &str) -> Option<Rgba> {
  let c = match name {
    "black" => Rgba::opaque(0.0, 0.0, 0.0),
    "white" => Rgba::opaque(1.0, 1.0, 1.0),
    "red" => Rgba::opaque(1.0, 0.0, 0.0),
    "green" => Rgba::opaque(0.0, 0.5, 0.0),
    "blue" => Rgba::opaque(0.0, 0.0, 1.0),
    "yellow" => Rgba::opaque(1.0, 1.0, 0.0),
    "cyan" | "aqua" => Rgba::opaque(0.0, 1.0, 1.0),
    "magenta" | "fuchsia" => Rgba::opaque(1.0, 0.0, 1.0),
    "orange" => Rgba::opaque(1.0, 0.647, 0.0),
    "purple" => Rgba::opaque(0.5, 0.0, 0.5),
    "pink" => Rgba::opaque(1.0, 0.753, 0.796),
    "brown" => Rgba::opaque(0.647, 0.165, 0.165),
    "gray" | "grey" => Rgba::opaque(0.5, 0.5, 0.5),
    "silver" => Rgba::opaque(0.753, 0.753, 0.753),
    "navy" => Rgba::opaque(0.0, 0.0, 0.5),
    "teal" => Rgba::opaque(0.0, 0.5, 0.5),
    "olive" => Rgba::opaque(0.5, 0.5, 0.0),
    "maroon" => Rgba::opaque(0.5, 0.0, 0.0),
    "lime" => Rgba::opaque(0.0, 1.0, 0.0),
    "transparent" => Rgba::TRANSPARENT,
    "lightgray" | "lightgrey" => Rgba::opaque(0.827, 0.827, 0.827),
    "darkgray" | "darkgrey" => Rgba::opaque(0.663, 0.663, 0.663),
    "lightblue" => Rgba::opaque(0.678, 0.847, 0.902),
    "lightgreen" => Rgba::opaque(0.565, 0.933, 0.565),
    "lightyellow" => Rgba::opaque(1.0, 1.0, 0.878),
    "darkblue" => Rgba::opaque(0.0, 0.0, 0.545),
    "darkgreen" => Rgba::opaque(0.0, 0.392, 0.0),
    "darkred" => Rgba::opaque(0.545, 0.0, 0.0),
    "coral" => Rgba::opaque(1.0, 0.498, 0.314),
    "crimson" => Rgba::opaque(0.863, 0.078, 0.235),
    "gold" => Rgba::opaque(1.0, 0.843, 0.0),
    "indigo" => Rgba::opaque(0.294, 0.0, 0.51),
    "ivory" => Rgba::opaque(1.0, 1.0, 0.941),
    "khaki" => Rgba::opaque(0.941, 0.902, 0.549),
    "lavender" => Rgba::opaque(0.902, 0.902, 0.98),
    "salmon" => Rgba::opaque(0.98, 0.502, 0.447),
    "skyblue" => Rgba::opaque(0.529, 0.808, 0.922),
    "tomato" => Rgba::opaque(1.0, 0.388, 0.278),
    "turquoise" => Rgba::opaque(0.251, 0.878, 0.816),
    "violet" => Rgba::opaque(0.933, 0.51, 0.933),
    "wheat" => Rgba::opaque(0.961, 0.871, 0.702),
    _ => return None,
  };
  Some(c)
}

fn hex_pair(byte_high: u8, byte_low: u8) -> Option<u8> {
  let high = (byte_high as char).to_digit(16)?;
  let low = (byte_low as char).to_digit(16)?;
  Some((high * 16 + low) as u8)
}

fn parse_hex(hex: &str) -> Option<Rgba> {
  let b = hex.as_bytes();
  let (r, g, b, a) = match b.len() {
    // #RGB and #RGBA expand each digit to a pair
    3 => (
      hex_pair(b[0], b[0])?,
      hex_pair(b[1], b[1])?,
      hex_pair(b[2], b[2])?,
      255,
    ),
    4 => (
      hex_pair(b[0], b[0])?,
      hex_pair(b[1], b[1])?,
      hex_pair(b[2], b[2])?,
      hex_pair(b[3], b[3])?,
    ),
    6 => (
      hex_pair(b[0], b[1])?,
      hex_pair(b[2], b[3])?,
      hex_pair(b[4], b[5])?,
      255,
    ),
    8 => (
      hex_pair(b[0], b[1])?,
      hex_pair(b[2], b[3])?,
      hex_pair(b[4], b[5])?,
      hex_pair(b[6], b[7])?,
    ),
    _ => return None,
  };
  Some(Rgba::new(
    r as f32 / 255.0,
    g as f32 / 255.0,
    b as f32 / 255.0,
    a as f32 / 255.0,
  ))
}

/// Extracts the comma-separated arguments between the parentheses
fn function_args(s: &str) -> Option<Vec<&str>> {
  let open = s.find('(')?;
  let close = s.find(')')?;
  if close <= open {
    return None;
  }
  Some(s[open + 1..close].split(',').map(str::trim).collect())
}

fn parse_rgb(s: &str) -> Option<Rgba> {
  let args = function_args(s)?;
  if args.len() < 3 {
    return None;
  }

  let mut parts = Vec::with_capacity(4);
  for arg in &args {
    if let Some(pct) = arg.strip_suffix('%') {
      parts.push(pct.trim().parse::<f32>().ok()? / 100.0);
    } else {
      let mut v = arg.parse::<f32>().ok()?;
      // Values above 1 are in the 0-255 range
      if v > 1.0 {
        v /= 255.0;
      }
      parts.push(v);
    }
  }

  let a = if parts.len() >= 4 { parts[3] } else { 1.0 };
  Some(Rgba::new(parts[0], parts[1], parts[2], a))
}

fn parse_hsl(s: &str) -> Option<Rgba> {
  let args = function_args(s)?;
  if args.len() < 3 {
    return None;
  }

  let h = args[0].parse::<f32>().ok()?.rem_euclid(360.0) / 360.0;
  let sat = args[1].trim_end_matches('%').trim().parse::<f32>().ok()? / 100.0;
  let light = args[2].trim_end_matches('%').trim().parse::<f32>().ok()? / 100.0;
  let a = if args.len() >= 4 {
    let raw = args[3].trim_end_matches('%').trim().parse::<f32>().ok()?;
    if args[3].ends_with('%') {
      raw / 100.0
    } else {
      raw
    }
  } else {
    1.0
  };

  let (r, g, b) = if sat == 0.0 {
    (light, light, light)
  } else {
    let q = if light < 0.5 {
      light * (1.0 + sat)
    } else {
      light + sat - light * sat
    };
    let p = 2.0 * light - q;
    (
      hue_to_rgb(p, q, h + 1.0 / 3.0),
      hue_to_rgb(p, q, h),
      hue_to_rgb(p, q, h - 1.0 / 3.0),
    )
  };

  Some(Rgba::new(r, g, b, a))
}

fn hue_to_rgb(p: f32, q: f32, mut t: f32) -> f32 {
  if t < 0.0 {
    t += 1.0;
  }
  if t > 1.0 {
    t -= 1.0;
  }
  if t < 1.0 / 6.0 {
    return p + (q - p) * 6.0 * t;
  }
  if t < 1.0 / 2.0 {
    return q;
  }
  if t < 2.0 / 3.0 {
    return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
  }
  p
}

#[cfg(test)]
mod tests {
  use super::*;

  fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 0.005
  }

  #[test]
  fn parses_named_colors() {
    assert_eq!(Rgba::parse("red"), Some(Rgba::opaque(1.0, 0.0, 0.0)));
    assert_eq!(Rgba::parse(" White "), Some(Rgba::WHITE));
    assert_eq!(Rgba::parse("transparent"), Some(Rgba::TRANSPARENT));
    assert_eq!(Rgba::parse("notacolor"), None);
  }

  #[test]
  fn parses_hex_forms() {
    let c = Rgba::parse("#f00").unwrap();
    assert!(close(c.r, 1.0) && close(c.g, 0.0) && close(c.b, 0.0));

    let c = Rgba::parse("#336699").unwrap();
    assert!(close(c.r, 0.2) && close(c.g, 0.4) && close(c.b, 0.6));

    let c = Rgba::parse("#33669980").unwrap();
    assert!(close(c.a, 128.0 / 255.0));

    assert_eq!(Rgba::parse("#12345"), None);
  }

  #[test]
  fn parses_rgb_functions() {
    let c = Rgba::parse("rgb(255, 0, 0)").unwrap();
    assert!(close(c.r, 1.0) && close(c.g, 0.0));

    let c = Rgba::parse("rgba(0, 128, 255, 0.5)").unwrap();
    assert!(close(c.g, 128.0 / 255.0) && close(c.a, 0.5));

    let c = Rgba::parse("rgb(100%, 50%, 0%)").unwrap();
    assert!(close(c.r, 1.0) && close(c.g, 0.5) && close(c.b, 0.0));
  }

  #[test]
  fn parses_hsl_functions() {
    // Pure red
    let c = Rgba::parse("hsl(0, 100%, 50%)").unwrap();
    assert!(close(c.r, 1.0) && close(c.g, 0.0) && close(c.b, 0.0));

    // Pure green at 120 degrees
    let c = Rgba::parse("hsl(120, 100%, 50%)").unwrap();
    assert!(close(c.g, 1.0) && close(c.r, 0.0));

    // Greyscale when saturation is zero
    let c = Rgba::parse("hsl(200, 0%, 40%)").unwrap();
    assert!(close(c.r, 0.4) && close(c.g, 0.4) && close(c.b, 0.4));

    let c = Rgba::parse("hsla(240, 100%, 50%, 0.25)").unwrap();
    assert!(close(c.b, 1.0) && close(c.a, 0.25));
  }
}
