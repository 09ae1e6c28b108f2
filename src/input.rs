//! Input events
//!
//! Events arrive from an external window/event source in FIFO order.
//! Pointer positions are in widget space (origin top-left, Y down); click
//! counts are supplied by the source's double/triple-click detection.

/// Keyboard modifier state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
  pub shift: bool,
  pub ctrl: bool,
  pub alt: bool,
}

impl Modifiers {
  pub const NONE: Self = Self {
    shift: false,
    ctrl: false,
    alt: false,
  };

  pub const SHIFT: Self = Self {
    shift: true,
    ctrl: false,
    alt: false,
  };

  pub const CTRL: Self = Self {
    shift: false,
    ctrl: true,
    alt: false,
  };

  pub const CTRL_SHIFT: Self = Self {
    shift: true,
    ctrl: true,
    alt: false,
  };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
  Left,
  Middle,
  Right,
}

/// Keys the selection core responds to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
  ArrowLeft,
  ArrowRight,
  ArrowUp,
  ArrowDown,
  /// A character key, lower-cased (`a` and `c` carry the shortcuts)
  Char(char),
}
