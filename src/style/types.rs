//! Style property enumerations
//!
//! All enumerations are closed sets; unknown keywords leave the property at
//! its previous value during the cascade.

use crate::css::values::CssValue;

/// CSS display kinds understood by layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Display {
  #[default]
  Block,
  Inline,
  InlineBlock,
  Flex,
  Table,
  TableRowGroup,
  TableRow,
  TableCell,
  None,
}

impl Display {
  /// Inline-level for the purposes of inline formatting context grouping
  pub fn is_inline_level(self) -> bool {
    matches!(self, Display::Inline | Display::InlineBlock)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Position {
  #[default]
  Static,
  Relative,
  Absolute,
  Fixed,
  Sticky,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoxSizing {
  #[default]
  ContentBox,
  BorderBox,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overflow {
  #[default]
  Visible,
  Hidden,
  Scroll,
  Auto,
}

impl Overflow {
  pub fn is_scroll_container(self) -> bool {
    matches!(self, Overflow::Scroll | Overflow::Auto)
  }

  pub fn clips(self) -> bool {
    !matches!(self, Overflow::Visible)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
  #[default]
  Left,
  Center,
  Right,
  /// Parsed but laid out as left
  Justify,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextDecoration {
  #[default]
  None,
  Underline,
  Overline,
  LineThrough,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontWeight {
  #[default]
  Normal,
  Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontStyle {
  #[default]
  Normal,
  Italic,
  Oblique,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerticalAlign {
  #[default]
  Baseline,
  Top,
  Middle,
  Bottom,
  TextTop,
  TextBottom,
  Sub,
  Super,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserSelect {
  #[default]
  Auto,
  None,
  Text,
  All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListStyleType {
  #[default]
  None,
  Disc,
  Circle,
  Square,
  Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ObjectFit {
  #[default]
  Fill,
  Contain,
  Cover,
  None,
  ScaleDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageRendering {
  #[default]
  Auto,
  Pixelated,
  CrispEdges,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlexDirection {
  #[default]
  Row,
  RowReverse,
  Column,
  ColumnReverse,
}

impl FlexDirection {
  pub fn is_row(self) -> bool {
    matches!(self, FlexDirection::Row | FlexDirection::RowReverse)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlexWrap {
  #[default]
  NoWrap,
  Wrap,
  WrapReverse,
}

impl FlexWrap {
  pub fn allows_wrap(self) -> bool {
    !matches!(self, FlexWrap::NoWrap)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JustifyContent {
  #[default]
  FlexStart,
  Center,
  FlexEnd,
  SpaceBetween,
  SpaceAround,
}

/// Parsed for completeness; stretch is the effective behavior in this core
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlignItems {
  #[default]
  Stretch,
  FlexStart,
  Center,
  FlexEnd,
  Baseline,
}

/// Four CSS values in box order. Mirrors the 1/2/3/4-value shorthand
/// distribution.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EdgeValues {
  pub top: CssValue,
  pub right: CssValue,
  pub bottom: CssValue,
  pub left: CssValue,
}

impl EdgeValues {
  pub const fn all(value: CssValue) -> Self {
    Self {
      top: value,
      right: value,
      bottom: value,
      left: value,
    }
  }

  pub const fn new(top: CssValue, right: CssValue, bottom: CssValue, left: CssValue) -> Self {
    Self {
      top,
      right,
      bottom,
      left,
    }
  }
}

/// Border radii per corner, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Corners {
  pub top_left: f32,
  pub top_right: f32,
  pub bottom_right: f32,
  pub bottom_left: f32,
}

impl Corners {
  pub const fn uniform(radius: f32) -> Self {
    Self {
      top_left: radius,
      top_right: radius,
      bottom_right: radius,
      bottom_left: radius,
    }
  }

  /// The single radius used when painting; corners are not painted
  /// independently in this core.
  pub fn max(self) -> f32 {
    self
      .top_left
      .max(self.top_right)
      .max(self.bottom_right)
      .max(self.bottom_left)
  }
}
