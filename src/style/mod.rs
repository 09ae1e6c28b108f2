//! Style system
//!
//! [`ComputedStyle`] is the resolved per-node property set read by layout and
//! paint. The cascade lives in [`cascade`], per-property application in
//! [`properties`], and the user-agent defaults in [`defaults`].

pub mod cascade;
pub mod defaults;
pub mod properties;
pub mod types;

use crate::css::color::Rgba;
use crate::css::values::CssValue;
pub use cascade::StyleEngine;
pub use types::{
  AlignItems, BoxSizing, Corners, Display, EdgeValues, FlexDirection, FlexWrap, FontStyle, FontWeight,
  ImageRendering, JustifyContent, ListStyleType, ObjectFit, Overflow, Position, TextAlign, TextDecoration,
  UserSelect, VerticalAlign,
};

/// Tracks which inheritable properties the cascade actually set on an
/// element. Inheritance copies the parent value only when the flag is clear,
/// which gives true per-property semantics instead of guessing from the
/// inline style text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExplicitFlags {
  pub color: bool,
  pub font_size: bool,
  pub font_weight: bool,
  pub font_style: bool,
  pub font_family: bool,
  pub text_decoration: bool,
  pub text_align: bool,
  pub line_height: bool,
  pub user_select: bool,
}

/// The computed style of one node
#[derive(Debug, Clone, PartialEq)]
pub struct ComputedStyle {
  // Layout kinds
  pub display: Display,
  pub position: Position,
  pub box_sizing: BoxSizing,
  pub overflow: Overflow,

  // Box model
  pub margin: EdgeValues,
  pub padding: EdgeValues,
  pub border_width: EdgeValues,

  pub border_top_color: Rgba,
  pub border_right_color: Rgba,
  pub border_bottom_color: Rgba,
  pub border_left_color: Rgba,

  pub width: CssValue,
  pub height: CssValue,
  pub min_width: CssValue,
  pub min_height: CssValue,
  pub max_width: CssValue,
  pub max_height: CssValue,

  pub border_radius: Corners,

  // Colors
  pub color: Rgba,
  pub background_color: Rgba,

  // Typography
  pub font_family: Vec<String>,
  pub font_size: f32,
  /// Multiplier over font size
  pub line_height: f32,
  pub font_weight: FontWeight,
  pub font_style: FontStyle,
  pub text_decoration: TextDecoration,
  pub text_align: TextAlign,
  pub vertical_align: VerticalAlign,

  // Visual
  pub opacity: f32,

  // Flex container and item properties
  pub flex_direction: FlexDirection,
  pub flex_wrap: FlexWrap,
  pub justify_content: JustifyContent,
  pub align_items: AlignItems,
  pub flex_grow: f32,
  pub flex_shrink: f32,
  pub flex_basis: CssValue,
  pub gap: f32,

  // Lists
  pub list_style_type: ListStyleType,
  /// 1-based ordinal among element li siblings, set by the runtime rules
  pub list_item_index: u32,

  // Selection
  pub user_select: UserSelect,

  // Replaced content
  pub object_fit: ObjectFit,
  /// Horizontal and vertical object position (percent or length)
  pub object_position: (CssValue, CssValue),
  pub image_rendering: ImageRendering,

  /// Which inheritable properties the cascade set explicitly
  pub explicit: ExplicitFlags,
}

impl Default for ComputedStyle {
  fn default() -> Self {
    Self {
      display: Display::Block,
      position: Position::Static,
      box_sizing: BoxSizing::ContentBox,
      overflow: Overflow::Visible,

      margin: EdgeValues::default(),
      padding: EdgeValues::default(),
      border_width: EdgeValues::default(),

      border_top_color: Rgba::BLACK,
      border_right_color: Rgba::BLACK,
      border_bottom_color: Rgba::BLACK,
      border_left_color: Rgba::BLACK,

      width: CssValue::AUTO,
      height: CssValue::AUTO,
      min_width: CssValue::px(0.0),
      min_height: CssValue::px(0.0),
      max_width: CssValue::AUTO,
      max_height: CssValue::AUTO,

      border_radius: Corners::default(),

      color: Rgba::BLACK,
      background_color: Rgba::TRANSPARENT,

      font_family: vec!["serif".to_string()],
      font_size: 16.0,
      line_height: 1.2,
      font_weight: FontWeight::Normal,
      font_style: FontStyle::Normal,
      text_decoration: TextDecoration::None,
      text_align: TextAlign::Left,
      vertical_align: VerticalAlign::Baseline,

      opacity: 1.0,

      flex_direction: FlexDirection::Row,
      flex_wrap: FlexWrap::NoWrap,
      justify_content: JustifyContent::FlexStart,
      align_items: AlignItems::Stretch,
      flex_grow: 0.0,
      flex_shrink: 1.0,
      flex_basis: CssValue::AUTO,
      gap: 0.0,

      list_style_type: ListStyleType::None,
      list_item_index: 0,

      user_select: UserSelect::Auto,

      object_fit: ObjectFit::Fill,
      object_position: (CssValue::percent(50.0), CssValue::percent(50.0)),
      image_rendering: ImageRendering::Auto,

      explicit: ExplicitFlags::default(),
    }
  }
}

impl ComputedStyle {
  /// The line box height contribution of text at this style
  pub fn line_height_px(&self) -> f32 {
    self.font_size * self.line_height
  }
}
