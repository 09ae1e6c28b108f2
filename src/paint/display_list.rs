//! Display list types
//!
//! The display list is the flat, ordered list of paint commands the painter
//! produces and a drawing backend executes. Items use pixel coordinates in
//! widget space, origin top-left, Y growing downward. Clip and translate
//! items nest; a backend intersects pushed clips with the enclosing clip.

use crate::css::color::Rgba;
use crate::geometry::Rect;
use crate::text::FontHandle;

/// A single paint command
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayItem {
  /// Fill a rectangle with a solid color
  FillRect(FillRectItem),

  /// Stroke a rectangle outline
  StrokeRect(StrokeRectItem),

  /// Fill a rounded rectangle (border-radius)
  FillRoundedRect(FillRoundedRectItem),

  /// Draw a straight line segment (decorations, checkmarks)
  Line(LineItem),

  /// Draw a text run at a baseline
  Text(TextItem),

  /// Begin a clip region (intersected with the enclosing clip)
  PushClip(Rect),

  /// End the innermost clip region
  PopClip,

  /// Begin a translation of subsequent items
  PushTranslate { dx: f32, dy: f32 },

  /// End the innermost translation
  PopTranslate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FillRectItem {
  pub rect: Rect,
  pub color: Rgba,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StrokeRectItem {
  pub rect: Rect,
  pub width: f32,
  pub color: Rgba,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FillRoundedRectItem {
  pub rect: Rect,
  pub radius: f32,
  pub color: Rgba,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
  pub x1: f32,
  pub y1: f32,
  pub x2: f32,
  pub y2: f32,
  pub thickness: f32,
  pub color: Rgba,
}

/// A text run positioned by its baseline
#[derive(Debug, Clone, PartialEq)]
pub struct TextItem {
  pub x: f32,
  /// Baseline Y
  pub y: f32,
  pub text: String,
  pub font: FontHandle,
  pub size: f32,
  pub color: Rgba,
}

impl DisplayItem {
  /// True for the nesting commands that must survive culling
  pub fn is_stack_operation(&self) -> bool {
    matches!(
      self,
      DisplayItem::PushClip(_) | DisplayItem::PopClip | DisplayItem::PushTranslate { .. } | DisplayItem::PopTranslate
    )
  }
}

/// An ordered list of paint commands
#[derive(Debug, Clone, Default)]
pub struct DisplayList {
  items: Vec<DisplayItem>,
}

impl DisplayList {
  pub fn new() -> Self {
    Self { items: Vec::new() }
  }

  pub fn push(&mut self, item: DisplayItem) {
    self.items.push(item);
  }

  pub fn items(&self) -> &[DisplayItem] {
    &self.items
  }

  pub fn len(&self) -> usize {
    self.items.len()
  }

  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  pub fn into_items(self) -> Vec<DisplayItem> {
    self.items
  }
}
