//! Display list construction
//!
//! Walks the render tree in paint order: background, borders, list marker,
//! selection highlight, text, decorations, then children inside any clip and
//! scroll translation. Boxes entirely outside the viewport band are culled;
//! containers still descend so translated content is not lost.

use crate::css::color::Rgba;
use crate::dom::Document;
use crate::geometry::Rect;
use crate::paint::display_list::{
  DisplayItem, DisplayList, FillRectItem, FillRoundedRectItem, LineItem, StrokeRectItem, TextItem,
};
use crate::selection::Selection;
use crate::style::types::{ListStyleType, TextDecoration};
use crate::text::FontProvider;
use crate::tree::{BoxId, RenderTree};

/// Selection highlight fill
const SELECTION_COLOR: Rgba = Rgba::new(0.2, 0.4, 0.9, 1.0);
/// Selected glyphs repaint in this color
const SELECTED_TEXT_COLOR: Rgba = Rgba::WHITE;

const SCROLLBAR_WIDTH: f32 = 8.0;

/// Builds display lists for a laid-out tree
pub struct Painter<'a> {
  tree: &'a RenderTree,
  document: &'a Document,
  fonts: &'a dyn FontProvider,
  selection: &'a Selection,
}

impl<'a> Painter<'a> {
  pub fn new(
    tree: &'a RenderTree,
    document: &'a Document,
    fonts: &'a dyn FontProvider,
    selection: &'a Selection,
  ) -> Self {
    Self {
      tree,
      document,
      fonts,
      selection,
    }
  }

  /// Paints the tree into a fresh display list. `viewport_top` and
  /// `viewport_bottom` bound the visible band in content space for culling.
  pub fn paint(&self, viewport_top: f32, viewport_bottom: f32) -> DisplayList {
    let mut list = DisplayList::new();
    self.paint_box(&mut list, self.tree.root, viewport_top, viewport_bottom);
    list
  }

  fn paint_box(&self, list: &mut DisplayList, id: BoxId, viewport_top: f32, viewport_bottom: f32) {
    let render_box = self.tree.get(id);
    let style = &render_box.style;
    let frame = render_box.frame();

    // Zero-sized boxes paint nothing themselves but may hold children
    if frame.width() <= 0.0 || frame.height() <= 0.0 {
      for &child in &render_box.children {
        self.paint_box(list, child, viewport_top, viewport_bottom);
      }
      return;
    }

    // Viewport culling: leaves outside the band are skipped entirely,
    // containers still descend.
    if frame.max_y() < viewport_top || frame.min_y() > viewport_bottom {
      for &child in &render_box.children {
        self.paint_box(list, child, viewport_top, viewport_bottom);
      }
      return;
    }

    let is_checkbox = self.input_type(id) == Some("checkbox".to_string());

    // 1. Background
    if style.background_color.is_visible() && !is_checkbox {
      let radius = style.border_radius.max();
      if radius > 0.0 {
        list.push(DisplayItem::FillRoundedRect(FillRoundedRectItem {
          rect: frame,
          radius,
          color: style.background_color,
        }));
      } else {
        list.push(DisplayItem::FillRect(FillRectItem {
          rect: frame,
          color: style.background_color,
        }));
      }
    }

    // 2. Borders, one filled rect per side with its own color
    if self.document.is_element(render_box.node) && !is_checkbox {
      self.paint_borders(list, id, frame);
    }

    // 3. List marker
    if self.document.tag_name(render_box.node) == Some("li") && style.list_style_type != ListStyleType::None {
      self.paint_list_marker(list, id);
    }

    // 4. Form control chrome
    if is_checkbox {
      self.paint_checkbox(list, id);
    } else if self.document.tag_name(render_box.node) == Some("img") {
      self.paint_image_placeholder(list, id);
    }

    // 5. Text with selection highlight and decorations
    if self.document.is_text(render_box.node) && !render_box.lines.is_empty() {
      self.paint_text(list, id);
    }

    // 6. Children inside any overflow clip and scroll translation
    let clips = style.overflow.clips();
    if clips {
      list.push(DisplayItem::PushClip(render_box.metrics.padding_box()));
    }

    let scrolled = render_box.scroll.x != 0.0 || render_box.scroll.y != 0.0;
    if scrolled {
      list.push(DisplayItem::PushTranslate {
        dx: -render_box.scroll.x,
        dy: -render_box.scroll.y,
      });
    }

    for &child in &render_box.children {
      // Children of a scrolled box are culled against the shifted band
      let (top, bottom) = if scrolled {
        (
          viewport_top + render_box.scroll.y,
          viewport_bottom + render_box.scroll.y,
        )
      } else {
        (viewport_top, viewport_bottom)
      };
      self.paint_box(list, child, top, bottom);
    }

    if scrolled {
      list.push(DisplayItem::PopTranslate);
    }

    // 7. Scrollbar, drawn inside this box's clip but outside the scroll
    // translation
    if render_box.is_scrollable() && render_box.scroll.scrollable_height > 0.0 {
      self.paint_scrollbar(list, id);
    }

    if clips {
      list.push(DisplayItem::PopClip);
    }
  }

  fn input_type(&self, id: BoxId) -> Option<String> {
    let node = self.tree.get(id).node;
    if self.document.tag_name(node) != Some("input") {
      return None;
    }
    Some(
      self
        .document
        .attribute(node, "type")
        .map(|t| t.to_ascii_lowercase())
        .unwrap_or_else(|| "text".to_string()),
    )
  }

  fn paint_borders(&self, list: &mut DisplayList, id: BoxId, frame: Rect) {
    let render_box = self.tree.get(id);
    let style = &render_box.style;
    let border = render_box.metrics.border;

    if border.top > 0.0 {
      list.push(DisplayItem::FillRect(FillRectItem {
        rect: Rect::from_xywh(frame.x(), frame.y(), frame.width(), border.top),
        color: style.border_top_color,
      }));
    }
    if border.bottom > 0.0 {
      list.push(DisplayItem::FillRect(FillRectItem {
        rect: Rect::from_xywh(frame.x(), frame.max_y() - border.bottom, frame.width(), border.bottom),
        color: style.border_bottom_color,
      }));
    }
    if border.left > 0.0 {
      list.push(DisplayItem::FillRect(FillRectItem {
        rect: Rect::from_xywh(frame.x(), frame.y(), border.left, frame.height()),
        color: style.border_left_color,
      }));
    }
    if border.right > 0.0 {
      list.push(DisplayItem::FillRect(FillRectItem {
        rect: Rect::from_xywh(frame.max_x() - border.right, frame.y(), border.right, frame.height()),
        color: style.border_right_color,
      }));
    }
  }

  fn paint_list_marker(&self, list: &mut DisplayList, id: BoxId) {
    let render_box = self.tree.get(id);
    let style = &render_box.style;
    let font = self
      .fonts
      .font(&style.font_family, style.font_weight, style.font_style);
    let font_size = style.font_size;

    // Align the marker with the first text line inside the item
    let marker_y = self
      .first_line_y(id)
      .unwrap_or_else(|| render_box.metrics.content.y());

    let marker = match style.list_style_type {
      ListStyleType::Disc => "\u{2022}".to_string(),
      ListStyleType::Circle => "\u{25CB}".to_string(),
      ListStyleType::Square => "\u{25AA}".to_string(),
      ListStyleType::Decimal => format!("{}.", style.list_item_index),
      ListStyleType::None => return,
    };

    let marker_width = self.fonts.text_width(font, &marker, font_size);
    let content_x = render_box.metrics.content.x();
    // Numbers right-align to a shared edge; bullets center at a fixed slot
    let marker_x = if style.list_style_type == ListStyleType::Decimal {
      content_x - 6.0 - marker_width
    } else {
      content_x - 12.0 - marker_width / 2.0
    };

    list.push(DisplayItem::Text(TextItem {
      x: marker_x,
      y: marker_y + self.fonts.ascent(font, font_size),
      text: marker,
      font,
      size: font_size,
      color: style.color,
    }));
  }

  /// Y of the first text line anywhere inside a subtree
  fn first_line_y(&self, id: BoxId) -> Option<f32> {
    let render_box = self.tree.get(id);
    if let Some(first) = render_box.lines.first() {
      return Some(first.y);
    }
    for &child in &render_box.children {
      if let Some(y) = self.first_line_y(child) {
        return Some(y);
      }
    }
    None
  }

  fn paint_text(&self, list: &mut DisplayList, id: BoxId) {
    let render_box = self.tree.get(id);
    let style = &render_box.style;
    let font = self
      .fonts
      .font(&style.font_family, style.font_weight, style.font_style);
    let font_size = style.font_size;
    let ascent = self.fonts.ascent(font, font_size);

    for (line_idx, line) in render_box.lines.iter().enumerate() {
      let (sel_start, sel_end) = self.selection.range_for_line(id, line_idx, line.text.len());
      let has_selection = sel_start < sel_end;

      // Selection highlight behind the glyphs
      if has_selection {
        let start_x = line.x + self.fonts.position_at_index(font, &line.text, sel_start, font_size);
        let mut end_x = line.x + self.fonts.position_at_index(font, &line.text, sel_end, font_size);

        // A fully-selected line extends its highlight across the gap to the
        // next selected box on the same visual line, unless padding
        // separates them.
        if sel_end == line.text.len() && self.edge_padding_right(id) < 0.5 {
          if let Some(next_x) = self.gap_extension_x(id, line) {
            end_x = next_x;
          }
        }

        list.push(DisplayItem::FillRect(FillRectItem {
          rect: Rect::from_xywh(start_x, line.y, end_x - start_x, line.height),
          color: SELECTION_COLOR,
        }));
      }

      let baseline = line.y + ascent;
      list.push(DisplayItem::Text(TextItem {
        x: line.x,
        y: baseline,
        text: line.text.clone(),
        font,
        size: font_size,
        color: style.color,
      }));

      // Second pass: selected glyphs recolored
      if has_selection {
        let sel_end = sel_end.min(line.text.len());
        let start_x = line.x + self.fonts.position_at_index(font, &line.text, sel_start, font_size);
        list.push(DisplayItem::Text(TextItem {
          x: start_x,
          y: baseline,
          text: line.text[sel_start..sel_end].to_string(),
          font,
          size: font_size,
          color: SELECTED_TEXT_COLOR,
        }));
      }

      // Decorations
      match style.text_decoration {
        TextDecoration::Underline => {
          let y = baseline + 2.0;
          list.push(DisplayItem::Line(LineItem {
            x1: line.x,
            y1: y,
            x2: line.x + line.width,
            y2: y,
            thickness: 1.0,
            color: style.color,
          }));
        }
        TextDecoration::Overline => {
          let y = line.y;
          list.push(DisplayItem::Line(LineItem {
            x1: line.x,
            y1: y,
            x2: line.x + line.width,
            y2: y,
            thickness: 1.0,
            color: style.color,
          }));
        }
        TextDecoration::LineThrough => {
          let y = line.y + font_size * 0.5;
          list.push(DisplayItem::Line(LineItem {
            x1: line.x,
            y1: y,
            x2: line.x + line.width,
            y2: y,
            thickness: 1.0,
            color: style.color,
          }));
        }
        TextDecoration::None => {}
      }
    }
  }

  /// Effective right padding separating a text box from what follows: its
  /// own resolved padding or its parent element's.
  fn edge_padding_right(&self, id: BoxId) -> f32 {
    let render_box = self.tree.get(id);
    let own = render_box.metrics.padding.right;
    let parent = render_box
      .parent
      .map(|p| self.tree.get(p).metrics.padding.right)
      .unwrap_or(0.0);
    own.max(parent)
  }

  fn edge_padding_left(&self, id: BoxId) -> f32 {
    let render_box = self.tree.get(id);
    let own = render_box.metrics.padding.left;
    let parent = render_box
      .parent
      .map(|p| self.tree.get(p).metrics.padding.left)
      .unwrap_or(0.0);
    own.max(parent)
  }

  /// The X to extend a full-line highlight to: the start of the next
  /// selected box's first line when it sits on the same visual row.
  fn gap_extension_x(&self, id: BoxId, line: &crate::tree::LineBox) -> Option<f32> {
    let box_idx = self.selection.doc_index(id)?;
    let next_id = *self.selection.all_text_boxes.get(box_idx + 1)?;
    let next_box = self.tree.get(next_id);
    let next_line = next_box.lines.first()?;

    // Same visual line?
    if (next_line.y - line.y).abs() >= line.height * 0.5 {
      return None;
    }
    // Next box selected at its start?
    let (next_start, next_end) = self.selection.range_for_line(next_id, 0, next_line.text.len());
    if next_start >= next_end {
      return None;
    }
    if self.edge_padding_left(next_id) >= 0.5 {
      return None;
    }
    Some(next_line.x)
  }

  fn paint_checkbox(&self, list: &mut DisplayList, id: BoxId) {
    let render_box = self.tree.get(id);
    let content = render_box.metrics.content;

    let size = 16.0;
    let x = content.x();
    let y = content.y() + (content.height() - size) / 2.0;

    list.push(DisplayItem::FillRect(FillRectItem {
      rect: Rect::from_xywh(x, y, size, size),
      color: Rgba::WHITE,
    }));
    list.push(DisplayItem::StrokeRect(StrokeRectItem {
      rect: Rect::from_xywh(x, y, size, size),
      width: 1.0,
      color: Rgba::opaque(0.5, 0.5, 0.5),
    }));

    if self.document.attribute(render_box.node, "checked").is_some() {
      let color = Rgba::opaque(0.2, 0.2, 0.2);
      list.push(DisplayItem::Line(LineItem {
        x1: x + 3.0,
        y1: y + 8.0,
        x2: x + 7.0,
        y2: y + 11.0,
        thickness: 1.5,
        color,
      }));
      list.push(DisplayItem::Line(LineItem {
        x1: x + 7.0,
        y1: y + 11.0,
        x2: x + 13.0,
        y2: y + 5.0,
        thickness: 1.5,
        color,
      }));
    }
  }

  fn paint_image_placeholder(&self, list: &mut DisplayList, id: BoxId) {
    let content = self.tree.get(id).metrics.content;
    list.push(DisplayItem::FillRect(FillRectItem {
      rect: content,
      color: Rgba::opaque(0.9, 0.9, 0.9),
    }));
    list.push(DisplayItem::StrokeRect(StrokeRectItem {
      rect: content,
      width: 1.0,
      color: Rgba::opaque(0.7, 0.7, 0.7),
    }));
  }

  fn paint_scrollbar(&self, list: &mut DisplayList, id: BoxId) {
    let render_box = self.tree.get(id);
    let content = render_box.metrics.content;
    let scroll = render_box.scroll;

    let track_x = content.max_x() - SCROLLBAR_WIDTH;
    list.push(DisplayItem::FillRect(FillRectItem {
      rect: Rect::from_xywh(track_x, content.y(), SCROLLBAR_WIDTH, content.height()),
      color: Rgba::new(0.9, 0.9, 0.9, 0.5),
    }));

    let total_height = content.height() + scroll.scrollable_height;
    let thumb_height = (content.height() / total_height) * content.height();
    let thumb_height = thumb_height.max(16.0);
    let max_y = scroll.max_y();
    let travel = content.height() - thumb_height;
    let thumb_y = if max_y > 0.0 {
      content.y() + (scroll.y / max_y) * travel
    } else {
      content.y()
    };

    list.push(DisplayItem::FillRect(FillRectItem {
      rect: Rect::from_xywh(track_x, thumb_y, SCROLLBAR_WIDTH, thumb_height),
      color: Rgba::new(0.5, 0.5, 0.5, 0.8),
    }));
  }
}
