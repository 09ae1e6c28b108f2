//! Box-model resolution and layout dispatch
//!
//! [`layout_box`] is the per-box entry point: it resolves edges and width,
//! dispatches to the formatting context the box's display selects, then
//! resolves height and scroll overflow. Positioning is top-down; sizing
//! follows CSS normal flow.

use crate::dom::Document;
use crate::geometry::{EdgeOffsets, Rect, Size};
use crate::layout::{block, flex, inline, intrinsic, table};
use crate::style::types::{BoxSizing, Display, EdgeValues};
use crate::style::ComputedStyle;
use crate::text::FontProvider;
use crate::tree::{BoxId, RenderTree};
use tracing::debug;

/// Immutable inputs shared by the whole layout pass
pub struct LayoutContext<'a> {
  pub document: &'a Document,
  pub fonts: &'a dyn FontProvider,
  pub viewport: Size,
}

impl<'a> LayoutContext<'a> {
  /// Resolves one CSS value against a containing size and font size
  pub fn resolve(&self, value: crate::css::values::CssValue, parent_size: f32, font_size: f32) -> f32 {
    value.to_px(parent_size, font_size, self.viewport.width, self.viewport.height)
  }

  /// Resolves an edge set to pixel offsets; unset values become 0
  pub fn resolve_edges(&self, edges: &EdgeValues, parent_size: f32, font_size: f32) -> EdgeOffsets {
    EdgeOffsets {
      top: self.resolve(edges.top, parent_size, font_size).max(0.0),
      right: self.resolve(edges.right, parent_size, font_size).max(0.0),
      bottom: self.resolve(edges.bottom, parent_size, font_size).max(0.0),
      left: self.resolve(edges.left, parent_size, font_size).max(0.0),
    }
  }
}

/// Lays out the whole tree against its viewport
pub fn layout_document(tree: &mut RenderTree, ctx: &LayoutContext) {
  let root = tree.root;
  layout_box(tree, ctx, root, 0.0, 0.0, tree.viewport.width, false);
  debug!(
    width = tree.viewport.width,
    height = tree.get(root).metrics.border_box().height(),
    "layout pass complete"
  );
}

/// Lays out one box at `(x, y)` (margin-box origin) within `available_width`.
///
/// `in_inline_flow` marks text laid out as part of an inline formatting
/// context, where the parent owns line breaking and the text sizes to its
/// intrinsic width.
pub fn layout_box(
  tree: &mut RenderTree,
  ctx: &LayoutContext,
  id: BoxId,
  x: f32,
  y: f32,
  available_width: f32,
  in_inline_flow: bool,
) {
  let style = tree.get(id).style.clone();

  if style.display == Display::None {
    // The whole subtree drops out of layout; stale line boxes must not leak
    // into selection or paint.
    let mut stack = vec![id];
    while let Some(current) = stack.pop() {
      let render_box = tree.get_mut(current);
      render_box.metrics = Default::default();
      render_box.metrics.content = Rect::from_xywh(x, y, 0.0, 0.0);
      render_box.lines.clear();
      stack.extend(render_box.children.iter().copied());
    }
    return;
  }

  let font_size = style.font_size;
  let parent_width = available_width;
  let node = tree.get(id).node;

  let mut margin = ctx.resolve_edges(&style.margin, parent_width, font_size);
  let mut padding = ctx.resolve_edges(&style.padding, parent_width, font_size);
  let mut border = ctx.resolve_edges(&style.border_width, parent_width, font_size);

  // Checkbox/radio inputs are fixed-size controls, not text inputs: strip
  // the input chrome so the control is a true 16x16 box, with a small gap
  // after checkboxes.
  let input_type = input_type(ctx.document, node);
  let is_checkable = matches!(input_type.as_deref(), Some("checkbox") | Some("radio"));
  if is_checkable {
    padding = EdgeOffsets::ZERO;
    border = EdgeOffsets::ZERO;
    if input_type.as_deref() == Some("checkbox") {
      margin.right += 4.0;
    }
  }

  let content_x = x + margin.left + border.left + padding.left;
  let content_y = y + margin.top + border.top + padding.top;
  let horizontal_space = margin.horizontal() + border.horizontal() + padding.horizontal();

  // Width determination
  let explicit_width = ctx.resolve(style.width, parent_width, font_size);
  let mut content_width = if !style.width.is_unset() && explicit_width >= 0.0 {
    if style.box_sizing == BoxSizing::BorderBox {
      explicit_width - padding.horizontal() - border.horizontal()
    } else {
      explicit_width
    }
  } else if ctx.document.is_text(node) {
    if in_inline_flow {
      // Parent handles wrapping
      intrinsic::measure_intrinsic_width(tree, ctx, id)
    } else {
      available_width - horizontal_space
    }
  } else if style.display == Display::Table {
    intrinsic::measure_table_intrinsic_width(tree, ctx, id) - padding.horizontal() - border.horizontal()
  } else if style.display.is_inline_level() {
    intrinsic::measure_intrinsic_width(tree, ctx, id)
  } else {
    available_width - horizontal_space
  };
  content_width = content_width.max(0.0);

  let min_width = ctx.resolve(style.min_width, parent_width, font_size);
  if !style.min_width.is_unset() && min_width > 0.0 {
    content_width = content_width.max(min_width);
  }
  let max_width = ctx.resolve(style.max_width, parent_width, font_size);
  if !style.max_width.is_unset() && max_width > 0.0 {
    content_width = content_width.min(max_width);
  }

  {
    let render_box = tree.get_mut(id);
    render_box.metrics.margin = margin;
    render_box.metrics.padding = padding;
    render_box.metrics.border = border;
    render_box.metrics.content = Rect::from_xywh(content_x, content_y, content_width, 0.0);
  }

  // Content layout through the formatting context the display selects
  let mut content_height = if ctx.document.is_text(node) {
    block::layout_text_block(tree, ctx, id, content_x, content_y, content_width, &style)
  } else {
    match style.display {
      Display::Flex => flex::layout_flex_children(tree, ctx, id, content_x, content_y, content_width),
      Display::Table => table::layout_table_children(tree, ctx, id, content_x, content_y, content_width),
      Display::Block | Display::TableRowGroup | Display::TableRow | Display::TableCell => {
        block::layout_block_children(tree, ctx, id, content_x, content_y, content_width)
      }
      Display::Inline | Display::InlineBlock => {
        // Inline elements sized to their intrinsic width must not wrap
        // internally; the outer inline context owns line breaking.
        let layout_width = if style.display == Display::Inline && style.width.is_auto() {
          100_000.0
        } else {
          content_width
        };
        inline::layout_inline_children(tree, ctx, id, content_x, content_y, layout_width)
      }
      Display::None => 0.0,
    }
  };

  // Form controls get their minimum dimensions before the explicit height
  // override; natural height feeds the scroll calculation.
  let adjusted = apply_form_sizing(
    tree,
    ctx,
    id,
    &style,
    content_width,
    content_height,
    is_checkable,
  );
  content_width = adjusted.0;
  content_height = adjusted.1;
  let natural_content_height = content_height;

  // Height determination
  let explicit_height = ctx.resolve(style.height, parent_width, font_size);
  if !style.height.is_unset() && explicit_height >= 0.0 {
    content_height = if style.box_sizing == BoxSizing::BorderBox {
      explicit_height - padding.vertical() - border.vertical()
    } else {
      explicit_height
    };
  }

  let min_height = ctx.resolve(style.min_height, parent_width, font_size);
  if !style.min_height.is_unset() && min_height > 0.0 {
    content_height = content_height.max(min_height);
  }
  let max_height = ctx.resolve(style.max_height, parent_width, font_size);
  if !style.max_height.is_unset() && max_height > 0.0 {
    content_height = content_height.min(max_height);
  }

  let render_box = tree.get_mut(id);
  render_box.metrics.content.size.width = content_width;
  render_box.metrics.content.size.height = content_height;

  // Scroll overflow: the natural content height beyond the clamped content
  // box becomes scrollable. Offsets persist across reflow and re-clamp when
  // content shrinks.
  if style.overflow.is_scroll_container() {
    render_box.scroll.scrollable_height = (natural_content_height - content_height).max(0.0);
    render_box.scroll.scrollable_width = 0.0;
    render_box.scroll.clamp();
  } else {
    render_box.scroll.scrollable_height = 0.0;
    render_box.scroll.scrollable_width = 0.0;
    render_box.scroll.x = 0.0;
    render_box.scroll.y = 0.0;
  }
}

/// The `type` attribute of an input element, lower-cased; `text` when absent
fn input_type(document: &Document, node: crate::dom::NodeId) -> Option<String> {
  if document.tag_name(node) != Some("input") {
    return None;
  }
  Some(
    document
      .attribute(node, "type")
      .map(|t| t.to_ascii_lowercase())
      .unwrap_or_else(|| "text".to_string()),
  )
}

/// Minimum dimensions for form controls and replaced elements.
/// Returns the adjusted (content_width, content_height).
fn apply_form_sizing(
  tree: &mut RenderTree,
  ctx: &LayoutContext,
  id: BoxId,
  style: &ComputedStyle,
  mut content_width: f32,
  mut content_height: f32,
  is_checkable: bool,
) -> (f32, f32) {
  let node = tree.get(id).node;
  let Some(tag) = ctx.document.tag_name(node) else {
    return (content_width, content_height);
  };
  let font_size = style.font_size;

  match tag {
    "input" => {
      if is_checkable {
        if style.width.is_auto() {
          content_width = 16.0;
        }
        if style.height.is_auto() {
          content_height = 16.0;
        }
      } else if content_height < font_size + 4.0 {
        content_height = font_size + 4.0;
      }
    }
    "textarea" => {
      let rows = ctx
        .document
        .attribute(node, "rows")
        .and_then(|r| r.trim().parse::<u32>().ok())
        .unwrap_or(2);
      let cols = ctx
        .document
        .attribute(node, "cols")
        .and_then(|c| c.trim().parse::<u32>().ok())
        .unwrap_or(20);
      if style.width.is_auto() {
        content_width = cols as f32 * font_size * 0.6;
      }
      if style.height.is_auto() {
        content_height = rows as f32 * font_size * 1.2;
      }
    }
    "select" => {
      if style.width.is_auto() {
        content_width = 150.0;
      }
      if style.height.is_auto() {
        content_height = font_size + 8.0;
      }
    }
    "img" => {
      if style.width.is_auto() {
        content_width = ctx
          .document
          .attribute(node, "width")
          .and_then(|w| w.trim().parse::<f32>().ok())
          .unwrap_or(150.0);
      }
      if style.height.is_auto() {
        content_height = ctx
          .document
          .attribute(node, "height")
          .and_then(|h| h.trim().parse::<f32>().ok())
          .unwrap_or(150.0);
      }
    }
    _ => return (content_width, content_height),
  }

  tree.get_mut(id).metrics.content.size.width = content_width;
  (content_width, content_height)
}
