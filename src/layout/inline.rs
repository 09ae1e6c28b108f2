//! Inline formatting context
//!
//! Line-based layout with a pen position and a rolling line height. Text is
//! tokenized into break units (spaces separate, a comma breaks after itself,
//! an inter-word dash keeps the dash with the prior run); tokens flow left to
//! right and wrap when they would overflow a non-empty line. Punctuation-only
//! tokens never start a line. Once a line closes, inline-level boxes on it
//! are offset per `vertical-align`.

use crate::layout::block::line_bounds;
use crate::layout::engine::{layout_box, LayoutContext};
use crate::layout::intrinsic;
use crate::style::types::{Display, TextAlign, VerticalAlign};
use crate::style::ComputedStyle;
use crate::text::FontHandle;
use crate::tree::{BoxId, LineBox, RenderTree};

/// Line height used before any content lands on a line
const DEFAULT_LINE_HEIGHT: f32 = 20.0;

/// Pen state for one inline formatting context
struct InlineCursor {
  /// Line start (container content left)
  origin_x: f32,
  /// Available width
  width: f32,
  /// Pen position
  x: f32,
  y: f32,
  /// Top of the current line box
  line_start_y: f32,
  /// Max over inline-level items on the current line
  max_line_height: f32,
  /// Inline-level element boxes on the current line, for vertical-align
  line_items: Vec<BoxId>,
}

impl InlineCursor {
  fn new(x: f32, y: f32, width: f32) -> Self {
    Self {
      origin_x: x,
      width,
      x,
      y,
      line_start_y: y,
      max_line_height: DEFAULT_LINE_HEIGHT,
      line_items: Vec::new(),
    }
  }

  fn line_is_empty(&self) -> bool {
    self.x <= self.origin_x
  }
}

/// Closes the current line: applies vertical-align to the items on it and
/// moves the pen to the start of the next line.
fn break_line(tree: &mut RenderTree, cursor: &mut InlineCursor, next_line_height: f32) {
  if !cursor.line_items.is_empty() {
    apply_vertical_align(tree, &cursor.line_items, cursor.line_start_y, cursor.max_line_height);
    cursor.line_items.clear();
  }
  cursor.x = cursor.origin_x;
  cursor.y += cursor.max_line_height;
  cursor.line_start_y = cursor.y;
  cursor.max_line_height = next_line_height;
}

/// Lays out the children of an inline container
pub fn layout_inline_children(
  tree: &mut RenderTree,
  ctx: &LayoutContext,
  container: BoxId,
  x: f32,
  y: f32,
  width: f32,
) -> f32 {
  let children: Vec<BoxId> = tree.get(container).children.clone();
  layout_inline_run(tree, ctx, container, &children, x, y, width)
}

/// Lays out a run of inline-level children on shared lines, returning the
/// height consumed.
pub fn layout_inline_run(
  tree: &mut RenderTree,
  ctx: &LayoutContext,
  container: BoxId,
  children: &[BoxId],
  x: f32,
  y: f32,
  width: f32,
) -> f32 {
  let container_style = tree.get(container).style.clone();
  let mut cursor = InlineCursor::new(x, y, width);

  for &child in children {
    let child_box = tree.get(child);
    let child_style = child_box.style.clone();
    let node = child_box.node;

    if child_style.display == Display::None {
      layout_box(tree, ctx, child, cursor.x, cursor.y, width, true);
      continue;
    }

    // <br> forces a line break
    if ctx.document.tag_name(node) == Some("br") {
      let render_box = tree.get_mut(child);
      render_box.metrics = Default::default();
      render_box.metrics.content =
        crate::geometry::Rect::from_xywh(cursor.x, cursor.y, 0.0, cursor.max_line_height);
      break_line(tree, &mut cursor, DEFAULT_LINE_HEIGHT);
      continue;
    }

    if ctx.document.is_text(node) {
      let Some(text) = ctx.document.text_content(node).map(str::to_string) else {
        continue;
      };
      let font = ctx
        .fonts
        .font(&child_style.font_family, child_style.font_weight, child_style.font_style);
      layout_text_tokens(tree, ctx, child, &text, &mut cursor, font, &child_style, &container_style);
      continue;
    }

    if let Some(text_child) = sole_text_child(tree, ctx, child) {
      // An inline element wrapping a single text run: its edges surround the
      // text and the line boxes belong to the text child.
      let font_size = child_style.font_size;
      let margin = ctx.resolve_edges(&child_style.margin, width, font_size);
      let padding = ctx.resolve_edges(&child_style.padding, width, font_size);
      let border = ctx.resolve_edges(&child_style.border_width, width, font_size);

      cursor.x += margin.left + border.left + padding.left;

      let text = ctx
        .document
        .text_content(tree.get(text_child).node)
        .unwrap_or("")
        .to_string();
      let text_style = tree.get(text_child).style.clone();
      let font = ctx
        .fonts
        .font(&text_style.font_family, text_style.font_weight, text_style.font_style);
      layout_text_tokens(tree, ctx, text_child, &text, &mut cursor, font, &text_style, &container_style);

      cursor.x += padding.right + border.right + margin.right;

      // The element's content box covers the emitted text lines
      let bounds = line_bounds(&tree.get(text_child).lines);
      {
        let text_box = tree.get_mut(text_child);
        text_box.metrics = Default::default();
        text_box.metrics.content = bounds;
      }
      {
        let element_box = tree.get_mut(child);
        element_box.metrics.content = bounds;
        element_box.metrics.margin = margin;
        element_box.metrics.padding = padding;
        element_box.metrics.border = border;
      }

      // Alignable only when its text landed entirely on the current line
      let lines = &tree.get(text_child).lines;
      if lines.len() == 1 && (lines[0].y - cursor.line_start_y).abs() < 0.5 {
        cursor.line_items.push(child);
      }
      continue;
    }

    // Complex inline element, laid out as a unit. Pre-measure so an element
    // that will not fit wraps before layout instead of wrapping inside
    // itself near the line end.
    let font_size = child_style.font_size;
    let pre_margin = ctx.resolve_edges(&child_style.margin, width, font_size);
    let pre_border = ctx.resolve_edges(&child_style.border_width, width, font_size);
    let ideal_width = intrinsic::measure_intrinsic_width(tree, ctx, child)
      + pre_margin.horizontal()
      + pre_border.horizontal();

    if !cursor.line_is_empty() && cursor.x + ideal_width > cursor.origin_x + cursor.width {
      break_line(tree, &mut cursor, DEFAULT_LINE_HEIGHT);
    }

    let remaining = cursor.width - (cursor.x - cursor.origin_x);
    layout_box(tree, ctx, child, cursor.x, cursor.y, remaining, true);
    let mut frame = tree.get(child).metrics.border_box();

    if !cursor.line_is_empty() && cursor.x + frame.width() > cursor.origin_x + cursor.width {
      break_line(tree, &mut cursor, DEFAULT_LINE_HEIGHT);
      layout_box(tree, ctx, child, cursor.x, cursor.y, cursor.width, true);
      frame = tree.get(child).metrics.border_box();
    }

    cursor.x += frame.width();
    cursor.max_line_height = cursor.max_line_height.max(frame.height());
    cursor.line_items.push(child);
  }

  if !cursor.line_items.is_empty() {
    apply_vertical_align(tree, &cursor.line_items, cursor.line_start_y, cursor.max_line_height);
    cursor.line_items.clear();
  }

  (cursor.y - y) + cursor.max_line_height
}

/// True if `id` is an element whose only child is a text node
fn sole_text_child(tree: &RenderTree, ctx: &LayoutContext, id: BoxId) -> Option<BoxId> {
  let render_box = tree.get(id);
  if !ctx.document.is_element(render_box.node) || render_box.children.len() != 1 {
    return None;
  }
  let child = render_box.children[0];
  ctx.document.is_text(tree.get(child).node).then_some(child)
}

/// Flows a text run token-by-token at the cursor, emitting line boxes into
/// `target`.
#[allow(clippy::too_many_arguments)]
fn layout_text_tokens(
  tree: &mut RenderTree,
  ctx: &LayoutContext,
  target: BoxId,
  text: &str,
  cursor: &mut InlineCursor,
  font: FontHandle,
  style: &ComputedStyle,
  container_style: &ComputedStyle,
) {
  let font_size = style.font_size;
  let text_line_height = style.line_height_px();

  tree.get_mut(target).lines.clear();

  let tokens = tokenize_inline(text);
  let mut current_text = String::new();
  let mut line_start_x = cursor.x;
  let mut line_offset = 0_usize;

  let line_x = |start_x: f32, line_width: f32, cursor: &InlineCursor| -> f32 {
    match container_style.text_align {
      TextAlign::Center => cursor.origin_x + (cursor.width - line_width) / 2.0,
      TextAlign::Right => cursor.origin_x + cursor.width - line_width,
      TextAlign::Left | TextAlign::Justify => start_x,
    }
  };

  for token in &tokens {
    let token_width = ctx.fonts.text_width(font, token.text, font_size);

    let mut should_wrap = cursor.x + token_width > cursor.origin_x + cursor.width && !cursor.line_is_empty();
    // Punctuation sticks to the end of the line it follows
    if should_wrap && is_punctuation_only(token.text) {
      should_wrap = false;
    }

    if should_wrap {
      let trimmed = current_text.trim_end();
      if !trimmed.is_empty() {
        let line_width = ctx.fonts.text_width(font, trimmed, font_size);
        let line = LineBox {
          text: trimmed.to_string(),
          x: line_x(line_start_x, line_width, cursor),
          y: cursor.y,
          width: line_width,
          height: text_line_height,
          start_offset: line_offset,
        };
        tree.get_mut(target).lines.push(line);
      }

      break_line(tree, cursor, text_line_height);
      current_text.clear();
      line_start_x = cursor.x;

      // Leading space on a fresh line is dropped
      if token.text == " " {
        continue;
      }
    }

    if current_text.is_empty() {
      line_offset = token.offset;
    }
    current_text.push_str(token.text);
    cursor.x += token_width;
    cursor.max_line_height = cursor.max_line_height.max(text_line_height);
  }

  // The final flush keeps any trailing space: the run may continue with an
  // inline sibling on the same line, and that space is real content for
  // selection and copy.
  if !current_text.is_empty() {
    let line_width = ctx.fonts.text_width(font, &current_text, font_size);
    let line = LineBox {
      text: current_text,
      x: line_x(line_start_x, line_width, cursor),
      y: cursor.y,
      width: line_width,
      height: text_line_height,
      start_offset: line_offset,
    };
    tree.get_mut(target).lines.push(line);
  }

  // The text box's frame covers its lines
  let bounds = line_bounds(&tree.get(target).lines);
  let render_box = tree.get_mut(target);
  render_box.metrics = Default::default();
  render_box.metrics.content = if render_box.lines.is_empty() {
    crate::geometry::Rect::from_xywh(cursor.x, cursor.y, 0.0, 0.0)
  } else {
    bounds
  };
}

/// Offsets each inline-level box on a closed line per its `vertical-align`
fn apply_vertical_align(tree: &mut RenderTree, items: &[BoxId], line_top: f32, line_height: f32) {
  for &id in items {
    let render_box = tree.get(id);
    let align = render_box.style.vertical_align;
    let child_font_size = render_box.style.font_size;
    let frame = render_box.metrics.border_box();
    let child_height = frame.height();
    let current_rel_y = frame.y() - line_top;

    let desired_rel_y = match align {
      VerticalAlign::Baseline | VerticalAlign::TextBottom | VerticalAlign::Bottom => line_height - child_height,
      VerticalAlign::Middle => (line_height - child_height) / 2.0,
      VerticalAlign::Top | VerticalAlign::TextTop => 0.0,
      VerticalAlign::Sub => line_height - child_height + child_font_size * 0.2,
      VerticalAlign::Super => -child_font_size * 0.4,
    };

    let dy = desired_rel_y - current_rel_y;
    tree.offset_subtree_y(id, dy);
  }
}

/// A break unit with its byte offset in the source text
struct InlineToken<'a> {
  text: &'a str,
  offset: usize,
}

/// Tokenizes text for inline wrapping. Spaces are their own tokens; a comma
/// breaks after itself; a dash between word characters breaks after the
/// dash.
fn tokenize_inline(text: &str) -> Vec<InlineToken<'_>> {
  let mut tokens = Vec::new();
  let mut start: Option<usize> = None;
  let bytes = text.as_bytes();

  for (idx, c) in text.char_indices() {
    match c {
      ' ' => {
        if let Some(s) = start.take() {
          tokens.push(InlineToken {
            text: &text[s..idx],
            offset: s,
          });
        }
        tokens.push(InlineToken {
          text: &text[idx..idx + 1],
          offset: idx,
        });
      }
      ',' => {
        let s = start.take().unwrap_or(idx);
        let end = idx + 1;
        // The comma stays with the prior run; break only if text follows
        if end < text.len() {
          tokens.push(InlineToken {
            text: &text[s..end],
            offset: s,
          });
        } else {
          start = Some(s);
        }
      }
      '-' => {
        let next_is_word = bytes.get(idx + 1).is_some_and(|&b| b != b' ');
        if start.is_some() && idx + 1 < text.len() && next_is_word {
          let s = start.take().unwrap();
          tokens.push(InlineToken {
            text: &text[s..idx + 1],
            offset: s,
          });
        } else if start.is_none() {
          start = Some(idx);
        }
      }
      _ => {
        if start.is_none() {
          start = Some(idx);
        }
      }
    }
  }

  if let Some(s) = start {
    tokens.push(InlineToken {
      text: &text[s..],
      offset: s,
    });
  }

  tokens
}

/// True when a token consists only of punctuation that must not start a line
fn is_punctuation_only(token: &str) -> bool {
  !token.is_empty()
    && token
      .chars()
      .all(|c| matches!(c, ',' | '.' | ';' | ':' | '!' | '?' | ')' | ']' | '}' | '"' | '\'' | '-'))
}
