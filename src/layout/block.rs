//! Block formatting context
//!
//! Children lay out vertically in order. Contiguous inline-level runs are
//! laid out through the inline context without creating anonymous boxes;
//! adjacent block siblings collapse their vertical margins to the larger of
//! the pair.

use crate::geometry::Rect;
use crate::layout::engine::{layout_box, LayoutContext};
use crate::layout::inline;
use crate::style::types::{Display, TextAlign};
use crate::style::ComputedStyle;
use crate::tree::{BoxId, LineBox, RenderTree};

/// Lays out the children of a block container, returning the content height
pub fn layout_block_children(
  tree: &mut RenderTree,
  ctx: &LayoutContext,
  container: BoxId,
  x: f32,
  y: f32,
  width: f32,
) -> f32 {
  let children: Vec<BoxId> = tree.get(container).children.clone();
  if children.is_empty() {
    return 0.0;
  }

  // Scan for mixed content: a group that is entirely inline-level and
  // contains at least one inline element flows as one inline context.
  let mut all_inline = true;
  let mut has_inline_elements = false;
  for &child in &children {
    let child_box = tree.get(child);
    if child_box.style.display == Display::None {
      continue;
    }
    let is_text = ctx.document.is_text(child_box.node);
    if child_box.style.display.is_inline_level() && !is_text {
      has_inline_elements = true;
    } else if !is_text {
      all_inline = false;
      break;
    }
  }

  if all_inline && has_inline_elements {
    return inline::layout_inline_run(tree, ctx, container, &children, x, y, width);
  }

  // Block flow with sibling margin collapsing. Contiguous inline runs group
  // into anonymous inline passes.
  let mut current_y = y;
  let mut prev_margin_bottom = 0.0_f32;
  let mut i = 0;

  while i < children.len() {
    let child = children[i];
    let child_box = tree.get(child);

    if child_box.style.display == Display::None {
      layout_box(tree, ctx, child, x, current_y, width, false);
      i += 1;
      continue;
    }

    let is_text = ctx.document.is_text(child_box.node);
    let is_inline_level = child_box.style.display.is_inline_level() && !is_text;

    if is_inline_level || is_text {
      // Gather the contiguous inline-level run
      let run_start = i;
      let mut run_has_elements = false;
      while i < children.len() {
        let c = tree.get(children[i]);
        if c.style.display == Display::None {
          i += 1;
          continue;
        }
        let c_is_text = ctx.document.is_text(c.node);
        if c_is_text {
          i += 1;
        } else if c.style.display.is_inline_level() {
          run_has_elements = true;
          i += 1;
        } else {
          break;
        }
      }
      let run: Vec<BoxId> = children[run_start..i].to_vec();

      if run_has_elements {
        current_y += inline::layout_inline_run(tree, ctx, container, &run, x, current_y, width);
      } else {
        // A run of bare text nodes wraps as block-level text on whitespace
        for &text_child in &run {
          layout_box(tree, ctx, text_child, x, current_y, width, false);
          current_y = tree.get(text_child).metrics.border_box().max_y();
        }
      }
      prev_margin_bottom = 0.0;
    } else {
      // Block sibling: the separating space is max(prev bottom, this top),
      // not the sum.
      let child_style = &tree.get(child).style;
      let font_size = child_style.font_size;
      let child_margin_top = ctx.resolve(child_style.margin.top, width, font_size).max(0.0);
      let child_margin_bottom = ctx.resolve(child_style.margin.bottom, width, font_size).max(0.0);

      let collapsed = prev_margin_bottom.max(child_margin_top);
      // current_y already includes the previous bottom margin; place this
      // child's margin-box top so the border boxes end up `collapsed` apart.
      let margin_box_y = current_y - prev_margin_bottom + collapsed - child_margin_top;

      layout_box(tree, ctx, child, x, margin_box_y, width, false);

      current_y = tree.get(child).metrics.border_box().max_y() + child_margin_bottom;
      prev_margin_bottom = child_margin_bottom;
      i += 1;
      continue;
    }
  }

  current_y - y
}

/// Lays out a standalone text node as block-level text: wrapping on
/// whitespace only, trailing spaces trimmed at line breaks, line x adjusted
/// per text-align. Returns the height consumed.
pub fn layout_text_block(
  tree: &mut RenderTree,
  ctx: &LayoutContext,
  id: BoxId,
  x: f32,
  y: f32,
  max_width: f32,
  style: &ComputedStyle,
) -> f32 {
  tree.get_mut(id).lines.clear();

  let node = tree.get(id).node;
  let Some(text) = ctx.document.text_content(node).map(str::to_string) else {
    return 0.0;
  };
  if text.is_empty() {
    return 0.0;
  }

  // Non-positive widths disable wrapping
  let max_width = if max_width <= 0.0 { 10_000.0 } else { max_width };

  let font = ctx
    .fonts
    .font(&style.font_family, style.font_weight, style.font_style);
  let font_size = style.font_size;
  let line_height = style.line_height_px();

  let line_x = |line_width: f32| -> f32 {
    match style.text_align {
      TextAlign::Center => x + (max_width - line_width) / 2.0,
      TextAlign::Right => x + max_width - line_width,
      TextAlign::Left | TextAlign::Justify => x,
    }
  };

  // Fast path: the whole run fits on one line
  let total_width = ctx.fonts.text_width(font, &text, font_size);
  if total_width <= max_width {
    tree.get_mut(id).lines.push(LineBox {
      text: text.clone(),
      x: line_x(total_width),
      y,
      width: total_width,
      height: line_height,
      start_offset: 0,
    });
    return line_height;
  }

  // Word wrap: words and spaces are separate tokens so inter-word spaces
  // survive within a line and trim at its end.
  let words = split_words(&text);

  let mut lines: Vec<LineBox> = Vec::new();
  let mut current_y = y;
  let mut current_line = String::new();
  let mut current_width = 0.0_f32;
  let mut line_offset = 0_usize;

  for word in &words {
    let word_width = ctx.fonts.text_width(font, word.text, font_size);

    if current_width + word_width <= max_width || current_line.is_empty() {
      if current_line.is_empty() {
        line_offset = word.offset;
      }
      current_line.push_str(word.text);
      current_width += word_width;
    } else {
      // Flush the line, trimming trailing spaces
      let trimmed = current_line.trim_end();
      if !trimmed.is_empty() {
        let trimmed_width = ctx.fonts.text_width(font, trimmed, font_size);
        lines.push(LineBox {
          text: trimmed.to_string(),
          x: line_x(trimmed_width),
          y: current_y,
          width: trimmed_width,
          height: line_height,
          start_offset: line_offset,
        });
        current_y += line_height;
      }

      // Leading spaces on the new line are dropped
      if word.text == " " {
        current_line.clear();
        current_width = 0.0;
      } else {
        current_line = word.text.to_string();
        current_width = word_width;
        line_offset = word.offset;
      }
    }
  }

  let trimmed = current_line.trim_end();
  if !trimmed.is_empty() {
    let trimmed_width = ctx.fonts.text_width(font, trimmed, font_size);
    lines.push(LineBox {
      text: trimmed.to_string(),
      x: line_x(trimmed_width),
      y: current_y,
      width: trimmed_width,
      height: line_height,
      start_offset: line_offset,
    });
    current_y += line_height;
  }

  tree.get_mut(id).lines = lines;

  current_y - y
}

/// The bounding rect of a set of line boxes
pub fn line_bounds(lines: &[LineBox]) -> Rect {
  let Some(first) = lines.first() else {
    return Rect::ZERO;
  };
  let mut min_x = first.x;
  let mut min_y = first.y;
  let mut max_x = first.x + first.width;
  let mut max_y = first.y + first.height;
  for line in &lines[1..] {
    min_x = min_x.min(line.x);
    min_y = min_y.min(line.y);
    max_x = max_x.max(line.x + line.width);
    max_y = max_y.max(line.y + line.height);
  }
  Rect::from_xywh(min_x, min_y, max_x - min_x, max_y - min_y)
}

/// A word or space token with its byte offset in the source text
struct WordToken<'a> {
  text: &'a str,
  offset: usize,
}

/// Splits on single spaces, keeping each space as its own token
fn split_words(text: &str) -> Vec<WordToken<'_>> {
  let mut tokens = Vec::new();
  let mut word_start: Option<usize> = None;

  for (idx, c) in text.char_indices() {
    if c == ' ' {
      if let Some(start) = word_start.take() {
        tokens.push(WordToken {
          text: &text[start..idx],
          offset: start,
        });
      }
      tokens.push(WordToken {
        text: " ",
        offset: idx,
      });
    } else if word_start.is_none() {
      word_start = Some(idx);
    }
  }
  if let Some(start) = word_start {
    tokens.push(WordToken {
      text: &text[start..],
      offset: start,
    });
  }

  tokens
}
