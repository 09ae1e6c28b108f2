//! Keyboard caret movement
//!
//! Horizontal moves step by character or word and reset the sticky column;
//! vertical moves keep a goal X so the caret returns to its column after
//! passing over short lines. All moves operate on the focus; the caller
//! decides whether the anchor extends (shift) or collapses to the focus.

use crate::selection::words::{find_word_boundaries, is_word_boundary, next_char_boundary, prev_char_start};
use crate::selection::{Selection, TextPosition};
use crate::text::FontProvider;
use crate::tree::{BoxId, RenderTree};

/// Moves the focus one character right; at the end of a line it hops to the
/// next text box's first line, skipping leading spaces and tabs.
pub fn move_right(tree: &RenderTree, selection: &mut Selection) {
  let Some(focus) = selection.focus else {
    return;
  };
  let lines = &tree.get(focus.box_id).lines;
  let Some(line) = lines.get(focus.line) else {
    return;
  };

  if focus.offset < line.text.len() {
    selection.focus = Some(TextPosition {
      offset: next_char_boundary(&line.text, focus.offset),
      ..focus
    });
  } else if let Some(current) = selection.doc_index(focus.box_id) {
    if current + 1 < selection.all_text_boxes.len() {
      let next_box = selection.all_text_boxes[current + 1];
      let mut offset = 0;
      if let Some(first_line) = tree.get(next_box).lines.first() {
        let text = first_line.text.as_bytes();
        while offset < text.len() && (text[offset] == b' ' || text[offset] == b'\t') {
          offset += 1;
        }
      }
      selection.focus = Some(TextPosition {
        box_id: next_box,
        line: 0,
        offset,
      });
    }
  }
  selection.reset_goal_x();
}

/// Moves the focus one character left; at the start of a box it lands at the
/// end of the previous box's last line, with trailing spaces trimmed.
pub fn move_left(tree: &RenderTree, selection: &mut Selection) {
  let Some(focus) = selection.focus else {
    return;
  };
  let lines = &tree.get(focus.box_id).lines;
  let Some(line) = lines.get(focus.line) else {
    return;
  };

  if focus.offset > 0 {
    selection.focus = Some(TextPosition {
      offset: prev_char_start(&line.text, focus.offset),
      ..focus
    });
  } else if let Some(current) = selection.doc_index(focus.box_id) {
    if current > 0 {
      let prev_box = selection.all_text_boxes[current - 1];
      let prev_lines = &tree.get(prev_box).lines;
      let last_line = prev_lines.len().saturating_sub(1);
      let mut offset = prev_lines.last().map(|l| l.text.len()).unwrap_or(0);
      if let Some(l) = prev_lines.last() {
        let text = l.text.as_bytes();
        while offset > 0 && (text[offset - 1] == b' ' || text[offset - 1] == b'\t') {
          offset -= 1;
        }
      }
      selection.focus = Some(TextPosition {
        box_id: prev_box,
        line: last_line,
        offset,
      });
    }
  }
  selection.reset_goal_x();
}

/// Jumps the focus to the end of the next word within the current line
pub fn move_word_right(tree: &RenderTree, selection: &mut Selection) {
  let Some(focus) = selection.focus else {
    return;
  };
  let lines = &tree.get(focus.box_id).lines;
  let Some(line) = lines.get(focus.line) else {
    return;
  };
  let text = &line.text;

  let (_, word_end) = find_word_boundaries(text, focus.offset);
  let new_offset = if word_end < text.len() {
    // Skip boundary characters to the next word, then take its end
    let mut next_start = word_end;
    while next_start < text.len() && is_word_boundary(text, next_start) {
      next_start = next_char_boundary(text, next_start);
    }
    if next_start < text.len() {
      find_word_boundaries(text, next_start).1
    } else {
      text.len()
    }
  } else {
    text.len()
  };

  selection.focus = Some(TextPosition {
    offset: new_offset,
    ..focus
  });
  selection.reset_goal_x();
}

/// Jumps the focus to the start of the previous word within the current line
pub fn move_word_left(tree: &RenderTree, selection: &mut Selection) {
  let Some(focus) = selection.focus else {
    return;
  };
  let lines = &tree.get(focus.box_id).lines;
  let Some(line) = lines.get(focus.line) else {
    return;
  };
  let text = &line.text;

  if focus.offset == 0 {
    return;
  }

  let mut pos = prev_char_start(text, focus.offset);
  while pos > 0 && is_word_boundary(text, pos) {
    pos = prev_char_start(text, pos);
  }
  let (word_start, _) = find_word_boundaries(text, pos);

  selection.focus = Some(TextPosition {
    offset: word_start,
    ..focus
  });
  selection.reset_goal_x();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalDirection {
  Up,
  Down,
}

/// One visual line across all text boxes, in (y, x) order
struct VisualLine {
  box_id: BoxId,
  line: usize,
  y: f32,
  x: f32,
  width: f32,
}

/// Moves the focus to the visual line above or below, keeping the sticky
/// goal X. The first vertical move records the caret's absolute X as the
/// goal; later vertical moves reuse it, and any horizontal move resets it.
pub fn move_vertical(
  tree: &RenderTree,
  fonts: &dyn FontProvider,
  selection: &mut Selection,
  direction: VerticalDirection,
) {
  let Some(focus) = selection.focus else {
    return;
  };
  let focus_box = tree.get(focus.box_id);
  let Some(current_line) = focus_box.lines.get(focus.line) else {
    return;
  };

  // The caret's absolute X becomes the goal on the first vertical move
  let font = fonts.font(
    &focus_box.style.font_family,
    focus_box.style.font_weight,
    focus_box.style.font_style,
  );
  let cursor_x = current_line.x
    + fonts.position_at_index(font, &current_line.text, focus.offset, focus_box.style.font_size);
  if selection.goal_x < 0.0 {
    selection.goal_x = cursor_x;
  }
  let target_x = selection.goal_x;
  let current_y = current_line.y;

  // Every visual line, sorted by (y, x)
  let mut all_lines: Vec<VisualLine> = Vec::new();
  for &box_id in &selection.all_text_boxes {
    for (line_idx, line) in tree.get(box_id).lines.iter().enumerate() {
      all_lines.push(VisualLine {
        box_id,
        line: line_idx,
        y: line.y,
        x: line.x,
        width: line.width,
      });
    }
  }
  all_lines.sort_by(|a, b| {
    if (a.y - b.y).abs() < 1.0 {
      a.x.total_cmp(&b.x)
    } else {
      a.y.total_cmp(&b.y)
    }
  });

  let Some(current_idx) = all_lines
    .iter()
    .position(|l| l.box_id == focus.box_id && l.line == focus.line)
  else {
    return;
  };

  // Find the nearest line band strictly above/below, then the line within it
  // whose X range holds the goal (or whose edge is nearest).
  let target_idx: Option<usize> = match direction {
    VerticalDirection::Up => {
      let mut found = None;
      for i in (0..current_idx).rev() {
        if all_lines[i].y < current_y - 1.0 {
          let band_y = all_lines[i].y;
          found = Some(pick_in_band(
            &all_lines,
            (0..=i).rev().take_while(|&j| all_lines[j].y >= band_y - 1.0),
            target_x,
          ));
          break;
        }
      }
      found
    }
    VerticalDirection::Down => {
      let mut found = None;
      for i in current_idx + 1..all_lines.len() {
        if all_lines[i].y > current_y + 1.0 {
          let band_y = all_lines[i].y;
          found = Some(pick_in_band(
            &all_lines,
            (i..all_lines.len()).take_while(|&j| all_lines[j].y <= band_y + 1.0),
            target_x,
          ));
          break;
        }
      }
      found
    }
  };

  match target_idx {
    Some(idx) => {
      let target = &all_lines[idx];
      let render_box = tree.get(target.box_id);
      let line = &render_box.lines[target.line];
      let offset = offset_at_x(fonts, render_box, line, target_x);
      selection.focus = Some(TextPosition {
        box_id: target.box_id,
        line: target.line,
        offset,
      });
    }
    None => {
      // Nothing above: start of the document. Nothing below: its end.
      match direction {
        VerticalDirection::Up => {
          if let Some(first) = all_lines.first() {
            selection.focus = Some(TextPosition {
              box_id: first.box_id,
              line: first.line,
              offset: 0,
            });
          }
        }
        VerticalDirection::Down => {
          if let Some(last) = all_lines.last() {
            let line_len = tree.get(last.box_id).lines[last.line].text.len();
            selection.focus = Some(TextPosition {
              box_id: last.box_id,
              line: last.line,
              offset: line_len,
            });
          }
        }
      }
    }
  }
}

/// Within a y-band, the line containing `target_x` wins; otherwise the line
/// whose nearest edge is closest.
fn pick_in_band(lines: &[VisualLine], band: impl Iterator<Item = usize>, target_x: f32) -> usize {
  let mut best_idx = None;
  let mut best_distance = f32::MAX;

  for j in band {
    let line = &lines[j];
    if target_x >= line.x && target_x <= line.x + line.width {
      return j;
    }
    let distance = (line.x - target_x).abs().min((line.x + line.width - target_x).abs());
    if distance < best_distance {
      best_distance = distance;
      best_idx = Some(j);
    }
  }

  best_idx.unwrap_or(0)
}

/// Byte offset in a line whose caret X is closest to `target_x`, by
/// per-character advance midpoints.
fn offset_at_x(
  fonts: &dyn FontProvider,
  render_box: &crate::tree::RenderBox,
  line: &crate::tree::LineBox,
  target_x: f32,
) -> usize {
  if target_x <= line.x {
    return 0;
  }
  if target_x >= line.x + line.width {
    return line.text.len();
  }

  let font = fonts.font(
    &render_box.style.font_family,
    render_box.style.font_weight,
    render_box.style.font_style,
  );
  let font_size = render_box.style.font_size;

  let mut x = line.x;
  let mut offset = 0;
  for (byte_idx, c) in line.text.char_indices() {
    let advance = fonts.advance(font, c, font_size);
    if target_x < x + advance / 2.0 {
      return byte_idx;
    }
    x += advance;
    offset = byte_idx + c.len_utf8();
  }
  offset
}

/// Selects from the first text box's start to the last text box's end
pub fn select_all(tree: &RenderTree, selection: &mut Selection) {
  let (Some(&first), Some(&last)) = (selection.all_text_boxes.first(), selection.all_text_boxes.last()) else {
    return;
  };
  let last_lines = &tree.get(last).lines;
  if tree.get(first).lines.is_empty() || last_lines.is_empty() {
    return;
  }

  selection.anchor = Some(TextPosition {
    box_id: first,
    line: 0,
    offset: 0,
  });
  selection.focus = Some(TextPosition {
    box_id: last,
    line: last_lines.len() - 1,
    offset: last_lines.last().unwrap().text.len(),
  });
  selection.has_selection = true;
}
