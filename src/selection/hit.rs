//! Hit testing for text selection
//!
//! Three queries: an exact z-order test used for initial clicks, a
//! nearest-line-at-Y test used while dragging (so dragging far left or right
//! still selects the text on that row), and a nearest-overall test used when
//! a click lands in empty space. None of them can fail while any text is
//! laid out.

use crate::selection::TextPosition;
use crate::text::{FontHandle, FontProvider};
use crate::tree::{BoxId, RenderTree};

fn font_for(tree: &RenderTree, fonts: &dyn FontProvider, id: BoxId) -> FontHandle {
  let style = &tree.get(id).style;
  fonts.font(&style.font_family, style.font_weight, style.font_style)
}

/// Exact hit test: recursive DFS in z-order (later children first). A point
/// hits the innermost text line box whose rect contains it. Scroll offsets
/// shift the point as the walk descends into scrolled content.
pub fn hit_test_exact(
  tree: &RenderTree,
  fonts: &dyn FontProvider,
  root: BoxId,
  x: f32,
  y: f32,
) -> Option<TextPosition> {
  let render_box = tree.get(root);

  // Children first, in reverse order for z-order; their coordinates are in
  // pre-scroll space.
  let child_x = x + render_box.scroll.x;
  let child_y = y + render_box.scroll.y;
  for &child in render_box.children.iter().rev() {
    if let Some(hit) = hit_test_exact(tree, fonts, child, child_x, child_y) {
      return Some(hit);
    }
  }

  if render_box.lines.is_empty() {
    return None;
  }

  let font = font_for(tree, fonts, root);
  let font_size = render_box.style.font_size;
  for (line_idx, line) in render_box.lines.iter().enumerate() {
    let in_vertical = y >= line.y && y < line.y + line.height;
    let in_horizontal = x >= line.x && x < line.x + line.width;
    if in_vertical && in_horizontal {
      let local_x = (x - line.x).max(0.0);
      let offset = fonts.hit_test(font, &line.text, local_x, font_size);
      return Some(TextPosition {
        box_id: root,
        line: line_idx,
        offset,
      });
    }
  }

  None
}

/// Drag hit test prioritizing the Y coordinate: finds the text on that row
/// regardless of X, falling back to the vertically nearest line.
pub fn hit_test_at_y(
  tree: &RenderTree,
  fonts: &dyn FontProvider,
  boxes: &[BoxId],
  x: f32,
  y: f32,
) -> Option<TextPosition> {
  if boxes.is_empty() {
    return None;
  }

  // Lines whose vertical range contains the Y
  struct Candidate {
    box_id: BoxId,
    line: usize,
    x: f32,
    width: f32,
  }
  let mut candidates: Vec<Candidate> = Vec::new();

  for &box_id in boxes {
    for (line_idx, line) in tree.get(box_id).lines.iter().enumerate() {
      if y >= line.y && y < line.y + line.height {
        candidates.push(Candidate {
          box_id,
          line: line_idx,
          x: line.x,
          width: line.width,
        });
      }
    }
  }

  if !candidates.is_empty() {
    candidates.sort_by(|a, b| a.x.total_cmp(&b.x));

    for (i, candidate) in candidates.iter().enumerate() {
      let left = candidate.x;
      let right = candidate.x + candidate.width;

      if x >= left && x < right {
        let line = &tree.get(candidate.box_id).lines[candidate.line];
        let font = font_for(tree, fonts, candidate.box_id);
        let offset = fonts.hit_test(font, &line.text, x - line.x, tree.get(candidate.box_id).style.font_size);
        return Some(TextPosition {
          box_id: candidate.box_id,
          line: candidate.line,
          offset,
        });
      }

      // In the gap before this line: the midpoint decides between the end of
      // the previous line and the start of this one.
      if x < left && i > 0 {
        let prev = &candidates[i - 1];
        let prev_right = prev.x + prev.width;
        let midpoint = (prev_right + left) / 2.0;
        return if x < midpoint {
          let line_len = tree.get(prev.box_id).lines[prev.line].text.len();
          Some(TextPosition {
            box_id: prev.box_id,
            line: prev.line,
            offset: line_len,
          })
        } else {
          Some(TextPosition {
            box_id: candidate.box_id,
            line: candidate.line,
            offset: 0,
          })
        };
      }
    }

    // Outside every line on this row: clamp to the extremes
    return if x < candidates[0].x {
      let first = &candidates[0];
      Some(TextPosition {
        box_id: first.box_id,
        line: first.line,
        offset: 0,
      })
    } else {
      let last = candidates.last().unwrap();
      let line_len = tree.get(last.box_id).lines[last.line].text.len();
      Some(TextPosition {
        box_id: last.box_id,
        line: last.line,
        offset: line_len,
      })
    };
  }

  // No line straddles this Y: nearest by vertical mid distance, caret at
  // start or end depending on whether the point is above or below.
  let mut best: Option<(BoxId, usize, f32, bool)> = None;
  for &box_id in boxes {
    for (line_idx, line) in tree.get(box_id).lines.iter().enumerate() {
      let mid = line.y + line.height / 2.0;
      let distance = (y - mid).abs();
      let below = y > line.y + line.height;
      if best.is_none() || distance < best.unwrap().2 {
        best = Some((box_id, line_idx, distance, below));
      }
    }
  }

  let (box_id, line_idx, _, below) = best?;
  let render_box = tree.get(box_id);
  let line = &render_box.lines[line_idx];
  let offset = if below {
    line.text.len()
  } else if y < line.y || x <= line.x {
    0
  } else if x >= line.x + line.width {
    line.text.len()
  } else {
    let font = font_for(tree, fonts, box_id);
    fonts.hit_test(font, &line.text, x - line.x, render_box.style.font_size)
  };

  Some(TextPosition {
    box_id,
    line: line_idx,
    offset,
  })
}

/// Nearest text to a point in empty space. The caret lands at the start or
/// end of the nearest line depending on which quadrant the click came from:
/// above or left of the text selects its start, below or right its end.
pub fn hit_test_nearest(
  tree: &RenderTree,
  fonts: &dyn FontProvider,
  boxes: &[BoxId],
  x: f32,
  y: f32,
) -> Option<TextPosition> {
  struct Best {
    box_id: BoxId,
    line: usize,
    distance: f32,
    above: bool,
    below: bool,
    left: bool,
    right: bool,
  }
  let mut best: Option<Best> = None;

  for &box_id in boxes {
    for (line_idx, line) in tree.get(box_id).lines.iter().enumerate() {
      let top = line.y;
      let bottom = line.y + line.height;
      let leftmost = line.x;
      let rightmost = line.x + line.width;

      let (dy, above, below) = if y < top {
        (top - y, true, false)
      } else if y > bottom {
        (y - bottom, false, true)
      } else {
        (0.0, false, false)
      };
      let (dx, left, right) = if x < leftmost {
        (leftmost - x, true, false)
      } else if x > rightmost {
        (x - rightmost, false, true)
      } else {
        (0.0, false, false)
      };

      let distance = dx * dx + dy * dy;
      if best.as_ref().map_or(true, |b| distance < b.distance) {
        best = Some(Best {
          box_id,
          line: line_idx,
          distance,
          above,
          below,
          left,
          right,
        });
      }
    }
  }

  let best = best?;
  let render_box = tree.get(best.box_id);
  let line = &render_box.lines[best.line];

  let offset = if best.above || best.left {
    0
  } else if best.below || best.right {
    line.text.len()
  } else {
    let font = font_for(tree, fonts, best.box_id);
    fonts.hit_test(font, &line.text, (x - line.x).max(0.0), render_box.style.font_size)
  };

  Some(TextPosition {
    box_id: best.box_id,
    line: best.line,
    offset,
  })
}

/// Exact hit with optional nearest-overall fallback for clicks in empty
/// space
pub fn hit_test(
  tree: &RenderTree,
  fonts: &dyn FontProvider,
  root: BoxId,
  boxes: &[BoxId],
  x: f32,
  y: f32,
  allow_nearest: bool,
) -> Option<TextPosition> {
  if let Some(hit) = hit_test_exact(tree, fonts, root, x, y) {
    return Some(hit);
  }
  if allow_nearest {
    return hit_test_nearest(tree, fonts, boxes, x, y);
  }
  None
}
