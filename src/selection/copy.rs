//! Copy serialization
//!
//! Walks the selected text boxes in document order and joins their selected
//! line fragments by visual relationship: fragments on the same visual row
//! (inline siblings) concatenate directly, wrapped lines within one box join
//! with a single space, and a row change across boxes (block boundaries)
//! joins with a newline.

use crate::selection::Selection;
use crate::tree::{BoxId, RenderTree};

/// Serializes the current selection to plain text. An empty selection
/// serializes to the empty string.
pub fn selected_text(tree: &RenderTree, selection: &Selection) -> String {
  if !selection.has_selection {
    return String::new();
  }
  let Some((start, end)) = selection.ordered_endpoints() else {
    return String::new();
  };
  let (Some(start_idx), Some(end_idx)) = (
    selection.doc_index(start.box_id),
    selection.doc_index(end.box_id),
  ) else {
    return String::new();
  };

  let mut result = String::new();
  // The visual row and box the previous fragment came from
  let mut previous: Option<(BoxId, f32, f32)> = None;

  for box_idx in start_idx..=end_idx {
    let box_id = selection.all_text_boxes[box_idx];
    let lines = &tree.get(box_id).lines;

    for (line_idx, line) in lines.iter().enumerate() {
      let (sel_start, sel_end) = selection.range_for_line(box_id, line_idx, line.text.len());
      if sel_start >= sel_end || sel_start >= line.text.len() {
        continue;
      }

      if let Some((prev_box, prev_y, prev_height)) = previous {
        let same_row = (line.y - prev_y).abs() < prev_height.max(line.height) * 0.5;
        if prev_box == box_id {
          // Wrapped lines within the same box join with a space
          if !result.is_empty() && !result.ends_with('\n') {
            result.push(' ');
          }
        } else if !same_row && !result.is_empty() {
          result.push('\n');
        }
      }

      let sel_end = sel_end.min(line.text.len());
      result.push_str(&line.text[sel_start..sel_end]);
      previous = Some((box_id, line.y, line.height));
    }
  }

  result
}
