//! Text selection
//!
//! Selection operates on the flat document-order list of text boxes rebuilt
//! after every layout. A selection is an anchor and a focus, each a
//! `(box, line, byte offset)` position; the anchor is fixed at gesture start
//! and the focus follows the pointer or caret.

pub mod caret;
pub mod controller;
pub mod copy;
pub mod hit;
pub mod words;

pub use controller::{SelectionController, SelectionMode};

use crate::dom::Document;
use crate::tree::{BoxId, RenderTree};
use rustc_hash::FxHashMap;

/// A caret position within a laid-out text box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextPosition {
  pub box_id: BoxId,
  /// Line index within the box's line boxes
  pub line: usize,
  /// Byte offset within the line's text, on a char boundary
  pub offset: usize,
}

/// Document-order selection state over the laid-out text boxes
#[derive(Debug, Default)]
pub struct Selection {
  pub anchor: Option<TextPosition>,
  pub focus: Option<TextPosition>,
  /// An active pointer drag is extending the selection
  pub dragging: bool,
  /// Anchor and focus differ (a caret alone is not a selection)
  pub has_selection: bool,
  /// Sticky column for vertical caret movement; negative means unset
  pub goal_x: f32,
  /// Document-order (pre-order DFS) text boxes with non-empty line lists
  pub all_text_boxes: Vec<BoxId>,
  index: FxHashMap<BoxId, usize>,
}

impl Selection {
  pub fn new() -> Self {
    Self {
      goal_x: -1.0,
      ..Default::default()
    }
  }

  /// Rebuilds the document-order text-box list from a laid-out tree and
  /// revalidates the endpoints against it.
  pub fn rebuild_text_boxes(&mut self, tree: &RenderTree, document: &Document) {
    self.all_text_boxes.clear();
    self.index.clear();

    for id in tree.pre_order() {
      let render_box = tree.get(id);
      if document.is_text(render_box.node) && !render_box.lines.is_empty() {
        self.index.insert(id, self.all_text_boxes.len());
        self.all_text_boxes.push(id);
      }
    }

    self.anchor = self.anchor.and_then(|p| self.revalidate(tree, p));
    self.focus = self.focus.and_then(|p| self.revalidate(tree, p));
    if self.anchor.is_none() || self.focus.is_none() {
      self.clear();
    }
  }

  /// Clamps a position to the box's current lines, or drops it when the box
  /// is no longer a laid-out text box.
  fn revalidate(&self, tree: &RenderTree, mut position: TextPosition) -> Option<TextPosition> {
    if !self.index.contains_key(&position.box_id) {
      return None;
    }
    let lines = &tree.get(position.box_id).lines;
    if position.line >= lines.len() {
      position.line = lines.len() - 1;
      position.offset = lines[position.line].text.len();
    }
    let line_text = &lines[position.line].text;
    if position.offset > line_text.len() {
      position.offset = line_text.len();
    }
    while position.offset > 0 && !line_text.is_char_boundary(position.offset) {
      position.offset -= 1;
    }
    Some(position)
  }

  pub fn clear(&mut self) {
    self.anchor = None;
    self.focus = None;
    self.dragging = false;
    self.has_selection = false;
    self.goal_x = -1.0;
  }

  /// Begins a drag selection at a position
  pub fn start(&mut self, position: TextPosition) {
    self.anchor = Some(position);
    self.focus = Some(position);
    self.dragging = true;
    self.has_selection = false;
    self.goal_x = -1.0;
  }

  /// Moves the focus during a drag
  pub fn update(&mut self, position: TextPosition) {
    self.focus = Some(position);
    self.has_selection = self.anchor != self.focus;
  }

  pub fn end_drag(&mut self) {
    self.dragging = false;
  }

  pub fn reset_goal_x(&mut self) {
    self.goal_x = -1.0;
  }

  /// Document-order index of a text box
  pub fn doc_index(&self, box_id: BoxId) -> Option<usize> {
    self.index.get(&box_id).copied()
  }

  /// Anchor and focus in document order: (start, end)
  pub fn ordered_endpoints(&self) -> Option<(TextPosition, TextPosition)> {
    let anchor = self.anchor?;
    let focus = self.focus?;
    let anchor_idx = self.doc_index(anchor.box_id)?;
    let focus_idx = self.doc_index(focus.box_id)?;

    let anchor_first = (anchor_idx, anchor.line, anchor.offset) <= (focus_idx, focus.line, focus.offset);
    if anchor_first {
      Some((anchor, focus))
    } else {
      Some((focus, anchor))
    }
  }

  /// Whether the anchor precedes the focus in document order
  pub fn anchor_first(&self) -> bool {
    match (self.anchor, self.focus) {
      (Some(anchor), Some(focus)) => {
        let a = self.doc_index(anchor.box_id).unwrap_or(0);
        let f = self.doc_index(focus.box_id).unwrap_or(0);
        (a, anchor.line, anchor.offset) <= (f, focus.line, focus.offset)
      }
      _ => true,
    }
  }

  /// The selected byte range of one line of one box, `(start, end)`; equal
  /// values mean the line has no selected text.
  ///
  /// A sole selected box uses both endpoints; the start box runs from its
  /// endpoint to the line end; the end box from the line start to its
  /// endpoint; boxes in between select whole lines.
  pub fn range_for_line(&self, box_id: BoxId, line: usize, line_len: usize) -> (usize, usize) {
    if !self.has_selection {
      return (0, 0);
    }
    let Some((start, end)) = self.ordered_endpoints() else {
      return (0, 0);
    };
    let Some(box_idx) = self.doc_index(box_id) else {
      return (0, 0);
    };
    let start_idx = self.doc_index(start.box_id).unwrap_or(0);
    let end_idx = self.doc_index(end.box_id).unwrap_or(0);

    if box_idx < start_idx || box_idx > end_idx {
      return (0, 0);
    }

    let is_start = box_idx == start_idx;
    let is_end = box_idx == end_idx;

    if is_start && is_end {
      let (mut start_line, mut start_char) = (start.line, start.offset);
      let (mut end_line, mut end_char) = (end.line, end.offset);
      if start_line > end_line || (start_line == end_line && start_char > end_char) {
        std::mem::swap(&mut start_line, &mut end_line);
        std::mem::swap(&mut start_char, &mut end_char);
      }
      if line < start_line || line > end_line {
        return (0, 0);
      }
      let sel_start = if line == start_line { start_char } else { 0 };
      let sel_end = if line == end_line { end_char } else { line_len };
      (sel_start, sel_end)
    } else if is_start {
      if line < start.line {
        return (0, 0);
      }
      let sel_start = if line == start.line { start.offset } else { 0 };
      (sel_start, line_len)
    } else if is_end {
      if line > end.line {
        return (0, 0);
      }
      let sel_end = if line == end.line { end.offset } else { line_len };
      (0, sel_end)
    } else {
      (0, line_len)
    }
  }
}
