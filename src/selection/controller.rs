//! Selection gestures
//!
//! Maps pointer and keyboard events onto the selection model: single click
//! starts a character selection, double click a word selection, triple click
//! selects the enclosing block; drags extend per the active granularity;
//! keyboard arrows move or extend the caret.

use crate::dom::{Document, NodeId};
use crate::input::{Key, Modifiers};
use crate::selection::caret::{self, VerticalDirection};
use crate::selection::copy::selected_text;
use crate::selection::hit;
use crate::selection::words::find_word_boundaries;
use crate::selection::{Selection, TextPosition};
use crate::style::types::UserSelect;
use crate::text::FontProvider;
use crate::tree::{BoxId, RenderTree};
use tracing::trace;

/// Selection granularity of the active gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
  #[default]
  Character,
  Word,
  Block,
}

/// Tags treated as block-level for triple-click selection
const BLOCK_TAGS: &[&str] = &[
  "p",
  "div",
  "li",
  "td",
  "th",
  "h1",
  "h2",
  "h3",
  "h4",
  "h5",
  "h6",
  "blockquote",
  "pre",
  "article",
  "section",
  "header",
  "footer",
  "main",
  "nav",
  "aside",
];

/// Drives a [`Selection`] from input events
#[derive(Debug, Default)]
pub struct SelectionController {
  pub selection: Selection,
  mode: SelectionMode,
  /// The anchor word's byte range, remembered for word-drag extension
  anchor_word: (usize, usize),
}

impl SelectionController {
  pub fn new() -> Self {
    Self {
      selection: Selection::new(),
      mode: SelectionMode::Character,
      anchor_word: (0, 0),
    }
  }

  pub fn mode(&self) -> SelectionMode {
    self.mode
  }

  /// Pointer press at `(x, y)` in content space with the source's click
  /// count (1 = single, 2 = double, 3+ = triple).
  pub fn pointer_down(
    &mut self,
    tree: &RenderTree,
    document: &Document,
    fonts: &dyn FontProvider,
    x: f32,
    y: f32,
    click_count: u8,
    modifiers: Modifiers,
  ) {
    let hit = hit::hit_test(tree, fonts, tree.root, &self.selection.all_text_boxes, x, y, true);

    let Some(position) = hit else {
      self.selection.clear();
      self.mode = SelectionMode::Character;
      return;
    };
    if tree.get(position.box_id).lines.is_empty() {
      self.selection.clear();
      self.mode = SelectionMode::Character;
      return;
    }

    trace!(box_id = position.box_id.0, click_count, "pointer down on text");

    match tree.get(position.box_id).style.user_select {
      UserSelect::None => {
        // The element declines to start a selection; any existing selection
        // stays as it is.
      }
      UserSelect::All => {
        let lines = &tree.get(position.box_id).lines;
        self.selection.anchor = Some(TextPosition {
          box_id: position.box_id,
          line: 0,
          offset: 0,
        });
        self.selection.focus = Some(TextPosition {
          box_id: position.box_id,
          line: lines.len() - 1,
          offset: lines.last().unwrap().text.len(),
        });
        self.selection.has_selection = true;
        self.selection.dragging = false;
        self.mode = SelectionMode::Character;
      }
      UserSelect::Auto | UserSelect::Text => {
        if modifiers.shift && self.selection.has_selection {
          // Shift+click keeps the anchor and moves the focus
          self.selection.focus = Some(position);
          self.selection.has_selection = true;
          self.selection.dragging = false;
          self.mode = SelectionMode::Character;
        } else if click_count >= 3 {
          self.select_block(tree, document, position);
        } else if click_count == 2 {
          self.select_word(tree, position);
        } else {
          self.selection.start(position);
          self.mode = SelectionMode::Character;
        }
      }
    }
  }

  fn select_word(&mut self, tree: &RenderTree, position: TextPosition) {
    let line_text = tree.get(position.box_id).lines[position.line].text.clone();
    let (word_start, word_end) = find_word_boundaries(&line_text, position.offset);
    // The gesture selects the word itself; the trailing whitespace the
    // boundary search includes stays out of the double-click selection.
    let trimmed = line_text[word_start..word_end].trim_end();
    let word_end = if trimmed.is_empty() {
      word_end
    } else {
      word_start + trimmed.len()
    };

    self.selection.anchor = Some(TextPosition {
      offset: word_start,
      ..position
    });
    self.selection.focus = Some(TextPosition {
      offset: word_end,
      ..position
    });
    self.selection.has_selection = true;
    self.selection.dragging = true;
    self.selection.goal_x = -1.0;
    self.anchor_word = (word_start, word_end);
    self.mode = SelectionMode::Word;
  }

  fn select_block(&mut self, tree: &RenderTree, document: &Document, position: TextPosition) {
    let (first, last) = self.block_text_box_range(tree, document, position.box_id);

    let last_lines = &tree.get(last).lines;
    self.selection.anchor = Some(TextPosition {
      box_id: first,
      line: 0,
      offset: 0,
    });
    self.selection.focus = Some(TextPosition {
      box_id: last,
      line: last_lines.len() - 1,
      offset: last_lines.last().map(|l| l.text.len()).unwrap_or(0),
    });
    self.selection.has_selection = true;
    // No drag expansion for the block gesture
    self.selection.dragging = false;
    self.selection.goal_x = -1.0;
    self.mode = SelectionMode::Block;
  }

  /// The first and last text boxes inside the clicked box's block ancestor
  fn block_text_box_range(&self, tree: &RenderTree, document: &Document, clicked: BoxId) -> (BoxId, BoxId) {
    let Some(ancestor) = block_ancestor(document, tree.get(clicked).node) else {
      return (clicked, clicked);
    };

    let mut first = None;
    let mut last = None;
    for &box_id in &self.selection.all_text_boxes {
      if document.is_descendant_of(tree.get(box_id).node, ancestor) {
        if first.is_none() {
          first = Some(box_id);
        }
        last = Some(box_id);
      }
    }

    (first.unwrap_or(clicked), last.unwrap_or(clicked))
  }

  /// Pointer motion while a drag is active
  pub fn pointer_move(&mut self, tree: &RenderTree, fonts: &dyn FontProvider, x: f32, y: f32) {
    if !self.selection.dragging {
      return;
    }
    let Some(position) = hit::hit_test_at_y(tree, fonts, &self.selection.all_text_boxes, x, y) else {
      return;
    };
    if tree.get(position.box_id).lines.is_empty() {
      return;
    }

    match self.mode {
      SelectionMode::Word => self.drag_word(tree, position),
      SelectionMode::Block => self.drag_block(tree, position),
      SelectionMode::Character => self.selection.update(position),
    }
  }

  /// Word drag: the target's word extends the selection away from the
  /// remembered anchor word.
  fn drag_word(&mut self, tree: &RenderTree, position: TextPosition) {
    let Some(anchor) = self.selection.anchor else {
      return;
    };
    let line_text = tree.get(position.box_id).lines[position.line].text.clone();
    let (word_start, word_end) = find_word_boundaries(&line_text, position.offset);

    let after_anchor = if position.box_id == anchor.box_id && position.line == anchor.line {
      position.offset >= self.anchor_word.1
    } else {
      let anchor_idx = self.selection.doc_index(anchor.box_id).unwrap_or(0);
      let target_idx = self.selection.doc_index(position.box_id).unwrap_or(0);
      target_idx > anchor_idx || (target_idx == anchor_idx && position.line > anchor.line)
    };

    if after_anchor {
      self.selection.anchor = Some(TextPosition {
        offset: self.anchor_word.0,
        ..anchor
      });
      self.selection.focus = Some(TextPosition {
        offset: word_end,
        ..position
      });
    } else {
      self.selection.anchor = Some(TextPosition {
        offset: self.anchor_word.1,
        ..anchor
      });
      self.selection.focus = Some(TextPosition {
        offset: word_start,
        ..position
      });
    }
    self.selection.has_selection = true;
  }

  /// Block drag: whole lines, anchored at the opposite end of the anchor
  /// line.
  fn drag_block(&mut self, tree: &RenderTree, position: TextPosition) {
    let Some(anchor) = self.selection.anchor else {
      return;
    };

    let anchor_idx = self.selection.doc_index(anchor.box_id).unwrap_or(0);
    let target_idx = self.selection.doc_index(position.box_id).unwrap_or(0);
    let after_anchor = target_idx > anchor_idx || (target_idx == anchor_idx && position.line > anchor.line);

    let target_len = tree.get(position.box_id).lines[position.line].text.len();
    if after_anchor {
      self.selection.anchor = Some(TextPosition { offset: 0, ..anchor });
      self.selection.focus = Some(TextPosition {
        offset: target_len,
        ..position
      });
    } else {
      let anchor_len = tree
        .get(anchor.box_id)
        .lines
        .get(anchor.line)
        .map(|l| l.text.len())
        .unwrap_or(0);
      self.selection.anchor = Some(TextPosition {
        offset: anchor_len,
        ..anchor
      });
      self.selection.focus = Some(TextPosition { offset: 0, ..position });
    }
    self.selection.has_selection = true;
  }

  pub fn pointer_up(&mut self) {
    self.selection.end_drag();
  }

  /// Keyboard input. Returns the serialized selection when the key was the
  /// copy shortcut (the embedder owns the clipboard).
  pub fn key_down(
    &mut self,
    tree: &RenderTree,
    fonts: &dyn FontProvider,
    key: Key,
    modifiers: Modifiers,
  ) -> Option<String> {
    match key {
      Key::Char('c') if modifiers.ctrl => {
        let text = selected_text(tree, &self.selection);
        // An empty selection makes copy a no-op
        return (!text.is_empty()).then_some(text);
      }
      Key::Char('a') if modifiers.ctrl => {
        caret::select_all(tree, &mut self.selection);
        return None;
      }
      Key::ArrowLeft | Key::ArrowRight | Key::ArrowUp | Key::ArrowDown => {
        self.arrow_key(tree, fonts, key, modifiers);
        return None;
      }
      _ => {}
    }
    None
  }

  fn arrow_key(&mut self, tree: &RenderTree, fonts: &dyn FontProvider, key: Key, modifiers: Modifiers) {
    if self.selection.focus.is_none() {
      return;
    }

    // Extending requires an anchor; a bare caret grows one in place
    if modifiers.shift && !self.selection.has_selection {
      self.selection.anchor = self.selection.focus;
      self.selection.has_selection = true;
    }

    match key {
      Key::ArrowRight => {
        if modifiers.ctrl {
          caret::move_word_right(tree, &mut self.selection);
        } else {
          caret::move_right(tree, &mut self.selection);
        }
      }
      Key::ArrowLeft => {
        if modifiers.ctrl {
          caret::move_word_left(tree, &mut self.selection);
        } else {
          caret::move_left(tree, &mut self.selection);
        }
      }
      Key::ArrowUp => caret::move_vertical(tree, fonts, &mut self.selection, VerticalDirection::Up),
      Key::ArrowDown => caret::move_vertical(tree, fonts, &mut self.selection, VerticalDirection::Down),
      _ => return,
    }

    if modifiers.shift {
      self.selection.has_selection = self.selection.anchor != self.selection.focus;
    } else {
      // Without shift the caret moves and the selection collapses
      self.selection.anchor = self.selection.focus;
      self.selection.has_selection = false;
    }
  }
}

/// The nearest element ancestor with a block-level tag
pub fn block_ancestor(document: &Document, node: NodeId) -> Option<NodeId> {
  document
    .ancestors(node)
    .find(|&ancestor| matches!(document.tag_name(ancestor), Some(tag) if BLOCK_TAGS.contains(&tag)))
}
