//! Frame orchestration
//!
//! [`Renderer`] ties the pipeline together for an embedder: it owns the
//! document, stylesheets, render tree, selection and scroll state, and runs
//! one pass per frame — style, layout, selection rebuild, paint. There is no
//! incremental invalidation: a reflow re-runs everything from style onward.
//!
//! Two lifecycles exist. [`Renderer::reflow`] re-runs style and layout over
//! the same box arena, so box identity — and with it scroll offsets and the
//! selection — survives. Replacing the document rebuilds the arena, clearing
//! both.

use crate::css::parser::parse_stylesheet;
use crate::css::types::Origin;
use crate::dom::Document;
use crate::geometry::Size;
use crate::input::{Key, Modifiers, PointerButton};
use crate::layout::{layout_document, LayoutContext};
use crate::paint::{DisplayItem, DisplayList, Painter};
use crate::scroll::{handle_wheel, ViewportScroll};
use crate::selection::copy::selected_text;
use crate::selection::SelectionController;
use crate::style::StyleEngine;
use crate::text::FontProvider;
use crate::tree::RenderTree;
use tracing::debug;

/// Wheel delta to pixels
const SCROLL_SPEED: f32 = 40.0;

/// The per-frame rendering pipeline over one document
pub struct Renderer<F: FontProvider> {
  document: Document,
  style_engine: StyleEngine,
  fonts: F,
  viewport: Size,
  tree: Option<RenderTree>,
  controller: SelectionController,
  viewport_scroll: ViewportScroll,
}

impl<F: FontProvider> Renderer<F> {
  pub fn new(fonts: F, viewport: Size) -> Self {
    Self {
      document: Document::new(),
      style_engine: StyleEngine::new(),
      fonts,
      viewport,
      tree: None,
      controller: SelectionController::new(),
      viewport_scroll: ViewportScroll::default(),
    }
  }

  /// Replaces the document: the render tree rebuilds from scratch, and
  /// selection and scroll state reset.
  pub fn set_document(&mut self, document: Document) {
    self.document = document;
    self.tree = None;
    self.controller = SelectionController::new();
    self.viewport_scroll = ViewportScroll::default();
    self.reflow();
  }

  pub fn document(&self) -> &Document {
    &self.document
  }

  /// Grants mutable DOM access; call [`Renderer::reflow`] afterwards.
  /// Structural changes (added/removed nodes) require `set_document`.
  pub fn document_mut(&mut self) -> &mut Document {
    &mut self.document
  }

  /// Parses and appends an author stylesheet
  pub fn add_stylesheet(&mut self, css: &str) {
    self
      .style_engine
      .add_stylesheet(parse_stylesheet(css, Origin::Author));
  }

  pub fn resize(&mut self, viewport: Size) {
    self.viewport = viewport;
    self.reflow();
  }

  pub fn viewport(&self) -> Size {
    self.viewport
  }

  /// Re-runs style and layout, preserving box identity. Scroll offsets
  /// clamp to the new content extents and the selection revalidates against
  /// the new line boxes.
  pub fn reflow(&mut self) {
    let styles = self.style_engine.compute_all(&self.document);

    if let Some(tree) = self.tree.as_mut() {
      tree.viewport = self.viewport;
      tree.restyle(&styles);
    } else {
      self.tree = Some(RenderTree::build(&self.document, &styles, self.viewport));
    }
    let tree = self.tree.as_mut().expect("render tree exists after reflow");

    let ctx = LayoutContext {
      document: &self.document,
      fonts: &self.fonts,
      viewport: self.viewport,
    };
    layout_document(tree, &ctx);

    let content_height = tree.get(tree.root).metrics.border_box().height();
    self
      .viewport_scroll
      .set_extent(content_height, self.viewport.height);

    self
      .controller
      .selection
      .rebuild_text_boxes(tree, &self.document);

    debug!(
      boxes = tree.boxes.len(),
      text_boxes = self.controller.selection.all_text_boxes.len(),
      content_height,
      "reflow"
    );
  }

  pub fn tree(&self) -> Option<&RenderTree> {
    self.tree.as_ref()
  }

  pub fn selection(&self) -> &SelectionController {
    &self.controller
  }

  pub fn selection_mut(&mut self) -> &mut SelectionController {
    &mut self.controller
  }

  pub fn viewport_scroll(&self) -> ViewportScroll {
    self.viewport_scroll
  }

  /// The current selection serialized for the clipboard
  pub fn selected_text(&self) -> String {
    match &self.tree {
      Some(tree) => selected_text(tree, &self.controller.selection),
      None => String::new(),
    }
  }

  // ==========================================================================
  // Event entry points. Pointer coordinates arrive in widget space; the
  // viewport scroll shifts them into content space.
  // ==========================================================================

  pub fn pointer_down(&mut self, x: f32, y: f32, _button: PointerButton, click_count: u8, modifiers: Modifiers) {
    let Some(tree) = &self.tree else {
      return;
    };
    let content_y = y + self.viewport_scroll.offset;
    self
      .controller
      .pointer_down(tree, &self.document, &self.fonts, x, content_y, click_count, modifiers);
  }

  pub fn pointer_move(&mut self, x: f32, y: f32) {
    let Some(tree) = &self.tree else {
      return;
    };
    let content_y = y + self.viewport_scroll.offset;
    self.controller.pointer_move(tree, &self.fonts, x, content_y);
  }

  pub fn pointer_up(&mut self) {
    self.controller.pointer_up();
  }

  /// Wheel input at a pointer position. Positive `delta_lines` scrolls the
  /// content down. The delta walks the scroll chain under the pointer
  /// before reaching the viewport.
  pub fn wheel(&mut self, x: f32, y: f32, delta_lines: f32) {
    let Some(tree) = &mut self.tree else {
      return;
    };
    let content_y = y + self.viewport_scroll.offset;
    handle_wheel(
      tree,
      &mut self.viewport_scroll,
      x,
      content_y,
      delta_lines * SCROLL_SPEED,
    );
  }

  /// Keyboard input. Returns clipboard text when the copy shortcut fired.
  pub fn key_down(&mut self, key: Key, modifiers: Modifiers) -> Option<String> {
    let tree = self.tree.as_ref()?;
    self.controller.key_down(tree, &self.fonts, key, modifiers)
  }

  /// Paints the current frame: the content under the viewport scroll, with
  /// off-screen boxes culled.
  pub fn paint(&self) -> DisplayList {
    let Some(tree) = &self.tree else {
      return DisplayList::new();
    };

    let viewport_top = self.viewport_scroll.offset;
    let viewport_bottom = viewport_top + self.viewport.height;

    let painter = Painter::new(tree, &self.document, &self.fonts, &self.controller.selection);
    let content = painter.paint(viewport_top, viewport_bottom);

    // Wrap the content in the viewport scroll translation
    let mut list = DisplayList::new();
    if viewport_top != 0.0 {
      list.push(DisplayItem::PushTranslate {
        dx: 0.0,
        dy: -viewport_top,
      });
      for item in content.into_items() {
        list.push(item);
      }
      list.push(DisplayItem::PopTranslate);
    } else {
      list = content;
    }
    list
  }
}
