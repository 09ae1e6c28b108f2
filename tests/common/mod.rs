//! Shared helpers for integration tests
//!
//! Tests drive the whole pipeline with the deterministic fixed-metrics font
//! provider: every glyph advances half the font size, so at the default 16px
//! a character is 8px wide.

#![allow(dead_code)]

use microrender::dom::{Document, NodeId};
use microrender::geometry::Size;
use microrender::renderer::Renderer;
use microrender::text::FixedFontProvider;
use microrender::tree::{BoxId, RenderTree};

/// Character advance at the default 16px font size
pub const CHAR: f32 = 8.0;

pub fn element(doc: &mut Document, parent: NodeId, tag: &str) -> NodeId {
  let id = doc.create_element(tag);
  doc.append_child(parent, id);
  id
}

pub fn text(doc: &mut Document, parent: NodeId, content: &str) -> NodeId {
  let id = doc.create_text(content);
  doc.append_child(parent, id);
  id
}

/// Builds a renderer over a document with an author stylesheet and reflows
pub fn setup(document: Document, css: &str, width: f32, height: f32) -> Renderer<FixedFontProvider> {
  let mut renderer = Renderer::new(FixedFontProvider::new(), Size::new(width, height));
  if !css.is_empty() {
    renderer.add_stylesheet(css);
  }
  renderer.set_document(document);
  renderer
}

/// Zeroes the user-agent chrome so geometry assertions stay simple
pub const RESET_CSS: &str = "body, div, p, h1, h2, h3, ul, ol, li, blockquote, pre, td, th \
   { margin: 0; padding: 0; } \
   p, div { font-size: 16px; line-height: 1; }";

/// The render box mirroring a DOM node
pub fn box_for(tree: &RenderTree, node: NodeId) -> BoxId {
  for id in tree.pre_order() {
    if tree.get(id).node == node {
      return id;
    }
  }
  panic!("no render box for node {:?}", node);
}

/// Absolute X of the caret before byte `offset` on a text box line
pub fn caret_x(tree: &RenderTree, box_id: BoxId, line: usize, offset: usize) -> f32 {
  let line_box = &tree.get(box_id).lines[line];
  let chars_before = line_box.text[..offset].chars().count() as f32;
  line_box.x + chars_before * CHAR
}

/// A click position inside the character at byte `offset` (just right of its
/// left edge, safely before its advance midpoint)
pub fn click_at(tree: &RenderTree, box_id: BoxId, line: usize, offset: usize) -> (f32, f32) {
  let line_box = &tree.get(box_id).lines[line];
  let x = caret_x(tree, box_id, line, offset) + 2.0;
  (x, line_box.y + line_box.height / 2.0)
}
