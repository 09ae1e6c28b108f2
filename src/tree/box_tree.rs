//! Render boxes and box-model geometry

use crate::dom::{Document, NodeId};
use crate::geometry::{EdgeOffsets, Point, Rect, Size};
use crate::style::ComputedStyle;

/// Index of a box within its [`RenderTree`] arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoxId(pub usize);

/// Resolved box-model geometry. `content` is the content rect in absolute
/// coordinates; the edge sets expand outwards to the padding, border and
/// margin boxes.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoxMetrics {
  pub content: Rect,
  pub padding: EdgeOffsets,
  pub border: EdgeOffsets,
  pub margin: EdgeOffsets,
}

impl BoxMetrics {
  /// Content plus padding
  pub fn padding_box(&self) -> Rect {
    Rect::from_xywh(
      self.content.x() - self.padding.left,
      self.content.y() - self.padding.top,
      self.content.width() + self.padding.horizontal(),
      self.content.height() + self.padding.vertical(),
    )
  }

  /// Content plus padding plus border
  pub fn border_box(&self) -> Rect {
    Rect::from_xywh(
      self.content.x() - self.padding.left - self.border.left,
      self.content.y() - self.padding.top - self.border.top,
      self.content.width() + self.padding.horizontal() + self.border.horizontal(),
      self.content.height() + self.padding.vertical() + self.border.vertical(),
    )
  }

  /// Border box plus margin
  pub fn margin_box(&self) -> Rect {
    let border = self.border_box();
    Rect::from_xywh(
      border.x() - self.margin.left,
      border.y() - self.margin.top,
      border.width() + self.margin.horizontal(),
      border.height() + self.margin.vertical(),
    )
  }
}

/// One laid-out horizontal run of text
#[derive(Debug, Clone, PartialEq)]
pub struct LineBox {
  pub text: String,
  pub x: f32,
  pub y: f32,
  pub width: f32,
  pub height: f32,
  /// Byte offset of this line's first character in the node's logical text
  pub start_offset: usize,
}

/// Scroll state of a box with `overflow: scroll | auto`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollState {
  pub x: f32,
  pub y: f32,
  /// Content extent beyond the clamped content box
  pub scrollable_width: f32,
  pub scrollable_height: f32,
}

impl ScrollState {
  pub fn max_x(&self) -> f32 {
    self.scrollable_width.max(0.0)
  }

  pub fn max_y(&self) -> f32 {
    self.scrollable_height.max(0.0)
  }

  /// Clamps offsets into `[0, max]` on both axes
  pub fn clamp(&mut self) {
    self.x = self.x.clamp(0.0, self.max_x());
    self.y = self.y.clamp(0.0, self.max_y());
  }
}

/// The layout mirror of one DOM node
#[derive(Debug, Clone)]
pub struct RenderBox {
  pub node: NodeId,
  pub style: ComputedStyle,
  pub metrics: BoxMetrics,
  pub parent: Option<BoxId>,
  pub children: Vec<BoxId>,
  /// Text line boxes; non-empty only for laid-out text nodes
  pub lines: Vec<LineBox>,
  pub scroll: ScrollState,
}

impl RenderBox {
  /// The border box, the rect used for hit testing and painting
  pub fn frame(&self) -> Rect {
    self.metrics.border_box()
  }

  pub fn is_scrollable(&self) -> bool {
    self.style.overflow.is_scroll_container()
      && (self.scroll.scrollable_height > 0.0 || self.scroll.scrollable_width > 0.0)
  }
}

/// Arena of render boxes mirroring a document
#[derive(Debug, Clone)]
pub struct RenderTree {
  pub boxes: Vec<RenderBox>,
  pub root: BoxId,
  pub viewport: Size,
}

impl RenderTree {
  /// Builds a tree mirroring the DOM, one box per node in document order.
  /// `styles` is the cascade output indexed by `NodeId`.
  pub fn build(document: &Document, styles: &[ComputedStyle], viewport: Size) -> RenderTree {
    let mut tree = RenderTree {
      boxes: Vec::with_capacity(document.len()),
      root: BoxId(0),
      viewport,
    };
    tree.root = tree.build_subtree(document, styles, document.root(), None);
    tree
  }

  fn build_subtree(
    &mut self,
    document: &Document,
    styles: &[ComputedStyle],
    node: NodeId,
    parent: Option<BoxId>,
  ) -> BoxId {
    let id = BoxId(self.boxes.len());
    self.boxes.push(RenderBox {
      node,
      style: styles[node.0].clone(),
      metrics: BoxMetrics::default(),
      parent,
      children: Vec::new(),
      lines: Vec::new(),
      scroll: ScrollState::default(),
    });

    for &child in document.children(node) {
      let child_id = self.build_subtree(document, styles, child, Some(id));
      self.boxes[id.0].children.push(child_id);
    }

    id
  }

  /// Refreshes per-box styles from a new cascade without rebuilding the
  /// arena, so box identity (selection, scroll offsets) survives a reflow.
  pub fn restyle(&mut self, styles: &[ComputedStyle]) {
    for render_box in &mut self.boxes {
      render_box.style = styles[render_box.node.0].clone();
    }
  }

  pub fn get(&self, id: BoxId) -> &RenderBox {
    &self.boxes[id.0]
  }

  pub fn get_mut(&mut self, id: BoxId) -> &mut RenderBox {
    &mut self.boxes[id.0]
  }

  /// Pre-order depth-first traversal ids
  pub fn pre_order(&self) -> Vec<BoxId> {
    let mut order = Vec::with_capacity(self.boxes.len());
    let mut stack = vec![self.root];
    while let Some(id) = stack.pop() {
      order.push(id);
      for &child in self.get(id).children.iter().rev() {
        stack.push(child);
      }
    }
    order
  }

  /// Shifts a box and its whole subtree vertically, line boxes included.
  /// Used by vertical-align and table row fixup.
  pub fn offset_subtree_y(&mut self, id: BoxId, dy: f32) {
    if dy.abs() < 0.01 {
      return;
    }
    let mut stack = vec![id];
    while let Some(current) = stack.pop() {
      let render_box = &mut self.boxes[current.0];
      render_box.metrics.content.origin.y += dy;
      for line in &mut render_box.lines {
        line.y += dy;
      }
      stack.extend(render_box.children.iter().copied());
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::dom::Document;

  #[test]
  fn box_metrics_nest_consistently() {
    let metrics = BoxMetrics {
      content: Rect::from_xywh(100.0, 50.0, 200.0, 80.0),
      padding: EdgeOffsets::all(10.0),
      border: EdgeOffsets::all(2.0),
      margin: EdgeOffsets::all(5.0),
    };

    let border = metrics.border_box();
    assert_eq!(border, Rect::from_xywh(88.0, 38.0, 224.0, 104.0));
    assert_eq!(
      border.width(),
      metrics.content.width() + metrics.padding.horizontal() + metrics.border.horizontal()
    );

    let margin = metrics.margin_box();
    assert_eq!(margin, Rect::from_xywh(83.0, 33.0, 234.0, 114.0));
  }

  #[test]
  fn scroll_state_clamps() {
    let mut scroll = ScrollState {
      x: -5.0,
      y: 120.0,
      scrollable_width: 0.0,
      scrollable_height: 100.0,
    };
    scroll.clamp();
    assert_eq!(scroll.x, 0.0);
    assert_eq!(scroll.y, 100.0);
  }

  #[test]
  fn build_mirrors_document_in_pre_order() {
    let mut doc = Document::new();
    let div = doc.create_element("div");
    let p = doc.create_element("p");
    let t1 = doc.create_text("a");
    let t2 = doc.create_text("b");
    doc.append_child(doc.root(), div);
    doc.append_child(div, p);
    doc.append_child(p, t1);
    doc.append_child(div, t2);

    let styles = vec![crate::style::ComputedStyle::default(); doc.len()];
    let tree = RenderTree::build(&doc, &styles, Size::new(800.0, 600.0));

    assert_eq!(tree.boxes.len(), 5);
    let order = tree.pre_order();
    let nodes: Vec<NodeId> = order.iter().map(|&id| tree.get(id).node).collect();
    assert_eq!(nodes, vec![doc.root(), div, p, t1, t2]);
    assert_eq!(tree.get(order[2]).parent, Some(order[1]));
  }

  #[test]
  fn offset_subtree_moves_lines() {
    let mut doc = Document::new();
    let t = doc.create_text("x");
    doc.append_child(doc.root(), t);
    let styles = vec![crate::style::ComputedStyle::default(); doc.len()];
    let mut tree = RenderTree::build(&doc, &styles, Size::new(100.0, 100.0));

    let text_box = tree.pre_order()[1];
    tree.get_mut(text_box).lines.push(LineBox {
      text: "x".to_string(),
      x: 0.0,
      y: 10.0,
      width: 8.0,
      height: 16.0,
      start_offset: 0,
    });

    tree.offset_subtree_y(text_box, 5.0);
    assert_eq!(tree.get(text_box).lines[0].y, 15.0);
  }
}
