//! Scroll handling
//!
//! Wheel deltas land on the innermost scrollable element under the pointer
//! and propagate outward: each element in the chain consumes what it can,
//! the remainder moves to the next scrollable ancestor and finally to the
//! viewport. Offsets clamp to `[0, scrollable extent]` everywhere.

use crate::tree::{BoxId, RenderTree};
use tracing::trace;

/// Viewport scroll state. `max` re-clamps the offset whenever a layout
/// shrinks the content.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ViewportScroll {
  pub offset: f32,
  pub max: f32,
}

impl ViewportScroll {
  /// Updates the scrollable extent from content and viewport heights,
  /// clamping the current offset down if the content shrank.
  pub fn set_extent(&mut self, content_height: f32, viewport_height: f32) {
    self.max = (content_height - viewport_height).max(0.0);
    self.offset = self.offset.clamp(0.0, self.max);
  }

  pub fn scroll_by(&mut self, delta: f32) {
    self.offset = (self.offset + delta).clamp(0.0, self.max);
  }
}

/// The chain of scrollable elements containing a point, innermost first.
/// Ancestor scroll offsets shift the point on the way down.
pub fn scrollable_chain_at(tree: &RenderTree, x: f32, y: f32) -> Vec<BoxId> {
  let mut chain = Vec::new();
  collect_chain(tree, tree.root, x, y, 0.0, 0.0, &mut chain);
  chain
}

/// Returns true when the point is inside this box, so scrollable ancestors
/// push themselves onto the chain on the way back up.
fn collect_chain(
  tree: &RenderTree,
  id: BoxId,
  x: f32,
  y: f32,
  parent_scroll_x: f32,
  parent_scroll_y: f32,
  chain: &mut Vec<BoxId>,
) -> bool {
  let render_box = tree.get(id);
  let frame = render_box.frame();

  let local_x = x + parent_scroll_x;
  let local_y = y + parent_scroll_y;
  if !(local_x >= frame.min_x() && local_x < frame.max_x() && local_y >= frame.min_y() && local_y < frame.max_y()) {
    return false;
  }

  let child_scroll_x = parent_scroll_x + render_box.scroll.x;
  let child_scroll_y = parent_scroll_y + render_box.scroll.y;

  for &child in render_box.children.iter().rev() {
    if collect_chain(tree, child, x, y, child_scroll_x, child_scroll_y, chain) {
      if render_box.is_scrollable() {
        chain.push(id);
      }
      return true;
    }
  }

  if render_box.is_scrollable() {
    chain.push(id);
  }
  true
}

/// Applies a wheel delta (positive scrolls content down) at a pointer
/// position: the innermost scrollable consumes first, the remainder
/// propagates outward, and whatever is left scrolls the viewport.
pub fn handle_wheel(tree: &mut RenderTree, viewport: &mut ViewportScroll, x: f32, y: f32, delta: f32) {
  let chain = scrollable_chain_at(tree, x, y);
  let mut remaining = delta;

  for &id in &chain {
    if remaining.abs() < 0.01 {
      return;
    }
    let scroll = &mut tree.get_mut(id).scroll;
    let before = scroll.y;
    scroll.y += remaining;
    scroll.clamp();
    let consumed = scroll.y - before;
    remaining -= consumed;
    trace!(box_id = id.0, consumed, remaining, "wheel delta on scroll chain");
  }

  if remaining.abs() >= 0.01 {
    viewport.scroll_by(remaining);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn viewport_scroll_clamps_to_extent() {
    let mut viewport = ViewportScroll::default();
    viewport.set_extent(1000.0, 600.0);
    assert_eq!(viewport.max, 400.0);

    viewport.scroll_by(500.0);
    assert_eq!(viewport.offset, 400.0);
    viewport.scroll_by(-900.0);
    assert_eq!(viewport.offset, 0.0);
  }

  #[test]
  fn shrinking_content_clamps_offset_down() {
    let mut viewport = ViewportScroll::default();
    viewport.set_extent(1000.0, 600.0);
    viewport.scroll_by(400.0);
    viewport.set_extent(700.0, 600.0);
    assert_eq!(viewport.offset, 100.0);
  }
}
