//! Flex formatting context
//!
//! Row direction treats horizontal as the main axis. The algorithm measures
//! intrinsic main sizes, partitions children into lines when wrapping is
//! allowed, distributes positive free space by `flex-grow` ratio, and places
//! items per `justify-content`. Cross-axis stretch falls out of each child's
//! own height computation; `align-items` is parsed but not otherwise
//! implemented.
//!
//! Column direction stacks children vertically at full width. Column wrap is
//! not partitioned, and grow distribution needs a definite main size, so
//! column containers apply `justify-content` only when their height is
//! explicit.

use crate::layout::engine::{layout_box, LayoutContext};
use crate::layout::intrinsic;
use crate::style::types::{Display, JustifyContent};
use crate::tree::{BoxId, RenderTree};

struct FlexLine {
  children: Vec<BoxId>,
  total_size: f32,
  total_grow: f32,
}

/// Lays out the children of a flex container, returning the content height
pub fn layout_flex_children(
  tree: &mut RenderTree,
  ctx: &LayoutContext,
  container: BoxId,
  x: f32,
  y: f32,
  width: f32,
) -> f32 {
  let style = tree.get(container).style.clone();
  let children: Vec<BoxId> = tree
    .get(container)
    .children
    .iter()
    .copied()
    .filter(|&c| tree.get(c).style.display != Display::None)
    .collect();

  if children.is_empty() {
    return 0.0;
  }

  if style.flex_direction.is_row() {
    layout_row(tree, ctx, &children, &style, x, y, width)
  } else {
    layout_column(tree, ctx, &children, &style, x, y, width)
  }
}

fn layout_row(
  tree: &mut RenderTree,
  ctx: &LayoutContext,
  children: &[BoxId],
  style: &crate::style::ComputedStyle,
  x: f32,
  y: f32,
  width: f32,
) -> f32 {
  let gap = style.gap;

  // 1. Main-axis base sizes: an explicit width wins, otherwise the measured
  // intrinsic width. Free space distributes on top of these.
  let mut intrinsic_sizes = Vec::with_capacity(children.len());
  for &child in children {
    let child_style = tree.get(child).style.clone();
    let font_size = child_style.font_size;
    let explicit = ctx.resolve(child_style.width, width, font_size);
    let size = if !child_style.width.is_unset() && explicit >= 0.0 {
      let edges = ctx.resolve_edges(&child_style.padding, width, font_size).horizontal()
        + ctx.resolve_edges(&child_style.border_width, width, font_size).horizontal();
      match child_style.box_sizing {
        crate::style::types::BoxSizing::BorderBox => explicit,
        crate::style::types::BoxSizing::ContentBox => explicit + edges,
      }
    } else {
      intrinsic::measure_intrinsic_width(tree, ctx, child)
    };
    intrinsic_sizes.push(size);
  }

  // 2. Partition into lines
  let mut lines: Vec<FlexLine> = Vec::new();
  if style.flex_wrap.allows_wrap() {
    let mut current = FlexLine {
      children: Vec::new(),
      total_size: 0.0,
      total_grow: 0.0,
    };
    let mut line_size = 0.0;

    for (i, &child) in children.iter().enumerate() {
      let child_size = intrinsic_sizes[i];
      let mut size_with_gap = child_size + if current.children.is_empty() { 0.0 } else { gap };

      if !current.children.is_empty() && line_size + size_with_gap > width {
        current.total_size = line_size;
        lines.push(current);
        current = FlexLine {
          children: Vec::new(),
          total_size: 0.0,
          total_grow: 0.0,
        };
        line_size = 0.0;
        size_with_gap = child_size;
      }

      current.total_grow += tree.get(child).style.flex_grow;
      current.children.push(child);
      line_size += size_with_gap;
    }
    if !current.children.is_empty() {
      current.total_size = line_size;
      lines.push(current);
    }
  } else {
    let mut total_size = 0.0;
    let mut total_grow = 0.0;
    for (i, &child) in children.iter().enumerate() {
      total_size += intrinsic_sizes[i] + if i > 0 { gap } else { 0.0 };
      total_grow += tree.get(child).style.flex_grow;
    }
    lines.push(FlexLine {
      children: children.to_vec(),
      total_size,
      total_grow,
    });
  }

  // 3/4. Per line: distribute free space, place items, track cross size
  let index_of = |child: BoxId| children.iter().position(|&c| c == child).unwrap();
  let mut line_y = y;

  for line in &lines {
    let free = (width - line.total_size).max(0.0);

    let (start, item_gap) = match style.justify_content {
      JustifyContent::FlexStart => (0.0, gap),
      JustifyContent::Center => (free / 2.0, gap),
      JustifyContent::FlexEnd => (free, gap),
      JustifyContent::SpaceBetween => {
        if line.children.len() > 1 {
          (0.0, free / (line.children.len() - 1) as f32)
        } else {
          (0.0, gap)
        }
      }
      JustifyContent::SpaceAround => {
        let spacing = free / line.children.len() as f32;
        (spacing / 2.0, gap + spacing)
      }
    };

    let mut position = start;
    let mut cross_size = 0.0_f32;

    for &child in &line.children {
      let grow = tree.get(child).style.flex_grow;
      let extra = if line.total_grow > 0.0 {
        free * grow / line.total_grow
      } else {
        0.0
      };
      let child_width = intrinsic_sizes[index_of(child)] + extra;

      layout_box(tree, ctx, child, x + position, line_y, child_width, false);

      let frame = tree.get(child).metrics.border_box();
      position += frame.width() + item_gap;
      cross_size = cross_size.max(frame.height());
    }

    line_y += cross_size + gap;
  }

  // Drop the trailing inter-line gap
  let mut total_height = line_y - y;
  if !lines.is_empty() {
    total_height -= gap;
  }
  total_height.max(0.0)
}

fn layout_column(
  tree: &mut RenderTree,
  ctx: &LayoutContext,
  children: &[BoxId],
  style: &crate::style::ComputedStyle,
  x: f32,
  y: f32,
  width: f32,
) -> f32 {
  let gap = style.gap;

  // Stack at natural heights first
  let mut heights = Vec::with_capacity(children.len());
  let mut total = 0.0;
  let mut stack_y = y;
  for (i, &child) in children.iter().enumerate() {
    if i > 0 {
      stack_y += gap;
      total += gap;
    }
    layout_box(tree, ctx, child, x, stack_y, width, false);
    let h = tree.get(child).metrics.border_box().height();
    heights.push(h);
    stack_y += h;
    total += h;
  }

  // Justify along the vertical main axis only when the container height is
  // definite.
  let explicit_height = ctx.resolve(style.height, 0.0, style.font_size);
  let available = if !style.height.is_unset() && explicit_height >= 0.0 {
    explicit_height
  } else {
    return total;
  };

  let free = (available - total).max(0.0);
  let (start, item_gap) = match style.justify_content {
    JustifyContent::FlexStart => (0.0, gap),
    JustifyContent::Center => (free / 2.0, gap),
    JustifyContent::FlexEnd => (free, gap),
    JustifyContent::SpaceBetween => {
      if children.len() > 1 {
        (0.0, free / (children.len() - 1) as f32)
      } else {
        (0.0, gap)
      }
    }
    JustifyContent::SpaceAround => {
      let spacing = free / children.len() as f32;
      (spacing / 2.0, gap + spacing)
    }
  };

  let mut position = y + start;
  for (i, &child) in children.iter().enumerate() {
    let current_top = tree.get(child).metrics.border_box().y();
    tree.offset_subtree_y(child, position - current_top);
    position += heights[i] + item_gap;
  }

  total.max(available)
}
