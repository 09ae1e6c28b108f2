//! Table formatting context
//!
//! Two passes: column widths from the column-wise max of cell intrinsic
//! widths (scaled down proportionally when they exceed the table's content
//! width), then cell layout left-to-right with row heights set by the
//! tallest cell. Row and row-group frames are fixed up to cover their
//! contents. Row and column spans are out of scope.

use crate::geometry::Rect;
use crate::layout::engine::{layout_box, LayoutContext};
use crate::layout::intrinsic::{cell_intrinsic_width, collect_table_cells, collect_table_rows};
use crate::tree::{BoxId, RenderTree};

/// Lays out the rows and cells of a table, returning the content height
pub fn layout_table_children(
  tree: &mut RenderTree,
  ctx: &LayoutContext,
  table: BoxId,
  x: f32,
  y: f32,
  width: f32,
) -> f32 {
  let rows = collect_table_rows(tree, ctx, table);
  let cells_by_row = collect_table_cells(tree, ctx, table);
  if rows.is_empty() {
    return 0.0;
  }

  let column_count = cells_by_row.iter().map(Vec::len).max().unwrap_or(0);
  if column_count == 0 {
    return 0.0;
  }

  // First pass: natural column widths
  let mut column_widths = vec![0.0_f32; column_count];
  for row_cells in &cells_by_row {
    for (col, &cell) in row_cells.iter().enumerate() {
      column_widths[col] = column_widths[col].max(cell_intrinsic_width(tree, ctx, cell));
    }
  }

  // Scale down proportionally when the columns cannot fit
  let total: f32 = column_widths.iter().sum();
  if total > width && total > 0.0 {
    let scale = width / total;
    for w in &mut column_widths {
      *w *= scale;
    }
  }

  // Second pass: lay out cells with their assigned column widths
  let mut current_y = y;
  for (row_idx, &row) in rows.iter().enumerate() {
    let row_cells = &cells_by_row[row_idx];

    let mut current_x = x;
    let mut row_height = 0.0_f32;
    for (col, &cell) in row_cells.iter().enumerate() {
      layout_box(tree, ctx, cell, current_x, current_y, column_widths[col], false);
      row_height = row_height.max(tree.get(cell).metrics.border_box().height());
      current_x += column_widths[col];
    }

    // The row's frame covers its cells
    let row_box = tree.get_mut(row);
    row_box.metrics = Default::default();
    row_box.metrics.content = Rect::from_xywh(x, current_y, current_x - x, row_height);

    current_y += row_height;
  }

  // Row-group frames cover their contained rows
  let groups: Vec<BoxId> = tree
    .get(table)
    .children
    .iter()
    .copied()
    .filter(|&child| {
      matches!(
        ctx.document.tag_name(tree.get(child).node),
        Some("tbody") | Some("thead") | Some("tfoot")
      )
    })
    .collect();
  for group in groups {
    let mut bounds: Option<Rect> = None;
    for &row in &tree.get(group).children {
      if ctx.document.tag_name(tree.get(row).node) != Some("tr") {
        continue;
      }
      let frame = tree.get(row).metrics.border_box();
      bounds = Some(match bounds {
        Some(b) => b.union(frame),
        None => frame,
      });
    }
    let group_box = tree.get_mut(group);
    group_box.metrics = Default::default();
    group_box.metrics.content = bounds.unwrap_or_else(|| Rect::from_xywh(x, y, 0.0, 0.0));
  }

  current_y - y
}
