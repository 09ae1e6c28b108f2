//! Intrinsic width measurement
//!
//! The natural width of a box before its container imposes constraints.
//! Used when sizing inline, inline-block and table boxes, for flex item
//! measurement, and when pre-measuring complex inline units.

use crate::layout::engine::LayoutContext;
use crate::tree::{BoxId, RenderTree};

/// Measures the intrinsic width of a box
pub fn measure_intrinsic_width(tree: &RenderTree, ctx: &LayoutContext, id: BoxId) -> f32 {
  let render_box = tree.get(id);
  let style = &render_box.style;
  let node = render_box.node;
  let font_size = style.font_size;

  if let Some(text) = ctx.document.text_content(node) {
    let font = ctx
      .fonts
      .font(&style.font_family, style.font_weight, style.font_style);
    return ctx.fonts.text_width(font, text, font_size);
  }

  // Form controls and replaced elements have fixed natural widths
  if let Some(tag) = ctx.document.tag_name(node) {
    match tag {
      "input" => {
        let input_type = ctx
          .document
          .attribute(node, "type")
          .map(|t| t.to_ascii_lowercase())
          .unwrap_or_else(|| "text".to_string());
        return match input_type.as_str() {
          // 16px control, checkboxes with their 4px trailing margin
          "checkbox" => 20.0,
          "radio" => 16.0,
          _ => 150.0,
        };
      }
      "button" => {
        let children: Vec<BoxId> = render_box.children.clone();
        let text_width: f32 = children
          .iter()
          .map(|&child| measure_intrinsic_width(tree, ctx, child))
          .sum();
        return text_width.max(40.0);
      }
      "img" => {
        if let Some(width) = ctx
          .document
          .attribute(node, "width")
          .and_then(|w| w.trim().parse::<f32>().ok())
        {
          return width;
        }
        return 150.0;
      }
      "textarea" => {
        let cols = ctx
          .document
          .attribute(node, "cols")
          .and_then(|c| c.trim().parse::<u32>().ok())
          .unwrap_or(20);
        return cols as f32 * font_size * 0.6;
      }
      "select" => return 150.0,
      _ => {}
    }
  }

  let padding_left = ctx.resolve(style.padding.left, 0.0, font_size).max(0.0);
  let padding_right = ctx.resolve(style.padding.right, 0.0, font_size).max(0.0);
  let padding = padding_left + padding_right;

  use crate::style::types::Display;
  let is_block_level = matches!(
    style.display,
    Display::Block | Display::Flex | Display::Table | Display::TableRow
  );

  if is_block_level {
    // Children stack vertically; the widest wins
    let mut max_width: f32 = 0.0;
    for &child in &render_box.children {
      max_width = max_width.max(measure_intrinsic_width(tree, ctx, child));
    }
    max_width + padding
  } else {
    // Inline-level children flow horizontally; widths sum
    let mut total: f32 = 0.0;
    for &child in &render_box.children {
      total += measure_intrinsic_width(tree, ctx, child);
    }
    total + padding
  }
}

/// Measures a table's intrinsic width by the sum of its natural column
/// widths plus the table's own horizontal padding and border.
pub fn measure_table_intrinsic_width(tree: &RenderTree, ctx: &LayoutContext, id: BoxId) -> f32 {
  let cells_by_row = collect_table_cells(tree, ctx, id);
  if cells_by_row.is_empty() {
    return 0.0;
  }

  let column_count = cells_by_row.iter().map(Vec::len).max().unwrap_or(0);
  if column_count == 0 {
    return 0.0;
  }

  let mut column_widths = vec![0.0_f32; column_count];
  for row in &cells_by_row {
    for (col, &cell) in row.iter().enumerate() {
      column_widths[col] = column_widths[col].max(cell_intrinsic_width(tree, ctx, cell));
    }
  }

  let style = &tree.get(id).style;
  let font_size = style.font_size;
  let table_padding =
    ctx.resolve(style.padding.left, 0.0, font_size).max(0.0) + ctx.resolve(style.padding.right, 0.0, font_size).max(0.0);
  let table_border = ctx.resolve(style.border_width.left, 0.0, font_size).max(0.0)
    + ctx.resolve(style.border_width.right, 0.0, font_size).max(0.0);

  column_widths.iter().sum::<f32>() + table_padding + table_border
}

/// A cell's natural width: its horizontal padding and border plus the
/// measured width of all descendant text.
pub fn cell_intrinsic_width(tree: &RenderTree, ctx: &LayoutContext, cell: BoxId) -> f32 {
  let style = &tree.get(cell).style;
  let font_size = style.font_size;
  let edges = ctx.resolve(style.padding.left, 0.0, font_size).max(0.0)
    + ctx.resolve(style.padding.right, 0.0, font_size).max(0.0)
    + ctx.resolve(style.border_width.left, 0.0, font_size).max(0.0)
    + ctx.resolve(style.border_width.right, 0.0, font_size).max(0.0);

  descendant_text_width(tree, ctx, cell) + edges
}

fn descendant_text_width(tree: &RenderTree, ctx: &LayoutContext, id: BoxId) -> f32 {
  let render_box = tree.get(id);
  if let Some(text) = ctx.document.text_content(render_box.node) {
    let style = &render_box.style;
    let font = ctx
      .fonts
      .font(&style.font_family, style.font_weight, style.font_style);
    return ctx.fonts.text_width(font, text, style.font_size);
  }
  render_box
    .children
    .iter()
    .map(|&child| descendant_text_width(tree, ctx, child))
    .sum()
}

/// Harvests a table's logical rows of cells: direct `tr` children plus `tr`
/// rows one level down through `tbody`/`thead`/`tfoot`.
pub fn collect_table_cells(tree: &RenderTree, ctx: &LayoutContext, table: BoxId) -> Vec<Vec<BoxId>> {
  let mut cells_by_row = Vec::new();

  for &child in &tree.get(table).children {
    match ctx.document.tag_name(tree.get(child).node) {
      Some("tbody") | Some("thead") | Some("tfoot") => {
        for &row in &tree.get(child).children {
          if ctx.document.tag_name(tree.get(row).node) == Some("tr") {
            cells_by_row.push(row_cells(tree, ctx, row));
          }
        }
      }
      Some("tr") => cells_by_row.push(row_cells(tree, ctx, child)),
      _ => {}
    }
  }

  cells_by_row
}

/// The `tr` boxes of a table in document order, matching `collect_table_cells`
pub fn collect_table_rows(tree: &RenderTree, ctx: &LayoutContext, table: BoxId) -> Vec<BoxId> {
  let mut rows = Vec::new();
  for &child in &tree.get(table).children {
    match ctx.document.tag_name(tree.get(child).node) {
      Some("tbody") | Some("thead") | Some("tfoot") => {
        for &row in &tree.get(child).children {
          if ctx.document.tag_name(tree.get(row).node) == Some("tr") {
            rows.push(row);
          }
        }
      }
      Some("tr") => rows.push(child),
      _ => {}
    }
  }
  rows
}

fn row_cells(tree: &RenderTree, ctx: &LayoutContext, row: BoxId) -> Vec<BoxId> {
  tree
    .get(row)
    .children
    .iter()
    .copied()
    .filter(|&cell| {
      matches!(
        ctx.document.tag_name(tree.get(cell).node),
        Some("td") | Some("th")
      )
    })
    .collect()
}
