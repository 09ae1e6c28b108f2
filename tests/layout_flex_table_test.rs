//! Flex and table layout integration tests

mod common;

use common::{box_for, element, setup, text, RESET_CSS};
use microrender::dom::Document;

fn flex_container(doc: &mut Document) -> (microrender::dom::NodeId, Vec<microrender::dom::NodeId>) {
  let body = element(doc, doc.root(), "body");
  let container = element(doc, body, "div");
  let mut items = Vec::new();
  for _ in 0..3 {
    let item = element(doc, container, "div");
    // 5 characters at 8px: intrinsic width 40
    text(doc, item, "aaaaa");
    items.push(item);
  }
  (container, items)
}

#[test]
fn flex_grow_distributes_free_space() {
  let mut doc = Document::new();
  let (container, items) = flex_container(&mut doc);
  doc.set_attribute(container, "style", "display: flex; width: 300px");
  doc.set_attribute(items[0], "style", "flex-grow: 1");
  doc.set_attribute(items[1], "style", "flex-grow: 2");

  let renderer = setup(doc.clone(), RESET_CSS, 800.0, 600.0);
  let tree = renderer.tree().unwrap();

  // Free space 300 - 120 = 180 splits 1:2 over the first two items
  let widths: Vec<f32> = items
    .iter()
    .map(|&item| tree.get(box_for(tree, item)).frame().width())
    .collect();
  assert!((widths[0] - 100.0).abs() < 0.5, "widths: {widths:?}");
  assert!((widths[1] - 160.0).abs() < 0.5, "widths: {widths:?}");
  assert!((widths[2] - 40.0).abs() < 0.5, "widths: {widths:?}");

  // Items sit side by side
  let x0 = tree.get(box_for(tree, items[0])).frame().min_x();
  let x1 = tree.get(box_for(tree, items[1])).frame().min_x();
  let x2 = tree.get(box_for(tree, items[2])).frame().min_x();
  assert!(x0 < x1 && x1 < x2);
}

#[test]
fn justify_content_positions_items() {
  for (justify, expected_first_x) in [
    ("flex-start", 0.0),
    ("center", 90.0),
    ("flex-end", 180.0),
  ] {
    let mut doc = Document::new();
    let (container, items) = flex_container(&mut doc);
    doc.set_attribute(
      container,
      "style",
      &format!("display: flex; width: 300px; justify-content: {justify}"),
    );

    let renderer = setup(doc.clone(), RESET_CSS, 800.0, 600.0);
    let tree = renderer.tree().unwrap();
    let first_x = tree.get(box_for(tree, items[0])).frame().min_x();
    assert!(
      (first_x - expected_first_x).abs() < 0.5,
      "{justify}: first item at {first_x}, expected {expected_first_x}"
    );
  }
}

#[test]
fn space_between_spreads_the_gap() {
  let mut doc = Document::new();
  let (container, items) = flex_container(&mut doc);
  doc.set_attribute(container, "style", "display: flex; width: 300px; justify-content: space-between");

  let renderer = setup(doc.clone(), RESET_CSS, 800.0, 600.0);
  let tree = renderer.tree().unwrap();

  // Free 180 over two gaps: items at 0, 130, 260
  let xs: Vec<f32> = items
    .iter()
    .map(|&item| tree.get(box_for(tree, item)).frame().min_x())
    .collect();
  assert!((xs[0] - 0.0).abs() < 0.5, "{xs:?}");
  assert!((xs[1] - 130.0).abs() < 0.5, "{xs:?}");
  assert!((xs[2] - 260.0).abs() < 0.5, "{xs:?}");
}

#[test]
fn flex_wrap_packs_greedily() {
  let mut doc = Document::new();
  let (container, items) = flex_container(&mut doc);
  // Three 40px items with a 10px gap cannot share a 100px row
  doc.set_attribute(container, "style", "display: flex; flex-wrap: wrap; width: 100px; gap: 10px");

  let renderer = setup(doc.clone(), RESET_CSS, 800.0, 600.0);
  let tree = renderer.tree().unwrap();

  let y0 = tree.get(box_for(tree, items[0])).frame().min_y();
  let y1 = tree.get(box_for(tree, items[1])).frame().min_y();
  let y2 = tree.get(box_for(tree, items[2])).frame().min_y();
  assert_eq!(y0, y1, "first two items share a row");
  assert!(y2 > y1, "third item wraps to the next row");
}

#[test]
fn column_direction_stacks_children() {
  let mut doc = Document::new();
  let (container, items) = flex_container(&mut doc);
  doc.set_attribute(container, "style", "display: flex; flex-direction: column; gap: 4px");

  let renderer = setup(doc.clone(), RESET_CSS, 800.0, 600.0);
  let tree = renderer.tree().unwrap();

  let mut last_bottom = f32::MIN;
  for &item in &items {
    let frame = tree.get(box_for(tree, item)).frame();
    assert!(frame.min_y() >= last_bottom);
    last_bottom = frame.max_y();
  }
}

#[test]
fn table_columns_size_to_widest_cell() {
  let mut doc = Document::new();
  let root = doc.root();
  let body = element(&mut doc, root, "body");
  let table = element(&mut doc, body, "table");
  let tbody = element(&mut doc, table, "tbody");

  let row1 = element(&mut doc, tbody, "tr");
  let cell_a = element(&mut doc, row1, "td");
  text(&mut doc, cell_a, "aa");
  let cell_b = element(&mut doc, row1, "td");
  text(&mut doc, cell_b, "bbbbbb");

  let row2 = element(&mut doc, tbody, "tr");
  let cell_c = element(&mut doc, row2, "td");
  text(&mut doc, cell_c, "cccc");
  let cell_d = element(&mut doc, row2, "td");
  text(&mut doc, cell_d, "d");

  let renderer = setup(doc.clone(), RESET_CSS, 800.0, 600.0);
  let tree = renderer.tree().unwrap();

  // Column 0 sizes to "cccc" (32px), column 1 to "bbbbbb" (48px)
  let a = tree.get(box_for(tree, cell_a)).frame();
  let c = tree.get(box_for(tree, cell_c)).frame();
  let b = tree.get(box_for(tree, cell_b)).frame();
  let d = tree.get(box_for(tree, cell_d)).frame();

  assert_eq!(a.min_x(), c.min_x());
  assert_eq!(b.min_x(), d.min_x());
  assert!((b.min_x() - a.min_x() - 32.0).abs() < 0.5);

  // Rows stack and cover their cells
  let r1 = tree.get(box_for(tree, row1)).frame();
  let r2 = tree.get(box_for(tree, row2)).frame();
  assert!(r2.min_y() >= r1.max_y() - 0.01);
  assert!(r1.width() >= 32.0 + 48.0 - 0.01);

  // The row group covers both rows
  let group = tree.get(box_for(tree, tbody)).frame();
  assert!(group.min_y() <= r1.min_y() + 0.01);
  assert!(group.max_y() >= r2.max_y() - 0.01);
}

#[test]
fn oversized_table_columns_scale_down() {
  let mut doc = Document::new();
  let root = doc.root();
  let body = element(&mut doc, root, "body");
  let table = element(&mut doc, body, "table");
  doc.set_attribute(table, "style", "width: 100px");
  let row = element(&mut doc, table, "tr");
  let left = element(&mut doc, row, "td");
  text(&mut doc, left, "aaaaaaaaaa"); // 80px natural
  let right = element(&mut doc, row, "td");
  text(&mut doc, right, "bbbbbbbbbb"); // 80px natural

  let renderer = setup(doc.clone(), RESET_CSS, 800.0, 600.0);
  let tree = renderer.tree().unwrap();

  // 160px of natural columns scale into the 100px table
  let left_frame = tree.get(box_for(tree, left)).frame();
  let right_frame = tree.get(box_for(tree, right)).frame();
  assert!((left_frame.width() - 50.0).abs() < 1.0);
  assert!((right_frame.min_x() - left_frame.min_x() - 50.0).abs() < 1.0);
}
