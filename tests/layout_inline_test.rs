//! Inline layout integration tests: mixed inline flow, line breaking,
//! br handling and vertical alignment.

mod common;

use common::{box_for, element, setup, text, CHAR, RESET_CSS};
use microrender::dom::Document;

#[test]
fn inline_elements_share_a_line_with_text() {
  let mut doc = Document::new();
  let root = doc.root();
  let body = element(&mut doc, root, "body");
  let p = element(&mut doc, body, "p");
  let before = text(&mut doc, p, "Hello ");
  let strong = element(&mut doc, p, "strong");
  let inside = text(&mut doc, strong, "world");
  let after = text(&mut doc, p, " today");

  let renderer = setup(doc.clone(), RESET_CSS, 800.0, 600.0);
  let tree = renderer.tree().unwrap();

  let b = &tree.get(box_for(tree, before)).lines[0];
  let i = &tree.get(box_for(tree, inside)).lines[0];
  let a = &tree.get(box_for(tree, after)).lines[0];

  // All three runs sit on one visual line
  assert_eq!(b.y, i.y);
  assert_eq!(i.y, a.y);

  // And follow each other horizontally: "Hello " is 6 chars
  assert!((i.x - (b.x + 6.0 * CHAR)).abs() < 0.01);
  assert!((a.x - (i.x + 5.0 * CHAR)).abs() < 0.01);
}

#[test]
fn br_forces_a_line_break() {
  let mut doc = Document::new();
  let root = doc.root();
  let body = element(&mut doc, root, "body");
  let p = element(&mut doc, body, "p");
  let first = text(&mut doc, p, "abcdefghij");
  element(&mut doc, p, "br");
  let second = text(&mut doc, p, "xy");

  let renderer = setup(doc.clone(), RESET_CSS, 800.0, 600.0);
  let tree = renderer.tree().unwrap();

  let l1 = &tree.get(box_for(tree, first)).lines[0];
  let l2 = &tree.get(box_for(tree, second)).lines[0];
  assert!(l2.y > l1.y);
  assert_eq!(l2.x, l1.x);
}

#[test]
fn long_inline_run_wraps_between_words() {
  let mut doc = Document::new();
  let root = doc.root();
  let body = element(&mut doc, root, "body");
  let p = element(&mut doc, body, "p");
  let t1 = text(&mut doc, p, "aaaa bbbb ");
  let em = element(&mut doc, p, "em");
  let t2 = text(&mut doc, em, "cccc dddd");

  // 10 chars fit per 80px line
  let renderer = setup(doc.clone(), RESET_CSS, 80.0, 600.0);
  let tree = renderer.tree().unwrap();

  let first_lines = &tree.get(box_for(tree, t1)).lines;
  let second_lines = &tree.get(box_for(tree, t2)).lines;

  // "aaaa bbbb " fills the first line; the em text wraps onto further lines
  assert_eq!(first_lines[0].text, "aaaa bbbb ");
  assert!(!second_lines.is_empty());
  assert!(second_lines[0].y > first_lines[0].y);

  // Within each box, line y is non-decreasing
  for lines in [first_lines, second_lines] {
    for pair in lines.windows(2) {
      assert!(pair[1].y >= pair[0].y);
    }
  }
}

#[test]
fn punctuation_never_starts_a_line() {
  let mut doc = Document::new();
  let root = doc.root();
  let body = element(&mut doc, root, "body");
  let p = element(&mut doc, body, "p");
  let t1 = text(&mut doc, p, "aaaa bbb");
  let em = element(&mut doc, p, "em");
  text(&mut doc, em, "xx");
  // The trailing comma would overflow, but sticks to this run anyway
  let t2 = text(&mut doc, p, ", end");

  // Line budget: 10 chars. "aaaa bbb" + "xx" fill it; the comma overflows.
  let renderer = setup(doc.clone(), RESET_CSS, 80.0, 600.0);
  let tree = renderer.tree().unwrap();

  let tail_lines = &tree.get(box_for(tree, t2)).lines;
  let first = &tree.get(box_for(tree, t1)).lines[0];
  // The comma token stayed on the first visual line
  assert_eq!(tail_lines[0].y, first.y);
  assert!(tail_lines[0].text.starts_with(','));
}

#[test]
fn inline_element_edges_offset_its_text() {
  let mut doc = Document::new();
  let root = doc.root();
  let body = element(&mut doc, root, "body");
  let p = element(&mut doc, body, "p");
  let before = text(&mut doc, p, "ab");
  let code = element(&mut doc, p, "code");
  doc.set_attribute(code, "style", "padding-left: 10px; padding-right: 6px; font-size: 16px");
  let inside = text(&mut doc, code, "cd");
  let after = text(&mut doc, p, "ef");

  let renderer = setup(doc.clone(), RESET_CSS, 800.0, 600.0);
  let tree = renderer.tree().unwrap();

  let b = &tree.get(box_for(tree, before)).lines[0];
  let i = &tree.get(box_for(tree, inside)).lines[0];
  let a = &tree.get(box_for(tree, after)).lines[0];

  // Left padding lands before the inner text, right padding after it
  assert!((i.x - (b.x + 2.0 * CHAR + 10.0)).abs() < 0.01);
  assert!((a.x - (i.x + 2.0 * CHAR + 6.0)).abs() < 0.01);

  // The element box wraps the text with its padding
  let code_box = box_for(tree, code);
  let metrics = &tree.get(code_box).metrics;
  assert_eq!(metrics.padding.left, 10.0);
  assert_eq!(metrics.content, tree.get(box_for(tree, inside)).metrics.content);
}

#[test]
fn vertical_align_offsets_inline_blocks() {
  let mut doc = Document::new();
  let root = doc.root();
  let body = element(&mut doc, root, "body");
  let p = element(&mut doc, body, "p");
  text(&mut doc, p, "tall");
  let tall = element(&mut doc, p, "span");
  doc.set_attribute(tall, "style", "display: inline-block; width: 10px; height: 40px");
  let middle = element(&mut doc, p, "span");
  doc.set_attribute(middle, "style", "display: inline-block; width: 10px; height: 20px; vertical-align: middle");
  let top = element(&mut doc, p, "span");
  doc.set_attribute(top, "style", "display: inline-block; width: 10px; height: 20px; vertical-align: top");

  let renderer = setup(doc.clone(), RESET_CSS, 800.0, 600.0);
  let tree = renderer.tree().unwrap();

  let tall_frame = tree.get(box_for(tree, tall)).frame();
  let middle_frame = tree.get(box_for(tree, middle)).frame();
  let top_frame = tree.get(box_for(tree, top)).frame();

  // The line box is 40px tall. Bottom-aligned (default) boxes end at its
  // bottom, middle-aligned center on it, top-aligned start at its top.
  let line_top = tall_frame.min_y();
  assert!((middle_frame.min_y() - (line_top + 10.0)).abs() < 0.5);
  assert!((top_frame.min_y() - line_top).abs() < 0.5);
}

#[test]
fn hyphenated_words_break_after_the_dash() {
  let mut doc = Document::new();
  let root = doc.root();
  let body = element(&mut doc, root, "body");
  let p = element(&mut doc, body, "p");
  let em = element(&mut doc, p, "em");
  let t = text(&mut doc, em, "background-color");
  text(&mut doc, p, " x");

  // 11 chars per 88px line: "background-" fits, "color" wraps
  let renderer = setup(doc.clone(), RESET_CSS, 88.0, 600.0);
  let tree = renderer.tree().unwrap();

  let lines = &tree.get(box_for(tree, t)).lines;
  assert_eq!(lines.len(), 2);
  assert_eq!(lines[0].text, "background-");
  assert_eq!(lines[1].text, "color");
  assert_eq!(lines[1].start_offset, 11);
}
