//! Scroll overflow and wheel propagation tests

mod common;

use common::{box_for, element, setup, text, RESET_CSS};
use microrender::dom::Document;

/// A 100px-tall scrollable div holding several paragraphs
fn scrollable_doc() -> (Document, microrender::dom::NodeId) {
  let mut doc = Document::new();
  let root = doc.root();
  let body = element(&mut doc, root, "body");
  let scroller = element(&mut doc, body, "div");
  doc.set_attribute(scroller, "style", "overflow: auto; height: 100px");
  for _ in 0..10 {
    let p = element(&mut doc, scroller, "p");
    text(&mut doc, p, "line of text");
  }
  (doc, scroller)
}

#[test]
fn overflow_exposes_scrollable_height() {
  let (doc, scroller) = scrollable_doc();
  let renderer = setup(doc, RESET_CSS, 800.0, 600.0);
  let tree = renderer.tree().unwrap();

  let scroll = tree.get(box_for(tree, scroller)).scroll;
  // 10 lines at 16px inside a 100px box leave 60px of overflow
  assert!((scroll.scrollable_height - 60.0).abs() < 0.5);
  assert_eq!(scroll.y, 0.0);
}

#[test]
fn wheel_scrolls_the_innermost_scrollable_and_clamps() {
  let (doc, scroller) = scrollable_doc();
  let mut renderer = setup(doc, RESET_CSS, 800.0, 600.0);

  // One wheel tick (40px) inside the scroller
  renderer.wheel(10.0, 50.0, 1.0);
  {
    let tree = renderer.tree().unwrap();
    let scroll = tree.get(box_for(tree, scroller)).scroll;
    assert!((scroll.y - 40.0).abs() < 0.5);
  }

  // Scrolling far beyond the extent clamps to it
  renderer.wheel(10.0, 50.0, 50.0);
  {
    let tree = renderer.tree().unwrap();
    let scroll = tree.get(box_for(tree, scroller)).scroll;
    assert!((scroll.y - scroll.scrollable_height).abs() < 0.01);
    assert!(scroll.y >= 0.0);
  }

  // And back up past the top clamps at zero
  renderer.wheel(10.0, 50.0, -100.0);
  let tree = renderer.tree().unwrap();
  assert_eq!(tree.get(box_for(tree, scroller)).scroll.y, 0.0);
}

#[test]
fn unconsumed_delta_reaches_the_viewport() {
  let mut doc = Document::new();
  let root = doc.root();
  let body = element(&mut doc, root, "body");
  let scroller = element(&mut doc, body, "div");
  doc.set_attribute(scroller, "style", "overflow: scroll; height: 100px");
  for _ in 0..8 {
    let p = element(&mut doc, scroller, "p");
    text(&mut doc, p, "inner");
  }
  // Tall trailing content makes the page itself scrollable
  let tail = element(&mut doc, body, "div");
  doc.set_attribute(tail, "style", "height: 2000px");

  let mut renderer = setup(doc, RESET_CSS, 800.0, 600.0);

  // The scroller holds 28px of overflow (8 lines x 16 - 100). A 2-tick
  // wheel (80px) exhausts it; the remaining 52px scrolls the page.
  renderer.wheel(10.0, 50.0, 2.0);

  let tree = renderer.tree().unwrap();
  let scroll = tree.get(box_for(tree, scroller)).scroll;
  assert!((scroll.y - scroll.scrollable_height).abs() < 0.01);
  assert!((renderer.viewport_scroll().offset - (80.0 - scroll.scrollable_height)).abs() < 0.5);
}

#[test]
fn viewport_scroll_clamps_to_content() {
  let mut doc = Document::new();
  let root = doc.root();
  let body = element(&mut doc, root, "body");
  let tall = element(&mut doc, body, "div");
  doc.set_attribute(tall, "style", "height: 1000px");

  let mut renderer = setup(doc, RESET_CSS, 800.0, 600.0);
  renderer.wheel(10.0, 10.0, 100.0);
  assert!((renderer.viewport_scroll().offset - 400.0).abs() < 0.01);

  renderer.wheel(10.0, 10.0, -200.0);
  assert_eq!(renderer.viewport_scroll().offset, 0.0);
}

#[test]
fn scroll_offsets_survive_reflow_and_reclamp() {
  let (doc, scroller) = scrollable_doc();
  let mut renderer = setup(doc, RESET_CSS, 800.0, 600.0);

  renderer.wheel(10.0, 50.0, 1.0);
  renderer.reflow();
  {
    let tree = renderer.tree().unwrap();
    assert!((tree.get(box_for(tree, scroller)).scroll.y - 40.0).abs() < 0.5);
  }

  // Growing the box shrinks the overflow; the offset clamps down
  renderer
    .document_mut()
    .set_attribute(scroller, "style", "overflow: auto; height: 150px");
  renderer.reflow();
  let tree = renderer.tree().unwrap();
  let scroll = tree.get(box_for(tree, scroller)).scroll;
  assert!((scroll.scrollable_height - 10.0).abs() < 0.5);
  assert!(scroll.y <= scroll.scrollable_height);
}
