//! Paint emission tests: command order, clipping, culling, selection
//! highlights and scroll translation.

mod common;

use common::{box_for, click_at, element, setup, text, RESET_CSS};
use microrender::dom::Document;
use microrender::input::{Modifiers, PointerButton};
use microrender::paint::DisplayItem;

fn items_of(renderer: &microrender::renderer::Renderer<microrender::text::FixedFontProvider>) -> Vec<DisplayItem> {
  renderer.paint().into_items()
}

#[test]
fn background_paints_before_text() {
  let mut doc = Document::new();
  let root = doc.root();
  let body = element(&mut doc, root, "body");
  let p = element(&mut doc, body, "p");
  doc.set_attribute(p, "style", "background-color: #ff0000");
  text(&mut doc, p, "hi");

  let renderer = setup(doc, RESET_CSS, 800.0, 600.0);
  let items = items_of(&renderer);

  let bg_idx = items
    .iter()
    .position(|i| matches!(i, DisplayItem::FillRect(r) if r.color.r > 0.9 && r.color.g < 0.1))
    .expect("background rect");
  let text_idx = items
    .iter()
    .position(|i| matches!(i, DisplayItem::Text(t) if t.text == "hi"))
    .expect("text run");
  assert!(bg_idx < text_idx);
}

#[test]
fn text_baseline_sits_at_ascent() {
  let mut doc = Document::new();
  let root = doc.root();
  let body = element(&mut doc, root, "body");
  let p = element(&mut doc, body, "p");
  text(&mut doc, p, "hi");

  let renderer = setup(doc, RESET_CSS, 800.0, 600.0);
  let tree = renderer.tree().unwrap();
  let line_y = tree.get(renderer.selection().selection.all_text_boxes[0]).lines[0].y;

  let items = items_of(&renderer);
  let text_item = items
    .iter()
    .find_map(|i| match i {
      DisplayItem::Text(t) if t.text == "hi" => Some(t.clone()),
      _ => None,
    })
    .unwrap();

  // Fixed provider ascent is 0.8em
  assert!((text_item.y - (line_y + 12.8)).abs() < 0.01);
}

#[test]
fn clip_push_pop_balance() {
  let mut doc = Document::new();
  let root = doc.root();
  let body = element(&mut doc, root, "body");
  let clipped = element(&mut doc, body, "div");
  doc.set_attribute(clipped, "style", "overflow: hidden; height: 50px");
  let inner = element(&mut doc, clipped, "div");
  doc.set_attribute(inner, "style", "overflow: auto; height: 30px");
  for _ in 0..6 {
    let p = element(&mut doc, inner, "p");
    text(&mut doc, p, "x");
  }

  let renderer = setup(doc, RESET_CSS, 800.0, 600.0);
  let items = items_of(&renderer);

  let mut depth = 0_i32;
  let mut max_depth = 0;
  for item in &items {
    match item {
      DisplayItem::PushClip(_) => {
        depth += 1;
        max_depth = max_depth.max(depth);
      }
      DisplayItem::PopClip => depth -= 1,
      _ => {}
    }
    assert!(depth >= 0);
  }
  assert_eq!(depth, 0);
  assert_eq!(max_depth, 2, "nested scroll containers nest their clips");
}

#[test]
fn scrolled_content_is_translated() {
  let mut doc = Document::new();
  let root = doc.root();
  let body = element(&mut doc, root, "body");
  let scroller = element(&mut doc, body, "div");
  doc.set_attribute(scroller, "style", "overflow: auto; height: 50px");
  for _ in 0..8 {
    let p = element(&mut doc, scroller, "p");
    text(&mut doc, p, "row");
  }

  let mut renderer = setup(doc, RESET_CSS, 800.0, 600.0);
  renderer.wheel(5.0, 25.0, 1.0);

  let items = items_of(&renderer);
  let translate = items.iter().find_map(|i| match i {
    DisplayItem::PushTranslate { dx, dy } => Some((*dx, *dy)),
    _ => None,
  });
  let (dx, dy) = translate.expect("scroll translation");
  assert_eq!(dx, 0.0);
  assert!(dy < 0.0, "content translates up by the scroll offset");
  assert!(items.iter().any(|i| matches!(i, DisplayItem::PopTranslate)));
}

#[test]
fn selection_paints_highlight_then_recolored_glyphs() {
  let mut doc = Document::new();
  let root = doc.root();
  let body = element(&mut doc, root, "body");
  let p = element(&mut doc, body, "p");
  let t = text(&mut doc, p, "hello world");

  let mut renderer = setup(doc, RESET_CSS, 800.0, 600.0);
  let (from, to) = {
    let tree = renderer.tree().unwrap();
    let b = box_for(tree, t);
    (click_at(tree, b, 0, 0), click_at(tree, b, 0, 5))
  };
  renderer.pointer_down(from.0, from.1, PointerButton::Left, 1, Modifiers::NONE);
  renderer.pointer_move(to.0, to.1);
  renderer.pointer_up();

  let items = items_of(&renderer);

  // Highlight rect 5 chars wide
  let highlight = items
    .iter()
    .find_map(|i| match i {
      DisplayItem::FillRect(r) if r.color.b > 0.8 && r.color.r < 0.4 => Some(r.clone()),
      _ => None,
    })
    .expect("selection highlight");
  assert!((highlight.rect.width() - 40.0).abs() < 0.01);

  // Full text first, then the selected substring in the highlight color
  let text_items: Vec<_> = items
    .iter()
    .filter_map(|i| match i {
      DisplayItem::Text(t) => Some(t.clone()),
      _ => None,
    })
    .collect();
  assert_eq!(text_items.len(), 2);
  assert_eq!(text_items[0].text, "hello world");
  assert_eq!(text_items[1].text, "hello");
  assert!(text_items[1].color.r > 0.9 && text_items[1].color.g > 0.9);
}

#[test]
fn offscreen_leaves_are_culled() {
  let mut doc = Document::new();
  let root = doc.root();
  let body = element(&mut doc, root, "body");
  let visible = element(&mut doc, body, "p");
  text(&mut doc, visible, "visible");
  let spacer = element(&mut doc, body, "div");
  doc.set_attribute(spacer, "style", "height: 5000px");
  let far = element(&mut doc, body, "p");
  text(&mut doc, far, "far below");

  let renderer = setup(doc, RESET_CSS, 800.0, 600.0);
  let items = items_of(&renderer);

  assert!(items
    .iter()
    .any(|i| matches!(i, DisplayItem::Text(t) if t.text == "visible")));
  assert!(!items
    .iter()
    .any(|i| matches!(i, DisplayItem::Text(t) if t.text == "far below")));
}

#[test]
fn underline_emits_a_line_command() {
  let mut doc = Document::new();
  let root = doc.root();
  let body = element(&mut doc, root, "body");
  let p = element(&mut doc, body, "p");
  doc.set_attribute(p, "style", "text-decoration: underline");
  text(&mut doc, p, "link");

  let renderer = setup(doc, RESET_CSS, 800.0, 600.0);
  let items = items_of(&renderer);

  let line = items.iter().find_map(|i| match i {
    DisplayItem::Line(l) => Some(l.clone()),
    _ => None,
  });
  let line = line.expect("underline");
  assert_eq!(line.y1, line.y2);
  assert!((line.x2 - line.x1 - 32.0).abs() < 0.01, "4 chars wide");
}

#[test]
fn list_markers_paint_for_list_items() {
  let mut doc = Document::new();
  let root = doc.root();
  let body = element(&mut doc, root, "body");
  let ol = element(&mut doc, body, "ol");
  let li1 = element(&mut doc, ol, "li");
  text(&mut doc, li1, "first");
  let li2 = element(&mut doc, ol, "li");
  text(&mut doc, li2, "second");

  let renderer = setup(doc, "", 800.0, 600.0);
  let items = items_of(&renderer);

  assert!(items
    .iter()
    .any(|i| matches!(i, DisplayItem::Text(t) if t.text == "1.")));
  assert!(items
    .iter()
    .any(|i| matches!(i, DisplayItem::Text(t) if t.text == "2.")));
}

#[test]
fn viewport_scroll_wraps_the_frame_in_a_translation() {
  let mut doc = Document::new();
  let root = doc.root();
  let body = element(&mut doc, root, "body");
  let tall = element(&mut doc, body, "div");
  doc.set_attribute(tall, "style", "height: 2000px");

  let mut renderer = setup(doc, RESET_CSS, 800.0, 600.0);
  renderer.wheel(10.0, 10.0, 3.0);

  let items = items_of(&renderer);
  assert!(matches!(
    items.first(),
    Some(DisplayItem::PushTranslate { dy, .. }) if *dy == -120.0
  ));
  assert!(matches!(items.last(), Some(DisplayItem::PopTranslate)));
}
