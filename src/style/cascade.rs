//! Style resolution
//!
//! [`StyleEngine`] owns the user-agent and author stylesheets and computes a
//! [`ComputedStyle`] for every node. Cascade order per node:
//!
//! 1. defaults (per-node-kind display),
//! 2. matching user-agent rules in source order,
//! 3. matching author rules sorted ascending by specificity (stable, so ties
//!    keep source order),
//! 4. the inline `style` attribute,
//! 5. runtime rules that static CSS cannot express (list item types and
//!    ordinals),
//!
//! followed by inheritance: text nodes copy the parent's typography
//! wholesale; elements inherit each typographic property the cascade did not
//! set explicitly.

use crate::css::parser::parse_declarations;
use crate::css::types::{Origin, StyleRule, StyleSheet};
use crate::dom::{Document, NodeId};
use crate::style::defaults::{initial_style, user_agent_stylesheet};
use crate::style::properties::apply_declaration;
use crate::style::ComputedStyle;
use tracing::trace;

/// Resolves styles for a document against a set of stylesheets
#[derive(Debug)]
pub struct StyleEngine {
  user_agent: StyleSheet,
  author: Vec<StyleSheet>,
}

impl Default for StyleEngine {
  fn default() -> Self {
    Self::new()
  }
}

impl StyleEngine {
  /// Creates an engine with the built-in user-agent stylesheet
  pub fn new() -> Self {
    Self {
      user_agent: user_agent_stylesheet(),
      author: Vec::new(),
    }
  }

  /// Replaces the user-agent stylesheet
  pub fn set_user_agent(&mut self, sheet: StyleSheet) {
    self.user_agent = sheet;
  }

  /// Appends an author stylesheet (from a `<style>` tag or external sheet)
  pub fn add_stylesheet(&mut self, sheet: StyleSheet) {
    self.author.push(sheet);
  }

  /// Drops all author stylesheets
  pub fn clear_stylesheets(&mut self) {
    self.author.clear();
  }

  /// Computes styles for the whole document in one pre-order pass.
  /// The result is indexed by `NodeId`; detached nodes keep defaults.
  pub fn compute_all(&self, document: &Document) -> Vec<ComputedStyle> {
    let mut styles = vec![ComputedStyle::default(); document.len()];
    self.compute_subtree(document, document.root(), None, &mut styles);
    styles
  }

  fn compute_subtree(
    &self,
    document: &Document,
    node: NodeId,
    parent: Option<&ComputedStyle>,
    styles: &mut Vec<ComputedStyle>,
  ) {
    let computed = self.compute_node(document, node, parent);
    styles[node.0] = computed;

    // The parent's style is cloned out so children can write into the same
    // vector.
    let parent_style = styles[node.0].clone();
    let children: Vec<NodeId> = document.children(node).to_vec();
    for child in children {
      self.compute_subtree(document, child, Some(&parent_style), styles);
    }
  }

  /// Computes the style of a single node given its parent's computed style
  pub fn compute_node(&self, document: &Document, node: NodeId, parent: Option<&ComputedStyle>) -> ComputedStyle {
    let mut style = initial_style(document, node);

    if document.is_element(node) {
      // 2. User-agent rules, source order
      for rule in &self.user_agent.rules {
        if rule.selector.matches(document, node) {
          apply_rule(rule, &mut style);
        }
      }

      // 3. Author rules, ascending specificity (stable sort keeps source
      // order across sheets for equal specificity)
      let mut matching: Vec<&StyleRule> = Vec::new();
      for sheet in &self.author {
        for rule in &sheet.rules {
          if rule.selector.matches(document, node) {
            matching.push(rule);
          }
        }
      }
      matching.sort_by_key(|rule| rule.specificity());
      trace!(node = node.0, matched = matching.len(), "author rules matched");
      for rule in matching {
        apply_rule(rule, &mut style);
      }

      // 4. Inline style attribute
      if let Some(inline) = document.attribute(node, "style") {
        for declaration in parse_declarations(inline) {
          apply_declaration(&declaration.property, &declaration.value, &mut style);
        }
      }

      // 5. Runtime rules: list items take their marker from the parent list
      self.apply_runtime_rules(document, node, &mut style);
    }

    if let Some(parent) = parent {
      inherit(document, node, parent, &mut style);
    }

    style
  }

  fn apply_runtime_rules(&self, document: &Document, node: NodeId, style: &mut ComputedStyle) {
    if document.tag_name(node) != Some("li") {
      return;
    }
    let Some(parent) = document.parent(node) else {
      return;
    };

    match document.tag_name(parent) {
      Some("ul") => {
        style.list_style_type = crate::style::types::ListStyleType::Disc;
      }
      Some("ol") => {
        style.list_style_type = crate::style::types::ListStyleType::Decimal;
        // 1-based ordinal among element li siblings
        let mut index = 1;
        for &sibling in document.children(parent) {
          if sibling == node {
            break;
          }
          if document.tag_name(sibling) == Some("li") {
            index += 1;
          }
        }
        style.list_item_index = index;
      }
      _ => {}
    }
  }
}

fn apply_rule(rule: &StyleRule, style: &mut ComputedStyle) {
  debug_assert!(matches!(rule.origin, Origin::UserAgent | Origin::Author));
  for declaration in &rule.declarations {
    apply_declaration(&declaration.property, &declaration.value, style);
  }
}

/// Propagates inherited properties from the parent
fn inherit(document: &Document, node: NodeId, parent: &ComputedStyle, style: &mut ComputedStyle) {
  if document.is_text(node) {
    // Text nodes take the parent's typography wholesale
    style.color = parent.color;
    style.font_size = parent.font_size;
    style.font_weight = parent.font_weight;
    style.font_style = parent.font_style;
    style.font_family = parent.font_family.clone();
    style.text_decoration = parent.text_decoration;
    style.text_align = parent.text_align;
    style.line_height = parent.line_height;
    style.user_select = parent.user_select;
    return;
  }

  if !document.is_element(node) {
    return;
  }

  if !style.explicit.color {
    style.color = parent.color;
  }
  if !style.explicit.font_size {
    style.font_size = parent.font_size;
  }
  if !style.explicit.font_weight {
    style.font_weight = parent.font_weight;
  }
  if !style.explicit.font_style {
    style.font_style = parent.font_style;
  }
  if !style.explicit.font_family {
    style.font_family = parent.font_family.clone();
  }
  if !style.explicit.text_decoration {
    style.text_decoration = parent.text_decoration;
  }
  if !style.explicit.text_align {
    style.text_align = parent.text_align;
  }
  if !style.explicit.line_height {
    style.line_height = parent.line_height;
  }
  if !style.explicit.user_select {
    style.user_select = parent.user_select;
  }
}
