//! Selectors and specificity
//!
//! The selector model is deliberately small: a simple selector is an optional
//! tag (or `*`), an optional id, and a set of classes. A compound selector is
//! a whitespace-separated descendant chain of simple selectors; the child,
//! adjacent and general sibling combinators are accepted by the grammar but
//! matched as descendant.

use crate::dom::{Document, NodeId};

/// Specificity triple `(id count, class count, tag count)`, compared
/// lexicographically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Specificity(pub u32, pub u32, pub u32);

impl std::ops::Add for Specificity {
  type Output = Specificity;

  fn add(self, other: Specificity) -> Specificity {
    Specificity(self.0 + other.0, self.1 + other.1, self.2 + other.2)
  }
}

/// A simple selector: `tag`, `.class`, `#id`, or any combination like
/// `div.btn#main`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimpleSelector {
  /// Tag name; empty or `*` matches any element
  pub tag: String,
  /// Id without the leading `#`; empty means unconstrained
  pub id: String,
  /// Classes without the leading `.`
  pub classes: Vec<String>,
}

impl SimpleSelector {
  /// Parses by scanning for `.` and `#` delimiters
  pub fn parse(input: &str) -> SimpleSelector {
    let mut selector = SimpleSelector::default();
    let mut current = String::new();
    let mut mode = 't';

    for c in input.trim().chars().chain(std::iter::once('\0')) {
      if c == '.' || c == '#' || c == '\0' {
        if !current.is_empty() {
          match mode {
            't' => selector.tag = current.clone(),
            '.' => selector.classes.push(current.clone()),
            '#' => selector.id = current.clone(),
            _ => {}
          }
        }
        current.clear();
        mode = c;
      } else {
        current.push(c);
      }
    }

    selector
  }

  pub fn specificity(&self) -> Specificity {
    let ids = u32::from(!self.id.is_empty());
    let classes = self.classes.len() as u32;
    let tags = u32::from(!self.tag.is_empty() && self.tag != "*");
    Specificity(ids, classes, tags)
  }

  /// A simple selector matches an element iff its tag is absent/`*`/equal,
  /// its id is absent/equal, and every listed class is present.
  pub fn matches(&self, document: &Document, node: NodeId) -> bool {
    let Some(tag) = document.tag_name(node) else {
      return false;
    };

    if !self.tag.is_empty() && self.tag != "*" && self.tag != tag {
      return false;
    }
    if !self.id.is_empty() && self.id != document.id_attribute(node) {
      return false;
    }
    self.classes.iter().all(|c| document.has_class(node, c))
  }
}

/// An ordered descendant chain, outer-to-inner; the last part is the target
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompoundSelector {
  pub parts: Vec<SimpleSelector>,
}

impl CompoundSelector {
  /// Splits on whitespace; `>`, `+` and `~` tokens are dropped (descendant
  /// matching only in this core).
  pub fn parse(input: &str) -> CompoundSelector {
    let parts = input
      .split_whitespace()
      .filter(|part| !matches!(*part, ">" | "+" | "~"))
      .map(SimpleSelector::parse)
      .collect();
    CompoundSelector { parts }
  }

  pub fn specificity(&self) -> Specificity {
    self
      .parts
      .iter()
      .map(SimpleSelector::specificity)
      .fold(Specificity::default(), |acc, s| acc + s)
  }

  /// Matches iff the last part matches the target and each earlier part
  /// matches some ancestor, in outer-to-inner order.
  pub fn matches(&self, document: &Document, node: NodeId) -> bool {
    let Some(target) = self.parts.last() else {
      return false;
    };
    if !target.matches(document, node) {
      return false;
    }
    if self.parts.len() == 1 {
      return true;
    }

    // Walk ancestors from the inside out, consuming selector parts from the
    // inside out as they match.
    let mut part_idx = self.parts.len() - 1;
    for ancestor in document.ancestors(node) {
      if part_idx == 0 {
        break;
      }
      if self.parts[part_idx - 1].matches(document, ancestor) {
        part_idx -= 1;
      }
    }

    part_idx == 0
  }
}
