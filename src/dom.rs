//! DOM tree
//!
//! The document is an arena: nodes live in a single `Vec` and refer to each
//! other by [`NodeId`]. Children are owned (each id appears in exactly one
//! `children` list); the parent link is a plain index, so dropping the
//! document drops the whole tree without reference cycles.
//!
//! Nodes are produced by an external HTML parser. The contract: tag and
//! attribute names arrive ASCII lower-cased, attribute values entity-decoded,
//! and text content whitespace-collapsed per [`collapse_whitespace`].

/// Index of a node within its [`Document`] arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

/// The three node shapes
#[derive(Debug, Clone)]
pub enum NodeData {
  /// The document root; has children only
  Document,

  /// An element with a lower-cased tag name and ordered attributes
  Element {
    tag: String,
    attributes: Vec<(String, String)>,
  },

  /// A text run (UTF-8, whitespace-collapsed by the parser)
  Text { content: String },
}

/// A single DOM node
#[derive(Debug, Clone)]
pub struct Node {
  pub data: NodeData,
  pub parent: Option<NodeId>,
  pub children: Vec<NodeId>,
}

/// An arena-backed document tree
#[derive(Debug, Clone, Default)]
pub struct Document {
  nodes: Vec<Node>,
}

impl Document {
  /// Creates a document containing only the root node
  pub fn new() -> Self {
    Self {
      nodes: vec![Node {
        data: NodeData::Document,
        parent: None,
        children: Vec::new(),
      }],
    }
  }

  /// The document root
  pub fn root(&self) -> NodeId {
    NodeId(0)
  }

  pub fn len(&self) -> usize {
    self.nodes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.nodes.is_empty()
  }

  pub fn node(&self, id: NodeId) -> &Node {
    &self.nodes[id.0]
  }

  pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
    &mut self.nodes[id.0]
  }

  /// Creates a detached element node. Tag names are ASCII lower-cased.
  pub fn create_element(&mut self, tag: &str) -> NodeId {
    self.push(NodeData::Element {
      tag: tag.to_ascii_lowercase(),
      attributes: Vec::new(),
    })
  }

  /// Creates a detached text node
  pub fn create_text(&mut self, content: &str) -> NodeId {
    self.push(NodeData::Text {
      content: content.to_string(),
    })
  }

  fn push(&mut self, data: NodeData) -> NodeId {
    let id = NodeId(self.nodes.len());
    self.nodes.push(Node {
      data,
      parent: None,
      children: Vec::new(),
    });
    id
  }

  /// Appends `child` to `parent`'s child list and sets its parent link
  pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
    self.nodes[child.0].parent = Some(parent);
    self.nodes[parent.0].children.push(child);
  }

  /// Sets an attribute, replacing any existing value. Names are lower-cased.
  pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
    let name = name.to_ascii_lowercase();
    if let NodeData::Element { attributes, .. } = &mut self.nodes[id.0].data {
      if let Some(entry) = attributes.iter_mut().find(|(n, _)| *n == name) {
        entry.1 = value.to_string();
      } else {
        attributes.push((name, value.to_string()));
      }
    }
  }

  /// Element tag name, if `id` is an element
  pub fn tag_name(&self, id: NodeId) -> Option<&str> {
    match &self.nodes[id.0].data {
      NodeData::Element { tag, .. } => Some(tag.as_str()),
      _ => None,
    }
  }

  pub fn is_text(&self, id: NodeId) -> bool {
    matches!(self.nodes[id.0].data, NodeData::Text { .. })
  }

  pub fn is_element(&self, id: NodeId) -> bool {
    matches!(self.nodes[id.0].data, NodeData::Element { .. })
  }

  /// Text content, if `id` is a text node
  pub fn text_content(&self, id: NodeId) -> Option<&str> {
    match &self.nodes[id.0].data {
      NodeData::Text { content } => Some(content.as_str()),
      _ => None,
    }
  }

  /// Attribute value by (lower-cased) name
  pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
    match &self.nodes[id.0].data {
      NodeData::Element { attributes, .. } => attributes
        .iter()
        .find(|(n, _)| n == name)
        .map(|(_, v)| v.as_str()),
      _ => None,
    }
  }

  /// The `id` attribute, or an empty string
  pub fn id_attribute(&self, id: NodeId) -> &str {
    self.attribute(id, "id").unwrap_or("")
  }

  /// Classes from the space-split `class` attribute
  pub fn classes(&self, id: NodeId) -> impl Iterator<Item = &str> {
    self
      .attribute(id, "class")
      .unwrap_or("")
      .split_ascii_whitespace()
  }

  pub fn has_class(&self, id: NodeId, class: &str) -> bool {
    self.classes(id).any(|c| c == class)
  }

  pub fn parent(&self, id: NodeId) -> Option<NodeId> {
    self.nodes[id.0].parent
  }

  pub fn children(&self, id: NodeId) -> &[NodeId] {
    &self.nodes[id.0].children
  }

  /// Walks the parent chain from the immediate parent to the root
  pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
    Ancestors {
      document: self,
      next: self.nodes[id.0].parent,
    }
  }

  /// Returns true if `ancestor` appears in `id`'s parent chain
  pub fn is_descendant_of(&self, id: NodeId, ancestor: NodeId) -> bool {
    self.ancestors(id).any(|a| a == ancestor)
  }
}

/// Iterator over a node's ancestors, nearest first
pub struct Ancestors<'a> {
  document: &'a Document,
  next: Option<NodeId>,
}

impl<'a> Iterator for Ancestors<'a> {
  type Item = NodeId;

  fn next(&mut self) -> Option<NodeId> {
    let current = self.next?;
    self.next = self.document.node(current).parent;
    Some(current)
  }
}

/// Collapses HTML whitespace in raw text: runs of whitespace become a single
/// space. One boundary space is kept at each end unless the parent is a block
/// container (`in_block_parent`), in which case boundary whitespace is
/// dropped. Returns `None` when nothing but whitespace remains between block
/// parents.
pub fn collapse_whitespace(text: &str, in_block_parent: bool) -> Option<String> {
  let has_leading = text.starts_with(|c: char| c.is_whitespace());
  let has_trailing = text.ends_with(|c: char| c.is_whitespace());

  let mut collapsed = String::with_capacity(text.len());
  let mut last_was_space = false;
  for c in text.chars() {
    if c.is_whitespace() {
      if !last_was_space {
        collapsed.push(' ');
        last_was_space = true;
      }
    } else {
      collapsed.push(c);
      last_was_space = false;
    }
  }

  let trimmed = collapsed.trim();
  if trimmed.is_empty() {
    // Pure-whitespace runs: dropped between block parents, kept as a single
    // space in inline flow.
    return if in_block_parent {
      None
    } else {
      Some(" ".to_string())
    };
  }

  if in_block_parent {
    Some(trimmed.to_string())
  } else {
    let mut out = String::with_capacity(trimmed.len() + 2);
    if has_leading {
      out.push(' ');
    }
    out.push_str(trimmed);
    if has_trailing {
      out.push(' ');
    }
    Some(out)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn builds_tree_with_parent_links() {
    let mut doc = Document::new();
    let p = doc.create_element("P");
    let text = doc.create_text("hello");
    doc.append_child(doc.root(), p);
    doc.append_child(p, text);

    assert_eq!(doc.tag_name(p), Some("p"));
    assert_eq!(doc.parent(text), Some(p));
    assert_eq!(doc.children(doc.root()), &[p]);
    assert!(doc.is_descendant_of(text, doc.root()));
  }

  #[test]
  fn ancestors_walk_nearest_first() {
    let mut doc = Document::new();
    let div = doc.create_element("div");
    let p = doc.create_element("p");
    let text = doc.create_text("x");
    doc.append_child(doc.root(), div);
    doc.append_child(div, p);
    doc.append_child(p, text);

    let chain: Vec<NodeId> = doc.ancestors(text).collect();
    assert_eq!(chain, vec![p, div, doc.root()]);
  }

  #[test]
  fn class_list_splits_on_whitespace() {
    let mut doc = Document::new();
    let el = doc.create_element("div");
    doc.set_attribute(el, "class", "btn  primary large");
    assert!(doc.has_class(el, "primary"));
    assert!(!doc.has_class(el, "prim"));
    assert_eq!(doc.classes(el).count(), 3);
  }

  #[test]
  fn collapse_whitespace_in_block_parent() {
    assert_eq!(
      collapse_whitespace("  hello   world\n", true),
      Some("hello world".to_string())
    );
    assert_eq!(collapse_whitespace(" \n\t ", true), None);
  }

  #[test]
  fn collapse_whitespace_preserves_inline_boundaries() {
    assert_eq!(
      collapse_whitespace(" hello ", false),
      Some(" hello ".to_string())
    );
    assert_eq!(collapse_whitespace("   ", false), Some(" ".to_string()));
  }
}
