//! User-agent defaults
//!
//! Step 1 of the cascade starts every element at `display: block` (text
//! nodes at `inline`); the embedded user-agent stylesheet then refines
//! display kinds and the conventional HTML chrome before author rules apply.

use crate::css::parser::parse_stylesheet;
use crate::css::types::{Origin, StyleSheet};
use crate::dom::{Document, NodeId};
use crate::style::types::Display;
use crate::style::ComputedStyle;

/// The embedded user-agent stylesheet, limited to properties this core
/// understands.
pub const USER_AGENT_CSS: &str = r#"
body { margin: 8px; }

h1 { font-size: 32px; font-weight: bold; margin: 21px 0; }
h2 { font-size: 24px; font-weight: bold; margin: 20px 0; }
h3 { font-size: 19px; font-weight: bold; margin: 18px 0; }
h4 { font-size: 16px; font-weight: bold; margin: 21px 0; }
h5 { font-size: 13px; font-weight: bold; margin: 22px 0; }
h6 { font-size: 11px; font-weight: bold; margin: 24px 0; }

p { margin: 16px 0; }
ul, ol { margin: 16px 0; padding-left: 40px; }
blockquote { margin: 16px 40px; }
pre { font-family: monospace; margin: 16px 0; }
hr { margin: 8px 0; border-width: 1px; border-color: gray; }
center { text-align: center; }

span, a, em, strong, code, b, i, u, s, small, sub, sup, mark, abbr,
cite, q, kbd, samp, var, time, label, strike, del, ins, tt, br,
img, input, select, textarea, button { display: inline; }
img, input, select, textarea, button { display: inline-block; }

a { color: #0000ee; text-decoration: underline; }
em, i, cite, var { font-style: italic; }
strong, b, th { font-weight: bold; }
code, kbd, samp, tt { font-family: monospace; }
small { font-size: 13px; }
sub { vertical-align: sub; font-size: 13px; }
sup { vertical-align: super; font-size: 13px; }
u, ins { text-decoration: underline; }
s, strike, del { text-decoration: line-through; }

table { display: table; }
thead, tbody, tfoot { display: table-row-group; }
tr { display: table-row; }
td, th { display: table-cell; padding: 2px; }
th { text-align: center; }

input, textarea, select { border-width: 1px; border-color: gray; padding: 2px 4px; }
button { border-width: 1px; border-color: gray; background-color: lightgray; padding: 2px 8px; text-align: center; }

head, style, script, meta, link, title, template, noscript { display: none; }
"#;

/// Parses the embedded user-agent stylesheet
pub fn user_agent_stylesheet() -> StyleSheet {
  parse_stylesheet(USER_AGENT_CSS, Origin::UserAgent)
}

/// The pre-cascade style for a node: defaults plus the per-node-kind display
pub fn initial_style(document: &Document, node: NodeId) -> ComputedStyle {
  let mut style = ComputedStyle::default();
  style.display = if document.is_text(node) {
    Display::Inline
  } else {
    Display::Block
  };
  style
}
