//! CSS parsing
//!
//! Parses stylesheets and declaration blocks on top of the `cssparser`
//! tokenizer. The parser recovers from malformed input: bad declarations are
//! skipped to the next `;`, bad rules to the next block, and at-rules are
//! skipped wholesale. Errors are collected, never fatal.
//!
//! Selector preludes and declaration values are recovered as raw source
//! slices (the rule model keeps values as strings), with comments stripped.

use crate::css::color::Rgba;
use crate::css::selectors::CompoundSelector;
use crate::css::types::{CssParseError, CssParseResult, Declaration, Origin, StyleRule, StyleSheet};
use crate::css::values::{CssUnit, CssValue};
use cssparser::{Delimiter, ParseError, Parser, ParserInput, Token};
use tracing::debug;

// ============================================================================
// Stylesheet parsing
// ============================================================================

/// Parses a CSS stylesheet, silently dropping anything malformed
pub fn parse_stylesheet(css: &str, origin: Origin) -> StyleSheet {
  parse_stylesheet_with_errors(css, origin).stylesheet
}

/// Parses a CSS stylesheet and collects recoverable parse diagnostics
pub fn parse_stylesheet_with_errors(css: &str, origin: Origin) -> CssParseResult {
  let mut input = ParserInput::new(css);
  let mut parser = Parser::new(&mut input);
  let mut rules = Vec::new();
  let mut errors = Vec::new();

  while !parser.is_exhausted() {
    parser.skip_whitespace();
    if parser.is_exhausted() {
      break;
    }

    match parse_rule(&mut parser, origin) {
      Ok(mut parsed) => rules.append(&mut parsed),
      Err(e) => {
        errors.push(CssParseError {
          message: format!("{:?}", e.kind),
          line: e.location.line,
          column: e.location.column,
        });
        recover_from_error(&mut parser);
      }
    }
  }

  debug!(
    rule_count = rules.len(),
    error_count = errors.len(),
    "parsed stylesheet"
  );

  CssParseResult {
    stylesheet: StyleSheet { rules },
    errors,
  }
}

/// Parses one rule. Selector lists expand to one rule per selector; at-rules
/// are consumed and yield nothing.
fn parse_rule<'i>(parser: &mut Parser<'i, '_>, origin: Origin) -> Result<Vec<StyleRule>, ParseError<'i, ()>> {
  parser.skip_whitespace();

  let mut selectors: Vec<String> = Vec::new();
  let mut at_rule = false;
  let mut span_start = parser.position();

  loop {
    let before = parser.position();
    let token = match parser.next() {
      Ok(t) => t.clone(),
      Err(e) => return Err(e.into()),
    };

    match token {
      Token::CurlyBracketBlock => {
        if !at_rule {
          let text = strip_comments(parser.slice(span_start..before));
          let text = text.trim();
          if !text.is_empty() {
            selectors.push(text.to_string());
          }
        }
        let declarations = parse_block_declarations(parser)?;
        if at_rule {
          return Ok(Vec::new());
        }

        let mut rules = Vec::with_capacity(selectors.len());
        for selector_text in selectors {
          let selector = CompoundSelector::parse(&selector_text);
          if selector.parts.is_empty() {
            continue;
          }
          rules.push(StyleRule {
            selector_text,
            selector,
            declarations: declarations.clone(),
            origin,
          });
        }
        return Ok(rules);
      }
      Token::Comma if !at_rule => {
        let text = strip_comments(parser.slice(span_start..before));
        let text = text.trim();
        if !text.is_empty() {
          selectors.push(text.to_string());
        }
        span_start = parser.position();
      }
      Token::AtKeyword(_) => {
        at_rule = true;
      }
      Token::Semicolon => {
        if at_rule {
          // Block-less at-rule such as @import
          return Ok(Vec::new());
        }
        span_start = parser.position();
      }
      _ => {}
    }
  }
}

fn parse_block_declarations<'i>(parser: &mut Parser<'i, '_>) -> Result<Vec<Declaration>, ParseError<'i, ()>> {
  parser.parse_nested_block(|p| Ok(parse_declaration_list(p)))
}

/// Skips to the end of the next block so parsing can resume
fn recover_from_error(parser: &mut Parser) {
  while !parser.is_exhausted() {
    let token = match parser.next() {
      Ok(t) => t.clone(),
      Err(_) => return,
    };
    if matches!(token, Token::CurlyBracketBlock) {
      let _: Result<(), ParseError<()>> = parser.parse_nested_block(|_| Ok(()));
      return;
    }
  }
}

// ============================================================================
// Declaration parsing
// ============================================================================

/// Parses a bare declaration block, as found in a `style=""` attribute
pub fn parse_declarations(css: &str) -> Vec<Declaration> {
  let mut input = ParserInput::new(css);
  let mut parser = Parser::new(&mut input);
  parse_declaration_list(&mut parser)
}

/// Parses `property: value;` pairs until the parser is exhausted. Bad
/// declarations are skipped to the next semicolon.
fn parse_declaration_list(parser: &mut Parser) -> Vec<Declaration> {
  let mut declarations = Vec::new();

  loop {
    parser.skip_whitespace();
    if parser.is_exhausted() {
      break;
    }

    let _: Result<(), ParseError<()>> = parser.parse_until_after(Delimiter::Semicolon, |p| {
      let property = p.expect_ident_cloned()?.to_ascii_lowercase();
      p.expect_colon()?;
      p.skip_whitespace();

      let value_start = p.position();
      while p.next().is_ok() {}
      let raw = strip_comments(p.slice_from(value_start));
      let value = raw.trim().trim_end_matches("!important").trim();

      if !property.is_empty() && !value.is_empty() {
        declarations.push(Declaration {
          property,
          value: value.to_string(),
        });
      }
      Ok(())
    });
  }

  declarations
}

/// Removes `/* ... */` comments from a raw source slice (nesting not
/// supported; an unterminated comment runs to the end)
fn strip_comments(source: &str) -> String {
  let mut out = String::with_capacity(source.len());
  let mut rest = source;
  while let Some(start) = rest.find("/*") {
    out.push_str(&rest[..start]);
    match rest[start + 2..].find("*/") {
      Some(end) => rest = &rest[start + 2 + end + 2..],
      None => return out,
    }
  }
  out.push_str(rest);
  out
}

// ============================================================================
// Shorthand expansion
// ============================================================================

/// Splits a value on whitespace
pub fn split_values(value: &str) -> Vec<&str> {
  value.split_whitespace().collect()
}

/// 2-value shorthand: one value duplicates to both
pub fn parse_two_value(value: &str) -> (CssValue, CssValue) {
  let parts = split_values(value);
  match parts.len() {
    0 => (CssValue::default(), CssValue::default()),
    1 => {
      let v = CssValue::parse(parts[0]);
      (v, v)
    }
    _ => (CssValue::parse(parts[0]), CssValue::parse(parts[1])),
  }
}

/// 4-value shorthand distribution for margin/padding/border-width.
/// Returns (top, right, bottom, left).
pub fn parse_four_value(value: &str) -> (CssValue, CssValue, CssValue, CssValue) {
  let parts = split_values(value);
  match parts.len() {
    0 => Default::default(),
    1 => {
      let v = CssValue::parse(parts[0]);
      (v, v, v, v)
    }
    2 => {
      let tb = CssValue::parse(parts[0]);
      let rl = CssValue::parse(parts[1]);
      (tb, rl, tb, rl)
    }
    3 => {
      let t = CssValue::parse(parts[0]);
      let rl = CssValue::parse(parts[1]);
      let b = CssValue::parse(parts[2]);
      (t, rl, b, rl)
    }
    _ => (
      CssValue::parse(parts[0]),
      CssValue::parse(parts[1]),
      CssValue::parse(parts[2]),
      CssValue::parse(parts[3]),
    ),
  }
}

/// `border` / `border-<side>` shorthand: whitespace tokens where a positive
/// px value sets the width and a parseable color sets the color. Style
/// keywords are ignored.
pub fn parse_border_shorthand(value: &str) -> (Option<CssValue>, Option<Rgba>) {
  let mut width = None;
  let mut color = None;
  for token in split_values(value) {
    let v = CssValue::parse(token);
    if v.value > 0.0 && v.unit == CssUnit::Px {
      width = Some(v);
    }
    if let Some(c) = Rgba::parse(token) {
      color = Some(c);
    }
  }
  (width, color)
}

/// `flex` shorthand: returns (grow, shrink, basis)
pub fn parse_flex_shorthand(value: &str) -> (f32, f32, CssValue) {
  let value = value.trim();
  if value.eq_ignore_ascii_case("auto") {
    return (1.0, 1.0, CssValue::AUTO);
  }
  if value.eq_ignore_ascii_case("none") {
    return (0.0, 0.0, CssValue::AUTO);
  }

  let mut grow = 0.0;
  let mut shrink = 1.0;
  let mut basis = CssValue::AUTO;
  let mut numeric_count = 0;

  for (i, token) in split_values(value).iter().take(3).enumerate() {
    match (i, token.parse::<f32>()) {
      (0, Ok(v)) => {
        grow = v;
        numeric_count += 1;
      }
      (1, Ok(v)) => {
        shrink = v;
        numeric_count += 1;
      }
      (2, _) => {
        basis = CssValue::parse(token);
      }
      (0, Err(_)) => {
        // A lone non-numeric token is a flex-basis
        basis = CssValue::parse(token);
        return (grow, shrink, basis);
      }
      _ => {}
    }
  }

  // `flex: 1` style single numbers imply shrink 1 and a zero-percent basis
  if numeric_count == 1 && grow > 0.0 {
    shrink = 1.0;
    basis = CssValue::percent(0.0);
  }

  (grow, shrink, basis)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_rules_and_declarations() {
    let sheet = parse_stylesheet("p { color: red; margin: 4px; }", Origin::Author);
    assert_eq!(sheet.rules.len(), 1);
    let rule = &sheet.rules[0];
    assert_eq!(rule.selector_text, "p");
    assert_eq!(rule.declarations.len(), 2);
    assert_eq!(rule.declarations[0].property, "color");
    assert_eq!(rule.declarations[0].value, "red");
  }

  #[test]
  fn expands_selector_lists() {
    let sheet = parse_stylesheet("h1, h2, .big { font-size: 24px; }", Origin::Author);
    assert_eq!(sheet.rules.len(), 3);
    assert_eq!(sheet.rules[2].selector_text, ".big");
    assert_eq!(sheet.rules[2].declarations.len(), 1);
  }

  #[test]
  fn strips_comments_everywhere() {
    let sheet = parse_stylesheet(
      "/* lead */ p /* mid */ { color: /* noise */ blue; }",
      Origin::Author,
    );
    assert_eq!(sheet.rules.len(), 1);
    assert_eq!(sheet.rules[0].selector_text, "p");
    assert_eq!(sheet.rules[0].declarations[0].value, "blue");
  }

  #[test]
  fn skips_bad_declarations_silently() {
    let decls = parse_declarations("color: red; 12monkeys; margin: 4px");
    assert_eq!(decls.len(), 2);
    assert_eq!(decls[1].property, "margin");
  }

  #[test]
  fn skips_at_rules() {
    let sheet = parse_stylesheet(
      "@import url(x.css); @media screen { p { color: red; } } span { color: blue; }",
      Origin::Author,
    );
    assert_eq!(sheet.rules.len(), 1);
    assert_eq!(sheet.rules[0].selector_text, "span");
  }

  #[test]
  fn collects_errors_without_dropping_valid_rules() {
    let result = parse_stylesheet_with_errors("p { color: red; } } span { color: blue; }", Origin::Author);
    assert!(result.stylesheet.rules.len() >= 1);
  }

  #[test]
  fn lowercases_property_names() {
    let decls = parse_declarations("COLOR: red");
    assert_eq!(decls[0].property, "color");
  }

  #[test]
  fn preserves_function_values() {
    let decls = parse_declarations("color: rgb(1, 2, 3); background-color: hsl(120, 50%, 50%)");
    assert_eq!(decls[0].value, "rgb(1, 2, 3)");
    assert_eq!(decls[1].value, "hsl(120, 50%, 50%)");
  }

  #[test]
  fn four_value_distribution() {
    let (t, r, b, l) = parse_four_value("1px");
    assert_eq!((t, r, b, l), (CssValue::px(1.0), CssValue::px(1.0), CssValue::px(1.0), CssValue::px(1.0)));

    let (t, r, b, l) = parse_four_value("1px 2px");
    assert_eq!((t, b), (CssValue::px(1.0), CssValue::px(1.0)));
    assert_eq!((r, l), (CssValue::px(2.0), CssValue::px(2.0)));

    let (t, r, b, l) = parse_four_value("1px 2px 3px");
    assert_eq!(t, CssValue::px(1.0));
    assert_eq!(r, CssValue::px(2.0));
    assert_eq!(l, CssValue::px(2.0));
    assert_eq!(b, CssValue::px(3.0));

    let (t, r, b, l) = parse_four_value("1px 2px 3px 4px");
    assert_eq!(
      (t, r, b, l),
      (CssValue::px(1.0), CssValue::px(2.0), CssValue::px(3.0), CssValue::px(4.0))
    );
  }

  #[test]
  fn border_shorthand_picks_width_and_color() {
    let (width, color) = parse_border_shorthand("1px solid red");
    assert_eq!(width, Some(CssValue::px(1.0)));
    assert_eq!(color, Some(Rgba::opaque(1.0, 0.0, 0.0)));

    let (width, color) = parse_border_shorthand("solid");
    assert_eq!(width, None);
    assert_eq!(color, None);
  }

  #[test]
  fn flex_shorthand_forms() {
    assert_eq!(parse_flex_shorthand("auto"), (1.0, 1.0, CssValue::AUTO));
    assert_eq!(parse_flex_shorthand("none"), (0.0, 0.0, CssValue::AUTO));
    assert_eq!(parse_flex_shorthand("2"), (2.0, 1.0, CssValue::percent(0.0)));
    let (g, s, b) = parse_flex_shorthand("2 3 10px");
    assert_eq!((g, s), (2.0, 3.0));
    assert_eq!(b, CssValue::px(10.0));
  }
}
