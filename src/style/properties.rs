//! Per-property declaration application
//!
//! Maps `property: value` pairs onto [`ComputedStyle`] fields. Unknown
//! properties and unparseable values are ignored; a bad declaration never
//! disturbs the fields it does not name.

use crate::css::color::Rgba;
use crate::css::parser::{parse_border_shorthand, parse_flex_shorthand, parse_four_value, parse_two_value};
use crate::css::values::CssValue;
use crate::style::types::{
  AlignItems, BoxSizing, Corners, Display, FlexDirection, FlexWrap, FontStyle, FontWeight, ImageRendering,
  JustifyContent, ListStyleType, ObjectFit, Overflow, Position, TextAlign, TextDecoration, UserSelect, VerticalAlign,
};
use crate::style::ComputedStyle;

/// Applies one declaration to `style`
pub fn apply_declaration(property: &str, value: &str, style: &mut ComputedStyle) {
  let v = value.trim();

  match property {
    // Padding
    "padding" => {
      let (t, r, b, l) = parse_four_value(v);
      style.padding.top = t;
      style.padding.right = r;
      style.padding.bottom = b;
      style.padding.left = l;
    }
    "padding-top" | "padding-block-start" => style.padding.top = CssValue::parse(v),
    "padding-right" | "padding-inline-end" => style.padding.right = CssValue::parse(v),
    "padding-bottom" | "padding-block-end" => style.padding.bottom = CssValue::parse(v),
    "padding-left" | "padding-inline-start" => style.padding.left = CssValue::parse(v),
    "padding-block" => {
      let (top, bottom) = parse_two_value(v);
      style.padding.top = top;
      style.padding.bottom = bottom;
    }
    "padding-inline" => {
      let (left, right) = parse_two_value(v);
      style.padding.left = left;
      style.padding.right = right;
    }

    // Margin
    "margin" => {
      let (t, r, b, l) = parse_four_value(v);
      style.margin.top = t;
      style.margin.right = r;
      style.margin.bottom = b;
      style.margin.left = l;
    }
    "margin-top" | "margin-block-start" => style.margin.top = CssValue::parse(v),
    "margin-right" | "margin-inline-end" => style.margin.right = CssValue::parse(v),
    "margin-bottom" | "margin-block-end" => style.margin.bottom = CssValue::parse(v),
    "margin-left" | "margin-inline-start" => style.margin.left = CssValue::parse(v),
    "margin-block" => {
      let (top, bottom) = parse_two_value(v);
      style.margin.top = top;
      style.margin.bottom = bottom;
    }
    "margin-inline" => {
      let (left, right) = parse_two_value(v);
      style.margin.left = left;
      style.margin.right = right;
    }

    // Border widths
    "border-width" => {
      let (t, r, b, l) = parse_four_value(v);
      style.border_width.top = t;
      style.border_width.right = r;
      style.border_width.bottom = b;
      style.border_width.left = l;
    }
    "border-top-width" => style.border_width.top = CssValue::parse(v),
    "border-right-width" => style.border_width.right = CssValue::parse(v),
    "border-bottom-width" => style.border_width.bottom = CssValue::parse(v),
    "border-left-width" => style.border_width.left = CssValue::parse(v),

    // Border shorthands
    "border" => {
      let (width, color) = parse_border_shorthand(v);
      if let Some(w) = width {
        style.border_width.top = w;
        style.border_width.right = w;
        style.border_width.bottom = w;
        style.border_width.left = w;
      }
      if let Some(c) = color {
        style.border_top_color = c;
        style.border_right_color = c;
        style.border_bottom_color = c;
        style.border_left_color = c;
      }
    }
    "border-top" => {
      let (width, color) = parse_border_shorthand(v);
      if let Some(w) = width {
        style.border_width.top = w;
      }
      if let Some(c) = color {
        style.border_top_color = c;
      }
    }
    "border-right" => {
      let (width, color) = parse_border_shorthand(v);
      if let Some(w) = width {
        style.border_width.right = w;
      }
      if let Some(c) = color {
        style.border_right_color = c;
      }
    }
    "border-bottom" => {
      let (width, color) = parse_border_shorthand(v);
      if let Some(w) = width {
        style.border_width.bottom = w;
      }
      if let Some(c) = color {
        style.border_bottom_color = c;
      }
    }
    "border-left" => {
      let (width, color) = parse_border_shorthand(v);
      if let Some(w) = width {
        style.border_width.left = w;
      }
      if let Some(c) = color {
        style.border_left_color = c;
      }
    }

    // Border colors
    "border-color" => {
      if let Some(c) = Rgba::parse(v) {
        style.border_top_color = c;
        style.border_right_color = c;
        style.border_bottom_color = c;
        style.border_left_color = c;
      }
    }
    "border-top-color" => {
      if let Some(c) = Rgba::parse(v) {
        style.border_top_color = c;
      }
    }
    "border-right-color" => {
      if let Some(c) = Rgba::parse(v) {
        style.border_right_color = c;
      }
    }
    "border-bottom-color" => {
      if let Some(c) = Rgba::parse(v) {
        style.border_bottom_color = c;
      }
    }
    "border-left-color" => {
      if let Some(c) = Rgba::parse(v) {
        style.border_left_color = c;
      }
    }

    // Border radius
    "border-radius" => {
      let radius = resolve_simple(CssValue::parse(v), style.font_size).max(0.0);
      style.border_radius = Corners::uniform(radius);
    }
    "border-top-left-radius" => {
      style.border_radius.top_left = resolve_simple(CssValue::parse(v), style.font_size).max(0.0)
    }
    "border-top-right-radius" => {
      style.border_radius.top_right = resolve_simple(CssValue::parse(v), style.font_size).max(0.0)
    }
    "border-bottom-right-radius" => {
      style.border_radius.bottom_right = resolve_simple(CssValue::parse(v), style.font_size).max(0.0)
    }
    "border-bottom-left-radius" => {
      style.border_radius.bottom_left = resolve_simple(CssValue::parse(v), style.font_size).max(0.0)
    }

    // Dimensions
    "width" => style.width = CssValue::parse(v),
    "height" => style.height = CssValue::parse(v),
    "min-width" => style.min_width = CssValue::parse(v),
    "min-height" => style.min_height = CssValue::parse(v),
    "max-width" => style.max_width = CssValue::parse(v),
    "max-height" => style.max_height = CssValue::parse(v),

    // Colors
    "color" => {
      if let Some(c) = Rgba::parse(v) {
        style.color = c;
        style.explicit.color = true;
      }
    }
    "background-color" | "background" => {
      if let Some(c) = Rgba::parse(v) {
        style.background_color = c;
      }
    }

    // Typography
    "font-size" => {
      let px = CssValue::parse(v).to_px_simple(0.0, 16.0);
      if px >= 0.0 {
        style.font_size = px;
        style.explicit.font_size = true;
      }
    }
    "line-height" => {
      if v.ends_with("px") || v.ends_with("em") {
        let px = CssValue::parse(v).to_px_simple(0.0, style.font_size);
        if px >= 0.0 && style.font_size > 0.0 {
          style.line_height = px / style.font_size;
          style.explicit.line_height = true;
        }
      } else if let Ok(multiplier) = v.parse::<f32>() {
        style.line_height = multiplier;
        style.explicit.line_height = true;
      }
    }
    "font-weight" => {
      style.font_weight = match v {
        "bold" | "bolder" | "600" | "700" | "800" | "900" => FontWeight::Bold,
        _ => FontWeight::Normal,
      };
      style.explicit.font_weight = true;
    }
    "font-style" => {
      style.font_style = match v {
        "italic" => FontStyle::Italic,
        "oblique" => FontStyle::Oblique,
        _ => FontStyle::Normal,
      };
      style.explicit.font_style = true;
    }
    "text-decoration" => {
      style.text_decoration = match v {
        "underline" => TextDecoration::Underline,
        "overline" => TextDecoration::Overline,
        "line-through" => TextDecoration::LineThrough,
        _ => TextDecoration::None,
      };
      style.explicit.text_decoration = true;
    }
    "text-align" => {
      style.text_align = match v {
        "center" => TextAlign::Center,
        "right" => TextAlign::Right,
        "justify" => TextAlign::Justify,
        _ => TextAlign::Left,
      };
      style.explicit.text_align = true;
    }
    "font-family" => {
      style.font_family = v
        .split(',')
        .map(|f| f.trim().trim_matches('"').trim_matches('\'').to_string())
        .filter(|f| !f.is_empty())
        .collect();
      if style.font_family.is_empty() {
        style.font_family.push("serif".to_string());
      }
      style.explicit.font_family = true;
      // Monospace quirk: defaults to 13px unless font-size was set
      if !style.explicit.font_size && style.font_family.iter().any(|f| f == "monospace") {
        style.font_size = 13.0;
      }
    }
    "vertical-align" => {
      style.vertical_align = match v {
        "top" => VerticalAlign::Top,
        "middle" => VerticalAlign::Middle,
        "bottom" => VerticalAlign::Bottom,
        "text-top" => VerticalAlign::TextTop,
        "text-bottom" => VerticalAlign::TextBottom,
        "sub" => VerticalAlign::Sub,
        "super" => VerticalAlign::Super,
        _ => VerticalAlign::Baseline,
      };
    }

    // Layout kinds
    "display" => {
      style.display = match v {
        "block" => Display::Block,
        "inline" => Display::Inline,
        "inline-block" => Display::InlineBlock,
        "flex" => Display::Flex,
        "table" => Display::Table,
        "table-row-group" | "table-header-group" | "table-footer-group" => Display::TableRowGroup,
        "table-row" => Display::TableRow,
        "table-cell" => Display::TableCell,
        "none" => Display::None,
        _ => return,
      };
    }
    "position" => {
      style.position = match v {
        "relative" => Position::Relative,
        "absolute" => Position::Absolute,
        "fixed" => Position::Fixed,
        "sticky" => Position::Sticky,
        _ => Position::Static,
      };
    }
    "box-sizing" => {
      style.box_sizing = if v == "border-box" {
        BoxSizing::BorderBox
      } else {
        BoxSizing::ContentBox
      };
    }
    "overflow" | "overflow-y" => {
      style.overflow = match v {
        "hidden" => Overflow::Hidden,
        "scroll" => Overflow::Scroll,
        "auto" => Overflow::Auto,
        _ => Overflow::Visible,
      };
    }

    // Visual
    "opacity" => {
      if let Ok(o) = v.parse::<f32>() {
        style.opacity = o.clamp(0.0, 1.0);
      }
    }

    // Flexbox
    "flex-direction" => {
      style.flex_direction = match v {
        "row-reverse" => FlexDirection::RowReverse,
        "column" => FlexDirection::Column,
        "column-reverse" => FlexDirection::ColumnReverse,
        _ => FlexDirection::Row,
      };
    }
    "flex-wrap" => {
      style.flex_wrap = match v {
        "wrap" => FlexWrap::Wrap,
        "wrap-reverse" => FlexWrap::WrapReverse,
        _ => FlexWrap::NoWrap,
      };
    }
    "justify-content" => {
      style.justify_content = match v {
        "center" => JustifyContent::Center,
        "flex-end" | "end" => JustifyContent::FlexEnd,
        "space-between" => JustifyContent::SpaceBetween,
        "space-around" => JustifyContent::SpaceAround,
        _ => JustifyContent::FlexStart,
      };
    }
    "align-items" => {
      style.align_items = match v {
        "flex-start" | "start" => AlignItems::FlexStart,
        "center" => AlignItems::Center,
        "flex-end" | "end" => AlignItems::FlexEnd,
        "baseline" => AlignItems::Baseline,
        _ => AlignItems::Stretch,
      };
    }
    "flex-grow" => {
      if let Ok(g) = v.parse::<f32>() {
        style.flex_grow = g;
      }
    }
    "flex-shrink" => {
      if let Ok(s) = v.parse::<f32>() {
        style.flex_shrink = s;
      }
    }
    "flex-basis" => style.flex_basis = CssValue::parse(v),
    "flex" => {
      let (grow, shrink, basis) = parse_flex_shorthand(v);
      style.flex_grow = grow;
      style.flex_shrink = shrink;
      style.flex_basis = basis;
    }
    "gap" => {
      let px = resolve_simple(CssValue::parse(v), style.font_size);
      if px >= 0.0 {
        style.gap = px;
      }
    }

    // Lists
    "list-style-type" | "list-style" => {
      style.list_style_type = match v {
        "disc" => ListStyleType::Disc,
        "circle" => ListStyleType::Circle,
        "square" => ListStyleType::Square,
        "decimal" => ListStyleType::Decimal,
        "none" => ListStyleType::None,
        _ => return,
      };
    }

    // Selection
    "user-select" | "-webkit-user-select" | "-moz-user-select" | "-ms-user-select" => {
      style.user_select = match v {
        "none" => UserSelect::None,
        "text" => UserSelect::Text,
        "all" => UserSelect::All,
        "auto" => UserSelect::Auto,
        _ => return,
      };
      style.explicit.user_select = true;
    }

    // Replaced content
    "object-fit" => {
      style.object_fit = match v {
        "contain" => ObjectFit::Contain,
        "cover" => ObjectFit::Cover,
        "none" => ObjectFit::None,
        "scale-down" => ObjectFit::ScaleDown,
        "fill" => ObjectFit::Fill,
        _ => return,
      };
    }
    "object-position" => {
      let parts = crate::css::parser::split_values(v);
      if !parts.is_empty() {
        let x = CssValue::parse(parts[0]);
        let y = if parts.len() > 1 { CssValue::parse(parts[1]) } else { x };
        style.object_position = (x, y);
      }
    }
    "image-rendering" => {
      style.image_rendering = match v {
        "pixelated" => ImageRendering::Pixelated,
        "crisp-edges" | "-webkit-optimize-contrast" => ImageRendering::CrispEdges,
        "auto" => ImageRendering::Auto,
        _ => return,
      };
    }

    _ => {}
  }
}

/// Resolution for properties that only depend on font size
fn resolve_simple(value: CssValue, font_size: f32) -> f32 {
  value.to_px_simple(0.0, font_size)
}
