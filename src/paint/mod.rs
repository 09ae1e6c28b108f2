//! Painting
//!
//! The painter walks the laid-out tree and produces a backend-agnostic
//! [`DisplayList`]; a drawing backend executes it in order.

pub mod display_list;
pub mod painter;

pub use display_list::{DisplayItem, DisplayList, FillRectItem, FillRoundedRectItem, LineItem, StrokeRectItem, TextItem};
pub use painter::Painter;
