//! microrender: a small standalone HTML/CSS rendering core
//!
//! The pipeline turns an externally-parsed DOM plus CSS text into a painted,
//! interactive surface with text selection: style resolution, layout (block,
//! inline with word-level line breaking, flex, table), a document-order
//! selection model, and a backend-agnostic display list.
//!
//! The HTML tokenizer, drawing backend, window/event source and font atlas
//! are external collaborators behind the interfaces in [`dom`], [`paint`],
//! [`input`] and [`text`].

pub mod css;
pub mod dom;
pub mod error;
pub mod geometry;
pub mod input;
pub mod layout;
pub mod paint;
pub mod renderer;
pub mod scroll;
pub mod selection;
pub mod style;
pub mod text;
pub mod tree;

pub use css::{CssUnit, CssValue, Rgba};
pub use dom::{Document, NodeData, NodeId};
pub use error::{Error, Result};
pub use geometry::{EdgeOffsets, Point, Rect, Size};
pub use paint::{DisplayItem, DisplayList};
pub use renderer::Renderer;
pub use style::{ComputedStyle, StyleEngine};
pub use text::{FixedFontProvider, FontHandle, FontProvider};
pub use tree::{BoxId, RenderTree};
