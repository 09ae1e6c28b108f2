//! Render tree
//!
//! The layout-engine mirror of the DOM: one [`RenderBox`] per node, arena
//! indexed by [`BoxId`]. No anonymous boxes are inserted; the tree shape
//! mirrors the DOM exactly.

pub mod box_tree;

pub use box_tree::{BoxId, BoxMetrics, LineBox, RenderBox, RenderTree, ScrollState};
