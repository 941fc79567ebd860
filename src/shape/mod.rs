//! Unicode-aware text shaping: cmap mapping, script-specific preprocessing,
//! GSUB substitution and GPOS positioning over a mutable glyph buffer.

pub mod apply;
mod arabic;
pub mod buffer;
mod indic;
mod shaper;

pub use buffer::{ShapedGlyph, ShapingBuffer};
pub use shaper::{shape, Run};
