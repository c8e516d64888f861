//! Text layout system
//!
//! Font description, word wrapping, glyph layout and vertex buffer
//! generation for bitmap/MSDF atlas text.

pub mod font;
pub mod word_wrap;
pub mod text_layout;
pub mod vertices;
pub mod geometry;

#[cfg(test)]
pub(crate) mod test_font;

pub use font::*;
pub use word_wrap::*;
pub use text_layout::*;
pub use vertices::*;
pub use geometry::*;
