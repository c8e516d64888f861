//! # MSDF Text
//!
//! Text layout and vertex generation for bitmap and MSDF font atlases.
//!
//! ## Features
//!
//! - **Font Descriptors**: BMFont-style JSON glyph metrics with kerning
//! - **Word Wrapping**: Greedy, `pre` and `nowrap` modes over any width measure
//! - **Layout**: Per-glyph positions, alignment, letter spacing and line height
//! - **Geometry**: Quad positions, atlas UVs, layout UVs, centers and counters
//! - **Config Files**: Layout and geometry options from TOML or RON
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use msdf_text::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     msdf_text::foundation::logging::init();
//!
//!     let font = Font::from_json_file("assets/fonts/roboto.json")?;
//!     let options = LayoutOptions::default().with_width(320.0).with_align(Align::Center);
//!
//!     let geometry = TextGeometry::build("Hello world", &font, &options, &GeometryOptions::default())?;
//!     println!("{} quads, {} lines", geometry.glyph_count(), geometry.lines_total);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod error;
pub mod foundation;
pub mod text;

pub use error::{TextError, TextResult};

/// Common imports for crate users
pub mod prelude {
    pub use crate::{
        TextError, TextResult,
        config::{Config, ConfigError, ConfigFormat, TextConfig},
        foundation::math::Vec2,
        text::{
            Align, Font, FontChar, FontCommon, FontError, FontKerning,
            GeometryOptions, LayoutMetrics, LayoutOptions, PositionedGlyph,
            TextGeometry, TextLayout, Winding, WrapMode,
        },
    };
}
