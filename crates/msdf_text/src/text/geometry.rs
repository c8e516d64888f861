//! Renderer-facing text geometry
//!
//! Bundles layout, visible-glyph filtering, attribute and index generation
//! into the buffer set a rendering backend uploads. Mesh, material and
//! shader construction stay with the backend.

use serde::{Deserialize, Serialize};

use super::font::Font;
use super::text_layout::{LayoutOptions, PositionedGlyph, TextLayout};
use super::vertices::{build_attributes, build_infos, quad_indices, TextAttributes, TextInfos, TextVertex, Winding};
use crate::error::TextResult;

/// Buffer generation settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryOptions {
    /// Invert V so row 0 of the atlas image maps to V = 1
    pub flip_v: bool,
    /// Triangle winding of the index buffer
    pub winding: Winding,
}

impl Default for GeometryOptions {
    fn default() -> Self {
        Self {
            flip_v: true,
            winding: Winding::Clockwise,
        }
    }
}

/// Vertex and index buffers for one laid out string
///
/// Buffer lengths follow the visible glyph count: 4 vertices and 6 indices
/// per glyph with a non-empty atlas box. The scalar totals come from the
/// layout, so whitespace-only text still reports its line and word counts.
///
/// # Example
///
/// ```
/// use msdf_text::text::{Font, FontChar, FontCommon, GeometryOptions, LayoutOptions, TextGeometry};
///
/// let glyph = |id: u32, width: f32| FontChar {
///     id, x: 0.0, y: 0.0, width, height: width,
///     xoffset: 0.0, yoffset: 0.0, xadvance: 9.0, page: None,
/// };
/// let common = FontCommon { line_height: 20.0, base: 16.0, scale_w: 64.0, scale_h: 64.0 };
/// let font = Font::new(vec![glyph(32, 0.0), glyph(u32::from('o'), 8.0)], Vec::new(), common);
///
/// let geometry = TextGeometry::build("o o", &font, &LayoutOptions::default(), &GeometryOptions::default())?;
/// assert_eq!(geometry.glyph_count(), 2);
/// assert_eq!(geometry.indices.len(), 12);
/// assert_eq!(geometry.words_total, 2);
/// # Ok::<(), msdf_text::TextError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextGeometry {
    /// Layout the buffers were generated from
    pub layout: TextLayout,
    /// Position, UV, layout UV and center buffers
    pub attributes: TextAttributes,
    /// Per-vertex counter channels
    pub infos: TextInfos,
    /// Triangle indices, 6 per glyph
    pub indices: Vec<u16>,
    /// Lines in the layout
    pub lines_total: usize,
    /// Words in the text
    pub words_total: usize,
    /// Letters in the text
    pub letters_total: usize,
}

impl TextGeometry {
    /// Lay out `text` and generate its buffers
    pub fn build(
        text: &str,
        font: &Font,
        layout_options: &LayoutOptions,
        geometry_options: &GeometryOptions,
    ) -> TextResult<Self> {
        let layout = TextLayout::new(text, font, layout_options)?;
        font.validate()?;
        Self::from_layout(layout, font, geometry_options)
    }

    /// Generate buffers for an existing layout of `font`
    pub fn from_layout(layout: TextLayout, font: &Font, options: &GeometryOptions) -> TextResult<Self> {
        let visible: Vec<PositionedGlyph> = layout.visible_glyphs().copied().collect();
        let (atlas_width, atlas_height) = font.atlas_size();

        let indices = quad_indices(visible.len(), options.winding)?;
        let attributes = build_attributes(&visible, atlas_width, atlas_height, options.flip_v, layout.metrics())?;
        let infos = build_infos(&visible);

        log::debug!(
            "Built text geometry: {} quads from {} placed glyphs",
            visible.len(),
            layout.glyphs().len()
        );

        let metrics = *layout.metrics();
        Ok(Self {
            layout,
            attributes,
            infos,
            indices,
            lines_total: metrics.lines_total,
            words_total: metrics.words_total,
            letters_total: metrics.letters_total,
        })
    }

    /// Number of glyph quads
    pub fn glyph_count(&self) -> usize {
        self.attributes.vertex_count() / 4
    }

    /// Whether there is nothing to draw
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Attributes interleaved into one vertex per element
    pub fn interleaved(&self) -> Vec<TextVertex> {
        TextVertex::interleave(&self.attributes)
    }

    /// Interleaved vertices as raw bytes for upload
    pub fn vertex_bytes(&self) -> Vec<u8> {
        bytemuck::cast_slice(&self.interleaved()).to_vec()
    }

    /// Index buffer as raw bytes for upload
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}
