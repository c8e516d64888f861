//! Vertex and attribute generation
//!
//! Converts positioned glyphs into planar, renderer-ready buffers. Every
//! glyph becomes one quad of 4 vertices in the order bottom-left, top-left,
//! top-right, bottom-right; positions, UVs, layout UVs and centers all
//! follow that order so the index buffer can be built from the quad count
//! alone.

use serde::{Deserialize, Serialize};

use super::text_layout::{LayoutMetrics, PositionedGlyph};
use crate::foundation::math::{div_or_zero, Vec2, Vec3};

/// Result type for geometry operations
pub type GeometryResult<T> = Result<T, GeometryError>;

/// Errors that can occur while building geometry
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    /// More quads than 16-bit indices can address
    #[error("{quads} quads exceed the 16-bit index limit of {} quads", MAX_QUADS)]
    IndexOverflow {
        /// Requested quad count
        quads: usize,
    },

    /// Atlas dimensions cannot normalize UVs
    #[error("Invalid atlas size {width}x{height}")]
    InvalidAtlas {
        /// Atlas width
        width: f32,
        /// Atlas height
        height: f32,
    },
}

/// Vertices per glyph quad
pub const VERTICES_PER_QUAD: usize = 4;
/// Indices per glyph quad
pub const INDICES_PER_QUAD: usize = 6;
/// Largest quad count a 16-bit index buffer can address
pub const MAX_QUADS: usize = (u16::MAX as usize + 1) / VERTICES_PER_QUAD;

/// Triangle winding of the generated index buffer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Winding {
    /// Quads split as `0 1 2, 0 2 3`
    #[default]
    Clockwise,
    /// Quads split as `0 1 2, 2 1 3`
    CounterClockwise,
}

impl Winding {
    fn second_triangle(self) -> [u16; 3] {
        match self {
            Self::Clockwise => [0, 2, 3],
            Self::CounterClockwise => [2, 1, 3],
        }
    }
}

/// Per-vertex float attributes for a run of glyph quads
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextAttributes {
    /// World-space corners, 3 floats per vertex (z is always 0)
    pub positions: Vec<f32>,
    /// Atlas UVs, 2 floats per vertex
    pub uvs: Vec<f32>,
    /// Glyph box normalized to the whole text block, 2 floats per vertex
    pub layout_uvs: Vec<f32>,
    /// Quad center repeated on each vertex, 2 floats per vertex
    ///
    /// In the same space as `positions`: y is negated, so the center lies
    /// inside its quad.
    pub centers: Vec<f32>,
}

impl TextAttributes {
    /// Number of vertices described
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }
}

/// Per-vertex glyph counters plus the layout totals
///
/// Channels are stored as floats, the form vertex attributes take on the GPU.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextInfos {
    /// Line index
    pub line_index: Vec<f32>,
    /// Letters on the glyph's line
    pub line_letters_total: Vec<f32>,
    /// Letter index within the line
    pub line_letter_index: Vec<f32>,
    /// Words on the glyph's line
    pub line_words_total: Vec<f32>,
    /// Word index within the line
    pub line_word_index: Vec<f32>,
    /// Word index within the text
    pub word_index: Vec<f32>,
    /// Letter index within the text
    pub letter_index: Vec<f32>,
    /// Lines in the layout
    pub lines_total: usize,
    /// Words in the text
    pub words_total: usize,
    /// Letters in the text
    pub letters_total: usize,
}

/// Build the float attribute buffers for `glyphs`
///
/// UVs are the glyph's atlas rectangle over `atlas_width`/`atlas_height`,
/// with V inverted when `flip_v` is set. Layout UVs place the glyph box
/// within the `metrics` width and height. Positions negate y.
pub fn build_attributes<'a, I>(
    glyphs: I,
    atlas_width: f32,
    atlas_height: f32,
    flip_v: bool,
    metrics: &LayoutMetrics,
) -> GeometryResult<TextAttributes>
where
    I: IntoIterator<Item = &'a PositionedGlyph>,
{
    if !(atlas_width > 0.0 && atlas_height > 0.0) {
        return Err(GeometryError::InvalidAtlas {
            width: atlas_width,
            height: atlas_height,
        });
    }

    let glyphs = glyphs.into_iter();
    let capacity = glyphs.size_hint().0 * VERTICES_PER_QUAD;
    let mut attributes = TextAttributes {
        positions: Vec::with_capacity(capacity * 3),
        uvs: Vec::with_capacity(capacity * 2),
        layout_uvs: Vec::with_capacity(capacity * 2),
        centers: Vec::with_capacity(capacity * 2),
    };

    for placed in glyphs {
        let bitmap = &placed.glyph;

        // UV
        let right = bitmap.x + bitmap.width;
        let bottom = bitmap.y + bitmap.height;
        let u0 = bitmap.x / atlas_width;
        let u1 = right / atlas_width;
        let (v0, v1) = if flip_v {
            (
                (atlas_height - bottom) / atlas_height,
                (atlas_height - bitmap.y) / atlas_height,
            )
        } else {
            (bottom / atlas_height, bitmap.y / atlas_height)
        };
        attributes.uvs.extend_from_slice(&[
            u0, v1, // BL
            u0, v0, // TL
            u1, v0, // TR
            u1, v1, // BR
        ]);

        // Layout UV
        let lu0 = div_or_zero(placed.position.x, metrics.width);
        let lu1 = div_or_zero(placed.position.x + bitmap.width, metrics.width);
        let lv0 = div_or_zero(placed.position.y + metrics.height, metrics.height);
        let lv1 = div_or_zero(placed.position.y + metrics.height + bitmap.height, metrics.height);
        attributes.layout_uvs.extend_from_slice(&[
            lu0, lv0, // BL
            lu0, lv1, // TL
            lu1, lv1, // TR
            lu1, lv0, // BR
        ]);

        // Positions
        let origin = placed.position + Vec2::new(bitmap.xoffset, bitmap.yoffset);
        let (x, y) = (origin.x, origin.y);
        let (w, h) = (bitmap.width, bitmap.height);
        let corners = [
            Vec3::new(x, -y, 0.0), // BL
            Vec3::new(x, -(y + h), 0.0), // TL
            Vec3::new(x + w, -(y + h), 0.0), // TR
            Vec3::new(x + w, -y, 0.0), // BR
        ];
        for corner in &corners {
            attributes.positions.extend_from_slice(corner.as_slice());
        }

        // Centers
        let center = [x + w / 2.0, -(y + h / 2.0)];
        for _ in 0..VERTICES_PER_QUAD {
            attributes.centers.extend_from_slice(&center);
        }
    }

    Ok(attributes)
}

/// Build the per-vertex counter channels for `glyphs`
///
/// Totals come from the last glyph and are zero for an empty run.
pub fn build_infos<'a, I>(glyphs: I) -> TextInfos
where
    I: IntoIterator<Item = &'a PositionedGlyph>,
{
    let glyphs = glyphs.into_iter();
    let capacity = glyphs.size_hint().0 * VERTICES_PER_QUAD;
    let channel = || Vec::with_capacity(capacity);
    let mut infos = TextInfos {
        line_index: channel(),
        line_letters_total: channel(),
        line_letter_index: channel(),
        line_words_total: channel(),
        line_word_index: channel(),
        word_index: channel(),
        letter_index: channel(),
        ..TextInfos::default()
    };

    for placed in glyphs {
        let values = [
            (&mut infos.line_index, placed.line_index),
            (&mut infos.line_letters_total, placed.line_letters_total),
            (&mut infos.line_letter_index, placed.line_letter_index),
            (&mut infos.line_words_total, placed.line_words_total),
            (&mut infos.line_word_index, placed.line_word_index),
            (&mut infos.word_index, placed.word_index),
            (&mut infos.letter_index, placed.letter_index),
        ];
        for (target, value) in values {
            target.extend(std::iter::repeat(value as f32).take(VERTICES_PER_QUAD));
        }

        infos.lines_total = placed.lines_total;
        infos.words_total = placed.words_total;
        infos.letters_total = placed.letters_total;
    }

    infos
}

/// Build a 16-bit triangle index buffer for `quads` glyph quads
pub fn quad_indices(quads: usize, winding: Winding) -> GeometryResult<Vec<u16>> {
    if quads > MAX_QUADS {
        log::warn!("Cannot index {quads} quads with 16-bit indices");
        return Err(GeometryError::IndexOverflow { quads });
    }

    let [a, b, c] = winding.second_triangle();
    let mut indices = Vec::with_capacity(quads * INDICES_PER_QUAD);
    for quad in 0..quads {
        // quad < MAX_QUADS, so the base vertex fits in u16
        let base = (quad * VERTICES_PER_QUAD) as u16;
        indices.extend_from_slice(&[base, base + 1, base + 2, base + a, base + b, base + c]);
    }
    Ok(indices)
}

/// Interleaved vertex for hosts that upload a single vertex buffer
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TextVertex {
    /// Position in local space
    pub position: [f32; 3],
    /// Atlas texture coordinates
    pub uv: [f32; 2],
    /// Coordinates within the text block
    pub layout_uv: [f32; 2],
    /// Center of the owning quad
    pub center: [f32; 2],
}

impl TextVertex {
    /// Interleave planar attribute buffers
    pub fn interleave(attributes: &TextAttributes) -> Vec<Self> {
        attributes
            .positions
            .chunks_exact(3)
            .zip(attributes.uvs.chunks_exact(2))
            .zip(attributes.layout_uvs.chunks_exact(2))
            .zip(attributes.centers.chunks_exact(2))
            .map(|(((position, uv), layout_uv), center)| Self {
                position: [position[0], position[1], position[2]],
                uv: [uv[0], uv[1]],
                layout_uv: [layout_uv[0], layout_uv[1]],
                center: [center[0], center[1]],
            })
            .collect()
    }
}
