//! Bitmap/MSDF font description
//!
//! This module holds the decoded atlas descriptor a text layout is built
//! against: per-glyph atlas rectangles and metrics, kerning pairs and the
//! common block (line height, baseline, atlas size). The descriptor is
//! usually the JSON emitted by msdf-bmfont style atlas generators and is
//! read with [`Font::from_json`]. A [`Font`] is immutable once built.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Result type for font operations
pub type FontResult<T> = Result<T, FontError>;

/// Errors that can occur while loading a font description
#[derive(Debug, thiserror::Error)]
pub enum FontError {
    /// Descriptor JSON could not be decoded
    #[error("Failed to parse font descriptor: {0}")]
    Parse(#[from] serde_json::Error),

    /// Descriptor file could not be read
    #[error("Failed to read font descriptor: {0}")]
    Io(#[from] std::io::Error),

    /// Descriptor contains no glyphs
    #[error("Font descriptor contains no glyphs")]
    Empty,

    /// Atlas dimensions in the common block are unusable
    #[error("Invalid atlas size {width}x{height}")]
    InvalidAtlas {
        /// Atlas width (`scaleW`)
        width: f32,
        /// Atlas height (`scaleH`)
        height: f32,
    },
}

/// Character code of the space glyph
pub const SPACE_ID: u32 = 0x20;
/// Character code of the tab glyph
pub const TAB_ID: u32 = 0x09;

const X_HEIGHTS: &[char] = &['x', 'e', 'a', 'o', 'n', 's', 'r', 'c', 'u', 'm', 'v', 'w', 'z'];
const M_WIDTHS: &[char] = &['m', 'w'];
const CAP_HEIGHTS: &[char] = &['H', 'I', 'N', 'E', 'F', 'K', 'L', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z'];

/// One glyph's entry in the atlas
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FontChar {
    /// Character code
    pub id: u32,
    /// Atlas rectangle left edge in pixels
    #[serde(default)]
    pub x: f32,
    /// Atlas rectangle top edge in pixels
    #[serde(default)]
    pub y: f32,
    /// Atlas rectangle width in pixels
    #[serde(default)]
    pub width: f32,
    /// Atlas rectangle height in pixels
    #[serde(default)]
    pub height: f32,
    /// Horizontal placement offset from the pen position
    #[serde(default)]
    pub xoffset: f32,
    /// Vertical placement offset from the line top
    #[serde(default)]
    pub yoffset: f32,
    /// Horizontal pen advance
    #[serde(default)]
    pub xadvance: f32,
    /// Atlas page index
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

impl FontChar {
    /// Atlas area of the glyph bitmap
    ///
    /// Whitespace and control glyphs have an empty bitmap and produce no quad.
    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// Whether the glyph produces visible geometry
    pub fn is_visible(&self) -> bool {
        self.area() > 0.0
    }
}

/// Pen adjustment applied when `second` immediately follows `first`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FontKerning {
    /// Left character code
    pub first: u32,
    /// Right character code
    pub second: u32,
    /// Horizontal adjustment in font units
    pub amount: f32,
}

/// Font-wide metrics and atlas dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontCommon {
    /// Distance between consecutive baselines
    pub line_height: f32,
    /// Distance from the line top to the baseline
    pub base: f32,
    /// Atlas texture width
    pub scale_w: f32,
    /// Atlas texture height
    pub scale_h: f32,
}

/// Distance field parameters recorded by the atlas generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistanceField {
    /// Field encoding, e.g. `msdf`, `sdf` or `psdf`
    pub field_type: String,
    /// Distance range in atlas pixels
    pub distance_range: f32,
}

/// Font descriptor as decoded from the atlas generator's JSON output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontDescriptor {
    /// Atlas page image file names
    #[serde(default)]
    pub pages: Vec<String>,
    /// Glyph entries
    #[serde(default)]
    pub chars: Vec<FontChar>,
    /// Kerning pairs
    #[serde(default)]
    pub kernings: Vec<FontKerning>,
    /// Common block
    pub common: FontCommon,
    /// Distance field parameters, when the atlas is a distance field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_field: Option<DistanceField>,
}

/// A decoded font description with indexed glyph and kerning lookups
#[derive(Debug, Clone)]
pub struct Font {
    chars: Vec<FontChar>,
    kernings: Vec<FontKerning>,
    common: FontCommon,
    pages: Vec<String>,
    distance_field: Option<DistanceField>,

    /// Glyph id -> index into `chars`
    char_index: HashMap<u32, usize>,
    /// (first, second) -> amount
    kerning_index: HashMap<(u32, u32), f32>,
}

impl Font {
    /// Build a font from its glyphs, kerning pairs and common block
    ///
    /// Duplicate glyph ids and duplicate kerning pairs keep their first entry.
    pub fn new(chars: Vec<FontChar>, kernings: Vec<FontKerning>, common: FontCommon) -> Self {
        let mut char_index = HashMap::with_capacity(chars.len());
        for (index, glyph) in chars.iter().enumerate() {
            char_index.entry(glyph.id).or_insert(index);
        }

        let mut kerning_index = HashMap::with_capacity(kernings.len());
        for kerning in &kernings {
            kerning_index
                .entry((kerning.first, kerning.second))
                .or_insert(kerning.amount);
        }

        Self {
            chars,
            kernings,
            common,
            pages: Vec::new(),
            distance_field: None,
            char_index,
            kerning_index,
        }
    }

    /// Build a font from a decoded descriptor
    pub fn from_descriptor(descriptor: FontDescriptor) -> Self {
        let FontDescriptor {
            pages,
            chars,
            kernings,
            common,
            distance_field,
        } = descriptor;

        let mut font = Self::new(chars, kernings, common);
        font.pages = pages;
        font.distance_field = distance_field;
        font
    }

    /// Decode a font from descriptor JSON
    ///
    /// # Example
    ///
    /// ```
    /// use msdf_text::text::Font;
    ///
    /// let json = r#"{
    ///     "chars": [{ "id": 65, "x": 0, "y": 0, "width": 10, "height": 12,
    ///                 "xoffset": 0, "yoffset": 4, "xadvance": 11 }],
    ///     "common": { "lineHeight": 20, "base": 16, "scaleW": 256, "scaleH": 256 }
    /// }"#;
    /// let font = Font::from_json(json)?;
    /// assert!(font.glyph(65).is_some());
    /// # Ok::<(), msdf_text::text::FontError>(())
    /// ```
    pub fn from_json(json: &str) -> FontResult<Self> {
        let descriptor: FontDescriptor = serde_json::from_str(json)?;
        let font = Self::from_descriptor(descriptor);
        log::debug!(
            "Loaded font descriptor: {} glyphs, {} kerning pairs, atlas {}x{}",
            font.chars.len(),
            font.kernings.len(),
            font.common.scale_w,
            font.common.scale_h
        );
        Ok(font)
    }

    /// Read and decode a font descriptor JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> FontResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Check that the font can be laid out and rendered
    pub fn validate(&self) -> FontResult<()> {
        if self.chars.is_empty() {
            return Err(FontError::Empty);
        }
        if !(self.common.scale_w > 0.0 && self.common.scale_h > 0.0) {
            return Err(FontError::InvalidAtlas {
                width: self.common.scale_w,
                height: self.common.scale_h,
            });
        }
        Ok(())
    }

    /// All glyph entries in descriptor order
    pub fn chars(&self) -> &[FontChar] {
        &self.chars
    }

    /// All kerning pairs in descriptor order
    pub fn kernings(&self) -> &[FontKerning] {
        &self.kernings
    }

    /// Common block
    pub fn common(&self) -> &FontCommon {
        &self.common
    }

    /// Atlas page file names
    pub fn pages(&self) -> &[String] {
        &self.pages
    }

    /// Distance field parameters, if recorded
    pub fn distance_field(&self) -> Option<&DistanceField> {
        self.distance_field.as_ref()
    }

    /// Atlas dimensions as `(scaleW, scaleH)`
    pub fn atlas_size(&self) -> (f32, f32) {
        (self.common.scale_w, self.common.scale_h)
    }

    /// Whether the font has no glyphs
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Look up a glyph by character code
    pub fn glyph(&self, id: u32) -> Option<&FontChar> {
        self.char_index.get(&id).map(|&index| &self.chars[index])
    }

    /// Kerning adjustment between two character codes, zero when absent
    pub fn kerning(&self, left: u32, right: u32) -> f32 {
        self.kerning_index
            .get(&(left, right))
            .copied()
            .unwrap_or(0.0)
    }

    /// Height of the first lowercase reference glyph present, zero if none
    pub fn x_height(&self) -> f32 {
        self.first_of(X_HEIGHTS).map_or(0.0, |glyph| glyph.height)
    }

    /// Height of the first capital reference glyph present, zero if none
    pub fn cap_height(&self) -> f32 {
        self.first_of(CAP_HEIGHTS).map_or(0.0, |glyph| glyph.height)
    }

    /// The `m` glyph, or `w` when `m` is missing
    pub fn m_glyph(&self) -> Option<&FontChar> {
        self.first_of(M_WIDTHS)
    }

    fn first_of(&self, candidates: &[char]) -> Option<&FontChar> {
        candidates.iter().find_map(|&ch| self.glyph(u32::from(ch)))
    }
}

impl From<FontDescriptor> for Font {
    fn from(descriptor: FontDescriptor) -> Self {
        Self::from_descriptor(descriptor)
    }
}
