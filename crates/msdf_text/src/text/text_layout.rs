//! Text layout engine
//!
//! Lays a string out against a [`Font`]: wraps it into lines with a
//! glyph-aware measurer, places each glyph with kerning, letter spacing and
//! horizontal alignment, and records per-glyph line/word/letter counters.
//!
//! # Layout Coordinate System
//!
//! - Pen x starts at 0 on every line, +X points right
//! - The first line sits at `y = -height` and each following line is
//!   `line_height` further down in +Y; the vertex stage negates y, which
//!   turns the block into a top-down text block in a y-up world
//!
//! Every call recomputes the layout from scratch.

use serde::{Deserialize, Serialize};

use super::font::{Font, FontChar, SPACE_ID, TAB_ID};
use super::word_wrap::{wordwrap_lines, LineSpan, Measure, WrapMode, WrapOptions};
use crate::foundation::math::Vec2;

const SPACE: u16 = b' ' as u16;
const NEWLINE: u16 = b'\n' as u16;

/// Result type for layout operations
pub type LayoutResult<T> = Result<T, LayoutError>;

/// Errors that can occur during layout
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    /// Font or options cannot be laid out
    #[error("Invalid layout configuration: {0}")]
    Configuration(String),
}

/// Horizontal alignment of lines within the text block
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    /// Lines start at x = 0
    #[default]
    Left,
    /// Lines are centered within the block width
    Center,
    /// Lines end at the block width
    Right,
}

impl Align {
    /// Horizontal offset of a line of `line_width` in a block of `block_width`
    pub fn offset(self, block_width: f32, line_width: f32) -> f32 {
        match self {
            Self::Left => 0.0,
            Self::Center => (block_width - line_width) / 2.0,
            Self::Right => block_width - line_width,
        }
    }
}

/// Layout configuration
///
/// Every field has a default, so partial config files are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    /// Minimum block width and wrap budget; `None` (or zero) is unbounded
    pub width: Option<f32>,
    /// Horizontal alignment
    pub align: Align,
    /// Extra advance added after every glyph
    pub letter_spacing: f32,
    /// Advance of a tab, in font units
    pub tab_size: f32,
    /// Line height multiplier, floored at 1
    pub line_height: f32,
    /// Line breaking strategy
    pub mode: WrapMode,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            width: None,
            align: Align::Left,
            letter_spacing: 0.0,
            tab_size: 4.0,
            line_height: 1.0,
            mode: WrapMode::Greedy,
        }
    }
}

impl LayoutOptions {
    /// Set the minimum block width / wrap budget
    pub fn with_width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    /// Set the horizontal alignment
    pub fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    /// Set the letter spacing
    pub fn with_letter_spacing(mut self, letter_spacing: f32) -> Self {
        self.letter_spacing = letter_spacing;
        self
    }

    /// Set the tab advance
    pub fn with_tab_size(mut self, tab_size: f32) -> Self {
        self.tab_size = tab_size;
        self
    }

    /// Set the line height multiplier
    pub fn with_line_height(mut self, line_height: f32) -> Self {
        self.line_height = line_height;
        self
    }

    /// Set the line breaking strategy
    pub fn with_mode(mut self, mode: WrapMode) -> Self {
        self.mode = mode;
        self
    }

    /// Reject values that cannot be normalized
    pub fn validate(&self) -> LayoutResult<()> {
        if let Some(width) = self.width {
            if !width.is_finite() || width < 0.0 {
                return Err(LayoutError::Configuration(format!(
                    "width must be a finite non-negative number, got {width}"
                )));
            }
        }
        let finite = [
            ("letter_spacing", self.letter_spacing),
            ("tab_size", self.tab_size),
            ("line_height", self.line_height),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(LayoutError::Configuration(format!(
                    "{name} must be finite, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Minimum width of the text block
    pub fn min_width(&self) -> f32 {
        self.width.unwrap_or(0.0)
    }

    /// Wrapper parameters for these options
    ///
    /// A zero width means "no minimum" here, so it maps to an unbounded budget.
    pub fn wrap_options(&self) -> WrapOptions {
        WrapOptions::new(self.width.filter(|&width| width > 0.0), self.mode)
    }
}

/// Glyphs substituted for space and tab when the font lacks them
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FallbackGlyphs {
    /// Substitute for a missing space glyph
    pub space: FontChar,
    /// Substitute for a missing tab glyph
    pub tab: FontChar,
}

impl FallbackGlyphs {
    /// Choose fallbacks for `font`
    ///
    /// The space fallback is the font's space glyph, else its `m`/`w` glyph,
    /// else its first glyph. The tab fallback advances by `tab_size`. Neither
    /// substitute has an atlas box, so neither renders. Returns `None` for a
    /// font without glyphs.
    pub fn new(font: &Font, tab_size: f32) -> Option<Self> {
        let source = font
            .glyph(SPACE_ID)
            .or_else(|| font.m_glyph())
            .or_else(|| font.chars().first())?;

        let blank = FontChar {
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            ..*source
        };
        let space = if source.id == SPACE_ID {
            *source
        } else {
            log::debug!("Font has no space glyph, substituting advance of glyph {}", source.id);
            // Only the advance is borrowed; the id stays 32 for kerning and word breaks.
            FontChar { id: SPACE_ID, ..blank }
        };
        let tab = FontChar {
            id: TAB_ID,
            xoffset: 0.0,
            yoffset: 0.0,
            xadvance: tab_size,
            ..blank
        };

        Some(Self { space, tab })
    }

    /// Resolve a code unit: the font's own glyph, then the fallbacks
    pub fn resolve(&self, font: &Font, unit: u16) -> Option<FontChar> {
        let id = u32::from(unit);
        font.glyph(id).copied().or(match id {
            TAB_ID => Some(self.tab),
            SPACE_ID => Some(self.space),
            _ => None,
        })
    }
}

/// Glyph-aware measurer used by default for wrapping
///
/// Walks glyph by glyph accumulating advance, letter spacing and kerning,
/// and stops before the glyph whose advance or bitmap extent would reach the
/// budget. Unmapped code units fit without taking space.
#[derive(Debug, Clone, Copy)]
pub struct GlyphMeasure<'a> {
    font: &'a Font,
    fallback: FallbackGlyphs,
    letter_spacing: f32,
}

impl<'a> GlyphMeasure<'a> {
    /// Create a measurer for `font` with the given options
    pub fn new(font: &'a Font, options: &LayoutOptions) -> LayoutResult<Self> {
        check_inputs(font, options)?;
        let fallback = FallbackGlyphs::new(font, options.tab_size).ok_or_else(no_glyphs)?;
        Ok(Self {
            font,
            fallback,
            letter_spacing: options.letter_spacing,
        })
    }
}

impl Measure for GlyphMeasure<'_> {
    fn measure(&self, text: &[u16], start: usize, end: usize, width: f32) -> LineSpan {
        let end = end.min(text.len());
        let units = text.get(start..end).unwrap_or_default();

        let mut pen = 0.0;
        let mut extent = 0.0;
        let mut count = 0;
        let mut last: Option<FontChar> = None;

        for &unit in units {
            if let Some(glyph) = self.fallback.resolve(self.font, unit) {
                if let Some(previous) = last {
                    pen += self.font.kerning(previous.id, glyph.id);
                }

                let next_pen = pen + glyph.xadvance + self.letter_spacing;
                let next_extent = pen + glyph.width;
                if next_extent >= width || next_pen >= width {
                    break;
                }

                pen = next_pen;
                extent = next_extent;
                last = Some(glyph);
            }
            count += 1;
        }

        if let Some(glyph) = last {
            extent += glyph.xoffset;
        }

        LineSpan {
            start,
            end: start + count,
            width: extent,
        }
    }
}

/// A glyph placed by the layout
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionedGlyph {
    /// Pen position including kerning and alignment
    pub position: Vec2,
    /// Atlas entry the glyph renders with
    pub glyph: FontChar,
    /// Offset of the source code unit in the text
    pub source_index: usize,
    /// Line the glyph is on
    pub line_index: usize,
    /// Number of lines in the layout
    pub lines_total: usize,
    /// Letter index within the line
    pub line_letter_index: usize,
    /// Letters on the line
    pub line_letters_total: usize,
    /// Word index within the line
    pub line_word_index: usize,
    /// Words on the line
    pub line_words_total: usize,
    /// Letter index within the whole text
    pub letter_index: usize,
    /// Letters in the whole text
    pub letters_total: usize,
    /// Word index within the whole text
    pub word_index: usize,
    /// Words in the whole text
    pub words_total: usize,
}

impl PositionedGlyph {
    /// Whether the glyph has a non-empty atlas box
    pub fn is_visible(&self) -> bool {
        self.glyph.is_visible()
    }
}

/// Layout-wide metrics, in font units
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LayoutMetrics {
    /// Widest line, at least the configured minimum width
    pub width: f32,
    /// `line_height * lines_total - descender`
    pub height: f32,
    /// `line_height - descender - x_height`
    pub ascender: f32,
    /// `line_height - baseline`
    pub descender: f32,
    /// Height of the font's lowercase reference glyph
    pub x_height: f32,
    /// Height of the font's capital reference glyph
    pub cap_height: f32,
    /// Font baseline (`common.base`)
    pub baseline: f32,
    /// Effective line height after the multiplier
    pub line_height: f32,
    /// Number of lines
    pub lines_total: usize,
    /// Words in the text
    pub words_total: usize,
    /// Letters in the text (every code unit but space and newline)
    pub letters_total: usize,
}

/// Bounding box of laid out geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextBounds {
    /// Minimum X coordinate
    pub min_x: f32,
    /// Minimum Y coordinate
    pub min_y: f32,
    /// Maximum X coordinate
    pub max_x: f32,
    /// Maximum Y coordinate
    pub max_y: f32,
}

impl TextBounds {
    /// Calculate width of bounding box
    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    /// Calculate height of bounding box
    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }
}

/// A laid out run of text
///
/// # Example
///
/// ```
/// use msdf_text::text::{Font, FontChar, FontCommon, LayoutOptions, TextLayout};
///
/// let glyph = |id: u32| FontChar {
///     id, x: 0.0, y: 0.0, width: 8.0, height: 10.0,
///     xoffset: 0.0, yoffset: 0.0, xadvance: 9.0, page: None,
/// };
/// let common = FontCommon { line_height: 20.0, base: 16.0, scale_w: 64.0, scale_h: 64.0 };
/// let font = Font::new(vec![glyph(u32::from('h')), glyph(u32::from('i'))], Vec::new(), common);
///
/// let layout = TextLayout::new("hi", &font, &LayoutOptions::default())?;
/// assert_eq!(layout.glyphs().len(), 2);
/// assert_eq!(layout.glyphs()[1].position.x, 9.0);
/// # Ok::<(), msdf_text::text::LayoutError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextLayout {
    metrics: LayoutMetrics,
    glyphs: Vec<PositionedGlyph>,
}

/// Lay out `text` with the font's glyph-aware measurer
pub fn layout(text: &str, font: &Font, options: &LayoutOptions) -> LayoutResult<TextLayout> {
    TextLayout::new(text, font, options)
}

impl TextLayout {
    /// Lay out `text` with the font's glyph-aware measurer
    pub fn new(text: &str, font: &Font, options: &LayoutOptions) -> LayoutResult<Self> {
        let measure = GlyphMeasure::new(font, options)?;
        Self::with_measure(text, font, options, &measure)
    }

    /// Lay out `text`, wrapping with a caller-supplied measurer
    ///
    /// Glyph placement still uses the font; only line breaking consults `measure`.
    pub fn with_measure<M>(text: &str, font: &Font, options: &LayoutOptions, measure: &M) -> LayoutResult<Self>
    where
        M: Measure + ?Sized,
    {
        check_inputs(font, options)?;
        let fallback = FallbackGlyphs::new(font, options.tab_size).ok_or_else(no_glyphs)?;

        let mut metrics = font_metrics(font, options);
        if text.is_empty() {
            return Ok(Self {
                metrics,
                glyphs: Vec::new(),
            });
        }

        let units: Vec<u16> = text.encode_utf16().collect();
        let lines = wordwrap_lines(&units, &options.wrap_options(), measure);

        let min_width = options.min_width();
        let max_line_width = lines
            .iter()
            .fold(0.0_f32, |widest, line| widest.max(line.width).max(min_width));

        metrics.width = max_line_width;
        metrics.lines_total = lines.len();
        metrics.height = metrics.line_height * lines.len() as f32 - metrics.descender;
        metrics.words_total = text.split(' ').filter(|word| *word != "\n").count();
        metrics.letters_total = units
            .iter()
            .filter(|&&unit| unit != NEWLINE && unit != SPACE)
            .count();

        let glyphs = place_glyphs(&units, &lines, font, &fallback, options, &metrics);

        log::debug!(
            "Laid out {} code units: {} lines, {} glyphs, {}x{}",
            units.len(),
            metrics.lines_total,
            glyphs.len(),
            metrics.width,
            metrics.height
        );

        Ok(Self { metrics, glyphs })
    }

    /// Recompute the layout in place, replacing all previous state
    ///
    /// On error the previous layout is left untouched.
    pub fn update(&mut self, text: &str, font: &Font, options: &LayoutOptions) -> LayoutResult<()> {
        *self = Self::new(text, font, options)?;
        Ok(())
    }

    /// Layout-wide metrics
    pub fn metrics(&self) -> &LayoutMetrics {
        &self.metrics
    }

    /// Every placed glyph in text order, including whitespace
    pub fn glyphs(&self) -> &[PositionedGlyph] {
        &self.glyphs
    }

    /// Placed glyphs that produce geometry
    pub fn visible_glyphs(&self) -> impl Iterator<Item = &PositionedGlyph> + '_ {
        self.glyphs.iter().filter(|glyph| glyph.is_visible())
    }

    /// Width of the text block
    pub fn width(&self) -> f32 {
        self.metrics.width
    }

    /// Height of the text block
    pub fn height(&self) -> f32 {
        self.metrics.height
    }

    /// Number of lines
    pub fn lines_total(&self) -> usize {
        self.metrics.lines_total
    }

    /// Bounding box of the visible quads in emitted (y-negated) space
    pub fn bounds(&self) -> Option<TextBounds> {
        self.visible_glyphs()
            .map(|placed| {
                let x = placed.position.x + placed.glyph.xoffset;
                let y = placed.position.y + placed.glyph.yoffset;
                TextBounds {
                    min_x: x,
                    min_y: -(y + placed.glyph.height),
                    max_x: x + placed.glyph.width,
                    max_y: -y,
                }
            })
            .reduce(|a, b| TextBounds {
                min_x: a.min_x.min(b.min_x),
                min_y: a.min_y.min(b.min_y),
                max_x: a.max_x.max(b.max_x),
                max_y: a.max_y.max(b.max_y),
            })
    }
}

fn no_glyphs() -> LayoutError {
    LayoutError::Configuration("Must provide a valid bitmap font".to_string())
}

fn check_inputs(font: &Font, options: &LayoutOptions) -> LayoutResult<()> {
    if font.is_empty() {
        return Err(no_glyphs());
    }
    options.validate()
}

/// Metrics that depend only on the font and options
fn font_metrics(font: &Font, options: &LayoutOptions) -> LayoutMetrics {
    let common = font.common();
    let line_height = common.line_height * options.line_height.max(1.0);
    let baseline = common.base;
    let descender = line_height - baseline;
    let x_height = font.x_height();

    LayoutMetrics {
        ascender: line_height - descender - x_height,
        descender,
        x_height,
        cap_height: font.cap_height(),
        baseline,
        line_height,
        ..LayoutMetrics::default()
    }
}

fn place_glyphs(
    units: &[u16],
    lines: &[LineSpan],
    font: &Font,
    fallback: &FallbackGlyphs,
    options: &LayoutOptions,
    metrics: &LayoutMetrics,
) -> Vec<PositionedGlyph> {
    let mut glyphs = Vec::with_capacity(units.len());
    let mut y = -metrics.height;
    let mut word_index = 0;
    let mut letter_index = 0;

    for (line_index, line) in lines.iter().enumerate() {
        let line_units = &units[line.start..line.end];
        let line_words_total = line_units
            .split(|&unit| unit == SPACE)
            .filter(|word| !word.is_empty())
            .count();
        let line_letters_total = line_units.iter().filter(|&&unit| unit != SPACE).count();
        let align_offset = options.align.offset(metrics.width, line.width);

        let mut x = 0.0;
        let mut line_letter_index = 0;
        let mut line_word_index = 0;
        let mut last: Option<(u16, FontChar)> = None;

        for (source_index, &unit) in (line.start..line.end).zip(line_units) {
            let Some(glyph) = fallback.resolve(font, unit) else {
                log::trace!("No glyph for code unit {unit:#06x} at {source_index}, skipping");
                continue;
            };

            if let Some((_, previous)) = last {
                x += font.kerning(previous.id, glyph.id);
            }

            glyphs.push(PositionedGlyph {
                position: Vec2::new(x + align_offset, y),
                glyph,
                source_index,
                line_index,
                lines_total: metrics.lines_total,
                line_letter_index,
                line_letters_total,
                line_word_index,
                line_words_total,
                letter_index,
                letters_total: metrics.letters_total,
                word_index,
                words_total: metrics.words_total,
            });

            if unit == SPACE {
                if last.is_none_or(|(previous, _)| previous != SPACE) {
                    line_word_index += 1;
                    word_index += 1;
                }
            } else {
                line_letter_index += 1;
                letter_index += 1;
            }

            x += glyph.xadvance + options.letter_spacing;
            last = Some((unit, glyph));
        }

        y += metrics.line_height;
    }

    glyphs
}
