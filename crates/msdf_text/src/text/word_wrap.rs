//! Word wrapping
//!
//! Splits a run of text into line spans given a width budget and a
//! measurement strategy. Text is addressed in UTF-16 code units, the unit
//! glyph ids are keyed by.
//!
//! Three modes are supported:
//! - [`WrapMode::Greedy`]: fill each line as far as the measurer allows,
//!   breaking at the last whitespace before the fit point
//! - [`WrapMode::NoWrap`]: greedy with an unbounded budget, so lines only
//!   break at explicit newlines
//! - [`WrapMode::Pre`]: one line per newline-delimited segment, measured
//!   once and never wrapped

use serde::{Deserialize, Serialize};

const NEWLINE: u16 = b'\n' as u16;
const NEXT_LINE: u16 = 0x0085;

/// Line breaking strategy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WrapMode {
    /// Break at whitespace once a line exceeds the width budget
    #[default]
    Greedy,
    /// Break only at newlines, measuring each segment once
    Pre,
    /// Greedy breaking with an unbounded width budget
    #[serde(rename = "nowrap")]
    NoWrap,
}

/// A half-open range of code units assigned to one line, with its measured width
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSpan {
    /// First code unit of the line
    pub start: usize,
    /// One past the last code unit of the line
    pub end: usize,
    /// Measured width in font units
    pub width: f32,
}

impl LineSpan {
    /// Number of code units covered by the span
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the span covers no text (an explicit blank line)
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Measurement strategy consulted by the wrapper
///
/// Given `text[start..end]` and a width budget, returns the span that fits
/// (its `end - start` is the number of code units that fit) and the width
/// that span occupies.
pub trait Measure {
    /// Measure how much of `text[start..end]` fits within `width`
    fn measure(&self, text: &[u16], start: usize, end: usize, width: f32) -> LineSpan;
}

impl<F> Measure for F
where
    F: Fn(&[u16], usize, usize, f32) -> LineSpan,
{
    fn measure(&self, text: &[u16], start: usize, end: usize, width: f32) -> LineSpan {
        self(text, start, end, width)
    }
}

/// Fixed-width measurer: every code unit is one unit wide
///
/// Useful for headless wrapping and tests where no font is involved.
#[derive(Debug, Clone, Copy, Default)]
pub struct Monospace;

impl Measure for Monospace {
    fn measure(&self, _text: &[u16], start: usize, end: usize, width: f32) -> LineSpan {
        let available = end.saturating_sub(start);
        let fits = if width >= available as f32 {
            available
        } else {
            // Partial cells do not fit.
            width.max(0.0).floor() as usize
        };
        LineSpan {
            start,
            end: start + fits,
            width: fits as f32,
        }
    }
}

/// Wrapping parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WrapOptions {
    /// Width budget; `None` is unbounded
    pub width: Option<f32>,
    /// First code unit to wrap
    pub start: usize,
    /// One past the last code unit to wrap; `None` wraps to the end of the text
    pub end: Option<usize>,
    /// Line breaking strategy
    pub mode: WrapMode,
}

impl Default for WrapOptions {
    fn default() -> Self {
        Self {
            width: None,
            start: 0,
            end: None,
            mode: WrapMode::Greedy,
        }
    }
}

impl WrapOptions {
    /// Wrap the whole text at `width` with the given mode
    pub fn new(width: Option<f32>, mode: WrapMode) -> Self {
        Self {
            width,
            mode,
            ..Self::default()
        }
    }
}

/// Split `text` into line spans
///
/// A zero width budget yields no lines unless the mode is
/// [`WrapMode::NoWrap`]. Every iteration advances past at least one code
/// unit, so a word wider than the budget is broken where the measurer
/// stops instead of looping.
pub fn wordwrap_lines<M>(text: &[u16], options: &WrapOptions, measure: &M) -> Vec<LineSpan>
where
    M: Measure + ?Sized,
{
    if options.width == Some(0.0) && options.mode != WrapMode::NoWrap {
        return Vec::new();
    }

    let width = options.width.unwrap_or(f32::MAX);
    let end = options.end.unwrap_or(text.len()).min(text.len());
    let start = options.start;

    let lines = match options.mode {
        WrapMode::Pre => pre(measure, text, start, end, width),
        WrapMode::Greedy | WrapMode::NoWrap => greedy(measure, text, start, end, width, options.mode),
    };

    log::trace!(
        "Wrapped {} code units into {} lines ({:?}, width {:?})",
        end.saturating_sub(start),
        lines.len(),
        options.mode,
        options.width
    );
    lines
}

/// Wrap `text` and join the resulting lines with `\n`
///
/// # Example
///
/// ```
/// use msdf_text::text::{wordwrap, Monospace, WrapMode, WrapOptions};
///
/// let wrapped = wordwrap("the quick brown fox", &WrapOptions::new(Some(10.0), WrapMode::Greedy), &Monospace);
/// assert_eq!(wrapped, "the quick\nbrown fox");
/// ```
pub fn wordwrap<M>(text: &str, options: &WrapOptions, measure: &M) -> String
where
    M: Measure + ?Sized,
{
    let units: Vec<u16> = text.encode_utf16().collect();
    wordwrap_lines(&units, options, measure)
        .iter()
        .map(|line| String::from_utf16_lossy(&units[line.start..line.end]))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Whether a code unit is whitespace for line breaking purposes
///
/// Unicode White_Space plus U+FEFF, minus U+0085 (NEL).
pub fn is_whitespace(unit: u16) -> bool {
    match unit {
        NEXT_LINE => false,
        0xFEFF => true,
        _ => char::from_u32(u32::from(unit)).is_some_and(char::is_whitespace),
    }
}

fn is_whitespace_at(text: &[u16], index: usize) -> bool {
    text.get(index).copied().is_some_and(is_whitespace)
}

/// Position of the next newline in `text[start..end]`, or `end`
fn next_newline(text: &[u16], start: usize, end: usize) -> usize {
    text[start..end]
        .iter()
        .position(|&unit| unit == NEWLINE)
        .map_or(end, |offset| start + offset)
}

fn pre<M>(measure: &M, text: &[u16], start: usize, end: usize, width: f32) -> Vec<LineSpan>
where
    M: Measure + ?Sized,
{
    let mut lines = Vec::new();
    let mut line_start = start;

    for i in start..end {
        let is_newline = text[i] == NEWLINE;
        if is_newline || i + 1 == end {
            let line_end = if is_newline { i } else { i + 1 };
            lines.push(measure.measure(text, line_start, line_end, width));
            line_start = i + 1;
        }
    }
    lines
}

fn greedy<M>(
    measure: &M,
    text: &[u16],
    mut start: usize,
    end: usize,
    width: f32,
    mode: WrapMode,
) -> Vec<LineSpan>
where
    M: Measure + ?Sized,
{
    let test_width = if mode == WrapMode::NoWrap { f32::MAX } else { width };
    let mut lines = Vec::new();

    while start < end {
        let new_line = next_newline(text, start, end);

        // Whitespace never starts a wrapped line.
        while start < new_line && is_whitespace(text[start]) {
            start += 1;
        }

        let measured = measure.measure(text, start, new_line, test_width);
        let mut line_end = (start + measured.len()).min(new_line);
        let mut next_start = line_end + 1;
        let mut forced = false;

        if line_end < new_line {
            // Back up to the last whitespace so words are not split.
            while line_end > start && !is_whitespace_at(text, line_end) {
                line_end -= 1;
            }
            if line_end == start {
                // A single word wider than the budget: break at the fit point,
                // or after one code unit if nothing fit at all.
                if next_start > start + 1 {
                    next_start -= 1;
                }
                line_end = next_start;
                forced = true;
            } else {
                next_start = line_end;
                while line_end > start && is_whitespace_at(text, line_end - 1) {
                    line_end -= 1;
                }
            }
        }

        if forced {
            // The overflowing unit still gets its own line.
            let overflow = measure.measure(text, start, line_end, f32::MAX);
            lines.push(LineSpan {
                start,
                end: line_end,
                width: overflow.width,
            });
        } else if line_end >= start {
            lines.push(measure.measure(text, start, line_end, test_width));
        }
        start = next_start;
    }
    lines
}
