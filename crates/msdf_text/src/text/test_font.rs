//! Synthetic font fixture for unit tests
//!
//! Uppercase `A B H` are 9 wide with a 10 advance and 14 tall, lowercase
//! letters (no `x`) are 7 wide with an 8 advance and 10 tall, space has an
//! empty bitmap and a 4 advance. `A` followed by `B` kerns by -5.

use super::font::{Font, FontChar, FontCommon, FontKerning};

pub(crate) fn common() -> FontCommon {
    FontCommon {
        line_height: 20.0,
        base: 16.0,
        scale_w: 256.0,
        scale_h: 128.0,
    }
}

pub(crate) fn glyph(ch: char, width: f32, xadvance: f32) -> FontChar {
    let id = u32::from(ch);
    let height = if ch.is_ascii_uppercase() { 14.0 } else { 10.0 };
    FontChar {
        id,
        x: (id % 16) as f32 * 16.0,
        y: (id / 16) as f32 * 16.0,
        width,
        height,
        xoffset: 0.0,
        yoffset: 2.0,
        xadvance,
        page: Some(0),
    }
}

pub(crate) fn space() -> FontChar {
    FontChar {
        width: 0.0,
        height: 0.0,
        ..glyph(' ', 0.0, 4.0)
    }
}

pub(crate) fn font() -> Font {
    let mut chars = vec![space()];
    chars.extend("ABH".chars().map(|ch| glyph(ch, 9.0, 10.0)));
    chars.extend("abcdefghijklmnopqrstuvwyz".chars().map(|ch| glyph(ch, 7.0, 8.0)));

    let kernings = vec![FontKerning {
        first: u32::from('A'),
        second: u32::from('B'),
        amount: -5.0,
    }];

    Font::new(chars, kernings, common())
}
