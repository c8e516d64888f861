//! Shared fixtures for integration tests
//!
//! The font is decoded from descriptor JSON, the same path real atlases
//! take. Lowercase glyphs are 10 wide with a 10 advance, uppercase glyphs
//! 14 wide with a 16 advance, and `A` followed by `B` kerns by -5.

#![allow(dead_code)]

use msdf_text::text::Font;
use serde_json::{json, Value};

pub const LINE_HEIGHT: f32 = 32.0;
pub const BASE: f32 = 24.0;
pub const DESCENDER: f32 = LINE_HEIGHT - BASE;

fn glyph(ch: char, width: u32, height: u32, yoffset: u32, xadvance: u32) -> Value {
    let id = u32::from(ch);
    json!({
        "id": id,
        "x": (id % 16) * 32,
        "y": (id / 16) * 32,
        "width": width,
        "height": height,
        "xoffset": 0,
        "yoffset": yoffset,
        "xadvance": xadvance,
        "page": 0
    })
}

/// Descriptor JSON for the fixture font
pub fn font_json() -> String {
    let mut chars = vec![glyph(' ', 0, 0, 0, 8)];
    chars.extend(('a'..='z').map(|ch| glyph(ch, 10, 14, 6, 10)));
    chars.extend(('A'..='Z').map(|ch| glyph(ch, 14, 20, 2, 16)));

    json!({
        "pages": ["fixture.png"],
        "chars": chars,
        "kernings": [{ "first": u32::from('A'), "second": u32::from('B'), "amount": -5 }],
        "common": { "lineHeight": LINE_HEIGHT, "base": BASE, "scaleW": 512, "scaleH": 256 },
        "distanceField": { "fieldType": "msdf", "distanceRange": 4 }
    })
    .to_string()
}

/// The fixture font
pub fn font() -> Font {
    init_logging();
    Font::from_json(&font_json()).unwrap()
}

/// Install a test logger once per test binary
pub fn init_logging() {
    let _ = msdf_text::foundation::logging::try_init();
}

/// A scratch path in the system temp directory
pub fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("msdf_text_{}_{name}", std::process::id()))
}
