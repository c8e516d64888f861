//! Buffer generation for laid out text

mod common;

use approx::assert_relative_eq;
use msdf_text::prelude::*;
use msdf_text::text::TextVertex;

fn build(text: &str, geometry: &GeometryOptions) -> TextGeometry {
    TextGeometry::build(text, &common::font(), &LayoutOptions::default(), geometry).unwrap()
}

#[test]
fn test_buffer_lengths_follow_visible_glyphs() {
    let geometry = build("hello world", &GeometryOptions::default());
    let quads = 10;

    assert_eq!(geometry.glyph_count(), quads);
    assert_eq!(geometry.attributes.positions.len(), quads * 4 * 3);
    assert_eq!(geometry.attributes.uvs.len(), quads * 4 * 2);
    assert_eq!(geometry.attributes.layout_uvs.len(), quads * 4 * 2);
    assert_eq!(geometry.attributes.centers.len(), quads * 4 * 2);
    assert_eq!(geometry.infos.word_index.len(), quads * 4);
    assert_eq!(geometry.infos.line_letters_total.len(), quads * 4);
    assert_eq!(geometry.indices.len(), quads * 6);

    assert_eq!(geometry.lines_total, 1);
    assert_eq!(geometry.words_total, 2);
    assert_eq!(geometry.letters_total, 10);
}

#[test]
fn test_whitespace_only_text_is_empty() {
    let geometry = build("   ", &GeometryOptions::default());
    assert!(geometry.is_empty());
    assert!(geometry.attributes.positions.is_empty());
    assert!(geometry.attributes.uvs.is_empty());
    assert!(geometry.vertex_bytes().is_empty());
}

#[test]
fn test_winding_orders() {
    let clockwise = build("ab", &GeometryOptions::default());
    assert_eq!(clockwise.indices, vec![0, 1, 2, 0, 2, 3, 4, 5, 6, 4, 6, 7]);

    let options = GeometryOptions {
        winding: Winding::CounterClockwise,
        ..GeometryOptions::default()
    };
    let counter_clockwise = build("ab", &options);
    assert_eq!(counter_clockwise.indices, vec![0, 1, 2, 2, 1, 3, 4, 5, 6, 6, 5, 7]);
}

#[test]
fn test_quad_positions_and_uvs() {
    let geometry = build("a", &GeometryOptions::default());
    let positions = &geometry.attributes.positions;
    let uvs = &geometry.attributes.uvs;

    // One line: the pen sits at y = -(32 - 8), the bitmap 6 below it
    assert_eq!(&positions[0..3], &[0.0, 18.0, 0.0]);
    assert_eq!(&positions[3..6], &[0.0, 4.0, 0.0]);
    assert_eq!(&positions[6..9], &[10.0, 4.0, 0.0]);
    assert_eq!(&positions[9..12], &[10.0, 18.0, 0.0]);

    // 'a' is cell (1, 6) of a 512x256 atlas with 32px cells
    assert_relative_eq!(uvs[0], 32.0 / 512.0);
    assert_relative_eq!(uvs[1], 64.0 / 256.0);
    assert_relative_eq!(uvs[3], 50.0 / 256.0);
    assert_relative_eq!(uvs[4], 42.0 / 512.0);

    let unflipped = build("a", &GeometryOptions { flip_v: false, ..GeometryOptions::default() });
    assert_relative_eq!(unflipped.attributes.uvs[1], 192.0 / 256.0);
    assert_relative_eq!(unflipped.attributes.uvs[3], 206.0 / 256.0);
}

#[test]
fn test_centers_repeat_per_vertex() {
    let geometry = build("a", &GeometryOptions::default());
    let centers = &geometry.attributes.centers;
    // Centers share the negated y of the positions, between 4 and 18 here
    for vertex in centers.chunks_exact(2) {
        assert_relative_eq!(vertex[0], 5.0);
        assert_relative_eq!(vertex[1], 11.0);
    }
}

#[test]
fn test_info_channels() {
    let geometry = build("ab cd", &GeometryOptions::default());
    let word_index: Vec<f32> = geometry.infos.word_index.iter().step_by(4).copied().collect();
    let letter_index: Vec<f32> = geometry.infos.letter_index.iter().step_by(4).copied().collect();
    assert_eq!(word_index, vec![0.0, 0.0, 1.0, 1.0]);
    assert_eq!(letter_index, vec![0.0, 1.0, 2.0, 3.0]);
    assert_eq!(geometry.infos.words_total, 2);
}

#[test]
fn test_interleaved_upload() {
    let geometry = build("hi", &GeometryOptions::default());
    let vertices = geometry.interleaved();
    assert_eq!(vertices.len(), 8);
    assert_eq!(vertices[1].position, [0.0, 4.0, 0.0]);
    assert_eq!(geometry.vertex_bytes().len(), 8 * std::mem::size_of::<TextVertex>());
    assert_eq!(geometry.index_bytes().len(), geometry.indices.len() * 2);
}

#[test]
fn test_font_file_loading() {
    let path = common::temp_path("font.json");
    std::fs::write(&path, common::font_json()).unwrap();

    let font = Font::from_json_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(font.pages(), ["fixture.png".to_string()]);
    assert_eq!(font.distance_field().map(|field| field.field_type.as_str()), Some("msdf"));
    assert_eq!(font.kerning(u32::from('A'), u32::from('B')), -5.0);

    let missing = Font::from_json_file(common::temp_path("missing.json"));
    assert!(matches!(missing, Err(FontError::Io(_))));
}
