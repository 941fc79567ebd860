mod common;

use typeshape::{
    layout_str, layout_utf16, Face, FontFile, HorizontalAlignment, TextDirection, TextOptions,
};

fn px_options() -> TextOptions {
    TextOptions {
        size_px: 1000.0,
        ..TextOptions::default()
    }
}

fn sample_face_file() -> FontFile {
    FontFile::parse(common::sample_font(), 0).unwrap()
}

#[test]
fn utf16_and_str_inputs_agree() {
    let file = sample_face_file();
    let face = Face::parse(&file).unwrap();

    let from_str = layout_str(&face, "AB C", &px_options()).unwrap();
    let units: Vec<u16> = "AB C".encode_utf16().collect();
    let from_utf16 = layout_utf16(&face, &units, &px_options()).unwrap();

    assert_eq!(from_str.len(), from_utf16.len());
    for (a, b) in from_str.iter().zip(&from_utf16) {
        assert_eq!(a.glyph_id, b.glyph_id);
        assert_eq!(a.origin, b.origin);
    }
}

#[test]
fn rtl_run_is_emitted_in_visual_order() {
    let file = sample_face_file();
    let face = Face::parse(&file).unwrap();

    // Alef (glyph 30) then Bet (glyph 31), logically; Alef is rendered on
    // the right.
    let glyphs = layout_str(&face, "\u{05D0}\u{05D1}", &px_options()).unwrap();
    assert_eq!(glyphs.len(), 2);
    assert_eq!(glyphs[0].glyph_id.0, 31);
    assert_eq!(glyphs[0].origin.0, 0.0);
    assert_eq!(glyphs[1].glyph_id.0, 30);
    assert_eq!(glyphs[1].origin.0, 600.0);
}

#[test]
fn mixed_direction_text_orders_by_level() {
    let file = sample_face_file();
    let face = Face::parse(&file).unwrap();

    // "A <alef><bet> B" in an LTR paragraph: the Hebrew word flips.
    let glyphs = layout_str(&face, "A \u{05D0}\u{05D1} B", &px_options()).unwrap();
    let ids: Vec<u16> = glyphs.iter().map(|g| g.glyph_id.0).collect();
    assert_eq!(ids, [1, 27, 31, 30, 27, 2]);

    // x positions strictly increase in visual order.
    for pair in glyphs.windows(2) {
        assert!(pair[0].origin.0 < pair[1].origin.0);
    }
}

#[test]
fn forced_direction_overrides_detection() {
    let file = sample_face_file();
    let face = Face::parse(&file).unwrap();

    let options = TextOptions {
        direction: TextDirection::RightToLeft,
        ..px_options()
    };
    let glyphs = layout_str(&face, "AB", &options).unwrap();
    // In an RTL paragraph the Latin letters still form an LTR run, but the
    // run itself is laid out from the line start.
    assert_eq!(glyphs[0].glyph_id.0, 1);
    assert_eq!(glyphs[1].glyph_id.0, 2);
}

#[test]
fn tabs_expand_to_space_advances() {
    let file = sample_face_file();
    let face = Face::parse(&file).unwrap();

    let glyphs = layout_str(&face, "A\tB", &px_options()).unwrap();
    // The tab itself emits no glyph.
    assert_eq!(glyphs.len(), 2);
    assert_eq!(glyphs[1].origin.0, 600.0 + 4.0 * 250.0);
}

#[test]
fn newline_advances_the_baseline() {
    let file = sample_face_file();
    let face = Face::parse(&file).unwrap();

    let glyphs = layout_str(&face, "A\nB", &px_options()).unwrap();
    assert_eq!(glyphs.len(), 2);
    assert_eq!(glyphs[0].origin, (0.0, 0.0));
    // ascender - descender + line gap = 1000.
    assert_eq!(glyphs[1].origin, (0.0, 1000.0));
}

#[test]
fn crlf_is_one_break() {
    let file = sample_face_file();
    let face = Face::parse(&file).unwrap();

    let glyphs = layout_str(&face, "A\r\nB", &px_options()).unwrap();
    assert_eq!(glyphs.len(), 2);
    assert_eq!(glyphs[1].origin, (0.0, 1000.0));
}

#[test]
fn wrapping_breaks_at_spaces() {
    let file = sample_face_file();
    let face = Face::parse(&file).unwrap();

    let options = TextOptions {
        wrapping_length: Some(1250.0),
        ..px_options()
    };
    let glyphs = layout_str(&face, "AA AA", &options).unwrap();

    // Two As and the space fit; the second word wraps.
    assert_eq!(glyphs.len(), 5);
    assert_eq!(glyphs[0].origin, (0.0, 0.0));
    assert_eq!(glyphs[3].origin, (0.0, 1000.0));
    assert_eq!(glyphs[4].origin, (600.0, 1000.0));
}

#[test]
fn center_alignment_shifts_lines() {
    let file = sample_face_file();
    let face = Face::parse(&file).unwrap();

    let options = TextOptions {
        wrapping_length: Some(2000.0),
        horizontal_alignment: HorizontalAlignment::Center,
        ..px_options()
    };
    let glyphs = layout_str(&face, "AB", &options).unwrap();
    // Line width 1200, box 2000: centered at 400.
    assert_eq!(glyphs[0].origin.0, 400.0);
    assert_eq!(glyphs[1].origin.0, 1000.0);
}

#[test]
fn origin_translates_everything() {
    let file = sample_face_file();
    let face = Face::parse(&file).unwrap();

    let options = TextOptions {
        origin: (100.0, 50.0),
        ..px_options()
    };
    let glyphs = layout_str(&face, "A", &options).unwrap();
    assert_eq!(glyphs[0].origin, (100.0, 50.0));
    // The bbox is translated with the glyph (y grows downward).
    assert_eq!(glyphs[0].bounds.x_min, 150.0);
    assert_eq!(glyphs[0].bounds.y_max, 50.0);
    assert_eq!(glyphs[0].bounds.y_min, 50.0 - 700.0);
}

mod rendering {
    use super::*;
    use typeshape::{render_text, GlyphRenderer, RectF, Vec2};

    #[derive(Default)]
    struct RecordingRenderer {
        events: Vec<String>,
        points: Vec<Vec2>,
    }

    impl GlyphRenderer for RecordingRenderer {
        fn begin_text(&mut self, _bounds: RectF) {
            self.events.push("begin_text".into());
        }
        fn begin_glyph(&mut self, glyph_id: u16, _bounds: RectF) {
            self.events.push(format!("begin_glyph {}", glyph_id));
        }
        fn move_to(&mut self, p: Vec2) {
            self.events.push("move_to".into());
            self.points.push(p);
        }
        fn line_to(&mut self, p: Vec2) {
            self.events.push("line_to".into());
            self.points.push(p);
        }
        fn quadratic_to(&mut self, _c: Vec2, p: Vec2) {
            self.events.push("quadratic_to".into());
            self.points.push(p);
        }
        fn cubic_to(&mut self, _c1: Vec2, _c2: Vec2, p: Vec2) {
            self.events.push("cubic_to".into());
            self.points.push(p);
        }
        fn end_figure(&mut self) {
            self.events.push("end_figure".into());
        }
        fn end_glyph(&mut self) {
            self.events.push("end_glyph".into());
        }
        fn end_text(&mut self) {
            self.events.push("end_text".into());
        }
    }

    #[test]
    fn renderer_receives_nested_events() {
        let file = sample_face_file();
        let face = Face::parse(&file).unwrap();

        let mut renderer = RecordingRenderer::default();
        render_text(&face, "AB", &px_options(), &mut renderer).unwrap();

        assert_eq!(renderer.events.first().map(String::as_str), Some("begin_text"));
        assert_eq!(renderer.events.last().map(String::as_str), Some("end_text"));
        assert_eq!(renderer.events.iter().filter(|e| *e == "end_glyph").count(), 2);

        // Glyph 1 has the box outline; its first point is the scaled,
        // y-flipped MoveTo.
        let glyph1_start = renderer
            .events
            .iter()
            .position(|e| e == "begin_glyph 1")
            .unwrap();
        assert_eq!(renderer.events[glyph1_start + 1], "move_to");
        assert_eq!(renderer.points[0], Vec2::new(50.0, 0.0));

        // Glyph 2 is empty: begin/end with no segments.
        let glyph2_start = renderer
            .events
            .iter()
            .position(|e| e == "begin_glyph 2")
            .unwrap();
        assert_eq!(renderer.events[glyph2_start + 1], "end_glyph");
    }
}
