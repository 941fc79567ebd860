mod common;

use typeshape::{layout_str, Face, FontFile, TextOptions};

/// Pixel units equal font units at this size.
fn px_options() -> TextOptions {
    TextOptions {
        size_px: 1000.0,
        ..TextOptions::default()
    }
}

fn face_with(extra: Vec<(&'static [u8; 4], Vec<u8>)>) -> FontFile {
    let mut tables = common::base_tables();
    tables.extend(extra);
    FontFile::parse(common::build_font(&tables), 0).unwrap()
}

#[test]
fn ascii_maps_in_order_with_cumulative_advances() {
    let file = face_with(Vec::new());
    let face = Face::parse(&file).unwrap();

    let glyphs = layout_str(&face, "ABC", &px_options()).unwrap();
    assert_eq!(glyphs.len(), 3);
    assert_eq!(glyphs[0].glyph_id.0, 1);
    assert_eq!(glyphs[1].glyph_id.0, 2);
    assert_eq!(glyphs[2].glyph_id.0, 3);

    assert_eq!(glyphs[0].origin.0, 0.0);
    assert_eq!(glyphs[1].origin.0, 600.0);
    assert_eq!(glyphs[2].origin.0, 1200.0);

    // Clusters are monotonic and identify the source codepoints.
    assert_eq!(glyphs[0].cluster, 0);
    assert_eq!(glyphs[1].cluster, 1);
    assert_eq!(glyphs[2].cluster, 2);
}

#[test]
fn missing_codepoints_fall_back_to_notdef() {
    let file = face_with(Vec::new());
    let face = Face::parse(&file).unwrap();

    let glyphs = layout_str(&face, "A\u{4E2D}B", &px_options()).unwrap();
    assert_eq!(glyphs[1].glyph_id.0, 0);
    // The .notdef advance still moves the pen.
    assert_eq!(glyphs[2].origin.0, 600.0 + 500.0);
}

#[test]
fn gpos_single_adjustment_changes_advance() {
    let subtable = common::gpos_single_x_advance(&[1], -50);
    let file = face_with(vec![(b"GPOS", common::layout_table(b"kern", 1, &subtable))]);
    let face = Face::parse(&file).unwrap();

    let glyphs = layout_str(&face, "AB", &px_options()).unwrap();
    assert_eq!(glyphs[1].origin.0, 550.0);
}

#[test]
fn gpos_single_placement_offsets_do_not_move_the_pen() {
    let subtable = common::gpos_single_placement(&[2], 25, 75);
    let file = face_with(vec![(b"GPOS", common::layout_table(b"kern", 1, &subtable))]);
    let face = Face::parse(&file).unwrap();

    let glyphs = layout_str(&face, "BA", &px_options()).unwrap();
    // Placement shifts the rendered origin only (y is flipped to screen
    // space).
    assert_eq!(glyphs[0].origin, (25.0, -75.0));
    assert_eq!(glyphs[1].origin.0, 600.0);
}

#[test]
fn gpos_pair_adjustment_applies_between_the_pair() {
    let subtable = common::gpos_pair_x_advance(1, 2, -100);
    let file = face_with(vec![(b"GPOS", common::layout_table(b"kern", 2, &subtable))]);
    let face = Face::parse(&file).unwrap();

    let glyphs = layout_str(&face, "ABA", &px_options()).unwrap();
    assert_eq!(glyphs[1].origin.0, 500.0);
    // The pair only fires on A->B, not B->A.
    assert_eq!(glyphs[2].origin.0, 1100.0);
}

#[test]
fn gpos_cursive_attachment_chains_glyphs() {
    let subtable = common::gpos_cursive(&[1], (100, 100), (200, 200));
    let file = face_with(vec![(b"GPOS", common::layout_table(b"curs", 3, &subtable))]);
    let face = Face::parse(&file).unwrap();

    let glyphs = layout_str(&face, "AA", &px_options()).unwrap();
    // The first glyph's advance ends at its exit anchor; the second is
    // pulled back so its entry meets the pen, and raised to the exit level.
    assert_eq!(glyphs[0].origin, (0.0, 0.0));
    assert_eq!(glyphs[1].origin, (100.0, -100.0));

    // The outlines overlap.
    assert!(glyphs[1].bounds.x_min < glyphs[0].bounds.x_max);
}

#[test]
fn gsub_ligature_merges_clusters() {
    let subtable = common::gsub_ligature(1, 2, 10);
    let file = face_with(vec![(b"GSUB", common::layout_table(b"liga", 4, &subtable))]);
    let face = Face::parse(&file).unwrap();

    let glyphs = layout_str(&face, "ABC", &px_options()).unwrap();
    assert_eq!(glyphs.len(), 2);
    assert_eq!(glyphs[0].glyph_id.0, 10);
    assert_eq!(glyphs[0].cluster, 0);
    assert_eq!(glyphs[1].glyph_id.0, 3);
    assert_eq!(glyphs[1].cluster, 2);
    // The ligature carries its own advance.
    assert_eq!(glyphs[1].origin.0, 600.0);
}

#[test]
fn gsub_single_substitution_shifts_glyphs() {
    let subtable = common::gsub_single_delta(&[1, 2], 20);
    let file = face_with(vec![(b"GSUB", common::layout_table(b"liga", 1, &subtable))]);
    let face = Face::parse(&file).unwrap();

    let glyphs = layout_str(&face, "AB", &px_options()).unwrap();
    assert_eq!(glyphs[0].glyph_id.0, 21);
    assert_eq!(glyphs[1].glyph_id.0, 22);
}

#[test]
fn kern_table_is_the_gpos_fallback() {
    let file = face_with(vec![(b"kern", common::kern_pair(1, 2, -100))]);
    let face = Face::parse(&file).unwrap();

    let glyphs = layout_str(&face, "AB", &px_options()).unwrap();
    assert_eq!(glyphs[1].origin.0, 500.0);
}

#[test]
fn kern_table_is_ignored_when_gpos_is_present() {
    let subtable = common::gpos_single_x_advance(&[1], -50);
    let file = face_with(vec![
        (b"GPOS", common::layout_table(b"kern", 1, &subtable)),
        (b"kern", common::kern_pair(1, 2, -100)),
    ]);
    let face = Face::parse(&file).unwrap();

    let glyphs = layout_str(&face, "AB", &px_options()).unwrap();
    assert_eq!(glyphs[1].origin.0, 550.0);
}

#[test]
fn clusters_stay_monotonic_after_substitutions() {
    let subtable = common::gsub_ligature(1, 2, 10);
    let file = face_with(vec![(b"GSUB", common::layout_table(b"liga", 4, &subtable))]);
    let face = Face::parse(&file).unwrap();

    let glyphs = layout_str(&face, "ABABAB", &px_options()).unwrap();
    let clusters: Vec<u32> = glyphs.iter().map(|g| g.cluster).collect();
    assert_eq!(clusters, [0, 2, 4]);
    for pair in clusters.windows(2) {
        assert!(pair[0] <= pair[1]);
    }
}
