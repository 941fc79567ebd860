mod common;

use std::io::Write;

use typeshape::{fonts_in_collection, Error, Face, FontFile, OutlineKind, Tag};

#[test]
fn empty_font() {
    assert!(matches!(
        FontFile::parse(Vec::new(), 0),
        Err(Error::InvalidFontFile(_))
    ));
}

#[test]
fn unknown_magic() {
    let data = vec![
        0xDE, 0xAD, 0xBE, 0xEF, // magic
        0x00, 0x00, // numTables: 0
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    ];
    assert_eq!(
        FontFile::parse(data, 0).unwrap_err(),
        Error::UnsupportedFontFormat(0xDEADBEEF)
    );
}

#[test]
fn zero_tables() {
    let data = vec![
        0x00, 0x01, 0x00, 0x00, // magic
        0x00, 0x00, // numTables: 0
        0x00, 0x00, // searchRange
        0x00, 0x00, // entrySelector
        0x00, 0x00, // rangeShift
    ];

    let file = FontFile::parse(data, 0).unwrap();
    assert_eq!(
        Face::parse(&file).unwrap_err(),
        Error::MissingFontTable(Tag::from_bytes(b"head"))
    );
}

#[test]
fn duplicated_tag_is_rejected() {
    let mut tables = common::base_tables();
    tables.push((b"name", common::name()));
    let data = common::build_font(&tables);

    assert_eq!(
        FontFile::parse(data, 0).unwrap_err(),
        Error::InvalidFontFile("duplicated table")
    );
}

#[test]
fn parses_a_minimal_face() {
    let file = FontFile::parse(common::sample_font(), 0).unwrap();
    assert_eq!(file.outline_kind(), OutlineKind::TrueType);
    assert!(!file.is_compressed());
    assert_eq!(file.directory().len(), 10);

    let face = Face::parse(&file).unwrap();
    assert_eq!(face.units_per_em(), 1000);
    assert_eq!(face.number_of_glyphs(), 60);
    assert_eq!(face.ascender(), 800);
    assert_eq!(face.descender(), -200);
    assert_eq!(face.family_name().as_deref(), Some("Test"));
    assert!(!face.is_italic());
}

#[test]
fn directory_parsing_is_deterministic() {
    let data = common::sample_font();
    let a = FontFile::parse(data.clone(), 0).unwrap();
    let b = FontFile::parse(data, 0).unwrap();

    assert_eq!(a.directory().len(), b.directory().len());
    for (tag, record) in a.directory() {
        let other = b.directory()[tag];
        assert_eq!(record.offset, other.offset);
        assert_eq!(record.length, other.length);
    }
}

#[test]
fn glyph_metrics_and_outline() {
    let file = FontFile::parse(common::sample_font(), 0).unwrap();
    let face = Face::parse(&file).unwrap();

    let a = face
        .glyph_index(typeshape::CodePoint::new(u32::from(b'A')).unwrap())
        .unwrap();
    assert_eq!(a.0, 1);
    assert_eq!(face.glyph_hor_advance(a), Some(600));
    assert_eq!(face.glyph_hor_side_bearing(a), Some(50));

    let bbox = face.glyph_bounding_box(a).unwrap();
    assert_eq!((bbox.x_min, bbox.y_min, bbox.x_max, bbox.y_max), (50, 0, 550, 700));

    // Unmapped codepoints surface as an error on the explicit lookup path.
    assert_eq!(
        face.glyph_index(typeshape::CodePoint::new(0x4E2D).unwrap()),
        Err(Error::GlyphNotFound(0x4E2D))
    );
}

#[test]
fn collection_indexing() {
    let font = common::sample_font();

    let mut data = Vec::new();
    data.extend(b"ttcf");
    data.extend(&0x00010000u32.to_be_bytes());
    data.extend(&2u32.to_be_bytes()); // numFonts
    let base = 12 + 8;
    data.extend(&(base as u32).to_be_bytes());
    data.extend(&(base as u32).to_be_bytes());
    data.extend(&font);

    assert_eq!(fonts_in_collection(&data), Some(2));

    // Both entries anchor the same directory; the table offsets inside it
    // are relative to the file start, so shift them.
    let mut shifted = data.clone();
    let num_tables = u16::from_be_bytes([font[4], font[5]]);
    for i in 0..num_tables {
        let record_start = base + 12 + usize::from(i) * 16;
        let offset_pos = record_start + 8;
        let old = u32::from_be_bytes([
            shifted[offset_pos],
            shifted[offset_pos + 1],
            shifted[offset_pos + 2],
            shifted[offset_pos + 3],
        ]);
        shifted[offset_pos..offset_pos + 4].copy_from_slice(&(old + base as u32).to_be_bytes());
    }

    let file = FontFile::parse(shifted.clone(), 1).unwrap();
    let face = Face::parse(&file).unwrap();
    assert_eq!(face.units_per_em(), 1000);

    assert_eq!(
        FontFile::parse(shifted, 2).unwrap_err(),
        Error::FaceIndexOutOfBounds
    );
}

fn zlib(data: &[u8]) -> Vec<u8> {
    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

/// Wraps the sample font's tables into a WOFF1 container.
fn woff1_font() -> Vec<u8> {
    let tables = common::base_tables();

    let mut header = Vec::new();
    header.extend(&0x774F4646u32.to_be_bytes()); // wOFF
    header.extend(&0x00010000u32.to_be_bytes()); // flavor
    header.extend(&0u32.to_be_bytes()); // length
    header.extend(&(tables.len() as u16).to_be_bytes());
    header.extend(&0u16.to_be_bytes()); // reserved
    header.extend(&0u32.to_be_bytes()); // totalSfntSize
    header.extend(&[0; 4]); // version
    header.extend(&[0; 12]); // meta
    header.extend(&[0; 4]); // priv

    let mut directory = Vec::new();
    let mut payloads = Vec::new();
    let mut offset = 44 + tables.len() * 20;
    for (tag, payload) in &tables {
        let compressed = zlib(payload);
        directory.extend_from_slice(*tag);
        directory.extend(&(offset as u32).to_be_bytes());
        directory.extend(&(compressed.len() as u32).to_be_bytes());
        directory.extend(&(payload.len() as u32).to_be_bytes());
        directory.extend(&0u32.to_be_bytes()); // checksum
        offset += compressed.len();
        payloads.push(compressed);
    }

    let mut out = header;
    out.extend(directory);
    for payload in payloads {
        out.extend(payload);
    }
    out
}

#[test]
fn woff1_wrapped_face_works() {
    let file = FontFile::parse(woff1_font(), 0).unwrap();
    assert!(file.is_compressed());

    let face = Face::parse(&file).unwrap();
    assert_eq!(face.units_per_em(), 1000);
    assert_eq!(face.number_of_glyphs(), 60);

    let a = face
        .glyph_index(typeshape::CodePoint::new(u32::from(b'A')).unwrap())
        .unwrap();
    assert_eq!(face.glyph_hor_advance(a), Some(600));
}
