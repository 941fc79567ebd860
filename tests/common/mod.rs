//! A tiny sfnt assembler for the integration tests.
//!
//! Builds a 60-glyph TrueType face: `.notdef`, `A`..=`Z` as glyphs 1..=26,
//! space as glyph 27, and the Hebrew block `U+05D0..=U+05EA` as glyphs
//! 30... Glyph 1 carries a real box outline; everything else is empty.

#![allow(dead_code)]

pub const UNITS_PER_EM: u16 = 1000;
pub const NUM_GLYPHS: u16 = 60;
pub const ADVANCE: u16 = 600;
pub const SPACE_ADVANCE: u16 = 250;

fn push_u16(out: &mut Vec<u8>, value: u16) {
    out.extend_from_slice(&value.to_be_bytes());
}

fn push_i16(out: &mut Vec<u8>, value: i16) {
    out.extend_from_slice(&value.to_be_bytes());
}

fn push_u32(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_be_bytes());
}

pub fn head() -> Vec<u8> {
    let mut out = Vec::new();
    push_u32(&mut out, 0x00010000); // version
    push_u32(&mut out, 0); // fontRevision
    push_u32(&mut out, 0); // checkSumAdjustment
    push_u32(&mut out, 0x5F0F3CF5); // magicNumber
    push_u16(&mut out, 0); // flags
    push_u16(&mut out, UNITS_PER_EM);
    out.extend_from_slice(&[0; 16]); // created + modified
    push_i16(&mut out, 0); // xMin
    push_i16(&mut out, -200); // yMin
    push_i16(&mut out, 1000); // xMax
    push_i16(&mut out, 800); // yMax
    push_u16(&mut out, 0); // macStyle
    push_u16(&mut out, 8); // lowestRecPPEM
    push_i16(&mut out, 2); // fontDirectionHint
    push_i16(&mut out, 0); // indexToLocFormat: short
    push_i16(&mut out, 0); // glyphDataFormat
    out
}

pub fn hhea() -> Vec<u8> {
    let mut out = Vec::new();
    push_u32(&mut out, 0x00010000); // version
    push_i16(&mut out, 800); // ascender
    push_i16(&mut out, -200); // descender
    push_i16(&mut out, 0); // lineGap
    push_u16(&mut out, 1000); // advanceWidthMax
    push_i16(&mut out, 0); // minLeftSideBearing
    push_i16(&mut out, 0); // minRightSideBearing
    push_i16(&mut out, 1000); // xMaxExtent
    push_i16(&mut out, 1); // caretSlopeRise
    push_i16(&mut out, 0); // caretSlopeRun
    push_i16(&mut out, 0); // caretOffset
    out.extend_from_slice(&[0; 8]); // reserved
    push_i16(&mut out, 0); // metricDataFormat
    push_u16(&mut out, NUM_GLYPHS); // numberOfHMetrics
    out
}

pub fn maxp() -> Vec<u8> {
    let mut out = Vec::new();
    push_u32(&mut out, 0x00010000); // version
    push_u16(&mut out, NUM_GLYPHS);
    out.extend_from_slice(&[0; 26]);
    out
}

pub fn os2() -> Vec<u8> {
    let mut out = vec![0; 96];
    out[0..2].copy_from_slice(&4u16.to_be_bytes()); // version
    out[4..6].copy_from_slice(&400u16.to_be_bytes()); // usWeightClass
    out[6..8].copy_from_slice(&5u16.to_be_bytes()); // usWidthClass
    out[62..64].copy_from_slice(&0x0040u16.to_be_bytes()); // fsSelection: regular
    out[68..70].copy_from_slice(&750i16.to_be_bytes()); // sTypoAscender
    out[70..72].copy_from_slice(&(-250i16).to_be_bytes()); // sTypoDescender
    out[72..74].copy_from_slice(&0i16.to_be_bytes()); // sTypoLineGap
    out[74..76].copy_from_slice(&800u16.to_be_bytes()); // usWinAscent
    out[76..78].copy_from_slice(&200u16.to_be_bytes()); // usWinDescent
    out[86..88].copy_from_slice(&500i16.to_be_bytes()); // sxHeight
    out[88..90].copy_from_slice(&700i16.to_be_bytes()); // sCapHeight
    out
}

pub fn name() -> Vec<u8> {
    let mut out = Vec::new();
    push_u16(&mut out, 0); // version
    push_u16(&mut out, 1); // count
    push_u16(&mut out, 18); // storage offset
    // Family name record, Windows Unicode BMP, "Test".
    push_u16(&mut out, 3); // platform
    push_u16(&mut out, 1); // encoding
    push_u16(&mut out, 0x0409); // language
    push_u16(&mut out, 1); // name id
    push_u16(&mut out, 8); // length
    push_u16(&mut out, 0); // offset
    for unit in "Test".encode_utf16() {
        push_u16(&mut out, unit);
    }
    out
}

pub fn post() -> Vec<u8> {
    let mut out = Vec::new();
    push_u32(&mut out, 0x00030000); // version
    push_u32(&mut out, 0); // italicAngle
    push_i16(&mut out, -75); // underlinePosition
    push_i16(&mut out, 50); // underlineThickness
    push_u32(&mut out, 0); // isFixedPitch
    out.extend_from_slice(&[0; 16]);
    out
}

/// A format 4 cmap over `(start, end, delta)` segments; the terminal
/// segment is added automatically.
pub fn cmap_format4(segments: &[(u16, u16, i16)]) -> Vec<u8> {
    let mut all: Vec<(u16, u16, i16)> = segments.to_vec();
    all.push((0xFFFF, 0xFFFF, 1));
    let seg_count = all.len() as u16;

    let mut subtable = Vec::new();
    push_u16(&mut subtable, 4); // format
    push_u16(&mut subtable, 16 + seg_count * 8); // length
    push_u16(&mut subtable, 0); // language
    push_u16(&mut subtable, seg_count * 2);
    push_u16(&mut subtable, 2); // searchRange (unused by the parser)
    push_u16(&mut subtable, 0); // entrySelector
    push_u16(&mut subtable, 0); // rangeShift
    for &(_, end, _) in &all {
        push_u16(&mut subtable, end);
    }
    push_u16(&mut subtable, 0); // reservedPad
    for &(start, _, _) in &all {
        push_u16(&mut subtable, start);
    }
    for &(_, _, delta) in &all {
        push_i16(&mut subtable, delta);
    }
    for _ in &all {
        push_u16(&mut subtable, 0); // idRangeOffset
    }

    let mut out = Vec::new();
    push_u16(&mut out, 0); // version
    push_u16(&mut out, 1); // record count
    push_u16(&mut out, 3); // platform: Windows
    push_u16(&mut out, 1); // encoding: Unicode BMP
    push_u32(&mut out, 12); // offset
    out.extend_from_slice(&subtable);
    out
}

/// The default character mapping: space, A..Z, the Hebrew block.
pub fn cmap() -> Vec<u8> {
    cmap_format4(&[
        (0x0020, 0x0020, 27 - 0x0020),
        (0x0041, 0x005A, -0x0040),
        (0x05D0, 0x05EA, 30 - 0x05D0),
    ])
}

pub fn hmtx() -> Vec<u8> {
    let mut out = Vec::new();
    for glyph in 0..NUM_GLYPHS {
        let advance = match glyph {
            0 => 500,
            27 => SPACE_ADVANCE,
            _ => ADVANCE,
        };
        push_u16(&mut out, advance);
        push_i16(&mut out, 50); // lsb
    }
    out
}

/// A box outline for glyph 1; every other glyph is empty.
pub fn glyf() -> Vec<u8> {
    let mut out = Vec::new();
    push_i16(&mut out, 1); // numberOfContours
    push_i16(&mut out, 50); // xMin
    push_i16(&mut out, 0); // yMin
    push_i16(&mut out, 550); // xMax
    push_i16(&mut out, 700); // yMax
    push_u16(&mut out, 3); // endPtsOfContours[0]
    push_u16(&mut out, 0); // instructionLength
    out.extend_from_slice(&[51, 33, 17, 33]); // flags
    out.push(50); // x: +50
    push_i16(&mut out, 500); // x: +500
    push_i16(&mut out, -500); // x: -500 (third point keeps x)
    push_i16(&mut out, 700); // y: +700 (third point)
    out.push(0); // padding to an even length
    out
}

pub fn loca() -> Vec<u8> {
    let glyph1_len = 26u16;
    let mut out = Vec::new();
    push_u16(&mut out, 0); // glyph 0 start
    push_u16(&mut out, 0); // glyph 1 start
    for _ in 2..=NUM_GLYPHS {
        push_u16(&mut out, glyph1_len / 2);
    }
    out
}

/// Assembles a GSUB/GPOS table with one script (`DFLT`), one feature and
/// one lookup with a single subtable.
pub fn layout_table(feature_tag: &[u8; 4], lookup_type: u16, subtable: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    push_u32(&mut out, 0x00010000); // version
    push_u16(&mut out, 10); // scriptList offset
    push_u16(&mut out, 30); // featureList offset
    push_u16(&mut out, 44); // lookupList offset

    // ScriptList.
    push_u16(&mut out, 1); // count
    out.extend_from_slice(b"DFLT");
    push_u16(&mut out, 8); // script offset
    // Script.
    push_u16(&mut out, 4); // defaultLangSys offset
    push_u16(&mut out, 0); // langSysCount
    // LangSys.
    push_u16(&mut out, 0); // lookupOrderOffset
    push_u16(&mut out, 0xFFFF); // requiredFeatureIndex
    push_u16(&mut out, 1); // featureIndexCount
    push_u16(&mut out, 0);

    // FeatureList.
    push_u16(&mut out, 1); // count
    out.extend_from_slice(feature_tag);
    push_u16(&mut out, 8); // feature offset
    // Feature.
    push_u16(&mut out, 0); // featureParamsOffset
    push_u16(&mut out, 1); // lookupIndexCount
    push_u16(&mut out, 0);

    // LookupList.
    push_u16(&mut out, 1); // count
    push_u16(&mut out, 4); // lookup offset
    // Lookup.
    push_u16(&mut out, lookup_type);
    push_u16(&mut out, 0); // flags
    push_u16(&mut out, 1); // subtable count
    push_u16(&mut out, 8); // subtable offset
    out.extend_from_slice(subtable);
    out
}

/// GPOS type 1 format 1: a uniform x-advance adjustment over `glyphs`.
pub fn gpos_single_x_advance(glyphs: &[u16], x_advance: i16) -> Vec<u8> {
    let mut out = Vec::new();
    push_u16(&mut out, 1); // format
    push_u16(&mut out, 8); // coverage offset
    push_u16(&mut out, 0x0004); // valueFormat: xAdvance
    push_i16(&mut out, x_advance);
    // Coverage.
    push_u16(&mut out, 1); // format
    push_u16(&mut out, glyphs.len() as u16);
    for &glyph in glyphs {
        push_u16(&mut out, glyph);
    }
    out
}

/// GPOS type 1 format 1 with x and y placement.
pub fn gpos_single_placement(glyphs: &[u16], x: i16, y: i16) -> Vec<u8> {
    let mut out = Vec::new();
    push_u16(&mut out, 1); // format
    push_u16(&mut out, 10); // coverage offset
    push_u16(&mut out, 0x0003); // valueFormat: xPlacement | yPlacement
    push_i16(&mut out, x);
    push_i16(&mut out, y);
    // Coverage.
    push_u16(&mut out, 1); // format
    push_u16(&mut out, glyphs.len() as u16);
    for &glyph in glyphs {
        push_u16(&mut out, glyph);
    }
    out
}

/// GPOS type 2 format 1: one `(first, second)` pair with an x-advance
/// adjustment on the first glyph.
pub fn gpos_pair_x_advance(first: u16, second: u16, x_advance: i16) -> Vec<u8> {
    let mut out = Vec::new();
    push_u16(&mut out, 1); // format
    push_u16(&mut out, 18); // coverage offset
    push_u16(&mut out, 0x0004); // valueFormat1: xAdvance
    push_u16(&mut out, 0); // valueFormat2
    push_u16(&mut out, 1); // pairSetCount
    push_u16(&mut out, 12); // pairSet offset
    // PairSet.
    push_u16(&mut out, 1); // pairValueCount
    push_u16(&mut out, second);
    push_i16(&mut out, x_advance);
    // Coverage.
    push_u16(&mut out, 1); // format
    push_u16(&mut out, 1);
    push_u16(&mut out, first);
    out
}

/// GPOS type 3 format 1: every glyph in `glyphs` gets the same entry and
/// exit anchors.
pub fn gpos_cursive(glyphs: &[u16], entry: (i16, i16), exit: (i16, i16)) -> Vec<u8> {
    let record_count = glyphs.len() as u16;
    let records_end = 6 + record_count * 4;
    let entry_offset = records_end;
    let exit_offset = records_end + 6;
    let coverage_offset = records_end + 12;

    let mut out = Vec::new();
    push_u16(&mut out, 1); // format
    push_u16(&mut out, coverage_offset);
    push_u16(&mut out, record_count);
    for _ in glyphs {
        push_u16(&mut out, entry_offset);
        push_u16(&mut out, exit_offset);
    }
    // Entry anchor.
    push_u16(&mut out, 1); // anchor format
    push_i16(&mut out, entry.0);
    push_i16(&mut out, entry.1);
    // Exit anchor.
    push_u16(&mut out, 1);
    push_i16(&mut out, exit.0);
    push_i16(&mut out, exit.1);
    // Coverage.
    push_u16(&mut out, 1);
    push_u16(&mut out, record_count);
    for &glyph in glyphs {
        push_u16(&mut out, glyph);
    }
    out
}

/// GSUB type 4 format 1: `first + second -> ligature`.
pub fn gsub_ligature(first: u16, second: u16, ligature: u16) -> Vec<u8> {
    let mut out = Vec::new();
    push_u16(&mut out, 1); // format
    push_u16(&mut out, 18); // coverage offset
    push_u16(&mut out, 1); // ligatureSetCount
    push_u16(&mut out, 8); // ligatureSet offset
    // LigatureSet.
    push_u16(&mut out, 1); // ligatureCount
    push_u16(&mut out, 4); // ligature offset
    // Ligature.
    push_u16(&mut out, ligature);
    push_u16(&mut out, 2); // componentCount
    push_u16(&mut out, second);
    // Coverage.
    push_u16(&mut out, 1);
    push_u16(&mut out, 1);
    push_u16(&mut out, first);
    out
}

/// GSUB type 1 format 1: every covered glyph shifts by `delta`.
pub fn gsub_single_delta(glyphs: &[u16], delta: i16) -> Vec<u8> {
    let mut out = Vec::new();
    push_u16(&mut out, 1); // format
    push_u16(&mut out, 6); // coverage offset
    push_i16(&mut out, delta);
    // Coverage.
    push_u16(&mut out, 1);
    push_u16(&mut out, glyphs.len() as u16);
    for &glyph in glyphs {
        push_u16(&mut out, glyph);
    }
    out
}

/// An OpenType `kern` table with one horizontal format 0 pair.
pub fn kern_pair(left: u16, right: u16, value: i16) -> Vec<u8> {
    let mut out = Vec::new();
    push_u16(&mut out, 0); // version
    push_u16(&mut out, 1); // nTables
    push_u16(&mut out, 0); // subtable version
    push_u16(&mut out, 20); // length
    out.push(0); // format
    out.push(1); // coverage: horizontal
    push_u16(&mut out, 1); // nPairs
    push_u16(&mut out, 6); // searchRange
    push_u16(&mut out, 0); // entrySelector
    push_u16(&mut out, 0); // rangeShift
    push_u16(&mut out, left);
    push_u16(&mut out, right);
    push_i16(&mut out, value);
    out
}

/// Assembles an sfnt from `(tag, payload)` pairs.
pub fn build_font(tables: &[(&[u8; 4], Vec<u8>)]) -> Vec<u8> {
    let num_tables = tables.len() as u16;
    let mut out = Vec::new();
    push_u32(&mut out, 0x00010000); // sfnt version
    push_u16(&mut out, num_tables);
    push_u16(&mut out, 16); // searchRange
    push_u16(&mut out, 0); // entrySelector
    push_u16(&mut out, 0); // rangeShift

    let mut offset = 12 + u32::from(num_tables) * 16;
    let mut payloads = Vec::new();
    for (tag, payload) in tables {
        out.extend_from_slice(*tag);
        push_u32(&mut out, 0); // checksum
        push_u32(&mut out, offset);
        push_u32(&mut out, payload.len() as u32);

        let mut padded = payload.clone();
        while padded.len() % 4 != 0 {
            padded.push(0);
        }
        offset += padded.len() as u32;
        payloads.push(padded);
    }

    for payload in payloads {
        out.extend_from_slice(&payload);
    }
    out
}

/// The required tables of the test face.
pub fn base_tables() -> Vec<(&'static [u8; 4], Vec<u8>)> {
    vec![
        (b"head", head()),
        (b"hhea", hhea()),
        (b"maxp", maxp()),
        (b"OS/2", os2()),
        (b"name", name()),
        (b"post", post()),
        (b"cmap", cmap()),
        (b"hmtx", hmtx()),
        (b"loca", loca()),
        (b"glyf", glyf()),
    ]
}

/// A complete minimal font.
pub fn sample_font() -> Vec<u8> {
    build_font(&base_tables())
}
