//! WOFF 2.0 container support: variable-length table directory, one-shot
//! Brotli decompression and reconstruction of the transformed `glyf`,
//! `loca` and `hmtx` tables.
//!
//! https://www.w3.org/TR/WOFF2/

use std::io::Read;

use crate::parser::{Stream, Tag};
use crate::{Error, Magic};

/// The fixed part of the WOFF2 header.
const HEADER_SIZE: usize = 48;

/// The known-tags table; a directory flag byte of 63 carries an explicit tag.
#[rustfmt::skip]
const KNOWN_TAGS: [&[u8; 4]; 63] = [
    b"cmap", b"head", b"hhea", b"hmtx", b"maxp", b"name", b"OS/2", b"post",
    b"cvt ", b"fpgm", b"glyf", b"loca", b"prep", b"CFF ", b"VORG", b"EBDT",
    b"EBLC", b"gasp", b"hdmx", b"kern", b"LTSH", b"PCLT", b"VDMX", b"vhea",
    b"vmtx", b"BASE", b"GDEF", b"GPOS", b"GSUB", b"EBSC", b"JSTF", b"MATH",
    b"CBDT", b"CBLC", b"COLR", b"CPAL", b"SVG ", b"sbix", b"acnt", b"avar",
    b"bdat", b"bloc", b"bsln", b"cvar", b"fdsc", b"feat", b"fmtx", b"fvar",
    b"gvar", b"hsty", b"just", b"lcar", b"mort", b"morx", b"opbd", b"prop",
    b"trak", b"Zapf", b"Silf", b"Glat", b"Gloc", b"Feat", b"Sill",
];

/// Reads a UIntBase128.
fn read_base128(s: &mut Stream) -> Option<u32> {
    let mut result = 0u32;
    for i in 0..5 {
        let code: u8 = s.read()?;
        // A leading zero is invalid.
        if i == 0 && code == 0x80 {
            return None;
        }
        // The top seven bits about to shift out mean an overflow.
        if result & 0xFE00_0000 != 0 {
            return None;
        }
        result = result << 7 | u32::from(code & 0x7F);
        if code & 0x80 == 0 {
            return Some(result);
        }
    }
    None
}

/// Reads a 255UInt16.
fn read_255_u16(s: &mut Stream) -> Option<u32> {
    const WORD_CODE: u8 = 253;
    const ONE_MORE_BYTE_CODE_2: u8 = 254;
    const ONE_MORE_BYTE_CODE_1: u8 = 255;
    const LOWEST_U_CODE: u32 = 253;

    let code: u8 = s.read()?;
    match code {
        WORD_CODE => s.read::<u16>().map(u32::from),
        ONE_MORE_BYTE_CODE_1 => s.read::<u8>().map(|n| u32::from(n) + LOWEST_U_CODE),
        ONE_MORE_BYTE_CODE_2 => s.read::<u8>().map(|n| u32::from(n) + LOWEST_U_CODE * 2),
        _ => Some(u32::from(code)),
    }
}

#[derive(Clone, Copy, Debug)]
struct DirectoryEntry {
    tag: Tag,
    original_length: u32,
    transform_length: Option<u32>,
    transform_version: u8,
}

impl DirectoryEntry {
    /// The length this table occupies in the decompressed stream.
    #[inline]
    fn stored_length(&self) -> u32 {
        self.transform_length.unwrap_or(self.original_length)
    }

    fn is_transformed(&self) -> bool {
        let glyf_or_loca =
            self.tag == Tag::from_bytes(b"glyf") || self.tag == Tag::from_bytes(b"loca");
        if glyf_or_loca {
            // For glyf and loca version 0 is the transform, 3 is the null
            // transform.
            self.transform_version == 0
        } else {
            self.transform_version != 0
        }
    }
}

/// Parses only the WOFF2 header and table directory: `(flavor, [(tag,
/// original length)])`. The body stays compressed.
pub fn parse_directory(data: &[u8]) -> Result<(u32, Vec<(Tag, u32)>), Error> {
    let mut s = Stream::new(data);
    let signature: u32 = s.read().ok_or(Error::MalformedFont)?;
    if signature != Magic::Woff2 as u32 {
        return Err(Error::InvalidFontFile("not a WOFF2 file"));
    }

    let flavor: u32 = s.read().ok_or(Error::MalformedFont)?;
    if flavor == Magic::Collection as u32 {
        return Err(Error::UnsupportedFontFormat(flavor));
    }

    s.skip::<u32>(); // length
    let num_tables: u16 = s.read().ok_or(Error::MalformedFont)?;
    if data.len() < HEADER_SIZE {
        return Err(Error::MalformedFont);
    }

    let mut s = Stream::new_at(data, HEADER_SIZE).ok_or(Error::MalformedFont)?;
    let mut tables = Vec::with_capacity(usize::from(num_tables));
    for _ in 0..num_tables {
        let flags: u8 = s.read().ok_or(Error::MalformedFont)?;
        let tag_index = flags & 0x3F;
        let transform_version = flags >> 6;

        let tag = if tag_index == 63 {
            s.read::<Tag>().ok_or(Error::MalformedFont)?
        } else {
            Tag::from_bytes(KNOWN_TAGS[usize::from(tag_index)])
        };

        let original_length = read_base128(&mut s).ok_or(Error::MalformedFont)?;

        let entry = DirectoryEntry {
            tag,
            original_length,
            transform_length: None,
            transform_version,
        };
        if entry.is_transformed() {
            read_base128(&mut s).ok_or(Error::MalformedFont)?;
        }

        tables.push((tag, original_length));
    }

    Ok((flavor, tables))
}

/// A WOFF2 font with every table reconstructed.
#[derive(Clone, Debug)]
pub struct Woff2 {
    /// The sfnt flavor of the wrapped font.
    pub flavor: u32,
    /// `(tag, payload)` in directory order.
    pub tables: Vec<(Tag, Vec<u8>)>,
}

impl Woff2 {
    /// Returns a table payload.
    pub fn table(&self, tag: Tag) -> Option<&[u8]> {
        self.tables
            .iter()
            .find(|(table_tag, _)| *table_tag == tag)
            .map(|(_, payload)| payload.as_slice())
    }

    /// Parses a WOFF2 file, decompressing the body and inverting the table
    /// transformations.
    pub fn parse(data: &[u8]) -> Result<Self, Error> {
        let mut s = Stream::new(data);
        let signature: u32 = s.read().ok_or(Error::MalformedFont)?;
        if signature != Magic::Woff2 as u32 {
            return Err(Error::InvalidFontFile("not a WOFF2 file"));
        }

        let flavor: u32 = s.read().ok_or(Error::MalformedFont)?;
        if flavor == Magic::Collection as u32 {
            // WOFF2-wrapped collections are not supported.
            return Err(Error::UnsupportedFontFormat(flavor));
        }

        s.skip::<u32>(); // length
        let num_tables: u16 = s.read().ok_or(Error::MalformedFont)?;
        s.skip::<u16>(); // reserved
        s.skip::<u32>(); // totalSfntSize
        let total_compressed_size: u32 = s.read().ok_or(Error::MalformedFont)?;
        if data.len() < HEADER_SIZE {
            return Err(Error::MalformedFont);
        }

        // Variable-length table directory.
        let mut s = Stream::new_at(data, HEADER_SIZE).ok_or(Error::MalformedFont)?;
        let mut entries = Vec::with_capacity(usize::from(num_tables));
        for _ in 0..num_tables {
            let flags: u8 = s.read().ok_or(Error::MalformedFont)?;
            let tag_index = flags & 0x3F;
            let transform_version = flags >> 6;

            let tag = if tag_index == 63 {
                s.read::<Tag>().ok_or(Error::MalformedFont)?
            } else {
                Tag::from_bytes(KNOWN_TAGS[usize::from(tag_index)])
            };

            let original_length = read_base128(&mut s).ok_or(Error::MalformedFont)?;

            let mut entry = DirectoryEntry {
                tag,
                original_length,
                transform_length: None,
                transform_version,
            };
            if entry.is_transformed() {
                entry.transform_length = Some(read_base128(&mut s).ok_or(Error::MalformedFont)?);
            }

            entries.push(entry);
        }

        // The entire data block is one Brotli stream.
        let compressed = data
            .get(s.offset()..s.offset() + total_compressed_size as usize)
            .ok_or(Error::MalformedFont)?;

        let decompressed_size: usize = entries
            .iter()
            .map(|entry| entry.stored_length() as usize)
            .sum();
        let mut decompressed = Vec::with_capacity(decompressed_size);
        let mut decoder = brotli_decompressor::Decompressor::new(compressed, 4096);
        decoder
            .read_to_end(&mut decompressed)
            .map_err(|_| Error::InvalidFontFile("Brotli decompression failed"))?;
        if decompressed.len() != decompressed_size {
            return Err(Error::InvalidFontFile(
                "decompressed size does not match the directory",
            ));
        }

        // Slice the stream by the directory and invert the transformations.
        let mut tables: Vec<(Tag, Vec<u8>)> = Vec::with_capacity(entries.len());
        let mut reconstructed_glyf: Option<ReconstructedGlyf> = None;

        let mut offset = 0usize;
        for entry in &entries {
            let payload = decompressed
                .get(offset..offset + entry.stored_length() as usize)
                .ok_or(Error::MalformedFont)?;
            offset += entry.stored_length() as usize;

            let tag = entry.tag;
            if !entry.is_transformed() {
                tables.push((tag, payload.to_vec()));
                continue;
            }

            if tag == Tag::from_bytes(b"glyf") {
                let glyf = reconstruct_glyf(payload).ok_or(Error::InvalidFontTable {
                    tag,
                    reason: "malformed transformed glyf",
                })?;
                tables.push((tag, glyf.glyf.clone()));
                reconstructed_glyf = Some(glyf);
            } else if tag == Tag::from_bytes(b"loca") {
                // The reconstructed loca comes from the glyf pass; its
                // transformed payload must be empty.
                if entry.stored_length() != 0 {
                    return Err(Error::InvalidFontTable {
                        tag,
                        reason: "transformed loca must be empty",
                    });
                }
                let glyf = reconstructed_glyf.as_ref().ok_or(Error::InvalidFontTable {
                    tag,
                    reason: "loca precedes glyf",
                })?;
                tables.push((tag, glyf.loca.clone()));
            } else if tag == Tag::from_bytes(b"hmtx") {
                let glyf = reconstructed_glyf.as_ref().ok_or(Error::InvalidFontTable {
                    tag,
                    reason: "transformed hmtx requires a transformed glyf",
                })?;
                let hmtx = reconstruct_hmtx(payload, &tables, glyf).ok_or(
                    Error::InvalidFontTable {
                        tag,
                        reason: "malformed transformed hmtx",
                    },
                )?;
                tables.push((tag, hmtx));
            } else {
                return Err(Error::InvalidFontTable {
                    tag,
                    reason: "unknown table transformation",
                });
            }
        }

        Ok(Woff2 { flavor, tables })
    }
}

struct ReconstructedGlyf {
    glyf: Vec<u8>,
    loca: Vec<u8>,
    x_mins: Vec<i16>,
    num_glyphs: u16,
}

#[derive(Clone, Copy)]
struct TransformedPoint {
    x: i32,
    y: i32,
    on_curve: bool,
}

// Simple glyph flags.
const ON_CURVE: u8 = 1 << 0;
const X_SHORT: u8 = 1 << 1;
const Y_SHORT: u8 = 1 << 2;
const REPEAT: u8 = 1 << 3;
const X_IS_SAME_OR_POSITIVE: u8 = 1 << 4;
const Y_IS_SAME_OR_POSITIVE: u8 = 1 << 5;
const OVERLAP_SIMPLE: u8 = 1 << 6;

// Composite glyph flags.
const ARG_1_AND_2_ARE_WORDS: u16 = 1 << 0;
const WE_HAVE_A_SCALE: u16 = 1 << 3;
const MORE_COMPONENTS: u16 = 1 << 5;
const WE_HAVE_AN_X_AND_Y_SCALE: u16 = 1 << 6;
const WE_HAVE_A_TWO_BY_TWO: u16 = 1 << 7;
const WE_HAVE_INSTRUCTIONS: u16 = 1 << 8;

const OVERLAP_BITMAP_FLAG: u16 = 1 << 0;

/// Inverts the WOFF2 glyf transformation, producing plain `glyf` and `loca`
/// tables.
///
/// https://www.w3.org/TR/WOFF2/#glyf_table_format
fn reconstruct_glyf(data: &[u8]) -> Option<ReconstructedGlyf> {
    let mut s = Stream::new(data);
    s.skip::<u16>(); // reserved
    let flags: u16 = s.read()?;
    let num_glyphs: u16 = s.read()?;
    let index_format: u16 = s.read()?;

    // Seven length-prefixed substreams follow the fixed header.
    let mut substream_lengths = [0usize; 7];
    for length in &mut substream_lengths {
        *length = s.read::<u32>()? as usize;
    }

    let mut offset = s.offset();
    let mut substream = |length: usize| -> Option<&[u8]> {
        let stream = data.get(offset..offset.checked_add(length)?)?;
        offset += length;
        Some(stream)
    };

    let mut n_contours = Stream::new(substream(substream_lengths[0])?);
    let mut n_points = Stream::new(substream(substream_lengths[1])?);
    let mut flag_stream = Stream::new(substream(substream_lengths[2])?);
    let mut glyph_stream = Stream::new(substream(substream_lengths[3])?);
    let mut composite_stream = Stream::new(substream(substream_lengths[4])?);
    let bbox_block = substream(substream_lengths[5])?;
    let mut instruction_stream = Stream::new(substream(substream_lengths[6])?);

    let bbox_bitmap_length = ((usize::from(num_glyphs) + 31) >> 5) << 2;
    if bbox_block.len() < bbox_bitmap_length {
        return None;
    }
    let (bbox_bitmap, bbox_data) = bbox_block.split_at(bbox_bitmap_length);
    let mut bbox_stream = Stream::new(bbox_data);

    let mut overlap_bitmap: Option<&[u8]> = None;
    if flags & OVERLAP_BITMAP_FLAG != 0 {
        let length = (usize::from(num_glyphs) + 7) >> 3;
        overlap_bitmap = Some(data.get(offset..offset + length)?);
    }

    let mut glyf = Vec::new();
    let mut loca_values: Vec<u32> = Vec::with_capacity(usize::from(num_glyphs) + 1);
    let mut x_mins: Vec<i16> = Vec::with_capacity(usize::from(num_glyphs));

    for i in 0..usize::from(num_glyphs) {
        loca_values.push(glyf.len() as u32);

        let contour_count: i16 = n_contours.read()?;
        let has_bbox = bbox_bitmap[i >> 3] & (0x80 >> (i & 7)) != 0;

        let glyph_start = glyf.len();
        if contour_count == -1 {
            // Composite glyphs must carry an explicit bbox.
            if !has_bbox {
                return None;
            }
            reconstruct_composite_glyph(
                &mut composite_stream,
                &mut glyph_stream,
                &mut bbox_stream,
                &mut instruction_stream,
                &mut glyf,
            )?;
        } else if contour_count > 0 {
            let has_overlap_bit = overlap_bitmap
                .map(|bitmap| bitmap[i >> 3] & (0x80 >> (i & 7)) != 0)
                .unwrap_or(false);
            reconstruct_simple_glyph(
                contour_count as u16,
                has_bbox,
                has_overlap_bit,
                &mut n_points,
                &mut flag_stream,
                &mut glyph_stream,
                &mut bbox_stream,
                &mut instruction_stream,
                &mut glyf,
            )?;
        } else {
            // An empty glyph must not carry a bbox.
            if has_bbox {
                return None;
            }
        }

        if contour_count != 0 {
            // Both simple and composite records carry the bbox right after
            // numberOfContours.
            let x_min = i16::from_be_bytes([glyf[glyph_start + 2], glyf[glyph_start + 3]]);
            x_mins.push(x_min);
        } else {
            x_mins.push(0);
        }

        // Glyph records are 4-byte aligned.
        while glyf.len() % 4 != 0 {
            glyf.push(0);
        }
    }

    loca_values.push(glyf.len() as u32);

    let mut loca = Vec::with_capacity(loca_values.len() * if index_format != 0 { 4 } else { 2 });
    for value in &loca_values {
        if index_format != 0 {
            loca.extend_from_slice(&value.to_be_bytes());
        } else {
            loca.extend_from_slice(&(((*value) >> 1) as u16).to_be_bytes());
        }
    }

    Some(ReconstructedGlyf {
        glyf,
        loca,
        x_mins,
        num_glyphs,
    })
}

#[allow(clippy::too_many_arguments)]
fn reconstruct_simple_glyph(
    contour_count: u16,
    has_bbox: bool,
    has_overlap_bit: bool,
    n_points: &mut Stream,
    flag_stream: &mut Stream,
    glyph_stream: &mut Stream,
    bbox_stream: &mut Stream,
    instruction_stream: &mut Stream,
    out: &mut Vec<u8>,
) -> Option<()> {
    let mut points_per_contour = Vec::with_capacity(usize::from(contour_count));
    let mut total_points = 0usize;
    for _ in 0..contour_count {
        let count = read_255_u16(n_points)? as usize;
        points_per_contour.push(count);
        total_points = total_points.checked_add(count)?;
    }
    if total_points == 0 || total_points >= 1 << 16 {
        return None;
    }

    let flags = flag_stream.read_bytes(total_points)?;
    let points = decode_triplets(flags, glyph_stream)?;

    let instruction_size = read_255_u16(glyph_stream)? as usize;

    out.extend_from_slice(&(contour_count as i16).to_be_bytes());
    if has_bbox {
        out.extend_from_slice(bbox_stream.read_bytes(8)?);
    } else {
        write_bbox(&points, out);
    }

    let mut end_point: i32 = -1;
    for count in points_per_contour {
        end_point += count as i32;
        if end_point >= 65536 {
            return None;
        }
        out.extend_from_slice(&(end_point as u16).to_be_bytes());
    }

    out.extend_from_slice(&(instruction_size as u16).to_be_bytes());
    out.extend_from_slice(instruction_stream.read_bytes(instruction_size)?);

    write_points(&points, has_overlap_bit, out);
    Some(())
}

fn reconstruct_composite_glyph(
    composite_stream: &mut Stream,
    glyph_stream: &mut Stream,
    bbox_stream: &mut Stream,
    instruction_stream: &mut Stream,
    out: &mut Vec<u8>,
) -> Option<()> {
    // Measure the component run first so it can be copied verbatim.
    let (composite_size, have_instructions) = {
        let mut probe = composite_stream.clone();
        let mut size = 0usize;
        let mut have_instructions = false;
        let mut flags = MORE_COMPONENTS;
        while flags & MORE_COMPONENTS != 0 {
            flags = probe.read::<u16>()?;
            have_instructions |= flags & WE_HAVE_INSTRUCTIONS != 0;

            let mut arg_size = 2; // glyph index
            if flags & ARG_1_AND_2_ARE_WORDS != 0 {
                arg_size += 4;
            } else {
                arg_size += 2;
            }
            if flags & WE_HAVE_A_SCALE != 0 {
                arg_size += 2;
            } else if flags & WE_HAVE_AN_X_AND_Y_SCALE != 0 {
                arg_size += 4;
            } else if flags & WE_HAVE_A_TWO_BY_TWO != 0 {
                arg_size += 8;
            }
            probe.advance_checked(arg_size)?;
            size += 2 + arg_size;
        }
        (size, have_instructions)
    };

    // An instruction run of length zero still reads its size here; such a
    // component is written out as a plain one.
    let instruction_size = if have_instructions {
        read_255_u16(glyph_stream)? as usize
    } else {
        0
    };

    out.extend_from_slice(&(-1i16).to_be_bytes());
    out.extend_from_slice(bbox_stream.read_bytes(8)?);
    out.extend_from_slice(composite_stream.read_bytes(composite_size)?);

    if have_instructions {
        out.extend_from_slice(&(instruction_size as u16).to_be_bytes());
        out.extend_from_slice(instruction_stream.read_bytes(instruction_size)?);
    }

    Some(())
}

/// Decodes the per-point triplet encoding.
///
/// https://www.w3.org/TR/WOFF2/#triplet_decoding
fn decode_triplets(flags: &[u8], glyph_stream: &mut Stream) -> Option<Vec<TransformedPoint>> {
    #[inline]
    fn with_sign(flag: i32, value: i32) -> i32 {
        if flag & 1 != 0 {
            value
        } else {
            -value
        }
    }

    let mut points = Vec::with_capacity(flags.len());
    let mut x = 0i32;
    let mut y = 0i32;

    for &raw_flag in flags {
        let on_curve = raw_flag >> 7 == 0;
        let flag = i32::from(raw_flag & 0x7F);

        let data_bytes = if flag < 84 {
            1
        } else if flag < 120 {
            2
        } else if flag < 124 {
            3
        } else {
            4
        };
        let data = glyph_stream.read_bytes(data_bytes)?;

        let dx;
        let dy;
        if flag < 10 {
            dx = 0;
            dy = with_sign(flag, ((flag & 14) << 7) + i32::from(data[0]));
        } else if flag < 20 {
            dx = with_sign(flag, (((flag - 10) & 14) << 7) + i32::from(data[0]));
            dy = 0;
        } else if flag < 84 {
            let b0 = flag - 20;
            let b1 = i32::from(data[0]);
            dx = with_sign(flag, 1 + (b0 & 0x30) + (b1 >> 4));
            dy = with_sign(flag >> 1, 1 + ((b0 & 0x0C) << 2) + (b1 & 0x0F));
        } else if flag < 120 {
            let b0 = flag - 84;
            dx = with_sign(flag, 1 + ((b0 / 12) << 8) + i32::from(data[0]));
            dy = with_sign(flag >> 1, 1 + (((b0 % 12) >> 2) << 8) + i32::from(data[1]));
        } else if flag < 124 {
            let b2 = i32::from(data[1]);
            dx = with_sign(flag, (i32::from(data[0]) << 4) + (b2 >> 4));
            dy = with_sign(flag >> 1, ((b2 & 0x0F) << 8) + i32::from(data[2]));
        } else {
            dx = with_sign(flag, (i32::from(data[0]) << 8) + i32::from(data[1]));
            dy = with_sign(flag >> 1, (i32::from(data[2]) << 8) + i32::from(data[3]));
        }

        x = x.checked_add(dx)?;
        y = y.checked_add(dy)?;
        points.push(TransformedPoint { x, y, on_curve });
    }

    Some(points)
}

fn write_bbox(points: &[TransformedPoint], out: &mut Vec<u8>) {
    let mut x_min = 0i32;
    let mut y_min = 0i32;
    let mut x_max = 0i32;
    let mut y_max = 0i32;

    if let Some(first) = points.first() {
        x_min = first.x;
        x_max = first.x;
        y_min = first.y;
        y_max = first.y;
    }
    for point in points.iter().skip(1) {
        x_min = x_min.min(point.x);
        x_max = x_max.max(point.x);
        y_min = y_min.min(point.y);
        y_max = y_max.max(point.y);
    }

    out.extend_from_slice(&(x_min as i16).to_be_bytes());
    out.extend_from_slice(&(y_min as i16).to_be_bytes());
    out.extend_from_slice(&(x_max as i16).to_be_bytes());
    out.extend_from_slice(&(y_max as i16).to_be_bytes());
}

/// Re-encodes points as standard glyf flags and delta coordinates.
fn write_points(points: &[TransformedPoint], has_overlap_bit: bool, out: &mut Vec<u8>) {
    // Flags, with run-length compression.
    let mut last_flag = 0xFFu16; // never a valid flag
    let mut repeats = 0u8;
    let mut last_x = 0i32;
    let mut last_y = 0i32;

    for (i, point) in points.iter().enumerate() {
        let mut flag = 0u8;
        if point.on_curve {
            flag |= ON_CURVE;
        }
        if has_overlap_bit && i == 0 {
            flag |= OVERLAP_SIMPLE;
        }

        let dx = point.x - last_x;
        if dx == 0 {
            flag |= X_IS_SAME_OR_POSITIVE;
        } else if (-255..=255).contains(&dx) {
            flag |= X_SHORT | if dx > 0 { X_IS_SAME_OR_POSITIVE } else { 0 };
        }

        let dy = point.y - last_y;
        if dy == 0 {
            flag |= Y_IS_SAME_OR_POSITIVE;
        } else if (-255..=255).contains(&dy) {
            flag |= Y_SHORT | if dy > 0 { Y_IS_SAME_OR_POSITIVE } else { 0 };
        }

        if u16::from(flag) == last_flag && repeats < 255 {
            repeats += 1;
        } else {
            if last_flag != 0xFF {
                flush_flag(last_flag as u8, &mut repeats, out);
            }
            last_flag = u16::from(flag);
        }

        last_x = point.x;
        last_y = point.y;
    }
    if last_flag != 0xFF {
        flush_flag(last_flag as u8, &mut repeats, out);
    }

    // X coordinates.
    last_x = 0;
    for point in points {
        let dx = point.x - last_x;
        if dx == 0 {
            // Same-as-previous, no data.
        } else if (-255..=255).contains(&dx) {
            out.push(dx.unsigned_abs() as u8);
        } else {
            out.extend_from_slice(&(dx as i16).to_be_bytes());
        }
        last_x = point.x;
    }

    // Y coordinates.
    last_y = 0;
    for point in points {
        let dy = point.y - last_y;
        if dy == 0 {
        } else if (-255..=255).contains(&dy) {
            out.push(dy.unsigned_abs() as u8);
        } else {
            out.extend_from_slice(&(dy as i16).to_be_bytes());
        }
        last_y = point.y;
    }
}

fn flush_flag(flag: u8, repeats: &mut u8, out: &mut Vec<u8>) {
    if *repeats > 0 {
        out.push(flag | REPEAT);
        out.push(*repeats);
    } else {
        out.push(flag);
    }
    *repeats = 0;
}

/// Inverts the WOFF2 hmtx transformation: elided side bearings come from the
/// glyf per-glyph `xMin` values.
///
/// https://www.w3.org/TR/WOFF2/#hmtx_table_format
fn reconstruct_hmtx(
    data: &[u8],
    tables: &[(Tag, Vec<u8>)],
    glyf: &ReconstructedGlyf,
) -> Option<Vec<u8>> {
    let hhea = tables
        .iter()
        .find(|(tag, _)| *tag == Tag::from_bytes(b"hhea"))
        .map(|(_, payload)| payload.as_slice())?;
    let number_of_metrics: u16 = Stream::read_at(hhea, 34)?;
    let number_of_metrics = number_of_metrics.min(glyf.num_glyphs);

    let mut s = Stream::new(data);
    let flags: u8 = s.read()?;
    let proportional_lsbs_elided = flags & 1 != 0;
    let monospace_lsbs_elided = flags & 2 != 0;

    let mut advances = Vec::with_capacity(usize::from(number_of_metrics));
    for _ in 0..number_of_metrics {
        advances.push(s.read::<u16>()?);
    }

    let mut out = Vec::new();
    for (i, advance) in advances.iter().enumerate() {
        let lsb = if proportional_lsbs_elided {
            glyf.x_mins.get(i).copied().unwrap_or(0)
        } else {
            s.read::<i16>()?
        };
        out.extend_from_slice(&advance.to_be_bytes());
        out.extend_from_slice(&lsb.to_be_bytes());
    }

    for i in usize::from(number_of_metrics)..usize::from(glyf.num_glyphs) {
        let lsb = if monospace_lsbs_elided {
            glyf.x_mins.get(i).copied().unwrap_or(0)
        } else {
            s.read::<i16>()?
        };
        out.extend_from_slice(&lsb.to_be_bytes());
    }

    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base128_values() {
        let mut s = Stream::new(&[0x3F]);
        assert_eq!(read_base128(&mut s), Some(63));

        let mut s = Stream::new(&[0x81, 0x00]);
        assert_eq!(read_base128(&mut s), Some(128));

        // A leading zero byte is invalid.
        let mut s = Stream::new(&[0x80, 0x3F]);
        assert_eq!(read_base128(&mut s), None);
    }

    #[test]
    fn u16_255_values() {
        let mut s = Stream::new(&[200]);
        assert_eq!(read_255_u16(&mut s), Some(200));

        let mut s = Stream::new(&[255, 5]);
        assert_eq!(read_255_u16(&mut s), Some(258));

        let mut s = Stream::new(&[254, 5]);
        assert_eq!(read_255_u16(&mut s), Some(511));

        let mut s = Stream::new(&[253, 0x12, 0x34]);
        assert_eq!(read_255_u16(&mut s), Some(0x1234));
    }

    #[test]
    fn triplet_decoding_short_vectors() {
        // flag 20: dx = +1 + 0 + (b1 >> 4), dy = -(1 + 0 + (b1 & 0x0F)).
        let flags = &[20u8];
        let mut s = Stream::new(&[0x25]);
        let points = decode_triplets(flags, &mut s).unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].x, -3);
        assert_eq!(points[0].y, -6);
        assert!(points[0].on_curve);
    }

    #[test]
    fn point_round_trip_through_glyf_encoding() {
        let points = [
            TransformedPoint { x: 10, y: 20, on_curve: true },
            TransformedPoint { x: 500, y: 20, on_curve: false },
            TransformedPoint { x: 500, y: -300, on_curve: true },
        ];

        let mut out = Vec::new();
        write_points(&points, false, &mut out);

        // One flag byte each (no repeats compress here), then coordinates.
        // flag[0]: x short positive, y short positive, on curve.
        assert_eq!(out[0] & ON_CURVE, ON_CURVE);
        assert_eq!(out[0] & X_SHORT, X_SHORT);
        // flag[1]: long x (490), y same.
        assert_eq!(out[1] & X_SHORT, 0);
        assert_eq!(out[1] & Y_IS_SAME_OR_POSITIVE, Y_IS_SAME_OR_POSITIVE);
    }
}
