/*!
A safe TrueType/OpenType font parser and Unicode-aware text shaper.

## Features

- Parses sfnt (TrueType and CFF-flavored), WOFF, WOFF2 and TrueType
  collection containers.
- Character to glyph mapping via `cmap` (formats 0, 4, 6, 10, 12, 13 and 14).
- Glyph metrics via `hmtx`/`vmtx`, outlines via `glyf` or `CFF `/`CFF2`.
- OpenType substitution (`GSUB`) and positioning (`GPOS`), with legacy
  `kern` as the positioning fallback.
- Unicode-aware layout: UAX#9 bidi resolution, script itemization, Arabic
  joining forms, basic Indic reordering, line breaking and alignment.
- COLR/CPAL color layer enumeration (v0) and BASE baselines.
- Zero `unsafe`.

## Safety

- The library must not panic. Any panic is considered a critical bug and
  should be reported.
- The library forbids unsafe code.
*/

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]

use std::collections::BTreeMap;
use std::sync::OnceLock;

mod layout;
pub mod parser;
mod render;
pub mod shape;
pub mod tables;
pub mod unicode;
mod woff;

use parser::{NumFrom, Stream};
use tables::{base, cff, cmap, colr, cpal, gdef, glyf, gpos, gsub, head, hhea, hmtx, kern, loca,
             maxp, name, os2, post, vhea};

pub use layout::{
    layout_str, layout_utf16, HorizontalAlignment, PositionedGlyph, TextDirection, TextOptions,
    VerticalAlignment,
};
pub use parser::{FromData, Tag};
pub use render::{render_text, render_text_utf16, GlyphRenderer, Vec2};
pub use tables::cmap::GlyphVariationResult;
pub use tables::colr::Layer;
pub use tables::cpal::Color;
pub use tables::gdef::GlyphClass;
pub use tables::os2::{ScriptMetrics, Weight, Width};
pub use unicode::CodePoint;

/// A type-safe wrapper for glyph ID.
#[derive(Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Debug, Default, Hash)]
pub struct GlyphId(pub u16);

impl FromData for GlyphId {
    const SIZE: usize = 2;

    #[inline]
    fn parse(data: &[u8]) -> Option<Self> {
        u16::parse(data).map(GlyphId)
    }
}

/// A [platform ID](https://docs.microsoft.com/en-us/typography/opentype/spec/name#platform-ids).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[allow(missing_docs)]
pub enum PlatformId {
    Unicode,
    Macintosh,
    Iso,
    Windows,
    Custom,
}

impl FromData for PlatformId {
    const SIZE: usize = 2;

    #[inline]
    fn parse(data: &[u8]) -> Option<Self> {
        match u16::parse(data)? {
            0 => Some(PlatformId::Unicode),
            1 => Some(PlatformId::Macintosh),
            2 => Some(PlatformId::Iso),
            3 => Some(PlatformId::Windows),
            4 => Some(PlatformId::Custom),
            _ => None,
        }
    }
}

/// A rectangle in font units.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[allow(missing_docs)]
pub struct Rect {
    pub x_min: i16,
    pub y_min: i16,
    pub x_max: i16,
    pub y_max: i16,
}

impl Rect {
    /// Returns the rectangle width.
    #[inline]
    pub fn width(&self) -> i16 {
        self.x_max - self.x_min
    }

    /// Returns the rectangle height.
    #[inline]
    pub fn height(&self) -> i16 {
        self.y_max - self.y_min
    }
}

/// A rectangle in pixels.
#[derive(Clone, Copy, PartialEq, Default, Debug)]
#[allow(missing_docs)]
pub struct RectF {
    pub x_min: f32,
    pub y_min: f32,
    pub x_max: f32,
    pub y_max: f32,
}

impl RectF {
    /// Returns the rectangle width.
    #[inline]
    pub fn width(&self) -> f32 {
        self.x_max - self.x_min
    }

    /// Returns the rectangle height.
    #[inline]
    pub fn height(&self) -> f32 {
        self.y_max - self.y_min
    }
}

/// A line metrics.
///
/// Used for underline and strikeout.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct LineMetrics {
    /// Line position.
    pub position: i16,
    /// Line thickness.
    pub thickness: i16,
}

/// A list of errors the parser and the layout engine can produce.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Error {
    /// The container is not a known font format.
    InvalidFontFile(&'static str),
    /// A required table is missing.
    MissingFontTable(Tag),
    /// A table exists, but its content is malformed.
    InvalidFontTable {
        /// The table tag.
        tag: Tag,
        /// What exactly is wrong.
        reason: &'static str,
    },
    /// The sfnt flavor is not supported.
    UnsupportedFontFormat(u32),
    /// The face has no glyph for the codepoint.
    GlyphNotFound(u32),
    /// The value is a surrogate or lies beyond U+10FFFF.
    InvalidCodePoint(u32),
    /// The file structure is broken in a way that prevents parsing.
    MalformedFont,
    /// The collection has fewer fonts than the requested index.
    FaceIndexOutOfBounds,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            Error::InvalidFontFile(reason) => write!(f, "invalid font file: {}", reason),
            Error::MissingFontTable(tag) => write!(f, "the '{}' table is missing", tag),
            Error::InvalidFontTable { tag, reason } => {
                write!(f, "the '{}' table is invalid: {}", tag, reason)
            }
            Error::UnsupportedFontFormat(magic) => {
                write!(f, "unsupported font format 0x{:08X}", magic)
            }
            Error::GlyphNotFound(cp) => write!(f, "no glyph for U+{:04X}", cp),
            Error::InvalidCodePoint(value) => write!(f, "invalid codepoint 0x{:X}", value),
            Error::MalformedFont => write!(f, "malformed font"),
            Error::FaceIndexOutOfBounds => write!(f, "face index is out of bounds"),
        }
    }
}

impl std::error::Error for Error {}

/// Container signatures.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Magic {
    TrueType = 0x0001_0000,
    OpenType = 0x4F54_544F,   // OTTO
    Woff1 = 0x774F_4646,      // wOFF
    Woff2 = 0x774F_4632,      // wOF2
    Collection = 0x7474_6366, // ttcf
}

/// The outline storage of a face.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum OutlineKind {
    /// `glyf`/`loca` quadratic outlines.
    TrueType,
    /// `CFF `/`CFF2` cubic outlines.
    Cff,
}

/// A table directory entry.
#[derive(Clone, Copy, Debug)]
pub struct TableRecord {
    /// The table tag.
    pub tag: Tag,
    /// Offset from the start of the backing data.
    pub offset: u32,
    /// The uncompressed table length.
    pub length: u32,
    /// The stored checksum.
    pub checksum: u32,
    /// The stored length inside a WOFF container, when it differs.
    pub compressed_length: Option<u32>,
}

enum Container {
    /// Plain sfnt; tables are slices of the backing data.
    Sfnt,
    /// WOFF1; compressed tables inflate on demand into a per-table cache.
    Woff1 {
        parsed: woff::Woff1,
        cache: BTreeMap<Tag, OnceLock<Option<Vec<u8>>>>,
    },
    /// WOFF2; the whole body decompresses once on first table access.
    Woff2 {
        reconstructed: OnceLock<Result<woff::woff2::Woff2, Error>>,
    },
}

/// Returns the number of fonts stored in a TrueType collection.
///
/// Returns `None` for non-collection files.
pub fn fonts_in_collection(data: &[u8]) -> Option<u32> {
    let mut s = Stream::new(data);
    if s.read::<u32>()? != Magic::Collection as u32 {
        return None;
    }

    s.skip::<u32>(); // version
    s.read::<u32>()
}

/// A parsed font container: the table directory plus on-demand payload
/// decompression. Construct once, then parse a [`Face`] from it.
pub struct FontFile {
    data: Vec<u8>,
    container: Container,
    outline_kind: OutlineKind,
    directory: BTreeMap<Tag, TableRecord>,
}

impl FontFile {
    /// Parses a font container.
    ///
    /// `index` selects the font inside a TrueType collection and must be 0
    /// otherwise.
    pub fn parse(data: Vec<u8>, index: u32) -> Result<Self, Error> {
        let magic: u32 = Stream::read_at(&data, 0).ok_or(Error::InvalidFontFile("empty file"))?;

        if magic == Magic::Woff1 as u32 {
            let parsed = woff::Woff1::parse(&data)?;
            let outline_kind = outline_kind_of(parsed.flavor)?;

            let mut directory = BTreeMap::new();
            let mut cache = BTreeMap::new();
            for entry in &parsed.tables {
                let record = TableRecord {
                    tag: entry.tag,
                    offset: entry.offset,
                    length: entry.original_length,
                    checksum: entry.checksum,
                    compressed_length: Some(entry.compressed_length),
                };
                if directory.insert(entry.tag, record).is_some() {
                    return Err(Error::InvalidFontFile("duplicated table"));
                }
                cache.insert(entry.tag, OnceLock::new());
            }

            return Ok(FontFile {
                data,
                container: Container::Woff1 { parsed, cache },
                outline_kind,
                directory,
            });
        }

        if magic == Magic::Woff2 as u32 {
            let (flavor, tables) = woff::woff2::parse_directory(&data)?;
            let outline_kind = outline_kind_of(flavor)?;

            let mut directory = BTreeMap::new();
            for (tag, length) in tables {
                let record = TableRecord {
                    tag,
                    offset: 0,
                    length,
                    checksum: 0,
                    compressed_length: None,
                };
                if directory.insert(tag, record).is_some() {
                    return Err(Error::InvalidFontFile("duplicated table"));
                }
            }

            return Ok(FontFile {
                data,
                container: Container::Woff2 {
                    reconstructed: OnceLock::new(),
                },
                outline_kind,
                directory,
            });
        }

        // Plain sfnt, possibly inside a collection.
        let table_directory_offset = if magic == Magic::Collection as u32 {
            let count = fonts_in_collection(&data).ok_or(Error::MalformedFont)?;
            if index >= count {
                return Err(Error::FaceIndexOutOfBounds);
            }

            let offset: u32 = Stream::read_at(&data, 12 + usize::num_from(index) * 4)
                .ok_or(Error::MalformedFont)?;
            offset as usize
        } else {
            if index != 0 {
                return Err(Error::FaceIndexOutOfBounds);
            }
            0
        };

        let mut s = Stream::new_at(&data, table_directory_offset).ok_or(Error::MalformedFont)?;
        let flavor: u32 = s.read().ok_or(Error::MalformedFont)?;
        let outline_kind = outline_kind_of(flavor)?;

        let num_tables: u16 = s.read().ok_or(Error::MalformedFont)?;
        s.advance(6); // searchRange + entrySelector + rangeShift

        let mut directory = BTreeMap::new();
        for _ in 0..num_tables {
            let tag: Tag = s.read().ok_or(Error::MalformedFont)?;
            let checksum: u32 = s.read().ok_or(Error::MalformedFont)?;
            let offset: u32 = s.read().ok_or(Error::MalformedFont)?;
            let length: u32 = s.read().ok_or(Error::MalformedFont)?;

            let record = TableRecord {
                tag,
                offset,
                length,
                checksum,
                compressed_length: None,
            };
            if directory.insert(tag, record).is_some() {
                return Err(Error::InvalidFontFile("duplicated table"));
            }
        }

        Ok(FontFile {
            data,
            container: Container::Sfnt,
            outline_kind,
            directory,
        })
    }

    /// Returns the outline storage kind.
    #[inline]
    pub fn outline_kind(&self) -> OutlineKind {
        self.outline_kind
    }

    /// Checks that the container stores compressed payloads.
    #[inline]
    pub fn is_compressed(&self) -> bool {
        !matches!(self.container, Container::Sfnt)
    }

    /// Returns the table directory.
    #[inline]
    pub fn directory(&self) -> &BTreeMap<Tag, TableRecord> {
        &self.directory
    }

    /// Returns a table's payload.
    ///
    /// The returned window never exceeds the declared table length.
    pub fn table(&self, tag: Tag) -> Option<&[u8]> {
        let record = self.directory.get(&tag)?;

        match &self.container {
            Container::Sfnt => {
                let start = record.offset as usize;
                let end = start.checked_add(record.length as usize)?;
                self.data.get(start..end)
            }
            Container::Woff1 { parsed, cache } => {
                let entry = parsed.tables.iter().find(|entry| entry.tag == tag)?;
                cache
                    .get(&tag)?
                    .get_or_init(|| match parsed.decompress_table(&self.data, entry) {
                        Ok(payload) => Some(payload),
                        Err(e) => {
                            log::warn!("failed to decompress the '{}' table: {}", tag, e);
                            None
                        }
                    })
                    .as_deref()
            }
            Container::Woff2 { reconstructed } => {
                let woff2 = reconstructed
                    .get_or_init(|| woff::woff2::Woff2::parse(&self.data));
                match woff2 {
                    Ok(woff2) => woff2.table(tag),
                    Err(e) => {
                        log::warn!("failed to reconstruct the WOFF2 body: {}", e);
                        None
                    }
                }
            }
        }
    }

    fn required_table(&self, tag: Tag) -> Result<&[u8], Error> {
        if !self.directory.contains_key(&tag) {
            return Err(Error::MissingFontTable(tag));
        }
        self.table(tag).ok_or(Error::InvalidFontTable {
            tag,
            reason: "the table payload cannot be read",
        })
    }
}

impl core::fmt::Debug for FontFile {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_struct("FontFile")
            .field("outline_kind", &self.outline_kind)
            .field("tables", &self.directory.len())
            .finish()
    }
}

fn outline_kind_of(flavor: u32) -> Result<OutlineKind, Error> {
    if flavor == Magic::TrueType as u32 || flavor == 0x7472_7565 {
        // 0x74727565 is the old Apple 'true' flavor.
        Ok(OutlineKind::TrueType)
    } else if flavor == Magic::OpenType as u32 {
        Ok(OutlineKind::Cff)
    } else {
        Err(Error::UnsupportedFontFormat(flavor))
    }
}

enum OutlineSource<'a> {
    Glyf(glyf::Table<'a>),
    Cff(cff::Table<'a>),
}

/// A trait for glyph outline construction, in font units.
pub trait OutlineBuilder {
    /// Appends a MoveTo segment.
    ///
    /// Start of a contour.
    fn move_to(&mut self, x: f32, y: f32);

    /// Appends a LineTo segment.
    fn line_to(&mut self, x: f32, y: f32);

    /// Appends a QuadTo segment.
    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32);

    /// Appends a CurveTo segment.
    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32);

    /// Appends a ClosePath segment.
    ///
    /// End of a contour.
    fn close(&mut self);
}

/// A parsed font face.
///
/// Required tables are parsed eagerly, so a constructed face is known to be
/// usable; optional layout tables load lazily behind write-once guards and a
/// `&Face` is shareable across threads.
pub struct Face<'a> {
    file: &'a FontFile,

    // Required tables.
    head: head::Table,
    hhea: hhea::Table,
    maxp: maxp::Table,
    cmap: cmap::Table<'a>,
    hmtx: hmtx::Table<'a>,
    name: name::Table<'a>,
    post: post::Table,
    os2: os2::Table<'a>,
    outline: OutlineSource<'a>,

    // Optional tables.
    vhea: Option<vhea::Table>,
    vmtx: Option<hmtx::Table<'a>>,

    // Lazily parsed layout tables.
    gsub: OnceLock<Option<gsub::Table<'a>>>,
    gpos: OnceLock<Option<gpos::Table<'a>>>,
    gdef: OnceLock<Option<gdef::Table<'a>>>,
    kern: OnceLock<Option<kern::Table<'a>>>,
    colr: OnceLock<Option<colr::Table<'a>>>,
    cpal: OnceLock<Option<cpal::Table<'a>>>,
    base: OnceLock<Option<base::Table<'a>>>,
}

impl<'a> Face<'a> {
    /// Parses the required tables of `file` into a usable face.
    pub fn parse(file: &'a FontFile) -> Result<Self, Error> {
        let invalid = |tag: &[u8; 4]| Error::InvalidFontTable {
            tag: Tag::from_bytes(tag),
            reason: "parsing failed",
        };

        let head = head::Table::parse(file.required_table(Tag::from_bytes(b"head"))?)
            .ok_or_else(|| invalid(b"head"))?;
        let hhea = hhea::Table::parse(file.required_table(Tag::from_bytes(b"hhea"))?)
            .ok_or_else(|| invalid(b"hhea"))?;
        let maxp = maxp::Table::parse(file.required_table(Tag::from_bytes(b"maxp"))?)
            .ok_or_else(|| invalid(b"maxp"))?;
        let cmap = cmap::Table::parse(file.required_table(Tag::from_bytes(b"cmap"))?)
            .ok_or_else(|| invalid(b"cmap"))?;
        let name = name::Table::parse(file.required_table(Tag::from_bytes(b"name"))?)
            .ok_or_else(|| invalid(b"name"))?;
        let post = post::Table::parse(file.required_table(Tag::from_bytes(b"post"))?)
            .ok_or_else(|| invalid(b"post"))?;
        let os2 = os2::Table::parse(file.required_table(Tag::from_bytes(b"OS/2"))?)
            .ok_or_else(|| invalid(b"OS/2"))?;

        let number_of_metrics = hhea
            .number_of_metrics()
            .ok_or_else(|| invalid(b"hhea"))?;
        let hmtx = hmtx::Table::parse(
            file.required_table(Tag::from_bytes(b"hmtx"))?,
            number_of_metrics,
            maxp.number_of_glyphs,
        )
        .ok_or_else(|| invalid(b"hmtx"))?;

        let outline = match file.outline_kind() {
            OutlineKind::TrueType => {
                let loca = loca::Table::parse(
                    file.required_table(Tag::from_bytes(b"loca"))?,
                    maxp.number_of_glyphs,
                    head.index_to_location_format,
                )
                .ok_or_else(|| invalid(b"loca"))?;
                let glyf = glyf::Table::parse(loca, file.required_table(Tag::from_bytes(b"glyf"))?)
                    .ok_or_else(|| invalid(b"glyf"))?;
                OutlineSource::Glyf(glyf)
            }
            OutlineKind::Cff => {
                if file.directory.contains_key(&Tag::from_bytes(b"CFF ")) {
                    let cff = cff::Table::parse(file.required_table(Tag::from_bytes(b"CFF "))?)
                        .ok_or_else(|| invalid(b"CFF "))?;
                    OutlineSource::Cff(cff)
                } else {
                    let cff = cff::Table::parse_cff2(file.required_table(Tag::from_bytes(b"CFF2"))?)
                        .ok_or_else(|| invalid(b"CFF2"))?;
                    OutlineSource::Cff(cff)
                }
            }
        };

        let vhea = file
            .table(Tag::from_bytes(b"vhea"))
            .and_then(vhea::Table::parse);
        let vmtx = match (vhea.as_ref().and_then(|vhea| vhea.number_of_metrics()), file.table(Tag::from_bytes(b"vmtx"))) {
            (Some(number_of_metrics), Some(data)) => {
                hmtx::Table::parse(data, number_of_metrics, maxp.number_of_glyphs)
            }
            _ => None,
        };

        Ok(Face {
            file,
            head,
            hhea,
            maxp,
            cmap,
            hmtx,
            name,
            post,
            os2,
            outline,
            vhea,
            vmtx,
            gsub: OnceLock::new(),
            gpos: OnceLock::new(),
            gdef: OnceLock::new(),
            kern: OnceLock::new(),
            colr: OnceLock::new(),
            cpal: OnceLock::new(),
            base: OnceLock::new(),
        })
    }

    /// Returns the units per EM.
    #[inline]
    pub fn units_per_em(&self) -> u16 {
        self.head.units_per_em
    }

    /// Returns the total number of glyphs.
    #[inline]
    pub fn number_of_glyphs(&self) -> u16 {
        self.maxp.number_of_glyphs.get()
    }

    /// Returns the face ascender in font units.
    #[inline]
    pub fn ascender(&self) -> i16 {
        if self.os2.use_typographic_metrics() {
            self.os2.typographic_ascender()
        } else {
            self.hhea.ascender
        }
    }

    /// Returns the face descender in font units, as a negative value.
    #[inline]
    pub fn descender(&self) -> i16 {
        if self.os2.use_typographic_metrics() {
            self.os2.typographic_descender()
        } else {
            self.hhea.descender
        }
    }

    /// Returns the face line gap in font units.
    #[inline]
    pub fn line_gap(&self) -> i16 {
        if self.os2.use_typographic_metrics() {
            self.os2.typographic_line_gap()
        } else {
            self.hhea.line_gap
        }
    }

    /// Returns the default line height in pixels for a given size.
    pub fn line_height_px(&self, size_px: f32, dpi: f32) -> f32 {
        let scale = size_px * dpi / (72.0 * f32::from(self.units_per_em()));
        f32::from(self.ascender() - self.descender() + self.line_gap()) * scale
    }

    /// Returns the face weight.
    #[inline]
    pub fn weight(&self) -> Weight {
        self.os2.weight()
    }

    /// Returns the face width.
    #[inline]
    pub fn width(&self) -> Width {
        self.os2.width()
    }

    /// Checks that the face is marked as italic.
    #[inline]
    pub fn is_italic(&self) -> bool {
        self.os2.is_italic()
    }

    /// Checks that the face is marked as bold.
    #[inline]
    pub fn is_bold(&self) -> bool {
        self.os2.is_bold()
    }

    /// Checks that the face is marked as oblique.
    #[inline]
    pub fn is_oblique(&self) -> bool {
        self.os2.is_oblique()
    }

    /// Checks that the face is monospaced.
    #[inline]
    pub fn is_monospaced(&self) -> bool {
        self.post.is_monospaced
    }

    /// Returns the x height in font units.
    #[inline]
    pub fn x_height(&self) -> Option<i16> {
        self.os2.x_height()
    }

    /// Returns the capital height in font units.
    #[inline]
    pub fn capital_height(&self) -> Option<i16> {
        self.os2.capital_height()
    }

    /// Returns the underline metrics.
    #[inline]
    pub fn underline_metrics(&self) -> LineMetrics {
        self.post.underline_metrics
    }

    /// Returns the strikeout metrics.
    #[inline]
    pub fn strikeout_metrics(&self) -> LineMetrics {
        self.os2.strikeout_metrics()
    }

    /// Returns the subscript metrics.
    #[inline]
    pub fn subscript_metrics(&self) -> ScriptMetrics {
        self.os2.subscript_metrics()
    }

    /// Returns the superscript metrics.
    #[inline]
    pub fn superscript_metrics(&self) -> ScriptMetrics {
        self.os2.superscript_metrics()
    }

    /// Returns the family name.
    pub fn family_name(&self) -> Option<String> {
        self.name
            .name(name::name_id::TYPOGRAPHIC_FAMILY)
            .or_else(|| self.name.name(name::name_id::FAMILY))
    }

    /// Returns the PostScript name.
    pub fn post_script_name(&self) -> Option<String> {
        self.name.name(name::name_id::POST_SCRIPT_NAME)
    }

    /// Maps a codepoint to a glyph ID.
    ///
    /// Unlike the shaping pipeline, which silently substitutes glyph 0, this
    /// surfaces the miss as [`Error::GlyphNotFound`].
    pub fn glyph_index(&self, code_point: CodePoint) -> Result<GlyphId, Error> {
        self.glyph_index_for_code_point(code_point)
            .ok_or(Error::GlyphNotFound(code_point.value()))
    }

    #[inline]
    pub(crate) fn glyph_index_for_code_point(&self, code_point: CodePoint) -> Option<GlyphId> {
        self.cmap.glyph_index(code_point.value())
    }

    /// Resolves a (codepoint, variation selector) pair to a glyph ID.
    pub fn glyph_variation_index(
        &self,
        code_point: CodePoint,
        variation: CodePoint,
    ) -> Option<GlyphId> {
        self.cmap
            .glyph_variation_index(code_point.value(), variation.value())
    }

    /// Returns the horizontal advance of a glyph in font units.
    #[inline]
    pub fn glyph_hor_advance(&self, glyph_id: GlyphId) -> Option<u16> {
        self.hmtx.advance(glyph_id)
    }

    /// Returns the horizontal side bearing of a glyph in font units.
    #[inline]
    pub fn glyph_hor_side_bearing(&self, glyph_id: GlyphId) -> Option<i16> {
        self.hmtx.side_bearing(glyph_id)
    }

    /// Returns the vertical advance of a glyph in font units.
    #[inline]
    pub fn glyph_ver_advance(&self, glyph_id: GlyphId) -> Option<u16> {
        self.vmtx.as_ref()?.advance(glyph_id)
    }

    /// Returns the vertical side bearing of a glyph in font units.
    #[inline]
    pub fn glyph_ver_side_bearing(&self, glyph_id: GlyphId) -> Option<i16> {
        self.vmtx.as_ref()?.side_bearing(glyph_id)
    }

    /// Returns a glyph's bounding box in font units.
    pub fn glyph_bounding_box(&self, glyph_id: GlyphId) -> Option<Rect> {
        match &self.outline {
            OutlineSource::Glyf(glyf) => glyf.bbox(glyph_id),
            OutlineSource::Cff(cff) => {
                // CFF has no precomputed boxes; outline to measure.
                let mut sink = DummyOutlineSink;
                cff.outline(glyph_id, &mut sink)
            }
        }
    }

    /// Outlines a glyph and returns its tight bounding box.
    pub fn outline_glyph(
        &self,
        glyph_id: GlyphId,
        builder: &mut dyn OutlineBuilder,
    ) -> Option<Rect> {
        match &self.outline {
            OutlineSource::Glyf(glyf) => glyf.outline(glyph_id, builder),
            OutlineSource::Cff(cff) => cff.outline(glyph_id, builder),
        }
    }

    /// Returns the `GSUB` table.
    pub fn substitution_table(&self) -> Option<gsub::Table<'a>> {
        *self.gsub.get_or_init(|| {
            self.file
                .table(Tag::from_bytes(b"GSUB"))
                .and_then(gsub::Table::parse)
        })
    }

    /// Returns the `GPOS` table.
    pub fn positioning_table(&self) -> Option<gpos::Table<'a>> {
        *self.gpos.get_or_init(|| {
            self.file
                .table(Tag::from_bytes(b"GPOS"))
                .and_then(gpos::Table::parse)
        })
    }

    /// Returns the `GDEF` table.
    pub fn glyph_definition_table(&self) -> Option<gdef::Table<'a>> {
        *self.gdef.get_or_init(|| {
            self.file
                .table(Tag::from_bytes(b"GDEF"))
                .and_then(gdef::Table::parse)
        })
    }

    /// Returns the `kern` table.
    pub fn kerning_table(&self) -> Option<kern::Table<'a>> {
        *self.kern.get_or_init(|| {
            self.file
                .table(Tag::from_bytes(b"kern"))
                .and_then(kern::Table::parse)
        })
    }

    /// Returns the glyph class from `GDEF`.
    pub fn glyph_class(&self, glyph_id: GlyphId) -> Option<GlyphClass> {
        self.glyph_definition_table()?.glyph_class(glyph_id)
    }

    /// Returns the color layers of a glyph, bottom-most first.
    pub fn glyph_color_layers(
        &self,
        glyph_id: GlyphId,
    ) -> Option<parser::LazyArray16<'a, Layer>> {
        let colr = self.colr.get_or_init(|| {
            self.file
                .table(Tag::from_bytes(b"COLR"))
                .and_then(colr::Table::parse)
        });
        colr.as_ref()?.layers(glyph_id)
    }

    /// Returns the color of `palette_entry` in `palette`.
    pub fn palette_color(&self, palette: u16, palette_entry: u16) -> Option<Color> {
        let cpal = self.cpal.get_or_init(|| {
            self.file
                .table(Tag::from_bytes(b"CPAL"))
                .and_then(cpal::Table::parse)
        });
        cpal.as_ref()?.color(palette, palette_entry)
    }

    /// Returns the coordinate of a horizontal baseline (e.g. `romn`, `ideo`).
    pub fn baseline(&self, tag: Tag) -> Option<i16> {
        let base = self.base.get_or_init(|| {
            self.file
                .table(Tag::from_bytes(b"BASE"))
                .and_then(base::Table::parse)
        });
        base.as_ref()?.baseline(tag)
    }
}

impl core::fmt::Debug for Face<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "Face()")
    }
}

struct DummyOutlineSink;

impl OutlineBuilder for DummyOutlineSink {
    fn move_to(&mut self, _: f32, _: f32) {}
    fn line_to(&mut self, _: f32, _: f32) {}
    fn quad_to(&mut self, _: f32, _: f32, _: f32, _: f32) {}
    fn curve_to(&mut self, _: f32, _: f32, _: f32, _: f32, _: f32, _: f32) {}
    fn close(&mut self) {}
}
