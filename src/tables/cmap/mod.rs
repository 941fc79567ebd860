//! A [Character to Glyph Index Mapping Table](
//! https://docs.microsoft.com/en-us/typography/opentype/spec/cmap) implementation.

use crate::parser::{FromData, NumFrom, Stream};
use crate::{GlyphId, PlatformId};

mod format0;
mod format10;
mod format12;
mod format13;
mod format14;
mod format4;
mod format6;

pub use format14::GlyphVariationResult;

/// A character map encoding format.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
#[allow(missing_docs)]
pub enum Format {
    ByteEncodingTable = 0,
    SegmentMappingToDeltaValues = 4,
    TrimmedTableMapping = 6,
    TrimmedArray = 10,
    SegmentedCoverage = 12,
    ManyToOneRangeMappings = 13,
    UnicodeVariationSequences = 14,
}

impl FromData for Format {
    const SIZE: usize = 2;

    #[inline]
    fn parse(data: &[u8]) -> Option<Self> {
        match u16::parse(data)? {
            0 => Some(Format::ByteEncodingTable),
            4 => Some(Format::SegmentMappingToDeltaValues),
            6 => Some(Format::TrimmedTableMapping),
            10 => Some(Format::TrimmedArray),
            12 => Some(Format::SegmentedCoverage),
            13 => Some(Format::ManyToOneRangeMappings),
            14 => Some(Format::UnicodeVariationSequences),
            _ => None,
        }
    }
}

#[derive(Clone, Copy)]
struct EncodingRecord {
    platform_id: PlatformId,
    encoding_id: u16,
    offset: u32,
}

impl FromData for EncodingRecord {
    const SIZE: usize = 8;

    #[inline]
    fn parse(data: &[u8]) -> Option<Self> {
        let mut s = Stream::new(data);
        Some(EncodingRecord {
            platform_id: s.read::<PlatformId>()?,
            encoding_id: s.read::<u16>()?,
            offset: s.read::<u32>()?,
        })
    }
}

/// The (platform, encoding) preference order, most preferred first.
const ENCODING_PRIORITY: &[(PlatformId, u16)] = &[
    (PlatformId::Windows, 10),
    (PlatformId::Unicode, 6),
    (PlatformId::Unicode, 4),
    (PlatformId::Windows, 1),
    (PlatformId::Unicode, 3),
    (PlatformId::Windows, 0),
];

/// A character encoding subtable.
#[derive(Clone, Copy)]
pub struct Subtable<'a> {
    format: Format,
    data: &'a [u8],
}

impl<'a> Subtable<'a> {
    /// Returns the subtable format.
    #[inline]
    pub fn format(&self) -> Format {
        self.format
    }

    /// Maps a codepoint to a glyph ID.
    ///
    /// Returns `None` for unmapped codepoints; the caller substitutes
    /// glyph 0.
    pub fn glyph_index(&self, code_point: u32) -> Option<GlyphId> {
        let glyph = match self.format {
            Format::ByteEncodingTable => format0::parse(self.data, code_point),
            Format::SegmentMappingToDeltaValues => format4::parse(self.data, code_point),
            Format::TrimmedTableMapping => format6::parse(self.data, code_point),
            Format::TrimmedArray => format10::parse(self.data, code_point),
            Format::SegmentedCoverage => format12::parse(self.data, code_point),
            Format::ManyToOneRangeMappings => format13::parse(self.data, code_point),
            // Accessed via `glyph_variation_index` instead.
            Format::UnicodeVariationSequences => None,
        };

        match glyph {
            Some(0) | None => None,
            Some(id) => Some(GlyphId(id)),
        }
    }

    /// Calls `f` for every codepoint defined in this subtable.
    pub fn codepoints<F: FnMut(u32)>(&self, f: F) {
        let _ = match self.format {
            Format::ByteEncodingTable => format0::codepoints(self.data, f),
            Format::SegmentMappingToDeltaValues => format4::codepoints(self.data, f),
            Format::TrimmedTableMapping => format6::codepoints(self.data, f),
            Format::TrimmedArray => format10::codepoints(self.data, f),
            Format::SegmentedCoverage => format12::codepoints(self.data, f),
            Format::ManyToOneRangeMappings => format13::codepoints(self.data, f),
            Format::UnicodeVariationSequences => None,
        };
    }
}

impl core::fmt::Debug for Subtable<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_struct("Subtable").field("format", &self.format).finish()
    }
}

/// A [Character to Glyph Index Mapping Table](
/// https://docs.microsoft.com/en-us/typography/opentype/spec/cmap).
#[derive(Clone, Copy)]
pub struct Table<'a> {
    preferred: Subtable<'a>,
    variations: Option<&'a [u8]>,
}

impl<'a> Table<'a> {
    /// Parses a table from raw data.
    ///
    /// Picks the preferred Unicode subtable by the platform/encoding
    /// priority list; fails when no supported subtable is present.
    pub fn parse(data: &'a [u8]) -> Option<Self> {
        let mut s = Stream::new(data);
        s.skip::<u16>(); // version
        let count: u16 = s.read()?;
        let records = s.read_array16::<EncodingRecord>(count)?;

        let subtable_at = |record: &EncodingRecord| -> Option<(Format, &'a [u8])> {
            let data = data.get(usize::num_from(record.offset)..)?;
            let format: Format = Stream::read_at(data, 0)?;
            Some((format, data))
        };

        let mut preferred = None;
        'outer: for &(platform_id, encoding_id) in ENCODING_PRIORITY {
            for record in records {
                if record.platform_id == platform_id && record.encoding_id == encoding_id {
                    if let Some((format, data)) = subtable_at(&record) {
                        if format != Format::UnicodeVariationSequences {
                            preferred = Some(Subtable { format, data });
                            break 'outer;
                        }
                    }
                }
            }
        }

        // Fall back to any parseable Unicode-compatible subtable.
        if preferred.is_none() {
            for record in records {
                if record.platform_id != PlatformId::Unicode
                    && record.platform_id != PlatformId::Windows
                {
                    continue;
                }

                if let Some((format, data)) = subtable_at(&record) {
                    if format != Format::UnicodeVariationSequences {
                        preferred = Some(Subtable { format, data });
                        break;
                    }
                }
            }
        }

        // A format 14 subtable lives under (Unicode, 5).
        let mut variations = None;
        for record in records {
            if record.platform_id == PlatformId::Unicode && record.encoding_id == 5 {
                if let Some((Format::UnicodeVariationSequences, data)) = subtable_at(&record) {
                    variations = Some(data);
                }
            }
        }

        Some(Table {
            preferred: preferred?,
            variations,
        })
    }

    /// Returns the preferred subtable.
    #[inline]
    pub fn subtable(&self) -> Subtable<'a> {
        self.preferred
    }

    /// Maps a codepoint to a glyph ID using the preferred subtable.
    #[inline]
    pub fn glyph_index(&self, code_point: u32) -> Option<GlyphId> {
        self.preferred.glyph_index(code_point)
    }

    /// Resolves a variation of a glyph ID from a (codepoint, selector) pair.
    ///
    /// Falls back to the base subtable when the pair has a default mapping.
    pub fn glyph_variation_index(&self, code_point: u32, variation: u32) -> Option<GlyphId> {
        match format14::parse(self.variations?, code_point, variation)? {
            GlyphVariationResult::UseDefault => self.glyph_index(code_point),
            GlyphVariationResult::Found(id) => Some(id),
        }
    }
}

impl core::fmt::Debug for Table<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_struct("Table")
            .field("format", &self.preferred.format)
            .finish()
    }
}
