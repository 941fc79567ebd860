//! Common structures for the
//! [GSUB](https://docs.microsoft.com/en-us/typography/opentype/spec/gsub) and
//! [GPOS](https://docs.microsoft.com/en-us/typography/opentype/spec/gpos) tables:
//! the `ScriptList -> LangSys -> Feature -> LookupList` chain, coverage and
//! class-definition tables.

use bitflags::bitflags;

use crate::parser::{FromData, LazyArray16, Offset16, Stream};
use crate::{GlyphId, Tag};

/// The `DFLT` script tag.
pub const DEFAULT_SCRIPT: Tag = Tag::from_bytes(b"DFLT");

/// A record that pairs a tag with an offset, used by script, langsys and
/// feature lists.
#[derive(Clone, Copy, Debug)]
pub struct TagRecord {
    pub tag: Tag,
    pub offset: Offset16,
}

impl FromData for TagRecord {
    const SIZE: usize = 6;

    #[inline]
    fn parse(data: &[u8]) -> Option<Self> {
        let mut s = Stream::new(data);
        Some(TagRecord {
            tag: s.read::<Tag>()?,
            offset: s.read::<Offset16>()?,
        })
    }
}

/// A [Coverage Table](
/// https://docs.microsoft.com/en-us/typography/opentype/spec/chapter2#coverage-table).
#[derive(Clone, Copy, Debug)]
pub enum Coverage<'a> {
    Format1 {
        /// A sorted list of glyphs.
        glyphs: LazyArray16<'a, GlyphId>,
    },
    Format2 {
        /// A sorted list of glyph ranges.
        records: LazyArray16<'a, RangeRecord>,
    },
}

impl<'a> Coverage<'a> {
    /// Parses a coverage table from raw data.
    pub fn parse(data: &'a [u8]) -> Option<Self> {
        let mut s = Stream::new(data);
        let format: u16 = s.read()?;
        match format {
            1 => {
                let count = s.read::<u16>()?;
                let glyphs = s.read_array16::<GlyphId>(count)?;
                Some(Coverage::Format1 { glyphs })
            }
            2 => {
                let count = s.read::<u16>()?;
                let records = s.read_array16::<RangeRecord>(count)?;
                Some(Coverage::Format2 { records })
            }
            _ => None,
        }
    }

    /// Checks that the glyph is in the coverage.
    #[inline]
    pub fn contains(&self, glyph: GlyphId) -> bool {
        self.index(glyph).is_some()
    }

    /// Returns the coverage index of the glyph.
    pub fn index(&self, glyph: GlyphId) -> Option<u16> {
        match self {
            Coverage::Format1 { glyphs } => glyphs.binary_search(&glyph).map(|p| p.0),
            Coverage::Format2 { records } => {
                let (_, record) = records.binary_search_by(|record| {
                    if glyph.0 < record.start {
                        core::cmp::Ordering::Greater
                    } else if glyph.0 > record.end {
                        core::cmp::Ordering::Less
                    } else {
                        core::cmp::Ordering::Equal
                    }
                })?;
                record.value.checked_add(glyph.0 - record.start)
            }
        }
    }
}

/// A glyph range record with a payload: a start coverage index for coverage
/// tables, a class for class definitions.
#[derive(Clone, Copy, Debug)]
pub struct RangeRecord {
    pub start: u16,
    pub end: u16,
    pub value: u16,
}

impl FromData for RangeRecord {
    const SIZE: usize = 6;

    #[inline]
    fn parse(data: &[u8]) -> Option<Self> {
        let mut s = Stream::new(data);
        Some(RangeRecord {
            start: s.read::<u16>()?,
            end: s.read::<u16>()?,
            value: s.read::<u16>()?,
        })
    }
}

/// A glyph class in a [Class Definition Table](
/// https://docs.microsoft.com/en-us/typography/opentype/spec/chapter2#class-definition-table).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub struct Class(pub u16);

impl FromData for Class {
    const SIZE: usize = 2;

    #[inline]
    fn parse(data: &[u8]) -> Option<Self> {
        u16::parse(data).map(Class)
    }
}

/// A [Class Definition Table](
/// https://docs.microsoft.com/en-us/typography/opentype/spec/chapter2#class-definition-table).
///
/// Glyphs not assigned explicitly belong to class 0. A malformed or
/// out-of-bounds class definition degrades to `Empty`, which puts every
/// glyph in class 0; some real fonts (e.g. Sarabun) rely on this.
#[derive(Clone, Copy, Debug)]
pub enum ClassDef<'a> {
    Format1 {
        start: GlyphId,
        classes: LazyArray16<'a, Class>,
    },
    Format2 {
        records: LazyArray16<'a, RangeRecord>,
    },
    Empty,
}

impl<'a> ClassDef<'a> {
    /// Parses a class definition table from raw data.
    pub fn parse(data: &'a [u8]) -> Option<Self> {
        let mut s = Stream::new(data);
        let format: u16 = s.read()?;
        match format {
            1 => {
                let start = s.read::<GlyphId>()?;
                let count = s.read::<u16>()?;
                let classes = s.read_array16::<Class>(count)?;
                Some(ClassDef::Format1 { start, classes })
            }
            2 => {
                let count = s.read::<u16>()?;
                let records = s.read_array16::<RangeRecord>(count)?;
                Some(ClassDef::Format2 { records })
            }
            _ => None,
        }
    }

    /// Returns the glyph class.
    pub fn get(&self, glyph: GlyphId) -> Class {
        match self {
            ClassDef::Format1 { start, classes } => glyph
                .0
                .checked_sub(start.0)
                .and_then(|index| classes.get(index))
                .unwrap_or(Class(0)),
            ClassDef::Format2 { records } => records
                .binary_search_by(|record| {
                    if glyph.0 < record.start {
                        core::cmp::Ordering::Greater
                    } else if glyph.0 > record.end {
                        core::cmp::Ordering::Less
                    } else {
                        core::cmp::Ordering::Equal
                    }
                })
                .map(|(_, record)| Class(record.value))
                .unwrap_or(Class(0)),
            ClassDef::Empty => Class(0),
        }
    }
}

bitflags! {
    /// Lookup qualifiers.
    #[derive(Clone, Copy, PartialEq, Eq, Debug)]
    pub struct LookupFlags: u16 {
        /// For GPOS type 3: cursive attachment proceeds right to left.
        const RIGHT_TO_LEFT          = 0x0001;
        /// Skip base glyphs.
        const IGNORE_BASE_GLYPHS     = 0x0002;
        /// Skip ligature glyphs.
        const IGNORE_LIGATURES       = 0x0004;
        /// Skip mark glyphs.
        const IGNORE_MARKS           = 0x0008;
        /// Filter marks by the lookup's mark filtering set.
        const USE_MARK_FILTERING_SET = 0x0010;
        /// Filter marks by GDEF mark attachment class.
        const MARK_ATTACHMENT_TYPE   = 0xFF00;
    }
}

impl LookupFlags {
    /// Returns the mark attachment class filter, if any.
    #[inline]
    pub fn mark_attachment_type(self) -> u8 {
        ((self.bits() & Self::MARK_ATTACHMENT_TYPE.bits()) >> 8) as u8
    }
}

/// A [Lookup](
/// https://docs.microsoft.com/en-us/typography/opentype/spec/chapter2#lookup-table).
#[derive(Clone, Copy)]
pub struct Lookup<'a> {
    /// The lookup type, interpreted by GSUB/GPOS.
    pub kind: u16,
    /// Lookup qualifiers.
    pub flags: LookupFlags,
    /// Index into the GDEF mark glyph sets.
    pub mark_filtering_set: Option<u16>,
    subtable_offsets: LazyArray16<'a, Offset16>,
    data: &'a [u8],
}

impl<'a> Lookup<'a> {
    fn parse(data: &'a [u8]) -> Option<Self> {
        let mut s = Stream::new(data);
        let kind = s.read::<u16>()?;
        let flags = LookupFlags::from_bits_retain(s.read::<u16>()?);
        let count = s.read::<u16>()?;
        let subtable_offsets = s.read_array16::<Offset16>(count)?;

        let mut mark_filtering_set = None;
        if flags.contains(LookupFlags::USE_MARK_FILTERING_SET) {
            mark_filtering_set = Some(s.read::<u16>()?);
        }

        Some(Lookup {
            kind,
            flags,
            mark_filtering_set,
            subtable_offsets,
            data,
        })
    }

    /// Returns the number of subtables.
    #[inline]
    pub fn subtables_len(&self) -> u16 {
        self.subtable_offsets.len()
    }

    /// Returns the raw data of a subtable.
    pub fn subtable_data(&self, index: u16) -> Option<&'a [u8]> {
        let offset = self.subtable_offsets.get(index)?;
        self.data.get(offset.to_usize()..)
    }
}

impl core::fmt::Debug for Lookup<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_struct("Lookup")
            .field("kind", &self.kind)
            .field("flags", &self.flags)
            .finish()
    }
}

/// A [Language System Table](
/// https://docs.microsoft.com/en-us/typography/opentype/spec/chapter2#language-system-table).
#[derive(Clone, Copy, Debug)]
pub struct LangSys<'a> {
    /// The feature required for this language system, if any.
    pub required_feature_index: Option<u16>,
    /// Indices into the feature list.
    pub feature_indices: LazyArray16<'a, u16>,
}

impl<'a> LangSys<'a> {
    fn parse(data: &'a [u8]) -> Option<Self> {
        let mut s = Stream::new(data);
        s.skip::<Offset16>(); // lookupOrderOffset, reserved
        let required: u16 = s.read()?;
        let count = s.read::<u16>()?;
        let feature_indices = s.read_array16::<u16>(count)?;

        Some(LangSys {
            required_feature_index: if required == 0xFFFF { None } else { Some(required) },
            feature_indices,
        })
    }
}

/// A [Script Table](
/// https://docs.microsoft.com/en-us/typography/opentype/spec/chapter2#script-table-and-language-system-record).
#[derive(Clone, Copy, Debug)]
pub struct Script<'a> {
    data: &'a [u8],
    default_lang_sys_offset: Option<Offset16>,
    lang_sys_records: LazyArray16<'a, TagRecord>,
}

impl<'a> Script<'a> {
    fn parse(data: &'a [u8]) -> Option<Self> {
        let mut s = Stream::new(data);
        let default_lang_sys_offset: Option<Offset16> = s.read()?;
        let count = s.read::<u16>()?;
        let lang_sys_records = s.read_array16::<TagRecord>(count)?;

        Some(Script {
            data,
            default_lang_sys_offset,
            lang_sys_records,
        })
    }

    /// Returns the language system for `language`, falling back to the
    /// default one.
    pub fn lang_sys(&self, language: Option<Tag>) -> Option<LangSys<'a>> {
        if let Some(language) = language {
            if let Some((_, record)) = self
                .lang_sys_records
                .binary_search_by(|record| record.tag.cmp(&language))
            {
                return LangSys::parse(self.data.get(record.offset.to_usize()..)?);
            }
        }

        let offset = self.default_lang_sys_offset?;
        LangSys::parse(self.data.get(offset.to_usize()..)?)
    }
}

/// A GSUB/GPOS table container: the `ScriptList -> LangSys -> Feature ->
/// LookupList` chain.
#[derive(Clone, Copy)]
pub struct LayoutTable<'a> {
    script_list: &'a [u8],
    script_records: LazyArray16<'a, TagRecord>,
    feature_list: &'a [u8],
    feature_records: LazyArray16<'a, TagRecord>,
    lookup_list: &'a [u8],
    lookup_offsets: LazyArray16<'a, Offset16>,
}

impl<'a> LayoutTable<'a> {
    /// Parses a GSUB/GPOS table from raw data.
    pub fn parse(data: &'a [u8]) -> Option<Self> {
        let mut s = Stream::new(data);
        let version: u32 = s.read()?;
        if !(version == 0x00010000 || version == 0x00010001) {
            return None;
        }

        let script_list_offset: Offset16 = s.read()?;
        let feature_list_offset: Offset16 = s.read()?;
        let lookup_list_offset: Offset16 = s.read()?;
        // Feature variations (version 1.1) are not supported.

        let script_list = data.get(script_list_offset.to_usize()..)?;
        let script_records = {
            let mut s = Stream::new(script_list);
            let count = s.read::<u16>()?;
            s.read_array16::<TagRecord>(count)?
        };

        let feature_list = data.get(feature_list_offset.to_usize()..)?;
        let feature_records = {
            let mut s = Stream::new(feature_list);
            let count = s.read::<u16>()?;
            s.read_array16::<TagRecord>(count)?
        };

        let lookup_list = data.get(lookup_list_offset.to_usize()..)?;
        let lookup_offsets = {
            let mut s = Stream::new(lookup_list);
            let count = s.read::<u16>()?;
            s.read_array16::<Offset16>(count)?
        };

        Some(LayoutTable {
            script_list,
            script_records,
            feature_list,
            feature_records,
            lookup_list,
            lookup_offsets,
        })
    }

    /// Returns the script table for `script`, falling back to `DFLT`.
    pub fn script(&self, script: Tag) -> Option<Script<'a>> {
        let record = self
            .script_records
            .binary_search_by(|record| record.tag.cmp(&script))
            .or_else(|| {
                self.script_records
                    .binary_search_by(|record| record.tag.cmp(&DEFAULT_SCRIPT))
            })
            .map(|(_, record)| record)?;

        Script::parse(self.script_list.get(record.offset.to_usize()..)?)
    }

    /// Returns the feature tag at `index`.
    pub fn feature_tag(&self, index: u16) -> Option<Tag> {
        Some(self.feature_records.get(index)?.tag)
    }

    /// Returns the lookup indices of the feature at `index`.
    pub fn feature_lookup_indices(&self, index: u16) -> Option<LazyArray16<'a, u16>> {
        let record = self.feature_records.get(index)?;
        let data = self.feature_list.get(record.offset.to_usize()..)?;
        let mut s = Stream::new(data);
        s.skip::<Offset16>(); // featureParamsOffset
        let count = s.read::<u16>()?;
        s.read_array16::<u16>(count)
    }

    /// Returns the number of lookups.
    #[inline]
    pub fn lookups_len(&self) -> u16 {
        self.lookup_offsets.len()
    }

    /// Returns the lookup at `index`.
    pub fn lookup(&self, index: u16) -> Option<Lookup<'a>> {
        let offset = self.lookup_offsets.get(index)?;
        Lookup::parse(self.lookup_list.get(offset.to_usize()..)?)
    }
}

impl core::fmt::Debug for LayoutTable<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "LayoutTable {{ ... }}")
    }
}

/// A sequence lookup record used by contextual subtables.
#[derive(Clone, Copy, Debug)]
pub struct SequenceLookupRecord {
    /// Position in the input sequence.
    pub sequence_index: u16,
    /// The lookup to apply at that position.
    pub lookup_list_index: u16,
}

impl FromData for SequenceLookupRecord {
    const SIZE: usize = 4;

    #[inline]
    fn parse(data: &[u8]) -> Option<Self> {
        let mut s = Stream::new(data);
        Some(SequenceLookupRecord {
            sequence_index: s.read::<u16>()?,
            lookup_list_index: s.read::<u16>()?,
        })
    }
}

/// Reads a class definition at `offset` inside `data`, degrading to
/// [`ClassDef::Empty`] on malformed offsets.
pub(crate) fn class_def_at<'a>(data: &'a [u8], offset: Offset16) -> ClassDef<'a> {
    match data
        .get(offset.to_usize()..)
        .and_then(ClassDef::parse)
    {
        Some(def) => def,
        None => {
            log::warn!("a malformed class definition; all glyphs are treated as class 0");
            ClassDef::Empty
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coverage_format1() {
        let data = &[
            0x00, 0x01, // format: 1
            0x00, 0x03, // count: 3
            0x00, 0x05, 0x00, 0x0A, 0x00, 0x14, // glyphs: 5, 10, 20
        ];

        let coverage = Coverage::parse(data).unwrap();
        assert_eq!(coverage.index(GlyphId(5)), Some(0));
        assert_eq!(coverage.index(GlyphId(10)), Some(1));
        assert_eq!(coverage.index(GlyphId(20)), Some(2));
        assert_eq!(coverage.index(GlyphId(6)), None);
    }

    #[test]
    fn coverage_format2() {
        let data = &[
            0x00, 0x02, // format: 2
            0x00, 0x02, // count: 2
            // Range [0]: 10..=15, starting index 0
            0x00, 0x0A, 0x00, 0x0F, 0x00, 0x00,
            // Range [1]: 30..=32, starting index 6
            0x00, 0x1E, 0x00, 0x20, 0x00, 0x06,
        ];

        let coverage = Coverage::parse(data).unwrap();
        assert_eq!(coverage.index(GlyphId(10)), Some(0));
        assert_eq!(coverage.index(GlyphId(15)), Some(5));
        assert_eq!(coverage.index(GlyphId(31)), Some(7));
        assert_eq!(coverage.index(GlyphId(16)), None);
        assert!(!coverage.contains(GlyphId(29)));
    }

    #[test]
    fn class_def_formats() {
        let format1 = &[
            0x00, 0x01, // format: 1
            0x00, 0x0A, // start glyph: 10
            0x00, 0x02, // count: 2
            0x00, 0x01, 0x00, 0x02, // classes: 1, 2
        ];
        let def = ClassDef::parse(format1).unwrap();
        assert_eq!(def.get(GlyphId(10)), Class(1));
        assert_eq!(def.get(GlyphId(11)), Class(2));
        assert_eq!(def.get(GlyphId(12)), Class(0));
        assert_eq!(def.get(GlyphId(9)), Class(0));

        let format2 = &[
            0x00, 0x02, // format: 2
            0x00, 0x01, // count: 1
            0x00, 0x14, 0x00, 0x18, 0x00, 0x03, // 20..=24 -> class 3
        ];
        let def = ClassDef::parse(format2).unwrap();
        assert_eq!(def.get(GlyphId(22)), Class(3));
        assert_eq!(def.get(GlyphId(25)), Class(0));
    }

    #[test]
    fn lookup_flags() {
        let flags = LookupFlags::from_bits_retain(0x0208);
        assert!(flags.contains(LookupFlags::IGNORE_MARKS));
        assert_eq!(flags.mark_attachment_type(), 2);
    }
}
