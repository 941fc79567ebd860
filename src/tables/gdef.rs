//! A [Glyph Definition Table](
//! https://docs.microsoft.com/en-us/typography/opentype/spec/gdef) implementation.

use super::gsubgpos::{Class, ClassDef, Coverage};
use crate::parser::{LazyArray16, Offset16, Offset32, Stream};
use crate::GlyphId;

/// A [glyph class](
/// https://docs.microsoft.com/en-us/typography/opentype/spec/gdef#glyph-class-definition-table).
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
#[allow(missing_docs)]
pub enum GlyphClass {
    Base = 1,
    Ligature = 2,
    Mark = 3,
    Component = 4,
}

/// A [Glyph Definition Table](
/// https://docs.microsoft.com/en-us/typography/opentype/spec/gdef).
#[derive(Clone, Copy, Default, Debug)]
pub struct Table<'a> {
    glyph_classes: Option<ClassDef<'a>>,
    mark_attach_classes: Option<ClassDef<'a>>,
    mark_glyph_sets: Option<(&'a [u8], LazyArray16<'a, Offset32>)>,
}

impl<'a> Table<'a> {
    /// Parses a table from raw data.
    pub fn parse(data: &'a [u8]) -> Option<Self> {
        let mut s = Stream::new(data);
        let version: u32 = s.read()?;
        if !(version == 0x00010000 || version == 0x00010002 || version == 0x00010003) {
            return None;
        }

        let glyph_class_def_offset: Option<Offset16> = s.read()?;
        s.skip::<Offset16>(); // attachListOffset
        s.skip::<Offset16>(); // ligCaretListOffset
        let mark_attach_class_def_offset: Option<Offset16> = s.read()?;

        let mut mark_glyph_sets_def_offset: Option<Offset16> = None;
        if version > 0x00010000 {
            mark_glyph_sets_def_offset = s.read()?;
        }

        let mut table = Table::default();

        if let Some(offset) = glyph_class_def_offset {
            if let Some(subdata) = data.get(offset.to_usize()..) {
                table.glyph_classes = ClassDef::parse(subdata);
            }
        }

        if let Some(offset) = mark_attach_class_def_offset {
            if let Some(subdata) = data.get(offset.to_usize()..) {
                table.mark_attach_classes = ClassDef::parse(subdata);
            }
        }

        if let Some(offset) = mark_glyph_sets_def_offset {
            if let Some(subdata) = data.get(offset.to_usize()..) {
                let mut s = Stream::new(subdata);
                let format: u16 = s.read()?;
                if format == 1 {
                    let count = s.read::<u16>()?;
                    if let Some(offsets) = s.read_array16::<Offset32>(count) {
                        table.mark_glyph_sets = Some((subdata, offsets));
                    }
                }
            }
        }

        Some(table)
    }

    /// Checks that the table has glyph classes.
    #[inline]
    pub fn has_glyph_classes(&self) -> bool {
        self.glyph_classes.is_some()
    }

    /// Returns the glyph class.
    pub fn glyph_class(&self, glyph_id: GlyphId) -> Option<GlyphClass> {
        match self.glyph_classes?.get(glyph_id).0 {
            1 => Some(GlyphClass::Base),
            2 => Some(GlyphClass::Ligature),
            3 => Some(GlyphClass::Mark),
            4 => Some(GlyphClass::Component),
            _ => None,
        }
    }

    /// Returns the glyph's mark attachment class.
    pub fn glyph_mark_attachment_class(&self, glyph_id: GlyphId) -> Class {
        self.mark_attach_classes
            .map(|def| def.get(glyph_id))
            .unwrap_or(Class(0))
    }

    /// Checks that the glyph is in the mark glyph set `set_index`.
    pub fn is_mark_glyph(&self, glyph_id: GlyphId, set_index: u16) -> bool {
        (|| {
            let (data, offsets) = self.mark_glyph_sets?;
            let offset = offsets.get(set_index)?;
            let coverage = Coverage::parse(data.get(offset.to_usize()..)?)?;
            if coverage.contains(glyph_id) {
                Some(())
            } else {
                None
            }
        })()
        .is_some()
    }
}
