//! A [Kerning Table](
//! https://docs.microsoft.com/en-us/typography/opentype/spec/kern) implementation.
//!
//! Only the OpenType flavor with format 0 subtables is supported. It is used
//! as the positioning fallback when a face has no `GPOS` table.

use crate::parser::{FromData, Stream};
use crate::GlyphId;

#[derive(Clone, Copy, Debug)]
struct Coverage(u8);

impl Coverage {
    #[inline]
    fn is_horizontal(self) -> bool {
        self.0 & 1 != 0
    }

    #[inline]
    fn has_cross_stream(self) -> bool {
        self.0 & (1 << 2) != 0
    }
}

#[derive(Clone, Copy)]
struct KerningRecord {
    // A kerning pair is stored as two u16, but we use one u32
    // so we can binary search it directly.
    pair: u32,
    value: i16,
}

impl FromData for KerningRecord {
    const SIZE: usize = 6;

    #[inline]
    fn parse(data: &[u8]) -> Option<Self> {
        let mut s = Stream::new(data);
        Some(KerningRecord {
            pair: s.read::<u32>()?,
            value: s.read::<i16>()?,
        })
    }
}

/// A [Kerning Table](https://docs.microsoft.com/en-us/typography/opentype/spec/kern).
#[derive(Clone, Copy, Default, Debug)]
pub struct Table<'a> {
    subtables: &'a [u8],
    number_of_subtables: u16,
}

impl<'a> Table<'a> {
    /// Parses a table from raw data.
    pub fn parse(data: &'a [u8]) -> Option<Self> {
        let mut s = Stream::new(data);
        let version: u16 = s.read()?;
        if version != 0 {
            // The AAT flavor is not supported.
            return None;
        }

        let number_of_subtables: u16 = s.read()?;
        Some(Table {
            subtables: s.tail()?,
            number_of_subtables,
        })
    }

    /// Returns the horizontal kerning for a glyph pair.
    pub fn glyphs_kerning(&self, left: GlyphId, right: GlyphId) -> Option<i16> {
        let mut s = Stream::new(self.subtables);
        for _ in 0..self.number_of_subtables {
            s.skip::<u16>(); // version
            let length: u16 = s.read()?;
            let format: u8 = s.read()?;
            let coverage = Coverage(s.read::<u8>()?);

            // Subtable length includes the 6-byte header.
            let data_len = usize::from(length).checked_sub(6)?;
            let data = s.read_bytes(data_len)?;

            if !coverage.is_horizontal() || coverage.has_cross_stream() {
                continue;
            }

            if format != 0 {
                continue;
            }

            if let Some(value) = parse_format0(data, left, right) {
                return Some(value);
            }
        }

        None
    }
}

fn parse_format0(data: &[u8], left: GlyphId, right: GlyphId) -> Option<i16> {
    let mut s = Stream::new(data);
    let number_of_pairs: u16 = s.read()?;
    s.advance(6); // searchRange + entrySelector + rangeShift
    let pairs = s.read_array16::<KerningRecord>(number_of_pairs)?;

    let needle = u32::from(left.0) << 16 | u32::from(right.0);
    pairs
        .binary_search_by(|v| v.pair.cmp(&needle))
        .map(|(_, v)| v.value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format0_pair() {
        let data = &[
            0x00, 0x00, // version: 0
            0x00, 0x01, // number of subtables: 1
            // Subtable [0]
            0x00, 0x00, // version: 0
            0x00, 0x14, // length: 20
            0x00, // format: 0
            0x01, // coverage: horizontal
            0x00, 0x01, // number of pairs: 1
            0x00, 0x06, // search range
            0x00, 0x00, // entry selector
            0x00, 0x00, // range shift
            0x00, 0x22, 0x00, 0x14, // pair: 34 20
            0xFF, 0x9C, // value: -100
        ];

        let table = Table::parse(data).unwrap();
        assert_eq!(table.glyphs_kerning(GlyphId(34), GlyphId(20)), Some(-100));
        assert_eq!(table.glyphs_kerning(GlyphId(20), GlyphId(34)), None);
    }
}
