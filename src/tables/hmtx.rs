//! A [Horizontal/Vertical Metrics Table](
//! https://docs.microsoft.com/en-us/typography/opentype/spec/hmtx) implementation.
//!
//! `hmtx` and `vmtx` share the layout, so this table type serves both.

use core::num::NonZeroU16;

use crate::parser::{FromData, LazyArray16, Stream};
use crate::GlyphId;

/// A metrics record: advance and the leading side bearing.
#[derive(Clone, Copy, Debug)]
pub struct Metrics {
    /// Advance width/height in font units.
    pub advance: u16,
    /// Left/top side bearing in font units.
    pub side_bearing: i16,
}

impl FromData for Metrics {
    const SIZE: usize = 4;

    #[inline]
    fn parse(data: &[u8]) -> Option<Self> {
        let mut s = Stream::new(data);
        Some(Metrics {
            advance: s.read::<u16>()?,
            side_bearing: s.read::<i16>()?,
        })
    }
}

/// A [Horizontal/Vertical Metrics Table](
/// https://docs.microsoft.com/en-us/typography/opentype/spec/hmtx).
#[derive(Clone, Copy, Default, Debug)]
pub struct Table<'a> {
    metrics: LazyArray16<'a, Metrics>,
    /// Side bearings for glyph IDs above `number_of_metrics`; those glyphs
    /// repeat the last advance.
    bearings: LazyArray16<'a, i16>,
    number_of_metrics: u16,
}

impl<'a> Table<'a> {
    /// Parses a table from raw data.
    ///
    /// `number_of_metrics` comes from `hhea`/`vhea`, `number_of_glyphs` from
    /// `maxp`.
    pub fn parse(
        data: &'a [u8],
        number_of_metrics: NonZeroU16,
        number_of_glyphs: NonZeroU16,
    ) -> Option<Self> {
        let mut number_of_metrics = number_of_metrics.get();

        // The table cannot have more metrics than glyphs.
        if number_of_metrics > number_of_glyphs.get() {
            number_of_metrics = number_of_glyphs.get();
        }

        let mut s = Stream::new(data);
        let metrics = s.read_array16::<Metrics>(number_of_metrics)?;

        // The rest of the table is a side-bearings-only array for the glyphs
        // that reuse the last advance. Truncated arrays are accepted.
        let bearings_count = number_of_glyphs.get() - number_of_metrics;
        let bearings = s.read_array16::<i16>(bearings_count).unwrap_or_default();

        Some(Table {
            metrics,
            bearings,
            number_of_metrics,
        })
    }

    /// Returns the advance for a glyph.
    pub fn advance(&self, glyph_id: GlyphId) -> Option<u16> {
        if glyph_id.0 < self.number_of_metrics {
            Some(self.metrics.get(glyph_id.0)?.advance)
        } else if !self.bearings.is_empty() {
            // Out-of-range glyphs repeat the last advance.
            let index = glyph_id.0.checked_sub(self.number_of_metrics)?;
            if index < self.bearings.len() {
                Some(self.metrics.last()?.advance)
            } else {
                None
            }
        } else {
            None
        }
    }

    /// Returns the side bearing for a glyph.
    pub fn side_bearing(&self, glyph_id: GlyphId) -> Option<i16> {
        if glyph_id.0 < self.number_of_metrics {
            Some(self.metrics.get(glyph_id.0)?.side_bearing)
        } else {
            let index = glyph_id.0.checked_sub(self.number_of_metrics)?;
            self.bearings.get(index)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::num::NonZeroU16;

    macro_rules! nzu16 {
        ($n:expr) => {
            NonZeroU16::new($n).unwrap()
        };
    }

    #[test]
    fn simple_case() {
        let data = &[
            0x00, 0x01, // advance width [0]: 1
            0x00, 0x02, // side bearing [0]: 2
        ];

        let table = Table::parse(data, nzu16!(1), nzu16!(1)).unwrap();
        assert_eq!(table.advance(GlyphId(0)), Some(1));
        assert_eq!(table.side_bearing(GlyphId(0)), Some(2));
    }

    #[test]
    fn additional_side_bearings(){
        let data = &[
            0x00, 0x01, // advance width [0]: 1
            0x00, 0x02, // side bearing [0]: 2
            0x00, 0x03, // side bearing [1]: 3
            0x00, 0x04, // side bearing [2]: 4
        ];

        let table = Table::parse(data, nzu16!(1), nzu16!(3)).unwrap();
        assert_eq!(table.advance(GlyphId(1)), Some(1));
        assert_eq!(table.advance(GlyphId(2)), Some(1));
        assert_eq!(table.side_bearing(GlyphId(1)), Some(3));
        assert_eq!(table.side_bearing(GlyphId(2)), Some(4));
    }

    #[test]
    fn less_metrics_than_glyphs() {
        let data = &[
            0x00, 0x01, // advance width [0]: 1
            0x00, 0x02, // side bearing [0]: 2
            0x00, 0x03, // advance width [1]: 3
            0x00, 0x04, // side bearing [1]: 4
            0x00, 0x05, // side bearing [2]: 5
        ];

        let table = Table::parse(data, nzu16!(2), nzu16!(3)).unwrap();
        assert_eq!(table.side_bearing(GlyphId(0)), Some(2));
        assert_eq!(table.side_bearing(GlyphId(1)), Some(4));
        assert_eq!(table.side_bearing(GlyphId(2)), Some(5));
        assert_eq!(table.advance(GlyphId(2)), Some(3));
        assert_eq!(table.advance(GlyphId(3)), None);
    }
}
