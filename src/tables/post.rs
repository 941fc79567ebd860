//! A [PostScript Table](
//! https://docs.microsoft.com/en-us/typography/opentype/spec/post) implementation.

use crate::parser::{Fixed, Stream};
use crate::LineMetrics;

/// A [PostScript Table](https://docs.microsoft.com/en-us/typography/opentype/spec/post).
#[derive(Clone, Copy, Debug)]
pub struct Table {
    /// Italic angle in counter-clockwise degrees from the vertical.
    pub italic_angle: f32,
    /// Underline metrics.
    pub underline_metrics: LineMetrics,
    /// Flag that indicates a monospaced font.
    pub is_monospaced: bool,
}

impl Table {
    /// Parses a table from raw data.
    pub fn parse(data: &[u8]) -> Option<Self> {
        let mut s = Stream::new(data);
        let version: u32 = s.read()?;
        if !(version == 0x00010000
            || version == 0x00020000
            || version == 0x00025000
            || version == 0x00030000)
        {
            return None;
        }

        let italic_angle = s.read::<Fixed>()?.0;

        let underline_metrics = LineMetrics {
            position: s.read::<i16>()?,
            thickness: s.read::<i16>()?,
        };

        let is_monospaced = s.read::<u32>()? != 0;

        Some(Table {
            italic_angle,
            underline_metrics,
            is_monospaced,
        })
    }
}
