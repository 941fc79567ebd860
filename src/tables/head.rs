//! A [Font Header Table](https://docs.microsoft.com/en-us/typography/opentype/spec/head)
//! implementation.

use crate::parser::Stream;
use crate::Rect;

/// An index format used by the [Index to Location Table](
/// https://docs.microsoft.com/en-us/typography/opentype/spec/loca).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum IndexToLocationFormat {
    /// Short offsets, stored divided by 2.
    Short,
    /// Long, 32-bit offsets.
    Long,
}

/// A [Font Header Table](https://docs.microsoft.com/en-us/typography/opentype/spec/head).
#[derive(Clone, Copy, Debug)]
pub struct Table {
    /// Units per EM.
    ///
    /// Guaranteed to be in the 16..=16384 range.
    pub units_per_em: u16,
    /// The `head` flags word.
    pub flags: u16,
    /// A bounding box that large enough to enclose any glyph from the face.
    pub global_bbox: Rect,
    /// An index format used by the [Index to Location Table](
    /// https://docs.microsoft.com/en-us/typography/opentype/spec/loca).
    pub index_to_location_format: IndexToLocationFormat,
}

impl Table {
    /// Parses a table from raw data.
    pub fn parse(data: &[u8]) -> Option<Self> {
        // Do not check the whole table size, because some fonts omit
        // the last `glyphDataFormat` field.
        if data.len() < 52 {
            return None;
        }

        let flags: u16 = Stream::read_at(data, 16)?;

        let units_per_em: u16 = Stream::read_at(data, 18)?;
        if !(16..=16384).contains(&units_per_em) {
            return None;
        }

        let mut s = Stream::new_at(data, 36)?;
        let global_bbox = Rect {
            x_min: s.read::<i16>()?,
            y_min: s.read::<i16>()?,
            x_max: s.read::<i16>()?,
            y_max: s.read::<i16>()?,
        };

        let index_to_location_format = match Stream::read_at::<i16>(data, 50)? {
            0 => IndexToLocationFormat::Short,
            1 => IndexToLocationFormat::Long,
            _ => return None,
        };

        Some(Table {
            units_per_em,
            flags,
            global_bbox,
            index_to_location_format,
        })
    }
}
