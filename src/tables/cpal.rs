//! A [Color Palette Table](
//! https://docs.microsoft.com/en-us/typography/opentype/spec/cpal) implementation.

use crate::parser::{FromData, LazyArray16, Stream};

/// A BGRA color.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[allow(missing_docs)]
pub struct Color {
    pub blue: u8,
    pub green: u8,
    pub red: u8,
    pub alpha: u8,
}

impl FromData for Color {
    const SIZE: usize = 4;

    #[inline]
    fn parse(data: &[u8]) -> Option<Self> {
        let mut s = Stream::new(data);
        Some(Color {
            blue: s.read::<u8>()?,
            green: s.read::<u8>()?,
            red: s.read::<u8>()?,
            alpha: s.read::<u8>()?,
        })
    }
}

/// A [Color Palette Table](
/// https://docs.microsoft.com/en-us/typography/opentype/spec/cpal).
#[derive(Clone, Copy, Debug)]
pub struct Table<'a> {
    entries_per_palette: u16,
    first_color_indices: LazyArray16<'a, u16>,
    colors: LazyArray16<'a, Color>,
}

impl<'a> Table<'a> {
    /// Parses a table from raw data.
    pub fn parse(data: &'a [u8]) -> Option<Self> {
        let mut s = Stream::new(data);
        let version: u16 = s.read()?;
        if version > 1 {
            return None;
        }

        let entries_per_palette: u16 = s.read()?;
        let palette_count: u16 = s.read()?;
        let color_count: u16 = s.read()?;
        let colors_offset: u32 = s.read()?;
        let first_color_indices = s.read_array16::<u16>(palette_count)?;

        let colors = {
            let mut s = Stream::new_at(data, colors_offset as usize)?;
            s.read_array16::<Color>(color_count)?
        };

        Some(Table {
            entries_per_palette,
            first_color_indices,
            colors,
        })
    }

    /// Returns the number of palettes.
    #[inline]
    pub fn palettes(&self) -> u16 {
        self.first_color_indices.len()
    }

    /// Returns the color of `palette_entry` in `palette`.
    pub fn color(&self, palette: u16, palette_entry: u16) -> Option<Color> {
        if palette_entry >= self.entries_per_palette {
            return None;
        }

        let first = self.first_color_indices.get(palette)?;
        self.colors.get(first.checked_add(palette_entry)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_palette() {
        let data = &[
            0x00, 0x00, // version: 0
            0x00, 0x02, // entries per palette: 2
            0x00, 0x01, // palette count: 1
            0x00, 0x02, // color count: 2
            0x00, 0x00, 0x00, 0x0E, // colors offset: 14
            0x00, 0x00, // first color index [0]: 0
            // Colors, BGRA.
            0x10, 0x20, 0x30, 0xFF,
            0x40, 0x50, 0x60, 0x80,
        ];

        let table = Table::parse(data).unwrap();
        assert_eq!(table.palettes(), 1);
        assert_eq!(
            table.color(0, 1),
            Some(Color { blue: 0x40, green: 0x50, red: 0x60, alpha: 0x80 })
        );
        assert_eq!(table.color(0, 2), None);
        assert_eq!(table.color(1, 0), None);
    }
}
