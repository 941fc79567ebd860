//! A [Color Table](
//! https://docs.microsoft.com/en-us/typography/opentype/spec/colr) implementation.
//!
//! Only the version 0 layer model is supported: layer enumeration is exposed
//! and compositing is left to the renderer. Version 1 extensions are
//! detected and ignored.

use crate::parser::{FromData, LazyArray16, Stream};
use crate::GlyphId;

#[derive(Clone, Copy, Debug)]
struct BaseGlyphRecord {
    glyph_id: GlyphId,
    first_layer_index: u16,
    num_layers: u16,
}

impl FromData for BaseGlyphRecord {
    const SIZE: usize = 6;

    #[inline]
    fn parse(data: &[u8]) -> Option<Self> {
        let mut s = Stream::new(data);
        Some(BaseGlyphRecord {
            glyph_id: s.read::<GlyphId>()?,
            first_layer_index: s.read::<u16>()?,
            num_layers: s.read::<u16>()?,
        })
    }
}

/// A color glyph layer: a glyph outline painted with a palette entry.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Layer {
    /// The glyph providing the outline.
    pub glyph_id: GlyphId,
    /// An index into a `CPAL` palette, or `0xFFFF` for the text color.
    pub palette_index: u16,
}

impl FromData for Layer {
    const SIZE: usize = 4;

    #[inline]
    fn parse(data: &[u8]) -> Option<Self> {
        let mut s = Stream::new(data);
        Some(Layer {
            glyph_id: s.read::<GlyphId>()?,
            palette_index: s.read::<u16>()?,
        })
    }
}

/// A [Color Table](https://docs.microsoft.com/en-us/typography/opentype/spec/colr).
#[derive(Clone, Copy, Debug)]
pub struct Table<'a> {
    base_glyphs: LazyArray16<'a, BaseGlyphRecord>,
    layers: LazyArray16<'a, Layer>,
}

impl<'a> Table<'a> {
    /// Parses a table from raw data.
    pub fn parse(data: &'a [u8]) -> Option<Self> {
        let mut s = Stream::new(data);
        let version: u16 = s.read()?;
        if version > 1 {
            return None;
        }
        if version == 1 {
            log::debug!("COLRv1 extensions are ignored; using the v0 layer records");
        }

        let num_base_glyphs: u16 = s.read()?;
        let base_glyphs_offset: u32 = s.read()?;
        let layers_offset: u32 = s.read()?;
        let num_layers: u16 = s.read()?;

        let base_glyphs = {
            let mut s = Stream::new_at(data, base_glyphs_offset as usize)?;
            s.read_array16::<BaseGlyphRecord>(num_base_glyphs)?
        };

        let layers = {
            let mut s = Stream::new_at(data, layers_offset as usize)?;
            s.read_array16::<Layer>(num_layers)?
        };

        Some(Table { base_glyphs, layers })
    }

    /// Checks that the glyph has color layers.
    pub fn contains(&self, glyph_id: GlyphId) -> bool {
        self.base_glyphs
            .binary_search_by(|r| r.glyph_id.cmp(&glyph_id))
            .is_some()
    }

    /// Returns the color layers of a glyph, bottom-most first.
    pub fn layers(&self, glyph_id: GlyphId) -> Option<LazyArray16<'a, Layer>> {
        let (_, record) = self
            .base_glyphs
            .binary_search_by(|r| r.glyph_id.cmp(&glyph_id))?;

        let start = record.first_layer_index;
        let end = start.checked_add(record.num_layers)?;
        self.layers.slice(start..end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layer_enumeration() {
        let data = &[
            0x00, 0x00, // version: 0
            0x00, 0x01, // base glyph count: 1
            0x00, 0x00, 0x00, 0x0E, // base glyphs offset: 14
            0x00, 0x00, 0x00, 0x14, // layers offset: 20
            0x00, 0x02, // layer count: 2
            // Base glyph [0]: glyph 7, layers 0..2
            0x00, 0x07, 0x00, 0x00, 0x00, 0x02,
            // Layer [0]: glyph 8, palette entry 0
            0x00, 0x08, 0x00, 0x00,
            // Layer [1]: glyph 9, palette entry 3
            0x00, 0x09, 0x00, 0x03,
        ];

        let table = Table::parse(data).unwrap();
        assert!(table.contains(GlyphId(7)));
        assert!(!table.contains(GlyphId(8)));

        let layers: Vec<Layer> = table.layers(GlyphId(7)).unwrap().into_iter().collect();
        assert_eq!(
            layers,
            [
                Layer { glyph_id: GlyphId(8), palette_index: 0 },
                Layer { glyph_id: GlyphId(9), palette_index: 3 },
            ]
        );
    }
}
