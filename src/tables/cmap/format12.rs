// https://docs.microsoft.com/en-us/typography/opentype/spec/cmap#format-12-segmented-coverage

use core::convert::TryFrom;

use crate::parser::{FromData, Stream};

#[derive(Clone, Copy)]
pub struct SequentialMapGroup {
    pub start_char_code: u32,
    pub end_char_code: u32,
    pub start_glyph_id: u32,
}

impl FromData for SequentialMapGroup {
    const SIZE: usize = 12;

    #[inline]
    fn parse(data: &[u8]) -> Option<Self> {
        let mut s = Stream::new(data);
        Some(SequentialMapGroup {
            start_char_code: s.read::<u32>()?,
            end_char_code: s.read::<u32>()?,
            start_glyph_id: s.read::<u32>()?,
        })
    }
}

pub fn parse(data: &[u8], code_point: u32) -> Option<u16> {
    let mut s = Stream::new(data);
    s.skip::<u16>(); // format
    s.skip::<u16>(); // reserved
    s.skip::<u32>(); // length
    s.skip::<u32>(); // language
    let count: u32 = s.read()?;
    let groups = s.read_array32::<SequentialMapGroup>(count)?;

    // Groups are sorted by `start_char_code`.
    let (_, group) = groups.binary_search_by(|group| {
        if code_point < group.start_char_code {
            core::cmp::Ordering::Greater
        } else if code_point > group.end_char_code {
            core::cmp::Ordering::Less
        } else {
            core::cmp::Ordering::Equal
        }
    })?;

    let id = group
        .start_glyph_id
        .checked_add(code_point)?
        .checked_sub(group.start_char_code)?;
    u16::try_from(id).ok()
}

pub fn codepoints(data: &[u8], mut f: impl FnMut(u32)) -> Option<()> {
    let mut s = Stream::new(data);
    s.skip::<u16>(); // format
    s.skip::<u16>(); // reserved
    s.skip::<u32>(); // length
    s.skip::<u32>(); // language
    let count: u32 = s.read()?;
    let groups = s.read_array32::<SequentialMapGroup>(count)?;
    for group in groups {
        for code_point in group.start_char_code..=group.end_char_code {
            f(code_point);
        }
    }

    Some(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_numbering() {
        let data = &[
            0x00, 0x0C, // format: 12
            0x00, 0x00, // reserved
            0x00, 0x00, 0x00, 0x28, // length: 40
            0x00, 0x00, 0x00, 0x00, // language: 0
            0x00, 0x00, 0x00, 0x02, // groups: 2
            // Group [0]
            0x00, 0x00, 0x00, 0x41, // start: 65
            0x00, 0x00, 0x00, 0x45, // end: 69
            0x00, 0x00, 0x00, 0x0A, // start glyph: 10
            // Group [1]
            0x00, 0x01, 0xF6, 0x00, // start: 0x1F600
            0x00, 0x01, 0xF6, 0x4F, // end: 0x1F64F
            0x00, 0x00, 0x01, 0x00, // start glyph: 256
        ];

        assert_eq!(parse(data, 0x41), Some(10));
        assert_eq!(parse(data, 0x45), Some(14));
        assert_eq!(parse(data, 0x46), None);
        assert_eq!(parse(data, 0x1F600), Some(256));
        assert_eq!(parse(data, 0x1F64F), Some(335));
    }
}
