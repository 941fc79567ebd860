// https://docs.microsoft.com/en-us/typography/opentype/spec/cmap#format-0-byte-encoding-table

use crate::parser::{NumFrom, Stream};

pub fn parse(data: &[u8], code_point: u32) -> Option<u16> {
    let mut s = Stream::new(data);
    s.skip::<u16>(); // format
    let length: u16 = s.read()?;
    s.skip::<u16>(); // language

    if code_point < u32::from(length).min(256) {
        s.advance(usize::num_from(code_point));
        Some(u16::from(s.read::<u8>()?))
    } else {
        None
    }
}

pub fn codepoints(data: &[u8], mut f: impl FnMut(u32)) -> Option<()> {
    let mut s = Stream::new(data);
    s.skip::<u16>(); // format
    let length: u16 = s.read()?;
    s.skip::<u16>(); // language

    for code_point in 0..u32::from(length).min(256) {
        // Skip codepoints mapped to the missing glyph.
        let glyph_id = u16::from(s.read::<u8>()?);
        if glyph_id != 0 {
            f(code_point);
        }
    }

    Some(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direct_mapping() {
        let mut data = vec![
            0x00, 0x00, // format: 0
            0x01, 0x06, // subtable size: 262
            0x00, 0x00, // language ID: 0
        ];
        data.extend(std::iter::repeat(0).take(256));
        data[6 + 0x41] = 17;

        assert_eq!(parse(&data, 0x41), Some(17));
        assert_eq!(parse(&data, 0x42), Some(0));
        assert_eq!(parse(&data, 0x100), None);

        let mut collected = vec![];
        codepoints(&data, |c| collected.push(c));
        assert_eq!(collected, [0x41]);
    }
}
