// https://docs.microsoft.com/en-us/typography/opentype/spec/cmap#format-4-segment-mapping-to-delta-values

use core::convert::TryFrom;

use crate::parser::Stream;

pub fn parse(data: &[u8], code_point: u32) -> Option<u16> {
    // This subtable supports code points only in a u16 range.
    let code_point = u16::try_from(code_point).ok()?;

    let mut s = Stream::new(data);
    s.advance(6); // format + length + language
    let seg_count_x2: u16 = s.read()?;
    if seg_count_x2 < 2 {
        return None;
    }

    let seg_count = seg_count_x2 / 2;
    s.advance(6); // searchRange + entrySelector + rangeShift

    let end_codes = s.read_array16::<u16>(seg_count)?;
    s.skip::<u16>(); // reservedPad
    let start_codes = s.read_array16::<u16>(seg_count)?;
    let id_deltas = s.read_array16::<i16>(seg_count)?;
    let id_range_offset_pos = s.offset();
    let id_range_offsets = s.read_array16::<u16>(seg_count)?;

    // A custom binary search for the first segment with end_code >= code_point.
    let mut start = 0;
    let mut end = seg_count;
    while end > start {
        let index = (start + end) / 2;
        let end_value = end_codes.get(index)?;
        if end_value >= code_point {
            let start_value = start_codes.get(index)?;
            if start_value > code_point {
                end = index;
            } else {
                let id_range_offset = id_range_offsets.get(index)?;
                let id_delta = id_deltas.get(index)?;
                if id_range_offset == 0 {
                    return Some(code_point.wrapping_add(id_delta as u16));
                }

                let delta = (u32::from(code_point) - u32::from(start_value)) * 2;
                let delta = u16::try_from(delta).ok()?;

                let id_range_offset_pos = (id_range_offset_pos + usize::from(index) * 2) as u16;
                let pos = id_range_offset_pos.wrapping_add(delta);
                let pos = pos.wrapping_add(id_range_offset);
                let glyph_array_value: u16 = Stream::read_at(data, usize::from(pos))?;

                // 0 indicates missing glyph.
                if glyph_array_value == 0 {
                    return None;
                }

                let glyph_id = (glyph_array_value as i16).wrapping_add(id_delta);
                return u16::try_from(glyph_id).ok();
            }
        } else {
            start = index + 1;
        }
    }

    None
}

pub fn codepoints(data: &[u8], mut f: impl FnMut(u32)) -> Option<()> {
    let mut s = Stream::new(data);
    s.advance(6); // format + length + language
    let seg_count_x2: u16 = s.read()?;
    if seg_count_x2 < 2 {
        return None;
    }

    let seg_count = seg_count_x2 / 2;
    s.advance(6); // searchRange + entrySelector + rangeShift

    let end_codes = s.read_array16::<u16>(seg_count)?;
    s.skip::<u16>(); // reservedPad
    let start_codes = s.read_array16::<u16>(seg_count)?;

    for (start, end) in start_codes.into_iter().zip(end_codes) {
        // Skip the 0xFFFF terminal segment.
        if start == 0xFFFF && end == 0xFFFF {
            continue;
        }

        for code_point in start..=end {
            f(u32::from(code_point));
        }
    }

    Some(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segmented_data() -> Vec<u8> {
        // Three segments with delta-only mapping:
        // 10..=20 -> 1.., 30..=90 -> 12.., 153..=480 -> 126..
        let mut data = vec![
            0x00, 0x04, // format: 4
            0x00, 0x30, // subtable size: 48
            0x00, 0x00, // language ID: 0
            0x00, 0x08, // 2 x segCount: 8
            0x00, 0x08, // search range
            0x00, 0x02, // entry selector
            0x00, 0x00, // range shift
        ];
        // End codes.
        data.extend(&[0x00, 0x14, 0x00, 0x5A, 0x01, 0xE0, 0xFF, 0xFF]);
        data.extend(&[0x00, 0x00]); // reserved
        // Start codes.
        data.extend(&[0x00, 0x0A, 0x00, 0x1E, 0x00, 0x99, 0xFF, 0xFF]);
        // Deltas: -9, -18, -27, 1.
        data.extend(&[0xFF, 0xF7, 0xFF, 0xEE, 0xFF, 0xE5, 0x00, 0x01]);
        // Range offsets.
        data.extend(&[0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]);
        data
    }

    #[test]
    fn delta_mapping() {
        let data = segmented_data();
        assert_eq!(parse(&data, 10), Some(1));
        assert_eq!(parse(&data, 20), Some(11));
        assert_eq!(parse(&data, 30), Some(12));
        assert_eq!(parse(&data, 90), Some(72));
        assert_eq!(parse(&data, 153), Some(126));
        assert_eq!(parse(&data, 480), Some(453));
        assert_eq!(parse(&data, 500), None);
        assert_eq!(parse(&data, 9), None);
        assert_eq!(parse(&data, 21), None);
    }

    #[test]
    fn glyph_id_array_mapping() {
        let data = &[
            0x00, 0x04, // format: 4
            0x00, 0x24, // subtable size: 36
            0x00, 0x00, // language ID: 0
            0x00, 0x04, // 2 x segCount: 4
            0x00, 0x04, // search range: 4
            0x00, 0x01, // entry selector: 1
            0x00, 0x00, // range shift: 0
            // End character codes
            0x00, 0x42, // char code [0]: 66
            0xFF, 0xFF, // char code [1]: 65535
            0x00, 0x00, // reserved: 0
            // Start character codes
            0x00, 0x41, // char code [0]: 65
            0xFF, 0xFF, // char code [1]: 65535
            // Deltas
            0x00, 0x00, // delta [0]: 0
            0x00, 0x01, // delta [1]: 1
            // Offsets into Glyph index array
            0x00, 0x04, // offset [0]: 4
            0x00, 0x00, // offset [1]: 0
            // Glyph index array
            0x00, 0x64, // glyph ID [0]: 100
            0x03, 0xE8, // glyph ID [1]: 1000
        ];

        assert_eq!(parse(data, 0x41), Some(100));
        assert_eq!(parse(data, 0x42), Some(1000));
        assert_eq!(parse(data, 0x43), None);
    }

    #[test]
    fn codepoint_iteration() {
        let data = segmented_data();
        let mut collected = vec![];
        codepoints(&data, |c| collected.push(c));
        assert_eq!(collected.len(), 11 + 61 + 328);
        assert_eq!(collected[0], 10);
        assert_eq!(*collected.last().unwrap(), 480);
    }
}
