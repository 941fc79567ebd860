//! Vertical_Orientation ranges. Default: Rotated.

use crate::unicode::props::VerticalOrientation;

const U: u8 = VerticalOrientation::Upright as u8;

pub(crate) const RANGES: &[(u32, u32, u8)] = &[
    (0x00A7, 0x00A7, U),
    (0x00A9, 0x00A9, U),
    (0x00AE, 0x00AE, U),
    (0x1100, 0x11FF, U),
    (0x2E80, 0x2FDF, U),
    (0x3000, 0x303F, U),
    (0x3041, 0x30FF, U),
    (0x3105, 0x312F, U),
    (0x31A0, 0x31FF, U),
    (0x3200, 0x33FF, U),
    (0x3400, 0x4DBF, U),
    (0x4E00, 0x9FFF, U),
    (0xA000, 0xA4CF, U),
    (0xAC00, 0xD7A3, U),
    (0xE000, 0xF8FF, U),
    (0xF900, 0xFAFF, U),
    (0xFE10, 0xFE1F, U),
    (0xFE30, 0xFE48, U),
    (0xFF01, 0xFF60, U),
    (0xFFE0, 0xFFE6, U),
    (0x1F300, 0x1FAFF, U),
    (0x20000, 0x2A6DF, U),
];
