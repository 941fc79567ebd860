//! Grapheme_Cluster_Break ranges. Default: Other.
//! Precomposed Hangul syllables (LV/LVT) are classified arithmetically
//! by the accessor.

use crate::unicode::props::GraphemeClusterBreak;

const CR: u8 = GraphemeClusterBreak::CarriageReturn as u8;
const LF: u8 = GraphemeClusterBreak::LineFeed as u8;
const CN: u8 = GraphemeClusterBreak::Control as u8;
const EX: u8 = GraphemeClusterBreak::Extend as u8;
const ZWJ: u8 = GraphemeClusterBreak::ZeroWidthJoiner as u8;
const RI: u8 = GraphemeClusterBreak::RegionalIndicator as u8;
const PP: u8 = GraphemeClusterBreak::Prepend as u8;
const SM: u8 = GraphemeClusterBreak::SpacingMark as u8;
const L: u8 = GraphemeClusterBreak::HangulL as u8;
const V: u8 = GraphemeClusterBreak::HangulV as u8;
const T: u8 = GraphemeClusterBreak::HangulT as u8;

pub(crate) const RANGES: &[(u32, u32, u8)] = &[
    (0x0000, 0x0009, CN),
    (0x000A, 0x000A, LF),
    (0x000B, 0x000C, CN),
    (0x000D, 0x000D, CR),
    (0x000E, 0x001F, CN),
    (0x007F, 0x009F, CN),
    (0x00AD, 0x00AD, CN),
    (0x0300, 0x036F, EX),
    (0x0483, 0x0489, EX),
    (0x0591, 0x05BD, EX),
    (0x05BF, 0x05BF, EX),
    (0x05C1, 0x05C2, EX),
    (0x05C4, 0x05C5, EX),
    (0x05C7, 0x05C7, EX),
    (0x0600, 0x0605, PP),
    (0x0610, 0x061A, EX),
    (0x061C, 0x061C, CN),
    (0x064B, 0x065F, EX),
    (0x0670, 0x0670, EX),
    (0x06D6, 0x06DC, EX),
    (0x06DD, 0x06DD, PP),
    (0x06DF, 0x06E4, EX),
    (0x06E7, 0x06E8, EX),
    (0x06EA, 0x06ED, EX),
    (0x070F, 0x070F, PP),
    (0x0711, 0x0711, EX),
    (0x0730, 0x074A, EX),
    (0x0900, 0x0902, EX),
    (0x0903, 0x0903, SM),
    (0x093A, 0x093A, EX),
    (0x093B, 0x093B, SM),
    (0x093C, 0x093C, EX),
    (0x093E, 0x0940, SM),
    (0x0941, 0x0948, EX),
    (0x0949, 0x094C, SM),
    (0x094D, 0x094D, EX),
    (0x094E, 0x094F, SM),
    (0x0951, 0x0957, EX),
    (0x0962, 0x0963, EX),
    (0x0981, 0x0981, EX),
    (0x0982, 0x0983, SM),
    (0x09BC, 0x09BC, EX),
    (0x09BE, 0x09BE, EX),
    (0x09BF, 0x09C0, SM),
    (0x09C1, 0x09C4, EX),
    (0x09C7, 0x09C8, SM),
    (0x09CB, 0x09CC, SM),
    (0x09CD, 0x09CD, EX),
    (0x0E31, 0x0E31, EX),
    (0x0E33, 0x0E33, SM),
    (0x0E34, 0x0E3A, EX),
    (0x0E47, 0x0E4E, EX),
    (0x1100, 0x115F, L),
    (0x1160, 0x11A7, V),
    (0x11A8, 0x11FF, T),
    (0x200B, 0x200B, CN),
    (0x200C, 0x200C, EX),
    (0x200D, 0x200D, ZWJ),
    (0x200E, 0x200F, CN),
    (0x2028, 0x202E, CN),
    (0x2060, 0x206F, CN),
    (0x20D0, 0x20F0, EX),
    (0x3099, 0x309A, EX),
    (0xA960, 0xA97C, L),
    (0xD7B0, 0xD7C6, V),
    (0xD7CB, 0xD7FB, T),
    (0xFB1E, 0xFB1E, EX),
    (0xFE00, 0xFE0F, EX),
    (0xFE20, 0xFE2F, EX),
    (0xFEFF, 0xFEFF, CN),
    (0x1D165, 0x1D165, EX),
    (0x1D166, 0x1D166, SM),
    (0x1D167, 0x1D169, EX),
    (0x1D16D, 0x1D16D, SM),
    (0x1D16E, 0x1D172, EX),
    (0x1D173, 0x1D17A, CN),
    (0x1D17B, 0x1D182, EX),
    (0x1F1E6, 0x1F1FF, RI),
    (0xE0020, 0xE007F, EX),
    (0xE0100, 0xE01EF, EX),
];
