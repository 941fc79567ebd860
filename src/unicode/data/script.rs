//! Script ranges, block granularity. Default: Unknown.

use crate::unicode::props::Script;

const ZYYY: u8 = Script::Common as u8;
const ZINH: u8 = Script::Inherited as u8;
const LATN: u8 = Script::Latin as u8;
const GREK: u8 = Script::Greek as u8;
const CYRL: u8 = Script::Cyrillic as u8;
const ARMN: u8 = Script::Armenian as u8;
const HEBR: u8 = Script::Hebrew as u8;
const ARAB: u8 = Script::Arabic as u8;
const SYRC: u8 = Script::Syriac as u8;
const THAA: u8 = Script::Thaana as u8;
const DEVA: u8 = Script::Devanagari as u8;
const BENG: u8 = Script::Bengali as u8;
const GURU: u8 = Script::Gurmukhi as u8;
const GUJR: u8 = Script::Gujarati as u8;
const ORYA: u8 = Script::Oriya as u8;
const TAML: u8 = Script::Tamil as u8;
const TELU: u8 = Script::Telugu as u8;
const KNDA: u8 = Script::Kannada as u8;
const MLYM: u8 = Script::Malayalam as u8;
const SINH: u8 = Script::Sinhala as u8;
const THAI: u8 = Script::Thai as u8;
const LAOO: u8 = Script::Lao as u8;
const TIBT: u8 = Script::Tibetan as u8;
const MYMR: u8 = Script::Myanmar as u8;
const GEOR: u8 = Script::Georgian as u8;
const HANG: u8 = Script::Hangul as u8;
const ETHI: u8 = Script::Ethiopic as u8;
const CHER: u8 = Script::Cherokee as u8;
const KHMR: u8 = Script::Khmer as u8;
const HIRA: u8 = Script::Hiragana as u8;
const KANA: u8 = Script::Katakana as u8;
const BOPO: u8 = Script::Bopomofo as u8;
const HANI: u8 = Script::Han as u8;
const YIII: u8 = Script::Yi as u8;

pub(crate) const RANGES: &[(u32, u32, u8)] = &[
    (0x0000, 0x0040, ZYYY),
    (0x0041, 0x005A, LATN),
    (0x005B, 0x0060, ZYYY),
    (0x0061, 0x007A, LATN),
    (0x007B, 0x00A9, ZYYY),
    (0x00AA, 0x00AA, LATN),
    (0x00AB, 0x00B9, ZYYY),
    (0x00BA, 0x00BA, LATN),
    (0x00BB, 0x00BF, ZYYY),
    (0x00C0, 0x00D6, LATN),
    (0x00D7, 0x00D7, ZYYY),
    (0x00D8, 0x00F6, LATN),
    (0x00F7, 0x00F7, ZYYY),
    (0x00F8, 0x02B8, LATN),
    (0x02B9, 0x02DF, ZYYY),
    (0x02E0, 0x02E4, LATN),
    (0x02E5, 0x02FF, ZYYY),
    (0x0300, 0x036F, ZINH),
    (0x0370, 0x0373, GREK),
    (0x0374, 0x0374, ZYYY),
    (0x0375, 0x03FF, GREK),
    (0x0400, 0x0484, CYRL),
    (0x0485, 0x0486, ZINH),
    (0x0487, 0x052F, CYRL),
    (0x0531, 0x058F, ARMN),
    (0x0591, 0x05F4, HEBR),
    (0x0600, 0x0604, ARAB),
    (0x0605, 0x0605, ZYYY),
    (0x0606, 0x060B, ARAB),
    (0x060C, 0x060C, ZYYY),
    (0x060D, 0x061A, ARAB),
    (0x061B, 0x061B, ZYYY),
    (0x061C, 0x063F, ARAB),
    (0x0640, 0x0640, ZYYY),
    (0x0641, 0x064A, ARAB),
    (0x064B, 0x0655, ZINH),
    (0x0656, 0x065F, ARAB),
    (0x0660, 0x0669, ZYYY),
    (0x066A, 0x066F, ARAB),
    (0x0670, 0x0670, ZINH),
    (0x0671, 0x06DC, ARAB),
    (0x06DD, 0x06DD, ZYYY),
    (0x06DE, 0x06FF, ARAB),
    (0x0700, 0x074F, SYRC),
    (0x0750, 0x077F, ARAB),
    (0x0780, 0x07BF, THAA),
    (0x0860, 0x086A, SYRC),
    (0x08A0, 0x08FF, ARAB),
    (0x0900, 0x0950, DEVA),
    (0x0951, 0x0954, ZINH),
    (0x0955, 0x097F, DEVA),
    (0x0980, 0x09FF, BENG),
    (0x0A00, 0x0A7F, GURU),
    (0x0A80, 0x0AFF, GUJR),
    (0x0B00, 0x0B7F, ORYA),
    (0x0B80, 0x0BFF, TAML),
    (0x0C00, 0x0C7F, TELU),
    (0x0C80, 0x0CFF, KNDA),
    (0x0D00, 0x0D7F, MLYM),
    (0x0D80, 0x0DFF, SINH),
    (0x0E00, 0x0E3E, THAI),
    (0x0E3F, 0x0E3F, ZYYY),
    (0x0E40, 0x0E7F, THAI),
    (0x0E80, 0x0EFF, LAOO),
    (0x0F00, 0x0FFF, TIBT),
    (0x1000, 0x109F, MYMR),
    (0x10A0, 0x10FF, GEOR),
    (0x1100, 0x11FF, HANG),
    (0x1200, 0x139F, ETHI),
    (0x13A0, 0x13FF, CHER),
    (0x1780, 0x17FF, KHMR),
    (0x1C90, 0x1CBF, GEOR),
    (0x1E00, 0x1EFF, LATN),
    (0x1F00, 0x1FFF, GREK),
    (0x2000, 0x2070, ZYYY),
    (0x2071, 0x2071, LATN),
    (0x2074, 0x207E, ZYYY),
    (0x207F, 0x207F, LATN),
    (0x2080, 0x208E, ZYYY),
    (0x2090, 0x209C, LATN),
    (0x20A0, 0x20CF, ZYYY),
    (0x20D0, 0x20FF, ZINH),
    (0x2100, 0x2125, ZYYY),
    (0x2126, 0x2126, GREK),
    (0x2127, 0x2129, ZYYY),
    (0x212A, 0x212B, LATN),
    (0x212C, 0x2BFF, ZYYY),
    (0x2C60, 0x2C7F, LATN),
    (0x2D00, 0x2D2F, GEOR),
    (0x2E80, 0x2FDF, HANI),
    (0x3000, 0x3004, ZYYY),
    (0x3005, 0x3005, HANI),
    (0x3006, 0x3006, ZYYY),
    (0x3007, 0x3007, HANI),
    (0x3008, 0x3020, ZYYY),
    (0x3021, 0x3029, HANI),
    (0x302A, 0x302D, ZINH),
    (0x3030, 0x3037, ZYYY),
    (0x3038, 0x303B, HANI),
    (0x303C, 0x303F, ZYYY),
    (0x3041, 0x3096, HIRA),
    (0x3099, 0x309A, ZINH),
    (0x309B, 0x309C, ZYYY),
    (0x309D, 0x309F, HIRA),
    (0x30A0, 0x30A0, ZYYY),
    (0x30A1, 0x30FA, KANA),
    (0x30FB, 0x30FC, ZYYY),
    (0x30FD, 0x30FF, KANA),
    (0x3105, 0x312F, BOPO),
    (0x31A0, 0x31BF, BOPO),
    (0x31F0, 0x31FF, KANA),
    (0x3400, 0x4DBF, HANI),
    (0x4E00, 0x9FFF, HANI),
    (0xA000, 0xA4CF, YIII),
    (0xA720, 0xA7FF, LATN),
    (0xAB70, 0xABBF, CHER),
    (0xAC00, 0xD7A3, HANG),
    (0xF900, 0xFAFF, HANI),
    (0xFB00, 0xFB06, LATN),
    (0xFB13, 0xFB17, ARMN),
    (0xFB1D, 0xFB4F, HEBR),
    (0xFB50, 0xFDFF, ARAB),
    (0xFE00, 0xFE0F, ZINH),
    (0xFE20, 0xFE2F, ZINH),
    (0xFE70, 0xFEFE, ARAB),
    (0xFEFF, 0xFF20, ZYYY),
    (0xFF21, 0xFF3A, LATN),
    (0xFF3B, 0xFF40, ZYYY),
    (0xFF41, 0xFF5A, LATN),
    (0xFF5B, 0xFF65, ZYYY),
    (0xFF66, 0xFF6F, KANA),
    (0xFF70, 0xFF70, ZYYY),
    (0xFF71, 0xFF9D, KANA),
    (0xFF9E, 0xFF9F, ZYYY),
    (0xFFA0, 0xFFDC, HANG),
    (0x10800, 0x1083F, ZYYY),
    (0x1D100, 0x1D1FF, ZYYY),
    (0x1D400, 0x1D7FF, ZYYY),
    (0x1F300, 0x1FAFF, ZYYY),
    (0x20000, 0x2A6DF, HANI),
    (0xE0100, 0xE01EF, ZINH),
];
