//! Line_Break ranges, reduced to the classes the layout acts on.
//! Default: Alphabetic.

use crate::unicode::props::LineBreak;

const BK: u8 = LineBreak::MandatoryBreak as u8;
const CR: u8 = LineBreak::CarriageReturn as u8;
const LF: u8 = LineBreak::LineFeed as u8;
const NL: u8 = LineBreak::NextLine as u8;
const SP: u8 = LineBreak::Space as u8;
const BA: u8 = LineBreak::BreakAfter as u8;
const HY: u8 = LineBreak::Hyphen as u8;
const ZW: u8 = LineBreak::ZeroWidthSpace as u8;
const WJ: u8 = LineBreak::WordJoiner as u8;
const GL: u8 = LineBreak::Glue as u8;
const CM: u8 = LineBreak::CombiningMark as u8;
const NU: u8 = LineBreak::Numeric as u8;
const ID: u8 = LineBreak::Ideographic as u8;
const OP: u8 = LineBreak::OpenPunctuation as u8;
const CL: u8 = LineBreak::ClosePunctuation as u8;
const QU: u8 = LineBreak::Quotation as u8;
const EX: u8 = LineBreak::Exclamation as u8;
const IS: u8 = LineBreak::InfixSeparator as u8;
const SY: u8 = LineBreak::SymbolAllowingBreak as u8;
const PR: u8 = LineBreak::PrefixNumeric as u8;
const PO: u8 = LineBreak::PostfixNumeric as u8;

pub(crate) const RANGES: &[(u32, u32, u8)] = &[
    (0x0009, 0x0009, BA),
    (0x000A, 0x000A, LF),
    (0x000B, 0x000C, BK),
    (0x000D, 0x000D, CR),
    (0x0020, 0x0020, SP),
    (0x0021, 0x0021, EX),
    (0x0022, 0x0022, QU),
    (0x0024, 0x0024, PR),
    (0x0025, 0x0025, PO),
    (0x0027, 0x0027, QU),
    (0x0028, 0x0028, OP),
    (0x0029, 0x0029, CL),
    (0x002C, 0x002C, IS),
    (0x002D, 0x002D, HY),
    (0x002E, 0x002E, IS),
    (0x002F, 0x002F, SY),
    (0x0030, 0x0039, NU),
    (0x003A, 0x003B, IS),
    (0x003F, 0x003F, EX),
    (0x005B, 0x005B, OP),
    (0x005D, 0x005D, CL),
    (0x007B, 0x007B, OP),
    (0x007D, 0x007D, CL),
    (0x0085, 0x0085, NL),
    (0x00A0, 0x00A0, GL),
    (0x00A2, 0x00A5, PO),
    (0x00AB, 0x00AB, QU),
    (0x00AD, 0x00AD, BA),
    (0x00BB, 0x00BB, QU),
    (0x0300, 0x036F, CM),
    (0x0483, 0x0489, CM),
    (0x0591, 0x05BD, CM),
    (0x05BF, 0x05BF, CM),
    (0x05C1, 0x05C2, CM),
    (0x05C4, 0x05C5, CM),
    (0x05C7, 0x05C7, CM),
    (0x0610, 0x061A, CM),
    (0x064B, 0x065F, CM),
    (0x0660, 0x0669, NU),
    (0x0670, 0x0670, CM),
    (0x06D6, 0x06DC, CM),
    (0x06DF, 0x06E4, CM),
    (0x06E7, 0x06E8, CM),
    (0x06EA, 0x06ED, CM),
    (0x06F0, 0x06F9, NU),
    (0x0900, 0x0903, CM),
    (0x093A, 0x093C, CM),
    (0x093E, 0x094F, CM),
    (0x0951, 0x0957, CM),
    (0x0962, 0x0963, CM),
    (0x0966, 0x096F, NU),
    (0x0E31, 0x0E31, CM),
    (0x0E34, 0x0E3A, CM),
    (0x0E47, 0x0E4E, CM),
    (0x2000, 0x2006, BA),
    (0x2007, 0x2007, GL),
    (0x2008, 0x200A, BA),
    (0x200B, 0x200B, ZW),
    (0x200C, 0x200D, CM),
    (0x2010, 0x2010, BA),
    (0x2011, 0x2011, GL),
    (0x2012, 0x2013, BA),
    (0x2014, 0x2014, BA),
    (0x2018, 0x2019, QU),
    (0x201C, 0x201D, QU),
    (0x2028, 0x2029, BK),
    (0x202F, 0x202F, GL),
    (0x2030, 0x2037, PO),
    (0x2039, 0x203A, QU),
    (0x2044, 0x2044, IS),
    (0x205F, 0x205F, BA),
    (0x2060, 0x2060, WJ),
    (0x20A0, 0x20CF, PR),
    (0x20D0, 0x20FF, CM),
    (0x3000, 0x3000, BA),
    (0x3001, 0x3002, CL),
    (0x3008, 0x3008, OP),
    (0x3009, 0x3009, CL),
    (0x300A, 0x300A, OP),
    (0x300B, 0x300B, CL),
    (0x300C, 0x300C, OP),
    (0x300D, 0x300D, CL),
    (0x300E, 0x300E, OP),
    (0x300F, 0x300F, CL),
    (0x3010, 0x3010, OP),
    (0x3011, 0x3011, CL),
    (0x3041, 0x30FF, ID),
    (0x3105, 0x312F, ID),
    (0x3400, 0x4DBF, ID),
    (0x4E00, 0x9FFF, ID),
    (0xAC00, 0xD7A3, ID),
    (0xF900, 0xFAFF, ID),
    (0xFE00, 0xFE0F, CM),
    (0xFE20, 0xFE2F, CM),
    (0xFEFF, 0xFEFF, WJ),
    (0xFF01, 0xFF01, EX),
    (0xFF08, 0xFF08, OP),
    (0xFF09, 0xFF09, CL),
    (0xFF0C, 0xFF0C, CL),
    (0xFF0E, 0xFF0E, CL),
    (0xFF1F, 0xFF1F, EX),
    (0x1F300, 0x1FAFF, ID),
    (0x20000, 0x2A6DF, ID),
];
