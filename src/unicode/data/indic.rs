//! Indic_Syllabic_Category and Indic_Positional_Category ranges for the
//! Devanagari-model blocks the reorderer handles. Default: Other / NA.

use crate::unicode::props::{IndicPositionalCategory, IndicSyllabicCategory};

const BINDU: u8 = IndicSyllabicCategory::Bindu as u8;
const VISARGA: u8 = IndicSyllabicCategory::Visarga as u8;
const AVAGRAHA: u8 = IndicSyllabicCategory::Avagraha as u8;
const NUKTA: u8 = IndicSyllabicCategory::Nukta as u8;
const VIRAMA: u8 = IndicSyllabicCategory::Virama as u8;
const VOWEL_IND: u8 = IndicSyllabicCategory::VowelIndependent as u8;
const VOWEL_DEP: u8 = IndicSyllabicCategory::VowelDependent as u8;
const CONSONANT: u8 = IndicSyllabicCategory::Consonant as u8;
const NUMBER: u8 = IndicSyllabicCategory::Number as u8;

pub(crate) const SYLLABIC_RANGES: &[(u32, u32, u8)] = &[
    (0x0900, 0x0902, BINDU),
    (0x0903, 0x0903, VISARGA),
    (0x0904, 0x0914, VOWEL_IND),
    (0x0915, 0x0939, CONSONANT),
    (0x093A, 0x093B, VOWEL_DEP),
    (0x093C, 0x093C, NUKTA),
    (0x093D, 0x093D, AVAGRAHA),
    (0x093E, 0x094C, VOWEL_DEP),
    (0x094D, 0x094D, VIRAMA),
    (0x094E, 0x094F, VOWEL_DEP),
    (0x0955, 0x0957, VOWEL_DEP),
    (0x0958, 0x095F, CONSONANT),
    (0x0960, 0x0961, VOWEL_IND),
    (0x0962, 0x0963, VOWEL_DEP),
    (0x0966, 0x096F, NUMBER),
    (0x0972, 0x097F, CONSONANT),
    (0x0981, 0x0981, BINDU),
    (0x0982, 0x0983, VISARGA),
    (0x0985, 0x0994, VOWEL_IND),
    (0x0995, 0x09B9, CONSONANT),
    (0x09BC, 0x09BC, NUKTA),
    (0x09BD, 0x09BD, AVAGRAHA),
    (0x09BE, 0x09CC, VOWEL_DEP),
    (0x09CD, 0x09CD, VIRAMA),
    (0x09DC, 0x09DF, CONSONANT),
    (0x09E0, 0x09E1, VOWEL_IND),
    (0x09E2, 0x09E3, VOWEL_DEP),
    (0x09E6, 0x09EF, NUMBER),
    (0x09F0, 0x09F1, CONSONANT),
];

const LEFT: u8 = IndicPositionalCategory::Left as u8;
const RIGHT: u8 = IndicPositionalCategory::Right as u8;
const TOP: u8 = IndicPositionalCategory::Top as u8;
const BOTTOM: u8 = IndicPositionalCategory::Bottom as u8;
const LEFT_AND_RIGHT: u8 = IndicPositionalCategory::LeftAndRight as u8;

pub(crate) const POSITIONAL_RANGES: &[(u32, u32, u8)] = &[
    (0x0900, 0x0902, TOP),
    (0x0903, 0x0903, RIGHT),
    (0x093A, 0x093A, TOP),
    (0x093B, 0x093B, RIGHT),
    (0x093C, 0x093C, BOTTOM),
    (0x093E, 0x093E, RIGHT),
    (0x093F, 0x093F, LEFT),
    (0x0940, 0x0940, RIGHT),
    (0x0941, 0x0944, BOTTOM),
    (0x0945, 0x0948, TOP),
    (0x0949, 0x094C, RIGHT),
    (0x094D, 0x094D, BOTTOM),
    (0x094E, 0x094E, LEFT),
    (0x094F, 0x094F, RIGHT),
    (0x0955, 0x0955, TOP),
    (0x0956, 0x0957, BOTTOM),
    (0x0962, 0x0963, BOTTOM),
    (0x0981, 0x0981, TOP),
    (0x0982, 0x0983, RIGHT),
    (0x09BE, 0x09BE, RIGHT),
    (0x09BF, 0x09BF, LEFT),
    (0x09C0, 0x09C0, RIGHT),
    (0x09C1, 0x09C4, BOTTOM),
    (0x09C7, 0x09C8, LEFT),
    (0x09CB, 0x09CC, LEFT_AND_RIGHT),
    (0x09CD, 0x09CD, BOTTOM),
    (0x09D7, 0x09D7, RIGHT),
    (0x09E2, 0x09E3, BOTTOM),
];
