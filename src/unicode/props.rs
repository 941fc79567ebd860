//! Unicode character properties.
//!
//! Each property is served by a [`UnicodeTrie`] built once from the embedded
//! range tables and shared for the process lifetime. The tables live behind
//! [`PropertyTables`] so tests can substitute their own data.

use std::sync::OnceLock;

use super::codepoint::CodePoint;
use super::data;
use super::trie::{UnicodeTrie, UnicodeTrieBuilder};

/// A general category, reduced to the groups the engine acts on.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[allow(missing_docs)]
pub enum GeneralCategory {
    Unassigned = 0,
    UppercaseLetter,
    LowercaseLetter,
    OtherLetter,
    NonspacingMark,
    SpacingMark,
    EnclosingMark,
    DecimalNumber,
    OtherPunctuation,
    OpenPunctuation,
    ClosePunctuation,
    DashPunctuation,
    ConnectorPunctuation,
    MathSymbol,
    CurrencySymbol,
    ModifierSymbol,
    OtherSymbol,
    SpaceSeparator,
    LineSeparator,
    ParagraphSeparator,
    Control,
    Format,
}

impl GeneralCategory {
    pub(crate) fn from_u32(n: u32) -> Self {
        match n {
            1 => GeneralCategory::UppercaseLetter,
            2 => GeneralCategory::LowercaseLetter,
            3 => GeneralCategory::OtherLetter,
            4 => GeneralCategory::NonspacingMark,
            5 => GeneralCategory::SpacingMark,
            6 => GeneralCategory::EnclosingMark,
            7 => GeneralCategory::DecimalNumber,
            8 => GeneralCategory::OtherPunctuation,
            9 => GeneralCategory::OpenPunctuation,
            10 => GeneralCategory::ClosePunctuation,
            11 => GeneralCategory::DashPunctuation,
            12 => GeneralCategory::ConnectorPunctuation,
            13 => GeneralCategory::MathSymbol,
            14 => GeneralCategory::CurrencySymbol,
            15 => GeneralCategory::ModifierSymbol,
            16 => GeneralCategory::OtherSymbol,
            17 => GeneralCategory::SpaceSeparator,
            18 => GeneralCategory::LineSeparator,
            19 => GeneralCategory::ParagraphSeparator,
            20 => GeneralCategory::Control,
            21 => GeneralCategory::Format,
            _ => GeneralCategory::Unassigned,
        }
    }

    /// Checks that the category is one of the mark categories.
    #[inline]
    pub fn is_mark(self) -> bool {
        matches!(
            self,
            GeneralCategory::NonspacingMark
                | GeneralCategory::SpacingMark
                | GeneralCategory::EnclosingMark
        )
    }

    /// Checks that the category is one of the letter categories.
    #[inline]
    pub fn is_letter(self) -> bool {
        matches!(
            self,
            GeneralCategory::UppercaseLetter
                | GeneralCategory::LowercaseLetter
                | GeneralCategory::OtherLetter
        )
    }
}

/// A UAX#9 bidirectional class.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[allow(missing_docs)]
pub enum BidiClass {
    LeftToRight = 0,
    RightToLeft,
    ArabicLetter,
    EuropeanNumber,
    EuropeanSeparator,
    EuropeanTerminator,
    ArabicNumber,
    CommonSeparator,
    NonspacingMark,
    BoundaryNeutral,
    ParagraphSeparator,
    SegmentSeparator,
    WhiteSpace,
    OtherNeutral,
    LeftToRightEmbedding,
    RightToLeftEmbedding,
    LeftToRightOverride,
    RightToLeftOverride,
    PopDirectionalFormat,
    LeftToRightIsolate,
    RightToLeftIsolate,
    FirstStrongIsolate,
    PopDirectionalIsolate,
}

impl BidiClass {
    pub(crate) fn from_u32(n: u32) -> Self {
        match n {
            1 => BidiClass::RightToLeft,
            2 => BidiClass::ArabicLetter,
            3 => BidiClass::EuropeanNumber,
            4 => BidiClass::EuropeanSeparator,
            5 => BidiClass::EuropeanTerminator,
            6 => BidiClass::ArabicNumber,
            7 => BidiClass::CommonSeparator,
            8 => BidiClass::NonspacingMark,
            9 => BidiClass::BoundaryNeutral,
            10 => BidiClass::ParagraphSeparator,
            11 => BidiClass::SegmentSeparator,
            12 => BidiClass::WhiteSpace,
            13 => BidiClass::OtherNeutral,
            14 => BidiClass::LeftToRightEmbedding,
            15 => BidiClass::RightToLeftEmbedding,
            16 => BidiClass::LeftToRightOverride,
            17 => BidiClass::RightToLeftOverride,
            18 => BidiClass::PopDirectionalFormat,
            19 => BidiClass::LeftToRightIsolate,
            20 => BidiClass::RightToLeftIsolate,
            21 => BidiClass::FirstStrongIsolate,
            22 => BidiClass::PopDirectionalIsolate,
            _ => BidiClass::LeftToRight,
        }
    }

    /// Checks that the class is R or AL.
    #[inline]
    pub fn is_rtl(self) -> bool {
        matches!(self, BidiClass::RightToLeft | BidiClass::ArabicLetter)
    }
}

/// A writing script.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[allow(missing_docs)]
pub enum Script {
    Unknown = 0,
    Common,
    Inherited,
    Latin,
    Greek,
    Cyrillic,
    Armenian,
    Hebrew,
    Arabic,
    Syriac,
    Thaana,
    Devanagari,
    Bengali,
    Gurmukhi,
    Gujarati,
    Oriya,
    Tamil,
    Telugu,
    Kannada,
    Malayalam,
    Sinhala,
    Thai,
    Lao,
    Tibetan,
    Myanmar,
    Georgian,
    Hangul,
    Ethiopic,
    Cherokee,
    Khmer,
    Hiragana,
    Katakana,
    Bopomofo,
    Han,
    Yi,
}

impl Script {
    pub(crate) fn from_u32(n: u32) -> Self {
        match n {
            1 => Script::Common,
            2 => Script::Inherited,
            3 => Script::Latin,
            4 => Script::Greek,
            5 => Script::Cyrillic,
            6 => Script::Armenian,
            7 => Script::Hebrew,
            8 => Script::Arabic,
            9 => Script::Syriac,
            10 => Script::Thaana,
            11 => Script::Devanagari,
            12 => Script::Bengali,
            13 => Script::Gurmukhi,
            14 => Script::Gujarati,
            15 => Script::Oriya,
            16 => Script::Tamil,
            17 => Script::Telugu,
            18 => Script::Kannada,
            19 => Script::Malayalam,
            20 => Script::Sinhala,
            21 => Script::Thai,
            22 => Script::Lao,
            23 => Script::Tibetan,
            24 => Script::Myanmar,
            25 => Script::Georgian,
            26 => Script::Hangul,
            27 => Script::Ethiopic,
            28 => Script::Cherokee,
            29 => Script::Khmer,
            30 => Script::Hiragana,
            31 => Script::Katakana,
            32 => Script::Bopomofo,
            33 => Script::Han,
            34 => Script::Yi,
            _ => Script::Unknown,
        }
    }

    /// Returns the OpenType script tag.
    pub fn tag(self) -> crate::Tag {
        let bytes: &[u8; 4] = match self {
            Script::Latin => b"latn",
            Script::Greek => b"grek",
            Script::Cyrillic => b"cyrl",
            Script::Armenian => b"armn",
            Script::Hebrew => b"hebr",
            Script::Arabic => b"arab",
            Script::Syriac => b"syrc",
            Script::Thaana => b"thaa",
            Script::Devanagari => b"deva",
            Script::Bengali => b"beng",
            Script::Gurmukhi => b"guru",
            Script::Gujarati => b"gujr",
            Script::Oriya => b"orya",
            Script::Tamil => b"taml",
            Script::Telugu => b"telu",
            Script::Kannada => b"knda",
            Script::Malayalam => b"mlym",
            Script::Sinhala => b"sinh",
            Script::Thai => b"thai",
            Script::Lao => b"lao ",
            Script::Tibetan => b"tibt",
            Script::Myanmar => b"mymr",
            Script::Georgian => b"geor",
            Script::Hangul => b"hang",
            Script::Ethiopic => b"ethi",
            Script::Cherokee => b"cher",
            Script::Khmer => b"khmr",
            Script::Hiragana | Script::Katakana => b"kana",
            Script::Bopomofo => b"bopo",
            Script::Han => b"hani",
            Script::Yi => b"yi  ",
            Script::Unknown | Script::Common | Script::Inherited => b"DFLT",
        };
        crate::Tag::from_bytes(bytes)
    }

    /// Checks that the script joins cursively.
    #[inline]
    pub fn is_joining(self) -> bool {
        matches!(self, Script::Arabic | Script::Syriac)
    }

    /// Checks that the script uses the Indic syllabic model.
    #[inline]
    pub fn is_indic(self) -> bool {
        matches!(
            self,
            Script::Devanagari
                | Script::Bengali
                | Script::Gurmukhi
                | Script::Gujarati
                | Script::Oriya
                | Script::Tamil
                | Script::Telugu
                | Script::Kannada
                | Script::Malayalam
                | Script::Sinhala
        )
    }
}

/// A UAX#14 line-break class, reduced to the classes the layout acts on.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[allow(missing_docs)]
pub enum LineBreak {
    Alphabetic = 0,
    MandatoryBreak,
    CarriageReturn,
    LineFeed,
    NextLine,
    Space,
    BreakAfter,
    Hyphen,
    ZeroWidthSpace,
    WordJoiner,
    Glue,
    CombiningMark,
    Numeric,
    Ideographic,
    OpenPunctuation,
    ClosePunctuation,
    Quotation,
    Exclamation,
    InfixSeparator,
    SymbolAllowingBreak,
    PrefixNumeric,
    PostfixNumeric,
}

impl LineBreak {
    pub(crate) fn from_u32(n: u32) -> Self {
        match n {
            1 => LineBreak::MandatoryBreak,
            2 => LineBreak::CarriageReturn,
            3 => LineBreak::LineFeed,
            4 => LineBreak::NextLine,
            5 => LineBreak::Space,
            6 => LineBreak::BreakAfter,
            7 => LineBreak::Hyphen,
            8 => LineBreak::ZeroWidthSpace,
            9 => LineBreak::WordJoiner,
            10 => LineBreak::Glue,
            11 => LineBreak::CombiningMark,
            12 => LineBreak::Numeric,
            13 => LineBreak::Ideographic,
            14 => LineBreak::OpenPunctuation,
            15 => LineBreak::ClosePunctuation,
            16 => LineBreak::Quotation,
            17 => LineBreak::Exclamation,
            18 => LineBreak::InfixSeparator,
            19 => LineBreak::SymbolAllowingBreak,
            20 => LineBreak::PrefixNumeric,
            21 => LineBreak::PostfixNumeric,
            _ => LineBreak::Alphabetic,
        }
    }

    /// Checks that a line must break after this character.
    #[inline]
    pub fn is_mandatory(self) -> bool {
        matches!(
            self,
            LineBreak::MandatoryBreak
                | LineBreak::CarriageReturn
                | LineBreak::LineFeed
                | LineBreak::NextLine
        )
    }
}

/// An Arabic joining type.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[allow(missing_docs)]
pub enum JoiningType {
    NonJoining = 0,
    JoinCausing,
    DualJoining,
    LeftJoining,
    RightJoining,
    Transparent,
}

impl JoiningType {
    pub(crate) fn from_u32(n: u32) -> Self {
        match n {
            1 => JoiningType::JoinCausing,
            2 => JoiningType::DualJoining,
            3 => JoiningType::LeftJoining,
            4 => JoiningType::RightJoining,
            5 => JoiningType::Transparent,
            _ => JoiningType::NonJoining,
        }
    }

    /// Checks that this character can join with the following one.
    #[inline]
    pub fn joins_left(self) -> bool {
        matches!(
            self,
            JoiningType::JoinCausing | JoiningType::DualJoining | JoiningType::LeftJoining
        )
    }

    /// Checks that this character can join with the preceding one.
    #[inline]
    pub fn joins_right(self) -> bool {
        matches!(
            self,
            JoiningType::JoinCausing | JoiningType::DualJoining | JoiningType::RightJoining
        )
    }
}

/// A grapheme cluster break class.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[allow(missing_docs)]
pub enum GraphemeClusterBreak {
    Other = 0,
    CarriageReturn,
    LineFeed,
    Control,
    Extend,
    ZeroWidthJoiner,
    RegionalIndicator,
    Prepend,
    SpacingMark,
    HangulL,
    HangulV,
    HangulT,
    HangulLV,
    HangulLVT,
}

impl GraphemeClusterBreak {
    pub(crate) fn from_u32(n: u32) -> Self {
        match n {
            1 => GraphemeClusterBreak::CarriageReturn,
            2 => GraphemeClusterBreak::LineFeed,
            3 => GraphemeClusterBreak::Control,
            4 => GraphemeClusterBreak::Extend,
            5 => GraphemeClusterBreak::ZeroWidthJoiner,
            6 => GraphemeClusterBreak::RegionalIndicator,
            7 => GraphemeClusterBreak::Prepend,
            8 => GraphemeClusterBreak::SpacingMark,
            9 => GraphemeClusterBreak::HangulL,
            10 => GraphemeClusterBreak::HangulV,
            11 => GraphemeClusterBreak::HangulT,
            12 => GraphemeClusterBreak::HangulLV,
            13 => GraphemeClusterBreak::HangulLVT,
            _ => GraphemeClusterBreak::Other,
        }
    }
}

/// An Indic syllabic category, reduced to the classes the reorderer acts on.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[allow(missing_docs)]
pub enum IndicSyllabicCategory {
    Other = 0,
    Bindu,
    Visarga,
    Avagraha,
    Nukta,
    Virama,
    VowelIndependent,
    VowelDependent,
    Consonant,
    ConsonantDead,
    Number,
}

impl IndicSyllabicCategory {
    pub(crate) fn from_u32(n: u32) -> Self {
        match n {
            1 => IndicSyllabicCategory::Bindu,
            2 => IndicSyllabicCategory::Visarga,
            3 => IndicSyllabicCategory::Avagraha,
            4 => IndicSyllabicCategory::Nukta,
            5 => IndicSyllabicCategory::Virama,
            6 => IndicSyllabicCategory::VowelIndependent,
            7 => IndicSyllabicCategory::VowelDependent,
            8 => IndicSyllabicCategory::Consonant,
            9 => IndicSyllabicCategory::ConsonantDead,
            10 => IndicSyllabicCategory::Number,
            _ => IndicSyllabicCategory::Other,
        }
    }
}

/// An Indic positional category.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[allow(missing_docs)]
pub enum IndicPositionalCategory {
    NotApplicable = 0,
    Left,
    Right,
    Top,
    Bottom,
    TopAndBottom,
    LeftAndRight,
}

impl IndicPositionalCategory {
    pub(crate) fn from_u32(n: u32) -> Self {
        match n {
            1 => IndicPositionalCategory::Left,
            2 => IndicPositionalCategory::Right,
            3 => IndicPositionalCategory::Top,
            4 => IndicPositionalCategory::Bottom,
            5 => IndicPositionalCategory::TopAndBottom,
            6 => IndicPositionalCategory::LeftAndRight,
            _ => IndicPositionalCategory::NotApplicable,
        }
    }
}

/// A vertical orientation class.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[allow(missing_docs)]
pub enum VerticalOrientation {
    Rotated = 0,
    Upright,
}

impl VerticalOrientation {
    pub(crate) fn from_u32(n: u32) -> Self {
        match n {
            1 => VerticalOrientation::Upright,
            _ => VerticalOrientation::Rotated,
        }
    }
}

/// The property tries the engine reads.
///
/// One instance is built from the embedded data on first use and shared for
/// the process lifetime; tests can build their own from custom tries.
pub struct PropertyTables {
    general_category: UnicodeTrie,
    bidi_class: UnicodeTrie,
    script: UnicodeTrie,
    line_break: UnicodeTrie,
    grapheme: UnicodeTrie,
    joining: UnicodeTrie,
    indic_syllabic: UnicodeTrie,
    indic_positional: UnicodeTrie,
    vertical: UnicodeTrie,
    mirror: UnicodeTrie,
}

impl PropertyTables {
    /// Returns the shared instance built from the embedded data.
    pub fn global() -> &'static PropertyTables {
        static TABLES: OnceLock<PropertyTables> = OnceLock::new();
        TABLES.get_or_init(PropertyTables::from_embedded_data)
    }

    /// Builds the tables from the embedded range data.
    pub fn from_embedded_data() -> Self {
        PropertyTables {
            general_category: build_trie(data::category::RANGES, 0),
            bidi_class: build_trie(data::bidi::RANGES, BidiClass::LeftToRight as u32),
            script: build_trie(data::script::RANGES, Script::Unknown as u32),
            line_break: build_trie(data::linebreak::RANGES, LineBreak::Alphabetic as u32),
            grapheme: build_trie(data::grapheme::RANGES, GraphemeClusterBreak::Other as u32),
            joining: build_trie(data::joining::RANGES, JoiningType::NonJoining as u32),
            indic_syllabic: build_trie(data::indic::SYLLABIC_RANGES, 0),
            indic_positional: build_trie(data::indic::POSITIONAL_RANGES, 0),
            vertical: build_trie(data::vertical::RANGES, VerticalOrientation::Rotated as u32),
            mirror: build_mirror_trie(data::mirror::PAIRS),
        }
    }

    /// Returns the general category of `cp`.
    pub fn general_category(&self, cp: CodePoint) -> GeneralCategory {
        GeneralCategory::from_u32(self.general_category.get(cp.value()))
    }

    /// Returns the bidirectional class of `cp`.
    pub fn bidi_class(&self, cp: CodePoint) -> BidiClass {
        BidiClass::from_u32(self.bidi_class.get(cp.value()))
    }

    /// Returns the script of `cp`.
    pub fn script(&self, cp: CodePoint) -> Script {
        Script::from_u32(self.script.get(cp.value()))
    }

    /// Returns the line-break class of `cp`.
    pub fn line_break(&self, cp: CodePoint) -> LineBreak {
        LineBreak::from_u32(self.line_break.get(cp.value()))
    }

    /// Returns the grapheme cluster break class of `cp`.
    ///
    /// Precomposed Hangul syllables are classified arithmetically, the rest
    /// comes from the trie.
    pub fn grapheme_cluster_break(&self, cp: CodePoint) -> GraphemeClusterBreak {
        let value = cp.value();
        if (0xAC00..=0xD7A3).contains(&value) {
            // LV when the syllable has no trailing consonant.
            return if (value - 0xAC00) % 28 == 0 {
                GraphemeClusterBreak::HangulLV
            } else {
                GraphemeClusterBreak::HangulLVT
            };
        }
        GraphemeClusterBreak::from_u32(self.grapheme.get(value))
    }

    /// Returns the Arabic joining type of `cp`.
    ///
    /// Characters without explicit joining data fall back to `Transparent`
    /// when they are nonspacing marks.
    pub fn joining_type(&self, cp: CodePoint) -> JoiningType {
        let jt = JoiningType::from_u32(self.joining.get(cp.value()));
        if jt == JoiningType::NonJoining
            && self.general_category(cp) == GeneralCategory::NonspacingMark
        {
            JoiningType::Transparent
        } else {
            jt
        }
    }

    /// Returns the Indic syllabic category of `cp`.
    pub fn indic_syllabic_category(&self, cp: CodePoint) -> IndicSyllabicCategory {
        IndicSyllabicCategory::from_u32(self.indic_syllabic.get(cp.value()))
    }

    /// Returns the Indic positional category of `cp`.
    pub fn indic_positional_category(&self, cp: CodePoint) -> IndicPositionalCategory {
        IndicPositionalCategory::from_u32(self.indic_positional.get(cp.value()))
    }

    /// Returns the vertical orientation of `cp`.
    pub fn vertical_orientation(&self, cp: CodePoint) -> VerticalOrientation {
        VerticalOrientation::from_u32(self.vertical.get(cp.value()))
    }

    /// Returns the bidi-mirrored counterpart of `cp`, if any.
    pub fn mirror(&self, cp: CodePoint) -> Option<CodePoint> {
        match self.mirror.get(cp.value()) {
            0 => None,
            mirrored => CodePoint::new(mirrored).ok(),
        }
    }
}

impl core::fmt::Debug for PropertyTables {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "PropertyTables()")
    }
}

fn build_trie(ranges: &[(u32, u32, u8)], initial: u32) -> UnicodeTrie {
    let mut builder = UnicodeTrieBuilder::new(initial, initial);
    for &(first, last, value) in ranges {
        builder.set_range(first, last, u32::from(value), true);
    }
    builder.freeze()
}

fn build_mirror_trie(pairs: &[(u32, u32)]) -> UnicodeTrie {
    let mut builder = UnicodeTrieBuilder::new(0, 0);
    for &(a, b) in pairs {
        builder.set(a, b);
        builder.set(b, a);
    }
    builder.freeze()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cp(n: u32) -> CodePoint {
        CodePoint::new(n).unwrap()
    }

    #[test]
    fn ascii_classes() {
        let tables = PropertyTables::global();
        assert_eq!(tables.general_category(cp(u32::from(b'A'))), GeneralCategory::UppercaseLetter);
        assert_eq!(tables.general_category(cp(u32::from(b'z'))), GeneralCategory::LowercaseLetter);
        assert_eq!(tables.general_category(cp(u32::from(b'5'))), GeneralCategory::DecimalNumber);
        assert_eq!(tables.general_category(cp(u32::from(b' '))), GeneralCategory::SpaceSeparator);
        assert_eq!(tables.bidi_class(cp(u32::from(b'7'))), BidiClass::EuropeanNumber);
        assert_eq!(tables.script(cp(u32::from(b'a'))), Script::Latin);
    }

    #[test]
    fn rtl_blocks() {
        let tables = PropertyTables::global();
        assert_eq!(tables.bidi_class(cp(0x05D0)), BidiClass::RightToLeft);
        assert_eq!(tables.bidi_class(cp(0x0644)), BidiClass::ArabicLetter);
        assert_eq!(tables.script(cp(0x05D0)), Script::Hebrew);
        assert_eq!(tables.script(cp(0x0644)), Script::Arabic);
    }

    #[test]
    fn arabic_joining() {
        let tables = PropertyTables::global();
        // LAM is dual-joining, ALEF joins only to the right, shadda is a mark.
        assert_eq!(tables.joining_type(cp(0x0644)), JoiningType::DualJoining);
        assert_eq!(tables.joining_type(cp(0x0627)), JoiningType::RightJoining);
        assert_eq!(tables.joining_type(cp(0x0651)), JoiningType::Transparent);
        assert_eq!(tables.joining_type(cp(0x0640)), JoiningType::JoinCausing);
    }

    #[test]
    fn devanagari_categories() {
        let tables = PropertyTables::global();
        assert_eq!(tables.indic_syllabic_category(cp(0x0915)), IndicSyllabicCategory::Consonant);
        assert_eq!(tables.indic_syllabic_category(cp(0x094D)), IndicSyllabicCategory::Virama);
        assert_eq!(tables.indic_positional_category(cp(0x093F)), IndicPositionalCategory::Left);
    }

    #[test]
    fn mirrors() {
        let tables = PropertyTables::global();
        assert_eq!(tables.mirror(cp(0x28)).unwrap().value(), 0x29);
        assert_eq!(tables.mirror(cp(0x29)).unwrap().value(), 0x28);
        assert!(tables.mirror(cp(0x41)).is_none());
    }
}
