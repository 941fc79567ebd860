//! Unicode machinery: codepoints, property tries, bidi resolution.

pub mod bidi;
mod codepoint;
mod data;
mod graphemes;
mod props;
pub mod trie;

pub use codepoint::{CodePoint, Utf16CodePoints};
pub use graphemes::GraphemeClusters;
pub use props::{
    BidiClass, GeneralCategory, GraphemeClusterBreak, IndicPositionalCategory,
    IndicSyllabicCategory, JoiningType, LineBreak, PropertyTables, Script, VerticalOrientation,
};
pub use trie::{UnicodeTrie, UnicodeTrieBuilder};
