//! Embedded Unicode property data.
//!
//! Sorted, non-overlapping `(first, last, value)` ranges per property.
//! Values are the `u8` discriminants of the enums in `unicode::props`.
//! Codepoints outside every range take the property's documented default.

pub(crate) mod bidi;
pub(crate) mod category;
pub(crate) mod grapheme;
pub(crate) mod indic;
pub(crate) mod joining;
pub(crate) mod linebreak;
pub(crate) mod mirror;
pub(crate) mod script;
pub(crate) mod vertical;
