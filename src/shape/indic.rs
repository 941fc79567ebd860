//! Indic syllable reordering for the Devanagari-model scripts.
//!
//! Two reorderings are applied before substitution: pre-base matras move in
//! front of the syllable base, and an initial Ra+Halant pair (the reph)
//! moves to the syllable end. Clusters within a reordered syllable are
//! merged so the output stays monotonic.

use super::buffer::ShapingBuffer;
use crate::unicode::{
    IndicPositionalCategory, IndicSyllabicCategory, PropertyTables,
};

const RA: u32 = 0x0930;
const BENGALI_RA: u32 = 0x09B0;

/// Reorders the buffer syllable by syllable.
pub fn reorder_syllables(buffer: &mut ShapingBuffer) {
    let tables = PropertyTables::global();

    let mut start = 0;
    while start < buffer.len() {
        let end = syllable_end(buffer, start, tables);
        if end > start + 1 {
            reorder_syllable(buffer, start, end, tables);
        }
        start = end.max(start + 1);
    }
}

/// Returns the exclusive end of the syllable starting at `start`.
fn syllable_end(buffer: &ShapingBuffer, start: usize, tables: &PropertyTables) -> usize {
    use IndicSyllabicCategory as C;

    let first = tables.indic_syllabic_category(buffer.glyphs[start].codepoint);
    if !matches!(first, C::Consonant | C::VowelIndependent) {
        return start + 1;
    }

    let mut i = start + 1;
    let mut after_virama = false;
    while i < buffer.len() {
        let category = tables.indic_syllabic_category(buffer.glyphs[i].codepoint);
        match category {
            C::Nukta | C::VowelDependent | C::Bindu | C::Visarga => {
                after_virama = false;
                i += 1;
            }
            C::Virama => {
                after_virama = true;
                i += 1;
            }
            C::Consonant if after_virama => {
                after_virama = false;
                i += 1;
            }
            _ => break,
        }
    }

    i
}

fn reorder_syllable(
    buffer: &mut ShapingBuffer,
    start: usize,
    end: usize,
    tables: &PropertyTables,
) {
    use IndicSyllabicCategory as C;

    let mut reordered = false;

    // Reph: an initial Ra+Halant followed by more syllable content moves to
    // the end.
    let is_ra = |cp: u32| cp == RA || cp == BENGALI_RA;
    if end - start > 2
        && is_ra(buffer.glyphs[start].codepoint.value())
        && tables.indic_syllabic_category(buffer.glyphs[start + 1].codepoint) == C::Virama
    {
        let reph: Vec<_> = buffer.glyphs[start..start + 2].to_vec();
        buffer.glyphs.copy_within(start + 2..end, start);
        buffer.glyphs[end - 2] = reph[0];
        buffer.glyphs[end - 1] = reph[1];
        reordered = true;
    }

    // Pre-base matras move in front of the base consonant.
    let mut i = start;
    while i < end {
        let glyph = buffer.glyphs[i];
        let is_pre_base = tables.indic_syllabic_category(glyph.codepoint)
            == C::VowelDependent
            && tables.indic_positional_category(glyph.codepoint) == IndicPositionalCategory::Left;

        if is_pre_base && i > start {
            // The base is the first consonant of the (possibly reph-moved)
            // syllable; the matra lands in front of it.
            let matra = buffer.glyphs[i];
            buffer.glyphs.copy_within(start..i, start + 1);
            buffer.glyphs[start] = matra;
            reordered = true;
        }
        i += 1;
    }

    if reordered {
        // Merge clusters so the run stays monotonic.
        let cluster = buffer.glyphs[start..end]
            .iter()
            .map(|g| g.cluster)
            .min()
            .unwrap_or(0);
        for glyph in &mut buffer.glyphs[start..end] {
            glyph.cluster = cluster;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::buffer::ShapedGlyph;
    use crate::unicode::CodePoint;
    use crate::GlyphId;

    fn buffer_of(codepoints: &[u32]) -> ShapingBuffer {
        let mut buffer = ShapingBuffer::new();
        for (i, &cp) in codepoints.iter().enumerate() {
            buffer.push(ShapedGlyph::new(
                GlyphId(cp as u16),
                CodePoint::new(cp).unwrap(),
                i as u32,
            ));
        }
        buffer
    }

    fn codepoints(buffer: &ShapingBuffer) -> Vec<u32> {
        buffer.glyphs.iter().map(|g| g.codepoint.value()).collect()
    }

    #[test]
    fn pre_base_matra_moves() {
        // KA + I (pre-base matra): the matra is written before the consonant.
        let mut buffer = buffer_of(&[0x0915, 0x093F]);
        reorder_syllables(&mut buffer);
        assert_eq!(codepoints(&buffer), [0x093F, 0x0915]);
        assert_eq!(buffer.glyphs[0].cluster, 0);
        assert_eq!(buffer.glyphs[1].cluster, 0);
    }

    #[test]
    fn post_base_matra_stays() {
        // KA + AA (post-base matra).
        let mut buffer = buffer_of(&[0x0915, 0x093E]);
        reorder_syllables(&mut buffer);
        assert_eq!(codepoints(&buffer), [0x0915, 0x093E]);
    }

    #[test]
    fn reph_moves_to_end() {
        // RA + VIRAMA + KA: the reph is rendered after the base.
        let mut buffer = buffer_of(&[0x0930, 0x094D, 0x0915]);
        reorder_syllables(&mut buffer);
        assert_eq!(codepoints(&buffer), [0x0915, 0x0930, 0x094D]);
    }

    #[test]
    fn unrelated_text_untouched() {
        let mut buffer = buffer_of(&[0x0041, 0x0042]);
        reorder_syllables(&mut buffer);
        assert_eq!(codepoints(&buffer), [0x41, 0x42]);
    }
}
