//! Arabic-family joining: tags every record with the positional form
//! feature (`isol`, `fina`, `medi`, `init`) the font should apply.

use super::buffer::{mask, ShapingBuffer};
use crate::unicode::{JoiningType, PropertyTables};

/// Computes joining forms over the buffer in logical order and sets the
/// per-record form masks.
pub fn assign_joining_forms(buffer: &mut ShapingBuffer) {
    let tables = PropertyTables::global();

    let joining: Vec<JoiningType> = buffer
        .glyphs
        .iter()
        .map(|g| tables.joining_type(g.codepoint))
        .collect();

    // The closest non-transparent neighbor on each side decides the form.
    let prev_visible = |from: usize| -> Option<JoiningType> {
        joining[..from]
            .iter()
            .rev()
            .copied()
            .find(|jt| *jt != JoiningType::Transparent)
    };
    let next_visible = |from: usize| -> Option<JoiningType> {
        joining[from + 1..]
            .iter()
            .copied()
            .find(|jt| *jt != JoiningType::Transparent)
    };

    for (i, jt) in joining.iter().enumerate() {
        match jt {
            JoiningType::NonJoining | JoiningType::Transparent => continue,
            _ => {}
        }

        let joins_prev = jt.joins_right()
            && prev_visible(i).map(|prev| prev.joins_left()).unwrap_or(false);
        let joins_next = jt.joins_left()
            && next_visible(i).map(|next| next.joins_right()).unwrap_or(false);

        let form = match (joins_prev, joins_next) {
            (false, false) => mask::ISOLATED,
            (false, true) => mask::INITIAL,
            (true, false) => mask::FINAL,
            (true, true) => mask::MEDIAL,
        };

        buffer.glyphs[i].mask |= form;
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
                GlyphId(0),
                CodePoint::new(cp).unwrap(),
                i as u32,
            ));
        }
        buffer
    }

    #[test]
    fn lam_alef_forms() {
        // LAM (dual) + ALEF (right-joining): init + fina.
        let mut buffer = buffer_of(&[0x0644, 0x0627]);
        assign_joining_forms(&mut buffer);
        assert!(buffer.glyphs[0].mask & mask::INITIAL != 0);
        assert!(buffer.glyphs[1].mask & mask::FINAL != 0);
    }

    #[test]
    fn isolated_alef() {
        let mut buffer = buffer_of(&[0x0627]);
        assign_joining_forms(&mut buffer);
        assert!(buffer.glyphs[0].mask & mask::ISOLATED != 0);
    }

    #[test]
    fn marks_are_transparent() {
        // BEH + SHADDA + BEH: the mark must not break the join.
        let mut buffer = buffer_of(&[0x0628, 0x0651, 0x0628]);
        assign_joining_forms(&mut buffer);
        assert!(buffer.glyphs[0].mask & mask::INITIAL != 0);
        assert!(buffer.glyphs[2].mask & mask::FINAL != 0);
        // The mark itself takes no form.
        assert_eq!(buffer.glyphs[1].mask, mask::GLOBAL);
    }

    #[test]
    fn middle_letter_is_medial() {
        // BEH + BEH + BEH.
        let mut buffer = buffer_of(&[0x0628, 0x0628, 0x0628]);
        assign_joining_forms(&mut buffer);
        assert!(buffer.glyphs[1].mask & mask::MEDIAL != 0);
    }
}
