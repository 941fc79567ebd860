//! The shaping pipeline: cmap mapping, script preprocessing, GSUB, GPOS.

use super::apply::{apply_lookup_subtables, ApplyContext, LayoutKind};
use super::buffer::{mask, ShapedGlyph, ShapingBuffer};
use super::{arabic, indic};
use crate::tables::gsubgpos::LayoutTable;
use crate::unicode::{CodePoint, PropertyTables, Script};
use crate::{Face, GlyphId, Tag};

/// GSUB features enabled for every run.
const SUBSTITUTION_FEATURES: &[&[u8; 4]] = &[b"ccmp", b"locl", b"liga", b"clig", b"calt", b"rlig"];

/// GPOS features enabled for every run.
const POSITIONING_FEATURES: &[&[u8; 4]] =
    &[b"kern", b"dist", b"mark", b"mkmk", b"curs", b"abvm", b"blwm"];

/// Arabic positional form features, applied per record via masks.
const FORM_FEATURES: &[(&[u8; 4], u32)] = &[
    (b"isol", mask::ISOLATED),
    (b"fina", mask::FINAL),
    (b"medi", mask::MEDIAL),
    (b"init", mask::INITIAL),
];

/// A shaping run: codepoints of uniform script and direction.
#[derive(Clone, Copy, Debug)]
pub struct Run<'a> {
    /// The codepoints in logical order.
    pub codepoints: &'a [CodePoint],
    /// The resolved (or overridden) script.
    pub script: Script,
    /// The run is right-to-left.
    pub rtl: bool,
    /// An OpenType language tag, if known.
    pub language: Option<Tag>,
    /// Extra user-requested feature tags, enabled globally.
    pub features: &'a [Tag],
    /// Cluster ID of the first codepoint.
    pub cluster_offset: u32,
}

/// Shapes one run. The returned buffer is in logical order; right-to-left
/// runs are emitted reversed by the layout engine.
pub fn shape(face: &Face, run: &Run) -> ShapingBuffer {
    let tables = PropertyTables::global();
    let mut buffer = ShapingBuffer::new();

    // cmap mapping; paired brackets mirror in right-to-left runs.
    for (i, &codepoint) in run.codepoints.iter().enumerate() {
        let mapped = if run.rtl {
            tables.mirror(codepoint).unwrap_or(codepoint)
        } else {
            codepoint
        };

        let glyph_id = face.glyph_index_for_code_point(mapped).unwrap_or(GlyphId(0));
        let mut glyph = ShapedGlyph::new(glyph_id, codepoint, run.cluster_offset + i as u32);
        glyph.x_advance = i32::from(face.glyph_hor_advance(glyph_id).unwrap_or(0));
        buffer.push(glyph);
    }

    // Script-specific preprocessing.
    if run.script.is_joining() {
        arabic::assign_joining_forms(&mut buffer);
    }
    if run.script.is_indic() {
        indic::reorder_syllables(&mut buffer);
    }

    if let Some(gsub) = face.substitution_table() {
        let lookups = collect_lookups(&gsub, run, LayoutKind::Substitution);
        apply_lookups(face, &gsub, LayoutKind::Substitution, &lookups, run, &mut buffer);

        // Substituted glyphs carry the advances of their replacements.
        for glyph in &mut buffer.glyphs {
            glyph.x_advance = i32::from(face.glyph_hor_advance(glyph.glyph_id).unwrap_or(0));
        }
    }

    if let Some(gpos) = face.positioning_table() {
        let lookups = collect_lookups(&gpos, run, LayoutKind::Positioning);
        apply_lookups(face, &gpos, LayoutKind::Positioning, &lookups, run, &mut buffer);
    } else {
        apply_kern_fallback(face, &mut buffer);
    }

    buffer
}

/// Resolves the enabled features to `(lookup index, feature mask)` pairs,
/// sorted in LookupList order.
fn collect_lookups(table: &LayoutTable, run: &Run, kind: LayoutKind) -> Vec<(u16, u32)> {
    let mut enabled: Vec<(Tag, u32)> = Vec::new();

    let defaults = match kind {
        LayoutKind::Substitution => SUBSTITUTION_FEATURES,
        LayoutKind::Positioning => POSITIONING_FEATURES,
    };
    for tag in defaults {
        enabled.push((Tag::from_bytes(tag), mask::GLOBAL));
    }

    if kind == LayoutKind::Substitution && run.script.is_joining() {
        for &(tag, form_mask) in FORM_FEATURES {
            enabled.push((Tag::from_bytes(tag), form_mask));
        }
    }

    for &tag in run.features {
        enabled.push((tag, mask::GLOBAL));
    }

    let lang_sys = match table
        .script(run.script.tag())
        .and_then(|script| script.lang_sys(run.language))
    {
        Some(lang_sys) => lang_sys,
        None => return Vec::new(),
    };

    let mut lookups: Vec<(u16, u32)> = Vec::new();
    let mut add_feature = |feature_index: u16, feature_mask: u32| {
        if let Some(indices) = table.feature_lookup_indices(feature_index) {
            for lookup_index in indices {
                match lookups.binary_search_by(|probe| probe.0.cmp(&lookup_index)) {
                    Ok(at) => lookups[at].1 |= feature_mask,
                    Err(at) => lookups.insert(at, (lookup_index, feature_mask)),
                }
            }
        }
    };

    // The required feature is always applied.
    if let Some(required) = lang_sys.required_feature_index {
        add_feature(required, mask::GLOBAL);
    }

    for feature_index in lang_sys.feature_indices {
        let tag = match table.feature_tag(feature_index) {
            Some(tag) => tag,
            None => continue,
        };

        for &(enabled_tag, feature_mask) in &enabled {
            if tag == enabled_tag {
                add_feature(feature_index, feature_mask);
            }
        }
    }

    lookups
}

/// Applies the resolved lookups over the buffer in LookupList order.
fn apply_lookups(
    face: &Face,
    table: &LayoutTable,
    kind: LayoutKind,
    lookups: &[(u16, u32)],
    run: &Run,
    buffer: &mut ShapingBuffer,
) {
    const REVERSE_CHAIN: u16 = 8;

    for &(lookup_index, feature_mask) in lookups {
        let lookup = match table.lookup(lookup_index) {
            Some(lookup) => lookup,
            None => continue,
        };

        let reverse = kind == LayoutKind::Substitution && lookup.kind == REVERSE_CHAIN;

        if reverse {
            let mut i = buffer.len();
            while i > 0 {
                i -= 1;
                let mut ctx = ApplyContext {
                    kind,
                    table: *table,
                    gdef: face.glyph_definition_table(),
                    buffer: &mut *buffer,
                    pos: i,
                    flags: lookup.flags,
                    mark_filtering_set: lookup.mark_filtering_set,
                    feature_mask,
                    rtl: run.rtl,
                    nesting: 0,
                };
                if ctx.is_enabled(i) && !ctx.should_skip(i) {
                    apply_lookup_subtables(&mut ctx, &lookup);
                }
            }
        } else {
            let mut i = 0;
            while i < buffer.len() {
                let mut ctx = ApplyContext {
                    kind,
                    table: *table,
                    gdef: face.glyph_definition_table(),
                    buffer: &mut *buffer,
                    pos: i,
                    flags: lookup.flags,
                    mark_filtering_set: lookup.mark_filtering_set,
                    feature_mask,
                    rtl: run.rtl,
                    nesting: 0,
                };

                if !ctx.is_enabled(i) || ctx.should_skip(i) {
                    i += 1;
                    continue;
                }

                match apply_lookup_subtables(&mut ctx, &lookup) {
                    Some(next) if next > i => i = next,
                    _ => i += 1,
                }
            }
        }
    }
}

/// Legacy `kern` table pair kerning, used when the face has no `GPOS`.
fn apply_kern_fallback(face: &Face, buffer: &mut ShapingBuffer) {
    let kern = match face.kerning_table() {
        Some(kern) => kern,
        None => return,
    };

    for i in 1..buffer.len() {
        let left = buffer.glyphs[i - 1].glyph_id;
        let right = buffer.glyphs[i].glyph_id;
        if let Some(value) = kern.glyphs_kerning(left, right) {
            buffer.glyphs[i - 1].x_advance += i32::from(value);
        }
    }
}
