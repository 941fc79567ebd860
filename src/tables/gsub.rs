//! A [Glyph Substitution Table](
//! https://docs.microsoft.com/en-us/typography/opentype/spec/gsub) implementation.
//!
//! The table container is the shared [`LayoutTable`]; this module applies
//! the GSUB lookup types to a shaping buffer.

use super::gsubgpos::{Coverage, LayoutTable};
use crate::parser::{Offset16, Offset32, Stream};
use crate::shape::apply::{self, ApplyContext};
use crate::GlyphId;

/// A [Glyph Substitution Table](
/// https://docs.microsoft.com/en-us/typography/opentype/spec/gsub).
pub type Table<'a> = LayoutTable<'a>;

mod lookup_type {
    pub const SINGLE: u16 = 1;
    pub const MULTIPLE: u16 = 2;
    pub const ALTERNATE: u16 = 3;
    pub const LIGATURE: u16 = 4;
    pub const CONTEXT: u16 = 5;
    pub const CHAIN_CONTEXT: u16 = 6;
    pub const EXTENSION: u16 = 7;
    pub const REVERSE_CHAIN: u16 = 8;
}

/// Applies one subtable at `ctx.pos`. Returns the next buffer position on a
/// successful application.
pub fn apply_subtable(ctx: &mut ApplyContext, kind: u16, data: &[u8]) -> Option<usize> {
    match kind {
        lookup_type::SINGLE => apply_single(ctx, data),
        lookup_type::MULTIPLE => apply_multiple(ctx, data),
        lookup_type::ALTERNATE => apply_alternate(ctx, data),
        lookup_type::LIGATURE => apply_ligature(ctx, data),
        lookup_type::CONTEXT => apply::apply_context(ctx, data),
        lookup_type::CHAIN_CONTEXT => apply::apply_chain_context(ctx, data),
        lookup_type::EXTENSION => apply_extension(ctx, data),
        lookup_type::REVERSE_CHAIN => apply_reverse_chain(ctx, data),
        _ => None,
    }
}

fn apply_single(ctx: &mut ApplyContext, data: &[u8]) -> Option<usize> {
    let glyph_id = ctx.buffer.glyphs[ctx.pos].glyph_id;
    let mut s = Stream::new(data);
    let format: u16 = s.read()?;

    match format {
        1 => {
            let coverage_offset: Offset16 = s.read()?;
            let delta: i16 = s.read()?;
            let coverage = Coverage::parse(data.get(coverage_offset.to_usize()..)?)?;
            coverage.index(glyph_id)?;

            let substitute = GlyphId(glyph_id.0.wrapping_add(delta as u16));
            ctx.buffer.replace_glyph(ctx.pos, substitute);
            Some(ctx.pos + 1)
        }
        2 => {
            let coverage_offset: Offset16 = s.read()?;
            let count: u16 = s.read()?;
            let substitutes = s.read_array16::<GlyphId>(count)?;
            let coverage = Coverage::parse(data.get(coverage_offset.to_usize()..)?)?;
            let index = coverage.index(glyph_id)?;

            let substitute = substitutes.get(index)?;
            ctx.buffer.replace_glyph(ctx.pos, substitute);
            Some(ctx.pos + 1)
        }
        _ => None,
    }
}

fn apply_multiple(ctx: &mut ApplyContext, data: &[u8]) -> Option<usize> {
    let glyph_id = ctx.buffer.glyphs[ctx.pos].glyph_id;
    let mut s = Stream::new(data);
    let format: u16 = s.read()?;
    if format != 1 {
        return None;
    }

    let coverage_offset: Offset16 = s.read()?;
    let count: u16 = s.read()?;
    let sequence_offsets = s.read_array16::<Offset16>(count)?;
    let coverage = Coverage::parse(data.get(coverage_offset.to_usize()..)?)?;
    let index = coverage.index(glyph_id)?;

    let sequence_data = data.get(sequence_offsets.get(index)?.to_usize()..)?;
    let mut s = Stream::new(sequence_data);
    let glyph_count: u16 = s.read()?;
    let glyphs = s.read_array16::<GlyphId>(glyph_count)?;

    let sequence: Vec<GlyphId> = glyphs.into_iter().collect();
    if sequence.is_empty() {
        // An empty sequence deletes the glyph.
        ctx.buffer.glyphs.remove(ctx.pos);
        return Some(ctx.pos);
    }

    let len = sequence.len();
    ctx.buffer.replace_with_sequence(ctx.pos, &sequence);
    Some(ctx.pos + len)
}

fn apply_alternate(ctx: &mut ApplyContext, data: &[u8]) -> Option<usize> {
    let glyph_id = ctx.buffer.glyphs[ctx.pos].glyph_id;
    let mut s = Stream::new(data);
    let format: u16 = s.read()?;
    if format != 1 {
        return None;
    }

    let coverage_offset: Offset16 = s.read()?;
    let count: u16 = s.read()?;
    let set_offsets = s.read_array16::<Offset16>(count)?;
    let coverage = Coverage::parse(data.get(coverage_offset.to_usize()..)?)?;
    let index = coverage.index(glyph_id)?;

    let set_data = data.get(set_offsets.get(index)?.to_usize()..)?;
    let mut s = Stream::new(set_data);
    let alternate_count: u16 = s.read()?;
    let alternates = s.read_array16::<GlyphId>(alternate_count)?;

    // Without a higher-level selection the first alternate wins.
    let substitute = alternates.get(0)?;
    ctx.buffer.replace_glyph(ctx.pos, substitute);
    Some(ctx.pos + 1)
}

fn apply_ligature(ctx: &mut ApplyContext, data: &[u8]) -> Option<usize> {
    let glyph_id = ctx.buffer.glyphs[ctx.pos].glyph_id;
    let mut s = Stream::new(data);
    let format: u16 = s.read()?;
    if format != 1 {
        return None;
    }

    let coverage_offset: Offset16 = s.read()?;
    let count: u16 = s.read()?;
    let set_offsets = s.read_array16::<Offset16>(count)?;
    let coverage = Coverage::parse(data.get(coverage_offset.to_usize()..)?)?;
    let index = coverage.index(glyph_id)?;

    let set_data = data.get(set_offsets.get(index)?.to_usize()..)?;
    let mut s = Stream::new(set_data);
    let ligature_count: u16 = s.read()?;
    let ligature_offsets = s.read_array16::<Offset16>(ligature_count)?;

    for i in 0..ligature_count {
        let ligature_data = match set_data.get(ligature_offsets.get(i)?.to_usize()..) {
            Some(d) => d,
            None => continue,
        };

        let mut ls = Stream::new(ligature_data);
        let ligature = match ls.read::<GlyphId>() {
            Some(g) => g,
            None => continue,
        };
        let component_count: u16 = match ls.read::<u16>() {
            Some(n) if n > 0 => n,
            _ => continue,
        };
        let components = match ls.read_array16::<GlyphId>(component_count - 1) {
            Some(a) => a,
            None => continue,
        };

        if let Some(positions) =
            ctx.match_input(component_count - 1, &|i, g| components.get(i) == Some(g))
        {
            ctx.buffer.merge_to_ligature(&positions, ligature);
            return Some(ctx.pos + 1);
        }
    }

    None
}

fn apply_extension(ctx: &mut ApplyContext, data: &[u8]) -> Option<usize> {
    let mut s = Stream::new(data);
    let format: u16 = s.read()?;
    if format != 1 {
        return None;
    }

    let kind: u16 = s.read()?;
    if kind == lookup_type::EXTENSION {
        // An extension must not point at another extension.
        return None;
    }

    let offset: Offset32 = s.read()?;
    apply_subtable(ctx, kind, data.get(offset.to_usize()..)?)
}

fn apply_reverse_chain(ctx: &mut ApplyContext, data: &[u8]) -> Option<usize> {
    let glyph_id = ctx.buffer.glyphs[ctx.pos].glyph_id;
    let mut s = Stream::new(data);
    let format: u16 = s.read()?;
    if format != 1 {
        return None;
    }

    let coverage_offset: Offset16 = s.read()?;
    let coverage = Coverage::parse(data.get(coverage_offset.to_usize()..)?)?;
    let index = coverage.index(glyph_id)?;

    let backtrack_count: u16 = s.read()?;
    let backtrack_offsets = s.read_array16::<Offset16>(backtrack_count)?;
    let lookahead_count: u16 = s.read()?;
    let lookahead_offsets = s.read_array16::<Offset16>(lookahead_count)?;
    let glyph_count: u16 = s.read()?;
    let substitutes = s.read_array16::<GlyphId>(glyph_count)?;

    let coverage_at = |offset: Offset16| -> Option<Coverage> {
        Coverage::parse(data.get(offset.to_usize()..)?)
    };

    ctx.match_backtrack(backtrack_count, &|i, g| {
        backtrack_offsets
            .get(i)
            .and_then(coverage_at)
            .map(|coverage| coverage.contains(g))
            .unwrap_or(false)
    })?;
    ctx.match_lookahead(lookahead_count, ctx.pos, &|i, g| {
        lookahead_offsets
            .get(i)
            .and_then(coverage_at)
            .map(|coverage| coverage.contains(g))
            .unwrap_or(false)
    })?;

    let substitute = substitutes.get(index)?;
    ctx.buffer.replace_glyph(ctx.pos, substitute);
    // Applied while walking right to left; the caller keeps moving backward.
    Some(ctx.pos)
}
