//! Lookup application machinery shared by GSUB and GPOS: glyph skipping per
//! lookup flags, sequence matching, and the contextual/chained-contextual
//! engine with nested lookup application.

use super::buffer::ShapingBuffer;
use crate::parser::{LazyArray16, Offset16, Stream};
use crate::tables::gdef::{self, GlyphClass};
use crate::tables::gsubgpos::{
    class_def_at, Coverage, LayoutTable, Lookup, LookupFlags, SequenceLookupRecord,
};
use crate::unicode::PropertyTables;
use crate::GlyphId;

/// Nested contextual lookups beyond this depth are dropped.
const MAX_NESTING: u8 = 6;

/// Which table the context is applying.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LayoutKind {
    Substitution,
    Positioning,
}

/// The state threaded through a lookup application.
pub struct ApplyContext<'a, 'b> {
    pub kind: LayoutKind,
    pub table: LayoutTable<'a>,
    pub gdef: Option<gdef::Table<'a>>,
    pub buffer: &'b mut ShapingBuffer,
    /// The current buffer position.
    pub pos: usize,
    pub flags: LookupFlags,
    pub mark_filtering_set: Option<u16>,
    /// The feature bits driving this lookup; records not carrying one of
    /// them are not touched.
    pub feature_mask: u32,
    /// The run is right-to-left.
    pub rtl: bool,
    pub nesting: u8,
}

impl ApplyContext<'_, '_> {
    /// Returns the OpenType glyph class, falling back to Unicode categories
    /// when the face has no GDEF class definitions.
    pub fn glyph_class(&self, index: usize) -> Option<GlyphClass> {
        let glyph = &self.buffer.glyphs[index];

        if let Some(gdef) = &self.gdef {
            if gdef.has_glyph_classes() {
                return gdef.glyph_class(glyph.glyph_id);
            }
        }

        if PropertyTables::global()
            .general_category(glyph.codepoint)
            .is_mark()
        {
            Some(GlyphClass::Mark)
        } else if glyph.ligature_id != 0 {
            Some(GlyphClass::Ligature)
        } else {
            Some(GlyphClass::Base)
        }
    }

    /// Checks that the record at `index` is ignored by the current lookup.
    pub fn should_skip(&self, index: usize) -> bool {
        let class = self.glyph_class(index);

        match class {
            Some(GlyphClass::Base) if self.flags.contains(LookupFlags::IGNORE_BASE_GLYPHS) => {
                return true;
            }
            Some(GlyphClass::Ligature) if self.flags.contains(LookupFlags::IGNORE_LIGATURES) => {
                return true;
            }
            Some(GlyphClass::Mark) => {
                if self.flags.contains(LookupFlags::IGNORE_MARKS) {
                    return true;
                }

                let glyph_id = self.buffer.glyphs[index].glyph_id;
                if let Some(set_index) = self.mark_filtering_set {
                    let in_set = self
                        .gdef
                        .map(|gdef| gdef.is_mark_glyph(glyph_id, set_index))
                        .unwrap_or(false);
                    if !in_set {
                        return true;
                    }
                } else {
                    let attachment_type = self.flags.mark_attachment_type();
                    if attachment_type != 0 {
                        let class = self
                            .gdef
                            .map(|gdef| gdef.glyph_mark_attachment_class(glyph_id).0)
                            .unwrap_or(0);
                        if class != u16::from(attachment_type) {
                            return true;
                        }
                    }
                }
            }
            _ => {}
        }

        false
    }

    /// Checks that the lookup's feature is enabled at `index`.
    #[inline]
    pub fn is_enabled(&self, index: usize) -> bool {
        self.buffer.glyphs[index].mask & self.feature_mask != 0
    }

    /// Returns the next non-skipped position after `from`.
    pub fn next_position(&self, from: usize) -> Option<usize> {
        let mut i = from + 1;
        while i < self.buffer.len() {
            if !self.should_skip(i) {
                return Some(i);
            }
            i += 1;
        }
        None
    }

    /// Returns the previous non-skipped position before `from`.
    pub fn prev_position(&self, from: usize) -> Option<usize> {
        let mut i = from;
        while i > 0 {
            i -= 1;
            if !self.should_skip(i) {
                return Some(i);
            }
        }
        None
    }

    /// Matches `count` glyphs forward starting after `self.pos`, skipping
    /// ignorable glyphs. `matches(sequence_index, glyph)` tests position
    /// `sequence_index + 1` of the input sequence.
    ///
    /// Returns the matched buffer positions, `self.pos` included first.
    pub fn match_input(
        &self,
        count: u16,
        matches: &dyn Fn(u16, GlyphId) -> bool,
    ) -> Option<Vec<usize>> {
        let mut positions = Vec::with_capacity(usize::from(count) + 1);
        positions.push(self.pos);

        let mut current = self.pos;
        for sequence_index in 0..count {
            let next = self.next_position(current)?;
            if !matches(sequence_index, self.buffer.glyphs[next].glyph_id) {
                return None;
            }
            positions.push(next);
            current = next;
        }

        Some(positions)
    }

    /// Matches `count` glyphs backward before `self.pos`. The first matcher
    /// index tests the closest preceding glyph.
    pub fn match_backtrack(
        &self,
        count: u16,
        matches: &dyn Fn(u16, GlyphId) -> bool,
    ) -> Option<()> {
        let mut current = self.pos;
        for sequence_index in 0..count {
            let prev = self.prev_position(current)?;
            if !matches(sequence_index, self.buffer.glyphs[prev].glyph_id) {
                return None;
            }
            current = prev;
        }
        Some(())
    }

    /// Matches `count` glyphs forward after `after`.
    pub fn match_lookahead(
        &self,
        count: u16,
        after: usize,
        matches: &dyn Fn(u16, GlyphId) -> bool,
    ) -> Option<()> {
        let mut current = after;
        for sequence_index in 0..count {
            let next = self.next_position(current)?;
            if !matches(sequence_index, self.buffer.glyphs[next].glyph_id) {
                return None;
            }
            current = next;
        }
        Some(())
    }
}

/// Applies `records` at the matched `positions` (sequence order), adjusting
/// for buffer length changes made by earlier records.
///
/// Returns the position right after the matched input.
pub fn apply_nested(
    ctx: &mut ApplyContext,
    positions: &[usize],
    records: LazyArray16<SequenceLookupRecord>,
) -> Option<usize> {
    let mut positions = positions.to_vec();

    for record in records {
        let sequence_index = usize::from(record.sequence_index);
        if sequence_index >= positions.len() {
            continue;
        }

        if ctx.nesting >= MAX_NESTING {
            log::warn!("contextual lookups are nested too deep; ignored");
            break;
        }

        let lookup = match ctx.table.lookup(record.lookup_list_index) {
            Some(lookup) => lookup,
            None => continue,
        };

        let at = positions[sequence_index];
        // Earlier records may have shrunk the buffer under this position.
        if at >= ctx.buffer.len() {
            continue;
        }
        let len_before = ctx.buffer.len();

        let mut nested = ApplyContext {
            kind: ctx.kind,
            table: ctx.table,
            gdef: ctx.gdef,
            buffer: &mut *ctx.buffer,
            pos: at,
            flags: lookup.flags,
            mark_filtering_set: lookup.mark_filtering_set,
            feature_mask: ctx.feature_mask,
            rtl: ctx.rtl,
            nesting: ctx.nesting + 1,
        };
        apply_lookup_subtables(&mut nested, &lookup);

        // A substitution may grow or shrink the buffer; shift the not yet
        // processed positions after the application point.
        let delta = ctx.buffer.len() as isize - len_before as isize;
        if delta != 0 {
            for position in positions.iter_mut() {
                if *position > at {
                    *position = (*position as isize + delta).max(0) as usize;
                }
            }
        }
    }

    positions.last().map(|last| last + 1)
}

/// Applies a lookup's subtables at `ctx.pos`; the first match wins.
pub fn apply_lookup_subtables(ctx: &mut ApplyContext, lookup: &Lookup) -> Option<usize> {
    for i in 0..lookup.subtables_len() {
        let data = match lookup.subtable_data(i) {
            Some(data) => data,
            None => continue,
        };

        let applied = match ctx.kind {
            LayoutKind::Substitution => crate::tables::gsub::apply_subtable(ctx, lookup.kind, data),
            LayoutKind::Positioning => crate::tables::gpos::apply_subtable(ctx, lookup.kind, data),
        };

        if applied.is_some() {
            return applied;
        }
    }

    None
}

/// Applies a [Sequence Context subtable](
/// https://docs.microsoft.com/en-us/typography/opentype/spec/chapter2#sequence-context-format-1)
/// (GSUB type 5, GPOS type 7) at `ctx.pos`.
pub fn apply_context(ctx: &mut ApplyContext, data: &[u8]) -> Option<usize> {
    let glyph_id = ctx.buffer.glyphs[ctx.pos].glyph_id;
    let mut s = Stream::new(data);
    let format: u16 = s.read()?;

    match format {
        1 => {
            let coverage_offset: Offset16 = s.read()?;
            let coverage = Coverage::parse(data.get(coverage_offset.to_usize()..)?)?;
            let coverage_index = coverage.index(glyph_id)?;

            let set_count: u16 = s.read()?;
            let set_offsets = s.read_array16::<Offset16>(set_count)?;
            let set_data = data.get(set_offsets.get(coverage_index)?.to_usize()..)?;

            let mut s = Stream::new(set_data);
            let rule_count: u16 = s.read()?;
            let rule_offsets = s.read_array16::<Offset16>(rule_count)?;

            for i in 0..rule_count {
                let rule_data = match set_data.get(rule_offsets.get(i)?.to_usize()..) {
                    Some(d) => d,
                    None => continue,
                };
                let mut rs = Stream::new(rule_data);
                let glyph_count: u16 = rs.read()?;
                let lookup_count: u16 = rs.read()?;
                if glyph_count == 0 {
                    continue;
                }
                let input = match rs.read_array16::<u16>(glyph_count - 1) {
                    Some(a) => a,
                    None => continue,
                };
                let records = match rs.read_array16::<SequenceLookupRecord>(lookup_count) {
                    Some(a) => a,
                    None => continue,
                };

                if let Some(positions) =
                    ctx.match_input(glyph_count - 1, &|i, g| input.get(i) == Some(g.0))
                {
                    return apply_nested(ctx, &positions, records);
                }
            }
            None
        }
        2 => {
            let coverage_offset: Offset16 = s.read()?;
            let coverage = Coverage::parse(data.get(coverage_offset.to_usize()..)?)?;
            coverage.index(glyph_id)?;

            let class_def_offset: Offset16 = s.read()?;
            let classes = class_def_at(data, class_def_offset);
            let first_class = classes.get(glyph_id);

            let set_count: u16 = s.read()?;
            let set_offsets = s.read_array16::<Option<Offset16>>(set_count)?;
            let set_offset = set_offsets.get(first_class.0)??;
            let set_data = data.get(set_offset.to_usize()..)?;

            let mut s = Stream::new(set_data);
            let rule_count: u16 = s.read()?;
            let rule_offsets = s.read_array16::<Offset16>(rule_count)?;

            for i in 0..rule_count {
                let rule_data = match set_data.get(rule_offsets.get(i)?.to_usize()..) {
                    Some(d) => d,
                    None => continue,
                };
                let mut rs = Stream::new(rule_data);
                let glyph_count: u16 = rs.read()?;
                let lookup_count: u16 = rs.read()?;
                if glyph_count == 0 {
                    continue;
                }
                let input = match rs.read_array16::<u16>(glyph_count - 1) {
                    Some(a) => a,
                    None => continue,
                };
                let records = match rs.read_array16::<SequenceLookupRecord>(lookup_count) {
                    Some(a) => a,
                    None => continue,
                };

                if let Some(positions) = ctx.match_input(glyph_count - 1, &|i, g| {
                    input.get(i) == Some(classes.get(g).0)
                }) {
                    return apply_nested(ctx, &positions, records);
                }
            }
            None
        }
        3 => {
            let glyph_count: u16 = s.read()?;
            let lookup_count: u16 = s.read()?;
            if glyph_count == 0 {
                return None;
            }
            let coverage_offsets = s.read_array16::<Offset16>(glyph_count)?;
            let records = s.read_array16::<SequenceLookupRecord>(lookup_count)?;

            let first = Coverage::parse(data.get(coverage_offsets.get(0)?.to_usize()..)?)?;
            first.index(glyph_id)?;

            let positions = ctx.match_input(glyph_count - 1, &|i, g| {
                coverage_offsets
                    .get(i + 1)
                    .and_then(|offset| data.get(offset.to_usize()..))
                    .and_then(Coverage::parse)
                    .map(|coverage| coverage.contains(g))
                    .unwrap_or(false)
            })?;

            apply_nested(ctx, &positions, records)
        }
        _ => None,
    }
}

/// Applies a [Chained Sequence Context subtable](
/// https://docs.microsoft.com/en-us/typography/opentype/spec/chapter2#chained-sequence-context-format-1)
/// (GSUB type 6, GPOS type 8) at `ctx.pos`.
pub fn apply_chain_context(ctx: &mut ApplyContext, data: &[u8]) -> Option<usize> {
    let glyph_id = ctx.buffer.glyphs[ctx.pos].glyph_id;
    let mut s = Stream::new(data);
    let format: u16 = s.read()?;

    match format {
        1 => {
            let coverage_offset: Offset16 = s.read()?;
            let coverage = Coverage::parse(data.get(coverage_offset.to_usize()..)?)?;
            let coverage_index = coverage.index(glyph_id)?;

            let set_count: u16 = s.read()?;
            let set_offsets = s.read_array16::<Offset16>(set_count)?;
            let set_data = data.get(set_offsets.get(coverage_index)?.to_usize()..)?;

            let mut s = Stream::new(set_data);
            let rule_count: u16 = s.read()?;
            let rule_offsets = s.read_array16::<Offset16>(rule_count)?;

            for i in 0..rule_count {
                let rule_data = match set_data.get(rule_offsets.get(i)?.to_usize()..) {
                    Some(d) => d,
                    None => continue,
                };

                let mut rs = Stream::new(rule_data);
                let backtrack_count: u16 = rs.read()?;
                let backtrack = match rs.read_array16::<u16>(backtrack_count) {
                    Some(a) => a,
                    None => continue,
                };
                let input_count: u16 = rs.read()?;
                if input_count == 0 {
                    continue;
                }
                let input = match rs.read_array16::<u16>(input_count - 1) {
                    Some(a) => a,
                    None => continue,
                };
                let lookahead_count: u16 = rs.read()?;
                let lookahead = match rs.read_array16::<u16>(lookahead_count) {
                    Some(a) => a,
                    None => continue,
                };
                let lookup_count: u16 = rs.read()?;
                let records = match rs.read_array16::<SequenceLookupRecord>(lookup_count) {
                    Some(a) => a,
                    None => continue,
                };

                let matched = (|| {
                    let positions =
                        ctx.match_input(input_count - 1, &|i, g| input.get(i) == Some(g.0))?;
                    ctx.match_backtrack(backtrack_count, &|i, g| backtrack.get(i) == Some(g.0))?;
                    ctx.match_lookahead(lookahead_count, *positions.last().unwrap(), &|i, g| {
                        lookahead.get(i) == Some(g.0)
                    })?;
                    Some(positions)
                })();

                if let Some(positions) = matched {
                    return apply_nested(ctx, &positions, records);
                }
            }
            None
        }
        2 => {
            let coverage_offset: Offset16 = s.read()?;
            let coverage = Coverage::parse(data.get(coverage_offset.to_usize()..)?)?;
            coverage.index(glyph_id)?;

            let backtrack_classes = class_def_at(data, s.read::<Offset16>()?);
            let input_classes = class_def_at(data, s.read::<Offset16>()?);
            let lookahead_classes = class_def_at(data, s.read::<Offset16>()?);

            let first_class = input_classes.get(glyph_id);
            let set_count: u16 = s.read()?;
            let set_offsets = s.read_array16::<Option<Offset16>>(set_count)?;
            let set_offset = set_offsets.get(first_class.0)??;
            let set_data = data.get(set_offset.to_usize()..)?;

            let mut s = Stream::new(set_data);
            let rule_count: u16 = s.read()?;
            let rule_offsets = s.read_array16::<Offset16>(rule_count)?;

            for i in 0..rule_count {
                let rule_data = match set_data.get(rule_offsets.get(i)?.to_usize()..) {
                    Some(d) => d,
                    None => continue,
                };

                let mut rs = Stream::new(rule_data);
                let backtrack_count: u16 = rs.read()?;
                let backtrack = match rs.read_array16::<u16>(backtrack_count) {
                    Some(a) => a,
                    None => continue,
                };
                let input_count: u16 = rs.read()?;
                if input_count == 0 {
                    continue;
                }
                let input = match rs.read_array16::<u16>(input_count - 1) {
                    Some(a) => a,
                    None => continue,
                };
                let lookahead_count: u16 = rs.read()?;
                let lookahead = match rs.read_array16::<u16>(lookahead_count) {
                    Some(a) => a,
                    None => continue,
                };
                let lookup_count: u16 = rs.read()?;
                let records = match rs.read_array16::<SequenceLookupRecord>(lookup_count) {
                    Some(a) => a,
                    None => continue,
                };

                let matched = (|| {
                    let positions = ctx.match_input(input_count - 1, &|i, g| {
                        input.get(i) == Some(input_classes.get(g).0)
                    })?;
                    ctx.match_backtrack(backtrack_count, &|i, g| {
                        backtrack.get(i) == Some(backtrack_classes.get(g).0)
                    })?;
                    ctx.match_lookahead(lookahead_count, *positions.last().unwrap(), &|i, g| {
                        lookahead.get(i) == Some(lookahead_classes.get(g).0)
                    })?;
                    Some(positions)
                })();

                if let Some(positions) = matched {
                    return apply_nested(ctx, &positions, records);
                }
            }
            None
        }
        3 => {
            let backtrack_count: u16 = s.read()?;
            let backtrack_offsets = s.read_array16::<Offset16>(backtrack_count)?;
            let input_count: u16 = s.read()?;
            if input_count == 0 {
                return None;
            }
            let input_offsets = s.read_array16::<Offset16>(input_count)?;
            let lookahead_count: u16 = s.read()?;
            let lookahead_offsets = s.read_array16::<Offset16>(lookahead_count)?;
            let lookup_count: u16 = s.read()?;
            let records = s.read_array16::<SequenceLookupRecord>(lookup_count)?;

            let coverage_at = |offsets: LazyArray16<Offset16>, i: u16| -> Option<Coverage> {
                let offset = offsets.get(i)?;
                Coverage::parse(data.get(offset.to_usize()..)?)
            };

            coverage_at(input_offsets, 0)?.index(glyph_id)?;

            let positions = ctx.match_input(input_count - 1, &|i, g| {
                coverage_at(input_offsets, i + 1)
                    .map(|coverage| coverage.contains(g))
                    .unwrap_or(false)
            })?;
            ctx.match_backtrack(backtrack_count, &|i, g| {
                coverage_at(backtrack_offsets, i)
                    .map(|coverage| coverage.contains(g))
                    .unwrap_or(false)
            })?;
            ctx.match_lookahead(lookahead_count, *positions.last().unwrap(), &|i, g| {
                coverage_at(lookahead_offsets, i)
                    .map(|coverage| coverage.contains(g))
                    .unwrap_or(false)
            })?;

            apply_nested(ctx, &positions, records)
        }
        _ => None,
    }
}
