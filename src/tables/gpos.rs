//! A [Glyph Positioning Table](
//! https://docs.microsoft.com/en-us/typography/opentype/spec/gpos) implementation.
//!
//! The table container is the shared [`LayoutTable`]; this module applies
//! the GPOS lookup types to a shaping buffer. All adjustments are in font
//! units; scaling to pixels happens in the layout engine.

use bitflags::bitflags;

use super::gdef::GlyphClass;
use super::gsubgpos::{class_def_at, Coverage, LayoutTable, LookupFlags};
use crate::parser::{Offset16, Offset32, Stream};
use crate::shape::apply::{self, ApplyContext};

/// A [Glyph Positioning Table](
/// https://docs.microsoft.com/en-us/typography/opentype/spec/gpos).
pub type Table<'a> = LayoutTable<'a>;

mod lookup_type {
    pub const SINGLE: u16 = 1;
    pub const PAIR: u16 = 2;
    pub const CURSIVE: u16 = 3;
    pub const MARK_TO_BASE: u16 = 4;
    pub const MARK_TO_LIGATURE: u16 = 5;
    pub const MARK_TO_MARK: u16 = 6;
    pub const CONTEXT: u16 = 7;
    pub const CHAIN_CONTEXT: u16 = 8;
    pub const EXTENSION: u16 = 9;
}

bitflags! {
    /// A [ValueRecord](https://docs.microsoft.com/en-us/typography/opentype/spec/gpos#value-record)
    /// field selector.
    #[derive(Clone, Copy, PartialEq, Eq, Debug)]
    pub struct ValueFormat: u16 {
        const X_PLACEMENT        = 0x0001;
        const Y_PLACEMENT        = 0x0002;
        const X_ADVANCE          = 0x0004;
        const Y_ADVANCE          = 0x0008;
        const X_PLACEMENT_DEVICE = 0x0010;
        const Y_PLACEMENT_DEVICE = 0x0020;
        const X_ADVANCE_DEVICE   = 0x0040;
        const Y_ADVANCE_DEVICE   = 0x0080;
    }
}

impl ValueFormat {
    /// The encoded size in bytes.
    #[inline]
    pub fn size(self) -> usize {
        usize::from(self.bits().count_ones() as u16) * 2
    }
}

/// A decoded [ValueRecord](
/// https://docs.microsoft.com/en-us/typography/opentype/spec/gpos#value-record).
///
/// Device table adjustments are parsed over but ignored; the engine does not
/// interpret hinting.
#[derive(Clone, Copy, Default, Debug)]
pub struct ValueRecord {
    pub x_placement: i16,
    pub y_placement: i16,
    pub x_advance: i16,
    pub y_advance: i16,
}

impl ValueRecord {
    /// Parses a value record with the given format from the stream.
    pub fn parse(s: &mut Stream, format: ValueFormat) -> Option<Self> {
        let mut record = ValueRecord::default();
        if format.contains(ValueFormat::X_PLACEMENT) {
            record.x_placement = s.read::<i16>()?;
        }
        if format.contains(ValueFormat::Y_PLACEMENT) {
            record.y_placement = s.read::<i16>()?;
        }
        if format.contains(ValueFormat::X_ADVANCE) {
            record.x_advance = s.read::<i16>()?;
        }
        if format.contains(ValueFormat::Y_ADVANCE) {
            record.y_advance = s.read::<i16>()?;
        }
        if format.contains(ValueFormat::X_PLACEMENT_DEVICE) {
            s.skip::<u16>();
        }
        if format.contains(ValueFormat::Y_PLACEMENT_DEVICE) {
            s.skip::<u16>();
        }
        if format.contains(ValueFormat::X_ADVANCE_DEVICE) {
            s.skip::<u16>();
        }
        if format.contains(ValueFormat::Y_ADVANCE_DEVICE) {
            s.skip::<u16>();
        }
        Some(record)
    }

    fn apply(&self, ctx: &mut ApplyContext, index: usize) {
        let glyph = &mut ctx.buffer.glyphs[index];
        glyph.x_offset += i32::from(self.x_placement);
        glyph.y_offset += i32::from(self.y_placement);
        glyph.x_advance += i32::from(self.x_advance);
        glyph.y_advance += i32::from(self.y_advance);
    }
}

/// A decoded anchor point in font units.
#[derive(Clone, Copy, Default, Debug)]
struct Anchor {
    x: i32,
    y: i32,
}

/// Parses an [Anchor Table](
/// https://docs.microsoft.com/en-us/typography/opentype/spec/gpos#anchor-tables).
/// Contour-point and device variants fall back to the design coordinates.
fn parse_anchor(data: &[u8]) -> Option<Anchor> {
    let mut s = Stream::new(data);
    let format: u16 = s.read()?;
    if !(1..=3).contains(&format) {
        return None;
    }

    Some(Anchor {
        x: i32::from(s.read::<i16>()?),
        y: i32::from(s.read::<i16>()?),
    })
}

fn anchor_at(data: &[u8], offset: usize) -> Option<Anchor> {
    parse_anchor(data.get(offset..)?)
}

/// Applies one subtable at `ctx.pos`. Returns the next buffer position on a
/// successful application.
pub fn apply_subtable(ctx: &mut ApplyContext, kind: u16, data: &[u8]) -> Option<usize> {
    match kind {
        lookup_type::SINGLE => apply_single(ctx, data),
        lookup_type::PAIR => apply_pair(ctx, data),
        lookup_type::CURSIVE => apply_cursive(ctx, data),
        lookup_type::MARK_TO_BASE => apply_mark_to_base(ctx, data),
        lookup_type::MARK_TO_LIGATURE => apply_mark_to_ligature(ctx, data),
        lookup_type::MARK_TO_MARK => apply_mark_to_mark(ctx, data),
        lookup_type::CONTEXT => apply::apply_context(ctx, data),
        lookup_type::CHAIN_CONTEXT => apply::apply_chain_context(ctx, data),
        lookup_type::EXTENSION => apply_extension(ctx, data),
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
            let value_format = ValueFormat::from_bits_truncate(s.read::<u16>()?);
            let record = ValueRecord::parse(&mut s, value_format)?;

            let coverage = Coverage::parse(data.get(coverage_offset.to_usize()..)?)?;
            coverage.index(glyph_id)?;

            record.apply(ctx, ctx.pos);
            Some(ctx.pos + 1)
        }
        2 => {
            let coverage_offset: Offset16 = s.read()?;
            let value_format = ValueFormat::from_bits_truncate(s.read::<u16>()?);
            let count: u16 = s.read()?;

            let coverage = Coverage::parse(data.get(coverage_offset.to_usize()..)?)?;
            let index = coverage.index(glyph_id)?;
            if index >= count {
                return None;
            }

            s.advance(usize::from(index) * value_format.size());
            let record = ValueRecord::parse(&mut s, value_format)?;

            record.apply(ctx, ctx.pos);
            Some(ctx.pos + 1)
        }
        _ => None,
    }
}

fn apply_pair(ctx: &mut ApplyContext, data: &[u8]) -> Option<usize> {
    let first_glyph = ctx.buffer.glyphs[ctx.pos].glyph_id;
    let second_pos = ctx.next_position(ctx.pos)?;
    let second_glyph = ctx.buffer.glyphs[second_pos].glyph_id;

    let mut s = Stream::new(data);
    let format: u16 = s.read()?;

    let (value1, value2, has_second) = match format {
        1 => {
            let coverage_offset: Offset16 = s.read()?;
            let value_format1 = ValueFormat::from_bits_truncate(s.read::<u16>()?);
            let value_format2 = ValueFormat::from_bits_truncate(s.read::<u16>()?);
            let set_count: u16 = s.read()?;
            let set_offsets = s.read_array16::<Offset16>(set_count)?;

            let coverage = Coverage::parse(data.get(coverage_offset.to_usize()..)?)?;
            let index = coverage.index(first_glyph)?;

            let set_data = data.get(set_offsets.get(index)?.to_usize()..)?;
            let mut ps = Stream::new(set_data);
            let pair_count: u16 = ps.read()?;

            let record_size = 2 + value_format1.size() + value_format2.size();
            let mut found = None;
            for i in 0..usize::from(pair_count) {
                let mut rs = Stream::new_at(set_data, 2 + i * record_size)?;
                let glyph: u16 = rs.read()?;
                if glyph == second_glyph.0 {
                    let value1 = ValueRecord::parse(&mut rs, value_format1)?;
                    let value2 = ValueRecord::parse(&mut rs, value_format2)?;
                    found = Some((value1, value2));
                    break;
                }
            }

            let (value1, value2) = found?;
            (value1, value2, !value_format2.is_empty())
        }
        2 => {
            let coverage_offset: Offset16 = s.read()?;
            let value_format1 = ValueFormat::from_bits_truncate(s.read::<u16>()?);
            let value_format2 = ValueFormat::from_bits_truncate(s.read::<u16>()?);
            let class_def1_offset: Offset16 = s.read()?;
            let class_def2_offset: Offset16 = s.read()?;
            let class1_count: u16 = s.read()?;
            let class2_count: u16 = s.read()?;

            let coverage = Coverage::parse(data.get(coverage_offset.to_usize()..)?)?;
            coverage.index(first_glyph)?;

            // Some fonts point the class definition past the subtable; the
            // degraded definition keeps everything in class 0.
            let class1 = class_def_at(data, class_def1_offset).get(first_glyph).0;
            let class2 = class_def_at(data, class_def2_offset).get(second_glyph).0;
            if class1 >= class1_count || class2 >= class2_count {
                return None;
            }

            let record_size = value_format1.size() + value_format2.size();
            let row = usize::from(class1) * usize::from(class2_count) * record_size;
            let cell = usize::from(class2) * record_size;
            let mut rs = Stream::new_at(data, s.offset() + row + cell)?;
            let value1 = ValueRecord::parse(&mut rs, value_format1)?;
            let value2 = ValueRecord::parse(&mut rs, value_format2)?;
            (value1, value2, !value_format2.is_empty())
        }
        _ => return None,
    };

    value1.apply(ctx, ctx.pos);
    value2.apply(ctx, second_pos);

    // When the second glyph carries an adjustment, the next iteration
    // starts after it.
    if has_second {
        Some(second_pos + 1)
    } else {
        Some(second_pos)
    }
}

fn apply_cursive(ctx: &mut ApplyContext, data: &[u8]) -> Option<usize> {
    let mut s = Stream::new(data);
    let format: u16 = s.read()?;
    if format != 1 {
        return None;
    }

    let coverage_offset: Offset16 = s.read()?;
    let count: u16 = s.read()?;
    let coverage = Coverage::parse(data.get(coverage_offset.to_usize()..)?)?;

    let records_start = s.offset();
    let record_at = |index: u16| -> Option<(Option<Offset16>, Option<Offset16>)> {
        if index >= count {
            return None;
        }
        let mut rs = Stream::new_at(data, records_start + usize::from(index) * 4)?;
        Some((rs.read::<Option<Offset16>>()?, rs.read::<Option<Offset16>>()?))
    };

    let cur = ctx.pos;
    let cur_index = coverage.index(ctx.buffer.glyphs[cur].glyph_id)?;
    let (cur_entry_offset, _) = record_at(cur_index)?;
    let entry = anchor_at(data, cur_entry_offset?.to_usize())?;

    let prev = ctx.prev_position(cur)?;
    let prev_index = coverage.index(ctx.buffer.glyphs[prev].glyph_id)?;
    let (_, prev_exit_offset) = record_at(prev_index)?;
    let exit = anchor_at(data, prev_exit_offset?.to_usize())?;

    // Horizontal chaining: the previous glyph's advance ends at its exit,
    // and the current glyph is shifted so its entry lands on the pen.
    if ctx.rtl {
        let d = exit.x + ctx.buffer.glyphs[prev].x_offset;
        ctx.buffer.glyphs[prev].x_advance -= d;
        ctx.buffer.glyphs[prev].x_offset -= d;
        ctx.buffer.glyphs[cur].x_advance = entry.x + ctx.buffer.glyphs[cur].x_offset;
    } else {
        ctx.buffer.glyphs[prev].x_advance = exit.x + ctx.buffer.glyphs[prev].x_offset;
        let d = entry.x + ctx.buffer.glyphs[cur].x_offset;
        ctx.buffer.glyphs[cur].x_advance -= d;
        ctx.buffer.glyphs[cur].x_offset -= d;
    }

    // Vertical chaining; the RIGHT_TO_LEFT flag inverts which glyph moves.
    if ctx.flags.contains(LookupFlags::RIGHT_TO_LEFT) {
        ctx.buffer.glyphs[prev].y_offset =
            ctx.buffer.glyphs[cur].y_offset + entry.y - exit.y;
    } else {
        ctx.buffer.glyphs[cur].y_offset =
            ctx.buffer.glyphs[prev].y_offset + exit.y - entry.y;
    }

    Some(cur + 1)
}

/// Reads the (class, anchor) of mark `index` from a MarkArray.
fn mark_array_anchor(data: &[u8], index: u16) -> Option<(u16, Anchor)> {
    let mut s = Stream::new(data);
    let count: u16 = s.read()?;
    if index >= count {
        return None;
    }

    let mut rs = Stream::new_at(data, 2 + usize::from(index) * 4)?;
    let class: u16 = rs.read()?;
    let anchor_offset: Offset16 = rs.read()?;
    Some((class, anchor_at(data, anchor_offset.to_usize())?))
}

/// Sums the pen-distance between an attachment target and the mark.
fn advances_between(ctx: &ApplyContext, base: usize, mark: usize) -> i32 {
    if ctx.rtl {
        // Reversed emission: glyphs logically after the base are drawn
        // before it.
        ctx.buffer.glyphs[base + 1..=mark]
            .iter()
            .map(|g| g.x_advance)
            .sum()
    } else {
        ctx.buffer.glyphs[base..mark].iter().map(|g| g.x_advance).sum()
    }
}

fn attach_mark(ctx: &mut ApplyContext, base: usize, mark: usize, base_anchor: Anchor, mark_anchor: Anchor) {
    let distance = advances_between(ctx, base, mark);
    let base_x_offset = ctx.buffer.glyphs[base].x_offset;
    let base_y_offset = ctx.buffer.glyphs[base].y_offset;

    let glyph = &mut ctx.buffer.glyphs[mark];
    glyph.x_offset = base_x_offset + base_anchor.x - mark_anchor.x
        + if ctx.rtl { distance } else { -distance };
    glyph.y_offset = base_y_offset + base_anchor.y - mark_anchor.y;
}

fn apply_mark_to_base(ctx: &mut ApplyContext, data: &[u8]) -> Option<usize> {
    let mark_pos = ctx.pos;
    let mark_glyph = ctx.buffer.glyphs[mark_pos].glyph_id;

    let mut s = Stream::new(data);
    let format: u16 = s.read()?;
    if format != 1 {
        return None;
    }

    let mark_coverage_offset: Offset16 = s.read()?;
    let base_coverage_offset: Offset16 = s.read()?;
    let mark_class_count: u16 = s.read()?;
    let mark_array_offset: Offset16 = s.read()?;
    let base_array_offset: Offset16 = s.read()?;

    let mark_coverage = Coverage::parse(data.get(mark_coverage_offset.to_usize()..)?)?;
    let mark_index = mark_coverage.index(mark_glyph)?;

    // The base is the closest preceding non-mark glyph, regardless of the
    // lookup flags.
    let mut base_pos = mark_pos;
    loop {
        base_pos = base_pos.checked_sub(1)?;
        if ctx.glyph_class(base_pos) != Some(GlyphClass::Mark) {
            break;
        }
    }

    let base_coverage = Coverage::parse(data.get(base_coverage_offset.to_usize()..)?)?;
    let base_index = base_coverage.index(ctx.buffer.glyphs[base_pos].glyph_id)?;

    let mark_array = data.get(mark_array_offset.to_usize()..)?;
    let (mark_class, mark_anchor) = mark_array_anchor(mark_array, mark_index)?;
    if mark_class >= mark_class_count {
        return None;
    }

    // BaseArray: per-base rows of `mark_class_count` anchor offsets.
    let base_array = data.get(base_array_offset.to_usize()..)?;
    let mut bs = Stream::new(base_array);
    let base_count: u16 = bs.read()?;
    if base_index >= base_count {
        return None;
    }

    let row = 2 + usize::from(base_index) * usize::from(mark_class_count) * 2;
    let cell = row + usize::from(mark_class) * 2;
    let anchor_offset: Option<Offset16> = Stream::read_at(base_array, cell)?;
    let base_anchor = anchor_at(base_array, anchor_offset?.to_usize())?;

    attach_mark(ctx, base_pos, mark_pos, base_anchor, mark_anchor);
    ctx.buffer.glyphs[mark_pos].mark_attachment_class = mark_class.min(255) as u8;
    Some(mark_pos + 1)
}

fn apply_mark_to_ligature(ctx: &mut ApplyContext, data: &[u8]) -> Option<usize> {
    let mark_pos = ctx.pos;
    let mark_glyph = ctx.buffer.glyphs[mark_pos].glyph_id;

    let mut s = Stream::new(data);
    let format: u16 = s.read()?;
    if format != 1 {
        return None;
    }

    let mark_coverage_offset: Offset16 = s.read()?;
    let ligature_coverage_offset: Offset16 = s.read()?;
    let mark_class_count: u16 = s.read()?;
    let mark_array_offset: Offset16 = s.read()?;
    let ligature_array_offset: Offset16 = s.read()?;

    let mark_coverage = Coverage::parse(data.get(mark_coverage_offset.to_usize()..)?)?;
    let mark_index = mark_coverage.index(mark_glyph)?;

    let mut ligature_pos = mark_pos;
    loop {
        ligature_pos = ligature_pos.checked_sub(1)?;
        if ctx.glyph_class(ligature_pos) != Some(GlyphClass::Mark) {
            break;
        }
    }

    let ligature_coverage = Coverage::parse(data.get(ligature_coverage_offset.to_usize()..)?)?;
    let ligature_index = ligature_coverage.index(ctx.buffer.glyphs[ligature_pos].glyph_id)?;

    let mark_array = data.get(mark_array_offset.to_usize()..)?;
    let (mark_class, mark_anchor) = mark_array_anchor(mark_array, mark_index)?;
    if mark_class >= mark_class_count {
        return None;
    }

    // LigatureArray -> LigatureAttach, one anchor row per component.
    let ligature_array = data.get(ligature_array_offset.to_usize()..)?;
    let mut ls = Stream::new(ligature_array);
    let ligature_count: u16 = ls.read()?;
    let attach_offsets = ls.read_array16::<Offset16>(ligature_count)?;

    let attach_data = ligature_array.get(attach_offsets.get(ligature_index)?.to_usize()..)?;
    let mut als = Stream::new(attach_data);
    let component_count: u16 = als.read()?;
    if component_count == 0 {
        return None;
    }

    // The mark knows which ligature component it belongs to.
    let component = u16::from(ctx.buffer.glyphs[mark_pos].ligature_component)
        .min(component_count - 1);

    let row = 2 + usize::from(component) * usize::from(mark_class_count) * 2;
    let cell = row + usize::from(mark_class) * 2;
    let anchor_offset: Option<Offset16> = Stream::read_at(attach_data, cell)?;
    let ligature_anchor = anchor_at(attach_data, anchor_offset?.to_usize())?;

    attach_mark(ctx, ligature_pos, mark_pos, ligature_anchor, mark_anchor);
    ctx.buffer.glyphs[mark_pos].mark_attachment_class = mark_class.min(255) as u8;
    Some(mark_pos + 1)
}

fn apply_mark_to_mark(ctx: &mut ApplyContext, data: &[u8]) -> Option<usize> {
    let mark1_pos = ctx.pos;
    let mark1_glyph = ctx.buffer.glyphs[mark1_pos].glyph_id;

    let mut s = Stream::new(data);
    let format: u16 = s.read()?;
    if format != 1 {
        return None;
    }

    let mark1_coverage_offset: Offset16 = s.read()?;
    let mark2_coverage_offset: Offset16 = s.read()?;
    let mark_class_count: u16 = s.read()?;
    let mark1_array_offset: Offset16 = s.read()?;
    let mark2_array_offset: Offset16 = s.read()?;

    let mark1_coverage = Coverage::parse(data.get(mark1_coverage_offset.to_usize()..)?)?;
    let mark1_index = mark1_coverage.index(mark1_glyph)?;

    // The attachment target is the closest preceding mark within the same
    // ligature context.
    let mark2_pos = ctx.prev_position(mark1_pos)?;
    if ctx.glyph_class(mark2_pos) != Some(GlyphClass::Mark) {
        return None;
    }
    {
        let a = &ctx.buffer.glyphs[mark1_pos];
        let b = &ctx.buffer.glyphs[mark2_pos];
        let same_ligature = a.ligature_id == b.ligature_id
            && a.ligature_component == b.ligature_component;
        if !same_ligature {
            return None;
        }
    }

    let mark2_coverage = Coverage::parse(data.get(mark2_coverage_offset.to_usize()..)?)?;
    let mark2_index = mark2_coverage.index(ctx.buffer.glyphs[mark2_pos].glyph_id)?;

    let mark1_array = data.get(mark1_array_offset.to_usize()..)?;
    let (mark_class, mark1_anchor) = mark_array_anchor(mark1_array, mark1_index)?;
    if mark_class >= mark_class_count {
        return None;
    }

    let mark2_array = data.get(mark2_array_offset.to_usize()..)?;
    let mut ms = Stream::new(mark2_array);
    let mark2_count: u16 = ms.read()?;
    if mark2_index >= mark2_count {
        return None;
    }

    let row = 2 + usize::from(mark2_index) * usize::from(mark_class_count) * 2;
    let cell = row + usize::from(mark_class) * 2;
    let anchor_offset: Option<Offset16> = Stream::read_at(mark2_array, cell)?;
    let mark2_anchor = anchor_at(mark2_array, anchor_offset?.to_usize())?;

    attach_mark(ctx, mark2_pos, mark1_pos, mark2_anchor, mark1_anchor);
    Some(mark1_pos + 1)
}

fn apply_extension(ctx: &mut ApplyContext, data: &[u8]) -> Option<usize> {
    let mut s = Stream::new(data);
    let format: u16 = s.read()?;
    if format != 1 {
        return None;
    }

    let kind: u16 = s.read()?;
    if kind == lookup_type::EXTENSION {
        return None;
    }

    let offset: Offset32 = s.read()?;
    apply_subtable(ctx, kind, data.get(offset.to_usize()..)?)
}
