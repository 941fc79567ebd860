//! A [Compact Font Format Table](
//! https://docs.adobe.com/content/dam/acom/en/devnet/font/pdfs/5176.CFF.pdf) implementation.
//!
//! Covers plain (non-CID) CFF and the CFF2 subset needed for the default
//! instance: the `blend` operator keeps the base values and drops the deltas.

use core::convert::TryFrom;

use crate::parser::{NumFrom, Stream};
use crate::{GlyphId, OutlineBuilder, Rect};

// Limits from the Type 2 charstring spec.
const STACK_LIMIT: usize = 48;
const MAX_SUBR_NESTING: u8 = 10;

/// An operand stack for the charstring interpreter.
struct ArgumentsStack {
    data: [f32; STACK_LIMIT],
    len: usize,
}

impl ArgumentsStack {
    #[inline]
    fn new() -> Self {
        ArgumentsStack {
            data: [0.0; STACK_LIMIT],
            len: 0,
        }
    }

    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    fn push(&mut self, n: f32) -> Option<()> {
        if self.len == STACK_LIMIT {
            None
        } else {
            self.data[self.len] = n;
            self.len += 1;
            Some(())
        }
    }

    #[inline]
    fn at(&self, index: usize) -> f32 {
        self.data[index]
    }

    #[inline]
    fn pop(&mut self) -> f32 {
        debug_assert!(!self.is_empty());
        self.len -= 1;
        self.data[self.len]
    }

    #[inline]
    fn remove_last_n(&mut self, n: usize) {
        self.len -= n.min(self.len);
    }

    #[inline]
    fn clear(&mut self) {
        self.len = 0;
    }
}

/// A CFF INDEX.
#[derive(Clone, Copy, Default)]
struct Index<'a> {
    offsets: &'a [u8],
    off_size: u8,
    count: u32,
    data: &'a [u8],
}

impl<'a> Index<'a> {
    fn parse(s: &mut Stream<'a>, cff2: bool) -> Option<Self> {
        let count: u32 = if cff2 {
            s.read::<u32>()?
        } else {
            u32::from(s.read::<u16>()?)
        };

        if count == 0 {
            return Some(Index::default());
        }

        let off_size: u8 = s.read()?;
        if !(1..=4).contains(&off_size) {
            return None;
        }

        let offsets_len = usize::num_from(count.checked_add(1)?).checked_mul(usize::from(off_size))?;
        let offsets = s.read_bytes(offsets_len)?;

        // Offsets are 1-based; the data region ends at the last offset.
        let data_len = read_offset(offsets, usize::num_from(count), off_size)?.checked_sub(1)?;
        let data = s.read_bytes(data_len)?;

        Some(Index {
            offsets,
            off_size,
            count,
            data,
        })
    }

    #[inline]
    fn len(&self) -> u32 {
        self.count
    }

    fn get(&self, index: u32) -> Option<&'a [u8]> {
        if index >= self.count {
            return None;
        }

        let start = read_offset(self.offsets, usize::num_from(index), self.off_size)? - 1;
        let end = read_offset(self.offsets, usize::num_from(index) + 1, self.off_size)? - 1;
        self.data.get(start..end)
    }
}

fn read_offset(data: &[u8], index: usize, off_size: u8) -> Option<usize> {
    let start = index.checked_mul(usize::from(off_size))?;
    let bytes = data.get(start..start + usize::from(off_size))?;
    let mut n = 0usize;
    for b in bytes {
        n = n << 8 | usize::from(*b);
    }
    Some(n)
}

/// A subset of Top/Private DICT operators.
mod dict_operator {
    pub const CHAR_STRINGS: u16 = 17;
    pub const PRIVATE: u16 = 18;
    pub const SUBRS: u16 = 19;
    pub const ROS: u16 = 1230;
}

/// Parses a DICT, calling `f` for every (operator, operands) pair.
fn parse_dict(data: &[u8], mut f: impl FnMut(u16, &[f64])) -> Option<()> {
    let mut s = Stream::new(data);
    let mut operands = Vec::new();
    while !s.at_end() {
        let b0: u8 = s.read()?;
        match b0 {
            0..=21 => {
                let operator = if b0 == 12 {
                    1200 + u16::from(s.read::<u8>()?)
                } else {
                    u16::from(b0)
                };
                f(operator, &operands);
                operands.clear();
            }
            28 => operands.push(f64::from(s.read::<i16>()?)),
            29 => operands.push(f64::from(s.read::<i32>()?)),
            30 => {
                // A packed BCD real number; scan to the 0xF terminator.
                loop {
                    let b: u8 = s.read()?;
                    if b & 0x0F == 0x0F || b >> 4 == 0x0F {
                        break;
                    }
                }
                operands.push(0.0);
            }
            32..=246 => operands.push(f64::from(i16::from(b0) - 139)),
            247..=250 => {
                let b1: u8 = s.read()?;
                operands.push(f64::from((i32::from(b0) - 247) * 256 + i32::from(b1) + 108));
            }
            251..=254 => {
                let b1: u8 = s.read()?;
                operands.push(f64::from(-(i32::from(b0) - 251) * 256 - i32::from(b1) - 108));
            }
            _ => return None,
        }

        if operands.len() > STACK_LIMIT {
            return None;
        }
    }

    Some(())
}

#[inline]
fn subr_bias(count: u32) -> i32 {
    if count < 1240 {
        107
    } else if count < 33900 {
        1131
    } else {
        32768
    }
}

/// A [Compact Font Format Table](
/// https://docs.adobe.com/content/dam/acom/en/devnet/font/pdfs/5176.CFF.pdf).
#[derive(Clone, Copy)]
pub struct Table<'a> {
    char_strings: Index<'a>,
    global_subrs: Index<'a>,
    local_subrs: Index<'a>,
    cff2: bool,
}

impl<'a> Table<'a> {
    /// Parses a `CFF ` table from raw data.
    pub fn parse(data: &'a [u8]) -> Option<Self> {
        let mut s = Stream::new(data);
        let major: u8 = s.read()?;
        if major != 1 {
            return None;
        }
        s.skip::<u8>(); // minor
        let header_size: u8 = s.read()?;
        s.skip::<u8>(); // offSize

        let mut s = Stream::new_at(data, usize::from(header_size))?;
        let _name_index = Index::parse(&mut s, false)?;
        let top_dict_index = Index::parse(&mut s, false)?;
        let _string_index = Index::parse(&mut s, false)?;
        let global_subrs = Index::parse(&mut s, false)?;

        let top_dict = top_dict_index.get(0)?;
        let mut char_strings_offset = 0usize;
        let mut private_range: Option<(usize, usize)> = None;
        let mut is_cid = false;
        parse_dict(top_dict, |operator, operands| match operator {
            dict_operator::CHAR_STRINGS => {
                if let Some(n) = operands.get(0) {
                    char_strings_offset = *n as usize;
                }
            }
            dict_operator::PRIVATE => {
                if let (Some(size), Some(offset)) = (operands.get(0), operands.get(1)) {
                    private_range = Some((*offset as usize, *size as usize));
                }
            }
            dict_operator::ROS => is_cid = true,
            _ => {}
        })?;

        if is_cid {
            // CID-keyed fonts carry per-FD private dicts; the shared local
            // subrs model below does not apply.
            log::warn!("CID-keyed CFF fonts are not supported");
            return None;
        }

        if char_strings_offset == 0 {
            return None;
        }

        let mut s = Stream::new_at(data, char_strings_offset)?;
        let char_strings = Index::parse(&mut s, false)?;

        let mut local_subrs = Index::default();
        if let Some((offset, size)) = private_range {
            let private_data = data.get(offset..offset.checked_add(size)?)?;
            let mut subrs_offset = 0usize;
            parse_dict(private_data, |operator, operands| {
                if operator == dict_operator::SUBRS {
                    if let Some(n) = operands.get(0) {
                        subrs_offset = *n as usize;
                    }
                }
            })?;

            if subrs_offset != 0 {
                // Subrs offset is relative to the private dict.
                let mut s = Stream::new_at(data, offset.checked_add(subrs_offset)?)?;
                local_subrs = Index::parse(&mut s, false)?;
            }
        }

        Some(Table {
            char_strings,
            global_subrs,
            local_subrs,
            cff2: false,
        })
    }

    /// Parses a `CFF2` table from raw data.
    ///
    /// Only the default instance is supported: `blend` keeps base values.
    pub fn parse_cff2(data: &'a [u8]) -> Option<Self> {
        let mut s = Stream::new(data);
        let major: u8 = s.read()?;
        if major != 2 {
            return None;
        }
        s.skip::<u8>(); // minor
        let header_size: u8 = s.read()?;
        let top_dict_length: u16 = s.read()?;

        let top_dict = data.get(
            usize::from(header_size)..usize::from(header_size) + usize::from(top_dict_length),
        )?;

        let mut char_strings_offset = 0usize;
        parse_dict(top_dict, |operator, operands| {
            if operator == dict_operator::CHAR_STRINGS {
                if let Some(n) = operands.get(0) {
                    char_strings_offset = *n as usize;
                }
            }
        })?;

        if char_strings_offset == 0 {
            return None;
        }

        let mut gs = Stream::new_at(
            data,
            usize::from(header_size) + usize::from(top_dict_length),
        )?;
        let global_subrs = Index::parse(&mut gs, true)?;

        let mut s = Stream::new_at(data, char_strings_offset)?;
        let char_strings = Index::parse(&mut s, true)?;

        Some(Table {
            char_strings,
            global_subrs,
            local_subrs: Index::default(),
            cff2: true,
        })
    }

    /// Returns the number of charstrings.
    #[inline]
    pub fn number_of_glyphs(&self) -> u32 {
        self.char_strings.len()
    }

    /// Outlines a glyph, returning its tight bounding box.
    pub fn outline(&self, glyph_id: GlyphId, builder: &mut dyn OutlineBuilder) -> Option<Rect> {
        let char_string = self.char_strings.get(u32::from(glyph_id.0))?;

        let mut ctx = CharStringContext {
            table: self,
            builder,
            x: 0.0,
            y: 0.0,
            has_move_to: false,
            width_parsed: self.cff2,
            stems_len: 0,
            bbox: BBox::new(),
        };

        let mut stack = ArgumentsStack::new();
        parse_char_string(&mut ctx, char_string, 0, &mut stack)?;

        if ctx.has_move_to {
            ctx.builder.close();
        }

        ctx.bbox.to_rect()
    }
}

impl core::fmt::Debug for Table<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "Table {{ ... }}")
    }
}

struct BBox {
    x_min: f32,
    y_min: f32,
    x_max: f32,
    y_max: f32,
}

impl BBox {
    #[inline]
    fn new() -> Self {
        BBox {
            x_min: core::f32::MAX,
            y_min: core::f32::MAX,
            x_max: core::f32::MIN,
            y_max: core::f32::MIN,
        }
    }

    #[inline]
    fn is_default(&self) -> bool {
        self.x_min == core::f32::MAX
    }

    #[inline]
    fn extend_by(&mut self, x: f32, y: f32) {
        self.x_min = self.x_min.min(x);
        self.y_min = self.y_min.min(y);
        self.x_max = self.x_max.max(x);
        self.y_max = self.y_max.max(y);
    }

    fn to_rect(&self) -> Option<Rect> {
        if self.is_default() {
            return None;
        }

        Some(Rect {
            x_min: i16::try_from(self.x_min as i32).ok()?,
            y_min: i16::try_from(self.y_min as i32).ok()?,
            x_max: i16::try_from(self.x_max as i32).ok()?,
            y_max: i16::try_from(self.y_max as i32).ok()?,
        })
    }
}

struct CharStringContext<'a, 'b> {
    table: &'b Table<'a>,
    builder: &'b mut dyn OutlineBuilder,
    x: f32,
    y: f32,
    has_move_to: bool,
    width_parsed: bool,
    stems_len: u32,
    bbox: BBox,
}

impl CharStringContext<'_, '_> {
    #[inline]
    fn move_to(&mut self, dx: f32, dy: f32) {
        if self.has_move_to {
            self.builder.close();
        }
        self.has_move_to = true;
        self.x += dx;
        self.y += dy;
        self.bbox.extend_by(self.x, self.y);
        self.builder.move_to(self.x, self.y);
    }

    #[inline]
    fn line_to(&mut self, dx: f32, dy: f32) {
        self.x += dx;
        self.y += dy;
        self.bbox.extend_by(self.x, self.y);
        self.builder.line_to(self.x, self.y);
    }

    #[inline]
    fn curve_to(&mut self, dx1: f32, dy1: f32, dx2: f32, dy2: f32, dx: f32, dy: f32) {
        let x1 = self.x + dx1;
        let y1 = self.y + dy1;
        let x2 = x1 + dx2;
        let y2 = y1 + dy2;
        self.x = x2 + dx;
        self.y = y2 + dy;

        self.bbox.extend_by(x1, y1);
        self.bbox.extend_by(x2, y2);
        self.bbox.extend_by(self.x, self.y);
        self.builder.curve_to(x1, y1, x2, y2, self.x, self.y);
    }
}

mod operator {
    pub const HORIZONTAL_STEM: u8 = 1;
    pub const VERTICAL_STEM: u8 = 3;
    pub const VERTICAL_MOVE_TO: u8 = 4;
    pub const LINE_TO: u8 = 5;
    pub const HORIZONTAL_LINE_TO: u8 = 6;
    pub const VERTICAL_LINE_TO: u8 = 7;
    pub const CURVE_TO: u8 = 8;
    pub const CALL_LOCAL_SUBROUTINE: u8 = 10;
    pub const RETURN: u8 = 11;
    pub const ENDCHAR: u8 = 14;
    pub const BLEND: u8 = 16;
    pub const HORIZONTAL_STEM_HINT_MASK: u8 = 18;
    pub const HINT_MASK: u8 = 19;
    pub const COUNTER_MASK: u8 = 20;
    pub const MOVE_TO: u8 = 21;
    pub const HORIZONTAL_MOVE_TO: u8 = 22;
    pub const VERTICAL_STEM_HINT_MASK: u8 = 23;
    pub const CURVE_LINE: u8 = 24;
    pub const LINE_CURVE: u8 = 25;
    pub const VV_CURVE_TO: u8 = 26;
    pub const HH_CURVE_TO: u8 = 27;
    pub const SHORT_INT: u8 = 28;
    pub const CALL_GLOBAL_SUBROUTINE: u8 = 29;
    pub const VH_CURVE_TO: u8 = 30;
    pub const HV_CURVE_TO: u8 = 31;
    pub const FIXED_16_16: u8 = 255;
}

fn parse_char_string(
    ctx: &mut CharStringContext,
    char_string: &[u8],
    depth: u8,
    stack: &mut ArgumentsStack,
) -> Option<()> {
    if depth > MAX_SUBR_NESTING {
        return None;
    }

    let mut s = Stream::new(char_string);
    while !s.at_end() {
        let op: u8 = s.read()?;
        match op {
            operator::HORIZONTAL_STEM
            | operator::VERTICAL_STEM
            | operator::HORIZONTAL_STEM_HINT_MASK
            | operator::VERTICAL_STEM_HINT_MASK => {
                // An odd count means the leading operand is the glyph width.
                if stack.len() % 2 == 1 && !ctx.width_parsed {
                    ctx.width_parsed = true;
                }
                ctx.stems_len += stack.len() as u32 >> 1;
                stack.clear();
            }
            operator::VERTICAL_MOVE_TO => {
                if stack.len() == 2 && !ctx.width_parsed {
                    ctx.width_parsed = true;
                    ctx.move_to(0.0, stack.at(1));
                } else if !stack.is_empty() {
                    ctx.move_to(0.0, stack.at(stack.len() - 1));
                } else {
                    return None;
                }
                stack.clear();
            }
            operator::LINE_TO => {
                if stack.len() < 2 {
                    return None;
                }
                let mut i = 0;
                while i + 1 < stack.len() {
                    ctx.line_to(stack.at(i), stack.at(i + 1));
                    i += 2;
                }
                stack.clear();
            }
            operator::HORIZONTAL_LINE_TO | operator::VERTICAL_LINE_TO => {
                if stack.is_empty() {
                    return None;
                }
                let mut horizontal = op == operator::HORIZONTAL_LINE_TO;
                for i in 0..stack.len() {
                    if horizontal {
                        ctx.line_to(stack.at(i), 0.0);
                    } else {
                        ctx.line_to(0.0, stack.at(i));
                    }
                    horizontal = !horizontal;
                }
                stack.clear();
            }
            operator::CURVE_TO => {
                if stack.len() < 6 {
                    return None;
                }
                let mut i = 0;
                while i + 5 < stack.len() {
                    ctx.curve_to(
                        stack.at(i),
                        stack.at(i + 1),
                        stack.at(i + 2),
                        stack.at(i + 3),
                        stack.at(i + 4),
                        stack.at(i + 5),
                    );
                    i += 6;
                }
                stack.clear();
            }
            operator::CALL_LOCAL_SUBROUTINE => {
                if stack.is_empty() {
                    return None;
                }
                let bias = subr_bias(ctx.table.local_subrs.len());
                let index = stack.pop() as i32 + bias;
                let subr = ctx.table.local_subrs.get(u32::try_from(index).ok()?)?;
                parse_char_string(ctx, subr, depth + 1, stack)?;
            }
            operator::RETURN => break,
            operator::ENDCHAR => {
                // seac-like accents are not supported; just finish.
                stack.clear();
                break;
            }
            operator::BLEND => {
                // The default instance: keep the base values, drop the deltas.
                // The delta count per value depends on the region count, which
                // is 0 without a variation store, so only the count operand
                // itself is dropped.
                if stack.is_empty() {
                    return None;
                }
                let _n = stack.pop();
            }
            operator::HINT_MASK | operator::COUNTER_MASK => {
                if stack.len() % 2 == 1 && !ctx.width_parsed {
                    ctx.width_parsed = true;
                }
                ctx.stems_len += stack.len() as u32 >> 1;
                stack.clear();
                s.advance_checked(usize::num_from((ctx.stems_len + 7) >> 3))?;
            }
            operator::MOVE_TO => {
                if stack.len() == 3 && !ctx.width_parsed {
                    ctx.width_parsed = true;
                    ctx.move_to(stack.at(1), stack.at(2));
                } else if stack.len() >= 2 {
                    ctx.move_to(stack.at(stack.len() - 2), stack.at(stack.len() - 1));
                } else {
                    return None;
                }
                stack.clear();
            }
            operator::HORIZONTAL_MOVE_TO => {
                if stack.len() == 2 && !ctx.width_parsed {
                    ctx.width_parsed = true;
                    ctx.move_to(stack.at(1), 0.0);
                } else if !stack.is_empty() {
                    ctx.move_to(stack.at(stack.len() - 1), 0.0);
                } else {
                    return None;
                }
                stack.clear();
            }
            operator::CURVE_LINE => {
                // {curve}+ line
                if stack.len() < 8 {
                    return None;
                }
                let curves_len = (stack.len() - 2) / 6 * 6;
                let mut i = 0;
                while i < curves_len {
                    ctx.curve_to(
                        stack.at(i),
                        stack.at(i + 1),
                        stack.at(i + 2),
                        stack.at(i + 3),
                        stack.at(i + 4),
                        stack.at(i + 5),
                    );
                    i += 6;
                }
                ctx.line_to(stack.at(i), stack.at(i + 1));
                stack.clear();
            }
            operator::LINE_CURVE => {
                // {line}+ curve
                if stack.len() < 8 {
                    return None;
                }
                let lines_len = (stack.len() - 6) / 2 * 2;
                let mut i = 0;
                while i < lines_len {
                    ctx.line_to(stack.at(i), stack.at(i + 1));
                    i += 2;
                }
                ctx.curve_to(
                    stack.at(i),
                    stack.at(i + 1),
                    stack.at(i + 2),
                    stack.at(i + 3),
                    stack.at(i + 4),
                    stack.at(i + 5),
                );
                stack.clear();
            }
            operator::VV_CURVE_TO => {
                let mut i = 0;
                let mut dx = 0.0;
                if stack.len() % 4 == 1 {
                    dx = stack.at(0);
                    i = 1;
                }
                if (stack.len() - i) % 4 != 0 {
                    return None;
                }
                while i + 3 < stack.len() {
                    ctx.curve_to(dx, stack.at(i), stack.at(i + 1), stack.at(i + 2), 0.0, stack.at(i + 3));
                    dx = 0.0;
                    i += 4;
                }
                stack.clear();
            }
            operator::HH_CURVE_TO => {
                let mut i = 0;
                let mut dy = 0.0;
                if stack.len() % 4 == 1 {
                    dy = stack.at(0);
                    i = 1;
                }
                if (stack.len() - i) % 4 != 0 {
                    return None;
                }
                while i + 3 < stack.len() {
                    ctx.curve_to(stack.at(i), dy, stack.at(i + 1), stack.at(i + 2), stack.at(i + 3), 0.0);
                    dy = 0.0;
                    i += 4;
                }
                stack.clear();
            }
            operator::SHORT_INT => {
                stack.push(f32::from(s.read::<i16>()?))?;
            }
            operator::CALL_GLOBAL_SUBROUTINE => {
                if stack.is_empty() {
                    return None;
                }
                let bias = subr_bias(ctx.table.global_subrs.len());
                let index = stack.pop() as i32 + bias;
                let subr = ctx.table.global_subrs.get(u32::try_from(index).ok()?)?;
                parse_char_string(ctx, subr, depth + 1, stack)?;
            }
            operator::VH_CURVE_TO | operator::HV_CURVE_TO => {
                if stack.len() < 4 {
                    return None;
                }
                let mut horizontal = op == operator::HV_CURVE_TO;
                let mut i = 0;
                while i + 3 < stack.len() {
                    let last = stack.len() - i == 5;
                    let dlast = if last { stack.at(i + 4) } else { 0.0 };
                    if horizontal {
                        ctx.curve_to(stack.at(i), 0.0, stack.at(i + 1), stack.at(i + 2), dlast, stack.at(i + 3));
                    } else {
                        ctx.curve_to(0.0, stack.at(i), stack.at(i + 1), stack.at(i + 2), stack.at(i + 3), dlast);
                    }
                    horizontal = !horizontal;
                    i += 4;
                }
                stack.clear();
            }
            12 => {
                let op2: u8 = s.read()?;
                match op2 {
                    // flex family: emit the two curves, ignore the fd operand.
                    35 => {
                        if stack.len() != 13 {
                            return None;
                        }
                        ctx.curve_to(stack.at(0), stack.at(1), stack.at(2), stack.at(3), stack.at(4), stack.at(5));
                        ctx.curve_to(stack.at(6), stack.at(7), stack.at(8), stack.at(9), stack.at(10), stack.at(11));
                        stack.clear();
                    }
                    34 => {
                        if stack.len() != 7 {
                            return None;
                        }
                        let dy2 = 0.0;
                        ctx.curve_to(stack.at(0), 0.0, stack.at(1), stack.at(2), stack.at(3), dy2);
                        ctx.curve_to(stack.at(4), 0.0, stack.at(5), -stack.at(2), stack.at(6), 0.0);
                        stack.clear();
                    }
                    36 => {
                        if stack.len() != 9 {
                            return None;
                        }
                        let start_y = ctx.y;
                        ctx.curve_to(stack.at(0), stack.at(1), stack.at(2), stack.at(3), stack.at(4), 0.0);
                        ctx.curve_to(stack.at(5), 0.0, stack.at(6), stack.at(7), stack.at(8), start_y - ctx.y);
                        stack.clear();
                    }
                    37 => {
                        if stack.len() != 11 {
                            return None;
                        }
                        let start_x = ctx.x;
                        let start_y = ctx.y;
                        ctx.curve_to(stack.at(0), stack.at(1), stack.at(2), stack.at(3), stack.at(4), stack.at(5));
                        let dx = start_x - (ctx.x + stack.at(6) + stack.at(8));
                        let dy = start_y - (ctx.y + stack.at(7) + stack.at(9));
                        let (dx6, dy6) = if (ctx.x - start_x).abs() > (ctx.y - start_y).abs() {
                            (stack.at(10), dy)
                        } else {
                            (dx, stack.at(10))
                        };
                        ctx.curve_to(stack.at(6), stack.at(7), stack.at(8), stack.at(9), dx6, dy6);
                        stack.clear();
                    }
                    _ => {
                        // An unsupported escaped operator; operands are dropped.
                        stack.clear();
                    }
                }
            }
            operator::FIXED_16_16 => {
                let n = s.read::<i32>()? as f32 / 65536.0;
                stack.push(n)?;
            }
            32..=246 => {
                stack.push(f32::from(i16::from(op) - 139))?;
            }
            247..=250 => {
                let b1: u8 = s.read()?;
                let n = (i32::from(op) - 247) * 256 + i32::from(b1) + 108;
                stack.push(n as f32)?;
            }
            251..=254 => {
                let b1: u8 = s.read()?;
                let n = -(i32::from(op) - 251) * 256 - i32::from(b1) - 108;
                stack.push(n as f32)?;
            }
            _ => return None,
        }
    }

    Some(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct DummyBuilder {
        ops: Vec<String>,
    }

    impl OutlineBuilder for DummyBuilder {
        fn move_to(&mut self, x: f32, y: f32) {
            self.ops.push(format!("M {} {}", x, y));
        }
        fn line_to(&mut self, x: f32, y: f32) {
            self.ops.push(format!("L {} {}", x, y));
        }
        fn quad_to(&mut self, _: f32, _: f32, x: f32, y: f32) {
            self.ops.push(format!("Q {} {}", x, y));
        }
        fn curve_to(&mut self, _: f32, _: f32, _: f32, _: f32, x: f32, y: f32) {
            self.ops.push(format!("C {} {}", x, y));
        }
        fn close(&mut self) {
            self.ops.push("Z".to_string());
        }
    }

    fn build_cff(char_string: &[u8]) -> Vec<u8> {
        let mut data = vec![
            0x01, 0x00, // version: 1.0
            0x04, // header size: 4
            0x01, // offset size: 1
            // Name INDEX
            0x00, 0x01, // count: 1
            0x01, // offset size: 1
            0x01, 0x02, // offsets: [1, 2]
            0x41, // "A"
        ];

        // Top DICT INDEX: CharStrings offset points past this header.
        // Layout: the dict is [29 <i32 offset> 17].
        let top_dict_start = data.len();
        data.extend(&[
            0x00, 0x01, // count: 1
            0x01, // offset size: 1
            0x01, 0x07, // offsets: [1, 7]
            0x1D, 0x00, 0x00, 0x00, 0x00, // i32 placeholder
            0x11, // operator: CharStrings
        ]);
        let offset_pos = top_dict_start + 5 + 1;

        // String INDEX + Global Subr INDEX: empty.
        data.extend(&[0x00, 0x00, 0x00, 0x00]);

        let char_strings_offset = data.len() as u32;
        data[offset_pos..offset_pos + 4].copy_from_slice(&char_strings_offset.to_be_bytes());

        // CharStrings INDEX with a single glyph.
        data.extend(&[0x00, 0x01, 0x01]);
        data.push(1);
        data.push(1 + char_string.len() as u8);
        data.extend_from_slice(char_string);

        data
    }

    #[test]
    fn rect_outline() {
        let char_string = &[
            139, // width: 0
            247, 10, 247, 10, 21, // rmoveto 118 118
            247, 100, 6, // hlineto 208
            247, 100, 7, // vlineto 208
            251, 100, 6, // hlineto -208
            14, // endchar
        ];

        let cff_data = build_cff(char_string);
        let table = Table::parse(&cff_data).unwrap();
        assert_eq!(table.number_of_glyphs(), 1);

        let mut builder = DummyBuilder { ops: Vec::new() };
        let bbox = table.outline(GlyphId(0), &mut builder).unwrap();
        assert_eq!(builder.ops[0], "M 118 118");
        assert_eq!(builder.ops[1], "L 326 118");
        assert_eq!(builder.ops[2], "L 326 326");
        assert_eq!(builder.ops[3], "L 118 326");
        assert_eq!(*builder.ops.last().unwrap(), "Z");
        assert_eq!(
            bbox,
            Rect {
                x_min: 118,
                y_min: 118,
                x_max: 326,
                y_max: 326
            }
        );
    }
}
