//! A [Glyph Data Table](
//! https://docs.microsoft.com/en-us/typography/opentype/spec/glyf) implementation.

use super::loca;
use crate::parser::{F2DOT14, Stream};
use crate::{GlyphId, OutlineBuilder, Rect};

/// The maximum depth of composite glyph nesting. Exceeding it is treated as
/// a malformed (possibly cyclic) glyph.
const MAX_COMPONENT_DEPTH: u8 = 16;

// https://docs.microsoft.com/en-us/typography/opentype/spec/glyf#simple-glyph-description
#[derive(Clone, Copy)]
struct SimpleGlyphFlags(u8);

#[rustfmt::skip]
impl SimpleGlyphFlags {
    const ON_CURVE_POINT: Self                       = Self(1 << 0);
    const X_SHORT_VECTOR: Self                       = Self(1 << 1);
    const Y_SHORT_VECTOR: Self                       = Self(1 << 2);
    const REPEAT_FLAG: Self                          = Self(1 << 3);
    const X_IS_SAME_OR_POSITIVE_X_SHORT_VECTOR: Self = Self(1 << 4);
    const Y_IS_SAME_OR_POSITIVE_Y_SHORT_VECTOR: Self = Self(1 << 5);

    #[inline] fn empty() -> Self { Self(0) }
    #[inline] fn contains(&self, other: Self) -> bool { (self.0 & other.0) == other.0 }
}

// https://docs.microsoft.com/en-us/typography/opentype/spec/glyf#composite-glyph-description
#[derive(Clone, Copy)]
struct CompositeGlyphFlags(u16);

#[rustfmt::skip]
impl CompositeGlyphFlags {
    const ARG_1_AND_2_ARE_WORDS: Self    = Self(1 << 0);
    const ARGS_ARE_XY_VALUES: Self       = Self(1 << 1);
    const WE_HAVE_A_SCALE: Self          = Self(1 << 3);
    const MORE_COMPONENTS: Self          = Self(1 << 5);
    const WE_HAVE_AN_X_AND_Y_SCALE: Self = Self(1 << 6);
    const WE_HAVE_A_TWO_BY_TWO: Self     = Self(1 << 7);

    #[inline] fn contains(&self, other: Self) -> bool { (self.0 & other.0) == other.0 }
}

#[derive(Clone, Copy)]
struct Transform {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl Transform {
    fn combine(ts1: Self, ts2: Self) -> Self {
        Transform {
            a: ts1.a * ts2.a + ts1.c * ts2.b,
            b: ts1.b * ts2.a + ts1.d * ts2.b,
            c: ts1.a * ts2.c + ts1.c * ts2.d,
            d: ts1.b * ts2.c + ts1.d * ts2.d,
            e: ts1.a * ts2.e + ts1.c * ts2.f + ts1.e,
            f: ts1.b * ts2.e + ts1.d * ts2.f + ts1.f,
        }
    }

    #[inline]
    fn apply_to(&self, x: &mut f32, y: &mut f32) {
        let tx = *x;
        let ty = *y;
        *x = self.a * tx + self.c * ty + self.e;
        *y = self.b * tx + self.d * ty + self.f;
    }

    #[inline]
    fn is_default(&self) -> bool {
        // A direct float comparison is fine in our case.
        self.a == 1.0
            && self.b == 0.0
            && self.c == 0.0
            && self.d == 1.0
            && self.e == 0.0
            && self.f == 0.0
    }
}

impl Default for Transform {
    #[inline]
    fn default() -> Self {
        Transform {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }
}

struct Builder<'a> {
    builder: &'a mut dyn OutlineBuilder,
    transform: Transform,
    is_default_ts: bool, // `bool` is faster than `Option` or `is_default`.
}

impl Builder<'_> {
    #[inline]
    fn move_to(&mut self, mut x: f32, mut y: f32) {
        if !self.is_default_ts {
            self.transform.apply_to(&mut x, &mut y);
        }
        self.builder.move_to(x, y);
    }

    #[inline]
    fn line_to(&mut self, mut x: f32, mut y: f32) {
        if !self.is_default_ts {
            self.transform.apply_to(&mut x, &mut y);
        }
        self.builder.line_to(x, y);
    }

    #[inline]
    fn quad_to(&mut self, mut x1: f32, mut y1: f32, mut x: f32, mut y: f32) {
        if !self.is_default_ts {
            self.transform.apply_to(&mut x1, &mut y1);
            self.transform.apply_to(&mut x, &mut y);
        }
        self.builder.quad_to(x1, y1, x, y);
    }

    #[inline]
    fn close(&mut self) {
        self.builder.close();
    }
}

/// A [Glyph Data Table](
/// https://docs.microsoft.com/en-us/typography/opentype/spec/glyf).
#[derive(Clone, Copy)]
pub struct Table<'a> {
    data: &'a [u8],
    loca: loca::Table<'a>,
}

impl<'a> Table<'a> {
    /// Parses a table from raw data.
    #[inline]
    pub fn parse(loca: loca::Table<'a>, data: &'a [u8]) -> Option<Self> {
        Some(Table { data, loca })
    }

    /// Outlines a glyph, returning its tight bounding box.
    ///
    /// Returns `None` for empty glyphs and malformed data, including
    /// composite glyphs nested beyond the depth limit.
    pub fn outline(&self, glyph_id: GlyphId, builder: &mut dyn OutlineBuilder) -> Option<Rect> {
        let mut b = Builder {
            builder,
            transform: Transform::default(),
            is_default_ts: true,
        };
        let glyph_data = self.glyph_data(glyph_id)?;
        self.outline_impl(glyph_data, 0, &mut b)
    }

    /// Returns a glyph's bounding box as stored in the glyph header.
    pub fn bbox(&self, glyph_id: GlyphId) -> Option<Rect> {
        let glyph_data = self.glyph_data(glyph_id)?;
        let mut s = Stream::new(glyph_data);
        s.skip::<i16>(); // numberOfContours
        Some(Rect {
            x_min: s.read::<i16>()?,
            y_min: s.read::<i16>()?,
            x_max: s.read::<i16>()?,
            y_max: s.read::<i16>()?,
        })
    }

    #[inline]
    fn glyph_data(&self, glyph_id: GlyphId) -> Option<&'a [u8]> {
        let range = self.loca.glyph_range(glyph_id)?;
        self.data.get(range)
    }

    fn outline_impl(&self, data: &'a [u8], depth: u8, builder: &mut Builder) -> Option<Rect> {
        if depth >= MAX_COMPONENT_DEPTH {
            log::warn!("glyph nesting is deeper than {} levels", MAX_COMPONENT_DEPTH);
            return None;
        }

        let mut s = Stream::new(data);
        let number_of_contours: i16 = s.read()?;
        let rect = Rect {
            x_min: s.read::<i16>()?,
            y_min: s.read::<i16>()?,
            x_max: s.read::<i16>()?,
            y_max: s.read::<i16>()?,
        };

        if number_of_contours > 0 {
            parse_simple_outline(s.tail()?, number_of_contours as u16, builder)?;
        } else if number_of_contours < 0 {
            self.parse_composite_outline(s.tail()?, depth + 1, builder)?;
        } else {
            // An empty glyph.
            return None;
        }

        Some(rect)
    }

    fn parse_composite_outline(
        &self,
        glyph_data: &'a [u8],
        depth: u8,
        builder: &mut Builder,
    ) -> Option<()> {
        type Flags = CompositeGlyphFlags;

        if depth >= MAX_COMPONENT_DEPTH {
            log::warn!("glyph nesting is deeper than {} levels", MAX_COMPONENT_DEPTH);
            return None;
        }

        let mut s = Stream::new(glyph_data);
        let flags = CompositeGlyphFlags(s.read::<u16>()?);
        let glyph_id: GlyphId = s.read()?;

        let mut ts = Transform::default();

        if flags.contains(Flags::ARGS_ARE_XY_VALUES) {
            if flags.contains(Flags::ARG_1_AND_2_ARE_WORDS) {
                ts.e = f32::from(s.read::<i16>()?);
                ts.f = f32::from(s.read::<i16>()?);
            } else {
                ts.e = f32::from(s.read::<i8>()?);
                ts.f = f32::from(s.read::<i8>()?);
            }
        } else {
            // Point-matching components are not supported; skip the args.
            if flags.contains(Flags::ARG_1_AND_2_ARE_WORDS) {
                s.advance(4);
            } else {
                s.advance(2);
            }
        }

        if flags.contains(Flags::WE_HAVE_A_TWO_BY_TWO) {
            ts.a = s.read::<F2DOT14>()?.to_f32();
            ts.b = s.read::<F2DOT14>()?.to_f32();
            ts.c = s.read::<F2DOT14>()?.to_f32();
            ts.d = s.read::<F2DOT14>()?.to_f32();
        } else if flags.contains(Flags::WE_HAVE_AN_X_AND_Y_SCALE) {
            ts.a = s.read::<F2DOT14>()?.to_f32();
            ts.d = s.read::<F2DOT14>()?.to_f32();
        } else if flags.contains(Flags::WE_HAVE_A_SCALE) {
            ts.a = s.read::<F2DOT14>()?.to_f32().max(-2.0).min(2.0);
            ts.d = ts.a;
        }

        if let Some(glyph_data) = self.glyph_data(glyph_id) {
            let transform = Transform::combine(builder.transform, ts);
            let mut b = Builder {
                builder: builder.builder,
                transform,
                is_default_ts: transform.is_default(),
            };
            self.outline_impl(glyph_data, depth, &mut b);
        }

        if flags.contains(Flags::MORE_COMPONENTS) {
            self.parse_composite_outline(s.tail()?, depth + 1, builder)?;
        }

        Some(())
    }
}

impl core::fmt::Debug for Table<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "Table {{ ... }}")
    }
}

fn parse_simple_outline(
    glyph_data: &[u8],
    number_of_contours: u16,
    builder: &mut Builder,
) -> Option<()> {
    let mut s = Stream::new(glyph_data);
    let endpoints = s.read_array16::<u16>(number_of_contours)?;

    let points_total = {
        let last_point = endpoints.last()?;
        // Prevent overflow.
        if last_point == u16::MAX {
            return None;
        }
        last_point + 1
    };

    let instructions_len: u16 = s.read()?;
    s.advance_checked(usize::from(instructions_len))?;

    let flags_offset = s.offset();
    let x_coords_len = resolve_x_coords_len(&mut s, points_total)?;
    let x_coords_offset = s.offset();
    let y_coords_offset = x_coords_offset + usize::from(x_coords_len);

    let mut points = GlyphPoints {
        flags: Stream::new(glyph_data.get(flags_offset..x_coords_offset)?),
        x_coords: Stream::new(glyph_data.get(x_coords_offset..y_coords_offset)?),
        y_coords: Stream::new(glyph_data.get(y_coords_offset..)?),
        points_left: points_total,
        flag_repeats: 0,
        last_flags: SimpleGlyphFlags::empty(),
        x: 0,
        y: 0,
    };

    let mut total = 0u16;
    let mut last = 0u16;
    for n in endpoints {
        // Endpoints must be in increasing order.
        if n < last {
            break;
        }
        last = n;

        if n == u16::MAX {
            break;
        }

        let n = n + 1 - total;
        total += n;

        // A contour must have at least 2 points.
        if n >= 2 {
            parse_contour(points.by_ref().take(usize::from(n)), builder);
        }
    }

    Some(())
}

/// Resolves the X coordinates array length.
///
/// The length depends on the flags array, so we have to process it first.
fn resolve_x_coords_len(s: &mut Stream, points_total: u16) -> Option<u16> {
    type Flags = SimpleGlyphFlags;

    let mut flags_left = points_total;
    let mut x_coords_len = 0u16;
    while flags_left > 0 {
        let flags = SimpleGlyphFlags(s.read::<u8>()?);

        // The number of times a glyph point repeats.
        let repeats = if flags.contains(Flags::REPEAT_FLAG) {
            u16::from(s.read::<u8>()?) + 1
        } else {
            1
        };

        if flags.contains(Flags::X_SHORT_VECTOR) {
            // Coordinate is 1 byte long.
            x_coords_len = x_coords_len.checked_add(repeats)?;
        } else if !flags.contains(Flags::X_IS_SAME_OR_POSITIVE_X_SHORT_VECTOR) {
            // Coordinate is 2 bytes long.
            x_coords_len = x_coords_len.checked_add(repeats.checked_mul(2)?)?;
        }

        flags_left = flags_left.saturating_sub(repeats);
    }

    Some(x_coords_len)
}

#[derive(Clone, Copy, Debug)]
struct Point {
    x: f32,
    y: f32,
}

impl Point {
    #[inline]
    fn lerp(&self, other: Point, t: f32) -> Point {
        Point {
            x: self.x + t * (other.x - self.x),
            y: self.y + t * (other.y - self.y),
        }
    }
}

fn parse_contour(points: core::iter::Take<&mut GlyphPoints>, builder: &mut Builder) {
    let mut first_oncurve: Option<Point> = None;
    let mut first_offcurve: Option<Point> = None;
    let mut last_offcurve: Option<Point> = None;
    for point in points {
        let p = Point {
            x: f32::from(point.x),
            y: f32::from(point.y),
        };
        if first_oncurve.is_none() {
            if point.on_curve_point {
                first_oncurve = Some(p);
                builder.move_to(p.x, p.y);
            } else {
                match first_offcurve {
                    Some(offcurve) => {
                        let mid = offcurve.lerp(p, 0.5);
                        first_oncurve = Some(mid);
                        last_offcurve = Some(p);
                        builder.move_to(mid.x, mid.y);
                    }
                    None => {
                        first_offcurve = Some(p);
                    }
                }
            }
        } else {
            match (last_offcurve, point.on_curve_point) {
                (Some(offcurve), true) => {
                    last_offcurve = None;
                    builder.quad_to(offcurve.x, offcurve.y, p.x, p.y);
                }
                (Some(offcurve), false) => {
                    last_offcurve = Some(p);
                    let mid = offcurve.lerp(p, 0.5);
                    builder.quad_to(offcurve.x, offcurve.y, mid.x, mid.y);
                }
                (None, true) => {
                    builder.line_to(p.x, p.y);
                }
                (None, false) => {
                    last_offcurve = Some(p);
                }
            }
        }
    }

    loop {
        match (first_offcurve, last_offcurve) {
            (Some(offcurve1), Some(offcurve2)) => {
                last_offcurve = None;
                let mid = offcurve2.lerp(offcurve1, 0.5);
                builder.quad_to(offcurve2.x, offcurve2.y, mid.x, mid.y);
            }
            (Some(offcurve1), None) => {
                if let Some(p) = first_oncurve {
                    builder.quad_to(offcurve1.x, offcurve1.y, p.x, p.y);
                }
                break;
            }
            (None, Some(offcurve2)) => {
                if let Some(p) = first_oncurve {
                    builder.quad_to(offcurve2.x, offcurve2.y, p.x, p.y);
                }
                break;
            }
            (None, None) => {
                if let Some(p) = first_oncurve {
                    builder.line_to(p.x, p.y);
                }
                break;
            }
        }
    }

    builder.close();
}

struct GlyphPoints<'a> {
    flags: Stream<'a>,
    x_coords: Stream<'a>,
    y_coords: Stream<'a>,
    points_left: u16,
    flag_repeats: u8,
    last_flags: SimpleGlyphFlags,
    x: i16,
    y: i16,
}

impl Iterator for GlyphPoints<'_> {
    type Item = GlyphPoint;

    fn next(&mut self) -> Option<Self::Item> {
        type Flags = SimpleGlyphFlags;

        if self.points_left == 0 {
            return None;
        }

        if self.flag_repeats == 0 {
            self.last_flags = SimpleGlyphFlags(self.flags.read::<u8>()?);
            if self.last_flags.contains(Flags::REPEAT_FLAG) {
                self.flag_repeats = self.flags.read::<u8>()?;
            }
        } else {
            self.flag_repeats -= 1;
        }

        let x = glyph_coord(
            self.last_flags,
            Flags::X_SHORT_VECTOR,
            Flags::X_IS_SAME_OR_POSITIVE_X_SHORT_VECTOR,
            &mut self.x_coords,
        )?;
        self.x = self.x.wrapping_add(x);

        let y = glyph_coord(
            self.last_flags,
            Flags::Y_SHORT_VECTOR,
            Flags::Y_IS_SAME_OR_POSITIVE_Y_SHORT_VECTOR,
            &mut self.y_coords,
        )?;
        self.y = self.y.wrapping_add(y);

        self.points_left -= 1;

        Some(GlyphPoint {
            x: self.x,
            y: self.y,
            on_curve_point: self.last_flags.contains(Flags::ON_CURVE_POINT),
        })
    }
}

#[derive(Clone, Copy, Debug)]
struct GlyphPoint {
    x: i16,
    y: i16,
    on_curve_point: bool,
}

fn glyph_coord(
    flags: SimpleGlyphFlags,
    short_vector: SimpleGlyphFlags,
    is_same_or_positive_short_vector: SimpleGlyphFlags,
    coords: &mut Stream,
) -> Option<i16> {
    Some(
        match (
            flags.contains(short_vector),
            flags.contains(is_same_or_positive_short_vector),
        ) {
            (true, true) => i16::from(coords.read::<u8>()?),
            (true, false) => -i16::from(coords.read::<u8>()?),
            // Keep the previous coordinate.
            (false, true) => 0,
            (false, false) => coords.read::<i16>()?,
        },
    )
}
