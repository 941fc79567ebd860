//! The renderer facade: feeds positioned glyph outlines to an external
//! [`GlyphRenderer`] callback.

use crate::layout::{layout_codepoints, PositionedGlyph, TextOptions};
use crate::unicode::{CodePoint, Utf16CodePoints};
use crate::{Error, Face, OutlineBuilder, RectF};

/// A 2D point in pixels.
#[derive(Clone, Copy, PartialEq, Default, Debug)]
#[allow(missing_docs)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    /// Creates a new point.
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Vec2 { x, y }
    }
}

/// The callback sink a renderer implements to receive glyph outlines.
///
/// Calls arrive strictly nested: `begin_text`, then per glyph `begin_glyph`,
/// the outline segments, `end_figure`/`end_glyph`, and finally `end_text`.
/// Implementations are driven from a single thread within one render.
pub trait GlyphRenderer {
    /// Starts a text block covering `bounds`.
    fn begin_text(&mut self, bounds: RectF);
    /// Starts one glyph.
    fn begin_glyph(&mut self, glyph_id: u16, bounds: RectF);
    /// Starts a figure at `p`.
    fn move_to(&mut self, p: Vec2);
    /// A line segment.
    fn line_to(&mut self, p: Vec2);
    /// A quadratic Bézier segment.
    fn quadratic_to(&mut self, c: Vec2, p: Vec2);
    /// A cubic Bézier segment.
    fn cubic_to(&mut self, c1: Vec2, c2: Vec2, p: Vec2);
    /// Closes the current figure.
    fn end_figure(&mut self);
    /// Finishes the glyph.
    fn end_glyph(&mut self);
    /// Finishes the text block.
    fn end_text(&mut self);
}

/// Adapts font-unit outline callbacks to the pixel-space renderer surface.
struct RendererOutlineSink<'a> {
    renderer: &'a mut dyn GlyphRenderer,
    scale: f32,
    origin: (f32, f32),
}

impl RendererOutlineSink<'_> {
    #[inline]
    fn map(&self, x: f32, y: f32) -> Vec2 {
        // Font units are y-up, pixels are y-down.
        Vec2::new(self.origin.0 + x * self.scale, self.origin.1 - y * self.scale)
    }
}

impl OutlineBuilder for RendererOutlineSink<'_> {
    fn move_to(&mut self, x: f32, y: f32) {
        let p = self.map(x, y);
        self.renderer.move_to(p);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let p = self.map(x, y);
        self.renderer.line_to(p);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let c = self.map(x1, y1);
        let p = self.map(x, y);
        self.renderer.quadratic_to(c, p);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let c1 = self.map(x1, y1);
        let c2 = self.map(x2, y2);
        let p = self.map(x, y);
        self.renderer.cubic_to(c1, c2, p);
    }

    fn close(&mut self) {
        self.renderer.end_figure();
    }
}

/// Lays out `text` and drives `renderer` with the outlines of every
/// positioned glyph.
pub fn render_text(
    face: &Face,
    text: &str,
    options: &TextOptions,
    renderer: &mut dyn GlyphRenderer,
) -> Result<(), Error> {
    let codepoints: Vec<CodePoint> = text.chars().map(CodePoint::from).collect();
    render_codepoints(face, &codepoints, options, renderer)
}

/// Lays out UTF-16 `text` and drives `renderer` with the outlines of every
/// positioned glyph.
pub fn render_text_utf16(
    face: &Face,
    text: &[u16],
    options: &TextOptions,
    renderer: &mut dyn GlyphRenderer,
) -> Result<(), Error> {
    let codepoints: Vec<CodePoint> = Utf16CodePoints::new(text).collect();
    render_codepoints(face, &codepoints, options, renderer)
}

fn render_codepoints(
    face: &Face,
    codepoints: &[CodePoint],
    options: &TextOptions,
    renderer: &mut dyn GlyphRenderer,
) -> Result<(), Error> {
    let glyphs = layout_codepoints(face, codepoints, options)?;
    let scale = options.size_px * options.dpi / (72.0 * f32::from(face.units_per_em()));

    renderer.begin_text(text_bounds(&glyphs));
    for glyph in &glyphs {
        renderer.begin_glyph(glyph.glyph_id.0, glyph.bounds);

        let mut sink = RendererOutlineSink {
            renderer: &mut *renderer,
            scale,
            origin: glyph.origin,
        };
        face.outline_glyph(glyph.glyph_id, &mut sink);

        renderer.end_glyph();
    }
    renderer.end_text();

    Ok(())
}

fn text_bounds(glyphs: &[PositionedGlyph]) -> RectF {
    let mut bounds = RectF {
        x_min: 0.0,
        y_min: 0.0,
        x_max: 0.0,
        y_max: 0.0,
    };

    let mut first = true;
    for glyph in glyphs {
        if first {
            bounds = glyph.bounds;
            first = false;
        } else {
            bounds.x_min = bounds.x_min.min(glyph.bounds.x_min);
            bounds.y_min = bounds.y_min.min(glyph.bounds.y_min);
            bounds.x_max = bounds.x_max.max(glyph.bounds.x_max);
            bounds.y_max = bounds.y_max.max(glyph.bounds.y_max);
        }
    }

    bounds
}
