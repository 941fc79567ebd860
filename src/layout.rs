//! The layout engine: turns logical text into positioned glyphs.
//!
//! Text is decoded to codepoints, split into bidi level runs and script
//! runs, shaped run by run, broken into lines, visually reordered and
//! accumulated into pixel-space [`PositionedGlyph`]s.

use crate::shape::{self, Run};
use crate::unicode::{bidi, BidiClass, CodePoint, LineBreak, PropertyTables, Script};
use crate::{Error, Face, GlyphId, RectF, Tag};

/// The base direction of the text.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TextDirection {
    /// Detect from the first strong character.
    Auto,
    /// Force left-to-right.
    LeftToRight,
    /// Force right-to-left.
    RightToLeft,
}

/// Horizontal line alignment.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[allow(missing_docs)]
pub enum HorizontalAlignment {
    Left,
    Center,
    Right,
}

/// Vertical block alignment relative to the origin.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[allow(missing_docs)]
pub enum VerticalAlignment {
    Top,
    Center,
    Bottom,
}

/// Options controlling layout.
#[derive(Clone, Debug)]
pub struct TextOptions {
    /// Font size in pixels per em.
    pub size_px: f32,
    /// Resolution; 72 means `size_px` is used as-is.
    pub dpi: f32,
    /// Base direction.
    pub direction: TextDirection,
    /// Overrides the per-run script detection.
    pub script_override: Option<Script>,
    /// An OpenType language tag (e.g. `TRK `), if known.
    pub language: Option<Tag>,
    /// Extra OpenType features to enable.
    pub features: Vec<Tag>,
    /// Tab width, in space advances.
    pub tab_width: u8,
    /// Maximum line length in pixels; `None` disables wrapping.
    pub wrapping_length: Option<f32>,
    /// The origin of the first baseline.
    pub origin: (f32, f32),
    /// Horizontal line alignment.
    pub horizontal_alignment: HorizontalAlignment,
    /// Vertical block alignment.
    pub vertical_alignment: VerticalAlignment,
}

impl Default for TextOptions {
    fn default() -> Self {
        TextOptions {
            size_px: 16.0,
            dpi: 72.0,
            direction: TextDirection::Auto,
            script_override: None,
            language: None,
            features: Vec::new(),
            tab_width: 4,
            wrapping_length: None,
            origin: (0.0, 0.0),
            horizontal_alignment: HorizontalAlignment::Left,
            vertical_alignment: VerticalAlignment::Top,
        }
    }
}

/// A glyph with its final position, ready for rendering.
#[derive(Clone, Copy, Debug)]
pub struct PositionedGlyph {
    /// The glyph ID in the face.
    pub glyph_id: GlyphId,
    /// The baseline origin in pixels.
    pub origin: (f32, f32),
    /// The glyph bounding box translated to `origin`, in pixels.
    pub bounds: RectF,
    /// The cluster (logical codepoint index) this glyph belongs to.
    pub cluster: u32,
}

/// Lays out UTF-16 text.
pub fn layout_utf16(
    face: &Face,
    text: &[u16],
    options: &TextOptions,
) -> Result<Vec<PositionedGlyph>, Error> {
    let codepoints: Vec<CodePoint> = crate::unicode::Utf16CodePoints::new(text).collect();
    layout_codepoints(face, &codepoints, options)
}

/// Lays out a string slice.
pub fn layout_str(
    face: &Face,
    text: &str,
    options: &TextOptions,
) -> Result<Vec<PositionedGlyph>, Error> {
    let codepoints: Vec<CodePoint> = text.chars().map(CodePoint::from).collect();
    layout_codepoints(face, &codepoints, options)
}

/// A maximal span of uniform bidi level and script.
struct ShapedRun {
    start: usize,
    end: usize,
    level: u8,
    glyphs: Vec<shape::ShapedGlyph>,
}

pub(crate) fn layout_codepoints(
    face: &Face,
    codepoints: &[CodePoint],
    options: &TextOptions,
) -> Result<Vec<PositionedGlyph>, Error> {
    let tables = PropertyTables::global();
    let scale = options.size_px * options.dpi / (72.0 * f32::from(face.units_per_em()));

    let classes: Vec<BidiClass> = codepoints.iter().map(|&cp| tables.bidi_class(cp)).collect();
    let base_level = match options.direction {
        TextDirection::LeftToRight => 0,
        TextDirection::RightToLeft => 1,
        TextDirection::Auto => bidi::paragraph_level(&classes),
    };
    let levels = bidi::resolve_levels(&classes, codepoints, base_level);

    // Shape every (level, script) run once; lines slice them by cluster.
    let runs = shape_runs(face, codepoints, &levels, options);

    // Pixel-space metrics.
    let space_advance = face
        .glyph_index_for_code_point(CodePoint::from(' '))
        .and_then(|id| face.glyph_hor_advance(id))
        .map(|adv| f32::from(adv) * scale)
        .unwrap_or(options.size_px / 4.0);
    let tab_advance = space_advance * f32::from(options.tab_width.max(1));
    let line_height = face.line_height_px(options.size_px, options.dpi);

    // Widths per cluster, for wrapping.
    let mut cluster_width = vec![0.0f32; codepoints.len()];
    for run in &runs {
        for glyph in &run.glyphs {
            let index = glyph.cluster as usize;
            if index < cluster_width.len() {
                cluster_width[index] += glyph.x_advance as f32 * scale;
            }
        }
    }
    for (i, &cp) in codepoints.iter().enumerate() {
        if cp.value() == u32::from(b'\t') {
            cluster_width[i] = tab_advance;
        }
    }

    let lines = break_lines(codepoints, &cluster_width, options);

    let mut output = Vec::new();
    let mut line_spans: Vec<(usize, usize, f32)> = Vec::new();
    let mut pen_y = options.origin.1;

    for line in &lines {
        let first_glyph = output.len();
        let mut pen_x = options.origin.0;

        for (start, end, level) in visual_segments(&runs, line.start, line.end) {
            let run = match runs.iter().find(|run| run.start <= start && end <= run.end) {
                Some(run) => run,
                None => continue,
            };

            // Logical-order glyph records of this segment.
            let slice: Vec<&shape::ShapedGlyph> = run
                .glyphs
                .iter()
                .filter(|g| (start..end).contains(&(g.cluster as usize)))
                .collect();

            let rtl = level % 2 == 1;
            let ordered: Vec<&shape::ShapedGlyph> = if rtl {
                slice.into_iter().rev().collect()
            } else {
                slice
            };

            for glyph in ordered {
                let codepoint = glyph.codepoint.value();
                if codepoint == u32::from(b'\t') {
                    pen_x += tab_advance;
                    continue;
                }

                let origin = (
                    pen_x + glyph.x_offset as f32 * scale,
                    pen_y - glyph.y_offset as f32 * scale,
                );
                let bounds = glyph_bounds(face, glyph.glyph_id, origin, scale);
                output.push(PositionedGlyph {
                    glyph_id: glyph.glyph_id,
                    origin,
                    bounds,
                    cluster: glyph.cluster,
                });

                pen_x += glyph.x_advance as f32 * scale;
                pen_y -= glyph.y_advance as f32 * scale;
            }
        }

        line_spans.push((first_glyph, output.len(), pen_x - options.origin.0));
        pen_y += line_height;
    }

    apply_alignment(&mut output, &line_spans, line_height, options);

    Ok(output)
}

/// Shapes every maximal (level, script) run.
fn shape_runs(
    face: &Face,
    codepoints: &[CodePoint],
    levels: &[u8],
    options: &TextOptions,
) -> Vec<ShapedRun> {
    let tables = PropertyTables::global();
    let mut runs = Vec::new();

    let mut start = 0;
    while start < codepoints.len() {
        let level = levels[start];
        let script = options
            .script_override
            .unwrap_or_else(|| resolved_script(tables, codepoints, start));

        let mut end = start + 1;
        while end < codepoints.len() && levels[end] == level {
            let next_script = options
                .script_override
                .unwrap_or_else(|| resolved_script(tables, codepoints, end));
            if next_script != script
                && next_script != Script::Common
                && next_script != Script::Inherited
                && next_script != Script::Unknown
                && script != Script::Common
            {
                break;
            }
            end += 1;
        }

        let run = Run {
            codepoints: &codepoints[start..end],
            script,
            rtl: level % 2 == 1,
            language: options.language,
            features: &options.features,
            cluster_offset: start as u32,
        };
        let buffer = shape::shape(face, &run);

        runs.push(ShapedRun {
            start,
            end,
            level,
            glyphs: buffer.glyphs,
        });
        start = end;
    }

    runs
}

/// Returns the first concrete script at or after `index`; Common and
/// Inherited merge into the surrounding run.
fn resolved_script(tables: &PropertyTables, codepoints: &[CodePoint], index: usize) -> Script {
    let script = tables.script(codepoints[index]);
    if script != Script::Common && script != Script::Inherited && script != Script::Unknown {
        return script;
    }

    for &cp in &codepoints[index + 1..] {
        let script = tables.script(cp);
        if script != Script::Common && script != Script::Inherited && script != Script::Unknown {
            return script;
        }
    }

    Script::Common
}

struct Line {
    start: usize,
    end: usize,
}

/// Greedy line breaking: mandatory breaks always, soft wraps at the last
/// break opportunity that fits.
fn break_lines(
    codepoints: &[CodePoint],
    cluster_width: &[f32],
    options: &TextOptions,
) -> Vec<Line> {
    let tables = PropertyTables::global();
    let mut lines = Vec::new();

    let mut start = 0;
    let mut width = 0.0f32;
    let mut last_opportunity: Option<usize> = None;

    let mut i = 0;
    while i < codepoints.len() {
        let class = tables.line_break(codepoints[i]);

        if class.is_mandatory() {
            // CR+LF collapses into a single break.
            let mut end = i + 1;
            if class == LineBreak::CarriageReturn
                && codepoints.get(i + 1).map(|cp| tables.line_break(*cp)) == Some(LineBreak::LineFeed)
            {
                end += 1;
            }
            lines.push(Line { start, end: i });
            start = end;
            i = end;
            width = 0.0;
            last_opportunity = None;
            continue;
        }

        width += cluster_width[i];

        // Trailing spaces may overflow the box; they only open an
        // opportunity for the next glyph.
        if let Some(max_width) = options.wrapping_length {
            if class != LineBreak::Space && width > max_width && start < i {
                if let Some(opportunity) = last_opportunity {
                    lines.push(Line { start, end: opportunity });
                    start = opportunity;
                } else {
                    // No opportunity on this line: break before the glyph.
                    lines.push(Line { start, end: i });
                    start = i;
                }

                width = cluster_width[start..=i].iter().sum();
                last_opportunity = None;
            }
        }

        if matches!(
            class,
            LineBreak::Space
                | LineBreak::BreakAfter
                | LineBreak::Hyphen
                | LineBreak::ZeroWidthSpace
                | LineBreak::Ideographic
        ) {
            last_opportunity = Some(i + 1);
        }

        i += 1;
    }

    lines.push(Line {
        start,
        end: codepoints.len(),
    });
    lines
}

/// Returns the visual segment order of the line `[line_start, line_end)`:
/// `(start, end, level)` triples, left-most first.
fn visual_segments(
    runs: &[ShapedRun],
    line_start: usize,
    line_end: usize,
) -> Vec<(usize, usize, u8)> {
    // Split the line into per-run segments in logical order.
    let mut segments: Vec<(usize, usize, u8)> = Vec::new();
    for run in runs {
        let start = run.start.max(line_start);
        let end = run.end.min(line_end);
        if start < end {
            segments.push((start, end, run.level));
        }
    }
    segments.sort_by_key(|segment| segment.0);

    if segments.is_empty() {
        return segments;
    }

    // Rule L2 over whole segments: reverse maximal spans from the deepest
    // level down.
    let max_level = segments.iter().map(|s| s.2).max().unwrap_or(0);
    let min_odd = segments
        .iter()
        .map(|s| s.2)
        .filter(|level| level % 2 == 1)
        .min()
        .unwrap_or(max_level + 1);

    let mut level = max_level;
    while level >= min_odd && level > 0 {
        let mut i = 0;
        while i < segments.len() {
            if segments[i].2 >= level {
                let start = i;
                while i < segments.len() && segments[i].2 >= level {
                    i += 1;
                }
                segments[start..i].reverse();
            } else {
                i += 1;
            }
        }
        level -= 1;
    }

    segments
}

fn glyph_bounds(face: &Face, glyph_id: GlyphId, origin: (f32, f32), scale: f32) -> RectF {
    match face.glyph_bounding_box(glyph_id) {
        Some(rect) => RectF {
            x_min: origin.0 + f32::from(rect.x_min) * scale,
            y_min: origin.1 - f32::from(rect.y_max) * scale,
            x_max: origin.0 + f32::from(rect.x_max) * scale,
            y_max: origin.1 - f32::from(rect.y_min) * scale,
        },
        None => RectF {
            x_min: origin.0,
            y_min: origin.1,
            x_max: origin.0,
            y_max: origin.1,
        },
    }
}

fn apply_alignment(
    output: &mut [PositionedGlyph],
    line_spans: &[(usize, usize, f32)],
    line_height: f32,
    options: &TextOptions,
) {
    // Horizontal alignment per line, against the wrapping box when present,
    // against the widest line otherwise.
    let box_width = options.wrapping_length.unwrap_or_else(|| {
        line_spans
            .iter()
            .map(|&(_, _, width)| width)
            .fold(0.0, f32::max)
    });

    for &(start, end, width) in line_spans {
        let dx = match options.horizontal_alignment {
            HorizontalAlignment::Left => 0.0,
            HorizontalAlignment::Center => (box_width - width) / 2.0,
            HorizontalAlignment::Right => box_width - width,
        };
        if dx != 0.0 {
            for glyph in &mut output[start..end] {
                glyph.origin.0 += dx;
                glyph.bounds.x_min += dx;
                glyph.bounds.x_max += dx;
            }
        }
    }

    // Vertical alignment of the whole block.
    let total_height = line_spans.len() as f32 * line_height;
    let dy = match options.vertical_alignment {
        VerticalAlignment::Top => 0.0,
        VerticalAlignment::Center => -total_height / 2.0,
        VerticalAlignment::Bottom => -total_height,
    };
    if dy != 0.0 {
        for glyph in output.iter_mut() {
            glyph.origin.1 += dy;
            glyph.bounds.y_min += dy;
            glyph.bounds.y_max += dy;
        }
    }
}
