//! Unicode bidirectional algorithm (UAX#9).
//!
//! Resolves a per-codepoint embedding level in `0..=125` from the BidiClass
//! property, then orders level runs for visual layout. Explicit embeddings,
//! overrides and isolates are honored; rules W1-W7, N0-N2 and I1-I2 are
//! applied per isolating run sequence approximated by level runs.

use super::codepoint::CodePoint;
use super::props::{BidiClass, GeneralCategory, PropertyTables};

/// The maximum explicit embedding depth.
pub const MAX_DEPTH: u8 = 125;

/// The BD16 bracket-pair stack limit.
const MAX_BRACKET_DEPTH: usize = 63;

/// Computes the paragraph embedding level. Rules P2-P3.
///
/// The first strong class wins; isolate content is skipped.
pub fn paragraph_level(classes: &[BidiClass]) -> u8 {
    let mut isolate_depth = 0u32;
    for &class in classes {
        match class {
            BidiClass::LeftToRightIsolate
            | BidiClass::RightToLeftIsolate
            | BidiClass::FirstStrongIsolate => isolate_depth += 1,
            BidiClass::PopDirectionalIsolate => isolate_depth = isolate_depth.saturating_sub(1),
            BidiClass::LeftToRight if isolate_depth == 0 => return 0,
            BidiClass::RightToLeft | BidiClass::ArabicLetter if isolate_depth == 0 => return 1,
            _ => {}
        }
    }
    0
}

#[derive(Clone, Copy)]
struct Status {
    level: u8,
    overridden: Option<BidiClass>,
    isolate: bool,
}

/// Resolves embedding levels for `classes`. Rules X1-X8, W1-W7, N0-N2, I1-I2
/// and the L1 reset.
///
/// `codepoints` parallels `classes` and feeds the N0 bracket pairing;
/// an empty slice skips that rule.
pub fn resolve_levels(classes: &[BidiClass], codepoints: &[CodePoint], base_level: u8) -> Vec<u8> {
    let mut levels = vec![base_level; classes.len()];
    if classes.is_empty() {
        return levels;
    }

    // X1-X8: explicit embeddings, overrides and isolates.
    let mut resolved: Vec<BidiClass> = classes.to_vec();
    let mut stack = vec![Status {
        level: base_level,
        overridden: None,
        isolate: false,
    }];
    let mut overflow_isolates = 0u32;
    let mut overflow_embedding = 0u32;
    let mut valid_isolates = 0u32;

    let next_odd = |level: u8| (level + 1) | 1;
    let next_even = |level: u8| (level + 2) & !1;

    for (i, &class) in classes.iter().enumerate() {
        let top = *stack.last().unwrap();
        match class {
            BidiClass::LeftToRightEmbedding
            | BidiClass::RightToLeftEmbedding
            | BidiClass::LeftToRightOverride
            | BidiClass::RightToLeftOverride => {
                levels[i] = top.level;
                let rtl = matches!(
                    class,
                    BidiClass::RightToLeftEmbedding | BidiClass::RightToLeftOverride
                );
                let new_level = if rtl {
                    next_odd(top.level)
                } else {
                    next_even(top.level)
                };
                if new_level <= MAX_DEPTH && overflow_isolates == 0 && overflow_embedding == 0 {
                    let overridden = match class {
                        BidiClass::LeftToRightOverride => Some(BidiClass::LeftToRight),
                        BidiClass::RightToLeftOverride => Some(BidiClass::RightToLeft),
                        _ => None,
                    };
                    stack.push(Status {
                        level: new_level,
                        overridden,
                        isolate: false,
                    });
                } else if overflow_isolates == 0 {
                    overflow_embedding += 1;
                }
                resolved[i] = BidiClass::BoundaryNeutral;
            }
            BidiClass::PopDirectionalFormat => {
                levels[i] = top.level;
                if overflow_isolates > 0 {
                    // Popped inside an overflowed isolate, nothing to do.
                } else if overflow_embedding > 0 {
                    overflow_embedding -= 1;
                } else if !top.isolate && stack.len() > 1 {
                    stack.pop();
                }
                resolved[i] = BidiClass::BoundaryNeutral;
            }
            BidiClass::LeftToRightIsolate
            | BidiClass::RightToLeftIsolate
            | BidiClass::FirstStrongIsolate => {
                let rtl = match class {
                    BidiClass::RightToLeftIsolate => true,
                    BidiClass::LeftToRightIsolate => false,
                    _ => {
                        // FSI: scan for the first strong class inside the isolate.
                        let mut depth = 0u32;
                        let mut rtl = false;
                        for &c in &classes[i + 1..] {
                            match c {
                                BidiClass::LeftToRightIsolate
                                | BidiClass::RightToLeftIsolate
                                | BidiClass::FirstStrongIsolate => depth += 1,
                                BidiClass::PopDirectionalIsolate => {
                                    if depth == 0 {
                                        break;
                                    }
                                    depth -= 1;
                                }
                                BidiClass::LeftToRight if depth == 0 => break,
                                BidiClass::RightToLeft | BidiClass::ArabicLetter if depth == 0 => {
                                    rtl = true;
                                    break;
                                }
                                _ => {}
                            }
                        }
                        rtl
                    }
                };

                levels[i] = top.level;
                if let Some(forced) = top.overridden {
                    resolved[i] = forced;
                } else {
                    resolved[i] = BidiClass::OtherNeutral;
                }

                let new_level = if rtl {
                    next_odd(top.level)
                } else {
                    next_even(top.level)
                };
                if new_level <= MAX_DEPTH && overflow_isolates == 0 && overflow_embedding == 0 {
                    valid_isolates += 1;
                    stack.push(Status {
                        level: new_level,
                        overridden: None,
                        isolate: true,
                    });
                } else {
                    overflow_isolates += 1;
                }
            }
            BidiClass::PopDirectionalIsolate => {
                if overflow_isolates > 0 {
                    overflow_isolates -= 1;
                } else if valid_isolates > 0 {
                    overflow_embedding = 0;
                    while !stack.last().unwrap().isolate {
                        stack.pop();
                    }
                    stack.pop();
                    valid_isolates -= 1;
                }
                let top = *stack.last().unwrap();
                levels[i] = top.level;
                if let Some(forced) = top.overridden {
                    resolved[i] = forced;
                } else {
                    resolved[i] = BidiClass::OtherNeutral;
                }
            }
            BidiClass::ParagraphSeparator => {
                // Rule X8: paragraph separators reset to the base level.
                levels[i] = base_level;
            }
            BidiClass::BoundaryNeutral => {
                levels[i] = top.level;
            }
            _ => {
                levels[i] = top.level;
                if let Some(forced) = top.overridden {
                    resolved[i] = forced;
                }
            }
        }
    }

    // X9: removed characters take no part in the W/N rules.
    let kept: Vec<usize> = (0..classes.len())
        .filter(|&i| resolved[i] != BidiClass::BoundaryNeutral)
        .collect();

    // Level runs over the kept characters.
    let mut run_start = 0;
    while run_start < kept.len() {
        let level = levels[kept[run_start]];
        let mut run_end = run_start + 1;
        while run_end < kept.len() && levels[kept[run_end]] == level {
            run_end += 1;
        }

        let sos_level = if run_start == 0 {
            base_level.max(level)
        } else {
            levels[kept[run_start - 1]].max(level)
        };
        let eos_level = if run_end == kept.len() {
            base_level.max(level)
        } else {
            levels[kept[run_end]].max(level)
        };
        let sos = direction_class(sos_level);
        let eos = direction_class(eos_level);

        let run: Vec<usize> = kept[run_start..run_end].to_vec();
        resolve_weak(&mut resolved, &run, sos);
        if codepoints.len() == classes.len() {
            resolve_brackets(&mut resolved, &run, codepoints, sos, level);
        }
        resolve_neutral(&mut resolved, &run, sos, eos, level);
        resolve_implicit(&mut levels, &resolved, &run, level);

        run_start = run_end;
    }

    // L1: segment separators and trailing whitespace return to the base level.
    let mut reset_from = classes.len();
    for i in (0..classes.len()).rev() {
        match classes[i] {
            BidiClass::WhiteSpace
            | BidiClass::LeftToRightIsolate
            | BidiClass::RightToLeftIsolate
            | BidiClass::FirstStrongIsolate
            | BidiClass::PopDirectionalIsolate
            | BidiClass::BoundaryNeutral => {}
            BidiClass::ParagraphSeparator | BidiClass::SegmentSeparator => {
                levels[i] = base_level;
                reset_from = i;
                continue;
            }
            _ => break,
        }
        reset_from = i;
    }
    for level in &mut levels[reset_from..] {
        *level = base_level;
    }

    levels
}

#[inline]
fn direction_class(level: u8) -> BidiClass {
    if level % 2 == 0 {
        BidiClass::LeftToRight
    } else {
        BidiClass::RightToLeft
    }
}

/// Rules W1-W7 over one level run.
fn resolve_weak(resolved: &mut [BidiClass], run: &[usize], sos: BidiClass) {
    // W1: NSM takes the class of the previous character.
    let mut prev = sos;
    for &i in run {
        if resolved[i] == BidiClass::NonspacingMark {
            resolved[i] = match prev {
                BidiClass::LeftToRightIsolate
                | BidiClass::RightToLeftIsolate
                | BidiClass::FirstStrongIsolate
                | BidiClass::PopDirectionalIsolate => BidiClass::OtherNeutral,
                c => c,
            };
        }
        prev = resolved[i];
    }

    // W2: EN after an AL context becomes AN.
    let mut last_strong = sos;
    for &i in run {
        match resolved[i] {
            BidiClass::LeftToRight | BidiClass::RightToLeft | BidiClass::ArabicLetter => {
                last_strong = resolved[i];
            }
            BidiClass::EuropeanNumber if last_strong == BidiClass::ArabicLetter => {
                resolved[i] = BidiClass::ArabicNumber;
            }
            _ => {}
        }
    }

    // W3: AL becomes R.
    for &i in run {
        if resolved[i] == BidiClass::ArabicLetter {
            resolved[i] = BidiClass::RightToLeft;
        }
    }

    // W4: a single separator between numbers of the matching kind.
    for w in 1..run.len().saturating_sub(1) {
        let (a, b, c) = (resolved[run[w - 1]], resolved[run[w]], resolved[run[w + 1]]);
        if b == BidiClass::EuropeanSeparator
            && a == BidiClass::EuropeanNumber
            && c == BidiClass::EuropeanNumber
        {
            resolved[run[w]] = BidiClass::EuropeanNumber;
        } else if b == BidiClass::CommonSeparator
            && a == c
            && (a == BidiClass::EuropeanNumber || a == BidiClass::ArabicNumber)
        {
            resolved[run[w]] = a;
        }
    }

    // W5: ET sequences adjacent to EN become EN.
    let mut w = 0;
    while w < run.len() {
        if resolved[run[w]] == BidiClass::EuropeanTerminator {
            let mut end = w;
            while end < run.len() && resolved[run[end]] == BidiClass::EuropeanTerminator {
                end += 1;
            }
            let before = w > 0 && resolved[run[w - 1]] == BidiClass::EuropeanNumber;
            let after = end < run.len() && resolved[run[end]] == BidiClass::EuropeanNumber;
            if before || after {
                for &i in &run[w..end] {
                    resolved[i] = BidiClass::EuropeanNumber;
                }
            }
            w = end;
        } else {
            w += 1;
        }
    }

    // W6: leftover separators and terminators become neutral.
    for &i in run {
        if matches!(
            resolved[i],
            BidiClass::EuropeanSeparator
                | BidiClass::EuropeanTerminator
                | BidiClass::CommonSeparator
        ) {
            resolved[i] = BidiClass::OtherNeutral;
        }
    }

    // W7: EN after an L context becomes L.
    let mut last_strong = sos;
    for &i in run {
        match resolved[i] {
            BidiClass::LeftToRight | BidiClass::RightToLeft => last_strong = resolved[i],
            BidiClass::EuropeanNumber if last_strong == BidiClass::LeftToRight => {
                resolved[i] = BidiClass::LeftToRight;
            }
            _ => {}
        }
    }
}

#[inline]
fn neutral_strength(class: BidiClass) -> Option<BidiClass> {
    match class {
        BidiClass::LeftToRight => Some(BidiClass::LeftToRight),
        BidiClass::RightToLeft | BidiClass::EuropeanNumber | BidiClass::ArabicNumber => {
            Some(BidiClass::RightToLeft)
        }
        _ => None,
    }
}

/// Rule N0 over one level run: paired brackets take the direction of their
/// content, or of the surrounding context when the content opposes the
/// embedding direction.
fn resolve_brackets(
    resolved: &mut [BidiClass],
    run: &[usize],
    codepoints: &[CodePoint],
    sos: BidiClass,
    level: u8,
) {
    let tables = PropertyTables::global();

    // BD16: match opening and closing brackets with a bounded stack.
    let mut stack: Vec<(u32, usize)> = Vec::new();
    let mut pairs: Vec<(usize, usize)> = Vec::new();
    for (ri, &i) in run.iter().enumerate() {
        if resolved[i] != BidiClass::OtherNeutral {
            continue;
        }

        let cp = codepoints[i];
        let mirrored = match tables.mirror(cp) {
            Some(m) => m,
            None => continue,
        };

        if tables.general_category(cp) == GeneralCategory::OpenPunctuation {
            if stack.len() == MAX_BRACKET_DEPTH {
                return;
            }
            stack.push((mirrored.value(), ri));
        } else if let Some(top) = stack.iter().rposition(|&(expected, _)| expected == cp.value()) {
            pairs.push((stack[top].1, ri));
            stack.truncate(top);
        }
    }
    pairs.sort_unstable();

    let embedding = direction_class(level);
    for (open, close) in pairs {
        let mut found_embedding = false;
        let mut found_opposite = false;
        for &i in &run[open + 1..close] {
            match neutral_strength(resolved[i]) {
                Some(s) if s == embedding => found_embedding = true,
                Some(_) => found_opposite = true,
                None => {}
            }
        }

        let class = if found_embedding {
            embedding
        } else if found_opposite {
            // An established opposite context before the bracket keeps the
            // pair in that direction, otherwise the embedding wins.
            let mut context = neutral_strength(sos).unwrap_or(embedding);
            for &i in run[..open].iter().rev() {
                if let Some(s) = neutral_strength(resolved[i]) {
                    context = s;
                    break;
                }
            }
            if context != embedding {
                context
            } else {
                embedding
            }
        } else {
            continue;
        };

        resolved[run[open]] = class;
        resolved[run[close]] = class;
    }
}

#[inline]
fn is_neutral(class: BidiClass) -> bool {
    matches!(
        class,
        BidiClass::WhiteSpace
            | BidiClass::OtherNeutral
            | BidiClass::SegmentSeparator
            | BidiClass::ParagraphSeparator
    )
}

/// Rules N1-N2 over one level run. Numbers act as R for this purpose.
fn resolve_neutral(
    resolved: &mut [BidiClass],
    run: &[usize],
    sos: BidiClass,
    eos: BidiClass,
    level: u8,
) {
    let mut w = 0;
    while w < run.len() {
        if !is_neutral(resolved[run[w]]) {
            w += 1;
            continue;
        }

        let mut end = w;
        while end < run.len() && is_neutral(resolved[run[end]]) {
            end += 1;
        }

        let before = if w > 0 {
            neutral_strength(resolved[run[w - 1]])
        } else {
            neutral_strength(sos)
        };
        let after = if end < run.len() {
            neutral_strength(resolved[run[end]])
        } else {
            neutral_strength(eos)
        };

        let class = match (before, after) {
            // N1: equal strong context on both sides.
            (Some(a), Some(b)) if a == b => a,
            // N2: otherwise the embedding direction.
            _ => direction_class(level),
        };
        for &i in &run[w..end] {
            resolved[i] = class;
        }
        w = end;
    }
}

/// Rules I1-I2 over one level run.
fn resolve_implicit(levels: &mut [u8], resolved: &[BidiClass], run: &[usize], level: u8) {
    for &i in run {
        let add = if level % 2 == 0 {
            match resolved[i] {
                BidiClass::RightToLeft => 1,
                BidiClass::EuropeanNumber | BidiClass::ArabicNumber => 2,
                _ => 0,
            }
        } else {
            match resolved[i] {
                BidiClass::LeftToRight
                | BidiClass::EuropeanNumber
                | BidiClass::ArabicNumber => 1,
                _ => 0,
            }
        };
        levels[i] = level + add;
    }
}

/// Returns the visual-to-logical index order for resolved `levels`. Rule L2.
pub fn visual_order(levels: &[u8]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..levels.len()).collect();
    if levels.is_empty() {
        return order;
    }

    let max_level = levels.iter().copied().max().unwrap();
    let min_odd = levels
        .iter()
        .copied()
        .filter(|l| l % 2 == 1)
        .min()
        .unwrap_or(max_level + 1);

    let mut level = max_level;
    while level >= min_odd && level > 0 {
        let mut i = 0;
        while i < order.len() {
            if levels[order[i]] >= level {
                let start = i;
                while i < order.len() && levels[order[i]] >= level {
                    i += 1;
                }
                order[start..i].reverse();
            } else {
                i += 1;
            }
        }
        level -= 1;
    }

    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unicode::props::BidiClass as B;

    #[test]
    fn all_ltr() {
        let classes = [B::LeftToRight, B::LeftToRight, B::WhiteSpace, B::LeftToRight];
        assert_eq!(paragraph_level(&classes), 0);
        assert_eq!(resolve_levels(&classes, &[], 0), [0, 0, 0, 0]);
    }

    #[test]
    fn all_rtl() {
        let classes = [B::ArabicLetter, B::ArabicLetter, B::WhiteSpace, B::RightToLeft];
        assert_eq!(paragraph_level(&classes), 1);
        assert_eq!(resolve_levels(&classes, &[], 1), [1, 1, 1, 1]);
    }

    #[test]
    fn number_in_rtl() {
        // Arabic letter, space, digits: digits run at level 2 inside an RTL paragraph.
        let classes = [B::ArabicLetter, B::WhiteSpace, B::EuropeanNumber, B::EuropeanNumber];
        let levels = resolve_levels(&classes, &[], 1);
        assert_eq!(levels, [1, 1, 2, 2]);
    }

    #[test]
    fn ltr_word_inside_rtl() {
        let classes = [
            B::RightToLeft,
            B::WhiteSpace,
            B::LeftToRight,
            B::LeftToRight,
            B::WhiteSpace,
            B::RightToLeft,
        ];
        let levels = resolve_levels(&classes, &[], 1);
        assert_eq!(levels, [1, 1, 2, 2, 1, 1]);

        let order = visual_order(&levels);
        assert_eq!(order, [5, 4, 2, 3, 1, 0]);
    }

    #[test]
    fn rtl_word_inside_ltr() {
        let classes = [
            B::LeftToRight,
            B::WhiteSpace,
            B::RightToLeft,
            B::RightToLeft,
            B::WhiteSpace,
            B::LeftToRight,
        ];
        let levels = resolve_levels(&classes, &[], 0);
        assert_eq!(levels, [0, 0, 1, 1, 0, 0]);

        let order = visual_order(&levels);
        assert_eq!(order, [0, 1, 3, 2, 4, 5]);
    }

    #[test]
    fn trailing_whitespace_resets() {
        let classes = [B::LeftToRight, B::RightToLeft, B::WhiteSpace];
        let levels = resolve_levels(&classes, &[], 0);
        assert_eq!(levels, [0, 1, 0]);
    }

    #[test]
    fn explicit_override() {
        // RLO forces the following letters to R.
        let classes = [B::LeftToRightOverride, B::LeftToRight, B::PopDirectionalFormat];
        let levels = resolve_levels(&classes, &[], 1);
        assert_eq!(levels[1], 2);

        let classes = [B::RightToLeftOverride, B::LeftToRight, B::PopDirectionalFormat];
        let levels = resolve_levels(&classes, &[], 0);
        assert_eq!(levels[1], 1);
    }

    #[test]
    fn isolate_content_keeps_outer_level() {
        let classes = [
            B::LeftToRight,
            B::RightToLeftIsolate,
            B::RightToLeft,
            B::PopDirectionalIsolate,
            B::LeftToRight,
        ];
        let levels = resolve_levels(&classes, &[], 0);
        assert_eq!(levels[0], 0);
        assert_eq!(levels[2], 1);
        assert_eq!(levels[4], 0);
    }
}
