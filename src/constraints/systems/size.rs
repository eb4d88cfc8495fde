use tracing::trace;

use super::Constraint;
use crate::constraints::context::{ActionType, ConstraintContext};
use crate::constraints::{Pass, Priority};
use crate::geometry::Rect;
use crate::model::window::{AspectRange, WindowState};

/// Snaps the size to `base + n * inc` on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SizeIncrements;

impl Constraint for SizeIncrements {
    fn priority(&self) -> Priority { Priority::SIZE_INCREMENTS }

    fn apply(&self, window: &WindowState, ctx: &mut ConstraintContext, pass: Pass) -> bool {
        if window.maximized || window.fullscreen || ctx.action == ActionType::Move {
            return true;
        }

        let hints = &window.size_hints;
        let width_inc = hints.width_inc.max(1);
        let height_inc = hints.height_inc.max(1);
        let extra_width = (ctx.current.width - hints.base_width).rem_euclid(width_inc);
        let extra_height = (ctx.current.height - hints.base_height).rem_euclid(height_inc);

        let satisfied = extra_width == 0 && extra_height == 0;
        if pass == Pass::Check || satisfied {
            return satisfied;
        }

        let width = snap_down(ctx.current.width - extra_width, hints.min_width, width_inc);
        let height = snap_down(ctx.current.height - extra_height, hints.min_height, height_inc);
        ctx.current.resize_with_gravity(ctx.resize_gravity, width, height);
        true
    }
}

/// Shrinking to a whole increment must not cross the minimum size; if it
/// does, step back up by whole increments until it no longer does.
fn snap_down(snapped: i32, min: i32, inc: i32) -> i32 {
    if snapped >= min {
        return snapped;
    }
    let steps = (min - snapped + inc - 1) / inc;
    snapped + steps * inc
}

/// Keeps the size between the min and max size hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SizeLimits;

impl Constraint for SizeLimits {
    fn priority(&self) -> Priority { Priority::SIZE_LIMITS }

    fn apply(&self, window: &WindowState, ctx: &mut ConstraintContext, pass: Pass) -> bool {
        if ctx.action == ActionType::Move {
            return true;
        }

        let (min, max) = window.size_hints.limits(None);
        let size = ctx.current.size();
        let satisfied = size.could_fit(min) && max.could_fit(size);
        if pass == Pass::Check || satisfied {
            return satisfied;
        }

        let width = size.width.max(min.width).min(max.width);
        let height = size.height.max(min.height).min(max.height);
        ctx.current.resize_with_gravity(ctx.resize_gravity, width, height);
        true
    }
}

/// Keeps width/height within the client's aspect range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AspectRatio;

impl Constraint for AspectRatio {
    fn priority(&self) -> Priority { Priority::ASPECT_RATIO }

    fn apply(&self, window: &WindowState, ctx: &mut ConstraintContext, pass: Pass) -> bool {
        let Some(aspect) = window.size_hints.aspect else {
            return true;
        };
        if !aspect.is_consistent()
            || window.maximized
            || window.fullscreen
            || ctx.action == ActionType::Move
        {
            return true;
        }

        let satisfied = within_aspect(&aspect, &ctx.current);
        if pass == Pass::Check || satisfied {
            return satisfied;
        }

        let (width, height) = pick_aspect_candidate(&aspect, &ctx.orig, &ctx.current);
        trace!(from = %ctx.current, width, height, "correcting aspect ratio");
        ctx.current.resize_with_gravity(ctx.resize_gravity, width, height);
        true
    }
}

fn within_aspect(aspect: &AspectRange, rect: &Rect) -> bool {
    let (w, h) = (rect.width as i64, rect.height as i64);
    let slop_min = if aspect.min.is_integral() { 0 } else { 1 };
    let slop_max = if aspect.max.is_integral() { 0 } else { 1 };
    let min_w = h * aspect.min.numerator as i64 / aspect.min.denominator as i64;
    let max_w = h * aspect.max.numerator as i64 / aspect.max.denominator as i64;
    w >= min_w - slop_min && w <= max_w + slop_max
}

/// Two ways to fix the ratio: keep the height and adjust the width (A), or
/// keep the width and adjust the height (B). When the window is growing
/// neither may end up smaller than `orig`, when shrinking neither may end up
/// larger; of what is left the one nearer in area to `orig` wins.
fn pick_aspect_candidate(aspect: &AspectRange, orig: &Rect, current: &Rect) -> (i32, i32) {
    let (min_n, min_d) = (aspect.min.numerator as i64, aspect.min.denominator as i64);
    let (max_n, max_d) = (aspect.max.numerator as i64, aspect.max.denominator as i64);
    let (w, h) = (current.width as i64, current.height as i64);

    let a_width = w.max(h * min_n / min_d).min(h * max_n / max_d);
    let a = (a_width, h);

    let lowest_height = (w * max_d + max_n - 1) / max_n;
    let highest_height = w * min_d / min_n;
    let b_height = h.max(lowest_height).min(highest_height);
    let b = (w, b_height);

    let reference = orig.area();
    let area = |(cw, ch): (i64, i64)| cw * ch;
    let mut a_valid = true;
    let mut b_valid = true;

    if current.could_fit(orig) {
        a_valid &= area(a) >= reference;
        b_valid &= area(b) >= reference;
    }
    if orig.could_fit(current) {
        a_valid &= area(a) <= reference;
        b_valid &= area(b) <= reference;
    }

    let chosen = match (a_valid, b_valid) {
        (true, true) => {
            if (area(a) - reference).abs() < (area(b) - reference).abs() {
                a
            } else {
                b
            }
        }
        (false, true) => b,
        (true, false) | (false, false) => a,
    };
    (clamp_i32(chosen.0), clamp_i32(chosen.1))
}

fn clamp_i32(v: i64) -> i32 { v.clamp(i32::MIN as i64, i32::MAX as i64) as i32 }
