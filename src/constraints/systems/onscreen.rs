use tracing::{trace, warn};

use super::Constraint;
use crate::common::config::OffscreenSettings;
use crate::constraints::context::{ActionType, ConstraintContext};
use crate::constraints::{Pass, Priority};
use crate::geometry::{Expansion, FixedDirections, SpanningSet};
use crate::model::window::WindowState;

/// Keeps windows that started out on one monitor from straddling two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SingleMonitor;

impl Constraint for SingleMonitor {
    fn priority(&self) -> Priority { Priority::SINGLE_MONITOR }

    fn apply(&self, window: &WindowState, ctx: &mut ConstraintContext, pass: Pass) -> bool {
        if !window.require_on_single_monitor || ctx.is_user_action {
            return true;
        }
        let region = ctx.monitor_region();
        constrain_to_region(window, ctx, &region, pass)
    }
}

/// Keeps windows that are fully visible from being pushed under a strut or
/// off the screen by the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FullyOnscreen;

impl Constraint for FullyOnscreen {
    fn priority(&self) -> Priority { Priority::FULLY_ONSCREEN }

    fn apply(&self, window: &WindowState, ctx: &mut ConstraintContext, pass: Pass) -> bool {
        // Users may drag windows partly offscreen, but their resizes are
        // still held in.
        if !window.require_fully_onscreen
            || (ctx.is_user_action && ctx.action != ActionType::Resize)
        {
            return true;
        }
        let region = ctx.onscreen_region(Expansion::NONE);
        constrain_to_region(window, ctx, &region, pass)
    }
}

/// Always leaves a grabbable part of the window visible.
#[derive(Debug, Clone, PartialEq)]
pub struct PartiallyOnscreen {
    margins: OffscreenSettings,
}

impl PartiallyOnscreen {
    pub fn new(margins: OffscreenSettings) -> PartiallyOnscreen { PartiallyOnscreen { margins } }

    fn visible_amount(&self, extent: i32) -> i32 {
        let amount = (extent as f64 * self.margins.fraction) as i32;
        amount.min(self.margins.max_margin).max(self.margins.min_margin)
    }
}

impl Constraint for PartiallyOnscreen {
    fn priority(&self) -> Priority { Priority::PARTIALLY_ONSCREEN }

    fn apply(&self, window: &WindowState, ctx: &mut ConstraintContext, pass: Pass) -> bool {
        let outer = ctx.outer();
        let horizontal = self.visible_amount(ctx.current.width);
        let vertical = self.visible_amount(ctx.current.height);
        // Everything but the visible amount may hang off each side.
        let expansion =
            Expansion::symmetric((outer.width - horizontal).max(0), (outer.height - vertical).max(0));

        let region = ctx.onscreen_region(expansion);
        constrain_to_region(window, ctx, &region, pass)
    }
}

/// Shared enforcement for the region-based constraints. Works on the rect
/// including its frame.
fn constrain_to_region(
    window: &WindowState,
    ctx: &mut ConstraintContext,
    region: &SpanningSet,
    pass: Pass,
) -> bool {
    trace!(%region, "constraining to region");

    let (min_size, _) = window.size_hints.limits(Some(&ctx.frame));
    let mut outer = ctx.outer();

    // The smallest the window could become along the axes we may resize.
    let mut smushed = outer;
    if ctx.action != ActionType::Move {
        if !ctx.fixed_directions.contains(FixedDirections::X) {
            smushed.width = min_size.width;
        }
        if !ctx.fixed_directions.contains(FixedDirections::Y) {
            smushed.height = min_size.height;
        }
    }
    if !region.could_fit(&smushed) {
        trace!(%smushed, "cannot fit even at minimum size, giving up");
        return true;
    }

    let satisfied = region.contains(&outer);
    if pass == Pass::Check || satisfied {
        return satisfied;
    }

    if ctx.action != ActionType::Move {
        if let Err(err) = region.clamp_to_fit(ctx.fixed_directions, &mut outer, min_size) {
            warn!(window = %window.id, %err, "clamping to region fell back to minimum size");
        }
    }

    let placed = if ctx.is_user_action && ctx.action == ActionType::Resize {
        region.clip(ctx.fixed_directions, &mut outer)
    } else {
        region.shove(ctx.fixed_directions, &mut outer)
    };
    if let Err(err) = placed {
        warn!(window = %window.id, %err, "could not move window into region");
    }

    ctx.set_outer(outer);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::context::{MoveResizeFlags, MoveResizeRequest};
    use crate::geometry::Rect;
    use crate::model::screen::{Side, StaticScreen, Strut};
    use crate::model::window::{FrameExtents, WindowId};

    fn screen() -> StaticScreen {
        StaticScreen::new(
            vec![Rect::new(0, 0, 1600, 1200), Rect::new(1600, 0, 1600, 1200)],
            vec![
                Strut { side: Side::Top, rect: Rect::new(0, 0, 3200, 20) },
                Strut {
                    side: Side::Bottom,
                    rect: Rect::new(0, 1160, 1600, 40),
                },
            ],
        )
    }

    fn setup(flags: MoveResizeFlags, orig: Rect, new: Rect) -> ConstraintContext {
        let window = WindowState::new(WindowId::new(1));
        let request = MoveResizeRequest::new(flags, orig, new)
            .with_frame(FrameExtents { left: 0, right: 0, top: 10, bottom: 0 });
        ConstraintContext::new(&window, &screen(), &request).unwrap()
    }

    fn partially() -> PartiallyOnscreen { PartiallyOnscreen::new(OffscreenSettings::default()) }

    #[test]
    fn app_move_under_strut_is_shoved_out() {
        let window = WindowState::new(WindowId::new(1));
        let orig = Rect::new(100, 100, 400, 300);
        let mut ctx = setup(MoveResizeFlags::MOVE, orig, Rect::new(100, 5, 400, 300));

        assert!(!FullyOnscreen.apply(&window, &mut ctx, Pass::Check));
        assert!(FullyOnscreen.apply(&window, &mut ctx, Pass::Enforce));
        // frame top sits right under the strut
        assert_eq!(ctx.current, Rect::new(100, 30, 400, 300));
        assert!(FullyOnscreen.apply(&window, &mut ctx, Pass::Check));
    }

    #[test]
    fn user_move_may_leave_the_screen_partly() {
        let window = WindowState::new(WindowId::new(1));
        let orig = Rect::new(100, 100, 400, 300);
        let new = Rect::new(-200, 100, 400, 300);
        let mut ctx = setup(MoveResizeFlags::MOVE | MoveResizeFlags::USER_ACTION, orig, new);
        assert!(FullyOnscreen.apply(&window, &mut ctx, Pass::Enforce));
        assert!(SingleMonitor.apply(&window, &mut ctx, Pass::Enforce));
        assert!(partially().apply(&window, &mut ctx, Pass::Enforce));
        assert_eq!(ctx.current, new);
    }

    #[test]
    fn user_move_far_offscreen_keeps_a_margin_visible() {
        let window = WindowState::new(WindowId::new(1));
        let orig = Rect::new(100, 100, 400, 300);
        let mut ctx = setup(
            MoveResizeFlags::MOVE | MoveResizeFlags::USER_ACTION,
            orig,
            Rect::new(-5000, 100, 400, 300),
        );
        assert!(!partially().apply(&window, &mut ctx, Pass::Check));
        assert!(partially().apply(&window, &mut ctx, Pass::Enforce));
        // 25% of 400 is 100, capped at 75 pixels left showing
        assert_eq!(ctx.current, Rect::new(-325, 100, 400, 300));
        assert_eq!(ctx.current.right(), 75);
        assert!(partially().apply(&window, &mut ctx, Pass::Check));
    }

    #[test]
    fn small_windows_keep_the_minimum_margin() {
        let p = partially();
        assert_eq!(p.visible_amount(20), 10);
        assert_eq!(p.visible_amount(200), 50);
        assert_eq!(p.visible_amount(2000), 75);
    }

    #[test]
    fn user_resize_into_strut_is_clipped() {
        let window = WindowState::new(WindowId::new(1));
        let orig = Rect::new(100, 600, 400, 300);
        // dragging the bottom edge down into the bottom panel
        let new = Rect::new(100, 600, 400, 700);
        let mut ctx = setup(MoveResizeFlags::RESIZE | MoveResizeFlags::USER_ACTION, orig, new);
        assert_eq!(ctx.fixed_directions, FixedDirections::X);

        assert!(FullyOnscreen.apply(&window, &mut ctx, Pass::Enforce));
        assert_eq!(ctx.current, Rect::new(100, 600, 400, 560));
        assert_eq!(ctx.outer().bottom(), 1160);
    }

    #[test]
    fn app_resize_onto_second_monitor_is_held_on_the_first() {
        let window = WindowState::new(WindowId::new(1));
        let orig = Rect::new(1000, 100, 400, 300);
        let new = Rect::new(1000, 100, 800, 300);
        let mut ctx = setup(MoveResizeFlags::RESIZE, orig, new);
        assert_eq!(ctx.entire_monitor, Rect::new(0, 0, 1600, 1200));

        assert!(!SingleMonitor.apply(&window, &mut ctx, Pass::Check));
        assert!(SingleMonitor.apply(&window, &mut ctx, Pass::Enforce));
        assert_eq!(ctx.current, Rect::new(800, 100, 800, 300));
    }

    #[test]
    fn impossible_fit_reports_satisfied() {
        let mut window = WindowState::new(WindowId::new(1));
        window.size_hints.min_height = 1500;
        let orig = Rect::new(0, 100, 400, 300);
        let new = Rect::new(0, 100, 400, 1500);
        let mut ctx = setup(MoveResizeFlags::RESIZE, orig, new);
        assert!(FullyOnscreen.apply(&window, &mut ctx, Pass::Check));
        assert!(FullyOnscreen.apply(&window, &mut ctx, Pass::Enforce));
        assert_eq!(ctx.current, new);
    }

    #[test]
    fn flags_turn_constraints_off() {
        let mut window = WindowState::new(WindowId::new(1));
        window.require_fully_onscreen = false;
        window.require_on_single_monitor = false;
        let orig = Rect::new(100, 100, 400, 300);
        let new = Rect::new(100, 5, 400, 300);
        let mut ctx = setup(MoveResizeFlags::MOVE, orig, new);
        assert!(FullyOnscreen.apply(&window, &mut ctx, Pass::Check));
        assert!(SingleMonitor.apply(&window, &mut ctx, Pass::Check));
        assert_eq!(ctx.current, new);
    }
}
