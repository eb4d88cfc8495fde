use super::Constraint;
use crate::constraints::context::ConstraintContext;
use crate::constraints::{Pass, Priority};
use crate::geometry::Rect;
use crate::model::window::WindowState;

/// Keeps a maximized window covering the work area of its monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Maximization;

impl Constraint for Maximization {
    fn priority(&self) -> Priority { Priority::MAXIMIZATION }

    fn apply(&self, window: &WindowState, ctx: &mut ConstraintContext, pass: Pass) -> bool {
        if !window.maximized {
            return true;
        }
        let target = ctx.frame.unextend(ctx.work_area_monitor);
        if !honors_size_hints(window, &target) {
            return true;
        }
        fill(ctx, target, pass)
    }
}

/// Keeps a fullscreen window covering its whole monitor, struts included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Fullscreen;

impl Constraint for Fullscreen {
    fn priority(&self) -> Priority { Priority::FULLSCREEN }

    fn apply(&self, window: &WindowState, ctx: &mut ConstraintContext, pass: Pass) -> bool {
        if !window.fullscreen {
            return true;
        }
        let target = ctx.entire_monitor;
        if !honors_size_hints(window, &target) {
            return true;
        }
        fill(ctx, target, pass)
    }
}

/// Whether `target` lies within the window's min/max size hints. If not, the
/// constraint cannot be met and is skipped rather than forcing a bad size.
fn honors_size_hints(window: &WindowState, target: &Rect) -> bool {
    let (min, max) = window.size_hints.limits(None);
    target.size().could_fit(min) && max.could_fit(target.size())
}

fn fill(ctx: &mut ConstraintContext, target: Rect, pass: Pass) -> bool {
    let satisfied = ctx.current == target;
    if pass == Pass::Check || satisfied {
        return satisfied;
    }
    ctx.current = target;
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::context::{MoveResizeFlags, MoveResizeRequest};
    use crate::model::screen::{Side, StaticScreen, Strut};
    use crate::model::window::{FrameExtents, WindowId};

    fn setup(window: &WindowState, rect: Rect) -> ConstraintContext {
        let screen = StaticScreen::new(
            vec![Rect::new(0, 0, 1600, 1200)],
            vec![Strut { side: Side::Top, rect: Rect::new(0, 0, 1600, 20) }],
        );
        let frame = FrameExtents { left: 2, right: 2, top: 20, bottom: 2 };
        let request = MoveResizeRequest::new(MoveResizeFlags::MOVE | MoveResizeFlags::RESIZE, rect, rect)
            .with_frame(frame);
        ConstraintContext::new(window, &screen, &request).unwrap()
    }

    #[test]
    fn maximized_window_fills_work_area_inside_frame() {
        let mut window = WindowState::new(WindowId::new(1));
        window.maximized = true;
        let mut ctx = setup(&window, Rect::new(100, 100, 300, 200));

        assert!(!Maximization.apply(&window, &mut ctx, Pass::Check));
        assert!(Maximization.apply(&window, &mut ctx, Pass::Enforce));
        assert_eq!(ctx.current, Rect::new(2, 40, 1596, 1158));
        assert_eq!(ctx.outer(), Rect::new(0, 20, 1600, 1180));
        assert!(Maximization.apply(&window, &mut ctx, Pass::Check));
    }

    #[test]
    fn maximization_skipped_when_min_size_exceeds_work_area() {
        let mut window = WindowState::new(WindowId::new(1));
        window.maximized = true;
        window.size_hints.min_height = 1190;
        let mut ctx = setup(&window, Rect::new(100, 100, 300, 200));
        assert!(Maximization.apply(&window, &mut ctx, Pass::Enforce));
        assert_eq!(ctx.current, Rect::new(100, 100, 300, 200));
    }

    #[test]
    fn fullscreen_covers_struts() {
        let mut window = WindowState::new(WindowId::new(1));
        window.fullscreen = true;
        let mut ctx = setup(&window, Rect::new(100, 100, 300, 200));
        assert_eq!(ctx.frame, FrameExtents::default());

        assert!(Fullscreen.apply(&window, &mut ctx, Pass::Enforce));
        assert_eq!(ctx.current, Rect::new(0, 0, 1600, 1200));
    }

    #[test]
    fn fullscreen_skipped_when_max_size_is_smaller_than_monitor() {
        let mut window = WindowState::new(WindowId::new(1));
        window.fullscreen = true;
        window.size_hints.max_width = 800;
        let mut ctx = setup(&window, Rect::new(100, 100, 300, 200));
        assert!(Fullscreen.apply(&window, &mut ctx, Pass::Check));
        assert_eq!(ctx.current, Rect::new(100, 100, 300, 200));
    }

    #[test]
    fn plain_window_is_untouched() {
        let window = WindowState::new(WindowId::new(1));
        let mut ctx = setup(&window, Rect::new(100, 100, 300, 200));
        assert!(Maximization.apply(&window, &mut ctx, Pass::Enforce));
        assert!(Fullscreen.apply(&window, &mut ctx, Pass::Enforce));
        assert_eq!(ctx.current, Rect::new(100, 100, 300, 200));
    }
}
