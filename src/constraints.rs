//! The constraint solver.
//!
//! A move or resize request is first turned into a [`ConstraintContext`].
//! Every constraint then gets a chance to adjust the proposed rect, and a
//! second pass checks whether all of them hold. If they don't, the least
//! important constraints are dropped and the cycle repeats until everything
//! that is left can be met at once.

use serde::Serialize;
use tracing::{debug, instrument, trace};

use crate::common::config::Settings;
use crate::geometry::{Expansion, Rect};
use crate::model::placement::Placement;
use crate::model::screen::ScreenLayout;
use crate::model::window::WindowState;

pub mod context;
pub mod error;
pub mod systems;

pub use context::{ActionType, ConstraintContext, MoveResizeFlags, MoveResizeRequest};
pub use error::ConstraintError;
pub use systems::{Constraint, ConstraintKind};

/// How hard the solver tries to honor a constraint. Constraints whose
/// priority is below the current threshold are considered met.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct Priority(u8);

impl Priority {
    pub const MIN: Priority = Priority(0);
    pub const ASPECT_RATIO: Priority = Priority(0);
    pub const SINGLE_MONITOR: Priority = Priority(0);
    pub const FULLY_ONSCREEN: Priority = Priority(1);
    pub const SIZE_INCREMENTS: Priority = Priority(1);
    pub const MAXIMIZATION: Priority = Priority(2);
    pub const FULLSCREEN: Priority = Priority(2);
    pub const SIZE_LIMITS: Priority = Priority(3);
    pub const PARTIALLY_ONSCREEN: Priority = Priority(4);
    pub const MAX: Priority = Priority(4);

    pub fn get(self) -> u8 { self.0 }

    /// Every threshold from `MIN` to `MAX`, in the order the solver tries them.
    pub fn levels() -> impl Iterator<Item = Priority> { (Self::MIN.0..=Self::MAX.0).map(Priority) }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    /// Adjust the rect so the constraint holds, if possible.
    Enforce,
    /// Only report whether the constraint holds.
    Check,
}

/// Result of one solve.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Constrained {
    pub rect: Rect,
    /// The threshold at which everything still in play was satisfied.
    pub threshold: Priority,
    /// False if even the highest threshold left something unsatisfied.
    pub satisfied: bool,
}

#[derive(Debug, Clone)]
pub struct ConstraintSolver {
    constraints: Vec<ConstraintKind>,
}

impl ConstraintSolver {
    pub fn new(settings: &Settings) -> ConstraintSolver {
        ConstraintSolver {
            constraints: systems::default_constraints(settings),
        }
    }

    pub fn with_constraints(constraints: Vec<ConstraintKind>) -> ConstraintSolver {
        ConstraintSolver { constraints }
    }

    pub fn constraints(&self) -> &[ConstraintKind] { &self.constraints }

    /// Constraints still in play at `threshold`.
    pub fn active(&self, threshold: Priority) -> impl Iterator<Item = &ConstraintKind> {
        self.constraints.iter().filter(move |c| c.priority() >= threshold)
    }

    /// Works out where the window should go for `request`.
    ///
    /// Updates the window's placement and onscreen-requirement flags as a
    /// side effect.
    #[instrument(name = "constraints::constrain", skip_all, fields(window = %window.id))]
    pub fn constrain<S, P>(
        &self,
        window: &mut WindowState,
        screen: &S,
        placement: &mut P,
        request: &MoveResizeRequest,
    ) -> Result<Constrained, ConstraintError>
    where
        S: ScreenLayout,
        P: Placement + ?Sized,
    {
        let mut ctx = ConstraintContext::new(window, screen, request)?;
        place_window_if_needed(window, &mut ctx, screen, placement);

        let mut threshold = Priority::MIN;
        let mut satisfied = false;
        for level in Priority::levels() {
            threshold = level;
            self.run(window, &mut ctx, level, Pass::Enforce);
            satisfied = self.run(window, &mut ctx, level, Pass::Check);
            if satisfied {
                break;
            }
        }

        update_onscreen_requirements(window, &ctx);

        debug!(rect = %ctx.current, threshold = threshold.get(), satisfied, "constrained");
        Ok(Constrained {
            rect: ctx.current,
            threshold,
            satisfied,
        })
    }

    fn run(&self, window: &WindowState, ctx: &mut ConstraintContext, threshold: Priority, pass: Pass) -> bool {
        match pass {
            Pass::Enforce => {
                for constraint in &self.constraints {
                    constraint.evaluate(window, ctx, threshold, pass);
                    trace!(constraint = constraint.name(), rect = %ctx.current, "enforced");
                }
                true
            }
            Pass::Check => self.constraints.iter().all(|constraint| {
                let ok = constraint.evaluate(window, ctx, threshold, pass);
                if !ok {
                    debug!(
                        constraint = constraint.name(),
                        threshold = threshold.get(),
                        "constraint not satisfied"
                    );
                }
                ok
            }),
        }
    }
}

/// Lets the placement policy position a window the first time it is mapped,
/// then maximizes it if that was requested.
fn place_window_if_needed<S, P>(
    window: &mut WindowState,
    ctx: &mut ConstraintContext,
    screen: &S,
    placement: &mut P,
) where
    S: ScreenLayout,
    P: Placement + ?Sized,
{
    if !window.placed && window.calc_placement && !window.maximized && !window.fullscreen {
        let (x, y) = placement.place(window, &ctx.frame, ctx.orig, screen);
        let placed = Rect { x, y, ..ctx.orig };

        // The window may have landed on another monitor.
        if let Some(monitor) = screen.monitor_for_rect(&ctx.frame.extend(placed)) {
            ctx.entire_monitor = monitor.rect;
            ctx.work_area_monitor = screen.monitor_work_area(monitor.index);
        }

        ctx.current.x = x;
        ctx.current.y = y;
        ctx.fixed_directions = Default::default();
        window.placed = true;
        debug!(window = %window.id, x, y, "placed window");
    }

    if window.maximize_after_placement && window.placed {
        window.maximize_after_placement = false;

        let area = ctx.work_area_monitor;
        if ctx.current.could_fit(&area) {
            // Leave something sensible to unmaximize to.
            ctx.current = Rect::new(
                area.x + (area.width as f64 * 0.125) as i32,
                area.y + (area.height as f64 * 0.083) as i32,
                (area.width as f64 * 0.75) as i32,
                (area.height as f64 * 0.75) as i32,
            );
        }

        window.saved_rect = Some(ctx.current);
        window.maximized = true;
        debug!(window = %window.id, saved = %ctx.current, "maximizing after placement");
    }
}

/// Windows that end up fully on screen, or on one monitor, are held there by
/// later solves; windows the user put elsewhere are left alone.
fn update_onscreen_requirements(window: &mut WindowState, ctx: &ConstraintContext) {
    let outer = ctx.outer();

    let fully_onscreen = ctx.onscreen_region(Expansion::NONE).contains(&outer);
    if fully_onscreen != window.require_fully_onscreen {
        debug!(window = %window.id, fully_onscreen, "require_fully_onscreen changed");
    }
    window.require_fully_onscreen = fully_onscreen;

    let single_monitor = ctx.entire_monitor.contains(&outer);
    if single_monitor != window.require_on_single_monitor {
        debug!(window = %window.id, single_monitor, "require_on_single_monitor changed");
    }
    window.require_on_single_monitor = single_monitor;
}
