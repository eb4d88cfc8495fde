use enum_dispatch::enum_dispatch;
use strum_macros::IntoStaticStr;

use super::context::ConstraintContext;
use super::{Pass, Priority};
use crate::common::config::Settings;
use crate::model::window::WindowState;

/// One rule about where a window may go or how big it may be.
///
/// `apply` reports whether the rule is satisfied. In the enforce pass it also
/// adjusts `ctx.current` first. A rule that does not apply to this window or
/// action, or that cannot possibly be met, reports satisfied.
#[enum_dispatch]
pub trait Constraint {
    fn priority(&self) -> Priority;

    fn apply(&self, window: &WindowState, ctx: &mut ConstraintContext, pass: Pass) -> bool;
}

mod onscreen;
pub use onscreen::{FullyOnscreen, PartiallyOnscreen, SingleMonitor};
mod size;
pub use size::{AspectRatio, SizeIncrements, SizeLimits};
mod state;
pub use state::{Fullscreen, Maximization};

#[derive(Debug, Clone, PartialEq, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
#[enum_dispatch(Constraint)]
pub enum ConstraintKind {
    Maximization(Maximization),
    Fullscreen(Fullscreen),
    SizeIncrements(SizeIncrements),
    SizeLimits(SizeLimits),
    AspectRatio(AspectRatio),
    SingleMonitor(SingleMonitor),
    FullyOnscreen(FullyOnscreen),
    PartiallyOnscreen(PartiallyOnscreen),
}

impl ConstraintKind {
    pub fn name(&self) -> &'static str { self.into() }

    /// Runs the constraint unless `threshold` has already dropped it.
    pub fn evaluate(
        &self,
        window: &WindowState,
        ctx: &mut ConstraintContext,
        threshold: Priority,
        pass: Pass,
    ) -> bool {
        if self.priority() < threshold {
            return true;
        }
        self.apply(window, ctx, pass)
    }
}

/// The constraints in the order they run: window state first, then size,
/// then position, so position sees final sizes.
pub fn default_constraints(settings: &Settings) -> Vec<ConstraintKind> {
    let mut constraints = vec![
        ConstraintKind::from(Maximization),
        ConstraintKind::from(Fullscreen),
        ConstraintKind::from(SizeIncrements),
        ConstraintKind::from(SizeLimits),
    ];
    if settings.enforce_aspect_ratio {
        constraints.push(AspectRatio.into());
    }
    constraints.extend([
        SingleMonitor.into(),
        FullyOnscreen.into(),
        PartiallyOnscreen::new(settings.offscreen.clone()).into(),
    ]);
    constraints
}
