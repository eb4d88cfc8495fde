use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum_macros::Display;
use tracing::{debug, error};

use super::error::ConstraintError;
use crate::geometry::{Expansion, FixedDirections, Gravity, Rect, SpanningSet};
use crate::model::screen::ScreenLayout;
use crate::model::window::{FrameExtents, WindowState};

bitflags! {
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
    pub struct MoveResizeFlags: u8 {
        const MOVE        = 1 << 0;
        const RESIZE      = 1 << 1;
        const USER_ACTION = 1 << 2;
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ActionType {
    Move,
    Resize,
    MoveAndResize,
}

impl ActionType {
    pub fn from_flags(flags: MoveResizeFlags) -> Option<ActionType> {
        let moving = flags.contains(MoveResizeFlags::MOVE);
        let resizing = flags.contains(MoveResizeFlags::RESIZE);
        match (moving, resizing) {
            (true, true) => Some(ActionType::MoveAndResize),
            (false, true) => Some(ActionType::Resize),
            (true, false) => Some(ActionType::Move),
            (false, false) => None,
        }
    }
}

/// A pending change of a window's client rect from `orig` to `new`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveResizeRequest {
    pub frame: Option<FrameExtents>,
    pub flags: MoveResizeFlags,
    pub gravity: Gravity,
    pub orig: Rect,
    pub new: Rect,
}

impl MoveResizeRequest {
    pub fn new(flags: MoveResizeFlags, orig: Rect, new: Rect) -> MoveResizeRequest {
        MoveResizeRequest {
            frame: None,
            flags,
            gravity: Gravity::default(),
            orig,
            new,
        }
    }

    pub fn with_frame(self, frame: FrameExtents) -> MoveResizeRequest {
        MoveResizeRequest { frame: Some(frame), ..self }
    }

    pub fn with_gravity(self, gravity: Gravity) -> MoveResizeRequest {
        MoveResizeRequest { gravity, ..self }
    }
}

/// Everything the individual constraints need for one solve.
///
/// `current` starts as the requested rect and is refined in place by each
/// enforcement; the rest is fixed once setup (and placement) is done.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintContext {
    pub orig: Rect,
    pub current: Rect,
    pub frame: FrameExtents,
    pub action: ActionType,
    pub is_user_action: bool,
    pub resize_gravity: Gravity,
    pub fixed_directions: FixedDirections,
    /// Current monitor minus struts.
    pub work_area_monitor: Rect,
    /// All monitors minus struts.
    pub work_area_screen: Rect,
    /// Current monitor including struts.
    pub entire_monitor: Rect,
    pub screen: Rect,
    pub struts: Vec<Rect>,
}

impl ConstraintContext {
    pub fn new<S>(
        window: &WindowState,
        screen: &S,
        request: &MoveResizeRequest,
    ) -> Result<ConstraintContext, ConstraintError>
    where
        S: ScreenLayout + ?Sized,
    {
        let Some(action) = ActionType::from_flags(request.flags) else {
            error!(window = %window.id, flags = ?request.flags, "move/resize request without an action");
            return Err(ConstraintError::NoAction(request.flags));
        };

        // Fullscreen windows have no visible decorations.
        let frame = match request.frame {
            Some(frame) if !window.fullscreen => frame,
            _ => FrameExtents::default(),
        };

        let is_user_action = request.flags.contains(MoveResizeFlags::USER_ACTION);
        let resize_gravity = if is_user_action && action == ActionType::Resize {
            Gravity::infer_user_resize(&request.orig, &request.new)
        } else {
            request.gravity
        };

        let monitor = screen
            .monitor_for_rect(&frame.extend(request.orig))
            .ok_or(ConstraintError::NoMonitors(window.id))?;

        let ctx = ConstraintContext {
            orig: request.orig,
            current: request.new,
            frame,
            action,
            is_user_action,
            resize_gravity,
            fixed_directions: fixed_directions(&request.orig, &request.new),
            work_area_monitor: screen.monitor_work_area(monitor.index),
            work_area_screen: screen.all_monitors_work_area(),
            entire_monitor: monitor.rect,
            screen: screen.screen_rect(),
            struts: screen.struts().iter().map(|s| s.rect).collect(),
        };

        debug!(
            window = %window.id,
            %action,
            is_user_action,
            gravity = %ctx.resize_gravity,
            fixed = ?ctx.fixed_directions,
            orig = %ctx.orig,
            new = %ctx.current,
            monitor = monitor.index,
            work_area = %ctx.work_area_monitor,
            "set up constraint context"
        );
        Ok(ctx)
    }

    /// `current` including decorations.
    pub fn outer(&self) -> Rect { self.frame.extend(self.current) }

    pub fn set_outer(&mut self, outer: Rect) { self.current = self.frame.unextend(outer); }

    /// The whole screen minus struts, grown by `expansion`.
    pub fn onscreen_region(&self, expansion: Expansion) -> SpanningSet {
        SpanningSet::for_region(self.screen, self.struts.iter().copied(), expansion)
    }

    /// The current monitor minus struts.
    pub fn monitor_region(&self) -> SpanningSet {
        SpanningSet::for_region(self.entire_monitor, self.struts.iter().copied(), Expansion::NONE)
    }
}

/// An axis is fixed when both of its edges stay put while an edge on the
/// other axis moves.
pub fn fixed_directions(orig: &Rect, new: &Rect) -> FixedDirections {
    let x_same = orig.x == new.x && orig.right() == new.right();
    let y_same = orig.y == new.y && orig.bottom() == new.bottom();
    match (x_same, y_same) {
        (true, false) => FixedDirections::X,
        (false, true) => FixedDirections::Y,
        _ => FixedDirections::empty(),
    }
}
