use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::{Rect, Size};

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowId(u64);

impl WindowId {
    pub fn new(id: u64) -> WindowId { WindowId(id) }

    pub fn get(&self) -> u64 { self.0 }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{:#x}", self.0) }
}

/// The parts of a managed window the constraint solver reads and updates.
///
/// The solver owns none of this; the window manager keeps it across calls.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct WindowState {
    pub id: WindowId,
    #[serde(default)]
    pub size_hints: SizeHints,
    #[serde(default)]
    pub maximized: bool,
    #[serde(default)]
    pub fullscreen: bool,
    /// Set once the placement policy has positioned the window.
    #[serde(default)]
    pub placed: bool,
    /// Whether the placement policy should choose a position on the next
    /// constrain call.
    #[serde(default)]
    pub calc_placement: bool,
    #[serde(default)]
    pub maximize_after_placement: bool,
    #[serde(default = "yes")]
    pub require_fully_onscreen: bool,
    #[serde(default = "yes")]
    pub require_on_single_monitor: bool,
    /// Geometry to restore when the window is unmaximized.
    #[serde(default)]
    pub saved_rect: Option<Rect>,
}

impl WindowState {
    pub fn new(id: WindowId) -> WindowState {
        WindowState {
            id,
            size_hints: SizeHints::default(),
            maximized: false,
            fullscreen: false,
            placed: false,
            calc_placement: false,
            maximize_after_placement: false,
            require_fully_onscreen: true,
            require_on_single_monitor: true,
            saved_rect: None,
        }
    }
}

/// Client size hints, already normalized so every field has a usable value.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SizeHints {
    #[serde(default = "one")]
    pub min_width: i32,
    #[serde(default = "one")]
    pub min_height: i32,
    #[serde(default = "unbounded")]
    pub max_width: i32,
    #[serde(default = "unbounded")]
    pub max_height: i32,
    #[serde(default)]
    pub base_width: i32,
    #[serde(default)]
    pub base_height: i32,
    #[serde(default = "one")]
    pub width_inc: i32,
    #[serde(default = "one")]
    pub height_inc: i32,
    #[serde(default)]
    pub aspect: Option<AspectRange>,
}

impl Default for SizeHints {
    fn default() -> Self {
        SizeHints {
            min_width: 1,
            min_height: 1,
            max_width: i32::MAX,
            max_height: i32::MAX,
            base_width: 0,
            base_height: 0,
            width_inc: 1,
            height_inc: 1,
            aspect: None,
        }
    }
}

impl SizeHints {
    /// Minimum and maximum size, optionally measured around the frame.
    pub fn limits(&self, frame: Option<&FrameExtents>) -> (Size, Size) {
        let (extra_w, extra_h) = frame.map_or((0, 0), |f| (f.horizontal(), f.vertical()));
        let min = Size::new(
            self.min_width.saturating_add(extra_w),
            self.min_height.saturating_add(extra_h),
        );
        let max = Size::new(
            self.max_width.saturating_add(extra_w),
            self.max_height.saturating_add(extra_h),
        );
        (min, max)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ratio {
    pub numerator: i32,
    pub denominator: i32,
}

impl Ratio {
    pub const fn new(numerator: i32, denominator: i32) -> Ratio { Ratio { numerator, denominator } }

    pub fn is_integral(&self) -> bool {
        self.denominator != 0 && self.numerator % self.denominator == 0
    }
}

/// Allowed width/height ratios, inclusive.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AspectRange {
    pub min: Ratio,
    pub max: Ratio,
}

impl AspectRange {
    /// Ratios with a non-positive term or `min > max` cannot be honored.
    pub fn is_consistent(&self) -> bool {
        let positive = |r: &Ratio| r.numerator > 0 && r.denominator > 0;
        positive(&self.min)
            && positive(&self.max)
            && self.min.numerator as i64 * self.max.denominator as i64
                <= self.max.numerator as i64 * self.min.denominator as i64
    }
}

/// Decoration thickness on each side of the client area.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct FrameExtents {
    #[serde(default)]
    pub left: i32,
    #[serde(default)]
    pub right: i32,
    #[serde(default)]
    pub top: i32,
    #[serde(default)]
    pub bottom: i32,
}

impl FrameExtents {
    pub fn horizontal(&self) -> i32 { self.left.saturating_add(self.right) }

    pub fn vertical(&self) -> i32 { self.top.saturating_add(self.bottom) }

    /// Client rect to outer rect.
    pub fn extend(&self, client: Rect) -> Rect {
        Rect::new(
            client.x.saturating_sub(self.left),
            client.y.saturating_sub(self.top),
            client.width.saturating_add(self.horizontal()),
            client.height.saturating_add(self.vertical()),
        )
    }

    /// Outer rect to client rect.
    pub fn unextend(&self, outer: Rect) -> Rect {
        Rect::new(
            outer.x.saturating_add(self.left),
            outer.y.saturating_add(self.top),
            outer.width.saturating_sub(self.horizontal()),
            outer.height.saturating_sub(self.vertical()),
        )
    }
}

fn yes() -> bool { true }

fn one() -> i32 { 1 }

fn unbounded() -> i32 { i32::MAX }
