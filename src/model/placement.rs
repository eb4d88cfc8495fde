use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use super::screen::ScreenLayout;
use super::window::{FrameExtents, WindowState};
use crate::geometry::Rect;

/// Chooses the initial position of a window that has not been placed yet.
///
/// `rect` is the client rect the window asked for; the returned point is the
/// new client origin.
pub trait Placement {
    fn place(
        &mut self,
        window: &WindowState,
        frame: &FrameExtents,
        rect: Rect,
        screen: &dyn ScreenLayout,
    ) -> (i32, i32);
}

impl<F> Placement for F
where
    F: FnMut(&WindowState, &FrameExtents, Rect, &dyn ScreenLayout) -> (i32, i32),
{
    fn place(
        &mut self,
        window: &WindowState,
        frame: &FrameExtents,
        rect: Rect,
        screen: &dyn ScreenLayout,
    ) -> (i32, i32) {
        self(window, frame, rect, screen)
    }
}

/// Leaves the window where the client asked for it.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeepPosition;

impl Placement for KeepPosition {
    fn place(&mut self, _: &WindowState, _: &FrameExtents, rect: Rect, _: &dyn ScreenLayout) -> (i32, i32) {
        (rect.x, rect.y)
    }
}

/// Centers the framed window on the work area of the monitor it is on.
#[derive(Debug, Clone, Copy, Default)]
pub struct CenterPlacement;

impl Placement for CenterPlacement {
    fn place(
        &mut self,
        _: &WindowState,
        frame: &FrameExtents,
        rect: Rect,
        screen: &dyn ScreenLayout,
    ) -> (i32, i32) {
        let outer = frame.extend(rect);
        let Some(monitor) = screen.monitor_for_rect(&outer) else {
            return (rect.x, rect.y);
        };
        let area = screen.monitor_work_area(monitor.index);
        let x = area.x + (area.width - outer.width) / 2;
        let y = area.y + (area.height - outer.height) / 2;
        // Oversized windows keep their top-left corner on the work area.
        (x.max(area.x) + frame.left, y.max(area.y) + frame.top)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PlacementPolicy {
    #[default]
    Center,
    KeepPosition,
}

impl PlacementPolicy {
    pub fn placement(self) -> Box<dyn Placement> {
        match self {
            PlacementPolicy::Center => Box::new(CenterPlacement),
            PlacementPolicy::KeepPosition => Box::new(KeepPosition),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::screen::{Side, StaticScreen, Strut};
    use crate::model::window::WindowId;

    fn screen() -> StaticScreen {
        StaticScreen::new(
            vec![Rect::new(0, 0, 1600, 1200)],
            vec![Strut { side: Side::Top, rect: Rect::new(0, 0, 1600, 20) }],
        )
    }

    #[test]
    fn center_accounts_for_frame_and_struts() {
        let window = WindowState::new(WindowId::new(1));
        let frame = FrameExtents { left: 5, right: 5, top: 30, bottom: 10 };
        let (x, y) = CenterPlacement.place(&window, &frame, Rect::new(0, 0, 390, 360), &screen());
        // outer is 400x400 centered on 1600x1180 starting at y=20
        assert_eq!((x, y), (600 + 5, 20 + 390 + 30));
    }

    #[test]
    fn closures_are_placements() {
        let window = WindowState::new(WindowId::new(1));
        let mut calls = 0;
        let mut placement = |_: &WindowState, _: &FrameExtents, _: Rect, _: &dyn ScreenLayout| {
            calls += 1;
            (42, 43)
        };
        let pos = placement.place(&window, &FrameExtents::default(), Rect::default(), &screen());
        assert_eq!(pos, (42, 43));
        assert_eq!(calls, 1);
        assert_eq!(
            KeepPosition.place(&window, &FrameExtents::default(), Rect::new(9, 8, 1, 1), &screen()),
            (9, 8)
        );
    }
}
