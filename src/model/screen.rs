use serde::{Deserialize, Serialize};
use strum_macros::Display;
use tracing::debug;

use crate::geometry::Rect;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

/// Space reserved along a screen edge by a panel or dock.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Strut {
    pub side: Side,
    pub rect: Rect,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Monitor {
    pub rect: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorInfo {
    pub index: usize,
    pub rect: Rect,
}

/// Monitor and strut geometry, as seen by the constraint solver.
pub trait ScreenLayout {
    /// Bounding rectangle of every monitor.
    fn screen_rect(&self) -> Rect;
    /// The monitor a window with outer rect `rect` belongs to.
    fn monitor_for_rect(&self, rect: &Rect) -> Option<MonitorInfo>;
    /// Usable part of monitor `index`, struts excluded.
    fn monitor_work_area(&self, index: usize) -> Rect;
    /// Usable part of the whole screen, struts excluded.
    fn all_monitors_work_area(&self) -> Rect;
    /// Struts on the active workspace.
    fn struts(&self) -> &[Strut];
}

/// A fixed monitor arrangement, e.g. loaded from a scene file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct StaticScreen {
    pub monitors: Vec<Monitor>,
    #[serde(default)]
    pub struts: Vec<Strut>,
}

impl StaticScreen {
    pub fn new(monitors: Vec<Rect>, struts: Vec<Strut>) -> StaticScreen {
        StaticScreen {
            monitors: monitors.into_iter().map(|rect| Monitor { rect }).collect(),
            struts,
        }
    }

    fn work_area_of(&self, area: Rect) -> Rect {
        let mut left = area.x;
        let mut right = area.right();
        let mut top = area.y;
        let mut bottom = area.bottom();

        for strut in self.struts.iter().filter(|s| s.rect.overlaps(&area)) {
            match strut.side {
                Side::Left => left = left.max(strut.rect.right()),
                Side::Right => right = right.min(strut.rect.x),
                Side::Top => top = top.max(strut.rect.bottom()),
                Side::Bottom => bottom = bottom.min(strut.rect.y),
            }
        }

        Rect::new(left, top, (right - left).max(0), (bottom - top).max(0))
    }
}

impl ScreenLayout for StaticScreen {
    fn screen_rect(&self) -> Rect {
        let mut rects = self.monitors.iter().map(|m| m.rect);
        let Some(first) = rects.next() else {
            return Rect::default();
        };
        rects.fold(first, |acc, r| {
            let x = acc.x.min(r.x);
            let y = acc.y.min(r.y);
            Rect::new(
                x,
                y,
                acc.right().max(r.right()) - x,
                acc.bottom().max(r.bottom()) - y,
            )
        })
    }

    fn monitor_for_rect(&self, rect: &Rect) -> Option<MonitorInfo> {
        let infos = self
            .monitors
            .iter()
            .enumerate()
            .map(|(index, m)| MonitorInfo { index, rect: m.rect });

        let mut best: Option<(i64, MonitorInfo)> = None;
        for info in infos.clone() {
            let overlap = info.rect.intersection_area(rect);
            if overlap > 0 && best.is_none_or(|(o, _)| overlap > o) {
                best = Some((overlap, info));
            }
        }
        if let Some((_, info)) = best {
            return Some(info);
        }

        // Nothing overlaps, fall back to the monitor whose center is closest.
        let (cx, cy) = rect.center();
        let nearest = infos.min_by_key(|info| {
            let (mx, my) = info.rect.center();
            let (dx, dy) = ((mx - cx) as i64, (my - cy) as i64);
            dx * dx + dy * dy
        });
        if let Some(info) = nearest {
            debug!(%rect, monitor = info.index, "window is off every monitor, using nearest");
        }
        nearest
    }

    fn monitor_work_area(&self, index: usize) -> Rect {
        self.monitors
            .get(index)
            .map_or_else(Rect::default, |m| self.work_area_of(m.rect))
    }

    fn all_monitors_work_area(&self) -> Rect { self.work_area_of(self.screen_rect()) }

    fn struts(&self) -> &[Strut] { &self.struts }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dual() -> StaticScreen {
        StaticScreen::new(
            vec![Rect::new(0, 0, 1600, 1200), Rect::new(1600, 0, 1280, 1024)],
            vec![
                Strut { side: Side::Top, rect: Rect::new(0, 0, 1600, 24) },
                Strut {
                    side: Side::Right,
                    rect: Rect::new(2830, 0, 50, 1024),
                },
            ],
        )
    }

    #[test]
    fn screen_rect_bounds_all_monitors() {
        assert_eq!(dual().screen_rect(), Rect::new(0, 0, 2880, 1200));
        assert_eq!(StaticScreen::default().screen_rect(), Rect::default());
    }

    #[test]
    fn work_areas_only_lose_struts_they_touch() {
        let screen = dual();
        assert_eq!(screen.monitor_work_area(0), Rect::new(0, 24, 1600, 1176));
        assert_eq!(screen.monitor_work_area(1), Rect::new(1600, 0, 1230, 1024));
        assert_eq!(screen.all_monitors_work_area(), Rect::new(0, 24, 2830, 1176));
        assert_eq!(screen.monitor_work_area(7), Rect::default());
    }

    #[test]
    fn monitor_with_most_overlap_wins() {
        let screen = dual();
        let info = screen.monitor_for_rect(&Rect::new(1500, 100, 400, 300)).unwrap();
        assert_eq!(info.index, 1);
        let info = screen.monitor_for_rect(&Rect::new(1300, 100, 400, 300)).unwrap();
        assert_eq!(info.index, 0);
    }

    #[test]
    fn offscreen_window_uses_nearest_monitor() {
        let screen = dual();
        let info = screen.monitor_for_rect(&Rect::new(5000, 0, 100, 100)).unwrap();
        assert_eq!(info.index, 1);
        assert!(StaticScreen::default().monitor_for_rect(&Rect::new(0, 0, 1, 1)).is_none());
    }
}
