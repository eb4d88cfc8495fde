use std::fmt;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use static_assertions::assert_impl_all;

pub mod gravity;
pub mod region;

pub use gravity::Gravity;
pub use region::{RegionError, SpanningSet};

/// An axis-aligned rectangle in root-window coordinates.
///
/// Widths and heights of zero or less describe an empty rectangle; such values
/// never come out of the region builder but may be produced by arithmetic on
/// the caller's side, so every predicate below tolerates them. Edges and
/// growth saturate at the ends of the `i32` range.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

assert_impl_all!(Rect: Copy, Send, Sync);

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Size { Size { width, height } }

    /// Whether `inner` is no larger than `self` on both axes.
    pub fn could_fit(&self, inner: Size) -> bool {
        self.width >= inner.width && self.height >= inner.height
    }
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Rect {
        Rect { x, y, width, height }
    }

    pub fn right(&self) -> i32 { self.x.saturating_add(self.width) }

    pub fn bottom(&self) -> i32 { self.y.saturating_add(self.height) }

    pub fn size(&self) -> Size { Size::new(self.width, self.height) }

    pub fn is_empty(&self) -> bool { self.width <= 0 || self.height <= 0 }

    pub fn area(&self) -> i64 { self.width as i64 * self.height as i64 }

    /// The overlapping part of two rectangles, or `None` if they share no
    /// area. Touching edges produce `None`.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let width = self.right().min(other.right()) - x;
        let height = self.bottom().min(other.bottom()) - y;

        if width <= 0 || height <= 0 {
            return None;
        }
        Some(Rect { x, y, width, height })
    }

    pub fn intersection_area(&self, other: &Rect) -> i64 {
        self.intersect(other).map_or(0, |r| r.area())
    }

    /// Strict overlap: rectangles that only touch along an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        !(self.right() <= other.x
            || other.right() <= self.x
            || self.bottom() <= other.y
            || other.bottom() <= self.y)
    }

    /// Whether the horizontal extents overlap or touch.
    pub fn horiz_overlaps(&self, other: &Rect) -> bool {
        self.x <= other.right() && other.x <= self.right()
    }

    /// Whether the vertical extents overlap or touch.
    pub fn vert_overlaps(&self, other: &Rect) -> bool {
        self.y <= other.bottom() && other.y <= self.bottom()
    }

    /// Size-only test; position is ignored.
    pub fn could_fit(&self, inner: &Rect) -> bool { self.size().could_fit(inner.size()) }

    pub fn contains(&self, inner: &Rect) -> bool {
        inner.x >= self.x
            && inner.y >= self.y
            && inner.right() <= self.right()
            && inner.bottom() <= self.bottom()
    }

    pub fn expand(&self, by: Expansion) -> Rect {
        Rect {
            x: self.x.saturating_sub(by.left),
            y: self.y.saturating_sub(by.top),
            width: self.width.saturating_add(by.left).saturating_add(by.right),
            height: self.height.saturating_add(by.top).saturating_add(by.bottom),
        }
    }

    pub fn center(&self) -> (i32, i32) {
        (self.x.saturating_add(self.width / 2), self.y.saturating_add(self.height / 2))
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{} +{},{}", self.x, self.y, self.width, self.height)
    }
}

/// Outward growth applied to each side of a rectangle.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Expansion {
    #[serde(default)]
    pub left: i32,
    #[serde(default)]
    pub right: i32,
    #[serde(default)]
    pub top: i32,
    #[serde(default)]
    pub bottom: i32,
}

impl Expansion {
    pub const NONE: Expansion = Expansion::uniform(0);

    pub const fn uniform(amount: i32) -> Expansion {
        Expansion {
            left: amount,
            right: amount,
            top: amount,
            bottom: amount,
        }
    }

    pub const fn symmetric(horizontal: i32, vertical: i32) -> Expansion {
        Expansion {
            left: horizontal,
            right: horizontal,
            top: vertical,
            bottom: vertical,
        }
    }
}

bitflags! {
    /// Axes that an in-flight move or resize must leave untouched.
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
    pub struct FixedDirections: u8 {
        const X = 1 << 0;
        const Y = 1 << 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Vec<Rect> {
        let mut rects = Vec::new();
        for x in [0, 3, 7] {
            for y in [0, 4, 9] {
                for width in [1, 2, 5, 11] {
                    for height in [1, 3, 6, 12] {
                        rects.push(Rect::new(x, y, width, height));
                    }
                }
            }
        }
        rects
    }

    fn touching(a: &Rect, b: &Rect) -> bool {
        a.right() == b.x || b.right() == a.x || a.bottom() == b.y || b.bottom() == a.y
    }

    #[test]
    fn area_is_width_times_height() {
        for r in grid() {
            assert_eq!(r.area(), r.width as i64 * r.height as i64);
        }
        assert_eq!(Rect::new(0, 0, 0, 100).area(), 0);
    }

    #[test]
    fn intersection_is_symmetric() {
        let rects = grid();
        for a in &rects {
            for b in &rects {
                assert_eq!(a.intersect(b), b.intersect(a));
                assert_eq!(a.intersection_area(b), b.intersection_area(a));
            }
        }
    }

    #[test]
    fn overlap_decomposes_into_axis_overlaps() {
        let rects = grid();
        for a in &rects {
            for b in &rects {
                if touching(a, b) {
                    continue;
                }
                assert_eq!(
                    a.overlaps(b),
                    a.horiz_overlaps(b) && a.vert_overlaps(b),
                    "{a} vs {b}"
                );
                assert_eq!(a.overlaps(b), a.intersect(b).is_some(), "{a} vs {b}");
            }
        }
    }

    #[test]
    fn touching_edges_only_count_for_axis_overlap() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(10, 0, 10, 10);
        assert!(!a.overlaps(&b));
        assert!(a.horiz_overlaps(&b));
        assert!(a.vert_overlaps(&b));
        assert_eq!(a.intersect(&b), None);
    }

    #[test]
    fn intersect_examples() {
        let a = Rect::new(100, 200, 50, 40);
        let b = Rect::new(0, 50, 110, 152);
        assert_eq!(a.intersect(&b), Some(Rect::new(100, 200, 10, 2)));
        assert_eq!(a.intersection_area(&b), 20);

        assert_eq!(a.intersect(&Rect::new(0, 0, 10, 10)), None);
        assert_eq!(a.intersection_area(&Rect::new(100, 100, 50, 50)), 0);
    }

    #[test]
    fn overlap_examples() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(20, 0, 10, 5);
        assert!(!a.overlaps(&b));
        assert!(!a.horiz_overlaps(&b));
        assert!(a.vert_overlaps(&b));
    }

    #[test]
    fn containment_is_asymmetric() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, 5, 5, 5);
        let c = Rect::new(8, 2, 3, 7);

        assert!(a.contains(&b));
        assert!(!b.contains(&a));
        assert!(!a.contains(&c));
        assert!(a.could_fit(&c));
        assert!(!c.could_fit(&b));
        assert!(a.contains(&a));

        let rects = grid();
        for x in &rects {
            for y in &rects {
                if x.contains(y) && y.contains(x) {
                    assert_eq!(x, y);
                }
                if x.contains(y) {
                    assert!(x.could_fit(y));
                }
            }
        }
    }

    #[test]
    fn expand_grows_every_side() {
        let r = Rect::new(10, 20, 100, 50);
        let grown = r.expand(Expansion {
            left: 1,
            right: 2,
            top: 3,
            bottom: 4,
        });
        assert_eq!(grown, Rect::new(9, 17, 103, 57));
        assert_eq!(r.expand(Expansion::NONE), r);
        assert_eq!(format!("{r}"), "10,20 +100,50");
    }

    #[test]
    fn edges_saturate_at_the_end_of_the_range() {
        let far = Rect::new(i32::MAX - 100, i32::MIN, 400, 300);
        assert_eq!(far.right(), i32::MAX);
        assert_eq!(far.bottom(), i32::MIN + 300);
        assert!(!Rect::new(0, 0, 1600, 1200).contains(&far));
        assert_eq!(far.intersect(&Rect::new(0, 0, 1600, 1200)), None);

        let grown = Rect::new(i32::MIN + 5, 0, 10, 10).expand(Expansion::uniform(10));
        assert_eq!(grown.x, i32::MIN);
        assert_eq!(grown.width, 30);
    }
}
