//! Regions described as minimal spanning sets of rectangles.
//!
//! A region is whatever is left of a base rectangle after subtracting a list
//! of obstacles (typically struts). Instead of storing the disjoint pieces we
//! keep every maximal rectangle that fits in the region, minus any that are
//! contained in another, so "does this window fit" becomes "does it fit in
//! any member".

use std::fmt;

use serde::Serialize;
use thiserror::Error;
use tracing::trace;

use super::{Expansion, FixedDirections, Rect, Size};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RegionError {
    #[error("no rectangle in the region can take {0}")]
    NoCandidate(Rect),
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(transparent)]
pub struct SpanningSet(Vec<Rect>);

impl SpanningSet {
    /// Builds the spanning set of `base` with every obstacle cut out, then
    /// grows each member by `expansion`.
    ///
    /// An obstacle that covers all of `base` leaves an empty set.
    pub fn for_region<I>(base: Rect, obstacles: I, expansion: Expansion) -> SpanningSet
    where
        I: IntoIterator<Item = Rect>,
    {
        let mut rects = vec![base];
        for hole in obstacles {
            rects = rects.iter().flat_map(|r| subtract(r, &hole)).collect();
        }

        let mut rects: Vec<Rect> = rects.into_iter().map(|r| r.expand(expansion)).collect();
        rects.sort_by(|a, b| b.area().cmp(&a.area()));
        merge_to_fixed_point(&mut rects);

        trace!(%base, members = rects.len(), "built spanning set");
        SpanningSet(rects)
    }

    pub fn rects(&self) -> &[Rect] { &self.0 }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    /// Whether some member is at least as large as `rect`.
    pub fn could_fit(&self, rect: &Rect) -> bool { self.0.iter().any(|m| m.could_fit(rect)) }

    /// Whether `rect`, where it currently is, lies inside some member.
    pub fn contains(&self, rect: &Rect) -> bool { self.0.iter().any(|m| m.contains(rect)) }

    /// Shrinks `rect` so that it fits the member that would keep the most of
    /// its size. Position is left alone.
    ///
    /// Members too small for `min_size`, or that do not already span `rect`
    /// along a fixed axis, are ignored. If none remain, the free axes are cut
    /// down to `min_size` and an error is returned.
    pub fn clamp_to_fit(
        &self,
        fixed: FixedDirections,
        rect: &mut Rect,
        min_size: Size,
    ) -> Result<(), RegionError> {
        let current = *rect;
        let best = first_max_by_key(
            self.0
                .iter()
                .filter(|m| admits(m, &current, fixed) && m.size().could_fit(min_size)),
            |m| {
                current.width.min(m.width) as i64 * current.height.min(m.height) as i64
            },
        );

        match best {
            Some(m) => {
                rect.width = rect.width.min(m.width);
                rect.height = rect.height.min(m.height);
                Ok(())
            }
            None => {
                if !fixed.contains(FixedDirections::X) {
                    rect.width = min_size.width;
                }
                if !fixed.contains(FixedDirections::Y) {
                    rect.height = min_size.height;
                }
                Err(RegionError::NoCandidate(current))
            }
        }
    }

    /// Cuts the free edges of `rect` back to the member it overlaps most.
    pub fn clip(&self, fixed: FixedDirections, rect: &mut Rect) -> Result<(), RegionError> {
        let current = *rect;
        let best = first_max_by_key(
            self.0
                .iter()
                .filter(|m| admits(m, &current, fixed) && m.overlaps(&current)),
            |m| m.intersection_area(&current),
        );
        let Some(m) = best else {
            return Err(RegionError::NoCandidate(current));
        };

        if !fixed.contains(FixedDirections::X) {
            let x = current.x.max(m.x);
            rect.width = current.right().min(m.right()) - x;
            rect.x = x;
        }
        if !fixed.contains(FixedDirections::Y) {
            let y = current.y.max(m.y);
            rect.height = current.bottom().min(m.bottom()) - y;
            rect.y = y;
        }
        Ok(())
    }

    /// Translates `rect` along its free axes into a member, preferring the
    /// member it already overlaps most and then the shortest move.
    pub fn shove(&self, fixed: FixedDirections, rect: &mut Rect) -> Result<(), RegionError> {
        let current = *rect;
        let mut best: Option<(i64, i64, Rect)> = None;

        for m in self.0.iter().filter(|m| admits(m, &current, fixed)) {
            let mut moved = current;
            if !fixed.contains(FixedDirections::X) {
                moved.x = shove_axis(current.x, current.width, m.x, m.width);
            }
            if !fixed.contains(FixedDirections::Y) {
                moved.y = shove_axis(current.y, current.height, m.y, m.height);
            }

            let overlap = m.intersection_area(&current);
            let distance = (moved.x as i64 - current.x as i64).abs() + (moved.y as i64 - current.y as i64).abs();
            let better = match best {
                None => true,
                Some((o, d, _)) => overlap > o || (overlap == o && distance < d),
            };
            if better {
                best = Some((overlap, distance, moved));
            }
        }

        match best {
            Some((_, _, moved)) => {
                *rect = moved;
                Ok(())
            }
            None => Err(RegionError::NoCandidate(current)),
        }
    }
}

impl fmt::Display for SpanningSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, r) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{r}")?;
        }
        f.write_str("]")
    }
}

/// The up to four maximal pieces of `rect` left after removing `hole`.
fn subtract(rect: &Rect, hole: &Rect) -> Vec<Rect> {
    if !rect.overlaps(hole) {
        return vec![*rect];
    }

    let left = Rect::new(rect.x, rect.y, hole.x - rect.x, rect.height);
    let right = Rect::new(hole.right(), rect.y, rect.right() - hole.right(), rect.height);
    let above = Rect::new(rect.x, rect.y, rect.width, hole.y - rect.y);
    let below = Rect::new(rect.x, hole.bottom(), rect.width, rect.bottom() - hole.bottom());

    [left, right, above, below].into_iter().filter(|r| !r.is_empty()).collect()
}

fn merge_to_fixed_point(rects: &mut Vec<Rect>) {
    while let Some((i, j, merged)) = find_merge(rects) {
        rects[i] = merged;
        rects.remove(j);
    }
}

fn find_merge(rects: &[Rect]) -> Option<(usize, usize, Rect)> {
    for (i, a) in rects.iter().enumerate() {
        for (j, b) in rects.iter().enumerate().skip(i + 1) {
            if let Some(merged) = try_merge(a, b) {
                return Some((i, j, merged));
            }
        }
    }
    None
}

fn try_merge(a: &Rect, b: &Rect) -> Option<Rect> {
    if a.contains(b) {
        return Some(*a);
    }
    if b.contains(a) {
        return Some(*b);
    }
    if a.y == b.y && a.height == b.height && a.horiz_overlaps(b) {
        let x = a.x.min(b.x);
        return Some(Rect::new(x, a.y, a.right().max(b.right()) - x, a.height));
    }
    if a.x == b.x && a.width == b.width && a.vert_overlaps(b) {
        let y = a.y.min(b.y);
        return Some(Rect::new(a.x, y, a.width, a.bottom().max(b.bottom()) - y));
    }
    None
}

/// A member can only take `rect` if it already spans it along every fixed axis.
fn admits(member: &Rect, rect: &Rect, fixed: FixedDirections) -> bool {
    if fixed.contains(FixedDirections::X) && (rect.x < member.x || rect.right() > member.right()) {
        return false;
    }
    if fixed.contains(FixedDirections::Y) && (rect.y < member.y || rect.bottom() > member.bottom())
    {
        return false;
    }
    true
}

fn shove_axis(pos: i32, len: i32, start: i32, member_len: i32) -> i32 {
    if pos < start {
        start
    } else if pos.saturating_add(len) > start.saturating_add(member_len) {
        start.saturating_add(member_len).saturating_sub(len)
    } else {
        pos
    }
}

/// Like `Iterator::max_by_key`, but ties go to the earliest (largest) member.
fn first_max_by_key<'a, I, F>(iter: I, key: F) -> Option<&'a Rect>
where
    I: Iterator<Item = &'a Rect>,
    F: Fn(&Rect) -> i64,
{
    let mut best: Option<(i64, &Rect)> = None;
    for r in iter {
        let k = key(r);
        if best.is_none_or(|(b, _)| k > b) {
            best = Some((k, r));
        }
    }
    best.map(|(_, r)| r)
}
