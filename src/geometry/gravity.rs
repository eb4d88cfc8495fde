use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use super::Rect;

/// The point of a window that stays put while it is resized.
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Gravity {
    #[default]
    NorthWest,
    North,
    NorthEast,
    West,
    Center,
    East,
    SouthWest,
    South,
    SouthEast,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Anchor {
    Start,
    Middle,
    End,
}

impl Anchor {
    /// New origin along one axis after `old_len` becomes `new_len`.
    fn reposition(self, origin: i32, old_len: i32, new_len: i32) -> i32 {
        match self {
            Anchor::Start => origin,
            Anchor::Middle => origin.saturating_add(old_len.saturating_sub(new_len).div_euclid(2)),
            Anchor::End => origin.saturating_add(old_len.saturating_sub(new_len)),
        }
    }
}

impl Gravity {
    fn horizontal(self) -> Anchor {
        match self {
            Gravity::NorthWest | Gravity::West | Gravity::SouthWest => Anchor::Start,
            Gravity::North | Gravity::Center | Gravity::South => Anchor::Middle,
            Gravity::NorthEast | Gravity::East | Gravity::SouthEast => Anchor::End,
        }
    }

    fn vertical(self) -> Anchor {
        match self {
            Gravity::NorthWest | Gravity::North | Gravity::NorthEast => Anchor::Start,
            Gravity::West | Gravity::Center | Gravity::East => Anchor::Middle,
            Gravity::SouthWest | Gravity::South | Gravity::SouthEast => Anchor::End,
        }
    }

    /// Guess which corner the user is dragging from by looking at which edges
    /// of `orig` survived into `new`. Only corner gravities come out of this.
    pub fn infer_user_resize(orig: &Rect, new: &Rect) -> Gravity {
        let left_kept = orig.x == new.x;
        let right_kept = orig.right() == new.right();
        let top_kept = orig.y == new.y;
        let bottom_kept = orig.bottom() == new.bottom();

        match (left_kept, right_kept, top_kept, bottom_kept) {
            (true, _, true, _) => Gravity::NorthWest,
            (true, _, _, true) => Gravity::SouthWest,
            (_, true, true, _) => Gravity::NorthEast,
            (_, true, _, true) => Gravity::SouthEast,
            _ => Gravity::NorthWest,
        }
    }
}

impl Rect {
    /// Resize to `width`x`height` keeping the point named by `gravity` in
    /// place. Centered anchors round the new origin toward the smaller
    /// coordinate when the size change is odd.
    pub fn resize_with_gravity(&mut self, gravity: Gravity, width: i32, height: i32) {
        self.x = gravity.horizontal().reposition(self.x, self.width, width);
        self.y = gravity.vertical().reposition(self.y, self.height, height);
        self.width = width;
        self.height = height;
    }
}
