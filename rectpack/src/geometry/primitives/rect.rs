use std::fmt::{Display, Formatter};

use crate::geometry::geo_enums::GeoRelation;
use crate::geometry::geo_traits::{CollidesWith, Shape, Touches};
use crate::geometry::primitives::Point;
use anyhow::Result;
use anyhow::ensure;

/// Axis-aligned rectangle, positioned by its lower-left corner.
///
/// Used both for rectangles placed in a bin and for the free space the algorithms keep track of.
/// An optional `rid` can be attached; it is opaque to all geometric operations, including equality.
#[derive(Clone, Debug, Copy)]
pub struct Rect {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    rid: Option<usize>,
}

impl Rect {
    pub fn try_new(x: f32, y: f32, width: f32, height: f32) -> Result<Self> {
        ensure!(
            x.is_finite() && y.is_finite(),
            "invalid rectangle position, x: {x}, y: {y}"
        );
        ensure!(
            width.is_finite() && height.is_finite() && width >= 0.0 && height >= 0.0,
            "invalid rectangle, width: {width}, height: {height} (must be non-negative)"
        );
        Ok(Rect::new(x, y, width, height))
    }

    /// Constructor for rectangles derived from already valid ones (splits, placements).
    pub(crate) fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        debug_assert!(width >= 0.0 && height >= 0.0, "{width}x{height}");
        Rect {
            x,
            y,
            width,
            height,
            rid: None,
        }
    }

    /// Returns `self` with the rectangle id set to `rid`.
    pub fn with_rid(mut self, rid: Option<usize>) -> Self {
        self.rid = rid;
        self
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn rid(&self) -> Option<usize> {
        self.rid
    }

    pub fn bottom(&self) -> f32 {
        self.y
    }

    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn corner_top_left(&self) -> Point {
        Point(self.left(), self.top())
    }

    pub fn corner_top_right(&self) -> Point {
        Point(self.right(), self.top())
    }

    pub fn corner_bot_right(&self) -> Point {
        Point(self.right(), self.bottom())
    }

    pub fn corner_bot_left(&self) -> Point {
        Point(self.left(), self.bottom())
    }

    /// Moves the lower-left corner to (`x`, `y`), keeping the dimensions.
    pub fn move_to(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    /// True if `other` lies entirely within the closed bounds of `self`.
    pub fn contains(&self, other: &Rect) -> bool {
        other.y >= self.y
            && other.x >= self.x
            && other.top() <= self.top()
            && other.right() <= self.right()
    }

    /// Overlap test. With `edges` set, rectangles that only touch are considered intersecting.
    pub fn intersects(&self, other: &Rect, edges: bool) -> bool {
        match edges {
            true => self.touches(other),
            false => self.collides_with(other),
        }
    }

    /// Returns the overlap of `self` and `other`, or `None` if they do not [intersect](Rect::intersects).
    /// With `edges` set, touching rectangles produce a degenerate (zero width or height) result.
    pub fn intersection(&self, other: &Rect, edges: bool) -> Option<Rect> {
        if !self.intersects(other, edges) {
            return None;
        }
        let bottom = f32::max(self.bottom(), other.bottom());
        let left = f32::max(self.left(), other.left());
        let top = f32::min(self.top(), other.top());
        let right = f32::min(self.right(), other.right());
        Some(Rect::new(left, bottom, right - left, top - bottom))
    }

    /// Returns the geometric relation between `self` and another [`Rect`].
    /// Equal rectangles are reported as `Surrounding`.
    pub fn relation_to(&self, other: &Rect) -> GeoRelation {
        if self.contains(other) {
            GeoRelation::Surrounding
        } else if other.contains(self) {
            GeoRelation::Enclosed
        } else if self.collides_with(other) {
            GeoRelation::Intersecting
        } else if self.touches(other) {
            GeoRelation::Touching
        } else {
            GeoRelation::Disjoint
        }
    }

    /// Tries to merge `other` into `self` so that `self` covers exactly the union of both.
    ///
    /// Succeeds when one contains the other, or when both share a full edge:
    /// same left side and width (stacked vertically) or same bottom side and height (side by side).
    /// Returns `false` and leaves `self` untouched otherwise.
    pub fn join(&mut self, other: &Rect) -> bool {
        match self.relation_to(other) {
            GeoRelation::Surrounding => true,
            GeoRelation::Enclosed => {
                self.x = other.x;
                self.y = other.y;
                self.width = other.width;
                self.height = other.height;
                true
            }
            GeoRelation::Disjoint => false,
            GeoRelation::Intersecting | GeoRelation::Touching => {
                if self.left() == other.left() && self.width == other.width {
                    //other is above or below
                    let y_min = f32::min(self.bottom(), other.bottom());
                    let y_max = f32::max(self.top(), other.top());
                    self.y = y_min;
                    self.height = y_max - y_min;
                    true
                } else if self.bottom() == other.bottom() && self.height == other.height {
                    //other is left or right
                    let x_min = f32::min(self.left(), other.left());
                    let x_max = f32::max(self.right(), other.right());
                    self.x = x_min;
                    self.width = x_max - x_min;
                    true
                } else {
                    false
                }
            }
        }
    }
}

impl PartialEq for Rect {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x
            && self.y == other.y
            && self.width == other.width
            && self.height == other.height
    }
}

impl Shape for Rect {
    fn area(&self) -> f32 {
        self.width * self.height
    }

    fn perimeter(&self) -> f32 {
        2.0 * (self.width + self.height)
    }
}

impl CollidesWith<Rect> for Rect {
    #[inline(always)]
    fn collides_with(&self, other: &Rect) -> bool {
        !(self.bottom() >= other.top()
            || self.top() <= other.bottom()
            || self.left() >= other.right()
            || self.right() <= other.left())
    }
}

impl Touches<Rect> for Rect {
    #[inline(always)]
    fn touches(&self, other: &Rect) -> bool {
        !(self.bottom() > other.top()
            || self.top() < other.bottom()
            || self.left() > other.right()
            || self.right() < other.left())
    }
}

impl Display for Rect {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "R({}, {}, {}, {})", self.x, self.y, self.width, self.height)
    }
}
