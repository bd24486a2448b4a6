//! Normalized geometry shared by fragments, clustering and ordering.
//!
//! Rectangles live in the recognizer's coordinate space: the unit square with
//! the origin at the bottom left and Y increasing upward. A rectangle's
//! "top left" is its origin, matching how the recognizer reports boxes.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: &Point) -> f64 {
        distance(self, other)
    }

    /// Divides the point by `size`, mapping pixel coordinates into the unit square.
    pub fn normalized(&self, size: Size) -> Point {
        Point::new(self.x / size.width, self.y / size.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EdgeInsets {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl EdgeInsets {
    pub const fn new(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The rectangle's origin.
    pub fn top_left(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// The corner opposite the origin.
    pub fn bottom_right(&self) -> Point {
        Point::new(self.x + self.width, self.y + self.height)
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Scales a normalized rectangle up to `size`.
    pub fn denormalized(&self, size: Size) -> Rect {
        Rect::new(
            self.x * size.width,
            self.y * size.height,
            self.width * size.width,
            self.height * size.height,
        )
    }

    /// Inverse of [`Rect::denormalized`].
    pub fn normalized(&self, size: Size) -> Rect {
        Rect::new(
            self.x / size.width,
            self.y / size.height,
            self.width / size.width,
            self.height / size.height,
        )
    }

    /// Flips a normalized rectangle between a bottom-left and a top-left origin.
    ///
    /// Applying it twice yields the original rectangle.
    pub fn to_image_space(&self) -> Rect {
        Rect::new(self.x, 1.0 - self.y - self.height, self.width, self.height)
    }

    pub fn expanded(&self, insets: EdgeInsets) -> Rect {
        Rect::new(
            self.x - insets.left,
            self.y - insets.top,
            self.width + insets.left + insets.right,
            self.height + insets.top + insets.bottom,
        )
    }

    pub fn contracted(&self, insets: EdgeInsets) -> Rect {
        Rect::new(
            self.x + insets.left,
            self.y + insets.top,
            self.width - insets.left - insets.right,
            self.height - insets.top - insets.bottom,
        )
    }

    /// Scales the rectangle by `ratio` while keeping its center in place.
    pub fn scaled_about_center(&self, ratio: f64) -> Rect {
        let center = self.center();
        let width = self.width * ratio;
        let height = self.height * ratio;
        Rect::new(center.x - width / 2.0, center.y - height / 2.0, width, height)
    }

    /// The smallest rectangle covering both `self` and `other`.
    pub fn union(&self, other: &Rect) -> Rect {
        let min_x = self.x.min(other.x);
        let min_y = self.y.min(other.y);
        let max_x = self.bottom_right().x.max(other.bottom_right().x);
        let max_y = self.bottom_right().y.max(other.bottom_right().y);
        Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    /// Inclusive containment check.
    pub fn contains_point(&self, point: &Point) -> bool {
        let far = self.bottom_right();
        point.x >= self.x && point.x <= far.x && point.y >= self.y && point.y <= far.y
    }

    pub fn contains_rect(&self, other: &Rect) -> bool {
        self.contains_point(&other.top_left()) && self.contains_point(&other.bottom_right())
    }
}

/// Euclidean distance between two points.
pub fn distance(p1: &Point, p2: &Point) -> f64 {
    (p2.x - p1.x).hypot(p2.y - p1.y)
}

/// The minimal rectangle covering every rectangle in `rects`.
///
/// An empty input yields the zero rectangle rather than an error.
pub fn bounding_box<'a, I>(rects: I) -> Rect
where
    I: IntoIterator<Item = &'a Rect>,
{
    let mut rects = rects.into_iter();
    match rects.next() {
        Some(first) => rects.fold(*first, |acc, rect| acc.union(rect)),
        None => Rect::default(),
    }
}
