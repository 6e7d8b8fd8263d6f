//! Integer pixel geometry for shape instructions.
//!
//! Coordinates follow raster conventions: origin at the top-left corner,
//! x grows to the right and y grows downward. Both corners of a [`Bounds`]
//! are inclusive, so `Bounds::new(10, 10, 20, 20)` covers pixels `10..=20`
//! on each axis.

use serde::{Deserialize, Serialize};

use crate::error::{ComposeError, Result};

// ============================================================================
// Point
// ============================================================================

/// A point in canvas pixel coordinates.
///
/// Serialized as a two-element array `[x, y]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "(i32, i32)", into = "(i32, i32)")]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns this point moved by `(dx, dy)`.
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl From<Point> for (i32, i32) {
    fn from(p: Point) -> Self {
        (p.x, p.y)
    }
}

// ============================================================================
// Bounds
// ============================================================================

/// An axis-aligned bounding box given by two inclusive corners.
///
/// Serialized as a four-element array `[x0, y0, x1, y1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "[i32; 4]", into = "[i32; 4]")]
pub struct Bounds {
    /// Left edge
    pub x0: i32,
    /// Top edge
    pub y0: i32,
    /// Right edge (inclusive)
    pub x1: i32,
    /// Bottom edge (inclusive)
    pub y1: i32,
}

impl Bounds {
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Creates the square box `[c.x - r, c.y - r, c.x + r, c.y + r]`.
    ///
    /// This is how circles are placed: an ellipse inscribed in this box.
    pub fn around(center: Point, radius: i32) -> Self {
        Self::new(
            center.x - radius,
            center.y - radius,
            center.x + radius,
            center.y + radius,
        )
    }

    /// Distance between the two corners along x. Widened so boxes spanning
    /// the whole `i32` range do not overflow.
    pub fn width(&self) -> i64 {
        i64::from(self.x1) - i64::from(self.x0)
    }

    /// Distance between the two corners along y.
    pub fn height(&self) -> i64 {
        i64::from(self.y1) - i64::from(self.y0)
    }

    /// The midpoint, rounded toward the top-left.
    pub fn center(&self) -> Point {
        // The midpoint of two i32 values always fits in i32
        Point::new(
            (i64::from(self.x0) + self.width() / 2) as i32,
            (i64::from(self.y0) + self.height() / 2) as i32,
        )
    }

    /// The four corners: top-left, top-right, bottom-left, bottom-right.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.x0, self.y0),
            Point::new(self.x1, self.y0),
            Point::new(self.x0, self.y1),
            Point::new(self.x1, self.y1),
        ]
    }

    /// Returns true if `p` lies inside the box (edges included).
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x0 && p.x <= self.x1 && p.y >= self.y0 && p.y <= self.y1
    }

    /// Fails unless `x0 < x1` and `y0 < y1`.
    pub fn validate(&self) -> Result<()> {
        if self.x0 >= self.x1 || self.y0 >= self.y1 {
            return Err(ComposeError::geometry(format!(
                "bounding box [{}, {}, {}, {}] is empty or inverted",
                self.x0, self.y0, self.x1, self.y1
            )));
        }
        Ok(())
    }
}

impl From<[i32; 4]> for Bounds {
    fn from([x0, y0, x1, y1]: [i32; 4]) -> Self {
        Self::new(x0, y0, x1, y1)
    }
}

impl From<Bounds> for [i32; 4] {
    fn from(b: Bounds) -> Self {
        [b.x0, b.y0, b.x1, b.y1]
    }
}

#[cfg(feature = "jsonschema")]
mod schema {
    use super::{Bounds, Point};
    use schemars::r#gen::SchemaGenerator;
    use schemars::schema::Schema;
    use schemars::JsonSchema;

    impl JsonSchema for Point {
        fn schema_name() -> String {
            "Point".to_string()
        }

        fn json_schema(generator: &mut SchemaGenerator) -> Schema {
            <(i32, i32)>::json_schema(generator)
        }
    }

    impl JsonSchema for Bounds {
        fn schema_name() -> String {
            "Bounds".to_string()
        }

        fn json_schema(generator: &mut SchemaGenerator) -> Schema {
            <[i32; 4]>::json_schema(generator)
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_around_center() {
        let b = Bounds::around(Point::new(512, 512), 400);
        assert_eq!(b, Bounds::new(112, 112, 912, 912));
        assert_eq!(b.width(), 800);
        assert_eq!(b.height(), 800);
        assert_eq!(b.center(), Point::new(512, 512));
    }

    #[test]
    fn bounds_validation() {
        assert!(Bounds::new(0, 0, 1, 1).validate().is_ok());
        assert!(Bounds::new(5, 0, 5, 10).validate().is_err());
        assert!(Bounds::new(0, 10, 10, 3).validate().is_err());
    }

    #[test]
    fn bounds_contains_edges() {
        let b = Bounds::new(10, 20, 30, 40);
        for corner in b.corners() {
            assert!(b.contains(corner));
        }
        assert!(!b.contains(Point::new(31, 20)));
    }

    #[test]
    fn full_range_bounds_do_not_overflow() {
        let b = Bounds::new(i32::MIN, 0, i32::MAX, 10);
        assert!(b.validate().is_ok());
        assert_eq!(b.width(), u32::MAX as i64);
        assert_eq!(b.center(), Point::new(-1, 5));
    }

    #[test]
    fn point_offset() {
        assert_eq!(Point::new(692, 612).offset(-10, 35), Point::new(682, 647));
    }

    #[test]
    fn serde_as_arrays() {
        let json = serde_json::to_string(&Bounds::new(1, 2, 3, 4)).unwrap();
        assert_eq!(json, "[1,2,3,4]");

        let p: Point = serde_json::from_str("[7,-8]").unwrap();
        assert_eq!(p, Point::new(7, -8));
    }
}
