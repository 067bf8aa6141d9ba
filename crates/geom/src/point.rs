/// A signed 2D point in viewport pixel coordinates.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub struct Point {
    /// X coordinate.
    pub x: i32,
    /// Y coordinate.
    pub y: i32,
}

impl Point {
    /// Return the origin point.
    pub fn zero() -> Self {
        Self { x: 0, y: 0 }
    }
}
