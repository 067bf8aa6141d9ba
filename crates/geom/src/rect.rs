use super::{Error, Point, Result};

/// A rectangle with a signed origin and unsigned size, in viewport pixels.
///
/// Edges are computed in `i64` so that rectangles near the bounds of `i32`
/// never overflow.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub struct Rect {
    /// Top-left corner.
    pub tl: Point,
    /// Width.
    pub w: u32,
    /// Height.
    pub h: u32,
}

impl Rect {
    /// Construct a rectangle from coordinates and size.
    pub fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self {
            tl: Point { x, y },
            w,
            h,
        }
    }

    /// Does this rect have a zero size?
    pub fn is_zero(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// X coordinate of the left edge.
    pub fn left(&self) -> i64 {
        self.tl.x as i64
    }

    /// Y coordinate of the top edge.
    pub fn top(&self) -> i64 {
        self.tl.y as i64
    }

    /// X coordinate of the right edge (exclusive).
    pub fn right(&self) -> i64 {
        self.tl.x as i64 + self.w as i64
    }

    /// Y coordinate of the bottom edge (exclusive).
    pub fn bottom(&self) -> i64 {
        self.tl.y as i64 + self.h as i64
    }

    /// The exact center of the rect. Odd sizes land on half pixels.
    pub fn center(&self) -> (f64, f64) {
        (
            self.tl.x as f64 + self.w as f64 / 2.0,
            self.tl.y as f64 + self.h as f64 / 2.0,
        )
    }

    /// Does this rect completely contain `other`?
    pub fn contains_rect(&self, other: Self) -> bool {
        other.left() >= self.left()
            && other.top() >= self.top()
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Split the rect into `n` columns of as equal width as possible. Any
    /// remainder is distributed to the leftmost columns.
    pub fn split_horizontal(&self, n: u32) -> Result<Vec<Self>> {
        if n == 0 {
            return Err(Error::Geometry("cannot split into zero columns".into()));
        }
        let (base, rem) = (self.w / n, self.w % n);
        let mut x = self.tl.x;
        let mut out = Vec::with_capacity(n as usize);
        for i in 0..n {
            let w = base + u32::from(i < rem);
            out.push(Self::new(x, self.tl.y, w, self.h));
            x = x.saturating_add(w as i32);
        }
        Ok(out)
    }

    /// Shrink the rect by `margin` on every side. A rect too small to shrink
    /// collapses to zero size at its center.
    pub fn inner(&self, margin: u32) -> Self {
        if self.w <= margin * 2 || self.h <= margin * 2 {
            let (cx, cy) = self.center();
            return Self::new(cx as i32, cy as i32, 0, 0);
        }
        Self::new(
            self.tl.x.saturating_add(margin as i32),
            self.tl.y.saturating_add(margin as i32),
            self.w - margin * 2,
            self.h - margin * 2,
        )
    }
}
