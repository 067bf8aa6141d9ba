use super::{Point, Rect};

/// An `Expanse` is a width and height without a location, such as the size of
/// the viewport a surface is laid out in.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub struct Expanse {
    /// Width.
    pub w: u32,
    /// Height.
    pub h: u32,
}

impl Expanse {
    /// Return a `Rect` with the same dimensions, located at the origin.
    pub fn rect(&self) -> Rect {
        Rect {
            tl: Point::zero(),
            w: self.w,
            h: self.h,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_at_origin() {
        let e = Expanse { w: 1920, h: 1080 };
        assert_eq!(e.rect(), Rect::new(0, 0, 1920, 1080));
        assert!(e.rect().contains_rect(Rect::new(1900, 1000, 20, 80)));
        assert!(!e.rect().contains_rect(Rect::new(1900, 1000, 21, 80)));
    }
}
