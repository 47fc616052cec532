//! Level-space geometry shared by the simulation core and the renderer.
//! Everything here is pure; web-sys never reaches this module.

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i16,
    pub y: i16,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Size {
    pub width: i16,
    pub height: i16,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Rect {
    pub position: Point,
    pub size: Size,
}

impl Rect {
    pub const fn new(position: Point, size: Size) -> Self {
        Rect { position, size }
    }

    pub const fn from_parts(x: i16, y: i16, width: i16, height: i16) -> Self {
        Rect {
            position: Point { x, y },
            size: Size { width, height },
        }
    }

    pub fn left(&self) -> i16 {
        self.position.x
    }

    pub fn right(&self) -> i16 {
        self.position.x + self.size.width
    }

    pub fn top(&self) -> i16 {
        self.position.y
    }

    pub fn bottom(&self) -> i16 {
        self.position.y + self.size.height
    }

    /// Axis-aligned overlap test. Touching edges do not count as an
    /// intersection (strict inequalities on every side).
    pub fn intersects(&self, other: &Rect) -> bool {
        !(self.bottom() <= other.top()
            || self.top() >= other.bottom()
            || self.right() <= other.left()
            || self.left() >= other.right())
    }

    /// Shrink the width/height of the box while keeping its origin.
    /// Hit-boxes are deliberately smaller than the rendered sprite; the
    /// insets live next to the entities that own them.
    pub fn inset(&self, width: i16, height: i16) -> Rect {
        Rect {
            position: self.position,
            size: Size {
                width: self.size.width - width,
                height: self.size.height - height,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intersects_is_symmetric() {
        let a = Rect::from_parts(0, 0, 10, 10);
        let b = Rect::from_parts(5, 5, 10, 10);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));

        let c = Rect::from_parts(30, 30, 4, 4);
        assert!(!a.intersects(&c));
        assert!(!c.intersects(&a));
    }

    #[test]
    fn touching_edges_do_not_intersect() {
        let a = Rect::from_parts(0, 0, 10, 10);
        // one case per side, all sharing exactly one edge with `a`
        assert!(!a.intersects(&Rect::from_parts(10, 0, 10, 10))); // right
        assert!(!a.intersects(&Rect::from_parts(-10, 0, 10, 10))); // left
        assert!(!a.intersects(&Rect::from_parts(0, 10, 10, 10))); // below
        assert!(!a.intersects(&Rect::from_parts(0, -10, 10, 10))); // above
    }

    #[test]
    fn one_pixel_overlap_intersects() {
        let a = Rect::from_parts(0, 0, 10, 10);
        let b = Rect::from_parts(9, 0, 10, 10);
        assert!(a.intersects(&b));
    }

    #[test]
    fn inset_shrinks_size_only() {
        let a = Rect::from_parts(100, 200, 115, 120);
        let b = a.inset(65, 16);
        assert_eq!(b.position, Point { x: 100, y: 200 });
        assert_eq!(b.size, Size { width: 50, height: 104 });
    }
}
