//! Axis-aligned bounding boxes in image pixel coordinates.

/// Bounding box with a top-left origin and a size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BBox {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl BBox {
    /// Creates a box from its top-left corner and size.
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a box from two corners, `(x1, y1)` top-left and `(x2, y2)`
    /// bottom-right. Corners are not reordered; `x2 >= x1` and `y2 >= y1`
    /// are the caller's responsibility.
    pub fn from_corners(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self {
            x: x1,
            y: y1,
            width: (x2 - x1).max(0) as u32,
            height: (y2 - y1).max(0) as u32,
        }
    }

    /// Returns the top-left corner.
    pub fn top_left(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    /// Returns the bottom-right corner (exclusive).
    pub fn bottom_right(&self) -> (i32, i32) {
        (self.x + self.width as i32, self.y + self.height as i32)
    }

    /// Returns the center pixel.
    pub fn center(&self) -> (i32, i32) {
        (
            self.x + (self.width / 2) as i32,
            self.y + (self.height / 2) as i32,
        )
    }

    /// Returns the area in pixels.
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Returns the box translated by `(dx, dy)`.
    pub fn move_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            width: self.width,
            height: self.height,
        }
    }

    /// Returns the region common to both boxes, or `None` when disjoint.
    pub fn intersection(a: &BBox, b: &BBox) -> Option<BBox> {
        let x1 = a.x.max(b.x);
        let y1 = a.y.max(b.y);
        let (ax2, ay2) = a.bottom_right();
        let (bx2, by2) = b.bottom_right();
        let x2 = ax2.min(bx2);
        let y2 = ay2.min(by2);
        if x2 <= x1 || y2 <= y1 {
            return None;
        }
        Some(BBox::from_corners(x1, y1, x2, y2))
    }
}

#[cfg(test)]
mod tests {
    use super::BBox;

    #[test]
    fn from_corners_matches_new() {
        let a = BBox::from_corners(3, 4, 10, 9);
        assert_eq!(a, BBox::new(3, 4, 7, 5));
        assert_eq!(a.bottom_right(), (10, 9));
        assert_eq!(a.area(), 35);
    }

    #[test]
    fn center_and_move_by() {
        let a = BBox::new(10, 20, 6, 8);
        assert_eq!(a.center(), (13, 24));
        assert_eq!(a.move_by(-10, 5), BBox::new(0, 25, 6, 8));
    }

    #[test]
    fn intersection_of_overlapping_boxes() {
        let a = BBox::new(0, 0, 10, 10);
        let b = BBox::new(5, 5, 10, 10);
        assert_eq!(BBox::intersection(&a, &b), Some(BBox::new(5, 5, 5, 5)));
    }

    #[test]
    fn intersection_of_disjoint_boxes_is_none() {
        let a = BBox::new(0, 0, 4, 4);
        let b = BBox::new(4, 0, 4, 4);
        assert_eq!(BBox::intersection(&a, &b), None);
    }
}
