//! Geometry primitives shared by the constraint predicates and the pivot packer.
//!
//! Coordinates are `(x, y, z)` in centimeters, with `x` = length axis, `y` =
//! width axis, `z` = height axis. `+y` points toward the truck's rear door.

use serde::{Deserialize, Serialize};

/// A point in truck-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point3 {
    pub x: u32,
    pub y: u32,
    pub z: u32,
}

impl Point3 {
    pub fn new(x: u32, y: u32, z: u32) -> Self {
        Self { x, y, z }
    }
}

/// Box dimensions along (length, width, height).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dims3 {
    pub length: u32,
    pub width: u32,
    pub height: u32,
}

impl Dims3 {
    pub fn new(length: u32, width: u32, height: u32) -> Self {
        Self {
            length,
            width,
            height,
        }
    }
}

/// The eight corners of an axis-aligned box, in the fixed enumeration order:
/// index bits are (z, y, x) from high to low, i.e. `x` flips fastest, then
/// `y`, then `z`. Index 0 is the min corner, index 7 is the max corner.
pub type Corners = [Point3; 8];

/// Builds the eight corners of a box placed with its min corner at `origin`
/// and extents `dims`.
pub fn make_corners(origin: Point3, dims: Dims3) -> Corners {
    let (cx, cy, cz) = (origin.x, origin.y, origin.z);
    let (l, w, h) = (dims.length, dims.width, dims.height);
    [
        Point3::new(cx, cy, cz),
        Point3::new(cx + l, cy, cz),
        Point3::new(cx, cy + w, cz),
        Point3::new(cx + l, cy + w, cz),
        Point3::new(cx, cy, cz + h),
        Point3::new(cx + l, cy, cz + h),
        Point3::new(cx, cy + w, cz + h),
        Point3::new(cx + l, cy + w, cz + h),
    ]
}

/// True iff the two boxes' interiors overlap on all three axes (the standard
/// AABB test with strict inequalities — shared faces are not an overlap).
pub fn aabb_overlap(a: &Corners, b: &Corners) -> bool {
    let (a0, a7) = (a[0], a[7]);
    let (b0, b7) = (b[0], b[7]);
    a0.x < b7.x && b0.x < a7.x && a0.y < b7.y && b0.y < a7.y && a0.z < b7.z && b0.z < a7.z
}

/// Area of the XY-plane intersection of the footprints of two boxes; zero if
/// disjoint or merely touching.
pub fn xy_rect_overlap_area(a: &Corners, b: &Corners) -> u64 {
    let (ax1, ax2) = (a[0].x, a[3].x);
    let (ay1, ay2) = (a[0].y, a[3].y);
    let (bx1, bx2) = (b[0].x, b[3].x);
    let (by1, by2) = (b[0].y, b[3].y);

    let ix1 = ax1.max(bx1);
    let ix2 = ax2.min(bx2);
    let iy1 = ay1.max(by1);
    let iy2 = ay2.min(by2);

    if ix2 <= ix1 || iy2 <= iy1 {
        return 0;
    }
    (ix2 - ix1) as u64 * (iy2 - iy1) as u64
}

/// Volume in cubic meters of a box with the given dimensions in centimeters.
pub fn volume_m3(dims: Dims3) -> f64 {
    (dims.length as f64) * (dims.width as f64) * (dims.height as f64) / 1_000_000.0
}

/// Footprint area (length * width) of a box, in cm^2.
pub fn footprint_area(dims: Dims3) -> u64 {
    dims.length as u64 * dims.width as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_follow_fixed_enumeration() {
        let c = make_corners(Point3::new(1, 2, 3), Dims3::new(10, 20, 30));
        assert_eq!(c[0], Point3::new(1, 2, 3));
        assert_eq!(c[7], Point3::new(11, 22, 33));
        assert_eq!(c[1], Point3::new(11, 2, 3));
        assert_eq!(c[2], Point3::new(1, 22, 3));
        assert_eq!(c[4], Point3::new(1, 2, 33));
    }

    #[test]
    fn touching_faces_do_not_overlap() {
        let a = make_corners(Point3::new(0, 0, 0), Dims3::new(10, 10, 10));
        let b = make_corners(Point3::new(10, 0, 0), Dims3::new(10, 10, 10));
        assert!(!aabb_overlap(&a, &b));
    }

    #[test]
    fn interior_overlap_detected() {
        let a = make_corners(Point3::new(0, 0, 0), Dims3::new(10, 10, 10));
        let b = make_corners(Point3::new(5, 5, 5), Dims3::new(10, 10, 10));
        assert!(aabb_overlap(&a, &b));
    }

    #[test]
    fn xy_overlap_area_is_zero_for_touching_rects() {
        let a = make_corners(Point3::new(0, 0, 0), Dims3::new(10, 10, 10));
        let b = make_corners(Point3::new(10, 0, 0), Dims3::new(10, 10, 10));
        assert_eq!(xy_rect_overlap_area(&a, &b), 0);
    }

    #[test]
    fn xy_overlap_area_half_overlap() {
        let a = make_corners(Point3::new(0, 0, 0), Dims3::new(10, 10, 10));
        let b = make_corners(Point3::new(5, 0, 0), Dims3::new(10, 10, 10));
        assert_eq!(xy_rect_overlap_area(&a, &b), 50);
    }

    #[test]
    fn volume_is_cubic_meters() {
        let v = volume_m3(Dims3::new(100, 100, 100));
        assert!((v - 1.0).abs() < 1e-9);
    }
}
