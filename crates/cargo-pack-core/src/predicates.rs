//! The five constraint predicates a candidate placement must satisfy.
//!
//! Evaluation order in the packer is fit, unload, non-stack, non-overlap,
//! base-support — cheapest first, base-support last since it is the most
//! expensive (it scans every placed box at the candidate's z-level).

use crate::geometry::{aabb_overlap, footprint_area, xy_rect_overlap_area, Corners, Dims3};
use crate::model::PlacedBox;

/// True iff `candidate` lies wholly inside a truck of the given dimensions,
/// measured from the origin. Strict greater-than on any axis fails.
pub fn fits_in_truck(candidate: &Corners, truck_dims: Dims3) -> bool {
    let c7 = candidate[7];
    c7.x <= truck_dims.length && c7.y <= truck_dims.width && c7.z <= truck_dims.height
}

/// True iff `candidate` does not interior-overlap any already-placed box.
pub fn no_overlap(candidate: &Corners, placed: &[PlacedBox]) -> bool {
    !placed.iter().any(|p| aabb_overlap(&p.corners, candidate))
}

/// True iff `candidate` does not rest with XY overlap on top of a
/// non-stackable box.
pub fn respects_non_stackable(candidate: &Corners, placed: &[PlacedBox]) -> bool {
    use crate::model::Stackability;
    let cand_z0 = candidate[0].z;
    let cand_cx = (candidate[0].x + candidate[7].x) as f64 / 2.0;
    let cand_cy = (candidate[0].y + candidate[7].y) as f64 / 2.0;
    let cand_l = (candidate[1].x - candidate[0].x) as f64;
    let cand_w = (candidate[2].y - candidate[0].y) as f64;

    for p in placed {
        if !matches!(p.stackable, Stackability::NonStackable) {
            continue;
        }
        if p.corners[4].z != cand_z0 {
            continue;
        }
        let p_cx = (p.corners[0].x + p.corners[7].x) as f64 / 2.0;
        let p_cy = (p.corners[0].y + p.corners[7].y) as f64 / 2.0;
        let p_l = (p.corners[1].x - p.corners[0].x) as f64;
        let p_w = (p.corners[2].y - p.corners[0].y) as f64;

        let dx = (cand_cx - p_cx).abs();
        let dy = (cand_cy - p_cy).abs();
        if (cand_l + p_l) / 2.0 > dx && (cand_w + p_w) / 2.0 > dy {
            return false;
        }
    }
    true
}

/// Percentage (0..=100) of `candidate`'s footprint supported by the top
/// faces of placed boxes directly beneath it. 100 if resting on the floor.
pub fn base_support_pct(candidate: &Corners, placed: &[PlacedBox]) -> f64 {
    if candidate[0].z == 0 {
        return 100.0;
    }
    let mut supported_area: u64 = 0;
    for p in placed {
        if p.corners[4].z != candidate[0].z {
            continue;
        }
        supported_area += xy_rect_overlap_area(&p.corners, candidate);
    }
    let footprint = footprint_area(Dims3::new(
        candidate[1].x - candidate[0].x,
        candidate[2].y - candidate[0].y,
        1,
    ));
    if footprint == 0 {
        return 0.0;
    }
    supported_area as f64 * 100.0 / footprint as f64
}

/// True iff a box at `candidate` with destination `dest` can be unloaded
/// without another destination's box blocking the rear-door corridor.
///
/// Asymmetric by design: `>=` on y (a box touching the candidate's rear
/// edge still blocks it) but strict `>` on the x/z extent overlap.
pub fn is_unloadable(candidate: &Corners, dest: u32, placed: &[PlacedBox]) -> bool {
    let cand0 = candidate[0];
    let cand7 = candidate[7];
    for p in placed {
        if p.destination_code == dest {
            continue;
        }
        let p0 = p.corners[0];
        let p7 = p.corners[7];
        if p0.y >= cand7.y && p7.x > cand0.x && p7.z > cand0.z {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{make_corners, Point3};
    use crate::model::Stackability;

    fn placed_at(origin: Point3, dims: Dims3, dest: u32, stackable: Stackability) -> PlacedBox {
        PlacedBox {
            name: "box-test".into(),
            corners: make_corners(origin, dims),
            type_index: 0,
            base_support_pct: 100.0,
            destination_code: dest,
            weight: 1.0,
            stackable,
        }
    }

    #[test]
    fn fit_rejects_overflow() {
        let c = make_corners(Point3::new(0, 0, 0), Dims3::new(50, 50, 50));
        assert!(fits_in_truck(&c, Dims3::new(100, 100, 100)));
        let c2 = make_corners(Point3::new(60, 0, 0), Dims3::new(50, 50, 50));
        assert!(!fits_in_truck(&c2, Dims3::new(100, 100, 100)));
    }

    #[test]
    fn non_stackable_blocks_xy_overlap_above() {
        let placed = vec![placed_at(
            Point3::new(0, 0, 0),
            Dims3::new(50, 50, 50),
            1,
            Stackability::NonStackable,
        )];
        let above = make_corners(Point3::new(10, 10, 50), Dims3::new(20, 20, 20));
        assert!(!respects_non_stackable(&above, &placed));

        let beside = make_corners(Point3::new(50, 0, 0), Dims3::new(20, 20, 20));
        assert!(respects_non_stackable(&beside, &placed));
    }

    #[test]
    fn base_support_full_on_floor() {
        let c = make_corners(Point3::new(0, 0, 0), Dims3::new(10, 10, 10));
        assert_eq!(base_support_pct(&c, &[]), 100.0);
    }

    #[test]
    fn base_support_zero_without_backing() {
        let placed = vec![placed_at(
            Point3::new(0, 0, 0),
            Dims3::new(100, 100, 100),
            1,
            Stackability::Stackable,
        )];
        let floating = make_corners(Point3::new(100, 0, 100), Dims3::new(100, 100, 100));
        assert_eq!(base_support_pct(&floating, &placed), 0.0);
    }

    #[test]
    fn unload_blocked_when_later_dest_behind() {
        let placed = vec![placed_at(
            Point3::new(0, 100, 0),
            Dims3::new(100, 100, 100),
            2,
            Stackability::Stackable,
        )];
        let candidate = make_corners(Point3::new(0, 0, 0), Dims3::new(100, 100, 100));
        assert!(!is_unloadable(&candidate, 1, &placed));
    }

    #[test]
    fn unload_ok_when_same_destination_behind() {
        let placed = vec![placed_at(
            Point3::new(0, 100, 0),
            Dims3::new(100, 100, 100),
            1,
            Stackability::Stackable,
        )];
        let candidate = make_corners(Point3::new(0, 0, 0), Dims3::new(100, 100, 100));
        assert!(is_unloadable(&candidate, 1, &placed));
    }
}
