//! The pivot manager: maintains the candidate set of origin points a box may
//! be placed at, and orders them per the configured [`LoadPattern`].

use crate::config::LoadPattern;
use crate::geometry::Point3;

/// Candidate origin points. Order of insertion is preserved (no deduping),
/// matching the reference behavior: a pivot can appear more than once if two
/// placements produce the same corner, and only the pivot actually used is
/// removed.
#[derive(Debug, Clone)]
pub struct PivotSet {
    pivots: Vec<Point3>,
}

impl Default for PivotSet {
    fn default() -> Self {
        Self::new()
    }
}

impl PivotSet {
    pub fn new() -> Self {
        Self {
            pivots: vec![Point3::new(0, 0, 0)],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pivots.is_empty()
    }

    /// Returns the pivots ordered per `pattern`: ground pivots (z=0) and
    /// aerial pivots (z>0) are sorted independently with a stable sort, then
    /// concatenated per the pattern's policy.
    pub fn ordered(&self, pattern: LoadPattern) -> Vec<Point3> {
        let mut ground: Vec<Point3> = self.pivots.iter().copied().filter(|p| p.z == 0).collect();
        let mut aerial: Vec<Point3> = self.pivots.iter().copied().filter(|p| p.z != 0).collect();

        match pattern {
            LoadPattern::Side | LoadPattern::Default => {
                ground.sort_by_key(|p| (p.y, p.x, p.z));
                aerial.sort_by_key(|p| (p.z, p.y, p.x));
                let mut out = aerial;
                out.extend(ground);
                out
            }
            LoadPattern::Back | LoadPattern::RearLoading => {
                ground.sort_by_key(|p| (p.x, p.z, p.y));
                aerial.sort_by_key(|p| (p.z, p.x, p.y));
                let mut out = aerial;
                out.extend(ground);
                out
            }
            LoadPattern::UniformDist => {
                ground.sort_by_key(|p| (p.y, p.x, p.z));
                aerial.sort_by_key(|p| (p.z, p.y, p.x));
                let mut out = ground;
                out.extend(aerial);
                out
            }
        }
    }

    /// Removes the first occurrence of `used` (there may be duplicates;
    /// only one copy is retired per placement).
    pub fn retire(&mut self, used: Point3) {
        if let Some(idx) = self.pivots.iter().position(|&p| p == used) {
            self.pivots.remove(idx);
        }
    }

    /// Adds the seven non-origin corners of a newly placed box, then adds
    /// the synthetic escape-valve pivot `(0, y_max, 0)` if not already
    /// present, where `y_max` is the maximum y among all current pivots.
    pub fn expand_after_placement(&mut self, new_corners: &[Point3; 8]) {
        self.pivots.extend_from_slice(&new_corners[1..8]);
        let y_max = self.pivots.iter().map(|p| p.y).max().unwrap_or(0);
        let synthetic = Point3::new(0, y_max, 0);
        if !self.pivots.contains(&synthetic) {
            self.pivots.push(synthetic);
        }
    }
}
