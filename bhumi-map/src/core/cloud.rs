//! Point set container for segmented site clouds.

use super::point::{Point3D, WorldPoint};
use crate::error::{Result, TerrainError};

/// An ordered, immutable set of 3-D points.
///
/// The terrain pipeline consumes two of these: the ground points (drive
/// elevation) and the obstacle points (drive occupancy). Segmentation happens
/// upstream; nothing here reclassifies points.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointSet {
    points: Vec<Point3D>,
}

impl PointSet {
    /// Create a point set from a vector of points.
    pub fn new(points: Vec<Point3D>) -> Self {
        Self { points }
    }

    /// Create an empty point set.
    pub fn empty() -> Self {
        Self { points: Vec::new() }
    }

    /// Create a point set from (x, y, z) tuples.
    pub fn from_xyz(xyz: &[(f32, f32, f32)]) -> Self {
        Self::new(xyz.iter().copied().map(Point3D::from).collect())
    }

    /// Number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the set has no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[Point3D] {
        &self.points
    }

    /// Iterate over the points.
    pub fn iter(&self) -> std::slice::Iter<'_, Point3D> {
        self.points.iter()
    }

    /// Reject the set if any point has a NaN or infinite coordinate.
    ///
    /// `what` names the set in the error ("ground", "obstacle").
    pub fn ensure_finite(&self, what: &'static str) -> Result<()> {
        match self.points.iter().position(|p| !p.is_finite()) {
            Some(index) => Err(TerrainError::NonFiniteInput { what, index }),
            None => Ok(()),
        }
    }

    /// Planar extent as (min, max), or None for an empty set.
    ///
    /// Single pass over the points.
    pub fn planar_extent(&self) -> Option<(WorldPoint, WorldPoint)> {
        let first = self.points.first()?;
        let mut min = first.xy();
        let mut max = first.xy();

        for p in &self.points[1..] {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }

        Some((min, max))
    }
}

impl From<Vec<Point3D>> for PointSet {
    fn from(points: Vec<Point3D>) -> Self {
        Self::new(points)
    }
}

impl FromIterator<Point3D> for PointSet {
    fn from_iter<I: IntoIterator<Item = Point3D>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a PointSet {
    type Item = &'a Point3D;
    type IntoIter = std::slice::Iter<'a, Point3D>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_extent() {
        assert!(PointSet::empty().planar_extent().is_none());
    }

    #[test]
    fn test_extent() {
        let set = PointSet::from_xyz(&[(1.0, 5.0, 0.0), (-2.0, 3.0, 9.0), (4.0, -1.0, -3.0)]);
        let (min, max) = set.planar_extent().unwrap();

        assert_eq!(min, WorldPoint::new(-2.0, -1.0));
        assert_eq!(max, WorldPoint::new(4.0, 5.0));
    }

    #[test]
    fn test_ensure_finite() {
        let clean = PointSet::from_xyz(&[(0.0, 0.0, 1.0), (4.0, 4.0, 1.0)]);
        assert!(clean.ensure_finite("ground").is_ok());
        assert!(PointSet::empty().ensure_finite("ground").is_ok());

        let bad_x = PointSet::from_xyz(&[(0.0, 0.0, 1.0), (f32::NAN, 1.0, 1.0)]);
        assert!(matches!(
            bad_x.ensure_finite("ground"),
            Err(TerrainError::NonFiniteInput {
                what: "ground",
                index: 1
            })
        ));

        let bad_z = PointSet::from_xyz(&[(1.0, 1.0, f32::INFINITY)]);
        assert!(matches!(
            bad_z.ensure_finite("obstacle"),
            Err(TerrainError::NonFiniteInput {
                what: "obstacle",
                index: 0
            })
        ));
    }

    #[test]
    fn test_single_point_extent() {
        let set = PointSet::from_xyz(&[(2.0, 3.0, 1.0)]);
        let (min, max) = set.planar_extent().unwrap();
        assert_eq!(min, max);
    }
}
