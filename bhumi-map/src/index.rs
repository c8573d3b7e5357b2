//! Planar nearest-neighbor index over a point set.
//!
//! Uses an R-tree over the (x, y) projection of the points, so searches
//! ignore height. The original 3-D points are kept alongside the tree so
//! callers can read z for any neighbor index.

use rstar::RTree;
use rstar::primitives::GeomWithData;

use crate::core::{Point3D, PointSet, WorldPoint};
use crate::error::{Result, TerrainError};

/// Flattened point stored in the R-tree, tagged with its index in the set.
type IndexedPoint = GeomWithData<[f32; 2], usize>;

/// One result of a k-nearest query.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Neighbor {
    /// Index of the point in the indexed set
    pub index: usize,
    /// Squared planar distance to the query point
    pub distance_sq: f32,
}

impl Neighbor {
    /// Planar distance to the query point.
    #[inline]
    pub fn distance(&self) -> f32 {
        self.distance_sq.sqrt()
    }
}

/// Spatial index for k-nearest queries on the z = 0 projection.
///
/// Built once from a [`PointSet`], queried many times, never mutated.
///
/// # Example
/// ```rust
/// use bhumi_map::core::{PointSet, WorldPoint};
/// use bhumi_map::index::SpatialIndex;
///
/// let points = PointSet::from_xyz(&[(0.0, 0.0, 1.0), (5.0, 0.0, 2.0)]);
/// let index = SpatialIndex::new(&points);
///
/// let nearest = index.k_nearest(WorldPoint::new(4.0, 0.0), 1);
/// assert_eq!(nearest[0].index, 1);
/// ```
#[derive(Clone)]
pub struct SpatialIndex {
    tree: RTree<IndexedPoint>,
    points: Vec<Point3D>,
}

impl SpatialIndex {
    /// Create an index over a copy of `points`.
    pub fn new(points: &PointSet) -> Self {
        let indexed: Vec<IndexedPoint> = points
            .iter()
            .enumerate()
            .map(|(i, p)| GeomWithData::new([p.x, p.y], i))
            .collect();

        Self {
            tree: RTree::bulk_load(indexed),
            points: points.as_slice().to_vec(),
        }
    }

    /// Create an index, rejecting an empty point set.
    ///
    /// `what` names the set in the error ("ground", "obstacle").
    pub fn build_nonempty(points: &PointSet, what: &'static str) -> Result<Self> {
        if points.is_empty() {
            return Err(TerrainError::EmptyInput { what });
        }
        Ok(Self::new(points))
    }

    /// Create an empty index.
    pub fn empty() -> Self {
        Self {
            tree: RTree::new(),
            points: Vec::new(),
        }
    }

    /// Number of indexed points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if index is empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Original 3-D point for a neighbor index.
    #[inline]
    pub fn point(&self, index: usize) -> Option<&Point3D> {
        self.points.get(index)
    }

    /// Find the k nearest points to `point` in the plane.
    ///
    /// Returns `min(k, len)` neighbors sorted by increasing distance.
    /// An empty index returns an empty vector.
    pub fn k_nearest(&self, point: WorldPoint, k: usize) -> Vec<Neighbor> {
        let query = [point.x, point.y];
        self.tree
            .nearest_neighbor_iter_with_distance_2(&query)
            .take(k)
            .map(|(indexed, distance_sq)| Neighbor {
                index: indexed.data,
                distance_sq,
            })
            .collect()
    }
}

impl Default for SpatialIndex {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Debug for SpatialIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpatialIndex")
            .field("size", &self.tree.size())
            .finish()
    }
}
