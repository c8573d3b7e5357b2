//! Point and cell index types.

use serde::{Deserialize, Serialize};

/// Planar world coordinates (meters, f32)
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldPoint {
    /// X coordinate in meters
    pub x: f32,
    /// Y coordinate in meters
    pub y: f32,
}

impl WorldPoint {
    /// Create a new world point
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Zero point (origin)
    pub const ZERO: WorldPoint = WorldPoint { x: 0.0, y: 0.0 };

    /// Both coordinates are finite (not NaN or infinite)
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A sample from the site point cloud (meters, z up)
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3D {
    /// X coordinate in meters
    pub x: f32,
    /// Y coordinate in meters
    pub y: f32,
    /// Height in meters
    pub z: f32,
}

impl Point3D {
    /// Create a new 3-D point
    #[inline]
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Planar projection (drops z)
    #[inline]
    pub fn xy(&self) -> WorldPoint {
        WorldPoint::new(self.x, self.y)
    }

    /// All three coordinates are finite
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl From<(f32, f32, f32)> for Point3D {
    fn from((x, y, z): (f32, f32, f32)) -> Self {
        Point3D::new(x, y, z)
    }
}

/// Grid cell index (row-major: row follows y, column follows x)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CellIndex {
    /// Row index (y direction)
    pub row: usize,
    /// Column index (x direction)
    pub col: usize,
}

impl CellIndex {
    /// Create a new cell index
    #[inline]
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}
