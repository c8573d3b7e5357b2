//! Batch construction of a [`TerrainMap`] from segmented point sets.

use std::time::Instant;

use log::info;

use crate::core::{PointSet, SoilClassifier, UniformSoil};
use crate::error::Result;
use crate::grid::{
    FootprintMask, GaussianKernel, GridFrame, TerrainConfig, build_elevation_grid,
    build_occupancy_grid, inflate,
};
use crate::index::SpatialIndex;
use crate::{TerrainGrids, TerrainMap};

/// Summary of a completed build
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BuildStats {
    /// Grid rows
    pub rows: usize,
    /// Grid columns
    pub cols: usize,
    /// Ground points indexed
    pub ground_points: usize,
    /// Obstacle points indexed
    pub obstacle_points: usize,
    /// Cells whose smoothed occupancy exceeds the threshold
    pub occupied_cells: usize,
    /// Cells blocked by inflation (0 when disabled)
    pub inflated_cells: usize,
    /// Wall-clock build time in milliseconds
    pub elapsed_ms: f64,
}

impl BuildStats {
    /// Total number of cells
    pub fn cells(&self) -> usize {
        self.rows * self.cols
    }
}

/// Builds terrain maps from ground and obstacle point sets.
///
/// # Example
/// ```rust
/// use bhumi_map::{PointSet, TerrainConfig, TerrainMapBuilder};
///
/// let ground = PointSet::from_xyz(&[(0.0, 0.0, 0.0), (2.0, 2.0, 0.0)]);
/// let map = TerrainMapBuilder::new(TerrainConfig::new(0.5, 0.5))
///     .build(&ground, &PointSet::empty())?;
/// assert_eq!(map.dimensions(), (6, 6));
/// # Ok::<(), bhumi_map::TerrainError>(())
/// ```
#[derive(Debug)]
pub struct TerrainMapBuilder {
    config: TerrainConfig,
    soil: Box<dyn SoilClassifier>,
}

impl TerrainMapBuilder {
    /// Create a builder with uniform default soil.
    pub fn new(config: TerrainConfig) -> Self {
        Self {
            config,
            soil: Box::new(UniformSoil::default()),
        }
    }

    /// Use a different soil classifier.
    pub fn with_soil(mut self, soil: Box<dyn SoilClassifier>) -> Self {
        self.soil = soil;
        self
    }

    /// Get the configuration
    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    /// Build the map.
    ///
    /// Fails on invalid configuration, an empty ground set, a point with a
    /// non-finite coordinate, or a cell with no ground neighbors. No partial
    /// map is returned.
    pub fn build(self, ground: &PointSet, obstacles: &PointSet) -> Result<TerrainMap> {
        self.build_with_stats(ground, obstacles).map(|(map, _)| map)
    }

    /// Build the map and report what was built.
    pub fn build_with_stats(
        self,
        ground: &PointSet,
        obstacles: &PointSet,
    ) -> Result<(TerrainMap, BuildStats)> {
        let start = Instant::now();
        let config = &self.config;
        config.validate()?;
        ground.ensure_finite("ground")?;
        obstacles.ensure_finite("obstacle")?;

        let frame = GridFrame::from_points(ground, config.resolution, config.margin)?;
        let bounds = frame.bounds();
        info!(
            "Terrain frame: {}x{} cells at {}m, x [{:.2}, {:.2}] y [{:.2}, {:.2}]",
            frame.cols(),
            frame.rows(),
            frame.resolution(),
            bounds.x_min,
            bounds.x_max,
            bounds.y_min,
            bounds.y_max
        );

        let ground_index = SpatialIndex::build_nonempty(ground, "ground")?;
        let obstacle_index = SpatialIndex::new(obstacles);

        let raw_elevation = build_elevation_grid(&frame, &ground_index, &config.elevation)?;
        let raw_occupancy = build_occupancy_grid(&frame, &obstacle_index, &config.occupancy);

        let kernel = GaussianKernel::from_config(&config.smoothing)?;
        let (elevation, occupancy) = kernel.apply_pair(&raw_elevation, &raw_occupancy)?;

        let threshold = config.occupancy.threshold;
        let inflation = if config.inflation.enabled {
            let mask = FootprintMask::new(config.inflation.robot_radius, frame.resolution())?;
            Some(inflate(&occupancy, &mask, threshold))
        } else {
            None
        };

        let stats = BuildStats {
            rows: frame.rows(),
            cols: frame.cols(),
            ground_points: ground_index.len(),
            obstacle_points: obstacle_index.len(),
            occupied_cells: occupancy.count_where(|v| v > threshold),
            inflated_cells: inflation
                .as_ref()
                .map_or(0, |grid| grid.count_where(|v| v > 0.0)),
            elapsed_ms: start.elapsed().as_secs_f64() * 1000.0,
        };
        info!(
            "Terrain map built: {} cells, {} occupied, {} inflated in {:.1}ms",
            stats.cells(),
            stats.occupied_cells,
            stats.inflated_cells,
            stats.elapsed_ms
        );

        let grids = TerrainGrids::new(frame, elevation, occupancy)?;
        let map = TerrainMap::from_parts(grids, inflation, config, Some(ground_index), self.soil);
        Ok((map, stats))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TerrainError;
    use crate::core::SoilParameters;

    #[test]
    fn test_empty_ground_rejected() {
        let result = TerrainMapBuilder::new(TerrainConfig::default())
            .build(&PointSet::empty(), &PointSet::empty());
        assert!(matches!(
            result,
            Err(TerrainError::EmptyInput { what: "ground" })
        ));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let ground = PointSet::from_xyz(&[(0.0, 0.0, 0.0)]);
        let result = TerrainMapBuilder::new(TerrainConfig::new(0.0, 1.0))
            .build(&ground, &PointSet::empty());
        assert!(matches!(
            result,
            Err(TerrainError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_nan_ground_coordinate_rejected() {
        let ground = PointSet::from_xyz(&[(0.0, 0.0, 1.0), (f32::NAN, 1.0, 1.0), (4.0, 4.0, 1.0)]);
        let result = TerrainMapBuilder::new(TerrainConfig::default())
            .build(&ground, &PointSet::empty());
        assert!(matches!(
            result,
            Err(TerrainError::NonFiniteInput {
                what: "ground",
                index: 1
            })
        ));
    }

    #[test]
    fn test_nan_ground_height_rejected() {
        let ground = PointSet::from_xyz(&[(0.0, 0.0, 1.0), (1.0, 1.0, f32::NAN), (4.0, 4.0, 1.0)]);
        let result = TerrainMapBuilder::new(TerrainConfig::default())
            .build(&ground, &PointSet::empty());
        assert!(matches!(
            result,
            Err(TerrainError::NonFiniteInput {
                what: "ground",
                index: 1
            })
        ));
    }

    #[test]
    fn test_non_finite_obstacle_rejected() {
        let ground = PointSet::from_xyz(&[(0.0, 0.0, 0.0), (4.0, 4.0, 0.0)]);
        let obstacles = PointSet::from_xyz(&[(2.0, 2.0, 0.5), (3.0, f32::INFINITY, 0.5)]);
        let result = TerrainMapBuilder::new(TerrainConfig::default()).build(&ground, &obstacles);
        assert!(matches!(
            result,
            Err(TerrainError::NonFiniteInput {
                what: "obstacle",
                index: 1
            })
        ));
    }

    #[test]
    fn test_stats() {
        let ground = PointSet::from_xyz(&[(0.0, 0.0, 0.0), (3.0, 3.0, 0.0)]);
        let obstacles = PointSet::from_xyz(&[(1.0, 1.0, 0.5)]);
        let config = TerrainConfig::new(1.0, 0.0).with_smoothing(1, 1.0);

        let (map, stats) = TerrainMapBuilder::new(config)
            .build_with_stats(&ground, &obstacles)
            .unwrap();

        assert_eq!((stats.rows, stats.cols), (3, 3));
        assert_eq!(stats.cells(), 9);
        assert_eq!(stats.ground_points, 2);
        assert_eq!(stats.obstacle_points, 1);
        assert_eq!(stats.inflated_cells, 0);
        assert!(map.inflation().is_none());
        assert!(map.sample_altitude(1.0, 1.0).is_some());
    }

    #[test]
    fn test_custom_soil() {
        let clay = SoilParameters {
            k_c: 13.19,
            k_phi: 692.15,
            n0: 0.5,
            n1: 0.0,
            phi: 13.0_f32.to_radians(),
        };
        let ground = PointSet::from_xyz(&[(0.0, 0.0, 0.0)]);
        let map = TerrainMapBuilder::new(TerrainConfig::new(1.0, 1.0))
            .with_soil(Box::new(UniformSoil::new(clay)))
            .build(&ground, &PointSet::empty())
            .unwrap();

        assert_eq!(map.soil_at(0.0, 0.0), clay);
    }
}
