//! Build a terrain map for a synthetic site and write it to disk.
//!
//! Generates a rolling ground surface with scattered rock clusters, runs
//! the full pipeline, prints a few queries and saves the result.
//!
//! Usage:
//!   cargo run --example build_site
//!   cargo run --example build_site -- --config configs/terrain.yaml --extent 40 --csv

use std::path::Path;

use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use bhumi_map::io::{export_grid_csv, save_bhumi};
use bhumi_map::{BhumiConfig, Point3D, PointSet, TerrainMapBuilder};

/// Synthetic site terrain builder
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "configs/terrain.yaml")]
    config: String,

    /// Site side length in meters
    #[arg(short, long, default_value_t = 20.0)]
    extent: f32,

    /// Ground points per square meter
    #[arg(long, default_value_t = 25)]
    density: usize,

    /// Number of rock clusters
    #[arg(long, default_value_t = 6)]
    rocks: usize,

    /// Random seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Also export elevation and occupancy as CSV
    #[arg(long)]
    csv: bool,

    /// Output directory (overrides the config file)
    #[arg(short, long)]
    output: Option<String>,
}

fn synthetic_site(args: &Args) -> (PointSet, PointSet) {
    let mut rng = StdRng::seed_from_u64(args.seed);
    let extent = args.extent;

    let ground_count = (extent * extent) as usize * args.density;
    let ground: PointSet = (0..ground_count)
        .map(|_| {
            let x = rng.random_range(0.0..extent);
            let y = rng.random_range(0.0..extent);
            let noise = rng.random_range(-0.01..0.01);
            let z = 0.4 * (x * 0.25).sin() + 0.3 * (y * 0.15).cos() + noise;
            Point3D::new(x, y, z)
        })
        .collect();

    let mut obstacles = Vec::new();
    for _ in 0..args.rocks {
        let cx = rng.random_range(0.0..extent);
        let cy = rng.random_range(0.0..extent);
        let radius = rng.random_range(0.1..0.4);
        for _ in 0..60 {
            let r = radius * rng.random_range(0.0f32..1.0).sqrt();
            let a = rng.random_range(0.0..std::f32::consts::TAU);
            obstacles.push(Point3D::new(
                cx + r * a.cos(),
                cy + r * a.sin(),
                rng.random_range(0.05..0.5),
            ));
        }
    }

    (ground, PointSet::new(obstacles))
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    // Load configuration
    let config_path = Path::new(&args.config);
    let mut config = if config_path.exists() {
        BhumiConfig::load(config_path).unwrap_or_else(|e| {
            eprintln!("Warning: Failed to load config: {}, using defaults", e);
            BhumiConfig::default()
        })
    } else {
        println!(
            "Config not found at {}, using defaults",
            config_path.display()
        );
        BhumiConfig::default()
    };
    if let Some(output) = &args.output {
        config.persistence.output_dir = output.clone();
    }

    let (ground, obstacles) = synthetic_site(&args);
    println!(
        "Synthetic site: {:.0}m x {:.0}m, {} ground points, {} obstacle points",
        args.extent,
        args.extent,
        ground.len(),
        obstacles.len()
    );

    let builder = TerrainMapBuilder::new(config.to_terrain_config())
        .with_soil(config.soil_classifier());
    let (map, stats) = match builder.build_with_stats(&ground, &obstacles) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Build failed: {}", e);
            std::process::exit(1);
        }
    };

    println!(
        "Built {}x{} grid ({} cells) in {:.1}ms: {} occupied, {} inflated",
        stats.cols,
        stats.rows,
        stats.cells(),
        stats.elapsed_ms,
        stats.occupied_cells,
        stats.inflated_cells
    );

    let center = args.extent / 2.0;
    for (x, y) in [(center, center), (0.0, 0.0), (args.extent, args.extent)] {
        println!(
            "  ({:6.2}, {:6.2}): altitude {:+.3}m, {:?}",
            x,
            y,
            map.altitude(x, y),
            map.state_at(x, y)
        );
    }

    let persistence = &config.persistence;
    if let Err(e) = std::fs::create_dir_all(&persistence.output_dir) {
        eprintln!("Cannot create {}: {}", persistence.output_dir, e);
        std::process::exit(1);
    }

    if persistence.writes_bhumi() {
        let path = persistence.bhumi_path();
        match save_bhumi(&map, &path) {
            Ok(()) => println!("Saved {}", path.display()),
            Err(e) => eprintln!("Failed to save {}: {}", path.display(), e),
        }
    }

    if args.csv || persistence.writes_csv() {
        for (layer, grid) in [("elevation", map.elevation()), ("occupancy", map.occupancy())] {
            let path = persistence.csv_path(layer);
            match export_grid_csv(map.frame(), grid, &path) {
                Ok(()) => println!("Exported {}", path.display()),
                Err(e) => eprintln!("Failed to export {}: {}", path.display(), e),
            }
        }
    }
}
