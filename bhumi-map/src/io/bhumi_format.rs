//! Native .bhumi binary format for terrain persistence.
//!
//! Format:
//! - Header (32 bytes):
//!   - Magic: "BHUMI" (5 bytes)
//!   - Version: u8 (1 byte)
//!   - Rows: u32 (4 bytes, little-endian)
//!   - Cols: u32 (4 bytes, little-endian)
//!   - Resolution: f32 (4 bytes, little-endian)
//!   - Origin X: f32 (4 bytes, little-endian)
//!   - Origin Y: f32 (4 bytes, little-endian)
//!   - Reserved: 6 bytes
//! - Elevation: rows * cols f32 (little-endian, row-major)
//! - Occupancy: rows * cols f32 (little-endian, row-major, smoothed)
//!
//! Inflation is not stored; it is recomputed on load from the occupancy
//! layer and the configured robot radius.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use log::info;

use crate::core::WorldPoint;
use crate::error::{Result, TerrainError};
use crate::grid::{GridFrame, ScalarGrid};
use crate::{TerrainGrids, TerrainMap};

/// Magic bytes for .bhumi format
const MAGIC: &[u8; 5] = b"BHUMI";

/// Current format version
const VERSION: u8 = 1;

/// Header size in bytes
const HEADER_SIZE: usize = 32;

/// Save a map to .bhumi binary format
pub fn save_bhumi(map: &TerrainMap, path: &Path) -> Result<()> {
    let mut file = BufWriter::new(File::create(path)?);
    write_bhumi(map, &mut file)?;
    file.flush()?;
    info!(
        "Saved {}x{} terrain map to {}",
        map.frame().cols(),
        map.frame().rows(),
        path.display()
    );
    Ok(())
}

/// Write a map to a writer in .bhumi format
pub fn write_bhumi<W: Write>(map: &TerrainMap, writer: &mut W) -> Result<()> {
    write_layers(map.frame(), map.elevation(), map.occupancy(), writer)
}

/// Write persisted layers to a writer in .bhumi format
pub fn write_grids<W: Write>(grids: &TerrainGrids, writer: &mut W) -> Result<()> {
    write_layers(&grids.frame, &grids.elevation, &grids.occupancy, writer)
}

fn write_layers<W: Write>(
    frame: &GridFrame,
    elevation: &ScalarGrid,
    occupancy: &ScalarGrid,
    writer: &mut W,
) -> Result<()> {
    let rows = u32::try_from(frame.rows())
        .map_err(|_| TerrainError::InvalidFormat(format!("{} rows exceed u32", frame.rows())))?;
    let cols = u32::try_from(frame.cols())
        .map_err(|_| TerrainError::InvalidFormat(format!("{} cols exceed u32", frame.cols())))?;

    let mut header = [0u8; HEADER_SIZE];
    header[0..5].copy_from_slice(MAGIC);
    header[5] = VERSION;
    header[6..10].copy_from_slice(&rows.to_le_bytes());
    header[10..14].copy_from_slice(&cols.to_le_bytes());
    header[14..18].copy_from_slice(&frame.resolution().to_le_bytes());
    let origin = frame.origin();
    header[18..22].copy_from_slice(&origin.x.to_le_bytes());
    header[22..26].copy_from_slice(&origin.y.to_le_bytes());
    // Reserved bytes stay zero

    writer.write_all(&header)?;
    write_layer(elevation, writer)?;
    write_layer(occupancy, writer)?;
    Ok(())
}

fn write_layer<W: Write>(grid: &ScalarGrid, writer: &mut W) -> Result<()> {
    let mut bytes = Vec::with_capacity(grid.len() * 4);
    for value in grid.as_slice() {
        bytes.extend_from_slice(&value.to_le_bytes());
    }
    writer.write_all(&bytes)?;
    Ok(())
}

/// Load persisted layers from .bhumi binary format
pub fn load_bhumi(path: &Path) -> Result<TerrainGrids> {
    let mut file = BufReader::new(File::open(path)?);
    read_bhumi(&mut file)
}

/// Read persisted layers from a reader in .bhumi format
pub fn read_bhumi<R: Read>(reader: &mut R) -> Result<TerrainGrids> {
    let mut header = [0u8; HEADER_SIZE];
    reader.read_exact(&mut header)?;

    if &header[0..5] != MAGIC {
        return Err(TerrainError::InvalidFormat("Invalid magic bytes".to_string()));
    }

    let version = header[5];
    if version != VERSION {
        return Err(TerrainError::VersionMismatch {
            expected: VERSION,
            found: version,
        });
    }

    let rows = u32::from_le_bytes([header[6], header[7], header[8], header[9]]) as usize;
    let cols = u32::from_le_bytes([header[10], header[11], header[12], header[13]]) as usize;
    let resolution = f32::from_le_bytes([header[14], header[15], header[16], header[17]]);
    let origin_x = f32::from_le_bytes([header[18], header[19], header[20], header[21]]);
    let origin_y = f32::from_le_bytes([header[22], header[23], header[24], header[25]]);

    let frame = GridFrame::new(WorldPoint::new(origin_x, origin_y), resolution, rows, cols)
        .map_err(|e| TerrainError::InvalidFormat(format!("bad header: {}", e)))?;

    let cells = frame.cell_count();

    let elevation = read_layer(reader, rows, cols, cells)?;
    let occupancy = read_layer(reader, rows, cols, cells)?;

    TerrainGrids::new(frame, elevation, occupancy)
}

fn read_layer<R: Read>(
    reader: &mut R,
    rows: usize,
    cols: usize,
    cells: usize,
) -> Result<ScalarGrid> {
    let len = cells
        .checked_mul(4)
        .ok_or_else(|| TerrainError::InvalidFormat(format!("{} cells overflow", cells)))?;

    let mut bytes = Vec::new();
    reader.by_ref().take(len as u64).read_to_end(&mut bytes)?;
    if bytes.len() != len {
        return Err(TerrainError::InvalidFormat(format!(
            "truncated layer: expected {} bytes, found {}",
            len,
            bytes.len()
        )));
    }

    let data = bytes
        .chunks_exact(4)
        .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect();
    ScalarGrid::from_vec(rows, cols, data)
}
