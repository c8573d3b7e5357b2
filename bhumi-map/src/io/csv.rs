//! CSV export of terrain layers for plotting.
//!
//! One line per cell, `x,y,value`, where (x, y) is the cell's sample point.
//! Rows are written in grid order (row-major).

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::grid::{GridFrame, ScalarGrid};

/// Write a layer as `x,y,value` lines.
pub fn write_grid_csv<W: Write>(
    frame: &GridFrame,
    grid: &ScalarGrid,
    writer: &mut W,
) -> Result<()> {
    writeln!(writer, "x,y,value")?;
    for (cell, value) in grid.iter() {
        let p = frame.sample_point(cell);
        writeln!(writer, "{},{},{}", p.x, p.y, value)?;
    }
    Ok(())
}

/// Export a layer to a CSV file.
pub fn export_grid_csv(frame: &GridFrame, grid: &ScalarGrid, path: &Path) -> Result<()> {
    let mut file = BufWriter::new(File::create(path)?);
    write_grid_csv(frame, grid, &mut file)?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::WorldPoint;

    #[test]
    fn test_csv_lines() {
        let frame = GridFrame::new(WorldPoint::new(1.0, -1.0), 0.5, 2, 2).unwrap();
        let grid = ScalarGrid::from_fn(2, 2, |c| (c.row * 2 + c.col) as f32);

        let mut out = Vec::new();
        write_grid_csv(&frame, &grid, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec!["x,y,value", "1,-1,0", "1.5,-1,1", "1,-0.5,2", "1.5,-0.5,3"]
        );
    }
}
