//! Error types for BhumiMap

use thiserror::Error;

/// Terrain construction and persistence errors.
///
/// Query-time boundary conditions are not errors: they are encoded in the
/// query return values (see [`crate::CellState`]).
#[derive(Error, Debug)]
pub enum TerrainError {
    /// A point set needed for frame computation or indexing is empty
    #[error("Empty input: the {what} point set has no points")]
    EmptyInput {
        /// Which point set ("ground", "obstacle")
        what: &'static str,
    },

    /// A point with a NaN or infinite coordinate was supplied
    #[error("Non-finite input: {what} point {index} has a NaN or infinite coordinate")]
    NonFiniteInput {
        /// Which point set ("ground", "obstacle")
        what: &'static str,
        /// Position of the offending point in the set
        index: usize,
    },

    /// A k-nearest query returned nothing while building a grid
    #[error("No neighbors found for cell (row {row}, col {col})")]
    NoNeighborsFound {
        /// Cell row
        row: usize,
        /// Cell column
        col: usize,
    },

    /// Configuration value out of range or missing
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Grid data length does not match its dimensions
    #[error("Grid size mismatch: expected {expected} cells, found {found}")]
    DimensionMismatch {
        /// rows * cols
        expected: usize,
        /// Cells actually supplied
        found: usize,
    },

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed map file
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// Map file written by an incompatible format version
    #[error("Version mismatch: expected {expected}, found {found}")]
    VersionMismatch {
        /// Supported format version
        expected: u8,
        /// Version found in the file
        found: u8,
    },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, TerrainError>;
