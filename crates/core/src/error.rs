//! Error kinds surfaced by cave generation and configuration loading.

use std::io;

use thiserror::Error;
use toml::de::Error as TomlError;

use crate::grid::MAX_GRID_CELLS;

/// Errors a caller of [`crate::CaveGenerator::generate`] can observe.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum GenerationError {
    #[error(
        "invalid grid dimensions {width}x{height}: need positive sides and at most {max} cells",
        max = MAX_GRID_CELLS
    )]
    InvalidDimensions { width: i64, height: i64 },

    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("cave generation failed after {attempts} attempts (last failure: {last_failure})")]
    GenerationFailed { attempts: u32, last_failure: AttemptFailure },
}

/// Why a single generation attempt was rejected.
///
/// These never reach the caller directly; the generator reseeds and retries.
/// The last one is carried by [`GenerationError::GenerationFailed`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum AttemptFailure {
    #[error("retained region has {floor_cells} floor cells, {required} required")]
    InsufficientFloorArea { floor_cells: usize, required: usize },

    #[error("no entrance/exit pair satisfies the minimum distance")]
    PlacementUnsatisfiable,

    #[error("exit is unreachable from the entrance")]
    Unreachable,

    #[error("entrance/exit path length {length} is shorter than {required}")]
    PathTooShort { length: u32, required: u32 },
}

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("config I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("config parse error: {0}")]
    Parse(#[from] TomlError),
}
