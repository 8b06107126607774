//! Grid error type.

use thiserror::Error;

use evc_core::GridPos;

use crate::Occupant;

/// Errors produced by `evc-grid`.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("grid must be at least 1x1, got {width}x{height}")]
    EmptyGrid { width: u32, height: u32 },

    #[error("grid dimension {0} exceeds the supported maximum")]
    TooLarge(u32),

    #[error("position {0} is outside the grid")]
    OutOfBounds(GridPos),

    #[error("{occupant:?} is not present at {pos}")]
    OccupantNotFound { pos: GridPos, occupant: Occupant },
}

pub type GridResult<T> = Result<T, GridError>;
