use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("invalid coordinate ({x}, {y}): coordinates must be non-negative")]
    InvalidCoordinate { x: i32, y: i32 },

    #[error("invalid vision level {0}: must be 1 (cross), 2 (3x3), or 3 (5x5)")]
    InvalidVisionLevel(u8),

    #[error("{kind} slot at ({x}, {y}) is already occupied")]
    SlotOccupied { kind: &'static str, x: i32, y: i32 },

    #[error("invalid world dimensions {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type SimResult<T> = Result<T, SimError>;
