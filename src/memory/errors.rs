use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemoryError {
    FrameOutOfRange { frame: usize, num_frames: usize },

    FrameNotOccupied { frame: usize },
}

pub type MemoryResult<T> = Result<T, MemoryError>;

impl fmt::Display for MemoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemoryError::FrameOutOfRange { frame, num_frames } => {
                write!(
                    f,
                    "memory error: frame {} out of range ({} frames)",
                    frame, num_frames
                )
            }

            MemoryError::FrameNotOccupied { frame } => {
                write!(f, "memory error: frame {} is free and cannot be evicted", frame)
            }
        }
    }
}

impl std::error::Error for MemoryError {}
