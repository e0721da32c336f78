/// Error types for stroke projection
use thiserror::Error;

/// Errors that can occur while lifting a stroke into 3D.
///
/// Rays that miss their target surface are not errors on their own; they only
/// surface here when the projector runs with
/// [`MissPolicy::Reject`](crate::MissPolicy::Reject).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProjectionError {
    /// Sky radius must be strictly positive, with a finite square.
    #[error("invalid sky radius: {0} (must be > 0 and small enough to square in f32)")]
    InvalidSkyRadius(f32),

    /// Camera produced a non-finite position or pick ray.
    #[error("invalid camera: {0}")]
    InvalidCamera(&'static str),

    /// Billboard anchor has a NaN or infinite coordinate.
    #[error("invalid anchor point: ({0}, {1}, {2})")]
    InvalidAnchor(f32, f32, f32),

    /// One or more stroke vertices could not be projected.
    #[error("{missed} of {total} stroke vertices missed the target surface")]
    Unprojectable { missed: usize, total: usize },
}

/// Result type for projection operations.
pub type Result<T> = std::result::Result<T, ProjectionError>;
