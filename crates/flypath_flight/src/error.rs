//! Error types for flypath_flight

use crate::curve::{ClipPolicy, FitMethod};
use thiserror::Error;

/// Errors raised while building a flight path
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PathError {
    /// Fewer than two control points were supplied to the curve fitter
    #[error("a curve needs at least 2 control points, got {count}")]
    InsufficientPoints { count: usize },

    /// A sampling step was non-finite or non-positive
    #[error("invalid sampling step {delta} on segment {segment}")]
    InvalidStepSize { segment: usize, delta: f32 },

    /// The interpolation method cannot be used with the clip policy
    #[error("{method:?} interpolation does not support {clip:?} clipping")]
    UnsupportedCombination { method: FitMethod, clip: ClipPolicy },

    /// Too many control points for a polynomial fit
    #[error("polynomial interpolation supports at most {max} control points, got {count}")]
    TooManyPoints { count: usize, max: usize },

    /// A separating line with no y-dependence cannot be plotted as y(x)
    #[error("separating line is vertical in plot space")]
    DegenerateLine,
}

/// Result type for flypath_flight operations
pub type Result<T> = std::result::Result<T, PathError>;
