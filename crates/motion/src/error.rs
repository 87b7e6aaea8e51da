//! Motion error types

use thiserror::Error;

/// Errors raised when an animation is built from invalid parameters.
///
/// Ticking, retargeting and easing evaluation never fail; construction is the
/// only place parameters are validated.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum MotionError {
    /// Spring stiffness must be finite and strictly positive
    #[error("Invalid spring stiffness: {0} (must be finite and > 0)")]
    InvalidStiffness(f64),

    /// Spring damping must be finite and non-negative
    #[error("Invalid spring damping: {0} (must be finite and >= 0)")]
    InvalidDamping(f64),

    /// Spring mass must be finite and strictly positive
    #[error("Invalid spring mass: {0} (must be finite and > 0)")]
    InvalidMass(f64),

    /// Spring response must be finite and strictly positive
    #[error("Invalid spring response: {0} (must be finite and > 0)")]
    InvalidResponse(f64),

    /// Decay constant must lie strictly between 0 and 1
    #[error("Invalid decay constant: {0} (must be in (0, 1))")]
    InvalidDecayConstant(f64),

    /// Tween duration must be finite and strictly positive
    #[error("Invalid animation duration: {0} (must be finite and > 0)")]
    InvalidDuration(f64),
}

/// Result type for motion operations
pub type Result<T> = std::result::Result<T, MotionError>;
