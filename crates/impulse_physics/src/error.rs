//! Error types for the physics system

use thiserror::Error;

/// Physics system errors
///
/// Every variant is a precondition violation: the simulation is deterministic,
/// so nothing here is worth retrying.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PhysicsError {
    /// Mass must be finite and strictly positive
    #[error("Invalid mass: {0} (must be finite and > 0)")]
    InvalidMass(f32),

    /// Every moment-of-inertia component must be finite and strictly positive
    #[error("Invalid moment of inertia: {0:?} (each component must be finite and > 0)")]
    InvalidInertia([f32; 3]),

    /// Sphere radius must be finite and strictly positive
    #[error("Invalid sphere radius: {0} (must be finite and > 0)")]
    InvalidRadius(f32),

    /// Time steps must be finite and non-negative
    #[error("Invalid timestep: {0} (must be finite and >= 0)")]
    InvalidTimestep(f32),

    /// An update would have left a body with NaN or infinite state
    #[error("Non-finite {0} produced by integration")]
    NonFiniteState(&'static str),

    /// Rigid body not found
    #[error("Rigid body not found: {0}")]
    BodyNotFound(crate::body::BodyHandle),

    /// A body cannot be paired with itself
    #[error("Body {0} cannot collide with itself")]
    SelfPair(crate::body::BodyHandle),

    /// Invalid configuration
    #[error("Invalid physics configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for physics operations
pub type Result<T> = std::result::Result<T, PhysicsError>;
