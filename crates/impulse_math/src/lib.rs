//! # impulse_math - Vector Math for the Impulse Simulator
//!
//! The vector algebra every physics quantity in the workspace is built on:
//! positions, velocities, forces, torques and Euler-angle orientations are
//! all [`Vec3`] values.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod vector;

pub use vector::*;

/// Common math constants
pub mod consts {
    pub const PI: f32 = core::f32::consts::PI;
    pub const DEG_TO_RAD: f32 = PI / 180.0;
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
    pub const EPSILON: f32 = 1e-6;
}

/// Convert degrees to radians
#[inline]
pub fn radians(degrees: f32) -> f32 {
    degrees * consts::DEG_TO_RAD
}

/// Convert radians to degrees
#[inline]
pub fn degrees(radians: f32) -> f32 {
    radians * consts::RAD_TO_DEG
}

/// Linear interpolation
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

pub mod prelude {
    pub use crate::vector::Vec3;
    pub use crate::{radians, degrees, lerp};
}
