//! Physics configuration

use crate::error::{PhysicsError, Result};
use impulse_math::Vec3;
use serde::{Deserialize, Serialize};

/// Physics world configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Gravity vector, applied to every body as `mass * gravity` each step
    pub gravity: [f32; 3],

    /// Frame interval the host loop paces itself to. The world itself steps
    /// by whatever `dt` it is handed.
    pub timestep: f32,

    /// Restitution (bounciness) used for every contact: 0 = perfectly
    /// inelastic, 1 = perfectly elastic
    pub restitution: f32,

    /// Contact normal used when two sphere centres coincide
    pub fallback_normal: [f32; 3],

    /// Reset force/torque accumulators after each body is integrated
    pub clear_accumulators: bool,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: [0.0, 0.0, 0.0],
            timestep: 1.0 / 60.0,
            restitution: 0.5,
            fallback_normal: [0.0, 1.0, 0.0],
            clear_accumulators: true,
        }
    }
}

impl PhysicsConfig {
    /// Configuration where contacts conserve kinetic energy along the normal
    pub fn elastic() -> Self {
        Self {
            restitution: 1.0,
            ..Default::default()
        }
    }

    /// Configuration where colliding bodies lose all closing speed
    pub fn inelastic() -> Self {
        Self {
            restitution: 0.0,
            ..Default::default()
        }
    }

    /// Set gravity
    pub fn with_gravity(mut self, x: f32, y: f32, z: f32) -> Self {
        self.gravity = [x, y, z];
        self
    }

    /// Set timestep
    pub fn with_timestep(mut self, timestep: f32) -> Self {
        self.timestep = timestep;
        self
    }

    /// Set restitution
    pub fn with_restitution(mut self, restitution: f32) -> Self {
        self.restitution = restitution;
        self
    }

    /// Set the normal used for concentric spheres
    pub fn with_fallback_normal(mut self, x: f32, y: f32, z: f32) -> Self {
        self.fallback_normal = [x, y, z];
        self
    }

    /// Gravity as a vector
    pub fn gravity_vec(&self) -> Vec3 {
        Vec3::from_array(self.gravity)
    }

    /// Unit-length fallback normal. Only meaningful on a validated config.
    pub fn fallback_normal_vec(&self) -> Vec3 {
        Vec3::from_array(self.fallback_normal).normalize_or(Vec3::Y)
    }

    /// Check every field, rejecting values that would make the solver
    /// produce NaN or unphysical energy gain
    pub fn validate(&self) -> Result<()> {
        if !Vec3::from_array(self.gravity).is_finite() {
            return Err(PhysicsError::InvalidConfig(format!(
                "gravity must be finite, got {:?}",
                self.gravity
            )));
        }
        if !(self.timestep.is_finite() && self.timestep > 0.0) {
            return Err(PhysicsError::InvalidConfig(format!(
                "timestep must be finite and > 0, got {}",
                self.timestep
            )));
        }
        if !(0.0..=1.0).contains(&self.restitution) {
            return Err(PhysicsError::InvalidConfig(format!(
                "restitution must lie in [0, 1], got {}",
                self.restitution
            )));
        }
        if Vec3::from_array(self.fallback_normal).try_normalize().is_none() {
            return Err(PhysicsError::InvalidConfig(format!(
                "fallback normal must be a non-zero finite vector, got {:?}",
                self.fallback_normal
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = PhysicsConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.restitution, 0.5);
        assert_eq!(config.gravity_vec(), Vec3::ZERO);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(PhysicsConfig::default().with_restitution(1.5).validate().is_err());
        assert!(PhysicsConfig::default().with_timestep(0.0).validate().is_err());
        assert!(PhysicsConfig::default().with_gravity(f32::NAN, 0.0, 0.0).validate().is_err());
        assert!(PhysicsConfig::default()
            .with_fallback_normal(0.0, 0.0, 0.0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_fallback_normal_is_unit() {
        let config = PhysicsConfig::default().with_fallback_normal(0.0, 0.0, 5.0);
        assert_eq!(config.fallback_normal_vec(), Vec3::Z);
    }

    #[test]
    fn test_presets() {
        assert_eq!(PhysicsConfig::elastic().restitution, 1.0);
        assert_eq!(PhysicsConfig::inelastic().restitution, 0.0);
    }
}
