//! Sphere-shaped rigid bodies

use crate::body::RigidBody;
use crate::error::{PhysicsError, Result};
use impulse_math::Vec3;

/// A rigid body with a spherical collision volume centred on its position.
///
/// The radius is independent of mass and inertia: changing it does not
/// rescale either.
#[derive(Debug, Clone, PartialEq)]
pub struct SphereBody {
    body: RigidBody,
    radius: f32,
}

impl Default for SphereBody {
    /// Unit sphere at the origin
    fn default() -> Self {
        Self {
            body: RigidBody::default(),
            radius: 1.0,
        }
    }
}

impl SphereBody {
    /// Sphere of `radius` at the origin with default mass and inertia
    pub fn new(radius: f32) -> Result<Self> {
        Self::from_body(RigidBody::default(), radius)
    }

    /// Sphere of `radius` centred at `(x, y, z)`
    pub fn at(x: f32, y: f32, z: f32, radius: f32) -> Result<Self> {
        Self::from_body(RigidBody::at(Vec3::new(x, y, z)), radius)
    }

    /// Attach a spherical volume to an existing body
    pub fn from_body(body: RigidBody, radius: f32) -> Result<Self> {
        Ok(Self {
            body,
            radius: validate_radius(radius)?,
        })
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Change the radius. Mass and moment of inertia are left as they are.
    pub fn set_radius(&mut self, radius: f32) -> Result<()> {
        self.radius = validate_radius(radius)?;
        Ok(())
    }

    pub fn body(&self) -> &RigidBody {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut RigidBody {
        &mut self.body
    }

    pub fn into_body(self) -> RigidBody {
        self.body
    }

    /// Shorthand for `self.body().position()`
    pub fn position(&self) -> Vec3 {
        self.body.position()
    }
}

pub(crate) fn validate_radius(radius: f32) -> Result<f32> {
    if radius.is_finite() && radius > 0.0 {
        Ok(radius)
    } else {
        Err(PhysicsError::InvalidRadius(radius))
    }
}
