//! Collision shapes and shape-tagged bodies

use crate::body::{RigidBody, RigidBodyDesc};
use crate::error::Result;
use crate::sphere::SphereBody;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Collision shape type
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ColliderShape {
    /// No collision volume; the body only integrates
    #[default]
    Particle,
    /// Sphere with radius
    Sphere {
        radius: f32,
    },
}

impl ColliderShape {
    /// Create a sphere shape
    pub fn sphere(radius: f32) -> Self {
        Self::Sphere { radius }
    }

    /// The shape's kind, without its data
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Particle => ShapeKind::Particle,
            Self::Sphere { .. } => ShapeKind::Sphere,
        }
    }
}

/// Shape discriminant, used to key collision dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Particle,
    Sphere,
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Particle => write!(f, "particle"),
            Self::Sphere => write!(f, "sphere"),
        }
    }
}

/// A simulated body tagged with its collision shape
#[derive(Debug, Clone, PartialEq)]
pub enum PhysicsBody {
    /// Shapeless body: integrates, never collides
    Particle(RigidBody),
    /// Sphere: collides with other spheres
    Sphere(SphereBody),
}

impl PhysicsBody {
    /// Build a body from its description
    pub fn from_desc(desc: &RigidBodyDesc) -> Result<Self> {
        let body = desc.to_rigid_body()?;
        match desc.shape {
            ColliderShape::Particle => Ok(Self::Particle(body)),
            ColliderShape::Sphere { radius } => {
                Ok(Self::Sphere(SphereBody::from_body(body, radius)?))
            }
        }
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Particle(_) => ShapeKind::Particle,
            Self::Sphere(_) => ShapeKind::Sphere,
        }
    }

    pub fn shape(&self) -> ColliderShape {
        match self {
            Self::Particle(_) => ColliderShape::Particle,
            Self::Sphere(sphere) => ColliderShape::sphere(sphere.radius()),
        }
    }

    /// The underlying rigid body, whatever the shape
    pub fn rigid(&self) -> &RigidBody {
        match self {
            Self::Particle(body) => body,
            Self::Sphere(sphere) => sphere.body(),
        }
    }

    pub fn rigid_mut(&mut self) -> &mut RigidBody {
        match self {
            Self::Particle(body) => body,
            Self::Sphere(sphere) => sphere.body_mut(),
        }
    }

    pub fn as_sphere(&self) -> Option<&SphereBody> {
        match self {
            Self::Sphere(sphere) => Some(sphere),
            _ => None,
        }
    }

    pub fn as_sphere_mut(&mut self) -> Option<&mut SphereBody> {
        match self {
            Self::Sphere(sphere) => Some(sphere),
            _ => None,
        }
    }
}

impl From<RigidBody> for PhysicsBody {
    fn from(body: RigidBody) -> Self {
        Self::Particle(body)
    }
}

impl From<SphereBody> for PhysicsBody {
    fn from(sphere: SphereBody) -> Self {
        Self::Sphere(sphere)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PhysicsError;
    use impulse_math::Vec3;

    #[test]
    fn test_from_desc() {
        let body = PhysicsBody::from_desc(
            &RigidBodyDesc::sphere(2.0).with_position(1.0, 2.0, 3.0),
        )
        .unwrap();

        assert_eq!(body.kind(), ShapeKind::Sphere);
        assert_eq!(body.shape(), ColliderShape::sphere(2.0));
        assert_eq!(body.rigid().position(), Vec3::new(1.0, 2.0, 3.0));

        let particle = PhysicsBody::from_desc(&RigidBodyDesc::particle()).unwrap();
        assert_eq!(particle.kind(), ShapeKind::Particle);
        assert!(particle.as_sphere().is_none());
    }

    #[test]
    fn test_from_desc_rejects_bad_radius() {
        let result = PhysicsBody::from_desc(&RigidBodyDesc::sphere(0.0));
        assert_eq!(result, Err(PhysicsError::InvalidRadius(0.0)));
    }

    #[test]
    fn test_rigid_mut_reaches_sphere_state() {
        let mut body = PhysicsBody::from(SphereBody::default());
        body.rigid_mut().add_velocity(Vec3::X);
        assert_eq!(body.as_sphere().map(|s| s.body().velocity()), Some(Vec3::X));
    }

    #[test]
    fn test_desc_parses_from_toml() {
        let desc: RigidBodyDesc = toml::from_str(
            r#"
            position = [1.0, 0.0, 0.0]
            shape = { type = "sphere", radius = 1.5 }
            "#,
        )
        .unwrap();
        assert_eq!(desc.shape, ColliderShape::sphere(1.5));
        assert_eq!(desc.mass, 1.0);
    }
}
