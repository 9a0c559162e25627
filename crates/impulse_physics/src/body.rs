//! Rigid body state and integration

use crate::collider::ColliderShape;
use crate::error::{PhysicsError, Result};
use impulse_math::{radians, Vec3};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Handle to a body in a [`PhysicsWorld`](crate::world::PhysicsWorld)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BodyHandle(pub(crate) u32);

impl BodyHandle {
    /// Create from a raw slot index
    pub fn from_raw(index: u32) -> Self {
        Self(index)
    }

    /// Get the raw slot index
    pub fn raw(&self) -> u32 {
        self.0
    }

    pub(crate) fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for BodyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The part of a body's state a renderer needs to build a model transform
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// World-space position
    pub position: Vec3,
    /// Euler angles in degrees
    pub orientation: Vec3,
}

impl Pose {
    /// Euler angles in radians
    pub fn orientation_radians(&self) -> Vec3 {
        Vec3::new(
            radians(self.orientation.x),
            radians(self.orientation.y),
            radians(self.orientation.z),
        )
    }
}

/// Kinematic and dynamic state of one physical object.
///
/// Mass and every moment-of-inertia component are kept strictly positive:
/// both are only settable through validating setters, so the reciprocals
/// taken during integration and impulse response are always defined.
#[derive(Debug, Clone, PartialEq)]
pub struct RigidBody {
    position: Vec3,
    /// Euler angles in degrees
    orientation: Vec3,
    velocity: Vec3,
    /// Degrees per second about each axis
    angular_velocity: Vec3,
    force: Vec3,
    torque: Vec3,
    mass: f32,
    moment_of_inertia: Vec3,
}

impl Default for RigidBody {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Vec3::ZERO,
            velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            force: Vec3::ZERO,
            torque: Vec3::ZERO,
            mass: 1.0,
            moment_of_inertia: Vec3::ONE,
        }
    }
}

impl RigidBody {
    /// Unit mass, unit inertia, at rest at the origin
    pub fn new() -> Self {
        Self::default()
    }

    /// Body at rest at `position`
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Advance the body by `dt` seconds using explicit Euler integration.
    ///
    /// Accumulated force and torque are consumed but not cleared. A `dt` of
    /// zero leaves the body untouched. If the step would produce a non-finite
    /// value the body is left as it was and an error is returned.
    pub fn integrate(&mut self, dt: f32) -> Result<()> {
        self.integrate_with_gravity(dt, Vec3::ZERO)
    }

    /// [`integrate`](Self::integrate) with a uniform `gravity` acceleration
    /// added for this step only. Gravity never enters the force accumulator.
    pub fn integrate_with_gravity(&mut self, dt: f32, gravity: Vec3) -> Result<()> {
        if !(dt.is_finite() && dt >= 0.0) {
            return Err(PhysicsError::InvalidTimestep(dt));
        }
        if dt == 0.0 {
            return Ok(());
        }

        let acceleration = self.force / self.mass + gravity;
        let velocity = self.velocity + acceleration * dt;
        let position = self.position + velocity * dt;
        let angular_velocity =
            self.angular_velocity + self.torque.div_elem(self.moment_of_inertia) * dt;
        let orientation = self.orientation + angular_velocity * dt;

        ensure_finite(velocity, "velocity")?;
        ensure_finite(position, "position")?;
        ensure_finite(angular_velocity, "angular velocity")?;
        ensure_finite(orientation, "orientation")?;

        self.velocity = velocity;
        self.position = position;
        self.angular_velocity = angular_velocity;
        self.orientation = orientation;
        Ok(())
    }

    /// Accumulate `force` applied at the world-space point `at_point`.
    /// An off-centre application also accumulates torque.
    pub fn apply_force(&mut self, force: Vec3, at_point: Vec3) {
        self.force += force;
        self.torque -= (at_point - self.position).cross(force);
    }

    /// Accumulate `force` through the centre of mass (no torque)
    pub fn apply_central_force(&mut self, force: Vec3) {
        self.force += force;
    }

    /// Accumulate `torque`
    pub fn apply_torque(&mut self, torque: Vec3) {
        self.torque += torque;
    }

    /// Apply `impulse` at the world-space point `at_point`. Takes effect
    /// immediately, with no `dt` factor. A non-finite result is rejected and
    /// leaves the body untouched.
    pub fn apply_impulse(&mut self, impulse: Vec3, at_point: Vec3) -> Result<()> {
        let (velocity, angular_velocity) = self.impulse_response(impulse, at_point)?;
        self.velocity = velocity;
        self.angular_velocity = angular_velocity;
        Ok(())
    }

    /// Linear and angular velocity after `impulse` at `at_point`, without
    /// committing them
    pub(crate) fn impulse_response(
        &self,
        impulse: Vec3,
        at_point: Vec3,
    ) -> Result<(Vec3, Vec3)> {
        let velocity = self.velocity + impulse / self.mass;
        let angular_velocity = self.angular_velocity
            - (at_point - self.position).cross(impulse).div_elem(self.moment_of_inertia);

        ensure_finite(velocity, "velocity")?;
        ensure_finite(angular_velocity, "angular velocity")?;
        Ok((velocity, angular_velocity))
    }

    pub fn clear_force(&mut self) {
        self.force = Vec3::ZERO;
    }

    pub fn clear_torque(&mut self) {
        self.torque = Vec3::ZERO;
    }

    pub fn add_velocity(&mut self, velocity: Vec3) {
        self.velocity += velocity;
    }

    pub fn clear_velocity(&mut self) {
        self.velocity = Vec3::ZERO;
    }

    pub fn add_angular_velocity(&mut self, angular_velocity: Vec3) {
        self.angular_velocity += angular_velocity;
    }

    pub fn clear_angular_velocity(&mut self) {
        self.angular_velocity = Vec3::ZERO;
    }

    /// Move by `delta` without touching velocity
    pub fn translate(&mut self, delta: Vec3) {
        self.position += delta;
    }

    /// Rotate by `delta` degrees about each axis
    pub fn rotate(&mut self, delta: Vec3) {
        self.orientation += delta;
    }

    // ==================== Accessors ====================

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Euler angles in degrees
    pub fn orientation(&self) -> Vec3 {
        self.orientation
    }

    pub fn set_orientation(&mut self, orientation: Vec3) {
        self.orientation = orientation;
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    pub fn angular_velocity(&self) -> Vec3 {
        self.angular_velocity
    }

    pub fn set_angular_velocity(&mut self, angular_velocity: Vec3) {
        self.angular_velocity = angular_velocity;
    }

    /// Force accumulated since the last [`clear_force`](Self::clear_force)
    pub fn force(&self) -> Vec3 {
        self.force
    }

    /// Torque accumulated since the last [`clear_torque`](Self::clear_torque)
    pub fn torque(&self) -> Vec3 {
        self.torque
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    pub fn inverse_mass(&self) -> f32 {
        1.0 / self.mass
    }

    /// Set the mass. Rejects zero, negative and non-finite values.
    pub fn set_mass(&mut self, mass: f32) -> Result<()> {
        self.mass = validate_mass(mass)?;
        Ok(())
    }

    /// Diagonal moment of inertia
    pub fn moment_of_inertia(&self) -> Vec3 {
        self.moment_of_inertia
    }

    /// Set the diagonal moment of inertia. Every component must be finite
    /// and strictly positive.
    pub fn set_moment_of_inertia(&mut self, moment_of_inertia: Vec3) -> Result<()> {
        self.moment_of_inertia = validate_inertia(moment_of_inertia)?;
        Ok(())
    }

    /// Snapshot of position and orientation for rendering
    pub fn pose(&self) -> Pose {
        Pose {
            position: self.position,
            orientation: self.orientation,
        }
    }

    /// Linear momentum `mass * velocity`
    pub fn momentum(&self) -> Vec3 {
        self.velocity * self.mass
    }
}

fn ensure_finite(v: Vec3, what: &'static str) -> Result<()> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(PhysicsError::NonFiniteState(what))
    }
}

pub(crate) fn validate_mass(mass: f32) -> Result<f32> {
    if mass.is_finite() && mass > 0.0 {
        Ok(mass)
    } else {
        Err(PhysicsError::InvalidMass(mass))
    }
}

pub(crate) fn validate_inertia(moment_of_inertia: Vec3) -> Result<Vec3> {
    if moment_of_inertia.is_finite() && moment_of_inertia.min_component() > 0.0 {
        Ok(moment_of_inertia)
    } else {
        Err(PhysicsError::InvalidInertia(moment_of_inertia.to_array()))
    }
}

/// Description for creating a body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RigidBodyDesc {
    /// Initial position
    pub position: [f32; 3],
    /// Initial orientation (Euler angles, degrees)
    pub orientation: [f32; 3],
    /// Initial linear velocity
    pub linear_velocity: [f32; 3],
    /// Initial angular velocity (degrees per second)
    pub angular_velocity: [f32; 3],
    /// Mass, must be > 0
    pub mass: f32,
    /// Diagonal moment of inertia, each component must be > 0
    pub moment_of_inertia: [f32; 3],
    /// Collision shape
    pub shape: ColliderShape,
}

impl Default for RigidBodyDesc {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 0.0],
            orientation: [0.0, 0.0, 0.0],
            linear_velocity: [0.0, 0.0, 0.0],
            angular_velocity: [0.0, 0.0, 0.0],
            mass: 1.0,
            moment_of_inertia: [1.0, 1.0, 1.0],
            shape: ColliderShape::Particle,
        }
    }
}

impl RigidBodyDesc {
    /// Describe a sphere of the given radius
    pub fn sphere(radius: f32) -> Self {
        Self {
            shape: ColliderShape::sphere(radius),
            ..Default::default()
        }
    }

    /// Describe a shapeless particle
    pub fn particle() -> Self {
        Self::default()
    }

    /// Set position
    pub fn with_position(mut self, x: f32, y: f32, z: f32) -> Self {
        self.position = [x, y, z];
        self
    }

    /// Set orientation in degrees
    pub fn with_orientation(mut self, x: f32, y: f32, z: f32) -> Self {
        self.orientation = [x, y, z];
        self
    }

    /// Set linear velocity
    pub fn with_linear_velocity(mut self, x: f32, y: f32, z: f32) -> Self {
        self.linear_velocity = [x, y, z];
        self
    }

    /// Set angular velocity in degrees per second
    pub fn with_angular_velocity(mut self, x: f32, y: f32, z: f32) -> Self {
        self.angular_velocity = [x, y, z];
        self
    }

    /// Set mass
    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass;
        self
    }

    /// Set moment of inertia
    pub fn with_moment_of_inertia(mut self, x: f32, y: f32, z: f32) -> Self {
        self.moment_of_inertia = [x, y, z];
        self
    }

    /// Build the rigid body state, validating mass and inertia
    pub fn to_rigid_body(&self) -> Result<RigidBody> {
        Ok(RigidBody {
            position: Vec3::from_array(self.position),
            orientation: Vec3::from_array(self.orientation),
            velocity: Vec3::from_array(self.linear_velocity),
            angular_velocity: Vec3::from_array(self.angular_velocity),
            force: Vec3::ZERO,
            torque: Vec3::ZERO,
            mass: validate_mass(self.mass)?,
            moment_of_inertia: validate_inertia(Vec3::from_array(self.moment_of_inertia))?,
        })
    }
}
